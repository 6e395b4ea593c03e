use crate::core::config::IdpConfig;
use crate::core::error::{AppError, Result};
use crate::features::idp::token_manager::IdpTokenManager;
use crate::shared::constants::MSG_INVALID_CREDENTIALS;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Scopes requested for end-user sessions; offline_access yields a refresh token
const SESSION_SCOPES: &str = "openid profile email offline_access";

/// User record from the provider's management API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpUserResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub primary_email_verified: bool,
}

/// Response from password and refresh token grants
#[derive(Debug, Deserialize)]
pub struct TokenGrantResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(rename = "scope", default)]
    pub _scope: String,
    pub refresh_token: Option<String>,
}

/// Request to create a new user via the management API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserRequest {
    primary_email: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// Error response from the management API
#[derive(Debug, Deserialize)]
struct IdpErrorResponse {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: String,
}

/// Client for the identity provider's OIDC token endpoint and management API.
///
/// Credential verification never happens in this service: sign-in is a
/// password grant, sign-up goes through the management API, and sign-out
/// revokes the refresh token at the provider.
pub struct IdpClient {
    config: IdpConfig,
    /// Resource indicator sent with token grants so the issued access token
    /// is scoped to this API
    api_resource: String,
    token_manager: Arc<IdpTokenManager>,
    http_client: reqwest::Client,
}

impl IdpClient {
    pub fn new(
        config: IdpConfig,
        api_resource: String,
        token_manager: Arc<IdpTokenManager>,
    ) -> Self {
        Self {
            config,
            api_resource,
            token_manager,
            http_client: reqwest::Client::new(),
        }
    }

    /// Basic auth header for the confidential client
    fn client_auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.config.client_id, self.config.client_secret);
        format!("Basic {}", BASE64.encode(credentials.as_bytes()))
    }

    /// Sign in with email and password via the OAuth2 password grant
    pub async fn password_grant(&self, email: &str, password: &str) -> Result<TokenGrantResponse> {
        let form_body = [
            ("grant_type", "password"),
            ("username", email),
            ("password", password),
            ("resource", &self.api_resource),
            ("scope", SESSION_SCOPES),
        ];

        tracing::debug!("Requesting password grant for: {}", email);

        let response = self
            .http_client
            .post(&self.config.token_url)
            .header("Authorization", self.client_auth_header())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(&form_body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Password grant request failed: {}", e);
                AppError::ExternalServiceError(format!("Password grant request failed: {}", e))
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            // invalid_grant covers wrong password, unknown user and suspended accounts
            if status.as_u16() == 400 || status.as_u16() == 401 {
                tracing::debug!("Password grant rejected: HTTP {} - {}", status, body);
                return Err(AppError::Unauthorized(MSG_INVALID_CREDENTIALS.to_string()));
            }

            tracing::error!("Password grant failed: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Password grant failed: HTTP {}",
                status
            )));
        }

        let token_response: TokenGrantResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse token response: {}", e);
            AppError::ExternalServiceError(format!("Failed to parse token response: {}", e))
        })?;

        tracing::info!(
            "Password grant successful, expires in {} seconds, refresh_token present: {}",
            token_response.expires_in,
            token_response.refresh_token.is_some()
        );

        Ok(token_response)
    }

    /// Refresh an access token using a refresh token
    ///
    /// Uses the standard OAuth2 refresh_token grant type
    pub async fn refresh_grant(&self, refresh_token: &str) -> Result<TokenGrantResponse> {
        let form_body = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("resource", &self.api_resource),
            ("scope", SESSION_SCOPES),
        ];

        tracing::debug!("Refreshing access token");

        let response = self
            .http_client
            .post(&self.config.token_url)
            .header("Authorization", self.client_auth_header())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(&form_body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to refresh token: {}", e);
                AppError::ExternalServiceError(format!("Failed to refresh token: {}", e))
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Token refresh failed: HTTP {} - {}", status, body);

            // Invalid or expired refresh token
            if status.as_u16() == 400 || status.as_u16() == 401 {
                return Err(AppError::Unauthorized(
                    "Sessão expirada. Faça login novamente.".to_string(),
                ));
            }

            return Err(AppError::ExternalServiceError(format!(
                "Token refresh failed: HTTP {}",
                status
            )));
        }

        let token_response: TokenGrantResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse refresh token response: {}", e);
            AppError::ExternalServiceError(format!("Failed to parse refresh token response: {}", e))
        })?;

        tracing::info!(
            "Token refresh successful, expires in {} seconds",
            token_response.expires_in
        );

        Ok(token_response)
    }

    /// Revoke a refresh token at the provider (RFC 7009)
    ///
    /// Providers return 200 even for unknown tokens, so a failure here means
    /// the revocation endpoint itself is unreachable or rejected the client.
    pub async fn revoke_token(&self, refresh_token: &str) -> Result<()> {
        let form_body = [
            ("token", refresh_token),
            ("token_type_hint", "refresh_token"),
        ];

        tracing::debug!("Revoking refresh token");

        let response = self
            .http_client
            .post(&self.config.revocation_url)
            .header("Authorization", self.client_auth_header())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(&form_body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to revoke token: {}", e);
                AppError::ExternalServiceError(format!("Failed to revoke token: {}", e))
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Token revocation failed: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Token revocation failed: HTTP {}",
                status
            )));
        }

        tracing::info!("Refresh token revoked");
        Ok(())
    }

    /// Create a new user via the management API
    ///
    /// Returns Conflict error if the email is already registered
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<IdpUserResponse> {
        let token_response = self.token_manager.get_access_token().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to get management token: {}", e))
        })?;

        let url = format!("{}/api/users", self.token_manager.api_base_url());

        let request_body = CreateUserRequest {
            primary_email: email.to_string(),
            password: password.to_string(),
            name: name.map(String::from),
        };

        tracing::debug!("Creating user at identity provider: {}", email);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&token_response.access_token)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to create user at identity provider: {}", e);
                AppError::ExternalServiceError(format!("Failed to create user: {}", e))
            })?;

        let status = response.status();

        if status.is_success() {
            let user = response.json::<IdpUserResponse>().await.map_err(|e| {
                tracing::error!("Failed to parse user response: {}", e);
                AppError::ExternalServiceError(format!("Failed to parse user response: {}", e))
            })?;

            tracing::info!("Successfully created user: {}", user.id);
            return Ok(user);
        }

        // Handle error responses
        let body = response.text().await.unwrap_or_default();

        // Duplicate email comes back as HTTP 422 with an email-exists code
        if status.as_u16() == 422 {
            if let Ok(error_response) = serde_json::from_str::<IdpErrorResponse>(&body) {
                if error_response.code == "user.email.exists"
                    || error_response.message.contains("already")
                {
                    return Err(AppError::Conflict("Email já cadastrado.".to_string()));
                }
            }
            // Generic 422 error
            return Err(AppError::Validation(format!("Invalid request: {}", body)));
        }

        tracing::error!("Management API error: HTTP {} - {}", status, body);
        Err(AppError::ExternalServiceError(format!(
            "Management API error: HTTP {}",
            status
        )))
    }

    /// Find user by email
    ///
    /// Returns None if user not found
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<IdpUserResponse>> {
        let token_response = self.token_manager.get_access_token().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to get management token: {}", e))
        })?;

        // Use search endpoint with email filter
        let url = format!(
            "{}/api/users?search={}",
            self.token_manager.api_base_url(),
            urlencoding::encode(email)
        );

        tracing::debug!("Searching for user by email: {}", email);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token_response.access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to search users: {}", e);
                AppError::ExternalServiceError(format!("Failed to search users: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Management API error: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Management API error: HTTP {}",
                status
            )));
        }

        let users = response.json::<Vec<IdpUserResponse>>().await.map_err(|e| {
            tracing::error!("Failed to parse users response: {}", e);
            AppError::ExternalServiceError(format!("Failed to parse users response: {}", e))
        })?;

        // Find exact email match (search may return partial matches)
        let user = users
            .into_iter()
            .find(|u| u.primary_email.as_deref() == Some(email));

        Ok(user)
    }

    /// Fetch a user's profile from the management API
    pub async fn get_user(&self, user_id: &str) -> Result<IdpUserResponse> {
        let token_response = self.token_manager.get_access_token().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to get management token: {}", e))
        })?;

        let url = format!(
            "{}/api/users/{}",
            self.token_manager.api_base_url(),
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching user profile: {}", user_id);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token_response.access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user profile: {}", e);
                AppError::ExternalServiceError(format!("Failed to fetch user profile: {}", e))
            })?;

        let status = response.status();

        if status.as_u16() == 404 {
            return Err(AppError::NotFound("Usuário não encontrado.".to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Management API error: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Management API error: HTTP {}",
                status
            )));
        }

        let user = response.json::<IdpUserResponse>().await.map_err(|e| {
            tracing::error!("Failed to parse user response: {}", e);
            AppError::ExternalServiceError(format!("Failed to parse user response: {}", e))
        })?;

        Ok(user)
    }
}
