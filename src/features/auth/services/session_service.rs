use crate::core::error::Result;
use crate::features::auth::clients::IdpClient;
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, LoginRequestDto, LogoutRequestDto, MeResponseDto,
    RefreshTokenRequestDto, RefreshTokenResponseDto, RegisterRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use std::sync::Arc;

/// Service for session operations (register, login, refresh, logout)
pub struct SessionService {
    idp_client: Arc<IdpClient>,
}

impl SessionService {
    pub fn new(idp_client: Arc<IdpClient>) -> Self {
        Self { idp_client }
    }

    /// Register a new user and open a session for them
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        // Create user at the identity provider
        let user = self
            .idp_client
            .create_user(&dto.email, &dto.password, dto.name.as_deref())
            .await?;

        // Sign the new user in right away
        let token_response = self
            .idp_client
            .password_grant(&dto.email, &dto.password)
            .await?;

        Ok(AuthResponseDto {
            access_token: token_response.access_token,
            token_type: token_response.token_type,
            expires_in: token_response.expires_in,
            refresh_token: token_response.refresh_token,
            user: Some(AuthUserDto::from(user)),
        })
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        // The provider verifies the credentials; wrong password, unknown user
        // and suspended accounts all surface as Unauthorized
        let token_response = self
            .idp_client
            .password_grant(&dto.email, &dto.password)
            .await?;

        // Profile lookup is best-effort; the session is already open
        let user = match self.idp_client.find_user_by_email(&dto.email).await {
            Ok(found) => found.map(AuthUserDto::from),
            Err(e) => {
                tracing::warn!("Profile lookup after login failed: {}", e);
                None
            }
        };

        Ok(AuthResponseDto {
            access_token: token_response.access_token,
            token_type: token_response.token_type,
            expires_in: token_response.expires_in,
            refresh_token: token_response.refresh_token,
            user,
        })
    }

    /// Refresh access token using refresh token
    pub async fn refresh_token(
        &self,
        dto: RefreshTokenRequestDto,
    ) -> Result<RefreshTokenResponseDto> {
        let token_response = self.idp_client.refresh_grant(&dto.refresh_token).await?;

        Ok(RefreshTokenResponseDto {
            access_token: token_response.access_token,
            token_type: token_response.token_type,
            expires_in: token_response.expires_in,
            refresh_token: token_response.refresh_token,
        })
    }

    /// Logout by revoking the refresh token at the provider
    pub async fn logout(&self, dto: LogoutRequestDto) -> Result<()> {
        self.idp_client.revoke_token(&dto.refresh_token).await
    }

    /// Get current user info (for /me endpoint)
    pub async fn get_current_user(&self, user: AuthenticatedUser) -> Result<MeResponseDto> {
        // Enrich the session with the provider profile when reachable
        match self.idp_client.get_user(&user.sub).await {
            Ok(profile) => Ok(MeResponseDto::from_parts(user, profile)),
            Err(e) => {
                tracing::warn!("Profile fetch for /me failed: {}", e);
                Ok(MeResponseDto {
                    id: user.sub,
                    name: None,
                    email: None,
                    email_verified: false,
                    roles: user.roles,
                })
            }
        }
    }
}
