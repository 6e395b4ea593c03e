use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::clients::IdpUserResponse;
use crate::features::auth::model::AuthenticatedUser;

/// Request DTO for user registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 8, message = "A senha deve ter pelo menos 8 caracteres"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "O nome deve ter entre 1 e 100 caracteres"))]
    pub name: Option<String>,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 1, message = "Informe a senha"))]
    pub password: String,
}

/// Request DTO for token refresh
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequestDto {
    #[validate(length(min = 1, message = "Informe o refresh token"))]
    pub refresh_token: String,
}

/// Request DTO for logout (refresh token revocation)
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LogoutRequestDto {
    #[validate(length(min = 1, message = "Informe o refresh token"))]
    pub refresh_token: String,
}

/// Response DTO for token refresh (same structure as auth response but without user info)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshTokenResponseDto {
    /// New JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
    /// New refresh token (if rotated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Response DTO for authentication (register/login)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// JWT access token issued by the identity provider
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
    /// Refresh token for obtaining new access tokens (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Authenticated user info (absent when the provider profile
    /// could not be fetched)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUserDto>,
}

/// User info included in auth response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    /// Identity provider user ID
    pub id: String,
    /// Display name (optional)
    pub name: Option<String>,
    /// Email address (optional)
    pub email: Option<String>,
    /// Whether email is verified
    pub email_verified: bool,
}

impl From<IdpUserResponse> for AuthUserDto {
    fn from(user: IdpUserResponse) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.primary_email,
            email_verified: user.primary_email_verified,
        }
    }
}

/// DTO for /auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub email_verified: bool,
    pub roles: Vec<String>,
}

impl MeResponseDto {
    pub fn from_parts(user: AuthenticatedUser, profile: IdpUserResponse) -> Self {
        Self {
            id: user.sub,
            name: profile.name,
            email: profile.primary_email,
            email_verified: profile.primary_email_verified,
            roles: user.roles,
        }
    }
}
