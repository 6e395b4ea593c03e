use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ROLE_ADMIN, ROLE_POINT_ADMIN};

/// Session context resolved from a validated access token.
///
/// Built once by the auth middleware and carried in request extensions so
/// handlers never reach for global state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Identity provider subject, used as the owning user id everywhere
    pub sub: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check if user is a site-wide admin
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Check if user manages collection points of their own
    #[allow(dead_code)]
    pub fn is_point_admin(&self) -> bool {
        self.has_role(ROLE_POINT_ADMIN)
    }
}

/// Namespaced custom claims carried by the access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomClaims {
    #[serde(default)]
    pub roles: Vec<String>,
}
