//! Role-based authorization guards for the application.
//!
//! These guards extract the authenticated user and verify they have the required roles.
//!
//! Roles are flat:
//! - admin: site-wide access, can manage any point and read the audit trail
//! - point_admin: manages the collection points they created
//!
//! Per-point ownership is enforced in the services (owner or admin), so the
//! only guard needed at the routing layer is the admin one.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for checking if user is a site-wide admin.
///
/// Only allows users with the "admin" role.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("Autenticação necessária.".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Acesso restrito a administradores.".to_string(),
            ));
        }

        Ok(RequireAdmin(user.clone()))
    }
}
