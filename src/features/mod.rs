//! Feature modules - Vertical slices of the application
//!
//! Each feature owns its models, DTOs, services, handlers and routes.

pub mod auth;
pub mod changelog;
pub mod files;
pub mod geocoding;
pub mod idp;
pub mod needs;
pub mod points;
pub mod rate_limits;
pub mod reports;
