//! Supply needs feature - what each collection point is asking for.
//!
//! Needs belong to a collection point and cycle through three urgency
//! levels by manual toggles: low -> urgent -> excess -> low.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/points/{id}/needs` | Owner/admin | Add a need |
//! | POST | `/api/needs/{id}/toggle` | Owner/admin | Advance urgency one step |
//! | PUT | `/api/needs/{id}` | Owner/admin | Update a need |
//! | DELETE | `/api/needs/{id}` | Owner/admin | Remove a need |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::NeedService;
