//! Collection points feature - donation drop-off locations and shelters.
//!
//! Points are created by authenticated managers and browsed publicly.
//! Listings embed each point's supply needs; the nearby listing resolves
//! coordinates (cached or geocoded) and sorts by distance to the caller.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/points` | Yes | Register a collection point |
//! | GET | `/api/points` | No | List all points with needs |
//! | GET | `/api/points/nearby` | No | List points sorted by distance |
//! | GET | `/api/points/mine` | Yes | List the caller's points |
//! | GET | `/api/points/{id}` | No | Get a single point |
//! | PUT | `/api/points/{id}` | Owner/admin | Update a point |
//! | PATCH | `/api/points/{id}/status` | Owner/admin | Switch lifecycle status |
//! | DELETE | `/api/points/{id}` | Owner/admin | Delete a point |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PointService;
