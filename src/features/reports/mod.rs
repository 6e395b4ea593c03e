//! Incident reports feature - anonymous flooding and landslide alerts.
//!
//! Reports are public, throttled per IP and live for 24 hours. New
//! reports are pushed to subscribers over SSE; an hourly sweeper removes
//! rows whose expiry has long passed.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/reports` | No (throttled) | Submit a report |
//! | GET | `/api/reports` | No | List reports in a 6/12/24h window |
//! | GET | `/api/reports/feed` | No | SSE feed of new reports |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod workers;

pub use services::ReportService;
pub use workers::ReportExpirySweeper;
