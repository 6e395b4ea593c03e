//! Files feature - report photo storage.
//!
//! Thin front over the MinIO client: photos land in the public prefix of
//! the bucket and are referenced by URL from incident reports. No
//! metadata table; the report expiry sweeper cleans up stored objects.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/files/upload` | No | Upload a report photo |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::FileService;
