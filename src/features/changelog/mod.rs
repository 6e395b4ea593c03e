//! Admin audit trail for collection point and need mutations.
//!
//! Every authenticated mutation records who did what; writes are
//! best-effort and never fail the operation being audited.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ChangeLogService;
