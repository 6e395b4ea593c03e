//! Per-IP throttling for anonymous endpoints.
//!
//! Backed by the `rate_limits` table; no routes of its own.

pub mod services;

pub use services::RateLimitService;
