use sqlx::PgPool;

use crate::core::error::{AppError, Result};

/// Sliding window width in hours
const WINDOW_HOURS: i32 = 1;

/// Rows older than this many hours are purged opportunistically
const PURGE_AFTER_HOURS: i32 = 24;

/// Per-IP throttle for anonymous submissions.
///
/// Counts hits per IP and action over a sliding one-hour window backed by
/// the `rate_limits` table. Callers without a resolvable IP are let
/// through: the throttle is an abuse brake, not an auth layer.
pub struct RateLimitService {
    pool: PgPool,
    max_per_hour: i64,
}

impl RateLimitService {
    pub fn new(pool: PgPool, max_per_hour: i64) -> Self {
        Self { pool, max_per_hour }
    }

    /// Check the window for `ip`/`action` and record the hit when allowed.
    ///
    /// Returns `false` when the caller is over the limit. Stale rows are
    /// purged on the way, piggybacking on the same round trip.
    pub async fn check_and_record(&self, ip: Option<&str>, action: &str) -> Result<bool> {
        let Some(ip) = ip else {
            return Ok(true);
        };

        sqlx::query(
            r#"
            DELETE FROM rate_limits
            WHERE created_at < now() - make_interval(hours => $1)
            "#,
        )
        .bind(PURGE_AFTER_HOURS)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let used: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM rate_limits
            WHERE ip_address = $1
              AND action = $2
              AND created_at >= now() - make_interval(hours => $3)
            "#,
        )
        .bind(ip)
        .bind(action)
        .bind(WINDOW_HOURS)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if used >= self.max_per_hour {
            tracing::info!("Rate limit hit for {} on {}: {} in window", ip, action, used);
            return Ok(false);
        }

        sqlx::query("INSERT INTO rate_limits (ip_address, action) VALUES ($1, $2)")
            .bind(ip)
            .bind(action)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(true)
    }
}
