use sqlx::PgPool;
use tokio::sync::broadcast;

use crate::core::config::ReportConfig;
use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto};
use crate::features::reports::models::Report;
use crate::shared::constants::MSG_FILL_ALL_FIELDS;

/// Subscribers further behind than this many events start skipping
const FEED_CAPACITY: usize = 256;

/// Expired reports linger this long before the sweeper removes them
const SWEEP_GRACE_HOURS: i32 = 1;

/// Rows removed per sweep statement
const SWEEP_BATCH_SIZE: i64 = 500;

/// Outcome of one expiry sweep
pub struct SweepOutcome {
    /// Rows removed
    pub removed: u64,
    /// Photo URLs the removed reports carried, for storage cleanup
    pub photo_urls: Vec<String>,
}

/// Service for anonymous incident reports.
///
/// Every successful creation is broadcast to the live feed. Visibility is
/// purely time-based: a report stops being served the moment `expires_at`
/// passes, whether or not the sweeper already removed the row.
pub struct ReportService {
    pool: PgPool,
    feed: broadcast::Sender<ReportResponseDto>,
    ttl_hours: i64,
}

impl ReportService {
    pub fn new(pool: PgPool, config: &ReportConfig) -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            pool,
            feed,
            ttl_hours: config.ttl_hours,
        }
    }

    /// Create a report; trims free-text fields and stamps the expiry.
    ///
    /// `expires_at` is computed from the same clock as `created_at`, in the
    /// insert itself.
    pub async fn create(
        &self,
        dto: CreateReportDto,
        client_ip: Option<String>,
    ) -> Result<ReportResponseDto> {
        let address = dto.address.trim();
        let neighborhood = dto.neighborhood.trim();
        let description = dto.description.trim();

        if address.is_empty() || neighborhood.is_empty() || description.is_empty() {
            return Err(AppError::Validation(MSG_FILL_ALL_FIELDS.to_string()));
        }

        let reference = dto
            .reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());

        let report: Report = sqlx::query_as(
            r#"
            INSERT INTO reports
                (report_type, address, neighborhood, reference, description,
                 photo_url, ip_address, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, now() + make_interval(hours => $8))
            RETURNING id, report_type, address, neighborhood, reference,
                      description, photo_url, ip_address, created_at, expires_at
            "#,
        )
        .bind(dto.report_type)
        .bind(address)
        .bind(neighborhood)
        .bind(reference)
        .bind(description)
        .bind(&dto.photo_url)
        .bind(&client_ip)
        .bind(self.ttl_hours as i32)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        let response = ReportResponseDto::from(report);

        // No subscribers is fine; the send result only counts receivers
        let _ = self.feed.send(response.clone());

        Ok(response)
    }

    /// Reports created within the last `hours` that have not expired,
    /// newest first.
    ///
    /// The expiry filter is independent of the window: an expired report
    /// never appears no matter how recent its `created_at` is.
    pub async fn list(&self, hours: i64) -> Result<Vec<ReportResponseDto>> {
        let reports: Vec<Report> = sqlx::query_as(
            r#"
            SELECT id, report_type, address, neighborhood, reference,
                   description, photo_url, ip_address, created_at, expires_at
            FROM reports
            WHERE expires_at > now()
              AND created_at >= now() - make_interval(hours => $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(hours as i32)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(reports.into_iter().map(ReportResponseDto::from).collect())
    }

    /// Subscribe to the live insert feed
    pub fn subscribe(&self) -> broadcast::Receiver<ReportResponseDto> {
        self.feed.subscribe()
    }

    /// Remove reports past their expiry plus a grace period, in batches.
    ///
    /// Read paths never rely on this; it only keeps the table small. The
    /// photo URLs of removed rows are returned so the caller can clean up
    /// the stored objects.
    pub async fn delete_expired(&self) -> Result<SweepOutcome> {
        let mut removed = 0u64;
        let mut photo_urls = Vec::new();

        loop {
            let batch: Vec<Option<String>> = sqlx::query_scalar(
                r#"
                DELETE FROM reports
                WHERE id IN (
                    SELECT id FROM reports
                    WHERE expires_at < now() - make_interval(hours => $1)
                    LIMIT $2
                )
                RETURNING photo_url
                "#,
            )
            .bind(SWEEP_GRACE_HOURS)
            .bind(SWEEP_BATCH_SIZE)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

            let batch_size = batch.len() as u64;
            removed += batch_size;
            photo_urls.extend(batch.into_iter().flatten());

            if batch_size < SWEEP_BATCH_SIZE as u64 {
                break;
            }
        }

        Ok(SweepOutcome {
            removed,
            photo_urls,
        })
    }
}
