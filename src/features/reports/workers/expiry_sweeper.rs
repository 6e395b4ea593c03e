use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::features::reports::services::ReportService;
use crate::modules::storage::MinIOClient;

/// Background task that physically removes expired reports.
///
/// Listings already filter on `expires_at`, so the sweeper only keeps the
/// table from growing; a delayed or failed sweep never shows stale data.
/// Photos referenced by swept reports are deleted from storage best-effort.
pub struct ReportExpirySweeper {
    report_service: Arc<ReportService>,
    minio_client: Arc<MinIOClient>,
    interval_secs: u64,
}

impl ReportExpirySweeper {
    pub fn new(
        report_service: Arc<ReportService>,
        minio_client: Arc<MinIOClient>,
        interval_secs: u64,
    ) -> Self {
        Self {
            report_service,
            minio_client,
            interval_secs,
        }
    }

    /// Run the sweeper in a background loop
    pub async fn run(&self) {
        info!(
            "Starting report expiry sweeper (every {}s)",
            self.interval_secs
        );

        let mut interval = interval(Duration::from_secs(self.interval_secs));

        loop {
            interval.tick().await;

            match self.report_service.delete_expired().await {
                Ok(outcome) if outcome.removed == 0 => {
                    debug!("Expiry sweep: nothing to remove")
                }
                Ok(outcome) => {
                    info!("Expiry sweep removed {} reports", outcome.removed);
                    self.delete_photos(&outcome.photo_urls).await;
                }
                Err(e) => error!("Expiry sweep failed: {:?}", e),
            }
        }
    }

    /// Delete swept photos from storage. Failures are logged, never fatal;
    /// the next sweep does not retry them.
    async fn delete_photos(&self, urls: &[String]) {
        for url in urls {
            // URLs outside our bucket (the photo field is free-form) are
            // not ours to delete
            let Some(key) = self.minio_client.extract_key_from_url(url) else {
                debug!("Skipping photo with foreign URL: {}", url);
                continue;
            };

            if let Err(e) = self.minio_client.delete(&key).await {
                warn!("Failed to delete swept photo '{}': {}", key, e);
            }
        }
    }
}
