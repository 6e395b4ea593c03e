use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::files::dtos::{get_extension_from_content_type, PhotoResponseDto};
use crate::modules::storage::MinIOClient;

/// Service for report photo storage
///
/// Photos are write-once objects with no metadata table: the expiry
/// sweeper removes each object together with the report that references
/// it, so there is no client-facing delete path.
pub struct FileService {
    minio_client: Arc<MinIOClient>,
}

impl FileService {
    pub fn new(minio_client: Arc<MinIOClient>) -> Self {
        Self { minio_client }
    }

    /// Upload a report photo and return its public URL
    ///
    /// # Arguments
    /// * `data` - The photo content as bytes
    /// * `content_type` - The MIME type of the photo (already validated)
    ///
    /// # Returns
    /// The photo response DTO carrying the public URL
    pub async fn upload_report_photo(
        &self,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<PhotoResponseDto> {
        let file_size = data.len() as i64;

        // Build path: reports/{uuid}.{extension}
        let extension = get_extension_from_content_type(content_type).unwrap_or("bin");
        let path = format!("reports/{}.{}", Uuid::new_v4(), extension);

        // Generate key under the public prefix (e.g., public/reports/abc.jpg)
        let file_key = self.minio_client.generate_key(&path);

        self.minio_client
            .upload(&file_key, data, content_type)
            .await?;

        debug!("Report photo uploaded: key={}, size={}", file_key, file_size);

        Ok(PhotoResponseDto {
            url: self.minio_client.get_public_url(&file_key),
            content_type: content_type.to_string(),
            file_size,
        })
    }
}
