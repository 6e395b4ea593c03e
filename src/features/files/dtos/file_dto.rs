use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upload photo request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadPhotoDto {
    /// The photo to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Response DTO for a stored report photo
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PhotoResponseDto {
    /// Public URL serving the photo
    pub url: String,
    /// MIME type of the photo
    pub content_type: String,
    /// Size of the photo in bytes
    pub file_size: i64,
}

/// Allowed MIME types for report photos
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum photo size in bytes (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Check if a MIME type is allowed
pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

/// Get file extension from content type
pub fn get_extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_image_mime_types_allowed() {
        assert!(is_mime_type_allowed("image/jpeg"));
        assert!(is_mime_type_allowed("image/webp"));
        assert!(!is_mime_type_allowed("application/pdf"));
        assert!(!is_mime_type_allowed("text/html"));
        assert!(!is_mime_type_allowed("application/octet-stream"));
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(get_extension_from_content_type("image/jpeg"), Some("jpg"));
        assert_eq!(get_extension_from_content_type("image/png"), Some("png"));
        assert_eq!(get_extension_from_content_type("application/pdf"), None);
    }
}
