use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::files::dtos::{
    is_mime_type_allowed, PhotoResponseDto, UploadPhotoDto, ALLOWED_MIME_TYPES, MAX_FILE_SIZE,
};
use crate::features::files::services::FileService;
use crate::shared::types::ApiResponse;

/// Upload a report photo
///
/// Accepts multipart/form-data with:
/// - `file`: The photo to upload (required)
///
/// Public so that anonymous reporters can attach a photo. The report form
/// treats a failed upload as "no photo", never as a blocked report.
#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "files",
    request_body(
        content = UploadPhotoDto,
        content_type = "multipart/form-data",
        description = "Photo upload form",
    ),
    responses(
        (status = 201, description = "Foto enviada", body = ApiResponse<PhotoResponseDto>),
        (status = 400, description = "Arquivo inválido"),
        (status = 413, description = "Arquivo muito grande")
    )
)]
pub async fn upload_photo(
    State(service): State<Arc<FileService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PhotoResponseDto>>), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest("Não foi possível ler o arquivo enviado.".to_string())
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest("Não foi possível ler o arquivo enviado.".to_string())
                })?;

                file_data = Some(data.to_vec());
                content_type = Some(ct);
            }
            _ => {
                // Ignore unknown fields
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("Envie um arquivo.".to_string()))?;
    let content_type = content_type
        .ok_or_else(|| AppError::BadRequest("Tipo de arquivo não informado.".to_string()))?;

    if file_data.len() > MAX_FILE_SIZE {
        return Err(AppError::BadRequest(format!(
            "Arquivo muito grande. O tamanho máximo é {} MB.",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    if !is_mime_type_allowed(&content_type) {
        return Err(AppError::BadRequest(format!(
            "Tipo de arquivo '{}' não é permitido. Tipos aceitos: {}.",
            content_type,
            ALLOWED_MIME_TYPES.join(", ")
        )));
    }

    let response = service.upload_report_photo(file_data, &content_type).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}
