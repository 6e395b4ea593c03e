mod file_dto;

pub use file_dto::{
    get_extension_from_content_type, is_mime_type_allowed, PhotoResponseDto, UploadPhotoDto,
    ALLOWED_MIME_TYPES, MAX_FILE_SIZE,
};
