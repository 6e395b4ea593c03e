pub mod file_handler;

pub use file_handler::{__path_upload_photo, upload_photo};
