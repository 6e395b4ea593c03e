//! Storage module for file management
//!
//! Provides the MinIO/S3-compatible storage client that holds
//! publicly served report photos.

mod minio_client;

pub use minio_client::MinIOClient;
