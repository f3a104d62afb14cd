//! File use cases: metadata, rename, single-file deletion, upload.

pub mod service;
pub mod upload;

pub use service::FileService;
pub use upload::UploadService;
