//! Upload handling for stash.
//!
//! This module covers the write path of the service:
//! - physical storage of uploaded files in a flat directory
//! - multipart extraction with a typed outcome
//! - metadata records for every stored file

mod metadata;
mod receiver;
mod storage;

pub use metadata::{NewUpload, UploadRecord, UploadRepository};
pub use receiver::{UploadOutcome, UploadReceiver};
pub use storage::UploadStorage;

/// Multipart field name carrying the uploaded file.
pub const AVATAR_FIELD: &str = "avatar";

/// URL prefix under which stored files are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Default maximum upload size (5 MiB).
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 5 * 1024 * 1024;
