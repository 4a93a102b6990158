//! stash - a small file upload and hosting service.
//!
//! Accepts single-file uploads over HTTP, stores them in a local
//! directory, records metadata for each upload in SQLite, and serves the
//! stored files back under `/uploads/`.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod upload;
pub mod web;

pub use config::Config;
pub use db::Database;
pub use error::{Result, StashError};
pub use upload::{
    NewUpload, UploadOutcome, UploadReceiver, UploadRecord, UploadRepository, UploadStorage,
};
pub use web::{create_router, ApiError, WebServer};
