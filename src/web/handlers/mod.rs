//! API handlers for the HTTP surface.

pub mod files;
pub mod health;
pub mod upload;

pub use files::serve_upload;
pub use health::health;
pub use upload::upload_avatar;

use std::sync::Arc;

use crate::upload::UploadStorage;
use crate::Database;

/// Shared database handle.
pub type SharedDatabase = Arc<Database>;

/// Application state shared across handlers.
pub struct AppState {
    /// Database handle. `None` when the database could not be opened at
    /// startup; uploads then fail at the metadata step.
    pub db: Option<SharedDatabase>,
    /// Upload file storage.
    pub storage: UploadStorage,
    /// Maximum upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Option<SharedDatabase>, storage: UploadStorage, max_upload_size: u64) -> Self {
        Self {
            db,
            storage,
            max_upload_size,
        }
    }
}
