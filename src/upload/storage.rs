//! Physical file storage for uploads.
//!
//! Uploaded files live in a single flat directory and are named
//! `{unix_millis}-{uuid}{original_extension}`, so concurrent uploads of
//! files with the same original name never collide.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::{Result, StashError};

/// File storage rooted at a single directory.
#[derive(Debug, Clone)]
pub struct UploadStorage {
    /// Base directory for stored files.
    base_path: PathBuf,
}

impl UploadStorage {
    /// Create a new UploadStorage with the given base path.
    ///
    /// The base directory (and any missing parents) is created here, once;
    /// the per-upload write path assumes it exists.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Create an UploadStorage without creating the base directory.
    ///
    /// Used when directory creation failed at startup: the handle is still
    /// usable, and every save fails at write time instead.
    pub fn degraded(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Save content to storage under a freshly generated stored name.
    ///
    /// Returns the stored name and the path the file was written to.
    pub fn save(&self, content: &[u8], original_name: &str) -> Result<(String, PathBuf)> {
        let stored_name = Self::generate_stored_name(original_name);
        let file_path = self.base_path.join(&stored_name);

        fs::write(&file_path, content)?;

        Ok((stored_name, file_path))
    }

    /// Load the content of a stored file.
    pub fn load(&self, stored_name: &str) -> Result<Vec<u8>> {
        let file_path = self
            .file_path(stored_name)
            .ok_or_else(|| StashError::NotFound(format!("file {stored_name}")))?;

        match fs::read(&file_path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StashError::NotFound(format!("file {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a file exists in storage.
    pub fn exists(&self, stored_name: &str) -> bool {
        self.file_path(stored_name)
            .map(|p| p.exists())
            .unwrap_or(false)
    }

    /// Resolve a stored name to its path under the base directory.
    ///
    /// Returns `None` unless the name is a single plain path component, so
    /// names carrying separators or `..` never resolve outside the
    /// directory.
    pub fn file_path(&self, stored_name: &str) -> Option<PathBuf> {
        let mut components = Path::new(stored_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.base_path.join(stored_name)),
            _ => None,
        }
    }

    /// Generate a stored name for the given original filename.
    ///
    /// The original extension is carried over verbatim (including case);
    /// a name without an extension produces a suffix-less stored name.
    pub fn generate_stored_name(original_name: &str) -> String {
        let millis = Utc::now().timestamp_millis();
        let unique = Uuid::new_v4();
        let ext = Self::original_extension(original_name);
        format!("{millis}-{unique}{ext}")
    }

    /// Extract the extension of a filename, dot included.
    ///
    /// Returns an empty string when the filename has no extension.
    fn original_extension(filename: &str) -> String {
        Path::new(filename)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| format!(".{s}"))
            .unwrap_or_default()
    }
}
