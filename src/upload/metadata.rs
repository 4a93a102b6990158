//! Upload metadata types and repository.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::{Result, StashError};

/// Metadata record for one stored upload.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UploadRecord {
    /// Unique record ID.
    pub id: i64,
    /// Stored filename on disk.
    pub filename: String,
    /// Fully-qualified URL at which the file is retrievable.
    pub file_url: String,
    /// Upload timestamp.
    pub upload_date: String,
    /// Record creation timestamp.
    pub created_at: String,
    /// Record update timestamp.
    pub updated_at: String,
}

/// Data for creating a new upload record.
#[derive(Debug, Clone)]
pub struct NewUpload {
    /// Stored filename on disk.
    pub filename: String,
    /// Fully-qualified URL at which the file is retrievable.
    pub file_url: String,
}

impl NewUpload {
    /// Create a new NewUpload.
    pub fn new(filename: impl Into<String>, file_url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            file_url: file_url.into(),
        }
    }

    /// Validate the record data.
    pub fn validate(&self) -> Result<()> {
        if self.filename.is_empty() {
            return Err(StashError::Validation("filename must not be empty".into()));
        }
        if self.file_url.is_empty() {
            return Err(StashError::Validation("file_url must not be empty".into()));
        }
        Ok(())
    }
}

/// Repository for upload record operations.
pub struct UploadRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UploadRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new upload record.
    ///
    /// Returns the created record with its assigned ID and
    /// database-populated timestamps.
    pub async fn create(&self, new_upload: &NewUpload) -> Result<UploadRecord> {
        new_upload.validate()?;

        let result = sqlx::query("INSERT INTO uploads (filename, file_url) VALUES (?, ?)")
            .bind(&new_upload.filename)
            .bind(&new_upload.file_url)
            .execute(self.pool)
            .await
            .map_err(|e| StashError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| StashError::NotFound("upload record".to_string()))
    }

    /// Get an upload record by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<UploadRecord>> {
        let record = sqlx::query_as::<_, UploadRecord>(
            "SELECT id, filename, file_url, upload_date, created_at, updated_at
             FROM uploads WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StashError::Database(e.to_string()))?;

        Ok(record)
    }

    /// Get an upload record by stored filename.
    pub async fn get_by_filename(&self, filename: &str) -> Result<Option<UploadRecord>> {
        let record = sqlx::query_as::<_, UploadRecord>(
            "SELECT id, filename, file_url, upload_date, created_at, updated_at
             FROM uploads WHERE filename = ?",
        )
        .bind(filename)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StashError::Database(e.to_string()))?;

        Ok(record)
    }

    /// Count all upload records.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM uploads")
            .fetch_one(self.pool)
            .await
            .map_err(|e| StashError::Database(e.to_string()))?;

        Ok(count)
    }
}
