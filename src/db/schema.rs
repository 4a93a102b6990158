//! Database schema and migrations for stash.
//!
//! Each migration is applied sequentially when the database is first
//! opened or upgraded; the schema_version table tracks which ones have
//! already run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - uploads table
    r#"
-- One row per stored upload
CREATE TABLE uploads (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    filename    TEXT NOT NULL UNIQUE,    -- stored name on disk
    file_url    TEXT NOT NULL,           -- public URL of the stored file
    upload_date TEXT NOT NULL DEFAULT (datetime('now')),
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_uploads_created_at ON uploads(created_at);
"#,
];
