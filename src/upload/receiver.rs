//! Multipart upload extraction.
//!
//! Pulls a single file out of a multipart request under a fixed field
//! name, enforces the size limit, and writes it to storage. The result is
//! a closed set of outcomes for the endpoint to match on.

use std::path::PathBuf;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;

use super::storage::UploadStorage;

/// Result of receiving an upload.
#[derive(Debug)]
pub enum UploadOutcome {
    /// The file was written to storage.
    Saved {
        /// Generated name of the file on disk.
        stored_name: String,
        /// Absolute or base-relative path the file was written to.
        path: PathBuf,
    },
    /// No file was present under the expected field name.
    MissingFile,
    /// The file payload exceeded the size limit.
    TooLarge,
    /// The filesystem write failed.
    StorageFailed(String),
}

/// Receives a single file from multipart form data and stores it.
pub struct UploadReceiver<'a> {
    storage: &'a UploadStorage,
    field_name: &'a str,
    max_size: u64,
}

impl<'a> UploadReceiver<'a> {
    /// Create a receiver for the given storage, field name, and size limit.
    pub fn new(storage: &'a UploadStorage, field_name: &'a str, max_size: u64) -> Self {
        Self {
            storage,
            field_name,
            max_size,
        }
    }

    /// Extract the file from the request and write it to storage.
    ///
    /// Only the first file under the expected field name is considered;
    /// every other field is read past and ignored. The size limit is
    /// checked on the decoded payload before anything touches the disk.
    pub async fn receive(&self, multipart: &mut Multipart) -> UploadOutcome {
        let mut file: Option<(String, Vec<u8>)> = None;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => return Self::outcome_for_error(e),
            };

            if field.name() != Some(self.field_name) || file.is_some() {
                continue;
            }

            let original_name = field.file_name().unwrap_or_default().to_string();
            let content = match field.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => return Self::outcome_for_error(e),
            };

            if content.len() as u64 > self.max_size {
                return UploadOutcome::TooLarge;
            }

            file = Some((original_name, content.to_vec()));
        }

        match file {
            None => UploadOutcome::MissingFile,
            Some((original_name, content)) => {
                match self.storage.save(&content, &original_name) {
                    Ok((stored_name, path)) => UploadOutcome::Saved { stored_name, path },
                    Err(e) => UploadOutcome::StorageFailed(e.to_string()),
                }
            }
        }
    }

    /// Map a multipart read error to an outcome.
    ///
    /// A body that blew past the transport limit is a too-large upload;
    /// anything else means no usable file arrived.
    fn outcome_for_error(e: MultipartError) -> UploadOutcome {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadOutcome::TooLarge
        } else {
            UploadOutcome::MissingFile
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header, Request};
    use tempfile::TempDir;

    const BOUNDARY: &str = "test-boundary";

    fn setup_storage() -> (TempDir, UploadStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(temp_dir.path().join("uploads")).unwrap();
        (temp_dir, storage)
    }

    fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn multipart_from(body: Vec<u8>) -> Multipart {
        let request = Request::builder()
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_receive_saves_file() {
        let (_temp_dir, storage) = setup_storage();
        let receiver = UploadReceiver::new(&storage, "avatar", 1024);

        let mut multipart = multipart_from(multipart_body("avatar", "a.txt", b"hello")).await;
        let outcome = receiver.receive(&mut multipart).await;

        match outcome {
            UploadOutcome::Saved { stored_name, path } => {
                assert!(stored_name.ends_with(".txt"));
                assert!(path.exists());
                assert_eq!(storage.load(&stored_name).unwrap(), b"hello");
            }
            other => panic!("expected Saved, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_receive_missing_field() {
        let (_temp_dir, storage) = setup_storage();
        let receiver = UploadReceiver::new(&storage, "avatar", 1024);

        let mut multipart = multipart_from(multipart_body("file", "a.txt", b"hello")).await;
        let outcome = receiver.receive(&mut multipart).await;

        assert!(matches!(outcome, UploadOutcome::MissingFile));
        assert_eq!(
            std::fs::read_dir(storage.base_path()).unwrap().count(),
            0,
            "no file may be written for a missing field"
        );
    }

    #[tokio::test]
    async fn test_receive_too_large() {
        let (_temp_dir, storage) = setup_storage();
        let receiver = UploadReceiver::new(&storage, "avatar", 16);

        let mut multipart = multipart_from(multipart_body("avatar", "big.bin", &[0u8; 17])).await;
        let outcome = receiver.receive(&mut multipart).await;

        assert!(matches!(outcome, UploadOutcome::TooLarge));
        assert_eq!(std::fs::read_dir(storage.base_path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_receive_at_limit_is_accepted() {
        let (_temp_dir, storage) = setup_storage();
        let receiver = UploadReceiver::new(&storage, "avatar", 16);

        let mut multipart = multipart_from(multipart_body("avatar", "ok.bin", &[0u8; 16])).await;
        let outcome = receiver.receive(&mut multipart).await;

        assert!(matches!(outcome, UploadOutcome::Saved { .. }));
    }

    #[tokio::test]
    async fn test_receive_storage_failure() {
        let temp_dir = TempDir::new().unwrap();
        let storage = UploadStorage::degraded(temp_dir.path().join("never_created"));
        let receiver = UploadReceiver::new(&storage, "avatar", 1024);

        let mut multipart = multipart_from(multipart_body("avatar", "a.txt", b"hello")).await;
        let outcome = receiver.receive(&mut multipart).await;

        assert!(matches!(outcome, UploadOutcome::StorageFailed(_)));
    }
}
