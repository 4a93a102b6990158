//! Web server for stash.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::upload::UploadStorage;

use super::handlers::{AppState, SharedDatabase};
use super::router::create_router;

/// Web server for the upload API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    state: Arc<AppState>,
    /// CORS allowed origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// `db` is `None` when the database could not be opened at startup;
    /// the server still accepts requests and uploads fail at the metadata
    /// step. A storage directory that cannot be created likewise degrades
    /// instead of aborting.
    pub fn new(config: &Config, db: Option<SharedDatabase>) -> Self {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .expect("Invalid web server address");

        let storage = match UploadStorage::new(&config.uploads.storage_path) {
            Ok(storage) => {
                tracing::info!("Upload storage initialized at: {}", config.uploads.storage_path);
                storage
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to create upload directory {}: {}. Uploads will fail until it is available.",
                    config.uploads.storage_path,
                    e
                );
                UploadStorage::degraded(&config.uploads.storage_path)
            }
        };

        let state = AppState::new(db, storage, config.uploads.max_upload_size_bytes());

        Self {
            addr,
            state: Arc::new(state),
            cors_origins: config.server.cors_origins.clone(),
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = create_router(self.state, &self.cors_origins);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// Useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let router = create_router(self.state, &self.cors_origins);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn create_test_config(storage_path: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0; // Use random port
        config.uploads.storage_path = storage_path.to_string_lossy().into_owned();
        config
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = create_test_config(&temp_dir.path().join("uploads"));
        let db = Database::open_in_memory().await.unwrap();

        let server = WebServer::new(&config, Some(Arc::new(db)));
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_web_server_run() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = create_test_config(&temp_dir.path().join("uploads"));
        let db = Database::open_in_memory().await.unwrap();

        let server = WebServer::new(&config, Some(Arc::new(db)));
        let addr = server.run_with_addr().await.unwrap();

        let client = reqwest::Client::new();
        let resp = client
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap();

        assert!(resp.status().is_success());
        assert!(resp.text().await.unwrap().contains("Server is running"));
    }
}
