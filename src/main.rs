use std::sync::Arc;

use tracing::{error, info};

use stash::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = stash::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        stash::logging::init_console_only(&config.logging.level);
    }

    info!("stash - file upload service");

    // A database that fails to open is logged, not fatal: the server still
    // accepts requests and uploads fail at the metadata step.
    let db = match Database::open(&config.database.path).await {
        Ok(db) => {
            info!("Database connected");
            Some(Arc::new(db))
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            None
        }
    };

    let server = WebServer::new(&config, db);
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
