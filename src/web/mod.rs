//! HTTP API module for stash.
//!
//! Exposes the upload endpoint, the stored-file read path, and the health
//! check, wired together by the router and served by [`WebServer`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
