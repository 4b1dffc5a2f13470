//! Atelier Client - HTTP client for the store backend
//!
//! Typed calls for every REST endpoint, a query cache that deduplicates and
//! invalidates reads, and a gate that keeps one submission in flight per
//! user action.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod submit;

pub use cache::{CachedClient, QueryCache};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, ImageUpload};
pub use logger::init_logger;
pub use submit::{SubmitGate, SubmitGuard};

// Re-export shared types for convenience
pub use shared::{self, PolicyConfig};
