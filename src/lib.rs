//! Doctor directory: fetch, normalize, filter, sort and share doctor listings.

pub mod config;
pub mod directory;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod presentation;

pub use config::DirectoryConfig;
pub use directory::{Doctor, FilterState, FilterUpdate, Session};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
