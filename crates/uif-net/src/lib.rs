//! uif Networking
//!
//! Fetches the text parts of a component definition. A missing resource
//! is `Ok(None)`; only transport faults are errors.

mod resource;
mod loader;
mod fetch;
mod memory;

pub use resource::{ResourceKind, ResourceLayout, ResourcePath};
pub use loader::{TextFetcher, DirectoryFetcher};
pub use fetch::HttpFetcher;
pub use memory::MemoryFetcher;
pub use url::Url;

/// Result of fetching one text resource
pub type FetchResult = Result<Option<String>, NetError>;

/// Network error
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
