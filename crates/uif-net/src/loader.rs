//! Resource Loader
//!
//! Transport seam for component resources plus the filesystem transport.

use std::io::ErrorKind;
use std::path::PathBuf;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::{FetchResult, NetError, ResourceLayout, ResourcePath};

/// Fetches the text of one component resource
///
/// `Ok(None)` means the resource does not exist, which is a normal outcome.
pub trait TextFetcher {
    fn fetch<'a>(&'a self, path: &'a ResourcePath) -> LocalBoxFuture<'a, FetchResult>;
}

/// Reads component resources from a directory (`<root>/<tag>.<ext>`)
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
    layout: ResourceLayout,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_layout(root, ResourceLayout::default())
    }

    pub fn with_layout(root: impl Into<PathBuf>, layout: ResourceLayout) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    /// Directory components are read from
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl TextFetcher for DirectoryFetcher {
    fn fetch<'a>(&'a self, path: &'a ResourcePath) -> LocalBoxFuture<'a, FetchResult> {
        let file = self.root.join(path.file_name(&self.layout));
        async move {
            tracing::debug!("Reading {}", file.display());
            match smol::fs::read_to_string(&file).await {
                Ok(text) => Ok(Some(text)),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(source) => Err(NetError::Io {
                    path: file.display().to_string(),
                    source,
                }),
            }
        }
        .boxed_local()
    }
}
