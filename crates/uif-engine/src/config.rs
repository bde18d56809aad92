//! Engine Configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;
use uif_net::ResourceLayout;

use crate::EngineError;

/// Engine configuration options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory component resources are read from
    pub component_root: PathBuf,

    /// HTTP base URL for component resources; overrides `component_root`
    pub component_url: Option<String>,

    /// File extensions of the markup/style/behavior parts
    pub layout: ResourceLayout,

    /// Re-render a component after each dispatched event
    pub rerender_on_dispatch: bool,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    /// Parse a JSON configuration; missing keys keep their defaults
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a JSON configuration file
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            component_root: PathBuf::from("components"),
            component_url: None,
            layout: ResourceLayout::default(),
            rerender_on_dispatch: false,
            log_filter: "info".to_string(),
        }
    }
}
