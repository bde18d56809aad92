//! Engine - Main entry point

use std::path::Path;
use std::rc::Rc;

use uif_component::{BehaviorModule, ComponentError, ModuleRegistry};
use uif_dom::DomError;
use uif_html::ParseError;
use uif_net::{DirectoryFetcher, HttpFetcher, NetError, TextFetcher};

use crate::{Config, Page};

/// Opens page sessions sharing one configuration and module set
pub struct Engine {
    config: Config,
    modules: Vec<(String, BehaviorModule)>,
    fetcher: Option<Rc<dyn TextFetcher>>,
}

impl Engine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        tracing::info!("uif {} initialized", crate::VERSION);
        Self {
            config,
            modules: Vec::new(),
            fetcher: None,
        }
    }

    /// Use `fetcher` instead of the configured transport
    pub fn with_fetcher(mut self, fetcher: Rc<dyn TextFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Make a behavior module available to every page
    pub fn register(&mut self, tag: &str, module: BehaviorModule) -> &mut Self {
        self.modules.push((tag.to_string(), module));
        self
    }

    /// Get engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Transport for component resources
    pub fn fetcher(&self) -> Result<Rc<dyn TextFetcher>, EngineError> {
        if let Some(fetcher) = &self.fetcher {
            return Ok(fetcher.clone());
        }
        let layout = self.config.layout.clone();
        match &self.config.component_url {
            Some(url) => {
                tracing::info!("Components from {}", url);
                Ok(Rc::new(HttpFetcher::with_layout(url, layout)?))
            }
            None => {
                tracing::info!("Components from {}", self.config.component_root.display());
                Ok(Rc::new(DirectoryFetcher::with_layout(&self.config.component_root, layout)))
            }
        }
    }

    /// Fresh module registry for one session
    fn registry(&self) -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        for (tag, module) in &self.modules {
            registry.register(tag, module.clone());
        }
        registry
    }

    /// Open a page session over `html`; components are not scanned yet
    pub fn open(&self, html: &str) -> Result<Page, EngineError> {
        Page::from_html(html, self.fetcher()?, self.registry(), &self.config)
    }

    /// Read `path` and open it
    pub async fn open_file(&self, path: &Path) -> Result<Page, EngineError> {
        tracing::info!("Loading: {}", path.display());
        let html = smol::fs::read_to_string(path).await.map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.open(&html)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Network error: {0}")]
    Network(#[from] NetError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
