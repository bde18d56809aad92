//! Resource Loader
//!
//! Fetches the markup, style and behavior parts of one tag concurrently.
//! Absence is a normal outcome. Transport faults are logged and rendered
//! the same way as absence.

use std::rc::Rc;

use uif_net::{ResourceKind, ResourcePath, TextFetcher};

use crate::{BehaviorModule, Constructor, ModuleRegistry};

/// Loaded parts of a component definition
#[derive(Default)]
pub struct DefinitionParts {
    pub markup: Option<String>,
    pub style: Option<String>,
    pub behavior: Option<Constructor>,
}

/// Loads definition parts through a transport and a module registry
pub struct ResourceLoader {
    fetcher: Rc<dyn TextFetcher>,
    modules: ModuleRegistry,
}

impl ResourceLoader {
    pub fn new(fetcher: Rc<dyn TextFetcher>, modules: ModuleRegistry) -> Self {
        Self { fetcher, modules }
    }

    /// Registered behavior modules
    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// Fetch all three parts of `tag`
    pub async fn load(&self, tag: &str) -> DefinitionParts {
        tracing::info!("Loading component <{}>", tag);

        let (markup, style, behavior) = futures::join!(
            self.fetch_text(ResourcePath::new(tag, ResourceKind::Markup)),
            self.fetch_text(ResourcePath::new(tag, ResourceKind::Style)),
            self.fetch_text(ResourcePath::new(tag, ResourceKind::Behavior)),
        );

        DefinitionParts {
            markup,
            style,
            behavior: self.resolve_behavior(tag, behavior),
        }
    }

    async fn fetch_text(&self, path: ResourcePath) -> Option<String> {
        match self.fetcher.fetch(&path).await {
            Ok(Some(text)) => Some(text),
            Ok(None) => {
                tracing::debug!("{} not found", path);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", path, e);
                None
            }
        }
    }

    /// Registered module first, then a declarative JSON behavior
    fn resolve_behavior(&self, tag: &str, source: Option<String>) -> Option<Constructor> {
        let module = match self.modules.import(tag) {
            Some(module) => module,
            None => {
                let source = source?;
                match BehaviorModule::from_json(&source) {
                    Some(module) => module,
                    None => {
                        tracing::error!(
                            "Behavior for <{}> is neither a registered module nor a JSON object; \
                             register a module for this tag. Rendering without a controller",
                            tag
                        );
                        return None;
                    }
                }
            }
        };

        match module.constructor_for(tag) {
            Ok(constructor) => Some(constructor),
            Err(e) => {
                tracing::error!("{}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uif_net::MemoryFetcher;

    fn loader(fetcher: MemoryFetcher, modules: ModuleRegistry) -> ResourceLoader {
        ResourceLoader::new(Rc::new(fetcher), modules)
    }

    #[test]
    fn test_missing_parts_are_absent() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert("card", ResourceKind::Markup, "<b>card</b>");
        let parts = smol::block_on(loader(fetcher, ModuleRegistry::new()).load("card"));

        assert_eq!(parts.markup.as_deref(), Some("<b>card</b>"));
        assert!(parts.style.is_none());
        assert!(parts.behavior.is_none());
    }

    #[test]
    fn test_transport_fault_is_absent() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert("card", ResourceKind::Markup, "<b>card</b>");
        fetcher.fail("card", ResourceKind::Style, "reset");
        let parts = smol::block_on(loader(fetcher, ModuleRegistry::new()).load("card"));

        assert!(parts.markup.is_some());
        assert!(parts.style.is_none());
    }

    #[test]
    fn test_json_behavior() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert("card", ResourceKind::Behavior, r#"{ "title": "Hi" }"#);
        let parts = smol::block_on(loader(fetcher, ModuleRegistry::new()).load("card"));
        assert!(parts.behavior.is_some());
    }

    #[test]
    fn test_script_behavior_without_module_is_absent() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert("card", ResourceKind::Behavior, "export default class {}");
        let parts = smol::block_on(loader(fetcher, ModuleRegistry::new()).load("card"));
        assert!(parts.behavior.is_none());
    }
}
