//! Definition Cache
//!
//! One definition per tag for the session. The empty definition and its
//! load token are installed synchronously, before the first fetch starts,
//! so every element of that tag awaits the same single load.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use crate::{Constructor, Controller, ResourceLoader, Substitution, classify};

type LoadToken = Shared<LocalBoxFuture<'static, ()>>;

/// Cached markup/style/behavior triple of one tag
pub struct ComponentDefinition {
    tag: String,
    markup: RefCell<Option<String>>,
    style: RefCell<Option<String>>,
    behavior: RefCell<Option<Constructor>>,
    substitutions: OnceCell<Rc<[Substitution]>>,
    load: RefCell<Option<LoadToken>>,
}

impl ComponentDefinition {
    fn empty(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            markup: RefCell::new(None),
            style: RefCell::new(None),
            behavior: RefCell::new(None),
            substitutions: OnceCell::new(),
            load: RefCell::new(None),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn markup(&self) -> Option<String> {
        self.markup.borrow().clone()
    }

    pub fn style(&self) -> Option<String> {
        self.style.borrow().clone()
    }

    pub fn behavior(&self) -> Option<Constructor> {
        self.behavior.borrow().clone()
    }

    /// Check if the parts are still being fetched
    pub fn is_loading(&self) -> bool {
        self.load.borrow().is_some()
    }

    /// Wait until the parts are loaded (returns at once when they are)
    pub async fn settled(&self) {
        let token = self.load.borrow().clone();
        if let Some(token) = token {
            token.await;
        }
    }

    /// Classified members, computed from the first controller seen
    pub fn substitutions_for(&self, representative: &dyn Controller) -> Rc<[Substitution]> {
        self.substitutions
            .get_or_init(|| {
                let substitutions = classify(&representative.members());
                tracing::debug!("Classified {} members of <{}>", substitutions.len(), self.tag);
                substitutions.into()
            })
            .clone()
    }

    /// Classified members, if any controller was built yet
    pub fn classified(&self) -> Option<Rc<[Substitution]>> {
        self.substitutions.get().cloned()
    }
}

impl std::fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("tag", &self.tag)
            .field("markup", &self.markup.borrow().is_some())
            .field("style", &self.style.borrow().is_some())
            .field("behavior", &self.behavior.borrow().is_some())
            .field("loading", &self.is_loading())
            .finish()
    }
}

/// Session-scoped tag -> definition store
pub struct DefinitionCache {
    loader: Rc<ResourceLoader>,
    definitions: RefCell<HashMap<String, Rc<ComponentDefinition>>>,
}

impl DefinitionCache {
    pub fn new(loader: ResourceLoader) -> Self {
        Self {
            loader: Rc::new(loader),
            definitions: RefCell::new(HashMap::new()),
        }
    }

    pub fn loader(&self) -> &ResourceLoader {
        &self.loader
    }

    /// Definition of `tag`, loaded
    pub async fn resolve(&self, tag: &str) -> Rc<ComponentDefinition> {
        let definition = self.get_or_begin(tag);
        definition.settled().await;
        definition
    }

    /// Definition of `tag` without waiting; starts the load on first use
    pub fn get_or_begin(&self, tag: &str) -> Rc<ComponentDefinition> {
        let key = tag.to_ascii_lowercase();
        if let Some(existing) = self.definitions.borrow().get(&key) {
            return existing.clone();
        }

        let definition = Rc::new(ComponentDefinition::empty(&key));
        self.definitions.borrow_mut().insert(key.clone(), definition.clone());

        let loader = self.loader.clone();
        let target = Rc::downgrade(&definition);
        let token = async move {
            let parts = loader.load(&key).await;
            if let Some(definition) = target.upgrade() {
                *definition.markup.borrow_mut() = parts.markup;
                *definition.style.borrow_mut() = parts.style;
                *definition.behavior.borrow_mut() = parts.behavior;
                definition.load.borrow_mut().take();
            }
        }
        .boxed_local()
        .shared();
        *definition.load.borrow_mut() = Some(token);

        definition
    }

    /// Cached definition, if `tag` was seen
    pub fn get(&self, tag: &str) -> Option<Rc<ComponentDefinition>> {
        self.definitions.borrow().get(&tag.to_ascii_lowercase()).cloned()
    }

    /// Number of distinct tags seen
    pub fn len(&self) -> usize {
        self.definitions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.borrow().is_empty()
    }
}
