//! Behavior modules
//!
//! A behavior resource resolves to a module of named exports. The module
//! must expose one usable constructor: `default`, or the export named
//! after the tag with non-identifier characters stripped.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::{ComponentError, ComponentHandle, Controller, ControllerError, DataController};

/// Builds a controller for one component instance
pub type Constructor = Rc<dyn Fn(&ComponentHandle) -> Result<Box<dyn Controller>, ControllerError>>;

/// One named module export
#[derive(Clone)]
pub enum Export {
    Constructor(Constructor),
    Value(Value),
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Export::Constructor(_) => f.write_str("Constructor(..)"),
            Export::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// Named exports of a behavior resource
#[derive(Debug, Clone, Default)]
pub struct BehaviorModule {
    exports: Vec<(String, Export)>,
}

impl BehaviorModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constructor export
    pub fn export<F, C>(mut self, name: &str, build: F) -> Self
    where
        F: Fn(&ComponentHandle) -> Result<C, ControllerError> + 'static,
        C: Controller + 'static,
    {
        let constructor: Constructor =
            Rc::new(move |handle| build(handle).map(|c| Box::new(c) as Box<dyn Controller>));
        self.exports.push((name.to_string(), Export::Constructor(constructor)));
        self
    }

    /// Add the `default` constructor export
    pub fn default_export<F, C>(self, build: F) -> Self
    where
        F: Fn(&ComponentHandle) -> Result<C, ControllerError> + 'static,
        C: Controller + 'static,
    {
        self.export("default", build)
    }

    /// Add a plain value export
    pub fn export_value(mut self, name: &str, value: Value) -> Self {
        self.exports.push((name.to_string(), Export::Value(value)));
        self
    }

    /// Module for a declarative behavior: a JSON object whose keys become
    /// properties of a [`DataController`]
    pub fn from_json(text: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(values)) => {
                Some(Self::new().default_export(move |_| Ok(DataController::new(values.clone()))))
            }
            _ => None,
        }
    }

    /// Export names, in declaration order
    pub fn export_names(&self) -> Vec<String> {
        self.exports.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Resolve the constructor for `tag`
    pub fn constructor_for(&self, tag: &str) -> Result<Constructor, ComponentError> {
        let expected = export_name_for(tag);
        let found = self
            .find_constructor(|name| name == "default")
            .or_else(|| self.find_constructor(|name| name.eq_ignore_ascii_case(&expected)));

        found.ok_or_else(|| ComponentError::MalformedBehavior {
            tag: tag.to_string(),
            expected,
            exports: self.export_names(),
        })
    }

    fn find_constructor(&self, mut matches: impl FnMut(&str) -> bool) -> Option<Constructor> {
        self.exports.iter().find_map(|(name, export)| match export {
            Export::Constructor(constructor) if matches(name) => Some(constructor.clone()),
            _ => None,
        })
    }
}

/// Export name derived from a tag: `veggie-form` -> `veggieform`
fn export_name_for(tag: &str) -> String {
    tag.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect()
}

/// Behavior modules available to the session, keyed by tag
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, BehaviorModule>,
    imports: RefCell<HashMap<String, usize>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the behavior module of `tag`
    pub fn register(&mut self, tag: &str, module: BehaviorModule) -> &mut Self {
        self.modules.insert(tag.to_ascii_lowercase(), module);
        self
    }

    /// Check if `tag` has a registered module
    pub fn contains(&self, tag: &str) -> bool {
        self.modules.contains_key(&tag.to_ascii_lowercase())
    }

    /// Import the module of `tag`; `None` if none is registered
    pub fn import(&self, tag: &str) -> Option<BehaviorModule> {
        let key = tag.to_ascii_lowercase();
        *self.imports.borrow_mut().entry(key.clone()).or_insert(0) += 1;
        self.modules.get(&key).cloned()
    }

    /// Number of imports of `tag` so far
    pub fn import_count(&self, tag: &str) -> usize {
        self.imports
            .borrow()
            .get(&tag.to_ascii_lowercase())
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
