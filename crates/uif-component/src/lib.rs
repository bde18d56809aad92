//! uif Components
//!
//! Scans a document for custom tags, loads a markup/style/behavior triple
//! per distinct tag (once per session), binds a controller to every
//! element, and renders the element by substituting controller members
//! into the fetched markup. Also hosts event dispatch and the
//! attribute-driven validation protocol.

mod error;
mod value;
mod controller;
mod module;
mod loader;
mod definition;
mod events;
mod classify;
mod template;
mod binding;
mod host;
mod instance;
mod ownership;
mod runtime;
mod validation;

pub use error::{ComponentError, ControllerError};
pub use value::{parse_literal_list, to_text};
pub use controller::{Check, Controller, DataController, Invocation, Member, Verdict};
pub use module::{BehaviorModule, Constructor, Export, ModuleRegistry};
pub use loader::{DefinitionParts, ResourceLoader};
pub use definition::{ComponentDefinition, DefinitionCache};
pub use events::{EVENT_TYPES, match_event_type};
pub use classify::{Pattern, Substitution, SubstitutionKind, classify};
pub use template::{Placeholder, Token, render, tokenize};
pub use binding::EventBinding;
pub use host::{DomHost, HostBinding};
pub use instance::{ComponentHandle, ComponentInstance};
pub use ownership::OwnershipIndex;
pub use runtime::ComponentRuntime;
pub use validation::{BUILTIN_VALIDATORS, camel_to_kebab, kebab_to_camel, must_be};

pub use serde_json::Value;

/// Attribute surface written to and read from the host document
pub mod attrs {
    /// Marks an element that owns a component instance (value: tag)
    pub const COMPONENT: &str = "uif-component";
    /// Marks an element carrying recorded validators
    pub const VALIDATE: &str = "uif-validate";
    /// Prefix of a recorded validator (`uif-check-must-be-animal`)
    pub const CHECK_PREFIX: &str = "uif-check-";
    /// Prefix of a failing validator marker; value is the message
    pub const FAIL_PREFIX: &str = "uif-fail-";
    /// Number of validators still settling
    pub const REVIEWING: &str = "uif-reviewing";
    /// Aggregate state: `good`, `bad` or `reviewing`
    pub const STATE: &str = "uif-state";
    /// Tag whose style sheet a `<style>` element carries
    pub const STYLE: &str = "uif-style";
}
