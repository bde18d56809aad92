//! Component instances
//!
//! One instance per element bound to a tag. The instance exclusively owns
//! its controller; the classified substitutions are shared with every
//! other instance of the tag through the definition.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use serde_json::Value;
use uif_dom::{DocumentHandle, NodeId};

use crate::{
    ComponentDefinition, ComponentError, Controller, Invocation, Substitution, SubstitutionKind, render,
};

/// Handle given to a controller while it is being constructed
#[derive(Clone)]
pub struct ComponentHandle {
    tag: String,
    element: NodeId,
    document: DocumentHandle,
}

impl ComponentHandle {
    pub fn new(tag: &str, element: NodeId, document: DocumentHandle) -> Self {
        Self {
            tag: tag.to_string(),
            element,
            document,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Element owning the component
    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn document(&self) -> &DocumentHandle {
        &self.document
    }

    /// Read an attribute of the owning element
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.document
            .borrow()
            .tree
            .get_attribute(self.element, name)
            .map(str::to_string)
    }
}

impl std::fmt::Debug for ComponentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentHandle")
            .field("tag", &self.tag)
            .field("element", &self.element)
            .finish()
    }
}

/// A rendered component bound to one element
pub struct ComponentInstance {
    handle: ComponentHandle,
    definition: Rc<ComponentDefinition>,
    controller: RefCell<Option<Box<dyn Controller>>>,
    substitutions: Rc<[Substitution]>,
    prior_content: Option<String>,
    children: RefCell<Vec<Rc<ComponentInstance>>>,
}

impl ComponentInstance {
    pub fn new(
        handle: ComponentHandle,
        definition: Rc<ComponentDefinition>,
        controller: Option<Box<dyn Controller>>,
        prior_content: Option<String>,
    ) -> Self {
        let substitutions = match &controller {
            Some(controller) => definition.substitutions_for(controller.as_ref()),
            None => Rc::from(Vec::new()),
        };
        Self {
            handle,
            definition,
            controller: RefCell::new(controller),
            substitutions,
            prior_content,
            children: RefCell::new(Vec::new()),
        }
    }

    pub fn tag(&self) -> &str {
        self.handle.tag()
    }

    pub fn element(&self) -> NodeId {
        self.handle.element()
    }

    pub fn handle(&self) -> &ComponentHandle {
        &self.handle
    }

    pub fn definition(&self) -> &Rc<ComponentDefinition> {
        &self.definition
    }

    pub fn has_controller(&self) -> bool {
        self.controller.borrow().is_some()
    }

    /// Substitutions shared with the other instances of this tag
    pub fn substitutions(&self) -> &Rc<[Substitution]> {
        &self.substitutions
    }

    /// Content the element held before its first render
    pub fn prior_content(&self) -> Option<&str> {
        self.prior_content.as_deref()
    }

    /// Components found inside this one's rendered content
    pub fn children(&self) -> Ref<'_, Vec<Rc<ComponentInstance>>> {
        self.children.borrow()
    }

    pub(crate) fn set_children(&self, children: Vec<Rc<ComponentInstance>>) {
        *self.children.borrow_mut() = children;
    }

    /// Check if the controller declares `member`
    pub fn declares(&self, member: &str) -> bool {
        self.substitutions.iter().any(|s| s.key == member)
    }

    /// Names of the declared validators
    pub fn validator_names(&self) -> Vec<String> {
        self.substitutions
            .iter()
            .filter(|s| s.kind == SubstitutionKind::Validator)
            .map(|s| s.key.clone())
            .collect()
    }

    /// Current value of a controller property
    pub fn property(&self, key: &str) -> Option<Value> {
        self.controller.borrow().as_ref()?.property(key)
    }

    /// Call a controller member
    pub fn invoke(&self, member: &str, call: Invocation) -> Result<Value, ComponentError> {
        let mut controller = self.controller.borrow_mut();
        let controller = controller.as_mut().ok_or_else(|| ComponentError::NoController {
            tag: self.tag().to_string(),
        })?;
        controller.invoke(member, call).map_err(|source| ComponentError::Dispatch {
            tag: self.tag().to_string(),
            member: member.to_string(),
            source,
        })
    }

    /// Run `f` against the controller, if there is one
    pub fn with_controller<R>(&self, f: impl FnOnce(&dyn Controller) -> R) -> Option<R> {
        self.controller.borrow().as_deref().map(|controller| f(controller))
    }

    /// Render `markup` against this instance's controller and prior content
    pub fn render(&self, markup: &str) -> String {
        let mut controller = self.controller.borrow_mut();
        let controller = controller.as_mut().map(|c| &mut **c as &mut dyn Controller);
        render(markup, &self.substitutions, controller, self.prior_content.as_deref())
    }
}

impl std::fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("tag", &self.tag())
            .field("element", &self.element())
            .field("controller", &self.has_controller())
            .field("children", &self.children.borrow().len())
            .finish()
    }
}
