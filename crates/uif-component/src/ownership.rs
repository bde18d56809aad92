//! Ownership index
//!
//! Maps an element to the component instance bound to it. Entries are
//! weak: the index never keeps an instance (or its element) alive.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use uif_dom::{DomTree, NodeId};

use crate::ComponentInstance;

#[derive(Debug, Default)]
pub struct OwnershipIndex {
    owners: RefCell<HashMap<NodeId, Weak<ComponentInstance>>>,
}

impl OwnershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an instance to its element
    pub fn register(&self, instance: &Rc<ComponentInstance>) {
        self.owners
            .borrow_mut()
            .insert(instance.element(), Rc::downgrade(instance));
    }

    /// Instance bound to exactly this element
    pub fn get(&self, element: NodeId) -> Option<Rc<ComponentInstance>> {
        self.owners.borrow().get(&element)?.upgrade()
    }

    /// Live owners of `node` and its ancestors, nearest first
    pub fn owners_of(&self, tree: &DomTree, node: NodeId) -> Vec<Rc<ComponentInstance>> {
        std::iter::once(node)
            .chain(tree.ancestors(node))
            .filter_map(|candidate| self.get(candidate))
            .collect()
    }

    /// Nearest owner of `node` (inclusive)
    pub fn nearest(&self, tree: &DomTree, node: NodeId) -> Option<Rc<ComponentInstance>> {
        std::iter::once(node)
            .chain(tree.ancestors(node))
            .find_map(|candidate| self.get(candidate))
    }

    /// Drop entries whose instance is gone
    pub fn prune(&self) -> usize {
        let mut owners = self.owners.borrow_mut();
        let before = owners.len();
        owners.retain(|_, weak| weak.strong_count() > 0);
        before - owners.len()
    }

    /// Number of live instances
    pub fn live(&self) -> usize {
        self.owners
            .borrow()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}
