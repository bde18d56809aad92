//! Component runtime
//!
//! One runtime per page session. It owns the session registries (definition
//! cache, ownership index, injected styles) and drives the scan:
//!
//! ```text
//! standard tag: recurse into children
//! svg / math:   skip the subtree
//! custom tag:   resolve -> render -> materialize -> recurse -> done
//! ```
//!
//! Siblings are scanned concurrently. An element's own content is always
//! materialized before its descendants are scanned.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, join_all};
use serde_json::Value;
use uif_dom::{DocumentHandle, Event, NodeId, is_foreign_root, is_standard_tag};
use uif_net::TextFetcher;

use crate::{
    ComponentError, ComponentHandle, ComponentInstance, DefinitionCache, HostBinding, Invocation,
    ModuleRegistry, OwnershipIndex, ResourceLoader, attrs, validation,
};
use crate::validation::RunLedger;

pub struct ComponentRuntime {
    host: Rc<dyn HostBinding>,
    cache: DefinitionCache,
    owners: OwnershipIndex,
    styled: RefCell<HashSet<String>>,
    roots: RefCell<Vec<Rc<ComponentInstance>>>,
    validation_runs: RunLedger,
    rerender_on_dispatch: bool,
}

impl ComponentRuntime {
    /// Start a session over `host`
    pub fn new(host: Rc<dyn HostBinding>, fetcher: Rc<dyn TextFetcher>, modules: ModuleRegistry) -> Self {
        Self {
            host,
            cache: DefinitionCache::new(ResourceLoader::new(fetcher, modules)),
            owners: OwnershipIndex::new(),
            styled: RefCell::new(HashSet::new()),
            roots: RefCell::new(Vec::new()),
            validation_runs: RunLedger::default(),
            rerender_on_dispatch: false,
        }
    }

    /// Re-render the owning component after every dispatch
    pub fn with_rerender_on_dispatch(mut self, enabled: bool) -> Self {
        self.rerender_on_dispatch = enabled;
        self
    }

    pub fn document(&self) -> DocumentHandle {
        self.host.document()
    }

    pub fn cache(&self) -> &DefinitionCache {
        &self.cache
    }

    pub fn owners(&self) -> &OwnershipIndex {
        &self.owners
    }

    /// Top-level instances found by the scans so far
    pub fn instances(&self) -> Vec<Rc<ComponentInstance>> {
        self.roots.borrow().clone()
    }

    /// Scan `<body>` (or the whole document when it has none)
    pub async fn scan_document(&self) -> Vec<Rc<ComponentInstance>> {
        let body = self.document().borrow().body();
        let start = if body.is_valid() { body } else { NodeId::ROOT };
        self.scan(start).await
    }

    /// Instantiate every component below `parent`
    ///
    /// Returns the outermost instances found, including those nested in
    /// standard elements. The runtime keeps them alive. Elements that
    /// already own an instance are not instantiated again.
    pub async fn scan(&self, parent: NodeId) -> Vec<Rc<ComponentInstance>> {
        let found = self.scan_children(parent).await;
        self.roots.borrow_mut().extend(found.iter().cloned());
        found
    }

    fn scan_children(&self, parent: NodeId) -> LocalBoxFuture<'_, Vec<Rc<ComponentInstance>>> {
        async move {
            let children = self.document().borrow().tree.element_children(parent);
            join_all(children.into_iter().map(|child| self.visit(child)))
                .await
                .into_iter()
                .flatten()
                .collect()
        }
        .boxed_local()
    }

    async fn visit(&self, element: NodeId) -> Vec<Rc<ComponentInstance>> {
        let tag = self
            .document()
            .borrow()
            .tree
            .tag_name(element)
            .map(str::to_string);
        match tag {
            Some(tag) if is_foreign_root(&tag) => Vec::new(),
            // already instantiated; only look for new components inside
            Some(_) if self.owners.get(element).is_some() => self.scan_children(element).await,
            Some(tag) if !is_standard_tag(&tag) => vec![self.instantiate(element, &tag).await],
            _ => self.scan_children(element).await,
        }
    }

    async fn instantiate(&self, element: NodeId, tag: &str) -> Rc<ComponentInstance> {
        tracing::debug!("Resolving <{}> at {}", tag, element);
        let definition = self.cache.resolve(tag).await;
        let document = self.document();
        let handle = ComponentHandle::new(tag, element, document.clone());

        let controller = definition.behavior().and_then(|construct| match construct(&handle) {
            Ok(controller) => Some(controller),
            Err(source) => {
                let e = ComponentError::Construction {
                    tag: tag.to_string(),
                    source,
                };
                tracing::warn!("{}; rendering without a controller", e);
                None
            }
        });

        let prior_content = {
            let mut doc = document.borrow_mut();
            if let Err(e) = doc.tree.set_attribute(element, attrs::COMPONENT, tag) {
                tracing::warn!("Cannot mark {}: {}", element, e);
            }
            Some(uif_html::inner_html(&doc.tree, element)).filter(|content| !content.trim().is_empty())
        };

        if let Some(css) = definition.style() {
            if self.styled.borrow_mut().insert(tag.to_string()) {
                self.host.inject_style(tag, &css);
            }
        }

        let instance = Rc::new(ComponentInstance::new(handle, definition.clone(), controller, prior_content));
        self.owners.register(&instance);

        if let Some(markup) = definition.markup() {
            let rendered = instance.render(&markup);
            self.host.commit_markup(element, rendered);
            if let Err(e) = self.host.materialized(element).await {
                tracing::warn!("<{}> at {} did not materialize: {}", tag, element, e);
            }
        }

        let children = self.scan_children(element).await;
        instance.set_children(children);
        tracing::debug!("Instantiated <{}> at {}", tag, element);
        instance
    }

    /// Invoke `member` on the component owning `target`
    ///
    /// The nearest owner declaring the member handles the call, so handlers
    /// passed into a nested component's prior content still reach the
    /// component whose markup bound them.
    pub async fn dispatch(
        &self,
        target: NodeId,
        event: Option<Event>,
        member: &str,
        args: Vec<Value>,
    ) -> Result<Value, ComponentError> {
        let owners = self.owners.owners_of(&self.document().borrow().tree, target);
        let owner = owners
            .iter()
            .find(|owner| owner.declares(member))
            .or_else(|| owners.first())
            .cloned()
            .ok_or(ComponentError::NoOwner(target))?;

        tracing::debug!("Dispatching <{}>.{}", owner.tag(), member);
        let call = Invocation {
            args,
            event,
            target: Some(target),
        };
        let value = owner.invoke(member, call)?;

        if self.rerender_on_dispatch {
            self.refresh(&owner).await?;
        }
        Ok(value)
    }

    /// Render `instance` again from its definition and rescan its content
    pub async fn refresh(&self, instance: &Rc<ComponentInstance>) -> Result<(), ComponentError> {
        let Some(markup) = instance.definition().markup() else {
            return Ok(());
        };
        let rendered = instance.render(&markup);
        self.host.commit_markup(instance.element(), rendered);
        self.host.materialized(instance.element()).await?;

        let children = self.scan_children(instance.element()).await;
        instance.set_children(children);
        self.owners.prune();
        Ok(())
    }

    /// Run the validation protocol on `wrapper`
    pub async fn validate(&self, wrapper: NodeId, event: Option<&Event>) {
        validation::run(&self.document(), &self.owners, &self.validation_runs, wrapper, event).await;
    }
}
