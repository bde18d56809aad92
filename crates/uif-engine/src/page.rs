//! Page - a loaded document and its component session

use std::rc::Rc;

use uif_component::{ComponentInstance, ComponentRuntime, DomHost, EventBinding, ModuleRegistry, Value, attrs};
use uif_dom::{DocumentHandle, Event, NodeId};
use uif_html::HtmlSerializer;
use uif_net::TextFetcher;

use crate::{Config, EngineError};

/// A page session
pub struct Page {
    document: DocumentHandle,
    runtime: ComponentRuntime,
}

impl Page {
    /// Parse `html` and attach a component runtime to it
    pub fn from_html(
        html: &str,
        fetcher: Rc<dyn TextFetcher>,
        modules: ModuleRegistry,
        config: &Config,
    ) -> Result<Self, EngineError> {
        let document = uif_html::parse(html)?.into_handle();
        let host = Rc::new(DomHost::new(document.clone()));
        let runtime =
            ComponentRuntime::new(host, fetcher, modules).with_rerender_on_dispatch(config.rerender_on_dispatch);
        Ok(Self { document, runtime })
    }

    /// Scan the document and instantiate every component in it
    pub async fn load(&self) -> Vec<Rc<ComponentInstance>> {
        let found = self.runtime.scan_document().await;
        tracing::info!("Loaded {} top-level component(s)", found.len());
        found
    }

    /// Fire `event_type` at `node`
    ///
    /// The nearest element at or above `node` carrying an `on<type>` binding
    /// handles it. Returns `None` when nothing is bound.
    pub async fn fire(&self, node: NodeId, event_type: &str) -> Result<Option<Value>, EngineError> {
        let event_type = event_type.to_ascii_lowercase();
        let attribute = format!("on{}", event_type);
        let bound = {
            let doc = self.document.borrow();
            doc.tree
                .closest(node, |_, n| n.as_element().is_some_and(|e| e.has_attr(&attribute)))
                .and_then(|holder| {
                    let expression = doc.tree.get_attribute(holder, &attribute)?;
                    EventBinding::parse(&event_type, expression).map(|binding| (holder, binding))
                })
        };
        let Some((holder, binding)) = bound else {
            tracing::debug!("No {} binding above {}", attribute, node);
            return Ok(None);
        };

        let mut event = Event::new(&event_type, node);
        event.current_target = Some(holder);
        let value = self
            .runtime
            .dispatch(holder, Some(event), &binding.member, binding.args)
            .await?;
        Ok(Some(value))
    }

    /// Set the value of `input` and run validation on its wrapper
    ///
    /// The wrapper is the nearest `uif-validate` element at or above the
    /// input, or the input itself.
    pub async fn change(&self, input: NodeId, value: &str) -> Result<(), EngineError> {
        let wrapper = {
            let mut doc = self.document.borrow_mut();
            doc.tree.set_attribute(input, "value", value)?;
            doc.tree
                .closest(input, |_, n| n.as_element().is_some_and(|e| e.has_attr(attrs::VALIDATE)))
                .unwrap_or(input)
        };
        self.runtime.validate(wrapper, Some(&Event::change(input, value))).await;
        Ok(())
    }

    /// Serialize the whole document
    pub fn to_html(&self, pretty: bool) -> String {
        let serializer = if pretty {
            HtmlSerializer::pretty()
        } else {
            HtmlSerializer::new()
        };
        let doc = self.document.borrow();
        serializer.serialize_outer(&doc.tree, doc.tree.root())
    }

    /// Serialize the contents of `<body>`
    pub fn body_html(&self) -> String {
        let doc = self.document.borrow();
        uif_html::inner_html(&doc.tree, doc.body())
    }

    /// Top-level component instances
    pub fn instances(&self) -> Vec<Rc<ComponentInstance>> {
        self.runtime.instances()
    }

    pub fn document(&self) -> &DocumentHandle {
        &self.document
    }

    pub fn runtime(&self) -> &ComponentRuntime {
        &self.runtime
    }
}
