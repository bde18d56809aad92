//! Host binding
//!
//! Markup assigned to an element is not converted to child elements
//! synchronously. `commit_markup` detaches the old children and queues
//! the markup; the children become queryable only once `materialized`
//! has returned.

use std::cell::RefCell;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use uif_dom::{DocumentHandle, NodeId};

use crate::{ComponentError, attrs};

/// Document operations the component runtime needs from its host
pub trait HostBinding {
    /// The host document
    fn document(&self) -> DocumentHandle;

    /// Replace the content of `element` with `markup`
    fn commit_markup(&self, element: NodeId, markup: String);

    /// Resolve once the committed markup of `element` is live children
    fn materialized(&self, element: NodeId) -> LocalBoxFuture<'_, Result<(), ComponentError>>;

    /// Append a style sheet for `tag` to the document head
    fn inject_style(&self, tag: &str, css: &str);
}

/// In-memory host over a uif document
pub struct DomHost {
    document: DocumentHandle,
    pending: RefCell<Vec<(NodeId, String)>>,
}

impl DomHost {
    pub fn new(document: DocumentHandle) -> Self {
        Self {
            document,
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Number of commits not yet materialized
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Convert every queued commit into children
    pub fn flush(&self) -> Result<(), ComponentError> {
        let queued = std::mem::take(&mut *self.pending.borrow_mut());
        if queued.is_empty() {
            return Ok(());
        }
        let mut doc = self.document.borrow_mut();
        for (element, markup) in queued {
            let nodes = uif_html::parse_fragment_into(&mut doc.tree, element, &markup)?;
            tracing::debug!("Materialized {} nodes under {}", nodes.len(), element);
        }
        Ok(())
    }
}

impl HostBinding for DomHost {
    fn document(&self) -> DocumentHandle {
        self.document.clone()
    }

    fn commit_markup(&self, element: NodeId, markup: String) {
        self.document.borrow_mut().tree.remove_children(element);
        let mut pending = self.pending.borrow_mut();
        // A later commit to the same element supersedes an unmaterialized one
        pending.retain(|(queued, _)| *queued != element);
        pending.push((element, markup));
    }

    fn materialized(&self, _element: NodeId) -> LocalBoxFuture<'_, Result<(), ComponentError>> {
        async move {
            smol::future::yield_now().await;
            self.flush()
        }
        .boxed_local()
    }

    fn inject_style(&self, tag: &str, css: &str) {
        let mut doc = self.document.borrow_mut();
        let style = doc.append_style(css);
        if let Err(e) = doc.tree.set_attribute(style, attrs::STYLE, tag) {
            tracing::warn!("Could not label style for <{}>: {}", tag, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uif_dom::Document;

    #[test]
    fn test_children_appear_only_after_materialization() {
        let document = Document::new("about:blank").into_handle();
        let body = document.borrow().body();
        let host = DomHost::new(document.clone());

        host.commit_markup(body, "<p>one</p><p>two</p>".to_string());
        assert_eq!(document.borrow().tree.children(body).count(), 0);
        assert_eq!(host.pending(), 1);

        smol::block_on(host.materialized(body)).unwrap();
        assert_eq!(document.borrow().tree.element_children(body).len(), 2);
        assert_eq!(host.pending(), 0);
    }

    #[test]
    fn test_commit_detaches_old_children() {
        let document = Document::new("about:blank").into_handle();
        let body = document.borrow().body();
        let host = DomHost::new(document.clone());

        host.commit_markup(body, "<b>old</b>".to_string());
        host.flush().unwrap();
        host.commit_markup(body, "<i>new</i>".to_string());
        host.flush().unwrap();

        let doc = document.borrow();
        let kids = doc.tree.element_children(body);
        assert_eq!(kids.len(), 1);
        assert_eq!(doc.tree.tag_name(kids[0]), Some("i"));
    }

    #[test]
    fn test_inject_style_labels_tag() {
        let document = Document::new("about:blank").into_handle();
        let host = DomHost::new(document.clone());
        host.inject_style("navbar", "nav { color: red }");

        let doc = document.borrow();
        let style = doc.first_by_tag("style").unwrap();
        assert_eq!(doc.tree.get_attribute(style, attrs::STYLE), Some("navbar"));
        assert_eq!(doc.tree.text_content(style), "nav { color: red }");
    }
}
