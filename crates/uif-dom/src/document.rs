//! Document - High-level document API

use std::cell::RefCell;
use std::rc::Rc;

use crate::{DomTree, NodeId};

/// Shared handle to a document
///
/// Component loading is single-threaded and cooperative: every in-flight
/// load, render and validation borrows the document briefly between
/// suspension points, never across one.
pub type DocumentHandle = Rc<RefCell<Document>>;

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Wrap into a shared handle
    pub fn into_handle(self) -> DocumentHandle {
        Rc::new(RefCell::new(self))
    }

    /// Locate <html>, <head> and <body> after the tree was built externally
    pub fn finalize(&mut self) {
        let root = self.tree.root();
        self.html_element = self.find_child(root, "html").unwrap_or(NodeId::NONE);
        if self.html_element.is_valid() {
            self.head_element = self.find_child(self.html_element, "head").unwrap_or(NodeId::NONE);
            self.body_element = self.find_child(self.html_element, "body").unwrap_or(NodeId::NONE);
        }
    }

    fn find_child(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.tree
            .element_children(parent)
            .into_iter()
            .find(|&id| self.tree.tag_name(id) == Some(tag))
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.find_child(self.head_element, "title")
            .map(|title| self.tree.text_content(title))
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&node| self.tree.get_attribute(node, "id") == Some(id))
    }

    /// First element with the given tag name, in document order
    pub fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.all_by_tag(tag).into_iter().next()
    }

    /// All elements with the given tag name, in document order
    pub fn all_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&node| {
                self.tree
                    .tag_name(node)
                    .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            })
            .collect()
    }

    /// Append a `<style>` element carrying `css` to the head
    pub fn append_style(&mut self, css: &str) -> NodeId {
        let target = if self.head_element.is_valid() {
            self.head_element
        } else {
            self.tree.root()
        };
        let style = self.tree.create_element("style");
        let text = self.tree.create_text(css);
        self.tree.append_child(style, text);
        self.tree.append_child(target, style);
        style
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.tree.memory_usage() + self.url.capacity()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
