//! uif HTML Parser
//!
//! HTML5 parsing built on html5ever, converted into the uif arena DOM,
//! plus the inverse serializer used to capture an element's prior content.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, escape_attribute, escape_text};
pub use uif_dom::{Document, DomTree, Node, NodeId};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse a markup fragment and append the resulting nodes under `parent`
pub fn parse_fragment_into(tree: &mut DomTree, parent: NodeId, markup: &str) -> Result<Vec<NodeId>, ParseError> {
    HtmlParser::new().parse_fragment_into(tree, parent, markup)
}

/// Serialize the children of a node
pub fn inner_html(tree: &DomTree, node: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read markup: {0}")]
    Io(#[from] std::io::Error),

    #[error("fragment target {0} is not in the tree")]
    MissingParent(NodeId),
}
