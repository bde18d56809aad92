//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it into the uif DOM. Fragments are
//! parsed in a `<body>` context, so nothing is hoisted and leading
//! comments stay with the fragment.

use html5ever::tendril::TendrilSink;
use html5ever::{QualName, local_name, ns, parse_document, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use uif_dom::{Document, DomTree, NodeId};

use crate::ParseError;

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = Self::read(html)?;

        let mut document = Document::empty(url);
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root);
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Parse `markup` and append the produced nodes to `parent`
    ///
    /// Returns the top-level nodes that were appended.
    pub fn parse_fragment_into(
        &self,
        tree: &mut DomTree,
        parent: NodeId,
        markup: &str,
    ) -> Result<Vec<NodeId>, ParseError> {
        if tree.get(parent).is_none() {
            return Err(ParseError::MissingParent(parent));
        }

        let context = QualName::new(None, ns!(html), local_name!("body"));
        let dom = parse_fragment(RcDom::default(), Default::default(), context, Vec::new(), false)
            .from_utf8()
            .read_from(&mut markup.as_bytes())?;
        let before = tree.children(parent).count();

        // html5ever roots every fragment in a synthesized <html> element
        for root in dom.document.children.borrow().iter() {
            for child in root.children.borrow().iter() {
                self.convert_node(child, tree, parent);
            }
        }

        let appended: Vec<NodeId> = tree.children(parent).skip(before).map(|(id, _)| id).collect();
        tracing::trace!("Fragment produced {} top-level nodes under {}", appended.len(), parent);
        Ok(appended)
    }

    fn read(html: &str) -> Result<RcDom, ParseError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;
        Ok(dom)
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
            }
            RcNodeData::Doctype { name, .. } => {
                let id = tree.create_doctype(&name.to_string());
                tree.append_child(parent, id);
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if !text.is_empty() {
                    let id = tree.create_text(&text);
                    tree.append_child(parent, id);
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(&contents.to_string());
                tree.append_child(parent, id);
            }
            RcNodeData::Element {
                name,
                attrs,
                template_contents,
                ..
            } => {
                let id = tree.create_element(&name.local);

                for attr in attrs.borrow().iter() {
                    // Duplicate attributes were already dropped by the tokenizer
                    let attr_name: &str = &attr.name.local;
                    if let Err(err) = tree.set_attribute(id, attr_name, &attr.value.to_string()) {
                        tracing::warn!("Dropping attribute {}: {}", attr_name, err);
                    }
                }

                tree.append_child(parent, id);

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id);
                }
                // <template> content lives in a separate fragment
                if let Some(contents) = template_contents.borrow().as_ref() {
                    for child in contents.children.borrow().iter() {
                        self.convert_node(child, tree, id);
                    }
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {
                // Not meaningful in HTML documents
            }
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html).unwrap();

        assert_eq!(doc.title(), "Test");
        assert_eq!(doc.tree().element_children(doc.body()).len(), 1);
    }

    #[test]
    fn test_custom_tags_kept_lowercase() {
        let doc = HtmlParser::new().parse("<body><NavBar></NavBar></body>").unwrap();
        let children = doc.tree().element_children(doc.body());

        assert_eq!(children.len(), 1);
        assert_eq!(doc.tree().tag_name(children[0]), Some("navbar"));
    }

    #[test]
    fn test_fragment_keeps_source_order() {
        let mut tree = DomTree::new();
        let host = tree.create_element("navbar");
        tree.append_child(tree.root(), host);

        let nodes = HtmlParser::new()
            .parse_fragment_into(&mut tree, host, "<ul><li>x</li></ul><style>b{}</style>")
            .unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(tree.tag_name(nodes[0]), Some("ul"));
        assert_eq!(tree.tag_name(nodes[1]), Some("style"));
    }

    #[test]
    fn test_fragment_leading_comment_kept() {
        let mut tree = DomTree::new();
        let host = tree.create_element("card");
        tree.append_child(tree.root(), host);

        let nodes = HtmlParser::new()
            .parse_fragment_into(&mut tree, host, "<!-- header --><b>x</b>")
            .unwrap();

        assert_eq!(nodes.len(), 2);
        assert!(matches!(&tree.get(nodes[0]).unwrap().data, uif_dom::NodeData::Comment(c) if c == " header "));
        assert_eq!(tree.tag_name(nodes[1]), Some("b"));
    }

    #[test]
    fn test_fragment_template_contents() {
        let mut tree = DomTree::new();
        let host = tree.create_element("card");
        tree.append_child(tree.root(), host);

        let nodes = HtmlParser::new()
            .parse_fragment_into(&mut tree, host, "<p>a</p><template><li>row</li></template>")
            .unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(tree.tag_name(nodes[1]), Some("template"));
        assert_eq!(tree.text_content(nodes[1]), "row");
    }

    #[test]
    fn test_fragment_missing_parent() {
        let mut tree = DomTree::new();
        let result = HtmlParser::new().parse_fragment_into(&mut tree, NodeId::NONE, "<p></p>");
        assert!(matches!(result, Err(ParseError::MissingParent(_))));
    }
}
