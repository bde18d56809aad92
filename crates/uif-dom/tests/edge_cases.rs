//! Edge case tests for uif-dom
//!
//! Tree manipulation patterns the component loader relies on.

use uif_dom::{Document, DomTree, NodeId, is_standard_tag};

// ============================================================================
// DOM TREE EDGE CASES
// ============================================================================

#[test]
fn test_tree_empty_operations() {
    let tree = DomTree::new();

    assert!(tree.get(NodeId::NONE).is_none());
    assert_eq!(tree.children(NodeId::NONE).count(), 0);
    assert_eq!(tree.ancestors(NodeId::ROOT).count(), 0);
}

#[test]
fn test_replace_children_twice() {
    let mut tree = DomTree::new();
    let host = tree.create_element("navbar");
    tree.append_child(tree.root(), host);

    for round in 0..2 {
        tree.remove_children(host);
        let child = tree.create_element("ul");
        let text = tree.create_text(&format!("round {}", round));
        tree.append_child(host, child);
        tree.append_child(child, text);
    }

    assert_eq!(tree.element_children(host).len(), 1);
    assert_eq!(tree.text_content(host), "round 1");
}

#[test]
fn test_tree_deep_nesting() {
    let mut tree = DomTree::new();
    let mut parent = tree.root();
    for _ in 0..500 {
        let div = tree.create_element("div");
        tree.append_child(parent, div);
        parent = div;
    }

    assert_eq!(tree.ancestors(parent).count(), 500);
    assert_eq!(tree.descendants(tree.root()).len(), 500);
}

#[test]
fn test_many_siblings_order() {
    let mut tree = DomTree::new();
    let list = tree.create_element("ul");
    tree.append_child(tree.root(), list);

    let items: Vec<NodeId> = (0..100)
        .map(|_| {
            let li = tree.create_element("li");
            tree.append_child(list, li);
            li
        })
        .collect();

    assert_eq!(tree.element_children(list), items);
}

// ============================================================================
// DOCUMENT
// ============================================================================

#[test]
fn test_get_element_by_id() {
    let mut doc = Document::default();
    let body = doc.body();
    let div = doc.tree.create_element("div");
    doc.tree.append_child(body, div);
    doc.tree.set_attribute(div, "id", "main").unwrap();

    assert_eq!(doc.get_element_by_id("main"), Some(div));
    assert_eq!(doc.get_element_by_id("missing"), None);
}

#[test]
fn test_all_by_tag_document_order() {
    let mut doc = Document::default();
    let body = doc.body();
    let first = doc.tree.create_element("navbar");
    let wrapper = doc.tree.create_element("div");
    let second = doc.tree.create_element("NAVBAR");
    doc.tree.append_child(body, first);
    doc.tree.append_child(body, wrapper);
    doc.tree.append_child(wrapper, second);

    assert_eq!(doc.all_by_tag("navbar"), vec![first, second]);
    assert!(!is_standard_tag("navbar"));
}
