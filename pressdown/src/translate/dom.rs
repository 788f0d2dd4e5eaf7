//! HTML fragment parsing helpers over html5ever / rcdom.

use html5ever::tendril::TendrilSink;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML fragment and return its content nodes.
///
/// Post bodies are loose fragments, so we run the full document parser and
/// collect the children of the synthesized `<head>` and `<body>` in order.
/// (The parser hoists fragment-leading `<script>`/`<style>` nodes into the
/// head; walking both sections keeps them.)
///
/// The content nodes are *moved* out of the parsed tree rather than cloned:
/// `rcdom`'s `Drop for Node` drains the whole subtree of any dropped node, so
/// a kept `Rc` clone would lose its own children once the local `dom` drops.
/// Detaching the nodes from their sections keeps their subtrees intact.
pub fn parse_body(html: &str) -> Vec<Handle> {
    let dom = html5ever::parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());

    let mut content = Vec::new();
    let document_children = dom.document.children.borrow();
    let Some(html_element) = document_children
        .iter()
        .find(|node| element_name(node).as_deref() == Some("html"))
    else {
        return content;
    };
    for section in html_element.children.borrow().iter() {
        content.append(&mut section.children.borrow_mut());
    }
    content
}

/// Local tag name of an element node.
pub fn element_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

/// Attribute value by local name.
pub fn attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == attr_name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Whether an attribute is present at all (regardless of value).
pub fn has_attr(node: &Handle, attr_name: &str) -> bool {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            attrs.borrow().iter().any(|a| &*a.name.local == attr_name)
        }
        _ => false,
    }
}

/// Concatenated text content of a subtree.
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        _ => {
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
    }
}
