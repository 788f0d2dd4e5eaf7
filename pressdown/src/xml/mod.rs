//! Export document ingestion
//!
//! Parses the raw WXR export into an owned, loosely-typed tree that the
//! record extractors walk. The export format is attribute-driven and
//! namespace-heavy (`wp:post_id`, `content:encoded`, `dc:creator`), so two
//! normalizations happen here once, up front:
//!
//! - namespace prefixes are stripped from tag names (`wp:post_id` becomes
//!   `post_id`), sparing the extractors any knowledge of the export's
//!   namespace scheme;
//! - whitespace around text nodes is trimmed.
//!
//! The tree is a tagged union (`XmlNode::Text` / `XmlNode::Element`) rather
//! than a generic map, and required lookups go through accessors that return
//! a `MissingField` error instead of silently yielding nothing.
//!
//! # Library Choice
//!
//! `roxmltree` does the actual XML parsing. It is strict about
//! well-formedness, which is what we want: a malformed export is fatal and
//! aborts the whole run before any extraction starts.

use crate::error::ConvertError;

/// One node of the parsed export tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// Trimmed character data (text and CDATA sections merged).
    Text(String),
    /// A child element.
    Element(Element),
}

/// An element with its attributes and child nodes, tag names
/// prefix-stripped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl Element {
    /// Attribute value by (prefix-stripped) name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All child elements with the given name, in document order.
    pub fn elements<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Element> + use<'a, 'n> {
        self.children.iter().filter_map(move |child| match child {
            XmlNode::Element(el) if el.name == name => Some(el),
            _ => None,
        })
    }

    /// First child element with the given name.
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements(name).next()
    }

    /// First child element with the given name, or a `MissingField` error
    /// naming both the child and this element.
    pub fn require(&self, name: &str) -> Result<&Element, ConvertError> {
        self.element(name)
            .ok_or_else(|| ConvertError::MissingField(format!("<{}> in <{}>", name, self.name)))
    }

    /// Concatenated text content of this element's direct text children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let XmlNode::Text(text) = child {
                out.push_str(text);
            }
        }
        out
    }

    /// Text content of the first child element with the given name.
    pub fn text_of(&self, name: &str) -> Option<String> {
        self.element(name).map(Element::text)
    }

    /// Text content of a required child element.
    pub fn require_text(&self, name: &str) -> Result<String, ConvertError> {
        self.require(name).map(Element::text)
    }
}

/// Parse the raw export document text into its root element.
///
/// Fails with [`ConvertError::MalformedDocument`] if the text is not
/// well-formed XML. There is no partial-document recovery.
pub fn parse_export(source: &str) -> Result<Element, ConvertError> {
    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = roxmltree::Document::parse_with_options(source, opts)
        .map_err(|e| ConvertError::MalformedDocument(e.to_string()))?;
    Ok(convert_element(doc.root_element()))
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element {
        // tag_name().name() is the local name, already minus any prefix
        name: node.tag_name().name().to_string(),
        attrs: node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect(),
        children: Vec::new(),
    };

    // Adjacent text and CDATA nodes merge into one Text child so
    // `<title>a <![CDATA[& b]]></title>` reads back as a single value.
    let mut pending_text = String::new();
    for child in node.children() {
        match child.node_type() {
            roxmltree::NodeType::Text => {
                pending_text.push_str(child.text().unwrap_or(""));
            }
            roxmltree::NodeType::Element => {
                flush_text(&mut pending_text, &mut element.children);
                element.children.push(XmlNode::Element(convert_element(child)));
            }
            _ => {}
        }
    }
    flush_text(&mut pending_text, &mut element.children);

    element
}

fn flush_text(pending: &mut String, children: &mut Vec<XmlNode>) {
    let trimmed = pending.trim();
    if !trimmed.is_empty() {
        children.push(XmlNode::Text(trimmed.to_string()));
    }
    pending.clear();
}
