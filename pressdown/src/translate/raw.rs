//! Verbatim re-serialization for preserved nodes and `<pre>` contents.

use html5ever::{serialize, serialize::SerializeOpts, serialize::TraversalScope};
use markup5ever_rcdom::{Handle, NodeData, SerializableHandle};

use crate::error::ConvertError;

/// Elements with no closing tag.
const VOID_ELEMENTS: [&str; 8] = [
    "area", "br", "col", "embed", "hr", "img", "input", "source",
];

/// Serialize a node (tag, attributes, and subtree) back to HTML text.
pub fn outer_html(node: &Handle) -> Result<String, ConvertError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| ConvertError::Translation(format!("HTML serialization failed: {e}")))?;
    String::from_utf8(output)
        .map_err(|e| ConvertError::Translation(format!("UTF-8 conversion failed: {e}")))
}

/// The inner text of a `<pre>` element, destined for a fenced code block.
///
/// `<code>` wrapper tags are dropped (their children hoisted), any other
/// nested markup stays as literal tag text, and character data arrives
/// already entity-decoded by the parser — so the fence renders code samples
/// literally, decoded exactly once.
pub fn pre_text(pre: &Handle) -> String {
    let mut out = String::new();
    for child in pre.children.borrow().iter() {
        collect_pre(child, &mut out);
    }
    out
}

fn collect_pre(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string();
            if tag == "code" {
                for child in node.children.borrow().iter() {
                    collect_pre(child, out);
                }
                return;
            }
            out.push('<');
            out.push_str(&tag);
            for attr in attrs.borrow().iter() {
                out.push(' ');
                out.push_str(&attr.name.local);
                out.push_str("=\"");
                out.push_str(&attr.value.replace('"', "&quot;"));
                out.push('"');
            }
            out.push('>');
            for child in node.children.borrow().iter() {
                collect_pre(child, out);
            }
            if !VOID_ELEMENTS.contains(&tag.as_str()) {
                out.push_str("</");
                out.push_str(&tag);
                out.push('>');
            }
        }
        _ => {}
    }
}
