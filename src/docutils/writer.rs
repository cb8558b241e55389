//! Docutils XML writer.

use crate::model::{Document, NodeId};
use crate::normalize::is_inline_class;

use super::class_map::holds_text;

/// Serialize a tree as a docutils XML document.
///
/// Structural elements put each child on its own line with two-space
/// indentation; elements holding text (or containing a text or inline
/// child) are written on one line so no whitespace is added to their
/// content.
/// Childless elements are self-closing.
pub fn write_xml(doc: &Document) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    write_node(doc, doc.root(), Some(0), &mut out);
    out.push('\n');
    out
}

/// Write a subtree. `depth` is `None` inside text-holding elements, where no
/// whitespace may be added.
fn write_node(doc: &Document, id: NodeId, depth: Option<usize>, out: &mut String) {
    let Some(node) = doc.node(id) else {
        return;
    };
    if node.class.is_text() {
        out.push_str(&escape_xml(doc.node_text(id)));
        return;
    }

    let name = node.class.name();
    out.push('<');
    out.push_str(name);
    for (key, value) in doc.attrs.iter(id) {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_xml(&value.to_string()));
        out.push('"');
    }

    if node.first_child.is_none() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    let has_text = holds_text(&node.class)
        || doc
            .children(id)
            .any(|c| doc.class(c).is_some_and(is_inline_class));

    match depth {
        Some(depth) if !has_text => {
            for child in doc.children(id) {
                out.push('\n');
                indent(out, depth + 1);
                write_node(doc, child, Some(depth + 1), out);
            }
            out.push('\n');
            indent(out, depth);
        }
        _ => {
            for child in doc.children(id) {
                write_node(doc, child, None, out);
            }
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
