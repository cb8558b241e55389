//! Per-node dispatch for the top-level pass.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Class, Document, NodeId};

use super::desc::fix_description_body;
use super::table::fix_column_widths;

/// Normalize one target node in place and return it.
///
/// - `table`: `auto` column widths become fixed widths.
/// - `section` / `desc_content`: the body is flattened (see
///   [`fix_description_body`]).
///
/// Any other class is a fatal error: the caller selected a node this pass
/// has no rule for.
pub fn fix_node(doc: &mut Document, node: NodeId) -> Result<NodeId> {
    let class = doc
        .class(node)
        .cloned()
        .ok_or_else(|| Error::InvalidArgument(format!("no such node: {}", node.0)))?;

    match class {
        Class::Table => {
            let fixed = fix_column_widths(doc, node)?;
            debug!(node = node.0, columns = fixed, "fixed table column widths");
        }
        Class::Section | Class::DescContent => fix_description_body(doc, node)?,
        other => {
            return Err(Error::shape(other.name(), "not a normalization target"));
        }
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    #[test]
    fn test_unknown_target_rejected() {
        let mut doc = Document::new();
        let para = doc.alloc_node(Node::new(Class::Paragraph));
        doc.append_child(NodeId::ROOT, para);

        let err = fix_node(&mut doc, para).unwrap_err();
        assert!(matches!(err, Error::UnexpectedShape { ref class, .. } if class == "paragraph"));

        let err = fix_node(&mut doc, NodeId(42)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_section_dispatch() {
        let mut doc = Document::new();
        let section = doc.alloc_node(Node::new(Class::Section));
        doc.append_child(NodeId::ROOT, section);
        let text = doc.alloc_text("loose");
        doc.append_child(section, text);

        assert_eq!(fix_node(&mut doc, section).unwrap(), section);

        let child = doc.children(section).next().unwrap();
        assert_eq!(doc.class(child), Some(&Class::Paragraph));
    }
}
