//! Description signature containers.

use crate::error::{Error, Result};
use crate::model::{Class, Document, Node, NodeId};

/// Most children a signature container has been seen with.
///
/// Provisional: derived from observed input, not from a documented writer
/// limit. Anything larger aborts the pass so it gets looked at.
pub const MAX_SIGNATURE_CHILDREN: usize = 2;

/// Repair every `container` node under `root` (inclusive).
///
/// Returns the number of emphasis nodes wrapped.
pub fn fix_signatures(doc: &mut Document, root: NodeId) -> Result<usize> {
    let containers: Vec<NodeId> = doc
        .traverse(root)
        .filter(|&id| doc.is(id, &Class::Container))
        .collect();

    let mut wrapped = 0;
    for container in containers {
        wrapped += fix_signature(doc, container)?;
    }
    Ok(wrapped)
}

/// Wrap each direct emphasis child of a signature container in a paragraph.
///
/// The DOCX writer drops inline emphasis that sits directly under a
/// container:
///
/// Before: Container > [Paragraph, Emphasis]
/// After:  Container > [Paragraph, Paragraph > [Emphasis]]
///
/// Other children are left alone. More than [`MAX_SIGNATURE_CHILDREN`]
/// children is an error.
pub fn fix_signature(doc: &mut Document, container: NodeId) -> Result<usize> {
    let children: Vec<NodeId> = doc.children(container).collect();

    if children.len() > MAX_SIGNATURE_CHILDREN {
        return Err(Error::shape(
            Class::Container.name(),
            format!(
                "expected at most {MAX_SIGNATURE_CHILDREN} children, found {}",
                children.len()
            ),
        ));
    }

    let mut wrapped = 0;
    for child in children {
        if !doc.is(child, &Class::Emphasis) {
            continue;
        }
        let paragraph = doc.alloc_node(Node::new(Class::Paragraph));
        doc.replace_child(child, paragraph);
        doc.append_child(paragraph, child);
        wrapped += 1;
    }
    Ok(wrapped)
}
