//! Locating target nodes and re-validating them after edits.

use crate::error::{Error, Result};
use crate::model::{Class, Document, NodeId};

/// Collect every node under `root` whose class is in `classes`.
///
/// Traversal is depth-first pre-order; `root` itself is a candidate only
/// when `include_self` is set. Each match is tagged with its zero-based
/// position in the result under `index_key`, which is the handle
/// [`relocate`] uses once later rewrites have moved siblings around.
pub fn find_tagged(
    doc: &mut Document,
    root: NodeId,
    classes: &[Class],
    index_key: &str,
    include_self: bool,
) -> Result<Vec<NodeId>> {
    if classes.is_empty() {
        return Err(Error::InvalidArgument(
            "unspecified target classes".to_string(),
        ));
    }
    if index_key.is_empty() {
        return Err(Error::InvalidArgument("unspecified index key".to_string()));
    }

    let matches: Vec<NodeId> = doc
        .traverse(root)
        .filter(|&id| include_self || id != root)
        .filter(|&id| doc.class(id).is_some_and(|c| classes.contains(c)))
        .collect();

    for (index, &id) in matches.iter().enumerate() {
        doc.attrs.set(id, index_key, index as i64);
    }

    Ok(matches)
}

/// Re-validate a node tagged by [`find_tagged`].
///
/// The node's recorded parent must still list a child of the same class
/// carrying the same index under `index_key`, and that parent must still be
/// reachable from the document root. Returns `None` for nodes detached by an
/// earlier rewrite. The document root is always valid.
pub fn relocate(doc: &Document, node: NodeId, index_key: &str) -> Option<NodeId> {
    let index = doc.attrs.get_int(node, index_key)?;
    let class = doc.class(node)?;

    let Some(parent) = doc.node(node)?.parent else {
        return (node == doc.root()).then_some(node);
    };
    if doc.path_from_root(parent).first() != Some(&doc.root()) {
        return None;
    }

    doc.children(parent)
        .find(|&c| doc.class(c) == Some(class) && doc.attrs.get_int(c, index_key) == Some(index))
}
