//! Tree dumps for diagnosing normalization.

use tracing::info;

use crate::model::{Document, NodeId};

/// Root-to-leaf paths of every text node and every childless node under
/// `root`, in traversal order.
///
/// Each path lists class names from the document root down; a text node
/// contributes its text instead of its class name.
pub fn leaf_paths(doc: &Document, root: NodeId) -> Vec<Vec<String>> {
    doc.traverse(root)
        .filter(|&id| {
            doc.node(id)
                .is_some_and(|n| n.class.is_text() || n.first_child.is_none())
        })
        .map(|leaf| {
            doc.path_from_root(leaf)
                .into_iter()
                .map(|id| match doc.class(id) {
                    Some(class) if class.is_text() => doc.node_text(id).to_string(),
                    Some(class) => class.name().to_string(),
                    None => String::new(),
                })
                .collect()
        })
        .collect()
}

/// Log one line per leaf path of the whole document.
pub fn log_tree(doc: &Document) {
    info!("log_node start");
    for path in leaf_paths(doc, doc.root()) {
        info!("{path:?}");
    }
    info!("log_node end");
}
