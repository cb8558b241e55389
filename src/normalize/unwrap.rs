//! Hoisting block-level content out of paragraphs.

use crate::error::{Error, Result};
use crate::model::{Class, Document, Node, NodeId};

use super::predicates::is_inline_class;

/// Rebuild `container` so no paragraph wraps a block-level child.
///
/// The DOCX writer cannot place a table or list inside a paragraph, but the
/// source markup often produces exactly that:
///
/// Before: DescContent > [Paragraph > [Text "a", Table, Text "b"]]
/// After:  DescContent > [Paragraph > [Text "a"], Table, Paragraph > [Text "b"]]
///
/// Children are processed in order:
/// - a child paragraph is opened and its content split at every child whose
///   class is in `extract`, with a paragraph boundary at its end. The first
///   run reuses the original paragraph node (keeping its ids), later runs get
///   fresh paragraphs.
/// - an inline child directly under the container joins the pending run.
/// - any other child is appended as-is, after flushing the pending run.
///
/// A container holding only inline content ends up with a single paragraph
/// wrapping all of it. Running `unwrap` again on its output is a no-op.
pub fn unwrap(doc: &mut Document, container: NodeId, extract: &[Class]) -> Result<NodeId> {
    if extract.is_empty() {
        return Err(Error::InvalidArgument(
            "unspecified extraction classes".to_string(),
        ));
    }
    let class = doc
        .class(container)
        .cloned()
        .ok_or_else(|| Error::InvalidArgument(format!("no such node: {}", container.0)))?;
    if class.is_text() {
        return Err(Error::shape(class.name(), "text nodes cannot be unwrapped"));
    }

    let mut runs = Runs::new(container);

    for child in doc.clear_children(container) {
        let child_class = doc.class(child).cloned().unwrap_or_default();

        if child_class == Class::Paragraph {
            runs.flush(doc);
            runs.reuse = Some(child);
            for inner in doc.clear_children(child) {
                let inner_class = doc.class(inner).cloned().unwrap_or_default();
                if extract.contains(&inner_class) {
                    runs.hoist(doc, inner);
                } else {
                    runs.pending.push(inner);
                }
            }
            runs.flush(doc);
            // An emptied paragraph that never got content stays detached
            runs.reuse = None;
        } else if is_inline_class(&child_class) && !extract.contains(&child_class) {
            runs.pending.push(child);
        } else {
            runs.hoist(doc, child);
        }
    }
    runs.flush(doc);

    Ok(container)
}

/// Accumulates consecutive inline nodes until a block forces a flush.
struct Runs {
    container: NodeId,
    pending: Vec<NodeId>,
    /// Paragraph node to fill on the next flush instead of allocating one.
    reuse: Option<NodeId>,
}

impl Runs {
    fn new(container: NodeId) -> Self {
        Self {
            container,
            pending: Vec::new(),
            reuse: None,
        }
    }

    /// Append a block child after whatever inline content is pending.
    fn hoist(&mut self, doc: &mut Document, node: NodeId) {
        self.flush(doc);
        doc.append_child(self.container, node);
    }

    /// Wrap the pending run in a paragraph and append it to the container.
    fn flush(&mut self, doc: &mut Document) {
        if self.pending.is_empty() {
            return;
        }
        let paragraph = match self.reuse.take() {
            Some(id) => id,
            None => doc.alloc_node(Node::new(Class::Paragraph)),
        };
        doc.append_child(self.container, paragraph);
        for node in self.pending.drain(..) {
            doc.append_child(paragraph, node);
        }
    }
}
