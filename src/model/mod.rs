//! Mutable document tree.
//!
//! The tree uses a parent-pointer / first-child / next-sibling representation
//! stored in an arena, so node handles stay valid while passes move nodes
//! around:
//! - Nodes tagged with a [`Class`] (paragraph, table, desc_content, ...)
//! - Sparse attributes in an [`AttrMap`]
//! - Global text buffer with range references
//!
//! # Example
//!
//! ```
//! use doctree::model::{Class, Document, Node, NodeId};
//!
//! let mut doc = Document::new();
//! let para = doc.alloc_node(Node::new(Class::Paragraph));
//! doc.append_child(NodeId::ROOT, para);
//! let text = doc.alloc_text("Hello");
//! doc.append_child(para, text);
//!
//! assert_eq!(doc.text_content(NodeId::ROOT), "Hello");
//! ```

mod attrs;
mod node;

pub use attrs::{AttrMap, AttrValue};
pub use node::{Class, Node, NodeId, TextRange};

/// A document tree.
#[derive(Debug, Clone)]
pub struct Document {
    /// All nodes in the tree (index 0 is always the root).
    nodes: Vec<Node>,
    /// Sparse node attributes.
    pub attrs: AttrMap,
    /// Global text buffer (text nodes reference ranges into this).
    text: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document with a `document` root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Class::Document)],
            attrs: AttrMap::new(),
            text: String::new(),
        }
    }

    /// Get the root node ID.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Get the class of a node.
    pub fn class(&self, id: NodeId) -> Option<&Class> {
        self.node(id).map(|n| &n.class)
    }

    /// Check if a node has the given class.
    pub fn is(&self, id: NodeId, class: &Class) -> bool {
        self.class(id) == Some(class)
    }

    /// Get the number of allocated nodes (including detached ones).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a new node and return its ID.
    pub fn alloc_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocate a text node holding `text`.
    pub fn alloc_text(&mut self, text: &str) -> NodeId {
        let range = self.append_text(text);
        self.alloc_node(Node::text(range))
    }

    /// Append text to the global buffer and return the range.
    pub fn append_text(&mut self, text: &str) -> TextRange {
        let start = self.text.len() as u32;
        self.text.push_str(text);
        TextRange::new(start, text.len() as u32)
    }

    /// Get text from a range.
    pub fn text(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        let end = range.end() as usize;
        &self.text[start..end]
    }

    /// Get the text of a text node (empty for other classes).
    pub fn node_text(&self, id: NodeId) -> &str {
        match self.node(id) {
            Some(node) if node.class.is_text() => self.text(node.text),
            _ => "",
        }
    }

    /// Concatenated text of all text nodes under `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        self.traverse(id)
            .map(|n| self.node_text(n))
            .collect::<Vec<_>>()
            .concat()
    }

    /// Append a child node to a parent.
    ///
    /// The child must not currently be linked under another parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(child_node) = self.nodes.get_mut(child.0 as usize) {
            child_node.parent = Some(parent);
            child_node.next_sibling = None;
        }

        // Find the last child of parent and append
        match self.last_child(parent) {
            Some(last) => {
                if let Some(last_node) = self.nodes.get_mut(last.0 as usize) {
                    last_node.next_sibling = Some(child);
                }
            }
            None => {
                if let Some(parent_node) = self.nodes.get_mut(parent.0 as usize) {
                    parent_node.first_child = Some(child);
                }
            }
        }
    }

    /// Get the last child of a node.
    pub fn last_child(&self, parent: NodeId) -> Option<NodeId> {
        self.children(parent).last()
    }

    /// Unlink all children of `parent` and return them in order.
    ///
    /// The returned nodes are detached: no parent, no siblings.
    pub fn clear_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let children: Vec<NodeId> = self.children(parent).collect();
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.first_child = None;
        }
        for &child in &children {
            if let Some(node) = self.node_mut(child) {
                node.parent = None;
                node.next_sibling = None;
            }
        }
        children
    }

    /// Put `new` in the position `old` occupies under its parent.
    ///
    /// `old` is detached. Returns false if `old` has no parent.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.node(old).and_then(|n| n.parent) else {
            return false;
        };
        let next = self.node(old).and_then(|n| n.next_sibling);
        let prev = self
            .children(parent)
            .take_while(|&c| c != old)
            .last();

        if let Some(new_node) = self.node_mut(new) {
            new_node.parent = Some(parent);
            new_node.next_sibling = next;
        }
        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.node_mut(prev_id) {
                    prev_node.next_sibling = Some(new);
                }
            }
            None => {
                if let Some(parent_node) = self.node_mut(parent) {
                    parent_node.first_child = Some(new);
                }
            }
        }
        if let Some(old_node) = self.node_mut(old) {
            old_node.parent = None;
            old_node.next_sibling = None;
        }
        true
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        let first_child = self
            .nodes
            .get(parent.0 as usize)
            .and_then(|n| n.first_child);
        ChildIter {
            doc: self,
            current: first_child,
        }
    }

    /// Count the children of a node.
    pub fn child_count(&self, parent: NodeId) -> usize {
        self.children(parent).count()
    }

    /// Iterate over all nodes reachable from the root in depth-first order.
    pub fn iter_dfs(&self) -> DfsIter<'_> {
        self.traverse(NodeId::ROOT)
    }

    /// Iterate over `start` and its descendants in depth-first pre-order.
    pub fn traverse(&self, start: NodeId) -> DfsIter<'_> {
        DfsIter {
            doc: self,
            stack: vec![start],
        }
    }

    /// Path from the root down to `id` (inclusive).
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = self.node(id).and_then(|n| n.parent);
        while let Some(parent) = current {
            path.push(parent);
            current = self.node(parent).and_then(|n| n.parent);
        }
        path.reverse();
        path
    }
}

/// Iterator over children of a node.
pub struct ChildIter<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self
            .doc
            .nodes
            .get(current.0 as usize)
            .and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Depth-first iterator over a subtree.
pub struct DfsIter<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DfsIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Push children in reverse order so they're visited left-to-right
        let mut children: Vec<NodeId> = self.doc.children(current).collect();
        children.reverse();
        self.stack.extend(children);

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert_eq!(doc.node_count(), 1);
        assert_eq!(doc.root(), NodeId::ROOT);

        let root = doc.node(NodeId::ROOT).unwrap();
        assert_eq!(root.class, Class::Document);
        assert!(root.parent.is_none());
    }

    #[test]
    fn test_text_buffer() {
        let mut doc = Document::new();

        let t1 = doc.alloc_text("Hello, ");
        let t2 = doc.alloc_text("World!");
        doc.append_child(NodeId::ROOT, t1);
        doc.append_child(NodeId::ROOT, t2);

        assert_eq!(doc.node_text(t1), "Hello, ");
        assert_eq!(doc.node_text(NodeId::ROOT), "");
        assert_eq!(doc.text_content(NodeId::ROOT), "Hello, World!");
    }

    #[test]
    fn test_dfs_iteration() {
        let mut doc = Document::new();

        let para1 = doc.alloc_node(Node::new(Class::Paragraph));
        let para2 = doc.alloc_node(Node::new(Class::Paragraph));
        doc.append_child(NodeId::ROOT, para1);
        doc.append_child(NodeId::ROOT, para2);

        let text = doc.alloc_text("Text");
        doc.append_child(para1, text);

        let nodes: Vec<_> = doc.iter_dfs().collect();
        assert_eq!(nodes, vec![NodeId::ROOT, para1, text, para2]);

        let sub: Vec<_> = doc.traverse(para1).collect();
        assert_eq!(sub, vec![para1, text]);
    }

    #[test]
    fn test_clear_children_detaches() {
        let mut doc = Document::new();
        let a = doc.alloc_text("a");
        let b = doc.alloc_text("b");
        doc.append_child(NodeId::ROOT, a);
        doc.append_child(NodeId::ROOT, b);

        let old = doc.clear_children(NodeId::ROOT);
        assert_eq!(old, vec![a, b]);
        assert_eq!(doc.child_count(NodeId::ROOT), 0);
        assert!(doc.node(a).unwrap().parent.is_none());
        assert!(doc.node(a).unwrap().next_sibling.is_none());

        // Re-appending in a different order relinks cleanly
        doc.append_child(NodeId::ROOT, b);
        doc.append_child(NodeId::ROOT, a);
        let children: Vec<_> = doc.children(NodeId::ROOT).collect();
        assert_eq!(children, vec![b, a]);
    }

    #[test]
    fn test_replace_child() {
        let mut doc = Document::new();
        let a = doc.alloc_text("a");
        let b = doc.alloc_text("b");
        let c = doc.alloc_text("c");
        doc.append_child(NodeId::ROOT, a);
        doc.append_child(NodeId::ROOT, b);
        doc.append_child(NodeId::ROOT, c);

        let wrapper = doc.alloc_node(Node::new(Class::Paragraph));
        assert!(doc.replace_child(b, wrapper));
        doc.append_child(wrapper, b);

        let children: Vec<_> = doc.children(NodeId::ROOT).collect();
        assert_eq!(children, vec![a, wrapper, c]);
        assert_eq!(doc.node(b).unwrap().parent, Some(wrapper));

        // First position
        let first = doc.alloc_node(Node::new(Class::Paragraph));
        assert!(doc.replace_child(a, first));
        assert_eq!(doc.children(NodeId::ROOT).next(), Some(first));

        // Detached node cannot be replaced
        assert!(!doc.replace_child(a, first));
    }

    #[test]
    fn test_path_from_root() {
        let mut doc = Document::new();
        let section = doc.alloc_node(Node::new(Class::Section));
        doc.append_child(NodeId::ROOT, section);
        let text = doc.alloc_text("x");
        doc.append_child(section, text);

        assert_eq!(doc.path_from_root(text), vec![NodeId::ROOT, section, text]);
        assert_eq!(doc.path_from_root(NodeId::ROOT), vec![NodeId::ROOT]);
    }
}
