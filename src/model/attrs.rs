//! Sparse attribute storage for tree nodes.
//!
//! Most nodes carry no attributes at all, so attributes live in a side table
//! keyed by [`NodeId`] instead of on every [`Node`](super::Node). The same
//! table holds markup attributes read from the source (`ids`, `colwidth`,
//! `enumtype`) and the transient bookkeeping slots written by normalization
//! passes.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::node::NodeId;

/// An attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl AttrValue {
    /// Get the value as a string slice, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer.
    ///
    /// Text values that parse as integers are accepted, since attributes read
    /// from XML are always text.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(n) => Some(*n),
            AttrValue::Text(s) => s.trim().parse().ok(),
            AttrValue::Bool(_) => None,
        }
    }

    /// Get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            AttrValue::Int(n) => Some(*n != 0),
            AttrValue::Text(s) => match s.as_str() {
                "1" | "True" | "true" => Some(true),
                "0" | "False" | "false" => Some(false),
                _ => None,
            },
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Int(n) => write!(f, "{n}"),
            // docutils serializes booleans as 1/0
            AttrValue::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Int(n)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

/// Sparse map from node to its attributes.
///
/// Per-node attributes are kept in key order so serialization is stable.
#[derive(Debug, Default, Clone)]
pub struct AttrMap {
    attrs: HashMap<NodeId, BTreeMap<String, AttrValue>>,
}

impl AttrMap {
    /// Create a new empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute.
    pub fn get(&self, node: NodeId, key: &str) -> Option<&AttrValue> {
        self.attrs.get(&node).and_then(|m| m.get(key))
    }

    /// Get a text attribute.
    pub fn get_str(&self, node: NodeId, key: &str) -> Option<&str> {
        self.get(node, key).and_then(AttrValue::as_str)
    }

    /// Get an integer attribute.
    pub fn get_int(&self, node: NodeId, key: &str) -> Option<i64> {
        self.get(node, key).and_then(AttrValue::as_int)
    }

    /// Check if a node has an attribute.
    pub fn contains(&self, node: NodeId, key: &str) -> bool {
        self.get(node, key).is_some()
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, node: NodeId, key: &str, value: impl Into<AttrValue>) {
        self.attrs
            .entry(node)
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Remove a key from every node. Returns the number of removed entries.
    pub fn remove_key(&mut self, key: &str) -> usize {
        let mut removed = 0;
        self.attrs.retain(|_, map| {
            if map.remove(key).is_some() {
                removed += 1;
            }
            !map.is_empty()
        });
        removed
    }

    /// Iterate over a node's attributes in key order.
    pub fn iter(&self, node: NodeId) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs
            .get(&node)
            .into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v)))
    }

    // --- docutils attributes ---

    /// Get the space-separated `ids` of a node.
    pub fn ids(&self, node: NodeId) -> Vec<&str> {
        self.get_str(node, "ids")
            .map(|s| s.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// Get the `colwidth` of a column specification.
    pub fn colwidth(&self, node: NodeId) -> Option<&AttrValue> {
        self.get(node, "colwidth")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut attrs = AttrMap::new();
        let node = NodeId(3);

        attrs.set(node, "colwidth", "auto");
        attrs.set(node, "start", 4i64);

        assert_eq!(attrs.get_str(node, "colwidth"), Some("auto"));
        assert_eq!(attrs.get_int(node, "start"), Some(4));
        assert!(attrs.contains(node, "start"));

        attrs.set(node, "start", 1i64);
        assert_eq!(attrs.get(node, "start"), Some(&AttrValue::Int(1)));
        assert_eq!(attrs.get(NodeId(9), "colwidth"), None);
    }

    #[test]
    fn test_int_from_text() {
        assert_eq!(AttrValue::from("12").as_int(), Some(12));
        assert_eq!(AttrValue::from("auto").as_int(), None);
        assert_eq!(AttrValue::from("1").as_bool(), Some(true));
        assert_eq!(AttrValue::Bool(false).to_string(), "0");
    }

    #[test]
    fn test_remove_key_everywhere() {
        let mut attrs = AttrMap::new();
        attrs.set(NodeId(1), "pass_index", 0i64);
        attrs.set(NodeId(2), "pass_index", 1i64);
        attrs.set(NodeId(2), "ids", "keep");

        assert_eq!(attrs.remove_key("pass_index"), 2);
        assert!(!attrs.contains(NodeId(1), "pass_index"));
        assert_eq!(attrs.ids(NodeId(2)), vec!["keep"]);
        assert_eq!(attrs.iter(NodeId(1)).count(), 0);
    }

    #[test]
    fn test_iter_in_key_order() {
        let mut attrs = AttrMap::new();
        let node = NodeId(1);
        attrs.set(node, "suffix", ".");
        attrs.set(node, "enumtype", "arabic");
        attrs.set(node, "prefix", "");

        let keys: Vec<_> = attrs.iter(node).map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["enumtype", "prefix", "suffix"]);
    }
}
