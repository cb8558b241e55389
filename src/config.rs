//! Normalization switches.
//!
//! Read once per build (from code, the `normalize` section of `conf.json`,
//! or CLI flags) and passed by reference into [`assemble`](crate::assemble)
//! and [`normalize`](crate::normalize).

use serde::{Deserialize, Serialize};

/// Switches for the normalization pass and its logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Run the pass. When false the raw tree is handed on unchanged.
    pub apply: bool,
    /// Log one line per stage and per processed node.
    pub log: bool,
    /// Dump the tree before normalizing (requires `log`).
    pub log_node_before: bool,
    /// Dump the tree after normalizing (requires `log`).
    pub log_node_after: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            apply: true,
            log: true,
            log_node_before: true,
            log_node_after: true,
        }
    }
}

impl NormalizeConfig {
    /// Normalize without any logging.
    pub fn quiet() -> Self {
        Self {
            apply: true,
            log: false,
            log_node_before: false,
            log_node_after: false,
        }
    }

    /// Set whether the pass runs.
    pub fn with_apply(mut self, apply: bool) -> Self {
        self.apply = apply;
        self
    }

    /// Set stage logging.
    pub fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    /// Set the before/after tree dumps.
    pub fn with_dumps(mut self, before: bool, after: bool) -> Self {
        self.log_node_before = before;
        self.log_node_after = after;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let config = NormalizeConfig::default();
        assert!(config.apply && config.log && config.log_node_before && config.log_node_after);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: NormalizeConfig = serde_json::from_str(r#"{"log_node_before": false}"#).unwrap();
        assert!(config.apply);
        assert!(!config.log_node_before);
        assert!(config.log_node_after);
    }

    #[test]
    fn test_builders() {
        let config = NormalizeConfig::quiet().with_apply(false).with_dumps(true, false);
        assert!(!config.apply);
        assert!(!config.log);
        assert!(config.log_node_before);
        assert!(!config.log_node_after);
    }
}
