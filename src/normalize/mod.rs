//! Document tree normalization for DOCX/PDF export.
//!
//! Runs once per build, after the full cross-document tree is assembled and
//! before it is handed to the writer. All rewrites are in place; node ids
//! stay valid, and the only nodes created are paragraphs for split runs.
//!
//! ## Pipeline
//!
//! 1. **Find** - tag every `section`, `desc_content` and `table` with its
//!    traversal index
//! 2. **Fix** - walk the matches last to first (innermost first), re-validate
//!    each one, then:
//!    - tables: fixed column widths
//!    - sections and description bodies: hoist blocks out of paragraphs,
//!      also inside nested list items, definitions and notes; reset
//!      enumerated list numbering; repair signature containers
//! 3. **Clean up** - drop the bookkeeping attributes

mod desc;
mod dump;
mod find;
mod fix;
mod predicates;
mod signature;
mod table;
mod unwrap;

use tracing::{debug, info};

use crate::config::NormalizeConfig;
use crate::error::Result;
use crate::model::{Document, NodeId};

pub use desc::{fix_description_body, normalize_enumerations};
pub use dump::{leaf_paths, log_tree};
pub use find::{find_tagged, relocate};
pub use fix::fix_node;
pub use predicates::{DESC_EXTRACT_CLASSES, NESTED_BLOCK_CLASSES, TARGET_CLASSES, is_inline_class};
pub use signature::{MAX_SIGNATURE_CHILDREN, fix_signature, fix_signatures};
pub use table::{FIXED_COLUMN_WIDTH, fix_column_widths};
pub use unwrap::unwrap;

/// Attribute key holding each target's index during the top-level pass.
pub const ASSEMBLE_INDEX_KEY: &str = "doctree_assemble_index";

/// Source of the raw cross-document tree.
pub trait Assembler {
    /// Build the raw tree.
    fn assemble_doctree(&self) -> Result<Document>;
}

impl<F> Assembler for F
where
    F: Fn() -> Result<Document>,
{
    fn assemble_doctree(&self) -> Result<Document> {
        self()
    }
}

/// Outcome of a normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Target nodes found.
    pub found: usize,
    /// Target nodes fixed.
    pub fixed: usize,
    /// Target nodes skipped because an earlier rewrite detached them.
    pub skipped: usize,
}

/// Build the tree with `assembler` and normalize it according to `config`.
///
/// With `config.apply` unset the raw tree is returned unchanged, which is
/// handy for bisecting writer problems.
pub fn assemble<A>(assembler: &A, config: &NormalizeConfig) -> Result<Document>
where
    A: Assembler + ?Sized,
{
    if config.log {
        info!("assemble_doctree");
    }
    let mut doc = assembler.assemble_doctree()?;

    if config.log && config.log_node_before {
        info!("assemble_doctree log node before");
        log_tree(&doc);
    }

    if !config.apply {
        return Ok(doc);
    }

    normalize(&mut doc, config)?;

    if config.log && config.log_node_after {
        info!("assemble_doctree log node after");
        log_tree(&doc);
    }

    Ok(doc)
}

/// Run the normalization pass over a whole document.
///
/// Stops at the first error; the document is then partially rewritten and
/// must not be handed to a writer.
pub fn normalize(doc: &mut Document, config: &NormalizeConfig) -> Result<NormalizeReport> {
    if config.log {
        let names: Vec<&str> = TARGET_CLASSES.iter().map(|c| c.name()).collect();
        info!("assemble_doctree find {names:?} nodes");
    }

    let targets = find_tagged(doc, NodeId::ROOT, TARGET_CLASSES, ASSEMBLE_INDEX_KEY, true)?;
    let total = targets.len();
    let mut report = NormalizeReport {
        found: total,
        ..NormalizeReport::default()
    };

    if config.log {
        info!("assemble_doctree found nodes len: '{total}'");
        info!("assemble_doctree process");
    }

    for (position, node) in targets.into_iter().rev().enumerate() {
        if config.log {
            let class = doc.class(node).map(|c| c.name()).unwrap_or_default();
            info!(
                "assemble_doctree process '{class}' node {} of {total}",
                position + 1
            );
        }

        match relocate(doc, node, ASSEMBLE_INDEX_KEY) {
            Some(current) => {
                fix_node(doc, current)?;
                report.fixed += 1;
            }
            None => {
                debug!(node = node.0, "skipping detached node");
                report.skipped += 1;
            }
        }
    }

    doc.attrs.remove_key(ASSEMBLE_INDEX_KEY);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Class, Node};

    /// document > section > paragraph > [text, table > tgroup > colspec(auto)]
    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let section = doc.alloc_node(Node::new(Class::Section));
        doc.append_child(NodeId::ROOT, section);
        let para = doc.alloc_node(Node::new(Class::Paragraph));
        doc.append_child(section, para);
        let text = doc.alloc_text("intro");
        doc.append_child(para, text);
        let table = doc.alloc_node(Node::new(Class::Table));
        doc.append_child(para, table);
        let tgroup = doc.alloc_node(Node::new(Class::TGroup));
        doc.append_child(table, tgroup);
        let colspec = doc.alloc_node(Node::new(Class::ColSpec));
        doc.append_child(tgroup, colspec);
        doc.attrs.set(colspec, "colwidth", "auto");
        (doc, section, table, colspec)
    }

    #[test]
    fn test_full_pipeline() {
        let (mut doc, section, table, colspec) = sample();

        let report = normalize(&mut doc, &NormalizeConfig::quiet()).unwrap();
        assert_eq!(
            report,
            NormalizeReport {
                found: 2,
                fixed: 2,
                skipped: 0
            }
        );

        // Table hoisted next to the paragraph, by identity
        let children: Vec<_> = doc.children(section).collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1], table);
        assert_eq!(doc.attrs.get_int(colspec, "colwidth"), Some(FIXED_COLUMN_WIDTH));

        // No bookkeeping left behind
        assert!(!doc.attrs.contains(section, ASSEMBLE_INDEX_KEY));
        assert!(!doc.attrs.contains(table, ASSEMBLE_INDEX_KEY));
    }

    #[test]
    fn test_assemble_disabled_returns_raw_tree() {
        let config = NormalizeConfig::quiet().with_apply(false);
        let doc = assemble(&|| -> Result<Document> { Ok(sample().0) }, &config).unwrap();

        let section = doc.children(NodeId::ROOT).next().unwrap();
        assert_eq!(doc.child_count(section), 1);
    }

    #[test]
    fn test_assemble_propagates_assembler_error() {
        let failing = || -> Result<Document> { Err(Error::MissingKey("PROJECT_DIR".into())) };
        let err = assemble(&failing, &NormalizeConfig::quiet()).unwrap_err();
        assert!(matches!(err, Error::MissingKey(_)));
    }

    #[test]
    fn test_assemble_with_logging() {
        let doc = assemble(&|| -> Result<Document> { Ok(sample().0) }, &NormalizeConfig::default()).unwrap();
        let section = doc.children(NodeId::ROOT).next().unwrap();
        assert_eq!(doc.child_count(section), 2);
    }
}
