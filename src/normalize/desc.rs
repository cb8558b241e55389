//! Description body normalization (`desc_content` and `section`).

use tracing::debug;

use crate::error::Result;
use crate::model::{Class, Document, NodeId};

use super::find::{find_tagged, relocate};
use super::predicates::{DESC_EXTRACT_CLASSES, NESTED_BLOCK_CLASSES};
use super::signature::fix_signatures;
use super::unwrap::unwrap;

/// Flatten a description body for the DOCX writer.
///
/// 1. Hoist block content out of the body's paragraphs.
/// 2. Do the same inside every nested list item, definition and note,
///    innermost last-found first.
/// 3. Reset enumerated list numbering.
/// 4. Repair signature containers.
pub fn fix_description_body(doc: &mut Document, body: NodeId) -> Result<()> {
    unwrap(doc, body, DESC_EXTRACT_CLASSES)?;

    for class in NESTED_BLOCK_CLASSES {
        let index_key = format!("doctree_fix_desc_content_{}_index", class.name());
        let nested = find_tagged(doc, body, std::slice::from_ref(class), &index_key, false)?;

        for node in nested.into_iter().rev() {
            match relocate(doc, node, &index_key) {
                Some(current) => {
                    unwrap(doc, current, DESC_EXTRACT_CLASSES)?;
                }
                None => debug!(node = node.0, class = %class, "skipping detached node"),
            }
        }
        doc.attrs.remove_key(&index_key);
    }

    let lists = normalize_enumerations(doc, body);
    let wrapped = fix_signatures(doc, body)?;
    debug!(
        node = body.0,
        enumerated_lists = lists,
        wrapped_emphasis = wrapped,
        "fixed description body"
    );

    Ok(())
}

/// Give every enumerated list under `root` plain `1.`, `2.`, ... numbering.
///
/// The DOCX writer does not carry numbering style over from the source, so
/// whatever the markup asked for (roman, alpha, parenthesized) is reset to
/// arabic with a `.` suffix starting at 1. Returns the number of lists.
pub fn normalize_enumerations(doc: &mut Document, root: NodeId) -> usize {
    let lists: Vec<NodeId> = doc
        .traverse(root)
        .filter(|&id| doc.is(id, &Class::EnumeratedList))
        .collect();

    for &list in &lists {
        doc.attrs.set(list, "enumtype", "arabic");
        doc.attrs.set(list, "prefix", "");
        doc.attrs.set(list, "suffix", ".");
        doc.attrs.set(list, "start", 1i64);
    }

    lists.len()
}
