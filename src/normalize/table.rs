//! Table column width fixing.

use crate::error::{Error, Result};
use crate::model::{Class, Document, NodeId};

/// Width given to columns declared with `colwidth="auto"`.
///
/// The DOCX layout engine has no automatic column sizing, so relative widths
/// must be concrete numbers. Equal large values split the table evenly.
pub const FIXED_COLUMN_WIDTH: i64 = 10000;

/// Replace `auto` column widths of a table with [`FIXED_COLUMN_WIDTH`].
///
/// Table
///   TGroup
///     ColSpec colwidth="auto"   ->  colwidth="10000"
///     ColSpec colwidth="30"     ->  unchanged
///
/// Returns the number of column specifications rewritten. A table without
/// any `tgroup` child is rejected: the writer would emit an empty grid.
pub fn fix_column_widths(doc: &mut Document, table: NodeId) -> Result<usize> {
    let tgroups: Vec<NodeId> = doc
        .children(table)
        .filter(|&c| doc.is(c, &Class::TGroup))
        .collect();

    if tgroups.is_empty() {
        return Err(Error::shape(Class::Table.name(), "no 'tgroup' child"));
    }

    let auto_colspecs: Vec<NodeId> = tgroups
        .iter()
        .flat_map(|&tgroup| doc.children(tgroup))
        .filter(|&c| doc.is(c, &Class::ColSpec))
        .filter(|&c| doc.attrs.colwidth(c).and_then(|w| w.as_str()) == Some("auto"))
        .collect();

    for &colspec in &auto_colspecs {
        doc.attrs.set(colspec, "colwidth", FIXED_COLUMN_WIDTH);
    }

    Ok(auto_colspecs.len())
}
