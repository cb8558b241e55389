//! Docutils XML interchange.
//!
//! Docutils XML is the tree format both sides of the pipeline understand:
//! the documentation builder emits it, and the DOCX/PDF writer reads it.
//!
//! # Example
//!
//! ```
//! use doctree::docutils::{read_xml, write_xml};
//! use doctree::{NormalizeConfig, normalize};
//!
//! let mut doc = read_xml(
//!     "<document><desc_content><paragraph>Returns <bullet_list/></paragraph></desc_content></document>",
//! )?;
//! normalize(&mut doc, &NormalizeConfig::quiet())?;
//!
//! assert!(write_xml(&doc).contains("<paragraph>Returns </paragraph>\n    <bullet_list/>"));
//! # Ok::<(), doctree::Error>(())
//! ```

mod class_map;
mod reader;
mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::Document;
use crate::normalize::Assembler;

pub use class_map::{holds_text, tag_to_class};
pub use reader::read_xml;
pub use writer::{escape_xml, write_xml};

/// Read a docutils XML file.
pub fn read_xml_file(path: impl AsRef<Path>) -> Result<Document> {
    let content = fs::read_to_string(path)?;
    read_xml(&content)
}

/// Assembler that loads the raw tree from a docutils XML file.
#[derive(Debug, Clone)]
pub struct XmlFile {
    path: PathBuf,
}

impl XmlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Assembler for XmlFile {
    fn assemble_doctree(&self) -> Result<Document> {
        read_xml_file(&self.path)
    }
}
