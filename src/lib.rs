//! # doctree
//!
//! Normalizes documentation trees so that DOCX and PDF writers can render
//! them.
//!
//! Documentation builders produce trees that are valid for HTML but not for
//! page-oriented writers: lists and tables nested inside paragraphs, column
//! widths set to `"auto"`, signature containers with several children.
//! This crate rewrites such a tree in place before it is handed to the
//! writer.
//!
//! ## Pipeline
//!
//! 1. An [`Assembler`] builds the raw tree (for example
//!    [`docutils::XmlFile`]).
//! 2. [`normalize`] finds every section, description body and table,
//!    processes them from the innermost outwards, and fixes each one.
//! 3. The result goes to the writer, or back to XML with [`write_xml`].
//!
//! ## Quick Start
//!
//! ```
//! use doctree::{Class, NormalizeConfig, assemble, read_xml};
//!
//! let xml = r#"<document><section>
//!     <table><tgroup cols="1"><colspec colwidth="auto"/></tgroup></table>
//! </section></document>"#;
//!
//! let doc = assemble(&|| read_xml(xml), &NormalizeConfig::quiet())?;
//!
//! let colspec = doc.iter_dfs().find(|&id| doc.is(id, &Class::ColSpec)).unwrap();
//! assert_eq!(doc.attrs.get_int(colspec, "colwidth"), Some(10000));
//! # Ok::<(), doctree::Error>(())
//! ```

pub mod config;
pub mod docutils;
pub mod error;
pub mod model;
pub mod normalize;
pub mod project;

pub use config::NormalizeConfig;
pub use docutils::{read_xml, write_xml};
pub use error::{Error, Result};
pub use model::{Class, Document, NodeId};
pub use normalize::{Assembler, NormalizeReport, assemble, normalize};
pub use project::{ProjectConfig, ProjectInfo};
