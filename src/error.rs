//! Error types for doctree operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, normalizing or writing a document tree.
///
/// None of these are recoverable: a failed pass aborts the build.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing configuration key: '{0}'")]
    MissingKey(String),

    #[error("Invalid project metadata in '{}': {reason}", path.display())]
    InvalidMetadata { path: PathBuf, reason: String },

    #[error("Unexpected '{class}' node: {reason}")]
    UnexpectedShape { class: String, reason: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl Error {
    /// Build an [`Error::UnexpectedShape`] for a node class.
    pub(crate) fn shape(class: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::UnexpectedShape {
            class: class.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
