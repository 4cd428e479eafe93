//! Error types for the XML store.

use std::path::PathBuf;

use metastore_core::CoreError;
use thiserror::Error;

/// Low-level failures while building, parsing or moving a document.
///
/// These never reach callers of load/save directly; they are wrapped as the
/// cause of an [`XmlStoreError`].
#[derive(Debug, Error)]
pub enum CodecError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Markup error from the XML reader or writer.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document root is not the expected tag.
    #[error("root tag mismatch: expected <{expected}>, found <{found}>")]
    RootTagMismatch {
        expected: &'static str,
        found: String,
    },

    /// The document contains no element at all.
    #[error("document has no root element")]
    EmptyDocument,

    /// Structurally invalid document.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// A `<value>` that does not parse as its declared `<type>`.
    #[error("invalid {type_name} value: {text:?}")]
    InvalidValue { type_name: String, text: String },

    #[error("unknown value type: {0}")]
    UnknownValueType(String),

    /// Unknown owner type or permission name.
    #[error("security section: {0}")]
    Security(#[from] CoreError),

    /// Unrecognized tag, only raised under `UnknownTagPolicy::Reject`.
    #[error("unknown tag <{0}>")]
    UnknownTag(String),

    /// Text holding a character XML 1.0 cannot represent.
    #[error("character {character:?} in <{tag}> is not allowed in XML")]
    InvalidCharacter { tag: String, character: char },

    #[error("element has no source path")]
    MissingSourcePath,

    #[error("path has no UTF-8 file name")]
    InvalidPath,
}

/// Errors surfaced by element load and save.
#[derive(Debug, Error)]
pub enum XmlStoreError {
    /// The file is missing, unreadable, unparsable or structurally invalid.
    #[error("unable to load element from '{}': {}", .path.display(), .source)]
    Load {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    /// The destination is unwritable or the document could not be built.
    #[error("unable to save element to '{}': {}", .path.display(), .source)]
    Save {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

impl XmlStoreError {
    /// The file the failed operation targeted.
    pub fn path(&self) -> &std::path::Path {
        match self {
            XmlStoreError::Load { path, .. } | XmlStoreError::Save { path, .. } => path,
        }
    }

    /// The underlying cause.
    pub fn cause(&self) -> &CodecError {
        match self {
            XmlStoreError::Load { source, .. } | XmlStoreError::Save { source, .. } => source,
        }
    }
}

/// Result type for load/save operations.
pub type Result<T> = std::result::Result<T, XmlStoreError>;
