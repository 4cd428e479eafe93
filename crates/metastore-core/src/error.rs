//! Error types for the metastore core.

use thiserror::Error;

/// Errors raised by the in-memory model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An owner representation that is not native to this store was handed
    /// to `set_owner`. No conversion is attempted.
    #[error("unsupported owner type: {type_name} (expected ElementOwner)")]
    UnsupportedOwnerType { type_name: String },

    #[error("unknown owner type: {0}")]
    UnknownOwnerType(String),

    #[error("unknown permission: {0}")]
    UnknownPermission(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
