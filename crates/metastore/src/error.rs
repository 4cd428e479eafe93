//! Error types for the metastore facade.

use metastore_core::CoreError;
use metastore_xml::XmlStoreError;
use thiserror::Error;

/// Any error a metastore caller can see.
#[derive(Debug, Error)]
pub enum MetastoreError {
    /// In-memory model error, e.g. a foreign owner type.
    #[error("model error: {0}")]
    Core(#[from] CoreError),

    /// Load or save failure.
    #[error("storage error: {0}")]
    Store(#[from] XmlStoreError),
}

impl MetastoreError {
    pub fn is_load(&self) -> bool {
        matches!(self, MetastoreError::Store(XmlStoreError::Load { .. }))
    }

    pub fn is_save(&self) -> bool {
        matches!(self, MetastoreError::Store(XmlStoreError::Save { .. }))
    }

    pub fn is_unsupported_owner_type(&self) -> bool {
        matches!(self, MetastoreError::Core(CoreError::UnsupportedOwnerType { .. }))
    }
}

/// Result type for metastore operations.
pub type Result<T> = std::result::Result<T, MetastoreError>;
