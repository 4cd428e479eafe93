//! # Metastore
//!
//! File-backed metadata catalog elements: a named attribute tree plus an
//! access-control annex, persisted one XML document per element.
//!
//! ## Overview
//!
//! - **Attributes**: id + scalar value + ordered children, recursively
//! - **Elements**: the root of a tree, identified (and compared) by id
//! - **Security annex**: an optional owner and a list of per-owner grants
//! - **XML persistence**: indented, hand-editable documents; the file name
//!   is the element id on load
//!
//! ## Usage
//!
//! ```rust,no_run
//! use metastore::{Element, ElementOwner, OwnerPermissions, Permission, XmlElementExt};
//!
//! fn example() -> metastore::Result<()> {
//!     let mut element = Element::with_value("db-conn-1", "jdbc:postgresql://localhost/catalog")
//!         .with_source_path("catalog/db-conn-1.xml");
//!     element.set_owner(ElementOwner::user("alice"))?;
//!     element.add_owner_permissions(OwnerPermissions::new(
//!         ElementOwner::user("bob"),
//!         [Permission::Read],
//!     ));
//!     element.save()?;
//!
//!     let loaded = Element::load("catalog/db-conn-1.xml")?;
//!     assert_eq!(loaded.owner().map(|o| o.name.as_str()), Some("alice"));
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Loads and saves are blocking and unsynchronized. Two saves to the same
//! path race and the last writer wins; serialize writers externally.
//!
//! ## Re-exports
//!
//! - `metastore::core` - In-memory model
//! - `metastore::xml` - Document codec and file persistence

pub mod error;

// Re-export component crates
pub use metastore_core as core;
pub use metastore_xml as xml;

pub use error::{MetastoreError, Result};

// Re-export commonly used types
pub use metastore_core::{
    Attribute, AttributeValue, CoreError, Element, ElementOwner, OwnerPermissions, OwnerType,
    Permission, Principal, SecurityAnnex,
};
pub use metastore_xml::{
    CodecConfig, CodecError, SaveMode, UnknownTagPolicy, XmlCodec, XmlElementExt, XmlStoreError,
};
