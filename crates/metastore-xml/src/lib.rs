//! # Metastore XML
//!
//! Persistence for metastore elements as indented XML documents, one file
//! per element.
//!
//! ## Overview
//!
//! The [`XmlCodec`] converts an [`Element`](metastore_core::Element) to and
//! from the canonical document and reads/writes it on disk. The
//! [`XmlElementExt`] trait puts `load`/`save` directly on `Element` using the
//! default [`CodecConfig`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use metastore_core::{Element, ElementOwner};
//! use metastore_xml::XmlElementExt;
//!
//! let mut element = Element::with_value("db-conn-1", "jdbc:postgresql://localhost/catalog")
//!     .with_source_path("catalog/db-conn-1.xml");
//! element.set_owner(ElementOwner::user("alice")).unwrap();
//! element.save().unwrap();
//!
//! let loaded = Element::load("catalog/db-conn-1.xml").unwrap();
//! assert_eq!(loaded.id(), "db-conn-1.xml");
//! ```
//!
//! ## Design Notes
//!
//! - **File name is the id**: on load, the element id is the file's base
//!   name; any `<id>` at the document root is ignored.
//! - **Permissive parsing**: unknown root tags become attributes unless
//!   [`UnknownTagPolicy::Reject`] is configured.
//! - **No locking**: concurrent saves to one path race; the last writer wins.
//! - **Atomic saves are opt-in** via [`SaveMode::Atomic`].

pub mod codec;
pub mod config;
pub mod dom;
pub mod error;
pub mod file;

pub use codec::{decode, encode, XmlCodec};
pub use config::{CodecConfig, SaveMode, UnknownTagPolicy};
pub use dom::XmlNode;
pub use error::{CodecError, Result, XmlStoreError};
pub use file::XmlElementExt;
