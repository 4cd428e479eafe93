//! # Metastore Core
//!
//! Pure data model for the metastore: attribute trees, catalog elements,
//! and the security annex attached to every element.
//!
//! This crate contains no I/O and no document format. Persistence lives in
//! `metastore-xml`.
//!
//! ## Key Types
//!
//! - [`Attribute`] - A node in the recursive attribute tree
//! - [`AttributeValue`] - The scalar carried by an attribute
//! - [`Element`] - A named catalog entry: attribute tree root plus security annex
//! - [`SecurityAnnex`] - Owner identity and per-owner permission grants
//! - [`ElementOwner`] / [`OwnerPermissions`] - The annex building blocks
//!
//! ## Equality
//!
//! Two [`Element`]s are equal when their ids are equal. Values, children,
//! owner and grants are not compared. Use [`Element::structurally_eq`] when
//! the full content matters.

pub mod attribute;
pub mod element;
pub mod error;
pub mod security;

pub use attribute::{Attribute, AttributeValue};
pub use element::Element;
pub use error::{CoreError, Result};
pub use security::{ElementOwner, OwnerPermissions, OwnerType, Permission, Principal, SecurityAnnex};
