//! Catalog elements.
//!
//! An [`Element`] is the root of an attribute tree extended with a
//! [`SecurityAnnex`] and the filesystem location it is persisted at.
//!
//! # Equality
//!
//! Elements compare, hash and order on their `id` alone. Two elements with
//! the same id but different values, children, owners or grants are equal.
//! This mirrors how catalogs identify entries; it is not a structural
//! comparison. Use [`Element::structurally_eq`] to compare content.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::attribute::{Attribute, AttributeValue};
use crate::error::Result;
use crate::security::{ElementOwner, OwnerPermissions, Principal, SecurityAnnex};

/// A named metadata catalog entry.
#[derive(Debug, Clone, Default)]
pub struct Element {
    attribute: Attribute,
    security: SecurityAnnex,
    source_path: Option<PathBuf>,
}

impl Element {
    /// An empty element: empty id, null value, no owner, no grants.
    pub fn new() -> Self {
        Self::default()
    }

    /// An element with the given id and value and no owner.
    pub fn with_value(id: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            attribute: Attribute::new(id, value),
            ..Self::default()
        }
    }

    /// Assemble an element from an already built tree and annex.
    pub fn from_parts(attribute: Attribute, security: SecurityAnnex) -> Self {
        Self {
            attribute,
            security,
            source_path: None,
        }
    }

    /// Deep copy of another element's tree and security annex.
    ///
    /// The source path is not carried over: the copy is not bound to the
    /// original's file until [`Element::set_source_path`] is called.
    pub fn duplicate(other: &Element) -> Self {
        Self {
            attribute: other.attribute.clone(),
            security: other.security.clone(),
            source_path: None,
        }
    }

    /// Builder form of [`Element::set_source_path`].
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute tree
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        self.attribute.id()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.attribute.set_id(id);
    }

    pub fn value(&self) -> &AttributeValue {
        self.attribute.value()
    }

    pub fn set_value(&mut self, value: impl Into<AttributeValue>) {
        self.attribute.set_value(value);
    }

    pub fn children(&self) -> &[Attribute] {
        self.attribute.children()
    }

    pub fn set_children(&mut self, children: Vec<Attribute>) {
        self.attribute.set_children(children);
    }

    pub fn add_child(&mut self, child: Attribute) {
        self.attribute.add_child(child);
    }

    pub fn find_child(&self, id: &str) -> Option<&Attribute> {
        self.attribute.find_child(id)
    }

    pub fn find_child_mut(&mut self, id: &str) -> Option<&mut Attribute> {
        self.attribute.find_child_mut(id)
    }

    pub fn remove_child(&mut self, id: &str) -> Option<Attribute> {
        self.attribute.remove_child(id)
    }

    /// The root attribute of this element's tree.
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    pub fn attribute_mut(&mut self) -> &mut Attribute {
        &mut self.attribute
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Security annex
    // ─────────────────────────────────────────────────────────────────────────

    pub fn security(&self) -> &SecurityAnnex {
        &self.security
    }

    pub fn security_mut(&mut self) -> &mut SecurityAnnex {
        &mut self.security
    }

    pub fn owner(&self) -> Option<&ElementOwner> {
        self.security.owner()
    }

    /// See [`SecurityAnnex::set_owner`].
    pub fn set_owner<P: Principal>(&mut self, owner: P) -> Result<()> {
        self.security.set_owner(owner)
    }

    pub fn clear_owner(&mut self) {
        self.security.clear_owner();
    }

    pub fn owner_permissions(&self) -> &[OwnerPermissions] {
        self.security.owner_permissions()
    }

    pub fn owner_permissions_mut(&mut self) -> &mut Vec<OwnerPermissions> {
        self.security.owner_permissions_mut()
    }

    pub fn set_owner_permissions(&mut self, list: Vec<OwnerPermissions>) {
        self.security.set_owner_permissions(list);
    }

    pub fn add_owner_permissions(&mut self, entry: OwnerPermissions) {
        self.security.add_owner_permissions(entry);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence binding
    // ─────────────────────────────────────────────────────────────────────────

    /// The file this element is loaded from and saved to.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn set_source_path(&mut self, path: impl Into<PathBuf>) {
        self.source_path = Some(path.into());
    }

    /// Compare id, tree and security annex. The source path is ignored.
    pub fn structurally_eq(&self, other: &Element) -> bool {
        self.attribute == other.attribute && self.security == other.security
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Element {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(other.id())
    }
}
