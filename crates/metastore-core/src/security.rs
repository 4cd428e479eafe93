//! The security annex: element owner and per-owner permission grants.
//!
//! An element records at most one owner and an ordered list of
//! [`OwnerPermissions`] entries. The list is not de-duplicated; several
//! entries may name the same owner.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Kind of principal owning or being granted access to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerType {
    User,
    Role,
    SystemRole,
}

impl OwnerType {
    /// Name used in persisted documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerType::User => "USER",
            OwnerType::Role => "ROLE",
            OwnerType::SystemRole => "SYSTEM_ROLE",
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnerType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "USER" => Ok(OwnerType::User),
            "ROLE" => Ok(OwnerType::Role),
            "SYSTEM_ROLE" => Ok(OwnerType::SystemRole),
            other => Err(CoreError::UnknownOwnerType(other.to_string())),
        }
    }
}

/// An operation that can be granted over an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    Read,
    Write,
    Delete,
    ManageSecurity,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::Read,
        Permission::Write,
        Permission::Delete,
        Permission::ManageSecurity,
    ];

    /// Name used in persisted documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "READ",
            Permission::Write => "WRITE",
            Permission::Delete => "DELETE",
            Permission::ManageSecurity => "MANAGE_SECURITY",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "READ" => Ok(Permission::Read),
            "WRITE" => Ok(Permission::Write),
            "DELETE" => Ok(Permission::Delete),
            "MANAGE_SECURITY" => Ok(Permission::ManageSecurity),
            other => Err(CoreError::UnknownPermission(other.to_string())),
        }
    }
}

/// Any representation of an owning principal.
///
/// Other stores implement this for their own owner types. Only
/// [`ElementOwner`] is accepted by [`SecurityAnnex::set_owner`]; use
/// [`ElementOwner::from_principal`] to convert explicitly.
pub trait Principal: Any + fmt::Debug {
    fn name(&self) -> &str;
    fn owner_type(&self) -> OwnerType;
}

/// The owner identity native to this store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementOwner {
    /// Identifier of the principal.
    pub name: String,

    /// Kind of principal.
    pub owner_type: OwnerType,
}

impl ElementOwner {
    pub fn new(name: impl Into<String>, owner_type: OwnerType) -> Self {
        Self {
            name: name.into(),
            owner_type,
        }
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self::new(name, OwnerType::User)
    }

    pub fn role(name: impl Into<String>) -> Self {
        Self::new(name, OwnerType::Role)
    }

    /// Copy name and type out of any principal.
    pub fn from_principal(principal: &dyn Principal) -> Self {
        Self::new(principal.name(), principal.owner_type())
    }
}

impl Principal for ElementOwner {
    fn name(&self) -> &str {
        &self.name
    }

    fn owner_type(&self) -> OwnerType {
        self.owner_type
    }
}

/// A grant: a set of permissions given to one principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerPermissions {
    /// The principal receiving the grant. Need not be the element's owner.
    pub owner: ElementOwner,

    /// Granted operations, in the order they were recorded.
    pub permissions: Vec<Permission>,
}

impl OwnerPermissions {
    pub fn new(owner: ElementOwner, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            owner,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Whether this grant includes `permission`.
    pub fn allows(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// Owner plus grants attached to an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityAnnex {
    owner: Option<ElementOwner>,
    owner_permissions: Vec<OwnerPermissions>,
}

impl SecurityAnnex {
    /// An annex with no owner and no grants.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Option<&ElementOwner> {
        self.owner.as_ref()
    }

    /// Replace the recorded owner.
    ///
    /// Fails with [`CoreError::UnsupportedOwnerType`] unless `owner` is an
    /// [`ElementOwner`]. Foreign representations are never converted here.
    pub fn set_owner<P: Principal>(&mut self, owner: P) -> Result<()> {
        let boxed: Box<dyn Any> = Box::new(owner);
        match boxed.downcast::<ElementOwner>() {
            Ok(native) => {
                self.owner = Some(*native);
                Ok(())
            }
            Err(_) => Err(CoreError::UnsupportedOwnerType {
                type_name: std::any::type_name::<P>().to_string(),
            }),
        }
    }

    pub fn clear_owner(&mut self) {
        self.owner = None;
    }

    pub fn owner_permissions(&self) -> &[OwnerPermissions] {
        &self.owner_permissions
    }

    /// The grant list, open for arbitrary edits. No uniqueness is enforced.
    pub fn owner_permissions_mut(&mut self) -> &mut Vec<OwnerPermissions> {
        &mut self.owner_permissions
    }

    pub fn set_owner_permissions(&mut self, list: Vec<OwnerPermissions>) {
        self.owner_permissions = list;
    }

    pub fn add_owner_permissions(&mut self, entry: OwnerPermissions) {
        self.owner_permissions.push(entry);
    }

    /// Every grant entry naming `owner`, in list order.
    pub fn permissions_for<'a>(
        &'a self,
        owner: &'a ElementOwner,
    ) -> impl Iterator<Item = &'a OwnerPermissions> + 'a {
        self.owner_permissions
            .iter()
            .filter(move |op| &op.owner == owner)
    }
}
