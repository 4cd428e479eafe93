//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use metastore_core::{Element, ElementOwner, OwnerPermissions, Permission};
use tempfile::TempDir;

/// Id of the reference scenario element.
pub const SCENARIO_ID: &str = "db-conn-1";

/// Value of the reference scenario element.
pub const SCENARIO_VALUE: &str = "jdbc:postgresql://localhost:5432/catalog";

/// The reference scenario: a connection element owned by `alice` that
/// grants `bob` read access.
pub fn scenario_element() -> Element {
    let mut element = Element::with_value(SCENARIO_ID, SCENARIO_VALUE);
    element
        .set_owner(ElementOwner::user("alice"))
        .expect("ElementOwner is native");
    element.add_owner_permissions(OwnerPermissions::new(
        ElementOwner::user("bob"),
        [Permission::Read],
    ));
    element
}

/// A throwaway catalog directory, removed on drop.
pub struct TempCatalog {
    dir: TempDir,
}

impl TempCatalog {
    /// Create a new empty catalog directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// The catalog directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the catalog.
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.path().join(file_name)
    }

    /// Bind `element` to `<root>/<id>.xml`.
    pub fn bind(&self, element: Element) -> Element {
        let path = self.path(&format!("{}.xml", element.id()));
        element.with_source_path(path)
    }

    /// Write raw document text, returning its path.
    pub fn write_raw(&self, file_name: &str, contents: &str) -> PathBuf {
        let path = self.path(file_name);
        fs::write(&path, contents).expect("failed to write fixture file");
        path
    }

    /// Read a catalog file back as text.
    pub fn read_raw(&self, file_name: &str) -> String {
        fs::read_to_string(self.path(file_name)).expect("failed to read fixture file")
    }
}

impl Default for TempCatalog {
    fn default() -> Self {
        Self::new()
    }
}
