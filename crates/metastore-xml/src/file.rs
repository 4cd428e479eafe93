//! Loading and saving elements on disk.
//!
//! One file per element. The file base name is the element id on load.
//! Every read and write happens within a single call; nothing is held open
//! between calls and no lock is taken.

use std::fs;
use std::path::{Path, PathBuf};

use metastore_core::Element;

use crate::codec::XmlCodec;
use crate::config::SaveMode;
use crate::error::{CodecError, Result, XmlStoreError};

impl XmlCodec {
    /// Load an element from `path`.
    ///
    /// The element id is the file name (`foo.xml` -> `"foo.xml"`), and the
    /// element remembers `path` as its source. Any failure is reported as
    /// [`XmlStoreError::Load`]; no partially populated element is returned.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Element> {
        let path = path.as_ref();
        let load_err = |source: CodecError| XmlStoreError::Load {
            path: path.to_path_buf(),
            source,
        };

        let id = file_id(path).ok_or_else(|| load_err(CodecError::InvalidPath))?;
        let xml = fs::read_to_string(path).map_err(|e| load_err(e.into()))?;
        let mut element = self.from_xml_str(&xml, &id).map_err(load_err)?;
        element.set_source_path(path);

        tracing::debug!(
            path = %path.display(),
            id = element.id(),
            attributes = element.attribute().descendant_count(),
            grants = element.owner_permissions().len(),
            "loaded element"
        );
        Ok(element)
    }

    /// Save `element` to its source path.
    ///
    /// Fails with [`CodecError::MissingSourcePath`] as the cause when the
    /// element was never bound to a file.
    pub fn save(&self, element: &Element) -> Result<()> {
        match element.source_path() {
            Some(path) => self.save_to(element, path),
            None => Err(XmlStoreError::Save {
                path: PathBuf::new(),
                source: CodecError::MissingSourcePath,
            }),
        }
    }

    /// Save `element` to an explicit path, replacing any prior content.
    ///
    /// Parent directories are not created. The in-memory element is not
    /// modified.
    pub fn save_to(&self, element: &Element, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let save_err = |source: CodecError| XmlStoreError::Save {
            path: path.to_path_buf(),
            source,
        };

        let xml = self.to_xml_string(element).map_err(save_err)?;
        let written = match self.config().save_mode {
            SaveMode::Overwrite => fs::write(path, xml.as_bytes()),
            SaveMode::Atomic => write_atomic(path, xml.as_bytes()),
        };
        written.map_err(|e| save_err(e.into()))?;

        tracing::debug!(
            path = %path.display(),
            id = element.id(),
            bytes = xml.len(),
            "saved element"
        );
        Ok(())
    }
}

/// The element id for a file: its base name, which must be UTF-8.
fn file_id(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

/// Write to a sibling temp file, then rename it over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let name = path
        .file_name()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"))?;
    let suffix = hex::encode(rand::random::<[u8; 8]>());
    let tmp = path.with_file_name(format!(".{}.{}.tmp", name.to_string_lossy(), suffix));

    let result = fs::write(&tmp, contents).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() && tmp.exists() {
        if let Err(e) = fs::remove_file(&tmp) {
            tracing::warn!(path = %tmp.display(), "failed to remove temp file: {}", e);
        }
    }
    result
}

/// `load`/`save` on [`Element`] with the default [`CodecConfig`](crate::CodecConfig).
pub trait XmlElementExt: Sized {
    /// See [`XmlCodec::load`].
    fn load(path: impl AsRef<Path>) -> Result<Self>;

    /// See [`XmlCodec::save`].
    fn save(&self) -> Result<()>;

    /// The document `save` would write.
    fn to_xml_string(&self) -> std::result::Result<String, CodecError>;
}

impl XmlElementExt for Element {
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        XmlCodec::default().load(path)
    }

    fn save(&self) -> Result<()> {
        XmlCodec::default().save(self)
    }

    fn to_xml_string(&self) -> std::result::Result<String, CodecError> {
        XmlCodec::default().to_xml_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;
    use metastore_core::{Attribute, ElementOwner, OwnerPermissions, Permission};
    use tempfile::TempDir;

    fn sample(dir: &Path) -> Element {
        let mut element = Element::with_value("db-conn-1", "jdbc:postgresql://localhost/catalog")
            .with_source_path(dir.join("db-conn-1.xml"));
        element.add_child(Attribute::new("port", 5432i64));
        element.set_owner(ElementOwner::user("alice")).unwrap();
        element.add_owner_permissions(OwnerPermissions::new(
            ElementOwner::user("bob"),
            [Permission::Read],
        ));
        element
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let element = sample(dir.path());
        element.save().unwrap();

        let loaded = Element::load(dir.path().join("db-conn-1.xml")).unwrap();
        assert_eq!(loaded.id(), "db-conn-1.xml");
        assert_eq!(loaded.source_path(), Some(dir.path().join("db-conn-1.xml").as_path()));
        assert_eq!(loaded.value(), element.value());
        assert_eq!(loaded.children(), element.children());
        assert_eq!(loaded.security(), element.security());
    }

    #[test]
    fn test_save_overwrites_and_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db-conn-1.xml");
        fs::write(&path, "x".repeat(10_000)).unwrap();

        let element = sample(dir.path());
        element.save().unwrap();
        let first = fs::read_to_string(&path).unwrap();
        element.save().unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("<?xml"));
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let codec = XmlCodec::new(CodecConfig::default().with_save_mode(SaveMode::Atomic));
        let element = sample(dir.path());

        codec.save(&element).unwrap();
        codec.save(&element).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["db-conn-1.xml".to_string()]);

        let loaded = codec.load(dir.path().join("db-conn-1.xml")).unwrap();
        assert_eq!(loaded.owner(), element.owner());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.xml");

        let err = Element::load(&path).unwrap_err();
        assert!(matches!(err, XmlStoreError::Load { .. }));
        assert_eq!(err.path(), path.as_path());
        assert!(matches!(err.cause(), CodecError::Io(_)));
    }

    #[test]
    fn test_load_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.xml");
        fs::write(&path, "<element><children></element>").unwrap();

        assert!(matches!(Element::load(&path), Err(XmlStoreError::Load { .. })));
    }

    #[test]
    fn test_load_wrong_root() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("other.xml");
        fs::write(&path, "<catalog><id>x</id></catalog>").unwrap();

        let err = Element::load(&path).unwrap_err();
        assert!(matches!(err.cause(), CodecError::RootTagMismatch { .. }));
    }

    #[test]
    fn test_save_into_missing_directory() {
        let dir = TempDir::new().unwrap();
        let element = sample(&dir.path().join("no-such-dir"));

        let err = element.save().unwrap_err();
        assert!(matches!(err, XmlStoreError::Save { .. }));
        assert!(matches!(err.cause(), CodecError::Io(_)));
    }

    #[test]
    fn test_atomic_save_into_missing_directory() {
        let dir = TempDir::new().unwrap();
        let codec = XmlCodec::new(CodecConfig::default().with_save_mode(SaveMode::Atomic));
        let element = sample(&dir.path().join("no-such-dir"));

        assert!(matches!(codec.save(&element), Err(XmlStoreError::Save { .. })));
    }

    #[test]
    fn test_atomic_save_failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("dir.xml");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("occupant"), "x").unwrap();

        let codec = XmlCodec::new(CodecConfig::default().with_save_mode(SaveMode::Atomic));
        let err = codec.save_to(&sample(dir.path()), &target).unwrap_err();
        assert!(matches!(err, XmlStoreError::Save { .. }));
        assert!(matches!(err.cause(), CodecError::Io(_)));

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["dir.xml".to_string()]);
        assert!(target.join("occupant").exists());
    }

    #[test]
    fn test_save_rejects_control_characters() {
        let dir = TempDir::new().unwrap();
        let element = Element::with_value("ctl", "x\u{1}y").with_source_path(dir.path().join("ctl.xml"));

        let err = element.save().unwrap_err();
        assert!(matches!(err, XmlStoreError::Save { .. }));
        assert!(matches!(err.cause(), CodecError::InvalidCharacter { .. }));
        assert!(!dir.path().join("ctl.xml").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_load_non_utf8_file_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"bad-\xff.xml"));

        let err = Element::load(&path).unwrap_err();
        assert!(matches!(err, XmlStoreError::Load { .. }));
        assert!(matches!(err.cause(), CodecError::InvalidPath));
    }

    #[test]
    fn test_save_without_source_path() {
        let element = Element::with_value("floating", 1i64);
        let err = element.save().unwrap_err();
        assert!(matches!(err.cause(), CodecError::MissingSourcePath));
    }

    #[test]
    fn test_error_message_names_the_file() {
        let err = Element::load("/definitely/not/here.xml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.xml"));
    }
}
