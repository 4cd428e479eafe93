//! End-to-end behavior of elements persisted as XML files.

use std::collections::HashSet;
use std::fs;

use proptest::prelude::*;

use metastore::{
    Attribute, AttributeValue, CodecConfig, CodecError, Element, ElementOwner, MetastoreError,
    OwnerPermissions, OwnerType, Permission, Principal, SaveMode, XmlCodec, XmlElementExt,
};
use metastore_testkit::fixtures::{scenario_element, TempCatalog, SCENARIO_ID, SCENARIO_VALUE};
use metastore_testkit::generators;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug)]
struct LdapPrincipal {
    dn: String,
}

impl Principal for LdapPrincipal {
    fn name(&self) -> &str {
        &self.dn
    }

    fn owner_type(&self) -> OwnerType {
        OwnerType::User
    }
}

#[test]
fn scenario_save_then_load_reproduces_all_fields() -> metastore::Result<()> {
    init_tracing();
    let catalog = TempCatalog::new();
    let element = catalog.bind(scenario_element());

    element.save()?;
    let loaded = Element::load(catalog.path("db-conn-1.xml"))?;

    assert_eq!(loaded.id(), "db-conn-1.xml");
    assert_eq!(loaded.value(), &AttributeValue::from(SCENARIO_VALUE));
    assert_eq!(loaded.owner(), Some(&ElementOwner::user("alice")));
    assert_eq!(
        loaded.owner_permissions(),
        &[OwnerPermissions::new(ElementOwner::user("bob"), [Permission::Read])]
    );
    Ok(())
}

#[test]
fn load_identity_comes_from_file_name() {
    let catalog = TempCatalog::new();
    let path = catalog.write_raw(
        "foo.xml",
        "<element><id>something-else</id><value>v</value><type>String</type></element>",
    );

    let loaded = Element::load(&path).unwrap();
    assert_eq!(loaded.id(), "foo.xml");
    assert_eq!(loaded.source_path(), Some(path.as_path()));
}

#[test]
fn load_without_security_section() {
    let catalog = TempCatalog::new();
    let path = catalog.write_raw(
        "plain.xml",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<element>
  <id>plain</id>
  <children>
    <child>
      <id>host</id>
      <value>localhost</value>
      <type>String</type>
    </child>
  </children>
</element>
"#,
    );

    let loaded = Element::load(path).unwrap();
    assert!(loaded.owner().is_none());
    assert!(loaded.owner_permissions().is_empty());
    assert_eq!(loaded.find_child("host").unwrap().value().as_str(), Some("localhost"));
}

#[test]
fn equality_ignores_everything_but_id() {
    let a = scenario_element();
    let mut b = Element::with_value(SCENARIO_ID, 1i64);
    b.add_child(Attribute::new("extra", true));
    b.set_owner(ElementOwner::role("ops")).unwrap();

    assert_eq!(a, b);
    assert!(!a.structurally_eq(&b));

    let set: HashSet<Element> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn loaded_elements_compare_by_file_name() {
    let catalog = TempCatalog::new();
    let first = catalog.bind(scenario_element());
    first.save().unwrap();

    let mut copy = Element::duplicate(&first);
    copy.set_value("changed");
    copy.set_source_path(catalog.path("db-conn-1.xml"));
    copy.save().unwrap();

    let a = Element::load(catalog.path("db-conn-1.xml")).unwrap();
    let b = Element::load(catalog.path("db-conn-1.xml")).unwrap();
    assert_eq!(a, b);
    // The second save won.
    assert_eq!(a.value().as_str(), Some("changed"));
}

#[test]
fn duplicate_is_independent_after_load() {
    let catalog = TempCatalog::new();
    catalog.bind(scenario_element()).save().unwrap();
    let original = Element::load(catalog.path("db-conn-1.xml")).unwrap();

    let mut copy = Element::duplicate(&original);
    copy.add_child(Attribute::new("pool", 8i64));
    copy.set_owner(ElementOwner::user("carol")).unwrap();
    copy.owner_permissions_mut().push(OwnerPermissions::new(
        ElementOwner::role("auditors"),
        [Permission::Read],
    ));
    copy.owner_permissions_mut()[0].owner.owner_type = OwnerType::Role;

    assert!(original.children().is_empty());
    assert_eq!(original.owner().unwrap().name, "alice");
    assert_eq!(original.owner_permissions().len(), 1);
    assert_eq!(original.owner_permissions()[0].owner.owner_type, OwnerType::User);
}

#[test]
fn load_nonexistent_path_is_load_error() {
    let catalog = TempCatalog::new();
    let err: MetastoreError = Element::load(catalog.path("missing.xml")).unwrap_err().into();
    assert!(err.is_load());
}

#[test]
fn save_into_missing_directory_is_save_error() {
    let catalog = TempCatalog::new();
    let element = scenario_element().with_source_path(catalog.path("nested/db-conn-1.xml"));

    let err: MetastoreError = element.save().unwrap_err().into();
    assert!(err.is_save());
    assert!(!catalog.path("nested").exists());
}

#[test]
fn foreign_owner_is_unsupported() {
    let mut element = scenario_element();
    let err: MetastoreError = element
        .set_owner(LdapPrincipal {
            dn: "cn=alice,dc=example".into(),
        })
        .unwrap_err()
        .into();

    assert!(err.is_unsupported_owner_type());
    assert_eq!(element.owner().unwrap().name, "alice");
}

#[test]
fn unknown_root_tags_survive_as_attributes() {
    let catalog = TempCatalog::new();
    let path = catalog.write_raw(
        "ext.xml",
        "<element><id>ext</id><x-extension>1</x-extension></element>",
    );

    let loaded = Element::load(&path).unwrap();
    assert_eq!(loaded.find_child("x-extension").unwrap().value().as_str(), Some("1"));

    // Re-saving normalizes the phantom into a regular child.
    loaded.save().unwrap();
    let xml = fs::read_to_string(&path).unwrap();
    assert!(xml.contains("<id>x-extension</id>"));
    assert!(!xml.contains("<x-extension>"));
}

#[test]
fn save_does_not_mutate_element() {
    let catalog = TempCatalog::new();
    let element = catalog.bind(scenario_element());
    let before = element.clone();

    element.save().unwrap();
    element.save().unwrap();

    assert!(element.structurally_eq(&before));
    assert_eq!(element.source_path(), before.source_path());
}

#[test]
fn atomic_and_overwrite_modes_write_identical_documents() {
    let catalog = TempCatalog::new();
    let element = scenario_element();

    XmlCodec::default()
        .save_to(&element, catalog.path("overwrite.xml"))
        .unwrap();
    XmlCodec::new(CodecConfig::default().with_save_mode(SaveMode::Atomic))
        .save_to(&element, catalog.path("atomic.xml"))
        .unwrap();

    assert_eq!(catalog.read_raw("overwrite.xml"), catalog.read_raw("atomic.xml"));
}

#[test]
fn output_is_two_space_indented() {
    let xml = scenario_element().to_xml_string().unwrap();
    assert!(xml.contains("\n  <security>\n    <owner>\n      <name>alice</name>"));
}

#[test]
fn failed_load_cause_is_preserved() {
    let catalog = TempCatalog::new();
    let path = catalog.write_raw("bad.xml", "<element><value>x</value><type>Integer</type></element>");

    let err = Element::load(&path).unwrap_err();
    assert_eq!(err.path(), path.as_path());
    assert!(matches!(err.cause(), CodecError::InvalidValue { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn roundtrip_through_file(element in generators::element()) {
        let catalog = TempCatalog::new();
        let path = catalog.path("prop.xml");
        let codec = XmlCodec::default();

        codec.save_to(&element, &path).unwrap();
        let loaded = codec.load(&path).unwrap();

        prop_assert_eq!(loaded.id(), "prop.xml");
        prop_assert_eq!(loaded.value(), element.value());
        prop_assert_eq!(loaded.children(), element.children());
        prop_assert_eq!(loaded.security(), element.security());
    }

    #[test]
    fn equality_matches_id_equality(a in generators::element(), b in generators::element()) {
        prop_assert_eq!(a == b, a.id() == b.id());
    }

    #[test]
    fn duplicate_then_mutate_leaves_original(element in generators::element(), extra in generators::attribute()) {
        let snapshot = element.clone();
        let mut copy = Element::duplicate(&element);

        copy.add_child(extra);
        copy.clear_owner();
        copy.owner_permissions_mut().clear();

        prop_assert!(element.structurally_eq(&snapshot));
    }
}
