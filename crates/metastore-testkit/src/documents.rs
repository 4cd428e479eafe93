//! Golden documents for on-disk format verification.
//!
//! Each document pairs an element with the exact bytes the default codec
//! must write for it. Persisted catalogs are hand-edited and diffed, so the
//! layout is pinned down to the whitespace.

use metastore_core::{
    Attribute, AttributeValue, Element, ElementOwner, OwnerPermissions, OwnerType, Permission,
};
use metastore_xml::XmlCodec;

use crate::fixtures::scenario_element;

/// A single golden document.
#[derive(Debug, Clone)]
pub struct GoldenDocument {
    pub name: &'static str,
    pub description: &'static str,
    pub element: Element,
    pub xml: &'static str,
}

const BARE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<element>
  <id>bare</id>
  <security>
    <owner/>
    <owner-permissions-list/>
  </security>
</element>
"#;

const SCENARIO_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<element>
  <id>db-conn-1</id>
  <value>jdbc:postgresql://localhost:5432/catalog</value>
  <type>String</type>
  <security>
    <owner>
      <name>alice</name>
      <type>USER</type>
    </owner>
    <owner-permissions-list>
      <owner-permissions>
        <owner>
          <name>bob</name>
          <type>USER</type>
        </owner>
        <permissions>
          <permission>READ</permission>
        </permissions>
      </owner-permissions>
    </owner-permissions-list>
  </security>
</element>
"#;

const TYPED_TREE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<element>
  <id>settings</id>
  <children>
    <child>
      <id>port</id>
      <value>5432</value>
      <type>Integer</type>
    </child>
    <child>
      <id>ratio</id>
      <value>0.5</value>
      <type>Float</type>
    </child>
    <child>
      <id>enabled</id>
      <value>true</value>
      <type>Boolean</type>
    </child>
    <child>
      <id>pool</id>
      <children>
        <child>
          <id>max</id>
          <value>16</value>
          <type>Integer</type>
        </child>
      </children>
    </child>
  </children>
  <security>
    <owner>
      <name>etl</name>
      <type>ROLE</type>
    </owner>
    <owner-permissions-list>
      <owner-permissions>
        <owner>
          <name>admins</name>
          <type>SYSTEM_ROLE</type>
        </owner>
        <permissions>
          <permission>READ</permission>
          <permission>WRITE</permission>
          <permission>DELETE</permission>
          <permission>MANAGE_SECURITY</permission>
        </permissions>
      </owner-permissions>
      <owner-permissions>
        <owner>
          <name>bob</name>
          <type>USER</type>
        </owner>
        <permissions/>
      </owner-permissions>
    </owner-permissions-list>
  </security>
</element>
"#;

fn typed_tree_element() -> Element {
    let mut element = Element::with_value("settings", AttributeValue::Null);
    element.add_child(Attribute::new("port", 5432i64));
    element.add_child(Attribute::new("ratio", 0.5));
    element.add_child(Attribute::new("enabled", true));
    element.add_child(
        Attribute::new("pool", AttributeValue::Null).with_child(Attribute::new("max", 16i64)),
    );
    element
        .set_owner(ElementOwner::role("etl"))
        .expect("ElementOwner is native");
    element.add_owner_permissions(OwnerPermissions::new(
        ElementOwner::new("admins", OwnerType::SystemRole),
        Permission::ALL,
    ));
    element.add_owner_permissions(OwnerPermissions::new(
        ElementOwner::user("bob"),
        Vec::<Permission>::new(),
    ));
    element
}

/// All golden documents.
pub fn all_documents() -> Vec<GoldenDocument> {
    vec![
        GoldenDocument {
            name: "bare",
            description: "id only: no value, no children, no owner, no grants",
            element: Element::with_value("bare", AttributeValue::Null),
            xml: BARE_XML,
        },
        GoldenDocument {
            name: "scenario",
            description: "string value, user owner, one read grant",
            element: scenario_element(),
            xml: SCENARIO_XML,
        },
        GoldenDocument {
            name: "typed-tree",
            description: "every scalar type, nested children, role owner, full and empty grants",
            element: typed_tree_element(),
            xml: TYPED_TREE_XML,
        },
    ]
}

/// Encode and decode every golden document with the default codec.
///
/// Returns a description of each mismatch; empty means all documents pass.
pub fn verify_all_documents() -> Vec<String> {
    let codec = XmlCodec::default();
    let mut failures = Vec::new();

    for doc in all_documents() {
        match codec.to_xml_string(&doc.element) {
            Ok(xml) if xml == doc.xml => {}
            Ok(xml) => failures.push(format!("{}: encoded output differs:\n{}", doc.name, xml)),
            Err(e) => failures.push(format!("{}: encode failed: {}", doc.name, e)),
        }

        match codec.from_xml_str(doc.xml, doc.element.id()) {
            Ok(decoded) if decoded.structurally_eq(&doc.element) => {}
            Ok(decoded) => failures.push(format!("{}: decoded to {:?}", doc.name, decoded)),
            Err(e) => failures.push(format!("{}: decode failed: {}", doc.name, e)),
        }
    }

    failures
}
