//! Mapping between elements and the canonical XML document.
//!
//! ```xml
//! <element>
//!   <id>...</id>
//!   <value>...</value>
//!   <type>String|Integer|Float|Boolean</type>
//!   <children>
//!     <child>(id, value, type, children, recursively)</child>
//!   </children>
//!   <security>
//!     <owner><name/><type/></owner>
//!     <owner-permissions-list>
//!       <owner-permissions>
//!         <owner><name/><type/></owner>
//!         <permissions><permission>READ</permission></permissions>
//!       </owner-permissions>
//!     </owner-permissions-list>
//!   </security>
//! </element>
//! ```
//!
//! Tag names are part of the compatibility surface of persisted catalogs.

use metastore_core::{
    Attribute, AttributeValue, Element, ElementOwner, OwnerPermissions, OwnerType, Permission,
    SecurityAnnex,
};

use crate::config::{CodecConfig, UnknownTagPolicy};
use crate::dom::XmlNode;
use crate::error::CodecError;

pub const ELEMENT_TAG: &str = "element";
pub const ID_TAG: &str = "id";
pub const VALUE_TAG: &str = "value";
pub const TYPE_TAG: &str = "type";
pub const CHILDREN_TAG: &str = "children";
pub const CHILD_TAG: &str = "child";
pub const SECURITY_TAG: &str = "security";
pub const OWNER_TAG: &str = "owner";
pub const NAME_TAG: &str = "name";
pub const OWNER_PERMISSIONS_LIST_TAG: &str = "owner-permissions-list";
pub const OWNER_PERMISSIONS_TAG: &str = "owner-permissions";
pub const PERMISSIONS_TAG: &str = "permissions";
pub const PERMISSION_TAG: &str = "permission";

/// Encoder/decoder bound to a [`CodecConfig`].
///
/// File operations live in [`crate::file`].
#[derive(Debug, Clone, Default)]
pub struct XmlCodec {
    config: CodecConfig,
}

impl XmlCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Render `element` as a complete, indented document.
    pub fn to_xml_string(&self, element: &Element) -> Result<String, CodecError> {
        encode(element).write(self.config.indent, self.config.xml_declaration)
    }

    /// Parse a document into an element named `id`.
    pub fn from_xml_str(&self, xml: &str, id: &str) -> Result<Element, CodecError> {
        let root = XmlNode::parse(xml)?;
        decode(&root, id, &self.config)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Build the document tree for `element`: attribute tree first, then the
/// security section.
pub fn encode(element: &Element) -> XmlNode {
    let mut root = XmlNode::new(ELEMENT_TAG);
    append_attribute(&mut root, element.attribute());
    root.push(encode_security(element.security()));
    root
}

fn append_attribute(node: &mut XmlNode, attribute: &Attribute) {
    node.push(XmlNode::with_text(ID_TAG, attribute.id()));

    let value = attribute.value();
    if let Some(type_name) = value.type_name() {
        node.push(XmlNode::with_text(VALUE_TAG, value.to_string()));
        node.push(XmlNode::with_text(TYPE_TAG, type_name));
    }

    if !attribute.children().is_empty() {
        let children = node.push(XmlNode::new(CHILDREN_TAG));
        for child in attribute.children() {
            let child_node = children.push(XmlNode::new(CHILD_TAG));
            append_attribute(child_node, child);
        }
    }
}

fn encode_security(security: &SecurityAnnex) -> XmlNode {
    let mut node = XmlNode::new(SECURITY_TAG);

    // An absent owner is kept as an empty <owner/>.
    let owner_node = node.push(XmlNode::new(OWNER_TAG));
    if let Some(owner) = security.owner() {
        append_owner(owner_node, owner);
    }

    let list = node.push(XmlNode::new(OWNER_PERMISSIONS_LIST_TAG));
    for entry in security.owner_permissions() {
        let entry_node = list.push(XmlNode::new(OWNER_PERMISSIONS_TAG));
        append_owner(entry_node.push(XmlNode::new(OWNER_TAG)), &entry.owner);

        let permissions = entry_node.push(XmlNode::new(PERMISSIONS_TAG));
        for permission in &entry.permissions {
            permissions.push(XmlNode::with_text(PERMISSION_TAG, permission.as_str()));
        }
    }

    node
}

fn append_owner(node: &mut XmlNode, owner: &ElementOwner) {
    node.push(XmlNode::with_text(NAME_TAG, owner.name.as_str()));
    node.push(XmlNode::with_text(TYPE_TAG, owner.owner_type.as_str()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Rebuild an element from a parsed document.
///
/// `id` becomes the element id; a root `<id>` in the document is ignored.
/// A missing `<security>` section yields no owner and no grants.
///
/// Whitespace between tags is insignificant. Text of `<id>`, `<value>` and
/// owner `<name>` is taken verbatim, so a name wrapped over several lines
/// keeps its line breaks. `<type>` and `<permission>` are trimmed.
pub fn decode(root: &XmlNode, id: &str, config: &CodecConfig) -> Result<Element, CodecError> {
    if root.name != ELEMENT_TAG {
        return Err(CodecError::RootTagMismatch {
            expected: ELEMENT_TAG,
            found: root.name.clone(),
        });
    }

    let mut attribute = decode_attribute(root, config, true)?;
    attribute.set_id(id);

    let mut security = SecurityAnnex::new();
    for node in root.children_named(SECURITY_TAG) {
        decode_security(node, &mut security)?;
    }

    Ok(Element::from_parts(attribute, security))
}

fn decode_attribute(
    node: &XmlNode,
    config: &CodecConfig,
    is_root: bool,
) -> Result<Attribute, CodecError> {
    let mut attribute = Attribute::default();
    let mut value_text: Option<&str> = None;
    let mut type_name: Option<&str> = None;

    for child in &node.children {
        match child.name.as_str() {
            ID_TAG => attribute.set_id(child.text.as_str()),
            VALUE_TAG => value_text = Some(child.text.as_str()),
            TYPE_TAG => type_name = Some(child.text.trim()),
            CHILDREN_TAG => {
                for child_node in &child.children {
                    let decoded = if child_node.name == CHILD_TAG {
                        decode_attribute(child_node, config, false)?
                    } else {
                        unknown_tag(child_node, child, config)?
                    };
                    attribute.add_child(decoded);
                }
            }
            SECURITY_TAG if is_root => {}
            _ => attribute.add_child(unknown_tag(child, node, config)?),
        }
    }

    attribute.set_value(decode_value(value_text, type_name)?);
    Ok(attribute)
}

fn unknown_tag(
    node: &XmlNode,
    parent: &XmlNode,
    config: &CodecConfig,
) -> Result<Attribute, CodecError> {
    match config.unknown_tags {
        UnknownTagPolicy::Attribute => {
            tracing::warn!(
                tag = node.name.as_str(),
                parent = parent.name.as_str(),
                "unknown tag decoded as attribute"
            );
            Ok(phantom_attribute(node))
        }
        UnknownTagPolicy::Reject => Err(CodecError::UnknownTag(node.name.clone())),
    }
}

/// Interpret an unrecognized tag as a bare attribute.
fn phantom_attribute(node: &XmlNode) -> Attribute {
    let text = node.text.trim();
    let value = if node.is_leaf() && !text.is_empty() {
        AttributeValue::from(text)
    } else {
        AttributeValue::Null
    };

    let mut attribute = Attribute::new(node.name.as_str(), value);
    for child in &node.children {
        attribute.add_child(phantom_attribute(child));
    }
    attribute
}

/// Parse a `<value>` according to its `<type>`.
///
/// A value without a type is a string; a type without a value is null.
/// `Long` and `Double` are accepted as aliases written by older catalogs.
fn decode_value(text: Option<&str>, type_name: Option<&str>) -> Result<AttributeValue, CodecError> {
    let Some(text) = text else {
        return Ok(AttributeValue::Null);
    };

    let invalid = |type_name: &str| CodecError::InvalidValue {
        type_name: type_name.to_string(),
        text: text.to_string(),
    };

    match type_name {
        None | Some("String") => Ok(AttributeValue::String(text.to_string())),
        Some(t @ ("Integer" | "Long")) => text
            .trim()
            .parse::<i64>()
            .map(AttributeValue::Integer)
            .map_err(|_| invalid(t)),
        Some(t @ ("Float" | "Double")) => text
            .trim()
            .parse::<f64>()
            .map(AttributeValue::Float)
            .map_err(|_| invalid(t)),
        Some(t @ "Boolean") => match text.trim() {
            "true" => Ok(AttributeValue::Boolean(true)),
            "false" => Ok(AttributeValue::Boolean(false)),
            _ => Err(invalid(t)),
        },
        Some(other) => Err(CodecError::UnknownValueType(other.to_string())),
    }
}

fn decode_security(node: &XmlNode, security: &mut SecurityAnnex) -> Result<(), CodecError> {
    for child in &node.children {
        match child.name.as_str() {
            OWNER_TAG => {
                if child.is_leaf() {
                    security.clear_owner();
                } else {
                    security.set_owner(decode_owner(child)?)?;
                }
            }
            OWNER_PERMISSIONS_LIST_TAG => {
                for entry in child.children_named(OWNER_PERMISSIONS_TAG) {
                    security.add_owner_permissions(decode_owner_permissions(entry)?);
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn decode_owner(node: &XmlNode) -> Result<ElementOwner, CodecError> {
    let name = node
        .child(NAME_TAG)
        .ok_or_else(|| CodecError::Malformed("owner without <name>".into()))?;
    let owner_type = node
        .child(TYPE_TAG)
        .ok_or_else(|| CodecError::Malformed("owner without <type>".into()))?
        .text
        .trim()
        .parse::<OwnerType>()?;

    Ok(ElementOwner::new(name.text.as_str(), owner_type))
}

fn decode_owner_permissions(node: &XmlNode) -> Result<OwnerPermissions, CodecError> {
    let owner = node
        .child(OWNER_TAG)
        .ok_or_else(|| CodecError::Malformed("owner-permissions without <owner>".into()))?;
    let owner = decode_owner(owner)?;

    let mut permissions = Vec::new();
    if let Some(list) = node.child(PERMISSIONS_TAG) {
        for permission in list.children_named(PERMISSION_TAG) {
            permissions.push(permission.text.trim().parse::<Permission>()?);
        }
    }

    Ok(OwnerPermissions::new(owner, permissions))
}
