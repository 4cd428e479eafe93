//! The recursive attribute tree.
//!
//! An [`Attribute`] is an identifier, a scalar [`AttributeValue`] and an
//! ordered list of child attributes. Parents own their children outright;
//! there are no back-references, so a tree is always finite and acyclic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar of dynamic type carried by an attribute.
///
/// Integer and floating-point values are distinct variants so that a value
/// never changes type on a save/load round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    #[default]
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl AttributeValue {
    /// Name of the value's type, or `None` for [`AttributeValue::Null`].
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            AttributeValue::Null => None,
            AttributeValue::String(_) => Some("String"),
            AttributeValue::Integer(_) => Some("Integer"),
            AttributeValue::Float(_) => Some("Float"),
            AttributeValue::Boolean(_) => Some("Boolean"),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Textual form of the value. `Null` renders as the empty string.
///
/// Floats use the shortest representation that parses back to the same
/// `f64`.
impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => Ok(()),
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<i32> for AttributeValue {
    fn from(i: i32) -> Self {
        AttributeValue::Integer(i64::from(i))
    }
}

impl From<f64> for AttributeValue {
    fn from(f: f64) -> Self {
        AttributeValue::Float(f)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(AttributeValue::Null)
    }
}

/// A node in the attribute tree.
///
/// Sibling ids are expected to be unique but this is not enforced:
/// [`Attribute::find_child`] returns the first match in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    id: String,
    value: AttributeValue,
    children: Vec<Attribute>,
}

impl Attribute {
    /// Create a childless attribute.
    pub fn new(id: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Attribute::add_child`].
    pub fn with_child(mut self, child: Attribute) -> Self {
        self.children.push(child);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<AttributeValue>) {
        self.value = value.into();
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[Attribute] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.children
    }

    /// Replace all children.
    pub fn set_children(&mut self, children: Vec<Attribute>) {
        self.children = children;
    }

    /// Append a child at the end.
    pub fn add_child(&mut self, child: Attribute) {
        self.children.push(child);
    }

    /// First direct child with the given id.
    pub fn find_child(&self, id: &str) -> Option<&Attribute> {
        self.children.iter().find(|c| c.id == id)
    }

    pub fn find_child_mut(&mut self, id: &str) -> Option<&mut Attribute> {
        self.children.iter_mut().find(|c| c.id == id)
    }

    /// Remove and return the first direct child with the given id.
    pub fn remove_child(&mut self, id: &str) -> Option<Attribute> {
        let pos = self.children.iter().position(|c| c.id == id)?;
        Some(self.children.remove(pos))
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Number of attributes below this one, at any depth.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_names() {
        assert_eq!(AttributeValue::Null.type_name(), None);
        assert_eq!(AttributeValue::from("x").type_name(), Some("String"));
        assert_eq!(AttributeValue::from(3i64).type_name(), Some("Integer"));
        assert_eq!(AttributeValue::from(3.5).type_name(), Some("Float"));
        assert_eq!(AttributeValue::from(true).type_name(), Some("Boolean"));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(AttributeValue::Null.to_string(), "");
        assert_eq!(AttributeValue::from(-42i64).to_string(), "-42");
        assert_eq!(AttributeValue::from(0.1).to_string(), "0.1");
        assert_eq!(AttributeValue::from(false).to_string(), "false");
    }

    #[test]
    fn test_integer_and_float_stay_distinct() {
        assert_ne!(AttributeValue::Integer(1), AttributeValue::Float(1.0));
    }

    #[test]
    fn test_option_into_value() {
        let none: Option<i64> = None;
        assert!(AttributeValue::from(none).is_null());
        assert_eq!(AttributeValue::from(Some("a")), AttributeValue::from("a"));
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut root = Attribute::new("root", AttributeValue::Null);
        root.add_child(Attribute::new("b", 2i64));
        root.add_child(Attribute::new("a", 1i64));
        root.add_child(Attribute::new("c", 3i64));

        let ids: Vec<&str> = root.children().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_find_and_remove_child() {
        let mut root = Attribute::new("root", "r")
            .with_child(Attribute::new("host", "localhost"))
            .with_child(Attribute::new("port", 5432i64));

        assert_eq!(root.find_child("port").unwrap().value().as_i64(), Some(5432));
        assert!(root.find_child("missing").is_none());

        root.find_child_mut("host").unwrap().set_value("db.internal");
        assert_eq!(root.find_child("host").unwrap().value().as_str(), Some("db.internal"));

        let removed = root.remove_child("host").unwrap();
        assert_eq!(removed.id(), "host");
        assert_eq!(root.children().len(), 1);
        assert!(root.remove_child("host").is_none());
    }

    #[test]
    fn test_descendant_count() {
        let root = Attribute::new("root", AttributeValue::Null)
            .with_child(Attribute::new("a", 1i64).with_child(Attribute::new("a1", 2i64)))
            .with_child(Attribute::new("b", 3i64));

        assert_eq!(root.descendant_count(), 3);
    }

    #[test]
    fn test_value_serde_keeps_variant() {
        let value = AttributeValue::Float(2.0);
        let json = serde_json::to_string(&value).unwrap();
        let back: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
