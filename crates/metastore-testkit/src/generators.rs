//! Proptest generators for property-based testing.

use proptest::prelude::*;

use metastore_core::{
    Attribute, AttributeValue, Element, ElementOwner, OwnerPermissions, OwnerType, Permission,
};

/// Generate an attribute or element identifier.
pub fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,15}".prop_map(String::from)
}

/// Generate a printable string value, including empty and padded strings.
pub fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.:/&<>-]{0,16}".prop_map(String::from)
}

/// Generate a scalar of any variant. Floats are finite.
pub fn value() -> impl Strategy<Value = AttributeValue> {
    prop_oneof![
        Just(AttributeValue::Null),
        text().prop_map(AttributeValue::String),
        any::<i64>().prop_map(AttributeValue::Integer),
        prop::num::f64::NORMAL.prop_map(AttributeValue::Float),
        any::<bool>().prop_map(AttributeValue::Boolean),
    ]
}

/// Generate an attribute tree up to three levels deep.
pub fn attribute() -> impl Strategy<Value = Attribute> {
    let leaf = (identifier(), value()).prop_map(|(id, v)| Attribute::new(id, v));
    leaf.prop_recursive(3, 24, 4, |inner| {
        (identifier(), value(), prop::collection::vec(inner, 0..4)).prop_map(
            |(id, v, children)| {
                let mut attribute = Attribute::new(id, v);
                attribute.set_children(children);
                attribute
            },
        )
    })
}

/// Generate an OwnerType.
pub fn owner_type() -> impl Strategy<Value = OwnerType> {
    prop_oneof![
        Just(OwnerType::User),
        Just(OwnerType::Role),
        Just(OwnerType::SystemRole),
    ]
}

/// Generate a Permission.
pub fn permission() -> impl Strategy<Value = Permission> {
    prop::sample::select(Permission::ALL.to_vec())
}

/// Generate an owner.
pub fn owner() -> impl Strategy<Value = ElementOwner> {
    ("[a-z][a-z0-9.]{0,11}", owner_type()).prop_map(|(name, t)| ElementOwner::new(name, t))
}

/// Generate a grant. Permission lists may repeat entries or be empty.
pub fn owner_permissions() -> impl Strategy<Value = OwnerPermissions> {
    (owner(), prop::collection::vec(permission(), 0..5))
        .prop_map(|(owner, permissions)| OwnerPermissions::new(owner, permissions))
}

/// Generate a complete element with an arbitrary security annex.
pub fn element() -> impl Strategy<Value = Element> {
    (
        identifier(),
        value(),
        prop::collection::vec(attribute(), 0..4),
        prop::option::of(owner()),
        prop::collection::vec(owner_permissions(), 0..4),
    )
        .prop_map(|(id, v, children, owner, grants)| {
            let mut element = Element::with_value(id, v);
            element.set_children(children);
            if let Some(owner) = owner {
                element.set_owner(owner).expect("ElementOwner is native");
            }
            element.set_owner_permissions(grants);
            element
        })
}
