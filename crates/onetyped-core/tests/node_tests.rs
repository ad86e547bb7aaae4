use super::*;
use crate::builder::{
    array, boolean, function, literal, number, object, record, reference, string, tuple, union,
    undefined, Options, number_with, string_with,
};

#[test]
fn test_type_name_matches_variant() {
    assert_eq!(string().type_name(), TypeName::String);
    assert_eq!(literal("x").type_name(), TypeName::Literal);
    assert_eq!(array(number()).type_name(), TypeName::Array);
    assert_eq!(record(string(), number()).type_name(), TypeName::Record);
    assert_eq!(reference("T").unwrap().type_name(), TypeName::Reference);
    assert!(TypeName::Void.is_primitive());
    assert!(!TypeName::Literal.is_primitive());
}

#[test]
fn test_children_follow_payload_order() {
    let func = function(vec![number(), string()], boolean());
    let names: Vec<TypeName> = func.children().iter().map(|c| c.type_name()).collect();
    assert_eq!(
        names,
        vec![TypeName::Number, TypeName::String, TypeName::Boolean]
    );

    let obj = object([("b", number()), ("a", string())]).unwrap();
    let names: Vec<TypeName> = obj.children().iter().map(|c| c.type_name()).collect();
    assert_eq!(names, vec![TypeName::Number, TypeName::String]);
}

#[test]
fn test_references_and_identifiers_are_collected_in_pre_order() {
    let node = object([
        ("name", string()),
        ("next", reference("Node").unwrap()),
        ("tags", array(reference("Tag").unwrap())),
    ])
    .unwrap()
    .with_identifier(Some("Node".to_string()));

    assert_eq!(node.references(), vec!["Node", "Tag"]);
    assert_eq!(node.identifiers(), vec!["Node"]);
}

#[test]
fn test_without_descriptions_keeps_structure_and_identifiers() {
    let described = object([
        ("id", string_with(Options::new().description("primary key"))),
        ("age", number_with(Options::new().optional().description("years"))),
    ])
    .unwrap()
    .with_description(Some("person".to_string()))
    .with_identifier(Some("Person".to_string()));

    let plain = object([("id", string()), ("age", number_with(Options::new().optional()))])
        .unwrap()
        .with_identifier(Some("Person".to_string()));

    assert_ne!(described, plain);
    assert_eq!(described.without_descriptions(), plain);
}

#[test]
fn test_is_optional_only_for_the_canonical_pattern() {
    assert!(union(vec![number(), undefined()]).unwrap().is_optional());
    assert!(!union(vec![undefined(), number()]).unwrap().is_optional());
    assert!(!union(vec![number(), string()]).unwrap().is_optional());
    assert!(
        !union(vec![number(), string(), undefined()])
            .unwrap()
            .is_optional()
    );
    assert!(!undefined().is_optional());
}

#[test]
fn test_display_renders_compact_type_syntax() {
    let node = object([
        ("name", string()),
        ("age", number_with(Options::new().optional())),
        (
            "role",
            union(vec![literal("admin"), literal("user")]).unwrap(),
        ),
        ("pair", tuple(vec![string(), number()])),
        (
            "cb",
            function(vec![number()], union(vec![string(), number()]).unwrap()),
        ),
    ])
    .unwrap();

    assert_eq!(
        node.to_string(),
        "{ name: string, age?: number, role: \"admin\" | \"user\", pair: [string, number], cb: (number) => string | number }"
    );
}

#[test]
fn test_literal_value_conversions() {
    assert_eq!(LiteralValue::from(true), LiteralValue::Boolean(true));
    assert_eq!(LiteralValue::from(3), LiteralValue::Number(3.0));
    assert_eq!(LiteralValue::from("a"), LiteralValue::String("a".to_string()));
}
