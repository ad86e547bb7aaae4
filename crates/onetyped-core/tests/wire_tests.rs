use super::*;
use crate::builder::{
    array, boolean, function, literal, number, number_with, object, record, reference, string,
    tuple, union, Options,
};
use serde_json::json;

#[test]
fn test_optional_property_serializes_as_union_with_undefined() {
    let node = object([("age", number_with(Options::new().optional()))]).unwrap();
    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!({
            "typeName": "object",
            "shape": {
                "age": {
                    "typeName": "union",
                    "types": [
                        { "typeName": "number", "type": "number" },
                        { "typeName": "undefined", "type": "undefined" }
                    ]
                }
            }
        })
    );
}

#[test]
fn test_literals_keep_their_value_under_type() {
    assert_eq!(
        serde_json::to_value(literal(true)).unwrap(),
        json!({ "typeName": "literal", "type": true })
    );
    assert_eq!(
        serde_json::to_value(literal("admin")).unwrap(),
        json!({ "typeName": "literal", "type": "admin" })
    );
    assert_eq!(
        serde_json::to_value(literal(2.5)).unwrap(),
        json!({ "typeName": "literal", "type": 2.5 })
    );
}

#[test]
fn test_function_record_and_array_payloads() {
    let node = function(
        vec![record(string(), number()), array(boolean())],
        reference("T").unwrap(),
    );
    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!({
            "typeName": "function",
            "arguments": [
                {
                    "typeName": "record",
                    "key": { "typeName": "string", "type": "string" },
                    "value": { "typeName": "number", "type": "number" }
                },
                {
                    "typeName": "array",
                    "types": [{ "typeName": "boolean", "type": "boolean" }]
                }
            ],
            "return": { "typeName": "reference", "reference": "T" }
        })
    );
}

#[test]
fn test_metadata_is_emitted_only_when_present() {
    let node = string()
        .with_description(Some("display name".to_string()))
        .with_identifier(Some("Name".to_string()));
    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!({
            "typeName": "string",
            "type": "string",
            "description": "display name",
            "identifier": "Name"
        })
    );
}

#[test]
fn test_decode_restores_the_same_tree() {
    let node = object([
        ("role", union(vec![literal("admin"), literal("user")]).unwrap()),
        ("pair", tuple(vec![string(), number_with(Options::new().optional())])),
        ("tags", array(string())),
    ])
    .unwrap()
    .with_identifier(Some("Person".to_string()));

    let text = serde_json::to_string(&node).unwrap();
    let decoded: SchemaNode = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, node);
}

#[test]
fn test_decode_accepts_primitives_without_echo() {
    let node: SchemaNode = serde_json::from_value(json!({ "typeName": "number" })).unwrap();
    assert_eq!(node, number());
}

#[test]
fn test_decode_rejects_mismatching_echo() {
    let err = serde_json::from_value::<SchemaNode>(json!({ "typeName": "number", "type": "string" }))
        .unwrap_err();
    assert!(err.to_string().contains("mismatching type echo"), "{err}");
}

#[test]
fn test_decode_rejects_cross_variant_fields() {
    let err = serde_json::from_value::<SchemaNode>(json!({
        "typeName": "string",
        "shape": {}
    }))
    .unwrap_err();
    assert!(err.to_string().contains("does not accept field `shape`"), "{err}");
}

#[test]
fn test_decode_rejects_single_member_union() {
    let err = serde_json::from_value::<SchemaNode>(json!({
        "typeName": "union",
        "types": [{ "typeName": "string" }]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("at least two members"), "{err}");
}

#[test]
fn test_decode_rejects_array_with_two_element_types() {
    let err = serde_json::from_value::<SchemaNode>(json!({
        "typeName": "array",
        "types": [{ "typeName": "string" }, { "typeName": "number" }]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("exactly one element type"), "{err}");
}

#[test]
fn test_decode_reports_missing_payload() {
    let err = serde_json::from_value::<SchemaNode>(json!({
        "typeName": "record",
        "key": { "typeName": "string" }
    }))
    .unwrap_err();
    assert!(err.to_string().contains("missing field `value`"), "{err}");
}
