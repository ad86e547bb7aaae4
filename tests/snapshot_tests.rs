//! End-to-end snapshots: type declarations lowered into a store, imported,
//! serialized and printed back.

use futures::executor::block_on;
use onetyped::builder::{number, object, record, string, union};
use onetyped::syntax::{KeywordKind, Parameter, PropertySignature, TupleMember};
use onetyped::{
    ImportError, LiteralValue, SchemaNode, SourceContext, TypeAliasDeclaration, TypeId, TypeNode,
    TypeStore, from_type, lower_declarations, print_node, to_type_node,
};
use serde_json::{Value, json};

fn kw(kind: KeywordKind) -> TypeNode {
    TypeNode::keyword(kind)
}

fn import_alias(type_node: TypeNode) -> Result<SchemaNode, ImportError> {
    let declarations = vec![TypeAliasDeclaration {
        name: "Subject".to_string(),
        type_node,
    }];
    let mut store = TypeStore::new();
    let ids = lower_declarations(&mut store, &declarations).unwrap();
    let source = SourceContext::new("subject.ts");
    block_on(from_type(ids["Subject"], &source, &store))
}

fn import_json(type_node: TypeNode) -> Value {
    serde_json::to_value(import_alias(type_node).unwrap()).unwrap()
}

fn param(name: &str, kind: KeywordKind) -> Parameter {
    Parameter {
        name: name.to_string(),
        optional: false,
        type_node: kw(kind),
    }
}

/// `(a: number, b: string) => string`
fn number_string_to_string() -> TypeNode {
    TypeNode::Function {
        params: vec![
            param("a", KeywordKind::Number),
            param("b", KeywordKind::String),
        ],
        return_type: Box::new(kw(KeywordKind::String)),
    }
}

#[test]
fn test_mixed_object() {
    let node = TypeNode::TypeLiteral(vec![
        PropertySignature::new(
            "name",
            TypeNode::Intersection(vec![
                kw(KeywordKind::String),
                TypeNode::TypeLiteral(vec![PropertySignature::new(
                    "length",
                    kw(KeywordKind::Number),
                )]),
            ]),
        ),
        PropertySignature {
            optional: true,
            ..PropertySignature::new("age", kw(KeywordKind::Number))
        },
        PropertySignature::new("func", number_string_to_string()),
        PropertySignature::new(
            "role",
            TypeNode::Union(vec![
                TypeNode::Literal(LiteralValue::from("admin")),
                TypeNode::Literal(LiteralValue::from("user")),
            ]),
        ),
        PropertySignature::new(
            "t",
            TypeNode::Tuple(vec![
                TupleMember {
                    optional: false,
                    type_node: kw(KeywordKind::String),
                },
                TupleMember {
                    optional: false,
                    type_node: kw(KeywordKind::Number),
                },
                TupleMember {
                    optional: true,
                    type_node: kw(KeywordKind::Boolean),
                },
            ]),
        ),
        PropertySignature::new("d", number_string_to_string()),
        PropertySignature::new(
            "literal_string",
            TypeNode::Literal(LiteralValue::from("literal_string")),
        ),
    ]);
    let string = json!({ "typeName": "string", "type": "string" });
    let number = json!({ "typeName": "number", "type": "number" });
    let function = json!({
        "typeName": "function",
        "arguments": [number, string],
        "return": string
    });
    assert_eq!(
        import_json(node),
        json!({
            "typeName": "object",
            "shape": {
                "name": {
                    "typeName": "intersection",
                    "types": [
                        string,
                        { "typeName": "object", "shape": { "length": number } }
                    ]
                },
                "age": {
                    "typeName": "union",
                    "types": [number, { "typeName": "undefined", "type": "undefined" }]
                },
                "func": function,
                "role": {
                    "typeName": "union",
                    "types": [
                        { "typeName": "literal", "type": "admin" },
                        { "typeName": "literal", "type": "user" }
                    ]
                },
                "t": {
                    "typeName": "tuple",
                    "types": [
                        string,
                        number,
                        {
                            "typeName": "union",
                            "types": [
                                { "typeName": "boolean", "type": "boolean" },
                                { "typeName": "undefined", "type": "undefined" }
                            ]
                        }
                    ]
                },
                "d": function,
                "literal_string": { "typeName": "literal", "type": "literal_string" }
            }
        })
    );
}

#[test]
fn test_object_with_optional_property() {
    let node = TypeNode::TypeLiteral(vec![
        PropertySignature::new("name", kw(KeywordKind::String)),
        PropertySignature {
            optional: true,
            ..PropertySignature::new("age", kw(KeywordKind::Number))
        },
    ]);
    assert_eq!(
        import_json(node),
        json!({
            "typeName": "object",
            "shape": {
                "name": { "typeName": "string", "type": "string" },
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
fn test_function() {
    let node = TypeNode::Function {
        params: vec![
            param("a", KeywordKind::Number),
            param("b", KeywordKind::String),
        ],
        return_type: Box::new(kw(KeywordKind::String)),
    };
    assert_eq!(
        import_json(node),
        json!({
            "typeName": "function",
            "arguments": [
                { "typeName": "number", "type": "number" },
                { "typeName": "string", "type": "string" }
            ],
            "return": { "typeName": "string", "type": "string" }
        })
    );
}

#[test]
fn test_literal_union_order() {
    let node = TypeNode::Union(vec![
        TypeNode::Literal(LiteralValue::from("admin")),
        TypeNode::Literal(LiteralValue::from("user")),
    ]);
    assert_eq!(
        import_json(node),
        json!({
            "typeName": "union",
            "types": [
                { "typeName": "literal", "type": "admin" },
                { "typeName": "literal", "type": "user" }
            ]
        })
    );
}

#[test]
fn test_tuple_with_optional_element() {
    let node = TypeNode::Tuple(vec![
        TupleMember {
            optional: false,
            type_node: kw(KeywordKind::String),
        },
        TupleMember {
            optional: true,
            type_node: kw(KeywordKind::Number),
        },
    ]);
    assert_eq!(
        import_json(node),
        json!({
            "typeName": "tuple",
            "types": [
                { "typeName": "string", "type": "string" },
                {
                    "typeName": "union",
                    "types": [
                        { "typeName": "number", "type": "number" },
                        { "typeName": "undefined", "type": "undefined" }
                    ]
                }
            ]
        })
    );
}

#[test]
fn test_singletons() {
    assert_eq!(
        import_json(TypeNode::Literal(LiteralValue::Boolean(true))),
        json!({ "typeName": "literal", "type": true })
    );
    assert_eq!(
        import_json(TypeNode::Literal(LiteralValue::Boolean(false))),
        json!({ "typeName": "literal", "type": false })
    );
    assert_eq!(
        import_json(kw(KeywordKind::Boolean)),
        json!({ "typeName": "boolean", "type": "boolean" })
    );
    assert_eq!(
        import_json(kw(KeywordKind::Void)),
        json!({ "typeName": "void", "type": "void" })
    );
}

#[test]
fn test_record_intersection() {
    let node = TypeNode::Intersection(vec![
        TypeNode::TypeLiteral(vec![PropertySignature::new("name", kw(KeywordKind::String))]),
        TypeNode::generic("Record", vec![kw(KeywordKind::String), kw(KeywordKind::String)]),
    ]);
    assert_eq!(
        import_json(node),
        json!({
            "typeName": "intersection",
            "types": [
                {
                    "typeName": "object",
                    "shape": { "name": { "typeName": "string", "type": "string" } }
                },
                {
                    "typeName": "record",
                    "key": { "typeName": "string", "type": "string" },
                    "value": { "typeName": "string", "type": "string" }
                }
            ]
        })
    );
}

#[test]
fn test_recursive_alias_terminates_with_one_reference() {
    let node = TypeNode::TypeLiteral(vec![
        PropertySignature::new("name", kw(KeywordKind::String)),
        PropertySignature::new("age", TypeNode::reference("Subject")),
    ]);
    let imported = import_alias(node).unwrap();
    assert_eq!(imported.references(), vec!["Subject"]);
    assert_eq!(
        serde_json::to_value(&imported).unwrap(),
        json!({
            "typeName": "object",
            "shape": {
                "name": { "typeName": "string", "type": "string" },
                "age": { "typeName": "reference", "reference": "Subject" }
            },
            "identifier": "Subject"
        })
    );
}

#[test]
fn test_unsupported_type_names_the_file() {
    let err = import_alias(kw(KeywordKind::Any)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported type `any` in subject.ts"
    );
    assert!(matches!(err, ImportError::UnsupportedType { .. }));
    assert!(TypeId::ANY.is_intrinsic());
}

#[test]
fn test_printer_snapshot() {
    let node = object([
        ("name", string()),
        (
            "items",
            record(union(vec![string(), number()]).unwrap(), number()),
        ),
    ])
    .unwrap();
    assert_eq!(
        print_node(&to_type_node(&node).unwrap()),
        "{\n    name: string;\n    items: Record<string | number, number>;\n}"
    );
}
