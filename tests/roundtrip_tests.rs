//! factory → declarations → lowering → import must give back the same tree.

use futures::executor::block_on;
use onetyped::builder::{
    array, boolean, function, intersection, literal, number, number_with, object, object_with,
    record, reference, string, string_with, tuple, undefined, union, void, Options,
};
use onetyped::{
    SchemaNode, SourceContext, TypeStore, from_type, lower_declarations, print_declarations,
    to_declarations,
};

fn round_trip(node: &SchemaNode) -> SchemaNode {
    let declarations = to_declarations("Root", node).unwrap();
    let mut store = TypeStore::new();
    let ids = lower_declarations(&mut store, &declarations).unwrap();
    let root = ids[declarations[0].name.as_str()];
    let source = SourceContext::new("roundtrip.ts");
    block_on(from_type(root, &source, &store)).unwrap_or_else(|err| {
        panic!(
            "import failed: {err}\n{}",
            print_declarations(&declarations)
        )
    })
}

fn assert_round_trip(node: SchemaNode) {
    let back = round_trip(&node);
    assert_eq!(back.without_descriptions(), node.without_descriptions());
}

#[test]
fn test_flat_object() {
    assert_round_trip(
        object([
            ("name", string()),
            ("age", number_with(Options::new().optional())),
            ("active", boolean()),
            ("role", union(vec![literal("admin"), literal("user")]).unwrap()),
            ("level", literal(3)),
            ("verified", literal(true)),
        ])
        .unwrap(),
    );
}

#[test]
fn test_collections() {
    assert_round_trip(
        object([
            ("tags", array(string())),
            (
                "pair",
                tuple(vec![string(), number_with(Options::new().optional())]),
            ),
            ("empty", tuple(Vec::new())),
            ("scores", record(string(), number())),
            (
                "items",
                record(union(vec![string(), number()]).unwrap(), number()),
            ),
            ("nothing", object(Vec::<(String, SchemaNode)>::new()).unwrap()),
        ])
        .unwrap(),
    );
}

#[test]
fn test_leading_undefined_keeps_member_order() {
    assert_round_trip(object([("x", union(vec![undefined(), string()]).unwrap())]).unwrap());
    assert_round_trip(tuple(vec![
        string(),
        union(vec![undefined(), number()]).unwrap(),
    ]));
}

#[test]
fn test_functions() {
    assert_round_trip(function(
        vec![number(), string_with(Options::new().optional())],
        union(vec![string(), number()]).unwrap(),
    ));
    assert_round_trip(function(Vec::new(), void()));
}

#[test]
fn test_intersection_with_record() {
    assert_round_trip(
        intersection(vec![
            object([("name", string())]).unwrap(),
            record(string(), string()),
        ])
        .unwrap(),
    );
}

#[test]
fn test_self_recursive_root() {
    assert_round_trip(
        object_with(
            [("name", string()), ("age", reference("T").unwrap())],
            Options::new().identifier("T"),
        )
        .unwrap(),
    );
}

#[test]
fn test_recursion_through_an_unnamed_object() {
    assert_round_trip(
        object_with(
            [(
                "b",
                object([("a", reference("A").unwrap())]).unwrap(),
            )],
            Options::new().identifier("A"),
        )
        .unwrap(),
    );
}

#[test]
fn test_nested_recursive_alias() {
    let tree = object_with(
        [
            ("label", string()),
            ("children", array(reference("Tree").unwrap())),
        ],
        Options::new().identifier("Tree"),
    )
    .unwrap();
    assert_round_trip(object([("tree", tree), ("count", number())]).unwrap());
}

#[test]
fn test_hoisted_alias_keeps_its_identifier() {
    let person = object_with(
        [("name", string()), ("age", number_with(Options::new().optional()))],
        Options::new().identifier("Person"),
    )
    .unwrap();
    let node = object([("owner", person), ("size", number())]).unwrap();
    let declarations = to_declarations("Root", &node).unwrap();
    assert_eq!(declarations.len(), 2);
    assert_eq!(declarations[1].name, "Person");
    assert_round_trip(node);
}

#[test]
fn test_descriptions_survive() {
    let node = object([
        ("name", string_with(Options::new().description("Display name"))),
        (
            "age",
            number_with(Options::new().optional().description("Age in years")),
        ),
    ])
    .unwrap();
    assert_eq!(round_trip(&node), node);
}
