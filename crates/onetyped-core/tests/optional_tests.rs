use super::*;
use crate::builder::{literal, number, object, string, undefined, union};

#[test]
fn test_encode_wraps_with_trailing_undefined() {
    let encoded = encode_optional(number());
    let SchemaNode::Union(u) = &encoded else {
        panic!("expected union, got {encoded}");
    };
    assert_eq!(u.members(), &[number(), undefined()]);
}

#[test]
fn test_encode_is_idempotent() {
    let once = encode_optional(string());
    let twice = encode_optional(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_encode_keeps_wider_unions_that_admit_undefined() {
    let wide = union(vec![string(), number(), undefined()]).unwrap();
    assert_eq!(encode_optional(wide.clone()), wide);
}

#[test]
fn test_decode_inverts_encode() {
    let inner = object([("a", literal("x"))]).unwrap();
    let encoded = encode_optional(inner.clone());
    assert_eq!(decode_optional(&encoded), Some(&inner));
}

#[test]
fn test_decode_ignores_leading_undefined() {
    let node = union(vec![undefined(), string()]).unwrap();
    assert_eq!(decode_optional(&node), None);
}

#[test]
fn test_decode_rejects_other_unions() {
    assert_eq!(decode_optional(&union(vec![string(), number()]).unwrap()), None);
    assert_eq!(
        decode_optional(&union(vec![string(), number(), undefined()]).unwrap()),
        None
    );
    assert_eq!(decode_optional(&string()), None);
}

#[test]
fn test_admits_undefined_looks_through_nested_unions() {
    let nested = union(vec![
        string(),
        union(vec![number(), undefined()]).unwrap(),
    ])
    .unwrap();
    assert!(admits_undefined(&nested));
    assert!(admits_undefined(&undefined()));
    assert!(!admits_undefined(&string()));
}
