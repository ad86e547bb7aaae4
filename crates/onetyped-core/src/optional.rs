//! The optional-union pattern.
//!
//! An optional member (object property, tuple element, function parameter)
//! is encoded as `union(T, undefined)`. [`encode_optional`] and
//! [`decode_optional`] are exact inverses on that pattern and are the only
//! place the encoding is spelled out.

use crate::node::{CompositeNode, Defaults, SchemaNode};

/// Wraps `node` into the optional-union pattern.
///
/// Idempotent: a node that already admits `undefined` is returned as is, so
/// a checker that reports `T | undefined` for an optional member does not
/// produce `(T | undefined) | undefined`.
pub fn encode_optional(node: SchemaNode) -> SchemaNode {
    if admits_undefined(&node) {
        return node;
    }
    SchemaNode::Union(CompositeNode {
        members: vec![node, SchemaNode::Undefined(Defaults::default())],
        defaults: Defaults::default(),
    })
}

/// Returns `T` if `node` is exactly `union(T, undefined)`.
///
/// `undefined` must come last, the position [`encode_optional`] puts it in.
/// `union(undefined, T)` is an ordinary union and keeps its member order.
pub fn decode_optional(node: &SchemaNode) -> Option<&SchemaNode> {
    let SchemaNode::Union(union) = node else {
        return None;
    };
    match union.members.as_slice() {
        [inner, SchemaNode::Undefined(_)] => Some(inner),
        _ => None,
    }
}

/// Whether `undefined` is assignable to `node` at the top level.
pub fn admits_undefined(node: &SchemaNode) -> bool {
    match node {
        SchemaNode::Undefined(_) => true,
        SchemaNode::Union(union) => union.members.iter().any(admits_undefined),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/optional_tests.rs"]
mod tests;
