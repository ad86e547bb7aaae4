//! Node factory.
//!
//! One constructor per variant. The plain form (`string()`) builds a node
//! with empty [`Defaults`]; the `_with` form takes [`Options`].
//!
//! ```ignore
//! use onetyped_core::builder::*;
//!
//! let person = object([
//!     ("name", string()),
//!     ("age", number_with(Options::new().optional())),
//! ])?;
//! ```
//!
//! Only structurally invalid combinations fail, and they fail here rather
//! than later during export.

use crate::error::ConstructionError;
use crate::node::{
    ArrayNode, CompositeNode, Defaults, FunctionNode, LiteralNode, LiteralValue, ObjectNode,
    RecordNode, ReferenceNode, SchemaNode, TupleNode, TypeName,
};
use crate::optional::encode_optional;
use indexmap::IndexMap;
use indexmap::map::Entry;

/// Shared constructor options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    optional: bool,
    description: Option<String>,
    identifier: Option<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the node as `union(node, undefined)`.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Name the node so `reference(identifier)` can point at it.
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    // The identifier stays on the structural node; the description goes on
    // whatever the member ends up being (the optional union when optional).
    fn apply(self, node: SchemaNode) -> SchemaNode {
        let node = node.with_identifier(self.identifier);
        let node = if self.optional {
            encode_optional(node)
        } else {
            node
        };
        match self.description {
            Some(description) => node.with_description(Some(description)),
            None => node,
        }
    }
}

// =============================================================================
// Primitives
// =============================================================================

pub fn string() -> SchemaNode {
    SchemaNode::String(Defaults::default())
}

pub fn string_with(options: Options) -> SchemaNode {
    options.apply(string())
}

pub fn number() -> SchemaNode {
    SchemaNode::Number(Defaults::default())
}

pub fn number_with(options: Options) -> SchemaNode {
    options.apply(number())
}

pub fn boolean() -> SchemaNode {
    SchemaNode::Boolean(Defaults::default())
}

pub fn boolean_with(options: Options) -> SchemaNode {
    options.apply(boolean())
}

pub fn void() -> SchemaNode {
    SchemaNode::Void(Defaults::default())
}

pub fn void_with(options: Options) -> SchemaNode {
    options.apply(void())
}

pub fn undefined() -> SchemaNode {
    SchemaNode::Undefined(Defaults::default())
}

/// `optional()` leaves the node as is: `undefined` already admits itself.
pub fn undefined_with(options: Options) -> SchemaNode {
    options.apply(undefined())
}

pub fn literal(value: impl Into<LiteralValue>) -> SchemaNode {
    SchemaNode::Literal(LiteralNode {
        value: value.into(),
        defaults: Defaults::default(),
    })
}

pub fn literal_with(value: impl Into<LiteralValue>, options: Options) -> SchemaNode {
    options.apply(literal(value))
}

// =============================================================================
// Structured nodes
// =============================================================================

/// Builds an object; properties keep the iteration order of `shape`.
pub fn object<K: Into<String>>(
    shape: impl IntoIterator<Item = (K, SchemaNode)>,
) -> Result<SchemaNode, ConstructionError> {
    let mut map = IndexMap::new();
    for (name, node) in shape {
        match map.entry(name.into()) {
            Entry::Occupied(entry) => {
                return Err(ConstructionError::DuplicateProperty {
                    name: entry.key().clone(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(node);
            }
        }
    }
    Ok(SchemaNode::Object(ObjectNode {
        shape: map,
        defaults: Defaults::default(),
    }))
}

pub fn object_with<K: Into<String>>(
    shape: impl IntoIterator<Item = (K, SchemaNode)>,
    options: Options,
) -> Result<SchemaNode, ConstructionError> {
    object(shape).map(|node| options.apply(node))
}

pub fn array(element: SchemaNode) -> SchemaNode {
    SchemaNode::Array(ArrayNode {
        element: Box::new(element),
        defaults: Defaults::default(),
    })
}

pub fn array_with(element: SchemaNode, options: Options) -> SchemaNode {
    options.apply(array(element))
}

/// Builds a fixed-length tuple. The empty tuple is valid.
pub fn tuple(elements: Vec<SchemaNode>) -> SchemaNode {
    SchemaNode::Tuple(TupleNode {
        elements,
        defaults: Defaults::default(),
    })
}

pub fn tuple_with(elements: Vec<SchemaNode>, options: Options) -> SchemaNode {
    options.apply(tuple(elements))
}

pub fn union(members: Vec<SchemaNode>) -> Result<SchemaNode, ConstructionError> {
    composite(TypeName::Union, members).map(SchemaNode::Union)
}

pub fn union_with(
    members: Vec<SchemaNode>,
    options: Options,
) -> Result<SchemaNode, ConstructionError> {
    union(members).map(|node| options.apply(node))
}

pub fn intersection(members: Vec<SchemaNode>) -> Result<SchemaNode, ConstructionError> {
    composite(TypeName::Intersection, members).map(SchemaNode::Intersection)
}

pub fn intersection_with(
    members: Vec<SchemaNode>,
    options: Options,
) -> Result<SchemaNode, ConstructionError> {
    intersection(members).map(|node| options.apply(node))
}

pub(crate) fn composite(
    type_name: TypeName,
    members: Vec<SchemaNode>,
) -> Result<CompositeNode, ConstructionError> {
    if members.len() < 2 {
        return Err(ConstructionError::TooFewMembers {
            type_name,
            found: members.len(),
        });
    }
    Ok(CompositeNode {
        members,
        defaults: Defaults::default(),
    })
}

pub fn record(key: SchemaNode, value: SchemaNode) -> SchemaNode {
    SchemaNode::Record(RecordNode {
        key: Box::new(key),
        value: Box::new(value),
        defaults: Defaults::default(),
    })
}

pub fn record_with(key: SchemaNode, value: SchemaNode, options: Options) -> SchemaNode {
    options.apply(record(key, value))
}

pub fn function(arguments: Vec<SchemaNode>, returns: SchemaNode) -> SchemaNode {
    SchemaNode::Function(FunctionNode {
        arguments,
        returns: Box::new(returns),
        defaults: Defaults::default(),
    })
}

pub fn function_with(arguments: Vec<SchemaNode>, returns: SchemaNode, options: Options) -> SchemaNode {
    options.apply(function(arguments, returns))
}

/// Back-reference to the node carrying `identifier`.
pub fn reference(identifier: impl Into<String>) -> Result<SchemaNode, ConstructionError> {
    let target = identifier.into();
    if target.is_empty() {
        return Err(ConstructionError::EmptyIdentifier);
    }
    Ok(SchemaNode::Reference(ReferenceNode {
        target,
        defaults: Defaults::default(),
    }))
}

pub fn reference_with(
    identifier: impl Into<String>,
    options: Options,
) -> Result<SchemaNode, ConstructionError> {
    reference(identifier).map(|node| options.apply(node))
}

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod tests;
