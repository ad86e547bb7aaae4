//! Serialized form of [`SchemaNode`].
//!
//! A node serializes to a flat map keyed by `typeName`:
//!
//! ```json
//! { "typeName": "union", "types": [
//!     { "typeName": "number", "type": "number" },
//!     { "typeName": "undefined", "type": "undefined" }
//! ] }
//! ```
//!
//! Primitives echo their discriminant under `type`; literals keep their
//! value there. Decoding goes through [`RawNode`] and rejects any payload
//! field that does not belong to the declared `typeName`.

use crate::builder::composite;
use crate::error::ConstructionError;
use crate::node::{
    ArrayNode, Defaults, FunctionNode, LiteralNode, LiteralValue, ObjectNode, RecordNode,
    ReferenceNode, SchemaNode, TupleNode, TypeName,
};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("typeName", &self.type_name())?;
        match self {
            Self::String(_)
            | Self::Number(_)
            | Self::Boolean(_)
            | Self::Void(_)
            | Self::Undefined(_) => map.serialize_entry("type", self.type_name().as_str())?,
            Self::Literal(n) => map.serialize_entry("type", &n.value)?,
            Self::Object(n) => map.serialize_entry("shape", &n.shape)?,
            Self::Array(n) => map.serialize_entry("types", std::slice::from_ref(n.element.as_ref()))?,
            Self::Tuple(n) => map.serialize_entry("types", &n.elements)?,
            Self::Union(n) | Self::Intersection(n) => map.serialize_entry("types", &n.members)?,
            Self::Record(n) => {
                map.serialize_entry("key", &n.key)?;
                map.serialize_entry("value", &n.value)?;
            }
            Self::Function(n) => {
                map.serialize_entry("arguments", &n.arguments)?;
                map.serialize_entry("return", &n.returns)?;
            }
            Self::Reference(n) => map.serialize_entry("reference", &n.target)?,
        }
        let defaults = self.defaults();
        if let Some(description) = &defaults.description {
            map.serialize_entry("description", description)?;
        }
        if let Some(identifier) = &defaults.identifier {
            map.serialize_entry("identifier", identifier)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawNode::deserialize(deserializer)?;
        SchemaNode::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Field-by-field view of a serialized node, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawNode {
    type_name: TypeName,
    #[serde(rename = "type", default)]
    tag: Option<LiteralValue>,
    #[serde(default)]
    shape: Option<IndexMap<String, SchemaNode>>,
    #[serde(default)]
    types: Option<Vec<SchemaNode>>,
    #[serde(default)]
    key: Option<Box<SchemaNode>>,
    #[serde(default)]
    value: Option<Box<SchemaNode>>,
    #[serde(default)]
    arguments: Option<Vec<SchemaNode>>,
    #[serde(rename = "return", default)]
    returns: Option<Box<SchemaNode>>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    identifier: Option<String>,
}

impl RawNode {
    fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.tag.is_some() {
            fields.push("type");
        }
        if self.shape.is_some() {
            fields.push("shape");
        }
        if self.types.is_some() {
            fields.push("types");
        }
        if self.key.is_some() {
            fields.push("key");
        }
        if self.value.is_some() {
            fields.push("value");
        }
        if self.arguments.is_some() {
            fields.push("arguments");
        }
        if self.returns.is_some() {
            fields.push("return");
        }
        if self.reference.is_some() {
            fields.push("reference");
        }
        fields
    }
}

/// Payload fields each variant accepts. `type` is optional for primitives.
fn accepted_fields(type_name: TypeName) -> &'static [&'static str] {
    match type_name {
        TypeName::String
        | TypeName::Number
        | TypeName::Boolean
        | TypeName::Void
        | TypeName::Undefined
        | TypeName::Literal => &["type"],
        TypeName::Object => &["shape"],
        TypeName::Array | TypeName::Tuple | TypeName::Union | TypeName::Intersection => &["types"],
        TypeName::Record => &["key", "value"],
        TypeName::Function => &["arguments", "return"],
        TypeName::Reference => &["reference"],
    }
}

fn missing(type_name: TypeName, field: &'static str) -> ConstructionError {
    ConstructionError::MissingField { type_name, field }
}

impl TryFrom<RawNode> for SchemaNode {
    type Error = ConstructionError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let type_name = raw.type_name;
        let accepted = accepted_fields(type_name);
        if let Some(field) = raw
            .present_fields()
            .into_iter()
            .find(|field| !accepted.contains(field))
        {
            return Err(ConstructionError::UnexpectedField { type_name, field });
        }

        let defaults = Defaults {
            description: raw.description,
            identifier: raw.identifier,
        };

        if type_name.is_primitive() {
            match &raw.tag {
                None => {}
                Some(LiteralValue::String(echo)) if echo == type_name.as_str() => {}
                Some(other) => {
                    return Err(ConstructionError::TypeEchoMismatch {
                        type_name,
                        found: other.to_string(),
                    });
                }
            }
        }

        let node = match type_name {
            TypeName::String => SchemaNode::String(defaults),
            TypeName::Number => SchemaNode::Number(defaults),
            TypeName::Boolean => SchemaNode::Boolean(defaults),
            TypeName::Void => SchemaNode::Void(defaults),
            TypeName::Undefined => SchemaNode::Undefined(defaults),
            TypeName::Literal => SchemaNode::Literal(LiteralNode {
                value: raw.tag.ok_or_else(|| missing(type_name, "type"))?,
                defaults,
            }),
            TypeName::Object => SchemaNode::Object(ObjectNode {
                shape: raw.shape.ok_or_else(|| missing(type_name, "shape"))?,
                defaults,
            }),
            TypeName::Array => {
                let mut types = raw.types.ok_or_else(|| missing(type_name, "types"))?;
                if types.len() != 1 {
                    return Err(ConstructionError::ArrayArity { found: types.len() });
                }
                SchemaNode::Array(ArrayNode {
                    element: Box::new(types.remove(0)),
                    defaults,
                })
            }
            TypeName::Tuple => SchemaNode::Tuple(TupleNode {
                elements: raw.types.ok_or_else(|| missing(type_name, "types"))?,
                defaults,
            }),
            TypeName::Union | TypeName::Intersection => {
                let members = raw.types.ok_or_else(|| missing(type_name, "types"))?;
                let mut node = composite(type_name, members)?;
                node.defaults = defaults;
                if type_name == TypeName::Union {
                    SchemaNode::Union(node)
                } else {
                    SchemaNode::Intersection(node)
                }
            }
            TypeName::Record => SchemaNode::Record(RecordNode {
                key: raw.key.ok_or_else(|| missing(type_name, "key"))?,
                value: raw.value.ok_or_else(|| missing(type_name, "value"))?,
                defaults,
            }),
            TypeName::Function => SchemaNode::Function(FunctionNode {
                arguments: raw.arguments.ok_or_else(|| missing(type_name, "arguments"))?,
                returns: raw.returns.ok_or_else(|| missing(type_name, "return"))?,
                defaults,
            }),
            TypeName::Reference => {
                let target = raw.reference.ok_or_else(|| missing(type_name, "reference"))?;
                if target.is_empty() {
                    return Err(ConstructionError::EmptyIdentifier);
                }
                SchemaNode::Reference(ReferenceNode { target, defaults })
            }
        };
        Ok(node)
    }
}

#[cfg(test)]
#[path = "../tests/wire_tests.rs"]
mod tests;
