//! Canonical schema tree.
//!
//! A [`SchemaNode`] describes one fragment of a data shape. The variant is
//! the single source of truth for how a node is interpreted: every variant
//! carries exactly the payload its `typeName` needs plus the shared
//! [`Defaults`] block.
//!
//! # Ownership
//!
//! Nodes form a tree with exclusive parent → child ownership. The only
//! exception is [`SchemaNode::Reference`], a non-owning back-reference that
//! names another node of the same tree through its
//! [`Defaults::identifier`].
//!
//! # Optionality
//!
//! There is no "optional" variant. An optional member is a two-member union
//! of its type and `undefined`; see [`crate::optional`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Discriminant
// =============================================================================

/// The `typeName` discriminant of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeName {
    String,
    Number,
    Boolean,
    Literal,
    Void,
    Undefined,
    Object,
    Array,
    Tuple,
    Union,
    Intersection,
    Record,
    Function,
    Reference,
}

impl TypeName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Literal => "literal",
            Self::Void => "void",
            Self::Undefined => "undefined",
            Self::Object => "object",
            Self::Array => "array",
            Self::Tuple => "tuple",
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Record => "record",
            Self::Function => "function",
            Self::Reference => "reference",
        }
    }

    /// Primitives carry no payload besides their `type` echo.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::String | Self::Number | Self::Boolean | Self::Void | Self::Undefined
        )
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Shared metadata
// =============================================================================

/// Metadata mixed into every node regardless of variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    /// Free-form documentation. Cosmetic: ignored by structural comparison.
    pub description: Option<String>,
    /// Name under which [`SchemaNode::Reference`] nodes refer to this node.
    pub identifier: Option<String>,
}

impl Defaults {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.identifier.is_none()
    }
}

/// The exact value of a `literal` node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

// =============================================================================
// Variant payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    pub(crate) value: LiteralValue,
    pub(crate) defaults: Defaults,
}

impl LiteralNode {
    pub fn value(&self) -> &LiteralValue {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    pub(crate) shape: IndexMap<String, SchemaNode>,
    pub(crate) defaults: Defaults,
}

impl ObjectNode {
    /// Properties in insertion order.
    pub fn shape(&self) -> &IndexMap<String, SchemaNode> {
        &self.shape
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayNode {
    pub(crate) element: Box<SchemaNode>,
    pub(crate) defaults: Defaults,
}

impl ArrayNode {
    pub fn element(&self) -> &SchemaNode {
        &self.element
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleNode {
    pub(crate) elements: Vec<SchemaNode>,
    pub(crate) defaults: Defaults,
}

impl TupleNode {
    pub fn elements(&self) -> &[SchemaNode] {
        &self.elements
    }
}

/// Payload of `union` and `intersection`: two or more ordered members.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeNode {
    pub(crate) members: Vec<SchemaNode>,
    pub(crate) defaults: Defaults,
}

impl CompositeNode {
    pub fn members(&self) -> &[SchemaNode] {
        &self.members
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordNode {
    pub(crate) key: Box<SchemaNode>,
    pub(crate) value: Box<SchemaNode>,
    pub(crate) defaults: Defaults,
}

impl RecordNode {
    pub fn key(&self) -> &SchemaNode {
        &self.key
    }

    pub fn value(&self) -> &SchemaNode {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    pub(crate) arguments: Vec<SchemaNode>,
    pub(crate) returns: Box<SchemaNode>,
    pub(crate) defaults: Defaults,
}

impl FunctionNode {
    pub fn arguments(&self) -> &[SchemaNode] {
        &self.arguments
    }

    pub fn returns(&self) -> &SchemaNode {
        &self.returns
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceNode {
    pub(crate) target: String,
    pub(crate) defaults: Defaults,
}

impl ReferenceNode {
    /// Identifier of the node this reference stands in for.
    pub fn target(&self) -> &str {
        &self.target
    }
}

// =============================================================================
// SchemaNode
// =============================================================================

/// Canonical IR node describing one data shape fragment.
///
/// Nodes are built through the factory in [`crate::builder`] (or decoded
/// from their serialized form) and are read-only afterwards. Deriving a
/// node (e.g. [`SchemaNode::with_identifier`]) consumes the original.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    String(Defaults),
    Number(Defaults),
    Boolean(Defaults),
    Void(Defaults),
    Undefined(Defaults),
    Literal(LiteralNode),
    Object(ObjectNode),
    Array(ArrayNode),
    Tuple(TupleNode),
    Union(CompositeNode),
    Intersection(CompositeNode),
    Record(RecordNode),
    Function(FunctionNode),
    Reference(ReferenceNode),
}

impl SchemaNode {
    pub fn type_name(&self) -> TypeName {
        match self {
            Self::String(_) => TypeName::String,
            Self::Number(_) => TypeName::Number,
            Self::Boolean(_) => TypeName::Boolean,
            Self::Void(_) => TypeName::Void,
            Self::Undefined(_) => TypeName::Undefined,
            Self::Literal(_) => TypeName::Literal,
            Self::Object(_) => TypeName::Object,
            Self::Array(_) => TypeName::Array,
            Self::Tuple(_) => TypeName::Tuple,
            Self::Union(_) => TypeName::Union,
            Self::Intersection(_) => TypeName::Intersection,
            Self::Record(_) => TypeName::Record,
            Self::Function(_) => TypeName::Function,
            Self::Reference(_) => TypeName::Reference,
        }
    }

    pub fn defaults(&self) -> &Defaults {
        match self {
            Self::String(d) | Self::Number(d) | Self::Boolean(d) | Self::Void(d) => d,
            Self::Undefined(d) => d,
            Self::Literal(n) => &n.defaults,
            Self::Object(n) => &n.defaults,
            Self::Array(n) => &n.defaults,
            Self::Tuple(n) => &n.defaults,
            Self::Union(n) | Self::Intersection(n) => &n.defaults,
            Self::Record(n) => &n.defaults,
            Self::Function(n) => &n.defaults,
            Self::Reference(n) => &n.defaults,
        }
    }

    fn defaults_mut(&mut self) -> &mut Defaults {
        match self {
            Self::String(d) | Self::Number(d) | Self::Boolean(d) | Self::Void(d) => d,
            Self::Undefined(d) => d,
            Self::Literal(n) => &mut n.defaults,
            Self::Object(n) => &mut n.defaults,
            Self::Array(n) => &mut n.defaults,
            Self::Tuple(n) => &mut n.defaults,
            Self::Union(n) | Self::Intersection(n) => &mut n.defaults,
            Self::Record(n) => &mut n.defaults,
            Self::Function(n) => &mut n.defaults,
            Self::Reference(n) => &mut n.defaults,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.defaults().description.as_deref()
    }

    pub fn identifier(&self) -> Option<&str> {
        self.defaults().identifier.as_deref()
    }

    /// Returns this node with `description` replaced.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.defaults_mut().description = description;
        self
    }

    /// Returns this node with `identifier` replaced.
    pub fn with_identifier(mut self, identifier: Option<String>) -> Self {
        self.defaults_mut().identifier = identifier;
        self
    }

    /// Whether this node is the canonical optional-union pattern.
    pub fn is_optional(&self) -> bool {
        crate::optional::decode_optional(self).is_some()
    }

    /// Direct children in payload order.
    ///
    /// Object properties come in insertion order; function arguments come
    /// before the return type.
    pub fn children(&self) -> Vec<&SchemaNode> {
        match self {
            Self::String(_)
            | Self::Number(_)
            | Self::Boolean(_)
            | Self::Void(_)
            | Self::Undefined(_)
            | Self::Literal(_)
            | Self::Reference(_) => Vec::new(),
            Self::Object(n) => n.shape.values().collect(),
            Self::Array(n) => vec![n.element.as_ref()],
            Self::Tuple(n) => n.elements.iter().collect(),
            Self::Union(n) | Self::Intersection(n) => n.members.iter().collect(),
            Self::Record(n) => vec![n.key.as_ref(), n.value.as_ref()],
            Self::Function(n) => n
                .arguments
                .iter()
                .chain(std::iter::once(n.returns.as_ref()))
                .collect(),
        }
    }

    /// Pre-order traversal of this node and all of its descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SchemaNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Targets of every back-reference in this tree, in pre-order.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if let Self::Reference(r) = node {
                out.push(r.target.as_str());
            }
        });
        out
    }

    /// Identifiers established by nodes of this tree, in pre-order.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if let Some(identifier) = node.identifier() {
                out.push(identifier);
            }
        });
        out
    }

    /// A copy of this tree with every description cleared.
    ///
    /// Use for structural comparison where documentation is cosmetic.
    pub fn without_descriptions(&self) -> SchemaNode {
        let mut node = match self {
            Self::String(_)
            | Self::Number(_)
            | Self::Boolean(_)
            | Self::Void(_)
            | Self::Undefined(_)
            | Self::Literal(_)
            | Self::Reference(_) => self.clone(),
            Self::Object(n) => Self::Object(ObjectNode {
                shape: n
                    .shape
                    .iter()
                    .map(|(name, child)| (name.clone(), child.without_descriptions()))
                    .collect(),
                defaults: n.defaults.clone(),
            }),
            Self::Array(n) => Self::Array(ArrayNode {
                element: Box::new(n.element.without_descriptions()),
                defaults: n.defaults.clone(),
            }),
            Self::Tuple(n) => Self::Tuple(TupleNode {
                elements: n.elements.iter().map(Self::without_descriptions).collect(),
                defaults: n.defaults.clone(),
            }),
            Self::Union(n) => Self::Union(strip_composite(n)),
            Self::Intersection(n) => Self::Intersection(strip_composite(n)),
            Self::Record(n) => Self::Record(RecordNode {
                key: Box::new(n.key.without_descriptions()),
                value: Box::new(n.value.without_descriptions()),
                defaults: n.defaults.clone(),
            }),
            Self::Function(n) => Self::Function(FunctionNode {
                arguments: n.arguments.iter().map(Self::without_descriptions).collect(),
                returns: Box::new(n.returns.without_descriptions()),
                defaults: n.defaults.clone(),
            }),
        };
        node.defaults_mut().description = None;
        node
    }
}

fn strip_composite(node: &CompositeNode) -> CompositeNode {
    CompositeNode {
        members: node
            .members
            .iter()
            .map(SchemaNode::without_descriptions)
            .collect(),
        defaults: node.defaults.clone(),
    }
}

/// Compact TypeScript-like rendering, for diagnostics and logs.
impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(_) | Self::Number(_) | Self::Boolean(_) | Self::Void(_) => {
                f.write_str(self.type_name().as_str())
            }
            Self::Undefined(_) => f.write_str("undefined"),
            Self::Literal(n) => write!(f, "{}", n.value),
            Self::Object(n) => {
                if n.shape.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (name, child)) in n.shape.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match crate::optional::decode_optional(child) {
                        Some(inner) => write!(f, "{name}?: {inner}")?,
                        None => write!(f, "{name}: {child}")?,
                    }
                }
                f.write_str(" }")
            }
            Self::Array(n) => write!(f, "Array<{}>", n.element),
            Self::Tuple(n) => {
                f.write_str("[")?;
                write_joined(f, &n.elements, ", ")?;
                f.write_str("]")
            }
            Self::Union(n) => write_grouped(f, &n.members, " | "),
            Self::Intersection(n) => write_grouped(f, &n.members, " & "),
            Self::Record(n) => write!(f, "Record<{}, {}>", n.key, n.value),
            Self::Function(n) => {
                f.write_str("(")?;
                write_joined(f, &n.arguments, ", ")?;
                write!(f, ") => {}", n.returns)
            }
            Self::Reference(n) => f.write_str(&n.target),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, nodes: &[SchemaNode], sep: &str) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{node}")?;
    }
    Ok(())
}

fn write_grouped(f: &mut fmt::Formatter<'_>, nodes: &[SchemaNode], sep: &str) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        match node {
            SchemaNode::Union(_) | SchemaNode::Intersection(_) | SchemaNode::Function(_) => {
                write!(f, "({node})")?
            }
            _ => write!(f, "{node}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod tests;
