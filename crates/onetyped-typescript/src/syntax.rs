//! Type-syntax nodes.
//!
//! The subset of TypeScript type syntax the exporter produces and the
//! lowering pass consumes. Nodes own their children; there is no arena
//! and no source positions, since nothing here is parsed from text.

pub use onetyped_core::LiteralValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeywordKind {
    String,
    Number,
    Boolean,
    Void,
    Undefined,
    Any,
    Unknown,
    Never,
    Null,
}

impl KeywordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Void => "void",
            Self::Undefined => "undefined",
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Never => "never",
            Self::Null => "null",
        }
    }
}

/// A type expression.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeNode {
    Keyword(KeywordKind),
    Literal(LiteralValue),
    /// `{ a: T; b?: U }`
    TypeLiteral(Vec<PropertySignature>),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
    /// `T[]`
    Array(Box<TypeNode>),
    /// `[A, B?]`
    Tuple(Vec<TupleMember>),
    /// `Name` or `Name<A, B>`
    TypeReference {
        name: String,
        type_arguments: Vec<TypeNode>,
    },
    /// `(a: A, b?: B) => R`
    Function {
        params: Vec<Parameter>,
        return_type: Box<TypeNode>,
    },
}

impl TypeNode {
    pub fn keyword(kind: KeywordKind) -> Self {
        Self::Keyword(kind)
    }

    /// A type reference without type arguments.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::TypeReference {
            name: name.into(),
            type_arguments: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, type_arguments: Vec<TypeNode>) -> Self {
        Self::TypeReference {
            name: name.into(),
            type_arguments,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertySignature {
    pub name: String,
    pub optional: bool,
    pub type_node: Box<TypeNode>,
    /// Rendered as a JSDoc comment above the member.
    pub doc: Option<String>,
}

impl PropertySignature {
    pub fn new(name: impl Into<String>, type_node: TypeNode) -> Self {
        Self {
            name: name.into(),
            optional: false,
            type_node: Box::new(type_node),
            doc: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TupleMember {
    pub optional: bool,
    pub type_node: TypeNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub optional: bool,
    pub type_node: TypeNode,
}

/// `type Name = T;`
#[derive(Clone, Debug, PartialEq)]
pub struct TypeAliasDeclaration {
    pub name: String,
    pub type_node: TypeNode,
}
