use crate::node::TypeName;

/// A schema node could not be built from the given parts.
///
/// Raised by the node factory at call time and by deserialization when the
/// serialized form carries payload that does not belong to its `typeName`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    #[error("`{type_name}` requires at least two members, got {found}")]
    TooFewMembers { type_name: TypeName, found: usize },

    #[error("duplicate property `{name}` in object shape")]
    DuplicateProperty { name: String },

    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("array requires exactly one element type, got {found}")]
    ArrayArity { found: usize },

    #[error("`{type_name}` node does not accept field `{field}`")]
    UnexpectedField {
        type_name: TypeName,
        field: &'static str,
    },

    #[error("`{type_name}` node is missing field `{field}`")]
    MissingField {
        type_name: TypeName,
        field: &'static str,
    },

    #[error("`{type_name}` node carries a mismatching type echo `{found}`")]
    TypeEchoMismatch { type_name: TypeName, found: String },
}
