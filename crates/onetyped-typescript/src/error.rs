use onetyped_core::ConstructionError;

/// Failure to convert a checker type into a schema node.
///
/// No partial result accompanies an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("unsupported type `{type_text}` in {file}")]
    UnsupportedType { type_text: String, file: String },

    #[error("reference `{reference}` does not name any node in the imported tree")]
    RecursionIntegrity { reference: String },

    #[error("type `{type_text}` exceeds the import depth or work limit")]
    DepthLimitExceeded { type_text: String },

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Failure to render a schema node as type syntax.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("reference `{reference}` does not name any node in the exported tree")]
    RecursionIntegrity { reference: String },

    #[error("identifier `{identifier}` is established by two different nodes")]
    DuplicateIdentifier { identifier: String },

    #[error("schema tree exceeds the export depth limit")]
    DepthLimitExceeded,

    #[error("number literal `{value}` has no literal type")]
    NonFiniteLiteral { value: String },
}

/// Failure to lower type-alias declarations into a [`TypeStore`].
///
/// [`TypeStore`]: crate::store::TypeStore
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LowerError {
    #[error("cannot find name `{name}`")]
    UnknownType { name: String },

    #[error("unsupported record key type `{key}`")]
    UnsupportedRecordKey { key: String },

    #[error("type alias `{name}` circularly references itself")]
    AliasCycle { name: String },

    #[error("duplicate type alias `{name}`")]
    DuplicateAlias { name: String },

    #[error("`{name}` expects {expected} type argument(s), got {found}")]
    TypeArgumentCount {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("declaration nesting exceeds the lowering depth limit")]
    DepthLimitExceeded,
}
