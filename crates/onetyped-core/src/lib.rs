//! Canonical schema tree shared by the importer and exporter.
//!
//! - [`node`]: the [`SchemaNode`] variants and their shared [`Defaults`]
//! - [`builder`]: the node factory (`string()`, `object()`, `union()`, ...)
//! - [`optional`]: the optional-union encoding used for optional members
//! - [`wire`]: the `typeName`-keyed serialized form
pub mod builder;
mod error;
pub mod node;
pub mod optional;
pub mod wire;

pub use builder::Options;
pub use error::ConstructionError;
pub use node::{
    ArrayNode, CompositeNode, Defaults, FunctionNode, LiteralNode, LiteralValue, ObjectNode,
    RecordNode, ReferenceNode, SchemaNode, TupleNode, TypeName,
};
pub use optional::{admits_undefined, decode_optional, encode_optional};
