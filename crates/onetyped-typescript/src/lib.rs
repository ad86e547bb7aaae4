//! TypeScript side of onetyped.
//!
//! - [`import`]: checker type graph → [`SchemaNode`] (`from_type`)
//! - [`export`]: [`SchemaNode`] → type syntax (`to_type_node`, `to_declarations`)
//! - [`checker`] / [`types`]: the query interface onto a type-checking engine
//! - [`store`]: an in-memory engine implementing that interface
//! - [`syntax`] / [`printer`]: type-syntax nodes and their text form
//! - [`lower`]: type-alias declarations → [`store::TypeStore`]
//! - [`recursion`]: cycle, depth and work limits shared by the walks
//!
//! [`SchemaNode`]: onetyped_core::SchemaNode

pub mod checker;
mod error;
pub mod export;
pub mod import;
pub mod lower;
mod options;
pub mod printer;
pub mod recursion;
pub mod store;
pub mod syntax;
pub mod types;

pub use checker::TypeChecker;
pub use error::{ExportError, ImportError, LowerError};
pub use export::{to_declarations, to_declarations_with, to_type_node, to_type_node_with};
pub use import::{IMPORT_RULES, ImportRule, from_type, from_type_with};
pub use lower::lower_declarations;
pub use options::{ExportOptions, ImportOptions, SignaturePolicy};
pub use printer::{print_declarations, print_node};
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};
pub use store::TypeStore;
pub use syntax::{TypeAliasDeclaration, TypeNode};
pub use types::{SourceContext, TypeFlags, TypeId};
