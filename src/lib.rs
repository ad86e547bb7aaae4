//! onetyped: bidirectional conversion between TypeScript-style type graphs
//! and a canonical, serializable schema tree.
//!
//! ```ignore
//! use onetyped::builder::{number_with, object, string, Options};
//!
//! let person = object([
//!     ("name", string()),
//!     ("age", number_with(Options::new().optional())),
//! ])?;
//! let text = onetyped::print_declarations(&onetyped::to_declarations("Person", &person)?);
//! // type Person = {
//! //     name: string;
//! //     age?: number;
//! // };
//! ```
//!
//! The model lives in [`onetyped_core`], the TypeScript side in
//! [`onetyped_typescript`]; both are re-exported here.

pub mod tracing_config;

pub use onetyped_core::*;
pub use onetyped_typescript::*;
