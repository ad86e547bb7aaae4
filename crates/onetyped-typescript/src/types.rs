//! Structural vocabulary of the checker query interface.
//!
//! Everything here is plain data handed across the [`TypeChecker`] seam:
//! type handles, flags, and the shapes a checker reports for properties,
//! signatures, tuple elements and index signatures.
//!
//! [`TypeChecker`]: crate::checker::TypeChecker

use bitflags::bitflags;
use std::fmt;

pub use onetyped_core::LiteralValue;

// =============================================================================
// TypeId
// =============================================================================

/// Stable handle of a type inside one checker.
///
/// Two equal ids always denote the same type, which makes the id usable as
/// the recursion key of the importer. Ids below [`TypeId::FIRST_USER`] are
/// reserved for intrinsics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const NEVER: TypeId = TypeId(0);
    pub const ANY: TypeId = TypeId(1);
    pub const UNKNOWN: TypeId = TypeId(2);
    pub const NULL: TypeId = TypeId(3);
    pub const UNDEFINED: TypeId = TypeId(4);
    pub const VOID: TypeId = TypeId(5);
    pub const STRING: TypeId = TypeId(6);
    pub const NUMBER: TypeId = TypeId(7);
    pub const BOOLEAN: TypeId = TypeId(8);
    pub const BIGINT: TypeId = TypeId(9);
    pub const SYMBOL: TypeId = TypeId(10);
    pub const BOOLEAN_TRUE: TypeId = TypeId(11);
    pub const BOOLEAN_FALSE: TypeId = TypeId(12);

    /// First id handed out for allocated (non-intrinsic) types.
    pub const FIRST_USER: u32 = 13;

    #[inline]
    pub fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// TypeFlags
// =============================================================================

bitflags! {
    /// Classification flags reported by the checker.
    ///
    /// A type may carry several flags at once: the checker models `boolean`
    /// as `BOOLEAN | UNION` over `false | true`, which is why the importer
    /// evaluates its rules in a fixed priority order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u32 {
        const ANY = 1 << 0;
        const UNKNOWN = 1 << 1;
        const STRING = 1 << 2;
        const NUMBER = 1 << 3;
        const BOOLEAN = 1 << 4;
        const BIGINT = 1 << 5;
        const STRING_LITERAL = 1 << 6;
        const NUMBER_LITERAL = 1 << 7;
        const BOOLEAN_LITERAL = 1 << 8;
        const ES_SYMBOL = 1 << 9;
        const VOID = 1 << 10;
        const UNDEFINED = 1 << 11;
        const NULL = 1 << 12;
        const NEVER = 1 << 13;
        const OBJECT = 1 << 14;
        const UNION = 1 << 15;
        const INTERSECTION = 1 << 16;

        const LITERAL = Self::STRING_LITERAL.bits()
            | Self::NUMBER_LITERAL.bits()
            | Self::BOOLEAN_LITERAL.bits();
        const UNION_OR_INTERSECTION = Self::UNION.bits() | Self::INTERSECTION.bits();
    }
}

// =============================================================================
// Structural descriptions
// =============================================================================

/// An own property of an object type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    /// Declared type, without the `undefined` implied by `optional`.
    pub type_id: TypeId,
    pub optional: bool,
    pub readonly: bool,
    /// Documentation comment attached to the declaration, if any.
    pub documentation: Option<String>,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
            optional: false,
            readonly: false,
            documentation: None,
        }
    }

    pub fn optional(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            optional: true,
            ..Self::new(name, type_id)
        }
    }
}

/// `[key: K]: V`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexSignature {
    pub key_type: TypeId,
    pub value_type: TypeId,
    pub readonly: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: Option<String>,
    pub type_id: TypeId,
    pub optional: bool,
    pub rest: bool,
}

impl ParamInfo {
    pub fn required(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: Some(name.into()),
            type_id,
            optional: false,
            rest: false,
        }
    }
}

/// One call signature; parameters in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TupleElement {
    pub type_id: TypeId,
    pub optional: bool,
    pub rest: bool,
}

impl TupleElement {
    pub fn required(type_id: TypeId) -> Self {
        Self {
            type_id,
            optional: false,
            rest: false,
        }
    }

    pub fn optional(type_id: TypeId) -> Self {
        Self {
            type_id,
            optional: true,
            rest: false,
        }
    }
}

/// The program a type handle was obtained from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceContext<'a> {
    pub file_name: &'a str,
}

impl<'a> SourceContext<'a> {
    pub fn new(file_name: &'a str) -> Self {
        Self { file_name }
    }
}
