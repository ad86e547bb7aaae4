//! The query interface onto a host type-checking engine.
//!
//! The importer never looks inside the engine; it only asks these
//! questions, keyed by [`TypeId`]. Any engine that can answer them (a real
//! compiler binding or the in-memory [`TypeStore`]) can be imported from.
//!
//! [`TypeStore`]: crate::store::TypeStore

use crate::types::{IndexSignature, LiteralValue, PropertyInfo, Signature, TupleElement, TypeFlags, TypeId};

pub trait TypeChecker {
    /// Classification flags of `ty`.
    fn flags(&self, ty: TypeId) -> TypeFlags;

    /// The fixed value of a literal (singleton) type.
    fn literal_value(&self, ty: TypeId) -> Option<LiteralValue>;

    /// Members of a union or intersection, in the order the engine reports
    /// them. Empty for other types.
    fn constituents(&self, ty: TypeId) -> Vec<TypeId>;

    /// Call signatures in declaration order.
    fn call_signatures(&self, ty: TypeId) -> Vec<Signature>;

    /// Element list when `ty` is a tuple.
    fn tuple_elements(&self, ty: TypeId) -> Option<Vec<TupleElement>>;

    /// Element type when `ty` is an array.
    fn array_element_type(&self, ty: TypeId) -> Option<TypeId>;

    /// Own properties in declaration order.
    fn properties(&self, ty: TypeId) -> Vec<PropertyInfo>;

    fn index_signatures(&self, ty: TypeId) -> Vec<IndexSignature>;

    /// Name of the type alias `ty` was declared through, if any.
    fn alias_name(&self, _ty: TypeId) -> Option<String> {
        None
    }

    /// Textual rendering used in diagnostics.
    fn type_to_string(&self, ty: TypeId) -> String;
}
