//! In-memory type arena implementing [`TypeChecker`].
//!
//! The store hands out [`TypeId`] handles the same way a compiler interner
//! does: intrinsics live at fixed ids, string and number literals are
//! deduplicated, and every structural type gets a fresh id. Recursive
//! aliases are built by reserving an id first and defining it once its
//! body (which may mention the id) has been lowered.
//!
//! Unions and intersections keep their members exactly as given. The store
//! never normalizes, so importer tests can rely on member order.

use crate::checker::TypeChecker;
use crate::types::{
    IndexSignature, LiteralValue, ParamInfo, PropertyInfo, Signature, TupleElement, TypeFlags,
    TypeId,
};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::fmt::Write;

type MemberList = SmallVec<[TypeId; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Never,
    Any,
    Unknown,
    Null,
    Undefined,
    Void,
    String,
    Number,
    Boolean,
    Bigint,
    Symbol,
}

impl IntrinsicKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Void => "void",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Bigint => "bigint",
            Self::Symbol => "symbol",
        }
    }

    fn flags(self) -> TypeFlags {
        match self {
            Self::Never => TypeFlags::NEVER,
            Self::Any => TypeFlags::ANY,
            Self::Unknown => TypeFlags::UNKNOWN,
            Self::Null => TypeFlags::NULL,
            Self::Undefined => TypeFlags::UNDEFINED,
            Self::Void => TypeFlags::VOID,
            Self::String => TypeFlags::STRING,
            Self::Number => TypeFlags::NUMBER,
            // `boolean` is `false | true` to the engine.
            Self::Boolean => TypeFlags::BOOLEAN | TypeFlags::UNION,
            Self::Bigint => TypeFlags::BIGINT,
            Self::Symbol => TypeFlags::ES_SYMBOL,
        }
    }
}

/// Own properties and index signatures of an object type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectShape {
    pub properties: Vec<PropertyInfo>,
    pub index_signatures: Vec<IndexSignature>,
}

/// What a [`TypeId`] stands for.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeData {
    Intrinsic(IntrinsicKind),
    Literal(LiteralValue),
    Union(MemberList),
    Intersection(MemberList),
    Array(TypeId),
    Tuple(Vec<TupleElement>),
    Object(ObjectShape),
    Callable(Vec<Signature>),
    /// Reserved by [`TypeStore::reserve`] and not yet defined.
    Pending,
}

/// Key for deduplicating literal types (f64 compared by bit pattern).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum LiteralKey {
    String(String),
    Number(u64),
}

pub struct TypeStore {
    types: Vec<TypeData>,
    literals: FxHashMap<LiteralKey, TypeId>,
    alias_names: FxHashMap<TypeId, String>,
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeStore {
    /// Create a store with every intrinsic pre-registered at its fixed id.
    pub fn new() -> Self {
        let types = vec![
            TypeData::Intrinsic(IntrinsicKind::Never),
            TypeData::Intrinsic(IntrinsicKind::Any),
            TypeData::Intrinsic(IntrinsicKind::Unknown),
            TypeData::Intrinsic(IntrinsicKind::Null),
            TypeData::Intrinsic(IntrinsicKind::Undefined),
            TypeData::Intrinsic(IntrinsicKind::Void),
            TypeData::Intrinsic(IntrinsicKind::String),
            TypeData::Intrinsic(IntrinsicKind::Number),
            TypeData::Intrinsic(IntrinsicKind::Boolean),
            TypeData::Intrinsic(IntrinsicKind::Bigint),
            TypeData::Intrinsic(IntrinsicKind::Symbol),
            TypeData::Literal(LiteralValue::Boolean(true)),
            TypeData::Literal(LiteralValue::Boolean(false)),
        ];
        debug_assert_eq!(types.len(), TypeId::FIRST_USER as usize);
        Self {
            types,
            literals: FxHashMap::default(),
            alias_names: FxHashMap::default(),
        }
    }

    fn alloc(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(data);
        id
    }

    pub fn lookup(&self, id: TypeId) -> Option<&TypeData> {
        self.types.get(id.0 as usize)
    }

    /// Number of allocated (non-intrinsic) types.
    pub fn len(&self) -> usize {
        self.types.len() - TypeId::FIRST_USER as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Construction
    // =========================================================================

    pub fn literal(&mut self, value: impl Into<LiteralValue>) -> TypeId {
        let key = match value.into() {
            LiteralValue::Boolean(true) => return TypeId::BOOLEAN_TRUE,
            LiteralValue::Boolean(false) => return TypeId::BOOLEAN_FALSE,
            LiteralValue::String(s) => LiteralKey::String(s),
            LiteralValue::Number(n) => LiteralKey::Number(n.to_bits()),
        };
        if let Some(&id) = self.literals.get(&key) {
            return id;
        }
        let value = match &key {
            LiteralKey::String(s) => LiteralValue::String(s.clone()),
            LiteralKey::Number(bits) => LiteralValue::Number(f64::from_bits(*bits)),
        };
        let id = self.alloc(TypeData::Literal(value));
        self.literals.insert(key, id);
        id
    }

    pub fn union(&mut self, members: impl IntoIterator<Item = TypeId>) -> TypeId {
        self.alloc(TypeData::Union(members.into_iter().collect()))
    }

    pub fn intersection(&mut self, members: impl IntoIterator<Item = TypeId>) -> TypeId {
        self.alloc(TypeData::Intersection(members.into_iter().collect()))
    }

    pub fn array(&mut self, element: TypeId) -> TypeId {
        self.alloc(TypeData::Array(element))
    }

    pub fn tuple(&mut self, elements: Vec<TupleElement>) -> TypeId {
        self.alloc(TypeData::Tuple(elements))
    }

    pub fn object(&mut self, properties: Vec<PropertyInfo>) -> TypeId {
        self.object_with_index(properties, Vec::new())
    }

    pub fn object_with_index(
        &mut self,
        properties: Vec<PropertyInfo>,
        index_signatures: Vec<IndexSignature>,
    ) -> TypeId {
        self.alloc(TypeData::Object(ObjectShape {
            properties,
            index_signatures,
        }))
    }

    /// A callable with a single signature.
    pub fn function(&mut self, params: Vec<ParamInfo>, return_type: TypeId) -> TypeId {
        self.callable(vec![Signature {
            params,
            return_type,
        }])
    }

    pub fn callable(&mut self, signatures: Vec<Signature>) -> TypeId {
        self.alloc(TypeData::Callable(signatures))
    }

    /// Reserve an id to be filled in later by [`define`](Self::define).
    pub fn reserve(&mut self) -> TypeId {
        self.alloc(TypeData::Pending)
    }

    /// Fill a reserved slot. Returns `false` if `id` is not pending.
    pub fn define(&mut self, id: TypeId, data: TypeData) -> bool {
        match self.types.get_mut(id.0 as usize) {
            Some(slot @ TypeData::Pending) => {
                *slot = data;
                true
            }
            _ => false,
        }
    }

    pub fn set_alias_name(&mut self, id: TypeId, name: impl Into<String>) {
        self.alias_names.insert(id, name.into());
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    fn write_type(&self, out: &mut String, id: TypeId, top: bool, visiting: &mut FxHashSet<TypeId>) {
        if !top {
            if let Some(name) = self.alias_names.get(&id) {
                out.push_str(name);
                return;
            }
        }
        if !visiting.insert(id) {
            let _ = write!(out, "{id}");
            return;
        }
        match self.lookup(id) {
            None | Some(TypeData::Pending) => {
                let _ = write!(out, "{id}");
            }
            Some(TypeData::Intrinsic(kind)) => out.push_str(kind.as_str()),
            Some(TypeData::Literal(value)) => {
                let _ = write!(out, "{value}");
            }
            Some(TypeData::Union(members)) => self.write_list(out, members, " | ", visiting),
            Some(TypeData::Intersection(members)) => self.write_list(out, members, " & ", visiting),
            Some(TypeData::Array(element)) => {
                self.write_type(out, *element, false, visiting);
                out.push_str("[]");
            }
            Some(TypeData::Tuple(elements)) => {
                out.push('[');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    if element.rest {
                        out.push_str("...");
                    }
                    self.write_type(out, element.type_id, false, visiting);
                    if element.optional {
                        out.push('?');
                    }
                }
                out.push(']');
            }
            Some(TypeData::Object(shape)) => {
                if shape.properties.is_empty() && shape.index_signatures.is_empty() {
                    out.push_str("{}");
                } else {
                    out.push_str("{ ");
                    for prop in &shape.properties {
                        out.push_str(&prop.name);
                        if prop.optional {
                            out.push('?');
                        }
                        out.push_str(": ");
                        self.write_type(out, prop.type_id, false, visiting);
                        out.push_str("; ");
                    }
                    for index in &shape.index_signatures {
                        out.push_str("[key: ");
                        self.write_type(out, index.key_type, false, visiting);
                        out.push_str("]: ");
                        self.write_type(out, index.value_type, false, visiting);
                        out.push_str("; ");
                    }
                    out.push('}');
                }
            }
            Some(TypeData::Callable(signatures)) => {
                for (i, signature) in signatures.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" & ");
                    }
                    out.push('(');
                    for (j, param) in signature.params.iter().enumerate() {
                        if j > 0 {
                            out.push_str(", ");
                        }
                        if param.rest {
                            out.push_str("...");
                        }
                        match &param.name {
                            Some(name) => out.push_str(name),
                            None => {
                                let _ = write!(out, "arg{j}");
                            }
                        }
                        if param.optional {
                            out.push('?');
                        }
                        out.push_str(": ");
                        self.write_type(out, param.type_id, false, visiting);
                    }
                    out.push_str(") => ");
                    self.write_type(out, signature.return_type, false, visiting);
                }
            }
        }
        visiting.remove(&id);
    }

    fn write_list(&self, out: &mut String, members: &[TypeId], sep: &str, visiting: &mut FxHashSet<TypeId>) {
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            self.write_type(out, *member, false, visiting);
        }
    }
}

impl TypeChecker for TypeStore {
    fn flags(&self, ty: TypeId) -> TypeFlags {
        match self.lookup(ty) {
            Some(TypeData::Intrinsic(kind)) => kind.flags(),
            Some(TypeData::Literal(LiteralValue::String(_))) => TypeFlags::STRING_LITERAL,
            Some(TypeData::Literal(LiteralValue::Number(_))) => TypeFlags::NUMBER_LITERAL,
            Some(TypeData::Literal(LiteralValue::Boolean(_))) => TypeFlags::BOOLEAN_LITERAL,
            Some(TypeData::Union(_)) => TypeFlags::UNION,
            Some(TypeData::Intersection(_)) => TypeFlags::INTERSECTION,
            Some(
                TypeData::Array(_)
                | TypeData::Tuple(_)
                | TypeData::Object(_)
                | TypeData::Callable(_),
            ) => TypeFlags::OBJECT,
            Some(TypeData::Pending) | None => TypeFlags::empty(),
        }
    }

    fn literal_value(&self, ty: TypeId) -> Option<LiteralValue> {
        match self.lookup(ty)? {
            TypeData::Literal(value) => Some(value.clone()),
            _ => None,
        }
    }

    fn constituents(&self, ty: TypeId) -> Vec<TypeId> {
        match self.lookup(ty) {
            Some(TypeData::Union(members) | TypeData::Intersection(members)) => members.to_vec(),
            Some(TypeData::Intrinsic(IntrinsicKind::Boolean)) => {
                vec![TypeId::BOOLEAN_FALSE, TypeId::BOOLEAN_TRUE]
            }
            _ => Vec::new(),
        }
    }

    fn call_signatures(&self, ty: TypeId) -> Vec<Signature> {
        match self.lookup(ty) {
            Some(TypeData::Callable(signatures)) => signatures.clone(),
            _ => Vec::new(),
        }
    }

    fn tuple_elements(&self, ty: TypeId) -> Option<Vec<TupleElement>> {
        match self.lookup(ty)? {
            TypeData::Tuple(elements) => Some(elements.clone()),
            _ => None,
        }
    }

    fn array_element_type(&self, ty: TypeId) -> Option<TypeId> {
        match self.lookup(ty)? {
            TypeData::Array(element) => Some(*element),
            _ => None,
        }
    }

    fn properties(&self, ty: TypeId) -> Vec<PropertyInfo> {
        match self.lookup(ty) {
            Some(TypeData::Object(shape)) => shape.properties.clone(),
            _ => Vec::new(),
        }
    }

    fn index_signatures(&self, ty: TypeId) -> Vec<IndexSignature> {
        match self.lookup(ty) {
            Some(TypeData::Object(shape)) => shape.index_signatures.clone(),
            _ => Vec::new(),
        }
    }

    fn alias_name(&self, ty: TypeId) -> Option<String> {
        self.alias_names.get(&ty).cloned()
    }

    fn type_to_string(&self, ty: TypeId) -> String {
        let mut out = String::new();
        let mut visiting = FxHashSet::default();
        self.write_type(&mut out, ty, true, &mut visiting);
        out
    }
}

#[cfg(test)]
#[path = "../tests/store_tests.rs"]
mod tests;
