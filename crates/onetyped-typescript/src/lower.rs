//! Type lowering: syntax declarations → TypeId
//!
//! Converts a set of `type Name = ...;` declarations into types of a
//! [`TypeStore`]. Aliases are resolved on demand, so declarations may refer
//! to each other in any order, and an alias with a structural body gets its
//! id reserved before the body is lowered. That is what lets
//! `type Node = { next: Node }` and mutually recursive aliases terminate.
//!
//! Built-in generic references understood here: `Record<K, V>` and
//! `Array<T>`.

use crate::error::LowerError;
use crate::printer::print_node;
use crate::recursion::{DepthCounter, RecursionProfile};
use crate::store::{ObjectShape, TypeData, TypeStore};
use crate::syntax::{KeywordKind, LiteralValue, TypeAliasDeclaration, TypeNode};
use crate::types::{IndexSignature, ParamInfo, PropertyInfo, Signature, TupleElement, TypeId};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// What a `Record` key type expands to.
enum RecordKeys {
    /// `string`, `number` or a union of them: one index signature.
    Index,
    /// Literal keys: one property per key, in order.
    Properties(Vec<String>),
    Unsupported,
}

/// Type lowering context.
pub struct TypeLowering<'a> {
    store: &'a mut TypeStore,
    declarations: &'a [TypeAliasDeclaration],
    by_name: FxHashMap<&'a str, usize>,
    resolved: FxHashMap<String, TypeId>,
    depth: DepthCounter,
}

impl<'a> TypeLowering<'a> {
    pub fn new(
        store: &'a mut TypeStore,
        declarations: &'a [TypeAliasDeclaration],
    ) -> Result<Self, LowerError> {
        let mut by_name = FxHashMap::default();
        for (index, declaration) in declarations.iter().enumerate() {
            if by_name.insert(declaration.name.as_str(), index).is_some() {
                return Err(LowerError::DuplicateAlias {
                    name: declaration.name.clone(),
                });
            }
        }
        Ok(Self {
            store,
            declarations,
            by_name,
            resolved: FxHashMap::default(),
            depth: DepthCounter::with_profile(RecursionProfile::Lowering),
        })
    }

    /// Lower every declaration; returns the id of each alias by name.
    pub fn lower_all(mut self) -> Result<FxHashMap<String, TypeId>, LowerError> {
        let declarations = self.declarations;
        for declaration in declarations {
            self.resolve_alias(&declaration.name)?;
        }
        Ok(std::mem::take(&mut self.resolved))
    }

    /// Lower a standalone type node with the declarations in scope.
    pub fn lower_type(&mut self, node: &TypeNode) -> Result<TypeId, LowerError> {
        if !self.depth.enter() {
            return Err(LowerError::DepthLimitExceeded);
        }
        let result = self.lower_type_inner(node);
        self.depth.leave();
        result
    }

    fn lower_type_inner(&mut self, node: &TypeNode) -> Result<TypeId, LowerError> {
        trace!(node = %print_node(node), "lower_type");
        match node {
            TypeNode::Keyword(kind) => Ok(keyword_type(*kind)),
            TypeNode::Literal(value) => Ok(self.store.literal(value.clone())),
            TypeNode::TypeReference {
                name,
                type_arguments,
            } if type_arguments.is_empty() => {
                if self.by_name.contains_key(name.as_str()) {
                    self.resolve_alias(name)
                } else {
                    Err(LowerError::UnknownType { name: name.clone() })
                }
            }
            _ => {
                let data = self.lower_structure(node)?;
                let id = self.store.reserve();
                self.store.define(id, data);
                Ok(id)
            }
        }
    }

    // =========================================================================
    // Aliases
    // =========================================================================

    fn resolve_alias(&mut self, name: &str) -> Result<TypeId, LowerError> {
        if let Some(&id) = self.resolved.get(name) {
            return Ok(id);
        }

        // Follow `type A = B` chains to the first alias with a real body.
        let declarations = self.declarations;
        let mut chain: Vec<&'a str> = Vec::new();
        let mut current = name;
        loop {
            let Some(&index) = self.by_name.get(current) else {
                return Err(LowerError::UnknownType {
                    name: current.to_string(),
                });
            };
            let declaration = &declarations[index];
            if chain.contains(&declaration.name.as_str()) {
                return Err(LowerError::AliasCycle {
                    name: declaration.name.clone(),
                });
            }
            chain.push(declaration.name.as_str());

            let target = match &declaration.type_node {
                TypeNode::TypeReference {
                    name: target,
                    type_arguments,
                } if type_arguments.is_empty() && self.by_name.contains_key(target.as_str()) => {
                    target.as_str()
                }
                body => {
                    let id = self.lower_alias_body(&declaration.name, body)?;
                    return Ok(self.finish_chain(&chain, id));
                }
            };
            if let Some(&id) = self.resolved.get(target) {
                return Ok(self.finish_chain(&chain, id));
            }
            current = target;
        }
    }

    fn finish_chain(&mut self, chain: &[&str], id: TypeId) -> TypeId {
        for name in chain {
            self.resolved.insert((*name).to_string(), id);
        }
        id
    }

    fn lower_alias_body(&mut self, name: &str, body: &TypeNode) -> Result<TypeId, LowerError> {
        if !is_structural(body) {
            let id = self.lower_type(body)?;
            self.resolved.insert(name.to_string(), id);
            return Ok(id);
        }

        let id = self.store.reserve();
        self.store.set_alias_name(id, name);
        self.resolved.insert(name.to_string(), id);
        debug!(alias = name, %id, "lowering alias");

        if !self.depth.enter() {
            return Err(LowerError::DepthLimitExceeded);
        }
        let data = self.lower_structure(body);
        self.depth.leave();
        self.store.define(id, data?);
        Ok(id)
    }

    // =========================================================================
    // Structural types
    // =========================================================================

    fn lower_structure(&mut self, node: &TypeNode) -> Result<TypeData, LowerError> {
        match node {
            TypeNode::TypeLiteral(members) => {
                let mut properties = Vec::with_capacity(members.len());
                for member in members {
                    properties.push(PropertyInfo {
                        name: member.name.clone(),
                        type_id: self.lower_type(&member.type_node)?,
                        optional: member.optional,
                        readonly: false,
                        documentation: member.doc.clone(),
                    });
                }
                Ok(TypeData::Object(ObjectShape {
                    properties,
                    index_signatures: Vec::new(),
                }))
            }
            TypeNode::Union(members) => Ok(TypeData::Union(self.lower_list(members)?.into())),
            TypeNode::Intersection(members) => {
                Ok(TypeData::Intersection(self.lower_list(members)?.into()))
            }
            TypeNode::Array(element) => Ok(TypeData::Array(self.lower_type(element)?)),
            TypeNode::Tuple(members) => {
                let mut elements = Vec::with_capacity(members.len());
                for member in members {
                    elements.push(TupleElement {
                        type_id: self.lower_type(&member.type_node)?,
                        optional: member.optional,
                        rest: false,
                    });
                }
                Ok(TypeData::Tuple(elements))
            }
            TypeNode::Function {
                params,
                return_type,
            } => {
                let mut lowered = Vec::with_capacity(params.len());
                for param in params {
                    lowered.push(ParamInfo {
                        name: Some(param.name.clone()),
                        type_id: self.lower_type(&param.type_node)?,
                        optional: param.optional,
                        rest: false,
                    });
                }
                let return_type = self.lower_type(return_type)?;
                Ok(TypeData::Callable(vec![Signature {
                    params: lowered,
                    return_type,
                }]))
            }
            TypeNode::TypeReference {
                name,
                type_arguments,
            } => match name.as_str() {
                "Record" => {
                    let [key, value] = type_arguments.as_slice() else {
                        return Err(argument_count(name, 2, type_arguments.len()));
                    };
                    let key_id = self.lower_type(key)?;
                    let value_id = self.lower_type(value)?;
                    self.record_shape(key, key_id, value_id)
                }
                "Array" => {
                    let [element] = type_arguments.as_slice() else {
                        return Err(argument_count(name, 1, type_arguments.len()));
                    };
                    Ok(TypeData::Array(self.lower_type(element)?))
                }
                _ => Err(LowerError::UnknownType { name: name.clone() }),
            },
            TypeNode::Keyword(_) | TypeNode::Literal(_) => Err(LowerError::UnknownType {
                name: print_node(node),
            }),
        }
    }

    fn lower_list(&mut self, nodes: &[TypeNode]) -> Result<Vec<TypeId>, LowerError> {
        nodes.iter().map(|node| self.lower_type(node)).collect()
    }

    fn record_shape(
        &self,
        key: &TypeNode,
        key_id: TypeId,
        value_id: TypeId,
    ) -> Result<TypeData, LowerError> {
        let shape = match self.record_keys(key_id) {
            RecordKeys::Index => ObjectShape {
                properties: Vec::new(),
                index_signatures: vec![IndexSignature {
                    key_type: key_id,
                    value_type: value_id,
                    readonly: false,
                }],
            },
            RecordKeys::Properties(names) => ObjectShape {
                properties: names
                    .into_iter()
                    .map(|name| PropertyInfo::new(name, value_id))
                    .collect(),
                index_signatures: Vec::new(),
            },
            RecordKeys::Unsupported => {
                return Err(LowerError::UnsupportedRecordKey {
                    key: print_node(key),
                });
            }
        };
        Ok(TypeData::Object(shape))
    }

    fn record_keys(&self, key_id: TypeId) -> RecordKeys {
        if key_id == TypeId::STRING || key_id == TypeId::NUMBER {
            return RecordKeys::Index;
        }
        match self.store.lookup(key_id) {
            Some(TypeData::Literal(value)) => match literal_key(value) {
                Some(name) => RecordKeys::Properties(vec![name]),
                None => RecordKeys::Unsupported,
            },
            Some(TypeData::Union(members)) => {
                if members
                    .iter()
                    .all(|m| *m == TypeId::STRING || *m == TypeId::NUMBER)
                {
                    return RecordKeys::Index;
                }
                let mut names = Vec::with_capacity(members.len());
                for member in members {
                    match self.store.lookup(*member) {
                        Some(TypeData::Literal(value)) => match literal_key(value) {
                            Some(name) => names.push(name),
                            None => return RecordKeys::Unsupported,
                        },
                        _ => return RecordKeys::Unsupported,
                    }
                }
                RecordKeys::Properties(names)
            }
            _ => RecordKeys::Unsupported,
        }
    }
}

/// Lower `declarations` into `store`, returning each alias's id by name.
pub fn lower_declarations(
    store: &mut TypeStore,
    declarations: &[TypeAliasDeclaration],
) -> Result<FxHashMap<String, TypeId>, LowerError> {
    TypeLowering::new(store, declarations)?.lower_all()
}

fn keyword_type(kind: KeywordKind) -> TypeId {
    match kind {
        KeywordKind::String => TypeId::STRING,
        KeywordKind::Number => TypeId::NUMBER,
        KeywordKind::Boolean => TypeId::BOOLEAN,
        KeywordKind::Void => TypeId::VOID,
        KeywordKind::Undefined => TypeId::UNDEFINED,
        KeywordKind::Any => TypeId::ANY,
        KeywordKind::Unknown => TypeId::UNKNOWN,
        KeywordKind::Never => TypeId::NEVER,
        KeywordKind::Null => TypeId::NULL,
    }
}

fn is_structural(node: &TypeNode) -> bool {
    match node {
        TypeNode::Keyword(_) | TypeNode::Literal(_) => false,
        TypeNode::TypeReference { type_arguments, .. } => !type_arguments.is_empty(),
        _ => true,
    }
}

fn literal_key(value: &LiteralValue) -> Option<String> {
    match value {
        LiteralValue::String(s) => Some(s.clone()),
        LiteralValue::Number(n) => Some(n.to_string()),
        LiteralValue::Boolean(_) => None,
    }
}

fn argument_count(name: &str, expected: usize, found: usize) -> LowerError {
    LowerError::TypeArgumentCount {
        name: name.to_string(),
        expected,
        found,
    }
}

#[cfg(test)]
#[path = "../tests/lower_tests.rs"]
mod tests;
