//! Type importer: checker type graph → schema tree.
//!
//! Dispatch is a closed, ordered rule set ([`IMPORT_RULES`]); the first rule
//! that applies to a type wins. The order matters because one type can
//! satisfy several rules at once: the checker reports `boolean` as a union
//! of `false | true`, so the primitive rule must run before the union rule.
//!
//! Leaf rules (literal, primitive) never recurse and run before the type
//! enters the recursion tracker. Every structural type is entered first:
//!
//! - meeting a type that is still in progress emits a `reference` node and
//!   marks the in-progress type as referenced;
//! - a referenced type receives its `identifier` when it completes;
//! - a nested type the checker knows by an alias name receives that name as
//!   its `identifier` even when it is never referenced, so hoisted aliases
//!   keep their names (the root is named by the caller, not by the tree);
//! - a completed type that carries an identifier is referenced rather than
//!   expanded again, a completed unnamed type is imported again.
//!
//! After the walk every reference must resolve to an identifier in the
//! result.

use crate::checker::TypeChecker;
use crate::error::ImportError;
use crate::options::{ImportOptions, SignaturePolicy};
use crate::recursion::{RecursionGuard, RecursionResult};
use crate::types::{IndexSignature, Signature, SourceContext, TupleElement, TypeFlags, TypeId};
use onetyped_core::builder;
use onetyped_core::{ConstructionError, SchemaNode, encode_optional};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, debug_span, trace};

/// One import rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportRule {
    Literal,
    Primitive,
    Function,
    Tuple,
    Array,
    Union,
    Intersection,
    Record,
    Object,
}

/// Rules in priority order.
pub const IMPORT_RULES: [ImportRule; 9] = [
    ImportRule::Literal,
    ImportRule::Primitive,
    ImportRule::Function,
    ImportRule::Tuple,
    ImportRule::Array,
    ImportRule::Union,
    ImportRule::Intersection,
    ImportRule::Record,
    ImportRule::Object,
];

const PRIMITIVE_FLAGS: TypeFlags = TypeFlags::STRING
    .union(TypeFlags::NUMBER)
    .union(TypeFlags::BOOLEAN)
    .union(TypeFlags::VOID)
    .union(TypeFlags::UNDEFINED);

impl ImportRule {
    /// Leaf rules produce a node without importing any other type.
    pub fn is_leaf(self) -> bool {
        matches!(self, Self::Literal | Self::Primitive)
    }
}

/// Per-call import state.
pub struct TypeImporter<'a, C: TypeChecker + ?Sized> {
    checker: &'a C,
    source: SourceContext<'a>,
    options: &'a ImportOptions,
    guard: RecursionGuard<TypeId>,
    /// In-progress types, with the identifier assigned once referenced.
    in_progress: FxHashMap<TypeId, Option<String>>,
    /// Completed types that carry an identifier.
    named: FxHashMap<TypeId, String>,
    used_identifiers: FxHashSet<String>,
    anonymous_count: u32,
}

impl<'a, C: TypeChecker + ?Sized> TypeImporter<'a, C> {
    pub fn new(checker: &'a C, source: SourceContext<'a>, options: &'a ImportOptions) -> Self {
        Self {
            checker,
            source,
            options,
            guard: RecursionGuard::with_profile(options.profile()),
            in_progress: FxHashMap::default(),
            named: FxHashMap::default(),
            used_identifiers: FxHashSet::default(),
            anonymous_count: 0,
        }
    }

    /// Import `ty` and verify the references of the result.
    pub fn run(mut self, ty: TypeId) -> Result<SchemaNode, ImportError> {
        let _span = debug_span!("from_type", file = self.source.file_name, %ty).entered();
        let node = self.import(ty)?;
        check_references(&node)?;
        debug!(type_name = %node.type_name(), "imported");
        Ok(node)
    }

    /// Import one type handle.
    pub fn import(&mut self, ty: TypeId) -> Result<SchemaNode, ImportError> {
        let flags = self.checker.flags(ty);

        for rule in IMPORT_RULES.iter().filter(|rule| rule.is_leaf()) {
            if let Some(result) = self.apply(*rule, ty, flags) {
                trace!(%ty, ?rule, "leaf rule");
                return result;
            }
        }

        if let Some(identifier) = self.named.get(&ty) {
            return Ok(builder::reference(identifier.clone())?);
        }

        match self.guard.enter(ty) {
            RecursionResult::Entered => {
                let nested = self.guard.depth() > 1;
                self.in_progress.insert(ty, None);
                let result = self.import_structure(ty, flags);
                self.guard.leave(ty);
                let identifier = self.in_progress.remove(&ty).flatten();
                let node = result?;
                // A nested alias keeps its name even when nothing points back at it.
                let identifier = match identifier {
                    Some(identifier) => Some(identifier),
                    None if nested => self.alias_identifier(ty),
                    None => None,
                };
                Ok(match identifier {
                    Some(identifier) => {
                        self.named.insert(ty, identifier.clone());
                        node.with_identifier(Some(identifier))
                    }
                    None => node,
                })
            }
            RecursionResult::Cycle => {
                let identifier = self.identifier_for(ty);
                debug!(%ty, identifier = %identifier, "back-reference");
                Ok(builder::reference(identifier)?)
            }
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                Err(ImportError::DepthLimitExceeded {
                    type_text: self.checker.type_to_string(ty),
                })
            }
        }
    }

    fn import_structure(&mut self, ty: TypeId, flags: TypeFlags) -> Result<SchemaNode, ImportError> {
        for rule in IMPORT_RULES.iter().filter(|rule| !rule.is_leaf()) {
            if let Some(result) = self.apply(*rule, ty, flags) {
                trace!(%ty, ?rule, "structural rule");
                return result;
            }
        }
        Err(self.unsupported(ty))
    }

    /// `None` when `rule` does not apply to `ty`.
    fn apply(
        &mut self,
        rule: ImportRule,
        ty: TypeId,
        flags: TypeFlags,
    ) -> Option<Result<SchemaNode, ImportError>> {
        match rule {
            ImportRule::Literal => {
                if !flags.intersects(TypeFlags::LITERAL) {
                    return None;
                }
                Some(match self.checker.literal_value(ty) {
                    Some(value) => Ok(builder::literal(value)),
                    None => Err(self.unsupported(ty)),
                })
            }
            ImportRule::Primitive => primitive(flags).map(Ok),
            ImportRule::Function => {
                if !flags.contains(TypeFlags::OBJECT) {
                    return None;
                }
                let signatures = self.checker.call_signatures(ty);
                if signatures.is_empty() {
                    return None;
                }
                Some(self.import_function(ty, signatures))
            }
            ImportRule::Tuple => {
                let elements = self.checker.tuple_elements(ty)?;
                Some(self.import_tuple(ty, elements))
            }
            ImportRule::Array => {
                let element = self.checker.array_element_type(ty)?;
                Some(self.import(element).map(builder::array))
            }
            ImportRule::Union => {
                if !flags.contains(TypeFlags::UNION) {
                    return None;
                }
                Some(self.import_composite(ty, builder::union))
            }
            ImportRule::Intersection => {
                if !flags.contains(TypeFlags::INTERSECTION) {
                    return None;
                }
                Some(self.import_composite(ty, builder::intersection))
            }
            ImportRule::Record => {
                if !flags.contains(TypeFlags::OBJECT) || !self.checker.properties(ty).is_empty() {
                    return None;
                }
                let signatures = self.checker.index_signatures(ty);
                let [signature] = signatures.as_slice() else {
                    return None;
                };
                Some(self.import_record(signature))
            }
            ImportRule::Object => {
                if !flags.contains(TypeFlags::OBJECT) {
                    return None;
                }
                Some(self.import_object(ty))
            }
        }
    }

    // =========================================================================
    // Structural rules
    // =========================================================================

    fn import_function(
        &mut self,
        ty: TypeId,
        signatures: Vec<Signature>,
    ) -> Result<SchemaNode, ImportError> {
        if signatures.len() > 1 && self.options.signature_policy == SignaturePolicy::RejectOverloads {
            return Err(self.unsupported(ty));
        }
        let Some(signature) = signatures.into_iter().next() else {
            return Err(self.unsupported(ty));
        };

        let mut arguments = Vec::with_capacity(signature.params.len());
        for param in &signature.params {
            if param.rest {
                return Err(self.unsupported(ty));
            }
            let node = self.import(param.type_id)?;
            arguments.push(if param.optional {
                encode_optional(node)
            } else {
                node
            });
        }
        let returns = self.import(signature.return_type)?;
        Ok(builder::function(arguments, returns))
    }

    fn import_tuple(
        &mut self,
        ty: TypeId,
        elements: Vec<TupleElement>,
    ) -> Result<SchemaNode, ImportError> {
        let mut nodes = Vec::with_capacity(elements.len());
        for element in &elements {
            if element.rest {
                return Err(self.unsupported(ty));
            }
            let node = self.import(element.type_id)?;
            nodes.push(if element.optional {
                encode_optional(node)
            } else {
                node
            });
        }
        Ok(builder::tuple(nodes))
    }

    fn import_composite(
        &mut self,
        ty: TypeId,
        build: fn(Vec<SchemaNode>) -> Result<SchemaNode, ConstructionError>,
    ) -> Result<SchemaNode, ImportError> {
        let constituents = self.checker.constituents(ty);
        match constituents.as_slice() {
            [] => Err(self.unsupported(ty)),
            [single] => self.import(*single),
            _ => {
                let mut members = Vec::with_capacity(constituents.len());
                for member in &constituents {
                    members.push(self.import(*member)?);
                }
                Ok(build(members)?)
            }
        }
    }

    fn import_record(&mut self, signature: &IndexSignature) -> Result<SchemaNode, ImportError> {
        let key = self.import(signature.key_type)?;
        let value = self.import(signature.value_type)?;
        Ok(builder::record(key, value))
    }

    fn import_object(&mut self, ty: TypeId) -> Result<SchemaNode, ImportError> {
        let properties = self.checker.properties(ty);
        let index_signatures = self.checker.index_signatures(ty);

        let mut shape = Vec::with_capacity(properties.len());
        for property in properties {
            let node = self.import(property.type_id)?;
            let node = if property.optional {
                encode_optional(node)
            } else {
                node
            };
            let node = match property.documentation {
                Some(doc) => node.with_description(Some(doc)),
                None => node,
            };
            shape.push((property.name, node));
        }

        if index_signatures.is_empty() {
            return Ok(builder::object(shape)?);
        }

        // Properties and index signatures together: `{ ... } & Record<K, V>`.
        let mut members = Vec::with_capacity(index_signatures.len() + 1);
        if !shape.is_empty() {
            members.push(builder::object(shape)?);
        }
        for signature in &index_signatures {
            members.push(self.import_record(signature)?);
        }
        if members.len() == 1 {
            return Ok(members.remove(0));
        }
        Ok(builder::intersection(members)?)
    }

    // =========================================================================
    // Identity
    // =========================================================================

    fn identifier_for(&mut self, ty: TypeId) -> String {
        if let Some(Some(identifier)) = self.in_progress.get(&ty) {
            return identifier.clone();
        }
        let identifier = match self.checker.alias_name(ty) {
            Some(name) if !name.is_empty() => self.claim(name),
            _ => self.claim_anonymous(),
        };
        self.in_progress.insert(ty, Some(identifier.clone()));
        identifier
    }

    fn alias_identifier(&mut self, ty: TypeId) -> Option<String> {
        let name = self.checker.alias_name(ty).filter(|name| !name.is_empty())?;
        Some(self.claim(name))
    }

    fn claim(&mut self, base: String) -> String {
        if self.used_identifiers.insert(base.clone()) {
            return base;
        }
        let mut suffix = 2u32;
        loop {
            let candidate = format!("{base}{suffix}");
            if self.used_identifiers.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }

    fn claim_anonymous(&mut self) -> String {
        loop {
            self.anonymous_count += 1;
            let candidate = format!(
                "{}{}",
                self.options.anonymous_identifier_prefix, self.anonymous_count
            );
            if self.used_identifiers.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    fn unsupported(&self, ty: TypeId) -> ImportError {
        ImportError::UnsupportedType {
            type_text: self.checker.type_to_string(ty),
            file: self.source.file_name.to_string(),
        }
    }
}

fn primitive(flags: TypeFlags) -> Option<SchemaNode> {
    if !flags.intersects(PRIMITIVE_FLAGS) {
        return None;
    }
    Some(if flags.contains(TypeFlags::STRING) {
        builder::string()
    } else if flags.contains(TypeFlags::NUMBER) {
        builder::number()
    } else if flags.contains(TypeFlags::BOOLEAN) {
        builder::boolean()
    } else if flags.contains(TypeFlags::VOID) {
        builder::void()
    } else {
        builder::undefined()
    })
}

fn check_references(node: &SchemaNode) -> Result<(), ImportError> {
    let identifiers: FxHashSet<&str> = node.identifiers().into_iter().collect();
    match node
        .references()
        .into_iter()
        .find(|reference| !identifiers.contains(reference))
    {
        Some(reference) => Err(ImportError::RecursionIntegrity {
            reference: reference.to_string(),
        }),
        None => Ok(()),
    }
}

/// Import the type `ty` of `checker` with default options.
pub async fn from_type<C: TypeChecker + ?Sized>(
    ty: TypeId,
    source: &SourceContext<'_>,
    checker: &C,
) -> Result<SchemaNode, ImportError> {
    from_type_with(ty, source, checker, &ImportOptions::default()).await
}

pub async fn from_type_with<C: TypeChecker + ?Sized>(
    ty: TypeId,
    source: &SourceContext<'_>,
    checker: &C,
    options: &ImportOptions,
) -> Result<SchemaNode, ImportError> {
    TypeImporter::new(checker, *source, options).run(ty)
}

#[cfg(test)]
#[path = "../tests/import_tests.rs"]
mod tests;
