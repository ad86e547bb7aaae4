//! Type exporter: schema tree → type syntax.
//!
//! Pure and synchronous; the input tree is never modified. Before anything
//! is built, the identifiers of the tree are collected once: two different
//! nodes claiming the same identifier, or a reference naming no node, fail
//! the export up front.
//!
//! Optional members are recognized through `decode_optional`. Only a union
//! without an identifier of its own is treated as an optional marker; a
//! named union is a real type that happens to admit `undefined`.

use crate::error::ExportError;
use crate::options::ExportOptions;
use crate::recursion::{RecursionGuard, RecursionResult};
use crate::syntax::{
    KeywordKind, Parameter, PropertySignature, TupleMember, TypeAliasDeclaration, TypeNode,
};
use onetyped_core::{LiteralValue, SchemaNode, decode_optional};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug_span, trace};

/// Splits the optional-union pattern into `(inner, true)`.
fn split_optional(node: &SchemaNode) -> (&SchemaNode, bool) {
    if node.identifier().is_none() {
        if let Some(inner) = decode_optional(node) {
            return (inner, true);
        }
    }
    (node, false)
}

/// Number of optional members at the end of `nodes`.
fn trailing_optional(nodes: &[SchemaNode]) -> usize {
    nodes
        .iter()
        .rev()
        .take_while(|node| split_optional(node).1)
        .count()
}

/// Identifiers established in `root`, validated against its references.
fn collect_identifiers(root: &SchemaNode) -> Result<FxHashMap<&str, &SchemaNode>, ExportError> {
    let mut identifiers: FxHashMap<&str, &SchemaNode> = FxHashMap::default();
    let mut duplicate = None;
    root.walk(&mut |node| {
        if let Some(identifier) = node.identifier() {
            match identifiers.get(identifier) {
                Some(existing) if *existing != node => {
                    duplicate.get_or_insert_with(|| identifier.to_string());
                }
                Some(_) => {}
                None => {
                    identifiers.insert(identifier, node);
                }
            }
        }
    });
    if let Some(identifier) = duplicate {
        return Err(ExportError::DuplicateIdentifier { identifier });
    }

    if let Some(reference) = root
        .references()
        .into_iter()
        .find(|reference| !identifiers.contains_key(reference))
    {
        return Err(ExportError::RecursionIntegrity {
            reference: reference.to_string(),
        });
    }
    Ok(identifiers)
}

/// Per-call export state.
pub struct TypeExporter<'a> {
    options: &'a ExportOptions,
    guard: RecursionGuard<usize>,
    /// Hoist identified nodes into their own declarations.
    hoist: bool,
    hoisted: Vec<(&'a str, &'a SchemaNode)>,
    seen: FxHashSet<&'a str>,
}

impl<'a> TypeExporter<'a> {
    pub fn new(options: &'a ExportOptions) -> Self {
        Self {
            options,
            guard: RecursionGuard::new(options.max_depth, u32::MAX),
            hoist: false,
            hoisted: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    pub fn export(&mut self, node: &'a SchemaNode) -> Result<TypeNode, ExportError> {
        let key = std::ptr::from_ref(node) as usize;
        match self.guard.enter(key) {
            RecursionResult::Entered => {
                let result = self.export_node(node);
                self.guard.leave(key);
                result
            }
            RecursionResult::Cycle
            | RecursionResult::DepthExceeded
            | RecursionResult::IterationExceeded => Err(ExportError::DepthLimitExceeded),
        }
    }

    /// Export a member: identified nodes become references when hoisting.
    fn export_member(&mut self, node: &'a SchemaNode) -> Result<TypeNode, ExportError> {
        if self.hoist {
            if let Some(identifier) = node.identifier() {
                if self.seen.insert(identifier) {
                    trace!(identifier, "hoisting");
                    self.hoisted.push((identifier, node));
                }
                return Ok(TypeNode::reference(identifier));
            }
        }
        self.export(node)
    }

    fn export_node(&mut self, node: &'a SchemaNode) -> Result<TypeNode, ExportError> {
        Ok(match node {
            SchemaNode::String(_) => TypeNode::Keyword(KeywordKind::String),
            SchemaNode::Number(_) => TypeNode::Keyword(KeywordKind::Number),
            SchemaNode::Boolean(_) => TypeNode::Keyword(KeywordKind::Boolean),
            SchemaNode::Void(_) => TypeNode::Keyword(KeywordKind::Void),
            SchemaNode::Undefined(_) => TypeNode::Keyword(KeywordKind::Undefined),
            SchemaNode::Literal(n) => match n.value() {
                LiteralValue::Number(value) if !value.is_finite() => {
                    return Err(ExportError::NonFiniteLiteral {
                        value: value.to_string(),
                    });
                }
                value => TypeNode::Literal(value.clone()),
            },
            SchemaNode::Object(n) => {
                let mut members = Vec::with_capacity(n.shape().len());
                for (name, child) in n.shape() {
                    let (inner, optional) = split_optional(child);
                    let doc = child.description().or_else(|| inner.description());
                    members.push(PropertySignature {
                        name: name.clone(),
                        optional,
                        type_node: Box::new(self.export_member(inner)?),
                        doc: doc.map(str::to_string),
                    });
                }
                TypeNode::TypeLiteral(members)
            }
            SchemaNode::Array(n) => TypeNode::Array(Box::new(self.export_member(n.element())?)),
            SchemaNode::Tuple(n) => {
                let elements = n.elements();
                let first_optional = elements.len() - trailing_optional(elements);
                let mut members = Vec::with_capacity(elements.len());
                for (i, element) in elements.iter().enumerate() {
                    let (inner, optional) = if i >= first_optional {
                        split_optional(element)
                    } else {
                        (element, false)
                    };
                    members.push(TupleMember {
                        optional,
                        type_node: self.export_member(inner)?,
                    });
                }
                TypeNode::Tuple(members)
            }
            SchemaNode::Union(n) => TypeNode::Union(self.export_list(n.members())?),
            SchemaNode::Intersection(n) => TypeNode::Intersection(self.export_list(n.members())?),
            SchemaNode::Record(n) => TypeNode::generic(
                "Record",
                vec![self.export_member(n.key())?, self.export_member(n.value())?],
            ),
            SchemaNode::Function(n) => {
                let arguments = n.arguments();
                let first_optional = arguments.len() - trailing_optional(arguments);
                let mut params = Vec::with_capacity(arguments.len());
                for (i, argument) in arguments.iter().enumerate() {
                    let (inner, optional) = if i >= first_optional {
                        split_optional(argument)
                    } else {
                        (argument, false)
                    };
                    params.push(Parameter {
                        name: format!("{}{i}", self.options.parameter_prefix),
                        optional,
                        type_node: self.export_member(inner)?,
                    });
                }
                TypeNode::Function {
                    params,
                    return_type: Box::new(self.export_member(n.returns())?),
                }
            }
            SchemaNode::Reference(n) => TypeNode::reference(n.target()),
        })
    }

    fn export_list(&mut self, nodes: &'a [SchemaNode]) -> Result<Vec<TypeNode>, ExportError> {
        nodes.iter().map(|node| self.export_member(node)).collect()
    }
}

/// Export `node` as a single type expression with default options.
pub fn to_type_node(node: &SchemaNode) -> Result<TypeNode, ExportError> {
    to_type_node_with(node, &ExportOptions::default())
}

pub fn to_type_node_with(
    node: &SchemaNode,
    options: &ExportOptions,
) -> Result<TypeNode, ExportError> {
    let _span = debug_span!("to_type_node", type_name = %node.type_name()).entered();
    collect_identifiers(node)?;
    TypeExporter::new(options).export(node)
}

/// Export `node` as self-contained type-alias declarations.
///
/// The root alias comes first and is named by the root's identifier when it
/// has one, else by `name`. Every nested identified node is hoisted into an
/// alias of its own, in discovery order, and replaced by a reference.
pub fn to_declarations(
    name: &str,
    node: &SchemaNode,
) -> Result<Vec<TypeAliasDeclaration>, ExportError> {
    to_declarations_with(name, node, &ExportOptions::default())
}

pub fn to_declarations_with(
    name: &str,
    node: &SchemaNode,
    options: &ExportOptions,
) -> Result<Vec<TypeAliasDeclaration>, ExportError> {
    let _span = debug_span!("to_declarations", name).entered();
    let identifiers = collect_identifiers(node)?;
    let root_name = node.identifier().unwrap_or(name);
    if node.identifier().is_none() && identifiers.contains_key(root_name) {
        return Err(ExportError::DuplicateIdentifier {
            identifier: root_name.to_string(),
        });
    }

    let mut exporter = TypeExporter::new(options);
    exporter.hoist = true;
    if let Some(identifier) = node.identifier() {
        exporter.seen.insert(identifier);
    }

    let mut declarations = vec![TypeAliasDeclaration {
        name: root_name.to_string(),
        type_node: exporter.export(node)?,
    }];
    let mut next = 0;
    while let Some(&(identifier, hoisted)) = exporter.hoisted.get(next) {
        next += 1;
        declarations.push(TypeAliasDeclaration {
            name: identifier.to_string(),
            type_node: exporter.export(hoisted)?,
        });
    }
    Ok(declarations)
}

#[cfg(test)]
#[path = "../tests/export_tests.rs"]
mod tests;
