//! Type Printer - render syntax nodes as TypeScript text.
//!
//! Object type literals are laid out one member per line with a 4-space
//! indent; everything else prints inline. Parentheses are inserted only
//! where precedence requires them.

use crate::syntax::{LiteralValue, PropertySignature, TypeAliasDeclaration, TypeNode};

const INDENT: &str = "    ";

/// Where a node appears, for deciding on parentheses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    Top,
    ArrayElement,
    UnionMember,
    IntersectionMember,
    OptionalElement,
}

impl Position {
    fn needs_parens(self, node: &TypeNode) -> bool {
        match node {
            TypeNode::Function { .. } => self != Position::Top,
            TypeNode::Union(_) => matches!(
                self,
                Position::ArrayElement | Position::IntersectionMember | Position::OptionalElement
            ),
            TypeNode::Intersection(_) => {
                matches!(self, Position::ArrayElement | Position::OptionalElement)
            }
            _ => false,
        }
    }
}

/// Prints syntax nodes as TypeScript source.
///
/// ```ignore
/// let printer = TypePrinter::new();
/// assert_eq!(printer.print_node(&TypeNode::keyword(KeywordKind::String)), "string");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TypePrinter;

impl TypePrinter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_node(&self, node: &TypeNode) -> String {
        let mut out = String::new();
        self.write_node(&mut out, node, Position::Top, 0);
        out
    }

    /// `type Name = T;`
    pub fn print_declaration(&self, declaration: &TypeAliasDeclaration) -> String {
        let mut out = String::from("type ");
        out.push_str(&declaration.name);
        out.push_str(" = ");
        self.write_node(&mut out, &declaration.type_node, Position::Top, 0);
        out.push(';');
        out
    }

    /// Declarations in order, one per line.
    pub fn print_declarations(&self, declarations: &[TypeAliasDeclaration]) -> String {
        declarations
            .iter()
            .map(|declaration| self.print_declaration(declaration))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn write_node(&self, out: &mut String, node: &TypeNode, position: Position, level: usize) {
        if position.needs_parens(node) {
            out.push('(');
            self.write_node(out, node, Position::Top, level);
            out.push(')');
            return;
        }

        match node {
            TypeNode::Keyword(kind) => out.push_str(kind.as_str()),
            TypeNode::Literal(value) => write_literal(out, value),
            TypeNode::TypeLiteral(members) => self.write_type_literal(out, members, level),
            TypeNode::Union(members) => {
                self.write_joined(out, members, " | ", Position::UnionMember, level)
            }
            TypeNode::Intersection(members) => {
                self.write_joined(out, members, " & ", Position::IntersectionMember, level)
            }
            TypeNode::Array(element) => {
                self.write_node(out, element, Position::ArrayElement, level);
                out.push_str("[]");
            }
            TypeNode::Tuple(members) => {
                out.push('[');
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    if member.optional {
                        self.write_node(out, &member.type_node, Position::OptionalElement, level);
                        out.push('?');
                    } else {
                        self.write_node(out, &member.type_node, Position::Top, level);
                    }
                }
                out.push(']');
            }
            TypeNode::TypeReference {
                name,
                type_arguments,
            } => {
                out.push_str(name);
                if !type_arguments.is_empty() {
                    out.push('<');
                    self.write_joined(out, type_arguments, ", ", Position::Top, level);
                    out.push('>');
                }
            }
            TypeNode::Function {
                params,
                return_type,
            } => {
                out.push('(');
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&param.name);
                    if param.optional {
                        out.push('?');
                    }
                    out.push_str(": ");
                    self.write_node(out, &param.type_node, Position::Top, level);
                }
                out.push_str(") => ");
                self.write_node(out, return_type, Position::Top, level);
            }
        }
    }

    fn write_joined(
        &self,
        out: &mut String,
        nodes: &[TypeNode],
        separator: &str,
        position: Position,
        level: usize,
    ) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.write_node(out, node, position, level);
        }
    }

    fn write_type_literal(&self, out: &mut String, members: &[PropertySignature], level: usize) {
        if members.is_empty() {
            out.push_str("{}");
            return;
        }

        out.push_str("{\n");
        let inner = INDENT.repeat(level + 1);
        for member in members {
            if let Some(doc) = &member.doc {
                write_doc(out, doc, &inner);
            }
            out.push_str(&inner);
            write_property_name(out, &member.name);
            if member.optional {
                out.push('?');
            }
            out.push_str(": ");
            self.write_node(out, &member.type_node, Position::Top, level + 1);
            out.push_str(";\n");
        }
        out.push_str(&INDENT.repeat(level));
        out.push('}');
    }
}

/// Render a single node with the default printer.
pub fn print_node(node: &TypeNode) -> String {
    TypePrinter::new().print_node(node)
}

pub fn print_declarations(declarations: &[TypeAliasDeclaration]) -> String {
    TypePrinter::new().print_declarations(declarations)
}

fn write_literal(out: &mut String, value: &LiteralValue) {
    match value {
        LiteralValue::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        LiteralValue::Number(n) if n.is_finite() => out.push_str(&n.to_string()),
        // NaN and the infinities have no literal type; `number` is the closest.
        LiteralValue::Number(_) => out.push_str("number"),
        LiteralValue::String(s) => write_quoted(out, s),
    }
}

fn write_quoted(out: &mut String, s: &str) {
    match serde_json::to_string(s) {
        Ok(quoted) => out.push_str(&quoted),
        Err(_) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
    }
}

fn write_property_name(out: &mut String, name: &str) {
    if is_identifier(name) {
        out.push_str(name);
    } else {
        write_quoted(out, name);
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn write_doc(out: &mut String, doc: &str, indent: &str) {
    let lines: Vec<&str> = doc.lines().collect();
    if lines.len() <= 1 {
        out.push_str(indent);
        out.push_str("/** ");
        out.push_str(doc.trim());
        out.push_str(" */\n");
        return;
    }

    out.push_str(indent);
    out.push_str("/**\n");
    for line in lines {
        out.push_str(indent);
        if line.trim().is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(" * ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    out.push_str(indent);
    out.push_str(" */\n");
}

#[cfg(test)]
#[path = "../tests/printer_tests.rs"]
mod tests;
