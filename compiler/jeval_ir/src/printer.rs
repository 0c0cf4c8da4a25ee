//! Renders expressions back to Java source.
//!
//! Used for diagnostics when a tree carries no source text.

use std::fmt::Write;

use crate::operators::AssignOp;
use crate::{ExprId, ExprKind, ExprRange, SyntaxTree};

/// Render one expression as Java source.
pub fn render(tree: &SyntaxTree, id: ExprId) -> String {
    let mut out = String::new();
    Printer { tree, out: &mut out }.expr(id);
    out
}

struct Printer<'a> {
    tree: &'a SyntaxTree,
    out: &'a mut String,
}

impl Printer<'_> {
    fn expr(&mut self, id: ExprId) {
        let tree = self.tree;
        match tree.kind(id) {
            ExprKind::NullLiteral => self.out.push_str("null"),
            ExprKind::BooleanLiteral(value) => {
                self.out.push_str(if value { "true" } else { "false" });
            }
            ExprKind::CharacterLiteral(unit) => {
                self.out.push('\'');
                self.escaped(&String::from_utf16_lossy(&[unit]), '\'');
                self.out.push('\'');
            }
            ExprKind::NumberLiteral(token) => self.out.push_str(tree.name(token)),
            ExprKind::StringLiteral(text) => {
                self.out.push('"');
                self.escaped(tree.name(text), '"');
                self.out.push('"');
            }
            ExprKind::TypeLiteral(ty) => {
                let _ = write!(self.out, "{}.class", tree.qualified_name(ty));
            }
            ExprKind::This => self.out.push_str("this"),
            ExprKind::SimpleName { name, .. } => self.out.push_str(tree.name(name)),
            ExprKind::QualifiedName { qualifier, name, .. } => {
                self.expr(qualifier);
                self.out.push('.');
                self.out.push_str(tree.name(name));
            }
            ExprKind::FieldAccess { receiver, name, .. } => {
                self.expr(receiver);
                self.out.push('.');
                self.out.push_str(tree.name(name));
            }
            ExprKind::Parenthesized(inner) => {
                self.out.push('(');
                self.expr(inner);
                self.out.push(')');
            }
            ExprKind::Prefix { op, operand } => {
                self.out.push_str(op.as_symbol());
                self.expr(operand);
            }
            ExprKind::Postfix { op, operand } => {
                self.expr(operand);
                self.out.push_str(op.as_symbol());
            }
            ExprKind::Infix { op, operands } => {
                for (i, &operand) in tree.list(operands).iter().enumerate() {
                    if i > 0 {
                        let _ = write!(self.out, " {} ", op.as_symbol());
                    }
                    self.expr(operand);
                }
            }
            ExprKind::Cast { target, expr } => {
                let _ = write!(self.out, "({}) ", tree.qualified_name(target));
                self.expr(expr);
            }
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                self.expr(condition);
                self.out.push_str(" ? ");
                self.expr(then_expr);
                self.out.push_str(" : ");
                self.expr(else_expr);
            }
            ExprKind::Assignment { op, target, value } => {
                self.expr(target);
                match op {
                    AssignOp::Assign => self.out.push_str(" = "),
                    AssignOp::Compound(op) => {
                        let _ = write!(self.out, " {}= ", op.as_symbol());
                    }
                }
                self.expr(value);
            }
            ExprKind::InstanceOf { expr, target } => {
                self.expr(expr);
                let _ = write!(self.out, " instanceof {}", tree.qualified_name(target));
            }
            ExprKind::MethodInvocation {
                receiver,
                name,
                args,
                ..
            } => {
                if let Some(receiver) = receiver {
                    self.expr(receiver);
                    self.out.push('.');
                }
                self.out.push_str(tree.name(name));
                self.arguments(args);
            }
            ExprKind::SuperMethodInvocation { name, args, .. } => {
                self.out.push_str("super.");
                self.out.push_str(tree.name(name));
                self.arguments(args);
            }
            ExprKind::ClassInstanceCreation { args, .. } => {
                let created = tree.type_of(id);
                let shown = if created.is_anonymous() {
                    created
                        .interfaces
                        .first()
                        .copied()
                        .or(created.superclass)
                        .map_or_else(|| "Object".into(), |ty| tree.qualified_name(ty))
                } else {
                    tree.qualified_name(tree.expr(id).ty)
                };
                let _ = write!(self.out, "new {shown}");
                self.arguments(args);
                if created.is_anonymous() {
                    self.out.push_str(" {...}");
                }
            }
            ExprKind::ArrayCreation {
                dimensions,
                initializer,
            } => {
                let array_type = tree.qualified_name(tree.expr(id).ty);
                let element = array_type.trim_end_matches("[]");
                let rank = (array_type.len() - element.len()) / 2;
                let _ = write!(self.out, "new {element}");
                let dims = tree.list(dimensions);
                for i in 0..rank {
                    self.out.push('[');
                    if let Some(&dim) = dims.get(i) {
                        self.expr(dim);
                    }
                    self.out.push(']');
                }
                if let Some(initializer) = initializer {
                    self.out.push(' ');
                    self.expr(initializer);
                }
            }
            ExprKind::ArrayInitializer { elements } => {
                self.out.push('{');
                self.comma_separated(elements);
                self.out.push('}');
            }
            ExprKind::ArrayAccess { array, index } => {
                self.expr(array);
                self.out.push('[');
                self.expr(index);
                self.out.push(']');
            }
        }
    }

    fn arguments(&mut self, args: ExprRange) {
        self.out.push('(');
        self.comma_separated(args);
        self.out.push(')');
    }

    fn comma_separated(&mut self, range: ExprRange) {
        for (i, &item) in self.tree.list(range).iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(item);
        }
    }

    fn escaped(&mut self, text: &str, quote: char) {
        for c in text.chars() {
            match c {
                '\n' => self.out.push_str("\\n"),
                '\t' => self.out.push_str("\\t"),
                '\r' => self.out.push_str("\\r"),
                '\\' => self.out.push_str("\\\\"),
                c if c == quote => {
                    self.out.push('\\');
                    self.out.push(c);
                }
                c => self.out.push(c),
            }
        }
    }
}
