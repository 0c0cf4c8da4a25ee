//! Execution flow: which value a variable holds at a point, and which
//! invocations supply a method's parameters.
//!
//! Hosts with their own data-flow analysis implement [`ExecutionFlow`].
//! [`FlowDescription`] is the straightforward implementation: it walks the
//! bodies of the start methods (and the local methods they call) and records
//! every assignment and invocation, ordered by [`ExprId`]. Ids are
//! post-order, so "before this point" is a plain comparison.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use jeval_ir::{
    ExprId, ExprKind, MethodId, NameBinding, PostfixOp, PrefixOp, Stmt, SyntaxTree, VariableId,
};

/// Source of a variable's value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Assigned {
    /// Evaluating this expression yields the variable's value: an
    /// initializer, an assignment node or an increment node.
    Value(ExprId),
    /// Declared without an initializer.
    Uninitialized,
}

pub trait ExecutionFlow {
    /// Methods the flow starts from (e.g. the constructor of the edited
    /// class).
    fn start_methods(&self) -> &[MethodId];

    /// Last assignment of `variable` that happens before `before`.
    fn last_assignment(&self, variable: VariableId, before: ExprId) -> Option<Assigned>;

    /// Invocations of `method` in flow order.
    fn invocations(&self, method: MethodId) -> &[ExprId];
}

#[derive(Copy, Clone, Debug)]
struct Record {
    /// `None` for field initializers and plain declarations, which precede
    /// every statement.
    at: Option<ExprId>,
    assigned: Assigned,
}

/// Recorded assignments and invocations of one flow.
#[derive(Clone, Debug, Default)]
pub struct FlowDescription {
    start_methods: Vec<MethodId>,
    assignments: FxHashMap<VariableId, Vec<Record>>,
    invocations: FxHashMap<MethodId, Vec<ExprId>>,
}

impl FlowDescription {
    /// Empty flow; fill it with [`Self::record_assignment`] and
    /// [`Self::record_invocation`].
    pub fn new(start_methods: Vec<MethodId>) -> Self {
        FlowDescription {
            start_methods,
            ..Self::default()
        }
    }

    /// Flow through the bodies of `start_methods`, following invocations of
    /// methods declared in the same tree. Field declarations of every type
    /// in the tree are recorded first.
    pub fn from_tree(tree: &SyntaxTree, start_methods: Vec<MethodId>) -> Self {
        let mut flow = Self::new(start_methods.clone());
        for decl in tree.type_decls() {
            for field in &decl.fields {
                let assigned = field.initializer.map_or(Assigned::Uninitialized, Assigned::Value);
                flow.record_assignment(field.variable, None, assigned);
            }
        }
        let mut visited = FxHashSet::default();
        for method in start_methods {
            flow.visit_method(tree, method, &mut visited);
        }
        flow
    }

    pub fn record_assignment(&mut self, variable: VariableId, at: Option<ExprId>, assigned: Assigned) {
        self.assignments
            .entry(variable)
            .or_default()
            .push(Record { at, assigned });
    }

    pub fn record_invocation(&mut self, method: MethodId, expr: ExprId) {
        self.invocations.entry(method).or_default().push(expr);
    }

    fn visit_method(&mut self, tree: &SyntaxTree, method: MethodId, visited: &mut FxHashSet<MethodId>) {
        if !visited.insert(method) {
            return;
        }
        let Some(decl) = tree.find_method_decl(method) else {
            return;
        };
        tracing::trace!(method = %tree.method(method).name, "visiting flow method");
        for stmt in &decl.body {
            match *stmt {
                Stmt::LocalVariable { variable, initializer } => {
                    if let Some(init) = initializer {
                        self.visit_expr(tree, init, visited);
                        self.record_assignment(variable, Some(init), Assigned::Value(init));
                    } else {
                        self.record_assignment(variable, None, Assigned::Uninitialized);
                    }
                }
                Stmt::Expression(expr) | Stmt::Return(Some(expr)) => {
                    self.visit_expr(tree, expr, visited);
                }
                Stmt::Return(None) | Stmt::Other => {}
            }
        }
    }

    fn visit_expr(&mut self, tree: &SyntaxTree, expr: ExprId, visited: &mut FxHashSet<MethodId>) {
        for child in children(tree, expr) {
            self.visit_expr(tree, child, visited);
        }
        match tree.kind(expr) {
            ExprKind::Assignment { target, .. } => {
                if let Some(variable) = assigned_variable(tree, target) {
                    self.record_assignment(variable, Some(expr), Assigned::Value(expr));
                }
            }
            ExprKind::Prefix {
                op: PrefixOp::Increment | PrefixOp::Decrement,
                operand,
            }
            | ExprKind::Postfix {
                op: PostfixOp::Increment | PostfixOp::Decrement,
                operand,
            } => {
                if let Some(variable) = assigned_variable(tree, operand) {
                    self.record_assignment(variable, Some(expr), Assigned::Value(expr));
                }
            }
            ExprKind::MethodInvocation { receiver, method, .. } => {
                self.record_invocation(method, expr);
                let local = receiver
                    .map_or(true, |r| matches!(tree.kind(tree.unparenthesized(r)), ExprKind::This));
                if local {
                    self.visit_method(tree, method, visited);
                }
            }
            ExprKind::SuperMethodInvocation { method, .. }
            | ExprKind::ClassInstanceCreation {
                constructor: method, ..
            } => {
                self.record_invocation(method, expr);
            }
            _ => {}
        }
    }
}

impl ExecutionFlow for FlowDescription {
    fn start_methods(&self) -> &[MethodId] {
        &self.start_methods
    }

    fn last_assignment(&self, variable: VariableId, before: ExprId) -> Option<Assigned> {
        self.assignments
            .get(&variable)?
            .iter()
            .filter(|record| record.at.map_or(true, |at| at < before))
            .max_by_key(|record| record.at)
            .map(|record| record.assigned)
    }

    fn invocations(&self, method: MethodId) -> &[ExprId] {
        self.invocations.get(&method).map_or(&[], Vec::as_slice)
    }
}

/// Variable written by an assignment to `target` (`x = ...`,
/// `this.x = ...`).
fn assigned_variable(tree: &SyntaxTree, target: ExprId) -> Option<VariableId> {
    match tree.kind(tree.unparenthesized(target)) {
        ExprKind::SimpleName {
            binding: NameBinding::Variable(variable),
            ..
        } => Some(variable),
        ExprKind::FieldAccess { receiver, field, .. }
            if matches!(tree.kind(tree.unparenthesized(receiver)), ExprKind::This) =>
        {
            Some(field)
        }
        _ => None,
    }
}

/// Direct children of an expression in evaluation order.
pub(crate) fn children(tree: &SyntaxTree, expr: ExprId) -> SmallVec<[ExprId; 4]> {
    let mut out = SmallVec::new();
    match tree.kind(expr) {
        ExprKind::NullLiteral
        | ExprKind::BooleanLiteral(_)
        | ExprKind::CharacterLiteral(_)
        | ExprKind::NumberLiteral(_)
        | ExprKind::StringLiteral(_)
        | ExprKind::TypeLiteral(_)
        | ExprKind::This
        | ExprKind::SimpleName { .. } => {}
        ExprKind::QualifiedName { qualifier, .. } => out.push(qualifier),
        ExprKind::FieldAccess { receiver, .. } => out.push(receiver),
        ExprKind::Parenthesized(inner) => out.push(inner),
        ExprKind::Prefix { operand, .. } | ExprKind::Postfix { operand, .. } => out.push(operand),
        ExprKind::Infix { operands, .. } => out.extend_from_slice(tree.list(operands)),
        ExprKind::Cast { expr, .. } | ExprKind::InstanceOf { expr, .. } => out.push(expr),
        ExprKind::Conditional {
            condition,
            then_expr,
            else_expr,
        } => out.extend_from_slice(&[condition, then_expr, else_expr]),
        ExprKind::Assignment { target, value, .. } => out.extend_from_slice(&[target, value]),
        ExprKind::MethodInvocation { receiver, args, .. } => {
            out.extend(receiver);
            out.extend_from_slice(tree.list(args));
        }
        ExprKind::SuperMethodInvocation { args, .. }
        | ExprKind::ClassInstanceCreation { args, .. } => out.extend_from_slice(tree.list(args)),
        ExprKind::ArrayCreation {
            dimensions,
            initializer,
        } => {
            out.extend_from_slice(tree.list(dimensions));
            out.extend(initializer);
        }
        ExprKind::ArrayInitializer { elements } => out.extend_from_slice(tree.list(elements)),
        ExprKind::ArrayAccess { array, index } => out.extend_from_slice(&[array, index]),
    }
    out
}
