//! Frozen syntax tree with its bindings.

use std::borrow::Cow;

use crate::decl::{FieldDecl, MethodDecl, Stmt, TypeDecl};
use crate::{
    Expr, ExprId, ExprKind, ExprRange, MemberKey, MethodBinding, MethodId, Name, StringInterner,
    TypeBinding, TypeId, TypeKind, VariableBinding, VariableId,
};

/// One compilation unit as seen by the evaluator.
///
/// Produced by a parser (or [`crate::TreeBuilder`]) and never mutated
/// afterwards. Indexing accessors expect ids handed out by this tree;
/// [`SyntaxTree::get_expr`] is the checked variant.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    pub(crate) source: String,
    pub(crate) interner: StringInterner,
    pub(crate) exprs: Vec<Expr>,
    pub(crate) expr_lists: Vec<ExprId>,
    pub(crate) types: Vec<TypeBinding>,
    pub(crate) methods: Vec<MethodBinding>,
    pub(crate) variables: Vec<VariableBinding>,
    pub(crate) type_decls: Vec<TypeDecl>,
}

impl SyntaxTree {
    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn get_expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    #[inline]
    pub fn kind(&self, id: ExprId) -> ExprKind {
        self.exprs[id.index()].kind
    }

    /// Static type of an expression.
    #[inline]
    pub fn type_of(&self, id: ExprId) -> &TypeBinding {
        self.type_binding(self.exprs[id.index()].ty)
    }

    #[inline]
    pub fn list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.to_range()]
    }

    #[inline]
    pub fn type_binding(&self, id: TypeId) -> &TypeBinding {
        &self.types[id.index()]
    }

    #[inline]
    pub fn method(&self, id: MethodId) -> &MethodBinding {
        &self.methods[id.index()]
    }

    #[inline]
    pub fn variable(&self, id: VariableId) -> &VariableBinding {
        &self.variables[id.index()]
    }

    #[inline]
    pub fn name(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn type_decls(&self) -> &[TypeDecl] {
        &self.type_decls
    }

    /// Number of expressions in the arena.
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// The first declared type, which encloses the code under evaluation.
    pub fn primary_type(&self) -> Option<TypeId> {
        self.type_decls.iter().find_map(|decl| decl.binding)
    }

    /// Strip any number of enclosing parentheses.
    pub fn unparenthesized(&self, mut id: ExprId) -> ExprId {
        while let ExprKind::Parenthesized(inner) = self.kind(id) {
            id = inner;
        }
        id
    }

    /// Declaration of a method in this unit, matching either the binding
    /// itself or the generic declaration it was parameterized from.
    pub fn find_method_decl(&self, method: MethodId) -> Option<&MethodDecl> {
        let declaration = self.method(method).declaration;
        self.type_decls
            .iter()
            .flat_map(|decl| decl.methods.iter())
            .find(|decl| decl.binding == method || Some(decl.binding) == declaration)
    }

    /// The declared type whose field initializers or method bodies contain
    /// `expr`, else the primary type.
    pub fn enclosing_type(&self, expr: ExprId) -> Option<TypeId> {
        self.type_decls
            .iter()
            .find(|decl| {
                let fields = decl.fields.iter().filter_map(|field| field.initializer);
                let bodies = decl
                    .methods
                    .iter()
                    .flat_map(|method| method.body.iter())
                    .filter_map(Stmt::expression);
                fields.chain(bodies).any(|root| self.contains(root, expr))
            })
            .and_then(|decl| decl.binding)
            .or_else(|| self.primary_type())
    }

    /// Whether `expr` is `root` or one of its descendants.
    pub fn contains(&self, root: ExprId, expr: ExprId) -> bool {
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            // Children precede their parent in the arena.
            if id < expr {
                continue;
            }
            if id == expr {
                return true;
            }
            self.push_children(id, &mut pending);
        }
        false
    }

    fn push_children(&self, id: ExprId, out: &mut Vec<ExprId>) {
        match self.kind(id) {
            ExprKind::NullLiteral
            | ExprKind::BooleanLiteral(_)
            | ExprKind::CharacterLiteral(_)
            | ExprKind::NumberLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::TypeLiteral(_)
            | ExprKind::This
            | ExprKind::SimpleName { .. } => {}
            ExprKind::QualifiedName { qualifier: child, .. }
            | ExprKind::FieldAccess { receiver: child, .. }
            | ExprKind::Parenthesized(child)
            | ExprKind::Prefix { operand: child, .. }
            | ExprKind::Postfix { operand: child, .. }
            | ExprKind::Cast { expr: child, .. }
            | ExprKind::InstanceOf { expr: child, .. } => out.push(child),
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => out.extend([condition, then_expr, else_expr]),
            ExprKind::Assignment { target, value, .. } => out.extend([target, value]),
            ExprKind::ArrayAccess { array, index } => out.extend([array, index]),
            ExprKind::Infix { operands: list, .. }
            | ExprKind::SuperMethodInvocation { args: list, .. }
            | ExprKind::ClassInstanceCreation { args: list, .. }
            | ExprKind::ArrayInitializer { elements: list } => out.extend_from_slice(self.list(list)),
            ExprKind::MethodInvocation { receiver, args, .. } => {
                out.extend(receiver);
                out.extend_from_slice(self.list(args));
            }
            ExprKind::ArrayCreation {
                dimensions,
                initializer,
            } => {
                out.extend_from_slice(self.list(dimensions));
                out.extend(initializer);
            }
        }
    }

    pub fn find_field_decl(&self, variable: VariableId) -> Option<&FieldDecl> {
        self.type_decls
            .iter()
            .flat_map(|decl| decl.fields.iter())
            .find(|decl| decl.variable == variable)
    }

    /// Erased name used in member signatures (`T` becomes its bound).
    pub fn erased_name(&self, id: TypeId) -> String {
        let binding = self.type_binding(id);
        match binding.kind {
            TypeKind::Array { component } => format!("{}[]", self.erased_name(component)),
            TypeKind::TypeVariable { bound: Some(bound) } => self.erased_name(bound),
            TypeKind::TypeVariable { bound: None } => "java.lang.Object".to_string(),
            _ => binding.binary_name.clone(),
        }
    }

    /// Name to hand to a class loader for this type.
    pub fn binary_name(&self, id: TypeId) -> String {
        self.erased_name(id)
    }

    /// Name used to select evaluators: qualified name without type
    /// arguments, `int`, `java.lang.String`, `int[]`.
    pub fn qualified_name(&self, id: TypeId) -> Cow<'_, str> {
        let binding = self.type_binding(id);
        match binding.kind {
            TypeKind::Array { component } => {
                Cow::Owned(format!("{}[]", self.qualified_name(component)))
            }
            _ => Cow::Borrowed(binding.qualified_name.as_str()),
        }
    }

    /// Lookup key of a method or constructor binding.
    pub fn method_key(&self, id: MethodId) -> MemberKey {
        let method = self.method(id);
        MemberKey {
            name: method.name.clone(),
            parameter_types: method
                .parameter_types
                .iter()
                .map(|&ty| self.erased_name(ty))
                .collect(),
        }
    }

    /// Key of the generic declaration, if this binding was parameterized.
    pub fn generic_method_key(&self, id: MethodId) -> Option<MemberKey> {
        self.method(id)
            .declaration
            .filter(|&decl| decl != id)
            .map(|decl| self.method_key(decl))
    }

    /// Walk a type and its supertypes depth-first: superclass chain first,
    /// then interfaces.
    pub fn supertypes(&self, id: TypeId) -> Vec<TypeId> {
        let mut seen = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if seen.contains(&current) {
                continue;
            }
            seen.push(current);
            let binding = self.type_binding(current);
            for &interface in binding.interfaces.iter().rev() {
                stack.push(interface);
            }
            if let Some(superclass) = binding.superclass {
                stack.push(superclass);
            }
        }
        seen
    }

    /// Source text of an expression: the original slice when the tree was
    /// parsed from text, otherwise a rendering of the node.
    pub fn source_of(&self, id: ExprId) -> Cow<'_, str> {
        let span = self.expr(id).span;
        if !span.is_empty() {
            if let Some(text) = self.source.get(span.to_range()) {
                return Cow::Borrowed(text);
            }
        }
        Cow::Owned(crate::printer::render(self, id))
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests;
