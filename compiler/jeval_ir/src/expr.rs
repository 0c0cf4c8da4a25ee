//! Expression nodes.
//!
//! The arena stores [`Expr`] values addressed by [`ExprId`]; children are ids
//! or [`ExprRange`]s into the tree's list storage. Parenthesization is kept
//! as an explicit node so printed source matches the original text.

use crate::{ExprId, ExprRange, MethodId, Name, Span, TypeId, VariableId};
use crate::operators::{AssignOp, InfixOp, PostfixOp, PrefixOp};

/// What a simple or qualified name refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NameBinding {
    Variable(VariableId),
    /// The name denotes a type, e.g. the qualifier of `Color.RED`.
    Type(TypeId),
    /// Package segment of a qualified type name.
    Package,
    Unresolved,
}

/// Expression node with its resolved static type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub ty: TypeId,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, span: Span, ty: TypeId) -> Self {
        Expr { kind, span, ty }
    }
}

/// Syntactic form of an expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    NullLiteral,
    BooleanLiteral(bool),
    /// UTF-16 code unit, escapes resolved.
    CharacterLiteral(u16),
    /// Token text exactly as written, including radix prefix and suffix
    /// (`010`, `0x1F`, `5L`, `1.5f`).
    NumberLiteral(Name),
    /// Literal contents with escapes resolved.
    StringLiteral(Name),
    /// `T.class`
    TypeLiteral(TypeId),
    This,
    SimpleName {
        name: Name,
        binding: NameBinding,
    },
    /// `qualifier.name` where the qualifier is itself a name.
    QualifiedName {
        qualifier: ExprId,
        name: Name,
        binding: NameBinding,
    },
    /// `receiver.name` where the receiver is an arbitrary expression.
    FieldAccess {
        receiver: ExprId,
        name: Name,
        field: VariableId,
    },
    Parenthesized(ExprId),
    Prefix {
        op: PrefixOp,
        operand: ExprId,
    },
    Postfix {
        op: PostfixOp,
        operand: ExprId,
    },
    /// Flattened chain `a op b op c ...`: left, right, then extended operands.
    Infix {
        op: InfixOp,
        operands: ExprRange,
    },
    Cast {
        target: TypeId,
        expr: ExprId,
    },
    Conditional {
        condition: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },
    Assignment {
        op: AssignOp,
        target: ExprId,
        value: ExprId,
    },
    InstanceOf {
        expr: ExprId,
        target: TypeId,
    },
    MethodInvocation {
        receiver: Option<ExprId>,
        name: Name,
        method: MethodId,
        args: ExprRange,
    },
    SuperMethodInvocation {
        name: Name,
        method: MethodId,
        args: ExprRange,
    },
    /// `new T(args)`; the created type is the node's own type, which is an
    /// anonymous binding when a class body follows.
    ClassInstanceCreation {
        constructor: MethodId,
        args: ExprRange,
    },
    /// `new T[d1][d2]` or `new T[] { ... }`; the array type is the node's type.
    ArrayCreation {
        dimensions: ExprRange,
        initializer: Option<ExprId>,
    },
    ArrayInitializer {
        elements: ExprRange,
    },
    ArrayAccess {
        array: ExprId,
        index: ExprId,
    },
}

impl ExprKind {
    /// Short description of the node kind for diagnostics.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NullLiteral => "null literal",
            Self::BooleanLiteral(_) => "boolean literal",
            Self::CharacterLiteral(_) => "character literal",
            Self::NumberLiteral(_) => "number literal",
            Self::StringLiteral(_) => "string literal",
            Self::TypeLiteral(_) => "type literal",
            Self::This => "this expression",
            Self::SimpleName { .. } => "simple name",
            Self::QualifiedName { .. } => "qualified name",
            Self::FieldAccess { .. } => "field access",
            Self::Parenthesized(_) => "parenthesized expression",
            Self::Prefix { .. } => "prefix expression",
            Self::Postfix { .. } => "postfix expression",
            Self::Infix { .. } => "infix expression",
            Self::Cast { .. } => "cast expression",
            Self::Conditional { .. } => "conditional expression",
            Self::Assignment { .. } => "assignment",
            Self::InstanceOf { .. } => "instanceof expression",
            Self::MethodInvocation { .. } => "method invocation",
            Self::SuperMethodInvocation { .. } => "super method invocation",
            Self::ClassInstanceCreation { .. } => "class instance creation",
            Self::ArrayCreation { .. } => "array creation",
            Self::ArrayInitializer { .. } => "array initializer",
            Self::ArrayAccess { .. } => "array access",
        }
    }
}
