//! Expression trees for the Java expression evaluator.
//!
//! This crate holds what a parser hands to the evaluator:
//! - Spans and interned names
//! - A flat expression arena addressed by [`ExprId`]
//! - Resolved type, method and variable bindings
//! - Field and method declarations consulted during evaluation
//! - [`MemberKey`], the typed `name(params)` lookup key shared with the
//!   runtime and the description model
//!
//! # Design
//!
//! - **Flatten everything**: children are ids, lists are [`ExprRange`]s.
//! - **Bindings by id**: [`TypeId`], [`MethodId`], [`VariableId`] index
//!   tables owned by the [`SyntaxTree`].
//! - **Read-only**: evaluation never mutates a tree.

pub mod builder;
pub mod decl;
mod bindings;
mod expr;
mod expr_id;
mod member_key;
mod name;
pub mod operators;
pub mod printer;
mod span;
mod tree;

pub use bindings::{
    simple_name_of, MethodBinding, MethodFlags, MethodId, PrimitiveKind, TypeBinding, TypeFlags,
    TypeId, TypeKind, VariableBinding, VariableFlags, VariableId,
};
pub use builder::TreeBuilder;
pub use decl::{FieldDecl, JavadocTag, MethodDecl, Stmt, TypeDecl};
pub use expr::{Expr, ExprKind, NameBinding};
pub use expr_id::{ExprId, ExprRange};
pub use member_key::{MemberKey, SignatureError};
pub use name::{Name, StringInterner};
pub use operators::{AssignOp, InfixOp, PostfixOp, PrefixOp};
pub use span::Span;
pub use tree::SyntaxTree;
