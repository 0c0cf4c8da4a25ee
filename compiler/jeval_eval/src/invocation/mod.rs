//! Method invocations, super-method invocations and instance creation.
//!
//! This is where design-time evaluation runs real code: resolved methods
//! and constructors are invoked reflectively on the runtime model, after
//! every [`InvocationInterceptor`] has had the chance to answer instead.
//!
//! # Modules
//!
//! - `method`: static, instance and super calls, description gating
//! - `local`: simulated calls of methods declared in the unit itself
//! - `creation`: `new T(...)` of named classes
//! - `anonymous`: `new T() { ... }` and listener stubs
//! - `arguments`: argument evaluation, `this` nulling and the diagnostic dump
//! - `varargs`: packing of variable-arity arguments
//! - `interceptor`: the extension point

mod anonymous;
mod arguments;
mod creation;
mod interceptor;
mod local;
mod method;
mod varargs;

pub use interceptor::{
    AnonymousCall, ConstructorCall, InterceptorChain, InvocationInterceptor, MethodCall,
};

pub(crate) use arguments::invocation_arguments;
pub(crate) use varargs::pack_varargs;

use jeval_ir::{ExprId, ExprKind, TypeBinding};

use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

/// Claims every invocation and creation node, whatever its type.
pub struct InvocationEvaluator;

impl ExpressionEvaluator for InvocationEvaluator {
    fn name(&self) -> &'static str {
        "invocation"
    }

    fn evaluate(
        &self,
        engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        _ty: &TypeBinding,
        _type_name: &str,
    ) -> EvalOutcome {
        let tree = ctx.tree();
        let value = match tree.kind(expr) {
            ExprKind::MethodInvocation {
                receiver,
                method,
                args,
                ..
            } => method::evaluate_method(engine, ctx, expr, receiver, method, tree.list(args))?,
            ExprKind::SuperMethodInvocation { method, args, .. } => {
                method::evaluate_super_method(engine, ctx, expr, method, tree.list(args))?
            }
            ExprKind::ClassInstanceCreation { constructor, args } => {
                creation::evaluate_creation(engine, ctx, expr, constructor, tree.list(args))?
            }
            _ => return Ok(Evaluation::Unknown),
        };
        Ok(value.into())
    }
}
