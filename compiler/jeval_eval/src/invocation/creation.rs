//! `new T(args)`.

use jeval_ir::{ExprId, MethodId};
use jeval_runtime::Value;

use super::anonymous::evaluate_anonymous;
use super::arguments::{evaluate_arguments, null_this_arguments};
use super::method::{fixed_parameters, invocation_failure};
use super::varargs::pack_varargs;
use super::ConstructorCall;
use crate::errors::{constructor_failed, member_not_found, EvalResult};
use crate::{AstEvaluationEngine, Evaluation, EvaluationContext};

pub(super) fn evaluate_creation(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    expr: ExprId,
    constructor: MethodId,
    args: &[ExprId],
) -> EvalResult {
    let tree = ctx.tree();
    let ty = tree.expr(expr).ty;
    let created = tree.type_binding(ty);
    if created.is_inner() && !created.is_anonymous() {
        // Needs an enclosing instance the designer does not have.
        tracing::debug!(class = %created.qualified_name, "inner class creation yields null");
        return Ok(Value::Null);
    }

    let arguments = evaluate_arguments(engine, ctx, args, true)?;
    let arguments = pack_varargs(ctx, constructor, arguments)?;
    if created.is_anonymous() {
        return evaluate_anonymous(engine, ctx, expr, ty, constructor, &arguments);
    }

    let class_name = tree.binary_name(ty);
    let class = ctx.load_class(&class_name)?;
    let key = tree.method_key(constructor);
    let cache = ctx.member_cache();
    let target = cache
        .constructor(&class, &key)
        .or_else(|| {
            tree.generic_method_key(constructor)
                .and_then(|generic| cache.constructor(&class, &generic))
        })
        .ok_or_else(|| member_not_found(&format!("constructor {}", key.signature()), &class_name))?;

    let call = ConstructorCall {
        expr,
        ty,
        class: &class,
        constructor: &target,
        arguments: &arguments,
    };
    if let Evaluation::Value(value) = engine.interceptors().evaluate_constructor(ctx, &call)? {
        return Ok(value);
    }

    let fixed = fixed_parameters(ctx, constructor);
    let arguments = null_this_arguments(ctx, args, target.parameter_types(), fixed, arguments);
    let signature = format!("{class_name}.{}", key.signature());
    tracing::trace!(constructor = %signature, "instantiating");
    target.new_instance(&class, &arguments).map_err(|err| {
        invocation_failure(engine, ctx, expr, &err, constructor_failed(&signature), &arguments)
    })
}
