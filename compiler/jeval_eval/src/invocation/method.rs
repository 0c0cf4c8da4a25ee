//! Method and super-method invocation.

use std::sync::Arc;

use jeval_describe::MethodDescription;
use jeval_ir::{ExprId, MemberKey, MethodId};
use jeval_runtime::{ClassRef, MethodDef, ReflectError, Value};

use super::arguments::{dump, evaluate_arguments, null_this_arguments};
use super::local::simulate;
use super::varargs::pack_varargs;
use super::MethodCall;
use crate::errors::{
    member_not_found, method_failed, null_receiver, reflect_error, super_method_failed, ErrorCause,
    EvalError, EvalResult,
};
use crate::{AstEvaluationEngine, Evaluation, EvaluationContext};

pub(super) fn evaluate_method(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    expr: ExprId,
    receiver: Option<ExprId>,
    method: MethodId,
    args: &[ExprId],
) -> EvalResult {
    let tree = ctx.tree();
    let binding = tree.method(method);
    if !binding.is_static() && receiver.is_none() {
        if let Some(decl) = tree.find_method_decl(method) {
            return simulate(engine, ctx, method, decl, args);
        }
    }

    let (class, receiver_value) = if binding.is_static() {
        (ctx.load_class(&tree.binary_name(binding.declaring_type))?, Value::Null)
    } else {
        let value = match receiver {
            Some(receiver) => engine.evaluate(ctx, receiver)?,
            None => engine.this_value(ctx, expr)?,
        };
        if value.is_null() {
            return Err(null_receiver().with_note(format!("invoking {}", binding.name)));
        }
        (class_of(ctx, &value)?, value)
    };

    let arguments = evaluate_arguments(engine, ctx, args, false)?;
    let arguments = pack_varargs(ctx, method, arguments)?;
    let key = tree.method_key(method);
    let target = resolve_method(engine, ctx, &class, method, &key)?;

    let call = MethodCall {
        expr,
        method,
        class: &class,
        target: &target,
        receiver: &receiver_value,
        arguments: &arguments,
    };
    if let Evaluation::Value(value) = engine.interceptors().evaluate_method(ctx, &call)? {
        return Ok(value);
    }

    let description = if engine.config().descriptions_gate_execution {
        describe(ctx, &class, target.key())
    } else {
        None
    };
    if let Some(description) = &description {
        if !description.is_executable() {
            tracing::debug!(method = %key.signature(), "described as not executable");
            return Ok(Value::zero_for(target.return_type()));
        }
    }
    let arguments = match &description {
        Some(description) if description.has_linking_parameters() => {
            let fixed = fixed_parameters(ctx, method);
            null_this_arguments(ctx, args, target.parameter_types(), fixed, arguments)
        }
        _ => arguments,
    };

    let signature = format!("{}.{}", target.declaring_class(), key.signature());
    tracing::trace!(method = %signature, "invoking");
    target.invoke(&receiver_value, &arguments).map_err(|err| {
        invocation_failure(engine, ctx, expr, &err, method_failed(&signature), &arguments)
    })
}

/// `super.name(args)`: the declaring class's method, invoked on `this`
/// without virtual dispatch.
pub(super) fn evaluate_super_method(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    expr: ExprId,
    method: MethodId,
    args: &[ExprId],
) -> EvalResult {
    let tree = ctx.tree();
    let binding = tree.method(method);
    let declaring = tree.binary_name(binding.declaring_type);
    let key = tree.method_key(method);
    let signature = format!("{declaring}.{}", key.signature());

    let this = engine.this_value(ctx, expr)?;
    let class = ctx.load_class(&declaring)?;
    let target = class
        .find_method(&key)
        .or_else(|| {
            tree.generic_method_key(method)
                .and_then(|generic| class.find_method(&generic))
        })
        .ok_or_else(|| member_not_found(&format!("method {}", key.signature()), &declaring))?;

    let arguments = evaluate_arguments(engine, ctx, args, true)?;
    let arguments = pack_varargs(ctx, method, arguments)?;
    target.invoke(&this, &arguments).map_err(|err| {
        invocation_failure(engine, ctx, expr, &err, super_method_failed(&signature), &arguments)
    })
}

/// Runtime class a call on `value` dispatches against.
pub(super) fn class_of(ctx: &EvaluationContext<'_>, value: &Value) -> EvalResult<ClassRef> {
    match value {
        Value::Object(object) => Ok(object.class().clone()),
        Value::Array(array) => Ok(array.class().clone()),
        Value::Null => Err(null_receiver()),
        other => ctx.load_class(&other.class_name()),
    }
}

/// Interceptors first, then the session cache, then the erased signature of
/// the generic declaration.
fn resolve_method(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    class: &ClassRef,
    method: MethodId,
    key: &MemberKey,
) -> EvalResult<Arc<MethodDef>> {
    if let Some(resolved) = engine.interceptors().resolve_method(class, key) {
        return Ok(resolved);
    }
    let cache = ctx.member_cache();
    cache
        .method(class, key)
        .or_else(|| {
            ctx.tree()
                .generic_method_key(method)
                .and_then(|generic| cache.method(class, &generic))
        })
        .ok_or_else(|| member_not_found(&format!("method {}", key.signature()), class.name()))
}

/// Description of `key` on the nearest described class of the hierarchy.
fn describe(
    ctx: &EvaluationContext<'_>,
    class: &ClassRef,
    key: &MemberKey,
) -> Option<MethodDescription> {
    let registry = ctx.descriptions()?;
    let hierarchy = std::iter::successors(Some(class), |c| c.superclass()).map(|c| c.name());
    let component = registry.find_in_hierarchy(hierarchy)?;
    component.method(key).cloned()
}

/// Parameters ahead of the variadic one.
pub(super) fn fixed_parameters(ctx: &EvaluationContext<'_>, method: MethodId) -> usize {
    let binding = ctx.tree().method(method);
    let count = binding.parameter_types.len();
    if binding.is_varargs() {
        count.saturating_sub(1)
    } else {
        count
    }
}

/// Diagnostic for a failed reflective call. Exceptions thrown by the invoked
/// code are offered to the interceptors for rewriting first.
pub(super) fn invocation_failure(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    expr: ExprId,
    err: &ReflectError,
    wrapper: EvalError,
    arguments: &[Value],
) -> EvalError {
    if let Some(thrown) = err.target() {
        if let Some(rewritten) = engine.interceptors().rewrite_exception(ctx, expr, thrown) {
            return rewritten;
        }
        tracing::debug!(exception = %thrown.class_name, "invoked code threw");
        return wrapper
            .with_note(format!("arguments: {}", dump(arguments)))
            .with_cause(ErrorCause::Throwable(thrown.clone()));
    }
    wrapper
        .with_note(format!("arguments: {}", dump(arguments)))
        .with_cause(ErrorCause::Evaluation(Box::new(reflect_error(err))))
}
