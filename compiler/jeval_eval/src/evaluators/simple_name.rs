//! Unqualified names: constants, fields of the code under evaluation, local
//! variables and method parameters.

use jeval_ir::{ExprId, ExprKind, NameBinding, TypeBinding, VariableId};
use jeval_runtime::Value;

use super::fields::{assigned_value, read_own_field, read_static};
use crate::errors::{no_method_invocation, no_simple_name_found, EvalResult};
use crate::invocation::{invocation_arguments, pack_varargs};
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct SimpleNameEvaluator;

impl ExpressionEvaluator for SimpleNameEvaluator {
    fn name(&self) -> &'static str {
        "simple name"
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
        let ExprKind::SimpleName { name, binding } = tree.kind(expr) else {
            return Ok(Evaluation::Unknown);
        };
        let variable = match binding {
            NameBinding::Variable(variable) => variable,
            NameBinding::Type(_) | NameBinding::Package => return Ok(Evaluation::Unknown),
            NameBinding::Unresolved => return Err(no_simple_name_found(tree.name(name))),
        };
        let binding = tree.variable(variable);

        if binding.is_field() && binding.is_static() {
            if let Some(owner) = binding.declaring_type {
                match read_static(ctx, &tree.binary_name(owner), &binding.name) {
                    Ok(value) => return Ok(value.into()),
                    Err(error) => {
                        tracing::trace!(name = %binding.name, %error, "not a loadable constant");
                    }
                }
            }
        }

        if binding.is_field() {
            return match read_own_field(engine, ctx, expr, variable)? {
                Evaluation::Unknown => Err(no_simple_name_found(&binding.name)),
                known => Ok(known),
            };
        }
        if let Some(assigned) = ctx.flow().and_then(|flow| flow.last_assignment(variable, expr)) {
            return assigned_value(engine, ctx, assigned, binding.ty).map(Evaluation::Value);
        }
        if binding.is_parameter() {
            return parameter_value(engine, ctx, expr, variable).map(Evaluation::Value);
        }
        Err(no_simple_name_found(&binding.name))
    }
}

/// A parameter takes its argument from the first invocation of its method
/// in the flow; without one the host decides.
fn parameter_value(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    expr: ExprId,
    parameter: VariableId,
) -> EvalResult {
    let tree = ctx.tree();
    let binding = tree.variable(parameter);
    let index = binding.index as usize;
    let invocation = ctx
        .flow()
        .zip(binding.declaring_method)
        .and_then(|(flow, method)| flow.invocations(method).first().copied());
    if let (Some(invocation), Some(method)) = (invocation, binding.declaring_method) {
        let args = invocation_arguments(tree, invocation);
        if tree.method(method).is_varargs() {
            let values = args
                .iter()
                .map(|&arg| engine.evaluate(ctx, arg))
                .collect::<EvalResult<Vec<Value>>>()?;
            let packed = pack_varargs(ctx, method, values)?;
            if let Some(value) = packed.into_iter().nth(index) {
                return Ok(value);
            }
        } else if let Some(&arg) = args.get(index) {
            return engine.evaluate(ctx, arg);
        }
    }
    if let Some(hooks) = ctx.hooks() {
        if let Evaluation::Value(value) = hooks.evaluate_unknown_parameter(ctx, expr, parameter)? {
            return Ok(value);
        }
    }
    Err(no_method_invocation(&binding.name))
}
