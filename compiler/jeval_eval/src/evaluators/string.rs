//! `java.lang.String` literals and concatenation.

use jeval_ir::{ExprId, ExprKind, InfixOp, TypeBinding};
use jeval_runtime::Value;

use super::stringify;
use crate::errors::{invariant_violation, EvalResult};
use crate::numeric;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

const STRING: &str = "java.lang.String";

pub struct StringEvaluator;

impl ExpressionEvaluator for StringEvaluator {
    fn name(&self) -> &'static str {
        "string"
    }

    fn evaluate(
        &self,
        engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        _ty: &TypeBinding,
        type_name: &str,
    ) -> EvalOutcome {
        if type_name != STRING {
            return Ok(Evaluation::Unknown);
        }
        let tree = ctx.tree();
        match tree.kind(expr) {
            ExprKind::StringLiteral(text) => Ok(Value::string(tree.name(text)).into()),
            ExprKind::Infix {
                op: InfixOp::Add,
                operands,
            } => Ok(Value::string(concat(engine, ctx, tree.list(operands))?).into()),
            ExprKind::Infix { op, .. } => Err(invariant_violation(format!(
                "operator {} does not yield a String",
                op.as_symbol()
            ))),
            _ => Ok(Evaluation::Unknown),
        }
    }
}

/// Left-to-right `+`: numeric operands ahead of the first `String` operand
/// add numerically (`1 + 2 + "a"` is `"3a"`), everything after it is
/// appended as `String.valueOf`.
fn concat(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    operands: &[ExprId],
) -> EvalResult<String> {
    let tree = ctx.tree();
    let is_string = |operand: ExprId| tree.qualified_name(tree.expr(operand).ty) == STRING;
    let Some((&first, rest)) = operands.split_first() else {
        return Err(invariant_violation("infix expression without operands"));
    };
    let mut leading = engine.evaluate(ctx, first)?;
    let mut text = if is_string(first) {
        Some(stringify(&leading)?)
    } else {
        None
    };
    for &operand in rest {
        let value = engine.evaluate(ctx, operand)?;
        if let Some(text) = text.as_mut() {
            text.push_str(&stringify(&value)?);
            continue;
        }
        let both_numeric =
            numeric::numeric_kind(&leading).is_some() && numeric::numeric_kind(&value).is_some();
        if both_numeric && !is_string(operand) {
            leading = numeric::binary(InfixOp::Add, &leading, &value)?;
        } else {
            let mut joined = stringify(&leading)?;
            joined.push_str(&stringify(&value)?);
            text = Some(joined);
        }
    }
    match text {
        Some(text) => Ok(text),
        None => stringify(&leading),
    }
}
