//! `boolean` expressions: literals, `!`, comparisons, logical operators and
//! `instanceof`.

use smallvec::SmallVec;

use jeval_ir::{ExprId, ExprKind, InfixOp, PrefixOp, TypeBinding};
use jeval_runtime::{reflect, Value};

use super::as_boolean;
use crate::errors::{invariant_violation, java_exception, EvalResult};
use crate::numeric;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct BooleanEvaluator;

impl ExpressionEvaluator for BooleanEvaluator {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn evaluate(
        &self,
        engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        _ty: &TypeBinding,
        type_name: &str,
    ) -> EvalOutcome {
        if type_name != "boolean" {
            return Ok(Evaluation::Unknown);
        }
        let tree = ctx.tree();
        let result = match tree.kind(expr) {
            ExprKind::BooleanLiteral(value) => value,
            ExprKind::Prefix {
                op: PrefixOp::Not,
                operand,
            } => !as_boolean(&engine.evaluate(ctx, operand)?)?,
            ExprKind::Infix { op, operands } => {
                // Every operand is evaluated, including the right-hand side
                // of `&&` and `||`.
                let values = tree
                    .list(operands)
                    .iter()
                    .map(|&operand| engine.evaluate(ctx, operand))
                    .collect::<EvalResult<SmallVec<[Value; 4]>>>()?;
                infix(op, &values)?
            }
            ExprKind::InstanceOf { expr: operand, target } => {
                let value = engine.evaluate(ctx, operand)?;
                reflect::is_instance(&value, &tree.binary_name(target))
            }
            _ => return Ok(Evaluation::Unknown),
        };
        Ok(Value::Boolean(result).into())
    }
}

fn infix(op: InfixOp, values: &[Value]) -> EvalResult<bool> {
    let Some((first, rest)) = values.split_first() else {
        return Err(invariant_violation("infix expression without operands"));
    };
    match op {
        InfixOp::And | InfixOp::Or | InfixOp::BitAnd | InfixOp::BitOr | InfixOp::BitXor => {
            let mut acc = as_boolean(first)?;
            for value in rest {
                let rhs = as_boolean(value)?;
                acc = match op {
                    InfixOp::And | InfixOp::BitAnd => acc & rhs,
                    InfixOp::Or | InfixOp::BitOr => acc | rhs,
                    _ => acc ^ rhs,
                };
            }
            Ok(acc)
        }
        InfixOp::Eq | InfixOp::NotEq => {
            let negate = op == InfixOp::NotEq;
            let mut acc = first.clone();
            for value in rest {
                acc = Value::Boolean(equals(&acc, value)? != negate);
            }
            as_boolean(&acc)
        }
        _ if op.is_relational() => match values {
            [left, right] => numeric::compare(op, left, right),
            _ => Err(invariant_violation(format!(
                "relational operator {} with {} operands",
                op.as_symbol(),
                values.len()
            ))),
        },
        _ => Err(invariant_violation(format!(
            "operator {} does not yield a boolean",
            op.as_symbol()
        ))),
    }
}

/// `==` as the designer sees it: numeric operands compare after binary
/// promotion, everything else by value equality.
fn equals(left: &Value, right: &Value) -> EvalResult<bool> {
    if numeric::binary_promotion(left, right).is_some() {
        return numeric::compare(InfixOp::Eq, left, right);
    }
    reflect::java_equals(left, right).map_err(java_exception)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equality_chains_compare_the_previous_result() {
        let values = [Value::Int(1), Value::Int(1), Value::Boolean(true)];
        assert_eq!(infix(InfixOp::Eq, &values).ok(), Some(true));
    }

    #[test]
    fn mixed_numeric_equality_promotes() {
        assert_eq!(equals(&Value::Int(2), &Value::Double(2.0)).ok(), Some(true));
        assert_eq!(equals(&Value::Char(65), &Value::Int(65)).ok(), Some(true));
    }

    #[test]
    fn strings_compare_by_value() {
        assert_eq!(
            equals(&Value::string("a"), &Value::string("a")).ok(),
            Some(true)
        );
        assert_eq!(equals(&Value::Null, &Value::string("a")).ok(), Some(false));
    }

    #[test]
    fn relational_requires_two_operands() {
        let values = [Value::Int(1), Value::Int(2), Value::Int(3)];
        assert!(infix(InfixOp::Lt, &values).is_err());
    }

    #[test]
    fn xor_folds_left_to_right() {
        let values = [Value::Boolean(true), Value::Boolean(true), Value::Boolean(true)];
        assert_eq!(infix(InfixOp::BitXor, &values).ok(), Some(true));
    }
}
