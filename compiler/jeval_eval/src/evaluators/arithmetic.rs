//! Evaluation shared by the four numeric evaluators: literals, unary
//! operators, increments and left-to-right reduction of infix chains, all
//! in one fixed Java type.

use jeval_ir::{ExprId, ExprKind, InfixOp, PostfixOp, PrefixOp, PrimitiveKind};
use jeval_runtime::Value;

use crate::errors::{invariant_violation, EvalResult};
use crate::numeric;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext};

/// A Java numeric type computed natively.
pub(super) trait JavaNumber: Copy {
    const KIND: PrimitiveKind;

    fn parse(token: &str) -> EvalResult<Self>;

    /// Convert an operand already promoted to this type.
    fn from_value(value: &Value) -> EvalResult<Self>;

    fn into_value(self) -> Value;

    fn arith(op: InfixOp, a: Self, b: Self) -> EvalResult<Self>;

    fn negate(self) -> Self;

    /// `~x`; only integral types define it.
    fn complement(self) -> Option<Self>;

    /// Width and value of `-<magnitude>` for the one decimal literal that is
    /// only legal under unary minus (`2147483648`, `9223372036854775808L`).
    fn min_literal() -> Option<(u32, Self)>;
}

impl JavaNumber for i32 {
    const KIND: PrimitiveKind = PrimitiveKind::Int;

    fn parse(token: &str) -> EvalResult<Self> {
        numeric::parse_int(token)
    }

    fn from_value(value: &Value) -> EvalResult<Self> {
        numeric::as_int(value)
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn arith(op: InfixOp, a: Self, b: Self) -> EvalResult<Self> {
        numeric::int_arith(op, a, b)
    }

    fn negate(self) -> Self {
        self.wrapping_neg()
    }

    fn complement(self) -> Option<Self> {
        Some(!self)
    }

    fn min_literal() -> Option<(u32, Self)> {
        Some((32, i32::MIN))
    }
}

impl JavaNumber for i64 {
    const KIND: PrimitiveKind = PrimitiveKind::Long;

    fn parse(token: &str) -> EvalResult<Self> {
        numeric::parse_long(token)
    }

    fn from_value(value: &Value) -> EvalResult<Self> {
        numeric::as_long(value)
    }

    fn into_value(self) -> Value {
        Value::Long(self)
    }

    fn arith(op: InfixOp, a: Self, b: Self) -> EvalResult<Self> {
        numeric::long_arith(op, a, b)
    }

    fn negate(self) -> Self {
        self.wrapping_neg()
    }

    fn complement(self) -> Option<Self> {
        Some(!self)
    }

    fn min_literal() -> Option<(u32, Self)> {
        Some((64, i64::MIN))
    }
}

impl JavaNumber for f32 {
    const KIND: PrimitiveKind = PrimitiveKind::Float;

    fn parse(token: &str) -> EvalResult<Self> {
        numeric::parse_float(token)
    }

    fn from_value(value: &Value) -> EvalResult<Self> {
        numeric::as_float(value)
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn arith(op: InfixOp, a: Self, b: Self) -> EvalResult<Self> {
        numeric::float_arith(op, a, b)
    }

    fn negate(self) -> Self {
        -self
    }

    fn complement(self) -> Option<Self> {
        None
    }

    fn min_literal() -> Option<(u32, Self)> {
        None
    }
}

impl JavaNumber for f64 {
    const KIND: PrimitiveKind = PrimitiveKind::Double;

    fn parse(token: &str) -> EvalResult<Self> {
        numeric::parse_double(token)
    }

    fn from_value(value: &Value) -> EvalResult<Self> {
        numeric::as_double(value)
    }

    fn into_value(self) -> Value {
        Value::Double(self)
    }

    fn arith(op: InfixOp, a: Self, b: Self) -> EvalResult<Self> {
        numeric::double_arith(op, a, b)
    }

    fn negate(self) -> Self {
        -self
    }

    fn complement(self) -> Option<Self> {
        None
    }

    fn min_literal() -> Option<(u32, Self)> {
        None
    }
}

/// Evaluate an expression whose static type is `N`.
pub(super) fn evaluate_number<N: JavaNumber>(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    expr: ExprId,
) -> EvalOutcome {
    let tree = ctx.tree();
    let value = match tree.kind(expr) {
        ExprKind::NumberLiteral(token) => N::parse(tree.name(token))?.into_value(),
        ExprKind::Prefix { op, operand } => match op {
            PrefixOp::Plus => operand_as::<N>(engine, ctx, operand)?.into_value(),
            PrefixOp::Minus => match min_literal::<N>(ctx, operand) {
                Some(min) => min.into_value(),
                None => operand_as::<N>(engine, ctx, operand)?.negate().into_value(),
            },
            PrefixOp::Complement => operand_as::<N>(engine, ctx, operand)?
                .complement()
                .ok_or_else(|| {
                    invariant_violation(format!("operator ~ is not defined on {}", N::KIND.name()))
                })?
                .into_value(),
            PrefixOp::Increment => step_operand(engine, ctx, operand, N::KIND, 1)?,
            PrefixOp::Decrement => step_operand(engine, ctx, operand, N::KIND, -1)?,
            PrefixOp::Not => {
                return Err(invariant_violation(format!(
                    "operator ! is not defined on {}",
                    N::KIND.name()
                )))
            }
        },
        ExprKind::Postfix { op, operand } => {
            step_operand(engine, ctx, operand, N::KIND, postfix_delta(op))?
        }
        ExprKind::Infix { op, operands } => {
            let operands = tree.list(operands);
            let Some((&first, rest)) = operands.split_first() else {
                return Err(invariant_violation("infix expression without operands"));
            };
            let mut acc = operand_as::<N>(engine, ctx, first)?;
            for &operand in rest {
                let rhs = operand_as::<N>(engine, ctx, operand)?;
                acc = N::arith(op, acc, rhs)?;
            }
            acc.into_value()
        }
        _ => return Ok(Evaluation::Unknown),
    };
    Ok(value.into())
}

/// `++`/`--` on a `byte`, `short` or `char` variable; every other form of
/// those types is left to the structural evaluators.
pub(super) fn evaluate_increment(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    expr: ExprId,
    kind: PrimitiveKind,
) -> EvalOutcome {
    let value = match ctx.tree().kind(expr) {
        ExprKind::Prefix {
            op: PrefixOp::Increment,
            operand,
        } => step_operand(engine, ctx, operand, kind, 1)?,
        ExprKind::Prefix {
            op: PrefixOp::Decrement,
            operand,
        } => step_operand(engine, ctx, operand, kind, -1)?,
        ExprKind::Postfix { op, operand } => step_operand(engine, ctx, operand, kind, postfix_delta(op))?,
        _ => return Ok(Evaluation::Unknown),
    };
    Ok(value.into())
}

fn operand_as<N: JavaNumber>(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    operand: ExprId,
) -> EvalResult<N> {
    N::from_value(&engine.evaluate(ctx, operand)?)
}

fn min_literal<N: JavaNumber>(ctx: &EvaluationContext<'_>, operand: ExprId) -> Option<N> {
    let (bits, min) = N::min_literal()?;
    let tree = ctx.tree();
    match tree.kind(operand) {
        ExprKind::NumberLiteral(token) if numeric::is_min_magnitude(tree.name(token), bits) => {
            Some(min)
        }
        _ => None,
    }
}

/// The variable's current value moved by one. Prefix and postfix forms both
/// yield the moved value: the flow records the increment node itself as the
/// assignment, so the operand already reads the value before this step.
fn step_operand(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    operand: ExprId,
    kind: PrimitiveKind,
    delta: i32,
) -> EvalResult<Value> {
    let current = engine.evaluate(ctx, operand)?;
    numeric::step(&current, kind, delta)
}

fn postfix_delta(op: PostfixOp) -> i32 {
    match op {
        PostfixOp::Increment => 1,
        PostfixOp::Decrement => -1,
    }
}
