//! The evaluator contract.

use jeval_ir::{ExprId, TypeBinding};

use crate::{AstEvaluationEngine, EvalOutcome, EvaluationContext};

/// One family of expression syntax.
///
/// The engine offers every expression to its evaluators in order; the first
/// answer other than [`crate::Evaluation::Unknown`] wins. Sub-expressions
/// go back through `engine.evaluate` so hooks, depth accounting and the
/// whole chain apply at every level.
pub trait ExpressionEvaluator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Evaluate `expr`, whose static type is `ty` and whose qualified type
    /// name (`int`, `java.lang.String`, `int[]`) is `type_name`.
    fn evaluate(
        &self,
        engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        ty: &TypeBinding,
        type_name: &str,
    ) -> EvalOutcome;
}
