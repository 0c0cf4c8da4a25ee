//! `java.lang.Class` values: `T.class` and unqualified `getClass()`.

use jeval_ir::{ExprId, ExprKind, TypeBinding};
use jeval_runtime::Value;

use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct ClassEvaluator;

impl ExpressionEvaluator for ClassEvaluator {
    fn name(&self) -> &'static str {
        "class"
    }

    fn evaluate(
        &self,
        _engine: &AstEvaluationEngine,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        _ty: &TypeBinding,
        type_name: &str,
    ) -> EvalOutcome {
        if type_name != "java.lang.Class" {
            return Ok(Evaluation::Unknown);
        }
        let tree = ctx.tree();
        let target = match tree.kind(expr) {
            ExprKind::TypeLiteral(target) => target,
            ExprKind::MethodInvocation {
                receiver, name, args, ..
            } if tree.name(name) == "getClass" && tree.list(args).is_empty() => {
                let enclosing = match receiver.map(|r| tree.unparenthesized(r)) {
                    None => tree.enclosing_type(expr),
                    Some(r) if matches!(tree.kind(r), ExprKind::This) => Some(tree.expr(r).ty),
                    Some(_) => return Ok(Evaluation::Unknown),
                };
                let Some(enclosing) = enclosing else {
                    return Ok(Evaluation::Unknown);
                };
                enclosing
            }
            _ => return Ok(Evaluation::Unknown),
        };
        let class = ctx.load_class(&tree.binary_name(target))?;
        Ok(Value::Class(class).into())
    }
}
