//! `a.b` where the qualifier is itself a name: static constants
//! (`Color.RED`), fields of variables and `array.length`.

use jeval_ir::{ExprId, ExprKind, NameBinding, TypeBinding};

use super::fields::{read_instance, read_static};
use crate::errors::member_not_found;
use crate::{AstEvaluationEngine, EvalOutcome, Evaluation, EvaluationContext, ExpressionEvaluator};

pub struct QualifiedNameEvaluator;

impl ExpressionEvaluator for QualifiedNameEvaluator {
    fn name(&self) -> &'static str {
        "qualified name"
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
        let ExprKind::QualifiedName {
            qualifier,
            name,
            binding,
        } = tree.kind(expr)
        else {
            return Ok(Evaluation::Unknown);
        };
        let name = tree.name(name);
        let value = match binding {
            NameBinding::Variable(field) => {
                let variable = tree.variable(field);
                let qualifier_type = match tree.kind(qualifier) {
                    ExprKind::SimpleName {
                        binding: NameBinding::Type(ty),
                        ..
                    }
                    | ExprKind::QualifiedName {
                        binding: NameBinding::Type(ty),
                        ..
                    } => Some(ty),
                    _ => None,
                };
                match (qualifier_type, variable.declaring_type) {
                    (Some(ty), _) => read_static(ctx, &tree.binary_name(ty), name)?,
                    (None, Some(owner)) if variable.is_static() => {
                        read_static(ctx, &tree.binary_name(owner), name)?
                    }
                    _ => read_instance(&engine.evaluate(ctx, qualifier)?, name)?,
                }
            }
            NameBinding::Unresolved if name == "length" && tree.type_of(qualifier).is_array() => {
                let array = engine.evaluate(ctx, qualifier)?;
                read_instance(&array, name)?
            }
            NameBinding::Type(_) | NameBinding::Package => return Ok(Evaluation::Unknown),
            NameBinding::Unresolved => {
                return Err(member_not_found(
                    name,
                    &tree.qualified_name(tree.expr(qualifier).ty),
                ))
            }
        };
        Ok(value.into())
    }
}
