//! Engine tests over hand-built trees.
//!
//! Each file assembles expressions with [`jeval_ir::TreeBuilder`] and
//! evaluates them against the bootstrap class registry. [`TestHooks`]
//! stands in for the host where a test needs `this`, pre-bound values or
//! failure substitution.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;

use jeval_ir::{ExprId, SyntaxTree, VariableId};
use jeval_runtime::{ClassRegistry, Value};

use crate::{
    AstEvaluationEngine, EvalError, EvalOutcome, EvalResult, Evaluation, EvaluationContext,
    EvaluationHooks,
};

mod invocation_tests;
mod names_tests;
mod structures_tests;

/// Evaluate `expr` with the standard engine, the bootstrap classes and no
/// host.
fn eval(tree: &SyntaxTree, expr: ExprId) -> EvalResult {
    let registry = ClassRegistry::new();
    let ctx = EvaluationContext::new(tree, &registry);
    AstEvaluationEngine::new().evaluate(&ctx, expr)
}

/// Evaluate `expr` with `hooks` as the host.
fn eval_with(tree: &SyntaxTree, registry: &ClassRegistry, hooks: &TestHooks, expr: ExprId) -> EvalResult {
    let ctx = EvaluationContext::new(tree, registry).with_hooks(hooks);
    AstEvaluationEngine::new().evaluate(&ctx, expr)
}

/// Scriptable host.
#[derive(Default)]
struct TestHooks {
    this: Option<Value>,
    bound: Vec<(ExprId, Value)>,
    parameter: Option<Value>,
    fallback: Option<Value>,
    visited: RefCell<Vec<ExprId>>,
    failures: RefCell<Vec<EvalError>>,
}

impl TestHooks {
    fn with_this(this: Value) -> Self {
        TestHooks {
            this: Some(this),
            ..Self::default()
        }
    }

    /// Answer `value` whenever `expr` is evaluated.
    fn bind(mut self, expr: ExprId, value: Value) -> Self {
        self.bound.push((expr, value));
        self
    }

    fn visited(&self) -> Vec<ExprId> {
        self.visited.borrow().clone()
    }
}

fn known(value: Option<&Value>) -> EvalOutcome {
    Ok(value.cloned().map_or(Evaluation::Unknown, Evaluation::Value))
}

impl EvaluationHooks for TestHooks {
    fn this_value(&self, _ctx: &EvaluationContext<'_>, _expr: ExprId) -> EvalOutcome {
        known(self.this.as_ref())
    }

    fn evaluate(&self, _ctx: &EvaluationContext<'_>, expr: ExprId) -> EvalOutcome {
        self.visited.borrow_mut().push(expr);
        known(
            self.bound
                .iter()
                .find(|(bound, _)| *bound == expr)
                .map(|(_, value)| value),
        )
    }

    fn evaluate_unknown_parameter(
        &self,
        _ctx: &EvaluationContext<'_>,
        _expr: ExprId,
        _parameter: VariableId,
    ) -> EvalOutcome {
        known(self.parameter.as_ref())
    }

    fn evaluation_failed(
        &self,
        _ctx: &EvaluationContext<'_>,
        _expr: ExprId,
        error: &EvalError,
    ) -> EvalOutcome {
        self.failures.borrow_mut().push(error.clone());
        known(self.fallback.as_ref())
    }
}
