//! The dispatch engine.
//!
//! Every expression goes through [`AstEvaluationEngine::evaluate`]:
//!
//! 1. Depth accounting and stack growth
//! 2. The context's `evaluate` hook
//! 3. `null`, parentheses and `this`, handled directly
//! 4. The evaluator chain, in order, until one claims the expression
//! 5. On failure, the context's `evaluation_failed` hook

use std::sync::Arc;

use jeval_ir::{ExprId, ExprKind};
use jeval_runtime::{ProxyFactory, StubProxyFactory, Value};

use crate::errors::{not_evaluated, EvalError, EvalResult};
use crate::evaluators::standard_evaluators;
use crate::invocation::{InterceptorChain, InvocationInterceptor};
use crate::stack::ensure_sufficient_stack;
use crate::{EvalConfig, Evaluation, EvaluationContext, ExpressionEvaluator};

/// Evaluates expressions of a [`jeval_ir::SyntaxTree`] to runtime values.
///
/// The engine holds no per-pass state; one engine serves any number of
/// contexts, including nested (re-entrant) evaluation on the same thread.
pub struct AstEvaluationEngine {
    evaluators: Vec<Box<dyn ExpressionEvaluator>>,
    interceptors: InterceptorChain,
    proxies: Arc<dyn ProxyFactory>,
    config: EvalConfig,
}

impl AstEvaluationEngine {
    /// Standard evaluators, no interceptors, default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    #[inline]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    #[inline]
    pub fn interceptors(&self) -> &InterceptorChain {
        &self.interceptors
    }

    #[inline]
    pub fn proxy_factory(&self) -> &Arc<dyn ProxyFactory> {
        &self.proxies
    }

    /// Names of the evaluators in consultation order.
    pub fn evaluator_names(&self) -> Vec<&'static str> {
        self.evaluators.iter().map(|e| e.name()).collect()
    }

    /// Evaluate `expr` to a value.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>, expr: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| {
            let _depth = ctx.enter(self.config.max_depth)?;
            let _span = tracing::trace_span!(
                "evaluate",
                expr = expr.raw(),
                kind = ctx.tree().kind(expr).description()
            )
            .entered();
            match self.dispatch(ctx, expr) {
                Ok(value) => Ok(value),
                Err(error) => self.recover(ctx, expr, error.with_source(ctx.source(expr))),
            }
        })
    }

    /// Value of `this` at `expr`, as supplied by the context's hooks.
    pub fn this_value(&self, ctx: &EvaluationContext<'_>, expr: ExprId) -> EvalResult {
        if let Some(hooks) = ctx.hooks() {
            if let Evaluation::Value(value) = hooks.this_value(ctx, expr)? {
                return Ok(value);
            }
        }
        Err(not_evaluated("this expression"))
    }

    fn dispatch(&self, ctx: &EvaluationContext<'_>, expr: ExprId) -> EvalResult {
        let tree = ctx.tree();
        if let Some(hooks) = ctx.hooks() {
            if let Evaluation::Value(value) = hooks.evaluate(ctx, expr)? {
                return Ok(value);
            }
        }
        match tree.kind(expr) {
            ExprKind::NullLiteral => return Ok(Value::Null),
            ExprKind::Parenthesized(inner) => return self.evaluate(ctx, inner),
            ExprKind::This => return self.this_value(ctx, expr),
            _ => {}
        }

        let node = tree.expr(expr);
        let ty = tree.type_binding(node.ty);
        let type_name = tree.qualified_name(node.ty);
        for evaluator in &self.evaluators {
            if let Evaluation::Value(value) = evaluator.evaluate(self, ctx, expr, ty, &type_name)? {
                tracing::trace!(evaluator = evaluator.name(), "claimed");
                return Ok(value);
            }
        }
        Err(not_evaluated(node.kind.description()))
    }

    fn recover(&self, ctx: &EvaluationContext<'_>, expr: ExprId, error: EvalError) -> EvalResult {
        if let Some(hooks) = ctx.hooks() {
            if let Evaluation::Value(value) = hooks.evaluation_failed(ctx, expr, &error)? {
                tracing::debug!(code = %error.code(), "failure replaced by hook");
                return Ok(value);
            }
        }
        Err(error)
    }
}

impl Default for AstEvaluationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AstEvaluationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AstEvaluationEngine")
            .field("evaluators", &self.evaluator_names())
            .field("interceptors", &self.interceptors)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Assembles an [`AstEvaluationEngine`].
#[derive(Default)]
pub struct EngineBuilder {
    custom: Vec<Box<dyn ExpressionEvaluator>>,
    replace_standard: Option<Vec<Box<dyn ExpressionEvaluator>>>,
    interceptors: Vec<Arc<dyn InvocationInterceptor>>,
    proxies: Option<Arc<dyn ProxyFactory>>,
    config: EvalConfig,
}

impl EngineBuilder {
    /// Add an evaluator consulted before the standard chain.
    #[must_use]
    pub fn evaluator(mut self, evaluator: impl ExpressionEvaluator + 'static) -> Self {
        self.custom.push(Box::new(evaluator));
        self
    }

    /// Replace the standard chain entirely.
    #[must_use]
    pub fn evaluators(mut self, evaluators: Vec<Box<dyn ExpressionEvaluator>>) -> Self {
        self.replace_standard = Some(evaluators);
        self
    }

    #[must_use]
    pub fn interceptor(mut self, interceptor: impl InvocationInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    #[must_use]
    pub fn shared_interceptor(mut self, interceptor: Arc<dyn InvocationInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    #[must_use]
    pub fn proxy_factory(mut self, factory: Arc<dyn ProxyFactory>) -> Self {
        self.proxies = Some(factory);
        self
    }

    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> AstEvaluationEngine {
        let mut evaluators = self.custom;
        evaluators.extend(self.replace_standard.unwrap_or_else(standard_evaluators));
        AstEvaluationEngine {
            evaluators,
            interceptors: InterceptorChain::new(self.interceptors),
            proxies: self.proxies.unwrap_or_else(|| Arc::new(StubProxyFactory)),
            config: self.config,
        }
    }
}
