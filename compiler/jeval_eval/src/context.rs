//! Per-pass evaluation state.
//!
//! An [`EvaluationContext`] borrows everything externally owned (the tree,
//! the class loader, the execution flow, the description registry and the
//! host hooks) and owns only the nesting counter. The member cache is shared
//! per session through an `Arc`.

use std::borrow::Cow;
use std::cell::Cell;
use std::sync::Arc;

use jeval_describe::DescriptionRegistry;
use jeval_ir::{ExprId, SyntaxTree, VariableId};
use jeval_runtime::{ClassLoader, ClassRef, MemberCache};

use crate::errors::{depth_limit_exceeded, EvalError, EvalResult};
use crate::flow::ExecutionFlow;
use crate::{EvalOutcome, Evaluation};

/// Host callbacks consulted during evaluation. Every method defaults to
/// "no opinion".
pub trait EvaluationHooks {
    /// Value of `this` at `expr`.
    fn this_value(&self, _ctx: &EvaluationContext<'_>, _expr: ExprId) -> EvalOutcome {
        Ok(Evaluation::Unknown)
    }

    /// Offered every expression before the evaluator chain runs.
    fn evaluate(&self, _ctx: &EvaluationContext<'_>, _expr: ExprId) -> EvalOutcome {
        Ok(Evaluation::Unknown)
    }

    /// Value of a method parameter no visible invocation supplies.
    fn evaluate_unknown_parameter(
        &self,
        _ctx: &EvaluationContext<'_>,
        _expr: ExprId,
        _parameter: VariableId,
    ) -> EvalOutcome {
        Ok(Evaluation::Unknown)
    }

    /// Offered every failure; a value replaces the error.
    fn evaluation_failed(
        &self,
        _ctx: &EvaluationContext<'_>,
        _expr: ExprId,
        _error: &EvalError,
    ) -> EvalOutcome {
        Ok(Evaluation::Unknown)
    }
}

/// State of one evaluation pass.
pub struct EvaluationContext<'a> {
    tree: &'a SyntaxTree,
    loader: &'a dyn ClassLoader,
    flow: Option<&'a dyn ExecutionFlow>,
    hooks: Option<&'a dyn EvaluationHooks>,
    descriptions: Option<&'a DescriptionRegistry>,
    members: Arc<MemberCache>,
    depth: Cell<usize>,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(tree: &'a SyntaxTree, loader: &'a dyn ClassLoader) -> Self {
        EvaluationContext {
            tree,
            loader,
            flow: None,
            hooks: None,
            descriptions: None,
            members: Arc::new(MemberCache::new()),
            depth: Cell::new(0),
        }
    }

    #[must_use]
    pub fn with_flow(mut self, flow: &'a dyn ExecutionFlow) -> Self {
        self.flow = Some(flow);
        self
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: &'a dyn EvaluationHooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    #[must_use]
    pub fn with_descriptions(mut self, descriptions: &'a DescriptionRegistry) -> Self {
        self.descriptions = Some(descriptions);
        self
    }

    /// Share a session-wide member cache across passes.
    #[must_use]
    pub fn with_member_cache(mut self, members: Arc<MemberCache>) -> Self {
        self.members = members;
        self
    }

    #[inline]
    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    #[inline]
    pub fn loader(&self) -> &'a dyn ClassLoader {
        self.loader
    }

    #[inline]
    pub fn flow(&self) -> Option<&'a dyn ExecutionFlow> {
        self.flow
    }

    #[inline]
    pub fn hooks(&self) -> Option<&'a dyn EvaluationHooks> {
        self.hooks
    }

    #[inline]
    pub fn descriptions(&self) -> Option<&'a DescriptionRegistry> {
        self.descriptions
    }

    #[inline]
    pub fn member_cache(&self) -> &MemberCache {
        &self.members
    }

    /// Load a class through the context's loader.
    pub fn load_class(&self, name: &str) -> EvalResult<ClassRef> {
        Ok(self.loader.load_class(name)?)
    }

    /// Source text of an expression.
    pub fn source(&self, expr: ExprId) -> Cow<'a, str> {
        self.tree.source_of(expr)
    }

    /// Current nesting of dispatch calls.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Enter one dispatch level; the guard leaves it again on drop.
    pub(crate) fn enter(&self, limit: Option<usize>) -> Result<DepthGuard<'_>, EvalError> {
        let depth = self.depth.get();
        if let Some(limit) = limit {
            if depth >= limit {
                return Err(depth_limit_exceeded(limit));
            }
        }
        self.depth.set(depth + 1);
        Ok(DepthGuard { depth: &self.depth })
    }
}

pub(crate) struct DepthGuard<'c> {
    depth: &'c Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

impl std::fmt::Debug for EvaluationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluationContext")
            .field("exprs", &self.tree.len())
            .field("flow", &self.flow.is_some())
            .field("hooks", &self.hooks.is_some())
            .field("descriptions", &self.descriptions.is_some())
            .field("depth", &self.depth.get())
            .finish_non_exhaustive()
    }
}
