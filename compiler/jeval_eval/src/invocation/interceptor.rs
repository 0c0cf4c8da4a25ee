//! Invocation interceptors.
//!
//! Toolkit plugins register interceptors to fake calls that are unsafe or
//! meaningless at design time (showing a dialog, allocating a native
//! resource), to pick a different reflective method for a signature, or to
//! turn a known exception into a friendlier diagnostic.
//!
//! The chain is ordered by ascending [`InvocationInterceptor::priority`];
//! interceptors of equal priority keep their registration order. The first
//! answer other than [`Evaluation::Unknown`] wins.

use std::sync::Arc;

use jeval_ir::{ExprId, MemberKey, MethodId, TypeId};
use jeval_runtime::{ClassRef, ConstructorDef, MethodDef, Throwable, Value};

use crate::{EvalError, EvalOutcome, Evaluation, EvaluationContext};

/// A resolved method call about to be made reflectively.
#[derive(Debug)]
pub struct MethodCall<'a> {
    pub expr: ExprId,
    pub method: MethodId,
    /// Class the method was resolved against.
    pub class: &'a ClassRef,
    pub target: &'a MethodDef,
    /// `null` for static methods.
    pub receiver: &'a Value,
    pub arguments: &'a [Value],
}

/// A resolved constructor call about to be made reflectively.
#[derive(Debug)]
pub struct ConstructorCall<'a> {
    pub expr: ExprId,
    /// Created type.
    pub ty: TypeId,
    pub class: &'a ClassRef,
    pub constructor: &'a ConstructorDef,
    pub arguments: &'a [Value],
}

/// Creation of an anonymous class.
#[derive(Debug)]
pub struct AnonymousCall<'a> {
    pub expr: ExprId,
    /// The anonymous type itself.
    pub ty: TypeId,
    /// First non-anonymous, non-abstract supertype.
    pub concrete: TypeId,
    pub constructor: MethodId,
    pub arguments: &'a [Value],
}

pub trait InvocationInterceptor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lower runs earlier.
    fn priority(&self) -> i32 {
        0
    }

    fn evaluate_method(&self, _ctx: &EvaluationContext<'_>, _call: &MethodCall<'_>) -> EvalOutcome {
        Ok(Evaluation::Unknown)
    }

    fn evaluate_constructor(
        &self,
        _ctx: &EvaluationContext<'_>,
        _call: &ConstructorCall<'_>,
    ) -> EvalOutcome {
        Ok(Evaluation::Unknown)
    }

    fn evaluate_anonymous(
        &self,
        _ctx: &EvaluationContext<'_>,
        _call: &AnonymousCall<'_>,
    ) -> EvalOutcome {
        Ok(Evaluation::Unknown)
    }

    /// Method to invoke for `key` on `class` instead of the reflective one.
    fn resolve_method(&self, _class: &ClassRef, _key: &MemberKey) -> Option<Arc<MethodDef>> {
        None
    }

    /// Replacement diagnostic for an exception thrown by invoked code.
    fn rewrite_exception(
        &self,
        _ctx: &EvaluationContext<'_>,
        _expr: ExprId,
        _thrown: &Throwable,
    ) -> Option<EvalError> {
        None
    }
}

/// Interceptors in consultation order.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn InvocationInterceptor>>,
}

impl InterceptorChain {
    /// Order by ascending priority; the sort is stable, so equal priorities
    /// keep registration order.
    pub fn new(mut interceptors: Vec<Arc<dyn InvocationInterceptor>>) -> Self {
        interceptors.sort_by_key(|interceptor| interceptor.priority());
        InterceptorChain { interceptors }
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn InvocationInterceptor>> {
        self.interceptors.iter()
    }

    /// Names in consultation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    pub(crate) fn evaluate_method(
        &self,
        ctx: &EvaluationContext<'_>,
        call: &MethodCall<'_>,
    ) -> EvalOutcome {
        for interceptor in &self.interceptors {
            let outcome = interceptor.evaluate_method(ctx, call)?;
            if !outcome.is_unknown() {
                tracing::debug!(
                    interceptor = interceptor.name(),
                    method = call.target.name(),
                    "interceptor claimed method invocation"
                );
                return Ok(outcome);
            }
        }
        Ok(Evaluation::Unknown)
    }

    pub(crate) fn evaluate_constructor(
        &self,
        ctx: &EvaluationContext<'_>,
        call: &ConstructorCall<'_>,
    ) -> EvalOutcome {
        for interceptor in &self.interceptors {
            let outcome = interceptor.evaluate_constructor(ctx, call)?;
            if !outcome.is_unknown() {
                tracing::debug!(
                    interceptor = interceptor.name(),
                    class = call.class.name(),
                    "interceptor claimed constructor invocation"
                );
                return Ok(outcome);
            }
        }
        Ok(Evaluation::Unknown)
    }

    pub(crate) fn evaluate_anonymous(
        &self,
        ctx: &EvaluationContext<'_>,
        call: &AnonymousCall<'_>,
    ) -> EvalOutcome {
        for interceptor in &self.interceptors {
            let outcome = interceptor.evaluate_anonymous(ctx, call)?;
            if !outcome.is_unknown() {
                tracing::debug!(
                    interceptor = interceptor.name(),
                    "interceptor claimed anonymous class creation"
                );
                return Ok(outcome);
            }
        }
        Ok(Evaluation::Unknown)
    }

    pub(crate) fn resolve_method(&self, class: &ClassRef, key: &MemberKey) -> Option<Arc<MethodDef>> {
        self.interceptors
            .iter()
            .find_map(|interceptor| interceptor.resolve_method(class, key))
    }

    pub(crate) fn rewrite_exception(
        &self,
        ctx: &EvaluationContext<'_>,
        expr: ExprId,
        thrown: &Throwable,
    ) -> Option<EvalError> {
        self.interceptors
            .iter()
            .find_map(|interceptor| interceptor.rewrite_exception(ctx, expr, thrown))
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
