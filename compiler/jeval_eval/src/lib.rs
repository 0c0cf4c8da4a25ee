//! Jeval Eval - design-time evaluation of Java expressions.
//!
//! Given a resolved expression tree, a class loader and (optionally) an
//! execution flow, this crate computes the runtime value an expression would
//! have, the way a visual designer needs it to render a form without running
//! the application.
//!
//! # Architecture
//!
//! - [`AstEvaluationEngine`]: the dispatcher. Hooks first, then an ordered
//!   chain of [`ExpressionEvaluator`]s; the first non-[`Evaluation::Unknown`]
//!   answer wins.
//! - [`evaluators`]: literals, operators, names, fields, arrays, casts,
//!   conditionals and assignments.
//! - [`invocation`]: method, super-method and constructor calls, anonymous
//!   classes, local-method simulation, varargs and interceptors.
//! - [`flow`]: which assignment or invocation supplies a variable's value.
//! - [`EvaluationContext`]: per-pass state borrowed from the host.
//!
//! Java numeric semantics (32/64-bit wrapping, IEEE floats, promotion) are
//! kept exact.

mod config;
mod context;
mod engine;
pub mod errors;
mod evaluator;
pub mod evaluators;
pub mod flow;
pub mod invocation;
mod numeric;
mod outcome;
mod stack;

pub use config::{EvalConfig, DEFAULT_MAX_DEPTH, DEFAULT_RETURN_TAG};
pub use context::{EvaluationContext, EvaluationHooks};
pub use engine::{AstEvaluationEngine, EngineBuilder};
pub use errors::{ErrorCause, ErrorCode, EvalError, EvalErrorKind, EvalResult};
pub use evaluator::ExpressionEvaluator;
pub use flow::{Assigned, ExecutionFlow, FlowDescription};
pub use invocation::{
    AnonymousCall, ConstructorCall, InterceptorChain, InvocationInterceptor, MethodCall,
};
pub use outcome::{EvalOutcome, Evaluation};
pub use stack::ensure_sufficient_stack;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=jeval_eval=debug` or
/// `RUST_LOG=jeval_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
mod tests;
