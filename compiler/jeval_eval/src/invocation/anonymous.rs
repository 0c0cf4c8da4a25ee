//! Anonymous class creation.
//!
//! The body of an anonymous class cannot run at design time. Interceptors
//! may supply an instance; otherwise event listeners (a supertype whose
//! simple name ends with a configured suffix, `Listener` or `Handler` by
//! default) get a stub whose methods do nothing, and everything else fails
//! with an anonymous-evaluation error that constructor arguments downgrade
//! to `null`.

use std::sync::Arc;

use jeval_ir::{ExprId, MethodId, SyntaxTree, TypeId};
use jeval_runtime::{ProxyRequest, StubBehavior, Value};

use super::AnonymousCall;
use crate::errors::{anonymous_evaluation, reflect_error, EvalResult};
use crate::{AstEvaluationEngine, EvalConfig, Evaluation, EvaluationContext};

pub(super) fn evaluate_anonymous(
    engine: &AstEvaluationEngine,
    ctx: &EvaluationContext<'_>,
    expr: ExprId,
    ty: TypeId,
    constructor: MethodId,
    arguments: &[Value],
) -> EvalResult {
    let tree = ctx.tree();
    let call = AnonymousCall {
        expr,
        ty,
        concrete: concrete_supertype(tree, ty),
        constructor,
        arguments,
    };
    if let Evaluation::Value(value) = engine.interceptors().evaluate_anonymous(ctx, &call)? {
        return Ok(value);
    }
    if !is_listener(engine.config(), tree, ty) {
        return Err(anonymous_evaluation(&tree.binary_name(ty)));
    }

    let binding = tree.type_binding(ty);
    let superclass = match binding.superclass {
        Some(superclass) => ctx.load_class(&tree.binary_name(superclass))?,
        None => ctx.load_class("java.lang.Object")?,
    };
    let interfaces = binding
        .interfaces
        .iter()
        .map(|&interface| ctx.load_class(&tree.binary_name(interface)))
        .collect::<EvalResult<Vec<_>>>()?;
    tracing::debug!(
        superclass = superclass.name(),
        interfaces = interfaces.len(),
        "creating listener stub"
    );
    let request = ProxyRequest {
        superclass,
        interfaces,
        constructor: Some(tree.method_key(constructor)),
        arguments,
        callback: Arc::new(StubBehavior::new()),
    };
    engine
        .proxy_factory()
        .create(request)
        .map_err(|err| reflect_error(&err))
}

/// First supertype that is neither anonymous nor abstract.
fn concrete_supertype(tree: &SyntaxTree, ty: TypeId) -> TypeId {
    let mut current = ty;
    loop {
        let binding = tree.type_binding(current);
        match binding.superclass {
            Some(superclass) if binding.is_anonymous() || binding.is_abstract() => {
                current = superclass;
            }
            _ => return current,
        }
    }
}

/// True when the type, an interface it implements or a superclass carries
/// a listener name.
fn is_listener(config: &EvalConfig, tree: &SyntaxTree, ty: TypeId) -> bool {
    let binding = tree.type_binding(ty);
    config.is_listener_name(&binding.simple_name)
        || binding
            .interfaces
            .iter()
            .any(|&interface| is_listener(config, tree, interface))
        || binding
            .superclass
            .is_some_and(|superclass| is_listener(config, tree, superclass))
}
