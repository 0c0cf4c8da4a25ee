//! The UNKNOWN protocol.
//!
//! Evaluators, context hooks and interceptors answer with an [`Evaluation`]:
//! either a value (which may be Java `null`) or [`Evaluation::Unknown`],
//! meaning "not mine, ask the next one". Unknown never escapes
//! [`crate::AstEvaluationEngine::evaluate`].

use jeval_runtime::Value;

use crate::EvalError;

#[derive(Clone, Debug, PartialEq)]
pub enum Evaluation {
    Value(Value),
    Unknown,
}

/// Answer of an evaluator or hook.
pub type EvalOutcome = Result<Evaluation, EvalError>;

impl Evaluation {
    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Evaluation::Unknown)
    }

    #[inline]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Evaluation::Value(value) => Some(value),
            Evaluation::Unknown => None,
        }
    }
}

impl From<Value> for Evaluation {
    fn from(value: Value) -> Self {
        Evaluation::Value(value)
    }
}
