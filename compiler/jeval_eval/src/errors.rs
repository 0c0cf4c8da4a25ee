//! Evaluation errors.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` gives each failure a typed category and an [`ErrorCode`].
//! Factory functions (e.g. `null_receiver()`) are the public way to build
//! errors; they populate both `kind` and `message`. Contextual diagnostics
//! (source text, target signature, argument dump) are attached afterwards
//! with the `with_*` builders.
//!
//! The "not mine" signal of an evaluator is [`crate::Evaluation::Unknown`]
//! and never an error.

use std::fmt;

use jeval_runtime::{ClassNotFound, ReflectError, Throwable};

/// Result of evaluating one expression.
pub type EvalResult<T = jeval_runtime::Value> = Result<T, EvalError>;

/// Stable diagnostic codes.
///
/// Format: E4xxx for evaluation failures, E409x for defects in upstream
/// assumptions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Reflective method invocation failed
    E4001,
    /// Constructor invocation failed
    E4002,
    /// Super method invocation failed
    E4003,
    /// Local method cannot be simulated
    E4004,
    /// Invocation receiver evaluated to null
    E4005,
    /// No value found for a simple name
    E4006,
    /// Parameter without any invocation supplying it
    E4007,
    /// Anonymous class cannot be evaluated
    E4008,
    /// No evaluator claimed the expression
    E4009,
    /// Member not found
    E4010,
    /// Class not found
    E4011,
    /// Malformed literal
    E4012,
    /// Class cast
    E4013,
    /// Java runtime exception raised while evaluating an operator
    E4014,
    /// Evaluation depth limit exceeded
    E4015,
    /// Exception rewritten by an interceptor
    E4016,
    /// Invariant violation
    E4090,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::E4006 => "E4006",
            ErrorCode::E4007 => "E4007",
            ErrorCode::E4008 => "E4008",
            ErrorCode::E4009 => "E4009",
            ErrorCode::E4010 => "E4010",
            ErrorCode::E4011 => "E4011",
            ErrorCode::E4012 => "E4012",
            ErrorCode::E4013 => "E4013",
            ErrorCode::E4014 => "E4014",
            ErrorCode::E4015 => "E4015",
            ErrorCode::E4016 => "E4016",
            ErrorCode::E4090 => "E4090",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Invocation
    MethodInvocation {
        signature: String,
    },
    ConstructorInvocation {
        signature: String,
    },
    SuperMethodInvocation {
        signature: String,
    },
    LocalMethodInvocation {
        signature: String,
    },
    NullReceiver,
    AnonymousEvaluation {
        type_name: String,
    },

    // Names
    NoSimpleNameFound {
        name: String,
    },
    NoMethodInvocation {
        parameter: String,
    },

    // Resolution
    NotEvaluated {
        kind: &'static str,
    },
    MemberNotFound {
        member: String,
        class: String,
    },
    ClassNotFound {
        name: String,
    },

    // Operators
    MalformedLiteral {
        token: String,
    },
    ClassCast {
        from: String,
        to: String,
    },
    JavaException {
        class_name: String,
        message: Option<String>,
    },

    // Limits
    DepthLimitExceeded {
        limit: usize,
    },

    Rewritten {
        message: String,
    },
    InvariantViolation {
        message: String,
    },
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::MethodInvocation { .. } => ErrorCode::E4001,
            EvalErrorKind::ConstructorInvocation { .. } => ErrorCode::E4002,
            EvalErrorKind::SuperMethodInvocation { .. } => ErrorCode::E4003,
            EvalErrorKind::LocalMethodInvocation { .. } => ErrorCode::E4004,
            EvalErrorKind::NullReceiver => ErrorCode::E4005,
            EvalErrorKind::NoSimpleNameFound { .. } => ErrorCode::E4006,
            EvalErrorKind::NoMethodInvocation { .. } => ErrorCode::E4007,
            EvalErrorKind::AnonymousEvaluation { .. } => ErrorCode::E4008,
            EvalErrorKind::NotEvaluated { .. } => ErrorCode::E4009,
            EvalErrorKind::MemberNotFound { .. } => ErrorCode::E4010,
            EvalErrorKind::ClassNotFound { .. } => ErrorCode::E4011,
            EvalErrorKind::MalformedLiteral { .. } => ErrorCode::E4012,
            EvalErrorKind::ClassCast { .. } => ErrorCode::E4013,
            EvalErrorKind::JavaException { .. } => ErrorCode::E4014,
            EvalErrorKind::DepthLimitExceeded { .. } => ErrorCode::E4015,
            EvalErrorKind::Rewritten { .. } => ErrorCode::E4016,
            EvalErrorKind::InvariantViolation { .. } => ErrorCode::E4090,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Invocation
            Self::MethodInvocation { signature } => {
                write!(f, "invocation of method {signature} failed")
            }
            Self::ConstructorInvocation { signature } => {
                write!(f, "invocation of constructor {signature} failed")
            }
            Self::SuperMethodInvocation { signature } => {
                write!(f, "invocation of super method {signature} failed")
            }
            Self::LocalMethodInvocation { signature } => {
                write!(f, "local method {signature} cannot be evaluated")
            }
            Self::NullReceiver => write!(f, "invocation receiver is null"),
            Self::AnonymousEvaluation { type_name } => {
                write!(f, "anonymous class extending {type_name} cannot be evaluated")
            }

            // Names
            Self::NoSimpleNameFound { name } => write!(f, "no value found for name `{name}`"),
            Self::NoMethodInvocation { parameter } => {
                write!(f, "no invocation supplies a value for parameter `{parameter}`")
            }

            // Resolution
            Self::NotEvaluated { kind } => write!(f, "no evaluator for {kind}"),
            Self::MemberNotFound { member, class } => {
                write!(f, "{member} not found in {class}")
            }
            Self::ClassNotFound { name } => write!(f, "class {name} not found"),

            // Operators
            Self::MalformedLiteral { token } => write!(f, "malformed literal `{token}`"),
            Self::ClassCast { from, to } => write!(f, "{from} cannot be cast to {to}"),
            Self::JavaException {
                class_name,
                message: Some(message),
            } => write!(f, "{class_name}: {message}"),
            Self::JavaException {
                class_name,
                message: None,
            } => write!(f, "{class_name}"),

            // Limits
            Self::DepthLimitExceeded { limit } => {
                write!(f, "evaluation depth limit of {limit} exceeded")
            }

            Self::Rewritten { message } | Self::InvariantViolation { message } => {
                write!(f, "{message}")
            }
        }
    }
}

/// What an error wraps.
#[derive(Clone, Debug)]
pub enum ErrorCause {
    /// Exception thrown by invoked code.
    Throwable(Throwable),
    Evaluation(Box<EvalError>),
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Source text of the expression that failed.
    pub source_text: Option<String>,
    /// Secondary information: method signature, argument dump.
    pub notes: Vec<String>,
    pub cause: Option<ErrorCause>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            source_text: None,
            notes: Vec::new(),
            cause: None,
        }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// True for the failure constructor-argument evaluation downgrades to
    /// `null`.
    #[inline]
    pub fn is_anonymous_evaluation(&self) -> bool {
        matches!(self.kind, EvalErrorKind::AnonymousEvaluation { .. })
    }

    /// The Java exception at the bottom of the cause chain, if any.
    pub fn throwable(&self) -> Option<&Throwable> {
        match &self.cause {
            Some(ErrorCause::Throwable(throwable)) => Some(throwable),
            Some(ErrorCause::Evaluation(inner)) => inner.throwable(),
            None => None,
        }
    }

    /// Attach the source text of the failing expression, keeping the
    /// innermost one when already set.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        if self.source_text.is_none() {
            self.source_text = Some(source.into());
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: ErrorCause) -> Self {
        self.cause = Some(cause);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(source) = &self.source_text {
            write!(f, "\n  expression: {source}")?;
        }
        for note in &self.notes {
            write!(f, "\n  {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.cause {
            Some(ErrorCause::Throwable(throwable)) => Some(throwable),
            Some(ErrorCause::Evaluation(inner)) => Some(inner.as_ref()),
            None => None,
        }
    }
}

impl From<ClassNotFound> for EvalError {
    fn from(err: ClassNotFound) -> Self {
        class_not_found(&err.name)
    }
}

// Invocation Errors

/// Reflective method call failed.
#[cold]
pub fn method_failed(signature: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MethodInvocation {
        signature: signature.to_string(),
    })
}

#[cold]
pub fn constructor_failed(signature: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstructorInvocation {
        signature: signature.to_string(),
    })
}

#[cold]
pub fn super_method_failed(signature: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SuperMethodInvocation {
        signature: signature.to_string(),
    })
}

/// Invocation of a method declared in the unit under evaluation whose body
/// cannot be simulated.
#[cold]
pub fn local_method(signature: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::LocalMethodInvocation {
        signature: signature.to_string(),
    })
}

#[cold]
pub fn null_receiver() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NullReceiver)
}

/// Anonymous class nothing could instantiate.
#[cold]
pub fn anonymous_evaluation(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AnonymousEvaluation {
        type_name: type_name.to_string(),
    })
}

// Name Errors

#[cold]
pub fn no_simple_name_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSimpleNameFound {
        name: name.to_string(),
    })
}

#[cold]
pub fn no_method_invocation(parameter: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMethodInvocation {
        parameter: parameter.to_string(),
    })
}

// Resolution Errors

/// Every evaluator declined the expression.
#[cold]
pub fn not_evaluated(kind: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotEvaluated { kind })
}

#[cold]
pub fn member_not_found(member: &str, class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MemberNotFound {
        member: member.to_string(),
        class: class.to_string(),
    })
}

#[cold]
pub fn class_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ClassNotFound {
        name: name.to_string(),
    })
}

// Operator Errors

#[cold]
pub fn malformed_literal(token: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedLiteral {
        token: token.to_string(),
    })
}

#[cold]
pub fn class_cast(from: &str, to: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ClassCast {
        from: from.to_string(),
        to: to.to_string(),
    })
}

/// Java exception raised by the evaluator itself (`/ by zero`, array
/// bounds, null dereference).
#[cold]
pub fn java_exception(throwable: Throwable) -> EvalError {
    EvalError::from_kind(EvalErrorKind::JavaException {
        class_name: throwable.class_name.clone(),
        message: throwable.message.clone(),
    })
    .with_cause(ErrorCause::Throwable(throwable))
}

#[cold]
pub fn division_by_zero() -> EvalError {
    java_exception(Throwable::arithmetic("/ by zero"))
}

#[cold]
pub fn null_pointer(what: &str) -> EvalError {
    java_exception(Throwable::null_pointer(what))
}

#[cold]
pub fn index_out_of_bounds(index: i32, length: usize) -> EvalError {
    java_exception(Throwable::new(
        "java.lang.ArrayIndexOutOfBoundsException",
        format!("Index {index} out of bounds for length {length}"),
    ))
}

#[cold]
pub fn negative_array_size(size: i32) -> EvalError {
    java_exception(Throwable::new(
        "java.lang.NegativeArraySizeException",
        size.to_string(),
    ))
}

// Limits

#[cold]
pub fn depth_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DepthLimitExceeded { limit })
}

/// Friendlier diagnostic an interceptor substitutes for a Java exception.
#[cold]
pub fn rewritten(message: impl Into<String>, original: Throwable) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Rewritten {
        message: message.into(),
    })
    .with_cause(ErrorCause::Throwable(original))
}

#[cold]
pub fn invariant_violation(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvariantViolation {
        message: message.into(),
    })
}

/// Reflection failure outside the invoked code (argument mismatch,
/// abstract target, missing field).
#[cold]
pub fn reflect_error(err: &ReflectError) -> EvalError {
    match err {
        ReflectError::ClassNotFound(missing) => class_not_found(&missing.name),
        ReflectError::NoSuchField { class, field } => member_not_found(&format!("field {field}"), class),
        ReflectError::NoSuchConstructor { class, signature } => {
            member_not_found(&format!("constructor {signature}"), class)
        }
        ReflectError::NullReceiver { member } => null_pointer(&format!("null receiver for {member}")),
        ReflectError::Target(throwable) => java_exception(throwable.clone()),
        other => java_exception(other.to_throwable()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;

    #[test]
    fn factory_sets_kind_message_and_code() {
        let err = member_not_found("method run()", "test.Task");
        assert_eq!(err.code(), ErrorCode::E4010);
        assert_eq!(err.message, "method run() not found in test.Task");
        assert_eq!(err.code().to_string(), "E4010");
    }

    #[test]
    fn display_includes_context() {
        let err = method_failed("run()")
            .with_source("task.run()")
            .with_note("arguments: {}");
        assert_eq!(
            err.to_string(),
            "[E4001] invocation of method run() failed\n  expression: task.run()\n  arguments: {}"
        );
    }

    #[test]
    fn innermost_source_wins() {
        let err = null_receiver().with_source("a.b()").with_source("outer(a.b())");
        assert_eq!(err.source_text.as_deref(), Some("a.b()"));
    }

    #[test]
    fn cause_chain() {
        let thrown = Throwable::illegal_state("boom");
        let err = constructor_failed("<init>()").with_cause(ErrorCause::Throwable(thrown.clone()));
        assert_eq!(err.throwable(), Some(&thrown));
        assert!(err.source().is_some());

        let outer = local_method("helper()").with_cause(ErrorCause::Evaluation(Box::new(err)));
        assert_eq!(outer.throwable(), Some(&thrown));
    }

    #[test]
    fn java_exception_carries_throwable() {
        let err = division_by_zero();
        assert_eq!(err.code(), ErrorCode::E4014);
        assert_eq!(err.message, "java.lang.ArithmeticException: / by zero");
        assert!(!err.is_anonymous_evaluation());
        assert!(anonymous_evaluation("test.Helper").is_anonymous_evaluation());
    }
}
