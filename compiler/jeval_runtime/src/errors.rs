//! Runtime error types.

use std::fmt;

/// A Java exception raised by native class code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Throwable {
    /// Binary name of the exception class.
    pub class_name: String,
    pub message: Option<String>,
    pub cause: Option<Box<Throwable>>,
}

impl Throwable {
    pub fn new(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Throwable {
            class_name: class_name.into(),
            message: Some(message.into()),
            cause: None,
        }
    }

    /// Exception without a detail message.
    pub fn bare(class_name: impl Into<String>) -> Self {
        Throwable {
            class_name: class_name.into(),
            message: None,
            cause: None,
        }
    }

    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::new("java.lang.IllegalArgumentException", message)
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::new("java.lang.IllegalStateException", message)
    }

    pub fn null_pointer(message: impl Into<String>) -> Self {
        Self::new("java.lang.NullPointerException", message)
    }

    pub fn arithmetic(message: impl Into<String>) -> Self {
        Self::new("java.lang.ArithmeticException", message)
    }

    pub fn number_format(message: impl Into<String>) -> Self {
        Self::new("java.lang.NumberFormatException", message)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new("java.lang.UnsupportedOperationException", message)
    }

    #[must_use]
    pub fn with_cause(mut self, cause: Throwable) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Innermost cause, or `self` when there is none.
    pub fn root_cause(&self) -> &Throwable {
        let mut current = self;
        while let Some(cause) = &current.cause {
            current = cause;
        }
        current
    }

    /// Simple class name, as shown in user-facing messages.
    pub fn simple_name(&self) -> &str {
        jeval_ir::simple_name_of(&self.class_name)
    }
}

impl fmt::Display for Throwable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.class_name),
            None => f.write_str(&self.class_name),
        }
    }
}

impl std::error::Error for Throwable {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// A class loader could not provide a class.
///
/// Expected for types of the edited project that are not compiled yet.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("class not found: {name}")]
pub struct ClassNotFound {
    pub name: String,
}

impl ClassNotFound {
    pub fn new(name: impl Into<String>) -> Self {
        ClassNotFound { name: name.into() }
    }
}

/// Failure of a reflective operation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ReflectError {
    #[error("wrong number of arguments for {member}: expected {expected}, got {actual}")]
    ArgumentCount {
        member: String,
        expected: usize,
        actual: usize,
    },
    #[error("argument {index} of {member} is not assignable to {expected}")]
    ArgumentType {
        member: String,
        index: usize,
        expected: String,
    },
    #[error("{member} is an instance member and was invoked without a receiver")]
    NullReceiver { member: String },
    #[error("{member} is abstract")]
    Abstract { member: String },
    #[error("cannot instantiate {class}")]
    Instantiation { class: String },
    #[error("no field {field} in {class}")]
    NoSuchField { class: String, field: String },
    #[error("no constructor {signature} in {class}")]
    NoSuchConstructor { class: String, signature: String },
    #[error(transparent)]
    ClassNotFound(#[from] ClassNotFound),
    /// The invoked code itself threw.
    #[error("{0}")]
    Target(#[source] Throwable),
}

impl ReflectError {
    /// The exception thrown by target code, if that is what failed.
    pub fn target(&self) -> Option<&Throwable> {
        match self {
            ReflectError::Target(throwable) => Some(throwable),
            _ => None,
        }
    }

    /// View this failure as the Java exception reflection would throw.
    pub fn to_throwable(&self) -> Throwable {
        match self {
            ReflectError::Target(throwable) => throwable.clone(),
            ReflectError::NullReceiver { .. } => Throwable::null_pointer(self.to_string()),
            ReflectError::Instantiation { .. } | ReflectError::Abstract { .. } => {
                Throwable::new("java.lang.InstantiationException", self.to_string())
            }
            ReflectError::NoSuchField { .. } => {
                Throwable::new("java.lang.NoSuchFieldException", self.to_string())
            }
            ReflectError::NoSuchConstructor { .. } => {
                Throwable::new("java.lang.NoSuchMethodException", self.to_string())
            }
            ReflectError::ClassNotFound(_) => {
                Throwable::new("java.lang.ClassNotFoundException", self.to_string())
            }
            ReflectError::ArgumentCount { .. } | ReflectError::ArgumentType { .. } => {
                Throwable::illegal_argument(self.to_string())
            }
        }
    }
}
