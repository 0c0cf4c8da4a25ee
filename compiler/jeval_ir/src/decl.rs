//! Declarations the evaluator consults: fields with initializers and method
//! bodies for local-method simulation.

use crate::{ExprId, MethodId, TypeId, VariableId};

/// A type declared in the compilation unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeDecl {
    pub binding: Option<TypeId>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
}

impl TypeDecl {
    pub fn new(binding: TypeId) -> Self {
        TypeDecl {
            binding: Some(binding),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub variable: VariableId,
    pub initializer: Option<ExprId>,
}

/// `@tag fragment fragment ...` from a method's documentation comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JavadocTag {
    /// Tag name including the leading `@`.
    pub name: String,
    pub fragments: Vec<String>,
}

impl JavadocTag {
    pub fn new(name: impl Into<String>, fragments: &[&str]) -> Self {
        JavadocTag {
            name: name.into(),
            fragments: fragments.iter().map(|f| (*f).to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDecl {
    pub binding: MethodId,
    pub parameters: Vec<VariableId>,
    pub javadoc: Vec<JavadocTag>,
    pub body: Vec<Stmt>,
}

impl MethodDecl {
    pub fn new(binding: MethodId, parameters: Vec<VariableId>) -> Self {
        MethodDecl {
            binding,
            parameters,
            javadoc: Vec::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: JavadocTag) -> Self {
        self.javadoc.push(tag);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<Stmt>) -> Self {
        self.body = body;
        self
    }

    pub fn tag(&self, name: &str) -> Option<&JavadocTag> {
        self.javadoc.iter().find(|tag| tag.name == name)
    }

    /// The expression of a body consisting of exactly `return <expr>;`.
    pub fn single_return(&self) -> Option<ExprId> {
        match self.body.as_slice() {
            [Stmt::Return(Some(expr))] => Some(*expr),
            _ => None,
        }
    }
}

/// Statements are kept only as far as evaluation needs them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    Return(Option<ExprId>),
    Expression(ExprId),
    LocalVariable {
        variable: VariableId,
        initializer: Option<ExprId>,
    },
    /// Any statement the evaluator never inspects.
    Other,
}

impl Stmt {
    /// The expression this statement carries, if any.
    pub fn expression(&self) -> Option<ExprId> {
        match *self {
            Stmt::Return(expr) => expr,
            Stmt::Expression(expr) => Some(expr),
            Stmt::LocalVariable { initializer, .. } => initializer,
            Stmt::Other => None,
        }
    }
}
