//! Builder for runtime classes.

use std::sync::Arc;

use jeval_ir::{MemberKey, MethodFlags, PrimitiveKind};
use rustc_hash::FxHashMap;

use super::{
    ClassFlags, ClassKind, ClassRef, ConstructorBody, ConstructorDef, FieldDef, JavaClass,
    MethodDef,
};
use crate::errors::Throwable;
use crate::object::ObjectRef;
use crate::Value;

/// Builder for [`JavaClass`].
///
/// Hosts describe the classes of the edited project with it; the bootstrap
/// registry uses it for `java.lang`.
pub struct ClassBuilder {
    name: String,
    kind: ClassKind,
    flags: ClassFlags,
    superclass: Option<ClassRef>,
    interfaces: Vec<ClassRef>,
    fields: Vec<FieldDef>,
    methods: Vec<MethodDef>,
    constructors: Vec<ConstructorDef>,
}

impl ClassBuilder {
    /// Concrete class. Set the superclass with [`ClassBuilder::extends`].
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name.into(), ClassKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(name.into(), ClassKind::Interface)
    }

    pub(crate) fn primitive(kind: PrimitiveKind) -> Self {
        Self::with_kind(kind.name().to_string(), ClassKind::Primitive(kind)).flags(ClassFlags::FINAL)
    }

    pub(crate) fn array(component: ClassRef, object: Option<ClassRef>) -> Self {
        let name = format!("{}[]", component.name());
        let mut builder = Self::with_kind(name, ClassKind::Array { component });
        builder.superclass = object;
        builder.flags(ClassFlags::FINAL)
    }

    fn with_kind(name: String, kind: ClassKind) -> Self {
        ClassBuilder {
            name,
            kind,
            flags: ClassFlags::empty(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    #[must_use]
    pub fn extends(mut self, superclass: ClassRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: ClassRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    #[must_use]
    pub fn flags(mut self, flags: ClassFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn abstract_class(self) -> Self {
        self.flags(ClassFlags::ABSTRACT)
    }

    /// Instance field, zero-initialized on allocation.
    #[must_use]
    pub fn field(mut self, name: &str, type_name: &str) -> Self {
        self.fields.push(FieldDef::new(
            name.to_string(),
            type_name.to_string(),
            self.name.clone(),
            None,
        ));
        self
    }

    /// Static field with its initial value.
    #[must_use]
    pub fn constant(mut self, name: &str, type_name: &str, value: Value) -> Self {
        self.fields.push(FieldDef::new(
            name.to_string(),
            type_name.to_string(),
            self.name.clone(),
            Some(value),
        ));
        self
    }

    /// Instance method.
    #[must_use]
    pub fn method<F>(self, name: &str, parameter_types: &[&str], return_type: &str, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Throwable> + Send + Sync + 'static,
    {
        self.method_with_flags(name, parameter_types, return_type, MethodFlags::empty(), body)
    }

    #[must_use]
    pub fn static_method<F>(
        self,
        name: &str,
        parameter_types: &[&str],
        return_type: &str,
        body: F,
    ) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Throwable> + Send + Sync + 'static,
    {
        self.method_with_flags(name, parameter_types, return_type, MethodFlags::STATIC, body)
    }

    #[must_use]
    pub fn method_with_flags<F>(
        mut self,
        name: &str,
        parameter_types: &[&str],
        return_type: &str,
        flags: MethodFlags,
        body: F,
    ) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Throwable> + Send + Sync + 'static,
    {
        self.methods.push(MethodDef::new(
            MemberKey::new(name, parameter_types.iter().copied()),
            return_type,
            self.name.clone(),
            flags,
            Some(Arc::new(body)),
        ));
        self
    }

    /// Method without a body; invoking it fails unless a subclass or stub
    /// provides one.
    #[must_use]
    pub fn abstract_method(mut self, name: &str, parameter_types: &[&str], return_type: &str) -> Self {
        self.methods.push(MethodDef::new(
            MemberKey::new(name, parameter_types.iter().copied()),
            return_type,
            self.name.clone(),
            MethodFlags::ABSTRACT,
            None,
        ));
        self
    }

    /// Add a prepared method definition.
    #[must_use]
    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    /// Constructor that initializes a freshly allocated instance.
    #[must_use]
    pub fn constructor<F>(self, parameter_types: &[&str], init: F) -> Self
    where
        F: Fn(&ObjectRef, &[Value]) -> Result<(), Throwable> + Send + Sync + 'static,
    {
        self.constructor_with_flags(parameter_types, MethodFlags::empty(), init)
    }

    #[must_use]
    pub fn constructor_with_flags<F>(mut self, parameter_types: &[&str], flags: MethodFlags, init: F) -> Self
    where
        F: Fn(&ObjectRef, &[Value]) -> Result<(), Throwable> + Send + Sync + 'static,
    {
        self.constructors.push(ConstructorDef::new(
            parameter_types.iter().map(|p| (*p).to_string()).collect(),
            self.name.clone(),
            flags,
            ConstructorBody::Initializer(Arc::new(init)),
        ));
        self
    }

    /// Constructor producing its value directly.
    #[must_use]
    pub fn factory<F>(mut self, parameter_types: &[&str], factory: F) -> Self
    where
        F: Fn(&ClassRef, &[Value]) -> Result<Value, Throwable> + Send + Sync + 'static,
    {
        self.constructors.push(ConstructorDef::new(
            parameter_types.iter().map(|p| (*p).to_string()).collect(),
            self.name.clone(),
            MethodFlags::empty(),
            ConstructorBody::Factory(Arc::new(factory)),
        ));
        self
    }

    pub fn build(self) -> ClassRef {
        let method_index: FxHashMap<MemberKey, usize> = self
            .methods
            .iter()
            .enumerate()
            .map(|(i, m)| (m.key().clone(), i))
            .collect();
        Arc::new(JavaClass {
            name: self.name,
            kind: self.kind,
            flags: self.flags,
            superclass: self.superclass,
            interfaces: self.interfaces,
            fields: self.fields.into_iter().map(Arc::new).collect(),
            methods: self.methods.into_iter().map(Arc::new).collect(),
            constructors: self.constructors.into_iter().map(Arc::new).collect(),
            method_index,
        })
    }
}
