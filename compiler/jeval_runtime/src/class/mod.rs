//! Runtime class model.
//!
//! A [`JavaClass`] is what reflection sees: name, supertypes and members.
//! Classes are immutable once built and shared as [`ClassRef`]; static field
//! values are the only interior mutability.

mod builder;
mod member;

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use jeval_ir::{simple_name_of, MemberKey, PrimitiveKind};
use rustc_hash::FxHashMap;

pub use builder::ClassBuilder;
pub use member::{
    ConstructorBody, ConstructorDef, FieldDef, MethodDef, NativeFactory, NativeInitializer,
    NativeMethod,
};

/// Shared handle to a class.
pub type ClassRef = Arc<JavaClass>;

/// Shape of a runtime class.
#[derive(Clone, Debug)]
pub enum ClassKind {
    Class,
    Interface,
    Primitive(PrimitiveKind),
    Array { component: ClassRef },
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ClassFlags: u8 {
        const ABSTRACT = 1 << 0;
        const FINAL = 1 << 1;
        /// Synthesized at run time (listener stubs).
        const SYNTHETIC = 1 << 2;
    }
}

/// Runtime class.
pub struct JavaClass {
    name: String,
    kind: ClassKind,
    flags: ClassFlags,
    superclass: Option<ClassRef>,
    interfaces: Vec<ClassRef>,
    fields: Vec<Arc<FieldDef>>,
    methods: Vec<Arc<MethodDef>>,
    constructors: Vec<Arc<ConstructorDef>>,
    method_index: FxHashMap<MemberKey, usize>,
}

impl JavaClass {
    /// Binary name (`java.lang.String`, `test.Outer$Inner`, `int[]`).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    #[inline]
    pub fn kind(&self) -> &ClassKind {
        &self.kind
    }

    #[inline]
    pub fn flags(&self) -> ClassFlags {
        self.flags
    }

    #[inline]
    pub fn superclass(&self) -> Option<&ClassRef> {
        self.superclass.as_ref()
    }

    #[inline]
    pub fn interfaces(&self) -> &[ClassRef] {
        &self.interfaces
    }

    #[inline]
    pub fn fields(&self) -> &[Arc<FieldDef>] {
        &self.fields
    }

    #[inline]
    pub fn methods(&self) -> &[Arc<MethodDef>] {
        &self.methods
    }

    #[inline]
    pub fn constructors(&self) -> &[Arc<ConstructorDef>] {
        &self.constructors
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        matches!(self.kind, ClassKind::Interface)
    }

    /// Interfaces and abstract classes cannot be instantiated.
    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.is_interface() || self.flags.contains(ClassFlags::ABSTRACT)
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, ClassKind::Primitive(_))
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.kind {
            ClassKind::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    /// Component class of an array class.
    pub fn component(&self) -> Option<&ClassRef> {
        match &self.kind {
            ClassKind::Array { component } => Some(component),
            _ => None,
        }
    }

    /// Method declared directly on this class.
    pub fn declared_method(&self, key: &MemberKey) -> Option<&Arc<MethodDef>> {
        self.method_index.get(key).map(|&i| &self.methods[i])
    }

    /// `Class.getMethod`-style lookup: this class, then its superclasses,
    /// then every superinterface. Concrete methods win over abstract ones
    /// found earlier in interface order.
    pub fn find_method(&self, key: &MemberKey) -> Option<Arc<MethodDef>> {
        let mut abstract_match = None;
        let mut current = Some(self);
        while let Some(class) = current {
            if let Some(method) = class.declared_method(key) {
                if !method.is_abstract() {
                    return Some(method.clone());
                }
                abstract_match.get_or_insert_with(|| method.clone());
            }
            current = class.superclass.as_deref();
        }
        if abstract_match.is_some() {
            return abstract_match;
        }
        self.all_interfaces()
            .into_iter()
            .find_map(|interface| interface.declared_method(key).cloned())
    }

    pub fn find_constructor(&self, key: &MemberKey) -> Option<Arc<ConstructorDef>> {
        self.constructors.iter().find(|c| c.key() == key).cloned()
    }

    /// `Class.getField`-style lookup: declared fields, then superinterfaces,
    /// then the superclass chain.
    pub fn find_field(&self, name: &str) -> Option<Arc<FieldDef>> {
        if let Some(field) = self.fields.iter().find(|f| f.name() == name) {
            return Some(field.clone());
        }
        for interface in &self.interfaces {
            if let Some(field) = interface.find_field(name) {
                return Some(field);
            }
        }
        self.superclass.as_ref().and_then(|s| s.find_field(name))
    }

    /// Every interface implemented directly or inherited, without duplicates.
    pub fn all_interfaces(&self) -> Vec<ClassRef> {
        let mut result: Vec<ClassRef> = Vec::new();
        let mut stack: Vec<ClassRef> = Vec::new();
        let mut current = Some(self);
        while let Some(class) = current {
            stack.extend(class.interfaces.iter().rev().cloned());
            current = class.superclass.as_deref();
        }
        stack.reverse();
        while let Some(interface) = stack.pop() {
            if result.iter().any(|seen| seen.name == interface.name) {
                continue;
            }
            stack.extend(interface.interfaces.iter().rev().cloned());
            result.push(interface);
        }
        result
    }

    /// True when this class is `type_name` or one of its subtypes.
    /// Arrays are covariant in reference components and subtypes of
    /// `java.lang.Object`.
    pub fn is_subtype_of(&self, type_name: &str) -> bool {
        if self.name == type_name {
            return true;
        }
        match &self.kind {
            ClassKind::Primitive(_) => false,
            ClassKind::Array { component } => {
                if matches!(
                    type_name,
                    "java.lang.Object" | "java.lang.Cloneable" | "java.io.Serializable"
                ) {
                    return true;
                }
                match type_name.strip_suffix("[]") {
                    Some(target) if !component.is_primitive() => component.is_subtype_of(target),
                    _ => false,
                }
            }
            ClassKind::Class | ClassKind::Interface => {
                if type_name == "java.lang.Object" {
                    return true;
                }
                self.superclass
                    .as_ref()
                    .is_some_and(|s| s.is_subtype_of(type_name))
                    || self.interfaces.iter().any(|i| i.is_subtype_of(type_name))
            }
        }
    }

    /// `Class.isAssignableFrom`.
    pub fn is_assignable_from(&self, other: &JavaClass) -> bool {
        other.is_subtype_of(&self.name)
    }
}

impl fmt::Debug for JavaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JavaClass")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("superclass", &self.superclass.as_ref().map(|s| s.name()))
            .field("methods", &self.methods.len())
            .field("constructors", &self.constructors.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
