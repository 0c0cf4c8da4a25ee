//! Class loading contract and the registry-backed loader.

use std::sync::Arc;

use jeval_ir::PrimitiveKind;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::bootstrap;
use crate::class::{ClassBuilder, ClassRef};
use crate::errors::ClassNotFound;

/// Source of runtime classes.
///
/// Shared by every evaluation pass of a session and only ever read.
/// Failing with [`ClassNotFound`] is an expected outcome for project types
/// that are not compiled yet.
pub trait ClassLoader: Send + Sync {
    /// Load a class by binary name (`int`, `java.lang.String`,
    /// `test.Outer$Inner`, `java.lang.String[]`).
    fn load_class(&self, name: &str) -> Result<ClassRef, ClassNotFound>;
}

impl<T: ClassLoader + ?Sized> ClassLoader for Arc<T> {
    fn load_class(&self, name: &str) -> Result<ClassRef, ClassNotFound> {
        (**self).load_class(name)
    }
}

/// Class loader over a table of registered classes.
///
/// Array classes are created on first request and cached.
pub struct ClassRegistry {
    classes: RwLock<FxHashMap<String, ClassRef>>,
}

impl ClassRegistry {
    /// Registry holding only the primitive classes.
    pub fn empty() -> Self {
        let registry = ClassRegistry {
            classes: RwLock::new(FxHashMap::default()),
        };
        for kind in PrimitiveKind::ALL {
            registry.register(ClassBuilder::primitive(kind).build());
        }
        registry
    }

    /// Registry with the primitive classes and the `java.lang` bootstrap.
    pub fn new() -> Self {
        let registry = Self::empty();
        bootstrap::install(&registry);
        registry
    }

    /// Register (or replace) a class, returning it.
    pub fn register(&self, class: ClassRef) -> ClassRef {
        tracing::trace!(class = class.name(), "registering class");
        self.classes
            .write()
            .insert(class.name().to_string(), class.clone());
        class
    }

    pub fn get(&self, name: &str) -> Option<ClassRef> {
        self.classes.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }

    /// `java.lang.Object`, if bootstrapped.
    pub fn object(&self) -> Option<ClassRef> {
        self.get("java.lang.Object")
    }

    fn array_class(&self, component_name: &str) -> Result<ClassRef, ClassNotFound> {
        let component = self.load_class(component_name)?;
        let array = ClassBuilder::array(component, self.object()).build();
        let mut classes = self.classes.write();
        Ok(classes
            .entry(array.name().to_string())
            .or_insert(array)
            .clone())
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassLoader for ClassRegistry {
    fn load_class(&self, name: &str) -> Result<ClassRef, ClassNotFound> {
        if let Some(class) = self.get(name) {
            return Ok(class);
        }
        match name.strip_suffix("[]") {
            Some(component) => self.array_class(component),
            None => Err(ClassNotFound::new(name)),
        }
    }
}

impl std::fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("classes", &self.classes.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
