//! Object and array instances.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::class::ClassRef;
use crate::Value;

/// Instance of a non-array class.
pub struct Instance {
    class: ClassRef,
    fields: RwLock<FxHashMap<String, Value>>,
}

/// Shared handle to an [`Instance`]; equality is identity.
#[derive(Clone)]
pub struct ObjectRef(Arc<Instance>);

impl ObjectRef {
    /// Allocate an instance with every instance field of the class and its
    /// superclasses set to its zero value.
    pub fn allocate(class: ClassRef) -> Self {
        let mut fields = FxHashMap::default();
        let mut current = Some(&class);
        while let Some(c) = current {
            for field in c.fields().iter().filter(|f| !f.is_static()) {
                fields
                    .entry(field.name().to_string())
                    .or_insert_with(|| Value::zero_for(field.type_name()));
            }
            current = c.superclass();
        }
        ObjectRef(Arc::new(Instance {
            class,
            fields: RwLock::new(fields),
        }))
    }

    #[inline]
    pub fn class(&self) -> &ClassRef {
        &self.0.class
    }

    pub fn get_field(&self, name: &str) -> Option<Value> {
        self.0.fields.read().get(name).cloned()
    }

    /// Store an instance field value. Returns `false` for unknown fields.
    pub fn set_field(&self, name: &str, value: Value) -> bool {
        match self.0.fields.write().get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// `System.identityHashCode` stand-in derived from the allocation.
    pub fn identity_hash(&self) -> u32 {
        (Arc::as_ptr(&self.0) as usize as u32).rotate_left(5)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("class", &self.0.class.name())
            .field("fields", &*self.0.fields.read())
            .finish()
    }
}

/// Java array with a fixed length and mutable elements.
pub struct JavaArray {
    class: ClassRef,
    elements: RwLock<Vec<Value>>,
}

/// Shared handle to a [`JavaArray`]; equality is identity.
#[derive(Clone)]
pub struct ArrayRef(Arc<JavaArray>);

impl ArrayRef {
    /// Create an array of `class` (an array class) holding `elements`.
    pub fn new(class: ClassRef, elements: Vec<Value>) -> Self {
        ArrayRef(Arc::new(JavaArray {
            class,
            elements: RwLock::new(elements),
        }))
    }

    /// Array class, e.g. `int[]`.
    #[inline]
    pub fn class(&self) -> &ClassRef {
        &self.0.class
    }

    pub fn len(&self) -> usize {
        self.0.elements.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.elements.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.elements.read().get(index).cloned()
    }

    /// Store an element. Returns `false` when out of bounds.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.elements.write().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Snapshot of the elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.elements.read().clone()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn identity_hash(&self) -> u32 {
        (Arc::as_ptr(&self.0) as usize as u32).rotate_left(3)
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayRef")
            .field("class", &self.0.class.name())
            .field("elements", &*self.0.elements.read())
            .finish()
    }
}
