//! Fields, methods and constructors of runtime classes.

use std::fmt;
use std::sync::Arc;

use jeval_ir::{MemberKey, MethodFlags};
use parking_lot::RwLock;

use crate::class::ClassRef;
use crate::errors::{ReflectError, Throwable};
use crate::object::ObjectRef;
use crate::reflect::coerce_argument;
use crate::Value;

/// Native method body. Receives the receiver (`null` for static methods) and
/// arguments already coerced to the parameter types.
pub type NativeMethod = Arc<dyn Fn(&Value, &[Value]) -> Result<Value, Throwable> + Send + Sync>;

/// Constructor body that initializes a freshly allocated instance.
pub type NativeInitializer = Arc<dyn Fn(&ObjectRef, &[Value]) -> Result<(), Throwable> + Send + Sync>;

/// Constructor body that produces the value itself (strings, boxes).
pub type NativeFactory = Arc<dyn Fn(&ClassRef, &[Value]) -> Result<Value, Throwable> + Send + Sync>;

/// Field of a runtime class.
pub struct FieldDef {
    name: String,
    type_name: String,
    declaring_class: String,
    /// Storage for static fields; unused for instance fields.
    static_value: Option<RwLock<Value>>,
}

impl FieldDef {
    pub(crate) fn new(
        name: String,
        type_name: String,
        declaring_class: String,
        static_value: Option<Value>,
    ) -> Self {
        FieldDef {
            name,
            type_name,
            declaring_class,
            static_value: static_value.map(RwLock::new),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline]
    pub fn declaring_class(&self) -> &str {
        &self.declaring_class
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.static_value.is_some()
    }

    /// `Field.get`: static fields ignore the receiver.
    pub fn get(&self, receiver: &Value) -> Result<Value, ReflectError> {
        if let Some(slot) = &self.static_value {
            return Ok(slot.read().clone());
        }
        match receiver {
            Value::Object(object) => object.get_field(&self.name).ok_or_else(|| self.missing()),
            Value::Null => Err(ReflectError::NullReceiver {
                member: self.name.clone(),
            }),
            _ => Err(self.missing()),
        }
    }

    /// `Field.set`, with the same widening rules as argument passing.
    pub fn set(&self, receiver: &Value, value: Value) -> Result<(), ReflectError> {
        let value = coerce_argument(&value, &self.type_name).ok_or_else(|| {
            ReflectError::ArgumentType {
                member: self.name.clone(),
                index: 0,
                expected: self.type_name.clone(),
            }
        })?;
        if let Some(slot) = &self.static_value {
            *slot.write() = value;
            return Ok(());
        }
        match receiver {
            Value::Object(object) if object.set_field(&self.name, value) => Ok(()),
            Value::Null => Err(ReflectError::NullReceiver {
                member: self.name.clone(),
            }),
            _ => Err(self.missing()),
        }
    }

    fn missing(&self) -> ReflectError {
        ReflectError::NoSuchField {
            class: self.declaring_class.clone(),
            field: self.name.clone(),
        }
    }
}

impl fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}", self.type_name, self.declaring_class, self.name)
    }
}

/// Method of a runtime class.
pub struct MethodDef {
    key: MemberKey,
    return_type: String,
    declaring_class: String,
    flags: MethodFlags,
    body: Option<NativeMethod>,
}

impl MethodDef {
    pub fn new(
        key: MemberKey,
        return_type: impl Into<String>,
        declaring_class: impl Into<String>,
        flags: MethodFlags,
        body: Option<NativeMethod>,
    ) -> Self {
        let flags = if body.is_none() {
            flags | MethodFlags::ABSTRACT
        } else {
            flags
        };
        MethodDef {
            key,
            return_type: return_type.into(),
            declaring_class: declaring_class.into(),
            flags,
            body,
        }
    }

    #[inline]
    pub fn key(&self) -> &MemberKey {
        &self.key
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.key.name
    }

    #[inline]
    pub fn parameter_types(&self) -> &[String] {
        &self.key.parameter_types
    }

    #[inline]
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    #[inline]
    pub fn declaring_class(&self) -> &str {
        &self.declaring_class
    }

    #[inline]
    pub fn flags(&self) -> MethodFlags {
        self.flags
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodFlags::STATIC)
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(MethodFlags::ABSTRACT)
    }

    /// `Method.invoke`: checks arity, receiver and argument types, then runs
    /// the body. Exceptions thrown by the body come back as
    /// [`ReflectError::Target`].
    pub fn invoke(&self, receiver: &Value, args: &[Value]) -> Result<Value, ReflectError> {
        let member = || format!("{}.{}", self.declaring_class, self.key);
        let args = coerce_arguments(&self.key, args, member)?;
        if !self.is_static() && receiver.is_null() {
            return Err(ReflectError::NullReceiver { member: member() });
        }
        let Some(body) = &self.body else {
            return Err(ReflectError::Abstract { member: member() });
        };
        let receiver = if self.is_static() { &Value::Null } else { receiver };
        body(receiver, &args).map_err(ReflectError::Target)
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}", self.return_type, self.declaring_class, self.key)
    }
}

/// Constructor body variants.
#[derive(Clone)]
pub enum ConstructorBody {
    Initializer(NativeInitializer),
    Factory(NativeFactory),
}

/// Constructor of a runtime class.
pub struct ConstructorDef {
    key: MemberKey,
    declaring_class: String,
    flags: MethodFlags,
    body: ConstructorBody,
}

impl ConstructorDef {
    pub fn new(
        parameter_types: Vec<String>,
        declaring_class: impl Into<String>,
        flags: MethodFlags,
        body: ConstructorBody,
    ) -> Self {
        ConstructorDef {
            key: MemberKey::constructor(parameter_types),
            declaring_class: declaring_class.into(),
            flags: flags | MethodFlags::CONSTRUCTOR,
            body,
        }
    }

    #[inline]
    pub fn key(&self) -> &MemberKey {
        &self.key
    }

    #[inline]
    pub fn parameter_types(&self) -> &[String] {
        &self.key.parameter_types
    }

    #[inline]
    pub fn declaring_class(&self) -> &str {
        &self.declaring_class
    }

    #[inline]
    pub fn is_varargs(&self) -> bool {
        self.flags.contains(MethodFlags::VARARGS)
    }

    /// `Constructor.newInstance` on `class`.
    pub fn new_instance(&self, class: &ClassRef, args: &[Value]) -> Result<Value, ReflectError> {
        if class.is_abstract() {
            return Err(ReflectError::Instantiation {
                class: class.name().to_string(),
            });
        }
        let args = coerce_arguments(&self.key, args, || self.describe())?;
        match &self.body {
            ConstructorBody::Initializer(init) => {
                let object = ObjectRef::allocate(class.clone());
                init(&object, &args).map_err(ReflectError::Target)?;
                Ok(Value::Object(object))
            }
            ConstructorBody::Factory(factory) => factory(class, &args).map_err(ReflectError::Target),
        }
    }

    /// Run this constructor on an instance of a subclass, as a `super(...)`
    /// call would. Factory constructors cannot be chained.
    pub fn initialize(&self, object: &ObjectRef, args: &[Value]) -> Result<(), ReflectError> {
        let args = coerce_arguments(&self.key, args, || self.describe())?;
        match &self.body {
            ConstructorBody::Initializer(init) => init(object, &args).map_err(ReflectError::Target),
            ConstructorBody::Factory(_) => Err(ReflectError::Instantiation {
                class: object.class().name().to_string(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("{}.{}", self.declaring_class, self.key)
    }
}

impl fmt::Debug for ConstructorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn coerce_arguments(
    key: &MemberKey,
    args: &[Value],
    member: impl Fn() -> String,
) -> Result<Vec<Value>, ReflectError> {
    if args.len() != key.arity() {
        return Err(ReflectError::ArgumentCount {
            member: member(),
            expected: key.arity(),
            actual: args.len(),
        });
    }
    args.iter()
        .zip(&key.parameter_types)
        .enumerate()
        .map(|(index, (arg, expected))| {
            coerce_argument(arg, expected).ok_or_else(|| ReflectError::ArgumentType {
                member: member(),
                index,
                expected: expected.clone(),
            })
        })
        .collect()
}
