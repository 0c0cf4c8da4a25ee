//! Stand-in instances for anonymous classes.
//!
//! A proxy is an instance of a synthesized subclass of the requested
//! superclass and interfaces. Every abstract method it inherits is routed to
//! a [`ProxyCallback`]; concrete inherited methods keep their behavior.

use std::sync::Arc;

use jeval_ir::MemberKey;
use rustc_hash::FxHashMap;

use crate::class::{ClassBuilder, ClassFlags, ClassRef, MethodDef, NativeMethod};
use crate::errors::{ReflectError, Throwable};
use crate::object::ObjectRef;
use crate::reflect::coerce_argument;
use crate::Value;

/// Receives every call of a routed method.
pub trait ProxyCallback: Send + Sync {
    fn intercept(&self, proxy: &ObjectRef, method: &MethodDef, args: &[Value]) -> Result<Value, Throwable>;
}

/// What to synthesize.
pub struct ProxyRequest<'a> {
    pub superclass: ClassRef,
    pub interfaces: Vec<ClassRef>,
    /// Superclass constructor to run; `None` picks the first whose
    /// parameters accept `arguments`.
    pub constructor: Option<MemberKey>,
    /// Arguments for the superclass constructor.
    pub arguments: &'a [Value],
    pub callback: Arc<dyn ProxyCallback>,
}

/// Facility creating proxy instances.
pub trait ProxyFactory: Send + Sync {
    fn create(&self, request: ProxyRequest<'_>) -> Result<Value, ReflectError>;
}

/// Callback mapping method names to closures; unmapped methods return the
/// zero value of their return type.
#[derive(Clone, Default)]
pub struct StubBehavior {
    handlers: FxHashMap<String, NativeMethod>,
}

impl StubBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle calls of `method_name` (any overload) with `handler`. The
    /// handler receives the proxy as its receiver.
    #[must_use]
    pub fn on<F>(mut self, method_name: &str, handler: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Throwable> + Send + Sync + 'static,
    {
        self.handlers.insert(method_name.to_string(), Arc::new(handler));
        self
    }
}

impl ProxyCallback for StubBehavior {
    fn intercept(&self, proxy: &ObjectRef, method: &MethodDef, args: &[Value]) -> Result<Value, Throwable> {
        match self.handlers.get(method.name()) {
            Some(handler) => handler(&Value::Object(proxy.clone()), args),
            None => Ok(Value::zero_for(method.return_type())),
        }
    }
}

/// [`ProxyFactory`] that synthesizes stub subclasses.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubProxyFactory;

impl StubProxyFactory {
    fn stub_class(request: &ProxyRequest<'_>) -> ClassRef {
        let base = if request.superclass.name() == "java.lang.Object" {
            request.interfaces.first().unwrap_or(&request.superclass)
        } else {
            &request.superclass
        };
        let name = format!("{}$$Stub", base.name());
        let mut builder = ClassBuilder::new(name.clone())
            .extends(request.superclass.clone())
            .flags(ClassFlags::SYNTHETIC | ClassFlags::FINAL);
        for interface in &request.interfaces {
            builder = builder.implements(interface.clone());
        }
        for template in routed_methods(&request.superclass, &request.interfaces) {
            let callback = request.callback.clone();
            let routed = template.clone();
            let body: NativeMethod = Arc::new(move |receiver, args| match receiver {
                Value::Object(proxy) => callback.intercept(proxy, &routed, args),
                _ => Err(Throwable::null_pointer("stub method invoked without receiver")),
            });
            builder = builder.with_method(MethodDef::new(
                template.key().clone(),
                template.return_type(),
                name.clone(),
                template.flags() - jeval_ir::MethodFlags::ABSTRACT,
                Some(body),
            ));
        }
        builder.build()
    }
}

impl ProxyFactory for StubProxyFactory {
    fn create(&self, request: ProxyRequest<'_>) -> Result<Value, ReflectError> {
        let class = Self::stub_class(&request);
        let object = ObjectRef::allocate(class.clone());
        let constructor = match &request.constructor {
            Some(key) => request.superclass.find_constructor(key),
            None => request
                .superclass
                .constructors()
                .iter()
                .find(|c| {
                    c.parameter_types().len() == request.arguments.len()
                        && c.parameter_types()
                            .iter()
                            .zip(request.arguments)
                            .all(|(ty, arg)| coerce_argument(arg, ty).is_some())
                })
                .cloned(),
        };
        match constructor {
            Some(constructor) => constructor.initialize(&object, request.arguments)?,
            None if request.arguments.is_empty() && request.superclass.constructors().is_empty() => {}
            None => {
                let signature = match &request.constructor {
                    Some(key) => key.signature(),
                    None => MemberKey::constructor(
                        request.arguments.iter().map(|a| a.class_name().into_owned()),
                    )
                    .signature(),
                };
                return Err(ReflectError::NoSuchConstructor {
                    class: request.superclass.name().to_string(),
                    signature,
                });
            }
        }
        tracing::debug!(class = class.name(), "created stub instance");
        Ok(Value::Object(object))
    }
}

/// Abstract methods of the superclass chain and all interfaces that no
/// class in the chain implements, one per key.
fn routed_methods(superclass: &ClassRef, interfaces: &[ClassRef]) -> Vec<Arc<MethodDef>> {
    let mut candidates: Vec<Arc<MethodDef>> = Vec::new();
    let mut current = Some(superclass);
    while let Some(class) = current {
        candidates.extend(class.methods().iter().filter(|m| m.is_abstract()).cloned());
        current = class.superclass();
    }
    for interface in interfaces.iter().chain(superclass.all_interfaces().iter()) {
        candidates.extend(interface.methods().iter().filter(|m| m.is_abstract()).cloned());
        for inherited in interface.all_interfaces() {
            candidates.extend(inherited.methods().iter().filter(|m| m.is_abstract()).cloned());
        }
    }
    let mut routed: Vec<Arc<MethodDef>> = Vec::new();
    for method in candidates {
        let implemented = superclass
            .find_method(method.key())
            .is_some_and(|found| !found.is_abstract());
        if !implemented && !routed.iter().any(|m| m.key() == method.key()) {
            routed.push(method);
        }
    }
    routed
}
