//! Java runtime facility for the expression evaluator.
//!
//! The evaluator never touches a JVM. Everything it needs from one lives
//! here behind small contracts:
//!
//! - [`Value`]: runtime values, with boxing folded into the primitive
//!   variants.
//! - [`JavaClass`] and its members: what reflection sees, built with
//!   [`ClassBuilder`] by the host.
//! - [`ClassLoader`]: binary name to class, with [`ClassRegistry`] as the
//!   table-backed implementation pre-populated with `java.lang`.
//! - [`ProxyFactory`]: stand-in instances for anonymous classes.
//! - [`reflect`]: assignability, argument coercion, `toString`/`equals`
//!   and the per-session [`MemberCache`].

mod bootstrap;
pub mod class;
mod errors;
mod loader;
mod object;
mod proxy;
pub mod reflect;
mod value;

pub use class::{
    ClassBuilder, ClassFlags, ClassKind, ClassRef, ConstructorBody, ConstructorDef, FieldDef,
    JavaClass, MethodDef, NativeFactory, NativeInitializer, NativeMethod,
};
pub use errors::{ClassNotFound, ReflectError, Throwable};
pub use loader::{ClassLoader, ClassRegistry};
pub use object::{ArrayRef, ObjectRef};
pub use proxy::{ProxyCallback, ProxyFactory, ProxyRequest, StubBehavior, StubProxyFactory};
pub use reflect::MemberCache;
pub use value::{char_display, format_double, format_float, java_string_hash, Heap, Value};
