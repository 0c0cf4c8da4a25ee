#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::Value;
use pretty_assertions::assert_eq;

#[test]
fn empty_registry_has_primitives_only() {
    let registry = ClassRegistry::empty();
    assert_eq!(registry.len(), PrimitiveKind::ALL.len());
    assert!(registry.load_class("int").unwrap().is_primitive());
    assert_eq!(
        registry.load_class("java.lang.String").unwrap_err(),
        ClassNotFound::new("java.lang.String")
    );
}

#[test]
fn bootstrap_provides_java_lang() {
    let registry = ClassRegistry::new();
    for name in [
        "java.lang.Object",
        "java.lang.String",
        "java.lang.Integer",
        "java.lang.Boolean",
        "java.lang.Character",
        "java.lang.Math",
        "java.util.EventListener",
    ] {
        assert!(registry.contains(name), "{name} missing");
    }
    let pi = registry.load_class("java.lang.Math").unwrap().find_field("PI").unwrap();
    assert_eq!(pi.get(&Value::Null).unwrap(), Value::Double(std::f64::consts::PI));
}

#[test]
fn array_classes_are_created_once() {
    let registry = ClassRegistry::new();
    let first = registry.load_class("java.lang.String[][]").unwrap();
    let second = registry.load_class("java.lang.String[][]").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.component().unwrap().name(), "java.lang.String[]");
    assert!(registry.load_class("test.Missing[]").is_err());
}

#[test]
fn register_replaces() {
    let registry = ClassRegistry::new();
    let before = registry.len();
    registry.register(ClassBuilder::new("test.A").build());
    registry.register(ClassBuilder::new("test.A").abstract_class().build());
    assert_eq!(registry.len(), before + 1);
    assert!(registry.get("test.A").unwrap().is_abstract());
}

#[test]
fn shared_loader_delegates() {
    let shared: Arc<ClassRegistry> = Arc::new(ClassRegistry::new());
    assert!(shared.load_class("java.lang.Object").is_ok());
}
