#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::{ClassLoader, ClassRegistry, ReflectError, Throwable, Value};
use pretty_assertions::assert_eq;

fn key(name: &str, params: &[&str]) -> MemberKey {
    MemberKey::new(name, params.iter().copied())
}

fn widget_hierarchy(registry: &ClassRegistry) -> (ClassRef, ClassRef) {
    let object = registry.object().unwrap();
    let base = registry.register(
        ClassBuilder::new("test.Widget")
            .extends(object)
            .field("text", "java.lang.String")
            .constructor(&[], |_, _| Ok(()))
            .method("getText", &[], "java.lang.String", |this, _| {
                Ok(this.as_object().and_then(|o| o.get_field("text")).unwrap_or(Value::Null))
            })
            .abstract_method("paint", &[], "void")
            .abstract_class()
            .build(),
    );
    let button = registry.register(
        ClassBuilder::new("test.Button")
            .extends(base.clone())
            .constructor(&["java.lang.String"], |this, args| {
                this.set_field("text", args[0].clone());
                Ok(())
            })
            .method("paint", &[], "void", |_, _| Ok(Value::Null))
            .build(),
    );
    (base, button)
}

#[test]
fn find_method_walks_superclasses() {
    let registry = ClassRegistry::new();
    let (_, button) = widget_hierarchy(&registry);
    let get_text = button.find_method(&key("getText", &[])).unwrap();
    assert_eq!(get_text.declaring_class(), "test.Widget");
    let paint = button.find_method(&key("paint", &[])).unwrap();
    assert!(!paint.is_abstract());
    assert!(button.find_method(&key("missing", &[])).is_none());
}

#[test]
fn constructor_initializes_fields() {
    let registry = ClassRegistry::new();
    let (_, button) = widget_hierarchy(&registry);
    let ctor = button.find_constructor(&MemberKey::constructor(["java.lang.String"])).unwrap();
    let instance = ctor.new_instance(&button, &[Value::string("OK")]).unwrap();
    let get_text = button.find_method(&key("getText", &[])).unwrap();
    assert_eq!(get_text.invoke(&instance, &[]).unwrap(), Value::string("OK"));
}

#[test]
fn abstract_class_cannot_be_instantiated() {
    let registry = ClassRegistry::new();
    let (widget, _) = widget_hierarchy(&registry);
    let ctor = widget.find_constructor(&MemberKey::constructor(Vec::<String>::new())).unwrap();
    assert!(matches!(
        ctor.new_instance(&widget, &[]),
        Err(ReflectError::Instantiation { class }) if class == "test.Widget"
    ));
}

#[test]
fn invoke_checks_arguments_and_receiver() {
    let registry = ClassRegistry::new();
    let (_, button) = widget_hierarchy(&registry);
    let get_text = button.find_method(&key("getText", &[])).unwrap();
    assert!(matches!(
        get_text.invoke(&Value::Null, &[]),
        Err(ReflectError::NullReceiver { .. })
    ));
    assert!(matches!(
        get_text.invoke(&Value::Null, &[Value::Int(1)]),
        Err(ReflectError::ArgumentCount { expected: 0, actual: 1, .. })
    ));
}

#[test]
fn target_exceptions_are_wrapped() {
    let class = ClassBuilder::new("test.Failing")
        .static_method("fail", &[], "void", |_, _| Err(Throwable::illegal_state("no")))
        .build();
    let err = class.find_method(&key("fail", &[])).unwrap().invoke(&Value::Null, &[]).unwrap_err();
    assert_eq!(err.target().map(|t| t.class_name.as_str()), Some("java.lang.IllegalStateException"));
}

#[test]
fn subtype_checks() {
    let registry = ClassRegistry::new();
    let (widget, button) = widget_hierarchy(&registry);
    assert!(button.is_subtype_of("test.Widget"));
    assert!(button.is_subtype_of("java.lang.Object"));
    assert!(widget.is_assignable_from(&button));
    assert!(!button.is_assignable_from(&widget));

    let buttons = registry.load_class("test.Button[]").unwrap();
    assert!(buttons.is_subtype_of("test.Widget[]"));
    assert!(buttons.is_subtype_of("java.lang.Object"));
    let ints = registry.load_class("int[]").unwrap();
    assert!(!ints.is_subtype_of("java.lang.Object[]"));
}

#[test]
fn all_interfaces_are_deduplicated() {
    let registry = ClassRegistry::new();
    let integer = registry.load_class("java.lang.Integer").unwrap();
    let names: Vec<_> = integer.all_interfaces().iter().map(|i| i.name().to_string()).collect();
    assert_eq!(names, vec!["java.lang.Comparable", "java.io.Serializable"]);
}

#[test]
fn static_fields_hold_values() {
    let registry = ClassRegistry::new();
    let integer = registry.load_class("java.lang.Integer").unwrap();
    let max = integer.find_field("MAX_VALUE").unwrap();
    assert!(max.is_static());
    assert_eq!(max.get(&Value::Null).unwrap(), Value::Int(i32::MAX));
}
