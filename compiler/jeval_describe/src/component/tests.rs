use super::*;
use crate::ParameterDescription;
use pretty_assertions::assert_eq;

fn button() -> ComponentDescription {
    let mut component = ComponentDescription::new("test.Button");
    component.add_method(MethodDescription::new(
        MemberKey::new("setText", ["java.lang.String"]),
        "void",
    ));
    component.add_method(
        MethodDescription::new(MemberKey::new("open", Vec::<String>::new()), "void")
            .with_executable(false)
            .with_order(MethodOrder::Last),
    );
    component
}

#[test]
fn methods_are_found_by_key_and_signature() {
    let component = button();
    let key = MemberKey::new("setText", ["java.lang.String"]);
    assert_eq!(component.method(&key).map(MethodDescription::name), Some("setText"));
    assert!(component.method_by_signature("setText(java.lang.String)").is_some());
    assert!(component.method_by_signature("setText(").is_none());
    assert!(component.method_by_signature("missing()").is_none());
}

#[test]
fn adding_same_method_joins() {
    let mut component = button();
    component.add_method(
        MethodDescription::new(MemberKey::new("setText", ["java.lang.String"]), "void")
            .with_executable(false),
    );
    assert_eq!(component.methods().len(), 2);
    assert!(!component.is_executable(&MemberKey::new("setText", ["java.lang.String"])));
}

#[test]
fn executability_defaults_to_true() {
    let component = button();
    assert!(component.is_executable(&MemberKey::new("undescribed", Vec::<String>::new())));
    assert!(!component.is_executable(&MemberKey::new("open", Vec::<String>::new())));
}

#[test]
fn method_order_falls_back_to_default() {
    let mut component = button();
    let set_text = MemberKey::new("setText", ["java.lang.String"]);
    assert_eq!(component.method_order(&set_text), &MethodOrder::AfterCreation);
    component.set_default_method_order(MethodOrder::AfterAssociation);
    assert_eq!(component.method_order(&set_text), &MethodOrder::AfterAssociation);
    assert_eq!(
        component.method_order(&MemberKey::new("open", Vec::<String>::new())),
        &MethodOrder::Last
    );
}

#[test]
fn constructors_join() {
    let mut component = button();
    component.add_constructor(ConstructorDescription::new(["test.Composite", "int"]));
    component.add_constructor(
        ConstructorDescription::new(["test.Composite", "int"])
            .with_parameter(ParameterDescription::new(0, "test.Composite").as_parent()),
    );
    assert_eq!(component.constructors().len(), 1);
    let ctor = component
        .constructor(&MemberKey::constructor(["test.Composite", "int"]))
        .map(|c| c.parameters()[0].parent);
    assert_eq!(ctor, Some(true));
}

#[test]
fn parameters_and_creations() {
    let mut component = button();
    component.add_parameter("layout.has", "true");
    component.add_parameter("x", "false");
    assert!(component.has_true_parameter("layout.has"));
    assert!(!component.has_true_parameter("x"));
    assert!(!component.has_true_parameter("missing"));

    component.add_creation(CreationDescription::new(None, "new test.Button(%parent%, 0)"));
    component.add_creation(
        CreationDescription::new(Some("check"), "new test.Button(%parent%, 32)").with_name("Check"),
    );
    assert_eq!(
        component.creation("check").map(|c| c.source.as_str()),
        Some("new test.Button(%parent%, 32)")
    );
    assert_eq!(
        component.creation("radio").map(|c| c.source.as_str()),
        Some("new test.Button(%parent%, 0)")
    );
    assert_eq!(component.creations().len(), 2);
    component.clear_creations();
    assert_eq!(component.creations().len(), 1);
}
