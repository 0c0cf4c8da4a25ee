use super::*;

#[test]
fn primitive_names_round_trip() {
    for kind in PrimitiveKind::ALL {
        assert_eq!(PrimitiveKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(PrimitiveKind::from_name("java.lang.String"), None);
}

#[test]
fn wrapper_classes() {
    assert_eq!(PrimitiveKind::Int.wrapper_class(), "java.lang.Integer");
    assert_eq!(PrimitiveKind::Char.wrapper_class(), "java.lang.Character");
}

#[test]
fn simple_names() {
    assert_eq!(simple_name_of("java.awt.event.ActionListener"), "ActionListener");
    assert_eq!(simple_name_of("test.Outer$Inner"), "Inner");
    assert_eq!(simple_name_of("int"), "int");
}

#[test]
fn inner_class_detection() {
    let member = TypeBinding::class("test.Outer.Inner").with_flags(TypeFlags::MEMBER);
    assert!(member.is_inner());
    let nested = member.clone().with_flags(TypeFlags::STATIC);
    assert!(!nested.is_inner());
    assert!(!TypeBinding::class("test.Top").is_inner());
}

#[test]
fn interface_is_abstract() {
    let listener = TypeBinding::interface("java.awt.event.ActionListener");
    assert!(listener.is_interface());
    assert!(listener.is_abstract());
    assert_eq!(listener.simple_name, "ActionListener");
}

#[test]
fn constructor_binding() {
    let ty = TypeId::new(3);
    let ctor = MethodBinding::constructor(ty, vec![]);
    assert!(ctor.is_constructor());
    assert_eq!(ctor.return_type, ty);
    assert_eq!(ctor.name, "<init>");
    assert!(!ctor.is_varargs());
}
