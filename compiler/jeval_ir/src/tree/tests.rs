use pretty_assertions::assert_eq;

use crate::{
    ExprKind, InfixOp, MethodBinding, MethodDecl, PrimitiveKind, Span, Stmt, TreeBuilder,
    TypeDecl, VariableBinding,
};

#[test]
fn source_slices_real_spans() {
    let mut b = TreeBuilder::with_source("int x = 2 + 3;");
    let int = b.primitive(PrimitiveKind::Int);
    let two = b.number("2", PrimitiveKind::Int);
    let three = b.number("3", PrimitiveKind::Int);
    let range = b.list(&[two, three]);
    let sum = b.push(
        ExprKind::Infix {
            op: InfixOp::Add,
            operands: range,
        },
        Span::new(8, 13),
        int,
    );
    let tree = b.finish();
    assert_eq!(tree.source_of(sum), "2 + 3");
}

#[test]
fn source_falls_back_to_printer() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let two = b.int(2);
    let three = b.int(3);
    let four = b.int(4);
    let product = b.infix(InfixOp::Mul, &[three, four], int);
    let sum = b.infix(InfixOp::Add, &[two, product], int);
    let tree = b.finish();
    assert_eq!(tree.source_of(sum), "2 + 3 * 4");
}

#[test]
fn unparenthesized_strips_all_levels() {
    let mut b = TreeBuilder::new();
    let null = b.null();
    let once = b.paren(null);
    let twice = b.paren(once);
    let tree = b.finish();
    assert_eq!(tree.unparenthesized(twice), null);
    assert_eq!(tree.source_of(twice), "((null))");
}

#[test]
fn method_keys_use_erased_binary_names() {
    let mut b = TreeBuilder::new();
    let string = b.string_type();
    let int = b.primitive(PrimitiveKind::Int);
    let ints = b.array_of(int);
    let holder = b.class_type("test.Holder");
    let void = b.primitive(PrimitiveKind::Void);
    let t = b.type_variable("T", None);
    let generic = b.method(MethodBinding::method("put", holder, vec![t, ints], void));
    let concrete = b.method(
        MethodBinding::method("put", holder, vec![string, ints], void).with_declaration(generic),
    );
    let tree = b.finish();
    assert_eq!(tree.method_key(concrete).signature(), "put(java.lang.String,int[])");
    assert_eq!(
        tree.generic_method_key(concrete).map(|k| k.signature()),
        Some("put(java.lang.Object,int[])".to_string())
    );
    assert_eq!(tree.generic_method_key(generic), None);
}

#[test]
fn finds_local_declarations() {
    let mut b = TreeBuilder::new();
    let test = b.class_type("test.Test");
    let int = b.primitive(PrimitiveKind::Int);
    let field = b.variable(VariableBinding::field("count", int, test));
    let init = b.int(7);
    let helper = b.method(MethodBinding::method("helper", test, vec![], int));
    let body = b.int(1);
    b.type_decl(
        TypeDecl::new(test)
            .with_field(crate::FieldDecl {
                variable: field,
                initializer: Some(init),
            })
            .with_method(MethodDecl::new(helper, vec![]).with_body(vec![Stmt::Return(Some(body))])),
    );
    let tree = b.finish();
    assert_eq!(tree.find_field_decl(field).and_then(|f| f.initializer), Some(init));
    let decl = tree.find_method_decl(helper);
    assert_eq!(decl.and_then(MethodDecl::single_return), Some(body));
    assert_eq!(tree.primary_type(), Some(test));
}

#[test]
fn enclosing_type_finds_the_declaring_body() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let outer = b.class_type("test.Outer");
    let inner = b.class_type("test.Outer$Inner");
    let compute = b.method(MethodBinding::method("compute", inner, vec![], int));
    let one = b.int(1);
    let two = b.int(2);
    let sum = b.infix(InfixOp::Add, &[one, two], int);
    let paren = b.paren(sum);
    let elsewhere = b.int(3);
    b.type_decl(TypeDecl::new(outer));
    b.type_decl(
        TypeDecl::new(inner)
            .with_method(MethodDecl::new(compute, vec![]).with_body(vec![Stmt::Other, Stmt::Return(Some(paren))])),
    );
    let tree = b.finish();

    assert!(tree.contains(paren, two));
    assert!(!tree.contains(sum, paren));
    assert_eq!(tree.enclosing_type(two), Some(inner));
    assert_eq!(tree.enclosing_type(elsewhere), Some(outer));
}

#[test]
fn supertypes_walk_superclass_then_interfaces() {
    let mut b = TreeBuilder::new();
    let object = b.object_type();
    let listener = b.interface_type("java.util.EventListener");
    let base = b.class_type("test.Base");
    b.type_mut(base).interfaces.push(listener);
    let derived = b.class_type("test.Derived");
    b.type_mut(derived).superclass = Some(base);
    let tree = b.finish();
    assert_eq!(tree.supertypes(derived), vec![derived, base, object, listener]);
}
