//! Simple names, qualified names and field access.

use jeval_ir::{
    AssignOp, FieldDecl, MethodBinding, MethodFlags, PostfixOp, PrefixOp, PrimitiveKind,
    TreeBuilder, TypeDecl, VariableBinding, VariableFlags,
};
use jeval_runtime::{ClassBuilder, ClassRegistry, ObjectRef, Value};
use pretty_assertions::assert_eq;

use super::{eval, eval_with, TestHooks};
use crate::{Assigned, AstEvaluationEngine, ErrorCode, EvaluationContext, FlowDescription};

fn editor(registry: &ClassRegistry) -> ObjectRef {
    let class = registry.register(
        ClassBuilder::new("test.Editor")
            .field("title", "java.lang.String")
            .build(),
    );
    let editor = ObjectRef::allocate(class);
    editor.set_field("title", Value::string("hello"));
    editor
}

#[test]
fn test_static_constant_through_type_name() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let integer = b.class_type("java.lang.Integer");
    let max = b.variable(
        VariableBinding::field("MAX_VALUE", int, integer).with_flags(VariableFlags::STATIC),
    );
    let qualifier = b.type_name(integer);
    let qualified = b.qualified(qualifier, max);
    let simple = b.var_ref(max);
    let tree = b.finish();

    assert_eq!(eval(&tree, qualified).unwrap(), Value::Int(i32::MAX));
    assert_eq!(eval(&tree, simple).unwrap(), Value::Int(i32::MAX));
}

#[test]
fn test_missing_static_field() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let integer = b.class_type("java.lang.Integer");
    let missing = b.variable(
        VariableBinding::field("NOT_THERE", int, integer).with_flags(VariableFlags::STATIC),
    );
    let qualifier = b.type_name(integer);
    let qualified = b.qualified(qualifier, missing);
    let tree = b.finish();

    assert_eq!(eval(&tree, qualified).unwrap_err().code(), ErrorCode::E4010);
}

#[test]
fn test_own_field_initializer() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let editor = b.class_type("test.Editor");
    let count = b.variable(VariableBinding::field("count", int, editor));
    let width = b.variable(VariableBinding::field("width", int, editor));
    let ten = b.int(10);
    b.type_decl(
        TypeDecl::new(editor)
            .with_field(FieldDecl {
                variable: count,
                initializer: Some(ten),
            })
            .with_field(FieldDecl {
                variable: width,
                initializer: None,
            }),
    );
    let count_ref = b.var_ref(count);
    let this = b.this(editor);
    let width_ref = b.field_access(this, width);
    let tree = b.finish();

    assert_eq!(eval(&tree, count_ref).unwrap(), Value::Int(10));
    assert_eq!(eval(&tree, width_ref).unwrap(), Value::Int(0));
}

#[test]
fn test_own_field_follows_flow() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let editor = b.class_type("test.Editor");
    let count = b.variable(VariableBinding::field("count", int, editor));
    let ten = b.int(10);
    b.type_decl(TypeDecl::new(editor).with_field(FieldDecl {
        variable: count,
        initializer: Some(ten),
    }));
    let before = b.var_ref(count);
    let target = b.var_ref(count);
    let twenty = b.int(20);
    let assign = b.assign(AssignOp::Assign, target, twenty);
    let after = b.var_ref(count);
    let tree = b.finish();

    let mut flow = FlowDescription::from_tree(&tree, Vec::new());
    flow.record_assignment(count, Some(assign), Assigned::Value(assign));
    let registry = ClassRegistry::new();
    let ctx = EvaluationContext::new(&tree, &registry).with_flow(&flow);
    let engine = AstEvaluationEngine::new();

    assert_eq!(engine.evaluate(&ctx, before).unwrap(), Value::Int(10));
    assert_eq!(engine.evaluate(&ctx, after).unwrap(), Value::Int(20));
}

#[test]
fn test_field_of_this_object() {
    let mut b = TreeBuilder::new();
    let string = b.string_type();
    let editor_type = b.class_type("test.Editor");
    let title = b.variable(VariableBinding::field("title", string, editor_type));
    let this = b.this(editor_type);
    let through_this = b.field_access(this, title);
    let simple = b.var_ref(title);
    let tree = b.finish();

    let registry = ClassRegistry::new();
    let hooks = TestHooks::with_this(Value::Object(editor(&registry)));
    assert_eq!(
        eval_with(&tree, &registry, &hooks, through_this).unwrap(),
        Value::string("hello")
    );
    assert_eq!(eval_with(&tree, &registry, &hooks, simple).unwrap(), Value::string("hello"));

    let no_this = TestHooks::default();
    assert_eq!(
        eval_with(&tree, &registry, &no_this, through_this).unwrap_err().code(),
        ErrorCode::E4010
    );
    assert_eq!(
        eval_with(&tree, &registry, &no_this, simple).unwrap_err().code(),
        ErrorCode::E4006
    );
}

#[test]
fn test_field_of_evaluated_receiver() {
    let mut b = TreeBuilder::new();
    let string = b.string_type();
    let editor_type = b.class_type("test.Editor");
    let title = b.variable(VariableBinding::field("title", string, editor_type));
    let receiver = b.unresolved_name("editor", editor_type);
    let qualified = b.qualified(receiver, title);
    let null_receiver = b.null();
    let through_null = b.field_access(null_receiver, title);
    let tree = b.finish();

    let registry = ClassRegistry::new();
    let hooks = TestHooks::default().bind(receiver, Value::Object(editor(&registry)));
    assert_eq!(
        eval_with(&tree, &registry, &hooks, qualified).unwrap(),
        Value::string("hello")
    );
    let err = eval_with(&tree, &registry, &hooks, through_null).unwrap_err();
    assert_eq!(
        err.throwable().map(|t| t.class_name.as_str()),
        Some("java.lang.NullPointerException")
    );
}

#[test]
fn test_array_length() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let int_array = b.array_of(int);
    let three = b.int(3);
    let array = b.new_array(int_array, &[three], None);
    let length = b.array_length(array);
    let tree = b.finish();

    assert_eq!(eval(&tree, length).unwrap(), Value::Int(3));
}

#[test]
fn test_local_variable_needs_flow() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let x = b.variable(VariableBinding::local("x", int));
    let early = b.var_ref(x);
    let target = b.var_ref(x);
    let four = b.int(4);
    let assign = b.assign(AssignOp::Assign, target, four);
    let late = b.var_ref(x);
    let operand = b.var_ref(x);
    let increment = b.prefix(PrefixOp::Increment, operand, int);
    let postfix_operand = b.var_ref(x);
    let post_increment = b.postfix(PostfixOp::Increment, postfix_operand);
    let tree = b.finish();

    let mut flow = FlowDescription::new(Vec::new());
    flow.record_assignment(x, Some(assign), Assigned::Value(assign));
    let registry = ClassRegistry::new();
    let ctx = EvaluationContext::new(&tree, &registry).with_flow(&flow);
    let engine = AstEvaluationEngine::new();

    assert_eq!(engine.evaluate(&ctx, early).unwrap_err().code(), ErrorCode::E4006);
    assert_eq!(engine.evaluate(&ctx, late).unwrap(), Value::Int(4));
    assert_eq!(engine.evaluate(&ctx, increment).unwrap(), Value::Int(5));
    assert_eq!(engine.evaluate(&ctx, post_increment).unwrap(), Value::Int(5));
}

#[test]
fn test_unresolved_simple_name() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let name = b.unresolved_name("nowhere", int);
    let tree = b.finish();

    assert_eq!(eval(&tree, name).unwrap_err().code(), ErrorCode::E4006);
}

#[test]
fn test_parameter_from_first_invocation() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let void = b.primitive(PrimitiveKind::Void);
    let editor = b.class_type("test.Editor");
    let resize = b.method(MethodBinding::method("resize", editor, vec![int], void));
    let size = b.variable(VariableBinding::parameter("size", int, resize, 0));
    let five = b.int(5);
    let first = b.invoke(None, resize, &[five]);
    let nine = b.int(9);
    let second = b.invoke(None, resize, &[nine]);
    let read = b.var_ref(size);
    let tree = b.finish();

    let mut flow = FlowDescription::new(Vec::new());
    flow.record_invocation(resize, first);
    flow.record_invocation(resize, second);
    let registry = ClassRegistry::new();
    let engine = AstEvaluationEngine::new();

    let ctx = EvaluationContext::new(&tree, &registry).with_flow(&flow);
    assert_eq!(engine.evaluate(&ctx, read).unwrap(), Value::Int(5));

    let no_flow = EvaluationContext::new(&tree, &registry);
    assert_eq!(engine.evaluate(&no_flow, read).unwrap_err().code(), ErrorCode::E4007);

    let hooks = TestHooks {
        parameter: Some(Value::Int(42)),
        ..TestHooks::default()
    };
    assert_eq!(eval_with(&tree, &registry, &hooks, read).unwrap(), Value::Int(42));
}

#[test]
fn test_varargs_parameter_from_invocation() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let int_array = b.array_of(int);
    let void = b.primitive(PrimitiveKind::Void);
    let editor = b.class_type("test.Editor");
    let sizes = b.method(
        MethodBinding::method("sizes", editor, vec![int_array], void)
            .with_flags(MethodFlags::VARARGS),
    );
    let values = b.variable(VariableBinding::parameter("values", int_array, sizes, 0));
    let one = b.int(1);
    let two = b.int(2);
    let call = b.invoke(None, sizes, &[one, two]);
    let read = b.var_ref(values);
    let tree = b.finish();

    let mut flow = FlowDescription::new(Vec::new());
    flow.record_invocation(sizes, call);
    let registry = ClassRegistry::new();
    let ctx = EvaluationContext::new(&tree, &registry).with_flow(&flow);
    let packed = AstEvaluationEngine::new().evaluate(&ctx, read).unwrap();

    let array = packed.as_array().unwrap();
    assert_eq!(array.to_vec(), vec![Value::Int(1), Value::Int(2)]);
}
