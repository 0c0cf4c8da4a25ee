//! Arrays, casts, conditionals and assignments.

use jeval_ir::{AssignOp, InfixOp, PrimitiveKind, TreeBuilder};
use jeval_runtime::{ArrayRef, ClassRegistry, ClassLoader, Value};
use pretty_assertions::assert_eq;

use super::{eval, eval_with, TestHooks};
use crate::ErrorCode;

#[test]
fn test_array_initializer_converts_elements() {
    let mut b = TreeBuilder::new();
    let double = b.primitive(PrimitiveKind::Double);
    let doubles = b.array_of(double);
    let one = b.int(1);
    let half = b.number("0.5", PrimitiveKind::Double);
    let init = b.array_initializer(doubles, &[one, half]);
    let created = b.new_array(doubles, &[], Some(init));
    let zero = b.int(0);
    let first = b.array_access(created, zero);
    let tree = b.finish();

    let array = eval(&tree, created).unwrap();
    assert_eq!(
        array.as_array().unwrap().to_vec(),
        vec![Value::Double(1.0), Value::Double(0.5)]
    );
    assert_eq!(eval(&tree, first).unwrap(), Value::Double(1.0));
}

#[test]
fn test_array_dimensions() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let ints = b.array_of(int);
    let grid = b.array_of(ints);
    let two = b.int(2);
    let three = b.int(3);
    let full = b.new_array(grid, &[two, three], None);
    let partial = b.new_array(grid, &[two], None);
    let minus_one = b.int(-1);
    let negative = b.new_array(ints, &[minus_one], None);
    let tree = b.finish();

    let rows = eval(&tree, full).unwrap().as_array().unwrap().to_vec();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1].as_array().unwrap().to_vec(),
        vec![Value::Int(0), Value::Int(0), Value::Int(0)]
    );
    let rows = eval(&tree, partial).unwrap().as_array().unwrap().to_vec();
    assert_eq!(rows, vec![Value::Null, Value::Null]);

    let err = eval(&tree, negative).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E4014);
    assert_eq!(
        err.throwable().map(|t| t.class_name.as_str()),
        Some("java.lang.NegativeArraySizeException")
    );
}

#[test]
fn test_array_index_out_of_bounds() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let ints = b.array_of(int);
    let one = b.int(1);
    let created = b.new_array(ints, &[one], None);
    let five = b.int(5);
    let access = b.array_access(created, five);
    let tree = b.finish();

    let err = eval(&tree, access).unwrap_err();
    assert_eq!(
        err.throwable().map(|t| t.class_name.as_str()),
        Some("java.lang.ArrayIndexOutOfBoundsException")
    );
}

#[test]
fn test_casts() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let long = b.primitive(PrimitiveKind::Long);
    let string = b.string_type();
    let integer = b.class_type("java.lang.Integer");
    let fraction = b.number("3.7", PrimitiveKind::Double);
    let truncated = b.cast(int, fraction);
    let five = b.int(5);
    let widened = b.cast(long, five);
    let boxed = b.cast(integer, five);
    let not_a_string = b.cast(string, five);
    let null = b.null();
    let null_string = b.cast(string, null);
    let tree = b.finish();

    assert_eq!(eval(&tree, truncated).unwrap(), Value::Int(3));
    assert_eq!(eval(&tree, widened).unwrap(), Value::Long(5));
    assert_eq!(eval(&tree, boxed).unwrap(), Value::Int(5));
    assert_eq!(eval(&tree, not_a_string).unwrap_err().code(), ErrorCode::E4013);
    assert_eq!(eval(&tree, null_string).unwrap(), Value::Null);
}

#[test]
fn test_conditional_evaluates_one_branch() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let double = b.primitive(PrimitiveKind::Double);
    let yes = b.boolean(true);
    let one = b.int(1);
    let broken = b.unresolved_name("broken", int);
    let picked = b.conditional(yes, one, broken, int);
    let no = b.boolean(false);
    let two = b.number("2.0", PrimitiveKind::Double);
    let widened = b.conditional(no, two, one, double);
    let tree = b.finish();

    assert_eq!(eval(&tree, picked).unwrap(), Value::Int(1));
    assert_eq!(eval(&tree, widened).unwrap(), Value::Double(1.0));
}

#[test]
fn test_conditional_requires_boolean() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let null = b.null();
    let one = b.int(1);
    let two = b.int(2);
    let conditional = b.conditional(null, one, two, int);
    let tree = b.finish();

    let err = eval(&tree, conditional).unwrap_err();
    assert_eq!(
        err.throwable().map(|t| t.class_name.as_str()),
        Some("java.lang.NullPointerException")
    );
}

#[test]
fn test_compound_assignment_stores_array_element() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let ints = b.array_of(int);
    let holder = b.unresolved_name("values", ints);
    let zero = b.int(0);
    let target = b.array_access(holder, zero);
    let five = b.int(5);
    let add = b.assign(AssignOp::Compound(InfixOp::Add), target, five);
    let reader = b.unresolved_name("values", ints);
    let read = b.array_access(reader, zero);
    let tree = b.finish();

    let registry = ClassRegistry::new();
    let class = registry.load_class("int[]").unwrap();
    let values = Value::Array(ArrayRef::new(class, vec![Value::Int(1), Value::Int(2)]));
    let hooks = TestHooks::default()
        .bind(holder, values.clone())
        .bind(reader, values);

    assert_eq!(eval_with(&tree, &registry, &hooks, add).unwrap(), Value::Int(6));
    assert_eq!(eval_with(&tree, &registry, &hooks, read).unwrap(), Value::Int(6));
}

#[test]
fn test_string_compound_assignment() {
    let mut b = TreeBuilder::new();
    let string = b.string_type();
    let strings = b.array_of(string);
    let holder = b.unresolved_name("names", strings);
    let zero = b.int(0);
    let target = b.array_access(holder, zero);
    let one = b.int(1);
    let append = b.assign(AssignOp::Compound(InfixOp::Add), target, one);
    let tree = b.finish();

    let registry = ClassRegistry::new();
    let class = registry.load_class("java.lang.String[]").unwrap();
    let names = Value::Array(ArrayRef::new(class, vec![Value::string("item")]));
    let hooks = TestHooks::default().bind(holder, names);

    assert_eq!(
        eval_with(&tree, &registry, &hooks, append).unwrap(),
        Value::string("item1")
    );
}

#[test]
fn test_assignment_converts_to_target_type() {
    let mut b = TreeBuilder::new();
    let long = b.primitive(PrimitiveKind::Long);
    let target = b.unresolved_name("total", long);
    let seven = b.int(7);
    let assign = b.assign(AssignOp::Assign, target, seven);
    let tree = b.finish();

    assert_eq!(eval(&tree, assign).unwrap(), Value::Long(7));
}
