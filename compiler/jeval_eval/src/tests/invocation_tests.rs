//! Method, super-method and constructor invocation, anonymous classes,
//! interceptors and local-method simulation.

use std::sync::Arc;

use jeval_describe::{ComponentDescription, DescriptionRegistry, MethodDescription, ParameterDescription};
use jeval_ir::{
    ExprId, JavadocTag, MemberKey, MethodBinding, MethodDecl, MethodFlags, PrimitiveKind, Stmt,
    SyntaxTree, TreeBuilder, TypeBinding, TypeDecl, TypeFlags, VariableBinding,
};
use jeval_runtime::{ClassBuilder, ClassRef, ClassRegistry, MethodDef, ObjectRef, Throwable, Value};
use pretty_assertions::assert_eq;

use super::{eval_with, TestHooks};
use crate::errors::rewritten;
use crate::{
    AnonymousCall, AstEvaluationEngine, ConstructorCall, ErrorCode, EvalConfig, EvalError,
    EvalOutcome, EvalResult, Evaluation, EvaluationContext, InvocationInterceptor, MethodCall,
};

fn run(engine: &AstEvaluationEngine, tree: &SyntaxTree, registry: &ClassRegistry, expr: ExprId) -> EvalResult {
    let ctx = EvaluationContext::new(tree, registry);
    engine.evaluate(&ctx, expr)
}

fn object(registry: &ClassRegistry) -> ClassRef {
    registry.object().unwrap()
}

// Static calls on test.Counter

struct CounterTree {
    tree: SyntaxTree,
    twice: ExprId,
    fail: ExprId,
}

fn counter_tree() -> CounterTree {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let counter = b.class_type("test.Counter");
    let twice = b.method(
        MethodBinding::method("twice", counter, vec![int], int).with_flags(MethodFlags::STATIC),
    );
    let fail = b.method(
        MethodBinding::method("fail", counter, vec![], int).with_flags(MethodFlags::STATIC),
    );
    let arg = b.int(21);
    let twice = b.invoke(None, twice, &[arg]);
    let fail = b.invoke(None, fail, &[]);
    CounterTree {
        tree: b.finish(),
        twice,
        fail,
    }
}

fn counter_registry() -> ClassRegistry {
    let registry = ClassRegistry::new();
    registry.register(
        ClassBuilder::new("test.Counter")
            .extends(object(&registry))
            .static_method("twice", &["int"], "int", |_, args| {
                Ok(Value::Int(args[0].as_i32().unwrap_or(0) * 2))
            })
            .static_method("fail", &[], "int", |_, _| Err(Throwable::illegal_state("boom")))
            .build(),
    );
    registry
}

struct Fixed {
    name: &'static str,
    priority: i32,
    answer: Option<Value>,
}

impl InvocationInterceptor for Fixed {
    fn name(&self) -> &'static str {
        self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn evaluate_method(&self, _ctx: &EvaluationContext<'_>, _call: &MethodCall<'_>) -> EvalOutcome {
        Ok(self.answer.clone().map_or(Evaluation::Unknown, Evaluation::Value))
    }
}

#[test]
fn test_static_method_invocation() {
    let calls = counter_tree();
    let registry = counter_registry();

    assert_eq!(
        run(&AstEvaluationEngine::new(), &calls.tree, &registry, calls.twice).unwrap(),
        Value::Int(42)
    );
}

#[test]
fn test_missing_method() {
    let calls = counter_tree();
    let registry = ClassRegistry::new();
    registry.register(ClassBuilder::new("test.Counter").build());

    assert_eq!(
        run(&AstEvaluationEngine::new(), &calls.tree, &registry, calls.twice).unwrap_err().code(),
        ErrorCode::E4010
    );
}

#[test]
fn test_interceptors_run_by_ascending_priority() {
    let calls = counter_tree();
    let registry = counter_registry();
    let engine = AstEvaluationEngine::builder()
        .interceptor(Fixed {
            name: "late",
            priority: 10,
            answer: Some(Value::Int(1)),
        })
        .interceptor(Fixed {
            name: "early",
            priority: -5,
            answer: Some(Value::Int(2)),
        })
        .interceptor(Fixed {
            name: "silent",
            priority: -10,
            answer: None,
        })
        .build();

    assert_eq!(engine.interceptors().names(), vec!["silent", "early", "late"]);
    assert_eq!(run(&engine, &calls.tree, &registry, calls.twice).unwrap(), Value::Int(2));
}

#[test]
fn test_interceptor_resolves_replacement_method() {
    struct Redirect(Arc<MethodDef>);

    impl InvocationInterceptor for Redirect {
        fn name(&self) -> &'static str {
            "redirect"
        }

        fn resolve_method(&self, _class: &ClassRef, key: &MemberKey) -> Option<Arc<MethodDef>> {
            (key.name == "twice").then(|| self.0.clone())
        }
    }

    let replacement = ClassBuilder::new("test.Fake")
        .static_method("twice", &["int"], "int", |_, _| Ok(Value::Int(-1)))
        .build()
        .find_method(&MemberKey::new("twice", ["int"]))
        .unwrap();
    let calls = counter_tree();
    let registry = counter_registry();
    let engine = AstEvaluationEngine::builder()
        .interceptor(Redirect(replacement))
        .build();

    assert_eq!(run(&engine, &calls.tree, &registry, calls.twice).unwrap(), Value::Int(-1));
}

#[test]
fn test_thrown_exception_becomes_method_failure() {
    let calls = counter_tree();
    let registry = counter_registry();

    let err = run(&AstEvaluationEngine::new(), &calls.tree, &registry, calls.fail).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E4001);
    assert_eq!(
        err.throwable().map(|t| t.class_name.as_str()),
        Some("java.lang.IllegalStateException")
    );
}

#[test]
fn test_interceptor_rewrites_exception() {
    struct Friendly;

    impl InvocationInterceptor for Friendly {
        fn name(&self) -> &'static str {
            "friendly"
        }

        fn rewrite_exception(
            &self,
            _ctx: &EvaluationContext<'_>,
            _expr: ExprId,
            thrown: &Throwable,
        ) -> Option<EvalError> {
            (thrown.class_name == "java.lang.IllegalStateException")
                .then(|| rewritten("the counter is broken", thrown.clone()))
        }
    }

    let calls = counter_tree();
    let registry = counter_registry();
    let engine = AstEvaluationEngine::builder().interceptor(Friendly).build();

    let err = run(&engine, &calls.tree, &registry, calls.fail).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E4016);
    assert!(err.throwable().is_some());
}

#[test]
fn test_non_executable_description_yields_zero() {
    let calls = counter_tree();
    let registry = counter_registry();
    let descriptions = DescriptionRegistry::new();
    let mut counter = ComponentDescription::new("test.Counter");
    counter.add_method(
        MethodDescription::new(MemberKey::new("twice", ["int"]), "int").with_executable(false),
    );
    descriptions.register(counter);

    let ctx = EvaluationContext::new(&calls.tree, &registry).with_descriptions(&descriptions);
    assert_eq!(
        AstEvaluationEngine::new().evaluate(&ctx, calls.twice).unwrap(),
        Value::Int(0)
    );

    let ungated = AstEvaluationEngine::builder()
        .config(EvalConfig::default().with_descriptions_gate_execution(false))
        .build();
    assert_eq!(ungated.evaluate(&ctx, calls.twice).unwrap(), Value::Int(42));
}

// Instance calls

#[test]
fn test_instance_method_on_string() {
    let mut b = TreeBuilder::new();
    let string = b.string_type();
    let upper = b.method(MethodBinding::method("toUpperCase", string, vec![], string));
    let receiver = b.string("abc");
    let call = b.invoke(Some(receiver), upper, &[]);
    let null = b.null();
    let on_null = b.invoke(Some(null), upper, &[]);
    let tree = b.finish();

    let registry = ClassRegistry::new();
    let engine = AstEvaluationEngine::new();
    assert_eq!(run(&engine, &tree, &registry, call).unwrap(), Value::string("ABC"));
    assert_eq!(run(&engine, &tree, &registry, on_null).unwrap_err().code(), ErrorCode::E4005);
}

#[test]
fn test_varargs_are_packed() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let ints = b.array_of(int);
    let counter = b.class_type("test.Counter");
    let count = b.method(
        MethodBinding::method("count", counter, vec![ints], int)
            .with_flags(MethodFlags::STATIC | MethodFlags::VARARGS),
    );
    let one = b.int(1);
    let two = b.int(2);
    let three = b.int(3);
    let three_args = b.invoke(None, count, &[one, two, three]);
    let no_args = b.invoke(None, count, &[]);
    let four = b.int(4);
    let five = b.int(5);
    let init = b.array_initializer(ints, &[four, five]);
    let array = b.new_array(ints, &[], Some(init));
    let passed_array = b.invoke(None, count, &[array]);
    let tree = b.finish();

    let registry = ClassRegistry::new();
    registry.register(
        ClassBuilder::new("test.Counter")
            .extends(object(&registry))
            .method_with_flags(
                "count",
                &["int[]"],
                "int",
                MethodFlags::STATIC | MethodFlags::VARARGS,
                |_, args| Ok(Value::Int(args[0].as_array().map_or(-1, |a| a.len() as i32))),
            )
            .build(),
    );
    let engine = AstEvaluationEngine::new();

    assert_eq!(run(&engine, &tree, &registry, three_args).unwrap(), Value::Int(3));
    assert_eq!(run(&engine, &tree, &registry, no_args).unwrap(), Value::Int(0));
    assert_eq!(run(&engine, &tree, &registry, passed_array).unwrap(), Value::Int(2));
}

#[test]
fn test_super_method_skips_override() {
    let mut b = TreeBuilder::new();
    let string = b.string_type();
    let base = b.class_type("test.Base");
    let derived = b.declare_type(TypeBinding::class("test.Derived").with_superclass(base));
    let describe = b.method(MethodBinding::method("describe", base, vec![], string));
    let super_call = b.super_invoke(describe, &[]);
    let this = b.this(derived);
    let virtual_call = b.invoke(Some(this), describe, &[]);
    let tree = b.finish();

    let registry = ClassRegistry::new();
    let base_class = registry.register(
        ClassBuilder::new("test.Base")
            .extends(object(&registry))
            .method("describe", &[], "java.lang.String", |_, _| Ok(Value::string("base")))
            .build(),
    );
    let derived_class = registry.register(
        ClassBuilder::new("test.Derived")
            .extends(base_class)
            .method("describe", &[], "java.lang.String", |_, _| Ok(Value::string("derived")))
            .build(),
    );
    let hooks = TestHooks::with_this(Value::Object(ObjectRef::allocate(derived_class)));

    assert_eq!(eval_with(&tree, &registry, &hooks, super_call).unwrap(), Value::string("base"));
    assert_eq!(
        eval_with(&tree, &registry, &hooks, virtual_call).unwrap(),
        Value::string("derived")
    );
}

// Constructors

struct Widgets {
    registry: ClassRegistry,
    editor: Value,
    container: Value,
}

/// `test.Button(test.Container)` keeping its parent, `test.Panel.add`
/// returning its argument, and an editor that is not a container.
fn widgets() -> Widgets {
    let registry = ClassRegistry::new();
    let object = object(&registry);
    let container = registry.register(ClassBuilder::new("test.Container").extends(object.clone()).build());
    registry.register(
        ClassBuilder::new("test.Button")
            .extends(object.clone())
            .field("parent", "test.Container")
            .constructor(&["test.Container"], |button, args| {
                button.set_field("parent", args[0].clone());
                Ok(())
            })
            .build(),
    );
    registry.register(
        ClassBuilder::new("test.Panel")
            .extends(object.clone())
            .method("add", &["test.Container"], "test.Container", |_, args| Ok(args[0].clone()))
            .build(),
    );
    let editor = registry.register(ClassBuilder::new("test.Editor").extends(object).build());
    Widgets {
        editor: Value::Object(ObjectRef::allocate(editor)),
        container: Value::Object(ObjectRef::allocate(container)),
        registry,
    }
}

fn parent_of(button: &Value) -> Value {
    button.as_object().unwrap().get_field("parent").unwrap()
}

#[test]
fn test_constructor_nulls_unassignable_this() {
    let mut b = TreeBuilder::new();
    let editor = b.class_type("test.Editor");
    let container = b.class_type("test.Container");
    let button = b.class_type("test.Button");
    let constructor = b.method(MethodBinding::constructor(button, vec![container]));
    let this = b.this(editor);
    let creation = b.new_instance(button, constructor, &[this]);
    let tree = b.finish();

    let widgets = widgets();
    let hooks = TestHooks::with_this(widgets.editor.clone());
    let created = eval_with(&tree, &widgets.registry, &hooks, creation).unwrap();
    assert_eq!(parent_of(&created), Value::Null);

    let hooks = TestHooks::with_this(widgets.container.clone());
    let created = eval_with(&tree, &widgets.registry, &hooks, creation).unwrap();
    assert_eq!(parent_of(&created), widgets.container);
}

#[test]
fn test_linking_parameter_nulls_this() {
    let mut b = TreeBuilder::new();
    let editor = b.class_type("test.Editor");
    let container = b.class_type("test.Container");
    let panel = b.class_type("test.Panel");
    let add = b.method(MethodBinding::method("add", panel, vec![container], container));
    let receiver = b.unresolved_name("panel", panel);
    let this = b.this(editor);
    let call = b.invoke(Some(receiver), add, &[this]);
    let tree = b.finish();

    let widgets = widgets();
    let panel_object = ObjectRef::allocate(widgets.registry.get("test.Panel").unwrap());
    let hooks = TestHooks::with_this(widgets.editor.clone()).bind(receiver, Value::Object(panel_object));
    let descriptions = DescriptionRegistry::new();
    let mut description = ComponentDescription::new("test.Panel");
    description.add_method(
        MethodDescription::new(MemberKey::new("add", ["test.Container"]), "test.Container")
            .with_parameter(ParameterDescription::new(0, "test.Container").as_parent()),
    );
    descriptions.register(description);

    let ctx = EvaluationContext::new(&tree, &widgets.registry)
        .with_hooks(&hooks)
        .with_descriptions(&descriptions);
    assert_eq!(AstEvaluationEngine::new().evaluate(&ctx, call).unwrap(), Value::Null);
}

#[test]
fn test_constructor_interceptor() {
    struct FakeButtons;

    impl InvocationInterceptor for FakeButtons {
        fn name(&self) -> &'static str {
            "fake buttons"
        }

        fn evaluate_constructor(
            &self,
            _ctx: &EvaluationContext<'_>,
            call: &ConstructorCall<'_>,
        ) -> EvalOutcome {
            if call.class.name() == "test.Button" {
                return Ok(Value::string("fake button").into());
            }
            Ok(Evaluation::Unknown)
        }
    }

    let mut b = TreeBuilder::new();
    let container = b.class_type("test.Container");
    let button = b.class_type("test.Button");
    let constructor = b.method(MethodBinding::constructor(button, vec![container]));
    let null = b.null();
    let creation = b.new_instance(button, constructor, &[null]);
    let tree = b.finish();

    let widgets = widgets();
    let engine = AstEvaluationEngine::builder().interceptor(FakeButtons).build();
    assert_eq!(
        run(&engine, &tree, &widgets.registry, creation).unwrap(),
        Value::string("fake button")
    );
}

#[test]
fn test_inner_class_creation_yields_null() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let object = b.object_type();
    let inner = b.declare_type(
        TypeBinding::class("test.Outer.Inner")
            .with_binary_name("test.Outer$Inner")
            .with_superclass(object)
            .with_flags(TypeFlags::MEMBER),
    );
    let constructor = b.method(MethodBinding::constructor(inner, vec![int]));
    let broken = b.unresolved_name("broken", int);
    let creation = b.new_instance(inner, constructor, &[broken]);
    let tree = b.finish();

    assert_eq!(
        run(&AstEvaluationEngine::new(), &tree, &ClassRegistry::new(), creation).unwrap(),
        Value::Null
    );
}

// Anonymous classes

#[test]
fn test_anonymous_listener_becomes_stub() {
    let mut b = TreeBuilder::new();
    let listener = b.interface_type("test.ActionListener");
    let anonymous = b.anonymous_type(listener);
    let constructor = b.method(MethodBinding::constructor(anonymous, vec![]));
    let creation = b.new_instance(anonymous, constructor, &[]);
    let tree = b.finish();

    let registry = ClassRegistry::new();
    registry.register(
        ClassBuilder::interface("test.ActionListener")
            .abstract_method("actionPerformed", &["java.lang.Object"], "void")
            .build(),
    );
    let stub = run(&AstEvaluationEngine::new(), &tree, &registry, creation).unwrap();
    let stub = stub.as_object().unwrap();
    assert!(stub.class().is_subtype_of("test.ActionListener"));

    let handler = stub
        .class()
        .find_method(&MemberKey::new("actionPerformed", ["java.lang.Object"]))
        .unwrap();
    assert!(handler.invoke(&Value::Object(stub.clone()), &[Value::Null]).is_ok());
}

fn helper_tree() -> (SyntaxTree, ExprId, ExprId) {
    let mut b = TreeBuilder::new();
    let helper = b.class_type("test.Helper");
    let holder = b.class_type("test.Holder");
    let anonymous = b.anonymous_type(helper);
    let anonymous_constructor = b.method(MethodBinding::constructor(anonymous, vec![]));
    let helper_creation = b.new_instance(anonymous, anonymous_constructor, &[]);
    let holder_constructor = b.method(MethodBinding::constructor(holder, vec![helper]));
    let holder_creation = b.new_instance(holder, holder_constructor, &[helper_creation]);
    (b.finish(), helper_creation, holder_creation)
}

#[test]
fn test_anonymous_helper_fails_alone_and_downgrades_as_argument() {
    let (tree, helper_creation, holder_creation) = helper_tree();
    let registry = ClassRegistry::new();
    let object = object(&registry);
    registry.register(ClassBuilder::new("test.Helper").extends(object.clone()).build());
    registry.register(
        ClassBuilder::new("test.Holder")
            .extends(object)
            .field("helper", "test.Helper")
            .constructor(&["test.Helper"], |holder, args| {
                holder.set_field("helper", args[0].clone());
                Ok(())
            })
            .build(),
    );
    let engine = AstEvaluationEngine::new();

    let err = run(&engine, &tree, &registry, helper_creation).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E4008);

    let holder = run(&engine, &tree, &registry, holder_creation).unwrap();
    assert_eq!(
        holder.as_object().unwrap().get_field("helper"),
        Some(Value::Null)
    );
}

#[test]
fn test_anonymous_interceptor() {
    struct Helpers;

    impl InvocationInterceptor for Helpers {
        fn name(&self) -> &'static str {
            "helpers"
        }

        fn evaluate_anonymous(
            &self,
            ctx: &EvaluationContext<'_>,
            call: &AnonymousCall<'_>,
        ) -> EvalOutcome {
            let concrete = ctx.tree().qualified_name(call.concrete);
            Ok(Value::string(format!("instead of {concrete}")).into())
        }
    }

    let (tree, helper_creation, _) = helper_tree();
    let engine = AstEvaluationEngine::builder().interceptor(Helpers).build();
    assert_eq!(
        run(&engine, &tree, &ClassRegistry::new(), helper_creation).unwrap(),
        Value::string("instead of test.Helper")
    );
}

// Methods of the unit under evaluation

struct LocalMethods {
    tree: SyntaxTree,
    wrap: ExprId,
    answer: ExprId,
    opaque: ExprId,
    broken: ExprId,
}

fn local_methods() -> LocalMethods {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let object = b.object_type();
    let editor = b.class_type("test.Editor");

    let wrap = b.method(MethodBinding::method("wrap", editor, vec![object], object));
    let value = b.variable(VariableBinding::parameter("value", object, wrap, 0));
    let answer = b.method(MethodBinding::method("answer", editor, vec![], int));
    let forty_two = b.int(42);
    let opaque = b.method(MethodBinding::method("opaque", editor, vec![], int));
    let broken = b.method(MethodBinding::method("broken", editor, vec![], int));
    let missing = b.unresolved_name("missing", int);
    b.type_decl(
        TypeDecl::new(editor)
            .with_method(
                MethodDecl::new(wrap, vec![value])
                    .with_tag(JavadocTag::new(crate::DEFAULT_RETURN_TAG, &["value"])),
            )
            .with_method(MethodDecl::new(answer, vec![]).with_body(vec![Stmt::Return(Some(forty_two))]))
            .with_method(MethodDecl::new(opaque, vec![]))
            .with_method(MethodDecl::new(broken, vec![]).with_body(vec![Stmt::Return(Some(missing))])),
    );

    let text = b.string("x");
    let wrap = b.invoke(None, wrap, &[text]);
    let answer = b.invoke(None, answer, &[]);
    let opaque = b.invoke(None, opaque, &[]);
    let broken = b.invoke(None, broken, &[]);
    LocalMethods {
        tree: b.finish(),
        wrap,
        answer,
        opaque,
        broken,
    }
}

#[test]
fn test_local_method_simulation() {
    let methods = local_methods();
    let registry = ClassRegistry::new();
    let engine = AstEvaluationEngine::new();

    assert_eq!(run(&engine, &methods.tree, &registry, methods.wrap).unwrap(), Value::string("x"));
    assert_eq!(run(&engine, &methods.tree, &registry, methods.answer).unwrap(), Value::Int(42));
    assert_eq!(
        run(&engine, &methods.tree, &registry, methods.opaque).unwrap_err().code(),
        ErrorCode::E4004
    );
    let err = run(&engine, &methods.tree, &registry, methods.broken).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E4004);
    assert!(err.to_string().contains("broken()"));
}

#[test]
fn test_get_class_of_primary_type() {
    let mut b = TreeBuilder::new();
    let editor = b.class_type("test.Editor");
    b.type_decl(TypeDecl::new(editor));
    let class = b.declare_type(TypeBinding::class("java.lang.Class"));
    let get_class = b.method(MethodBinding::method("getClass", editor, vec![], class));
    let call = b.invoke(None, get_class, &[]);
    let tree = b.finish();

    let registry = ClassRegistry::new();
    registry.register(ClassBuilder::new("test.Editor").extends(object(&registry)).build());
    let value = run(&AstEvaluationEngine::new(), &tree, &registry, call).unwrap();
    assert_eq!(value.as_class().map(|c| c.name()), Some("test.Editor"));
}

#[test]
fn test_static_unit_method_is_invoked_natively() {
    let mut b = TreeBuilder::new();
    let int = b.primitive(PrimitiveKind::Int);
    let counter = b.class_type("test.Counter");
    let twice = b.method(
        MethodBinding::method("twice", counter, vec![int], int).with_flags(MethodFlags::STATIC),
    );
    let n = b.variable(VariableBinding::parameter("n", int, twice, 0));
    b.type_decl(
        TypeDecl::new(counter)
            .with_method(MethodDecl::new(twice, vec![n]).with_body(vec![Stmt::Other, Stmt::Other])),
    );
    let arg = b.int(21);
    let call = b.invoke(None, twice, &[arg]);
    let tree = b.finish();

    let registry = counter_registry();
    assert_eq!(
        run(&AstEvaluationEngine::new(), &tree, &registry, call).unwrap(),
        Value::Int(42)
    );
}

#[test]
fn test_explicit_this_receiver_is_invoked_natively() {
    let mut b = TreeBuilder::new();
    let string = b.string_type();
    let editor = b.class_type("test.Editor");
    let helper = b.method(MethodBinding::method("helper", editor, vec![], string));
    let local = b.string("local");
    b.type_decl(
        TypeDecl::new(editor)
            .with_method(MethodDecl::new(helper, vec![]).with_body(vec![Stmt::Return(Some(local))])),
    );
    let this = b.this(editor);
    let qualified = b.invoke(Some(this), helper, &[]);
    let unqualified = b.invoke(None, helper, &[]);
    let tree = b.finish();

    let registry = ClassRegistry::new();
    let editor_class = registry.register(
        ClassBuilder::new("test.Editor")
            .extends(object(&registry))
            .method("helper", &[], "java.lang.String", |_, _| Ok(Value::string("native")))
            .build(),
    );
    let hooks = TestHooks::with_this(Value::Object(ObjectRef::allocate(editor_class)));

    assert_eq!(eval_with(&tree, &registry, &hooks, qualified).unwrap(), Value::string("native"));
    assert_eq!(eval_with(&tree, &registry, &hooks, unqualified).unwrap(), Value::string("local"));
}

#[test]
fn test_get_class_of_nested_type() {
    let mut b = TreeBuilder::new();
    let editor = b.class_type("test.Editor");
    let inner = b.class_type("test.Editor$Inner");
    let class = b.declare_type(TypeBinding::class("java.lang.Class"));
    let root = b.object_type();
    let get_class = b.method(MethodBinding::method("getClass", root, vec![], class));
    let describe = b.method(MethodBinding::method("describe", inner, vec![], class));
    let call = b.invoke(None, get_class, &[]);
    b.type_decl(TypeDecl::new(editor));
    b.type_decl(
        TypeDecl::new(inner)
            .with_method(MethodDecl::new(describe, vec![]).with_body(vec![Stmt::Return(Some(call))])),
    );
    let tree = b.finish();

    let registry = ClassRegistry::new();
    registry.register(ClassBuilder::new("test.Editor").extends(object(&registry)).build());
    registry.register(ClassBuilder::new("test.Editor$Inner").extends(object(&registry)).build());
    let value = run(&AstEvaluationEngine::new(), &tree, &registry, call).unwrap();
    assert_eq!(value.as_class().map(|c| c.name()), Some("test.Editor$Inner"));
}
