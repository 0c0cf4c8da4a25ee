//! Bootstrap classes of `java.lang` and `java.util`.
//!
//! Only the members expression evaluation touches in practice are present:
//! wrapper constants and conversions, a handful of `String` and `Math`
//! methods, and the marker interfaces listener detection walks through.

use jeval_ir::PrimitiveKind;

use crate::class::{ClassBuilder, ClassRef};
use crate::errors::Throwable;
use crate::loader::ClassRegistry;
use crate::reflect::java_equals;
use crate::Value;

pub(crate) fn install(registry: &ClassRegistry) {
    let object = registry.register(object_class());
    let serializable = registry.register(ClassBuilder::interface("java.io.Serializable").build());
    registry.register(ClassBuilder::interface("java.lang.Cloneable").build());
    let comparable = registry.register(
        ClassBuilder::interface("java.lang.Comparable")
            .abstract_method("compareTo", &["java.lang.Object"], "int")
            .build(),
    );
    let char_sequence = registry.register(
        ClassBuilder::interface("java.lang.CharSequence")
            .abstract_method("length", &[], "int")
            .build(),
    );
    registry.register(ClassBuilder::interface("java.util.EventListener").build());
    registry.register(ClassBuilder::interface("java.lang.Runnable").abstract_method("run", &[], "void").build());

    registry.register(string_class(&object, &serializable, &comparable, &char_sequence));
    registry.register(class_class(&object, &serializable));
    registry.register(math_class(&object));

    let number = registry.register(
        ClassBuilder::new("java.lang.Number")
            .extends(object.clone())
            .implements(serializable.clone())
            .abstract_class()
            .constructor(&[], |_, _| Ok(()))
            .abstract_method("intValue", &[], "int")
            .abstract_method("longValue", &[], "long")
            .abstract_method("floatValue", &[], "float")
            .abstract_method("doubleValue", &[], "double")
            .build(),
    );
    for (kind, min, max) in [
        (PrimitiveKind::Byte, Value::Byte(i8::MIN), Value::Byte(i8::MAX)),
        (PrimitiveKind::Short, Value::Short(i16::MIN), Value::Short(i16::MAX)),
        (PrimitiveKind::Int, Value::Int(i32::MIN), Value::Int(i32::MAX)),
        (PrimitiveKind::Long, Value::Long(i64::MIN), Value::Long(i64::MAX)),
        // MIN_VALUE of the floating boxes is the smallest positive subnormal.
        (PrimitiveKind::Float, Value::Float(f32::from_bits(1)), Value::Float(f32::MAX)),
        (PrimitiveKind::Double, Value::Double(f64::from_bits(1)), Value::Double(f64::MAX)),
    ] {
        registry.register(number_box(kind, min, max, &number, &comparable));
    }
    registry.register(
        box_class(PrimitiveKind::Boolean, &object, &comparable)
            .implements(serializable.clone())
            .constant("TRUE", "java.lang.Boolean", Value::Boolean(true))
            .constant("FALSE", "java.lang.Boolean", Value::Boolean(false))
            .method("booleanValue", &[], "boolean", |this, _| Ok(this.clone()))
            .build(),
    );
    registry.register(
        box_class(PrimitiveKind::Char, &object, &comparable)
            .implements(serializable.clone())
            .constant("MIN_VALUE", "char", Value::Char(u16::MIN))
            .constant("MAX_VALUE", "char", Value::Char(u16::MAX))
            .method("charValue", &[], "char", |this, _| Ok(this.clone()))
            .build(),
    );
}

fn object_class() -> ClassRef {
    ClassBuilder::new("java.lang.Object")
        .constructor(&[], |_, _| Ok(()))
        .method("toString", &[], "java.lang.String", |this, _| {
            Ok(Value::string(this.to_string()))
        })
        .method("hashCode", &[], "int", |this, _| {
            Ok(Value::Int(this.identity_hash() as i32))
        })
        .method("equals", &["java.lang.Object"], "boolean", |this, args| {
            Ok(Value::Boolean(args.first().is_some_and(|other| this == other)))
        })
        .build()
}

fn receiver_str(this: &Value) -> Result<&str, Throwable> {
    this.as_str()
        .ok_or_else(|| Throwable::illegal_argument("object is not an instance of java.lang.String"))
}

fn string_class(
    object: &ClassRef,
    serializable: &ClassRef,
    comparable: &ClassRef,
    char_sequence: &ClassRef,
) -> ClassRef {
    ClassBuilder::new("java.lang.String")
        .extends(object.clone())
        .implements(serializable.clone())
        .implements(comparable.clone())
        .implements(char_sequence.clone())
        .factory(&[], |_, _| Ok(Value::string("")))
        .factory(&["java.lang.String"], |_, args| {
            Ok(args.first().cloned().unwrap_or(Value::Null))
        })
        .method("length", &[], "int", |this, _| {
            Ok(Value::Int(receiver_str(this)?.encode_utf16().count() as i32))
        })
        .method("isEmpty", &[], "boolean", |this, _| {
            Ok(Value::Boolean(receiver_str(this)?.is_empty()))
        })
        .method("toString", &[], "java.lang.String", |this, _| Ok(this.clone()))
        .method("hashCode", &[], "int", |this, _| {
            Ok(Value::Int(crate::value::java_string_hash(receiver_str(this)?) as i32))
        })
        .method("equals", &["java.lang.Object"], "boolean", |this, args| {
            let other = args.first().and_then(Value::as_str);
            Ok(Value::Boolean(other == Some(receiver_str(this)?)))
        })
        .method("concat", &["java.lang.String"], "java.lang.String", |this, args| {
            let suffix = args
                .first()
                .and_then(Value::as_str)
                .ok_or_else(|| Throwable::null_pointer("concat argument is null"))?;
            Ok(Value::string(format!("{}{suffix}", receiver_str(this)?)))
        })
        .method("toUpperCase", &[], "java.lang.String", |this, _| {
            Ok(Value::string(receiver_str(this)?.to_uppercase()))
        })
        .method("toLowerCase", &[], "java.lang.String", |this, _| {
            Ok(Value::string(receiver_str(this)?.to_lowercase()))
        })
        .method("trim", &[], "java.lang.String", |this, _| {
            Ok(Value::string(receiver_str(this)?.trim_matches(|c: char| c <= ' ')))
        })
        .method("charAt", &["int"], "char", |this, args| {
            let index = args.first().and_then(Value::as_i32).unwrap_or(-1);
            usize::try_from(index)
                .ok()
                .and_then(|i| receiver_str(this).ok()?.encode_utf16().nth(i))
                .map(Value::Char)
                .ok_or_else(|| {
                    Throwable::new(
                        "java.lang.StringIndexOutOfBoundsException",
                        format!("index {index} out of bounds"),
                    )
                })
        })
        .static_method("valueOf", &["java.lang.Object"], "java.lang.String", |_, args| {
            let value = args.first().cloned().unwrap_or(Value::Null);
            crate::reflect::to_java_string(&value).map(Value::string)
        })
        .build()
}

fn class_class(object: &ClassRef, serializable: &ClassRef) -> ClassRef {
    fn receiver_class(this: &Value) -> Result<&ClassRef, Throwable> {
        this.as_class()
            .ok_or_else(|| Throwable::illegal_argument("object is not an instance of java.lang.Class"))
    }
    ClassBuilder::new("java.lang.Class")
        .extends(object.clone())
        .implements(serializable.clone())
        .method("getName", &[], "java.lang.String", |this, _| {
            Ok(Value::string(receiver_class(this)?.name()))
        })
        .method("getSimpleName", &[], "java.lang.String", |this, _| {
            Ok(Value::string(receiver_class(this)?.simple_name()))
        })
        .method("isInterface", &[], "boolean", |this, _| {
            Ok(Value::Boolean(receiver_class(this)?.is_interface()))
        })
        .build()
}

fn math_class(object: &ClassRef) -> ClassRef {
    fn int_arg(args: &[Value], index: usize) -> i32 {
        args.get(index).and_then(Value::as_i32).unwrap_or_default()
    }
    ClassBuilder::new("java.lang.Math")
        .extends(object.clone())
        .constant("PI", "double", Value::Double(std::f64::consts::PI))
        .constant("E", "double", Value::Double(std::f64::consts::E))
        .static_method("max", &["int", "int"], "int", |_, args| {
            Ok(Value::Int(int_arg(args, 0).max(int_arg(args, 1))))
        })
        .static_method("min", &["int", "int"], "int", |_, args| {
            Ok(Value::Int(int_arg(args, 0).min(int_arg(args, 1))))
        })
        .static_method("abs", &["int"], "int", |_, args| {
            Ok(Value::Int(int_arg(args, 0).wrapping_abs()))
        })
        .build()
}

fn box_class(kind: PrimitiveKind, superclass: &ClassRef, comparable: &ClassRef) -> ClassBuilder {
    let primitive = kind.name();
    let wrapper = kind.wrapper_class();
    ClassBuilder::new(wrapper)
        .extends(superclass.clone())
        .implements(comparable.clone())
        .factory(&[primitive], |_, args| Ok(args.first().cloned().unwrap_or(Value::Null)))
        .static_method("valueOf", &[primitive], wrapper, |_, args| {
            Ok(args.first().cloned().unwrap_or(Value::Null))
        })
        .method("toString", &[], "java.lang.String", |this, _| {
            Ok(Value::string(this.to_string()))
        })
        .method("hashCode", &[], "int", |this, _| {
            Ok(Value::Int(this.identity_hash() as i32))
        })
        .method("equals", &["java.lang.Object"], "boolean", |this, args| {
            let other = args.first().cloned().unwrap_or(Value::Null);
            java_equals(this, &other).map(Value::Boolean)
        })
}

fn number_box(
    kind: PrimitiveKind,
    min: Value,
    max: Value,
    number: &ClassRef,
    comparable: &ClassRef,
) -> ClassRef {
    let primitive = kind.name();
    let mut builder = box_class(kind, number, comparable)
        .constant("MIN_VALUE", primitive, min)
        .constant("MAX_VALUE", primitive, max);
    for (method, target) in [
        ("intValue", PrimitiveKind::Int),
        ("longValue", PrimitiveKind::Long),
        ("floatValue", PrimitiveKind::Float),
        ("doubleValue", PrimitiveKind::Double),
    ] {
        builder = builder.method(method, &[], target.name(), move |this, _| {
            this.cast_to(target)
                .ok_or_else(|| Throwable::illegal_argument("object is not a number"))
        });
    }
    match kind {
        PrimitiveKind::Int => {
            builder = builder.static_method("parseInt", &["java.lang.String"], "int", |_, args| {
                parse_integral(args).and_then(|n| {
                    i32::try_from(n)
                        .map(Value::Int)
                        .map_err(|_| Throwable::number_format(format!("Value out of range: {n}")))
                })
            });
        }
        PrimitiveKind::Long => {
            builder = builder.static_method("parseLong", &["java.lang.String"], "long", |_, args| {
                parse_integral(args).map(Value::Long)
            });
        }
        _ => {}
    }
    builder.build()
}

fn parse_integral(args: &[Value]) -> Result<i64, Throwable> {
    let text = args.first().and_then(Value::as_str).unwrap_or("null");
    text.parse::<i64>()
        .map_err(|_| Throwable::number_format(format!("For input string: \"{text}\"")))
}
