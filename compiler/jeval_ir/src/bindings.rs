//! Resolved bindings supplied by the parser.
//!
//! Every expression carries the [`TypeId`] of its static type. Method
//! invocations and constructor creations carry a [`MethodId`], names carry a
//! [`VariableId`] or a type reference. Bindings are immutable once a tree is
//! frozen.

use bitflags::bitflags;
use std::fmt;

macro_rules! binding_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

binding_id!(
    /// Index of a [`TypeBinding`].
    TypeId
);
binding_id!(
    /// Index of a [`MethodBinding`] (methods and constructors).
    MethodId
);
binding_id!(
    /// Index of a [`VariableBinding`] (fields, locals and parameters).
    VariableId
);

/// Java primitive kinds, plus `void` for method return types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 9] = [
        Self::Boolean,
        Self::Char,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Void,
    ];

    /// Java keyword for the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Char => "char",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Binary name of the wrapper class (`java.lang.Integer` for `int`).
    pub const fn wrapper_class(self) -> &'static str {
        match self {
            Self::Boolean => "java.lang.Boolean",
            Self::Char => "java.lang.Character",
            Self::Byte => "java.lang.Byte",
            Self::Short => "java.lang.Short",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Float => "java.lang.Float",
            Self::Double => "java.lang.Double",
            Self::Void => "java.lang.Void",
        }
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Boolean | Self::Void)
    }

    #[inline]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Char | Self::Byte | Self::Short | Self::Int | Self::Long)
    }
}

/// Shape of a type binding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    /// The type of the `null` literal.
    Null,
    Class,
    Interface,
    Enum,
    Array {
        component: TypeId,
    },
    /// Generic type parameter; erases to its bound (or `java.lang.Object`).
    TypeVariable {
        bound: Option<TypeId>,
    },
}

bitflags! {
    /// Modifiers and nesting facts of a type binding.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u8 {
        const ABSTRACT = 1 << 0;
        const ANONYMOUS = 1 << 1;
        /// Declared inside another type.
        const MEMBER = 1 << 2;
        const STATIC = 1 << 3;
        const LOCAL = 1 << 4;
        const FINAL = 1 << 5;
    }
}

/// Static type information for an expression or declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeBinding {
    pub kind: TypeKind,
    /// Source-level qualified name without type arguments
    /// (`java.util.List`, `test.Outer.Inner`, `int`, `int[]`).
    pub qualified_name: String,
    /// Name used for class loading (`test.Outer$Inner`).
    pub binary_name: String,
    /// Simple name; empty for anonymous classes.
    pub simple_name: String,
    pub superclass: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub flags: TypeFlags,
    pub type_arguments: Vec<TypeId>,
}

impl TypeBinding {
    /// A class-like binding whose binary name equals its qualified name.
    pub fn class(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let simple_name = simple_name_of(&qualified_name).to_string();
        TypeBinding {
            kind: TypeKind::Class,
            binary_name: qualified_name.clone(),
            qualified_name,
            simple_name,
            superclass: None,
            interfaces: Vec::new(),
            flags: TypeFlags::empty(),
            type_arguments: Vec::new(),
        }
    }

    pub fn interface(qualified_name: impl Into<String>) -> Self {
        TypeBinding {
            kind: TypeKind::Interface,
            flags: TypeFlags::ABSTRACT,
            ..Self::class(qualified_name)
        }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeBinding {
            kind: TypeKind::Primitive(kind),
            ..Self::class(kind.name())
        }
    }

    #[must_use]
    pub fn with_superclass(mut self, superclass: TypeId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: TypeId) -> Self {
        self.interfaces.push(interface);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_binary_name(mut self, binary_name: impl Into<String>) -> Self {
        self.binary_name = binary_name.into();
        self
    }

    #[inline]
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.kind {
            TypeKind::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(_))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array { .. })
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface)
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.flags.contains(TypeFlags::ANONYMOUS)
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(TypeFlags::ABSTRACT)
    }

    /// Inner (non-static member) classes need an enclosing instance.
    #[inline]
    pub fn is_inner(&self) -> bool {
        self.flags.contains(TypeFlags::MEMBER) && !self.flags.contains(TypeFlags::STATIC)
    }
}

/// Last dot-separated segment of a qualified name.
pub fn simple_name_of(qualified_name: &str) -> &str {
    qualified_name
        .rsplit(['.', '$'])
        .next()
        .unwrap_or(qualified_name)
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MethodFlags: u8 {
        const STATIC = 1 << 0;
        const CONSTRUCTOR = 1 << 1;
        const VARARGS = 1 << 2;
        const ABSTRACT = 1 << 3;
    }
}

/// Resolved method or constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodBinding {
    pub name: String,
    pub declaring_type: TypeId,
    pub parameter_types: Vec<TypeId>,
    pub return_type: TypeId,
    pub flags: MethodFlags,
    /// Generic declaration this binding was parameterized from.
    pub declaration: Option<MethodId>,
}

impl MethodBinding {
    pub fn method(
        name: impl Into<String>,
        declaring_type: TypeId,
        parameter_types: Vec<TypeId>,
        return_type: TypeId,
    ) -> Self {
        MethodBinding {
            name: name.into(),
            declaring_type,
            parameter_types,
            return_type,
            flags: MethodFlags::empty(),
            declaration: None,
        }
    }

    /// Constructors return their declaring type.
    pub fn constructor(declaring_type: TypeId, parameter_types: Vec<TypeId>) -> Self {
        MethodBinding {
            flags: MethodFlags::CONSTRUCTOR,
            ..Self::method("<init>", declaring_type, parameter_types, declaring_type)
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_declaration(mut self, declaration: MethodId) -> Self {
        self.declaration = Some(declaration);
        self
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodFlags::STATIC)
    }

    #[inline]
    pub fn is_constructor(&self) -> bool {
        self.flags.contains(MethodFlags::CONSTRUCTOR)
    }

    #[inline]
    pub fn is_varargs(&self) -> bool {
        self.flags.contains(MethodFlags::VARARGS)
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct VariableFlags: u8 {
        const FIELD = 1 << 0;
        const STATIC = 1 << 1;
        const PARAMETER = 1 << 2;
        const FINAL = 1 << 3;
    }
}

/// Resolved field, local variable or parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableBinding {
    pub name: String,
    pub ty: TypeId,
    pub flags: VariableFlags,
    /// Declaring type for fields.
    pub declaring_type: Option<TypeId>,
    /// Declaring method for parameters and locals.
    pub declaring_method: Option<MethodId>,
    /// Position within the declaring method's parameter list.
    pub index: u32,
}

impl VariableBinding {
    pub fn local(name: impl Into<String>, ty: TypeId) -> Self {
        VariableBinding {
            name: name.into(),
            ty,
            flags: VariableFlags::empty(),
            declaring_type: None,
            declaring_method: None,
            index: 0,
        }
    }

    pub fn field(name: impl Into<String>, ty: TypeId, declaring_type: TypeId) -> Self {
        VariableBinding {
            flags: VariableFlags::FIELD,
            declaring_type: Some(declaring_type),
            ..Self::local(name, ty)
        }
    }

    pub fn parameter(name: impl Into<String>, ty: TypeId, method: MethodId, index: u32) -> Self {
        VariableBinding {
            flags: VariableFlags::PARAMETER,
            declaring_method: Some(method),
            index,
            ..Self::local(name, ty)
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: VariableFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn is_field(&self) -> bool {
        self.flags.contains(VariableFlags::FIELD)
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(VariableFlags::STATIC)
    }

    #[inline]
    pub fn is_parameter(&self) -> bool {
        self.flags.contains(VariableFlags::PARAMETER)
    }
}

#[cfg(test)]
mod tests;
