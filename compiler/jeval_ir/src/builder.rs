//! Incremental construction of a [`SyntaxTree`].
//!
//! Parsers feed resolved nodes through this builder; tests use the helper
//! methods to assemble expressions without any source text. Children must
//! be pushed before their parent, which gives the arena its post-order.

use rustc_hash::FxHashMap;

use crate::decl::TypeDecl;
use crate::operators::{AssignOp, InfixOp, PostfixOp, PrefixOp};
use crate::{
    Expr, ExprId, ExprKind, ExprRange, MethodBinding, MethodId, NameBinding, PrimitiveKind, Span,
    StringInterner, SyntaxTree, TypeBinding, TypeFlags, TypeId, TypeKind, VariableBinding,
    VariableId,
};

/// Builder for [`SyntaxTree`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    source: String,
    interner: StringInterner,
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    types: Vec<TypeBinding>,
    methods: Vec<MethodBinding>,
    variables: Vec<VariableBinding>,
    type_decls: Vec<TypeDecl>,
    types_by_name: FxHashMap<String, TypeId>,
    arrays: FxHashMap<TypeId, TypeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for a tree parsed from `source`; spans index into it.
    pub fn with_source(source: impl Into<String>) -> Self {
        TreeBuilder {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn finish(self) -> SyntaxTree {
        SyntaxTree {
            source: self.source,
            interner: self.interner,
            exprs: self.exprs,
            expr_lists: self.expr_lists,
            types: self.types,
            methods: self.methods,
            variables: self.variables,
            type_decls: self.type_decls,
        }
    }

    // Types

    /// Add a type binding. Bindings with an already known qualified name
    /// (other than anonymous ones) are deduplicated.
    pub fn declare_type(&mut self, binding: TypeBinding) -> TypeId {
        let dedup = !binding.is_anonymous() && !binding.qualified_name.is_empty();
        if dedup {
            if let Some(&id) = self.types_by_name.get(&binding.qualified_name) {
                return id;
            }
        }
        let id = TypeId::new(index_u32(self.types.len()));
        if dedup {
            self.types_by_name.insert(binding.qualified_name.clone(), id);
        }
        self.types.push(binding);
        id
    }

    pub fn type_mut(&mut self, id: TypeId) -> &mut TypeBinding {
        &mut self.types[id.index()]
    }

    pub fn primitive(&mut self, kind: PrimitiveKind) -> TypeId {
        self.declare_type(TypeBinding::primitive(kind))
    }

    pub fn null_type(&mut self) -> TypeId {
        self.declare_type(TypeBinding {
            kind: TypeKind::Null,
            ..TypeBinding::class("null")
        })
    }

    pub fn object_type(&mut self) -> TypeId {
        self.declare_type(TypeBinding::class("java.lang.Object"))
    }

    pub fn string_type(&mut self) -> TypeId {
        let object = self.object_type();
        self.declare_type(
            TypeBinding::class("java.lang.String")
                .with_superclass(object)
                .with_flags(TypeFlags::FINAL),
        )
    }

    /// Class extending `java.lang.Object`.
    pub fn class_type(&mut self, qualified_name: &str) -> TypeId {
        let object = self.object_type();
        self.declare_type(TypeBinding::class(qualified_name).with_superclass(object))
    }

    pub fn interface_type(&mut self, qualified_name: &str) -> TypeId {
        self.declare_type(TypeBinding::interface(qualified_name))
    }

    /// Anonymous class whose declared base is `base` (a class or interface).
    pub fn anonymous_type(&mut self, base: TypeId) -> TypeId {
        let object = self.object_type();
        let base_binding = self.types[base.index()].clone();
        let (superclass, interfaces) = if base_binding.is_interface() {
            (object, vec![base])
        } else {
            (base, Vec::new())
        };
        let binary_name = format!("{}$1", base_binding.binary_name);
        self.declare_type(TypeBinding {
            kind: TypeKind::Class,
            qualified_name: String::new(),
            binary_name,
            simple_name: String::new(),
            superclass: Some(superclass),
            interfaces,
            flags: TypeFlags::ANONYMOUS | TypeFlags::LOCAL,
            type_arguments: Vec::new(),
        })
    }

    pub fn array_of(&mut self, component: TypeId) -> TypeId {
        if let Some(&id) = self.arrays.get(&component) {
            return id;
        }
        let component_binding = &self.types[component.index()];
        let qualified_name = format!("{}[]", component_binding.qualified_name);
        let binary_name = format!("{}[]", component_binding.binary_name);
        let simple_name = format!("{}[]", component_binding.simple_name);
        let object = self.object_type();
        let id = TypeId::new(index_u32(self.types.len()));
        self.types.push(TypeBinding {
            kind: TypeKind::Array { component },
            qualified_name,
            binary_name,
            simple_name,
            superclass: Some(object),
            interfaces: Vec::new(),
            flags: TypeFlags::empty(),
            type_arguments: Vec::new(),
        });
        self.arrays.insert(component, id);
        id
    }

    /// Generic type parameter erasing to `bound` (or `java.lang.Object`).
    pub fn type_variable(&mut self, name: &str, bound: Option<TypeId>) -> TypeId {
        let id = TypeId::new(index_u32(self.types.len()));
        self.types.push(TypeBinding {
            kind: TypeKind::TypeVariable { bound },
            ..TypeBinding::class(name)
        });
        id
    }

    // Members

    pub fn method(&mut self, binding: MethodBinding) -> MethodId {
        let id = MethodId::new(index_u32(self.methods.len()));
        self.methods.push(binding);
        id
    }

    pub fn variable(&mut self, binding: VariableBinding) -> VariableId {
        let id = VariableId::new(index_u32(self.variables.len()));
        self.variables.push(binding);
        id
    }

    pub fn type_decl(&mut self, decl: TypeDecl) {
        self.type_decls.push(decl);
    }

    // Expressions

    /// Push a node with an explicit span.
    pub fn push(&mut self, kind: ExprKind, span: Span, ty: TypeId) -> ExprId {
        let id = ExprId::new(index_u32(self.exprs.len()));
        self.exprs.push(Expr::new(kind, span, ty));
        id
    }

    pub fn list(&mut self, items: &[ExprId]) -> ExprRange {
        let start = index_u32(self.expr_lists.len());
        self.expr_lists.extend_from_slice(items);
        ExprRange::new(start, index_u32(items.len()))
    }

    fn node(&mut self, kind: ExprKind, ty: TypeId) -> ExprId {
        self.push(kind, Span::DUMMY, ty)
    }

    pub fn null(&mut self) -> ExprId {
        let ty = self.null_type();
        self.node(ExprKind::NullLiteral, ty)
    }

    pub fn boolean(&mut self, value: bool) -> ExprId {
        let ty = self.primitive(PrimitiveKind::Boolean);
        self.node(ExprKind::BooleanLiteral(value), ty)
    }

    pub fn char_literal(&mut self, value: char) -> ExprId {
        let ty = self.primitive(PrimitiveKind::Char);
        let mut units = [0u16; 2];
        let unit = value.encode_utf16(&mut units)[0];
        self.node(ExprKind::CharacterLiteral(unit), ty)
    }

    /// Number literal token typed as `kind`.
    pub fn number(&mut self, token: &str, kind: PrimitiveKind) -> ExprId {
        let ty = self.primitive(kind);
        let name = self.interner.intern(token);
        self.node(ExprKind::NumberLiteral(name), ty)
    }

    /// `int` literal. Java has no negative literals, so a negative value
    /// becomes unary minus over its magnitude.
    pub fn int(&mut self, value: i32) -> ExprId {
        let magnitude = self.number(&value.unsigned_abs().to_string(), PrimitiveKind::Int);
        if value >= 0 {
            return magnitude;
        }
        let ty = self.primitive(PrimitiveKind::Int);
        self.prefix(PrefixOp::Minus, magnitude, ty)
    }

    /// `long` literal, negated like [`Self::int`].
    pub fn long(&mut self, value: i64) -> ExprId {
        let magnitude = self.number(&format!("{}L", value.unsigned_abs()), PrimitiveKind::Long);
        if value >= 0 {
            return magnitude;
        }
        let ty = self.primitive(PrimitiveKind::Long);
        self.prefix(PrefixOp::Minus, magnitude, ty)
    }

    pub fn string(&mut self, value: &str) -> ExprId {
        let ty = self.string_type();
        let name = self.interner.intern(value);
        self.node(ExprKind::StringLiteral(name), ty)
    }

    /// `T.class`
    pub fn type_literal(&mut self, target: TypeId) -> ExprId {
        let class = self.declare_type(TypeBinding::class("java.lang.Class"));
        self.node(ExprKind::TypeLiteral(target), class)
    }

    /// `this` of the given enclosing type.
    pub fn this(&mut self, ty: TypeId) -> ExprId {
        self.node(ExprKind::This, ty)
    }

    /// Reference to a variable by its simple name.
    pub fn var_ref(&mut self, variable: VariableId) -> ExprId {
        let binding = &self.variables[variable.index()];
        let ty = binding.ty;
        let name = self.interner.intern(&binding.name.clone());
        self.node(
            ExprKind::SimpleName {
                name,
                binding: NameBinding::Variable(variable),
            },
            ty,
        )
    }

    /// A simple name denoting a type (e.g. the `Color` of `Color.RED`).
    pub fn type_name(&mut self, ty: TypeId) -> ExprId {
        let simple = self.types[ty.index()].simple_name.clone();
        let name = self.interner.intern(&simple);
        self.node(
            ExprKind::SimpleName {
                name,
                binding: NameBinding::Type(ty),
            },
            ty,
        )
    }

    /// A simple name nothing resolved.
    pub fn unresolved_name(&mut self, name: &str, ty: TypeId) -> ExprId {
        let name = self.interner.intern(name);
        self.node(
            ExprKind::SimpleName {
                name,
                binding: NameBinding::Unresolved,
            },
            ty,
        )
    }

    /// `qualifier.name` resolved to a field.
    pub fn qualified(&mut self, qualifier: ExprId, field: VariableId) -> ExprId {
        let binding = &self.variables[field.index()];
        let ty = binding.ty;
        let name = self.interner.intern(&binding.name.clone());
        self.node(
            ExprKind::QualifiedName {
                qualifier,
                name,
                binding: NameBinding::Variable(field),
            },
            ty,
        )
    }

    /// `qualifier.length` on an array.
    pub fn array_length(&mut self, qualifier: ExprId) -> ExprId {
        let ty = self.primitive(PrimitiveKind::Int);
        let name = self.interner.intern("length");
        self.node(
            ExprKind::QualifiedName {
                qualifier,
                name,
                binding: NameBinding::Unresolved,
            },
            ty,
        )
    }

    pub fn field_access(&mut self, receiver: ExprId, field: VariableId) -> ExprId {
        let binding = &self.variables[field.index()];
        let ty = binding.ty;
        let name = self.interner.intern(&binding.name.clone());
        self.node(
            ExprKind::FieldAccess {
                receiver,
                name,
                field,
            },
            ty,
        )
    }

    pub fn paren(&mut self, inner: ExprId) -> ExprId {
        let ty = self.exprs[inner.index()].ty;
        self.node(ExprKind::Parenthesized(inner), ty)
    }

    pub fn prefix(&mut self, op: PrefixOp, operand: ExprId, ty: TypeId) -> ExprId {
        self.node(ExprKind::Prefix { op, operand }, ty)
    }

    pub fn postfix(&mut self, op: PostfixOp, operand: ExprId) -> ExprId {
        let ty = self.exprs[operand.index()].ty;
        self.node(ExprKind::Postfix { op, operand }, ty)
    }

    /// Infix chain over two or more operands.
    pub fn infix(&mut self, op: InfixOp, operands: &[ExprId], ty: TypeId) -> ExprId {
        let operands = self.list(operands);
        self.node(ExprKind::Infix { op, operands }, ty)
    }

    pub fn cast(&mut self, target: TypeId, expr: ExprId) -> ExprId {
        self.node(ExprKind::Cast { target, expr }, target)
    }

    pub fn conditional(
        &mut self,
        condition: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
        ty: TypeId,
    ) -> ExprId {
        self.node(
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            },
            ty,
        )
    }

    pub fn assign(&mut self, op: AssignOp, target: ExprId, value: ExprId) -> ExprId {
        let ty = self.exprs[target.index()].ty;
        self.node(ExprKind::Assignment { op, target, value }, ty)
    }

    pub fn instance_of(&mut self, expr: ExprId, target: TypeId) -> ExprId {
        let ty = self.primitive(PrimitiveKind::Boolean);
        self.node(ExprKind::InstanceOf { expr, target }, ty)
    }

    /// Method invocation typed by the binding's return type.
    pub fn invoke(&mut self, receiver: Option<ExprId>, method: MethodId, args: &[ExprId]) -> ExprId {
        let binding = &self.methods[method.index()];
        let ty = binding.return_type;
        let name = self.interner.intern(&binding.name.clone());
        let args = self.list(args);
        self.node(
            ExprKind::MethodInvocation {
                receiver,
                name,
                method,
                args,
            },
            ty,
        )
    }

    pub fn super_invoke(&mut self, method: MethodId, args: &[ExprId]) -> ExprId {
        let binding = &self.methods[method.index()];
        let ty = binding.return_type;
        let name = self.interner.intern(&binding.name.clone());
        let args = self.list(args);
        self.node(ExprKind::SuperMethodInvocation { name, method, args }, ty)
    }

    /// `new T(args)`; pass an anonymous type as `created` for `new T() {...}`.
    pub fn new_instance(&mut self, created: TypeId, constructor: MethodId, args: &[ExprId]) -> ExprId {
        let args = self.list(args);
        self.node(ExprKind::ClassInstanceCreation { constructor, args }, created)
    }

    pub fn new_array(
        &mut self,
        array_type: TypeId,
        dimensions: &[ExprId],
        initializer: Option<ExprId>,
    ) -> ExprId {
        let dimensions = self.list(dimensions);
        self.node(
            ExprKind::ArrayCreation {
                dimensions,
                initializer,
            },
            array_type,
        )
    }

    pub fn array_initializer(&mut self, array_type: TypeId, elements: &[ExprId]) -> ExprId {
        let elements = self.list(elements);
        self.node(ExprKind::ArrayInitializer { elements }, array_type)
    }

    pub fn array_access(&mut self, array: ExprId, index: ExprId) -> ExprId {
        let kind = self.types[self.exprs[array.index()].ty.index()].kind;
        let ty = match kind {
            TypeKind::Array { component } => component,
            _ => self.object_type(),
        };
        self.node(ExprKind::ArrayAccess { array, index }, ty)
    }
}

/// Arena indices are `u32`; trees never approach that size.
#[inline]
fn index_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
