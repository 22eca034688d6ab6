/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! The nominal type universe synthesis runs against.
//!
//! Hosts describe their types once into a [`TypeUniverse`] arena; the engine
//! only ever sees [`TypeId`] handles. Instantiated families (`List<T>`,
//! `T[]`, `T?`, the immutable collections) are interned so nominal identity
//! is plain handle equality.

use rustc_hash::FxHashMap;

use crate::access::{Accessibility, AccessibilityChecker};

/// Handle to an assembly in a [`TypeUniverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssemblyId(pub(crate) u32);

/// Handle to a type definition in a [`TypeUniverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

/// A nominal type plus advisory nullability.
///
/// The flag drives null guards only; it never participates in type identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnnotatedType {
    /// The nominal type.
    pub ty: TypeId,
    /// Whether a value of this use-site may be null.
    pub can_be_null: bool,
}

impl AnnotatedType {
    /// Annotation with explicit nullability.
    pub fn new(ty: TypeId, can_be_null: bool) -> Self {
        Self { ty, can_be_null }
    }

    /// Non-nullable use of `ty`.
    pub fn non_null(ty: TypeId) -> Self {
        Self {
            ty,
            can_be_null: false,
        }
    }

    /// Nullable use of `ty`.
    pub fn nullable(ty: TypeId) -> Self {
        Self {
            ty,
            can_be_null: true,
        }
    }

    /// Same type with replaced nullability.
    pub fn with_nullability(self, can_be_null: bool) -> Self {
        Self {
            ty: self.ty,
            can_be_null,
        }
    }
}

/// Kind of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Concrete class.
    Class,
    /// Abstract class; only scaffolding's discovery query can materialize one.
    AbstractClass,
    /// Interface.
    Interface,
    /// Value type.
    Struct,
    /// Enumeration.
    Enum,
    /// Built-in simple type.
    Primitive,
    /// Array `T[]`.
    Array,
    /// Boxed nullable `T?`.
    Nullable,
}

/// An assembly: the visibility boundary for `internal`, plus friend grants.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Assembly name.
    pub name: String,
    /// Names of assemblies granted friend (internals-visible) access.
    pub friends: Vec<String>,
}

/// A constructor or method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDef {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: AnnotatedType,
    /// Whether the parameter has a default value and may be omitted.
    pub optional: bool,
}

impl ParameterDef {
    /// Required parameter.
    pub fn required(name: impl Into<String>, ty: AnnotatedType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    /// Optional parameter.
    pub fn optional(name: impl Into<String>, ty: AnnotatedType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
        }
    }
}

/// A property or field, unified as a mappable member.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    /// Member name.
    pub name: String,
    /// Member type.
    pub ty: AnnotatedType,
    /// Type the member is declared on (relevant for private/protected rules).
    pub declared_on: TypeId,
    /// Getter accessibility; `None` when the member cannot be read.
    pub get_access: Option<Accessibility>,
    /// Setter accessibility; `None` when the member cannot be written.
    pub set_access: Option<Accessibility>,
    /// Setter only usable during construction (init-style).
    pub constructor_set: bool,
}

impl ObjectField {
    /// Whether the member can be read via `via` from the checker's context.
    pub fn can_be_get(
        &self,
        universe: &TypeUniverse,
        via: TypeId,
        access: &AccessibilityChecker,
    ) -> bool {
        match self.get_access {
            Some(level) => access.is_accessible(universe, level, self.declared_on, via),
            None => false,
        }
    }

    /// Whether the member can be assigned outside construction.
    pub fn can_be_set(
        &self,
        universe: &TypeUniverse,
        via: TypeId,
        access: &AccessibilityChecker,
    ) -> bool {
        if self.constructor_set {
            return false;
        }
        match self.set_access {
            Some(level) => access.is_accessible(universe, level, self.declared_on, via),
            None => false,
        }
    }

    /// Whether the member can be assigned in an initializer during
    /// construction (includes init-style setters).
    pub fn can_be_set_in_constructor(
        &self,
        universe: &TypeUniverse,
        via: TypeId,
        access: &AccessibilityChecker,
    ) -> bool {
        match self.set_access {
            Some(level) => access.is_accessible(universe, level, self.declared_on, via),
            None => false,
        }
    }
}

/// A callable member.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    /// Method name.
    pub name: String,
    /// Parameters.
    pub parameters: Vec<ParameterDef>,
    /// Return type; `None` is void.
    pub return_type: Option<AnnotatedType>,
    /// Declared accessibility.
    pub access: Accessibility,
    /// Declaring type.
    pub declared_on: TypeId,
}

/// A constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDef {
    /// Parameters, in declaration order.
    pub parameters: Vec<ParameterDef>,
    /// Declared accessibility.
    pub access: Accessibility,
}

/// A user-declared conversion operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOp {
    /// Converted-from type.
    pub from: TypeId,
    /// Converted-to type.
    pub to: TypeId,
    /// Explicit operators require a cast at the call site.
    pub explicit: bool,
}

/// One nominal type.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Bare name, without generic arguments (`List`, `Nullable`, `Customer`).
    pub name: String,
    /// Owning assembly.
    pub assembly: AssemblyId,
    /// Kind.
    pub kind: TypeKind,
    /// Base class, if any.
    pub base: Option<TypeId>,
    /// Implemented interfaces.
    pub interfaces: Vec<TypeId>,
    /// Generic arguments of an interned instantiation.
    pub generic_args: Vec<TypeId>,
    /// Array element or nullable underlying type.
    pub element: Option<TypeId>,
    /// Properties and fields declared on this type.
    pub fields: Vec<ObjectField>,
    /// Methods declared on this type.
    pub methods: Vec<MethodDef>,
    /// Constructors declared on this type.
    pub constructors: Vec<ConstructorDef>,
    /// Declared conversion operators.
    pub conversions: Vec<ConversionOp>,
    /// Enum variant names, in declaration order.
    pub enum_variants: Vec<String>,
    /// Whether values of the type can be enumerated element-wise.
    pub enumerable: bool,
    /// Value type of an indexer, for non-generic custom collections.
    pub indexer_value: Option<TypeId>,
}

impl TypeDef {
    fn shell(name: String, assembly: AssemblyId, kind: TypeKind) -> Self {
        Self {
            name,
            assembly,
            kind,
            base: None,
            interfaces: Vec::new(),
            generic_args: Vec::new(),
            element: None,
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            conversions: Vec::new(),
            enum_variants: Vec::new(),
            enumerable: false,
            indexer_value: None,
        }
    }
}

/// Handles to the always-present built-in types.
#[derive(Debug, Clone, Copy)]
pub struct CoreTypes {
    /// `object`, the top of every reference hierarchy.
    pub object: TypeId,
    /// `string`.
    pub string: TypeId,
    /// `bool`.
    pub boolean: TypeId,
    /// `char`.
    pub character: TypeId,
    /// `byte`.
    pub byte: TypeId,
    /// `short`.
    pub short: TypeId,
    /// `int`.
    pub int: TypeId,
    /// `long`.
    pub long: TypeId,
    /// `float`.
    pub float: TypeId,
    /// `double`.
    pub double: TypeId,
    /// `decimal`.
    pub decimal: TypeId,
}

/// Arena of assemblies and type definitions.
#[derive(Debug, Clone)]
pub struct TypeUniverse {
    assemblies: Vec<Assembly>,
    types: Vec<TypeDef>,
    core: CoreTypes,
    core_assembly: AssemblyId,
    // Interned instantiations keyed by family name and arguments.
    instantiations: FxHashMap<(&'static str, Vec<TypeId>), TypeId>,
}

impl TypeUniverse {
    /// Creates a universe seeded with the core assembly and primitives.
    pub fn new() -> Self {
        let core_assembly = AssemblyId(0);
        let assemblies = vec![Assembly {
            name: "corlib".to_string(),
            friends: Vec::new(),
        }];
        let mut types = Vec::new();
        let mut seed = |name: &str| {
            let id = TypeId(types.len() as u32);
            types.push(TypeDef::shell(
                name.to_string(),
                core_assembly,
                TypeKind::Primitive,
            ));
            id
        };
        let core = CoreTypes {
            object: seed("object"),
            string: seed("string"),
            boolean: seed("bool"),
            character: seed("char"),
            byte: seed("byte"),
            short: seed("short"),
            int: seed("int"),
            long: seed("long"),
            float: seed("float"),
            double: seed("double"),
            decimal: seed("decimal"),
        };
        Self {
            assemblies,
            types,
            core,
            core_assembly,
            instantiations: FxHashMap::default(),
        }
    }

    /// Handles to the built-in types.
    pub fn core(&self) -> &CoreTypes {
        &self.core
    }

    /// The assembly the built-ins and interned instantiations live in.
    pub fn core_assembly(&self) -> AssemblyId {
        self.core_assembly
    }

    /// Registers an assembly.
    pub fn add_assembly(&mut self, name: impl Into<String>) -> AssemblyId {
        self.add_assembly_with_friends(name, &[])
    }

    /// Registers an assembly granting friend access to the named assemblies.
    pub fn add_assembly_with_friends(
        &mut self,
        name: impl Into<String>,
        friends: &[&str],
    ) -> AssemblyId {
        let id = AssemblyId(self.assemblies.len() as u32);
        self.assemblies.push(Assembly {
            name: name.into(),
            friends: friends.iter().map(|f| f.to_string()).collect(),
        });
        id
    }

    /// Assembly metadata for a handle.
    pub fn assembly(&self, id: AssemblyId) -> &Assembly {
        &self.assemblies[id.0 as usize]
    }

    /// Type definition for a handle.
    pub fn type_def(&self, ty: TypeId) -> &TypeDef {
        &self.types[ty.0 as usize]
    }

    /// All declared type handles, in declaration order.
    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.types.len() as u32).map(TypeId)
    }

    /// Declares an empty type shell; fill it through [`TypeUniverse::define`].
    ///
    /// Splitting declaration from definition lets cyclic type graphs be
    /// described: declare both, then define each referencing the other.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        assembly: AssemblyId,
        kind: TypeKind,
    ) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeDef::shell(name.into(), assembly, kind));
        id
    }

    /// Starts (or resumes) defining a declared type.
    pub fn define(&mut self, ty: TypeId) -> TypeBuilder<'_> {
        TypeBuilder {
            ty,
            def: &mut self.types[ty.0 as usize],
        }
    }

    /// Declares a concrete class.
    pub fn add_class(&mut self, name: impl Into<String>, assembly: AssemblyId) -> TypeId {
        self.declare(name, assembly, TypeKind::Class)
    }

    /// Declares a struct.
    pub fn add_struct(&mut self, name: impl Into<String>, assembly: AssemblyId) -> TypeId {
        self.declare(name, assembly, TypeKind::Struct)
    }

    /// Declares an interface.
    pub fn add_interface(&mut self, name: impl Into<String>, assembly: AssemblyId) -> TypeId {
        self.declare(name, assembly, TypeKind::Interface)
    }

    /// Declares an abstract class.
    pub fn add_abstract_class(&mut self, name: impl Into<String>, assembly: AssemblyId) -> TypeId {
        self.declare(name, assembly, TypeKind::AbstractClass)
    }

    /// Declares an enum with its variants.
    pub fn add_enum(
        &mut self,
        name: impl Into<String>,
        assembly: AssemblyId,
        variants: &[&str],
    ) -> TypeId {
        let id = self.declare(name, assembly, TypeKind::Enum);
        self.types[id.0 as usize].enum_variants = variants.iter().map(|v| v.to_string()).collect();
        id
    }

    fn instantiate(
        &mut self,
        family: &'static str,
        kind: TypeKind,
        args: Vec<TypeId>,
        element: Option<TypeId>,
        interfaces: Vec<TypeId>,
        enumerable: bool,
    ) -> TypeId {
        let key = (family, args.clone());
        if let Some(existing) = self.instantiations.get(&key) {
            return *existing;
        }
        let id = TypeId(self.types.len() as u32);
        let mut def = TypeDef::shell(family.to_string(), self.core_assembly, kind);
        def.generic_args = args;
        def.element = element;
        def.interfaces = interfaces;
        def.enumerable = enumerable;
        self.types.push(def);
        self.instantiations.insert(key, id);
        id
    }

    /// Interned `IEnumerable<T>`.
    pub fn enumerable_of(&mut self, element: TypeId) -> TypeId {
        self.instantiate(
            "IEnumerable",
            TypeKind::Interface,
            vec![element],
            None,
            Vec::new(),
            true,
        )
    }

    /// Interned `T[]`.
    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        let sequence = self.enumerable_of(element);
        self.instantiate(
            "Array",
            TypeKind::Array,
            vec![element],
            Some(element),
            vec![sequence],
            true,
        )
    }

    /// Interned `T?`.
    pub fn nullable_of(&mut self, underlying: TypeId) -> TypeId {
        self.instantiate(
            "Nullable",
            TypeKind::Nullable,
            vec![underlying],
            Some(underlying),
            Vec::new(),
            false,
        )
    }

    /// Interned `List<T>`.
    pub fn list_of(&mut self, element: TypeId) -> TypeId {
        let sequence = self.enumerable_of(element);
        self.instantiate(
            "List",
            TypeKind::Class,
            vec![element],
            None,
            vec![sequence],
            true,
        )
    }

    /// Interned `HashSet<T>`.
    pub fn hash_set_of(&mut self, element: TypeId) -> TypeId {
        let sequence = self.enumerable_of(element);
        self.instantiate(
            "HashSet",
            TypeKind::Class,
            vec![element],
            None,
            vec![sequence],
            true,
        )
    }

    /// Interned `ImmutableArray<T>`.
    pub fn immutable_array_of(&mut self, element: TypeId) -> TypeId {
        let sequence = self.enumerable_of(element);
        self.instantiate(
            "ImmutableArray",
            TypeKind::Struct,
            vec![element],
            None,
            vec![sequence],
            true,
        )
    }

    /// Interned `ImmutableList<T>`.
    pub fn immutable_list_of(&mut self, element: TypeId) -> TypeId {
        let sequence = self.enumerable_of(element);
        self.instantiate(
            "ImmutableList",
            TypeKind::Class,
            vec![element],
            None,
            vec![sequence],
            true,
        )
    }

    /// Interned `ImmutableHashSet<T>`.
    pub fn immutable_hash_set_of(&mut self, element: TypeId) -> TypeId {
        let sequence = self.enumerable_of(element);
        self.instantiate(
            "ImmutableHashSet",
            TypeKind::Class,
            vec![element],
            None,
            vec![sequence],
            true,
        )
    }

    /// Interned `ReadOnlyCollection<T>`.
    pub fn read_only_collection_of(&mut self, element: TypeId) -> TypeId {
        let sequence = self.enumerable_of(element);
        self.instantiate(
            "ReadOnlyCollection",
            TypeKind::Class,
            vec![element],
            None,
            vec![sequence],
            true,
        )
    }

    /// Rendered display name (`int?`, `Order[]`, `List<Order>`).
    pub fn display_name(&self, ty: TypeId) -> String {
        let def = self.type_def(ty);
        match def.kind {
            TypeKind::Array => match def.element {
                Some(element) => format!("{}[]", self.display_name(element)),
                None => def.name.clone(),
            },
            TypeKind::Nullable => match def.element {
                Some(underlying) => format!("{}?", self.display_name(underlying)),
                None => def.name.clone(),
            },
            _ if !def.generic_args.is_empty() => {
                let args: Vec<String> = def
                    .generic_args
                    .iter()
                    .map(|arg| self.display_name(*arg))
                    .collect();
                format!("{}<{}>", def.name, args.join(", "))
            }
            _ => def.name.clone(),
        }
    }

    /// Whether the type is simple: primitive, enum, or nullable of simple.
    pub fn is_simple(&self, ty: TypeId) -> bool {
        let def = self.type_def(ty);
        match def.kind {
            TypeKind::Primitive | TypeKind::Enum => true,
            TypeKind::Nullable => def.element.map(|u| self.is_simple(u)).unwrap_or(false),
            _ => false,
        }
    }

    /// Underlying type when `ty` is a boxed nullable.
    pub fn nullable_underlying(&self, ty: TypeId) -> Option<TypeId> {
        let def = self.type_def(ty);
        if def.kind == TypeKind::Nullable {
            def.element
        } else {
            None
        }
    }

    /// Whether the type is an enum.
    pub fn is_enum(&self, ty: TypeId) -> bool {
        self.type_def(ty).kind == TypeKind::Enum
    }

    /// First declared variant of an enum.
    pub fn first_enum_variant(&self, ty: TypeId) -> Option<&str> {
        self.type_def(ty).enum_variants.first().map(|v| v.as_str())
    }

    /// Whether the type can only be realized through a discovered
    /// implementation (interface or abstract class).
    pub fn is_interface_or_abstract(&self, ty: TypeId) -> bool {
        matches!(
            self.type_def(ty).kind,
            TypeKind::Interface | TypeKind::AbstractClass
        )
    }

    /// Whether values of the type enumerate element-wise.
    pub fn is_enumerable(&self, ty: TypeId) -> bool {
        let def = self.type_def(ty);
        if def.kind == TypeKind::Array || def.enumerable || def.indexer_value.is_some() {
            return true;
        }
        def.base.map(|b| self.is_enumerable(b)).unwrap_or(false)
            || def.interfaces.iter().any(|i| self.is_enumerable(*i))
    }

    /// Element type of a collection: generic argument, array element, or the
    /// indexer value type resolved through base types.
    pub fn element_type(&self, ty: TypeId) -> Option<TypeId> {
        let def = self.type_def(ty);
        if def.kind == TypeKind::Array {
            return def.element;
        }
        if def.enumerable {
            if let Some(arg) = def.generic_args.first() {
                return Some(*arg);
            }
        }
        let mut current = Some(ty);
        while let Some(t) = current {
            let d = self.type_def(t);
            if let Some(value) = d.indexer_value {
                return Some(value);
            }
            current = d.base;
        }
        None
    }

    /// Whether `ty` is `ancestor` or derives from it through base classes.
    pub fn derives_from(&self, ty: TypeId, ancestor: TypeId) -> bool {
        let mut current = Some(ty);
        while let Some(t) = current {
            if t == ancestor {
                return true;
            }
            current = self.type_def(t).base;
        }
        false
    }

    /// Whether `ty` reaches `target` through base classes or interfaces.
    pub fn inherits(&self, ty: TypeId, target: TypeId) -> bool {
        let mut stack = vec![ty];
        let mut seen: Vec<TypeId> = Vec::new();
        while let Some(t) = stack.pop() {
            if t == target {
                return true;
            }
            if seen.contains(&t) {
                continue;
            }
            seen.push(t);
            let def = self.type_def(t);
            if let Some(base) = def.base {
                stack.push(base);
            }
            stack.extend(def.interfaces.iter().copied());
        }
        false
    }

    fn numeric_rank(&self, ty: TypeId) -> Option<u8> {
        let c = &self.core;
        if ty == c.byte {
            Some(0)
        } else if ty == c.short {
            Some(1)
        } else if ty == c.int {
            Some(2)
        } else if ty == c.long {
            Some(3)
        } else if ty == c.float {
            Some(4)
        } else if ty == c.double {
            Some(5)
        } else {
            None
        }
    }

    /// Whether the type belongs to the numeric family.
    pub fn is_numeric(&self, ty: TypeId) -> bool {
        self.numeric_rank(ty).is_some() || ty == self.core.decimal || ty == self.core.character
    }

    /// Whether an implicit numeric widening exists from `from` to `to`.
    pub fn numeric_widening(&self, from: TypeId, to: TypeId) -> bool {
        if from == self.core.character {
            return self.numeric_rank(to).map(|r| r >= 2).unwrap_or(false) || to == self.core.decimal;
        }
        match (self.numeric_rank(from), self.numeric_rank(to)) {
            (Some(a), Some(b)) => a < b,
            (Some(a), None) if to == self.core.decimal => a <= 3,
            _ => false,
        }
    }

    /// Whether the (numeric) pair needs an explicit narrowing cast.
    pub fn numeric_narrowing(&self, from: TypeId, to: TypeId) -> bool {
        from != to
            && self.is_numeric(from)
            && self.is_numeric(to)
            && !self.numeric_widening(from, to)
    }

    /// Whether a value of `from` is assignable to `to` without conversion.
    pub fn assignable(&self, from: TypeId, to: TypeId) -> bool {
        if from == to || to == self.core.object {
            return true;
        }
        if let Some(underlying) = self.nullable_underlying(to) {
            if self.assignable(from, underlying) {
                return true;
            }
        }
        if self.numeric_widening(from, to) {
            return true;
        }
        self.inherits(from, to)
    }

    /// Declared conversion operator between the pair, looked up on both ends.
    pub fn conversion_between(&self, from: TypeId, to: TypeId) -> Option<ConversionOp> {
        let matching = |def: &TypeDef| {
            def.conversions
                .iter()
                .copied()
                .find(|op| op.from == from && op.to == to)
        };
        matching(self.type_def(from)).or_else(|| matching(self.type_def(to)))
    }

    /// Properties and fields visible on `ty`, own first, inherited after,
    /// shadowed by name.
    pub fn object_fields(&self, ty: TypeId) -> Vec<ObjectField> {
        let mut out: Vec<ObjectField> = Vec::new();
        let mut current = Some(ty);
        while let Some(t) = current {
            let def = self.type_def(t);
            for field in &def.fields {
                if !out.iter().any(|existing| existing.name == field.name) {
                    out.push(field.clone());
                }
            }
            current = def.base;
        }
        out
    }

    /// Methods visible on `ty`, own first, inherited after, shadowed by name.
    pub fn methods_of(&self, ty: TypeId) -> Vec<MethodDef> {
        let mut out: Vec<MethodDef> = Vec::new();
        let mut current = Some(ty);
        while let Some(t) = current {
            let def = self.type_def(t);
            for method in &def.methods {
                if !out.iter().any(|existing| existing.name == method.name) {
                    out.push(method.clone());
                }
            }
            current = def.base;
        }
        out
    }

    /// Constructors declared on `ty` (constructors do not inherit).
    pub fn constructors_of(&self, ty: TypeId) -> &[ConstructorDef] {
        &self.type_def(ty).constructors
    }
}

impl Default for TypeUniverse {
    fn default() -> Self {
        Self::new()
    }
}

/// Chained definition of a declared type.
pub struct TypeBuilder<'u> {
    ty: TypeId,
    def: &'u mut TypeDef,
}

impl TypeBuilder<'_> {
    /// Sets the base class.
    pub fn base(self, base: TypeId) -> Self {
        self.def.base = Some(base);
        self
    }

    /// Adds an implemented interface.
    pub fn implements(self, interface: TypeId) -> Self {
        self.def.interfaces.push(interface);
        self
    }

    /// Adds a member with public getter and setter.
    pub fn property(self, name: impl Into<String>, ty: AnnotatedType) -> Self {
        self.property_with(
            name,
            ty,
            Some(Accessibility::Public),
            Some(Accessibility::Public),
        )
    }

    /// Adds a member with explicit accessor accessibilities.
    pub fn property_with(
        self,
        name: impl Into<String>,
        ty: AnnotatedType,
        get_access: Option<Accessibility>,
        set_access: Option<Accessibility>,
    ) -> Self {
        let declared_on = self.ty;
        self.def.fields.push(ObjectField {
            name: name.into(),
            ty,
            declared_on,
            get_access,
            set_access,
            constructor_set: false,
        });
        self
    }

    /// Adds a read-only member.
    pub fn getter(self, name: impl Into<String>, ty: AnnotatedType) -> Self {
        self.property_with(name, ty, Some(Accessibility::Public), None)
    }

    /// Adds a member settable only during construction (init-style).
    pub fn init_property(self, name: impl Into<String>, ty: AnnotatedType) -> Self {
        let declared_on = self.ty;
        self.def.fields.push(ObjectField {
            name: name.into(),
            ty,
            declared_on,
            get_access: Some(Accessibility::Public),
            set_access: Some(Accessibility::Public),
            constructor_set: true,
        });
        self
    }

    /// Adds a public method.
    pub fn method(
        self,
        name: impl Into<String>,
        parameters: Vec<ParameterDef>,
        return_type: Option<AnnotatedType>,
    ) -> Self {
        self.method_with_access(name, parameters, return_type, Accessibility::Public)
    }

    /// Adds a method with explicit accessibility.
    pub fn method_with_access(
        self,
        name: impl Into<String>,
        parameters: Vec<ParameterDef>,
        return_type: Option<AnnotatedType>,
        access: Accessibility,
    ) -> Self {
        let declared_on = self.ty;
        self.def.methods.push(MethodDef {
            name: name.into(),
            parameters,
            return_type,
            access,
            declared_on,
        });
        self
    }

    /// Adds a public constructor.
    pub fn constructor(self, parameters: Vec<ParameterDef>) -> Self {
        self.constructor_with_access(parameters, Accessibility::Public)
    }

    /// Adds a constructor with explicit accessibility.
    pub fn constructor_with_access(
        self,
        parameters: Vec<ParameterDef>,
        access: Accessibility,
    ) -> Self {
        self.def.constructors.push(ConstructorDef { parameters, access });
        self
    }

    /// Declares an implicit conversion operator.
    pub fn implicit_conversion(self, from: TypeId, to: TypeId) -> Self {
        self.def.conversions.push(ConversionOp {
            from,
            to,
            explicit: false,
        });
        self
    }

    /// Declares an explicit conversion operator.
    pub fn explicit_conversion(self, from: TypeId, to: TypeId) -> Self {
        self.def.conversions.push(ConversionOp {
            from,
            to,
            explicit: true,
        });
        self
    }

    /// Marks the type enumerable (custom collection).
    pub fn enumerable(self) -> Self {
        self.def.enumerable = true;
        self
    }

    /// Declares an indexer value type (non-generic custom collection).
    pub fn indexer(self, value: TypeId) -> Self {
        self.def.indexer_value = Some(value);
        self
    }
}
