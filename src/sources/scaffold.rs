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

//! Scaffolding: fabricate a plausible default value purely from a target
//! type, for call sites with no real source data.
//!
//! Interface and abstract targets go through the host's discovery query, the
//! only point where synthesis can block or be cancelled.

use tracing::{debug, trace};

use crate::diagnostics::Result;
use crate::engine::{MappingContext, MappingElement, MappingPath};
use crate::syntax::{Argument, Expr, Initializer};
use crate::types::{AnnotatedType, ConstructorDef, TypeId, TypeKind, TypeUniverse};

/// Host queries used exclusively by scaffolding.
///
/// The host may back these with asynchronous workspace searches; within one
/// synthesis they are synchronous calls that either answer or abort the whole
/// request with [`SynthesisError::Cancelled`](crate::SynthesisError::Cancelled)
/// or [`SynthesisError::Host`](crate::SynthesisError::Host).
pub trait ImplementationDiscovery {
    /// Concrete types implementing `interface`, in host order.
    fn implementations_of(&self, interface: TypeId) -> Result<Vec<TypeId>>;

    /// Concrete subclasses of `class`, in host order.
    fn derived_classes_of(&self, class: TypeId) -> Result<Vec<TypeId>>;
}

/// Built-in discovery that scans a [`TypeUniverse`] in declaration order.
#[derive(Clone, Copy)]
pub struct UniverseDiscovery<'u> {
    universe: &'u TypeUniverse,
}

impl<'u> UniverseDiscovery<'u> {
    /// Discovery over `universe`.
    pub fn new(universe: &'u TypeUniverse) -> Self {
        Self { universe }
    }
}

impl ImplementationDiscovery for UniverseDiscovery<'_> {
    fn implementations_of(&self, interface: TypeId) -> Result<Vec<TypeId>> {
        Ok(self
            .universe
            .type_ids()
            .filter(|ty| {
                *ty != interface
                    && matches!(
                        self.universe.type_def(*ty).kind,
                        TypeKind::Class | TypeKind::Struct
                    )
                    && self.universe.inherits(*ty, interface)
            })
            .collect())
    }

    fn derived_classes_of(&self, class: TypeId) -> Result<Vec<TypeId>> {
        Ok(self
            .universe
            .type_ids()
            .filter(|ty| {
                *ty != class
                    && self.universe.type_def(*ty).kind == TypeKind::Class
                    && self.universe.derives_from(*ty, class)
            })
            .collect())
    }
}

/// Fabricates default values from target types alone.
#[derive(Clone, Copy)]
pub struct ScaffoldingFinder<'d> {
    discovery: &'d dyn ImplementationDiscovery,
}

impl<'d> ScaffoldingFinder<'d> {
    /// Scaffolder using `discovery` for interface/abstract targets.
    pub fn new(discovery: &'d dyn ImplementationDiscovery) -> Self {
        Self { discovery }
    }

    pub(super) fn find(
        &self,
        target_ty: AnnotatedType,
        ctx: &MappingContext<'_>,
    ) -> Result<Option<MappingElement>> {
        let mut path = MappingPath::new();
        let expr = self.fabricate(target_ty.ty, ctx, &mut path)?;
        Ok(Some(MappingElement {
            expr,
            ty: target_ty.with_nullability(false),
        }))
    }

    /// Fabricates an expression of type `ty`; see the module rules.
    pub fn fabricate(
        &self,
        ty: TypeId,
        ctx: &MappingContext<'_>,
        path: &mut MappingPath,
    ) -> Result<Expr> {
        let universe = ctx.universe();
        if path.contains(ty) {
            let shown = universe.display_name(ty);
            trace!("scaffold of '{shown}' hit a type cycle");
            return Ok(Expr::commented(
                Expr::default_of(&shown),
                format!("recursive scaffold of '{shown}' stopped"),
            ));
        }
        if let Some(literal) = Self::primitive_default(universe, ty) {
            return Ok(literal);
        }
        let def = universe.type_def(ty);
        match def.kind {
            TypeKind::Enum => Ok(match universe.first_enum_variant(ty) {
                Some(variant) => Expr::member(Expr::ident(&def.name), variant),
                None => Expr::default_of(universe.display_name(ty)),
            }),
            TypeKind::Nullable => match def.element {
                Some(underlying) => self.fabricate(underlying, ctx, path),
                None => Ok(Expr::default_of(universe.display_name(ty))),
            },
            TypeKind::Array => {
                let element = match def.element {
                    Some(element) => self.fabricate(element, ctx, path)?,
                    None => Expr::default_of("object"),
                };
                Ok(Expr::new_array(vec![element]))
            }
            _ if universe.is_enumerable(ty) => self.fabricate_collection(ty, ctx, path),
            TypeKind::Interface | TypeKind::AbstractClass => {
                self.fabricate_discovered(ty, ctx, path)
            }
            _ => self.fabricate_construction(ty, ctx, path),
        }
    }

    fn primitive_default(universe: &TypeUniverse, ty: TypeId) -> Option<Expr> {
        let core = universe.core();
        if ty == core.string {
            Some(Expr::string_literal(""))
        } else if ty == core.boolean {
            Some(Expr::bool_literal(false))
        } else if ty == core.character {
            Some(Expr::char_literal(' '))
        } else if ty == core.byte || ty == core.short || ty == core.int {
            Some(Expr::int_literal(0))
        } else if ty == core.long {
            Some(Expr::number_literal("0L"))
        } else if ty == core.float {
            Some(Expr::number_literal("0f"))
        } else if ty == core.double {
            Some(Expr::number_literal("0.0"))
        } else if ty == core.decimal {
            Some(Expr::number_literal("0m"))
        } else if ty == core.object {
            Some(Expr::new_object("object", Vec::new(), Initializer::None))
        } else {
            None
        }
    }

    // One-element collection literal shaped to the target family.
    fn fabricate_collection(
        &self,
        ty: TypeId,
        ctx: &MappingContext<'_>,
        path: &mut MappingPath,
    ) -> Result<Expr> {
        let universe = ctx.universe();
        let Some(element_ty) = universe.element_type(ty) else {
            return Ok(Expr::default_of(universe.display_name(ty)));
        };
        // A cyclic element type must find this collection on the path.
        path.push(ty);
        let fabricated = self.fabricate(element_ty, ctx, path);
        path.pop();
        let element = fabricated?;
        let def = universe.type_def(ty);
        let element_display = universe.display_name(element_ty);
        if def.name.starts_with("Immutable") {
            return Ok(Expr::invoke(
                Expr::member(Expr::ident(&def.name), "Create"),
                vec![Argument::positional(element)],
            ));
        }
        if def.name == "ReadOnlyCollection" {
            let list = Expr::new_object(
                format!("List<{element_display}>"),
                Vec::new(),
                Initializer::Elements(vec![element]),
            );
            return Ok(Expr::call_method(list, "AsReadOnly", vec![]));
        }
        let constructed = if def.kind == TypeKind::Interface {
            format!("List<{element_display}>")
        } else {
            universe.display_name(ty)
        };
        Ok(Expr::new_object(
            constructed,
            Vec::new(),
            Initializer::Elements(vec![element]),
        ))
    }

    // Interface/abstract targets need a concrete type from the host.
    fn fabricate_discovered(
        &self,
        ty: TypeId,
        ctx: &MappingContext<'_>,
        path: &mut MappingPath,
    ) -> Result<Expr> {
        let universe = ctx.universe();
        let shown = universe.display_name(ty);
        debug!("scaffolding '{shown}' through the discovery query");
        let found = match universe.type_def(ty).kind {
            TypeKind::Interface => self.discovery.implementations_of(ty)?,
            _ => self.discovery.derived_classes_of(ty)?,
        };
        match found.first() {
            Some(first) => self.fabricate(*first, ctx, path),
            None => Ok(Expr::commented(
                Expr::default_of(&shown),
                format!("no concrete implementation of '{shown}' found"),
            )),
        }
    }

    fn fabricate_construction(
        &self,
        ty: TypeId,
        ctx: &MappingContext<'_>,
        path: &mut MappingPath,
    ) -> Result<Expr> {
        path.push(ty);
        let constructed = self.construct(ty, ctx, path);
        path.pop();
        constructed
    }

    // Richest accessible constructor, then initializers for what remains.
    fn construct(
        &self,
        ty: TypeId,
        ctx: &MappingContext<'_>,
        path: &mut MappingPath,
    ) -> Result<Expr> {
        let universe = ctx.universe();
        let mut chosen: Option<&ConstructorDef> = None;
        for ctor in universe.constructors_of(ty) {
            if !ctx
                .access()
                .is_accessible(universe, ctor.access, ty, ty)
            {
                continue;
            }
            let richer = chosen
                .map(|current| ctor.parameters.len() > current.parameters.len())
                .unwrap_or(true);
            if richer {
                chosen = Some(ctor);
            }
        }

        let mut args = Vec::new();
        let mut covered: Vec<&str> = Vec::new();
        if let Some(ctor) = chosen {
            for param in &ctor.parameters {
                args.push(Argument::positional(self.fabricate(param.ty.ty, ctx, path)?));
                covered.push(&param.name);
            }
        }

        let mut inits = Vec::new();
        for field in universe.object_fields(ty) {
            if !field.can_be_set_in_constructor(universe, ty, ctx.access()) {
                continue;
            }
            if covered
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&field.name))
            {
                continue;
            }
            inits.push((field.name.clone(), self.fabricate(field.ty.ty, ctx, path)?));
        }

        let initializer = if inits.is_empty() {
            Initializer::None
        } else {
            Initializer::Members(inits)
        };
        Ok(Expr::new_object(universe.display_name(ty), args, initializer))
    }
}
