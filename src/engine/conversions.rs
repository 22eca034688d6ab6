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

//! Value-level conversions: user-registered converters, boxed-nullable
//! unwrapping, casts, wrapper unwrapping, and the enum/string bridge.

use super::*;

use crate::access::AccessibilityChecker;
use crate::types::{MethodDef, ObjectField, TypeKind};

/// A unique single-member bridge from a wrapper type to the wrapped value.
#[derive(Debug, Clone, PartialEq)]
pub enum WrapperInfo {
    /// Read a property or field holding the wrapped value.
    Property(ObjectField),
    /// Call a zero-argument method returning the wrapped value.
    Method(MethodDef),
}

impl WrapperInfo {
    /// The unique accessible member of `wrapper` typed exactly as `wrapped`.
    ///
    /// More than one candidate is an ambiguity and resolves to `None`.
    pub fn resolve(
        universe: &TypeUniverse,
        access: &AccessibilityChecker,
        wrapper: TypeId,
        wrapped: TypeId,
    ) -> Option<WrapperInfo> {
        let mut found: Option<WrapperInfo> = None;
        for field in universe.object_fields(wrapper) {
            if field.ty.ty == wrapped && field.can_be_get(universe, wrapper, access) {
                if found.is_some() {
                    return None;
                }
                found = Some(WrapperInfo::Property(field));
            }
        }
        for method in universe.methods_of(wrapper) {
            if method.parameters.is_empty()
                && method.return_type.map(|r| r.ty) == Some(wrapped)
                && access.is_accessible(universe, method.access, method.declared_on, wrapper)
            {
                if found.is_some() {
                    return None;
                }
                found = Some(WrapperInfo::Method(method));
            }
        }
        found
    }

    /// The unwrapping read applied to `source`.
    pub fn apply(&self, source: &MappingElement) -> MappingElement {
        match self {
            WrapperInfo::Property(field) => MappingElement::new(
                Expr::member(source.expr.clone(), field.name.clone()),
                field
                    .ty
                    .with_nullability(source.ty.can_be_null || field.ty.can_be_null),
            ),
            WrapperInfo::Method(method) => {
                let read = Expr::call_method(source.expr.clone(), method.name.clone(), Vec::new());
                let ty = match method.return_type {
                    Some(ret) => ret.with_nullability(source.ty.can_be_null || ret.can_be_null),
                    None => source.ty,
                };
                MappingElement::new(read, ty)
            }
        }
    }
}

impl MappingEngine<'_> {
    /// A registry hit for the pair beats every derived conversion.
    pub(super) fn apply_user_conversion(
        &self,
        source: &MappingElement,
        target: AnnotatedType,
    ) -> Option<MappingElement> {
        let conversion = self.ctx.find_conversion(source.ty, target)?;
        let universe = self.ctx.universe();
        debug!(
            "user conversion {} -> {} applied to '{}'",
            universe.display_name(source.ty.ty),
            universe.display_name(target.ty),
            source.expr
        );
        let call = Expr::invoke(
            conversion.converter.clone(),
            vec![Argument::positional(source.expr.clone())],
        );
        // The converter is never handed a null even when both sides allow one.
        if source.ty.can_be_null && target.can_be_null {
            let guarded = Expr::conditional(
                Expr::not_null(source.expr.clone()),
                call,
                Expr::throw(Expr::new_object(
                    "ArgumentNullException",
                    vec![Argument::positional(Expr::name_of(source.expr.clone()))],
                    Initializer::None,
                )),
            );
            return Some(MappingElement::new(guarded, target));
        }
        Some(MappingElement::new(call, target))
    }

    /// A boxed nullable feeding a plain primitive reads `.Value` first.
    pub(super) fn unwrap_boxed_nullable(
        &self,
        source: MappingElement,
        target: AnnotatedType,
    ) -> MappingElement {
        let universe = self.ctx.universe();
        if universe.type_def(target.ty).kind != TypeKind::Primitive {
            return source;
        }
        match universe.nullable_underlying(source.ty.ty) {
            Some(underlying) => MappingElement::new(
                Expr::member(source.expr, "Value"),
                AnnotatedType::non_null(underlying),
            ),
            None => source,
        }
    }

    /// Conversions onto a simple target, tried in order: implicit (no cast),
    /// declared operator, narrowing cast, wrapper unwrap, enum/string bridge.
    pub(super) fn simple_conversion(
        &self,
        source: &MappingElement,
        target: AnnotatedType,
    ) -> Option<MappingElement> {
        let universe = self.ctx.universe();
        let core = universe.core();

        if universe.numeric_widening(source.ty.ty, target.ty) {
            return Some(MappingElement::new(
                source.expr.clone(),
                target.with_nullability(source.ty.can_be_null),
            ));
        }
        if let Some(op) = universe.conversion_between(source.ty.ty, target.ty) {
            let expr = if op.explicit {
                Expr::cast(universe.display_name(target.ty), source.expr.clone())
            } else {
                source.expr.clone()
            };
            return Some(MappingElement::new(
                expr,
                target.with_nullability(source.ty.can_be_null),
            ));
        }
        if universe.numeric_narrowing(source.ty.ty, target.ty) {
            return Some(MappingElement::new(
                Expr::cast(universe.display_name(target.ty), source.expr.clone()),
                target.with_nullability(source.ty.can_be_null),
            ));
        }
        if let Some(wrapper) =
            WrapperInfo::resolve(universe, self.ctx.access(), source.ty.ty, target.ty)
        {
            trace!(
                "unwrapping '{}' through its unique {} member",
                source.expr,
                universe.display_name(target.ty)
            );
            return Some(wrapper.apply(source));
        }
        if universe.is_enum(source.ty.ty) && target.ty == core.string {
            return Some(MappingElement::new(
                Expr::call_method(source.expr.clone(), "ToString", Vec::new()),
                target.with_nullability(false),
            ));
        }
        if source.ty.ty == core.string && universe.is_enum(target.ty) {
            let display = universe.display_name(target.ty);
            let parse = Expr::invoke(
                Expr::member(Expr::ident("Enum"), "Parse"),
                vec![
                    Argument::positional(Expr::type_of(display.clone())),
                    Argument::positional(source.expr.clone()),
                    Argument::positional(Expr::bool_literal(true)),
                ],
            );
            return Some(MappingElement::new(
                Expr::cast(display, parse),
                target.with_nullability(false),
            ));
        }
        None
    }
}
