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

//! Source finder over one object's accessible members.
//!
//! Strategies run in a fixed order: direct name (with the accessor's own name
//! as a potential prefix), recursive prefix-flattening, zero-arg method
//! flattening, opt-in acronym expansion, and the enumerable `Any`/`Count`
//! synonyms. A match propagates nullability as accessor-or-member.

use tracing::trace;

use crate::engine::{MappingContext, MappingElement};
use crate::names;
use crate::syntax::Expr;
use crate::types::{AnnotatedType, ObjectField};

/// Finds sources among the accessible members of a single object.
#[derive(Debug, Clone)]
pub struct ObjectMembersFinder {
    object: MappingElement,
    // Last identifier of the object's own text, the "potential prefix".
    accessor_name: String,
    allow_acronyms: bool,
}

impl ObjectMembersFinder {
    /// Finder over `object`'s members; acronym expansion is opt-in.
    pub fn new(object: MappingElement, allow_acronyms: bool) -> Self {
        let accessor_name = names::last_identifier(&object.expr.to_string()).to_string();
        Self {
            object,
            accessor_name,
            allow_acronyms,
        }
    }

    /// The object this finder reads from.
    pub fn object(&self) -> &MappingElement {
        &self.object
    }

    pub(super) fn find(
        &self,
        target_name: &str,
        target_ty: AnnotatedType,
        ctx: &MappingContext<'_>,
    ) -> Option<MappingElement> {
        self.find_inner(target_name, target_ty, ctx, self.allow_acronyms)
    }

    fn find_inner(
        &self,
        target_name: &str,
        target_ty: AnnotatedType,
        ctx: &MappingContext<'_>,
        allow_acronyms: bool,
    ) -> Option<MappingElement> {
        let universe = ctx.universe();
        let via = self.object.ty.ty;
        let fields: Vec<ObjectField> = universe
            .object_fields(via)
            .into_iter()
            .filter(|field| field.can_be_get(universe, via, ctx.access()))
            .collect();

        // Direct case-insensitive name, also honoring the accessor prefix so
        // `user.Name` satisfies target `Name` or `UserName`.
        for field in &fields {
            if field.name.eq_ignore_ascii_case(target_name) {
                trace!("member '{}' matches target '{}' directly", field.name, target_name);
                return Some(self.member_element(field));
            }
            if let Some(remainder) =
                names::strip_prefix_ignore_case(target_name, &self.accessor_name)
            {
                if !remainder.is_empty() && field.name.eq_ignore_ascii_case(remainder) {
                    trace!(
                        "member '{}' matches target '{}' through accessor prefix '{}'",
                        field.name,
                        target_name,
                        self.accessor_name
                    );
                    return Some(self.member_element(field));
                }
            }
        }

        // Prefix flattening, unrolled while each member name-prefixes the
        // remaining target name: AddressCity resolves to Address.City.
        for field in &fields {
            if let Some(remainder) = names::strip_prefix_ignore_case(target_name, &field.name) {
                if remainder.is_empty() {
                    continue;
                }
                let nested = ObjectMembersFinder::new(self.member_element(field), false);
                if let Some(found) = nested.find_inner(remainder, target_ty, ctx, false) {
                    trace!(
                        "target '{}' flattened through member '{}'",
                        target_name,
                        field.name
                    );
                    return Some(found);
                }
            }
        }

        // Method flattening: zero-arg accessible method whose name ends with
        // the target name, e.g. Total from GetTotal().
        for method in universe.methods_of(via) {
            if !method.parameters.is_empty() {
                continue;
            }
            let Some(return_type) = method.return_type else {
                continue;
            };
            if !ctx
                .access()
                .is_accessible(universe, method.access, method.declared_on, via)
            {
                continue;
            }
            if names::ends_with_ignore_case(&method.name, target_name) {
                trace!(
                    "method '{}' matches target '{}' by flattening",
                    method.name,
                    target_name
                );
                return Some(MappingElement {
                    expr: Expr::call_method(self.object.expr.clone(), &method.name, vec![]),
                    ty: return_type
                        .with_nullability(self.object.ty.can_be_null || return_type.can_be_null),
                });
            }
        }

        // Acronym expansion, explicitly speculative and opt-in: fires only for
        // an all-lowercase accessor name that differs from the target.
        if allow_acronyms {
            if let Some(remainder) = names::acronym_remainder(target_name, &self.accessor_name) {
                trace!(
                    "acronym '{}' consumed from target '{}', retrying on '{}'",
                    self.accessor_name,
                    target_name,
                    remainder
                );
                if let Some(found) = self.find_inner(remainder, target_ty, ctx, false) {
                    return Some(found);
                }
            }
        }

        // Enumerable synonyms: Any and Count against a sequence source.
        if universe.is_enumerable(via) {
            let core = universe.core();
            if target_name.eq_ignore_ascii_case("Any") && target_ty.ty == core.boolean {
                return Some(MappingElement {
                    expr: Expr::call_method(self.object.expr.clone(), "Any", vec![]),
                    ty: AnnotatedType::new(core.boolean, self.object.ty.can_be_null),
                });
            }
            if target_name.eq_ignore_ascii_case("Count") && target_ty.ty == core.int {
                return Some(MappingElement {
                    expr: Expr::call_method(self.object.expr.clone(), "Count", vec![]),
                    ty: AnnotatedType::new(core.int, self.object.ty.can_be_null),
                });
            }
        }

        None
    }

    fn member_element(&self, field: &ObjectField) -> MappingElement {
        MappingElement {
            expr: Expr::member(self.object.expr.clone(), &field.name),
            ty: field
                .ty
                .with_nullability(self.object.ty.can_be_null || field.ty.can_be_null),
        }
    }
}
