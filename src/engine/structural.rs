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

//! Structural conversion: rebuilding a value member-by-member on the target
//! type when no value-level conversion applies.

use super::*;

use crate::matching;
use crate::names;
use crate::overloads::{self, MatchedParameterList};
use crate::sources::SourceFinder;
use crate::types::{ObjectField, ParameterDef};

impl MappingEngine<'_> {
    pub(super) fn structural_conversion(
        &mut self,
        source: MappingElement,
        target: AnnotatedType,
        path: &mut MappingPath,
    ) -> Result<MappingElement> {
        let universe = self.ctx.universe();

        if self.ctx.wrap_in_custom_conversion() {
            return Ok(self.invoke_generated_converter(source, target));
        }

        if let Some(direct) = self.single_argument_construction(&source, target) {
            return Ok(direct);
        }

        if universe.is_enumerable(source.ty.ty) && universe.is_enumerable(target.ty) {
            return self.map_collection(source, target, path);
        }

        if universe.is_interface_or_abstract(target.ty) {
            // Not constructible inline; leave the value for a converter.
            self.ctx.record_missing(source.ty, target);
            let note = format!(
                "no inline conversion from '{}' to '{}'",
                universe.display_name(source.ty.ty),
                universe.display_name(target.ty)
            );
            return Ok(MappingElement::new(
                Expr::commented(source.expr, note),
                source.ty,
            ));
        }

        self.construct_from_members(source, target, path)
    }

    fn invoke_generated_converter(
        &mut self,
        source: MappingElement,
        target: AnnotatedType,
    ) -> MappingElement {
        let universe = self.ctx.universe();
        let name = format!(
            "Map{}To{}",
            converter_fragment(universe, source.ty.ty),
            converter_fragment(universe, target.ty)
        );
        debug!("emitting invocation of converter '{name}'");
        self.ctx.record_missing(source.ty, target);
        let call = Expr::invoke(
            Expr::ident(name),
            vec![Argument::positional(source.expr)],
        );
        MappingElement::new(call, target)
    }

    // `new T(source)` through a constructor taking exactly the source type.
    fn single_argument_construction(
        &self,
        source: &MappingElement,
        target: AnnotatedType,
    ) -> Option<MappingElement> {
        let universe = self.ctx.universe();
        let direct = universe.constructors_of(target.ty).iter().any(|ctor| {
            ctor.parameters.len() == 1
                && ctor.parameters[0].ty.ty == source.ty.ty
                && self
                    .ctx
                    .access()
                    .is_accessible(universe, ctor.access, target.ty, target.ty)
        });
        if !direct {
            return None;
        }
        let construction = Expr::new_object(
            universe.display_name(target.ty),
            vec![Argument::positional(source.expr.clone())],
            Initializer::None,
        );
        Some(self.null_guarded(source, construction, target))
    }

    fn construct_from_members(
        &mut self,
        source: MappingElement,
        target: AnnotatedType,
        path: &mut MappingPath,
    ) -> Result<MappingElement> {
        // Inside the guard the read is known non-null.
        let guarded = MappingElement::new(source.expr.clone(), source.ty.with_nullability(false));
        let finder = SourceFinder::object_members_with(guarded, self.ctx.acronym_matching());

        path.push(source.ty.ty);
        let construction = self.construct(target, &finder, path);
        path.pop();

        Ok(self.null_guarded(&source, construction?, target))
    }

    /// Renders `new Target(args) { Member = value, .. }`: arguments from the
    /// best constructor overload, then initializers for the remaining
    /// settable members, everything resolved through `finder` and mapped
    /// member-by-member.
    pub(crate) fn construct(
        &mut self,
        target: AnnotatedType,
        finder: &SourceFinder<'_>,
        path: &mut MappingPath,
    ) -> Result<Expr> {
        let universe = self.ctx.universe();

        let overloads: Vec<Vec<ParameterDef>> = universe
            .constructors_of(target.ty)
            .iter()
            .filter(|ctor| {
                self.ctx
                    .access()
                    .is_accessible(universe, ctor.access, target.ty, target.ty)
            })
            .map(|ctor| ctor.parameters.clone())
            .collect();
        let matched = overloads::best_overload(&overloads, finder, &self.ctx)?;

        let (args, claimed) = match matched {
            Some(matched) if matched.resolved_count() > 0 => {
                let claimed = matched.claimed_expressions();
                (self.overload_arguments(&matched, path)?, claimed)
            }
            // No usable overload: default-construct and initialize everything.
            _ => (Vec::new(), Vec::new()),
        };

        let remaining = SourceFinder::ignoring(finder.clone(), claimed);
        let members = self.initializer_members(target, &remaining, path)?;
        let initializer = if members.is_empty() {
            Initializer::None
        } else {
            Initializer::Members(members)
        };
        Ok(Expr::new_object(
            universe.display_name(target.ty),
            args,
            initializer,
        ))
    }

    /// Renders the matched overload's argument list, mapping each resolved
    /// source onto its parameter type first.
    pub(crate) fn overload_arguments(
        &mut self,
        matched: &MatchedParameterList,
        path: &mut MappingPath,
    ) -> Result<Vec<Argument>> {
        let mut mapped = matched.clone();
        for slot in &mut mapped.parameters {
            if let Some(found) = slot.source.take() {
                slot.source = Some(self.map(found, slot.parameter.ty, path)?);
            }
        }
        Ok(mapped.arguments(self.ctx.universe()))
    }

    /// Initializer assignments for every accessible settable member `finder`
    /// resolves, each value mapped through the engine.
    pub(crate) fn initializer_members(
        &mut self,
        target: AnnotatedType,
        finder: &SourceFinder<'_>,
        path: &mut MappingPath,
    ) -> Result<Vec<(String, Expr)>> {
        let universe = self.ctx.universe();
        let targets: Vec<ObjectField> = universe
            .object_fields(target.ty)
            .into_iter()
            .filter(|field| {
                field.can_be_set_in_constructor(universe, target.ty, self.ctx.access())
            })
            .collect();
        let matches = matching::match_fields(&targets, finder, &self.ctx)?;
        let mut members = Vec::with_capacity(matches.len());
        for found in matches {
            let value = self.map(found.source, found.target.ty, path)?;
            members.push((found.target.name, value.expr));
        }
        Ok(members)
    }
}

// `List<Order>` -> `ListOfOrder`, `Order[]` -> `OrderArray`, `int?` -> `IntNullable`.
fn converter_fragment(universe: &TypeUniverse, ty: TypeId) -> String {
    let display = universe
        .display_name(ty)
        .replace("[]", "Array")
        .replace('?', "Nullable")
        .replace('<', "Of");
    names::identifier_fragment(&display)
}
