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

//! Structure-driven synthesis of mapping, cloning, and scaffolding code.
//!
//! This crate provides:
//! - A host-neutral [`TypeUniverse`] describing types, members, nullability,
//!   and accessibility the way the host compiler sees them.
//! - Source finders that locate a value for a target member in local scope,
//!   among another object's members (direct, flattened, method-backed, or
//!   acronym-expanded), or by fabricating plausible defaults.
//! - A recursive mapping engine covering user conversions, nullable
//!   unwrapping, casts, wrapper types, enum/string bridges, collections, and
//!   cyclic type graphs.
//! - Method-body generation for the common mapping shapes (pure mapping,
//!   deep clone, mapping constructor, in-place update).
//! - Overload matching for call-argument splatting and scaffolding.
//!
//! # Pipeline
//!
//! 1. The host describes its types in a [`TypeUniverse`] and the request in
//!    [`SynthesisOptions`].
//! 2. An entry point pairs target members with sources through one
//!    [`SourceFinder`] strategy.
//! 3. The engine maps every source expression onto its target type,
//!    descending into nested objects and collections while the
//!    [`MappingPath`] guards against type cycles.
//! 4. Results render as host-language text through the [`Expr`] and [`Stmt`]
//!    `Display` impls, with unresolved conversions reported alongside.
//!
//! # Output Discipline
//!
//! Synthesis always completes with well-formed output. A target member with
//! no source is skipped, an unmappable value passes through unchanged or as
//! a commented placeholder, and conversions delegated to not-yet-written
//! converters accumulate in [`SynthesizedMapping::missing_conversions`].
//! `Err` is reserved for the host boundary ([`SynthesisError::Cancelled`],
//! [`SynthesisError::Host`]) and for method signatures no shape admits.

mod access;
mod diagnostics;
mod engine;
mod matching;
mod methods;
mod names;
mod overloads;
mod sources;
mod syntax;
mod types;


pub use access::{Accessibility, AccessibilityChecker};
pub use diagnostics::{MissingConversion, Result, SynthesisError};
pub use engine::{
    MappingContext, MappingElement, MappingPath, SynthesisOptions, SynthesizedMapping,
    UserConversion, WrapperInfo,
};
pub use methods::{classify_method, MethodShape, MethodSignature, SynthesizedMethod};
pub use overloads::{MatchedParameter, MatchedParameterList};
pub use sources::{
    ImplementationDiscovery, LocalScopeFinder, LocalSymbol, ObjectMembersFinder,
    ScaffoldingFinder, SourceFinder, UniverseDiscovery,
};
pub use syntax::{Argument, BinaryOp, Expr, Initializer, Literal, Stmt};
pub use types::{
    AnnotatedType, Assembly, AssemblyId, ConstructorDef, ConversionOp, CoreTypes, MethodDef,
    ObjectField, ParameterDef, TypeBuilder, TypeDef, TypeId, TypeKind, TypeUniverse,
};

use engine::{EngineMode, MappingEngine};
use tracing::debug;

/// Synthesizes an expression mapping `source` onto `target`.
///
/// The engine tries, in order: registered user conversions, boxed-nullable
/// unwrapping, simple conversions (numeric widening/narrowing, declared
/// operators, wrapper types, enum/string bridges), and structural conversion
/// through constructors and member initializers. Values already assignable
/// to `target` pass through unchanged.
pub fn map_expression(
    universe: &TypeUniverse,
    source: MappingElement,
    target: AnnotatedType,
    options: &SynthesisOptions,
) -> Result<SynthesizedMapping> {
    debug!(
        "map_expression: '{}' onto '{}'",
        universe.display_name(source.ty.ty),
        universe.display_name(target.ty)
    );
    let mut engine = MappingEngine::new(universe, options, EngineMode::Mapping);
    let mut path = MappingPath::new();
    let mapped = engine.map(source, target, &mut path)?;
    Ok(engine.finish(mapped))
}

/// Synthesizes a deep copy of `source` onto its own type.
///
/// Non-simple values are rebuilt structurally even though they are trivially
/// assignable to themselves; simple values pass through untouched.
pub fn clone_expression(
    universe: &TypeUniverse,
    source: MappingElement,
    options: &SynthesisOptions,
) -> Result<SynthesizedMapping> {
    debug!("clone_expression: '{}'", universe.display_name(source.ty.ty));
    let mut engine = MappingEngine::new(universe, options, EngineMode::Clone);
    let mut path = MappingPath::new();
    let target = source.ty;
    let copied = engine.map(source, target, &mut path)?;
    Ok(engine.finish(copied))
}

/// Synthesizes a construction of `target` from the values in scope.
///
/// Candidate strategies are the locals themselves plus, for every non-simple
/// local, that local's members. The candidate resolving the most settable
/// members serves the whole construction; sources are never mixed across
/// candidates. With no resolving candidate the construction degrades to the
/// best accessible constructor with placeholder arguments.
pub fn fill_initializer(
    universe: &TypeUniverse,
    target: AnnotatedType,
    locals: &[LocalSymbol],
    options: &SynthesisOptions,
) -> Result<SynthesizedMapping> {
    debug!(
        "fill_initializer: '{}' from {} locals",
        universe.display_name(target.ty),
        locals.len()
    );
    let mut engine = MappingEngine::new(universe, options, EngineMode::Mapping);

    let scope = if engine.ctx().local_type_fallback() {
        SourceFinder::locals_with_type_fallback(locals.to_vec())
    } else {
        SourceFinder::locals(locals.to_vec())
    };
    let mut candidates = vec![scope];
    for local in locals {
        if !universe.is_simple(local.ty.ty) {
            candidates.push(SourceFinder::object_members_with(
                MappingElement::identifier(local.name.clone(), local.ty),
                engine.ctx().acronym_matching(),
            ));
        }
    }

    let settable: Vec<ObjectField> = universe
        .object_fields(target.ty)
        .into_iter()
        .filter(|field| field.can_be_set_in_constructor(universe, target.ty, engine.ctx().access()))
        .collect();
    let winner = matching::best_finder(&settable, &candidates, engine.ctx())?.unwrap_or(0);

    let mut path = MappingPath::new();
    let construction = engine.construct(target, &candidates[winner], &mut path)?;
    let element = MappingElement::new(construction, target.with_nullability(false));
    Ok(engine.finish(element))
}

/// Implements `signature` according to its classified shape.
///
/// # Errors
///
/// Returns [`SynthesisError::UnsupportedMethodShape`] when
/// [`classify_method`] admits no shape for the signature.
pub fn implement_method(
    universe: &TypeUniverse,
    signature: &MethodSignature,
    options: &SynthesisOptions,
) -> Result<SynthesizedMethod> {
    methods::implement(universe, signature, options)
}

/// Fabricates a plausible value of type `target` with no source data at all.
///
/// Primitives get literal defaults, enums their first variant, collections a
/// one-element literal, and objects a recursive construction. Interface and
/// abstract targets resolve to a concrete implementation through `discovery`.
///
/// # Errors
///
/// Propagates [`SynthesisError::Cancelled`] and [`SynthesisError::Host`]
/// from `discovery`; nothing else fails.
pub fn scaffold_expression(
    universe: &TypeUniverse,
    target: AnnotatedType,
    discovery: &dyn ImplementationDiscovery,
    options: &SynthesisOptions,
) -> Result<SynthesizedMapping> {
    debug!("scaffold_expression: '{}'", universe.display_name(target.ty));
    let engine = MappingEngine::new(universe, options, EngineMode::Mapping);
    let finder = ScaffoldingFinder::new(discovery);
    let mut path = MappingPath::new();
    let expr = finder.fabricate(target.ty, engine.ctx(), &mut path)?;
    let element = MappingElement::new(expr, target.with_nullability(false));
    Ok(engine.finish(element))
}

/// Expands `source`'s members into arguments for the best-matching overload.
///
/// Parameters are resolved by name against the members of `source`. Returns
/// `None` when no overload receives a single resolved argument.
pub fn splat_arguments(
    universe: &TypeUniverse,
    overloads: &[Vec<ParameterDef>],
    source: MappingElement,
    options: &SynthesisOptions,
) -> Result<Option<MatchedParameterList>> {
    debug!(
        "splat_arguments: '{}' over {} overloads",
        universe.display_name(source.ty.ty),
        overloads.len()
    );
    let ctx = MappingContext::new(universe, options);
    let finder = SourceFinder::object_members_with(source, ctx.acronym_matching());
    let best = overloads::best_overload(overloads, &finder, &ctx)?;
    Ok(best.filter(|matched| matched.resolved_count() > 0))
}

/// Fabricates arguments for the best-matching overload with no source data.
///
/// Every parameter scaffolds successfully, so the overload with the most
/// parameters wins and earlier overloads break ties. Returns `None` only for
/// an empty overload set.
///
/// # Errors
///
/// Propagates [`SynthesisError::Cancelled`] and [`SynthesisError::Host`]
/// from `discovery`.
pub fn scaffold_arguments(
    universe: &TypeUniverse,
    overloads: &[Vec<ParameterDef>],
    discovery: &dyn ImplementationDiscovery,
    options: &SynthesisOptions,
) -> Result<Option<MatchedParameterList>> {
    debug!("scaffold_arguments: {} overloads", overloads.len());
    let ctx = MappingContext::new(universe, options);
    let finder = SourceFinder::scaffolding(discovery);
    overloads::best_overload(overloads, &finder, &ctx)
}
