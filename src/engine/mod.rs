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

//! The mapping engine: a recursive decision procedure turning a source
//! element into a target-typed element.
//!
//! Each `map` call tries, strictly in order: the cycle guard, user-supplied
//! conversions, boxed-nullable unwrapping, simple-type conversions, and
//! structural conversion. Anything unmappable degrades to the unchanged
//! source rather than an error; `Err` is reserved for the host boundary.

mod collections;
mod context;
mod conversions;
mod structural;

pub use self::context::{
    MappingContext, MappingElement, MappingPath, SynthesisOptions, UserConversion,
};
pub use self::conversions::WrapperInfo;

use tracing::{debug, trace};

use crate::diagnostics::{MissingConversion, Result};
use crate::syntax::{Argument, Expr, Initializer};
use crate::types::{AnnotatedType, TypeId, TypeUniverse};

/// Result of one synthesis request: the produced element plus every
/// conversion the engine delegated to a converter the caller still has to
/// supply.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedMapping {
    /// The synthesized element.
    pub element: MappingElement,
    /// Conversion pairs emitted as to-be-generated converter invocations.
    pub missing_conversions: Vec<MissingConversion>,
}

/// What the engine optimizes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EngineMode {
    /// Reshape a source value into a differently-shaped target; assignable
    /// values pass through untouched.
    Mapping,
    /// Deep-copy a value onto its own shape; structural conversion is forced
    /// whenever both sides are non-simple.
    Clone,
}

pub(crate) struct MappingEngine<'u> {
    ctx: MappingContext<'u>,
    mode: EngineMode,
}

impl<'u> MappingEngine<'u> {
    pub(crate) fn new(
        universe: &'u TypeUniverse,
        options: &SynthesisOptions,
        mode: EngineMode,
    ) -> Self {
        Self {
            ctx: MappingContext::new(universe, options),
            mode,
        }
    }

    pub(crate) fn ctx(&self) -> &MappingContext<'u> {
        &self.ctx
    }

    /// Maps `source` onto `target`.
    ///
    /// `path` carries the nominal types already being mapped higher up the
    /// descent; callers push before recursing into a type's members and pop
    /// after returning.
    pub(crate) fn map(
        &mut self,
        source: MappingElement,
        target: AnnotatedType,
        path: &mut MappingPath,
    ) -> Result<MappingElement> {
        let universe = self.ctx.universe();
        trace!(
            "map '{}' : {} -> {}",
            source.expr,
            universe.display_name(source.ty.ty),
            universe.display_name(target.ty)
        );

        // A type already being mapped higher up would recurse forever.
        if !universe.is_simple(source.ty.ty) && path.contains(source.ty.ty) {
            let shown = universe.display_name(source.ty.ty);
            debug!("mapping of '{shown}' already in progress, stopping the descent");
            return Ok(MappingElement::new(
                Expr::commented(source.expr, format!("recursive mapping of '{shown}' stopped")),
                source.ty,
            ));
        }

        // User-supplied conversions win over everything the engine could
        // derive on its own.
        if let Some(converted) = self.apply_user_conversion(&source, target) {
            return Ok(converted);
        }

        // A boxed nullable feeding a plain primitive unwraps first.
        let source = self.unwrap_boxed_nullable(source, target);

        let simple_target =
            universe.is_simple(target.ty) || universe.nullable_underlying(target.ty).is_some();
        if self.mode == EngineMode::Mapping && simple_target && source.ty.ty != target.ty {
            if let Some(converted) = self.simple_conversion(&source, target) {
                return Ok(converted);
            }
        }

        if self.requires_structural(source.ty.ty, target.ty) {
            return self.structural_conversion(source, target, path);
        }

        Ok(source)
    }

    // Structural conversion never applies to simple or nullable targets;
    // those either converted above or pass through unchanged.
    fn requires_structural(&self, from: TypeId, to: TypeId) -> bool {
        let universe = self.ctx.universe();
        if universe.is_simple(to) || universe.nullable_underlying(to).is_some() {
            return false;
        }
        match self.mode {
            EngineMode::Mapping => !universe.assignable(from, to),
            EngineMode::Clone => !universe.is_simple(from),
        }
    }

    /// Wraps `replacement` in a null guard when the source may be null:
    /// nullable targets fall back to `null`, non-nullable ones throw.
    pub(super) fn null_guarded(
        &self,
        source: &MappingElement,
        replacement: Expr,
        target: AnnotatedType,
    ) -> MappingElement {
        if !source.ty.can_be_null {
            return MappingElement::new(replacement, target.with_nullability(false));
        }
        let fallback = if target.can_be_null {
            Expr::null()
        } else {
            Expr::throw(Expr::new_object(
                "ArgumentNullException",
                vec![Argument::positional(Expr::name_of(source.expr.clone()))],
                Initializer::None,
            ))
        };
        MappingElement::new(
            Expr::conditional(Expr::not_null(source.expr.clone()), replacement, fallback),
            target,
        )
    }

    /// Consumes the engine, draining the missing-conversion accumulator into
    /// the public result.
    pub(crate) fn finish(mut self, element: MappingElement) -> SynthesizedMapping {
        SynthesizedMapping {
            element,
            missing_conversions: self.ctx.take_missing(),
        }
    }

    /// Drains the accumulator without consuming the engine.
    pub(crate) fn drain_missing(&mut self) -> Vec<MissingConversion> {
        self.ctx.take_missing()
    }
}
