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

//! Per-request synthesis state, threaded by reference through all recursion.

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::access::AccessibilityChecker;
use crate::diagnostics::MissingConversion;
use crate::syntax::Expr;
use crate::types::{AnnotatedType, TypeId, TypeUniverse};

/// How to read a value, and its type.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingElement {
    /// Expression reading the value.
    pub expr: Expr,
    /// The value's annotated type.
    pub ty: AnnotatedType,
}

impl MappingElement {
    /// Element from an expression and its type.
    pub fn new(expr: Expr, ty: AnnotatedType) -> Self {
        Self { expr, ty }
    }

    /// Element reading a named identifier.
    pub fn identifier(name: impl Into<String>, ty: AnnotatedType) -> Self {
        Self {
            expr: Expr::ident(name),
            ty,
        }
    }
}

/// Nominal types visited on the current recursive descent.
///
/// One growable path shared by the whole request: callers push before
/// descending into a type's members and pop after returning, so independent
/// sibling branches never see each other while a chain `A -> B -> A` is
/// still caught.
#[derive(Debug, Clone, Default)]
pub struct MappingPath {
    visited: SmallVec<[TypeId; 8]>,
}

impl MappingPath {
    /// Empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `ty` is on the current descent.
    pub fn contains(&self, ty: TypeId) -> bool {
        self.visited.contains(&ty)
    }

    /// Current descent depth.
    pub fn depth(&self) -> usize {
        self.visited.len()
    }

    pub(crate) fn push(&mut self, ty: TypeId) {
        self.visited.push(ty);
    }

    pub(crate) fn pop(&mut self) {
        self.visited.pop();
    }
}

/// A user-supplied conversion between two types.
///
/// `converter` is invoked with the source value as its single argument.
#[derive(Debug, Clone, PartialEq)]
pub struct UserConversion {
    /// Accepted source type.
    pub from: AnnotatedType,
    /// Produced target type.
    pub to: AnnotatedType,
    /// Callable converter expression.
    pub converter: Expr,
}

/// Registry of user conversions keyed by (from, to) nominal pair.
///
/// Registration order is preserved: nullability tie-breaks prefer an exact
/// match, then a matching source side, then a matching target side, then the
/// first registered.
#[derive(Debug, Default)]
struct ConversionRegistry {
    entries: IndexMap<(TypeId, TypeId), Vec<UserConversion>>,
}

impl ConversionRegistry {
    fn register(&mut self, conversion: UserConversion) {
        self.entries
            .entry((conversion.from.ty, conversion.to.ty))
            .or_default()
            .push(conversion);
    }

    fn find(&self, from: AnnotatedType, to: AnnotatedType) -> Option<&UserConversion> {
        let candidates = self.entries.get(&(from.ty, to.ty))?;
        let mut best: Option<(&UserConversion, u8)> = None;
        for candidate in candidates {
            let score = match (
                candidate.from.can_be_null == from.can_be_null,
                candidate.to.can_be_null == to.can_be_null,
            ) {
                (true, true) => 3,
                (true, false) => 2,
                (false, true) => 1,
                (false, false) => 0,
            };
            // Strict improvement keeps the earliest registration on ties.
            if best.map(|(_, s)| score > s).unwrap_or(true) {
                best = Some((candidate, score));
            }
        }
        best.map(|(candidate, _)| candidate)
    }
}

/// Request configuration, built by chaining.
#[derive(Debug, Clone, Default)]
pub struct SynthesisOptions {
    pub(crate) context_type: Option<TypeId>,
    pub(crate) wrap_in_custom_conversion: bool,
    pub(crate) acronym_matching: bool,
    pub(crate) local_type_fallback: bool,
    pub(crate) prefer_convert_all: bool,
    pub(crate) conversions: Vec<UserConversion>,
}

impl SynthesisOptions {
    /// Default options: permissive accessibility, no wrapping, speculative
    /// heuristics off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accessibility context type.
    pub fn with_context_type(mut self, ty: TypeId) -> Self {
        self.context_type = Some(ty);
        self
    }

    /// Emits to-be-generated converter invocations instead of inline
    /// structural conversions, recording each pair as missing.
    pub fn with_wrap_in_custom_conversion(mut self, wrap: bool) -> Self {
        self.wrap_in_custom_conversion = wrap;
        self
    }

    /// Opts in to the speculative acronym source-finder rule.
    pub fn with_acronym_matching(mut self, allow: bool) -> Self {
        self.acronym_matching = allow;
        self
    }

    /// Opts in to matching a unique type-compatible local when no name
    /// matches.
    pub fn with_local_type_fallback(mut self, allow: bool) -> Self {
        self.local_type_fallback = allow;
        self
    }

    /// Prefers `ConvertAll` over `Select` when both collection ends are
    /// lists.
    pub fn with_convert_all(mut self, prefer: bool) -> Self {
        self.prefer_convert_all = prefer;
        self
    }

    /// Registers a user conversion available to the engine.
    pub fn with_conversion(
        mut self,
        from: AnnotatedType,
        to: AnnotatedType,
        converter: Expr,
    ) -> Self {
        self.conversions.push(UserConversion {
            from,
            to,
            converter,
        });
        self
    }
}

/// Per-session state: accessibility context, conversion registry, and the
/// accumulator of conversions the engine could not resolve.
///
/// Created once per top-level request. Only the registry, the accumulator,
/// and the accessibility memo tables mutate.
pub struct MappingContext<'u> {
    universe: &'u TypeUniverse,
    access: AccessibilityChecker,
    wrap_in_custom_conversion: bool,
    acronym_matching: bool,
    local_type_fallback: bool,
    prefer_convert_all: bool,
    conversions: ConversionRegistry,
    missing: Vec<MissingConversion>,
}

impl<'u> MappingContext<'u> {
    /// Context over `universe` configured by `options`.
    pub fn new(universe: &'u TypeUniverse, options: &SynthesisOptions) -> Self {
        let mut conversions = ConversionRegistry::default();
        for conversion in &options.conversions {
            conversions.register(conversion.clone());
        }
        Self {
            universe,
            access: AccessibilityChecker::new(options.context_type),
            wrap_in_custom_conversion: options.wrap_in_custom_conversion,
            acronym_matching: options.acronym_matching,
            local_type_fallback: options.local_type_fallback,
            prefer_convert_all: options.prefer_convert_all,
            conversions,
            missing: Vec::new(),
        }
    }

    /// The universe synthesis runs against.
    pub fn universe(&self) -> &'u TypeUniverse {
        self.universe
    }

    /// The session's accessibility oracle.
    pub fn access(&self) -> &AccessibilityChecker {
        &self.access
    }

    /// The accessibility context type, if any.
    pub fn context_type(&self) -> Option<TypeId> {
        self.access.context_type()
    }

    pub(crate) fn wrap_in_custom_conversion(&self) -> bool {
        self.wrap_in_custom_conversion
    }

    pub(crate) fn acronym_matching(&self) -> bool {
        self.acronym_matching
    }

    pub(crate) fn local_type_fallback(&self) -> bool {
        self.local_type_fallback
    }

    pub(crate) fn prefer_convert_all(&self) -> bool {
        self.prefer_convert_all
    }

    /// Registers a user conversion mid-session.
    pub fn register_conversion(&mut self, conversion: UserConversion) {
        self.conversions.register(conversion);
    }

    pub(crate) fn find_conversion(
        &self,
        from: AnnotatedType,
        to: AnnotatedType,
    ) -> Option<&UserConversion> {
        self.conversions.find(from, to)
    }

    /// Records a conversion the engine could not resolve inline.
    pub(crate) fn record_missing(&mut self, from: AnnotatedType, to: AnnotatedType) {
        let record = MissingConversion { from, to };
        if !self.missing.contains(&record) {
            debug!(
                "conversion {} -> {} left for the caller",
                self.universe.display_name(from.ty),
                self.universe.display_name(to.ty)
            );
            self.missing.push(record);
        }
    }

    /// Conversions recorded so far.
    pub fn missing_conversions(&self) -> &[MissingConversion] {
        &self.missing
    }

    pub(crate) fn take_missing(&mut self) -> Vec<MissingConversion> {
        std::mem::take(&mut self.missing)
    }
}
