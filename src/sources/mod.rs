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

//! Mapping source finders: given a target member's name and type, locate a
//! candidate (expression, type) to read from.
//!
//! The finder set is closed, so strategies form one sum type with a single
//! dispatch function; combinators nest other finders. Finders are pure: a
//! failed lookup has no side effects.

mod locals;
mod members;
mod scaffold;

pub use self::locals::{LocalScopeFinder, LocalSymbol};
pub use self::members::ObjectMembersFinder;
pub use self::scaffold::{ImplementationDiscovery, ScaffoldingFinder, UniverseDiscovery};

use tracing::trace;

use crate::diagnostics::Result;
use crate::engine::{MappingContext, MappingElement};
use crate::syntax::Expr;
use crate::types::AnnotatedType;

/// A strategy for locating mapping sources.
#[derive(Clone)]
pub enum SourceFinder<'d> {
    /// In-scope locals and parameters, by name (optionally by unique type).
    LocalScope(LocalScopeFinder),
    /// Accessible members of one source object, direct or flattened.
    ObjectMembers(ObjectMembersFinder),
    /// Fabricated plausible defaults; ignores the target name entirely.
    Scaffolding(ScaffoldingFinder<'d>),
    /// Ordered fallback; the first strategy with a match wins.
    Ordered(Vec<SourceFinder<'d>>),
    /// Discards matches whose expression was already claimed elsewhere.
    Ignoring {
        /// Wrapped finder.
        inner: Box<SourceFinder<'d>>,
        /// Expressions that must not be offered again.
        claimed: Vec<Expr>,
    },
}

impl<'d> SourceFinder<'d> {
    /// Local-scope finder matching by name only.
    pub fn locals(locals: Vec<LocalSymbol>) -> Self {
        SourceFinder::LocalScope(LocalScopeFinder::new(locals))
    }

    /// Local-scope finder that falls back to a unique type-compatible local.
    pub fn locals_with_type_fallback(locals: Vec<LocalSymbol>) -> Self {
        SourceFinder::LocalScope(LocalScopeFinder::with_type_fallback(locals))
    }

    /// Object-members finder with acronym expansion disabled.
    pub fn object_members(object: MappingElement) -> Self {
        SourceFinder::ObjectMembers(ObjectMembersFinder::new(object, false))
    }

    /// Object-members finder with explicit acronym opt-in.
    pub fn object_members_with(object: MappingElement, allow_acronyms: bool) -> Self {
        SourceFinder::ObjectMembers(ObjectMembersFinder::new(object, allow_acronyms))
    }

    /// Scaffolding finder over a discovery query.
    pub fn scaffolding(discovery: &'d dyn ImplementationDiscovery) -> Self {
        SourceFinder::Scaffolding(ScaffoldingFinder::new(discovery))
    }

    /// Ordered fallback over several finders.
    pub fn ordered(finders: Vec<SourceFinder<'d>>) -> Self {
        SourceFinder::Ordered(finders)
    }

    /// Wraps a finder so already-claimed expressions are never re-offered.
    pub fn ignoring(inner: SourceFinder<'d>, claimed: Vec<Expr>) -> Self {
        SourceFinder::Ignoring {
            inner: Box::new(inner),
            claimed,
        }
    }

    /// Finds a source for the target, or `None` when no strategy applies.
    ///
    /// Only scaffolding can return an error, and only from its host boundary.
    pub fn find(
        &self,
        target_name: &str,
        target_ty: AnnotatedType,
        ctx: &MappingContext<'_>,
    ) -> Result<Option<MappingElement>> {
        match self {
            SourceFinder::LocalScope(finder) => Ok(finder.find(target_name, target_ty, ctx)),
            SourceFinder::ObjectMembers(finder) => Ok(finder.find(target_name, target_ty, ctx)),
            SourceFinder::Scaffolding(finder) => finder.find(target_ty, ctx),
            SourceFinder::Ordered(finders) => {
                for finder in finders {
                    if let Some(found) = finder.find(target_name, target_ty, ctx)? {
                        return Ok(Some(found));
                    }
                }
                Ok(None)
            }
            SourceFinder::Ignoring { inner, claimed } => {
                match inner.find(target_name, target_ty, ctx)? {
                    Some(found) if claimed.contains(&found.expr) => {
                        trace!(
                            "source '{}' for target '{}' already claimed, discarded",
                            found.expr,
                            target_name
                        );
                        Ok(None)
                    }
                    other => Ok(other),
                }
            }
        }
    }
}
