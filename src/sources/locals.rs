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

//! Source finder over in-scope locals, parameters, and range variables.

use tracing::trace;

use crate::engine::{MappingContext, MappingElement};
use crate::syntax::Expr;
use crate::types::AnnotatedType;

/// An in-scope symbol offered as a mapping source.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSymbol {
    /// Symbol name as written in scope.
    pub name: String,
    /// Symbol type.
    pub ty: AnnotatedType,
}

impl LocalSymbol {
    /// New in-scope symbol.
    pub fn new(name: impl Into<String>, ty: AnnotatedType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Finds sources among in-scope symbols by case-insensitive name, optionally
/// falling back to a single type-compatible symbol.
#[derive(Debug, Clone)]
pub struct LocalScopeFinder {
    locals: Vec<LocalSymbol>,
    match_by_type: bool,
}

impl LocalScopeFinder {
    /// Name matching only.
    pub fn new(locals: Vec<LocalSymbol>) -> Self {
        Self {
            locals,
            match_by_type: false,
        }
    }

    /// Name matching plus the unique type-compatible fallback.
    pub fn with_type_fallback(locals: Vec<LocalSymbol>) -> Self {
        Self {
            locals,
            match_by_type: true,
        }
    }

    pub(super) fn find(
        &self,
        target_name: &str,
        target_ty: AnnotatedType,
        ctx: &MappingContext<'_>,
    ) -> Option<MappingElement> {
        for local in &self.locals {
            if local.name.eq_ignore_ascii_case(target_name) {
                trace!("local '{}' matches target '{}' by name", local.name, target_name);
                return Some(Self::element(local));
            }
        }
        if !self.match_by_type {
            return None;
        }
        // Ambiguity is never guessed: two or more compatible symbols is a miss.
        let mut compatible = self
            .locals
            .iter()
            .filter(|local| ctx.universe().assignable(local.ty.ty, target_ty.ty));
        match (compatible.next(), compatible.next()) {
            (Some(local), None) => {
                trace!(
                    "local '{}' matches target '{}' as the only type-compatible symbol",
                    local.name,
                    target_name
                );
                Some(Self::element(local))
            }
            _ => None,
        }
    }

    fn element(local: &LocalSymbol) -> MappingElement {
        MappingElement {
            expr: Expr::ident(&local.name),
            ty: local.ty,
        }
    }
}
