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

//! Pairing of target members with found sources, and the best-possible
//! choice between competing source sets.

use tracing::trace;

use crate::diagnostics::Result;
use crate::engine::{MappingContext, MappingElement};
use crate::sources::SourceFinder;
use crate::types::ObjectField;

/// One resolved pairing: a target member and the source feeding it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MappingMatch {
    /// The member being assigned.
    pub(crate) target: ObjectField,
    /// The source found for it.
    pub(crate) source: MappingElement,
}

/// Pairs every target member `finder` can resolve.
///
/// Unresolved members are skipped, never errors.
pub(crate) fn match_fields(
    targets: &[ObjectField],
    finder: &SourceFinder<'_>,
    ctx: &MappingContext<'_>,
) -> Result<Vec<MappingMatch>> {
    let mut matches = Vec::with_capacity(targets.len());
    for target in targets {
        match finder.find(&target.name, target.ty, ctx)? {
            Some(source) => matches.push(MappingMatch {
                target: target.clone(),
                source,
            }),
            None => trace!("no source found for member '{}'", target.name),
        }
    }
    Ok(matches)
}

/// Scores every candidate finder over the same targets and returns the index
/// of the one resolving the most, or `None` when nothing resolves at all.
///
/// Strict improvement keeps the earliest candidate on ties. The winner serves
/// the whole synthesis; sources are never mixed across candidates.
pub(crate) fn best_finder(
    targets: &[ObjectField],
    finders: &[SourceFinder<'_>],
    ctx: &MappingContext<'_>,
) -> Result<Option<usize>> {
    let mut best: Option<(usize, usize)> = None;
    for (index, finder) in finders.iter().enumerate() {
        let resolved = match_fields(targets, finder, ctx)?.len();
        if resolved > 0 && best.map(|(_, count)| resolved > count).unwrap_or(true) {
            best = Some((index, resolved));
        }
    }
    Ok(best.map(|(index, _)| index))
}
