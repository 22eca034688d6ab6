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

//! Parameter resolution against a source finder, and overload choice.

use crate::diagnostics::Result;
use crate::engine::{MappingContext, MappingElement};
use crate::sources::SourceFinder;
use crate::syntax::{Argument, Expr};
use crate::types::{ParameterDef, TypeUniverse};

/// One parameter slot with the source resolved for it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedParameter {
    /// The declared parameter.
    pub parameter: ParameterDef,
    /// The source found for it by name.
    pub source: Option<MappingElement>,
}

/// An overload's parameter slots, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchedParameterList {
    /// One slot per declared parameter.
    pub parameters: Vec<MatchedParameter>,
}

impl MatchedParameterList {
    /// Whether every slot is resolved or skippable because it is optional.
    pub fn fully_resolved(&self) -> bool {
        self.parameters
            .iter()
            .all(|slot| slot.source.is_some() || slot.parameter.optional)
    }

    /// Number of resolved slots.
    pub fn resolved_count(&self) -> usize {
        self.parameters
            .iter()
            .filter(|slot| slot.source.is_some())
            .count()
    }

    /// Source expressions consumed by the resolved slots.
    pub fn claimed_expressions(&self) -> Vec<Expr> {
        self.parameters
            .iter()
            .filter_map(|slot| slot.source.as_ref().map(|source| source.expr.clone()))
            .collect()
    }

    /// Renders the argument list: positional while the prefix is gapless,
    /// named after the first omitted optional parameter. An unresolved
    /// required parameter keeps its slot with a `default(T)` placeholder.
    pub fn arguments(&self, universe: &TypeUniverse) -> Vec<Argument> {
        let mut rendered = Vec::with_capacity(self.parameters.len());
        let mut positional = true;
        for slot in &self.parameters {
            let value = match &slot.source {
                Some(source) => source.expr.clone(),
                None if slot.parameter.optional => {
                    positional = false;
                    continue;
                }
                None => Expr::default_of(universe.display_name(slot.parameter.ty.ty)),
            };
            if positional {
                rendered.push(Argument::positional(value));
            } else {
                rendered.push(Argument::named(slot.parameter.name.clone(), value));
            }
        }
        rendered
    }
}

/// Resolves each parameter by name through `finder`.
pub(crate) fn match_parameters(
    parameters: &[ParameterDef],
    finder: &SourceFinder<'_>,
    ctx: &MappingContext<'_>,
) -> Result<MatchedParameterList> {
    let mut slots = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        let source = finder.find(&parameter.name, parameter.ty, ctx)?;
        slots.push(MatchedParameter {
            parameter: parameter.clone(),
            source,
        });
    }
    Ok(MatchedParameterList { parameters: slots })
}

/// Matches every overload and keeps the best score of
/// `(fully_resolved, resolved_count)`; earlier overloads win ties.
pub(crate) fn best_overload(
    overloads: &[Vec<ParameterDef>],
    finder: &SourceFinder<'_>,
    ctx: &MappingContext<'_>,
) -> Result<Option<MatchedParameterList>> {
    let mut best: Option<(MatchedParameterList, (bool, usize))> = None;
    for overload in overloads {
        let matched = match_parameters(overload, finder, ctx)?;
        let score = (matched.fully_resolved(), matched.resolved_count());
        // Strict improvement keeps the first overload on ties.
        if best.as_ref().map(|(_, s)| score > *s).unwrap_or(true) {
            best = Some((matched, score));
        }
    }
    Ok(best.map(|(matched, _)| matched))
}
