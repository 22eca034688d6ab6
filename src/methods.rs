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

//! Whole-method synthesis: classify a signature into the mapping shape it
//! admits, then generate the body statements for that shape.

use tracing::debug;

use crate::diagnostics::{MissingConversion, Result, SynthesisError};
use crate::engine::{
    EngineMode, MappingElement, MappingEngine, MappingPath, SynthesisOptions,
};
use crate::matching;
use crate::sources::{LocalSymbol, SourceFinder};
use crate::syntax::{Expr, Stmt};
use crate::types::{AnnotatedType, ObjectField, ParameterDef, TypeId, TypeUniverse};

/// A method the host wants implemented.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    /// Method name.
    pub name: String,
    /// Declared parameters, in order.
    pub parameters: Vec<ParameterDef>,
    /// Return type; `None` is void.
    pub return_type: Option<AnnotatedType>,
    /// Type the method is declared on.
    pub containing_type: TypeId,
    /// Whether the signature is a constructor.
    pub is_constructor: bool,
}

/// The mapping shape a signature admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodShape {
    /// One parameter, returned as a deep copy of itself.
    Identity,
    /// Parameters in, freshly constructed return value out.
    PureMapping,
    /// Constructor assigning its parameters onto the new instance.
    MappingConstructor,
    /// Void single-parameter update of the containing instance.
    UpdateThis,
    /// Void multi-parameter update of the containing instance.
    UpdateThisMulti,
    /// Void update of the second parameter from the first.
    UpdateParameter,
    /// Zero parameters; maps the containing instance onto the return type.
    ThisToOther,
}

/// Result of implementing one method.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedMethod {
    /// Body statements, in order.
    pub statements: Vec<Stmt>,
    /// The shape generation followed.
    pub shape: MethodShape,
    /// Conversion pairs left for the caller to supply.
    pub missing_conversions: Vec<MissingConversion>,
}

/// Classifies a signature, or `None` when no shape admits an implementation.
pub fn classify_method(
    universe: &TypeUniverse,
    signature: &MethodSignature,
) -> Option<MethodShape> {
    let parameters = &signature.parameters;
    if signature.is_constructor {
        return (!parameters.is_empty()).then_some(MethodShape::MappingConstructor);
    }
    match (parameters.len(), signature.return_type) {
        (0, Some(ret)) if !universe.is_simple(ret.ty) => Some(MethodShape::ThisToOther),
        (1, Some(ret)) if ret.ty == parameters[0].ty.ty => Some(MethodShape::Identity),
        (n, Some(_)) if n >= 1 => Some(MethodShape::PureMapping),
        (1, None) => Some(MethodShape::UpdateThis),
        (2, None) if !universe.is_simple(parameters[1].ty.ty) => {
            Some(MethodShape::UpdateParameter)
        }
        (n, None) if n >= 2 => Some(MethodShape::UpdateThisMulti),
        _ => None,
    }
}

pub(crate) fn implement(
    universe: &TypeUniverse,
    signature: &MethodSignature,
    options: &SynthesisOptions,
) -> Result<SynthesizedMethod> {
    let Some(shape) = classify_method(universe, signature) else {
        return Err(SynthesisError::UnsupportedMethodShape(
            signature.name.clone(),
        ));
    };
    debug!("implementing '{}' as {:?}", signature.name, shape);

    let mode = if shape == MethodShape::Identity {
        EngineMode::Clone
    } else {
        EngineMode::Mapping
    };
    let mut engine = MappingEngine::new(universe, options, mode);
    let mut path = MappingPath::new();

    let statements = match shape {
        MethodShape::Identity => {
            let parameter = &signature.parameters[0];
            let target = signature.return_type.unwrap_or(parameter.ty);
            let source = MappingElement::identifier(parameter.name.clone(), parameter.ty);
            let copy = engine.map(source, target, &mut path)?;
            vec![Stmt::return_value(copy.expr)]
        }
        MethodShape::PureMapping => {
            let target = expected_return(signature)?;
            let finder = pure_sources(universe, &engine, &signature.parameters);
            let construction = engine.construct(target, &finder, &mut path)?;
            vec![Stmt::return_value(construction)]
        }
        MethodShape::MappingConstructor => {
            let finder = if signature.parameters.len() == 1 {
                let parameter = &signature.parameters[0];
                SourceFinder::object_members_with(
                    MappingElement::identifier(parameter.name.clone(), parameter.ty),
                    engine.ctx().acronym_matching(),
                )
            } else {
                parameter_locals(&engine, &signature.parameters)
            };
            assign_members(
                &mut engine,
                Expr::ident("this"),
                signature.containing_type,
                &finder,
                true,
                &mut path,
            )?
        }
        MethodShape::UpdateThis => {
            let parameter = &signature.parameters[0];
            let members = SourceFinder::object_members_with(
                MappingElement::identifier(parameter.name.clone(), parameter.ty),
                engine.ctx().acronym_matching(),
            );
            let assigned = assign_members(
                &mut engine,
                Expr::ident("this"),
                signature.containing_type,
                &members,
                false,
                &mut path,
            )?;
            if !assigned.is_empty() {
                assigned
            } else {
                // The parameter exposed nothing usable; treat it like the
                // multi-parameter update and match it as a local instead.
                let locals = parameter_locals(&engine, &signature.parameters);
                assign_members(
                    &mut engine,
                    Expr::ident("this"),
                    signature.containing_type,
                    &locals,
                    false,
                    &mut path,
                )?
            }
        }
        MethodShape::UpdateThisMulti => {
            let locals = parameter_locals(&engine, &signature.parameters);
            assign_members(
                &mut engine,
                Expr::ident("this"),
                signature.containing_type,
                &locals,
                false,
                &mut path,
            )?
        }
        MethodShape::UpdateParameter => {
            let from = &signature.parameters[0];
            let to = &signature.parameters[1];
            let members = SourceFinder::object_members_with(
                MappingElement::identifier(from.name.clone(), from.ty),
                engine.ctx().acronym_matching(),
            );
            assign_members(
                &mut engine,
                Expr::ident(to.name.clone()),
                to.ty.ty,
                &members,
                false,
                &mut path,
            )?
        }
        MethodShape::ThisToOther => {
            let target = expected_return(signature)?;
            let source = MappingElement::identifier(
                "this",
                AnnotatedType::non_null(signature.containing_type),
            );
            let mapped = engine.map(source, target, &mut path)?;
            vec![Stmt::return_value(mapped.expr)]
        }
    };

    Ok(SynthesizedMethod {
        statements,
        shape,
        missing_conversions: engine.drain_missing(),
    })
}

fn expected_return(signature: &MethodSignature) -> Result<AnnotatedType> {
    signature
        .return_type
        .ok_or_else(|| SynthesisError::UnsupportedMethodShape(signature.name.clone()))
}

// Single parameter: its members. Several: the parameters as locals, then
// each non-simple parameter's members as ordered fallbacks.
fn pure_sources(
    universe: &TypeUniverse,
    engine: &MappingEngine<'_>,
    parameters: &[ParameterDef],
) -> SourceFinder<'static> {
    let acronyms = engine.ctx().acronym_matching();
    if parameters.len() == 1 {
        let parameter = &parameters[0];
        return SourceFinder::object_members_with(
            MappingElement::identifier(parameter.name.clone(), parameter.ty),
            acronyms,
        );
    }
    let mut finders = vec![parameter_locals(engine, parameters)];
    for parameter in parameters {
        if !universe.is_simple(parameter.ty.ty) {
            finders.push(SourceFinder::object_members_with(
                MappingElement::identifier(parameter.name.clone(), parameter.ty),
                acronyms,
            ));
        }
    }
    SourceFinder::ordered(finders)
}

fn parameter_locals(
    engine: &MappingEngine<'_>,
    parameters: &[ParameterDef],
) -> SourceFinder<'static> {
    let locals = parameters
        .iter()
        .map(|parameter| LocalSymbol::new(parameter.name.clone(), parameter.ty))
        .collect();
    if engine.ctx().local_type_fallback() {
        SourceFinder::locals_with_type_fallback(locals)
    } else {
        SourceFinder::locals(locals)
    }
}

/// Assignment statements for every settable member of `receiver_ty` the
/// finder resolves, each value mapped through the engine.
fn assign_members(
    engine: &mut MappingEngine<'_>,
    receiver: Expr,
    receiver_ty: TypeId,
    finder: &SourceFinder<'_>,
    in_constructor: bool,
    path: &mut MappingPath,
) -> Result<Vec<Stmt>> {
    let universe = engine.ctx().universe();
    let targets: Vec<ObjectField> = universe
        .object_fields(receiver_ty)
        .into_iter()
        .filter(|field| {
            if in_constructor {
                field.can_be_set_in_constructor(universe, receiver_ty, engine.ctx().access())
            } else {
                field.can_be_set(universe, receiver_ty, engine.ctx().access())
            }
        })
        .collect();
    let matches = matching::match_fields(&targets, finder, engine.ctx())?;
    let mut statements = Vec::with_capacity(matches.len());
    for found in matches {
        let value = engine.map(found.source, found.target.ty, path)?;
        statements.push(Stmt::assign(
            Expr::member(receiver.clone(), found.target.name),
            value.expr,
        ));
    }
    Ok(statements)
}
