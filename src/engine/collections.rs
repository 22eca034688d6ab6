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

//! Collection-to-collection mapping: element projection when the element
//! types differ, then materialization into the target's concrete shape.

use super::*;

use crate::names;
use crate::types::TypeKind;

impl MappingEngine<'_> {
    pub(super) fn map_collection(
        &mut self,
        source: MappingElement,
        target: AnnotatedType,
        path: &mut MappingPath,
    ) -> Result<MappingElement> {
        let universe = self.ctx.universe();
        let (Some(source_element), Some(target_element)) = (
            universe.element_type(source.ty.ty),
            universe.element_type(target.ty),
        ) else {
            // Element types unresolvable; leave the value for a converter.
            self.ctx.record_missing(source.ty, target);
            return Ok(source);
        };

        let convert_elements = match self.mode {
            EngineMode::Mapping => !universe.assignable(source_element, target_element),
            EngineMode::Clone => {
                !universe.is_simple(source_element) || !universe.is_simple(target_element)
            }
        };

        let chain = if convert_elements {
            let parameter = names::lambda_parameter_name(&source.expr.to_string());
            let element = MappingElement::identifier(
                parameter.clone(),
                AnnotatedType::non_null(source_element),
            );
            // A cyclic element type must find this collection on the path.
            path.push(source.ty.ty);
            let body = self.map(element, AnnotatedType::non_null(target_element), path);
            path.pop();
            let lambda = Expr::lambda(parameter, body?.expr);

            let source_is_list = universe.type_def(source.ty.ty).name == "List";
            let target_is_list = universe.type_def(target.ty).name == "List";
            if self.ctx.prefer_convert_all() && source_is_list && target_is_list {
                // ConvertAll already yields a List, no materializer needed.
                Expr::call_method(source.expr.clone(), "ConvertAll", vec![lambda])
            } else {
                let projected = Expr::call_method(source.expr.clone(), "Select", vec![lambda]);
                materialize(universe, projected, target.ty)
            }
        } else {
            materialize(universe, source.expr.clone(), target.ty)
        };

        Ok(self.null_guarded(&source, chain, target))
    }
}

// Materializer chain matching the target collection's shape.
fn materialize(universe: &TypeUniverse, expr: Expr, target: TypeId) -> Expr {
    let def = universe.type_def(target);
    if def.kind == TypeKind::Array {
        return Expr::call_method(expr, "ToArray", Vec::new());
    }
    match def.name.as_str() {
        "ImmutableArray" => Expr::call_method(expr, "ToImmutableArray", Vec::new()),
        "ImmutableList" => Expr::call_method(expr, "ToImmutableList", Vec::new()),
        "ImmutableHashSet" => Expr::call_method(expr, "ToImmutableHashSet", Vec::new()),
        "ReadOnlyCollection" => Expr::call_method(
            Expr::call_method(expr, "ToList", Vec::new()),
            "AsReadOnly",
            Vec::new(),
        ),
        _ => Expr::call_method(expr, "ToList", Vec::new()),
    }
}
