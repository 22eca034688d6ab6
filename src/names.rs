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

//! Textual heuristics shared by the source finders and the collection mapper.

/// Collection-suffix synonyms stripped before pluralization rules apply.
const COLLECTION_SUFFIXES: [&str; 5] = ["Collection", "Dictionary", "Array", "List", "Set"];

/// Returns the trailing identifier of an expression's text.
///
/// `"user.Address"` yields `"Address"`, `"order.GetItems()"` yields
/// `"GetItems"`, a bare identifier yields itself.
pub(crate) fn last_identifier(text: &str) -> &str {
    let trimmed = text.trim_end_matches(|c: char| !c.is_ascii_alphanumeric() && c != '_');
    let start = trimmed
        .rfind(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .map(|i| i + 1)
        .unwrap_or(0);
    &trimmed[start..]
}

/// Strips `prefix` from the start of `text`, ignoring ASCII case.
pub(crate) fn strip_prefix_ignore_case<'t>(text: &'t str, prefix: &str) -> Option<&'t str> {
    if prefix.len() <= text.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

/// Whether `text` ends with `suffix`, ignoring ASCII case.
pub(crate) fn ends_with_ignore_case(text: &str, suffix: &str) -> bool {
    suffix.len() <= text.len()
        && text.is_char_boundary(text.len() - suffix.len())
        && text[text.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Acronym expansion: if `accessor` (all-lowercase) prefixes the acronym formed
/// by `target`'s capital letters, returns the target remainder starting at the
/// first unmatched capital.
///
/// `("UserOrderCount", "uo")` yields `Some("Count")`. Returns `None` when the
/// accessor is not all-lowercase, already names the target, or the acronym has
/// no remainder to retry on.
pub(crate) fn acronym_remainder<'t>(target: &'t str, accessor: &str) -> Option<&'t str> {
    if accessor.is_empty() || !accessor.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    if accessor.eq_ignore_ascii_case(target) {
        return None;
    }
    let capitals: Vec<(usize, u8)> = target
        .bytes()
        .enumerate()
        .filter(|(_, b)| b.is_ascii_uppercase())
        .collect();
    // A strict prefix is required so a non-empty remainder exists.
    if capitals.len() <= accessor.len() {
        return None;
    }
    let matches = accessor
        .bytes()
        .zip(capitals.iter())
        .all(|(a, (_, c))| a == c.to_ascii_lowercase());
    if !matches {
        return None;
    }
    Some(&target[capitals[accessor.len()].0..])
}

/// Singularizes a collection-ish name: collection-suffix synonyms are stripped
/// first, then pluralization rules (`categories` to `category`, `addresses` to
/// `address`, `items` to `item`). Names with no applicable rule are unchanged.
pub(crate) fn singularize(name: &str) -> String {
    for suffix in COLLECTION_SUFFIXES {
        if name.len() > suffix.len() {
            if let Some(stem) = name.strip_suffix(suffix) {
                return stem.to_string();
            }
        }
    }
    if let Some(stem) = name.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    for tail in ["ches", "shes", "ses", "xes", "zes"] {
        if name.len() > tail.len() && name.ends_with(tail) {
            return name[..name.len() - 2].to_string();
        }
    }
    if name.len() > 1
        && name.ends_with('s')
        && !name.ends_with("ss")
        && !name.ends_with("us")
        && !name.ends_with("is")
    {
        return name[..name.len() - 1].to_string();
    }
    name.to_string()
}

/// Derives a lambda parameter name from the source collection's own text:
/// trailing identifier, lower-cased first letter, singularized. If the result
/// still equals the source text it would shadow, an `Item` filler is appended.
pub(crate) fn lambda_parameter_name(source_text: &str) -> String {
    let base = last_identifier(source_text);
    let base = if base.is_empty() { "item" } else { base };
    let mut chars = base.chars();
    let lowered = match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::from("item"),
    };
    let singular = singularize(&lowered);
    if singular == source_text {
        format!("{singular}Item")
    } else {
        singular
    }
}

/// Reduces a display name to its identifier characters and capitalizes it,
/// for synthesized converter names: `List<Order>` becomes `ListOrder`,
/// `int?` becomes `Int`.
pub(crate) fn identifier_fragment(display: &str) -> String {
    let mut fragment: String = display
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if let Some(first) = fragment.get(..1) {
        let upper = first.to_ascii_uppercase();
        fragment.replace_range(..1, &upper);
    }
    fragment
}
