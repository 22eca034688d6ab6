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

//! Synthesis errors and the record of conversions left for the caller to generate.

use crate::types::AnnotatedType;

/// Error returned by synthesis entry points.
///
/// Unmappable content is never an error: the engine degrades to the unchanged
/// source or a commented placeholder so output stays well-formed. Errors are
/// reserved for the host boundary and for method signatures that fit no
/// implementable shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    /// The host cancelled the request; the whole synthesis aborts with no
    /// partial output.
    #[error("synthesis request cancelled by the host")]
    Cancelled,
    /// A host discovery query failed for a reason other than cancellation.
    #[error("host discovery query failed: {0}")]
    Host(String),
    /// The method signature fits none of the implementable shapes.
    #[error("method `{0}` has a shape that admits no mapping implementation")]
    UnsupportedMethodShape(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SynthesisError>;

/// A conversion the engine wanted but could not resolve inline.
///
/// Accumulated on the context and surfaced to the caller, who may react by
/// generating the converter (the wrap-in-generated-converter flag emits an
/// invocation of it) or by reporting the gap. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingConversion {
    /// Type the value is read as.
    pub from: AnnotatedType,
    /// Type the value must become.
    pub to: AnnotatedType,
}
