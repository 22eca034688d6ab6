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

//! The emitted-code expression and statement model.
//!
//! Synthesis composes these primitives and never raw text; the `Display`
//! renderer turns a tree into deterministic source text for the host to
//! splice. Type names inside nodes are pre-rendered display names.

use std::fmt;

/// Binary operators the synthesizer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
}

/// Literal constants.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Pre-rendered numeric literal with suffix (`0L`, `0.0`, `0f`, `0m`).
    Number(String),
    /// String literal; content is unescaped.
    Str(String),
    /// Character literal.
    Char(char),
}

/// Initializer block of an object construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Initializer {
    /// No initializer block.
    None,
    /// `{ Name = expr, ... }` member assignments.
    Members(Vec<(String, Expr)>),
    /// `{ expr, ... }` collection elements.
    Elements(Vec<Expr>),
}

/// A call or constructor argument, optionally named.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// Name for named-argument syntax; `None` renders positionally.
    pub name: Option<String>,
    /// Argument value.
    pub value: Expr,
}

impl Argument {
    /// Positional argument.
    pub fn positional(value: Expr) -> Self {
        Self { name: None, value }
    }

    /// Named argument `name: value`.
    pub fn named(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }
}

/// An expression tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Bare identifier (`source`, `this`).
    Ident(String),
    /// Literal constant.
    Literal(Literal),
    /// Member access `base.Name`.
    Member {
        /// Expression the member is read from.
        base: Box<Expr>,
        /// Member name.
        name: String,
    },
    /// Invocation `callee(args...)`.
    Invoke {
        /// Invoked expression, usually a member access.
        callee: Box<Expr>,
        /// Argument list.
        args: Vec<Argument>,
    },
    /// Object construction `new Type(args) { ... }`.
    New {
        /// Constructed type's display name.
        type_name: String,
        /// Constructor arguments.
        args: Vec<Argument>,
        /// Optional initializer block.
        initializer: Initializer,
    },
    /// Implicitly typed array `new[] { items }`.
    NewArray {
        /// Array elements; never empty when emitted by scaffolding.
        items: Vec<Expr>,
    },
    /// Cast `(Type)expr`.
    Cast {
        /// Target type's display name.
        type_name: String,
        /// Operand.
        expr: Box<Expr>,
    },
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Conditional `cond ? then : otherwise`.
    Conditional {
        /// Condition.
        cond: Box<Expr>,
        /// Value when the condition holds.
        then: Box<Expr>,
        /// Value otherwise.
        otherwise: Box<Expr>,
    },
    /// Single-parameter lambda `param => body`.
    Lambda {
        /// Parameter name.
        param: String,
        /// Body expression.
        body: Box<Expr>,
    },
    /// Throw expression `throw expr`.
    Throw(Box<Expr>),
    /// `default(Type)` placeholder.
    Default {
        /// Type's display name.
        type_name: String,
    },
    /// `typeof(Type)`.
    TypeOf {
        /// Type's display name.
        type_name: String,
    },
    /// `nameof(expr)`.
    NameOf(Box<Expr>),
    /// An expression carrying a trailing `/* ... */` comment.
    Commented {
        /// The underlying expression.
        expr: Box<Expr>,
        /// Comment text without delimiters.
        comment: String,
    },
}

impl Expr {
    /// Bare identifier.
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    /// `null` literal.
    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }

    /// Boolean literal.
    pub fn bool_literal(value: bool) -> Self {
        Expr::Literal(Literal::Bool(value))
    }

    /// Integer literal.
    pub fn int_literal(value: i64) -> Self {
        Expr::Literal(Literal::Int(value))
    }

    /// Pre-rendered numeric literal (`0.0`, `0f`, `0m`, `0L`).
    pub fn number_literal(text: impl Into<String>) -> Self {
        Expr::Literal(Literal::Number(text.into()))
    }

    /// String literal.
    pub fn string_literal(text: impl Into<String>) -> Self {
        Expr::Literal(Literal::Str(text.into()))
    }

    /// Character literal.
    pub fn char_literal(value: char) -> Self {
        Expr::Literal(Literal::Char(value))
    }

    /// Member access `self.name`.
    pub fn member(base: Expr, name: impl Into<String>) -> Self {
        Expr::Member {
            base: Box::new(base),
            name: name.into(),
        }
    }

    /// Invocation of an arbitrary callee.
    pub fn invoke(callee: Expr, args: Vec<Argument>) -> Self {
        Expr::Invoke {
            callee: Box::new(callee),
            args,
        }
    }

    /// Convenience for `base.name(args...)` with positional arguments.
    pub fn call_method(base: Expr, name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::invoke(
            Expr::member(base, name),
            args.into_iter().map(Argument::positional).collect(),
        )
    }

    /// Object construction.
    pub fn new_object(
        type_name: impl Into<String>,
        args: Vec<Argument>,
        initializer: Initializer,
    ) -> Self {
        Expr::New {
            type_name: type_name.into(),
            args,
            initializer,
        }
    }

    /// Implicitly typed array.
    pub fn new_array(items: Vec<Expr>) -> Self {
        Expr::NewArray { items }
    }

    /// Cast to a named type.
    pub fn cast(type_name: impl Into<String>, expr: Expr) -> Self {
        Expr::Cast {
            type_name: type_name.into(),
            expr: Box::new(expr),
        }
    }

    /// Binary operation.
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// `expr != null` null check.
    pub fn not_null(expr: Expr) -> Self {
        Expr::binary(BinaryOp::NotEqual, expr, Expr::null())
    }

    /// Conditional expression.
    pub fn conditional(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::Conditional {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    /// Single-parameter lambda.
    pub fn lambda(param: impl Into<String>, body: Expr) -> Self {
        Expr::Lambda {
            param: param.into(),
            body: Box::new(body),
        }
    }

    /// Throw expression.
    pub fn throw(expr: Expr) -> Self {
        Expr::Throw(Box::new(expr))
    }

    /// `default(Type)` placeholder.
    pub fn default_of(type_name: impl Into<String>) -> Self {
        Expr::Default {
            type_name: type_name.into(),
        }
    }

    /// `typeof(Type)`.
    pub fn type_of(type_name: impl Into<String>) -> Self {
        Expr::TypeOf {
            type_name: type_name.into(),
        }
    }

    /// `nameof(expr)`.
    pub fn name_of(expr: Expr) -> Self {
        Expr::NameOf(Box::new(expr))
    }

    /// Attaches a trailing comment, collapsing onto an already-commented node.
    pub fn commented(expr: Expr, comment: impl Into<String>) -> Self {
        Expr::Commented {
            expr: Box::new(expr),
            comment: comment.into(),
        }
    }

    /// The node with any trailing comment removed, for claimed-expression
    /// comparison.
    pub fn uncommented(&self) -> &Expr {
        match self {
            Expr::Commented { expr, .. } => expr.uncommented(),
            other => other,
        }
    }

    // Composite nodes that bind looser than a primary expression must be
    // parenthesized when used as a member-access base or invocation callee.
    fn needs_parens_as_primary(&self) -> bool {
        matches!(
            self,
            Expr::Binary { .. }
                | Expr::Conditional { .. }
                | Expr::Lambda { .. }
                | Expr::Cast { .. }
                | Expr::Throw(_)
                | Expr::Commented { .. }
        )
    }

    fn fmt_as_primary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.needs_parens_as_primary() {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Equal => write!(f, "=="),
            BinaryOp::NotEqual => write!(f, "!="),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Bool(value) => write!(f, "{value}"),
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Number(text) => write!(f, "{text}"),
            Literal::Str(text) => {
                let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "\"{escaped}\"")
            }
            Literal::Char(value) => match value {
                '\'' => write!(f, "'\\''"),
                '\\' => write!(f, "'\\\\'"),
                other => write!(f, "'{other}'"),
            },
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}: {}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

fn write_arguments(f: &mut fmt::Formatter<'_>, args: &[Argument]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => write!(f, "{name}"),
            Expr::Literal(literal) => write!(f, "{literal}"),
            Expr::Member { base, name } => {
                base.fmt_as_primary(f)?;
                write!(f, ".{name}")
            }
            Expr::Invoke { callee, args } => {
                callee.fmt_as_primary(f)?;
                write!(f, "(")?;
                write_arguments(f, args)?;
                write!(f, ")")
            }
            Expr::New {
                type_name,
                args,
                initializer,
            } => {
                write!(f, "new {type_name}")?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    write_arguments(f, args)?;
                    write!(f, ")")?;
                }
                match initializer {
                    Initializer::Members(members) if !members.is_empty() => {
                        write!(f, " {{ ")?;
                        for (i, (name, value)) in members.iter().enumerate() {
                            if i > 0 {
                                write!(f, ", ")?;
                            }
                            write!(f, "{name} = {value}")?;
                        }
                        write!(f, " }}")
                    }
                    Initializer::Elements(items) if !items.is_empty() => {
                        write!(f, " {{ ")?;
                        for (i, item) in items.iter().enumerate() {
                            if i > 0 {
                                write!(f, ", ")?;
                            }
                            write!(f, "{item}")?;
                        }
                        write!(f, " }}")
                    }
                    _ if args.is_empty() => write!(f, "()"),
                    _ => Ok(()),
                }
            }
            Expr::NewArray { items } => {
                write!(f, "new[] {{ ")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, " }}")
            }
            Expr::Cast { type_name, expr } => {
                write!(f, "({type_name})")?;
                expr.fmt_as_primary(f)
            }
            Expr::Binary { op, lhs, rhs } => {
                let wrap = |e: &Expr| {
                    matches!(e, Expr::Conditional { .. } | Expr::Lambda { .. } | Expr::Throw(_))
                };
                if wrap(lhs) {
                    write!(f, "({lhs})")?;
                } else {
                    write!(f, "{lhs}")?;
                }
                write!(f, " {op} ")?;
                if wrap(rhs) {
                    write!(f, "({rhs})")
                } else {
                    write!(f, "{rhs}")
                }
            }
            Expr::Conditional {
                cond,
                then,
                otherwise,
            } => write!(f, "{cond} ? {then} : {otherwise}"),
            Expr::Lambda { param, body } => write!(f, "{param} => {body}"),
            Expr::Throw(expr) => write!(f, "throw {expr}"),
            Expr::Default { type_name } => write!(f, "default({type_name})"),
            Expr::TypeOf { type_name } => write!(f, "typeof({type_name})"),
            Expr::NameOf(expr) => write!(f, "nameof({expr})"),
            Expr::Commented { expr, comment } => write!(f, "{expr} /* {comment} */"),
        }
    }
}

/// A statement the method implementors emit.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Assignment `target = value;`.
    Assign {
        /// Assigned place.
        target: Expr,
        /// Assigned value.
        value: Expr,
    },
    /// Local declaration `var name = value;`.
    Local {
        /// Local name.
        name: String,
        /// Initial value.
        value: Expr,
    },
    /// `return value;` or bare `return;`.
    Return(Option<Expr>),
    /// Bare expression statement.
    Expression(Expr),
}

impl Stmt {
    /// Assignment statement.
    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign { target, value }
    }

    /// Local declaration.
    pub fn local(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Local {
            name: name.into(),
            value,
        }
    }

    /// `return value;`.
    pub fn return_value(value: Expr) -> Self {
        Stmt::Return(Some(value))
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Assign { target, value } => write!(f, "{target} = {value};"),
            Stmt::Local { name, value } => write!(f, "var {name} = {value};"),
            Stmt::Return(Some(value)) => write!(f, "return {value};"),
            Stmt::Return(None) => write!(f, "return;"),
            Stmt::Expression(expr) => write!(f, "{expr};"),
        }
    }
}
