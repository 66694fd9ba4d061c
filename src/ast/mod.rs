//! AST module for the Quill language
//!
//! This module provides the Abstract Syntax Tree types produced by the
//! expression and statement parsers, with source location tracking.
//! Nodes are built once, top-down, and never mutated afterwards.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::Serialize;
use std::fmt;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Represents a span in the source code.
///
/// All AST nodes carry a span covering exactly the input they consumed.
///
/// # Examples
///
/// ```rust
/// use quill::ast::Span;
/// let span = Span::new(2, 5);
/// assert_eq!(span.len(), 3);
/// assert_eq!(span.merge(Span::new(0, 1)), Span::new(0, 5));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Prefix operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    Negate,
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
        }
    }
}

/// Infix operators. The word forms `and`/`or` map onto `And`/`Or`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    And,
    Or,
    Equal,
    GreaterEqual,
    LessEqual,
    Less,
    Greater,
    NotEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// Canonical symbolic spelling, used by the pretty printer.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Equal => "==",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        }
    }
}

/// The expression AST.
///
/// # Examples
///
/// ```rust
/// use quill::ast::{Expr, Span};
/// let expr = Expr::Number(42, Span::new(0, 2));
/// assert_eq!(expr.span(), Span::new(0, 2));
/// assert_eq!(expr.pretty(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Number(i64, Span),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
    Call {
        name: String,
        args: Vec<Expr>,
        span: Span,
    },
    Variable(String, Span),
}

/// Statements that embed expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    VarAssign {
        name: String,
        value: Expr,
        is_new_declaration: bool,
        span: Span,
    },
    Return {
        value: Option<Expr>,
        span: Span,
    },
    /// A bare expression line, only produced by the script driver.
    Expression { expr: Expr, span: Span },
}

// ============================================================================
// ACCESSORS
// ============================================================================

impl Expr {
    /// Returns the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Number(_, span) | Expr::Variable(_, span) => *span,
            Expr::Unary { span, .. } | Expr::Binary { span, .. } | Expr::Call { span, .. } => {
                *span
            }
        }
    }

    /// The same expression, re-anchored to `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        match &mut self {
            Expr::Number(_, s) | Expr::Variable(_, s) => *s = span,
            Expr::Unary { span: s, .. } | Expr::Binary { span: s, .. } | Expr::Call { span: s, .. } => {
                *s = span
            }
        }
        self
    }

    /// Structural equality that ignores spans.
    pub fn same_shape(&self, other: &Expr) -> bool {
        match (self, other) {
            (Expr::Number(a, _), Expr::Number(b, _)) => a == b,
            (Expr::Variable(a, _), Expr::Variable(b, _)) => a == b,
            (
                Expr::Unary { op: a, operand: x, .. },
                Expr::Unary { op: b, operand: y, .. },
            ) => a == b && x.same_shape(y),
            (
                Expr::Binary { left: l1, op: o1, right: r1, .. },
                Expr::Binary { left: l2, op: o2, right: r2, .. },
            ) => o1 == o2 && l1.same_shape(l2) && r1.same_shape(r2),
            (
                Expr::Call { name: n1, args: a1, .. },
                Expr::Call { name: n2, args: a2, .. },
            ) => {
                n1 == n2
                    && a1.len() == a2.len()
                    && a1.iter().zip(a2).all(|(x, y)| x.same_shape(y))
            }
            _ => false,
        }
    }

    /// Renders the expression as fully parenthesised source text.
    ///
    /// Parsing the output again yields a tree of the same shape.
    pub fn pretty(&self) -> String {
        match self {
            Expr::Number(n, _) => n.to_string(),
            Expr::Variable(name, _) => name.clone(),
            Expr::Unary { op, operand, .. } => format!("{}({})", op.symbol(), operand.pretty()),
            Expr::Binary { left, op, right, .. } => {
                format!("({} {} {})", left.pretty(), op.symbol(), right.pretty())
            }
            Expr::Call { name, args, .. } => Self::pretty_call(name, args),
        }
    }

    fn pretty_call(name: &str, args: &[Expr]) -> String {
        let inner = args
            .iter()
            .map(|arg| arg.pretty())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", name, inner)
    }
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::VarAssign { span, .. } | Stmt::Return { span, .. } | Stmt::Expression { span, .. } => {
                *span
            }
        }
    }

    pub fn pretty(&self) -> String {
        match self {
            Stmt::VarAssign {
                name,
                value,
                is_new_declaration,
                ..
            } => {
                let keyword = if *is_new_declaration { "var " } else { "" };
                format!("{}{} = {}", keyword, name, value.pretty())
            }
            Stmt::Return { value: Some(value), .. } => format!("return {}", value.pretty()),
            Stmt::Return { value: None, .. } => "return".to_string(),
            Stmt::Expression { expr, .. } => expr.pretty(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}
