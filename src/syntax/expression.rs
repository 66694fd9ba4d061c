//! Precedence-climbing expression parser.
//!
//! `parse_expression(floor)` parses one unary term and then keeps absorbing
//! infix operators whose precedence is strictly above `floor`. The right-hand
//! side of each operator is parsed with the operator's own precedence as its
//! floor, which makes equal-precedence chains left-associative and lets
//! tighter operators bind inside looser ones.

use log::trace;

use crate::ast::{Expr, Span, UnaryOp};
use crate::diagnostics::QuillError;
use crate::syntax::cursor::is_identifier_char;
use crate::syntax::operators::{match_infix, InfixOperator};
use crate::syntax::rules::{Parser, RuleResult};

impl<'src, 'sink> Parser<'src, 'sink> {
    /// Parses a complete expression.
    pub fn expression(&mut self) -> RuleResult<Expr> {
        self.expression_above(0)
    }

    /// Parses an expression whose infix operators all bind tighter than
    /// `minimum_precedence`.
    pub fn expression_above(&mut self, minimum_precedence: u8) -> RuleResult<Expr> {
        trace!(
            "expression_above({}) at offset {}",
            minimum_precedence,
            self.offset()
        );
        self.nested(|p| {
            p.try_rule(|p| {
                p.skip_whitespace();
                let Some(mut expr) = p.unary()? else {
                    return Ok(None);
                };
                p.skip_whitespace();

                while let Some(operator) = p.try_rule(|p| p.infix_operator(minimum_precedence))? {
                    p.skip_whitespace();
                    let description = format!("right side of '{}' expression", operator.token);
                    let right = p.expect(
                        |p| p.expression_above(operator.precedence),
                        &description,
                    )?;
                    let span = expr.span().merge(right.span());
                    expr = Expr::Binary {
                        left: Box::new(expr),
                        op: operator.op,
                        right: Box::new(right),
                        span,
                    };
                }

                p.skip_whitespace();
                Ok(Some(expr))
            })
        })
    }

    /// An infix operator that binds tighter than `minimum_precedence`.
    fn infix_operator(&mut self, minimum_precedence: u8) -> RuleResult<&'static InfixOperator> {
        let start = self.offset();
        let Some(operator) = match_infix(&mut self.cursor) else {
            return Ok(None);
        };
        if operator.precedence <= minimum_precedence {
            return Ok(None);
        }
        // `1and 2` is accepted, but the missing boundary is suspicious.
        let glued = self.cursor.source()[..start]
            .chars()
            .next_back()
            .is_some_and(is_identifier_char);
        if operator.requires_trailing_whitespace && glued {
            let span = Span::new(start, start + operator.token.len());
            self.warn(
                &format!(
                    "operator '{}' directly follows its left operand; add a space before it",
                    operator.token
                ),
                span,
            );
        }
        Ok(Some(operator))
    }

    fn unary(&mut self) -> RuleResult<Expr> {
        trace!("unary at offset {}", self.offset());
        self.try_rule(|p| {
            let start = p.offset();
            let op = p.unary_operator();
            let primary = p.one_of(&[
                Self::parenthesized,
                Self::number_literal,
                Self::function_call,
                Self::variable_reference,
            ])?;
            let operand = match (primary, op) {
                (Some(expr), _) => expr,
                // Chained prefix operators: `--x`, `!!x`.
                (None, Some(_)) => match p.nested(Self::unary)? {
                    Some(expr) => expr,
                    None => return Ok(None),
                },
                (None, None) => return Ok(None),
            };
            Ok(Some(match op {
                Some(op) => Expr::Unary {
                    op,
                    operand: Box::new(operand),
                    span: p.cursor.span_from(start),
                },
                None => operand,
            }))
        })
    }

    fn unary_operator(&mut self) -> Option<UnaryOp> {
        if self.literal("-").is_some() {
            Some(UnaryOp::Negate)
        } else if self.literal("!").is_some() {
            Some(UnaryOp::Not)
        } else {
            None
        }
    }

    // ------------------------------------------------------------------------
    // Primaries
    // ------------------------------------------------------------------------

    fn parenthesized(&mut self) -> RuleResult<Expr> {
        let start = self.offset();
        if self.literal("(").is_none() {
            return Ok(None);
        }
        let Some(inner) = self.expression()? else {
            return Ok(None);
        };
        self.expect(
            |p| Ok(p.literal(")")),
            "closing ')' for parenthesised expression",
        )?;
        Ok(Some(inner.with_span(self.cursor.span_from(start))))
    }

    fn number_literal(&mut self) -> RuleResult<Expr> {
        let start = self.offset();
        let Some(digits) = self.cursor.integer_digits() else {
            return Ok(None);
        };
        let span = self.cursor.span_from(start);
        match digits.parse::<i64>() {
            Ok(value) => Ok(Some(Expr::Number(value, span))),
            Err(_) => {
                let error = QuillError::InvalidLiteral {
                    literal: "integer".to_string(),
                    ctx: self
                        .context(span)
                        .help(format!("integer literals can be at most {}", i64::MAX)),
                };
                Err(self.report_fatal(error))
            }
        }
    }

    fn function_call(&mut self) -> RuleResult<Expr> {
        let start = self.offset();
        let Some(name) = self.cursor.identifier() else {
            return Ok(None);
        };
        if self.literal("(").is_none() {
            return Ok(None);
        }
        trace!("function call '{}' at offset {}", name, start);
        let args = self.interleave(Self::expression, |p| p.exclude(|p| Ok(p.literal(","))))?;
        self.skip_whitespace();
        self.expect(|p| Ok(p.literal(")")), "closing ')' for function call")?;
        Ok(Some(Expr::Call {
            name: name.to_string(),
            args,
            span: self.cursor.span_from(start),
        }))
    }

    fn variable_reference(&mut self) -> RuleResult<Expr> {
        let start = self.offset();
        let Some(name) = self.cursor.identifier() else {
            return Ok(None);
        };
        Ok(Some(Expr::Variable(
            name.to_string(),
            self.cursor.span_from(start),
        )))
    }
}
