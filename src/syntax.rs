//! Syntax module for the Quill language
//!
//! Turns source text into [`Expr`] and [`Stmt`] nodes. The building blocks are
//! layered bottom-up:
//!
//! - [`cursor`]: character-level primitives over the source buffer.
//! - [`rules`]: the backtracking rule engine and the [`Parser`] state.
//! - [`operators`]: the ordered infix operator table.
//! - `expression` / `statement`: the grammar, as methods on [`Parser`].
//! - [`script`]: a line-oriented driver that collects every diagnostic.

use log::debug;

use crate::ast::{Expr, Span, Stmt};
use crate::config::ParseOptions;
use crate::diagnostics::{DiagnosticSink, Diagnostics, QuillError};

pub mod cursor;
mod expression;
pub mod operators;
pub mod rules;
pub mod script;
mod statement;

pub use rules::{Parser, RuleResult};
pub use script::{parse_script, parse_script_with};

/// Parses `source` as a single expression. The whole input must be used.
///
/// # Example
/// ```rust
/// use quill::syntax::parse_expression;
/// let expr = parse_expression("1 + 2 * 3").unwrap();
/// assert_eq!(expr.pretty(), "(1 + (2 * 3))");
/// ```
pub fn parse_expression(source: &str) -> Result<Expr, QuillError> {
    parse_expression_with(source, &ParseOptions::default(), &mut Diagnostics::new())
}

pub fn parse_expression_with(
    source: &str,
    options: &ParseOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<Expr, QuillError> {
    let mut parser = Parser::with_options(source, sink, options.clone());
    let expr = parser.expression()?;
    parser.finish(expr, "an expression")
}

/// Parses `source` as a variable declaration/assignment or a return
/// statement. The whole input must be used.
pub fn parse_statement(source: &str) -> Result<Stmt, QuillError> {
    parse_statement_with(source, &ParseOptions::default(), &mut Diagnostics::new())
}

pub fn parse_statement_with(
    source: &str,
    options: &ParseOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<Stmt, QuillError> {
    let mut parser = Parser::with_options(source, sink, options.clone());
    let stmt = parser.one_of(&[
        Parser::variable_declaration_or_assignment,
        Parser::return_statement,
    ])?;
    parser.finish(stmt, "a variable assignment or return statement")
}

impl<'src, 'sink> Parser<'src, 'sink> {
    /// Turns a top-level rule result into a value, requiring that only
    /// whitespace (newlines included) follows it.
    pub(crate) fn finish<T>(&mut self, parsed: Option<T>, what: &str) -> Result<T, QuillError> {
        let value = self.matched(parsed, what)?;
        self.cursor.skip_blank();
        if !self.is_at_end() {
            let start = self.offset();
            let len = self.rest().trim_end().len();
            return Err(self.trailing_input(Span::new(start, start + len), what));
        }
        Ok(value)
    }

    /// Like [`finish`](Self::finish), but only the rest of the current line
    /// has to be empty.
    pub(crate) fn finish_line<T>(&mut self, parsed: Option<T>, what: &str) -> Result<T, QuillError> {
        let value = self.matched(parsed, what)?;
        self.skip_whitespace();
        if !self.at_line_end() {
            let start = self.offset();
            let len = self.rest().find(['\r', '\n']).unwrap_or(self.rest().len());
            return Err(self.trailing_input(Span::new(start, start + len), what));
        }
        Ok(value)
    }

    pub(crate) fn at_line_end(&self) -> bool {
        let rest = self.rest();
        rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n")
    }

    fn matched<T>(&mut self, parsed: Option<T>, what: &str) -> Result<T, QuillError> {
        match parsed {
            Some(value) => Ok(value),
            None => {
                debug!("nothing matched at offset {}", self.offset());
                let span = self.cursor.next_char_span();
                let error = QuillError::Parse {
                    message: format!("expected {}", what),
                    ctx: self.context(span),
                };
                Err(self.report_fatal(error))
            }
        }
    }

    fn trailing_input(&mut self, span: Span, what: &str) -> QuillError {
        let error = QuillError::Parse {
            message: "unexpected trailing input".to_string(),
            ctx: self
                .context(span)
                .help(format!("{} ended before this point", what)),
        };
        self.report_fatal(error)
    }
}
