//! Line-oriented driver.
//!
//! Each non-blank line holds one statement: a variable declaration or
//! assignment, a return, or a bare expression. A fatal diagnostic abandons
//! the rest of its line and parsing resumes on the next one, so a single
//! pass reports every broken line. Statements are only handed back when no
//! line failed.

use log::debug;

use crate::ast::Stmt;
use crate::config::ParseOptions;
use crate::diagnostics::{DiagnosticSink, Diagnostics, QuillError};
use crate::syntax::rules::{Parser, RuleResult};

pub fn parse_script(source: &str, options: &ParseOptions) -> Result<Vec<Stmt>, QuillError> {
    parse_script_with(source, options, &mut Diagnostics::new())
}

pub fn parse_script_with(
    source: &str,
    options: &ParseOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<Stmt>, QuillError> {
    let mut parser = Parser::with_options(source, sink, options.clone());
    let mut statements = Vec::new();
    let mut errors = Vec::new();

    let mut line_start = 0;
    for line in source.split_inclusive('\n') {
        parser.seek(line_start);
        line_start += line.len();

        parser.skip_whitespace();
        if parser.at_line_end() {
            continue;
        }
        match parser.line_statement() {
            Ok(stmt) => statements.push(stmt),
            Err(error) => {
                debug!("resynchronising after error at offset {}", parser.offset());
                errors.push(error);
            }
        }
    }

    if errors.is_empty() {
        Ok(statements)
    } else {
        Err(QuillError::Aggregate { errors })
    }
}

impl<'src, 'sink> Parser<'src, 'sink> {
    fn line_statement(&mut self) -> Result<Stmt, QuillError> {
        let stmt = self.one_of(&[
            Self::variable_declaration_or_assignment,
            Self::return_statement,
            Self::expression_statement,
        ])?;
        self.finish_line(stmt, "a statement")
    }

    fn expression_statement(&mut self) -> RuleResult<Stmt> {
        let Some(expr) = self.expression()? else {
            return Ok(None);
        };
        let span = expr.span();
        Ok(Some(Stmt::Expression { expr, span }))
    }
}
