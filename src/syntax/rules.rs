//! Backtracking rule engine.
//!
//! A rule is any function `FnOnce(&mut Parser) -> RuleResult<T>`. Its result
//! has three shapes:
//!
//! - `Ok(Some(value))`: matched; the cursor stays where the rule left it.
//! - `Ok(None)`: no match; recoverable, an alternative may still succeed.
//! - `Err(error)`: fatal; the production was committed and is malformed.
//!
//! The combinators in this module are the only place the cursor is rewound.

use log::trace;

use crate::ast::Span;
use crate::config::{ParseOptions, NESTING_DEPTH_CEILING};
use crate::diagnostics::{to_error_source, DiagnosticSink, ErrorContext, QuillError, Severity, SourceArc};
use crate::syntax::cursor::Cursor;

pub type RuleResult<T> = Result<Option<T>, QuillError>;

/// Parse state for one source text: the cursor, the sink diagnostics go to,
/// and the current nesting depth.
pub struct Parser<'src, 'sink> {
    pub(super) cursor: Cursor<'src>,
    sink: &'sink mut dyn DiagnosticSink,
    source: SourceArc,
    options: ParseOptions,
    depth: usize,
}

impl<'src, 'sink> Parser<'src, 'sink> {
    pub fn new(source: &'src str, sink: &'sink mut dyn DiagnosticSink) -> Self {
        Self::with_options(source, sink, ParseOptions::default())
    }

    pub fn with_options(
        source: &'src str,
        sink: &'sink mut dyn DiagnosticSink,
        options: ParseOptions,
    ) -> Self {
        Self {
            cursor: Cursor::new(source),
            sink,
            source: to_error_source(&options.source_name, source),
            options,
            depth: 0,
        }
    }

    /// Starts parsing at `offset` instead of the beginning of the source.
    pub fn starting_at(mut self, offset: usize) -> Self {
        self.seek(offset);
        self
    }

    pub fn seek(&mut self, offset: usize) {
        self.cursor = Cursor::at(self.cursor.source(), offset);
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn rest(&self) -> &'src str {
        self.cursor.rest()
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    // ------------------------------------------------------------------------
    // Combinators
    // ------------------------------------------------------------------------

    /// Runs `rule`, restoring the cursor unless it matched.
    pub fn try_rule<T>(&mut self, rule: impl FnOnce(&mut Self) -> RuleResult<T>) -> RuleResult<T> {
        let checkpoint = self.cursor.offset();
        let result = rule(self);
        if !matches!(result, Ok(Some(_))) {
            self.cursor.rewind(checkpoint);
        }
        result
    }

    /// Like [`try_rule`](Self::try_rule), but a no-match becomes a fatal
    /// diagnostic saying `description` was expected.
    pub fn expect<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> RuleResult<T>,
        description: &str,
    ) -> Result<T, QuillError> {
        match self.try_rule(rule)? {
            Some(value) => Ok(value),
            None => {
                let span = self.cursor.next_char_span();
                let found = match self.cursor.peek() {
                    Some('\n') | Some('\r') | None => "found the end of the line".to_string(),
                    Some(c) => format!("found '{}'", c),
                };
                let error = QuillError::Expected {
                    expected: description.to_string(),
                    ctx: self.context(span).help(found),
                };
                Err(self.report_fatal(error))
            }
        }
    }

    /// Tries each rule in order and returns the first match.
    pub fn one_of<T>(&mut self, rules: &[fn(&mut Self) -> RuleResult<T>]) -> RuleResult<T> {
        for rule in rules {
            if let Some(value) = self.try_rule(*rule)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Runs `rule` for its effect on the cursor and drops what it produced.
    pub fn exclude<T>(&mut self, rule: impl FnOnce(&mut Self) -> RuleResult<T>) -> RuleResult<()> {
        Ok(self.try_rule(rule)?.map(|_| ()))
    }

    /// Zero or more `item`s separated by `separator`. A separator that is not
    /// followed by an item is left unconsumed.
    pub fn interleave<T, S>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> RuleResult<T>,
        mut separator: impl FnMut(&mut Self) -> RuleResult<S>,
    ) -> Result<Vec<T>, QuillError> {
        let mut items = Vec::new();
        let Some(first) = self.try_rule(&mut item)? else {
            return Ok(items);
        };
        items.push(first);
        loop {
            let next = self.try_rule(|p| {
                if p.try_rule(&mut separator)?.is_none() {
                    return Ok(None);
                }
                p.try_rule(&mut item)
            })?;
            match next {
                Some(value) => items.push(value),
                None => return Ok(items),
            }
        }
    }

    /// Runs `rule` one nesting level deeper, failing once the configured
    /// depth is exceeded.
    pub(super) fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> RuleResult<T>) -> RuleResult<T> {
        let limit = self.options.max_nesting_depth.min(NESTING_DEPTH_CEILING);
        if self.depth >= limit {
            trace!("nesting limit {} reached at offset {}", limit, self.offset());
            let span = self.cursor.next_char_span();
            let error = QuillError::NestingTooDeep {
                limit,
                ctx: self
                    .context(span)
                    .help("split the expression up using intermediate variables"),
            };
            return Err(self.report_fatal(error));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    // ------------------------------------------------------------------------
    // Primitive helpers
    // ------------------------------------------------------------------------

    pub(super) fn literal(&mut self, text: &str) -> Option<Span> {
        let start = self.offset();
        self.cursor.match_literal(text)?;
        Some(self.cursor.span_from(start))
    }

    /// Whitespace is optional at most call sites.
    pub(super) fn skip_whitespace(&mut self) {
        self.cursor.whitespace();
    }

    /// A word that must not run on into an identifier (`return` but not `returned`).
    pub(super) fn keyword(&mut self, word: &str) -> Option<Span> {
        let start = self.offset();
        self.cursor.match_literal(word)?;
        if self.cursor.peek().is_some_and(super::cursor::is_identifier_char) {
            self.cursor.rewind(start);
            return None;
        }
        Some(self.cursor.span_from(start))
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    pub(super) fn context(&self, span: Span) -> ErrorContext {
        ErrorContext::with_source_and_span(self.source.clone(), span)
    }

    /// Delivers a fatal error to the sink and hands it back for propagation.
    pub(super) fn report_fatal(&mut self, error: QuillError) -> QuillError {
        let span = error.span().unwrap_or_else(|| self.cursor.next_char_span());
        self.sink.report(&error.to_string(), Severity::Error, span);
        error
    }

    pub(super) fn warn(&mut self, message: &str, span: Span) {
        self.sink.report(message, Severity::Warning, span);
    }
}
