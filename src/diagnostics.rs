//! Unified, `miette`-based diagnostics for the Quill parser.
//!
//! Two things live here:
//!
//! - [`QuillError`], the fatal error type. Every failure that surfaces to an
//!   author is one of its variants, and each carries an [`ErrorContext`] with
//!   the named source and span so `miette` can render a labelled snippet.
//! - The diagnostic sink interface ([`DiagnosticSink`], [`Severity`]) through
//!   which the parser reports problems as they happen. Fatal diagnostics are
//!   delivered to the sink *and* returned upward; warnings only reach the sink.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::ast::Span;

// Type aliases for clarity and brevity
pub type SourceArc = Arc<NamedSource<String>>;

/// Converts a source string into a named source for use in error contexts.
pub fn to_error_source(name: impl AsRef<str>, source: impl AsRef<str>) -> SourceArc {
    Arc::new(NamedSource::new(name.as_ref(), source.as_ref().to_string()))
}

// ============================================================================
// ERROR CONTEXT
// ============================================================================

/// Minimal, composable error context for diagnostics.
#[derive(Debug, Default, Clone)]
pub struct ErrorContext {
    /// The source the error points into (if any).
    pub source: Option<SourceArc>,
    /// The primary span for this error (if any).
    pub span: Option<Span>,
    /// An optional help message.
    pub help: Option<String>,
}

impl ErrorContext {
    /// Creates a context with both source and span.
    pub fn with_source_and_span(source: SourceArc, span: Span) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: None,
        }
    }

    /// Attaches a help line.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

// ============================================================================
// FATAL ERRORS
// ============================================================================

/// Every way a Quill parse can fail fatally.
#[derive(Debug, Error)]
pub enum QuillError {
    /// A production was committed but a required continuation is missing.
    #[error("Parse error: expected {expected}")]
    Expected { expected: String, ctx: ErrorContext },

    #[error("Parse error: invalid {literal} literal")]
    InvalidLiteral { literal: String, ctx: ErrorContext },

    #[error("Parse error: expression too deeply nested (limit is {limit})")]
    NestingTooDeep { limit: usize, ctx: ErrorContext },

    /// Driver-level failures: nothing parsed, or input left over.
    #[error("Parse error: {message}")]
    Parse { message: String, ctx: ErrorContext },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    #[error("I/O error: could not read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// All fatal diagnostics collected while parsing a script.
    #[error("{} parse error(s)", .errors.len())]
    Aggregate { errors: Vec<QuillError> },
}

impl QuillError {
    fn ctx(&self) -> Option<&ErrorContext> {
        match self {
            QuillError::Expected { ctx, .. }
            | QuillError::InvalidLiteral { ctx, .. }
            | QuillError::NestingTooDeep { ctx, .. }
            | QuillError::Parse { ctx, .. } => Some(ctx),
            QuillError::Config { .. } | QuillError::Io { .. } | QuillError::Aggregate { .. } => {
                None
            }
        }
    }

    /// The primary span, if the error points into source text.
    pub fn span(&self) -> Option<Span> {
        self.ctx().and_then(|ctx| ctx.span)
    }

    /// Stable error code, independent of message wording.
    pub fn error_code(&self) -> &'static str {
        match self {
            QuillError::Expected { .. } => "quill::parse::expected",
            QuillError::InvalidLiteral { .. } => "quill::parse::invalid_literal",
            QuillError::NestingTooDeep { .. } => "quill::parse::nesting",
            QuillError::Parse { .. } => "quill::parse",
            QuillError::Config { .. } => "quill::config",
            QuillError::Io { .. } => "quill::io",
            QuillError::Aggregate { .. } => "quill::parse::aggregate",
        }
    }

    /// Flattens an aggregate into its members; any other error yields itself.
    pub fn into_errors(self) -> Vec<QuillError> {
        match self {
            QuillError::Aggregate { errors } => errors,
            other => vec![other],
        }
    }

    fn label(&self) -> String {
        match self {
            QuillError::Expected { expected, .. } => format!("expected {}", expected),
            QuillError::InvalidLiteral { literal, .. } => format!("invalid {} literal", literal),
            QuillError::NestingTooDeep { .. } => "nested too deeply".to_string(),
            other => other.to_string(),
        }
    }
}

impl Diagnostic for QuillError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(self.error_code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.ctx()
            .and_then(|ctx| ctx.help.as_ref())
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.ctx()
            .and_then(|ctx| ctx.source.as_ref())
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.ctx()?.span?;
        // Zero-width spans (end of input) still need a visible caret.
        let len = span.len().max(1);
        let label = LabeledSpan::new(Some(self.label()), span.start, len);
        Some(Box::new(std::iter::once(label)))
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        match self {
            QuillError::Aggregate { errors } => Some(Box::new(
                errors.iter().map(|e| e as &dyn Diagnostic),
            )),
            _ => None,
        }
    }
}

// ============================================================================
// DIAGNOSTIC SINK
// ============================================================================

/// How serious a reported diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    /// Notes an author left for themselves; never blocks compilation.
    Authorial,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Authorial => "note",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receives diagnostics as the parser produces them.
pub trait DiagnosticSink {
    fn report(&mut self, message: &str, severity: Severity, span: Span);
}

impl<F> DiagnosticSink for F
where
    F: FnMut(&str, Severity, Span),
{
    fn report(&mut self, message: &str, severity: Severity, span: Span) {
        self(message, severity, span)
    }
}

/// A single diagnostic as recorded by [`Diagnostics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reported {
    pub message: String,
    pub severity: Severity,
    pub span: Span,
}

/// A sink that simply keeps everything it is given, in order.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Reported>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Reported] {
        &self.entries
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|d| d.severity == severity).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, message: &str, severity: Severity, span: Span) {
        self.entries.push(Reported {
            message: message.to_string(),
            severity,
            span,
        });
    }
}
