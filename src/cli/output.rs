//! Handles all user-facing output for the CLI.
//!
//! Errors are rendered through `miette`; warnings and notes collected by the
//! parser's sink are printed here, coloured when stderr is a terminal.

use std::io::Write;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::diagnostics::{Diagnostics, QuillError, Severity};

fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stderr) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Prints every non-error entry of `diagnostics` to stderr. Errors are
/// reported separately with full source snippets.
pub fn print_notices(diagnostics: &Diagnostics, source_name: &str) {
    let mut stderr = StandardStream::stderr(color_choice());
    for entry in diagnostics
        .entries()
        .iter()
        .filter(|d| d.severity != Severity::Error)
    {
        let color = match entry.severity {
            Severity::Warning => Color::Yellow,
            _ => Color::Cyan,
        };
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(stderr, "{}", entry.severity);
        let _ = stderr.reset();
        let _ = writeln!(
            stderr,
            ": {} [{}:{}..{}]",
            entry.message, source_name, entry.span.start, entry.span.end
        );
    }
}

/// Renders an error (and any errors it aggregates) with `miette`.
pub fn print_error(error: QuillError) {
    for error in error.into_errors() {
        eprintln!("{:?}", miette::Report::new(error));
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), QuillError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| QuillError::Config {
        message: "could not serialise syntax tree".to_string(),
        source: Some(Box::new(e)),
    })?;
    println!("{}", text);
    Ok(())
}
