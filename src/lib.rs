pub use crate::diagnostics::{DiagnosticSink, Diagnostics, QuillError, Severity};

pub mod ast;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod syntax;
