//! The Quill Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::fs;
use std::path::Path;
use std::process;

use clap::Parser;

use crate::cli::args::{Command, QuillArgs};
use crate::config::ParseOptions;
use crate::diagnostics::{Diagnostics, QuillError};
use crate::syntax::{parse_expression_with, parse_script_with};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = QuillArgs::parse();

    let result = load_options(args.config.as_deref()).and_then(|options| match args.command {
        Command::Ast { file, json } => handle_ast(&file, json, options),
        Command::Check { file } => handle_check(&file, options),
        Command::Expr { text, json } => handle_expr(&text, json, options),
    });

    if let Err(e) = result {
        output::print_error(e);
        process::exit(1);
    }
}

fn load_options(path: Option<&Path>) -> Result<ParseOptions, QuillError> {
    match path {
        Some(path) => ParseOptions::from_yaml_file(path),
        None => Ok(ParseOptions::default()),
    }
}

fn read_source(path: &Path, options: ParseOptions) -> Result<(String, ParseOptions), QuillError> {
    let source = fs::read_to_string(path).map_err(|source| QuillError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok((source, options.with_source_name(path.display().to_string())))
}

/// Handles the `ast` subcommand.
fn handle_ast(path: &Path, json: bool, options: ParseOptions) -> Result<(), QuillError> {
    let (source, options) = read_source(path, options)?;
    let mut diagnostics = Diagnostics::new();
    let parsed = parse_script_with(&source, &options, &mut diagnostics);
    output::print_notices(&diagnostics, &options.source_name);
    let statements = parsed?;

    if json {
        return output::print_json(&statements);
    }
    for stmt in &statements {
        println!("{}", stmt.pretty());
    }
    Ok(())
}

/// Handles the `check` subcommand.
fn handle_check(path: &Path, options: ParseOptions) -> Result<(), QuillError> {
    let (source, options) = read_source(path, options)?;
    let mut diagnostics = Diagnostics::new();
    let parsed = parse_script_with(&source, &options, &mut diagnostics);
    output::print_notices(&diagnostics, &options.source_name);
    let statements = parsed?;
    println!(
        "{}: {} statement(s), no errors",
        options.source_name,
        statements.len()
    );
    Ok(())
}

/// Handles the `expr` subcommand.
fn handle_expr(text: &str, json: bool, options: ParseOptions) -> Result<(), QuillError> {
    let options = options.with_source_name("<expr>");
    let mut diagnostics = Diagnostics::new();
    let parsed = parse_expression_with(text, &options, &mut diagnostics);
    output::print_notices(&diagnostics, &options.source_name);
    let expr = parsed?;

    if json {
        return output::print_json(&expr);
    }
    println!("{}", expr.pretty());
    Ok(())
}
