//! Defines the command-line arguments and subcommands for the Quill CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "quill",
    version,
    about = "Parse Quill narrative scripts and inspect their syntax trees."
)]
pub struct QuillArgs {
    /// YAML file with parser options.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a script and print its syntax tree.
    Ast {
        /// The path to the Quill script to parse.
        #[arg(required = true)]
        file: PathBuf,
        /// Print the tree as JSON instead of source form.
        #[arg(long)]
        json: bool,
    },
    /// Parse a script and report every diagnostic.
    Check {
        /// The path to the Quill script to check.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Parse a single expression given on the command line.
    Expr {
        /// The expression text.
        #[arg(required = true)]
        text: String,
        /// Print the tree as JSON instead of source form.
        #[arg(long)]
        json: bool,
    },
}
