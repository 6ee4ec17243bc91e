//! Command-line argument shape.
//!
//! There is no lexer/parser in this workspace, so the CLI's input is a
//! program already encoded as JSON (see `cadence_ast::Program`'s `serde`
//! derive) rather than `.cdc` source text.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cadence", about = "Check and run a cadence program encoded as JSON")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Statically check a program, printing any diagnostics.
    Check {
        /// Path to a JSON-encoded `cadence_ast::Program`.
        path: PathBuf,
    },
    /// Check a program and, if it has no errors, run its `main()`.
    Run {
        /// Path to a JSON-encoded `cadence_ast::Program`.
        path: PathBuf,
    },
}
