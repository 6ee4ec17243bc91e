//! Human-readable diagnostic printing.
//!
//! No source text is available to the CLI (there is no lexer/parser in
//! this workspace), so diagnostics are reported against raw byte spans
//! rather than line/column positions.

use cadence_common::{Diagnostic, DiagnosticCategory};
use colored::Colorize;

pub fn print_diagnostic(d: &Diagnostic) {
    let (label, code) = match d.category {
        DiagnosticCategory::Error => ("error".red().bold(), d.code.as_str().red()),
        DiagnosticCategory::Warning => ("warning".yellow().bold(), d.code.as_str().yellow()),
    };
    println!("{label}[{code}]: {} ({}..{})", d.message, d.span.start, d.span.end);
    for (span, note) in &d.notes {
        println!("  {} {note} ({}..{})", "note:".dimmed(), span.start, span.end);
    }
}

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        print_diagnostic(d);
    }
}
