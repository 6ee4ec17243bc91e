//! Common types and utilities shared by the cadence checker and interpreter.
//!
//! - String interning (`Atom`, `Interner`)
//! - Source spans (`Span`, `Spanned`)
//! - Line/column positions for diagnostics (`Position`, `Range`, `Location`, `LineMap`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, `DiagnosticCode`)
//! - Recursion/metering limits
//! - Checker/interpreter configuration

pub mod interner;
pub use interner::{Atom, Interner};

pub mod span;
pub use span::{Span, Spanned};

pub mod position;
pub use position::{Location, Position, Range, LineMap};

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticCode};

pub mod limits;

pub mod config;
pub use config::{CheckerConfig, InterpreterConfig};
