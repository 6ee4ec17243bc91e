//! Diagnostic types shared by the checker.
//!
//! The checker accumulates `Diagnostic`s and keeps going after the first
//! one so a single source file is checked in one pass; the interpreter
//! surfaces exactly one `InterpreterError` (defined in
//! `cadence-interpreter`) instead of a `Diagnostic` list, since execution
//! aborts at the first runtime fault.

use crate::span::Span;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Error,
    Warning,
}

/// The semantic-error taxonomy surfaced by static checking.
///
/// Each variant is a checker-time error kind, not a type name, so that one
/// kind of mistake (say, moving a non-resource) always carries the same
/// code regardless of which types are involved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    NotDeclared,
    NotAssignable,
    InvalidAccess,
    ResourceLoss,
    UseAfterMove,
    InvalidMoveOfNonResource,
    InvalidInterfaceConformance,
    DuplicateDeclaration,
    InvalidOverride,
    ExternalMutation,
    InvalidArithmetic,
    InvalidCapabilityType,
    InvalidPathDomain,
    TypeMismatch,
    MissingInitializer,
    InvalidRedeclaration,
    UnresolvedImport,
}

impl DiagnosticCode {
    /// A short, stable identifier, e.g. for host-side filtering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::NotDeclared => "not-declared",
            DiagnosticCode::NotAssignable => "not-assignable",
            DiagnosticCode::InvalidAccess => "invalid-access",
            DiagnosticCode::ResourceLoss => "resource-loss",
            DiagnosticCode::UseAfterMove => "use-after-move",
            DiagnosticCode::InvalidMoveOfNonResource => "invalid-move-of-non-resource",
            DiagnosticCode::InvalidInterfaceConformance => "invalid-interface-conformance",
            DiagnosticCode::DuplicateDeclaration => "duplicate-declaration",
            DiagnosticCode::InvalidOverride => "invalid-override",
            DiagnosticCode::ExternalMutation => "external-mutation",
            DiagnosticCode::InvalidArithmetic => "invalid-arithmetic",
            DiagnosticCode::InvalidCapabilityType => "invalid-capability-type",
            DiagnosticCode::InvalidPathDomain => "invalid-path-domain",
            DiagnosticCode::TypeMismatch => "type-mismatch",
            DiagnosticCode::MissingInitializer => "missing-initializer",
            DiagnosticCode::InvalidRedeclaration => "invalid-redeclaration",
            DiagnosticCode::UnresolvedImport => "unresolved-import",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub category: DiagnosticCategory,
    pub span: Span,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<(Span, String)>,
}

impl Diagnostic {
    #[must_use]
    pub fn error(code: DiagnosticCode, span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            category: DiagnosticCategory::Error,
            span,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn warning(code: DiagnosticCode, span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            category: DiagnosticCategory::Warning,
            span,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_note(mut self, span: Span, message: impl Into<String>) -> Self {
        self.notes.push((span, message.into()));
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.category, DiagnosticCategory::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_diagnostic_carries_its_code_and_span() {
        let d = Diagnostic::error(DiagnosticCode::ResourceLoss, Span::new(3, 9), "r was not destroyed");
        assert!(d.is_error());
        assert_eq!(d.code.as_str(), "resource-loss");
        assert_eq!(d.span, Span::new(3, 9));
    }

    #[test]
    fn notes_accumulate_in_order() {
        let d = Diagnostic::error(DiagnosticCode::UseAfterMove, Span::dummy(), "use after move")
            .with_note(Span::new(0, 1), "moved here")
            .with_note(Span::new(5, 6), "used here");
        assert_eq!(d.notes.len(), 2);
        assert_eq!(d.notes[1].1, "used here");
    }
}
