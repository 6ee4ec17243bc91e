//! Checker-specific diagnostic constructors layered on
//! `cadence_common::Diagnostic`.

use cadence_common::{Diagnostic, DiagnosticCode, Span};

pub fn not_declared(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::NotDeclared, span, format!("`{name}` is not declared in this scope"))
}

pub fn duplicate_declaration(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::DuplicateDeclaration, span, format!("`{name}` is already declared in this scope"))
}

pub fn type_mismatch(span: Span, expected: &str, found: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::TypeMismatch, span, format!("expected `{expected}`, found `{found}`"))
}

pub fn not_assignable(span: Span, source: &str, target: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::NotAssignable, span, format!("`{source}` is not assignable to `{target}`"))
}

pub fn use_after_move(span: Span, name: &str, moved_at: Span) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::UseAfterMove, span, format!("`{name}` was already moved")).with_note(moved_at, "moved here")
}

pub fn use_after_destroy(span: Span, name: &str, destroyed_at: Span) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::UseAfterMove, span, format!("`{name}` was already destroyed")).with_note(destroyed_at, "destroyed here")
}

pub fn resource_loss(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::ResourceLoss, span, format!("resource `{name}` is neither moved nor destroyed before the end of this scope"))
}

pub fn invalid_move_of_non_resource(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::InvalidMoveOfNonResource, span, format!("`{name}` is not a resource and cannot be moved with `<-`"))
}

pub fn resource_join_mismatch(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(
        DiagnosticCode::ResourceLoss,
        span,
        format!("`{name}` does not reach the same ownership state on every branch"),
    )
}

pub fn invalid_access(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::InvalidAccess, span, format!("`{name}` is not accessible from this context"))
}

pub fn external_mutation(span: Span, field: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::ExternalMutation, span, format!("cannot mutate `{field}` from outside its declared access scope"))
}

pub fn invalid_interface_conformance(span: Span, composite: &str, iface: &str, member: &str) -> Diagnostic {
    Diagnostic::error(
        DiagnosticCode::InvalidInterfaceConformance,
        span,
        format!("`{composite}` does not satisfy requirement `{member}` of interface `{iface}`"),
    )
}

pub fn invalid_override(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::InvalidOverride, span, format!("`{name}` overrides its interface default with an incompatible signature"))
}

pub fn missing_initializer(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::MissingInitializer, span, format!("`{name}` has fields but declares no initializer"))
}

pub fn invalid_redeclaration(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::InvalidRedeclaration, span, format!("`{name}` redeclares an existing top-level name"))
}

pub fn unresolved_import(span: Span, name: &str, location: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::UnresolvedImport, span, format!("cannot resolve `{name}` from `{location}`"))
}

pub fn invalid_arithmetic(span: Span, message: impl Into<String>) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::InvalidArithmetic, span, message.into())
}

pub fn invalid_path_domain(span: Span, expected: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::InvalidPathDomain, span, format!("expected a path in the `{expected}` domain"))
}

pub fn invalid_capability_type(span: Span, message: impl Into<String>) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::InvalidCapabilityType, span, message.into())
}
