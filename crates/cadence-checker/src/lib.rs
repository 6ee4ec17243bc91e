//! Static checker.
//!
//! Organized into one module per concern:
//! - `context` - `CheckerContext`, the mutable state threaded through a run
//! - `resolver` - lexical scopes and name resolution
//! - `resources` - linear resource ownership tracking
//! - `access` - private/contract/account/public visibility rules
//! - `types` - type-expression resolution against the interner
//! - `expr` - expression elaboration
//! - `statements` - statement checking, including the `if` resource join rule
//! - `declarations` - composites, interfaces, functions, transactions
//! - `conformance` - interface conformance checking
//! - `conditions` - pre/post condition checking and `before()` snapshotting
//! - `imports` - host-mediated import resolution
//! - `elaboration` - the span-keyed side table of checker output
//! - `diagnostics` - diagnostic constructors

pub mod access;
pub mod conditions;
pub mod conformance;
pub mod context;
pub mod declarations;
pub mod diagnostics;
pub mod elaboration;
pub mod expr;
pub mod imports;
pub mod resolver;
pub mod resources;
pub mod statements;
pub mod types;

pub use context::{CheckerContext, EnclosingScope};
pub use elaboration::{Elaboration, ResolvedTarget};
pub use imports::{ImportResolver, ImportedName, TableImportResolver};

use cadence_ast::Program;
use cadence_common::{CheckerConfig, Diagnostic};
use cadence_types::{NominalRegistry, TypeInterner};

/// Output of a single checker run: every expression/declaration's
/// elaborated type and resolution, plus whatever diagnostics were raised.
pub struct CheckResult {
    pub elaboration: Elaboration,
    pub diagnostics: Vec<Diagnostic>,
}

/// Checks `program`, minting types into `types` and registering composites
/// and interfaces into `registry`. Both outlive the returned result since
/// the interpreter re-resolves names against them at run time.
#[must_use]
pub fn check_program(config: CheckerConfig, types: &TypeInterner, registry: &mut NominalRegistry, program: &Program) -> CheckResult {
    check_program_with_imports(config, types, registry, program, None)
}

/// As [`check_program`], but resolving `import` declarations against
/// `resolver` instead of treating every import as unresolved.
#[must_use]
pub fn check_program_with_imports(
    config: CheckerConfig,
    types: &TypeInterner,
    registry: &mut NominalRegistry,
    program: &Program,
    resolver: Option<&dyn ImportResolver>,
) -> CheckResult {
    let mut ctx = CheckerContext::new(config, types, registry);
    ctx.imports = resolver;
    declarations::check_program(&mut ctx, program);
    CheckResult { elaboration: ctx.elaboration, diagnostics: ctx.diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_ast::{Access, CompositeDecl, CompositeKind, Declaration, FieldDecl, Program};
    use cadence_common::{DiagnosticCode, Span};

    fn span() -> Span {
        Span::new(0, 0)
    }

    #[test]
    fn a_resource_with_no_initializer_is_flagged_end_to_end() {
        let types = TypeInterner::new();
        let mut registry = NominalRegistry::new();
        let program = Program {
            declarations: vec![Declaration::Composite(CompositeDecl {
                name: "Vault".to_string(),
                kind: CompositeKind::Resource,
                access: Access::Public,
                conformances: Vec::new(),
                fields: vec![FieldDecl {
                    name: "balance".to_string(),
                    access: Access::Public,
                    is_var: true,
                    ty: cadence_ast::TypeExpr::nominal("Int"),
                    span: span(),
                }],
                initializer: None,
                destructor: None,
                functions: Vec::new(),
                nested: Vec::new(),
                span: span(),
            })],
        };

        let result = check_program(CheckerConfig::default(), &types, &mut registry, &program);
        assert!(result.diagnostics.iter().any(|d| d.code == DiagnosticCode::MissingInitializer));
    }

    #[test]
    fn an_empty_program_checks_clean() {
        let types = TypeInterner::new();
        let mut registry = NominalRegistry::new();
        let program = Program { declarations: Vec::new() };
        let result = check_program(CheckerConfig::default(), &types, &mut registry, &program);
        assert!(result.diagnostics.is_empty());
    }
}
