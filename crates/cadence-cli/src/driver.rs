//! The check-then-run pipeline.

use std::path::Path;

use anyhow::{Context, Result};
use cadence_ast::Program;
use cadence_common::{CheckerConfig, InterpreterConfig};
use cadence_interpreter::{InMemoryHostEnvironment, InMemoryStorage};
use cadence_types::{NominalRegistry, TypeInterner};

use crate::reporter::print_diagnostics;

pub fn load_program(path: &Path) -> Result<Program> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {} as a program", path.display()))
}

/// Checks `program`, printing any diagnostics. Returns `true` if checking
/// raised no errors (warnings alone don't fail the run).
pub fn check(program: &Program) -> bool {
    let _span = tracing::info_span!("check", declarations = program.declarations.len()).entered();
    let types = TypeInterner::new();
    let mut registry = NominalRegistry::new();
    let result = cadence_checker::check_program(CheckerConfig::default(), &types, &mut registry, program);
    print_diagnostics(&result.diagnostics);
    let clean = !result.diagnostics.iter().any(cadence_common::Diagnostic::is_error);
    tracing::info!(diagnostic_count = result.diagnostics.len(), clean, "checked");
    clean
}

/// Checks `program` and, if it passed, interprets its `main()` entry
/// point. A `false` result means checking failed or the program trapped
/// at runtime; neither is an `Err` here, both are reported to stdout/stderr.
pub fn run(program: &Program) -> bool {
    if !check(program) {
        return false;
    }
    let _span = tracing::info_span!("run").entered();
    let types = TypeInterner::new();
    let mut host = InMemoryHostEnvironment::new(InMemoryStorage::new());
    match cadence_interpreter::run_program(InterpreterConfig::default(), &mut host, &types, program) {
        Ok(value) => {
            println!("{value:?}");
            true
        }
        Err(err) => {
            tracing::warn!(%err, "run trapped");
            eprintln!("{err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_ast::{Access, Block, Declaration, FunctionDecl, ReceiverKind, Statement};
    use cadence_common::Span;

    fn program_with_main(body: Vec<Statement>) -> Program {
        Program {
            declarations: vec![Declaration::Function(FunctionDecl {
                name: "main".to_string(),
                access: Access::Public,
                receiver: ReceiverKind::None,
                parameters: Vec::new(),
                return_type: None,
                pre_conditions: Vec::new(),
                post_conditions: Vec::new(),
                body: Some(Block { statements: body, span: Span::dummy() }),
                span: Span::dummy(),
            })],
        }
    }

    #[test]
    fn a_clean_empty_main_checks_and_runs() {
        let program = program_with_main(Vec::new());
        assert!(check(&program));
        assert!(run(&program));
    }

    #[test]
    fn a_program_with_no_main_fails_the_run() {
        let program = Program { declarations: Vec::new() };
        assert!(check(&program));
        assert!(!run(&program));
    }

    #[test]
    fn loading_a_malformed_json_file_is_an_error_not_a_panic() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file creation should succeed");
        std::io::Write::write_all(&mut file, b"not json").expect("write should succeed");
        assert!(load_program(file.path()).is_err());
    }
}
