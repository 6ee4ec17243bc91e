use cadence_ast::{
    Access, Block, CompositeDecl, CompositeKind, Declaration, Expression, FunctionDecl, Parameter, Program, ReceiverKind, Statement, TypeExpr,
};
use cadence_checker::check_program;
use cadence_common::{CheckerConfig, DiagnosticCode, Span};
use cadence_types::{NominalRegistry, TypeInterner};

fn span() -> Span {
    Span::new(0, 0)
}

fn vault_decl() -> Declaration {
    Declaration::Composite(CompositeDecl {
        name: "Vault".to_string(),
        kind: CompositeKind::Resource,
        access: Access::Public,
        conformances: Vec::new(),
        fields: Vec::new(),
        initializer: None,
        destructor: None,
        functions: Vec::new(),
        nested: Vec::new(),
        span: span(),
    })
}

fn function_taking_a_vault(name: &str, body: Vec<Statement>) -> Declaration {
    Declaration::Function(FunctionDecl {
        name: name.to_string(),
        access: Access::Public,
        receiver: ReceiverKind::None,
        parameters: vec![Parameter { label: None, name: "v".to_string(), ty: TypeExpr::nominal("Vault"), span: span() }],
        return_type: None,
        pre_conditions: Vec::new(),
        post_conditions: Vec::new(),
        body: Some(Block { statements: body, span: span() }),
        span: span(),
    })
}

fn identifier(name: &str) -> Expression {
    Expression::Identifier { name: name.to_string(), span: span() }
}

#[test]
fn a_resource_parameter_never_consumed_is_a_resource_loss() {
    let types = TypeInterner::new();
    let mut registry = NominalRegistry::new();
    let program = Program { declarations: vec![vault_decl(), function_taking_a_vault("lose", Vec::new())] };

    let result = check_program(CheckerConfig::default(), &types, &mut registry, &program);
    assert!(result.diagnostics.iter().any(|d| d.code == DiagnosticCode::ResourceLoss));
}

#[test]
fn destroying_the_resource_parameter_clears_the_loss() {
    let types = TypeInterner::new();
    let mut registry = NominalRegistry::new();
    let destroy = Statement::Destroy { value: identifier("v"), span: span() };
    let program = Program { declarations: vec![vault_decl(), function_taking_a_vault("consume", vec![destroy])] };

    let result = check_program(CheckerConfig::default(), &types, &mut registry, &program);
    assert!(!result.diagnostics.iter().any(|d| d.code == DiagnosticCode::ResourceLoss));
}

#[test]
fn using_a_moved_resource_again_is_use_after_move() {
    let types = TypeInterner::new();
    let mut registry = NominalRegistry::new();
    let move_it = Statement::Expression(Expression::Move { operand: Box::new(identifier("v")), span: span() });
    let use_again = Statement::Expression(identifier("v"));
    let program = Program { declarations: vec![vault_decl(), function_taking_a_vault("double_move", vec![move_it, use_again])] };

    let result = check_program(CheckerConfig::default(), &types, &mut registry, &program);
    assert!(result.diagnostics.iter().any(|d| d.code == DiagnosticCode::UseAfterMove));
}

#[test]
fn an_if_that_destroys_the_resource_on_only_one_branch_is_a_join_mismatch() {
    let types = TypeInterner::new();
    let mut registry = NominalRegistry::new();
    let if_stmt = Statement::If {
        condition: Expression::BoolLiteral { value: true, span: span() },
        then_branch: Block { statements: vec![Statement::Destroy { value: identifier("v"), span: span() }], span: span() },
        else_branch: None,
        span: span(),
    };
    let program = Program { declarations: vec![vault_decl(), function_taking_a_vault("maybe_consume", vec![if_stmt])] };

    let result = check_program(CheckerConfig::default(), &types, &mut registry, &program);
    assert!(result.diagnostics.iter().any(|d| d.code == DiagnosticCode::ResourceLoss));
}
