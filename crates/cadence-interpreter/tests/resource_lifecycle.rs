//! A resource moved into a variable and then destroyed leaves no trace
//! behind: no panic, no leftover value, no event beyond what `destroy`
//! itself emits.

use cadence_ast::{Access, Block, CompositeDecl, CompositeKind, Declaration, Expression, FieldDecl, FunctionDecl, Program, ReceiverKind, Statement, TypeExpr};
use cadence_common::{InterpreterConfig, Span};
use cadence_interpreter::{InMemoryHostEnvironment, InMemoryStorage, Interpreter, Value};
use cadence_types::TypeInterner;

fn span() -> Span {
    Span::new(0, 0)
}

fn vault_decl() -> CompositeDecl {
    CompositeDecl {
        name: "Vault".to_string(),
        kind: CompositeKind::Resource,
        access: Access::Public,
        conformances: Vec::new(),
        fields: vec![FieldDecl { name: "balance".to_string(), access: Access::Public, is_var: true, ty: TypeExpr::nominal("Int"), span: span() }],
        initializer: Some(FunctionDecl {
            name: "init".to_string(),
            access: Access::Public,
            receiver: ReceiverKind::Value,
            parameters: vec![cadence_ast::Parameter { label: None, name: "balance".to_string(), ty: TypeExpr::nominal("Int"), span: span() }],
            return_type: None,
            pre_conditions: Vec::new(),
            post_conditions: Vec::new(),
            body: Some(Block {
                statements: vec![Statement::Assignment {
                    target: Expression::MemberAccess { base: Box::new(Expression::identifier("self")), member: "balance".to_string(), optional_chaining: false, span: span() },
                    value: Expression::identifier("balance"),
                    span: span(),
                }],
                span: span(),
            }),
            span: span(),
        }),
        destructor: None,
        functions: Vec::new(),
        nested: Vec::new(),
        span: span(),
    }
}

fn program_moving_and_destroying_a_vault() -> Program {
    Program {
        declarations: vec![
            Declaration::Composite(vault_decl()),
            Declaration::Function(FunctionDecl {
                name: "main".to_string(),
                access: Access::Public,
                receiver: ReceiverKind::None,
                parameters: Vec::new(),
                return_type: None,
                pre_conditions: Vec::new(),
                post_conditions: Vec::new(),
                body: Some(Block {
                    statements: vec![
                        Statement::VariableDecl(cadence_ast::VariableDecl {
                            name: "v".to_string(),
                            is_var: false,
                            ty: None,
                            value: Expression::Create {
                                ty: TypeExpr::nominal("Vault"),
                                arguments: vec![cadence_ast::Argument { label: Some("balance".to_string()), value: Box::new(Expression::IntLiteral { text: "10".to_string(), span: span() }), span: span() }],
                                span: span(),
                            },
                            span: span(),
                        }),
                        Statement::VariableDecl(cadence_ast::VariableDecl {
                            name: "moved".to_string(),
                            is_var: false,
                            ty: None,
                            value: Expression::Move { operand: Box::new(Expression::identifier("v")), span: span() },
                            span: span(),
                        }),
                        Statement::Destroy { value: Expression::identifier("moved"), span: span() },
                        Statement::Return { value: Some(Expression::BoolLiteral { value: true, span: span() }), span: span() },
                    ],
                    span: span(),
                }),
                span: span(),
            }),
        ],
    }
}

#[test]
fn moving_then_destroying_a_resource_succeeds_with_no_leftover_value() {
    let program = program_moving_and_destroying_a_vault();
    let types = TypeInterner::new();
    let mut host = InMemoryHostEnvironment::new(InMemoryStorage::new());
    let mut interpreter = Interpreter::new(InterpreterConfig::default(), &mut host, &types, &program);
    let result = interpreter.run_main().unwrap();
    assert!(matches!(result, Value::Bool(true)));
}

#[test]
fn reading_the_original_binding_after_the_move_is_a_runtime_error() {
    let mut program = program_moving_and_destroying_a_vault();
    // Swap the final `return true` for a read of the already-moved `v`.
    if let Declaration::Function(main) = &mut program.declarations[1] {
        let body = main.body.as_mut().unwrap();
        body.statements.pop();
        body.statements.pop();
        body.statements.push(Statement::Return { value: Some(Expression::identifier("v")), span: span() });
    }
    let types = TypeInterner::new();
    let mut host = InMemoryHostEnvironment::new(InMemoryStorage::new());
    let mut interpreter = Interpreter::new(InterpreterConfig::default(), &mut host, &types, &program);
    let err = interpreter.run_main().unwrap_err();
    assert!(matches!(err.kind, cadence_interpreter::ErrorKind::UseAfterMoveRuntime));
}

#[test]
fn a_resource_field_survives_into_its_initializer_body() {
    let decl = vault_decl();
    let program = Program { declarations: vec![Declaration::Composite(decl)] };
    let types = TypeInterner::new();
    let mut host = InMemoryHostEnvironment::new(InMemoryStorage::new());
    let mut interpreter = Interpreter::new(InterpreterConfig::default(), &mut host, &types, &program);
    let value = interpreter
        .eval_expression(&Expression::Create {
            ty: TypeExpr::nominal("Vault"),
            arguments: vec![cadence_ast::Argument { label: Some("balance".to_string()), value: Box::new(Expression::IntLiteral { text: "42".to_string(), span: span() }), span: span() }],
            span: span(),
        })
        .unwrap();
    match value {
        Value::Composite(c) => match c.get_field("balance") {
            Some(Value::Integer(i)) => assert_eq!(i.magnitude, num_bigint::BigInt::from(42)),
            other => panic!("expected an integer balance field, got {other:?}"),
        },
        other => panic!("expected a composite, got {other:?}"),
    }
}

