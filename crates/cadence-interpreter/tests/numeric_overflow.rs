//! End-to-end overflow/wraparound behavior, driven through the public
//! `run_program` entry point rather than `Interpreter`'s internals.

use cadence_ast::{Access, Block, BinaryOp, Declaration, Expression, FunctionDecl, Program, ReceiverKind, Statement, TypeExpr, VariableDecl};
use cadence_common::{InterpreterConfig, Span};
use cadence_interpreter::{run_program, ErrorKind, InMemoryHostEnvironment, InMemoryStorage, Value};
use cadence_types::TypeInterner;

fn span() -> Span {
    Span::new(0, 0)
}

fn program_adding_one_to_a_maxed_out(ty_name: &str) -> Program {
    Program {
        declarations: vec![Declaration::Function(FunctionDecl {
            name: "main".to_string(),
            access: Access::Public,
            receiver: ReceiverKind::None,
            parameters: Vec::new(),
            return_type: None,
            pre_conditions: Vec::new(),
            post_conditions: Vec::new(),
            body: Some(Block {
                statements: vec![
                    Statement::VariableDecl(VariableDecl {
                        name: "x".to_string(),
                        is_var: false,
                        ty: Some(TypeExpr::nominal(ty_name)),
                        value: Expression::IntLiteral { text: "255".to_string(), span: span() },
                        span: span(),
                    }),
                    Statement::Return {
                        value: Some(Expression::Binary {
                            op: BinaryOp::Add,
                            left: Box::new(Expression::identifier("x")),
                            right: Box::new(Expression::IntLiteral { text: "1".to_string(), span: span() }),
                            span: span(),
                        }),
                        span: span(),
                    },
                ],
                span: span(),
            }),
            span: span(),
        })],
    }
}

#[test]
fn uint8_addition_past_its_range_aborts_the_transaction() {
    let program = program_adding_one_to_a_maxed_out("UInt8");
    let types = TypeInterner::new();
    let mut host = InMemoryHostEnvironment::new(InMemoryStorage::new());
    let err = run_program(InterpreterConfig::default(), &mut host, &types, &program).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::OverflowError));
}

#[test]
fn word8_addition_past_its_range_wraps_around_to_zero() {
    let program = program_adding_one_to_a_maxed_out("Word8");
    let types = TypeInterner::new();
    let mut host = InMemoryHostEnvironment::new(InMemoryStorage::new());
    let value = run_program(InterpreterConfig::default(), &mut host, &types, &program).unwrap();
    match value {
        Value::Integer(i) => assert_eq!(i.magnitude, num_bigint::BigInt::from(0)),
        other => panic!("expected a wrapped Word8 integer, got {other:?}"),
    }
}

#[test]
fn unbounded_int_past_i64_range_does_not_overflow() {
    let program = Program {
        declarations: vec![Declaration::Function(FunctionDecl {
            name: "main".to_string(),
            access: Access::Public,
            receiver: ReceiverKind::None,
            parameters: Vec::new(),
            return_type: None,
            pre_conditions: Vec::new(),
            post_conditions: Vec::new(),
            body: Some(Block {
                statements: vec![Statement::Return {
                    value: Some(Expression::Binary {
                        op: BinaryOp::Add,
                        left: Box::new(Expression::IntLiteral { text: i64::MAX.to_string(), span: span() }),
                        right: Box::new(Expression::IntLiteral { text: "1".to_string(), span: span() }),
                        span: span(),
                    }),
                    span: span(),
                }],
                span: span(),
            }),
            span: span(),
        })],
    };
    let types = TypeInterner::new();
    let mut host = InMemoryHostEnvironment::new(InMemoryStorage::new());
    let value = run_program(InterpreterConfig::default(), &mut host, &types, &program).unwrap();
    match value {
        Value::Integer(i) => assert_eq!(i.magnitude, num_bigint::BigInt::from(i64::MAX) + 1),
        other => panic!("expected an unbounded Int, got {other:?}"),
    }
}
