//! AST node shapes consumed by the cadence checker and interpreter.
//!
//! This crate describes the tree the (external, out of scope) parser is
//! expected to hand the checker: declarations, statements, expressions,
//! and type syntax, each tagged with a [`cadence_common::Span`]. It
//! contains no lexer or parser — the shapes here are a contract, not a
//! grammar implementation.

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod ty;

pub use decl::{
    Access, CompositeDecl, CompositeKind, Condition, Declaration, FieldDecl, FunctionDecl,
    ImportDecl, InterfaceDecl, Parameter, Program, ReceiverKind, TransactionDecl, VariableDecl,
};
pub use expr::{Argument, BinaryOp, CastKind, Expression, PathDomain, UnaryOp};
pub use stmt::{Block, ElseBranch, Statement};
pub use ty::TypeExpr;

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_common::Span;

    #[test]
    fn program_holds_declarations_in_order() {
        let program = Program {
            declarations: vec![
                Declaration::Variable(VariableDecl {
                    name: "a".into(),
                    is_var: false,
                    ty: None,
                    value: Expression::IntLiteral { text: "1".into(), span: Span::dummy() },
                    span: Span::dummy(),
                }),
                Declaration::Variable(VariableDecl {
                    name: "b".into(),
                    is_var: false,
                    ty: None,
                    value: Expression::IntLiteral { text: "2".into(), span: Span::dummy() },
                    span: Span::dummy(),
                }),
            ],
        };
        assert_eq!(program.declarations.len(), 2);
        assert_eq!(program.declarations[0].name(), Some("a"));
    }
}
