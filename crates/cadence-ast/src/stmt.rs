//! Statement AST nodes.

use crate::decl::VariableDecl;
use crate::expr::Expression;
use cadence_common::Span;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Expression(Expression),
    VariableDecl(VariableDecl),
    Assignment {
        target: Expression,
        value: Expression,
        span: Span,
    },
    If {
        condition: Expression,
        then_branch: Block,
        else_branch: Option<Box<ElseBranch>>,
        span: Span,
    },
    While {
        condition: Expression,
        body: Block,
        span: Span,
    },
    For {
        variable: String,
        iterable: Expression,
        body: Block,
        span: Span,
    },
    Return {
        value: Option<Expression>,
        span: Span,
    },
    /// `destroy x`
    Destroy {
        value: Expression,
        span: Span,
    },
    /// `emit Event(...)`
    Emit {
        event: Expression,
        span: Span,
    },
    Break {
        span: Span,
    },
    Continue {
        span: Span,
    },
    Block(Block),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ElseBranch {
    Block(Block),
    If(Box<Statement>),
}

impl Statement {
    #[must_use]
    pub fn span(&self) -> Span {
        use Statement::*;
        match self {
            Expression(e) => e.span(),
            VariableDecl(v) => v.span,
            Assignment { span, .. }
            | If { span, .. }
            | While { span, .. }
            | For { span, .. }
            | Return { span, .. }
            | Destroy { span, .. }
            | Emit { span, .. }
            | Break { span }
            | Continue { span } => *span,
            Block(b) => b.span,
        }
    }
}
