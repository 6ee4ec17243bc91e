//! Expression AST nodes.

use crate::ty::TypeExpr;
use cadence_common::Span;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
    NilCoalesce,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Negate,
    Not,
    BitNot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastKind {
    /// `as` — statically verified upcast.
    Simple,
    /// `as?` — dynamic downcast producing an optional.
    Failable,
    /// `as!` — dynamic downcast that aborts on mismatch.
    Force,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathDomain {
    Storage,
    Private,
    Public,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub label: Option<String>,
    pub value: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Identifier {
        name: String,
        span: Span,
    },
    IntLiteral {
        /// Decimal text of an arbitrary-precision integer literal.
        text: String,
        span: Span,
    },
    FixedPointLiteral {
        /// Decimal text, e.g. "1.50000000".
        text: String,
        negative: bool,
        span: Span,
    },
    StringLiteral {
        value: String,
        span: Span,
    },
    BoolLiteral {
        value: bool,
        span: Span,
    },
    ArrayLiteral {
        elements: Vec<Expression>,
        span: Span,
    },
    DictionaryLiteral {
        entries: Vec<(Expression, Expression)>,
        span: Span,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
        span: Span,
    },
    /// `<-x` — a resource move.
    Move {
        operand: Box<Expression>,
        span: Span,
    },
    /// `create T(...)`
    Create {
        ty: TypeExpr,
        arguments: Vec<Argument>,
        span: Span,
    },
    Call {
        callee: Box<Expression>,
        type_arguments: Vec<TypeExpr>,
        arguments: Vec<Argument>,
        span: Span,
    },
    MemberAccess {
        base: Box<Expression>,
        member: String,
        /// `?.` — result is wrapped in an optional and short-circuits on `nil`.
        optional_chaining: bool,
        span: Span,
    },
    Index {
        base: Box<Expression>,
        index: Box<Expression>,
        span: Span,
    },
    Cast {
        expr: Box<Expression>,
        ty: TypeExpr,
        kind: CastKind,
        span: Span,
    },
    /// `&x as &T` / `&x as auth &T`
    Reference {
        expr: Box<Expression>,
        authorized: bool,
        ty: TypeExpr,
        span: Span,
    },
    Conditional {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
        span: Span,
    },
    Path {
        domain: PathDomain,
        identifier: String,
        span: Span,
    },
    /// `force!` — unwraps an optional, aborting if `nil`.
    ForceUnwrap {
        operand: Box<Expression>,
        span: Span,
    },
}

impl Expression {
    #[must_use]
    pub fn span(&self) -> Span {
        use Expression::*;
        match self {
            Identifier { span, .. }
            | IntLiteral { span, .. }
            | FixedPointLiteral { span, .. }
            | StringLiteral { span, .. }
            | BoolLiteral { span, .. }
            | ArrayLiteral { span, .. }
            | DictionaryLiteral { span, .. }
            | Binary { span, .. }
            | Unary { span, .. }
            | Move { span, .. }
            | Create { span, .. }
            | Call { span, .. }
            | MemberAccess { span, .. }
            | Index { span, .. }
            | Cast { span, .. }
            | Reference { span, .. }
            | Conditional { span, .. }
            | Path { span, .. }
            | ForceUnwrap { span, .. } => *span,
        }
    }

    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier { name: name.into(), span: Span::dummy() }
    }
}
