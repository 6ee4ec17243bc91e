//! Declaration AST nodes.

use crate::expr::Expression;
use crate::stmt::Block;
use crate::ty::TypeExpr;
use cadence_common::Span;
use serde::{Deserialize, Serialize};

/// The four access levels, from least to most visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Access {
    /// `priv` / unlabeled default inside a type: only `self`.
    Private,
    /// `access(contract)`: the enclosing contract and its nested types.
    Contract,
    /// `access(account)`: any code executing under the owning account.
    Account,
    /// `access(all)` / `pub`: anyone.
    Public,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositeKind {
    Structure,
    Resource,
    Contract,
    Event,
    Enum,
}

impl CompositeKind {
    #[must_use]
    pub const fn is_resource(self) -> bool {
        matches!(self, CompositeKind::Resource)
    }
}

/// The receiver kind of a function type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiverKind {
    /// A free function, not bound to a composite.
    None,
    /// Bound by value (`self` is consumed/copied per the composite's kind).
    Value,
    /// Bound through a reference, optionally `auth`.
    Reference { authorized: bool },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub label: Option<String>,
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub expr: Expression,
    pub message: Option<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub access: Access,
    pub receiver: ReceiverKind,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeExpr>,
    pub pre_conditions: Vec<Condition>,
    pub post_conditions: Vec<Condition>,
    /// `None` for interface requirements without a default implementation.
    pub body: Option<Block>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub access: Access,
    pub is_var: bool,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositeDecl {
    pub name: String,
    pub kind: CompositeKind,
    pub access: Access,
    /// Interfaces this composite declares conformance to.
    pub conformances: Vec<String>,
    pub fields: Vec<FieldDecl>,
    pub initializer: Option<FunctionDecl>,
    /// The `destroy` body, only meaningful for resource kinds.
    pub destructor: Option<Block>,
    pub functions: Vec<FunctionDecl>,
    pub nested: Vec<Declaration>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    /// Which composite kind this interface may be attached to.
    pub applies_to: CompositeKind,
    pub access: Access,
    pub fields: Vec<FieldDecl>,
    /// Function requirements; a `Some(body)` is a default implementation a
    /// conforming composite may omit overriding.
    pub functions: Vec<FunctionDecl>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    pub is_var: bool,
    pub ty: Option<TypeExpr>,
    pub value: Expression,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    pub names: Vec<String>,
    /// The host-resolved location identifier (e.g. an address or file path,
    /// opaque to the checker beyond string identity).
    pub location: String,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionDecl {
    pub parameters: Vec<Parameter>,
    pub fields: Vec<FieldDecl>,
    pub prepare: Option<FunctionDecl>,
    pub pre_conditions: Vec<Condition>,
    pub execute: Option<Block>,
    pub post_conditions: Vec<Condition>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Declaration {
    Composite(CompositeDecl),
    Interface(InterfaceDecl),
    Function(FunctionDecl),
    Variable(VariableDecl),
    Import(ImportDecl),
    Transaction(TransactionDecl),
}

impl Declaration {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Declaration::Composite(d) => d.span,
            Declaration::Interface(d) => d.span,
            Declaration::Function(d) => d.span,
            Declaration::Variable(d) => d.span,
            Declaration::Import(d) => d.span,
            Declaration::Transaction(d) => d.span,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Composite(d) => Some(&d.name),
            Declaration::Interface(d) => Some(&d.name),
            Declaration::Function(d) => Some(&d.name),
            Declaration::Variable(d) => Some(&d.name),
            Declaration::Import(_) | Declaration::Transaction(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}
