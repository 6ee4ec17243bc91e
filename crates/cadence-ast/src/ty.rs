//! AST-level type syntax.
//!
//! `TypeExpr` is what the (external) parser hands the checker for a type
//! annotation; the checker elaborates it into a `cadence_types::Type` by
//! resolving nominal names against the current scope. This crate carries
//! no elaboration logic of its own — it only describes the node shape.

use cadence_common::Span;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// A nominal reference: a primitive keyword (`Int`, `UFix64`, ...), or a
    /// user-declared composite/interface/type-parameter name.
    Nominal { name: String, span: Span },
    /// `T?`
    Optional { inner: Box<TypeExpr>, span: Span },
    /// `[T]`
    VariableArray { element: Box<TypeExpr>, span: Span },
    /// `[T; N]`
    ConstantArray { element: Box<TypeExpr>, size: u64, span: Span },
    /// `{K: V}`
    Dictionary { key: Box<TypeExpr>, value: Box<TypeExpr>, span: Span },
    /// `&T` or `auth &T`
    Reference { authorized: bool, referenced: Box<TypeExpr>, span: Span },
    /// `fun(A, B): R`
    Function { parameters: Vec<TypeExpr>, return_type: Box<TypeExpr>, span: Span },
    /// `T{I1, I2}` (base may be absent for `{I1, I2}` bare restricted sets).
    Restricted { base: Option<Box<TypeExpr>>, interfaces: Vec<String>, span: Span },
    /// `Capability<&T>`
    Capability { borrow_type: Box<TypeExpr>, span: Span },
    /// `Type` (the meta-type of types themselves).
    MetaType { span: Span },
}

impl TypeExpr {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            TypeExpr::Nominal { span, .. }
            | TypeExpr::Optional { span, .. }
            | TypeExpr::VariableArray { span, .. }
            | TypeExpr::ConstantArray { span, .. }
            | TypeExpr::Dictionary { span, .. }
            | TypeExpr::Reference { span, .. }
            | TypeExpr::Function { span, .. }
            | TypeExpr::Restricted { span, .. }
            | TypeExpr::Capability { span, .. }
            | TypeExpr::MetaType { span } => *span,
        }
    }

    #[must_use]
    pub fn nominal(name: impl Into<String>) -> Self {
        TypeExpr::Nominal { name: name.into(), span: Span::dummy() }
    }

    #[must_use]
    pub fn optional(self) -> Self {
        let span = self.span();
        TypeExpr::Optional { inner: Box::new(self), span }
    }
}
