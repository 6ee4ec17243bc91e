//! The interpreter's single unwinding error type.
//!
//! Unlike the checker, which accumulates diagnostics and keeps going, the
//! interpreter surfaces exactly one error — the first that unwinds — and
//! the host rolls back the whole transaction.

use cadence_common::Span;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
#[error("{kind} at {span:?}")]
pub struct InterpreterError {
    pub span: Span,
    pub kind: ErrorKind,
}

impl InterpreterError {
    #[must_use]
    pub fn new(span: Span, kind: ErrorKind) -> Self {
        InterpreterError { span, kind }
    }
}

/// The runtime error taxonomy. `Invariant` variants should never fire if
/// the checker accepted the program; they exist as a defense-in-depth
/// backstop, not an expected code path.
#[derive(Clone, Debug, Error)]
pub enum ErrorKind {
    #[error("panic: {0}")]
    Panic(String),
    #[error("assertion failed: {0}")]
    AssertionFailed(String),
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),
    #[error("postcondition failed: {0}")]
    PostconditionFailed(String),
    #[error("arithmetic overflow")]
    OverflowError,
    #[error("division by zero")]
    DivisionByZero,
    #[error("dereference of an invalidated reference")]
    DereferenceFailed,
    #[error("no value stored at the given path")]
    MissingStorageValue,
    #[error("capability borrow failed: {0}")]
    CapabilityBorrowFailed(String),
    #[error("capability chain exceeded the maximum depth")]
    NestedCapabilityError,
    #[error("forced cast failed: value is not a `{0}`")]
    ForceCastFailed(String),
    #[error("expected a path in the `{0}` domain")]
    InvalidPathDomain(String),
    #[error("RLP decode error: {0}")]
    RlpDecodeError(String),
    #[error("computation limit exceeded")]
    ComputationLimit,
    #[error("memory limit exceeded")]
    MemoryLimit,
    #[error("invariant violation: use of a resource after it was moved (checker should have rejected this)")]
    UseAfterMoveRuntime,
    #[error("invariant violation: resource lost without being moved or destroyed (checker should have rejected this)")]
    ResourceLostRuntime,
}
