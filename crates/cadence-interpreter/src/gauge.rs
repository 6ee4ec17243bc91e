//! Metered computation/memory gauge.
//!
//! Every value construction and field access consumes at least one unit.
//! Exceeding either budget raises a fatal error that unwinds the whole
//! transaction; unlike every other runtime error this one is not
//! recoverable by retrying smaller work within the same run.

use crate::error::{ErrorKind, InterpreterError};
use cadence_common::{limits, Span};

pub struct Gauge {
    computation_used: u64,
    computation_limit: u64,
    memory_used: u64,
    memory_limit: u64,
}

impl Gauge {
    #[must_use]
    pub fn new(computation_limit: u64, memory_limit: u64) -> Self {
        Gauge { computation_used: 0, computation_limit, memory_used: 0, memory_limit }
    }

    pub fn use_computation(&mut self, amount: u64, span: Span) -> Result<(), InterpreterError> {
        self.computation_used = self.computation_used.saturating_add(amount);
        if self.computation_used > self.computation_limit {
            tracing::debug!(used = self.computation_used, limit = self.computation_limit, "computation limit exceeded");
            return Err(InterpreterError::new(span, ErrorKind::ComputationLimit));
        }
        Ok(())
    }

    pub fn use_memory(&mut self, amount: u64, span: Span) -> Result<(), InterpreterError> {
        self.memory_used = self.memory_used.saturating_add(amount);
        if self.memory_used > self.memory_limit {
            tracing::debug!(used = self.memory_used, limit = self.memory_limit, "memory limit exceeded");
            return Err(InterpreterError::new(span, ErrorKind::MemoryLimit));
        }
        Ok(())
    }

    pub fn charge_value_construction(&mut self, span: Span) -> Result<(), InterpreterError> {
        self.use_computation(limits::COMPUTATION_UNITS_PER_VALUE_CONSTRUCTION, span)
    }

    pub fn charge_field_access(&mut self, span: Span) -> Result<(), InterpreterError> {
        self.use_computation(limits::COMPUTATION_UNITS_PER_FIELD_ACCESS, span)
    }

    #[must_use]
    pub fn computation_used(&self) -> u64 {
        self.computation_used
    }

    #[must_use]
    pub fn memory_used(&self) -> u64 {
        self.memory_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::new(0, 0)
    }

    #[test]
    fn exceeding_the_computation_limit_is_fatal() {
        let mut gauge = Gauge::new(5, 1_000);
        for _ in 0..5 {
            gauge.use_computation(1, span()).unwrap();
        }
        assert!(gauge.use_computation(1, span()).is_err());
    }

    #[test]
    fn staying_within_budget_succeeds() {
        let mut gauge = Gauge::new(10, 10);
        gauge.charge_value_construction(span()).unwrap();
        gauge.charge_field_access(span()).unwrap();
        assert_eq!(gauge.computation_used(), 2);
    }
}
