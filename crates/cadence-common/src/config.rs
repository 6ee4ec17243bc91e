//! Checker/interpreter configuration.
//!
//! Lives in `cadence-common` so both `cadence-checker` and
//! `cadence-interpreter` can reference it without a circular dependency.

use crate::limits;

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Maximum expression elaboration recursion depth.
    pub max_expression_check_depth: usize,
    /// Maximum composite/interface type resolution recursion depth.
    pub max_type_resolution_depth: usize,
    /// Treat every declaration's default access level as `self` rather
    /// than `public` when omitted. Off by default to match Cadence's
    /// actual default (contract-internal), kept as a knob for hosts that
    /// want a stricter default.
    pub strict_default_access: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            max_expression_check_depth: limits::MAX_EXPRESSION_CHECK_DEPTH,
            max_type_resolution_depth: limits::MAX_TYPE_RESOLUTION_DEPTH,
            strict_default_access: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// Maximum capability/link chain depth before `NestedCapabilityError`.
    pub max_capability_chain_depth: usize,
    /// Computation unit budget for a single transaction.
    pub computation_limit: u64,
    /// Memory unit budget for a single transaction.
    pub memory_limit: u64,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_capability_chain_depth: limits::MAX_CAPABILITY_CHAIN_DEPTH,
            computation_limit: limits::DEFAULT_COMPUTATION_LIMIT,
            memory_limit: limits::DEFAULT_MEMORY_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_published_limits() {
        let cfg = CheckerConfig::default();
        assert_eq!(cfg.max_expression_check_depth, limits::MAX_EXPRESSION_CHECK_DEPTH);
        let icfg = InterpreterConfig::default();
        assert_eq!(icfg.max_capability_chain_depth, limits::MAX_CAPABILITY_CHAIN_DEPTH);
    }
}
