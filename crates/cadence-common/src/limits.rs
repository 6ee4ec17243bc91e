//! Centralized recursion/metering limits.
//!
//! Centralizing these avoids duplicate magic numbers scattered through the
//! checker and interpreter, and documents the rationale for each one.

/// Maximum depth for expression type elaboration.
/// Deeply nested binary/conditional expressions each add a checker-side
/// stack frame; bail out before the host stack overflows.
pub const MAX_EXPRESSION_CHECK_DEPTH: usize = 512;

/// Maximum nesting depth for composite field type resolution, guarding
/// against ill-formed recursive type graphs reaching the checker.
pub const MAX_TYPE_RESOLUTION_DEPTH: usize = 256;

/// Maximum capability borrow chain length. Above this depth a borrow fails
/// with `NestedCapabilityError` rather than recursing indefinitely through
/// links.
pub const MAX_CAPABILITY_CHAIN_DEPTH: usize = 100;

/// Default computation budget for a single transaction. Hosts may
/// override this; it exists so the in-memory test host has a sane
/// default.
pub const DEFAULT_COMPUTATION_LIMIT: u64 = 1_000_000;

/// Default memory budget, in abstract "memory units", for the in-memory
/// test host.
pub const DEFAULT_MEMORY_LIMIT: u64 = 64 * 1024 * 1024;

/// Computation units charged for constructing a value. The real unit
/// table is host-defined; this is the interpreter's own minimal charge so
/// the metering contract is exercised even against a host that charges
/// nothing extra.
pub const COMPUTATION_UNITS_PER_VALUE_CONSTRUCTION: u64 = 1;

/// Computation units charged for a single field access.
pub const COMPUTATION_UNITS_PER_FIELD_ACCESS: u64 = 1;
