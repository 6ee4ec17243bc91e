//! The side table a checker run produces alongside its diagnostics.
//!
//! The AST is a plain owned tree (no arena/node-index), so entries here
//! are keyed by [`Span`]: every expression occurrence has a distinct
//! source range, which is a sound substitute for node identity within one
//! checked program.

use cadence_ast::Access;
use cadence_ast::Expression;
use cadence_common::{Atom, Span};
use cadence_types::{InterfaceId, TypeId};
use rustc_hash::FxHashMap;

/// What a member-access expression resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedTarget {
    Field { index: usize, access: Access },
    Function { access: Access },
    Local,
}

#[derive(Default)]
pub struct Elaboration {
    /// The elaborated type of every checked expression, keyed by its span.
    pub expression_types: FxHashMap<Span, TypeId>,
    /// What every member-access/identifier expression resolved to.
    pub resolved_targets: FxHashMap<Span, ResolvedTarget>,
    /// Field declaration order for each composite, for deterministic
    /// serialization and iteration.
    pub field_orderings: FxHashMap<Atom, Vec<Atom>>,
    /// Which interface each composite's conformance was checked against,
    /// and whether every requirement was satisfied.
    pub conformance_witnesses: FxHashMap<(Atom, InterfaceId), bool>,
    /// The inner expression of every `before(...)` call appearing in a
    /// postcondition, keyed by the call expression's own span — the
    /// interpreter evaluates and snapshots these at function entry, then
    /// substitutes the snapshot whenever it evaluates a matching span in
    /// the postcondition block.
    pub before_snapshots: FxHashMap<Span, Expression>,
}

impl Elaboration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_expression_type(&mut self, span: Span, ty: TypeId) {
        self.expression_types.insert(span, ty);
    }

    #[must_use]
    pub fn expression_type(&self, span: Span) -> Option<TypeId> {
        self.expression_types.get(&span).copied()
    }
}
