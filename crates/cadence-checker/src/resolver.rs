//! Name resolution through a stack of lexical scopes.
//!
//! Mirrors how block/function/type scopes nest in source: top-level
//! declarations are visible everywhere below them, a type's members are
//! visible to its own function bodies, and block scopes shadow outer names.

use cadence_common::Atom;
use cadence_types::TypeId;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    TopLevel,
    Type,
    Function,
    Block,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub ty: TypeId,
    pub is_var: bool,
    pub is_resource: bool,
}

/// A stack of lexical scopes, innermost last.
pub struct Activations {
    scopes: Vec<(ScopeKind, FxHashMap<Atom, Binding>)>,
}

impl Default for Activations {
    fn default() -> Self {
        Self::new()
    }
}

impl Activations {
    #[must_use]
    pub fn new() -> Self {
        Activations { scopes: vec![(ScopeKind::TopLevel, FxHashMap::default())] }
    }

    pub fn push(&mut self, kind: ScopeKind) {
        self.scopes.push((kind, FxHashMap::default()));
    }

    pub fn pop(&mut self) -> FxHashMap<Atom, Binding> {
        self.scopes.pop().expect("scope stack underflow").1
    }

    #[must_use]
    pub fn current_kind(&self) -> ScopeKind {
        self.scopes.last().expect("no active scope").0
    }

    /// Declares a name in the innermost scope. Returns `false` without
    /// declaring if the name is already bound at this exact level —
    /// duplicate names at the same level are a checker error.
    pub fn declare(&mut self, name: Atom, binding: Binding) -> bool {
        let (_, map) = self.scopes.last_mut().expect("no active scope");
        if map.contains_key(&name) {
            return false;
        }
        map.insert(name, binding);
        true
    }

    #[must_use]
    pub fn resolve(&self, name: Atom) -> Option<Binding> {
        self.scopes.iter().rev().find_map(|(_, map)| map.get(&name).copied())
    }

    /// The innermost scope in which `name` is bound, for mutating in place.
    pub fn resolve_mut(&mut self, name: Atom) -> Option<&mut Binding> {
        self.scopes.iter_mut().rev().find_map(|(_, map)| map.get_mut(&name))
    }

    /// Names currently visible, innermost scope first — used to snapshot
    /// the resource variables in play before a conditional branch splits.
    pub fn visible_names(&self) -> Vec<Atom> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut out = Vec::new();
        for (_, map) in self.scopes.iter().rev() {
            for name in map.keys() {
                if seen.insert(*name) {
                    out.push(*name);
                }
            }
        }
        out
    }
}
