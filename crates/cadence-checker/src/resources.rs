//! Resource ownership state tracking.
//!
//! Every resource-typed local is in exactly one of three states. A use of
//! a variable after it has moved or been destroyed is an error; reaching
//! the end of a scope still `Owned` is a resource loss.

use cadence_common::Atom;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceState {
    Owned,
    Moved,
    Destroyed,
}

/// Per-scope resource-variable state, mirroring the activation stack but
/// tracking only resource-typed bindings.
#[derive(Clone)]
pub struct ResourceTracker {
    scopes: Vec<FxHashMap<Atom, ResourceState>>,
}

impl Default for ResourceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceTracker {
    #[must_use]
    pub fn new() -> Self {
        ResourceTracker { scopes: vec![FxHashMap::default()] }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop_scope(&mut self) -> FxHashMap<Atom, ResourceState> {
        self.scopes.pop().expect("resource scope underflow")
    }

    pub fn track(&mut self, name: Atom) {
        self.scopes.last_mut().expect("no active scope").insert(name, ResourceState::Owned);
    }

    #[must_use]
    pub fn state(&self, name: Atom) -> Option<ResourceState> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name).copied())
    }

    /// Transitions `name` to `state` in whichever scope currently holds
    /// it. Returns `false` if `name` is not tracked at all (not a
    /// resource, or never declared).
    pub fn set_state(&mut self, name: Atom, state: ResourceState) -> bool {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(entry) = scope.get_mut(&name) {
                *entry = state;
                return true;
            }
        }
        false
    }

    /// Names still `Owned` in the innermost scope — resource-loss
    /// candidates at scope exit.
    #[must_use]
    pub fn owned_in_top_scope(&self) -> Vec<Atom> {
        self.scopes
            .last()
            .expect("no active scope")
            .iter()
            .filter(|(_, s)| **s == ResourceState::Owned)
            .map(|(name, _)| *name)
            .collect()
    }

    /// The join rule for a conditional: every name in `names` must end up
    /// in the same state along both branches. Returns the first name that
    /// disagrees, if any.
    #[must_use]
    pub fn join_branches(names: &[Atom], then_branch: &ResourceTracker, else_branch: &ResourceTracker) -> Option<Atom> {
        names.iter().copied().find(|name| then_branch.state(*name) != else_branch.state(*name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_common::Interner;

    #[test]
    fn move_transitions_owned_to_moved() {
        let interner = Interner::new();
        let r = interner.intern("r");
        let mut tracker = ResourceTracker::new();
        tracker.track(r);
        assert_eq!(tracker.state(r), Some(ResourceState::Owned));
        assert!(tracker.set_state(r, ResourceState::Moved));
        assert_eq!(tracker.state(r), Some(ResourceState::Moved));
    }

    #[test]
    fn still_owned_at_scope_exit_is_flagged() {
        let interner = Interner::new();
        let r = interner.intern("r");
        let mut tracker = ResourceTracker::new();
        tracker.track(r);
        assert_eq!(tracker.owned_in_top_scope(), vec![r]);
        tracker.set_state(r, ResourceState::Destroyed);
        assert!(tracker.owned_in_top_scope().is_empty());
    }

    #[test]
    fn branches_disagreeing_on_final_state_fail_the_join_rule() {
        let interner = Interner::new();
        let r = interner.intern("r");

        let mut then_branch = ResourceTracker::new();
        then_branch.track(r);
        then_branch.set_state(r, ResourceState::Moved);

        let mut else_branch = ResourceTracker::new();
        else_branch.track(r);
        else_branch.set_state(r, ResourceState::Destroyed);

        assert_eq!(ResourceTracker::join_branches(&[r], &then_branch, &else_branch), Some(r));

        else_branch.set_state(r, ResourceState::Moved);
        assert_eq!(ResourceTracker::join_branches(&[r], &then_branch, &else_branch), None);
    }
}
