//! Import resolution.
//!
//! `import X from <location>` registers `X` with the type of a
//! previously-checked program's export. The checker has no filesystem or
//! network access of its own — every location is opaque to it beyond
//! string identity, and resolving one to an actual elaboration is the
//! host's job.

use cadence_types::TypeId;
use rustc_hash::FxHashMap;

/// One name a prior checker run made available for import.
#[derive(Clone, Copy, Debug)]
pub struct ImportedName {
    pub ty: TypeId,
    pub is_resource: bool,
}

pub trait ImportResolver {
    fn resolve(&self, location: &str, name: &str) -> Option<ImportedName>;
}

/// An `ImportResolver` backed by a fixed table — for a host that checks a
/// batch of programs in dependency order and hands each downstream
/// program its dependencies' already-elaborated exports up front.
#[derive(Default)]
pub struct TableImportResolver {
    entries: FxHashMap<(String, String), ImportedName>,
}

impl TableImportResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, location: impl Into<String>, name: impl Into<String>, imported: ImportedName) {
        self.entries.insert((location.into(), name.into()), imported);
    }
}

impl ImportResolver for TableImportResolver {
    fn resolve(&self, location: &str, name: &str) -> Option<ImportedName> {
        self.entries.get(&(location.to_string(), name.to_string())).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_an_added_entry_and_misses_everything_else() {
        let mut resolver = TableImportResolver::new();
        resolver.add("0x1.FlowToken", "Vault", ImportedName { ty: TypeId::NEVER, is_resource: true });
        assert!(resolver.resolve("0x1.FlowToken", "Vault").is_some());
        assert!(resolver.resolve("0x1.FlowToken", "Receiver").is_none());
        assert!(resolver.resolve("0x2.FlowToken", "Vault").is_none());
    }
}
