//! The per-account persisted namespace and the host-facing storage gateway.
//!
//! Three domains: `storage`, `private`, `public`. Only `storage` holds
//! owned values; the other two hold links/capability-shaped redirects.
//! The slab backend itself is out of scope — `InMemoryStorage` stands in
//! for it in tests and the CLI driver.

use crate::value::Value;
use cadence_types::Address;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageDomain {
    Storage,
    Private,
    Public,
}

impl StorageDomain {
    /// Only `storage` may hold an owned value directly; `private`/`public`
    /// only ever hold links.
    #[must_use]
    pub fn holds_owned_values(self) -> bool {
        matches!(self, StorageDomain::Storage)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathValue {
    pub domain: StorageDomain,
    pub identifier: String,
}

impl PathValue {
    #[must_use]
    pub fn new(domain: StorageDomain, identifier: impl Into<String>) -> Self {
        PathValue { domain, identifier: identifier.into() }
    }
}

/// A persisted redirect from one path to another, typed at the borrow
/// type the link was installed with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub target: PathValue,
    pub borrow_type: cadence_types::TypeId,
}

/// The host-provided storage interface: `read`/`write`/`iterate` keyed by
/// `(address, domain, identifier)`. Values are opaque slab-serializable
/// blobs at the real host boundary; here they're interpreter `Value`s
/// directly since there is no cross-process boundary to cross.
pub trait Storage {
    fn read(&self, address: Address, path: &PathValue) -> Option<Value>;
    fn write(&mut self, address: Address, path: &PathValue, value: Option<Value>);
    fn read_link(&self, address: Address, path: &PathValue) -> Option<Link>;
    fn write_link(&mut self, address: Address, path: &PathValue, link: Option<Link>);
    fn iterate(&self, address: Address, domain: StorageDomain) -> Vec<String>;
}

#[derive(Default)]
pub struct InMemoryStorage {
    values: FxHashMap<(Address, PathValue), Value>,
    links: FxHashMap<(Address, PathValue), Link>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for InMemoryStorage {
    fn read(&self, address: Address, path: &PathValue) -> Option<Value> {
        self.values.get(&(address, path.clone())).cloned()
    }

    fn write(&mut self, address: Address, path: &PathValue, value: Option<Value>) {
        match value {
            Some(v) => {
                self.values.insert((address, path.clone()), v);
            }
            None => {
                self.values.remove(&(address, path.clone()));
            }
        }
    }

    fn read_link(&self, address: Address, path: &PathValue) -> Option<Link> {
        self.links.get(&(address, path.clone())).cloned()
    }

    fn write_link(&mut self, address: Address, path: &PathValue, link: Option<Link>) {
        match link {
            Some(l) => {
                self.links.insert((address, path.clone()), l);
            }
            None => {
                self.links.remove(&(address, path.clone()));
            }
        }
    }

    fn iterate(&self, address: Address, domain: StorageDomain) -> Vec<String> {
        self.values
            .keys()
            .filter(|(a, p)| *a == address && p.domain == domain)
            .map(|(_, p)| p.identifier.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> Address {
        Address::new([0, 0, 0, 0, 0, 0, 0, 1])
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut storage = InMemoryStorage::new();
        let path = PathValue::new(StorageDomain::Storage, "p");
        assert!(storage.read(addr(), &path).is_none());
        storage.write(addr(), &path, Some(Value::Bool(true)));
        assert!(matches!(storage.read(addr(), &path), Some(Value::Bool(true))));
        storage.write(addr(), &path, None);
        assert!(storage.read(addr(), &path).is_none());
    }
}
