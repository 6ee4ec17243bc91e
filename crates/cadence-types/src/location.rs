//! Nominal type identity.
//!
//! Two nominal types (composite or interface) are equal iff they share the
//! same `(Location, qualified name)`. `Location::Builtin` denotes built-in
//! types with no owning account or script.

use std::fmt;

/// A Cadence account address: 8 bytes, big-endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 8]);

impl Address {
    #[must_use]
    pub const fn new(bytes: [u8; 8]) -> Self {
        Address(bytes)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// The built-in/standard-library location.
    Builtin,
    /// A contract deployed to an account.
    Account(Address),
    /// A transaction or script, identified by a host-assigned opaque id
    /// (types declared inside a transaction body are not importable, but
    /// still need a location for nominal identity within one checker run).
    Script(u64),
}
