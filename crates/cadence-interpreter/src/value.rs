//! The runtime value representation.
//!
//! Mirrors the static type lattice one level down: every primitive,
//! container and composite type has exactly one value shape here.
//! `Value` deliberately doesn't derive `PartialEq`/`Hash` — most of its
//! variants (composites, references, containers) have no single
//! sensible definition of either, and the handful that do (used as
//! dictionary keys) go through [`Value::as_dictionary_key`] instead.

use crate::activation::SlotId;
use crate::composite::CompositeValue;
use crate::container::{ArrayValue, DictionaryKey, DictionaryValue};
use crate::numeric::IntegerValue;
use crate::storage::{Link, PathValue};
use cadence_types::{Address, TypeId};

#[derive(Clone, Debug)]
pub enum Value {
    Void,
    Bool(bool),
    Address(Address),
    String(String),
    /// A single extended grapheme cluster, not a `char` — Cadence
    /// characters are user-perceived characters, which can span more
    /// than one Unicode scalar value.
    Character(String),
    Integer(IntegerValue),
    Fix64(i64),
    UFix64(u64),
    Path(PathValue),
    Optional(Option<Box<Value>>),
    Array(ArrayValue),
    Dictionary(DictionaryValue),
    Composite(CompositeValue),
    Reference(ReferenceValue),
    Capability {
        address: Address,
        path: PathValue,
        borrow_type: TypeId,
    },
    Link(Link),
    MetaType(TypeId),
    /// Left behind after a resource moves or is destroyed. Any further
    /// read of the slot is a use-after-move, not a clone of stale data.
    Invalidated,
}

/// A reference is ephemeral (aliasing a live heap slot, invalidated the
/// moment that slot is) or rooted in storage (resolved fresh on every
/// access, since storage has no notion of aliasing at all).
#[derive(Clone, Debug)]
pub enum ReferenceValue {
    Ephemeral { target: SlotId, authorized: bool, borrow_type: TypeId },
    Storage { address: Address, path: PathValue, authorized: bool, borrow_type: TypeId },
}

impl Value {
    #[must_use]
    pub fn is_invalidated(&self) -> bool {
        matches!(self, Value::Invalidated)
    }

    /// Converts to a dictionary key if this value's type is one of the
    /// hashable primitives; `None` for everything else (containers,
    /// composites, references, optionals).
    #[must_use]
    pub fn as_dictionary_key(&self) -> Option<DictionaryKey> {
        match self {
            Value::Bool(b) => Some(DictionaryKey::Bool(*b)),
            Value::Address(a) => Some(DictionaryKey::Address(*a)),
            Value::String(s) => Some(DictionaryKey::String(s.clone())),
            Value::Character(c) => Some(DictionaryKey::Character(c.clone())),
            Value::Integer(i) => Some(DictionaryKey::Integer(i.primitive, i.magnitude.clone())),
            Value::Fix64(n) => Some(DictionaryKey::Fix64(*n)),
            Value::UFix64(n) => Some(DictionaryKey::UFix64(*n)),
            _ => None,
        }
    }
}
