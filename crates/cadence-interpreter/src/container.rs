//! Array and dictionary runtime representations.
//!
//! Dictionaries use an `IndexMap` rather than a hash map so iteration
//! order matches insertion order, the way declared maps do. Writing a
//! resource into either container or removing it back out is a move at
//! the value layer too — callers are expected to route through
//! [`ArrayValue::append`]/[`ArrayValue::remove`] and
//! [`DictionaryValue::insert`]/[`DictionaryValue::remove`] rather than
//! cloning entries, since a resource value can't be cloned at all.

use crate::value::Value;
use cadence_types::{Address, Primitive, TypeId};
use indexmap::IndexMap;
use num_bigint::BigInt;

#[derive(Clone, Debug)]
pub struct ArrayValue {
    pub element_type: TypeId,
    elements: Vec<Value>,
}

impl ArrayValue {
    #[must_use]
    pub fn new(element_type: TypeId) -> Self {
        ArrayValue { element_type, elements: Vec::new() }
    }

    pub fn append(&mut self, value: Value) {
        self.elements.push(value);
    }

    pub fn insert(&mut self, index: usize, value: Value) {
        self.elements.insert(index, value);
    }

    #[must_use]
    pub fn remove(&mut self, index: usize) -> Value {
        self.elements.remove(index)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.elements.iter()
    }
}

/// A dictionary key, stripped down to the hashable primitive subset
/// (`Primitive::is_hashable_key`). Keeping this separate from `Value`
/// is what lets `Value` skip deriving `Eq`/`Hash` itself — most of its
/// variants (composites, references, containers of non-hashable values)
/// have no sensible definition of either.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DictionaryKey {
    Bool(bool),
    Address(Address),
    String(String),
    Character(String),
    Integer(Primitive, BigInt),
    Fix64(i64),
    UFix64(u64),
}

#[derive(Clone, Debug)]
pub struct DictionaryValue {
    pub key_type: TypeId,
    pub value_type: TypeId,
    entries: IndexMap<DictionaryKey, Value>,
}

impl DictionaryValue {
    #[must_use]
    pub fn new(key_type: TypeId, value_type: TypeId) -> Self {
        DictionaryValue { key_type, value_type, entries: IndexMap::new() }
    }

    pub fn insert(&mut self, key: DictionaryKey, value: Value) -> Option<Value> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &DictionaryKey) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &DictionaryKey) -> Option<&Value> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &DictionaryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &DictionaryKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DictionaryKey, &Value)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_types::TypeId;

    #[test]
    fn dictionary_iterates_in_insertion_order() {
        let mut dict = DictionaryValue::new(TypeId::STRING, TypeId::INT);
        dict.insert(DictionaryKey::String("b".into()), Value::Bool(false));
        dict.insert(DictionaryKey::String("a".into()), Value::Bool(true));
        let keys: Vec<_> = dict.keys().cloned().collect();
        assert_eq!(keys, vec![DictionaryKey::String("b".into()), DictionaryKey::String("a".into())]);
    }

    #[test]
    fn removing_a_key_does_not_reorder_the_rest() {
        let mut dict = DictionaryValue::new(TypeId::STRING, TypeId::INT);
        dict.insert(DictionaryKey::String("a".into()), Value::Bool(true));
        dict.insert(DictionaryKey::String("b".into()), Value::Bool(true));
        dict.insert(DictionaryKey::String("c".into()), Value::Bool(true));
        dict.remove(&DictionaryKey::String("a".into()));
        let keys: Vec<_> = dict.keys().cloned().collect();
        assert_eq!(keys, vec![DictionaryKey::String("b".into()), DictionaryKey::String("c".into())]);
    }
}
