//! The composite runtime representation: structs, resources, events,
//! enums and contracts all share this one shape, distinguished by the
//! `CompositeKind` recorded on their `TypeId` in the nominal registry
//! rather than by a separate runtime tag.
//!
//! A single representation covers both a composite sitting in a local
//! variable and one freshly read out of storage — there's no separate
//! "persisted" encoding at this layer, only at the storage boundary.

use crate::value::Value;
use cadence_types::TypeId;
use indexmap::IndexMap;

#[derive(Clone, Debug)]
pub struct CompositeValue {
    /// The declared name this value was constructed against. A single
    /// checked program never has two composites sharing a name, so this
    /// doubles as the runtime nominal identity the evaluator resolves
    /// declarations by; `type_id` is what crosses the storage/bridge
    /// boundary and round-trips through the checker's interner.
    pub type_name: String,
    pub type_id: TypeId,
    /// Set on construction via `create T(...)` from the host's UUID
    /// generator; absent for composites that aren't resources.
    pub uuid: Option<u64>,
    fields: IndexMap<String, Value>,
}

impl CompositeValue {
    #[must_use]
    pub fn new(type_name: impl Into<String>, type_id: TypeId, uuid: Option<u64>) -> Self {
        CompositeValue { type_name: type_name.into(), type_id, uuid, fields: IndexMap::new() }
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Removes and returns a field's value, leaving the slot empty. Used
    /// when destroying a composite: each resource-typed field is taken
    /// out and destroyed in turn rather than dropped in place.
    pub fn take_field(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    pub fn iter_fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_types::TypeId;

    #[test]
    fn fields_round_trip_and_iterate_in_declaration_order() {
        let mut composite = CompositeValue::new("Vault", TypeId::INVALID, Some(42));
        composite.set_field("balance", Value::Bool(true));
        composite.set_field("owner", Value::Bool(false));
        assert!(matches!(composite.get_field("balance"), Some(Value::Bool(true))));
        let names: Vec<_> = composite.iter_fields().map(|(n, _)| n.clone()).collect();
        assert_eq!(names, vec!["balance".to_string(), "owner".to_string()]);
    }

    #[test]
    fn taking_a_field_removes_it() {
        let mut composite = CompositeValue::new("Vault", TypeId::INVALID, None);
        composite.set_field("vault", Value::Bool(true));
        assert!(composite.take_field("vault").is_some());
        assert!(composite.get_field("vault").is_none());
    }
}
