//! The value bridge: recursive translation between interpreter `Value`s
//! and the host's own mirror value hierarchy, used whenever a value
//! crosses the interpreter/host boundary (transaction arguments, return
//! values, values handed to `log`, event payloads).

use crate::activation::{Heap, SlotId};
use crate::composite::CompositeValue;
use crate::container::{ArrayValue, DictionaryValue};
use crate::error::{ErrorKind, InterpreterError};
use crate::numeric::IntegerValue;
use crate::storage::{Link, PathValue};
use crate::value::{ReferenceValue, Value};
use cadence_common::Span;
use cadence_types::{Address, Primitive, TypeData, TypeId, TypeInterner};
use num_bigint::BigInt;
use rustc_hash::FxHashSet;

/// The host-side mirror of a `Value`. Unlike `Value`, this has no
/// notion of slots or moves — it's a plain tree, safe to serialize or
/// hand to code outside the interpreter.
#[derive(Clone, Debug, PartialEq)]
pub enum HostValue {
    Void,
    Optional(Option<Box<HostValue>>),
    Bool(bool),
    String(String),
    Character(String),
    Address(Address),
    Integer { primitive: Primitive, digits: String },
    Fix64(i64),
    UFix64(u64),
    Array(Vec<HostValue>),
    Dictionary(Vec<(HostValue, HostValue)>),
    Composite { type_id: TypeId, fields: Vec<(String, HostValue)> },
    Path(PathValue),
    TypeValue(TypeId),
    Capability { address: Address, path: PathValue, borrow_type: TypeId },
    Link(Link),
}

/// Exports `value` to its host mirror. `heap` resolves ephemeral
/// references; a reference whose target slot is already on the current
/// export path is a cycle and terminates as `nil` rather than recursing
/// forever.
pub fn export(value: &Value, heap: &Heap) -> HostValue {
    let mut visiting = FxHashSet::default();
    export_inner(value, heap, &mut visiting)
}

fn export_inner(value: &Value, heap: &Heap, visiting: &mut FxHashSet<SlotId>) -> HostValue {
    match value {
        Value::Void | Value::Invalidated => HostValue::Void,
        Value::Bool(b) => HostValue::Bool(*b),
        Value::Address(a) => HostValue::Address(*a),
        Value::String(s) => HostValue::String(s.clone()),
        Value::Character(c) => HostValue::Character(c.clone()),
        Value::Integer(i) => HostValue::Integer { primitive: i.primitive, digits: i.magnitude.to_string() },
        Value::Fix64(n) => HostValue::Fix64(*n),
        Value::UFix64(n) => HostValue::UFix64(*n),
        Value::Path(p) => HostValue::Path(p.clone()),
        Value::MetaType(t) => HostValue::TypeValue(*t),
        Value::Link(l) => HostValue::Link(l.clone()),
        Value::Capability { address, path, borrow_type } => {
            HostValue::Capability { address: *address, path: path.clone(), borrow_type: *borrow_type }
        }
        Value::Optional(inner) => HostValue::Optional(inner.as_ref().map(|v| Box::new(export_inner(v, heap, visiting)))),
        Value::Array(array) => HostValue::Array(array.iter().map(|v| export_inner(v, heap, visiting)).collect()),
        Value::Dictionary(dict) => HostValue::Dictionary(
            dict.iter().map(|(k, v)| (export_dictionary_key(k), export_inner(v, heap, visiting))).collect(),
        ),
        Value::Composite(composite) => export_composite(composite, heap, visiting),
        Value::Reference(ReferenceValue::Ephemeral { target, .. }) => {
            if !visiting.insert(*target) {
                return HostValue::Optional(None);
            }
            let exported = match heap.get(*target) {
                Some(pointee) => export_inner(pointee, heap, visiting),
                None => HostValue::Optional(None),
            };
            visiting.remove(target);
            exported
        }
        // A storage reference is dereferenced once; the bridge doesn't
        // walk further link chains on the host's behalf.
        Value::Reference(ReferenceValue::Storage { .. }) => HostValue::Optional(None),
    }
}

fn export_composite(composite: &CompositeValue, heap: &Heap, visiting: &mut FxHashSet<SlotId>) -> HostValue {
    let fields = composite.iter_fields().map(|(name, v)| (name.clone(), export_inner(v, heap, visiting))).collect();
    HostValue::Composite { type_id: composite.type_id, fields }
}

fn export_dictionary_key(key: &crate::container::DictionaryKey) -> HostValue {
    use crate::container::DictionaryKey as K;
    match key {
        K::Bool(b) => HostValue::Bool(*b),
        K::Address(a) => HostValue::Address(*a),
        K::String(s) => HostValue::String(s.clone()),
        K::Character(c) => HostValue::Character(c.clone()),
        K::Integer(primitive, magnitude) => HostValue::Integer { primitive: *primitive, digits: magnitude.to_string() },
        K::Fix64(n) => HostValue::Fix64(*n),
        K::UFix64(n) => HostValue::UFix64(*n),
    }
}

/// Imports a host value against `expected_type`. Every inbound
/// composite must match a resolved composite type in `types`; a
/// capability's borrow type must itself resolve to a reference type.
pub fn import(host_value: &HostValue, expected_type: TypeId, types: &TypeInterner, span: Span) -> Result<Value, InterpreterError> {
    match host_value {
        HostValue::Void => Ok(Value::Void),
        HostValue::Bool(b) => Ok(Value::Bool(*b)),
        HostValue::String(s) => Ok(Value::String(s.clone())),
        HostValue::Character(c) => Ok(Value::Character(c.clone())),
        HostValue::Address(a) => Ok(Value::Address(*a)),
        HostValue::Integer { primitive, digits } => {
            let magnitude: BigInt = digits
                .parse()
                .map_err(|_| InterpreterError::new(span, ErrorKind::ForceCastFailed("malformed integer literal".to_string())))?;
            Ok(Value::Integer(IntegerValue::new_unchecked(*primitive, magnitude)))
        }
        HostValue::Fix64(n) => Ok(Value::Fix64(*n)),
        HostValue::UFix64(n) => Ok(Value::UFix64(*n)),
        HostValue::Path(p) => Ok(Value::Path(p.clone())),
        HostValue::TypeValue(t) => Ok(Value::MetaType(*t)),
        HostValue::Link(l) => Ok(Value::Link(l.clone())),
        HostValue::Optional(inner) => match inner {
            Some(v) => Ok(Value::Optional(Some(Box::new(import(v, expected_type, types, span)?)))),
            None => Ok(Value::Optional(None)),
        },
        HostValue::Array(elements) => {
            let element_type = match types.get(expected_type) {
                TypeData::VariableArray(elem) | TypeData::ConstantArray(elem, _) => elem,
                _ => TypeId::INVALID,
            };
            let mut array = ArrayValue::new(element_type);
            for element in elements {
                array.append(import(element, element_type, types, span)?);
            }
            Ok(Value::Array(array))
        }
        HostValue::Dictionary(entries) => {
            let (key_type, value_type) = match types.get(expected_type) {
                TypeData::Dictionary { key, value } => (key, value),
                _ => (TypeId::INVALID, TypeId::INVALID),
            };
            let mut dict = DictionaryValue::new(key_type, value_type);
            for (key, value) in entries {
                let imported_key = import(key, key_type, types, span)?;
                let Some(key) = imported_key.as_dictionary_key() else {
                    return Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("dictionary key is not hashable".to_string())));
                };
                dict.insert(key, import(value, value_type, types, span)?);
            }
            Ok(Value::Dictionary(dict))
        }
        HostValue::Composite { type_id, fields } => {
            if *type_id != expected_type {
                return Err(InterpreterError::new(
                    span,
                    ErrorKind::ForceCastFailed("inbound composite does not match the resolved composite type".to_string()),
                ));
            }
            let mut composite = CompositeValue::new(String::new(), *type_id, None);
            for (name, value) in fields {
                composite.set_field(name.clone(), import(value, TypeId::INVALID, types, span)?);
            }
            Ok(Value::Composite(composite))
        }
        HostValue::Capability { address, path, borrow_type } => {
            let is_reference = matches!(types.get(*borrow_type), TypeData::Reference { .. });
            if !is_reference {
                return Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("capability borrow type must be a reference type".to_string())));
            }
            Ok(Value::Capability { address: *address, path: path.clone(), borrow_type: *borrow_type })
        }
    }
}

/// Builds the transient "simple composite" representation used for a
/// built-in value like `PublicKey`/`HashAlgorithm`/`SignatureAlgorithm`
/// — no persisted counterpart, constructed directly with its computed
/// fields already filled in.
#[must_use]
pub fn simple_composite(type_name: impl Into<String>, type_id: TypeId, fields: Vec<(String, Value)>) -> CompositeValue {
    let mut composite = CompositeValue::new(type_name, type_id, None);
    for (name, value) in fields {
        composite.set_field(name, value);
    }
    composite
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Heap;

    #[test]
    fn scalars_export_unchanged() {
        let heap = Heap::new();
        assert_eq!(export(&Value::Bool(true), &heap), HostValue::Bool(true));
        assert_eq!(export(&Value::String("hi".to_string()), &heap), HostValue::String("hi".to_string()));
    }

    #[test]
    fn a_self_referential_ephemeral_reference_exports_as_nil_not_an_infinite_loop() {
        let mut heap = Heap::new();
        let slot = heap.alloc(Value::Void);
        let cyclic = Value::Reference(ReferenceValue::Ephemeral { target: slot, authorized: false, borrow_type: TypeId::INVALID });
        heap.set(slot, cyclic.clone());
        assert_eq!(export(&cyclic, &heap), HostValue::Optional(None));
    }

    #[test]
    fn importing_a_capability_with_a_non_reference_borrow_type_fails() {
        let types = TypeInterner::new();
        let host_value = HostValue::Capability {
            address: Address::new([0; 8]),
            path: PathValue::new(crate::storage::StorageDomain::Public, "p"),
            borrow_type: TypeId::INT,
        };
        let result = import(&host_value, TypeId::INVALID, &types, Span::new(0, 0));
        assert!(result.is_err());
    }
}
