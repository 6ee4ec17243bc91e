//! Static Values & Static Types.
//!
//! `StaticType` is the serializable mirror of `TypeData` used by the
//! interpreter and storage layer — it owns its nominal names as plain
//! strings (rather than interned `Atom`s scoped to one `TypeInterner`) so it
//! can cross the storage/import boundary and be compared across runs.

use crate::composite::NominalRegistry;
use crate::type_id::{TypeData, TypeId, TypeInterner};
use crate::primitive::Primitive;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaticLocation {
    Builtin,
    Account([u8; 8]),
    Script(u64),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaticType {
    Primitive(String),
    Optional(Box<StaticType>),
    VariableArray(Box<StaticType>),
    ConstantArray(Box<StaticType>, u64),
    Dictionary(Box<StaticType>, Box<StaticType>),
    Reference { authorized: bool, referenced: Box<StaticType> },
    Composite { location: StaticLocation, qualified_name: Vec<String> },
    Interface { location: StaticLocation, qualified_name: Vec<String> },
    Capability(Box<StaticType>),
    AnyStruct,
    AnyResource,
    MetaType,
}

fn primitive_name(p: Primitive) -> String {
    match p {
        Primitive::Bool => "Bool".into(),
        Primitive::Address => "Address".into(),
        Primitive::String => "String".into(),
        Primitive::Character => "Character".into(),
        Primitive::Void => "Void".into(),
        Primitive::Never => "Never".into(),
        Primitive::Path => "Path".into(),
        Primitive::Int => "Int".into(),
        Primitive::UInt => "UInt".into(),
        Primitive::IntN(w) => format!("Int{w}"),
        Primitive::UIntN(w) => format!("UInt{w}"),
        Primitive::WordN(w) => format!("Word{w}"),
        Primitive::Fix64 => "Fix64".into(),
        Primitive::UFix64 => "UFix64".into(),
    }
}

/// Exports an interned `TypeId` to its serializable `StaticType` mirror.
/// Composite/interface restricted-type members are flattened to their
/// nominal identity; member shape is not carried (the checker's
/// `NominalRegistry` is the source of truth for that on re-import).
pub fn to_static(interner: &TypeInterner, registry: &NominalRegistry, ty: TypeId) -> StaticType {
    match interner.get(ty) {
        TypeData::Primitive(p) => StaticType::Primitive(primitive_name(p)),
        TypeData::Optional(inner) => StaticType::Optional(Box::new(to_static(interner, registry, inner))),
        TypeData::VariableArray(e) => StaticType::VariableArray(Box::new(to_static(interner, registry, e))),
        TypeData::ConstantArray(e, n) => StaticType::ConstantArray(Box::new(to_static(interner, registry, e)), n),
        TypeData::Dictionary { key, value } => StaticType::Dictionary(
            Box::new(to_static(interner, registry, key)),
            Box::new(to_static(interner, registry, value)),
        ),
        TypeData::Reference { authorized, referenced } => StaticType::Reference {
            authorized,
            referenced: Box::new(to_static(interner, registry, referenced)),
        },
        TypeData::Composite(id) => {
            let info = registry.composite(id);
            StaticType::Composite {
                location: to_static_location(info.location),
                qualified_name: info.qualified_name.iter().map(|a| interner.resolve_string(*a).to_string()).collect(),
            }
        }
        TypeData::Interface(id) => {
            let info = registry.interface(id);
            StaticType::Interface {
                location: to_static_location(info.location),
                qualified_name: info.qualified_name.iter().map(|a| interner.resolve_string(*a).to_string()).collect(),
            }
        }
        TypeData::Restricted { base: Some(base), .. } => to_static(interner, registry, base),
        TypeData::Restricted { base: None, .. } => StaticType::AnyStruct,
        TypeData::Capability { borrow_type } => StaticType::Capability(Box::new(to_static(interner, registry, borrow_type))),
        TypeData::MetaType => StaticType::MetaType,
        TypeData::AnyStruct => StaticType::AnyStruct,
        TypeData::AnyResource => StaticType::AnyResource,
        TypeData::Function(_) | TypeData::Invalid => StaticType::AnyStruct,
    }
}

fn to_static_location(loc: crate::location::Location) -> StaticLocation {
    match loc {
        crate::location::Location::Builtin => StaticLocation::Builtin,
        crate::location::Location::Account(addr) => StaticLocation::Account(addr.0),
        crate::location::Location::Script(id) => StaticLocation::Script(id),
    }
}
