//! `TypeId` interning and the closed `TypeData` universe.

use crate::composite::{CompositeId, InterfaceId};
use crate::primitive::Primitive;
use cadence_ast::ReceiverKind;
use cadence_common::Atom;
use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// An interned type. Equality is id equality after interning, which is
/// sound because `TypeInterner::intern` deduplicates by `TypeData`
/// structural equality: two structurally identical types always share one
/// `TypeId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

impl std::fmt::Debug for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct ParamInfo {
    pub label: Option<Atom>,
    pub ty: TypeId,
}

impl ParamInfo {
    #[must_use]
    pub fn unnamed(ty: TypeId) -> Self {
        ParamInfo { label: None, ty }
    }
}

#[derive(Clone, Debug)]
pub struct FunctionShape {
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
    pub receiver: ReceiverKind,
}

// `ReceiverKind` has no derived Eq/Hash in cadence-ast; implement the
// structural comparisons TypeData needs locally.
fn receiver_eq(a: ReceiverKind, b: ReceiverKind) -> bool {
    matches!(
        (a, b),
        (ReceiverKind::None, ReceiverKind::None) | (ReceiverKind::Value, ReceiverKind::Value)
    ) || matches!(
        (a, b),
        (ReceiverKind::Reference { authorized: x }, ReceiverKind::Reference { authorized: y }) if x == y
    )
}

impl PartialEq for FunctionShape {
    fn eq(&self, other: &Self) -> bool {
        self.return_type == other.return_type
            && receiver_eq(self.receiver, other.receiver)
            && self.params.len() == other.params.len()
            && self.params.iter().zip(&other.params).all(|(a, b)| a.ty == b.ty && a.label == b.label)
    }
}
impl Eq for FunctionShape {}
impl std::hash::Hash for FunctionShape {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.return_type.hash(state);
        for p in &self.params {
            p.label.hash(state);
            p.ty.hash(state);
        }
    }
}

/// The closed universe of type constructors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Primitive(Primitive),
    Optional(TypeId),
    VariableArray(TypeId),
    ConstantArray(TypeId, u64),
    Dictionary { key: TypeId, value: TypeId },
    Reference { authorized: bool, referenced: TypeId },
    Function(FunctionShape),
    Composite(CompositeId),
    Interface(InterfaceId),
    /// `AnyStruct{I...}` / `AnyResource{I...}` / `T{I...}`. `base = None`
    /// only for the bare `{I1, I2}` syntax over `AnyStruct`.
    Restricted { base: Option<TypeId>, interfaces: Vec<InterfaceId> },
    Capability { borrow_type: TypeId },
    MetaType,
    /// The top of non-resource types.
    AnyStruct,
    /// The top of resource types.
    AnyResource,
    /// Synthesized by the checker on a type error so checking can
    /// continue past it instead of aborting on the first mistake.
    Invalid,
}

/// Interns `TypeData` into small, `Copy` `TypeId`s.
///
/// A fixed set of "well-known" types (primitives, `AnyStruct`/
/// `AnyResource`, `Never`/`Void`, `MetaType`, `Invalid`) are interned
/// eagerly at construction at stable indices, so every `TypeInterner`
/// instance agrees on e.g. `TypeId::BOOL` without callers interning it
/// themselves.
pub struct TypeInterner {
    data: RefCell<Vec<TypeData>>,
    dedup: RefCell<FxHashMap<TypeData, TypeId>>,
    atoms: cadence_common::Interner,
}

/// The well-known types, in the fixed order that determines their
/// `TypeId`. Index into this array *is* the `TypeId` value, so adding an
/// entry anywhere but the end would silently renumber every constant below.
const WELL_KNOWN: &[(&str, fn() -> TypeData)] = &[
    ("NEVER", || TypeData::Primitive(Primitive::Never)),
    ("VOID", || TypeData::Primitive(Primitive::Void)),
    ("BOOL", || TypeData::Primitive(Primitive::Bool)),
    ("ADDRESS", || TypeData::Primitive(Primitive::Address)),
    ("STRING", || TypeData::Primitive(Primitive::String)),
    ("CHARACTER", || TypeData::Primitive(Primitive::Character)),
    ("PATH", || TypeData::Primitive(Primitive::Path)),
    ("INT", || TypeData::Primitive(Primitive::Int)),
    ("UINT", || TypeData::Primitive(Primitive::UInt)),
    ("INT8", || TypeData::Primitive(Primitive::IntN(8))),
    ("INT16", || TypeData::Primitive(Primitive::IntN(16))),
    ("INT32", || TypeData::Primitive(Primitive::IntN(32))),
    ("INT64", || TypeData::Primitive(Primitive::IntN(64))),
    ("INT128", || TypeData::Primitive(Primitive::IntN(128))),
    ("INT256", || TypeData::Primitive(Primitive::IntN(256))),
    ("UINT8", || TypeData::Primitive(Primitive::UIntN(8))),
    ("UINT16", || TypeData::Primitive(Primitive::UIntN(16))),
    ("UINT32", || TypeData::Primitive(Primitive::UIntN(32))),
    ("UINT64", || TypeData::Primitive(Primitive::UIntN(64))),
    ("UINT128", || TypeData::Primitive(Primitive::UIntN(128))),
    ("UINT256", || TypeData::Primitive(Primitive::UIntN(256))),
    ("WORD8", || TypeData::Primitive(Primitive::WordN(8))),
    ("WORD16", || TypeData::Primitive(Primitive::WordN(16))),
    ("WORD32", || TypeData::Primitive(Primitive::WordN(32))),
    ("WORD64", || TypeData::Primitive(Primitive::WordN(64))),
    ("WORD128", || TypeData::Primitive(Primitive::WordN(128))),
    ("WORD256", || TypeData::Primitive(Primitive::WordN(256))),
    ("FIX64", || TypeData::Primitive(Primitive::Fix64)),
    ("UFIX64", || TypeData::Primitive(Primitive::UFix64)),
    ("ANY_STRUCT", || TypeData::AnyStruct),
    ("ANY_RESOURCE", || TypeData::AnyResource),
    ("META_TYPE", || TypeData::MetaType),
    ("INVALID", || TypeData::Invalid),
];

impl TypeId {
    pub const NEVER: TypeId = TypeId(0);
    pub const VOID: TypeId = TypeId(1);
    pub const BOOL: TypeId = TypeId(2);
    pub const ADDRESS: TypeId = TypeId(3);
    pub const STRING: TypeId = TypeId(4);
    pub const CHARACTER: TypeId = TypeId(5);
    pub const PATH: TypeId = TypeId(6);
    pub const INT: TypeId = TypeId(7);
    pub const UINT: TypeId = TypeId(8);
    pub const INT8: TypeId = TypeId(9);
    pub const INT16: TypeId = TypeId(10);
    pub const INT32: TypeId = TypeId(11);
    pub const INT64: TypeId = TypeId(12);
    pub const INT128: TypeId = TypeId(13);
    pub const INT256: TypeId = TypeId(14);
    pub const UINT8: TypeId = TypeId(15);
    pub const UINT16: TypeId = TypeId(16);
    pub const UINT32: TypeId = TypeId(17);
    pub const UINT64: TypeId = TypeId(18);
    pub const UINT128: TypeId = TypeId(19);
    pub const UINT256: TypeId = TypeId(20);
    pub const WORD8: TypeId = TypeId(21);
    pub const WORD16: TypeId = TypeId(22);
    pub const WORD32: TypeId = TypeId(23);
    pub const WORD64: TypeId = TypeId(24);
    pub const WORD128: TypeId = TypeId(25);
    pub const WORD256: TypeId = TypeId(26);
    pub const FIX64: TypeId = TypeId(27);
    pub const UFIX64: TypeId = TypeId(28);
    pub const ANY_STRUCT: TypeId = TypeId(29);
    pub const ANY_RESOURCE: TypeId = TypeId(30);
    pub const META_TYPE: TypeId = TypeId(31);
    pub const INVALID: TypeId = TypeId(32);
}

fn bootstrap(table: &mut Vec<TypeData>, dedup: &mut FxHashMap<TypeData, TypeId>) {
    for (i, (_name, make)) in WELL_KNOWN.iter().enumerate() {
        let data = make();
        table.push(data.clone());
        dedup.insert(data, TypeId(i as u32));
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    #[must_use]
    pub fn new() -> Self {
        let mut table = Vec::new();
        let mut dedup = FxHashMap::default();
        bootstrap(&mut table, &mut dedup);
        TypeInterner {
            data: RefCell::new(table),
            dedup: RefCell::new(dedup),
            atoms: cadence_common::Interner::new(),
        }
    }

    #[must_use]
    pub fn intern_string(&self, s: &str) -> Atom {
        self.atoms.intern(s)
    }

    #[must_use]
    pub fn resolve_string(&self, atom: Atom) -> std::rc::Rc<str> {
        self.atoms.resolve(atom)
    }

    pub fn intern(&self, data: TypeData) -> TypeId {
        if let Some(&id) = self.dedup.borrow().get(&data) {
            return id;
        }
        let mut table = self.data.borrow_mut();
        let id = TypeId(table.len() as u32);
        table.push(data.clone());
        self.dedup.borrow_mut().insert(data, id);
        id
    }

    #[must_use]
    pub fn get(&self, id: TypeId) -> TypeData {
        self.data.borrow()[id.0 as usize].clone()
    }

    pub fn optional(&self, inner: TypeId) -> TypeId {
        self.intern(TypeData::Optional(inner))
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeData::VariableArray(element))
    }

    pub fn constant_array(&self, element: TypeId, size: u64) -> TypeId {
        self.intern(TypeData::ConstantArray(element, size))
    }

    pub fn dictionary(&self, key: TypeId, value: TypeId) -> TypeId {
        self.intern(TypeData::Dictionary { key, value })
    }

    pub fn reference(&self, authorized: bool, referenced: TypeId) -> TypeId {
        self.intern(TypeData::Reference { authorized, referenced })
    }

    pub fn function(&self, shape: FunctionShape) -> TypeId {
        self.intern(TypeData::Function(shape))
    }

    pub fn composite(&self, id: CompositeId) -> TypeId {
        self.intern(TypeData::Composite(id))
    }

    pub fn interface(&self, id: InterfaceId) -> TypeId {
        self.intern(TypeData::Interface(id))
    }

    pub fn restricted(&self, base: Option<TypeId>, interfaces: Vec<InterfaceId>) -> TypeId {
        self.intern(TypeData::Restricted { base, interfaces })
    }

    pub fn capability(&self, borrow_type: TypeId) -> TypeId {
        self.intern(TypeData::Capability { borrow_type })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_ids_are_stable_across_instances() {
        let a = TypeInterner::new();
        let b = TypeInterner::new();
        assert_eq!(TypeId::BOOL, TypeId::BOOL);
        assert_eq!(a.get(TypeId::BOOL), b.get(TypeId::BOOL));
    }

    #[test]
    fn structurally_equal_types_dedup_to_the_same_id() {
        let interner = TypeInterner::new();
        let a1 = interner.array(TypeId::INT);
        let a2 = interner.array(TypeId::INT);
        assert_eq!(a1, a2);
        let a3 = interner.array(TypeId::STRING);
        assert_ne!(a1, a3);
    }

    #[test]
    fn optional_of_optional_is_distinct_from_single_optional() {
        let interner = TypeInterner::new();
        let t = interner.optional(TypeId::INT);
        let tt = interner.optional(t);
        assert_ne!(t, tt);
    }
}
