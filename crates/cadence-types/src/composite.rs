//! Nominal composite/interface registries.
//!
//! Composite and interface *identity* lives in the interner's dedup table
//! (keyed by `(Location, qualified name)`); their *shape* (fields,
//! conformances, required members) lives here, indexed by a small integer
//! id so `TypeData::Composite`/`TypeData::Interface` stay `Copy`.

use crate::location::Location;
use crate::type_id::TypeId;
use cadence_ast::{Access, CompositeKind};
use cadence_common::Atom;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompositeId(pub(crate) u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InterfaceId(pub(crate) u32);

#[derive(Clone, Debug)]
pub struct FieldInfo {
    pub name: Atom,
    pub ty: TypeId,
    pub access: Access,
    pub is_var: bool,
}

/// A declared function member: its name and its full `TypeData::Function`
/// type (receiver, parameters, return type all folded in).
#[derive(Clone, Debug)]
pub struct FunctionMember {
    pub name: Atom,
    pub ty: TypeId,
    pub access: Access,
}

#[derive(Clone, Debug)]
pub struct CompositeInfo {
    pub location: Location,
    pub qualified_name: Vec<Atom>,
    pub kind: CompositeKind,
    pub fields: Vec<FieldInfo>,
    pub functions: Vec<FunctionMember>,
    /// Interfaces this composite declares conformance to, directly or
    /// transitively (the checker is responsible for populating the
    /// transitive closure when it registers the type).
    pub conformances: Vec<InterfaceId>,
}

impl CompositeInfo {
    #[must_use]
    pub fn field(&self, name: Atom) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn function(&self, name: Atom) -> Option<&FunctionMember> {
        self.functions.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn conforms_to(&self, iface: InterfaceId) -> bool {
        self.conformances.contains(&iface)
    }
}

#[derive(Clone, Debug)]
pub struct RequiredFunction {
    pub name: Atom,
    pub ty: TypeId,
    /// Whether the interface supplies a default body (composites
    /// conforming to it may omit overriding).
    pub has_default: bool,
}

#[derive(Clone, Debug)]
pub struct InterfaceInfo {
    pub location: Location,
    pub qualified_name: Vec<Atom>,
    pub applies_to: CompositeKind,
    pub required_fields: Vec<FieldInfo>,
    pub required_functions: Vec<RequiredFunction>,
    /// Interfaces this interface itself extends.
    pub extends: Vec<InterfaceId>,
}

/// Owns the shape tables for all registered composite/interface types.
#[derive(Default)]
pub struct NominalRegistry {
    composites: Vec<CompositeInfo>,
    interfaces: Vec<InterfaceInfo>,
}

impl NominalRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_composite(&mut self, info: CompositeInfo) -> CompositeId {
        let id = CompositeId(self.composites.len() as u32);
        self.composites.push(info);
        id
    }

    pub fn register_interface(&mut self, info: InterfaceInfo) -> InterfaceId {
        let id = InterfaceId(self.interfaces.len() as u32);
        self.interfaces.push(info);
        id
    }

    #[must_use]
    pub fn composite(&self, id: CompositeId) -> &CompositeInfo {
        &self.composites[id.0 as usize]
    }

    pub fn composite_mut(&mut self, id: CompositeId) -> &mut CompositeInfo {
        &mut self.composites[id.0 as usize]
    }

    #[must_use]
    pub fn interface(&self, id: InterfaceId) -> &InterfaceInfo {
        &self.interfaces[id.0 as usize]
    }

    pub fn interface_mut(&mut self, id: InterfaceId) -> &mut InterfaceInfo {
        &mut self.interfaces[id.0 as usize]
    }

    /// Whether `iface` is reachable from `from` via direct or transitive
    /// `extends` edges (used for interface-to-interface conformance).
    #[must_use]
    pub fn interface_extends(&self, from: InterfaceId, target: InterfaceId) -> bool {
        if from == target {
            return true;
        }
        let mut stack = vec![from];
        let mut seen = std::collections::HashSet::new();
        while let Some(cur) = stack.pop() {
            if !seen.insert(cur) {
                continue;
            }
            let info = self.interface(cur);
            if info.extends.contains(&target) {
                return true;
            }
            stack.extend(info.extends.iter().copied());
        }
        false
    }
}
