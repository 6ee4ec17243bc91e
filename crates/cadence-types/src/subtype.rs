//! Subtyping, assignability and least-common-supertype.

use crate::composite::NominalRegistry;
use crate::type_id::{TypeData, TypeId, TypeInterner};
use cadence_ast::CompositeKind;

/// Carries the nominal registry alongside the type interner, bundling the
/// query context the subtype relation needs rather than threading extra
/// parameters through every call.
pub struct SubtypeChecker<'a> {
    interner: &'a TypeInterner,
    registry: &'a NominalRegistry,
}

impl<'a> SubtypeChecker<'a> {
    #[must_use]
    pub fn new(interner: &'a TypeInterner, registry: &'a NominalRegistry) -> Self {
        SubtypeChecker { interner, registry }
    }

    #[must_use]
    pub fn is_resource_type(&self, ty: TypeId) -> bool {
        if ty == TypeId::ANY_RESOURCE {
            return true;
        }
        match self.interner.get(ty) {
            TypeData::Composite(id) => self.registry.composite(id).kind.is_resource(),
            TypeData::Restricted { base: Some(base), .. } => self.is_resource_type(base),
            TypeData::Restricted { base: None, .. } => false,
            _ => false,
        }
    }

    /// Is `a` usable wherever `b` is expected?
    #[must_use]
    pub fn is_subtype_of(&self, a: TypeId, b: TypeId) -> bool {
        self.is_subtype_depth(a, b, 0)
    }

    fn is_subtype_depth(&self, a: TypeId, b: TypeId, depth: usize) -> bool {
        if depth > cadence_common::limits::MAX_TYPE_RESOLUTION_DEPTH {
            return false;
        }
        // Error recovery: an invalid type is related to everything so a
        // single earlier type error does not cascade into unrelated ones.
        if a == TypeId::INVALID || b == TypeId::INVALID {
            return true;
        }
        // Every type is a subtype of itself.
        if a == b {
            return true;
        }
        // Never is bottom; uninhabited so it is a subtype of everything.
        if a == TypeId::NEVER {
            return true;
        }

        let da = self.interner.get(a);
        let db = self.interner.get(b);

        // T <: T?
        if let TypeData::Optional(b_inner) = &db {
            let a_inner = if let TypeData::Optional(x) = &da { *x } else { a };
            return self.is_subtype_depth(a_inner, *b_inner, depth + 1);
        }

        match (&da, &db) {
            // AnyStruct / AnyResource: top of their respective hierarchies.
            // A resource type is never a subtype of AnyStruct, and a
            // struct type is never a subtype of AnyResource.
            (_, TypeData::AnyStruct) => !self.is_resource_type(a),
            (_, TypeData::AnyResource) => self.is_resource_type(a),

            (TypeData::Composite(c), TypeData::Interface(i)) => self.registry.composite(*c).conforms_to(*i),

            (TypeData::Interface(i1), TypeData::Interface(i2)) => self.registry.interface_extends(*i1, *i2),

            (
                TypeData::Restricted { base: base_a, interfaces: ia },
                TypeData::Restricted { base: base_b, interfaces: ib },
            ) => {
                let bases_compatible = match (base_a, base_b) {
                    (Some(x), Some(y)) => x == y,
                    (None, None) => true,
                    // A concrete-base restriction can satisfy a bare one
                    // only if the base itself is AnyStruct/AnyResource-like;
                    // conservatively require an exact match otherwise.
                    _ => false,
                };
                bases_compatible && ib.iter().all(|j| ia.contains(j))
            }
            (TypeData::Restricted { interfaces: ia, .. }, TypeData::Interface(j)) => ia.contains(j),

            (TypeData::Reference { authorized: auth_a, referenced: ra }, TypeData::Reference { authorized: auth_b, referenced: rb }) => {
                // auth &T <: &T but never the reverse: dropping
                // authorization is fine, adding it is not.
                (*auth_a || !*auth_b) && self.is_subtype_depth(*ra, *rb, depth + 1)
            }

            (TypeData::VariableArray(ea), TypeData::VariableArray(eb)) => ea == eb,
            (TypeData::ConstantArray(ea, na), TypeData::ConstantArray(eb, nb)) => ea == eb && na == nb,
            (TypeData::Dictionary { key: ka, value: va }, TypeData::Dictionary { key: kb, value: vb }) => {
                ka == kb && va == vb
            }

            (TypeData::Function(fa), TypeData::Function(fb)) => {
                fa.params.len() == fb.params.len()
                    && fa
                        .params
                        .iter()
                        .zip(&fb.params)
                        // contravariant in parameters
                        .all(|(pa, pb)| self.is_subtype_depth(pb.ty, pa.ty, depth + 1))
                    // covariant in return type
                    && self.is_subtype_depth(fa.return_type, fb.return_type, depth + 1)
            }

            (TypeData::Capability { borrow_type: ba }, TypeData::Capability { borrow_type: bb }) => {
                self.is_subtype_depth(*ba, *bb, depth + 1)
            }

            _ => false,
        }
    }

    /// Can a value of `source` be assigned where `target` is declared?
    /// Assignability coincides with subtyping here: there is no implicit
    /// widening between numeric widths, so there is no extra conversion
    /// beyond the subtype relation.
    #[must_use]
    pub fn is_assignable(&self, source: TypeId, target: TypeId) -> bool {
        self.is_subtype_of(source, target)
    }

    /// The narrowest common supertype of a set of types, falling back to
    /// `AnyStruct`/`AnyResource` per kind homogeneity rather than
    /// attempting a full structural meet. Inputs crossing the
    /// struct/resource boundary produce `TypeId::INVALID`.
    #[must_use]
    pub fn least_common_super_type(&self, types: &[TypeId]) -> TypeId {
        match types {
            [] => TypeId::NEVER,
            [only] => *only,
            [first, rest @ ..] => {
                if rest.iter().all(|t| *t == *first) {
                    return *first;
                }
                let any_optional = types.iter().any(|t| matches!(self.interner.get(*t), TypeData::Optional(_)));
                let unwrap = |t: TypeId| if let TypeData::Optional(inner) = self.interner.get(t) { inner } else { t };
                let inners: Vec<TypeId> = types.iter().map(|t| unwrap(*t)).collect();

                let is_resource = self.is_resource_type(inners[0]);
                if inners.iter().any(|t| self.is_resource_type(*t) != is_resource) {
                    return TypeId::INVALID;
                }
                let top = if is_resource { TypeId::ANY_RESOURCE } else { TypeId::ANY_STRUCT };
                if any_optional {
                    self.interner.optional(top)
                } else {
                    top
                }
            }
        }
    }
}

#[must_use]
pub fn default_kind_top(kind: CompositeKind) -> TypeId {
    if kind.is_resource() {
        TypeId::ANY_RESOURCE
    } else {
        TypeId::ANY_STRUCT
    }
}
