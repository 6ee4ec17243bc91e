//! Interface conformance checking.
//!
//! A composite conforms to an interface only if every required field is
//! present with a compatible type and mutability, and every required
//! function is present with a signature the interface's declared one is
//! assignable from (so a conforming override may only be as strict or
//! looser than what callers relying on the interface type expect).

use crate::diagnostics;
use cadence_common::{Diagnostic, Span};
use cadence_types::{CompositeId, InterfaceId, NominalRegistry, SubtypeChecker, TypeInterner};

/// Checks `composite`'s declared conformance to `iface`, pushing one
/// diagnostic per missing or incompatible requirement into `out`. Returns
/// whether every requirement was satisfied (the same bit recorded into
/// `Elaboration::conformance_witnesses`).
pub fn check_conformance(
    registry: &NominalRegistry,
    subtypes: &SubtypeChecker<'_>,
    types: &TypeInterner,
    composite: CompositeId,
    iface: InterfaceId,
    composite_name: &str,
    iface_name: &str,
    span: Span,
    out: &mut Vec<Diagnostic>,
) -> bool {
    let info = registry.composite(composite);
    let required = registry.interface(iface);
    let mut ok = true;

    for req_field in &required.required_fields {
        let satisfied = match info.field(req_field.name) {
            Some(field) => {
                let type_ok = subtypes.is_subtype_of(field.ty, req_field.ty);
                let mutability_ok = field.is_var || !req_field.is_var;
                type_ok && mutability_ok
            }
            None => false,
        };
        if !satisfied {
            out.push(diagnostics::invalid_interface_conformance(span, composite_name, iface_name, &types.resolve_string(req_field.name)));
            ok = false;
        }
    }

    for req_fn in &required.required_functions {
        let satisfied = match info.function(req_fn.name) {
            Some(func) => subtypes.is_subtype_of(func.ty, req_fn.ty),
            None => req_fn.has_default,
        };
        if !satisfied {
            out.push(diagnostics::invalid_interface_conformance(span, composite_name, iface_name, &types.resolve_string(req_fn.name)));
            ok = false;
        }
    }

    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_ast::{Access, CompositeKind};
    use cadence_common::Span;
    use cadence_types::{CompositeInfo, FieldInfo, FunctionMember, InterfaceInfo, Location, RequiredFunction, TypeId, TypeInterner};

    #[test]
    fn missing_required_field_fails_conformance() {
        let types = TypeInterner::new();
        let balance = types.intern_string("balance");
        let mut registry = NominalRegistry::new();

        let iface = registry.register_interface(InterfaceInfo {
            location: Location::Builtin,
            qualified_name: vec![types.intern_string("Balance")],
            applies_to: CompositeKind::Resource,
            required_fields: vec![FieldInfo { name: balance, ty: TypeId::UFIX64, access: Access::Public, is_var: false }],
            required_functions: vec![],
            extends: vec![],
        });

        let composite = registry.register_composite(CompositeInfo {
            location: Location::Builtin,
            qualified_name: vec![types.intern_string("Vault")],
            kind: CompositeKind::Resource,
            fields: vec![],
            functions: vec![],
            conformances: vec![iface],
        });

        let subtypes = SubtypeChecker::new(&types, &registry);
        let mut out = Vec::new();
        let ok = check_conformance(&registry, &subtypes, &types, composite, iface, "Vault", "Balance", Span::dummy(), &mut out);
        assert!(!ok);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn present_field_and_function_satisfy_conformance() {
        let types = TypeInterner::new();
        let balance = types.intern_string("balance");
        let withdraw = types.intern_string("withdraw");
        let mut registry = NominalRegistry::new();

        let withdraw_ty = TypeId::NEVER;
        let iface = registry.register_interface(InterfaceInfo {
            location: Location::Builtin,
            qualified_name: vec![types.intern_string("Balance")],
            applies_to: CompositeKind::Resource,
            required_fields: vec![FieldInfo { name: balance, ty: TypeId::UFIX64, access: Access::Public, is_var: false }],
            required_functions: vec![RequiredFunction { name: withdraw, ty: withdraw_ty, has_default: false }],
            extends: vec![],
        });

        let composite = registry.register_composite(CompositeInfo {
            location: Location::Builtin,
            qualified_name: vec![types.intern_string("Vault")],
            kind: CompositeKind::Resource,
            fields: vec![FieldInfo { name: balance, ty: TypeId::UFIX64, access: Access::Public, is_var: false }],
            functions: vec![FunctionMember { name: withdraw, ty: withdraw_ty, access: Access::Public }],
            conformances: vec![iface],
        });

        let subtypes = SubtypeChecker::new(&types, &registry);
        let mut out = Vec::new();
        let ok = check_conformance(&registry, &subtypes, &types, composite, iface, "Vault", "Balance", Span::dummy(), &mut out);
        assert!(ok);
        assert!(out.is_empty());
    }
}
