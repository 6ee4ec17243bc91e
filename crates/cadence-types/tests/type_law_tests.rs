//! Type system law tests: reflexivity, transitivity, and the
//! auth-reference asymmetry, each as its own test.

use cadence_types::{CompositeInfo, FieldInfo, InterfaceInfo, Location, NominalRegistry, SubtypeChecker, TypeId, TypeInterner};
use cadence_ast::CompositeKind;

fn checker<'a>(interner: &'a TypeInterner, registry: &'a NominalRegistry) -> SubtypeChecker<'a> {
    SubtypeChecker::new(interner, registry)
}

#[test]
fn reflexivity_holds_for_intrinsics() {
    let interner = TypeInterner::new();
    let registry = NominalRegistry::new();
    let checker = checker(&interner, &registry);

    for ty in [
        TypeId::BOOL,
        TypeId::STRING,
        TypeId::INT,
        TypeId::UINT64,
        TypeId::FIX64,
        TypeId::ANY_STRUCT,
        TypeId::ANY_RESOURCE,
        TypeId::NEVER,
    ] {
        assert!(checker.is_subtype_of(ty, ty), "{ty:?} <: itself failed");
    }
}

#[test]
fn reflexivity_holds_for_constructed_types() {
    let interner = TypeInterner::new();
    let registry = NominalRegistry::new();
    let checker = checker(&interner, &registry);

    let arr = interner.array(TypeId::INT);
    let dict = interner.dictionary(TypeId::STRING, TypeId::BOOL);
    let opt = interner.optional(TypeId::UINT8);
    assert!(checker.is_subtype_of(arr, arr));
    assert!(checker.is_subtype_of(dict, dict));
    assert!(checker.is_subtype_of(opt, opt));
}

#[test]
fn transitivity_holds_across_optional_and_top_types() {
    let interner = TypeInterner::new();
    let registry = NominalRegistry::new();
    let checker = checker(&interner, &registry);

    // Int <: Int? <: AnyStruct?  (chained through two distinct rules)
    let int_opt = interner.optional(TypeId::INT);
    let any_struct_opt = interner.optional(TypeId::ANY_STRUCT);
    assert!(checker.is_subtype_of(TypeId::INT, int_opt));
    assert!(checker.is_subtype_of(int_opt, any_struct_opt));
    assert!(checker.is_subtype_of(TypeId::INT, any_struct_opt));
}

#[test]
fn never_is_bottom_for_every_type() {
    let interner = TypeInterner::new();
    let registry = NominalRegistry::new();
    let checker = checker(&interner, &registry);

    assert!(checker.is_subtype_of(TypeId::NEVER, TypeId::BOOL));
    assert!(checker.is_subtype_of(TypeId::NEVER, TypeId::ANY_RESOURCE));
    assert!(checker.is_subtype_of(TypeId::NEVER, interner.array(TypeId::STRING)));
}

#[test]
fn struct_and_resource_hierarchies_never_cross() {
    let mut registry = NominalRegistry::new();
    let interner = TypeInterner::new();

    let name = interner.intern_string("Vault");
    let resource_id = registry.register_composite(CompositeInfo {
        location: Location::Builtin,
        qualified_name: vec![name],
        kind: CompositeKind::Resource,
        fields: vec![],
        functions: vec![],
        conformances: vec![],
    });
    let vault = interner.composite(resource_id);
    let checker = checker(&interner, &registry);

    assert!(checker.is_subtype_of(vault, TypeId::ANY_RESOURCE));
    assert!(!checker.is_subtype_of(vault, TypeId::ANY_STRUCT));
    assert!(!checker.is_subtype_of(TypeId::ANY_STRUCT, TypeId::ANY_RESOURCE));
}

#[test]
fn auth_reference_is_subtype_of_unauthorized_but_not_conversely() {
    // auth &T <: &T, never the reverse.
    let interner = TypeInterner::new();
    let registry = NominalRegistry::new();
    let checker = checker(&interner, &registry);

    let auth_ref = interner.reference(true, TypeId::INT);
    let plain_ref = interner.reference(false, TypeId::INT);

    assert!(checker.is_subtype_of(auth_ref, plain_ref));
    assert!(!checker.is_subtype_of(plain_ref, auth_ref));
}

#[test]
fn composite_conforms_to_declared_interface_only() {
    let mut registry = NominalRegistry::new();
    let interner = TypeInterner::new();

    let receiver_name = interner.intern_string("Receiver");
    let vault_name = interner.intern_string("Vault");
    let iface = registry.register_interface(InterfaceInfo {
        location: Location::Builtin,
        qualified_name: vec![receiver_name],
        applies_to: CompositeKind::Resource,
        required_fields: vec![],
        required_functions: vec![],
        extends: vec![],
    });
    let other_iface = registry.register_interface(InterfaceInfo {
        location: Location::Builtin,
        qualified_name: vec![interner.intern_string("Burnable")],
        applies_to: CompositeKind::Resource,
        required_fields: vec![],
        required_functions: vec![],
        extends: vec![],
    });
    let vault = registry.register_composite(CompositeInfo {
        location: Location::Builtin,
        qualified_name: vec![vault_name],
        kind: CompositeKind::Resource,
        fields: vec![FieldInfo { name: interner.intern_string("balance"), ty: TypeId::UFIX64, access: cadence_ast::Access::Public, is_var: true }],
        functions: vec![],
        conformances: vec![iface],
    });

    let vault_ty = interner.composite(vault);
    let receiver_ty = interner.interface(iface);
    let burnable_ty = interner.interface(other_iface);
    let checker = checker(&interner, &registry);

    assert!(checker.is_subtype_of(vault_ty, receiver_ty));
    assert!(!checker.is_subtype_of(vault_ty, burnable_ty));
}

#[test]
fn least_common_super_type_falls_back_to_the_kind_top() {
    let mut registry = NominalRegistry::new();
    let interner = TypeInterner::new();
    let checker = checker(&interner, &registry);

    assert_eq!(checker.least_common_super_type(&[TypeId::INT, TypeId::INT]), TypeId::INT);
    assert_eq!(checker.least_common_super_type(&[TypeId::INT, TypeId::STRING]), TypeId::ANY_STRUCT);

    let vault = registry.register_composite(CompositeInfo {
        location: Location::Builtin,
        qualified_name: vec![interner.intern_string("Vault")],
        kind: CompositeKind::Resource,
        fields: vec![],
        functions: vec![],
        conformances: vec![],
    });
    let vault_ty = interner.composite(vault);
    let checker = checker(&interner, &registry);
    assert_eq!(checker.least_common_super_type(&[vault_ty, TypeId::ANY_RESOURCE]), TypeId::ANY_RESOURCE);

    // Crossing the struct/resource boundary is invalid (caller signals error).
    assert_eq!(checker.least_common_super_type(&[vault_ty, TypeId::STRING]), TypeId::INVALID);
}
