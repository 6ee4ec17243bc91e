//! Saving a value in storage, linking a capability at a public path, and
//! borrowing through that link.

use cadence_ast::Program;
use cadence_common::{InterpreterConfig, Span};
use cadence_interpreter::{InMemoryHostEnvironment, InMemoryStorage, Interpreter, PathValue, ReferenceValue, StorageDomain, Value};
use cadence_types::{Address, SubtypeChecker, TypeId, TypeInterner};

fn span() -> Span {
    Span::new(0, 0)
}

fn empty_program() -> Program {
    Program { declarations: Vec::new() }
}

fn address() -> Address {
    Address::new([0, 0, 0, 0, 0, 0, 0, 1])
}

#[test]
fn borrowing_a_linked_capability_yields_a_reference_to_the_saved_value() {
    let program = empty_program();
    let types = TypeInterner::new();
    let registry = cadence_types::NominalRegistry::new();
    let mut host = InMemoryHostEnvironment::new(InMemoryStorage::new());
    let mut interpreter = Interpreter::new(InterpreterConfig::default(), &mut host, &types, &program);

    let addr = address();
    let storage_path = PathValue::new(StorageDomain::Storage, "p");
    let public_path = PathValue::new(StorageDomain::Public, "p");

    interpreter.storage_save(addr, storage_path.clone(), Value::Bool(true), span()).unwrap();
    interpreter.link(addr, public_path.clone(), storage_path, TypeId::BOOL, span()).unwrap();

    let subtypes = SubtypeChecker::new(&types, &registry);
    let borrowed = interpreter.borrow_capability(&subtypes, addr, public_path, TypeId::BOOL, span()).unwrap();
    match borrowed {
        Value::Optional(Some(inner)) => match *inner {
            Value::Reference(ReferenceValue::Storage { address, path, .. }) => {
                assert_eq!(address, addr);
                assert_eq!(path.identifier, "p");
            }
            other => panic!("expected a storage reference, got {other:?}"),
        },
        other => panic!("expected a populated optional, got {other:?}"),
    }
}

#[test]
fn borrowing_a_link_whose_target_holds_nothing_yields_nil() {
    let program = empty_program();
    let types = TypeInterner::new();
    let registry = cadence_types::NominalRegistry::new();
    let mut host = InMemoryHostEnvironment::new(InMemoryStorage::new());
    let mut interpreter = Interpreter::new(InterpreterConfig::default(), &mut host, &types, &program);

    let addr = address();
    let storage_path = PathValue::new(StorageDomain::Storage, "p");
    let public_path = PathValue::new(StorageDomain::Public, "p");

    // Link installed, but nothing was ever saved at its target.
    interpreter.link(addr, public_path.clone(), storage_path, TypeId::BOOL, span()).unwrap();

    let subtypes = SubtypeChecker::new(&types, &registry);
    let borrowed = interpreter.borrow_capability(&subtypes, addr, public_path, TypeId::BOOL, span()).unwrap();
    assert!(matches!(borrowed, Value::Optional(None)));
}

#[test]
fn borrowing_a_path_with_no_link_at_all_yields_nil() {
    let program = empty_program();
    let types = TypeInterner::new();
    let registry = cadence_types::NominalRegistry::new();
    let mut host = InMemoryHostEnvironment::new(InMemoryStorage::new());
    let mut interpreter = Interpreter::new(InterpreterConfig::default(), &mut host, &types, &program);

    let subtypes = SubtypeChecker::new(&types, &registry);
    let public_path = PathValue::new(StorageDomain::Public, "absent");
    let borrowed = interpreter.borrow_capability(&subtypes, address(), public_path, TypeId::BOOL, span()).unwrap();
    assert!(matches!(borrowed, Value::Optional(None)));
}

#[test]
fn saving_twice_at_the_same_path_is_rejected() {
    let program = empty_program();
    let types = TypeInterner::new();
    let mut host = InMemoryHostEnvironment::new(InMemoryStorage::new());
    let mut interpreter = Interpreter::new(InterpreterConfig::default(), &mut host, &types, &program);

    let addr = address();
    let storage_path = PathValue::new(StorageDomain::Storage, "p");
    interpreter.storage_save(addr, storage_path.clone(), Value::Bool(true), span()).unwrap();
    assert!(interpreter.storage_save(addr, storage_path, Value::Bool(false), span()).is_err());
}
