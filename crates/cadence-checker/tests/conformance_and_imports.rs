use cadence_ast::{
    Access, CompositeDecl, CompositeKind, Declaration, FieldDecl, FunctionDecl, ImportDecl, InterfaceDecl, Parameter, Program, ReceiverKind,
    TypeExpr,
};
use cadence_checker::{check_program_with_imports, ImportedName, TableImportResolver};
use cadence_common::{CheckerConfig, DiagnosticCode, Span};
use cadence_types::{NominalRegistry, TypeId, TypeInterner};

fn span() -> Span {
    Span::new(0, 0)
}

fn interface_requiring_balance() -> Declaration {
    Declaration::Interface(InterfaceDecl {
        name: "Balance".to_string(),
        applies_to: CompositeKind::Resource,
        access: Access::Public,
        fields: vec![FieldDecl { name: "amount".to_string(), access: Access::Public, is_var: false, ty: TypeExpr::nominal("Int"), span: span() }],
        functions: Vec::new(),
        span: span(),
    })
}

#[test]
fn a_composite_missing_a_required_field_fails_conformance() {
    let types = TypeInterner::new();
    let mut registry = NominalRegistry::new();
    let vault = Declaration::Composite(CompositeDecl {
        name: "Vault".to_string(),
        kind: CompositeKind::Resource,
        access: Access::Public,
        conformances: vec!["Balance".to_string()],
        fields: Vec::new(),
        initializer: None,
        destructor: None,
        functions: Vec::new(),
        nested: Vec::new(),
        span: span(),
    });
    let program = Program { declarations: vec![interface_requiring_balance(), vault] };

    let result = check_program_with_imports(CheckerConfig::default(), &types, &mut registry, &program, None);
    assert!(result.diagnostics.iter().any(|d| d.code == DiagnosticCode::InvalidInterfaceConformance));
}

#[test]
fn a_composite_with_the_required_field_satisfies_conformance() {
    let types = TypeInterner::new();
    let mut registry = NominalRegistry::new();
    let vault = Declaration::Composite(CompositeDecl {
        name: "Vault".to_string(),
        kind: CompositeKind::Resource,
        access: Access::Public,
        conformances: vec!["Balance".to_string()],
        fields: vec![FieldDecl { name: "amount".to_string(), access: Access::Public, is_var: false, ty: TypeExpr::nominal("Int"), span: span() }],
        initializer: Some(FunctionDecl {
            name: "init".to_string(),
            access: Access::Public,
            receiver: ReceiverKind::Value,
            parameters: vec![Parameter { label: None, name: "amount".to_string(), ty: TypeExpr::nominal("Int"), span: span() }],
            return_type: None,
            pre_conditions: Vec::new(),
            post_conditions: Vec::new(),
            body: None,
            span: span(),
        }),
        destructor: None,
        functions: Vec::new(),
        nested: Vec::new(),
        span: span(),
    });
    let program = Program { declarations: vec![interface_requiring_balance(), vault] };

    let result = check_program_with_imports(CheckerConfig::default(), &types, &mut registry, &program, None);
    assert!(!result.diagnostics.iter().any(|d| d.code == DiagnosticCode::InvalidInterfaceConformance));
}

#[test]
fn an_import_the_resolver_knows_about_registers_cleanly() {
    let types = TypeInterner::new();
    let mut registry = NominalRegistry::new();
    let mut resolver = TableImportResolver::new();
    resolver.add("0x1.FlowToken", "Vault", ImportedName { ty: TypeId::ANY_RESOURCE, is_resource: true });
    let program = Program {
        declarations: vec![Declaration::Import(ImportDecl { names: vec!["Vault".to_string()], location: "0x1.FlowToken".to_string(), span: span() })],
    };

    let result = check_program_with_imports(CheckerConfig::default(), &types, &mut registry, &program, Some(&resolver));
    assert!(result.diagnostics.is_empty());
}

#[test]
fn an_import_with_no_resolver_is_unresolved() {
    let types = TypeInterner::new();
    let mut registry = NominalRegistry::new();
    let program = Program {
        declarations: vec![Declaration::Import(ImportDecl { names: vec!["Vault".to_string()], location: "0x1.FlowToken".to_string(), span: span() })],
    };

    let result = check_program_with_imports(CheckerConfig::default(), &types, &mut registry, &program, None);
    assert!(result.diagnostics.iter().any(|d| d.code == DiagnosticCode::UnresolvedImport));
}
