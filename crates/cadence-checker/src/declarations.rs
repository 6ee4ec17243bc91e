//! Top-level and composite-member declaration checking.
//!
//! Registers composites and interfaces into the `NominalRegistry`, wires
//! their declared conformances, builds field declaration order, checks
//! for a missing initializer when fields are present, and checks every
//! function body (parameters, pre/post conditions, statements).

use crate::conditions::collect_before_snapshots;
use crate::conformance::check_conformance;
use crate::context::CheckerContext;
use crate::diagnostics;
use crate::expr::check_expression;
use crate::resolver::{Binding, ScopeKind};
use crate::statements::check_block;
use crate::types::resolve_type_expr;
use cadence_ast::{CompositeDecl, Condition, Declaration, FieldDecl, FunctionDecl, ImportDecl, InterfaceDecl, Program, ReceiverKind, TransactionDecl};
use cadence_types::{CompositeInfo, FieldInfo, FunctionMember, FunctionShape, InterfaceInfo, Location, NominalRegistry, ParamInfo, RequiredFunction, SubtypeChecker, TypeId};

/// Checks an entire program: registers every top-level composite/interface
/// first (so forward references and mutual conformance resolve), then
/// checks each declaration's body.
pub fn check_program(ctx: &mut CheckerContext<'_>, program: &Program) {
    for decl in &program.declarations {
        pre_register(ctx, decl);
    }
    for decl in &program.declarations {
        check_declaration(ctx, decl);
    }
}

/// First pass: reserves a `TypeId`/`InterfaceId` for every name so later
/// declarations (and the composite itself, for recursive fields) can
/// refer to it regardless of source order.
fn pre_register(ctx: &mut CheckerContext<'_>, decl: &Declaration) {
    match decl {
        Declaration::Composite(composite) => {
            let atom = ctx.intern(&composite.name);
            let info = CompositeInfo {
                location: Location::Builtin,
                qualified_name: vec![atom],
                kind: composite.kind,
                fields: Vec::new(),
                functions: Vec::new(),
                conformances: Vec::new(),
            };
            let id = ctx.registry.register_composite(info);
            let ty = ctx.types.composite(id);
            if ctx.type_names.insert(atom, ty).is_some() {
                ctx.report(diagnostics::invalid_redeclaration(composite.span, &composite.name));
            }
        }
        Declaration::Interface(interface) => {
            let atom = ctx.intern(&interface.name);
            let info = InterfaceInfo {
                location: Location::Builtin,
                qualified_name: vec![atom],
                applies_to: interface.applies_to,
                required_fields: Vec::new(),
                required_functions: Vec::new(),
                extends: Vec::new(),
            };
            let id = ctx.registry.register_interface(info);
            let ty = ctx.types.interface(id);
            ctx.type_names.insert(atom, ty);
            ctx.interface_names.insert(atom, id);
        }
        Declaration::Function(_) | Declaration::Variable(_) | Declaration::Import(_) | Declaration::Transaction(_) => {}
    }
}

fn check_declaration(ctx: &mut CheckerContext<'_>, decl: &Declaration) {
    match decl {
        Declaration::Composite(composite) => check_composite(ctx, composite),
        Declaration::Interface(interface) => check_interface(ctx, interface),
        Declaration::Function(func) => {
            check_function(ctx, func, None);
        }
        Declaration::Variable(var) => {
            let value_ty = check_expression(ctx, &var.value);
            let atom = ctx.intern(&var.name);
            let is_resource = {
                let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
                subtypes.is_resource_type(value_ty)
            };
            ctx.activations.declare(atom, Binding { ty: value_ty, is_var: var.is_var, is_resource });
        }
        Declaration::Import(import) => check_import(ctx, import),
        Declaration::Transaction(txn) => check_transaction(ctx, txn),
    }
}

/// Resolves every name in `import X, Y from <location>` against the
/// host-supplied resolver, registering each as a type-level name and a
/// value binding. A name the resolver doesn't know about (or no resolver
/// at all) is an unresolved import, not a silent no-op.
fn check_import(ctx: &mut CheckerContext<'_>, import: &ImportDecl) {
    for name in &import.names {
        let resolved = ctx.imports.and_then(|resolver| resolver.resolve(&import.location, name));
        match resolved {
            Some(imported) => {
                let atom = ctx.intern(name);
                ctx.type_names.insert(atom, imported.ty);
                ctx.activations.declare(atom, Binding { ty: imported.ty, is_var: false, is_resource: imported.is_resource });
            }
            None => ctx.report(diagnostics::unresolved_import(import.span, name, &import.location)),
        }
    }
}

fn build_field_info(ctx: &mut CheckerContext<'_>, field: &FieldDecl) -> FieldInfo {
    let ty = resolve_type_expr(ctx, &field.ty);
    FieldInfo { name: ctx.intern(&field.name), ty, access: field.access, is_var: field.is_var }
}

fn build_function_shape(ctx: &mut CheckerContext<'_>, func: &FunctionDecl, receiver: ReceiverKind) -> FunctionShape {
    let params = func
        .parameters
        .iter()
        .map(|p| ParamInfo { label: p.label.as_deref().map(|l| ctx.intern(l)), ty: resolve_type_expr(ctx, &p.ty) })
        .collect();
    let return_type = func.return_type.as_ref().map(|t| resolve_type_expr(ctx, t)).unwrap_or(TypeId::VOID);
    FunctionShape { params, return_type, receiver }
}

fn check_composite(ctx: &mut CheckerContext<'_>, composite: &CompositeDecl) {
    let atom = ctx.intern(&composite.name);
    let composite_id = match ctx.types.get(*ctx.type_names.get(&atom).expect("pre-registered")) {
        cadence_types::TypeData::Composite(id) => id,
        _ => unreachable!("composite names always pre-register to a Composite TypeId"),
    };

    let fields: Vec<FieldInfo> = composite.fields.iter().map(|f| build_field_info(ctx, f)).collect();
    let receiver = ReceiverKind::Value;
    let functions: Vec<FunctionMember> = composite
        .functions
        .iter()
        .map(|f| {
            let shape = build_function_shape(ctx, f, receiver);
            FunctionMember { name: ctx.intern(&f.name), ty: ctx.types.function(shape), access: f.access }
        })
        .collect();

    let mut conformances = Vec::with_capacity(composite.conformances.len());
    for name in &composite.conformances {
        let iface_atom = ctx.intern(name);
        match ctx.interface_names.get(&iface_atom) {
            Some(id) => conformances.push(*id),
            None => ctx.report(diagnostics::not_declared(composite.span, name)),
        }
    }

    ctx.elaboration.field_orderings.insert(atom, fields.iter().map(|f| f.name).collect());

    {
        let info = ctx.registry.composite_mut(composite_id);
        info.fields = fields;
        info.functions = functions;
        info.conformances = conformances.clone();
    }

    if !composite.fields.is_empty() && composite.initializer.is_none() {
        ctx.report(diagnostics::missing_initializer(composite.span, &composite.name));
    }

    for iface_id in &conformances {
        let mut findings = Vec::new();
        let types = ctx.types;
        let ok = {
            let subtypes = SubtypeChecker::new(types, ctx.registry);
            check_conformance(ctx.registry, &subtypes, types, composite_id, *iface_id, &composite.name, "interface", composite.span, &mut findings)
        };
        ctx.elaboration.conformance_witnesses.insert((atom, *iface_id), ok);
        for diagnostic in findings {
            ctx.report(diagnostic);
        }
    }

    ctx.activations.push(ScopeKind::Type);
    let self_ty = ctx.types.composite(composite_id);
    let self_atom = ctx.intern("self");
    ctx.activations.declare(self_atom, Binding { ty: self_ty, is_var: false, is_resource: false });

    if let Some(initializer) = &composite.initializer {
        check_function(ctx, initializer, Some(receiver));
    }
    for func in &composite.functions {
        check_function(ctx, func, Some(receiver));
    }
    if let Some(destructor) = &composite.destructor {
        check_block(ctx, destructor, ScopeKind::Function);
    }

    ctx.activations.pop();

    for nested in &composite.nested {
        check_declaration(ctx, nested);
    }
}

fn check_interface(ctx: &mut CheckerContext<'_>, interface: &InterfaceDecl) {
    let atom = ctx.intern(&interface.name);
    let iface_id = *ctx.interface_names.get(&atom).expect("pre-registered");

    let required_fields: Vec<FieldInfo> = interface.fields.iter().map(|f| build_field_info(ctx, f)).collect();
    let required_functions: Vec<RequiredFunction> = interface
        .functions
        .iter()
        .map(|f| {
            let shape = build_function_shape(ctx, f, ReceiverKind::Value);
            RequiredFunction { name: ctx.intern(&f.name), ty: ctx.types.function(shape), has_default: f.body.is_some() }
        })
        .collect();

    let info = ctx.registry.interface_mut(iface_id);
    info.required_fields = required_fields;
    info.required_functions = required_functions;

    ctx.activations.push(ScopeKind::Type);
    for func in &interface.functions {
        if func.body.is_some() {
            check_function(ctx, func, Some(ReceiverKind::Value));
        }
    }
    ctx.activations.pop();
}

fn check_transaction(ctx: &mut CheckerContext<'_>, txn: &TransactionDecl) {
    ctx.activations.push(ScopeKind::Function);
    ctx.resources.push_scope();
    for param in &txn.parameters {
        let ty = resolve_type_expr(ctx, &param.ty);
        let atom = ctx.intern(&param.name);
        ctx.activations.declare(atom, Binding { ty, is_var: false, is_resource: false });
    }
    // Transaction-scoped fields carry state from `prepare` to `execute`.
    for field in &txn.fields {
        let ty = resolve_type_expr(ctx, &field.ty);
        let is_resource = {
            let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
            subtypes.is_resource_type(ty)
        };
        let atom = ctx.intern(&field.name);
        ctx.activations.declare(atom, Binding { ty, is_var: field.is_var, is_resource });
        if is_resource {
            ctx.resources.track(atom);
        }
    }
    check_conditions(ctx, &txn.pre_conditions, false);
    if let Some(prepare) = &txn.prepare {
        check_function(ctx, prepare, None);
    }
    check_conditions(ctx, &txn.post_conditions, true);
    if let Some(execute) = &txn.execute {
        check_block(ctx, execute, ScopeKind::Block);
    }
    for (name, state) in ctx.resources.pop_scope() {
        if state == crate::resources::ResourceState::Owned {
            ctx.report(diagnostics::resource_loss(txn.span, &ctx.types.resolve_string(name)));
        }
    }
    ctx.activations.pop();
}

fn check_function(ctx: &mut CheckerContext<'_>, func: &FunctionDecl, receiver: Option<ReceiverKind>) {
    ctx.activations.push(ScopeKind::Function);
    ctx.resources.push_scope();
    for param in &func.parameters {
        let ty = resolve_type_expr(ctx, &param.ty);
        let is_resource = {
            let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
            subtypes.is_resource_type(ty)
        };
        let atom = ctx.intern(&param.name);
        if !ctx.activations.declare(atom, Binding { ty, is_var: false, is_resource }) {
            ctx.report(diagnostics::duplicate_declaration(param.span, &param.name));
        }
        if is_resource {
            ctx.resources.track(atom);
        }
    }
    let _ = receiver;

    check_conditions(ctx, &func.pre_conditions, false);
    if let Some(body) = &func.body {
        check_block(ctx, body, ScopeKind::Block);
    }
    check_conditions(ctx, &func.post_conditions, true);

    // A resource parameter neither moved nor destroyed by the function
    // body is lost — the same rule applied to local resource variables.
    for (name, state) in ctx.resources.pop_scope() {
        if state == crate::resources::ResourceState::Owned {
            ctx.report(diagnostics::resource_loss(func.span, &ctx.types.resolve_string(name)));
        }
    }
    ctx.activations.pop();
}

fn check_conditions(ctx: &mut CheckerContext<'_>, conditions: &[Condition], is_post: bool) {
    for condition in conditions {
        if is_post {
            let mut snapshots = Vec::new();
            collect_before_snapshots(&condition.expr, &mut snapshots);
            for (span, inner) in snapshots {
                ctx.elaboration.before_snapshots.insert(span, inner);
            }
        }
        let ty = check_expression(ctx, &condition.expr);
        if ty != TypeId::BOOL && ty != TypeId::INVALID {
            ctx.report(diagnostics::type_mismatch(condition.span, "Bool", "other"));
        }
        if let Some(message) = &condition.message {
            let message_ty = check_expression(ctx, message);
            if message_ty != TypeId::STRING && message_ty != TypeId::INVALID {
                ctx.report(diagnostics::type_mismatch(condition.span, "String", "other"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::{ImportedName, TableImportResolver};
    use cadence_common::{CheckerConfig, Span};

    fn span() -> Span {
        Span::new(0, 0)
    }

    #[test]
    fn a_name_the_resolver_knows_becomes_a_visible_binding() {
        let types = TypeInterner::new();
        let mut registry = NominalRegistry::new();
        let mut resolver = TableImportResolver::new();
        resolver.add("0x1.FlowToken", "Vault", ImportedName { ty: TypeId::ANY_RESOURCE, is_resource: true });

        let mut ctx = CheckerContext::new(CheckerConfig::default(), &types, &mut registry).with_import_resolver(&resolver);
        let import = ImportDecl { names: vec!["Vault".to_string()], location: "0x1.FlowToken".to_string(), span: span() };
        check_import(&mut ctx, &import);

        assert!(ctx.diagnostics.is_empty());
        let atom = ctx.intern("Vault");
        assert_eq!(ctx.type_names.get(&atom).copied(), Some(TypeId::ANY_RESOURCE));
    }

    #[test]
    fn an_unknown_name_reports_unresolved_import() {
        let types = TypeInterner::new();
        let mut registry = NominalRegistry::new();
        let mut ctx = CheckerContext::new(CheckerConfig::default(), &types, &mut registry);
        let import = ImportDecl { names: vec!["Vault".to_string()], location: "0x1.FlowToken".to_string(), span: span() };
        check_import(&mut ctx, &import);

        assert_eq!(ctx.diagnostics.len(), 1);
    }
}
