//! Statement checking: name declaration, resource tracking, and the
//! branch join rule for `if`/`else`.

use crate::context::CheckerContext;
use crate::diagnostics;
use crate::expr::check_expression;
use crate::resolver::{Binding, ScopeKind};
use crate::resources::ResourceTracker;
use crate::types::resolve_type_expr;
use cadence_ast::{Block, ElseBranch, Statement};
use cadence_types::{SubtypeChecker, TypeId};

pub fn check_block(ctx: &mut CheckerContext<'_>, block: &Block, scope_kind: ScopeKind) {
    ctx.activations.push(scope_kind);
    ctx.resources.push_scope();
    for statement in &block.statements {
        check_statement(ctx, statement);
    }
    ctx.activations.pop();
    for (name, state) in ctx.resources.pop_scope() {
        if state == crate::resources::ResourceState::Owned {
            ctx.report(diagnostics::resource_loss(block.span, &ctx.types.resolve_string(name)));
        }
    }
}

fn check_statement(ctx: &mut CheckerContext<'_>, statement: &Statement) {
    match statement {
        Statement::Expression(expr) => {
            check_expression(ctx, expr);
        }
        Statement::VariableDecl(decl) => {
            let value_ty = check_expression(ctx, &decl.value);
            let declared_ty = decl.ty.as_ref().map(|t| resolve_type_expr(ctx, t));
            let ty = declared_ty.unwrap_or(value_ty);
            if let Some(declared) = declared_ty {
                let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
                if !subtypes.is_assignable(value_ty, declared) && value_ty != TypeId::INVALID {
                    ctx.report(diagnostics::not_assignable(decl.span, "initializer", &decl.name));
                }
            }
            let is_resource = {
                let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
                subtypes.is_resource_type(ty)
            };
            let atom = ctx.intern(&decl.name);
            if !ctx.activations.declare(atom, Binding { ty, is_var: decl.is_var, is_resource }) {
                ctx.report(diagnostics::duplicate_declaration(decl.span, &decl.name));
            }
            if is_resource {
                ctx.resources.track(atom);
            }
        }
        Statement::Assignment { target, value, span } => {
            let target_ty = check_expression(ctx, target);
            let value_ty = check_expression(ctx, value);
            let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
            if !subtypes.is_assignable(value_ty, target_ty) && target_ty != TypeId::INVALID && value_ty != TypeId::INVALID {
                ctx.report(diagnostics::not_assignable(*span, "assigned value", "target"));
            }
        }
        Statement::If { condition, then_branch, else_branch, span } => {
            check_expression(ctx, condition);
            let visible = ctx.activations.visible_names();
            let resources_before = ctx.resources.clone();

            check_block(ctx, then_branch, ScopeKind::Block);
            let then_resources = ctx.resources.clone();

            ctx.resources = resources_before;
            match else_branch {
                Some(branch) => match branch.as_ref() {
                    ElseBranch::Block(block) => check_block(ctx, block, ScopeKind::Block),
                    ElseBranch::If(stmt) => check_statement(ctx, stmt),
                },
                None => {}
            }
            let else_resources = ctx.resources.clone();

            if let Some(name) = ResourceTracker::join_branches(&visible, &then_resources, &else_resources) {
                ctx.report(diagnostics::resource_join_mismatch(*span, &ctx.types.resolve_string(name)));
            }
        }
        Statement::While { condition, body, .. } => {
            check_expression(ctx, condition);
            check_block(ctx, body, ScopeKind::Block);
        }
        Statement::For { variable, iterable, body, span } => {
            let iterable_ty = check_expression(ctx, iterable);
            let element_ty = match ctx.types.get(iterable_ty) {
                cadence_types::TypeData::VariableArray(element) | cadence_types::TypeData::ConstantArray(element, _) => element,
                cadence_types::TypeData::Invalid => TypeId::INVALID,
                _ => {
                    ctx.report(diagnostics::type_mismatch(*span, "array", "other"));
                    TypeId::INVALID
                }
            };
            ctx.activations.push(ScopeKind::Block);
            let atom = ctx.intern(variable);
            ctx.activations.declare(atom, Binding { ty: element_ty, is_var: false, is_resource: false });
            check_block(ctx, body, ScopeKind::Block);
            ctx.activations.pop();
        }
        Statement::Return { value, .. } => {
            if let Some(expr) = value {
                check_expression(ctx, expr);
            }
        }
        Statement::Destroy { value, span } => {
            let ty = check_expression(ctx, value);
            let is_resource = {
                let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
                subtypes.is_resource_type(ty)
            };
            if let cadence_ast::Expression::Identifier { name, .. } = value {
                let atom = ctx.intern(name);
                if !is_resource {
                    ctx.report(diagnostics::invalid_move_of_non_resource(*span, name));
                } else {
                    ctx.resources.set_state(atom, crate::resources::ResourceState::Destroyed);
                }
            }
        }
        Statement::Emit { event, .. } => {
            check_expression(ctx, event);
        }
        Statement::Break { .. } | Statement::Continue { .. } => {}
        Statement::Block(block) => check_block(ctx, block, ScopeKind::Block),
    }
}
