//! Expression type elaboration.
//!
//! Walks an [`Expression`] tree bottom-up, interning the type of every
//! node into [`crate::elaboration::Elaboration`], flagging resource moves
//! and member-access control as it goes.

use crate::access::AccessOrigin;
use crate::context::CheckerContext;
use crate::diagnostics;
use crate::elaboration::ResolvedTarget;
use crate::resources::ResourceState;
use crate::types::resolve_type_expr;
use cadence_ast::{BinaryOp, CastKind, Expression, UnaryOp};
use cadence_types::{SubtypeChecker, TypeData, TypeId};

pub fn check_expression(ctx: &mut CheckerContext<'_>, expr: &Expression) -> TypeId {
    let ty = elaborate(ctx, expr);
    ctx.elaboration.record_expression_type(expr.span(), ty);
    ty
}

fn elaborate(ctx: &mut CheckerContext<'_>, expr: &Expression) -> TypeId {
    match expr {
        Expression::Identifier { name, span } => {
            let atom = ctx.intern(name);
            match ctx.activations.resolve(atom) {
                Some(binding) => {
                    if binding.is_resource {
                        match ctx.resources.state(atom) {
                            Some(ResourceState::Moved) => {
                                ctx.report(diagnostics::use_after_move(*span, name, *span));
                                return TypeId::INVALID;
                            }
                            Some(ResourceState::Destroyed) => {
                                ctx.report(diagnostics::use_after_destroy(*span, name, *span));
                                return TypeId::INVALID;
                            }
                            _ => {}
                        }
                    }
                    ctx.elaboration.resolved_targets.insert(*span, ResolvedTarget::Local);
                    binding.ty
                }
                None => {
                    ctx.report(diagnostics::not_declared(*span, name));
                    TypeId::INVALID
                }
            }
        }
        Expression::IntLiteral { .. } => TypeId::INT,
        Expression::FixedPointLiteral { negative, .. } => {
            if *negative {
                TypeId::FIX64
            } else {
                TypeId::UFIX64
            }
        }
        Expression::StringLiteral { .. } => TypeId::STRING,
        Expression::BoolLiteral { .. } => TypeId::BOOL,
        Expression::ArrayLiteral { elements, .. } => {
            let element_types: Vec<TypeId> = elements.iter().map(|e| check_expression(ctx, e)).collect();
            let element_ty = if element_types.is_empty() {
                TypeId::NEVER
            } else {
                let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
                subtypes.least_common_super_type(&element_types)
            };
            ctx.types.array(element_ty)
        }
        Expression::DictionaryLiteral { entries, span } => {
            let mut key_types = Vec::with_capacity(entries.len());
            let mut value_types = Vec::with_capacity(entries.len());
            for (k, v) in entries {
                key_types.push(check_expression(ctx, k));
                value_types.push(check_expression(ctx, v));
            }
            for key_ty in &key_types {
                if !is_hashable_key(ctx, *key_ty) {
                    ctx.report(diagnostics::invalid_arithmetic(*span, "dictionary keys must be a hashable primitive type"));
                }
            }
            let (key_ty, value_ty) = if key_types.is_empty() {
                (TypeId::NEVER, TypeId::NEVER)
            } else {
                let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
                (subtypes.least_common_super_type(&key_types), subtypes.least_common_super_type(&value_types))
            };
            ctx.types.dictionary(key_ty, value_ty)
        }
        Expression::Binary { op, left, right, span } => check_binary(ctx, *op, left, right, *span),
        Expression::Unary { op, operand, span } => check_unary(ctx, *op, operand, *span),
        Expression::Move { operand, span } => check_move(ctx, operand, *span),
        Expression::Create { ty, arguments, span } => {
            let composite_ty = resolve_type_expr(ctx, ty);
            let is_resource = {
                let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
                subtypes.is_resource_type(composite_ty)
            };
            if !is_resource && composite_ty != TypeId::INVALID {
                ctx.report(diagnostics::invalid_move_of_non_resource(*span, "create target"));
            }
            for arg in arguments {
                check_expression(ctx, &arg.value);
            }
            composite_ty
        }
        Expression::Call { callee, arguments, span, .. } => check_call(ctx, callee, arguments, *span),
        Expression::MemberAccess { base, member, optional_chaining, span } => check_member_access(ctx, base, member, *optional_chaining, *span),
        Expression::Index { base, index, span } => check_index(ctx, base, index, *span),
        Expression::Cast { expr, ty, kind, .. } => {
            check_expression(ctx, expr);
            let target = resolve_type_expr(ctx, ty);
            match kind {
                CastKind::Simple => target,
                CastKind::Failable => ctx.types.optional(target),
                CastKind::Force => target,
            }
        }
        Expression::Reference { expr, authorized, ty, .. } => {
            check_expression(ctx, expr);
            let referenced = resolve_type_expr(ctx, ty);
            ctx.types.reference(*authorized, referenced)
        }
        Expression::Conditional { condition, then_branch, else_branch, span } => {
            let cond_ty = check_expression(ctx, condition);
            if cond_ty != TypeId::BOOL && cond_ty != TypeId::INVALID {
                ctx.report(diagnostics::type_mismatch(*span, "Bool", "other"));
            }
            let then_ty = check_expression(ctx, then_branch);
            let else_ty = check_expression(ctx, else_branch);
            let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
            subtypes.least_common_super_type(&[then_ty, else_ty])
        }
        Expression::Path { .. } => TypeId::PATH,
        Expression::ForceUnwrap { operand, span } => {
            let operand_ty = check_expression(ctx, operand);
            match ctx.types.get(operand_ty) {
                TypeData::Optional(inner) => inner,
                _ if operand_ty == TypeId::INVALID => TypeId::INVALID,
                _ => {
                    ctx.report(diagnostics::type_mismatch(*span, "optional", "non-optional"));
                    TypeId::INVALID
                }
            }
        }
    }
}

fn is_hashable_key(ctx: &CheckerContext<'_>, ty: TypeId) -> bool {
    matches!(ctx.types.get(ty), TypeData::Primitive(p) if p.is_hashable_key())
}

fn is_numeric_like(ctx: &CheckerContext<'_>, ty: TypeId) -> bool {
    matches!(ctx.types.get(ty), TypeData::Primitive(p) if p.is_numeric() || p.is_fixed_point())
}

fn check_binary(ctx: &mut CheckerContext<'_>, op: BinaryOp, left: &Expression, right: &Expression, span: cadence_common::Span) -> TypeId {
    let left_ty = check_expression(ctx, left);
    let right_ty = check_expression(ctx, right);
    if left_ty == TypeId::INVALID || right_ty == TypeId::INVALID {
        return TypeId::INVALID;
    }
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            if left_ty != right_ty || !is_numeric_like(ctx, left_ty) {
                ctx.report(diagnostics::invalid_arithmetic(span, "arithmetic operands must be the same numeric type"));
                return TypeId::INVALID;
            }
            left_ty
        }
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor | BinaryOp::ShiftLeft | BinaryOp::ShiftRight => {
            if left_ty != right_ty || !is_numeric_like(ctx, left_ty) {
                ctx.report(diagnostics::invalid_arithmetic(span, "bitwise operands must be the same integer type"));
                return TypeId::INVALID;
            }
            left_ty
        }
        BinaryOp::Equal | BinaryOp::NotEqual => TypeId::BOOL,
        BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
            if left_ty != right_ty || !is_numeric_like(ctx, left_ty) {
                ctx.report(diagnostics::invalid_arithmetic(span, "comparison operands must be the same numeric type"));
            }
            TypeId::BOOL
        }
        BinaryOp::And | BinaryOp::Or => {
            if left_ty != TypeId::BOOL || right_ty != TypeId::BOOL {
                ctx.report(diagnostics::type_mismatch(span, "Bool", "other"));
            }
            TypeId::BOOL
        }
        BinaryOp::NilCoalesce => match ctx.types.get(left_ty) {
            TypeData::Optional(inner) => {
                let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
                subtypes.least_common_super_type(&[inner, right_ty])
            }
            _ => {
                ctx.report(diagnostics::type_mismatch(span, "optional", "non-optional"));
                right_ty
            }
        },
    }
}

fn check_unary(ctx: &mut CheckerContext<'_>, op: UnaryOp, operand: &Expression, span: cadence_common::Span) -> TypeId {
    let operand_ty = check_expression(ctx, operand);
    if operand_ty == TypeId::INVALID {
        return TypeId::INVALID;
    }
    match op {
        UnaryOp::Negate => {
            if !matches!(ctx.types.get(operand_ty), TypeData::Primitive(p) if p.is_signed() || p.is_fixed_point()) {
                ctx.report(diagnostics::invalid_arithmetic(span, "`-` requires a signed numeric operand"));
            }
            operand_ty
        }
        UnaryOp::Not => {
            if operand_ty != TypeId::BOOL {
                ctx.report(diagnostics::type_mismatch(span, "Bool", "other"));
            }
            TypeId::BOOL
        }
        UnaryOp::BitNot => {
            if !is_numeric_like(ctx, operand_ty) {
                ctx.report(diagnostics::invalid_arithmetic(span, "`!` (bitwise not) requires an integer operand"));
            }
            operand_ty
        }
    }
}

fn check_move(ctx: &mut CheckerContext<'_>, operand: &Expression, span: cadence_common::Span) -> TypeId {
    let operand_ty = check_expression(ctx, operand);
    let is_resource = {
        let subtypes = SubtypeChecker::new(ctx.types, ctx.registry);
        subtypes.is_resource_type(operand_ty)
    };
    if let Expression::Identifier { name, .. } = operand {
        let atom = ctx.intern(name);
        if !is_resource {
            ctx.report(diagnostics::invalid_move_of_non_resource(span, name));
        } else {
            ctx.resources.set_state(atom, ResourceState::Moved);
        }
    }
    operand_ty
}

fn check_call(ctx: &mut CheckerContext<'_>, callee: &Expression, arguments: &[cadence_ast::Argument], span: cadence_common::Span) -> TypeId {
    if let Expression::Identifier { name, .. } = callee {
        if name == "before" {
            return if let Some(arg) = arguments.first() { check_expression(ctx, &arg.value) } else { TypeId::INVALID };
        }
    }
    let callee_ty = check_expression(ctx, callee);
    for arg in arguments {
        check_expression(ctx, &arg.value);
    }
    match ctx.types.get(callee_ty) {
        TypeData::Function(shape) => shape.return_type,
        TypeData::Invalid => TypeId::INVALID,
        _ => {
            ctx.report(diagnostics::type_mismatch(span, "function", "non-callable"));
            TypeId::INVALID
        }
    }
}

fn check_member_access(ctx: &mut CheckerContext<'_>, base: &Expression, member: &str, optional_chaining: bool, span: cadence_common::Span) -> TypeId {
    let base_ty = check_expression(ctx, base);
    if base_ty == TypeId::INVALID {
        return TypeId::INVALID;
    }
    let (unwrapped_ty, was_optional) = match ctx.types.get(base_ty) {
        TypeData::Optional(inner) if optional_chaining => (inner, true),
        other => (base_ty, matches!(other, TypeData::Optional(_))),
    };
    let is_self = matches!(base, Expression::Identifier { name, .. } if name == "self");
    let composite_id = match ctx.types.get(unwrapped_ty) {
        TypeData::Composite(id) => Some(id),
        TypeData::Reference { referenced, .. } => match ctx.types.get(referenced) {
            TypeData::Composite(id) => Some(id),
            _ => None,
        },
        _ => None,
    };
    let Some(composite_id) = composite_id else {
        ctx.report(diagnostics::not_declared(span, member));
        return TypeId::INVALID;
    };
    let member_atom = ctx.intern(member);
    let info = ctx.registry.composite(composite_id);
    let declaring_contract = info.qualified_name.first().copied();
    let result_ty = if let Some(field) = info.field(member_atom) {
        let access = field.access;
        let ty = field.ty;
        let origin = AccessOrigin { is_self, same_contract: declaring_contract == ctx.enclosing.contract, same_account: ctx.enclosing.account.is_some() };
        if !crate::access::is_accessible(access, origin) {
            ctx.report(diagnostics::invalid_access(span, member));
        }
        ctx.elaboration.resolved_targets.insert(span, ResolvedTarget::Field { index: 0, access });
        ty
    } else if let Some(func) = info.function(member_atom) {
        let access = func.access;
        let ty = func.ty;
        let origin = AccessOrigin { is_self, same_contract: declaring_contract == ctx.enclosing.contract, same_account: ctx.enclosing.account.is_some() };
        if !crate::access::is_accessible(access, origin) {
            ctx.report(diagnostics::invalid_access(span, member));
        }
        ctx.elaboration.resolved_targets.insert(span, ResolvedTarget::Function { access });
        ty
    } else {
        ctx.report(diagnostics::not_declared(span, member));
        TypeId::INVALID
    };
    if was_optional && !optional_chaining {
        return result_ty;
    }
    if optional_chaining {
        ctx.types.optional(result_ty)
    } else {
        result_ty
    }
}

fn check_index(ctx: &mut CheckerContext<'_>, base: &Expression, index: &Expression, span: cadence_common::Span) -> TypeId {
    let base_ty = check_expression(ctx, base);
    let index_ty = check_expression(ctx, index);
    match ctx.types.get(base_ty) {
        TypeData::VariableArray(element) | TypeData::ConstantArray(element, _) => {
            if index_ty != TypeId::INT && index_ty != TypeId::INVALID {
                ctx.report(diagnostics::type_mismatch(span, "Int", "other"));
            }
            element
        }
        TypeData::Dictionary { key, value } => {
            if index_ty != key && index_ty != TypeId::INVALID {
                ctx.report(diagnostics::type_mismatch(span, "dictionary key type", "other"));
            }
            ctx.types.optional(value)
        }
        TypeData::Invalid => TypeId::INVALID,
        _ => {
            ctx.report(diagnostics::type_mismatch(span, "indexable type", "other"));
            TypeId::INVALID
        }
    }
}
