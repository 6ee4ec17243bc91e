//! Resolves parser-level [`TypeExpr`] syntax into interned [`TypeId`]s.
//!
//! Nominal names are looked up against a small per-run table the
//! declaration checker populates as it registers composites and
//! interfaces, plus a fixed table of primitive keywords.

use crate::context::CheckerContext;
use crate::diagnostics;
use cadence_ast::{ReceiverKind, TypeExpr};
use cadence_types::{FunctionShape, ParamInfo, TypeId};

const PRIMITIVE_KEYWORDS: &[(&str, TypeId)] = &[
    ("Void", TypeId::VOID),
    ("Never", TypeId::NEVER),
    ("Bool", TypeId::BOOL),
    ("Address", TypeId::ADDRESS),
    ("String", TypeId::STRING),
    ("Character", TypeId::CHARACTER),
    ("Path", TypeId::PATH),
    ("Int", TypeId::INT),
    ("UInt", TypeId::UINT),
    ("Int8", TypeId::INT8),
    ("Int16", TypeId::INT16),
    ("Int32", TypeId::INT32),
    ("Int64", TypeId::INT64),
    ("Int128", TypeId::INT128),
    ("Int256", TypeId::INT256),
    ("UInt8", TypeId::UINT8),
    ("UInt16", TypeId::UINT16),
    ("UInt32", TypeId::UINT32),
    ("UInt64", TypeId::UINT64),
    ("UInt128", TypeId::UINT128),
    ("UInt256", TypeId::UINT256),
    ("Word8", TypeId::WORD8),
    ("Word16", TypeId::WORD16),
    ("Word32", TypeId::WORD32),
    ("Word64", TypeId::WORD64),
    ("Word128", TypeId::WORD128),
    ("Word256", TypeId::WORD256),
    ("Fix64", TypeId::FIX64),
    ("UFix64", TypeId::UFIX64),
    ("AnyStruct", TypeId::ANY_STRUCT),
    ("AnyResource", TypeId::ANY_RESOURCE),
    ("Type", TypeId::META_TYPE),
];

/// Resolves a nominal name against the fixed primitive keyword table or
/// the checker's per-run nominal-name table, reporting and returning
/// `TypeId::INVALID` on failure so checking can keep going.
pub fn resolve_type_expr(ctx: &mut CheckerContext<'_>, expr: &TypeExpr) -> TypeId {
    match expr {
        TypeExpr::Nominal { name, span } => {
            if let Some((_, ty)) = PRIMITIVE_KEYWORDS.iter().find(|(kw, _)| *kw == name) {
                return *ty;
            }
            let atom = ctx.intern(name);
            match ctx.type_names.get(&atom) {
                Some(ty) => *ty,
                None => {
                    ctx.report(diagnostics::not_declared(*span, name));
                    TypeId::INVALID
                }
            }
        }
        TypeExpr::Optional { inner, .. } => {
            let inner_ty = resolve_type_expr(ctx, inner);
            ctx.types.optional(inner_ty)
        }
        TypeExpr::VariableArray { element, .. } => {
            let element_ty = resolve_type_expr(ctx, element);
            ctx.types.array(element_ty)
        }
        TypeExpr::ConstantArray { element, size, .. } => {
            let element_ty = resolve_type_expr(ctx, element);
            ctx.types.constant_array(element_ty, *size)
        }
        TypeExpr::Dictionary { key, value, .. } => {
            let key_ty = resolve_type_expr(ctx, key);
            let value_ty = resolve_type_expr(ctx, value);
            ctx.types.dictionary(key_ty, value_ty)
        }
        TypeExpr::Reference { authorized, referenced, .. } => {
            let referenced_ty = resolve_type_expr(ctx, referenced);
            ctx.types.reference(*authorized, referenced_ty)
        }
        TypeExpr::Function { parameters, return_type, .. } => {
            let params = parameters.iter().map(|p| ParamInfo::unnamed(resolve_type_expr(ctx, p))).collect();
            let return_ty = resolve_type_expr(ctx, return_type);
            ctx.types.function(FunctionShape { params, return_type: return_ty, receiver: ReceiverKind::None })
        }
        TypeExpr::Restricted { base, interfaces, span } => {
            let base_ty = base.as_ref().map(|b| resolve_type_expr(ctx, b));
            let mut interface_ids = Vec::with_capacity(interfaces.len());
            for name in interfaces {
                let atom = ctx.intern(name);
                match ctx.interface_names.get(&atom) {
                    Some(id) => interface_ids.push(*id),
                    None => ctx.report(diagnostics::not_declared(*span, name)),
                }
            }
            ctx.types.restricted(base_ty, interface_ids)
        }
        TypeExpr::Capability { borrow_type, .. } => {
            let borrow_ty = resolve_type_expr(ctx, borrow_type);
            ctx.types.capability(borrow_ty)
        }
        TypeExpr::MetaType { .. } => TypeId::META_TYPE,
    }
}
