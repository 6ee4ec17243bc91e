//! Pre/postcondition checking.
//!
//! Every `pre { ... }`/`post { ... }` clause must elaborate to `Bool`,
//! with an optional `: String` failure message. Postconditions may
//! reference `before(expr)`, a snapshot of `expr` taken at function
//! entry; this module only finds those calls and records what to
//! snapshot — evaluating the snapshot is the interpreter's job.

use cadence_ast::Expression;
use cadence_common::Span;

/// Finds every `before(...)` call inside a postcondition expression and
/// records `(call_span, inner_expr)` pairs into `out`. `before` takes
/// exactly one unlabeled argument; a call shaped any other way is left
/// alone here — the expression checker reports it as an ordinary
/// unresolved-call error when `before` does not also exist as a bound
/// identifier.
pub fn collect_before_snapshots(expr: &Expression, out: &mut Vec<(Span, Expression)>) {
    match expr {
        Expression::Call { callee, arguments, span, .. } => {
            if let Expression::Identifier { name, .. } = callee.as_ref() {
                if name == "before" && arguments.len() == 1 && arguments[0].label.is_none() {
                    out.push((*span, (*arguments[0].value).clone()));
                }
            }
            collect_before_snapshots(callee, out);
            for arg in arguments {
                collect_before_snapshots(&arg.value, out);
            }
        }
        Expression::Binary { left, right, .. } => {
            collect_before_snapshots(left, out);
            collect_before_snapshots(right, out);
        }
        Expression::Unary { operand, .. }
        | Expression::Move { operand, .. }
        | Expression::ForceUnwrap { operand, .. } => collect_before_snapshots(operand, out),
        Expression::MemberAccess { base, .. } => collect_before_snapshots(base, out),
        Expression::Index { base, index, .. } => {
            collect_before_snapshots(base, out);
            collect_before_snapshots(index, out);
        }
        Expression::Cast { expr, .. } | Expression::Reference { expr, .. } => collect_before_snapshots(expr, out),
        Expression::Conditional { condition, then_branch, else_branch, .. } => {
            collect_before_snapshots(condition, out);
            collect_before_snapshots(then_branch, out);
            collect_before_snapshots(else_branch, out);
        }
        Expression::ArrayLiteral { elements, .. } => {
            for e in elements {
                collect_before_snapshots(e, out);
            }
        }
        Expression::DictionaryLiteral { entries, .. } => {
            for (k, v) in entries {
                collect_before_snapshots(k, out);
                collect_before_snapshots(v, out);
            }
        }
        Expression::Create { arguments, .. } => {
            for arg in arguments {
                collect_before_snapshots(&arg.value, out);
            }
        }
        Expression::Identifier { .. }
        | Expression::IntLiteral { .. }
        | Expression::FixedPointLiteral { .. }
        | Expression::StringLiteral { .. }
        | Expression::BoolLiteral { .. }
        | Expression::Path { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_ast::Argument;

    fn ident(name: &str) -> Expression {
        Expression::Identifier { name: name.into(), span: Span::dummy() }
    }

    #[test]
    fn finds_a_before_call_nested_in_a_comparison() {
        let before_call = Expression::Call {
            callee: Box::new(ident("before")),
            type_arguments: vec![],
            arguments: vec![Argument { label: None, value: Box::new(ident("balance")), span: Span::new(0, 1) }],
            span: Span::new(10, 20),
        };
        let post = Expression::Binary {
            op: cadence_ast::BinaryOp::GreaterEqual,
            left: Box::new(ident("balance")),
            right: Box::new(before_call),
            span: Span::dummy(),
        };
        let mut out = Vec::new();
        collect_before_snapshots(&post, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0, Span::new(10, 20));
        assert_eq!(out[0].1, ident("balance"));
    }

    #[test]
    fn a_plain_call_to_something_else_is_not_mistaken_for_before() {
        let call = Expression::Call {
            callee: Box::new(ident("assert")),
            type_arguments: vec![],
            arguments: vec![Argument { label: None, value: Box::new(ident("ok")), span: Span::dummy() }],
            span: Span::dummy(),
        };
        let mut out = Vec::new();
        collect_before_snapshots(&call, &mut out);
        assert!(out.is_empty());
    }
}
