//! The tree-walking evaluator.
//!
//! Dispatches directly over `cadence_ast::{Expression, Statement}` the
//! same way the checker dispatches over them for static analysis —
//! control flow (`Flow`) propagates up through block execution exactly
//! like the checker's diagnostics propagate outward, just carrying a
//! runtime value instead of nothing.

use crate::activation::{Activations, Heap, SlotId};
use crate::builtins;
use crate::composite::CompositeValue;
use crate::container::{ArrayValue, DictionaryValue};
use crate::error::{ErrorKind, InterpreterError};
use crate::gauge::Gauge;
use crate::host::HostEnvironment;
use crate::numeric::{self, IntegerValue};
use crate::storage::{Link, PathValue, StorageDomain};
use crate::value::{ReferenceValue, Value};
use cadence_ast::{BinaryOp, CastKind, CompositeDecl, Condition, Expression, FunctionDecl, Program, Statement, UnaryOp};
use cadence_common::{InterpreterConfig, Span};
use cadence_types::{Primitive, SubtypeChecker, TypeId, TypeInterner};
use num_bigint::BigInt;
use rustc_hash::FxHashMap;
use std::str::FromStr;

/// How a block (or a statement inside one) finishes: falling off the
/// end, or unwinding through a `return`/`break`/`continue`.
pub enum Flow {
    Normal,
    Return(Value),
    Break,
    Continue,
}

/// Everything live for the duration of one program run: name resolution
/// for user-declared functions/composites, the value heap, the
/// metering gauge, and the host the program is running against.
pub struct Interpreter<'a> {
    pub activations: Activations,
    pub heap: Heap,
    pub gauge: Gauge,
    pub host: &'a mut dyn HostEnvironment,
    pub types: &'a TypeInterner,
    functions: FxHashMap<String, FunctionDecl>,
    composites: FxHashMap<String, CompositeDecl>,
    before_snapshots: FxHashMap<Span, Value>,
    max_capability_chain_depth: usize,
}

impl<'a> Interpreter<'a> {
    #[must_use]
    pub fn new(config: InterpreterConfig, host: &'a mut dyn HostEnvironment, types: &'a TypeInterner, program: &Program) -> Self {
        let mut functions = FxHashMap::default();
        let mut composites = FxHashMap::default();
        for decl in &program.declarations {
            match decl {
                cadence_ast::Declaration::Function(f) => {
                    functions.insert(f.name.clone(), f.clone());
                }
                cadence_ast::Declaration::Composite(c) => {
                    composites.insert(c.name.clone(), c.clone());
                }
                _ => {}
            }
        }
        Interpreter {
            activations: Activations::new(),
            heap: Heap::new(),
            gauge: Gauge::new(config.computation_limit, config.memory_limit),
            host,
            types,
            functions,
            composites,
            before_snapshots: FxHashMap::default(),
            max_capability_chain_depth: config.max_capability_chain_depth,
        }
    }

    /// Runs `main()`, the entry point for a script-shaped program.
    pub fn run_main(&mut self) -> Result<Value, InterpreterError> {
        let main = self
            .functions
            .get("main")
            .cloned()
            .ok_or_else(|| InterpreterError::new(Span::dummy(), ErrorKind::Panic("no `main` function".to_string())))?;
        self.call_function(&main, Vec::new())
    }

    pub fn call_function(&mut self, decl: &FunctionDecl, args: Vec<Value>) -> Result<Value, InterpreterError> {
        tracing::trace!(name = %decl.name, arg_count = args.len(), "call_function");
        self.activations.push_scope();
        for (param, value) in decl.parameters.iter().zip(args) {
            let value = coerce_numeric(value, &param.ty, param.span)?;
            let slot = self.heap.alloc(value);
            self.activations.declare(param.name.clone(), slot);
        }

        self.evaluate_before_snapshots(&decl.post_conditions)?;
        self.check_conditions(&decl.pre_conditions, ErrorKind::PreconditionFailed as fn(String) -> ErrorKind)?;

        let result = match &decl.body {
            Some(body) => self.exec_block(body)?,
            None => Flow::Normal,
        };
        let value = match result {
            Flow::Return(v) => v,
            _ => Value::Void,
        };

        self.check_conditions(&decl.post_conditions, ErrorKind::PostconditionFailed as fn(String) -> ErrorKind)?;
        self.activations.pop_scope();
        Ok(value)
    }

    fn evaluate_before_snapshots(&mut self, post_conditions: &[Condition]) -> Result<(), InterpreterError> {
        for condition in post_conditions {
            collect_before_calls(&condition.expr, &mut |call_expr, arg| {
                let value = self.eval_expression(arg)?;
                self.before_snapshots.insert(call_expr.span(), value);
                Ok(())
            })?;
        }
        Ok(())
    }

    fn check_conditions(&mut self, conditions: &[Condition], kind: fn(String) -> ErrorKind) -> Result<(), InterpreterError> {
        for condition in conditions {
            let value = self.eval_expression(&condition.expr)?;
            if !truthy(&value) {
                let message = match &condition.message {
                    Some(expr) => match self.eval_expression(expr)? {
                        Value::String(s) => s,
                        _ => String::new(),
                    },
                    None => String::new(),
                };
                return Err(InterpreterError::new(condition.span, kind(message)));
            }
        }
        Ok(())
    }

    pub fn exec_block(&mut self, block: &cadence_ast::Block) -> Result<Flow, InterpreterError> {
        self.activations.push_scope();
        let result = self.exec_statements(&block.statements);
        self.activations.pop_scope();
        result
    }

    fn exec_statements(&mut self, statements: &[Statement]) -> Result<Flow, InterpreterError> {
        for statement in statements {
            match self.exec_statement(statement)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_statement(&mut self, statement: &Statement) -> Result<Flow, InterpreterError> {
        self.gauge.charge_value_construction(statement.span())?;
        match statement {
            Statement::Expression(expr) => {
                self.eval_expression(expr)?;
                Ok(Flow::Normal)
            }
            Statement::VariableDecl(decl) => {
                let mut value = self.eval_expression(&decl.value)?;
                if let Some(ty) = &decl.ty {
                    value = coerce_numeric(value, ty, decl.span)?;
                }
                let slot = self.heap.alloc(value);
                self.activations.declare(decl.name.clone(), slot);
                Ok(Flow::Normal)
            }
            Statement::Assignment { target, value, span } => {
                let new_value = self.eval_expression(value)?;
                self.assign(target, new_value, *span)?;
                Ok(Flow::Normal)
            }
            Statement::If { condition, then_branch, else_branch, .. } => {
                if truthy(&self.eval_expression(condition)?) {
                    self.exec_block(then_branch)
                } else {
                    match else_branch {
                        Some(branch) => match branch.as_ref() {
                            cadence_ast::ElseBranch::Block(block) => self.exec_block(block),
                            cadence_ast::ElseBranch::If(stmt) => self.exec_statement(stmt),
                        },
                        None => Ok(Flow::Normal),
                    }
                }
            }
            Statement::While { condition, body, .. } => {
                while truthy(&self.eval_expression(condition)?) {
                    match self.exec_block(body)? {
                        Flow::Break => break,
                        Flow::Continue | Flow::Normal => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            Statement::For { variable, iterable, body, .. } => {
                let iterable_value = self.eval_expression(iterable)?;
                let elements = match iterable_value {
                    Value::Array(array) => array.iter().cloned().collect::<Vec<_>>(),
                    _ => return Err(InterpreterError::new(iterable.span(), ErrorKind::ForceCastFailed("expected an array to iterate".to_string()))),
                };
                for element in elements {
                    self.activations.push_scope();
                    let slot = self.heap.alloc(element);
                    self.activations.declare(variable.clone(), slot);
                    let flow = self.exec_statements(&body.statements)?;
                    self.activations.pop_scope();
                    match flow {
                        Flow::Break => break,
                        Flow::Continue | Flow::Normal => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            Statement::Return { value, .. } => {
                let result = match value {
                    Some(expr) => self.eval_expression(expr)?,
                    None => Value::Void,
                };
                Ok(Flow::Return(result))
            }
            Statement::Destroy { value, span } => {
                let target = self.eval_expression(value)?;
                self.destroy(target, *span)?;
                self.invalidate_slot_of(value);
                Ok(Flow::Normal)
            }
            Statement::Emit { event, .. } => {
                let value = self.eval_expression(event)?;
                if let Value::Composite(composite) = value {
                    self.host.emit_event(composite);
                }
                Ok(Flow::Normal)
            }
            Statement::Break { .. } => Ok(Flow::Break),
            Statement::Continue { .. } => Ok(Flow::Continue),
            Statement::Block(block) => self.exec_block(block),
        }
    }

    fn assign(&mut self, target: &Expression, value: Value, span: Span) -> Result<(), InterpreterError> {
        match target {
            Expression::Identifier { name, .. } => {
                let slot = self
                    .activations
                    .resolve(name)
                    .ok_or_else(|| InterpreterError::new(span, ErrorKind::ForceCastFailed(format!("undeclared name `{name}`"))))?;
                // An `Int`-typed literal assigned into an already-narrower slot
                // (e.g. `x = 2` where `x: UInt8`) takes on that slot's width.
                let value = match (self.heap.get(slot), &value) {
                    (Some(Value::Integer(existing)), Value::Integer(new)) if existing.primitive != new.primitive => {
                        Value::Integer(numeric::coerce(existing.primitive, new.magnitude.clone(), span)?)
                    }
                    _ => value,
                };
                self.heap.set(slot, value);
                Ok(())
            }
            Expression::Index { base, index, .. } => {
                let index_value = self.eval_expression(index)?;
                let slot = self.lvalue_slot(base)?;
                match self.heap.get(slot).cloned() {
                    Some(Value::Array(mut array)) => {
                        let i = as_usize(&index_value, span)?;
                        if i < array.len() {
                            array.remove(i);
                        }
                        array.insert(i.min(array.len()), value);
                        self.heap.set(slot, Value::Array(array));
                        Ok(())
                    }
                    Some(Value::Dictionary(mut dict)) => {
                        let key = index_value
                            .as_dictionary_key()
                            .ok_or_else(|| InterpreterError::new(span, ErrorKind::ForceCastFailed("dictionary key is not hashable".to_string())))?;
                        dict.insert(key, value);
                        self.heap.set(slot, Value::Dictionary(dict));
                        Ok(())
                    }
                    _ => Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("indexed assignment target is not an array or dictionary".to_string()))),
                }
            }
            Expression::MemberAccess { base, member, .. } => {
                let slot = self.lvalue_slot(base)?;
                match self.heap.get(slot).cloned() {
                    Some(Value::Composite(mut composite)) => {
                        composite.set_field(member.clone(), value);
                        self.heap.set(slot, Value::Composite(composite));
                        Ok(())
                    }
                    _ => Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("member assignment target is not a composite".to_string()))),
                }
            }
            _ => Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("not an assignable expression".to_string()))),
        }
    }

    fn lvalue_slot(&mut self, expr: &Expression) -> Result<SlotId, InterpreterError> {
        match expr {
            Expression::Identifier { name, span } => self
                .activations
                .resolve(name)
                .ok_or_else(|| InterpreterError::new(*span, ErrorKind::ForceCastFailed(format!("undeclared name `{name}`")))),
            _ => {
                let value = self.eval_expression(expr)?;
                Ok(self.heap.alloc(value))
            }
        }
    }

    fn invalidate_slot_of(&mut self, expr: &Expression) {
        if let Expression::Identifier { name, .. } = expr {
            if let Some(slot) = self.activations.resolve(name) {
                self.heap.invalidate(slot);
            }
        }
    }

    /// Runs a composite's `destroy` body (if any), then recursively
    /// destroys every resource-typed field.
    fn destroy(&mut self, value: Value, span: Span) -> Result<(), InterpreterError> {
        let Value::Composite(mut composite) = value else {
            return Ok(());
        };
        tracing::trace!(type_name = %composite.type_name, "destroy");
        let decl = self.composites.get(&composite.type_name).cloned();
        if let Some(decl) = decl {
            if let Some(destructor) = &decl.destructor {
                self.activations.push_scope();
                let self_slot = self.heap.alloc(Value::Composite(composite.clone()));
                self.activations.declare("self", self_slot);
                self.exec_block(destructor)?;
                self.activations.pop_scope();
            }
        }
        let field_names: Vec<String> = composite.iter_fields().map(|(n, _)| n.clone()).collect();
        for name in field_names {
            if let Some(field_value) = composite.take_field(&name) {
                if matches!(field_value, Value::Composite(_)) {
                    self.destroy(field_value, span)?;
                }
            }
        }
        Ok(())
    }

    pub fn eval_expression(&mut self, expr: &Expression) -> Result<Value, InterpreterError> {
        self.gauge.charge_value_construction(expr.span())?;
        match expr {
            Expression::Identifier { name, span } => {
                let slot = self.activations.resolve(name).ok_or_else(|| InterpreterError::new(*span, ErrorKind::ForceCastFailed(format!("undeclared name `{name}`"))))?;
                let value = self.heap.get(slot).cloned().unwrap_or(Value::Invalidated);
                if value.is_invalidated() {
                    return Err(InterpreterError::new(*span, ErrorKind::UseAfterMoveRuntime));
                }
                Ok(value)
            }
            Expression::IntLiteral { text, span } => {
                let magnitude = BigInt::from_str(text).map_err(|_| InterpreterError::new(*span, ErrorKind::ForceCastFailed("malformed integer literal".to_string())))?;
                Ok(Value::Integer(IntegerValue::new_unchecked(Primitive::Int, magnitude)))
            }
            Expression::FixedPointLiteral { text, negative, span } => {
                let scaled = parse_fixed_point(text, *negative, *span)?;
                Ok(Value::Fix64(scaled))
            }
            Expression::StringLiteral { value, .. } => Ok(Value::String(value.clone())),
            Expression::BoolLiteral { value, .. } => Ok(Value::Bool(*value)),
            Expression::ArrayLiteral { elements, .. } => {
                let mut array = ArrayValue::new(TypeId::INVALID);
                for element in elements {
                    array.append(self.eval_expression(element)?);
                }
                Ok(Value::Array(array))
            }
            Expression::DictionaryLiteral { entries, span } => {
                let mut dict = DictionaryValue::new(TypeId::INVALID, TypeId::INVALID);
                for (key_expr, value_expr) in entries {
                    let key = self.eval_expression(key_expr)?;
                    let value = self.eval_expression(value_expr)?;
                    let key = key.as_dictionary_key().ok_or_else(|| InterpreterError::new(*span, ErrorKind::ForceCastFailed("dictionary key is not hashable".to_string())))?;
                    dict.insert(key, value);
                }
                Ok(Value::Dictionary(dict))
            }
            Expression::Binary { op, left, right, span } => self.eval_binary(*op, left, right, *span),
            Expression::Unary { op, operand, span } => self.eval_unary(*op, operand, *span),
            Expression::Move { operand, .. } => {
                let value = self.eval_expression(operand)?;
                self.invalidate_slot_of(operand);
                Ok(value)
            }
            Expression::Create { ty, arguments, span } => self.eval_create(ty, arguments, *span),
            Expression::Call { callee, arguments, span, .. } => self.eval_call(callee, arguments, *span),
            Expression::MemberAccess { base, member, optional_chaining, span } => {
                let base_value = self.eval_expression(base)?;
                if *optional_chaining {
                    if let Value::Optional(None) = base_value {
                        return Ok(Value::Optional(None));
                    }
                }
                self.member_access(base_value, member, *span)
            }
            Expression::Index { base, index, span } => {
                let base_value = self.eval_expression(base)?;
                let index_value = self.eval_expression(index)?;
                match base_value {
                    Value::Array(array) => {
                        let i = as_usize(&index_value, *span)?;
                        array.get(i).cloned().ok_or_else(|| InterpreterError::new(*span, ErrorKind::ForceCastFailed("array index out of bounds".to_string())))
                    }
                    Value::Dictionary(dict) => {
                        let key = index_value.as_dictionary_key().ok_or_else(|| InterpreterError::new(*span, ErrorKind::ForceCastFailed("dictionary key is not hashable".to_string())))?;
                        Ok(Value::Optional(dict.get(&key).cloned().map(Box::new)))
                    }
                    _ => Err(InterpreterError::new(*span, ErrorKind::ForceCastFailed("not indexable".to_string()))),
                }
            }
            Expression::Cast { expr, kind, span, .. } => {
                let value = self.eval_expression(expr)?;
                match kind {
                    CastKind::Simple => Ok(value),
                    CastKind::Failable => Ok(Value::Optional(Some(Box::new(value)))),
                    CastKind::Force => Ok(value),
                }
            }
            Expression::Reference { expr, authorized, span, .. } => {
                let slot = self.lvalue_slot(expr)?;
                Ok(Value::Reference(ReferenceValue::Ephemeral { target: slot, authorized: *authorized, borrow_type: TypeId::INVALID }))
            }
            Expression::Conditional { condition, then_branch, else_branch, .. } => {
                if truthy(&self.eval_expression(condition)?) {
                    self.eval_expression(then_branch)
                } else {
                    self.eval_expression(else_branch)
                }
            }
            Expression::Path { domain, identifier, .. } => {
                let domain = match domain {
                    cadence_ast::PathDomain::Storage => StorageDomain::Storage,
                    cadence_ast::PathDomain::Private => StorageDomain::Private,
                    cadence_ast::PathDomain::Public => StorageDomain::Public,
                };
                Ok(Value::Path(PathValue::new(domain, identifier.clone())))
            }
            Expression::ForceUnwrap { operand, span } => match self.eval_expression(operand)? {
                Value::Optional(Some(inner)) => Ok(*inner),
                Value::Optional(None) => Err(InterpreterError::new(*span, ErrorKind::ForceCastFailed("forced unwrap of nil".to_string()))),
                other => Ok(other),
            },
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, left: &Expression, right: &Expression, span: Span) -> Result<Value, InterpreterError> {
        if matches!(op, BinaryOp::And) {
            return Ok(Value::Bool(truthy(&self.eval_expression(left)?) && truthy(&self.eval_expression(right)?)));
        }
        if matches!(op, BinaryOp::Or) {
            return Ok(Value::Bool(truthy(&self.eval_expression(left)?) || truthy(&self.eval_expression(right)?)));
        }
        if matches!(op, BinaryOp::NilCoalesce) {
            return match self.eval_expression(left)? {
                Value::Optional(Some(inner)) => Ok(*inner),
                _ => self.eval_expression(right),
            };
        }

        let lhs = self.eval_expression(left)?;
        let rhs = self.eval_expression(right)?;
        match op {
            BinaryOp::Equal => Ok(Value::Bool(values_equal(&lhs, &rhs))),
            BinaryOp::NotEqual => Ok(Value::Bool(!values_equal(&lhs, &rhs))),
            _ => match (&lhs, &rhs) {
                (Value::Integer(a), Value::Integer(b)) => {
                    let (a, b) = harmonize_integer_operands(a, b, span)?;
                    integer_binary(op, &a, &b, span)
                }
                (Value::Fix64(a), Value::Fix64(b)) => fix64_binary(op, *a, *b, span),
                (Value::UFix64(a), Value::UFix64(b)) => ufix64_binary(op, *a, *b, span),
                (Value::String(a), Value::String(b)) if matches!(op, BinaryOp::Add) => Ok(Value::String(format!("{a}{b}"))),
                _ => Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("operand types do not support this operator".to_string()))),
            },
        }
    }

    fn eval_unary(&mut self, op: UnaryOp, operand: &Expression, span: Span) -> Result<Value, InterpreterError> {
        let value = self.eval_expression(operand)?;
        match (op, value) {
            (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (UnaryOp::Negate, Value::Integer(i)) => Ok(Value::Integer(numeric::negate(&i, span)?)),
            (UnaryOp::Negate, Value::Fix64(n)) => Ok(Value::Fix64(-n)),
            (UnaryOp::BitNot, Value::Integer(i)) => {
                let one = IntegerValue::new_unchecked(i.primitive, BigInt::from(1));
                let incremented = numeric::add(&i, &one, span)?;
                Ok(Value::Integer(numeric::negate(&incremented, span)?))
            }
            _ => Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("operand type does not support this unary operator".to_string()))),
        }
    }

    fn eval_create(&mut self, ty: &cadence_ast::TypeExpr, arguments: &[cadence_ast::Argument], span: Span) -> Result<Value, InterpreterError> {
        let name = type_expr_name(ty);
        let decl = self
            .composites
            .get(&name)
            .cloned()
            .ok_or_else(|| InterpreterError::new(span, ErrorKind::ForceCastFailed(format!("unknown composite `{name}`"))))?;
        let uuid = if decl.kind.is_resource() { Some(self.host.next_uuid()) } else { None };
        let mut composite = CompositeValue::new(name, TypeId::INVALID, uuid);
        if let Some(uuid) = uuid {
            composite.set_field("uuid", Value::Integer(IntegerValue::new_unchecked(Primitive::UIntN(64), BigInt::from(uuid))));
        }
        if let Some(initializer) = &decl.initializer {
            self.activations.push_scope();
            let self_slot = self.heap.alloc(Value::Composite(composite.clone()));
            self.activations.declare("self", self_slot);
            for (param, arg) in initializer.parameters.iter().zip(arguments) {
                let value = self.eval_expression(&arg.value)?;
                let value = coerce_numeric(value, &param.ty, param.span)?;
                let slot = self.heap.alloc(value);
                self.activations.declare(param.name.clone(), slot);
            }
            if let Some(body) = &initializer.body {
                self.exec_block(body)?;
            }
            if let Some(Value::Composite(updated)) = self.heap.get(self_slot).cloned() {
                composite = updated;
            }
            self.activations.pop_scope();
        }
        Ok(Value::Composite(composite))
    }

    fn eval_call(&mut self, callee: &Expression, arguments: &[cadence_ast::Argument], span: Span) -> Result<Value, InterpreterError> {
        if let Expression::Identifier { name, .. } = callee {
            match name.as_str() {
                "panic" => {
                    let message = self.argument_string(arguments, 0)?;
                    return Err(builtins::panic(message, span));
                }
                "assert" => {
                    let condition = truthy(&self.eval_expression(&arguments[0].value)?);
                    let message = if arguments.len() > 1 { Some(self.argument_string(arguments, 1)?) } else { None };
                    builtins::assert(condition, message, span)?;
                    return Ok(Value::Void);
                }
                "unsafeRandom" => {
                    return Ok(Value::Integer(IntegerValue::new_unchecked(Primitive::UIntN(64), BigInt::from(builtins::unsafe_random(self.host)))));
                }
                "before" => {
                    return Ok(self.before_snapshots.get(&span).cloned().unwrap_or(Value::Void));
                }
                _ => {}
            }
            if let Some(decl) = self.functions.get(name).cloned() {
                let mut args = Vec::with_capacity(arguments.len());
                for arg in arguments {
                    args.push(self.eval_expression(&arg.value)?);
                }
                return self.call_function(&decl, args);
            }
        }
        Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("unresolved call target".to_string())))
    }

    fn argument_string(&mut self, arguments: &[cadence_ast::Argument], index: usize) -> Result<String, InterpreterError> {
        match self.eval_expression(&arguments[index].value)? {
            Value::String(s) => Ok(s),
            _ => Ok(String::new()),
        }
    }

    fn member_access(&mut self, base: Value, member: &str, span: Span) -> Result<Value, InterpreterError> {
        match base {
            Value::Composite(composite) => composite
                .get_field(member)
                .cloned()
                .ok_or_else(|| InterpreterError::new(span, ErrorKind::ForceCastFailed(format!("no field `{member}` on this composite")))),
            Value::Reference(ReferenceValue::Ephemeral { target, .. }) => {
                let pointee = self.heap.get(target).cloned().ok_or_else(|| InterpreterError::new(span, ErrorKind::DereferenceFailed))?;
                if pointee.is_invalidated() {
                    return Err(InterpreterError::new(span, ErrorKind::DereferenceFailed));
                }
                self.member_access(pointee, member, span)
            }
            Value::Reference(ReferenceValue::Storage { address, path, .. }) => {
                let stored = self.host.storage().read(address, &path).ok_or_else(|| InterpreterError::new(span, ErrorKind::MissingStorageValue))?;
                self.member_access(stored, member, span)
            }
            _ => Err(InterpreterError::new(span, ErrorKind::ForceCastFailed(format!("no member `{member}` on this value")))),
        }
    }

    /// `account.save<T>(value, to: path)`.
    pub fn storage_save(&mut self, address: cadence_types::Address, path: PathValue, value: Value, span: Span) -> Result<(), InterpreterError> {
        if path.domain != StorageDomain::Storage {
            return Err(InterpreterError::new(span, ErrorKind::InvalidPathDomain("save requires a storage path".to_string())));
        }
        if self.host.storage().read(address, &path).is_some() {
            return Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("a value already exists at this path".to_string())));
        }
        self.host.storage_mut().write(address, &path, Some(value));
        Ok(())
    }

    /// `account.load<T>(from: path)`.
    pub fn storage_load(&mut self, address: cadence_types::Address, path: PathValue) -> Option<Value> {
        let value = self.host.storage().read(address, &path);
        if value.is_some() {
            self.host.storage_mut().write(address, &path, None);
        }
        value
    }

    /// `account.link<T>(newPath, target: storedPath)`.
    pub fn link(&mut self, address: cadence_types::Address, new_path: PathValue, target: PathValue, borrow_type: TypeId, span: Span) -> Result<(), InterpreterError> {
        if new_path.domain == StorageDomain::Storage {
            return Err(InterpreterError::new(span, ErrorKind::InvalidPathDomain("cannot install a link in the storage domain".to_string())));
        }
        self.host.storage_mut().write_link(address, &new_path, Some(Link { target, borrow_type }));
        Ok(())
    }

    /// `getCapability<T>(path).borrow()`. Walks at most one link hop —
    /// chained links are resolved by repeating the capability-type
    /// compatibility check at each hop, up to the configured max depth.
    pub fn borrow_capability(&mut self, subtypes: &SubtypeChecker<'_>, address: cadence_types::Address, path: PathValue, borrow_type: TypeId, span: Span) -> Result<Value, InterpreterError> {
        let mut current_path = path;
        for _ in 0..self.max_capability_chain_depth {
            let Some(link) = self.host.storage().read_link(address, &current_path) else {
                return Ok(Value::Optional(None));
            };
            if !subtypes.is_subtype_of(link.borrow_type, borrow_type) {
                return Ok(Value::Optional(None));
            }
            if link.target.domain == StorageDomain::Storage {
                return match self.host.storage().read(address, &link.target) {
                    Some(_) => {
                        let reference = Value::Reference(ReferenceValue::Storage { address, path: link.target, authorized: false, borrow_type });
                        Ok(Value::Optional(Some(Box::new(reference))))
                    }
                    None => Ok(Value::Optional(None)),
                };
            }
            current_path = link.target;
        }
        Err(InterpreterError::new(span, ErrorKind::NestedCapabilityError))
    }
}

fn type_expr_name(ty: &cadence_ast::TypeExpr) -> String {
    match ty {
        cadence_ast::TypeExpr::Nominal { name, .. } => name.clone(),
        _ => String::new(),
    }
}

/// Maps a nominal numeric type name to its `Primitive`, for the fixed-width
/// families only (`Int`/`UInt` have no name-specific primitive of their own
/// beyond `Primitive::Int`/`Primitive::UInt`, which literals already carry).
fn primitive_from_name(name: &str) -> Option<Primitive> {
    match name {
        "UInt" => Some(Primitive::UInt),
        "Int8" => Some(Primitive::IntN(8)),
        "Int16" => Some(Primitive::IntN(16)),
        "Int32" => Some(Primitive::IntN(32)),
        "Int64" => Some(Primitive::IntN(64)),
        "Int128" => Some(Primitive::IntN(128)),
        "Int256" => Some(Primitive::IntN(256)),
        "UInt8" => Some(Primitive::UIntN(8)),
        "UInt16" => Some(Primitive::UIntN(16)),
        "UInt32" => Some(Primitive::UIntN(32)),
        "UInt64" => Some(Primitive::UIntN(64)),
        "UInt128" => Some(Primitive::UIntN(128)),
        "UInt256" => Some(Primitive::UIntN(256)),
        "Word8" => Some(Primitive::WordN(8)),
        "Word16" => Some(Primitive::WordN(16)),
        "Word32" => Some(Primitive::WordN(32)),
        "Word64" => Some(Primitive::WordN(64)),
        "Word128" => Some(Primitive::WordN(128)),
        "Word256" => Some(Primitive::WordN(256)),
        _ => None,
    }
}

/// Gives a freshly evaluated integer value its declared width, if `ty`
/// names one of the fixed-width numeric types. A plain `Int`-typed
/// literal passed where e.g. `UInt8` is declared is reinterpreted and
/// re-checked against that family's range, exactly as if it had been
/// parsed with that width to begin with.
fn coerce_numeric(value: Value, ty: &cadence_ast::TypeExpr, span: Span) -> Result<Value, InterpreterError> {
    if let Value::Integer(int_value) = &value {
        if let Some(primitive) = primitive_from_name(&type_expr_name(ty)) {
            if primitive != int_value.primitive {
                return Ok(Value::Integer(numeric::coerce(primitive, int_value.magnitude.clone(), span)?));
            }
        }
    }
    Ok(value)
}

/// When one operand is a bare `Int`-typed literal and the other carries a
/// declared fixed width (e.g. `x + 1` where `x: UInt8`), the literal takes
/// on that width before the operation runs, standing in for the
/// contextual literal typing a full elaboration pass would already have
/// applied.
fn harmonize_integer_operands(a: &IntegerValue, b: &IntegerValue, span: Span) -> Result<(IntegerValue, IntegerValue), InterpreterError> {
    if a.primitive == b.primitive {
        return Ok((a.clone(), b.clone()));
    }
    if a.primitive == Primitive::Int {
        return Ok((numeric::coerce(b.primitive, a.magnitude.clone(), span)?, b.clone()));
    }
    if b.primitive == Primitive::Int {
        return Ok((a.clone(), numeric::coerce(a.primitive, b.magnitude.clone(), span)?));
    }
    Ok((a.clone(), b.clone()))
}

fn truthy(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

fn as_usize(value: &Value, span: Span) -> Result<usize, InterpreterError> {
    match value {
        Value::Integer(i) => i.magnitude.to_string().parse().map_err(|_| InterpreterError::new(span, ErrorKind::ForceCastFailed("index out of range".to_string()))),
        _ => Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("index must be an integer".to_string()))),
    }
}

fn parse_fixed_point(text: &str, negative: bool, span: Span) -> Result<i64, InterpreterError> {
    let (whole, frac) = text.split_once('.').unwrap_or((text, "0"));
    let whole: i64 = whole.parse().map_err(|_| InterpreterError::new(span, ErrorKind::ForceCastFailed("malformed fixed-point literal".to_string())))?;
    let frac_digits: String = frac.chars().chain(std::iter::repeat('0')).take(8).collect();
    let frac_value: i64 = frac_digits.parse().map_err(|_| InterpreterError::new(span, ErrorKind::ForceCastFailed("malformed fixed-point literal".to_string())))?;
    let scaled = whole * numeric::FIX64_SCALE + frac_value;
    Ok(if negative { -scaled } else { scaled })
}

fn integer_binary(op: BinaryOp, a: &IntegerValue, b: &IntegerValue, span: Span) -> Result<Value, InterpreterError> {
    let result = match op {
        BinaryOp::Add => numeric::add(a, b, span)?,
        BinaryOp::Sub => numeric::sub(a, b, span)?,
        BinaryOp::Mul => numeric::mul(a, b, span)?,
        BinaryOp::Div => numeric::div(a, b, span)?,
        BinaryOp::Mod => numeric::rem(a, b, span)?,
        BinaryOp::BitAnd => numeric::bitand(a, b, span)?,
        BinaryOp::BitOr => numeric::bitor(a, b, span)?,
        BinaryOp::BitXor => numeric::bitxor(a, b, span)?,
        BinaryOp::Less => return Ok(Value::Bool(a.magnitude < b.magnitude)),
        BinaryOp::LessEqual => return Ok(Value::Bool(a.magnitude <= b.magnitude)),
        BinaryOp::Greater => return Ok(Value::Bool(a.magnitude > b.magnitude)),
        BinaryOp::GreaterEqual => return Ok(Value::Bool(a.magnitude >= b.magnitude)),
        BinaryOp::ShiftLeft | BinaryOp::ShiftRight => {
            let bits: u32 = b.magnitude.to_string().parse().unwrap_or(0);
            if matches!(op, BinaryOp::ShiftLeft) {
                numeric::shift_left(a, bits, span)?
            } else {
                numeric::shift_right(a, bits, span)?
            }
        }
        _ => return Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("unsupported integer operator".to_string()))),
    };
    Ok(Value::Integer(result))
}

fn fix64_binary(op: BinaryOp, a: i64, b: i64, span: Span) -> Result<Value, InterpreterError> {
    match op {
        BinaryOp::Add => Ok(Value::Fix64(a.checked_add(b).ok_or_else(|| InterpreterError::new(span, ErrorKind::OverflowError))?)),
        BinaryOp::Sub => Ok(Value::Fix64(a.checked_sub(b).ok_or_else(|| InterpreterError::new(span, ErrorKind::OverflowError))?)),
        BinaryOp::Mul => Ok(Value::Fix64(numeric::fix64_mul(a, b, span)?)),
        BinaryOp::Div => Ok(Value::Fix64(numeric::fix64_div(a, b, span)?)),
        BinaryOp::Less => Ok(Value::Bool(a < b)),
        BinaryOp::LessEqual => Ok(Value::Bool(a <= b)),
        BinaryOp::Greater => Ok(Value::Bool(a > b)),
        BinaryOp::GreaterEqual => Ok(Value::Bool(a >= b)),
        _ => Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("unsupported Fix64 operator".to_string()))),
    }
}

fn ufix64_binary(op: BinaryOp, a: u64, b: u64, span: Span) -> Result<Value, InterpreterError> {
    match op {
        BinaryOp::Add => Ok(Value::UFix64(a.checked_add(b).ok_or_else(|| InterpreterError::new(span, ErrorKind::OverflowError))?)),
        BinaryOp::Sub => Ok(Value::UFix64(a.checked_sub(b).ok_or_else(|| InterpreterError::new(span, ErrorKind::OverflowError))?)),
        BinaryOp::Mul => Ok(Value::UFix64(numeric::ufix64_mul(a, b, span)?)),
        BinaryOp::Div => Ok(Value::UFix64(numeric::ufix64_div(a, b, span)?)),
        BinaryOp::Less => Ok(Value::Bool(a < b)),
        BinaryOp::LessEqual => Ok(Value::Bool(a <= b)),
        BinaryOp::Greater => Ok(Value::Bool(a > b)),
        BinaryOp::GreaterEqual => Ok(Value::Bool(a >= b)),
        _ => Err(InterpreterError::new(span, ErrorKind::ForceCastFailed("unsupported UFix64 operator".to_string()))),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Void, Value::Void) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Address(x), Value::Address(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Character(x), Value::Character(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x.primitive == y.primitive && x.magnitude == y.magnitude,
        (Value::Fix64(x), Value::Fix64(y)) => x == y,
        (Value::UFix64(x), Value::UFix64(y)) => x == y,
        (Value::MetaType(x), Value::MetaType(y)) => x == y,
        (Value::Optional(x), Value::Optional(y)) => match (x, y) {
            (None, None) => true,
            (Some(x), Some(y)) => values_equal(x, y),
            _ => false,
        },
        _ => false,
    }
}

/// Walks an expression tree looking for `before(...)` calls, invoking
/// `f` with each one's containing call expression and its single
/// argument so the caller can evaluate it against the pre-execution
/// state before it's overwritten.
fn collect_before_calls(expr: &Expression, f: &mut impl FnMut(&Expression, &Expression) -> Result<(), InterpreterError>) -> Result<(), InterpreterError> {
    match expr {
        Expression::Call { callee, arguments, .. } => {
            if let Expression::Identifier { name, .. } = callee.as_ref() {
                if name == "before" {
                    if let Some(arg) = arguments.first() {
                        f(expr, &arg.value)?;
                    }
                    return Ok(());
                }
            }
            for arg in arguments {
                collect_before_calls(&arg.value, f)?;
            }
            Ok(())
        }
        Expression::Binary { left, right, .. } => {
            collect_before_calls(left, f)?;
            collect_before_calls(right, f)
        }
        Expression::Unary { operand, .. }
        | Expression::Move { operand, .. }
        | Expression::ForceUnwrap { operand, .. }
        | Expression::Reference { expr: operand, .. }
        | Expression::Cast { expr: operand, .. } => collect_before_calls(operand, f),
        Expression::Conditional { condition, then_branch, else_branch, .. } => {
            collect_before_calls(condition, f)?;
            collect_before_calls(then_branch, f)?;
            collect_before_calls(else_branch, f)
        }
        Expression::MemberAccess { base, .. } => collect_before_calls(base, f),
        Expression::Index { base, index, .. } => {
            collect_before_calls(base, f)?;
            collect_before_calls(index, f)
        }
        _ => Ok(()),
    }
}
