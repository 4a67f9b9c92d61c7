//! Integer/float pair dispatch for arithmetic, comparison, shift, and
//! bitwise operators — the evaluator's one non-trivial type-checking
//! surface now that the parser/analyzer carry no static type system.

use glint_ast::{BinOp, Node, NodeRef};

use crate::error::RuntimeError;

#[derive(Clone, Copy)]
pub enum Num {
    Int(i32),
    Float(f64),
}

impl Num {
    pub fn as_f64(self) -> f64 {
        match self {
            Num::Int(v) => v as f64,
            Num::Float(v) => v,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Num::Int(v) => v == 0,
            Num::Float(v) => v == 0.0,
        }
    }

    pub fn to_node(self) -> NodeRef {
        match self {
            Num::Int(v) => Node::integer(v),
            Num::Float(v) => Node::float(v),
        }
    }
}

pub fn as_num(node: &NodeRef, op: &str) -> Result<Num, RuntimeError> {
    match node.as_ref() {
        Node::Integer(c) => Ok(Num::Int(c.get())),
        Node::Float(c) => Ok(Num::Float(c.get())),
        other => Err(RuntimeError::WrongOperandKind {
            op: op.to_string(),
            found: other.kind_name(),
        }),
    }
}

/// Dispatches an arithmetic/comparison/shift/bitwise/logical operator
/// over a pair of already-evaluated numeric operands: int/int, int/float,
/// float/int, float/float, producing the arithmetically correct result.
/// Integer-only operators (`% << >> & | ^`) reject a float on either
/// side; every other operator promotes to float when either side is one.
pub fn apply(op: BinOp, lhs: Num, rhs: Num, op_text: &str) -> Result<Num, RuntimeError> {
    if op.is_integer_only() {
        let (Num::Int(l), Num::Int(r)) = (lhs, rhs) else {
            return Err(RuntimeError::WrongOperandKind {
                op: op_text.to_string(),
                found: "float",
            });
        };
        return integer_only(op, l, r);
    }

    if op.is_comparison() {
        return Ok(Num::Int(if compare(op, lhs.as_f64(), rhs.as_f64()) {
            1
        } else {
            0
        }));
    }

    if matches!(op, BinOp::And | BinOp::Or) {
        let truth = match op {
            BinOp::And => !lhs.is_zero() && !rhs.is_zero(),
            BinOp::Or => !lhs.is_zero() || !rhs.is_zero(),
            _ => unreachable!(),
        };
        return Ok(Num::Int(if truth { 1 } else { 0 }));
    }

    match (lhs, rhs) {
        (Num::Int(l), Num::Int(r)) => integer_arith(op, l, r),
        _ => float_arith(op, lhs.as_f64(), rhs.as_f64()),
    }
}

fn compare(op: BinOp, l: f64, r: f64) -> bool {
    match op {
        BinOp::Eq => l == r,
        BinOp::Ne => l != r,
        BinOp::Lt => l < r,
        BinOp::Le => l <= r,
        BinOp::Gt => l > r,
        BinOp::Ge => l >= r,
        _ => unreachable!("comparison operator set is closed over these kinds"),
    }
}

fn integer_only(op: BinOp, l: i32, r: i32) -> Result<Num, RuntimeError> {
    Ok(Num::Int(match op {
        BinOp::Mod => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            l.wrapping_rem(r)
        }
        BinOp::Shl => l.wrapping_shl((r & 31) as u32),
        BinOp::Shr => l.wrapping_shr((r & 31) as u32),
        BinOp::BitAnd => l & r,
        BinOp::BitOr => l | r,
        BinOp::BitXor => l ^ r,
        _ => unreachable!("integer-only operator set is closed over these kinds"),
    }))
}

fn integer_arith(op: BinOp, l: i32, r: i32) -> Result<Num, RuntimeError> {
    Ok(Num::Int(match op {
        BinOp::Add => l.wrapping_add(r),
        BinOp::Sub => l.wrapping_sub(r),
        BinOp::Mul => l.wrapping_mul(r),
        BinOp::Div => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            l.wrapping_div(r)
        }
        _ => unreachable!("arithmetic operator set is closed over these kinds"),
    }))
}

fn float_arith(op: BinOp, l: f64, r: f64) -> Result<Num, RuntimeError> {
    Ok(Num::Float(match op {
        BinOp::Add => l + r,
        BinOp::Sub => l - r,
        BinOp::Mul => l * r,
        BinOp::Div => {
            if r == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            l / r
        }
        _ => unreachable!("arithmetic operator set is closed over these kinds"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_int_float_add_promotes_to_float() {
        let r = apply(BinOp::Add, Num::Int(1), Num::Float(1.5), "+").unwrap();
        assert!(matches!(r, Num::Float(v) if v == 2.5));
    }

    #[test]
    fn modulo_rejects_a_float_operand() {
        let err = apply(BinOp::Mod, Num::Float(1.0), Num::Int(2), "%").unwrap_err();
        assert!(matches!(err, RuntimeError::WrongOperandKind { found: "float", .. }));
    }

    #[test]
    fn integer_division_by_zero_is_an_error() {
        let err = apply(BinOp::Div, Num::Int(1), Num::Int(0), "/").unwrap_err();
        assert_eq!(err, RuntimeError::DivisionByZero);
    }

    #[test]
    fn comparison_returns_zero_or_one() {
        let r = apply(BinOp::Lt, Num::Int(1), Num::Int(2), "<").unwrap();
        assert!(matches!(r, Num::Int(1)));
    }
}
