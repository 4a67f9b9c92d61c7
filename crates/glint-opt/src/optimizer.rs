//! In-place rewrite pass over each top-level lambda's body.
//!
//! Every rewrite here either erases an element of a block's statement
//! list or replaces one in place — a `Block` is the only node that
//! exposes a mutable child list (`RefCell<Vec<NodeRef>>`), so that is
//! the only granularity at which this pass can act. Expression-internal
//! positions (`Binary::lhs`, `If::cond`, ...) are plain `Rc` fields and
//! are never touched.
//!
//! Each statement's own nested bodies are optimized before the
//! statement itself is judged, so a loop that only becomes dead once
//! its own body has been hollowed out still collapses within a single
//! top-level call to [`optimize`]. Without that ordering, a second call
//! could still find work to do, which would break the fixed-point
//! guarantee: optimizing an already-optimized tree must be a no-op.

use std::cell::RefCell;

use glint_ast::{Node, NodeRef, UnOp};

pub fn optimize(items: &[NodeRef]) {
    for item in items {
        if let Node::Lambda { body, .. } = item.as_ref() {
            optimize_block(body);
        }
    }
}

fn as_block_cell(node: &NodeRef) -> Option<&RefCell<Vec<NodeRef>>> {
    match node.as_ref() {
        Node::Block(stmts) => Some(stmts),
        _ => None,
    }
}

fn optimize_block(block: &NodeRef) {
    let Some(stmts) = as_block_cell(block) else {
        return;
    };

    let mut i = 0;
    loop {
        if i >= stmts.borrow().len() {
            break;
        }
        let stmt = stmts.borrow()[i].clone();

        recurse_into_nested_bodies(&stmt);

        if is_dead_loop(&stmt) {
            stmts.borrow_mut().remove(i);
            continue;
        }

        if let Some(folded) = fold_unary(&stmt) {
            stmts.borrow_mut()[i] = folded;
        }

        i += 1;
    }
}

fn recurse_into_nested_bodies(node: &NodeRef) {
    match node.as_ref() {
        Node::While { body, .. } => optimize_block(body),
        Node::For { body, .. } => optimize_block(body),
        Node::If {
            then_block,
            else_block,
            ..
        } => {
            optimize_block(then_block);
            if let Some(e) = else_block {
                optimize_block(e);
            }
        }
        Node::Block(_) => optimize_block(node),
        _ => {}
    }
}

/// A `while`/`for` whose body contains no statements at all has no
/// observable side effect no matter how many times (zero or forever)
/// its condition would otherwise let it run, so it can be erased
/// outright once its body has collapsed to empty.
fn is_dead_loop(node: &NodeRef) -> bool {
    match node.as_ref() {
        Node::While { cond, body } => is_constant_condition(cond) && body_is_empty(body),
        Node::For {
            cond: None, body, ..
        } => body_is_empty(body),
        Node::For {
            cond: Some(c), body, ..
        } => is_constant_condition(c) && body_is_empty(body),
        _ => false,
    }
}

fn body_is_empty(body: &NodeRef) -> bool {
    as_block_cell(body).is_some_and(|stmts| stmts.borrow().is_empty())
}

/// Only `Integer`/`Float` literals count: a bare `Symbol` condition is
/// not known at this point in the pipeline, so it is left alone even
/// though nothing later rewrites it either.
fn is_constant_condition(node: &NodeRef) -> bool {
    matches!(node.as_ref(), Node::Integer(_) | Node::Float(_))
}

/// `++`/`--` applied directly to an `Integer`/`Float` literal folds to
/// the literal it would have produced at runtime. Other unary forms
/// (`-`, `!`) and non-literal operands are left intact.
fn fold_unary(node: &NodeRef) -> Option<NodeRef> {
    let Node::Unary { op, operand } = node.as_ref() else {
        return None;
    };
    if !matches!(op, UnOp::Inc | UnOp::Dec) {
        return None;
    }
    match operand.as_ref() {
        Node::Integer(c) => {
            let v = c.get();
            Some(Node::integer(if *op == UnOp::Inc { v + 1 } else { v - 1 }))
        }
        Node::Float(c) => {
            let v = c.get();
            Some(Node::float(if *op == UnOp::Inc {
                v + 1.0
            } else {
                v - 1.0
            }))
        }
        _ => None,
    }
}
