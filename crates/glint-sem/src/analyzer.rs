//! A single top-down traversal that rejects ill-formed ASTs before they
//! ever reach the evaluator.
//!
//! Two checks the language prose calls out — the `Binary`/`Unary`
//! operator whitelist and "lambda parameters must be symbols" — need no
//! runtime code here: `BinOp`/`UnOp` are closed enums and `Lambda::params`
//! is typed `Vec<Symbol>`, so both are enforced by the AST's own shape.
//! What remains is the set of checks the node *shape* can't express on
//! its own.

use glint_ast::{Node, NodeRef};

use crate::error::SemaError;

pub fn analyze(items: &[NodeRef]) -> Result<(), SemaError> {
    for item in items {
        analyze_node(item, false)?;
    }
    Ok(())
}

fn require_value_producing(node: &NodeRef) -> Result<(), SemaError> {
    if node.is_value_producing() {
        Ok(())
    } else {
        Err(SemaError::BadConditionShape {
            found: node.kind_name(),
        })
    }
}

fn analyze_node(node: &NodeRef, in_lambda: bool) -> Result<(), SemaError> {
    match node.as_ref() {
        Node::Integer(_) | Node::Float(_) | Node::String(_) | Node::Symbol(_) => Ok(()),

        Node::Array(elements) => {
            for e in elements.borrow().iter() {
                analyze_node(e, in_lambda)?;
            }
            Ok(())
        }

        Node::ArrayIndex { index, .. } => analyze_node(index, in_lambda),

        Node::Unary { operand, .. } => analyze_node(operand, in_lambda),

        Node::Binary { op, lhs, rhs } => {
            if op.is_assignment() && !lhs.is_assignable() {
                return Err(SemaError::BadAssignmentTarget {
                    found: lhs.kind_name(),
                });
            }
            analyze_node(lhs, in_lambda)?;
            analyze_node(rhs, in_lambda)
        }

        Node::Block(stmts) => {
            for s in stmts.borrow().iter() {
                analyze_node(s, in_lambda)?;
            }
            Ok(())
        }

        Node::If {
            cond,
            then_block,
            else_block,
        } => {
            require_value_producing(cond)?;
            analyze_node(cond, in_lambda)?;
            analyze_node(then_block, in_lambda)?;
            if let Some(e) = else_block {
                analyze_node(e, in_lambda)?;
            }
            Ok(())
        }

        Node::While { cond, body } => {
            require_value_producing(cond)?;
            analyze_node(cond, in_lambda)?;
            analyze_node(body, in_lambda)
        }

        Node::For {
            init,
            cond,
            step,
            body,
        } => {
            if let Some(init) = init {
                let is_assignment =
                    matches!(init.as_ref(), Node::Binary { op, .. } if op.is_assignment());
                if !is_assignment {
                    return Err(SemaError::BadForInit {
                        found: init.kind_name(),
                    });
                }
                analyze_node(init, in_lambda)?;
            }
            if let Some(cond) = cond {
                require_value_producing(cond)?;
                analyze_node(cond, in_lambda)?;
            }
            if let Some(step) = step {
                let is_unary_or_binary =
                    matches!(step.as_ref(), Node::Unary { .. } | Node::Binary { .. });
                if !is_unary_or_binary {
                    return Err(SemaError::BadForStep {
                        found: step.kind_name(),
                    });
                }
                analyze_node(step, in_lambda)?;
            }
            analyze_node(body, in_lambda)
        }

        Node::Lambda { body, .. } => {
            if in_lambda {
                return Err(SemaError::NestedLambda);
            }
            analyze_node(body, true)
        }

        Node::Call { args, .. } => {
            for a in args {
                if !a.is_value_producing() {
                    return Err(SemaError::BadArgumentShape {
                        found: a.kind_name(),
                    });
                }
                analyze_node(a, in_lambda)?;
            }
            Ok(())
        }

        Node::TypeDefinition { .. } => Ok(()),

        Node::TypeInstance { args, .. } => {
            for a in args {
                analyze_node(a, in_lambda)?;
            }
            Ok(())
        }

        Node::FieldAccess { .. } => Ok(()),

        Node::TypeObject(fields) => {
            for v in fields.borrow().values() {
                analyze_node(v, in_lambda)?;
            }
            Ok(())
        }
    }
}
