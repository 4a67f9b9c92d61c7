//! The evaluator's expression-result type.
//!
//! Most node kinds evaluate to a concrete value; `Block`, `If`, `While`,
//! `For`, and `Call` may instead produce "no value" — the source's own
//! idiosyncratic "return the last statement only if it is a data value"
//! rule (spec's design notes call this out explicitly and ask for it to
//! be preserved rather than redesigned away).

use glint_ast::{Node, NodeRef};

use crate::error::RuntimeError;

#[derive(Clone)]
pub enum EvalValue {
    Value(NodeRef),
    Void,
}

impl EvalValue {
    pub fn require(self, context: &'static str) -> Result<NodeRef, RuntimeError> {
        match self {
            EvalValue::Value(v) => Ok(v),
            EvalValue::Void => Err(RuntimeError::NoValue { context }),
        }
    }

    /// Narrows a result to the kinds a lambda call is allowed to produce:
    /// scalar, string, array, or type instance. Anything else — notably a
    /// bare `Lambda`/`TypeDefinition` reached by looking up its name —
    /// becomes `Void`.
    pub fn into_callable_result(self) -> EvalValue {
        match self {
            EvalValue::Value(node) => match node.as_ref() {
                Node::Integer(_)
                | Node::Float(_)
                | Node::String(_)
                | Node::Array(_)
                | Node::TypeObject(_) => EvalValue::Value(node),
                _ => EvalValue::Void,
            },
            EvalValue::Void => EvalValue::Void,
        }
    }
}

impl From<NodeRef> for EvalValue {
    fn from(v: NodeRef) -> Self {
        EvalValue::Value(v)
    }
}
