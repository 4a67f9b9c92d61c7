//! The AST node model.
//!
//! Nodes are a tagged variant (`enum`) rather than a polymorphic base
//! class with downcasts: every kind is a known case, matching is
//! exhaustive, and there is no virtual dispatch to reason about.
//!
//! Nodes are shared (`Rc`) rather than uniquely owned: the optimizer
//! replaces one parent's child pointer without necessarily owning the
//! only reference to the old subtree, and the evaluator walks a lambda's
//! body once per call without re-parsing it. `Integer`/`Float` leaves
//! additionally need interior mutability, because `++`/`--` and
//! assignment mutate a literal in place when it is used as an lvalue
//! (see the evaluator's treatment of `Unary`). `Array`/`Block` carry
//! their element lists behind a `RefCell` so `array-set` and the
//! optimizer's rewrites can edit a child list without rebuilding the
//! parent node.
//!
//! A [`Node`] doubles as a runtime value: literals "evaluate to
//! themselves", so storage slots and call arguments hold `Rc<Node>`
//! directly rather than a separate `Value` type.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use glint_util::Symbol;

use crate::ops::{BinOp, UnOp};

pub type NodeRef = Rc<Node>;

#[derive(Debug)]
pub enum Node {
    Integer(Cell<i32>),
    Float(Cell<f64>),
    String(Rc<str>),
    Symbol(Symbol),

    Array(RefCell<Vec<NodeRef>>),
    ArrayIndex {
        name: Symbol,
        index: NodeRef,
    },

    Unary {
        op: UnOp,
        operand: NodeRef,
    },
    Binary {
        op: BinOp,
        lhs: NodeRef,
        rhs: NodeRef,
    },

    Block(RefCell<Vec<NodeRef>>),
    If {
        cond: NodeRef,
        then_block: NodeRef,
        else_block: Option<NodeRef>,
    },
    While {
        cond: NodeRef,
        body: NodeRef,
    },
    For {
        init: Option<NodeRef>,
        cond: Option<NodeRef>,
        step: Option<NodeRef>,
        body: NodeRef,
    },

    Lambda {
        name: Symbol,
        params: Vec<Symbol>,
        body: NodeRef,
    },
    Call {
        name: Symbol,
        args: Vec<NodeRef>,
    },

    TypeDefinition {
        name: Symbol,
        fields: Vec<Symbol>,
    },
    TypeInstance {
        type_name: Symbol,
        args: Vec<NodeRef>,
    },
    FieldAccess {
        instance: Symbol,
        field: Symbol,
    },
    TypeObject(RefCell<IndexMap<Symbol, NodeRef>>),
}

impl Node {
    pub fn integer(v: i32) -> NodeRef {
        Rc::new(Node::Integer(Cell::new(v)))
    }

    pub fn float(v: f64) -> NodeRef {
        Rc::new(Node::Float(Cell::new(v)))
    }

    pub fn string(s: impl Into<Rc<str>>) -> NodeRef {
        Rc::new(Node::String(s.into()))
    }

    pub fn symbol(s: Symbol) -> NodeRef {
        Rc::new(Node::Symbol(s))
    }

    pub fn array(elements: Vec<NodeRef>) -> NodeRef {
        Rc::new(Node::Array(RefCell::new(elements)))
    }

    pub fn block(statements: Vec<NodeRef>) -> NodeRef {
        Rc::new(Node::Block(RefCell::new(statements)))
    }

    pub fn type_object(fields: IndexMap<Symbol, NodeRef>) -> NodeRef {
        Rc::new(Node::TypeObject(RefCell::new(fields)))
    }

    /// A short, stable name for this variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Integer(_) => "integer",
            Node::Float(_) => "float",
            Node::String(_) => "string",
            Node::Symbol(_) => "symbol",
            Node::Array(_) => "array",
            Node::ArrayIndex { .. } => "array-index",
            Node::Unary { .. } => "unary",
            Node::Binary { .. } => "binary",
            Node::Block(_) => "block",
            Node::If { .. } => "if",
            Node::While { .. } => "while",
            Node::For { .. } => "for",
            Node::Lambda { .. } => "lambda",
            Node::Call { .. } => "call",
            Node::TypeDefinition { .. } => "type-definition",
            Node::TypeInstance { .. } => "type-instance",
            Node::FieldAccess { .. } => "field-access",
            Node::TypeObject(_) => "type-object",
        }
    }

    pub fn is_block_valued(&self) -> bool {
        matches!(
            self,
            Node::If { .. } | Node::While { .. } | Node::For { .. } | Node::Block(_)
        )
    }

    /// Whether this node may stand as a `for`/`while`/`if` condition or a
    /// call argument: `Symbol`, `Integer`, `Float`, `Binary`, `Unary`, or
    /// `Call`.
    pub fn is_value_producing(&self) -> bool {
        matches!(
            self,
            Node::Symbol(_)
                | Node::Integer(_)
                | Node::Float(_)
                | Node::Binary { .. }
                | Node::Unary { .. }
                | Node::Call { .. }
        )
    }

    /// Whether this node may be the target of an assignment: `Symbol`,
    /// `ArrayIndex`, or `FieldAccess`.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self,
            Node::Symbol(_) | Node::ArrayIndex { .. } | Node::FieldAccess { .. }
        )
    }
}

impl fmt::Display for Node {
    /// Canonical scalar text, used by `print`/`println`. Compound kinds
    /// that shouldn't reach this point (blocks, lambdas, ...) fall back to
    /// their kind name rather than panicking, since the evaluator is the
    /// one responsible for rejecting them earlier.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Integer(v) => write!(f, "{}", v.get()),
            Node::Float(v) => write!(f, "{}", v.get()),
            Node::String(s) => write!(f, "{s}"),
            Node::Symbol(s) => write!(f, "{s}"),
            Node::Array(elems) => {
                write!(f, "[")?;
                for (i, e) in elems.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{e}")?;
                }
                write!(f, "]")
            }
            Node::TypeObject(fields) => {
                write!(f, "(")?;
                for (i, (_, v)) in fields.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
            other => write!(f, "<{}>", other.kind_name()),
        }
    }
}
