//! The shared AST node model: a tagged variant of node kinds with shared
//! (`Rc`) ownership, consumed by the parser, semantic analyzer, optimizer,
//! and evaluator alike.

mod node;
mod ops;

pub use node::{Node, NodeRef};
pub use ops::{BinOp, UnOp};
