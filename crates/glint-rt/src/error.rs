//! Evaluation-time failures. Distinct from the earlier passes' errors:
//! these only ever surface while `main` is actually running.

use glint_util::Symbol;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RuntimeError {
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: Symbol },

    #[error("`{name}` expects {expected} argument(s), found {found}")]
    ArityMismatch {
        name: Symbol,
        expected: usize,
        found: usize,
    },

    #[error("`{op}` requires a numeric operand, found {found}")]
    WrongOperandKind { op: String, found: &'static str },

    #[error("array index {index} out of range (length {len})")]
    IndexOutOfRange { index: i32, len: usize },

    #[error("array-set value kind does not match the existing element kind")]
    ArraySetKindMismatch,

    #[error("value bound to `{instance}` has no field `{field}`")]
    MissingField { instance: Symbol, field: Symbol },

    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown built-in `{name}`")]
    UnknownBuiltin { name: Symbol },

    #[error("attempt to call `{name}`, which is not a lambda")]
    NotCallable { name: Symbol },

    #[error("only functions and type definitions are supported as global objects, found {found}")]
    NotAGlobalObject { found: &'static str },

    #[error("`{name}` is not bound to an array")]
    NotAnArray { name: Symbol },

    #[error("`{name}` is not bound to a type instance")]
    NotATypeInstance { name: Symbol },

    #[error("unknown type `{name}`")]
    UnknownType { name: Symbol },

    #[error("`end_scope` called at depth 0")]
    ScopeUnderflow,

    #[error("condition did not evaluate to a number")]
    NonNumericCondition,

    #[error("{context} produced no value")]
    NoValue { context: &'static str },

    #[error("failed to read `{path}`: {detail}")]
    FileReadError { path: String, detail: String },
}
