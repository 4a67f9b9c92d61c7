//! Well-formedness checking over the parsed AST. Passes the same tree
//! through unchanged; it only ever accepts or rejects.

mod analyzer;
mod error;

pub use analyzer::analyze;
pub use error::SemaError;
