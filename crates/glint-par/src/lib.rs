//! Token sequence → AST, via a hand-written recursive-descent parser with
//! an explicit precedence climb for expressions.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::{parse, Parser};
