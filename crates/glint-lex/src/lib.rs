//! Byte stream → token sequence, including `load` directive resolution.
//!
//! This is the first stage of the pipeline: it never looks at, or is
//! looked at by, the AST. Everything it knows about source inclusion goes
//! through [`SourceResolver`], so the filesystem is a pluggable detail
//! rather than a hard dependency.

mod cursor;
mod error;
mod lexer;
mod resolver;
mod token;

pub use error::LexError;
pub use lexer::{lex_program, tokenize, Lexer};
pub use resolver::{FsResolver, SourceResolver};
pub use token::{Token, TokenKind};
