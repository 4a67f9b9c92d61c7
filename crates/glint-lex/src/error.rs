//! Lexical-phase errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LexError {
    #[error("unknown byte 0x{byte:02x} ({byte})")]
    UnknownByte { byte: u8 },

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("extra '.' in number literal")]
    ExtraDecimalPoint,

    #[error("digit expected after '.'")]
    DigitExpectedAfterDot,

    #[error("symbol can't start with a digit")]
    SymbolStartsWithDigit,

    #[error("`load` must be followed by a string literal naming the file to load")]
    LoadMissingPath,

    #[error("`;` expected after `load \"...\"`")]
    LoadMissingSemicolon,

    #[error("cannot open file for `load`: {path}")]
    LoadFileNotFound { path: String },

    #[error("cyclic `load`: {path} is already being loaded")]
    LoadCycle { path: String },
}
