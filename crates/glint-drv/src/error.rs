//! Aggregates every phase's error enum into one `DriverError`, mirroring
//! `faxt::error::FaxtError`'s role of giving `main` a single `Result` to
//! return regardless of which phase actually failed.

use glint_lex::LexError;
use glint_par::ParseError;
use glint_rt::RuntimeError;
use glint_sem::SemaError;
use glint_util::Phase;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Sema(#[from] SemaError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("could not read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DriverError {
    /// Which phase raised this, for the `[glint.<kind>]` diagnostic
    /// prefix spec.md §7 mandates.
    pub fn phase(&self) -> Phase {
        match self {
            DriverError::Lex(_) => Phase::Lex,
            DriverError::Parse(_) => Phase::Parse,
            DriverError::Sema(_) => Phase::Sema,
            DriverError::Runtime(_) => Phase::Eval,
            // A file the driver itself couldn't open never reached the
            // lexer; `lex` is the closest phase label spec.md offers.
            DriverError::Io { .. } => Phase::Lex,
        }
    }

    pub fn render(&self) -> String {
        glint_util::format_diagnostic(self.phase(), self)
    }
}
