//! Minimal diagnostic formatting shared by every phase's error type.
//!
//! The full `faxc-util::diagnostic` module this crate descends from builds
//! a fluent `DiagnosticBuilder` with labeled multi-span output; glint's
//! pipeline only ever surfaces one error at a time (spec: "each pass is
//! fail-fast"), so a single free function covers the user-visible contract:
//! `[glint.<kind>]: <detail>`.

use std::fmt;

/// Which pipeline phase raised an error, for the `[glint.<kind>]` prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Lex,
    Parse,
    Sema,
    Eval,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Lex => "lex",
            Phase::Parse => "parse",
            Phase::Sema => "sema",
            Phase::Eval => "eval",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats a phase + message as the diagnostic shape the CLI prints on
/// stderr: `[glint.lex]: unterminated string literal`.
pub fn format_diagnostic(phase: Phase, detail: impl fmt::Display) -> String {
    format!("[glint.{phase}]: {detail}")
}
