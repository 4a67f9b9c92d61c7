//! Driver configuration, resolved once from CLI flags and positional
//! arguments. Modeled on `faxc_drv::Config` / `faxt::config::Config`:
//! a small, plain struct the rest of the crate reads rather than
//! threading individual flags through every function.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub verbose: bool,
}

/// The three CLI surfaces spec.md §6 names: an interactive REPL, the
/// built-in test suite, or evaluating a single file.
#[derive(Debug, Clone)]
pub enum Mode {
    Repl,
    Test,
    File(PathBuf),
}

impl Config {
    pub fn from_target(target: Option<String>, verbose: bool) -> Self {
        let mode = match target.as_deref() {
            None => Mode::Repl,
            Some("test") => Mode::Test,
            Some(path) => Mode::File(PathBuf::from(path)),
        };
        Config { mode, verbose }
    }
}
