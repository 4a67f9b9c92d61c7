//! `glint-drv` — the CLI driver: argument parsing, logging setup, and
//! dispatch to one of the three modes spec.md §6 describes (REPL, file,
//! `test`). Every other crate in the workspace is a library with no
//! opinion on process-level concerns; this is the one that owns `main`.

mod config;
mod error;
mod pipeline;
mod repl;
mod testsuite;

use std::io::Write;
use std::path::Path;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use config::{Config, Mode};
pub use error::DriverError;
pub use pipeline::run_program;

/// `glint [--verbose] [test|<path>]`
///
/// Omitting the positional argument starts the REPL; `test` runs the
/// built-in scenario suite; anything else is read as a source file path.
#[derive(Parser, Debug)]
#[command(name = "glint", version, about = "A small C-like scripting interpreter")]
struct Cli {
    /// `test` to run the built-in test suite, or a path to a `.glint` file.
    /// Omit to start the interactive REPL.
    target: Option<String>,

    /// Emit `glint=debug` tracing spans at each pipeline phase boundary.
    #[arg(short, long, global = true, env = "GLINT_VERBOSE")]
    verbose: bool,
}

/// Entry point called by `src/main.rs`. Mirrors `faxt::main`'s shape:
/// parse flags, init logging, build a `Config`, dispatch.
pub fn main() -> Result<(), DriverError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_target(cli.target, cli.verbose);
    run(&config)
}

fn run(config: &Config) -> Result<(), DriverError> {
    match &config.mode {
        Mode::Repl => {
            let stdin = std::io::stdin();
            repl::run(stdin.lock(), std::io::stdout().lock())
                .map_err(|e| DriverError::Io { path: "<stdin>".to_string(), source: e })
        }
        Mode::Test => {
            let all_passed = testsuite::run();
            if all_passed {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
        Mode::File(path) => run_file(path),
    }
}

fn run_file(path: &Path) -> Result<(), DriverError> {
    let source = std::fs::read_to_string(path).map_err(|e| DriverError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let entry_key = std::fs::canonicalize(path)
        .map(|p| p.to_string_lossy().into_owned())
        .ok();

    let resolver = glint_lex::FsResolver;
    let mut sink = glint_rt::StringSink::new();
    run_program(&source, entry_key.as_deref(), &resolver, &mut sink)?;

    let mut stdout = std::io::stdout();
    write!(stdout, "{}", sink.contents()).ok();
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("glint=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glint=warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_with_no_target_selects_the_repl() {
        let cli = Cli::parse_from(["glint"]);
        assert!(cli.target.is_none());
    }

    #[test]
    fn cli_with_test_selects_the_test_suite() {
        let cli = Cli::parse_from(["glint", "test"]);
        assert_eq!(cli.target.as_deref(), Some("test"));
    }

    #[test]
    fn cli_with_a_path_selects_file_mode() {
        let cli = Cli::parse_from(["glint", "prog.glint"]);
        assert_eq!(cli.target.as_deref(), Some("prog.glint"));
    }

    #[test]
    fn verbose_flag_is_recognized() {
        let cli = Cli::parse_from(["glint", "--verbose", "prog.glint"]);
        assert!(cli.verbose);
    }
}
