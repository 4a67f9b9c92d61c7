//! Wires the five phase crates together in the order spec.md §2's data
//! flow table lists them: lex → parse → sema → optimize → eval. Every
//! entry point in this module ends at this same pipeline; the REPL, the
//! file mode, and the test suite differ only in where the source text
//! and the `load` resolver come from.

use glint_lex::{lex_program, SourceResolver};
use glint_rt::{Evaluator, Sink};

use crate::error::DriverError;

/// Runs one program end to end, writing its output to `sink`.
///
/// `entry_key` seeds `load` cycle detection with the running file's own
/// canonical path; the REPL and the test suite pass `None` since their
/// source has no on-disk identity of its own.
pub fn run_program(
    source: &str,
    entry_key: Option<&str>,
    resolver: &dyn SourceResolver,
    sink: &mut dyn Sink,
) -> Result<(), DriverError> {
    let tokens = {
        let _span = tracing::debug_span!("lex").entered();
        lex_program(source, entry_key, resolver)?
    };
    tracing::trace!(count = tokens.len(), "tokenized");

    let items = {
        let _span = tracing::debug_span!("parse").entered();
        glint_par::parse(tokens)?
    };
    tracing::trace!(count = items.len(), "parsed top-level items");

    {
        let _span = tracing::debug_span!("sema").entered();
        glint_sem::analyze(&items)?;
    }

    {
        let _span = tracing::debug_span!("optimize").entered();
        glint_opt::optimize(&items);
    }

    {
        let _span = tracing::debug_span!("eval").entered();
        let mut evaluator = Evaluator::new();
        evaluator.run(&items, sink)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_lex::FsResolver;
    use glint_rt::StringSink;

    #[test]
    fn runs_a_well_formed_program_to_its_printed_output() {
        let mut sink = StringSink::new();
        run_program(
            "lambda main() { print(1 + 1); }",
            None,
            &FsResolver,
            &mut sink,
        )
        .unwrap();
        assert_eq!(sink.contents(), "2");
    }

    #[test]
    fn a_lexical_error_surfaces_as_driver_error_lex() {
        let mut sink = StringSink::new();
        let err = run_program("1@", None, &FsResolver, &mut sink).unwrap_err();
        assert!(matches!(err, DriverError::Lex(_)));
    }

    #[test]
    fn a_semantic_error_surfaces_as_driver_error_sema() {
        let mut sink = StringSink::new();
        let err = run_program("lambda main() { 1 = 2; }", None, &FsResolver, &mut sink)
            .unwrap_err();
        assert!(matches!(err, DriverError::Sema(_)));
    }

    #[test]
    fn an_undefined_variable_surfaces_as_driver_error_runtime() {
        let mut sink = StringSink::new();
        let err = run_program("lambda main() { x; }", None, &FsResolver, &mut sink).unwrap_err();
        assert!(matches!(err, DriverError::Runtime(_)));
    }
}
