//! Interactive REPL: no CLI arguments selects this mode (spec.md §6).
//!
//! Each line read from stdin is handed straight to the pipeline as a
//! complete, self-contained program — exactly as
//! `examples/original_source/src/main.cpp`'s `run_repr()` passes the raw
//! line to `eval()` with no wrapping. A line must therefore declare its
//! own `lambda main(){...}` to produce any output; a bare expression
//! statement fails the same way the original's `eval()` does (no
//! top-level `Function`/`TypeDefinition` to run).
//!
//! Each line gets a fresh `Evaluator` (via `run_program`), matching the
//! original: `eval()` constructs a brand-new `Evaluator` — and therefore
//! a brand-new `Storage` — on every call, so lambdas and type
//! definitions declared on one line are not visible on the next. This
//! departs from spec.md §7's claim that "the storage table is not reset
//! automatically between REPL lines"; the original's actual behavior is
//! the ground truth per this project's resolution process, so it is
//! honored here instead (see DESIGN.md's Open Question resolutions).

use std::io::{self, BufRead, Write};

use glint_lex::FsResolver;
use glint_rt::StringSink;

use crate::pipeline::run_program;

pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let resolver = FsResolver;
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = input.read_line(&mut line)?;
        if bytes_read == 0 {
            return Ok(());
        }

        let mut sink = StringSink::new();

        match run_program(&line, None, &resolver, &mut sink) {
            Ok(()) => {
                writeln!(output, "{}", sink.contents())?;
            }
            Err(err) => {
                // The sink's buffer before a failure is discarded, per
                // spec.md §7 ("the REPL clears its buffer between
                // inputs"); only the diagnostic reaches the user.
                sink.clear();
                writeln!(output, "{}", err.render())?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_lines(lines: &str) -> String {
        let mut out = Vec::new();
        run(Cursor::new(lines.as_bytes()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn echoes_one_lines_sink_output_followed_by_newline() {
        assert_eq!(run_lines("lambda main() { print(1 + 1); }\n"), "2\n");
    }

    #[test]
    fn each_line_is_evaluated_independently() {
        assert_eq!(
            run_lines("lambda main() { print(1); }\nlambda main() { print(2); }\n"),
            "1\n2\n"
        );
    }

    #[test]
    fn a_failing_line_prints_a_diagnostic_instead_of_partial_output() {
        let out = run_lines("lambda main() { print(1); x; }\n");
        assert!(out.starts_with("[glint.eval]:"), "got: {out:?}");
    }

    #[test]
    fn a_bare_expression_line_fails_like_the_original_does() {
        let out = run_lines("print(1);\n");
        assert!(out.starts_with("[glint.eval]:"), "got: {out:?}");
    }

    #[test]
    fn a_lambda_declared_on_one_line_is_not_visible_on_the_next() {
        let out = run_lines(
            "lambda helper() { print(1); } lambda main() { helper(); }\nlambda main() { helper(); }\n",
        );
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("1"));
        assert!(lines.next().unwrap().starts_with("[glint.eval]:"));
    }
}
