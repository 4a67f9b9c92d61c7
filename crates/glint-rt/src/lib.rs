//! Evaluates an analyzed, optimized program: storage, the fixed built-in
//! library, numeric dispatch, and the tree-walking evaluator itself.
//!
//! This crate only ever runs on a program that has already passed
//! `glint_sem::analyze` — it has no opinion on well-formedness and will
//! happily panic on a shape sema should have rejected (an unassignable
//! assignment target, for instance). `glint-drv` is the crate that wires
//! the phases together in that order.

mod builtins;
mod error;
mod evaluator;
mod numeric;
mod sink;
mod storage;
mod value;

pub use error::RuntimeError;
pub use evaluator::Evaluator;
pub use sink::{Sink, StringSink};
pub use storage::Storage;
pub use value::EvalValue;

#[cfg(test)]
mod tests {
    use super::*;
    use glint_par::parse;
    use glint_sem::analyze;

    fn run(source: &str) -> Result<String, RuntimeError> {
        let tokens = glint_lex::tokenize(source).expect("lex");
        let items = parse(tokens).expect("parse");
        analyze(&items).expect("sema");
        glint_opt::optimize(&items);
        let mut sink = StringSink::new();
        let mut ev = Evaluator::new();
        ev.run(&items, &mut sink)?;
        Ok(sink.contents().to_string())
    }

    #[test]
    fn prints_an_integer_sum() {
        assert_eq!(run("lambda main() { print(1 + 1); }").unwrap(), "2");
    }

    #[test]
    fn prints_a_mixed_int_float_sum() {
        assert_eq!(run("lambda main() { print(1 + 1.5); }").unwrap(), "2.5");
    }

    #[test]
    fn for_loop_prints_each_iteration() {
        assert_eq!(
            run("lambda main() { for (i = 0; i < 3; ++i) { print(i); } }").unwrap(),
            "012"
        );
    }

    #[test]
    fn if_else_takes_the_true_branch() {
        assert_eq!(
            run(r#"lambda main() { x = 0; if (x == 0) { print("E"); } else { print("D"); } }"#)
                .unwrap(),
            "E"
        );
    }

    #[test]
    fn array_set_then_array_get_round_trips() {
        assert_eq!(
            run("lambda main() { a = [1, 2, 3]; array-set(a, 0, 9); print(array-get(a, 0)); }")
                .unwrap(),
            "9"
        );
    }

    #[test]
    fn modulo_on_integers() {
        assert_eq!(run("lambda main() { print(123 % 7); }").unwrap(), "4");
    }

    #[test]
    fn calling_a_user_defined_lambda() {
        assert_eq!(
            run("lambda f(x) { x; } lambda main() { print(f(7)); }").unwrap(),
            "7"
        );
    }

    #[test]
    fn array_index_out_of_range_is_a_runtime_error() {
        let err = run("lambda main() { a = [1, 2, 3]; array-get(a, 99); }").unwrap_err();
        assert!(matches!(err, RuntimeError::IndexOutOfRange { index: 99, len: 3 }));
    }

    #[test]
    fn referencing_an_undefined_variable_is_a_runtime_error() {
        let err = run("lambda main() { x; }").unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
    }

    #[test]
    fn calling_a_lambda_with_the_wrong_arity_is_a_runtime_error() {
        let err = run("lambda f(x) { x; } lambda main() { f(1, 2); }").unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::ArityMismatch { expected: 1, found: 2, .. }
        ));
    }

    #[test]
    fn a_non_lambda_non_type_top_level_item_is_a_runtime_error() {
        let err = run("print(1); lambda main() { print(2); }").unwrap_err();
        assert!(matches!(err, RuntimeError::NotAGlobalObject { .. }));
    }

    #[test]
    fn scope_hiding_holds_across_a_lambda_call() {
        assert_eq!(
            run("lambda f() { x = 9; print(x); } lambda main() { x = 1; f(); print(x); }")
                .unwrap(),
            "91"
        );
    }

    #[test]
    fn type_instance_field_access_and_assignment() {
        assert_eq!(
            run(concat!(
                "define-type Point(x, y);",
                "lambda main() { p = new Point(1, 2); p.x = 5; print(p.x); print(p.y); }",
            ))
            .unwrap(),
            "52"
        );
    }
}
