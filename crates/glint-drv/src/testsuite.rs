//! The `test` CLI mode: a fixed table of source-snippet → expected-sink
//! scenarios and error scenarios, drawn straight from spec.md §8's
//! end-to-end and error scenario tables. This is the "built-in test
//! suite" spec.md §6 names as the second CLI surface — deliberately
//! distinct from the crate's own `#[cfg(test)]` unit tests, which a
//! developer runs with `cargo test` rather than `glint test`.

use glint_lex::FsResolver;
use glint_rt::StringSink;

use crate::pipeline::run_program;

struct Scenario {
    name: &'static str,
    source: &'static str,
    expect: Expectation,
}

enum Expectation {
    Sink(&'static str),
    Fails,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "integer addition",
        source: "lambda main(){ print(1+1); }",
        expect: Expectation::Sink("2"),
    },
    Scenario {
        name: "mixed int/float addition",
        source: "lambda main(){ print(1+1.5); }",
        expect: Expectation::Sink("2.5"),
    },
    Scenario {
        name: "for loop over three iterations",
        source: "lambda main(){ for(i=0;i<3;++i){ print(i); } }",
        expect: Expectation::Sink("012"),
    },
    Scenario {
        name: "if/else takes the true branch",
        source: r#"lambda main(){ var=0; if(var==0){print("E");}else{print("D");} }"#,
        expect: Expectation::Sink("E"),
    },
    Scenario {
        name: "array-set then array-get round trips",
        source: "lambda main(){ a=[1,2,3]; array-set(a,0,9); print(array-get(a,0)); }",
        expect: Expectation::Sink("9"),
    },
    Scenario {
        name: "integer modulo",
        source: "lambda main(){ print(123%7); }",
        expect: Expectation::Sink("4"),
    },
    Scenario {
        name: "calling a user-defined lambda",
        source: "lambda f(x){ x; } lambda main(){ print(f(7)); }",
        expect: Expectation::Sink("7"),
    },
    Scenario {
        name: "assigning to a literal is a semantic error",
        source: "lambda main(){ 1 = 2; }",
        expect: Expectation::Fails,
    },
    Scenario {
        name: "array-get past the end is a runtime error",
        source: "lambda main(){ a=[1,2,3]; array-get(a, 99); }",
        expect: Expectation::Fails,
    },
    Scenario {
        name: "referencing an undefined variable is a runtime error",
        source: "lambda main(){ x; }",
        expect: Expectation::Fails,
    },
    Scenario {
        name: "a block-valued while condition is a semantic error",
        source: "while (if(1){}else{}) {}",
        expect: Expectation::Fails,
    },
];

/// Runs every scenario, printing one PASS/FAIL line per case plus a
/// summary. Returns whether every scenario behaved as documented.
pub fn run() -> bool {
    let resolver = FsResolver;
    let mut passed = 0;
    let mut failed = 0;

    for scenario in SCENARIOS {
        let mut sink = StringSink::new();
        let result = run_program(scenario.source, None, &resolver, &mut sink);

        let ok = match (&scenario.expect, &result) {
            (Expectation::Sink(expected), Ok(())) => sink.contents() == *expected,
            (Expectation::Fails, Err(_)) => true,
            _ => false,
        };

        if ok {
            passed += 1;
            println!("ok   - {}", scenario.name);
        } else {
            failed += 1;
            match &result {
                Ok(()) => println!(
                    "FAIL - {}: expected {:?}, sink held {:?}",
                    scenario.name,
                    describe(&scenario.expect),
                    sink.contents()
                ),
                Err(e) => println!(
                    "FAIL - {}: expected {:?}, got error {}",
                    scenario.name,
                    describe(&scenario.expect),
                    e.render()
                ),
            }
        }
    }

    println!("{passed} passed, {failed} failed");
    failed == 0
}

fn describe(expect: &Expectation) -> String {
    match expect {
        Expectation::Sink(s) => format!("sink {s:?}"),
        Expectation::Fails => "an error".to_string(),
    }
}
