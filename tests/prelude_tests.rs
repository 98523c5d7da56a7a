// ABOUTME: End-to-end tests for the bundled prelude.lspy and fun.lthpy stdlib files

use lithpy::builtins::register_builtins;
use lithpy::config::PRELUDE_PATHS;
use lithpy::env::Environment;
use lithpy::eval::eval;
use lithpy::reader::read_source;
use lithpy::value::Value;
use std::rc::Rc;

/// Builds a fresh global environment with builtins and the real prelude
/// files loaded, mirroring `main.rs::load_prelude` exactly.
fn setup() -> Rc<Environment> {
    let env = Environment::new();
    register_builtins(Rc::clone(&env));
    for path in PRELUDE_PATHS {
        let contents = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("failed to read prelude file {}: {}", path, e));
        let forms = read_source(&contents).expect("prelude parse error");
        for form in forms {
            let result = eval(&env, form);
            if let Value::Error(msg) = result {
                panic!("prelude {} raised: {}", path, msg);
            }
        }
    }
    env
}

fn run(env: &Rc<Environment>, src: &str) -> Value {
    let forms = read_source(src).expect("parse error");
    let mut last = Value::SExpr(Vec::new());
    for form in forms {
        last = eval(env, form);
    }
    last
}

#[test]
fn not_inverts_truthiness() {
    let env = setup();
    assert_eq!(format!("{}", run(&env, "not 0")), "1");
    assert_eq!(format!("{}", run(&env, "not 5")), "0");
}

#[test]
fn otherwise_calls_to_a_truthy_one() {
    let env = setup();
    assert_eq!(format!("{}", run(&env, "(otherwise)")), "1");
    assert_eq!(format!("{}", run(&env, "if (otherwise) {1} {2}")), "1");
}

#[test]
fn first_second_third_pick_elements_by_position() {
    let env = setup();
    assert_eq!(format!("{}", run(&env, "first {1 2 3}")), "1");
    assert_eq!(format!("{}", run(&env, "second {1 2 3}")), "2");
    assert_eq!(format!("{}", run(&env, "third {1 2 3}")), "3");
}

#[test]
fn nth_is_zero_indexed() {
    let env = setup();
    assert_eq!(format!("{}", run(&env, "nth {10 20 30} 0")), "10");
    assert_eq!(format!("{}", run(&env, "nth {10 20 30} 2")), "30");
}

#[test]
fn last_returns_final_element() {
    let env = setup();
    assert_eq!(format!("{}", run(&env, "last {1 2 3}")), "3");
}

#[test]
fn curry_aliases_pack_to_gather_varargs() {
    let env = setup();
    run(&env, "fun {add-all xs} (foldl + 0 xs)");
    assert_eq!(format!("{}", run(&env, "curry add-all 1 2 3")), "6");
}

#[test]
fn uncurry_aliases_unpack_to_spread_a_list() {
    let env = setup();
    assert_eq!(format!("{}", run(&env, "uncurry + {1 2 3}")), "6");
}

#[test]
fn map_applies_function_to_every_element() {
    let env = setup();
    run(&env, "fun {double x} {* x 2}");
    assert_eq!(format!("{}", run(&env, "map double {1 2 3}")), "{2 4 6}");
}

#[test]
fn filter_keeps_only_matching_elements() {
    let env = setup();
    run(&env, "fun {positive x} {> x 0}");
    assert_eq!(format!("{}", run(&env, "filter positive {-1 2 -3 4}")), "{2 4}");
}

#[test]
fn foldl_reduces_left_to_right() {
    let env = setup();
    run(&env, "fun {cat acc x} {join acc (list x)}");
    assert_eq!(format!("{}", run(&env, "foldl cat {} {1 2 3}")), "{1 2 3}");
}

#[test]
fn sum_and_product_fold_over_numbers() {
    let env = setup();
    assert_eq!(format!("{}", run(&env, "sum {1 2 3 4}")), "10");
    assert_eq!(format!("{}", run(&env, "product {1 2 3 4}")), "24");
}

#[test]
fn map_and_filter_compose() {
    let env = setup();
    run(&env, "fun {double x} {* x 2}");
    run(&env, "fun {positive x} {> x 0}");
    let result = run(&env, "map double (filter positive {-2 1 -1 3})");
    assert_eq!(format!("{}", result), "{2 6}");
}
