use symplify::{get_result,
               interpreter::{evaluator::Evaluator, lexer::tokenize, parser::Parser}};

fn assert_success(src: &str) {
    if let Err(e) = get_result(src, false) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src, false).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

/// Evaluates a whole script and returns the last value any statement
/// produced.
fn eval_last(src: &str) -> f64 {
    let mut lexer = tokenize(src).expect("lexing failed");
    let statements = Parser::new().parse(&mut lexer).expect("parsing failed");

    let mut evaluator = Evaluator::new();
    let mut result = None;
    for statement in &statements {
        if let Some(value) = evaluator.evaluate(statement).expect("evaluation failed") {
            result = Some(value);
        }
    }
    result.expect("script produced no value")
}

fn assert_close(src: &str, expected: f64) {
    let value = eval_last(src);
    assert!((value - expected).abs() < 1e-9,
            "{src:?} evaluated to {value}, expected {expected}");
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_close("x = 1 + 2\nx * 4", 12.0);
    assert_close("x = 7 * 9\nx - 3", 60.0);
    assert_close("x = 10 / 4\nx", 2.5);
    assert_close("2 + 3 * 4", 14.0);
}

#[test]
fn assignment_yields_its_value() {
    assert_close("q = 4", 4.0);
}

#[test]
fn simplified_trees_evaluate_to_the_plain_arithmetic_value() {
    assert_close("(2 + 3) * 4 - 6 / 2", 17.0);
    assert_close("2 ^ 3 ^ 2", 512.0);
    assert_close("-3 ^ 2", -9.0);
}

#[test]
fn implicit_multiplication_evaluates() {
    assert_close("x = 3\n2x + 1", 7.0);
    assert_close("x = 2\n3(x + 1)", 9.0);
}

#[test]
fn builtin_functions() {
    assert_close("sin(0)", 0.0);
    assert_close("cos(0)", 1.0);
    assert_close("sqrt(9)", 3.0);
    assert_close("abs(0 - 5)", 5.0);
    assert_close("log(1000)", 3.0);
    assert_close("ln(e)", 1.0);
    assert_close("atan2(1, 1)", std::f64::consts::FRAC_PI_4);
}

#[test]
fn predefined_constants() {
    assert_close("2pi", std::f64::consts::TAU);
    assert_close("sin(pi)", 0.0);
}

#[test]
fn factorials() {
    assert_close("5!", 120.0);
    assert_close("-4!", -24.0);
    assert_close("x = 3\nx!", 6.0);
}

#[test]
fn user_defined_functions() {
    assert_close("square(x) = x * x\nsquare(3)", 9.0);
    assert_close("add(a, b) = a + b\nadd(2, 5)", 7.0);
    assert_close("f(x, y) = x * y\nf(2, 3) + f(1, 4)", 10.0);
}

#[test]
fn function_parameters_shadow_nothing() {
    // The parameter x and the global x are distinct.
    assert_close("x = 10\nf(x) = x + 1\nf(1) + x", 12.0);
}

#[test]
fn derivatives_evaluate() {
    assert_close("x = 3\nd/dx(x^2)", 6.0);
    assert_close("x = 2\nd/dx(sin(x))", (2.0f64).cos());
}

#[test]
fn statements_share_one_environment() {
    assert_close("a = 2\nb = a + 1\na * b", 6.0);
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    assert_failure("x = 0\n1 / x");
    assert_failure("1 / 0");
}

#[test]
fn unknown_variable_is_an_error() {
    assert_failure("foo + 1");
    assert_failure("y = x + z");
}

#[test]
fn redefinition_of_builtin_function_is_an_error() {
    assert_failure("sin(x) = x");
}

#[test]
fn wrong_function_arity_is_an_error() {
    assert_failure("f(x, y) = x + y\nf(3)");
    assert_failure("f(x, y) = x + y\nf(1, 2, 3)");
}

#[test]
fn lexical_errors_fail_the_whole_script() {
    assert_failure("1 + 1\nx # y");
}

#[test]
fn trailing_garbage_fails_the_whole_script() {
    assert_failure("1 + 1 1");
}

#[test]
fn scripts_succeed_end_to_end() {
    assert_success("a = 10 + 5\n2 * a");
    assert_success("f(x, y) = x*y\nf(2, 3)");
    assert_success("r = (1 +\n     2 +\n     3)\nr * r");
}
