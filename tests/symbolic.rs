use symplify::{ast::Node,
               interpreter::{lexer::tokenize, parser::Parser, printer::to_lisp,
                             symbolic::{SymbolicEvaluator, differentiate}}};

fn parse_all(source: &str) -> Vec<Node> {
    let mut lexer = tokenize(source).expect("lexing failed");
    let mut parser = Parser::new();
    for name in ["x", "y", "z"] {
        parser.define_variable(name);
    }
    parser.parse(&mut lexer).expect("parsing failed")
}

fn parse_one(source: &str) -> Node {
    let mut statements = parse_all(source);
    assert_eq!(statements.len(), 1);
    statements.remove(0)
}

fn derivative(source: &str, var: &str) -> String {
    to_lisp(&differentiate(&parse_one(source), var))
}

#[test]
fn constants_and_unrelated_variables_differentiate_to_zero() {
    assert_eq!(derivative("5", "x"), "0");
    assert_eq!(derivative("y", "x"), "0");
    assert_eq!(derivative("x", "x"), "1");
}

#[test]
fn power_rule() {
    assert_eq!(derivative("x^2", "x"), "(* 2 x)");
    assert_eq!(derivative("x^3", "x"), "(* 3 (^ x 2))");
}

#[test]
fn sum_and_product_rules() {
    assert_eq!(derivative("x + y", "x"), "1");
    assert_eq!(derivative("x * y", "x"), "y");
}

#[test]
fn quotient_rule() {
    assert_eq!(derivative("x / y", "x"), "(/ 1 y)");
}

#[test]
fn chain_rule_through_builtins() {
    assert_eq!(derivative("sin(x)", "x"), "(cos x)");
    assert_eq!(derivative("ln(x)", "x"), "(/ 1 x)");
}

#[test]
fn cosine_derivative_is_negated() {
    assert_eq!(derivative("cos(x)", "x"), "(- (sin x))");
}

#[test]
fn unknown_function_differentiates_to_zero() {
    let statements = parse_all("f(p) = p * p\nf(x)");
    assert_eq!(to_lisp(&differentiate(&statements[1], "x")), "0");
}

#[test]
fn expansion_inlines_user_functions() {
    let statements = parse_all("square(p) = p^2\nsquare(3)");
    let mut symbolic = SymbolicEvaluator::new();
    symbolic.register_function(&statements[0]);
    assert_eq!(to_lisp(&symbolic.expand(&statements[1])), "9");
}

#[test]
fn expansion_substitutes_symbolic_arguments() {
    let statements = parse_all("square(p) = p^2\nsquare(y + 1)");
    let mut symbolic = SymbolicEvaluator::new();
    symbolic.register_function(&statements[0]);
    assert_eq!(to_lisp(&symbolic.expand(&statements[1])), "(^ (+ 1 y) 2)");
}

#[test]
fn expansion_substitutes_registered_variables() {
    let mut symbolic = SymbolicEvaluator::new();
    symbolic.register_variable("x", 2.0);
    assert_eq!(to_lisp(&symbolic.expand(&parse_one("x + y"))), "(+ 2 y)");
    assert_eq!(to_lisp(&symbolic.expand(&parse_one("x * 4"))), "8");
}

#[test]
fn expansion_carries_out_derivative_forms() {
    let symbolic = SymbolicEvaluator::new();
    assert_eq!(to_lisp(&symbolic.expand(&parse_one("d/dx(x^3)"))), "(* 3 (^ x 2))");
}
