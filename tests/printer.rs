use symplify::{ast::Node,
               interpreter::{lexer::tokenize, parser::Parser, printer::to_human_readable}};

fn canonical(source: &str) -> Node {
    let mut lexer = tokenize(source).expect("lexing failed");
    let mut parser = Parser::new();
    for name in ["a", "b", "x", "y"] {
        parser.define_variable(name);
    }
    let mut statements = parser.parse(&mut lexer).expect("parsing failed");
    assert_eq!(statements.len(), 1);
    statements.remove(0)
}

fn human(source: &str) -> String {
    to_human_readable(&canonical(source))
}

#[test]
fn implicit_multiplication_is_rendered_where_safe() {
    assert_eq!(human("2x"), "2x");
    assert_eq!(human("2x^3"), "2x^3");
    assert_eq!(human("sin 2x"), "sin(2x)");
}

#[test]
fn precedence_inserts_parentheses() {
    assert_eq!(human("(x+y)^2"), "(x + y)^2");
    assert_eq!(human("2x + 1"), "1 + 2x");
}

#[test]
fn unary_and_postfix_forms() {
    assert_eq!(human("0 - x"), "-x");
    assert_eq!(human("x!"), "x!");
}

#[test]
fn division_renders_inline() {
    assert_eq!(human("0.5 * x"), "x/2");
}

#[test]
fn assignments_render_with_equals() {
    assert_eq!(human("q = 5"), "q = 5");
}
