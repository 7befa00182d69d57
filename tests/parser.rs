use symplify::{ast::Node,
               interpreter::{lexer::tokenize, parser::Parser, printer::to_lisp}};

/// Parses a program with a handful of variables predefined, so bare
/// expressions over `a`..`z` pass the definedness check.
fn parse_with_vars(source: &str) -> Result<Vec<Node>, String> {
    let mut lexer = tokenize(source).map_err(|e| e.to_string())?;
    let mut parser = Parser::new();
    for name in ["a", "b", "c", "t", "x", "y", "z"] {
        parser.define_variable(name);
    }
    parser.parse(&mut lexer).map_err(|e| e.to_string())
}

/// Parses a single statement and renders it in Lisp form.
fn lisp(source: &str) -> String {
    let statements = parse_with_vars(source).expect("expected a successful parse");
    assert_eq!(statements.len(), 1, "expected exactly one statement for {source:?}");
    to_lisp(&statements[0])
}

fn parse_error(source: &str) -> String {
    match parse_with_vars(source) {
        Ok(_) => panic!("expected a parse error for {source:?}"),
        Err(message) => message,
    }
}

#[test]
fn number_literal_only() {
    assert_eq!(lisp("42"), "42");
    assert_eq!(lisp("2.3123"), "2.3123");
    assert_eq!(lisp("6.02e23"), "6.02e23");
}

#[test]
fn variable_only() {
    assert_eq!(lisp("x"), "x");
}

#[test]
fn constant_arithmetic_folds() {
    assert_eq!(lisp("2 + 3"), "5");
    assert_eq!(lisp("2 + 3 * 4"), "14");
    assert_eq!(lisp("(2 + 3) * 4"), "20");
    assert_eq!(lisp("10 / 2"), "5");
    assert_eq!(lisp("1 + 10 / 2"), "6");
    assert_eq!(lisp("8 / 4 * 2"), "4");
    assert_eq!(lisp("3 * - 4"), "-12");
    assert_eq!(lisp("10 + +5"), "15");
    assert_eq!(lisp("+ 2"), "2");
    assert_eq!(lisp("-5"), "-5");
    assert_eq!(lisp("5!"), "120");
}

#[test]
fn right_associative_power() {
    assert_eq!(lisp("a ^ b ^ c"), "(^ a (^ b c))");
}

#[test]
fn postfix_factorial() {
    assert_eq!(lisp("x!"), "(! x)");
    assert_eq!(lisp("x!!"), "(! (! x))");
}

#[test]
fn function_in_prefix_form() {
    assert_eq!(lisp("sin x"), "(sin x)");
    assert_eq!(lisp("cos sin x"), "(cos (sin x))");
    assert_eq!(lisp("sin x + y"), "(+ (sin x) y)");
    assert_eq!(lisp("sin x!"), "(sin (! x))");
    assert_eq!(lisp("sin - a"), "(sin (- a))");
}

#[test]
fn prefix_function_binding_power() {
    // The paren-less argument keeps tight operators, releases loose ones.
    assert_eq!(lisp("sin a^3*2"), "(sin (* 2 (^ a 3)))");
    assert_eq!(lisp("sin (a^3)*2"), "(* 2 (sin (^ a 3)))");
    assert_eq!(lisp("x^sin b"), "(^ x (sin b))");
}

#[test]
fn implicit_multiplication_sites() {
    assert_eq!(lisp("2x"), "(* 2 x)");
    assert_eq!(lisp("2sin x"), "(* 2 (sin x))");
    assert_eq!(lisp("2x^3"), "(* 2 (^ x 3))");
    assert_eq!(lisp("2(x + y)"), "(* 2 (+ x y))");
    assert_eq!(lisp("(x)2"), "(* 2 x)");
    assert_eq!(lisp("(x+y)z"), "(* (+ x y) z)");
    assert_eq!(lisp("sin 2x"), "(sin (* 2 x))");
}

#[test]
fn implicit_multiplication_reorders_canonically() {
    // Product normalization groups factors by canonical key, so parse
    // order is not preserved.
    assert_eq!(lisp("x(y+z)"), "(* (+ y z) x)");
    assert_eq!(lisp("(z ^ t)(x + y)"), "(* (+ x y) (^ z t))");
    assert_eq!(lisp("(x^2)sin x"), "(* (^ x 2) (sin x))");
    assert_eq!(lisp("a * -b"), "(* (- b) a)");
}

#[test]
fn implicit_multiplication_after_postfix() {
    assert_eq!(lisp("2(x+y)!"), "(* 2 (! (+ x y)))");
    assert_eq!(lisp("(x)!y"), "(* (! x) y)");
    assert_eq!(lisp("(x^2)!!x"), "(* (! (! (^ x 2))) x)");
    assert_eq!(lisp("(x+y)!(a-b)"), "(* (! (+ x y)) (- a b))");
    assert_eq!(lisp("2x(a+b)!"), "(* (* 2 (! (+ a b))) x)");
}

#[test]
fn injected_operator_survives_binding_power_break() {
    // The exponent only captures the 2; the synthesized '*' is left in the
    // stream for the outer loop.
    assert_eq!(lisp("a^2x"), "(* (^ a 2) x)");
}

#[test]
fn redundant_parentheses_collapse() {
    assert_eq!(lisp("(((x)))"), "x");
}

#[test]
fn parenthesized_power_rewrites() {
    assert_eq!(lisp("(2x)^3"), "(* 8 (^ x 3))");
    assert_eq!(lisp("(a ^ b) ^ c"), "(^ a (* b c))");
    assert_eq!(lisp("x^(y + 1)"), "(^ x (+ 1 y))");
}

#[test]
fn unary_minus_binding() {
    assert_eq!(lisp("-a + b"), "(+ (- a) b)");
    assert_eq!(lisp("-x^2"), "(- (^ x 2))");
    assert_eq!(lisp("(-x)^2"), "(^ (- x) 2)");
    assert_eq!(lisp("-x!"), "(- (! x))");
    assert_eq!(lisp("-sin(x)"), "(- (sin x))");
    assert_eq!(lisp("-+-x"), "x");
    assert_eq!(lisp("a - -b"), "(+ a b)");
}

#[test]
fn postfix_on_groups_and_calls() {
    assert_eq!(lisp("(x + 1)!"), "(! (+ 1 x))");
    assert_eq!(lisp("(x!)^2"), "(^ (! x) 2)");
    assert_eq!(lisp("sin (2x)!"), "(! (sin (* 2 x)))");
    assert_eq!(lisp("sin(x)!"), "(! (sin x))");
    assert_eq!(lisp("sin((2x)!)"), "(sin (! (* 2 x)))");
    assert_eq!(lisp("cos (sin (x + 1)!)"), "(cos (! (sin (+ 1 x))))");
}

#[test]
fn deeply_nested_mixed_operators() {
    assert_eq!(lisp("((a*2)! + -b)^-c"), "(^ (- (! (* 2 a)) b) (- c))");
}

#[test]
fn function_calls_with_parentheses() {
    assert_eq!(lisp("sin (x + y)"), "(sin (+ x y))");
    assert_eq!(lisp("sin(-x)"), "(sin (- x))");
    assert_eq!(lisp("1 + sin(x)"), "(+ 1 (sin x))");
    assert_eq!(lisp("atan2(x, y)"), "(atan2 x y)");
    assert_eq!(lisp("atan2(0, 1)"), "0");
}

#[test]
fn user_defined_functions() {
    let statements = parse_with_vars("f(p, q) = p * q\nf(2, 3)").unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(to_lisp(&statements[0]), "(f (* p q))");
    assert_eq!(to_lisp(&statements[1]), "(f 2 3)");
}

#[test]
fn nested_multi_argument_call_commas() {
    // The comma of the inner call must not split the outer argument list.
    let statements = parse_with_vars("g(p, q) = p + q\ng(g(1, 2), 3)").unwrap();
    assert_eq!(to_lisp(&statements[0]), "(g (+ p q))");
    assert_eq!(to_lisp(&statements[1]), "(g (g 1 2) 3)");
}

#[test]
fn derivative_forms() {
    assert_eq!(lisp("d/dx(x^2)"), "(d/dx (^ x 2))");
    assert_eq!(lisp("d/dx(x)y"), "(* (d/dx x) y)");
}

#[test]
fn empty_program() {
    assert!(parse_with_vars("").unwrap().is_empty());
    assert!(parse_with_vars("\n\n").unwrap().is_empty());
}

#[test]
fn multiple_statements_with_assignment() {
    let statements = parse_with_vars("q = 10 + 5\n2 * q").unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(to_lisp(&statements[0]), "(= q 15)");
    assert_eq!(to_lisp(&statements[1]), "(* 2 q)");
}

#[test]
fn blank_lines_between_statements() {
    let statements = parse_with_vars("q = 1\n\nr = 2").unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(to_lisp(&statements[0]), "(= q 1)");
    assert_eq!(to_lisp(&statements[1]), "(= r 2)");
}

#[test]
fn multiline_inside_parentheses() {
    assert_eq!(lisp("k = (100 +\n     200 +\n     300)"), "(= k 600)");
    assert_eq!(lisp("k = (1 +\n     (2 * 3)\n    )"), "(= k 7)");
    assert_eq!(lisp("sin(\n  x + y\n)"), "(sin (+ x y))");
}

#[test]
fn error_empty_parentheses() {
    assert_eq!(parse_error("()"),
               "Parse Error: An expression was expected inside parentheses, but none was found.\n\
                --> at line 1:\n    \
                ()\n    \
                ^-- Expected an expression after this parenthesis");
}

#[test]
fn error_mismatched_parentheses() {
    assert_eq!(parse_error("(2 + 3"),
               "Parse Error: Missing closing ')' for parenthesis that started on line 1.\n\
                --> at line 1:\n    \
                (2 + 3\n    \
                ^-- This parenthesis was never closed.\n\n\
                Instead, the input ended before the parenthesis was closed.");
}

#[test]
fn error_operator_missing_rhs_inside_parens() {
    assert_eq!(parse_error("(2 + )"),
               "Parse Error: Infix operator '+' is missing a right-hand side expression.\n\
                --> at line 1:\n    \
                (2 + )\n       \
                ^-- An expression was expected to follow this operator");
}

#[test]
fn error_prefix_function_at_end_of_input() {
    assert_eq!(parse_error("2sin x * 5cos"),
               "Parse Error: Expected an argument for function 'cos' but reached the end of the \
                input.\n\
                --> at line 1:\n    \
                2sin x * 5cos\n              \
                ^-- Here");
}

#[test]
fn error_prefix_function_with_bad_argument() {
    assert_eq!(parse_error("2x^3! ^ sin !"),
               "Parse Error: Expected an argument for function 'sin', but found '!' instead.\n\
                --> at line 1:\n    \
                2x^3! ^ sin !\n                \
                ^-- Here");
}

#[test]
fn error_double_infix_operator() {
    assert_eq!(parse_error("1 + * 2"),
               "Parse Error: Infix operator '+' is missing a right-hand side expression.\n\
                --> at line 1:\n    \
                1 + * 2\n      \
                ^-- An expression was expected to follow this operator");
}

#[test]
fn error_trailing_binary_operator() {
    assert_eq!(parse_error("1 + 2 *"),
               "Parse Error: Infix operator '*' is missing a right-hand side expression.\n\
                --> at line 1:\n    \
                1 + 2 *\n          \
                ^-- An expression was expected to follow this operator");
}

#[test]
fn error_trailing_unary_minus() {
    assert_eq!(parse_error("a - "),
               "Parse Error: Infix operator '-' is missing a right-hand side expression.\n\
                --> at line 1:\n    \
                a - \n      \
                ^-- An expression was expected to follow this operator");
}

#[test]
fn error_closing_paren_without_opening() {
    assert_eq!(parse_error("1 + 2)"),
               "Parse Error: Unexpected token ')'\n\
                --> at line 1:\n    \
                1 + 2)\n         \
                ^-- This should not be here");
}

#[test]
fn error_unexpected_closing_paren_deep() {
    assert_eq!(parse_error("(a + (b * c)))"),
               "Parse Error: Unexpected token ')'\n\
                --> at line 1:\n    \
                (a + (b * c)))\n                 \
                ^-- This should not be here");
}

#[test]
fn error_missing_operator_between_atoms() {
    assert_eq!(parse_error("3 4"),
               "Parse Error: Missing operator between '3' and '4'.\n\
                --> at line 1:\n    \
                3 4\n      \
                ^-- An operator was expected here.");
    assert_eq!(parse_error("x sin(y)"),
               "Parse Error: Missing operator between 'x' and 'sin'.\n\
                --> at line 1:\n    \
                x sin(y)\n      \
                ^-- An operator was expected here.");
    assert!(parse_error("x y").contains("Missing operator between 'x' and 'y'"));
}

#[test]
fn error_function_with_empty_parens() {
    assert_eq!(parse_error("sin()"),
               "Parse Error: An expression was expected inside parentheses, but none was found.\n\
                --> at line 1:\n    \
                sin()\n       \
                ^-- Expected an expression after this parenthesis");
}

#[test]
fn error_dangling_open_paren_deep_nest() {
    assert_eq!(parse_error("(a + (b * c)"),
               "Parse Error: Missing closing ')' for parenthesis that started on line 1.\n\
                --> at line 1:\n    \
                (a + (b * c)\n    \
                ^-- This parenthesis was never closed.\n\n\
                Instead, the input ended before the parenthesis was closed.");
}

#[test]
fn error_unclosed_paren_before_newline() {
    assert_eq!(parse_error("(a +\n b"),
               "Parse Error: Missing closing ')' for parenthesis that started on line 1.\n\
                --> at line 1:\n    \
                (a +\n    \
                ^-- This parenthesis was never closed.\n\n\
                Instead, the input ended before the parenthesis was closed.");
}

#[test]
fn error_operator_abuse() {
    assert_eq!(parse_error("a + - * b"),
               "Parse Error: Invalid start of an expression. Cannot begin with token '*'.\n\
                --> at line 1:\n    \
                a + - * b\n          \
                ^-- An expression cannot start here");
    assert_eq!(parse_error("(* a)"),
               "Parse Error: Invalid start of an expression. Cannot begin with token '*'.\n\
                --> at line 1:\n    \
                (* a)\n     \
                ^-- An expression cannot start here");
    assert!(parse_error("* 5").contains("Unexpected token '*'"));
}

#[test]
fn error_postfix_at_start() {
    assert_eq!(parse_error("!a"),
               "Parse Error: Unexpected token '!'\n\
                --> at line 1:\n    \
                !a\n    \
                ^-- This should not be here");
}

#[test]
fn error_prefix_function_without_argument() {
    assert_eq!(parse_error("a + cos"),
               "Parse Error: Expected an argument for function 'cos' but reached the end of the \
                input.\n\
                --> at line 1:\n    \
                a + cos\n        \
                ^-- Here");
}

#[test]
fn error_lexical_character() {
    assert_eq!(parse_error("x @ y"),
               "Lexer Error: Unexpected character \"@\" at line 1, column 2.\n    \
                x @ y\n      \
                ^-- This should not be here.");
}

#[test]
fn error_number_with_two_decimal_points() {
    assert_eq!(parse_error("3.14.15"),
               "Lexer Error: Unexpected character \".\" at line 1, column 4.\n    \
                3.14.15\n        \
                ^-- This should not be here.");
}

#[test]
fn error_assignment_missing_rhs() {
    assert_eq!(parse_error("x = "),
               "Parse Error: Assignment operator '=' is missing a right-hand side expression.\n\
                --> at line 1:\n    \
                x = \n      \
                ^-- An expression was expected to follow the assignment.");
}

#[test]
fn error_invalid_assignment_targets() {
    assert_eq!(parse_error("5 + 3 = x"),
               "Parse Error: Invalid target for assignment.\n\
                --> at line 1:\n    \
                5 + 3 = x\n          \
                ^-- Cannot assign to this expression.");
    assert!(parse_error("sin(x) = 5").contains("Invalid target for assignment."));
    assert!(parse_error("(x+1) = 5").contains("Invalid target for assignment."));
}

#[test]
fn error_division_operator_abuse() {
    assert_eq!(parse_error("x * / y"),
               "Parse Error: Infix operator '*' is missing a right-hand side expression.\n\
                --> at line 1:\n    \
                x * / y\n      \
                ^-- An expression was expected to follow this operator");
}

#[test]
fn error_undefined_variable() {
    assert_eq!(parse_error("k = q + 1"),
               "Parse Error: Use of undefined variable 'q'.\n\
                --> at line 1:\n    \
                k = q + 1\n        \
                ^-- This variable has not been defined");
}

#[test]
fn error_undefined_variable_in_plain_expression() {
    assert!(parse_error("q + 1").contains("Use of undefined variable 'q'"));
}

#[test]
fn unknown_callable_resolves_as_a_variable() {
    // An unknown word before '(' is an implicit product with a variable,
    // so it trips the definedness check rather than a call-site error.
    assert!(parse_error("bar(2)").contains("Use of undefined variable 'bar'"));
    assert_eq!(lisp("x(2)"), "(* 2 x)");
}

#[test]
fn error_statement_opening_with_an_infix_operator() {
    // After a completed line, a leading infix operator means the user
    // split one expression across lines without parentheses.
    assert_eq!(parse_error("a\n* 5"),
               "Parse Error: Multiline expressions must be enclosed in parentheses.\n\
                --> at line 2:\n    \
                * 5\n    \
                ^-- An expression cannot be split across lines here.\n       \
                Consider wrapping the entire expression in parentheses `()`.");
    assert!(parse_error("a\n/ 2").contains("Multiline expressions"));
}

#[test]
fn error_dangling_infix_at_line_break() {
    let message = parse_error("k = 10 +\n20");
    assert!(message.starts_with("Parse Error: Infix operator '+' is missing"),
            "unexpected message: {message}");
}

#[test]
fn error_function_arity() {
    assert_eq!(parse_error("f(x, y) = x + y\nf(1, 2, 3)"),
               "Parse Error: Function call with too many arguments.\n\
                --> at line 2:\n    \
                f(1, 2, 3)\n    \
                ^-- 'f' expects 2 arguments.");
    assert_eq!(parse_error("f(x, y) = x + y\nf(1)"),
               "Parse Error: Function call without sufficient arguments.\n\
                --> at line 2:\n    \
                f(1)\n    \
                ^-- 'f' expects 2 arguments.");
}

#[test]
fn error_multi_argument_without_parentheses() {
    assert_eq!(parse_error("atan2 1"),
               "Parse Error: Multi argument function called without parentheses.\n\
                --> at line 1:\n    \
                atan2 1\n    \
                ^-- 'atan2' expects 2 arguments. Cannot call without parentheses.");
}

#[test]
fn error_empty_argument_slot() {
    assert_eq!(parse_error("atan2(, 1)"),
               "Parse Error: An expression was expected for an argument, but none was found.\n\
                --> at line 1:\n    \
                atan2(, 1)\n          \
                ^-- Expected an argument here");
}

#[test]
fn error_redefining_builtin_function() {
    assert!(parse_error("sin(x) = x").contains("Cannot redefine built-in function 'sin'"));
}

#[test]
fn error_assigning_predefined_constant() {
    assert!(parse_error("pi = 3").contains("Cannot assign to predefined constant 'pi'"));
    assert!(parse_error("e = 3").contains("Cannot assign to predefined constant 'e'"));
}
