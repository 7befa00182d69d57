use crate::ast::{Node, Op};

// Precedence ladder used when rendering, mirroring the parser's binding
// powers: sums bind loosest, atoms never need parentheses.
const PREC_NONE: u8 = 0;
const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_POWER: u8 = 3;
const PREC_UNARY: u8 = 4;
const PREC_ATOM: u8 = 6;

/// Serializes a tree into its Lisp form, e.g. `(+ (* 2 x) 1)`.
///
/// This rendering doubles as the simplifier's canonical grouping key, so it
/// must be deterministic: numeric text is printed with trailing fractional
/// zeros trimmed, and parameters print as their bare names.
///
/// # Example
/// ```
/// use symplify::{ast::{Node, Op}, interpreter::printer::to_lisp};
///
/// let tree = Node::binary(Op::Add, Node::number(2.0), Node::Variable("x".to_string()));
/// assert_eq!(to_lisp(&tree), "(+ 2 x)");
/// ```
#[must_use]
pub fn to_lisp(node: &Node) -> String {
    let mut out = String::new();
    write_lisp(node, &mut out);
    out
}

fn write_lisp(node: &Node, out: &mut String) {
    match node {
        Node::Number(text) => out.push_str(&trim_number_text(text)),
        Node::Variable(name) => out.push_str(name),
        Node::Parameter { name, .. } => out.push_str(name),
        Node::Operand { op, args } => {
            out.push('(');
            out.push_str(op.symbol());
            for arg in args {
                out.push(' ');
                write_lisp(arg, out);
            }
            out.push(')');
        },
        Node::Function { name, args } => {
            out.push('(');
            out.push_str(name);
            for arg in args {
                out.push(' ');
                write_lisp(arg, out);
            }
            out.push(')');
        },
        Node::Assignment { name, value } => {
            out.push_str("(= ");
            out.push_str(name);
            out.push(' ');
            write_lisp(value, out);
            out.push(')');
        },
        Node::FunctionAssignment { name, body } => {
            out.push('(');
            out.push_str(name);
            out.push(' ');
            write_lisp(body, out);
            out.push(')');
        },
        Node::Derivative { var, expr } => {
            out.push_str("(d/d");
            out.push_str(var);
            out.push(' ');
            write_lisp(expr, out);
            out.push(')');
        },
    }
}

/// Trims trailing fractional zeros from numeric text: `3.1400` renders as
/// `3.14` and `3.` as `3`. Exponent forms are left alone.
fn trim_number_text(text: &str) -> String {
    if !text.contains('.') || text.contains(['e', 'E']) {
        return text.to_owned();
    }
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_owned()
}

const fn operator_precedence(op: Op) -> u8 {
    match op {
        Op::Add | Op::Sub => PREC_SUM,
        Op::Mul | Op::Div => PREC_PRODUCT,
        Op::Pow => PREC_POWER,
        Op::Fact => PREC_NONE,
    }
}

fn is_unary(node: &Node) -> bool {
    match node {
        Node::Operand { op, args } => matches!(op, Op::Fact | Op::Sub) && args.len() == 1,
        _ => false,
    }
}

fn node_precedence(node: &Node) -> u8 {
    match node {
        Node::Number(_)
        | Node::Variable(_)
        | Node::Parameter { .. }
        | Node::Function { .. }
        | Node::Derivative { .. } => PREC_ATOM,
        Node::Assignment { .. } | Node::FunctionAssignment { .. } => PREC_NONE,
        Node::Operand { op, .. } => {
            if is_unary(node) {
                PREC_UNARY
            } else {
                operator_precedence(*op)
            }
        },
    }
}

/// Checks whether `node`, rendered in a context of `parent_prec`, starts
/// with a character that is safe on the right of an implicit product. A
/// rendering that opens with a digit or a sign needs an explicit `*`.
fn is_safe_for_implicit(node: &Node, parent_prec: u8) -> bool {
    if node_precedence(node) < parent_prec {
        // Will be parenthesized, so it starts with '('.
        return true;
    }

    match node {
        Node::Number(_) => false,
        Node::Operand { op, args } => match op {
            Op::Add | Op::Sub => {
                if args.len() == 1 {
                    false
                } else {
                    is_safe_for_implicit(&args[0], node_precedence(node) + 1)
                }
            },
            Op::Fact => is_safe_for_implicit(&args[0], node_precedence(node)),
            Op::Mul | Op::Div | Op::Pow => {
                is_safe_for_implicit(&args[0], operator_precedence(*op) + 1)
            },
        },
        _ => true,
    }
}

/// Renders a tree back into expression syntax, inserting parentheses only
/// where precedence demands them and `*` only where an implicit product
/// would not survive re-lexing.
///
/// # Example
/// ```
/// use symplify::{ast::{Node, Op}, interpreter::printer::to_human_readable};
///
/// let tree = Node::binary(Op::Mul, Node::number(2.0), Node::Variable("x".to_string()));
/// assert_eq!(to_human_readable(&tree), "2x");
/// ```
#[must_use]
pub fn to_human_readable(node: &Node) -> String {
    let mut out = String::new();
    write_human(node, &mut out, PREC_NONE);
    out
}

fn write_human(node: &Node, out: &mut String, parent_prec: u8) {
    match node {
        Node::Number(text) => out.push_str(&trim_number_text(text)),
        Node::Variable(name) => out.push_str(name),
        Node::Parameter { name, .. } => out.push_str(name),
        Node::Assignment { name, value } => {
            if PREC_NONE < parent_prec {
                out.push('(');
            }
            out.push_str(name);
            out.push_str(" = ");
            write_human(value, out, PREC_NONE);
            if PREC_NONE < parent_prec {
                out.push(')');
            }
        },
        Node::Operand { op, args } => {
            if is_unary(node) {
                if PREC_UNARY < parent_prec {
                    out.push('(');
                }
                if matches!(op, Op::Fact) {
                    write_human(&args[0], out, PREC_UNARY);
                    out.push_str(op.symbol());
                } else {
                    out.push_str(op.symbol());
                    write_human(&args[0], out, PREC_UNARY);
                }
                if PREC_UNARY < parent_prec {
                    out.push(')');
                }
            } else {
                let prec = operator_precedence(*op);
                if prec < parent_prec {
                    out.push('(');
                }
                write_human(&args[0], out, prec + 1);
                for arg in &args[1..] {
                    match op {
                        Op::Mul => {
                            if !is_safe_for_implicit(arg, prec + 1) {
                                out.push('*');
                            }
                        },
                        Op::Add | Op::Sub => {
                            out.push(' ');
                            out.push_str(op.symbol());
                            out.push(' ');
                        },
                        _ => out.push_str(op.symbol()),
                    }
                    write_human(arg, out, prec + 1);
                }
                if prec < parent_prec {
                    out.push(')');
                }
            }
        },
        Node::Function { name, args } => {
            out.push_str(name);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_human(arg, out, PREC_NONE);
            }
            out.push(')');
        },
        Node::FunctionAssignment { name, body } => {
            if PREC_NONE < parent_prec {
                out.push('(');
            }
            out.push_str(name);
            out.push_str(" = ");
            write_human(body, out, PREC_NONE);
            if PREC_NONE < parent_prec {
                out.push(')');
            }
        },
        Node::Derivative { var, expr } => {
            out.push_str("d/d");
            out.push_str(var);
            out.push('(');
            write_human(expr, out, PREC_NONE);
            out.push(')');
        },
    }
}
