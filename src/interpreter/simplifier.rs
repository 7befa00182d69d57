use crate::{ast::{Node, Op},
            interpreter::builtins::apply_builtin,
            util::num::factorial};

/// Sum normalization: flattening into signed terms and like-term grouping.
mod sum;

/// Product normalization: flattening into base/power factors, scalar
/// coefficient handling, and numerator/denominator rebuilding.
mod product;

/// Normalizes a tree into canonical algebraic form.
///
/// Pure and referentially transparent: the input is cloned and never
/// mutated, and the same tree always normalizes to the same result. The
/// parser runs this on every completed statement, and the symbolic
/// evaluator after every substitution and differentiation step.
///
/// # Example
/// ```
/// use symplify::interpreter::{lexer::tokenize, parser::Parser, printer::to_lisp,
///                             simplifier::simplify};
///
/// let mut lexer = tokenize("y = x*1 + 0").unwrap();
/// let mut parser = Parser::new();
/// parser.define_variable("x");
/// let statements = parser.parse(&mut lexer).unwrap();
/// assert_eq!(to_lisp(&statements[0]), "(= y x)");
///
/// // Idempotent: a normalized tree is its own normal form.
/// assert_eq!(simplify(&statements[0]), statements[0]);
/// ```
#[must_use]
pub fn simplify(node: &Node) -> Node {
    simplify_node(node.clone())
}

/// The recursive rewrite. Children are fully simplified before the parent
/// is processed; only `Operand` and `Function` nodes are themselves subject
/// to rewriting.
pub(crate) fn simplify_node(node: Node) -> Node {
    let node = simplify_children(node);

    match &node {
        Node::Operand { .. } => {},
        Node::Function { .. } => return fold_function(node),
        _ => return node,
    }

    let node = fold_operand(node);
    let node = if matches!(&node, Node::Operand { op: Op::Add | Op::Sub, .. }) {
        sum::simplify_sum(&node)
    } else {
        node
    };
    let node = if matches!(&node, Node::Operand { op: Op::Mul | Op::Div, .. }) {
        product::simplify_product(&node)
    } else {
        node
    };
    let node = rewrite_power(node);
    apply_identities(node)
}

fn simplify_children(node: Node) -> Node {
    match node {
        Node::Operand { op, args } => {
            Node::Operand { op,
                            args: args.into_iter().map(simplify_node).collect() }
        },
        Node::Function { name, args } => {
            Node::Function { name,
                             args: args.into_iter().map(simplify_node).collect() }
        },
        Node::Assignment { name, value } => {
            Node::Assignment { name,
                               value: Box::new(simplify_node(*value)) }
        },
        Node::FunctionAssignment { name, body } => {
            Node::FunctionAssignment { name,
                                       body: Box::new(simplify_node(*body)) }
        },
        Node::Derivative { var, expr } => {
            Node::Derivative { var,
                               expr: Box::new(simplify_node(*expr)) }
        },
        leaf => leaf,
    }
}

/// Folds an operator over all-numeric children into a number leaf.
///
/// Division by zero declines, as does any fold producing `NaN` (factorial
/// of a negative, for instance); the node stays symbolic instead of
/// propagating `NaN` into the tree. Infinities do fold.
fn fold_operand(node: Node) -> Node {
    let Node::Operand { op, args } = &node else {
        return node;
    };
    let Some(values) = args.iter().map(Node::as_number).collect::<Option<Vec<_>>>() else {
        return node;
    };

    let result = match (op, values.as_slice()) {
        (Op::Add, [a, b]) => a + b,
        (Op::Sub, [a, b]) => a - b,
        (Op::Mul, [a, b]) => a * b,
        (Op::Div, [a, b]) => {
            if *b == 0.0 {
                return node;
            }
            a / b
        },
        (Op::Pow, [a, b]) => a.powf(*b),
        (Op::Add, [a]) => *a,
        (Op::Sub, [a]) => -a,
        (Op::Fact, [a]) => factorial(*a),
        _ => return node,
    };

    if result.is_nan() {
        return node;
    }
    Node::number(result)
}

/// Folds a built-in function call over all-numeric arguments. User-defined
/// calls and domain errors stay symbolic.
fn fold_function(node: Node) -> Node {
    let Node::Function { name, args } = &node else {
        return node;
    };
    let Some(values) = args.iter().map(Node::as_number).collect::<Option<Vec<_>>>() else {
        return node;
    };

    match apply_builtin(name, &values) {
        Some(result) if !result.is_nan() => Node::number(result),
        _ => node,
    }
}

/// Power rewrites applied before the generic identities:
/// `(a*b)^n → a^n * b^n`, `(a/b)^n → a^n / b^n`, `(a^m)^n → a^(m*n)`.
/// Each rewritten tree is re-simplified so the distributed parts can fold
/// and regroup.
fn rewrite_power(node: Node) -> Node {
    match power_rewrite(&node) {
        Some(rewritten) => simplify_node(rewritten),
        None => node,
    }
}

fn power_rewrite(node: &Node) -> Option<Node> {
    let Node::Operand { op: Op::Pow, args } = node else {
        return None;
    };
    let [base, exponent] = args.as_slice() else {
        return None;
    };

    match base {
        Node::Operand { op: inner_op @ (Op::Mul | Op::Div),
                        args: inner, } if inner.len() == 2 => {
            Some(Node::binary(*inner_op,
                              Node::binary(Op::Pow, inner[0].clone(), exponent.clone()),
                              Node::binary(Op::Pow, inner[1].clone(), exponent.clone())))
        },
        Node::Operand { op: Op::Pow,
                        args: inner, } if inner.len() == 2 => {
            Some(Node::binary(Op::Pow,
                              inner[0].clone(),
                              Node::binary(Op::Mul, inner[1].clone(), exponent.clone())))
        },
        _ => None,
    }
}

/// The generic algebraic identities, applied to any binary operand node
/// after normalization: multiplicative and additive units, zero
/// annihilation, power units, the presentation rewrite that turns a leading
/// negative constant into a subtraction, and the division folds for an
/// `inf` divisor or a zero numerator.
fn apply_identities(node: Node) -> Node {
    let Node::Operand { op, args } = &node else {
        return node;
    };
    let [lhs, rhs] = args.as_slice() else {
        return node;
    };
    let lhs_value = lhs.as_number();
    let rhs_value = rhs.as_number();

    match op {
        Op::Mul => {
            if rhs_value == Some(1.0) {
                return lhs.clone();
            }
            if lhs_value == Some(1.0) {
                return rhs.clone();
            }
            if rhs_value == Some(0.0) || lhs_value == Some(0.0) {
                return Node::number(0.0);
            }
        },
        Op::Add => {
            if rhs_value == Some(0.0) {
                return lhs.clone();
            }
            if lhs_value == Some(0.0) {
                return rhs.clone();
            }
            if let Some(value) = lhs_value
               && value < 0.0
            {
                return Node::binary(Op::Sub, rhs.clone(), Node::number(-value));
            }
        },
        Op::Sub => {
            if rhs_value == Some(0.0) {
                return lhs.clone();
            }
            if lhs_value == Some(0.0) {
                return Node::unary(Op::Sub, rhs.clone());
            }
        },
        Op::Pow => {
            if rhs_value == Some(1.0) {
                return lhs.clone();
            }
            if rhs_value == Some(0.0) || lhs_value == Some(1.0) {
                return Node::number(1.0);
            }
        },
        Op::Div => {
            if rhs_value.is_some_and(f64::is_infinite) || lhs_value == Some(0.0) {
                return Node::number(0.0);
            }
        },
        Op::Fact => {},
    }
    node
}
