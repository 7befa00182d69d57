use std::collections::BTreeMap;

use crate::{ast::{Node, Op},
            interpreter::printer::to_lisp};

/// Grouping key for terms with no variable part.
const CONST_KEY: &str = "##CONST##";

/// One signed term of a flattened sum: a numeric coefficient times an
/// optional non-numeric part.
struct Term {
    coefficient:   f64,
    variable_part: Option<Node>,
}

impl Term {
    fn key(&self) -> String {
        self.variable_part
            .as_ref()
            .map_or_else(|| CONST_KEY.to_owned(), to_lisp)
    }
}

/// Splits a single term into `(coefficient, variable part)` by factoring
/// out numeric literals multiplied into it and folding unary-minus signs
/// into the coefficient.
fn term_parts(node: &Node) -> Term {
    if let Some(value) = node.as_number() {
        return Term { coefficient:   value,
                      variable_part: None, };
    }

    if let Node::Operand { op: Op::Mul, args } = node
       && args.len() == 2
    {
        let left = term_parts(&args[0]);
        let right = term_parts(&args[1]);

        let variable_part = match (left.variable_part, right.variable_part) {
            (None, part) | (part, None) => part,
            (Some(lhs), Some(rhs)) => Some(Node::binary(Op::Mul, lhs, rhs)),
        };
        return Term { coefficient: left.coefficient * right.coefficient,
                      variable_part };
    }

    if let Node::Operand { op: Op::Sub, args } = node
       && args.len() == 1
    {
        let mut parts = term_parts(&args[0]);
        parts.coefficient = -parts.coefficient;
        return parts;
    }

    Term { coefficient:   1.0,
           variable_part: Some(node.clone()), }
}

/// Flattens a sum tree into signed terms, descending through nested
/// `+`/`-` nodes while tracking the accumulated sign.
fn collect_terms(node: &Node, sign: f64, terms: &mut Vec<Term>) {
    if let Node::Operand { op, args } = node {
        match (op, args.as_slice()) {
            (Op::Add, [lhs, rhs]) => {
                collect_terms(lhs, sign, terms);
                collect_terms(rhs, sign, terms);
                return;
            },
            (Op::Sub, [lhs, rhs]) => {
                collect_terms(lhs, sign, terms);
                collect_terms(rhs, -sign, terms);
                return;
            },
            (Op::Sub, [child]) => {
                collect_terms(child, -sign, terms);
                return;
            },
            (Op::Add, [child]) => {
                collect_terms(child, sign, terms);
                return;
            },
            _ => {},
        }
    }

    let mut parts = term_parts(node);
    parts.coefficient *= sign;
    terms.push(parts);
}

/// Distributes a term whose variable part is itself a sum, one level deep:
/// `2 * (x + y)` becomes the terms `2x` and `2y`.
fn expand_term(term: Term) -> Vec<Term> {
    match &term.variable_part {
        Some(part @ Node::Operand { op: Op::Add | Op::Sub, .. }) => {
            let mut inner = Vec::new();
            collect_terms(part, 1.0, &mut inner);
            for t in &mut inner {
                t.coefficient *= term.coefficient;
            }
            inner
        },
        _ => vec![term],
    }
}

fn signed_term(coefficient: f64, part: &Node) -> Node {
    if coefficient == 1.0 {
        part.clone()
    } else if coefficient == -1.0 {
        Node::unary(Op::Sub, part.clone())
    } else {
        Node::binary(Op::Mul, Node::number(coefficient), part.clone())
    }
}

fn unsigned_term(magnitude: f64, part: &Node) -> Node {
    if magnitude == 1.0 {
        part.clone()
    } else {
        Node::binary(Op::Mul, Node::number(magnitude), part.clone())
    }
}

/// Normalizes a `+`/`-` tree: flatten into signed terms, distribute
/// sums one level, group by canonical key summing coefficients, drop
/// zero-coefficient groups, and rebuild in key order. Groups are joined
/// with `+` when the next coefficient is non-negative, otherwise with `-`
/// subtracting the unsigned term. No surviving terms means the sum is `0`.
pub(super) fn simplify_sum(node: &Node) -> Node {
    let mut collected = Vec::new();
    collect_terms(node, 1.0, &mut collected);

    let mut groups: BTreeMap<String, Term> = BTreeMap::new();
    for term in collected.into_iter().flat_map(expand_term) {
        groups.entry(term.key())
              .and_modify(|existing| existing.coefficient += term.coefficient)
              .or_insert(term);
    }

    let mut root: Option<Node> = None;
    for term in groups.values() {
        if term.coefficient == 0.0 {
            continue;
        }

        root = Some(match (&term.variable_part, root.take()) {
                        (None, None) => Node::number(term.coefficient),
                        (None, Some(acc)) => {
                            if term.coefficient >= 0.0 {
                                Node::binary(Op::Add, acc, Node::number(term.coefficient))
                            } else {
                                Node::binary(Op::Sub, acc, Node::number(-term.coefficient))
                            }
                        },
                        (Some(part), None) => signed_term(term.coefficient, part),
                        (Some(part), Some(acc)) => {
                            if term.coefficient >= 0.0 {
                                Node::binary(Op::Add, acc, signed_term(term.coefficient, part))
                            } else {
                                Node::binary(Op::Sub, acc, unsigned_term(-term.coefficient, part))
                            }
                        },
                    });
    }

    root.unwrap_or_else(|| Node::number(0.0))
}
