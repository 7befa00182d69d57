use std::collections::BTreeMap;

use crate::{ast::{Node, Op},
            interpreter::printer::to_lisp};

/// One factor of a flattened product: a base raised to a numeric power.
struct Factor {
    base:  Node,
    power: f64,
}

/// Splits a factor into `(base, power)` by unwrapping a
/// `base ^ numeric-exponent` shape; anything else is the base to the first
/// power.
fn factor_parts(node: &Node) -> Factor {
    if let Node::Operand { op: Op::Pow, args } = node
       && args.len() == 2
       && let Some(exponent) = args[1].as_number()
    {
        return Factor { base: args[0].clone(),
                        power: exponent, };
    }
    Factor { base:  node.clone(),
             power: 1.0, }
}

/// Flattens a product tree into factors, descending through nested `*` and
/// `/` nodes; division negates the accumulated exponent sign.
fn collect_factors(node: &Node, power: f64, factors: &mut Vec<Factor>) {
    if let Node::Operand { op, args } = node {
        match (op, args.as_slice()) {
            (Op::Mul, [lhs, rhs]) => {
                collect_factors(lhs, power, factors);
                collect_factors(rhs, power, factors);
                return;
            },
            (Op::Div, [lhs, rhs]) => {
                collect_factors(lhs, power, factors);
                collect_factors(rhs, -power, factors);
                return;
            },
            _ => {},
        }
    }

    let mut parts = factor_parts(node);
    parts.power *= power;
    factors.push(parts);
}

fn power_node(base: &Node, power: f64) -> Node {
    if power == 1.0 {
        base.clone()
    } else {
        Node::binary(Op::Pow, base.clone(), Node::number(power))
    }
}

fn product_chain(factors: Vec<Node>) -> Option<Node> {
    factors.into_iter()
           .reduce(|acc, factor| Node::binary(Op::Mul, acc, factor))
}

/// Normalizes a `*`/`/` tree.
///
/// Numeric bases multiply into a running scalar coefficient (raised to
/// their factor's power); symbolic bases group by canonical key, summing
/// powers, with zero-power groups dropped. The coefficient lands in the
/// numerator unless its reciprocal is a whole number, in which case the
/// reciprocal lands in the denominator (`0.5x` reads better as `x / 2`).
/// Positive-power groups go to the numerator, negative-power groups to the
/// denominator with the power negated. Both sides are re-simplified once
/// built so already-flattened sub-products can combine further.
pub(super) fn simplify_product(node: &Node) -> Node {
    let mut collected = Vec::new();
    collect_factors(node, 1.0, &mut collected);

    let mut coefficient = 1.0f64;
    let mut groups: BTreeMap<String, Factor> = BTreeMap::new();
    for factor in collected {
        if let Some(value) = factor.base.as_number() {
            coefficient *= value.powf(factor.power);
        } else {
            groups.entry(to_lisp(&factor.base))
                  .and_modify(|existing| existing.power += factor.power)
                  .or_insert(factor);
        }
    }

    let mut numerator = Vec::new();
    let mut denominator = Vec::new();

    let reciprocal = 1.0 / coefficient;
    if reciprocal.is_finite() && reciprocal.fract() == 0.0 && reciprocal != 1.0 {
        denominator.push(Node::number(reciprocal));
    } else if coefficient != 1.0 {
        numerator.push(Node::number(coefficient));
    }

    for factor in groups.values() {
        if factor.power == 0.0 {
            continue;
        }
        if factor.power > 0.0 {
            numerator.push(power_node(&factor.base, factor.power));
        } else {
            denominator.push(power_node(&factor.base, -factor.power));
        }
    }

    let numerator_tree = product_chain(numerator).unwrap_or_else(|| Node::number(1.0));
    match product_chain(denominator) {
        None => numerator_tree,
        Some(denominator_tree) => Node::binary(Op::Div,
                                               super::simplify_node(numerator_tree),
                                               super::simplify_node(denominator_tree)),
    }
}
