use std::collections::HashMap;

use crate::{ast::{Node, Op},
            interpreter::simplifier::simplify};

/// Symbolic expansion of statement trees.
///
/// The symbolic evaluator inlines user-defined function calls by
/// substituting each `Parameter` node with the corresponding argument
/// sub-tree, replaces registered variables (and the predefined constants)
/// with numeric leaves, and elaborates `Derivative` nodes through
/// [`differentiate`]. The simplifier runs after every substitution and
/// differentiation step, so the output is always in canonical form.
pub struct SymbolicEvaluator {
    functions: HashMap<String, Node>,
    variables: HashMap<String, f64>,
}

impl Default for SymbolicEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolicEvaluator {
    /// Creates a symbolic evaluator with no registrations.
    #[must_use]
    pub fn new() -> Self {
        Self { functions: HashMap::new(),
               variables: HashMap::new(), }
    }

    /// Registers a function definition for later inlining. Anything other
    /// than a `FunctionAssignment` is ignored.
    pub fn register_function(&mut self, definition: &Node) {
        if let Node::FunctionAssignment { name, .. } = definition {
            self.functions.insert(name.clone(), definition.clone());
        }
    }

    /// Registers a numeric value to substitute for a variable.
    pub fn register_variable(&mut self, name: &str, value: f64) {
        self.variables.insert(name.to_owned(), value);
    }

    /// Expands a tree: function calls are inlined, registered variables and
    /// predefined constants become numbers, and derivative forms are
    /// carried out.
    ///
    /// # Example
    /// ```
    /// use symplify::interpreter::{lexer::tokenize, parser::Parser, printer::to_lisp,
    ///                             symbolic::SymbolicEvaluator};
    ///
    /// let mut lexer = tokenize("square(x) = x * x\nsquare(3)").unwrap();
    /// let statements = Parser::new().parse(&mut lexer).unwrap();
    ///
    /// let mut symbolic = SymbolicEvaluator::new();
    /// symbolic.register_function(&statements[0]);
    /// assert_eq!(to_lisp(&symbolic.expand(&statements[1])), "9");
    /// ```
    #[must_use]
    pub fn expand(&self, node: &Node) -> Node {
        self.expand_node(node)
    }

    fn expand_node(&self, node: &Node) -> Node {
        let expanded = match node {
            Node::Operand { op, args } => {
                Node::Operand { op:   *op,
                                args: args.iter().map(|arg| self.expand_node(arg)).collect(), }
            },
            Node::Function { name, args } => {
                let args: Vec<Node> = args.iter().map(|arg| self.expand_node(arg)).collect();
                if let Some(Node::FunctionAssignment { body, .. }) = self.functions.get(name) {
                    let substituted = substitute_parameters((**body).clone(), &args);
                    return self.expand_node(&substituted);
                }
                Node::Function { name: name.clone(),
                                 args }
            },
            Node::Variable(name) => match self.substitute_variable(name) {
                Some(value) => Node::number(value),
                None => node.clone(),
            },
            Node::Assignment { name, value } => {
                Node::Assignment { name:  name.clone(),
                                   value: Box::new(self.expand_node(value)), }
            },
            Node::FunctionAssignment { name, body } => {
                Node::FunctionAssignment { name: name.clone(),
                                           body: Box::new(self.expand_node(body)), }
            },
            Node::Derivative { var, expr } => {
                let inner = self.expand_node(expr);
                differentiate(&inner, var)
            },
            Node::Number(_) | Node::Parameter { .. } => node.clone(),
        };

        simplify(&expanded)
    }

    fn substitute_variable(&self, name: &str) -> Option<f64> {
        if let Some(value) = self.variables.get(name) {
            return Some(*value);
        }
        match name {
            "pi" => Some(std::f64::consts::PI),
            "e" => Some(std::f64::consts::E),
            _ => None,
        }
    }
}

/// Replaces every `Parameter` node in a function body with a clone of the
/// argument sub-tree at its index. Out-of-range indices leave the
/// parameter in place; the parser's arity checks make that unreachable for
/// trees it produced.
fn substitute_parameters(body: Node, arguments: &[Node]) -> Node {
    match body {
        Node::Parameter { index, name } => match arguments.get(index) {
            Some(argument) => argument.clone(),
            None => Node::Parameter { index, name },
        },
        Node::Operand { op, args } => {
            Node::Operand { op,
                            args: args.into_iter()
                                      .map(|arg| substitute_parameters(arg, arguments))
                                      .collect() }
        },
        Node::Function { name, args } => {
            Node::Function { name,
                             args: args.into_iter()
                                       .map(|arg| substitute_parameters(arg, arguments))
                                       .collect() }
        },
        Node::Assignment { name, value } => {
            Node::Assignment { name,
                               value: Box::new(substitute_parameters(*value, arguments)) }
        },
        Node::FunctionAssignment { name, body } => {
            Node::FunctionAssignment { name,
                                       body: Box::new(substitute_parameters(*body, arguments)) }
        },
        Node::Derivative { var, expr } => {
            Node::Derivative { var,
                               expr: Box::new(substitute_parameters(*expr, arguments)) }
        },
        leaf => leaf,
    }
}

/// Differentiates a tree with respect to `var`, applying the sum, product,
/// quotient, power and chain rules, with every composite result passed
/// through the simplifier. Derivatives of unknown functions, and of node
/// kinds calculus does not apply to, are zero.
#[must_use]
pub fn differentiate(node: &Node, var: &str) -> Node {
    match node {
        Node::Number(_) => Node::number(0.0),

        Node::Variable(name) => {
            Node::number(if name == var { 1.0 } else { 0.0 })
        },

        Node::Parameter { name, .. } => {
            Node::number(if name == var { 1.0 } else { 0.0 })
        },

        Node::Operand { op, args } => differentiate_operand(*op, args, var),

        Node::Function { name, args } => differentiate_function(name, args, var),

        Node::Assignment { .. } | Node::FunctionAssignment { .. } | Node::Derivative { .. } => {
            Node::number(0.0)
        },
    }
}

fn differentiate_operand(op: Op, args: &[Node], var: &str) -> Node {
    let [f, rest @ ..] = args else {
        return Node::number(0.0);
    };
    let f_prime = differentiate(f, var);

    let [g] = rest else {
        // Unary node: only the sign survives differentiation.
        if matches!(op, Op::Sub) {
            return simplify(&Node::unary(Op::Sub, f_prime));
        }
        return f_prime;
    };
    let g_prime = differentiate(g, var);

    match op {
        Op::Add | Op::Sub => simplify(&Node::binary(op, f_prime, g_prime)),

        Op::Mul => {
            let lhs = Node::binary(Op::Mul, f_prime, g.clone());
            let rhs = Node::binary(Op::Mul, f.clone(), g_prime);
            simplify(&Node::binary(Op::Add, lhs, rhs))
        },

        Op::Div => {
            let lhs = Node::binary(Op::Mul, f_prime, g.clone());
            let rhs = Node::binary(Op::Mul, f.clone(), g_prime);
            let numerator = Node::binary(Op::Sub, lhs, rhs);
            let denominator = Node::binary(Op::Pow, g.clone(), Node::number(2.0));
            simplify(&Node::binary(Op::Div, numerator, denominator))
        },

        Op::Pow => {
            if let Some(n) = g.as_number() {
                // Power rule: n * f^(n-1) * f'.
                let f_pow = Node::binary(Op::Pow, f.clone(), Node::number(n - 1.0));
                let scaled = Node::binary(Op::Mul, g.clone(), f_pow);
                return simplify(&Node::binary(Op::Mul, scaled, f_prime));
            }
            // General case: f^g * (g' ln f + g f'/f).
            let ln_f = Node::Function { name: "ln".to_owned(),
                                        args: vec![f.clone()], };
            let term1 = Node::binary(Op::Mul, g_prime, ln_f);
            let ratio = Node::binary(Op::Div, f_prime, f.clone());
            let term2 = Node::binary(Op::Mul, g.clone(), ratio);
            let total = Node::binary(Op::Add, term1, term2);
            let original = Node::Operand { op:   Op::Pow,
                                           args: vec![f.clone(), g.clone()], };
            simplify(&Node::binary(Op::Mul, original, total))
        },

        Op::Fact => Node::number(0.0),
    }
}

fn differentiate_function(name: &str, args: &[Node], var: &str) -> Node {
    let [g] = args else {
        return Node::number(0.0);
    };
    let g_prime = differentiate(g, var);

    let outer = match name {
        "sin" => Node::Function { name: "cos".to_owned(),
                                  args: vec![g.clone()], },
        "cos" => {
            let sin_g = Node::Function { name: "sin".to_owned(),
                                         args: vec![g.clone()], };
            Node::unary(Op::Sub, sin_g)
        },
        "tan" => {
            let cos_g = Node::Function { name: "cos".to_owned(),
                                         args: vec![g.clone()], };
            let cos_sq = Node::binary(Op::Pow, cos_g, Node::number(2.0));
            Node::binary(Op::Div, Node::number(1.0), cos_sq)
        },
        "ln" => Node::binary(Op::Div, Node::number(1.0), g.clone()),
        "log" => {
            let ln_10 = Node::Function { name: "ln".to_owned(),
                                         args: vec![Node::number(10.0)], };
            let scaled = Node::binary(Op::Mul, g.clone(), ln_10);
            Node::binary(Op::Div, Node::number(1.0), scaled)
        },
        "sqrt" => {
            let original = Node::Function { name: name.to_owned(),
                                            args: vec![g.clone()], };
            let doubled = Node::binary(Op::Mul, Node::number(2.0), original);
            Node::binary(Op::Div, Node::number(1.0), doubled)
        },
        "abs" => {
            let original = Node::Function { name: name.to_owned(),
                                            args: vec![g.clone()], };
            Node::binary(Op::Div, g.clone(), original)
        },
        _ => return Node::number(0.0),
    };

    simplify(&Node::binary(Op::Mul, outer, g_prime))
}
