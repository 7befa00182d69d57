use std::collections::HashMap;

use crate::{ast::{Node, Op},
            error::RuntimeError,
            interpreter::{builtins::apply_builtin, symbolic::differentiate},
            util::num::factorial};

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// One function invocation in flight: the already-evaluated arguments that
/// `Parameter` nodes in the body resolve against by index.
struct CallFrame {
    arguments: Vec<f64>,
}

/// Numeric evaluation of statement trees.
///
/// The evaluator owns a persistent environment: a variable map fed by
/// assignments and a function table fed by definitions. The function table
/// stores owned copies of `FunctionAssignment` nodes keyed by name, so a
/// registered function can never dangle. A call-frame stack resolves
/// parameter references during function-body evaluation.
pub struct Evaluator {
    variables:  HashMap<String, f64>,
    functions:  HashMap<String, Node>,
    call_stack: Vec<CallFrame>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self { variables:  HashMap::new(),
               functions:  HashMap::new(),
               call_stack: Vec::new(), }
    }

    /// Evaluates one statement tree.
    ///
    /// Function definitions register themselves and produce no value
    /// (`Ok(None)`); every other statement produces `Ok(Some(value))`.
    /// Assignments store their value in the environment and also yield it.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] for undefined names, division by zero,
    /// or parameter references outside a call.
    ///
    /// # Example
    /// ```
    /// use symplify::interpreter::{evaluator::Evaluator, lexer::tokenize, parser::Parser};
    ///
    /// let mut lexer = tokenize("square(x) = x * x\nsquare(7)").unwrap();
    /// let statements = Parser::new().parse(&mut lexer).unwrap();
    ///
    /// let mut evaluator = Evaluator::new();
    /// assert_eq!(evaluator.evaluate(&statements[0]).unwrap(), None);
    /// assert_eq!(evaluator.evaluate(&statements[1]).unwrap(), Some(49.0));
    /// ```
    pub fn evaluate(&mut self, node: &Node) -> EvalResult<Option<f64>> {
        self.call_stack.clear();

        if let Node::FunctionAssignment { name, .. } = node {
            self.functions.insert(name.clone(), node.clone());
            return Ok(None);
        }
        self.eval_node(node).map(Some)
    }

    fn eval_node(&mut self, node: &Node) -> EvalResult<f64> {
        match node {
            Node::Number(text) => {
                text.parse().map_err(|_| RuntimeError::MalformedExpression)
            },

            Node::Variable(name) => match name.as_str() {
                "pi" => Ok(std::f64::consts::PI),
                "e" => Ok(std::f64::consts::E),
                _ => {
                    self.variables
                        .get(name)
                        .copied()
                        .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone() })
                },
            },

            Node::Assignment { name, value } => {
                let value = self.eval_node(value)?;
                self.variables.insert(name.clone(), value);
                Ok(value)
            },

            Node::FunctionAssignment { name, .. } => {
                self.functions.insert(name.clone(), node.clone());
                Ok(f64::NAN)
            },

            Node::Operand { op, args } => self.eval_operand(*op, args),

            Node::Function { name, args } => self.eval_function(name, args),

            Node::Parameter { index, name } => {
                let frame = self.call_stack
                                .last()
                                .ok_or_else(|| RuntimeError::ParameterOutsideCall { name:
                                                                                        name.clone() })?;
                frame.arguments
                     .get(*index)
                     .copied()
                     .ok_or(RuntimeError::ArgumentIndexOutOfBounds { index: *index,
                                                                     count: frame.arguments
                                                                                 .len(), })
            },

            Node::Derivative { var, expr } => {
                let derived = differentiate(expr, var);
                self.eval_node(&derived)
            },
        }
    }

    fn eval_operand(&mut self, op: Op, args: &[Node]) -> EvalResult<f64> {
        match (op, args) {
            (Op::Add, [child]) => self.eval_node(child),
            (Op::Add, [lhs, rhs]) => Ok(self.eval_node(lhs)? + self.eval_node(rhs)?),
            (Op::Sub, [child]) => Ok(-self.eval_node(child)?),
            (Op::Sub, [lhs, rhs]) => Ok(self.eval_node(lhs)? - self.eval_node(rhs)?),
            (Op::Mul, [lhs, rhs]) => Ok(self.eval_node(lhs)? * self.eval_node(rhs)?),
            (Op::Div, [lhs, rhs]) => {
                let divisor = self.eval_node(rhs)?;
                if divisor == 0.0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                Ok(self.eval_node(lhs)? / divisor)
            },
            (Op::Pow, [lhs, rhs]) => {
                let base = self.eval_node(lhs)?;
                let exponent = self.eval_node(rhs)?;
                Ok(base.powf(exponent))
            },
            (Op::Fact, [child]) => Ok(factorial(self.eval_node(child)?)),
            _ => Err(RuntimeError::MalformedExpression),
        }
    }

    fn eval_function(&mut self, name: &str, args: &[Node]) -> EvalResult<f64> {
        let mut arguments = Vec::with_capacity(args.len());
        for arg in args {
            arguments.push(self.eval_node(arg)?);
        }

        if let Some(value) = apply_builtin(name, &arguments) {
            return Ok(value);
        }

        let Some(definition) = self.functions.get(name).cloned() else {
            return Err(RuntimeError::UnknownFunction { name: name.to_owned() });
        };
        let Node::FunctionAssignment { body, .. } = &definition else {
            return Err(RuntimeError::MalformedExpression);
        };

        self.call_stack.push(CallFrame { arguments });
        let result = self.eval_node(body);
        self.call_stack.pop();
        result
    }
}
