use crate::util::num::format_number;

/// Represents an arithmetic operator attached to an [`Node::Operand`] node.
///
/// Operators are a closed set so that binding-power lookup, simplification
/// and evaluation can match on them exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Addition (`+`), binary or unary (leading sign).
    Add,
    /// Subtraction (`-`), binary or unary (negation).
    Sub,
    /// Multiplication (`*`), possibly synthesized for implicit products.
    Mul,
    /// Division (`/`).
    Div,
    /// Exponentiation (`^`), right-associative.
    Pow,
    /// Factorial (`!`), postfix.
    Fact,
}

impl Op {
    /// The source-text spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Fact => "!",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An abstract syntax tree node.
///
/// `Node` is the single tree representation shared by the parser, the
/// simplifier, the evaluator and the printers. Children are owned
/// exclusively by their parent; there are no parent pointers. A statement
/// tree is created by one `parse` call and owned by the caller, and the
/// simplifier always returns a fresh tree, leaving its input untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A numeric literal. The source text is preserved for display; the
    /// numeric value is parsed on demand via [`Node::as_number`].
    Number(String),
    /// A reference to a variable by name.
    Variable(String),
    /// A positional reference to a function parameter, produced only inside
    /// a function body by the parser's parameter rewrite.
    Parameter {
        /// Zero-based position in the defining parameter list.
        index: usize,
        /// The parameter's name as written in the definition.
        name:  String,
    },
    /// An operator application; one child for unary `+`/`-` and postfix
    /// `!`, two children otherwise.
    Operand {
        /// The operator.
        op:   Op,
        /// The operand expressions.
        args: Vec<Node>,
    },
    /// A function call, built-in or user-defined; the child count always
    /// matches the function's arity.
    Function {
        /// The name of the function being called.
        name: String,
        /// The argument expressions.
        args: Vec<Node>,
    },
    /// A variable assignment binding a name to an expression.
    Assignment {
        /// The name of the variable.
        name:  String,
        /// The value expression.
        value: Box<Node>,
    },
    /// A function definition. All parameter references inside the body have
    /// already been rewritten into [`Node::Parameter`] nodes.
    FunctionAssignment {
        /// The name of the function.
        name: String,
        /// The body expression.
        body: Box<Node>,
    },
    /// A derivative form `d/dvar(expr)`; differentiation itself is carried
    /// out by the symbolic evaluator, not the parser.
    Derivative {
        /// The differentiation variable.
        var:  String,
        /// The wrapped expression.
        expr: Box<Node>,
    },
}

impl Node {
    /// Creates a `Number` node from a numeric value.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(format_number(value))
    }

    /// Creates a binary `Operand` node.
    #[must_use]
    pub fn binary(op: Op, lhs: Self, rhs: Self) -> Self {
        Self::Operand { op,
                        args: vec![lhs, rhs] }
    }

    /// Creates a unary `Operand` node.
    #[must_use]
    pub fn unary(op: Op, child: Self) -> Self {
        Self::Operand { op,
                        args: vec![child] }
    }

    /// Returns `true` if this node is a numeric literal.
    ///
    /// # Example
    /// ```
    /// use symplify::ast::Node;
    ///
    /// assert!(Node::number(3.5).is_number());
    /// assert!(!Node::Variable("x".to_string()).is_number());
    /// ```
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns the numeric value of a `Number` node, or `None` for every
    /// other kind and for unparseable number text.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(text) => text.parse().ok(),
            _ => None,
        }
    }
}
