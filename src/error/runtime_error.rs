#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
///
/// Statement trees do not carry source positions, so runtime diagnostics
/// name the offending construct instead of pointing into the source.
pub enum RuntimeError {
    /// Tried to read a variable that has no value.
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// Called a function that has not been defined.
    UnknownFunction {
        /// The name of the function.
        name: String,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// A parameter reference was evaluated outside of any function call.
    ParameterOutsideCall {
        /// The parameter's name.
        name: String,
    },
    /// A parameter index exceeded the current call frame's argument count.
    ArgumentIndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The number of arguments in the frame.
        count: usize,
    },
    /// The tree contained a node shape the evaluator cannot process.
    MalformedExpression,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name } => {
                write!(f, "Evaluation Error: Unknown variable '{name}'.")
            },
            Self::UnknownFunction { name } => {
                write!(f, "Evaluation Error: Unknown function '{name}'.")
            },
            Self::DivisionByZero => write!(f, "Evaluation Error: Division by zero."),
            Self::ParameterOutsideCall { name } => write!(f,
                                                          "Evaluation Error: Parameter '{name}' \
                                                           used outside of a function call."),
            Self::ArgumentIndexOutOfBounds { index, count } => write!(f,
                                                                     "Evaluation Error: Argument \
                                                                      index {index} is out of \
                                                                      bounds for a call with \
                                                                      {count} arguments."),
            Self::MalformedExpression => {
                write!(f, "Evaluation Error: Expression tree is malformed.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
