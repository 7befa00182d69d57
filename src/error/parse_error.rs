use crate::interpreter::lexer::Token;

/// A position in the source text, carried by every parse diagnostic.
///
/// Tokens stamp themselves with the full text of their line, so a
/// diagnostic can render its caret block without re-scanning the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePos {
    /// The 1-based source line.
    pub line:      usize,
    /// The 0-based column within the line.
    pub column:    usize,
    /// The full text of the line.
    pub line_text: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while parsing a token stream.
///
/// The parser is single-pass and reports the first error it encounters; a
/// failing statement discards every statement parsed so far in the same
/// `parse` call.
pub enum ParseError {
    /// A token appeared where the grammar allows none.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// Where it was encountered.
        pos:   SourcePos,
    },
    /// An expression started with a token that cannot begin one.
    InvalidStart {
        /// The token encountered.
        token: String,
        /// Where it was encountered.
        pos:   SourcePos,
    },
    /// An opening parenthesis was never closed.
    MissingParen {
        /// The position of the unclosed `(`.
        open:  SourcePos,
        /// The token found where `)` was expected, if the input had not
        /// simply ended.
        found: Option<(String, SourcePos)>,
    },
    /// A prefix operator had nothing to apply to.
    MissingOperandForPrefix {
        /// The operator's source text.
        op:  String,
        /// The operator's position.
        pos: SourcePos,
    },
    /// An infix operator is missing its right-hand side.
    MissingRhs {
        /// The operator's source text.
        op:       String,
        /// Whether the operator was a synthesized implicit multiplication.
        implicit: bool,
        /// The operator's position.
        pos:      SourcePos,
    },
    /// An assignment operator is missing its right-hand side.
    MissingAssignmentRhs {
        /// The position of the `=`.
        pos: SourcePos,
    },
    /// A parenthesized group contained no expression.
    EmptyParen {
        /// The position of the `(`.
        pos: SourcePos,
    },
    /// Two adjacent atoms cannot be combined, implicitly or otherwise.
    MissingOperator {
        /// The atom on the left.
        previous: String,
        /// The atom on the right.
        found:    String,
        /// The position of the right atom.
        pos:      SourcePos,
    },
    /// An expression was split across lines outside parentheses.
    MultilineWithoutParen {
        /// Where the line break interrupted the expression.
        pos: SourcePos,
    },
    /// The left-hand side of `=` is not a plain variable.
    InvalidAssignmentTarget {
        /// The position of the `=`.
        pos: SourcePos,
    },
    /// Tried to assign to a predefined constant such as `pi`.
    AssignmentToConstant {
        /// The constant's name.
        name: String,
        /// Where the assignment was attempted.
        pos:  SourcePos,
    },
    /// Tried to define a function over a built-in name such as `sin`.
    AssignmentToBuiltinFunction {
        /// The built-in's name.
        name: String,
        /// Where the definition was attempted.
        pos:  SourcePos,
    },
    /// An expression referenced a variable that has not been defined.
    UndefinedVariable {
        /// The undefined variable's name.
        name: String,
        /// The caret position (the first occurrence of the name, when it
        /// can be located on the anchor line).
        pos:  SourcePos,
    },
    /// A function used in prefix form has no argument to consume.
    MissingArgument {
        /// The function's name.
        name:  String,
        /// The token found instead of an argument, unless the input ended.
        found: Option<String>,
        /// The caret position.
        pos:   SourcePos,
    },
    /// A call supplied fewer arguments than the function's arity.
    NotEnoughArguments {
        /// The function's name.
        name:  String,
        /// The function's arity.
        arity: usize,
        /// The call's position.
        pos:   SourcePos,
    },
    /// A call supplied more arguments than the function's arity.
    TooManyArguments {
        /// The function's name.
        name:  String,
        /// The function's arity.
        arity: usize,
        /// The call's position.
        pos:   SourcePos,
    },
    /// A multi-argument function was called in paren-less prefix form.
    MultiArgWithoutParens {
        /// The function's name.
        name:  String,
        /// The function's arity.
        arity: usize,
        /// The call's position.
        pos:   SourcePos,
    },
    /// An argument slot between commas was empty.
    EmptyArgument {
        /// The position of the empty slot.
        pos: SourcePos,
    },
}

impl ParseError {
    pub(crate) fn unexpected_token(token: &Token) -> Self {
        Self::UnexpectedToken { token: token.text(),
                                pos:   token.pos(), }
    }

    pub(crate) fn invalid_start(token: &Token) -> Self {
        Self::InvalidStart { token: token.text(),
                             pos:   token.pos(), }
    }

    pub(crate) fn missing_paren(open: &Token, found: &Token) -> Self {
        let found = if found.is_eof() || found.is_newline() {
            None
        } else {
            Some((found.text(), found.pos()))
        };
        Self::MissingParen { open: open.pos(),
                             found }
    }

    pub(crate) fn missing_operand_for_prefix(op: &Token) -> Self {
        Self::MissingOperandForPrefix { op:  op.text(),
                                        pos: op.pos(), }
    }

    pub(crate) fn missing_rhs(op: &Token, implicit: bool) -> Self {
        Self::MissingRhs { op: op.text(),
                           implicit,
                           pos: op.pos() }
    }

    pub(crate) fn missing_assignment_rhs(equals: &Token) -> Self {
        Self::MissingAssignmentRhs { pos: equals.pos() }
    }

    pub(crate) fn empty_paren(open: &Token) -> Self {
        Self::EmptyParen { pos: open.pos() }
    }

    pub(crate) fn missing_operator(previous: &Token, found: &Token) -> Self {
        Self::MissingOperator { previous: previous.text(),
                                found:    found.text(),
                                pos:      found.pos(), }
    }

    pub(crate) fn multiline_without_paren(token: &Token) -> Self {
        Self::MultilineWithoutParen { pos: token.pos() }
    }

    pub(crate) fn invalid_assignment_target(equals: &Token) -> Self {
        Self::InvalidAssignmentTarget { pos: equals.pos() }
    }

    pub(crate) fn assignment_to_constant(name: &str, token: &Token) -> Self {
        Self::AssignmentToConstant { name: name.to_owned(),
                                     pos:  token.pos(), }
    }

    pub(crate) fn assignment_to_builtin(token: &Token) -> Self {
        Self::AssignmentToBuiltinFunction { name: token.text(),
                                            pos:  token.pos(), }
    }

    /// Points at the first occurrence of `name` on the anchor's line, when
    /// it can be found at or after the anchor column.
    pub(crate) fn undefined_variable(anchor: &Token, name: &str) -> Self {
        let mut pos = anchor.pos();
        if let Some(offset) = pos.line_text.get(pos.column..).and_then(|rest| rest.find(name)) {
            pos.column += offset;
        }
        Self::UndefinedVariable { name: name.to_owned(),
                                  pos }
    }

    pub(crate) fn missing_argument(function: &Token, found: &Token) -> Self {
        if found.is_eof() {
            Self::MissingArgument { name:  function.text(),
                                    found: None,
                                    pos:   function.pos(), }
        } else if found.is_newline() {
            Self::MissingArgument { name:  function.text(),
                                    found: None,
                                    pos:   found.pos(), }
        } else {
            Self::MissingArgument { name:  function.text(),
                                    found: Some(found.text()),
                                    pos:   found.pos(), }
        }
    }

    pub(crate) fn not_enough_arguments(function: &Token, arity: usize) -> Self {
        Self::NotEnoughArguments { name:  function.text(),
                                   arity,
                                   pos:   function.pos(), }
    }

    pub(crate) fn too_many_arguments(function: &Token, arity: usize) -> Self {
        Self::TooManyArguments { name:  function.text(),
                                 arity,
                                 pos:   function.pos(), }
    }

    pub(crate) fn multi_arg_without_parens(function: &Token, arity: usize) -> Self {
        Self::MultiArgWithoutParens { name:  function.text(),
                                      arity,
                                      pos:   function.pos(), }
    }

    pub(crate) fn empty_argument(token: &Token) -> Self {
        Self::EmptyArgument { pos: token.pos() }
    }
}

/// Renders the `--> at line N:` / source line / caret block shared by every
/// diagnostic. The note is placed after the caret on the last line, which
/// carries no trailing newline.
fn caret_block(f: &mut std::fmt::Formatter<'_>, pos: &SourcePos, note: &str) -> std::fmt::Result {
    writeln!(f, "--> at line {}:", pos.line)?;
    writeln!(f, "    {}", pos.line_text)?;
    write!(f, "    {}^-- {}", " ".repeat(pos.column), note)
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, pos } => {
                writeln!(f, "Parse Error: Unexpected token '{token}'")?;
                caret_block(f, pos, "This should not be here")
            },

            Self::InvalidStart { token, pos } => {
                writeln!(f,
                         "Parse Error: Invalid start of an expression. Cannot begin with token \
                          '{token}'.")?;
                caret_block(f, pos, "An expression cannot start here")
            },

            Self::MissingParen { open, found } => {
                writeln!(f,
                         "Parse Error: Missing closing ')' for parenthesis that started on line \
                          {}.",
                         open.line)?;
                caret_block(f, open, "This parenthesis was never closed.")?;
                writeln!(f)?;
                writeln!(f)?;
                match found {
                    Some((token, pos)) => {
                        writeln!(f, "Instead, found '{token}' here:")?;
                        caret_block(f, pos, "Expected ')'")
                    },
                    None => {
                        write!(f, "Instead, the input ended before the parenthesis was closed.")
                    },
                }
            },

            Self::MissingOperandForPrefix { op, pos } => {
                writeln!(f,
                         "Parse Error: Prefix operator '{op}' is missing an expression on its \
                          right-hand side.")?;
                caret_block(f, pos, "An expression was expected to follow this operator")
            },

            Self::MissingRhs { op, implicit, pos } => {
                let implicit = if *implicit { "implicit " } else { "" };
                writeln!(f,
                         "Parse Error: Infix operator '{implicit}{op}' is missing a right-hand \
                          side expression.")?;
                caret_block(f, pos, "An expression was expected to follow this operator")
            },

            Self::MissingAssignmentRhs { pos } => {
                writeln!(f,
                         "Parse Error: Assignment operator '=' is missing a right-hand side \
                          expression.")?;
                caret_block(f, pos, "An expression was expected to follow the assignment.")
            },

            Self::EmptyParen { pos } => {
                writeln!(f,
                         "Parse Error: An expression was expected inside parentheses, but none \
                          was found.")?;
                caret_block(f, pos, "Expected an expression after this parenthesis")
            },

            Self::MissingOperator { previous, found, pos } => {
                writeln!(f, "Parse Error: Missing operator between '{previous}' and '{found}'.")?;
                caret_block(f, pos, "An operator was expected here.")
            },

            Self::MultilineWithoutParen { pos } => {
                writeln!(f, "Parse Error: Multiline expressions must be enclosed in parentheses.")?;
                caret_block(f, pos, "An expression cannot be split across lines here.")?;
                writeln!(f)?;
                write!(f,
                       "    {}   Consider wrapping the entire expression in parentheses `()`.",
                       " ".repeat(pos.column))
            },

            Self::InvalidAssignmentTarget { pos } => {
                writeln!(f, "Parse Error: Invalid target for assignment.")?;
                caret_block(f, pos, "Cannot assign to this expression.")
            },

            Self::AssignmentToConstant { name, pos } => {
                writeln!(f, "Parse Error: Cannot assign to predefined constant '{name}'.")?;
                caret_block(f, pos, "This name is reserved")
            },

            Self::AssignmentToBuiltinFunction { name, pos } => {
                writeln!(f, "Parse Error: Cannot redefine built-in function '{name}'.")?;
                caret_block(f, pos, "This name is reserved")
            },

            Self::UndefinedVariable { name, pos } => {
                writeln!(f, "Parse Error: Use of undefined variable '{name}'.")?;
                caret_block(f, pos, "This variable has not been defined")
            },

            Self::MissingArgument { name, found, pos } => {
                match found {
                    Some(token) => writeln!(f,
                                            "Parse Error: Expected an argument for function \
                                             '{name}', but found '{token}' instead.")?,
                    None => writeln!(f,
                                     "Parse Error: Expected an argument for function '{name}' \
                                      but reached the end of the input.")?,
                }
                caret_block(f, pos, "Here")
            },

            Self::NotEnoughArguments { name, arity, pos } => {
                writeln!(f, "Parse Error: Function call without sufficient arguments.")?;
                caret_block(f, pos, &format!("'{name}' expects {arity} arguments."))
            },

            Self::TooManyArguments { name, arity, pos } => {
                writeln!(f, "Parse Error: Function call with too many arguments.")?;
                caret_block(f, pos, &format!("'{name}' expects {arity} arguments."))
            },

            Self::MultiArgWithoutParens { name, arity, pos } => {
                writeln!(f, "Parse Error: Multi argument function called without parentheses.")?;
                caret_block(f,
                            pos,
                            &format!("'{name}' expects {arity} arguments. Cannot call without \
                                      parentheses."))
            },

            Self::EmptyArgument { pos } => {
                writeln!(f,
                         "Parse Error: An expression was expected for an argument, but none was \
                          found.")?;
                caret_block(f, pos, "Expected an argument here")
            },
        }
    }
}

impl std::error::Error for ParseError {}
