/// Lexical errors.
///
/// The lexer has exactly one failure mode: a character no token category
/// matches. Lexing is all-or-nothing, so a single lexical error voids the
/// whole token stream.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while parsing a token stream:
/// syntax mistakes, malformed calls, invalid assignment targets, and
/// undefined-variable uses. Every variant carries enough source context to
/// render a caret diagnostic without re-scanning the input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a statement
/// tree, such as division by zero or references to names that were never
/// defined.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::{ParseError, SourcePos};
pub use runtime_error::RuntimeError;
