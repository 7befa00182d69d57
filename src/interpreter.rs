/// Shared built-in function table.
///
/// Names, arities and numeric semantics of the built-in functions, in one
/// place so the parser, simplifier and evaluator agree by construction.
pub mod builtins;
/// The evaluator module computes numeric results from statement trees.
///
/// The evaluator walks a tree with a persistent variable/function
/// environment and a call-frame stack for parameter resolution. It is the
/// numeric back end consuming what the parser and simplifier produce.
///
/// # Responsibilities
/// - Evaluates statement trees, performing all supported operations.
/// - Maintains the variable map and the user-function table.
/// - Reports runtime errors such as division by zero or unknown names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads raw source text and produces a buffer of positioned
/// tokens, each corresponding to a meaningful language element: numbers,
/// identifiers, the fixed operator set, commas and newlines. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with type and source
///   location (line, column, full line text).
/// - Exposes the buffer operations the parser needs: lookahead, token
///   injection and removal, balanced-parenthesis scanning, sub-lexers.
/// - Reports a caret diagnostic for invalid input, voiding the stream.
pub mod lexer;
/// The parser module builds statement trees from tokens.
///
/// The parser processes the token stream with precedence climbing and
/// produces one tree per statement, resolving prefix/postfix/infix
/// operators, implicit multiplication, function calls and definitions,
/// assignments, and derivative forms. Completed statements are normalized
/// by the simplifier before they are returned.
///
/// # Responsibilities
/// - Converts tokens into structured statement trees.
/// - Validates grammar, arity and variable definedness, reporting errors
///   with source positions.
/// - Keeps all parse-time state instance-scoped.
pub mod parser;
/// The printer module renders trees back into text.
///
/// Two renderers: the Lisp form, which doubles as the simplifier's
/// canonical grouping key, and a human-readable form that inserts
/// parentheses and explicit `*` only where required.
pub mod printer;
/// The simplifier module normalizes trees into canonical algebraic form.
///
/// A pure tree-to-tree pass: constant folding, like-term and like-factor
/// grouping, power rewrites and the generic identities. Invoked by the
/// parser on every statement and by the symbolic evaluator after every
/// substitution or differentiation step.
pub mod simplifier;
/// The symbolic module expands and differentiates trees.
///
/// Inlines user-defined function calls by positional parameter
/// substitution, substitutes known variables numerically, and implements
/// the differentiation rules behind `d/dx(...)`.
pub mod symbolic;
