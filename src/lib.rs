//! # symplify
//!
//! symplify is a mathematical expression front end written in Rust.
//! It turns text into annotated syntax trees, normalizes them into a
//! canonical algebraic form, and can evaluate, expand and differentiate
//! the result.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{evaluator::Evaluator, lexer::tokenize, parser::Parser};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and the operator kind that
/// represent the syntactic structure of source code as a tree. The tree is
/// built by the parser, normalized by the simplifier, and traversed by the
/// evaluator and the printers.
///
/// # Responsibilities
/// - Defines the node variants for all language constructs.
/// - Keeps operator kinds a closed enum so dispatch stays exhaustive.
/// - Provides the shared "is this a number" predicates.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while processing
/// source code. Lexical and syntactic errors carry source positions and
/// render caret diagnostics; runtime errors name the offending construct.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line, column and line text for parse-time diagnostics.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire processing pipeline.
///
/// This module ties together lexing, parsing, simplification, evaluation,
/// symbolic expansion and printing to provide a complete front end for the
/// expression language.
///
/// # Responsibilities
/// - Coordinates the core components: lexer, parser, simplifier.
/// - Hosts the collaborators consuming the tree: evaluator, symbolic
///   evaluator, printers.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General numeric utilities.
///
/// Helpers used across phases: the factorial over doubles and numeric text
/// rendering.
pub mod util;

/// Parses a whole program and returns its normalized statement trees.
///
/// Convenience entry point over [`tokenize`] and [`Parser::parse`] for
/// callers that want the trees rather than evaluation.
///
/// # Errors
/// Returns the lexical or parse error as a boxed error.
///
/// # Examples
/// ```
/// use symplify::parse_program;
///
/// let statements = parse_program("a = 10 + 5\n2 * a").unwrap();
/// assert_eq!(statements.len(), 2);
/// ```
pub fn parse_program(source: &str) -> Result<Vec<ast::Node>, Box<dyn std::error::Error>> {
    let mut lexer = tokenize(source)?;
    let mut parser = Parser::new();
    Ok(parser.parse(&mut lexer)?)
}

/// Runs a program and optionally prints the final value.
///
/// Parses and evaluates all statements in the provided source using a
/// fresh environment. With `auto_print`, the last value produced by any
/// statement is written to standard output.
///
/// # Errors
/// Returns an error if lexing, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use symplify::get_result;
///
/// // Simple program: parses, simplifies and evaluates cleanly.
/// let res = get_result("x = 2 + 2\nx * 10", false);
/// assert!(res.is_ok());
///
/// // 'y' was never defined, so parsing reports an error.
/// let res = get_result("z = y + 1", false);
/// assert!(res.is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut lexer = tokenize(source)?;
    let mut parser = Parser::new();
    let statements = parser.parse(&mut lexer)?;

    let mut evaluator = Evaluator::new();
    let mut result = None;

    for statement in &statements {
        if let Some(value) = evaluator.evaluate(statement)? {
            result = Some(value);
        }
    }

    if auto_print && let Some(value) = result {
        println!("{value}");
    }

    Ok(())
}
