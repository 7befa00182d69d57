use crate::{ast::Node,
            error::ParseError,
            interpreter::{builtins::builtin_arity,
                          lexer::{TokenKind, TokenStream},
                          parser::{Parser, core::ParseResult, is_predefined_constant}}};

impl Parser {
    /// Parses a single statement: a function definition, a variable
    /// assignment, or a plain expression.
    ///
    /// A function definition is recognized by lookahead
    /// (`WORD ( WORD (, WORD)* ) =`, newlines tolerated) before anything is
    /// consumed. Whatever form the statement takes, every free variable in
    /// it must already be defined; the first offender is reported with its
    /// source position.
    ///
    /// `continuation` is true when a previous statement already ended on an
    /// earlier line; a statement that then opens with an infix-only
    /// operator is a multi-line expression missing its parentheses, not a
    /// generic stray token.
    pub(crate) fn parse_statement(&mut self,
                                  lexer: &mut TokenStream,
                                  continuation: bool)
                                  -> ParseResult<Node> {
        let anchor = lexer.peek(0).clone();
        let is_definition = self.is_function_definition(lexer);
        let mut signature = None;
        if is_definition {
            if builtin_arity(&anchor.text()).is_some() {
                return Err(ParseError::assignment_to_builtin(&anchor));
            }
            signature = Some(parse_function_header(lexer));
        }

        let Some(body) = self.parse_expression(lexer, 0)? else {
            let offending = lexer.peek(0);
            let splits_expression = matches!(offending.kind,
                                             TokenKind::Star | TokenKind::Slash | TokenKind::Caret);
            return Err(if continuation && splits_expression {
                           ParseError::multiline_without_paren(offending)
                       } else {
                           ParseError::unexpected_token(offending)
                       });
        };

        if matches!(lexer.peek(0).kind, TokenKind::Equals) && !is_definition {
            let Node::Variable(target) = &body else {
                return Err(ParseError::invalid_assignment_target(lexer.peek(0)));
            };
            let target = target.clone();
            if is_predefined_constant(&target) {
                return Err(ParseError::assignment_to_constant(&target, lexer.peek(0)));
            }

            let equals = lexer.next();
            let Some(value) = self.parse_expression(lexer, 0)? else {
                return Err(ParseError::missing_assignment_rhs(&equals));
            };
            if let Some(undefined) = self.first_undefined_variable(&value, &[]) {
                return Err(ParseError::undefined_variable(&equals, &undefined));
            }

            self.variables.insert(target.clone());
            return Ok(Node::Assignment { name:  target,
                                         value: Box::new(value), });
        }

        if let Some((name, params)) = signature {
            if let Some(undefined) = self.first_undefined_variable(&body, &params) {
                return Err(ParseError::undefined_variable(&anchor, &undefined));
            }
            let body = rewrite_parameters(body, &params);
            self.functions.insert(name.clone(), params);
            return Ok(Node::FunctionAssignment { name,
                                                 body: Box::new(body) });
        }

        if let Some(undefined) = self.first_undefined_variable(&body, &[]) {
            return Err(ParseError::undefined_variable(&anchor, &undefined));
        }
        Ok(body)
    }

    /// Looks ahead, without consuming anything, for the function-definition
    /// shape `WORD ( WORD (, WORD)* ) =`. Newlines may appear between any
    /// two tokens of the header. A word that is already a variable or a
    /// predefined constant never starts a definition.
    fn is_function_definition(&self, lexer: &TokenStream) -> bool {
        let TokenKind::Word(name) = &lexer.peek(0).kind else {
            return false;
        };
        if self.variables.contains(name) || is_predefined_constant(name) {
            return false;
        }
        if !matches!(lexer.peek(1).kind, TokenKind::LParen) {
            return false;
        }

        let mut i = 2;
        loop {
            while lexer.peek(i).is_newline() {
                i += 1;
            }
            if !matches!(lexer.peek(i).kind, TokenKind::Word(_)) {
                return false;
            }
            i += 1;
            while lexer.peek(i).is_newline() {
                i += 1;
            }
            if matches!(lexer.peek(i).kind, TokenKind::RParen) {
                i += 1;
                break;
            }
            if !matches!(lexer.peek(i).kind, TokenKind::Comma) {
                return false;
            }
            i += 1;
        }
        while lexer.peek(i).is_newline() {
            i += 1;
        }
        matches!(lexer.peek(i).kind, TokenKind::Equals)
    }

    /// Walks a tree in source order and returns the first `Variable` whose
    /// name is neither a defined variable, a predefined constant, nor one
    /// of `parameters`.
    fn first_undefined_variable(&self, node: &Node, parameters: &[String]) -> Option<String> {
        match node {
            Node::Variable(name) => {
                let known = self.variables.contains(name)
                            || is_predefined_constant(name)
                            || parameters.iter().any(|parameter| parameter == name);
                if known { None } else { Some(name.clone()) }
            },
            Node::Operand { args, .. } | Node::Function { args, .. } => {
                args.iter()
                    .find_map(|child| self.first_undefined_variable(child, parameters))
            },
            Node::Assignment { value: child, .. }
            | Node::FunctionAssignment { body: child, .. }
            | Node::Derivative { expr: child, .. } => {
                self.first_undefined_variable(child, parameters)
            },
            Node::Number(_) | Node::Parameter { .. } => None,
        }
    }
}

/// Consumes a function-definition header through its `=`, returning the
/// function name and the ordered parameter names. Only called after
/// lookahead has validated the shape.
fn parse_function_header(lexer: &mut TokenStream) -> (String, Vec<String>) {
    let name = lexer.next().text();
    lexer.skip(1);

    let mut params = Vec::new();
    loop {
        let token = lexer.next();
        match &token.kind {
            TokenKind::Word(param) => params.push(param.clone()),
            TokenKind::Equals | TokenKind::Eof => break,
            _ => {},
        }
    }
    (name, params)
}

/// Rewrites every `Variable` naming one of `parameters` into a positional
/// `Parameter` node carrying its index in the defining list.
fn rewrite_parameters(node: Node, parameters: &[String]) -> Node {
    match node {
        Node::Variable(name) => match parameters.iter().position(|parameter| *parameter == name) {
            Some(index) => Node::Parameter { index, name },
            None => Node::Variable(name),
        },
        Node::Operand { op, args } => {
            Node::Operand { op,
                            args: args.into_iter()
                                      .map(|arg| rewrite_parameters(arg, parameters))
                                      .collect() }
        },
        Node::Function { name, args } => {
            Node::Function { name,
                             args: args.into_iter()
                                       .map(|arg| rewrite_parameters(arg, parameters))
                                       .collect() }
        },
        Node::Assignment { name, value } => {
            Node::Assignment { name,
                               value: Box::new(rewrite_parameters(*value, parameters)) }
        },
        Node::FunctionAssignment { name, body } => {
            Node::FunctionAssignment { name,
                                       body: Box::new(rewrite_parameters(*body, parameters)) }
        },
        Node::Derivative { var, expr } => {
            Node::Derivative { var,
                               expr: Box::new(rewrite_parameters(*expr, parameters)) }
        },
        leaf @ (Node::Number(_) | Node::Parameter { .. }) => leaf,
    }
}
