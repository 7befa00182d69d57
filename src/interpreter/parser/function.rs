use crate::{ast::Node,
            error::ParseError,
            interpreter::{lexer::{Token, TokenKind, TokenStream},
                          parser::{Parser,
                                   core::{PREFIX_CALL_RBP, ParseResult}}}};

impl Parser {
    /// Parses a call of a known function name, in either form. The caller
    /// has already resolved the name against the built-in and user tables
    /// and passes the arity along.
    ///
    /// Standard form `name(...)`: the matching closing parenthesis is
    /// located with a balanced scan and deleted from the stream, and the
    /// argument span is parsed through sub-lexers, one comma-delimited slot
    /// at a time. Prefix form `name arg` is only legal for arity-1
    /// functions; the argument is parsed at the prefix-call binding power.
    pub(crate) fn parse_function(&mut self,
                                 lexer: &mut TokenStream,
                                 token: &Token,
                                 arity: usize)
                                 -> ParseResult<Node> {
        let name = token.text();

        if !matches!(lexer.peek(0).kind, TokenKind::LParen) {
            if arity > 1 {
                return Err(ParseError::multi_arg_without_parens(token, arity));
            }
            let Some(arg) = self.parse_expression(lexer, PREFIX_CALL_RBP)? else {
                return Err(ParseError::missing_argument(token, lexer.peek(0)));
            };
            return Ok(Node::Function { name, args: vec![arg] });
        }

        self.paren_depth += 1;
        let open = lexer.next();
        while lexer.peek(0).is_newline() {
            lexer.skip(1);
        }

        let Some(close_index) = lexer.matching_close_paren() else {
            return Err(ParseError::missing_paren(&open, &Token::eof()));
        };
        if close_index == 0 {
            return Err(ParseError::empty_paren(&open));
        }

        let mut args_lexer = lexer.sub_lexer(close_index);
        lexer.remove_token(close_index);

        let mut args = Vec::new();
        let mut last_comma: Option<Token> = None;

        for _ in 1..arity {
            let Some(comma_index) = self.next_comma(&args_lexer) else {
                return Err(ParseError::not_enough_arguments(token, arity));
            };
            let comma = args_lexer.peek(comma_index).clone();
            let mut slot_lexer = args_lexer.sub_lexer(comma_index);
            if slot_lexer.peek(0).is_eof() {
                return Err(ParseError::empty_argument(&comma));
            }
            args_lexer.skip(comma_index + 1);

            let Some(arg) = self.parse_expression(&mut slot_lexer, 0)? else {
                return Err(if slot_lexer.peek(0).is_eof() {
                               ParseError::empty_argument(&comma)
                           } else {
                               ParseError::invalid_start(slot_lexer.peek(0))
                           });
            };
            args.push(arg);
            last_comma = Some(comma);
        }

        let anchor = last_comma.unwrap_or_else(|| open.clone());
        if args_lexer.peek(0).is_eof() {
            return Err(ParseError::empty_argument(&anchor));
        }
        if self.next_comma(&args_lexer).is_some() {
            return Err(ParseError::too_many_arguments(token, arity));
        }
        let Some(last) = self.parse_expression(&mut args_lexer, 0)? else {
            return Err(if args_lexer.peek(0).is_eof() {
                           ParseError::empty_argument(&anchor)
                       } else {
                           ParseError::invalid_start(args_lexer.peek(0))
                       });
        };
        args.push(last);

        lexer.skip(close_index);
        if matches!(lexer.peek(0).kind, TokenKind::Number(_) | TokenKind::Word(_)) {
            lexer.add_token(Token::implicit_mul(token.line, token.column, token.line_text.clone()));
        }
        self.paren_depth -= 1;

        Ok(Node::Function { name, args })
    }

    /// Parses `d/dvar(...)` after its head token has been consumed. The
    /// argument must be parenthesized; the result holds the differentiation
    /// variable and the wrapped expression. Differentiation itself happens
    /// in the symbolic evaluator.
    pub(crate) fn parse_derivative(&mut self,
                                   lexer: &mut TokenStream,
                                   token: &Token)
                                   -> ParseResult<Node> {
        let TokenKind::Derivative(var) = &token.kind else {
            return Err(ParseError::unexpected_token(token));
        };

        if !matches!(lexer.peek(0).kind, TokenKind::LParen) {
            return Err(ParseError::missing_argument(token, lexer.peek(0)));
        }

        self.paren_depth += 1;
        let open = lexer.next();
        let inner = self.parse_expression(lexer, 0)?;

        if !matches!(lexer.peek(0).kind, TokenKind::RParen) {
            return Err(match inner {
                           None => ParseError::empty_paren(&open),
                           Some(_) => ParseError::missing_paren(&open, lexer.peek(0)),
                       });
        }
        lexer.skip(1);
        self.paren_depth -= 1;

        let Some(inner) = inner else {
            return Err(ParseError::empty_paren(&open));
        };

        if matches!(lexer.peek(0).kind, TokenKind::Number(_) | TokenKind::Word(_)) {
            lexer.add_token(Token::implicit_mul(token.line, token.column, token.line_text.clone()));
        }

        Ok(Node::Derivative { var:  var.clone(),
                              expr: Box::new(inner), })
    }

    /// Finds the next top-level comma in an argument span.
    ///
    /// A comma belonging to a nested multi-argument call must not split the
    /// current slot, so every known function name encountered adds
    /// `arity − 1` commas to skip. This assumes commas only ever come from
    /// function calls, which holds for this grammar.
    pub(crate) fn next_comma(&self, lexer: &TokenStream) -> Option<usize> {
        let mut to_skip = 0usize;
        let mut index = 0usize;
        loop {
            match &lexer.peek(index).kind {
                TokenKind::Eof => return None,
                TokenKind::Word(name) => {
                    if let Some(arity) = self.function_arity(name) {
                        to_skip += arity - 1;
                    }
                },
                TokenKind::Comma => {
                    if to_skip == 0 {
                        return Some(index);
                    }
                    to_skip -= 1;
                },
                _ => {},
            }
            index += 1;
        }
    }
}
