use crate::{ast::{Node, Op},
            error::ParseError,
            interpreter::{lexer::{Token, TokenKind, TokenStream},
                          parser::Parser}};

/// Result type used throughout the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Right binding power of the prefix sign operators `+`/`-`.
pub(crate) const PREFIX_SIGN_RBP: u8 = 4;
/// Right binding power of a paren-less prefix function call like `sin x`.
/// Low enough that `sin x + y` parses as `(sin x) + y`, high enough that
/// `sin x ^ 2` keeps the power inside the argument.
pub(crate) const PREFIX_CALL_RBP: u8 = 2;

/// The role an operator token plays in the right-hand-side loop, with its
/// binding powers. Tie-breaks encode associativity: `^` is right-associative
/// because its right power is below its left power.
pub(crate) enum InfixPower {
    /// A binary operator with left and right binding power.
    Binary(Op, u8, u8),
    /// A postfix operator with only a left binding power.
    Postfix(u8),
}

/// Looks up the binding powers of an infix or postfix token. Tokens that
/// cannot continue an expression (`=`, `)`, words) yield `None`, which ends
/// the right-hand-side loop.
pub(crate) fn infix_power(kind: &TokenKind) -> Option<InfixPower> {
    match kind {
        TokenKind::Plus => Some(InfixPower::Binary(Op::Add, 1, 2)),
        TokenKind::Minus => Some(InfixPower::Binary(Op::Sub, 1, 2)),
        TokenKind::Star => Some(InfixPower::Binary(Op::Mul, 3, 4)),
        TokenKind::Slash => Some(InfixPower::Binary(Op::Div, 3, 4)),
        TokenKind::Caret => Some(InfixPower::Binary(Op::Pow, 5, 4)),
        TokenKind::Bang => Some(InfixPower::Postfix(5)),
        _ => None,
    }
}

impl Parser {
    /// Parses one expression with precedence climbing: resolve a left-hand
    /// side, then extend it while the next operator binds at least as
    /// tightly as `min_bp`.
    ///
    /// Returns `Ok(None)` when no expression starts at the current token;
    /// the caller decides whether that is an error and which one.
    pub(crate) fn parse_expression(&mut self,
                                   lexer: &mut TokenStream,
                                   min_bp: u8)
                                   -> ParseResult<Option<Node>> {
        let Some((lhs, start)) = self.parse_lhs(lexer)? else {
            return Ok(None);
        };
        self.parse_rhs(lexer, lhs, &start, min_bp).map(Some)
    }

    /// Resolves a left-hand side, in priority order: a parenthesized group,
    /// a known function name, a prefix sign, a derivative head, or an
    /// atomic number/variable. Newlines are skipped first when inside
    /// parentheses; outside, they end the expression.
    fn parse_lhs(&mut self, lexer: &mut TokenStream) -> ParseResult<Option<(Node, Token)>> {
        while self.paren_depth > 0 && lexer.peek(0).is_newline() {
            lexer.skip(1);
        }

        let token = lexer.peek(0).clone();
        let starts_expression = matches!(token.kind,
                                         TokenKind::Number(_)
                                         | TokenKind::Word(_)
                                         | TokenKind::LParen
                                         | TokenKind::Derivative(_))
                                || token.is_prefix();
        if !starts_expression {
            return Ok(None);
        }
        lexer.skip(1);

        let lhs = match &token.kind {
            TokenKind::LParen => self.parse_parentheses(lexer, &token)?,
            TokenKind::Word(name) => match self.function_arity(name) {
                Some(arity) => self.parse_function(lexer, &token, arity)?,
                // An unknown callable is a variable here; the statement's
                // free-variable check reports it.
                None => Node::Variable(name.clone()),
            },
            TokenKind::Plus | TokenKind::Minus => self.parse_prefix(lexer, &token)?,
            TokenKind::Derivative(_) => self.parse_derivative(lexer, &token)?,
            TokenKind::Number(text) => Node::Number(text.clone()),
            _ => return Ok(None),
        };

        Ok(Some((lhs, token)))
    }

    /// The right-hand-side loop: while the next operator's left binding
    /// power is at least `min_bp`, attach it. Postfix operators attach
    /// without recursing; binary operators recurse at their right binding
    /// power and fail with a positional diagnostic when nothing follows.
    fn parse_rhs(&mut self,
                 lexer: &mut TokenStream,
                 mut lhs: Node,
                 start: &Token,
                 min_bp: u8)
                 -> ParseResult<Node> {
        loop {
            let peek = lexer.peek(0);
            if peek.is_eof() {
                break;
            }
            if peek.is_newline() {
                if self.paren_depth == 0 {
                    break;
                }
                lexer.skip(1);
                continue;
            }
            if matches!(peek.kind, TokenKind::RParen) {
                break;
            }

            let implicit = self.prepare_operator(lexer, start)?;

            let Some(power) = infix_power(&lexer.peek(0).kind) else {
                break;
            };
            match power {
                InfixPower::Postfix(lbp) => {
                    if lbp < min_bp {
                        break;
                    }
                    lexer.skip(1);
                    lhs = Node::unary(Op::Fact, lhs);
                    let peek = lexer.peek(0).clone();
                    if matches!(peek.kind, TokenKind::Word(_) | TokenKind::Number(_)) {
                        lexer.add_token(Token::implicit_mul(start.line,
                                                            peek.column.saturating_sub(1),
                                                            start.line_text.clone()));
                    }
                },
                InfixPower::Binary(op, lbp, rbp) => {
                    if lbp < min_bp {
                        break;
                    }
                    let op_token = lexer.next();
                    let Some(rhs) = self.parse_expression(lexer, rbp)? else {
                        return Err(ParseError::missing_rhs(&op_token, implicit));
                    };
                    lhs = Node::binary(op, lhs, rhs);
                },
            }
        }
        Ok(lhs)
    }

    /// Decides how the token after the current left-hand side combines with
    /// it. A `(`, or a word following a numeric atom, synthesizes an
    /// implicit `*` into the stream (reported as `implicit` in later
    /// diagnostics); other adjacent atoms are a missing-operator error.
    ///
    /// The injected token stays in the stream even if the caller's binding
    /// power then ends its loop, so an enclosing loop picks it up.
    fn prepare_operator(&mut self, lexer: &mut TokenStream, start: &Token) -> ParseResult<bool> {
        let peek = lexer.peek(0).clone();

        if matches!(peek.kind, TokenKind::LParen) {
            lexer.add_token(Token::implicit_mul(start.line,
                                                peek.column.saturating_sub(1),
                                                start.line_text.clone()));
            return Ok(true);
        }
        if peek.is_symbol() {
            return Ok(false);
        }
        if matches!(peek.kind, TokenKind::Word(_)) && matches!(start.kind, TokenKind::Number(_)) {
            lexer.add_token(Token::implicit_mul(start.line,
                                                peek.column.saturating_sub(1),
                                                start.line_text.clone()));
            return Ok(true);
        }

        Err(if matches!(peek.kind, TokenKind::Comma) {
                ParseError::unexpected_token(&peek)
            } else {
                ParseError::missing_operator(start, &peek)
            })
    }

    /// Parses a parenthesized group after its `(` has been consumed. The
    /// group's value is the inner expression itself; no wrapper node is
    /// produced, so redundant parentheses collapse. If an atom follows the
    /// closing `)`, an implicit `*` is injected.
    pub(crate) fn parse_parentheses(&mut self,
                                    lexer: &mut TokenStream,
                                    open: &Token)
                                    -> ParseResult<Node> {
        self.paren_depth += 1;
        let inner = self.parse_expression(lexer, 0)?;

        if !matches!(lexer.peek(0).kind, TokenKind::RParen) {
            return Err(match inner {
                           None => ParseError::invalid_start(lexer.peek(0)),
                           Some(_) => ParseError::missing_paren(open, lexer.peek(0)),
                       });
        }
        lexer.skip(1);
        self.paren_depth -= 1;

        let Some(inner) = inner else {
            return Err(ParseError::empty_paren(open));
        };

        if matches!(lexer.peek(0).kind, TokenKind::Number(_) | TokenKind::Word(_)) {
            lexer.add_token(Token::implicit_mul(open.line, open.column, open.line_text.clone()));
        }
        Ok(inner)
    }

    /// Parses the operand of a prefix `+`/`-` at the sign's right binding
    /// power and wraps it in a unary node.
    fn parse_prefix(&mut self, lexer: &mut TokenStream, token: &Token) -> ParseResult<Node> {
        let op = if matches!(token.kind, TokenKind::Plus) { Op::Add } else { Op::Sub };

        match self.parse_expression(lexer, PREFIX_SIGN_RBP)? {
            Some(arg) => Ok(Node::unary(op, arg)),
            None => Err(if lexer.peek(0).is_eof() {
                            ParseError::missing_operand_for_prefix(token)
                        } else {
                            ParseError::invalid_start(lexer.peek(0))
                        }),
        }
    }
}
