use logos::Logos;

use crate::error::{LexError, SourcePos};

/// Classifies a minimal meaningful unit of source text.
///
/// This enum defines every token category the language recognizes. The
/// derived lexer tries the categories in order at each position; the first
/// match wins, which is what resolves `2e3` (a number with an exponent)
/// against `e3` (a word).
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum TokenKind {
    /// Numeric literal tokens such as `3`, `3.14`, `3.` or `6.02e23`. The
    /// matched text is preserved verbatim.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", |lex| lex.slice().to_owned())]
    Number(String),
    /// A derivative head such as `d/dx`; carries only the variable name.
    #[regex(r"d/d[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice()[3..].to_owned())]
    Derivative(String),
    /// Identifier tokens; variable or function names such as `x` or `sin`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_owned())]
    Word(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// A line break. Newlines are real tokens: they separate statements and
    /// are only skippable inside parentheses.
    #[token("\n")]
    Newline,
    /// Blank space, discarded and never emitted.
    #[regex(r"[ \t\r]+", logos::skip)]
    Ignored,
    /// Sentinel returned when reading past the end of the buffer.
    Eof,
}

/// A positioned token.
///
/// Besides its [`TokenKind`], every token carries the 1-based line, the
/// 0-based column and the full text of its source line, so any token can
/// self-render a caret diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What the token is.
    pub kind:      TokenKind,
    /// The 1-based source line.
    pub line:      usize,
    /// The 0-based column within the line.
    pub column:    usize,
    /// The full text of the source line.
    pub line_text: String,
}

impl Token {
    /// The end-of-input sentinel.
    #[must_use]
    pub const fn eof() -> Self {
        Self { kind:      TokenKind::Eof,
               line:      0,
               column:    0,
               line_text: String::new(), }
    }

    /// Builds a `*` token that was not present in the source, for implicit
    /// multiplication.
    #[must_use]
    pub const fn implicit_mul(line: usize, column: usize, line_text: String) -> Self {
        Self { kind: TokenKind::Star,
               line,
               column,
               line_text }
    }

    /// The token's source-text spelling, used in diagnostics.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.kind {
            TokenKind::Number(text) | TokenKind::Word(text) => text.clone(),
            TokenKind::Derivative(var) => format!("d/d{var}"),
            TokenKind::Plus => "+".to_owned(),
            TokenKind::Minus => "-".to_owned(),
            TokenKind::Star => "*".to_owned(),
            TokenKind::Slash => "/".to_owned(),
            TokenKind::Caret => "^".to_owned(),
            TokenKind::Bang => "!".to_owned(),
            TokenKind::Equals => "=".to_owned(),
            TokenKind::LParen => "(".to_owned(),
            TokenKind::RParen => ")".to_owned(),
            TokenKind::Comma => ",".to_owned(),
            TokenKind::Newline => "\n".to_owned(),
            TokenKind::Ignored | TokenKind::Eof => String::new(),
        }
    }

    /// The token's position, packaged for diagnostics.
    #[must_use]
    pub fn pos(&self) -> SourcePos {
        SourcePos { line:      self.line,
                    column:    self.column,
                    line_text: self.line_text.clone(), }
    }

    /// Returns `true` for the end-of-input sentinel.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns `true` for line breaks.
    #[must_use]
    pub const fn is_newline(&self) -> bool {
        matches!(self.kind, TokenKind::Newline)
    }

    /// Returns `true` for operators that may appear in prefix position.
    #[must_use]
    pub const fn is_prefix(&self) -> bool {
        matches!(self.kind, TokenKind::Plus | TokenKind::Minus)
    }

    /// Returns `true` for postfix operators.
    #[must_use]
    pub const fn is_postfix(&self) -> bool {
        matches!(self.kind, TokenKind::Bang)
    }

    /// Returns `true` for the fixed symbol set `+ - * / ^ ! = ( )`.
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self.kind,
                 TokenKind::Plus
                 | TokenKind::Minus
                 | TokenKind::Star
                 | TokenKind::Slash
                 | TokenKind::Caret
                 | TokenKind::Bang
                 | TokenKind::Equals
                 | TokenKind::LParen
                 | TokenKind::RParen)
    }
}

/// A buffer of positioned tokens with parser-facing editing operations.
///
/// Tokens are stored in reverse so the current token sits at the top;
/// `peek`, `skip` and the index-based operations all count from there. The
/// parser may inject synthetic implicit-multiplication tokens and may
/// delete a matched closing parenthesis before recursing into the span it
/// encloses. Sub-lexers are independent cursors over a copied slice;
/// advancing one never affects a sibling.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    eof:    Token,
}

impl TokenStream {
    /// Wraps a list of tokens, first token first.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        tokens.reverse();
        Self { tokens,
               eof: Token::eof() }
    }

    /// Returns the token `n` positions ahead without consuming anything.
    /// Reading past the end yields the [`Token::eof`] sentinel.
    #[must_use]
    pub fn peek(&self, n: usize) -> &Token {
        if n < self.tokens.len() {
            &self.tokens[self.tokens.len() - 1 - n]
        } else {
            &self.eof
        }
    }

    /// Consumes and returns the current token.
    pub fn next(&mut self) -> Token {
        self.tokens.pop().unwrap_or_else(Token::eof)
    }

    /// Discards the next `n` tokens.
    pub fn skip(&mut self, n: usize) {
        for _ in 0..n {
            self.tokens.pop();
        }
    }

    /// Injects a token at the current position.
    pub fn add_token(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Deletes the token `offset` positions ahead. Used to strip a matched
    /// closing parenthesis before a sub-expression is parsed in isolation.
    pub fn remove_token(&mut self, offset: usize) {
        if offset < self.tokens.len() {
            self.tokens.remove(self.tokens.len() - 1 - offset);
        }
    }

    /// Returns the offset of the first token matching `predicate`, if any.
    #[must_use]
    pub fn index_of_first(&self, predicate: impl Fn(&TokenKind) -> bool) -> Option<usize> {
        (0..self.tokens.len()).find(|&n| predicate(&self.peek(n).kind))
    }

    /// Returns the offset of the closing parenthesis matching the current
    /// nesting level, honoring nested `(`.
    #[must_use]
    pub fn matching_close_paren(&self) -> Option<usize> {
        let mut depth = 0usize;
        for n in 0..self.tokens.len() {
            match self.peek(n).kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    if depth == 0 {
                        return Some(n);
                    }
                    depth -= 1;
                },
                _ => {},
            }
        }
        None
    }

    /// Returns an independent cursor over the next `len` tokens without
    /// consuming them from this stream.
    #[must_use]
    pub fn sub_lexer(&self, len: usize) -> Self {
        Self::new((0..len).map(|n| self.peek(n).clone()).collect())
    }

    /// The number of unconsumed tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` when every token has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Converts raw text into a [`TokenStream`].
///
/// Scans left to right, stamping every token with its line, column and full
/// line text. Whitespace is discarded; newlines are emitted. Lexing is
/// all-or-nothing: the first unmatched character fails the whole stream.
///
/// # Errors
/// Returns a [`LexError`] carrying a caret diagnostic for the first
/// character no token category matches.
///
/// # Example
/// ```
/// use symplify::interpreter::lexer::tokenize;
///
/// let stream = tokenize("2 + 3").unwrap();
/// assert_eq!(stream.len(), 3);
///
/// assert!(tokenize("2 @ 3").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<TokenStream, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut line = 1usize;
    let mut line_start = 0usize;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let line_end = source[line_start..].find('\n')
                                           .map_or(source.len(), |offset| line_start + offset);
        let line_text = source[line_start..line_end].to_owned();
        let column = span.start - line_start;

        let Ok(kind) = result else {
            return Err(LexError { character: source[span.start..].chars().next().unwrap_or('\0'),
                                  line,
                                  column,
                                  line_text });
        };

        let is_newline = matches!(kind, TokenKind::Newline);
        tokens.push(Token { kind,
                            line,
                            column,
                            line_text });
        if is_newline {
            line += 1;
            line_start = span.end;
        }
    }

    Ok(TokenStream::new(tokens))
}
