//! Lexer (tokenizer) for SysY source code
//!
//! Converts a fully buffered source text into [`Token`]s, one per call to
//! [`Lexer::next_token`]. Tokens borrow their text from the buffer, so the
//! buffer must outlive every token produced from it.
//!
//! The lexer never fails: an unterminated block comment or a character that
//! starts no token is recorded as a [`LexError`] and scanning continues, so
//! the caller always reaches an end-of-file token.

use super::ast::SourceLocation;
use super::token::{Token, TokenKind};
use log::debug;
use thiserror::Error;

/// What went wrong while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at {location}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

/// Lexer for SysY source code
pub struct Lexer<'src> {
    source: &'src str,
    position: usize,
    line: usize,
    column: usize,
    errors: Vec<LexError>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
            errors: Vec::new(),
        }
    }

    /// Tokenize the remaining input. The last token is always `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token<'src>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            tokens.push(token);
            if token.is(TokenKind::Eof) {
                break;
            }
        }

        debug!(
            "lexed {} tokens, {} lexical errors",
            tokens.len(),
            self.errors.len()
        );
        tokens
    }

    /// Scan one token. Once the input is exhausted every call returns `Eof`.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_whitespace_and_comments();

        let loc = self.current_location();
        let start = self.position;

        let Some(ch) = self.peek() else {
            return Token::new(TokenKind::Eof, &self.source[start..], loc);
        };

        let kind = match ch {
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(),
            '0'..='9' => self.number_literal(),
            '.' if self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.number_literal()
            }
            _ => self.punctuator(),
        };

        if kind == TokenKind::Unknown {
            self.errors.push(LexError {
                kind: LexErrorKind::UnexpectedChar(ch),
                location: loc,
            });
        }

        Token::new(kind, &self.source[start..self.position], loc)
    }

    /// Diagnostics collected so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Scan identifier or keyword
    fn identifier_or_keyword(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        TokenKind::from_keyword(&self.source[start..self.position]).unwrap_or(TokenKind::Identifier)
    }

    /// Scan a numeric literal. Only the int/float classification is decided
    /// here; the text is kept verbatim for the parser to convert.
    fn number_literal(&mut self) -> TokenKind {
        let mut is_float = false;

        if self.peek() == Some('0') && matches!(self.peek_ahead(1), Some('x' | 'X')) {
            self.advance(); // '0'
            self.advance(); // 'x'
            is_float |= self.digits_and_dots(|c| c.is_ascii_hexdigit());

            if matches!(self.peek(), Some('p' | 'P')) {
                self.exponent();
                is_float = true;
            }
        } else {
            is_float |= self.digits_and_dots(|c| c.is_ascii_digit());

            if matches!(self.peek(), Some('e' | 'E')) {
                self.exponent();
                is_float = true;
            }
        }

        if is_float {
            TokenKind::FloatConst
        } else {
            TokenKind::IntConst
        }
    }

    /// Consume a run of digits and dots; returns whether a dot was seen.
    fn digits_and_dots(&mut self, is_digit: impl Fn(char) -> bool) -> bool {
        let mut saw_dot = false;
        while let Some(ch) = self.peek() {
            if is_digit(ch) {
                self.advance();
            } else if ch == '.' {
                saw_dot = true;
                self.advance();
            } else {
                break;
            }
        }
        saw_dot
    }

    /// Exponent marker, optional sign, decimal digit run
    fn exponent(&mut self) {
        self.advance();
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Scan a punctuator. Two-character operators are checked before their
    /// one-character prefixes.
    fn punctuator(&mut self) -> TokenKind {
        let Some(ch) = self.advance() else {
            return TokenKind::Eof;
        };

        match ch {
            '=' => self.followed_by('=', TokenKind::EqEq, TokenKind::Assign),
            '!' => self.followed_by('=', TokenKind::NotEq, TokenKind::Bang),
            '<' => self.followed_by('=', TokenKind::LessEq, TokenKind::Less),
            '>' => self.followed_by('=', TokenKind::GreaterEq, TokenKind::Greater),
            '&' => self.followed_by('&', TokenKind::AmpAmp, TokenKind::Unknown),
            '|' => self.followed_by('|', TokenKind::PipePipe, TokenKind::Unknown),
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semi,
            _ => TokenKind::Unknown,
        }
    }

    fn followed_by(&mut self, second: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some(second) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment();
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip multi-line comment (/* ... */). Comments do not nest.
    fn skip_block_comment(&mut self) {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return;
            }
            self.advance();
        }

        self.errors.push(LexError {
            kind: LexErrorKind::UnterminatedBlockComment,
            location: start_loc,
        });
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.source[self.position..].chars().nth(n)
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
