//! Token model shared by the lexer and the parser
//!
//! A [`Token`] is a classified slice of the source buffer: its [`TokenKind`],
//! the exact text it covers (borrowed, never copied) and the line/column where
//! it starts. Keywords are recognized through [`KEYWORDS`]. The lexer scans
//! punctuators with its own `match`; [`PUNCTUATORS`] lists the same
//! spellings for display and highlighting, and a lexer test keeps the two in
//! step.

use super::ast::SourceLocation;
use std::fmt;

/// Every kind of token the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and names
    Identifier,
    IntConst,
    FloatConst,

    // Keywords
    KwInt,
    KwFloat,
    KwVoid,
    KwConst,
    KwIf,
    KwElse,
    KwWhile,
    KwBreak,
    KwContinue,
    KwReturn,

    // Punctuation
    LParen,   // (
    RParen,   // )
    LBrace,   // {
    RBrace,   // }
    LBracket, // [
    RBracket, // ]
    Comma,    // ,
    Semi,     // ;

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Assignment and comparison
    Assign,    // =
    EqEq,      // ==
    NotEq,     // !=
    Less,      // <
    Greater,   // >
    LessEq,    // <=
    GreaterEq, // >=

    // Logical
    AmpAmp,   // &&
    PipePipe, // ||
    Bang,     // !

    Eof,
    Unknown,
}

/// Keyword spellings, looked up after an identifier-shaped run is scanned.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("int", TokenKind::KwInt),
    ("float", TokenKind::KwFloat),
    ("void", TokenKind::KwVoid),
    ("const", TokenKind::KwConst),
    ("if", TokenKind::KwIf),
    ("else", TokenKind::KwElse),
    ("while", TokenKind::KwWhile),
    ("break", TokenKind::KwBreak),
    ("continue", TokenKind::KwContinue),
    ("return", TokenKind::KwReturn),
];

/// Punctuator spellings, two-character entries first.
pub const PUNCTUATORS: &[(&str, TokenKind)] = &[
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::NotEq),
    ("<=", TokenKind::LessEq),
    (">=", TokenKind::GreaterEq),
    ("&&", TokenKind::AmpAmp),
    ("||", TokenKind::PipePipe),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    (",", TokenKind::Comma),
    (";", TokenKind::Semi),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("=", TokenKind::Assign),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("!", TokenKind::Bang),
];

impl TokenKind {
    /// Internal name of the kind, used by the token table and debug output.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::IntConst => "int_const",
            TokenKind::FloatConst => "float_const",
            TokenKind::KwInt => "kw_int",
            TokenKind::KwFloat => "kw_float",
            TokenKind::KwVoid => "kw_void",
            TokenKind::KwConst => "kw_const",
            TokenKind::KwIf => "kw_if",
            TokenKind::KwElse => "kw_else",
            TokenKind::KwWhile => "kw_while",
            TokenKind::KwBreak => "kw_break",
            TokenKind::KwContinue => "kw_continue",
            TokenKind::KwReturn => "kw_return",
            TokenKind::LParen => "l_paren",
            TokenKind::RParen => "r_paren",
            TokenKind::LBrace => "l_brace",
            TokenKind::RBrace => "r_brace",
            TokenKind::LBracket => "l_square",
            TokenKind::RBracket => "r_square",
            TokenKind::Comma => "comma",
            TokenKind::Semi => "semi",
            TokenKind::Plus => "plus",
            TokenKind::Minus => "minus",
            TokenKind::Star => "star",
            TokenKind::Slash => "slash",
            TokenKind::Percent => "percent",
            TokenKind::Assign => "equal",
            TokenKind::EqEq => "equalequal",
            TokenKind::NotEq => "exclaimequal",
            TokenKind::Less => "less",
            TokenKind::Greater => "greater",
            TokenKind::LessEq => "lessequal",
            TokenKind::GreaterEq => "greaterequal",
            TokenKind::AmpAmp => "ampamp",
            TokenKind::PipePipe => "pipepipe",
            TokenKind::Bang => "exclaim",
            TokenKind::Eof => "eof",
            TokenKind::Unknown => "unknown",
        }
    }

    pub fn keyword_spelling(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(spelling, _)| *spelling)
    }

    pub fn punctuator_spelling(self) -> Option<&'static str> {
        PUNCTUATORS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(spelling, _)| *spelling)
    }

    /// Reclassify an identifier-shaped word as a keyword, if it is one.
    pub fn from_keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == word)
            .map(|(_, kind)| *kind)
    }

    /// `int`, `float` or `void`
    pub fn is_type_keyword(self) -> bool {
        matches!(self, TokenKind::KwInt | TokenKind::KwFloat | TokenKind::KwVoid)
    }

    /// Tokens that can only appear at the start of a statement or declaration.
    /// Used as resynchronization points after a syntax error.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::KwInt
                | TokenKind::KwFloat
                | TokenKind::KwVoid
                | TokenKind::KwConst
                | TokenKind::KwIf
                | TokenKind::KwWhile
                | TokenKind::KwBreak
                | TokenKind::KwContinue
                | TokenKind::KwReturn
                | TokenKind::LBrace
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(spelling) = self.keyword_spelling().or(self.punctuator_spelling()) {
            return write!(f, "'{}'", spelling);
        }
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::IntConst => write!(f, "integer constant"),
            TokenKind::FloatConst => write!(f, "floating constant"),
            TokenKind::Eof => write!(f, "end of file"),
            _ => write!(f, "unknown token"),
        }
    }
}

/// A classified slice of the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub location: SourceLocation,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, location: SourceLocation) -> Self {
        Self {
            kind,
            text,
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_not(&self, kind: TokenKind) -> bool {
        self.kind != kind
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::IntConst | TokenKind::FloatConst => {
                write!(f, "{} {}", self.kind, self.text)
            }
            TokenKind::Unknown => write!(f, "unknown character '{}'", self.text),
            kind => write!(f, "{}", kind),
        }
    }
}
