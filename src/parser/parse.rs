//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, error recovery and coordination
//! - `declarations`: function definitions and variable declarations
//! - `statements`: blocks and statements (if, while, return, assignment, ...)
//! - `expressions`: expressions, one method per precedence level
//!
//! # Lookahead and recovery
//!
//! The parser pulls one token at a time from its [`Lexer`] and never looks
//! further ahead than the current token. Grammar rules return
//! `Result<_, ParseError>` and propagate failure with `?`. Failures are caught
//! only at two recovery points, a block item and a top-level declaration,
//! where the error is recorded and the token stream is resynchronized. Parsing
//! therefore always runs to end of file and always yields a [`CompUnit`],
//! possibly missing the constructs that failed.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer};
use crate::parser::token::{Token, TokenKind};
use log::debug;
use thiserror::Error;

/// Default bound on nesting: statements, unary and parenthesized
/// expressions, and binary operators chained within one expression.
/// Every tree walk recurses at most this deep.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

/// What the parser expected and did not get.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    Expected { expected: TokenKind, found: String },
    #[error("expected type specifier, found {0}")]
    ExpectedType(String),
    #[error("expected identifier, found {0}")]
    ExpectedIdentifier(String),
    #[error("expected expression, found {0}")]
    ExpectedExpression(String),
    #[error("left side of assignment is not an lvalue")]
    InvalidAssignmentTarget,
    #[error("const variable '{0}' requires an initializer")]
    ConstWithoutInitializer(String),
    #[error("function '{0}' cannot be declared const")]
    ConstFunction(String),
    #[error("invalid numeric literal '{0}'")]
    InvalidNumber(String),
    #[error("hexadecimal floating literal '{0}' requires a 'p' exponent")]
    MissingHexExponent(String),
    #[error("nesting exceeds the limit of {0} levels")]
    NestingTooDeep(usize),
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at {location}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

/// Recursive descent parser for SysY
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token<'src>,
    previous: TokenKind,
    consumed: usize,
    errors: Vec<ParseError>,
    depth: usize,
    max_depth: usize,
    tokens: Option<Vec<Token<'src>>>,
}

impl<'src> Parser<'src> {
    /// Create a parser reading from `lexer`, primed with its first token.
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: TokenKind::Eof,
            consumed: 0,
            errors: Vec::new(),
            depth: 0,
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
            tokens: None,
        }
    }

    pub fn from_source(source: &'src str) -> Self {
        Self::new(Lexer::new(source))
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Keep a copy of every token pulled from the lexer, so callers get the
    /// token stream without lexing the buffer a second time.
    pub fn recording_tokens(mut self) -> Self {
        self.tokens = Some(vec![self.current]);
        self
    }

    /// Parse the entire compilation unit (top-level declarations)
    pub fn parse_comp_unit(&mut self) -> CompUnit {
        let mut unit = CompUnit::new();

        while !self.check(TokenKind::Eof) {
            let item_start = self.consumed;
            match self.parse_external_declaration() {
                Ok(items) => unit.items.extend(items),
                Err(err) => {
                    self.report(err);
                    self.recover_top_level(item_start);
                }
            }
        }

        debug!(
            "parsed {} top-level items, {} syntax errors",
            unit.items.len(),
            self.errors.len()
        );
        unit
    }

    /// Syntax errors recorded so far
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Lexical errors recorded by the underlying lexer so far
    pub fn lex_errors(&self) -> &[LexError] {
        self.lexer.errors()
    }

    /// Tokens recorded so far, ending with `Eof` once parsing is done.
    /// Empty unless the parser was built with [`Parser::recording_tokens`].
    pub fn take_tokens(&mut self) -> Vec<Token<'src>> {
        self.tokens.take().unwrap_or_default()
    }

    /// Consume the parser, returning its lexical and syntax errors.
    pub fn into_errors(mut self) -> (Vec<LexError>, Vec<ParseError>) {
        (self.lexer.take_errors(), self.errors)
    }

    // ===== Helper methods =====

    pub(crate) fn current(&self) -> &Token<'src> {
        &self.current
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location
    }

    /// Number of tokens consumed so far; used to detect progress.
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    /// Consume the current token and return it.
    pub(crate) fn advance(&mut self) -> Token<'src> {
        self.consumed += 1;
        let next = self.lexer.next_token();
        if self.current.is_not(TokenKind::Eof) {
            if let Some(tokens) = &mut self.tokens {
                tokens.push(next);
            }
        }
        self.previous = self.current.kind;
        std::mem::replace(&mut self.current, next)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind`, or fail without consuming anything.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(ParseErrorKind::Expected {
                expected: kind,
                found: self.current.to_string(),
            }))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<(String, SourceLocation), ParseError> {
        if self.check(TokenKind::Identifier) {
            let token = self.advance();
            Ok((token.text.to_string(), token.location))
        } else {
            Err(self.error_here(ParseErrorKind::ExpectedIdentifier(
                self.current.to_string(),
            )))
        }
    }

    pub(crate) fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.current.location)
    }

    /// Run `rule` one nesting level deeper, failing once the limit is reached.
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.descend()?;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Enter one more nesting level. The caller restores `depth`.
    pub(crate) fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(self.error_here(ParseErrorKind::NestingTooDeep(self.max_depth)));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn restore_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    pub(crate) fn report(&mut self, err: ParseError) {
        debug!("recovering from {}", err);
        self.errors.push(err);
    }

    /// Skip to the next statement boundary: just past a `;`, or before a
    /// `}`, end of file, or a token that starts a new statement. A statement
    /// start only counts once something past `item_start` has been consumed.
    pub(crate) fn synchronize(&mut self, item_start: usize) {
        loop {
            match self.current.kind {
                TokenKind::Semi => {
                    self.advance();
                    return;
                }
                TokenKind::RBrace | TokenKind::Eof => return,
                kind if kind.starts_statement() && self.consumed > item_start => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skip up to the next type keyword or `const` outside any braces. If the
    /// failed declaration consumed nothing, at least one token is skipped. If
    /// it stopped right at the next declaration, nothing is; a keyword just
    /// after `(` is a parameter and does not count.
    pub(crate) fn recover_top_level(&mut self, item_start: usize) {
        let at_declaration = self.current.kind.is_type_keyword() || self.check(TokenKind::KwConst);
        if at_declaration && self.consumed > item_start && self.previous != TokenKind::LParen {
            return;
        }

        let mut braces = 0usize;

        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::LBrace => braces += 1,
                TokenKind::RBrace => braces = braces.saturating_sub(1),
                _ => {}
            }
            self.advance();

            let kind = self.current.kind;
            if braces == 0 && (kind.is_type_keyword() || kind == TokenKind::KwConst) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (CompUnit, Vec<ParseError>) {
        let mut parser = Parser::from_source(source);
        let unit = parser.parse_comp_unit();
        let (_, errors) = parser.into_errors();
        (unit, errors)
    }

    #[test]
    fn test_parse_simple_function() {
        let (unit, errors) = parse("int main() { return 0; }");

        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(unit.items.len(), 1);
        match &unit.items[0] {
            ExternalDecl::Func(FuncDef {
                name,
                return_type,
                body,
                ..
            }) => {
                assert_eq!(name, "main");
                assert_eq!(*return_type, TypeSpec::Int);
                assert_eq!(body.items.len(), 1);
            }
            other => panic!("Expected function definition, got {other:?}"),
        }
    }

    #[test]
    fn test_expect_does_not_consume_on_mismatch() {
        let mut parser = Parser::from_source("x ;");
        let err = parser.expect(TokenKind::Semi).unwrap_err();

        assert_eq!(
            err.kind,
            ParseErrorKind::Expected {
                expected: TokenKind::Semi,
                found: "identifier 'x'".to_string(),
            }
        );
        assert_eq!(err.location, SourceLocation::new(1, 1));
        assert!(parser.check(TokenKind::Identifier));
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 1: expected ';', found identifier 'x'"
        );
    }

    #[test]
    fn test_missing_semicolon_recovers_in_block() {
        let (unit, errors) = parse("int main() { int a = 1 return a; }");

        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].kind,
            ParseErrorKind::Expected {
                expected: TokenKind::Semi,
                ..
            }
        ));
        let main = unit.functions().next().expect("main survives");
        assert!(matches!(
            main.body.items.as_slice(),
            [BlockItem::Stmt(Stmt::Return { .. })]
        ));
    }

    #[test]
    fn test_top_level_garbage_is_skipped() {
        let (unit, errors) = parse("42 ; int f() { } x y z int main() { return 0; }");

        assert_eq!(unit.functions().count(), 2);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_broken_function_skips_its_body() {
        let (unit, errors) = parse("int 5bad() { int x; } int main() { return 0; }");

        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].kind, ParseErrorKind::ExpectedIdentifier(_)));
        assert_eq!(unit.items.len(), 1);
        assert_eq!(unit.functions().next().map(|f| f.name.as_str()), Some("main"));
    }

    #[test]
    fn test_missing_semicolon_after_global_keeps_next_function() {
        let (unit, errors) = parse("int g = 1\nint main() { return g; }");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location, SourceLocation::new(2, 1));
        assert_eq!(unit.functions().next().map(|f| f.name.as_str()), Some("main"));
    }

    #[test]
    fn test_parameter_keyword_does_not_stop_recovery() {
        let (unit, errors) = parse("int f(int x) { return x; } int g = 1 const int h = 2;");

        assert_eq!(errors.len(), 2);
        let names: Vec<&str> = unit
            .items
            .iter()
            .map(|item| match item {
                ExternalDecl::Var(decl) => decl.name.as_str(),
                ExternalDecl::Func(func) => func.name.as_str(),
            })
            .collect();
        assert_eq!(names, ["h"]);
    }

    #[test]
    fn test_unclosed_function_terminates() {
        let (unit, errors) = parse("int main() { return 0;");

        assert!(unit.items.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].kind,
            ParseErrorKind::Expected {
                expected: TokenKind::RBrace,
                ..
            }
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let source = format!("int main() {{ return {}1{}; }}", "(".repeat(40), ")".repeat(40));

        let mut parser = Parser::from_source(&source).with_max_depth(16);
        parser.parse_comp_unit();
        assert!(parser
            .errors()
            .iter()
            .any(|e| e.kind == ParseErrorKind::NestingTooDeep(16)));

        let mut parser = Parser::from_source(&source);
        parser.parse_comp_unit();
        assert!(parser.errors().is_empty());
    }

    #[test]
    fn test_long_operator_chain_hits_nesting_limit() {
        let source = format!("int main() {{ int a = 0; return a{}; }}", "+a".repeat(50_000));
        let (unit, errors) = parse(&source);

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].kind,
            ParseErrorKind::NestingTooDeep(DEFAULT_MAX_NESTING_DEPTH)
        );
        let main = unit.functions().next().expect("main survives");
        assert_eq!(main.body.items.len(), 1);
        assert!(unit.dump().contains("VarDecl: int a ="));
    }

    #[test]
    fn test_chain_within_limit_parses() {
        let source = format!("int main() {{ return 1{}; }}", "*2".repeat(100));
        let (_, errors) = parse(&source);

        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_recorded_tokens_match_tokenize() {
        let source = "int main() { return 0x1f; } @";
        let mut parser = Parser::from_source(source).recording_tokens();
        parser.parse_comp_unit();

        assert_eq!(parser.take_tokens(), Lexer::new(source).tokenize());
        assert_eq!(parser.lex_errors().len(), 1);
    }

    #[test]
    fn test_lex_errors_are_exposed() {
        let mut parser = Parser::from_source("int main() { return 0; } @");
        parser.parse_comp_unit();

        assert_eq!(parser.lex_errors().len(), 1);
    }
}
