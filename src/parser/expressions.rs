//! Expression parsing implementation
//!
//! This module handles parsing of SysY expressions by recursive descent,
//! one method per precedence level.
//!
//! # Supported Expressions
//!
//! - Literals: integer and floating constants (values extracted here)
//! - Variables (lvalues)
//! - Binary operators: arithmetic, relational, equality, logical
//! - Unary prefix operators: `+`, `-`, `!`
//! - Parenthesized expressions
//!
//! # Precedence
//!
//! From loosest to tightest: `||`, `&&`, `== !=`, `< > <= >=`, `+ -`,
//! `* / %`, unary prefix. All binary levels are left-associative.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::number::{self, NumberError};
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
use crate::parser::token::{Token, TokenKind};

type Rule<'src> = fn(&mut Parser<'src>) -> Result<Expr, ParseError>;

impl<'src> Parser<'src> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical_or()
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(&[TokenKind::PipePipe], Self::parse_logical_and)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(&[TokenKind::AmpAmp], Self::parse_equality)
    }

    /// Parse equality (==, !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(
            &[TokenKind::EqEq, TokenKind::NotEq],
            Self::parse_relational,
        )
    }

    /// Parse relational (<, >, <=, >=)
    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(
            &[
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::LessEq,
                TokenKind::GreaterEq,
            ],
            Self::parse_additive,
        )
    }

    /// Parse additive (+, -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(
            &[TokenKind::Plus, TokenKind::Minus],
            Self::parse_multiplicative,
        )
    }

    /// Parse multiplicative (*, /, %)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(
            &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
            Self::parse_unary,
        )
    }

    /// One left-associative binary level: `operand (op operand)*`
    ///
    /// Each operator makes the tree one level deeper, so each one counts
    /// against the nesting limit until the level is done.
    fn parse_left_assoc(
        &mut self,
        operators: &[TokenKind],
        operand: Rule<'src>,
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;
        let depth = self.depth();

        let result = loop {
            let kind = self.current().kind;
            let Some(op) = BinaryOp::from_token(kind).filter(|_| operators.contains(&kind)) else {
                break Ok(left);
            };
            if let Err(err) = self.descend() {
                break Err(err);
            }
            let loc = self.advance().location;
            match operand(self) {
                Ok(right) => {
                    left = Expr::Binary {
                        op,
                        lhs: Box::new(left),
                        rhs: Box::new(right),
                        location: loc,
                    };
                }
                Err(err) => break Err(err),
            }
        };

        self.restore_depth(depth);
        result
    }

    /// Parse unary prefix operators (+, -, !)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        self.nested(|p| {
            let Some(op) = UnaryOp::from_token(p.current().kind) else {
                return p.parse_primary();
            };
            let loc = p.advance().location;
            let operand = Box::new(p.parse_unary()?);

            Ok(Expr::Unary {
                op,
                operand,
                location: loc,
            })
        })
    }

    /// Parse primary expressions (literals, lvalues, parenthesized)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = *self.current();

        match token.kind {
            TokenKind::IntConst => {
                self.advance();
                let value = number::parse_int(token.text).map_err(|e| number_error(e, &token))?;
                Ok(Expr::Number {
                    value,
                    location: token.location,
                })
            }
            TokenKind::FloatConst => {
                self.advance();
                let value =
                    number::parse_float(token.text).map_err(|e| number_error(e, &token))?;
                Ok(Expr::Number {
                    value,
                    location: token.location,
                })
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(Expr::LValue(LValue {
                    name: token.text.to_string(),
                    location: token.location,
                }))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.error_here(ParseErrorKind::ExpectedExpression(token.to_string()))),
        }
    }
}

fn number_error(err: NumberError, token: &Token<'_>) -> ParseError {
    let text = token.text.to_string();
    let kind = match err {
        NumberError::Malformed => ParseErrorKind::InvalidNumber(text),
        NumberError::MissingHexExponent => ParseErrorKind::MissingHexExponent(text),
    };
    ParseError::new(kind, token.location)
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseErrorKind, Parser};

    fn parse_expr(source: &str) -> Expr {
        let mut parser = Parser::from_source(source);
        let expr = parser.parse_expression().expect("expression parses");
        assert!(parser.lex_errors().is_empty());
        expr
    }

    fn binary(expr: &Expr) -> (BinaryOp, &Expr, &Expr) {
        match expr {
            Expr::Binary { op, lhs, rhs, .. } => (*op, lhs, rhs),
            other => panic!("Expected binary expression, got {other:?}"),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let expr = parse_expr("1 + 2 * 3");

        let (op, lhs, rhs) = binary(&expr);
        assert_eq!(op, BinaryOp::Add);
        assert!(matches!(
            lhs,
            Expr::Number {
                value: Number::Int(1),
                ..
            }
        ));
        assert_eq!(binary(rhs).0, BinaryOp::Mul);
    }

    #[test]
    fn test_left_associativity() {
        let expr = parse_expr("a - b - c");

        let (op, lhs, rhs) = binary(&expr);
        assert_eq!(op, BinaryOp::Sub);
        assert_eq!(binary(lhs).0, BinaryOp::Sub);
        assert!(matches!(rhs, Expr::LValue(LValue { name, .. }) if name == "c"));
    }

    #[test]
    fn test_precedence_ladder() {
        let expr = parse_expr("a || b && c == d < e + f * g");

        let (op, _, rhs) = binary(&expr);
        assert_eq!(op, BinaryOp::Or);
        let (op, _, rhs) = binary(rhs);
        assert_eq!(op, BinaryOp::And);
        let (op, _, rhs) = binary(rhs);
        assert_eq!(op, BinaryOp::Eq);
        let (op, _, rhs) = binary(rhs);
        assert_eq!(op, BinaryOp::Lt);
        let (op, _, rhs) = binary(rhs);
        assert_eq!(op, BinaryOp::Add);
        assert_eq!(binary(rhs).0, BinaryOp::Mul);
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let expr = parse_expr("(1 + 2) * 3");

        let (op, lhs, _) = binary(&expr);
        assert_eq!(op, BinaryOp::Mul);
        assert_eq!(binary(lhs).0, BinaryOp::Add);
    }

    #[test]
    fn test_nested_unary() {
        let expr = parse_expr("-!+x");

        let Expr::Unary { op, operand, .. } = &expr else {
            panic!("Expected unary expression");
        };
        assert_eq!(*op, UnaryOp::Minus);
        assert!(matches!(
            operand.as_ref(),
            Expr::Unary {
                op: UnaryOp::Not,
                ..
            }
        ));
    }

    #[test]
    fn test_operator_location() {
        let expr = parse_expr("a  *  b");
        assert_eq!(expr.location(), SourceLocation::new(1, 4));
    }

    #[test]
    fn test_float_values() {
        assert!(matches!(
            parse_expr("0x1.8p1"),
            Expr::Number {
                value: Number::Float(v),
                ..
            } if v == 3.0
        ));
        assert!(matches!(
            parse_expr("1e2"),
            Expr::Number {
                value: Number::Float(v),
                ..
            } if v == 100.0
        ));
    }

    #[test]
    fn test_bad_literals() {
        let mut parser = Parser::from_source("0x1.8");
        let err = parser.parse_expression().unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingHexExponent("0x1.8".to_string())
        );

        let mut parser = Parser::from_source("089");
        let err = parser.parse_expression().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidNumber("089".to_string()));
    }

    #[test]
    fn test_missing_operand() {
        let mut parser = Parser::from_source("1 + ;");
        let err = parser.parse_expression().unwrap_err();

        assert_eq!(
            err.kind,
            ParseErrorKind::ExpectedExpression("';'".to_string())
        );
    }
}
