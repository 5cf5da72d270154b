//! Statement parsing implementation
//!
//! This module handles parsing of all SysY statement types:
//!
//! - Local declarations inside blocks: `int x = 42;`
//! - Control flow: `if`, `while`
//! - Jump statements: `return`, `break`, `continue`
//! - Compound statements: `{ ... }`
//! - Assignments and expression statements
//!
//! # Grammar
//!
//! ```text
//! block      ::= "{" block_item* "}"
//! block_item ::= var_decl | statement
//! statement  ::= lvalue "=" expression ";"
//!              | expression? ";"
//!              | block
//!              | "if" "(" expression ")" statement ["else" statement]
//!              | "while" "(" expression ")" statement
//!              | "break" ";" | "continue" ";"
//!              | "return" expression? ";"
//! ```
//!
//! A block is the recovery point for statement-level syntax errors: a failed
//! item is reported and skipped, and the block continues with the next one.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
use crate::parser::token::TokenKind;

impl<'src> Parser<'src> {
    /// Parse a braced block, recovering from errors in its items
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let location = self.expect(TokenKind::LBrace)?.location;
        let mut items = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            let item_start = self.consumed();
            match self.parse_block_item() {
                Ok(parsed) => items.extend(parsed),
                Err(err) => {
                    self.report(err);
                    self.synchronize(item_start);
                }
            }
        }

        self.expect(TokenKind::RBrace)?;
        Ok(Block { items, location })
    }

    fn parse_block_item(&mut self) -> Result<Vec<BlockItem>, ParseError> {
        let kind = self.current().kind;
        if kind.is_type_keyword() || kind == TokenKind::KwConst {
            let decls = self.parse_declaration()?;
            return Ok(decls.into_iter().map(BlockItem::Decl).collect());
        }

        Ok(self.parse_statement()?.map(BlockItem::Stmt).into_iter().collect())
    }

    /// Parse a statement. An empty statement (`;`) yields no node.
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        self.nested(Self::parse_statement_inner)
    }

    fn parse_statement_inner(&mut self) -> Result<Option<Stmt>, ParseError> {
        let loc = self.current_location();

        if self.match_token(TokenKind::KwReturn) {
            return self.parse_return_statement(loc).map(Some);
        }

        if self.match_token(TokenKind::KwIf) {
            return self.parse_if_statement(loc).map(Some);
        }

        if self.match_token(TokenKind::KwWhile) {
            return self.parse_while_statement(loc).map(Some);
        }

        if self.match_token(TokenKind::KwBreak) {
            self.expect(TokenKind::Semi)?;
            return Ok(Some(Stmt::Break { location: loc }));
        }

        if self.match_token(TokenKind::KwContinue) {
            self.expect(TokenKind::Semi)?;
            return Ok(Some(Stmt::Continue { location: loc }));
        }

        if self.check(TokenKind::LBrace) {
            return self.parse_block().map(|block| Some(Stmt::Block(block)));
        }

        if self.match_token(TokenKind::Semi) {
            return Ok(None);
        }

        self.parse_expression_statement(loc).map(Some)
    }

    /// Statement in the body of `if`/`while`. A lone `;` becomes an empty block.
    fn parse_body(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        Ok(self.parse_statement()?.unwrap_or(Stmt::Block(Block {
            items: Vec::new(),
            location,
        })))
    }

    fn parse_return_statement(&mut self, location: SourceLocation) -> Result<Stmt, ParseError> {
        let value = if self.check(TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semi)?;

        Ok(Stmt::Return { value, location })
    }

    /// `else` always binds to the nearest unmatched `if`.
    fn parse_if_statement(&mut self, location: SourceLocation) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;

        let then_branch = Box::new(self.parse_body()?);
        let else_branch = if self.match_token(TokenKind::KwElse) {
            Some(Box::new(self.parse_body()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location,
        })
    }

    fn parse_while_statement(&mut self, location: SourceLocation) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = Box::new(self.parse_body()?);

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// Parse an expression, then decide between assignment and expression
    /// statement on whether `=` follows it.
    fn parse_expression_statement(&mut self, location: SourceLocation) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression()?;

        if self.check(TokenKind::Assign) {
            let Expr::LValue(target) = expr else {
                return Err(self.error_here(ParseErrorKind::InvalidAssignmentTarget));
            };
            self.advance(); // '='
            let value = self.parse_expression()?;
            self.expect(TokenKind::Semi)?;
            return Ok(Stmt::Assign {
                target,
                value,
                location,
            });
        }

        self.expect(TokenKind::Semi)?;
        Ok(Stmt::Expr { expr, location })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
    use crate::parser::token::TokenKind;

    fn parse_body(source: &str) -> (Vec<BlockItem>, Vec<ParseError>) {
        let wrapped = format!("int main() {{ {} }}", source);
        let mut parser = Parser::from_source(&wrapped);
        let unit = parser.parse_comp_unit();
        let items = unit
            .functions()
            .next()
            .map(|f| f.body.items.clone())
            .unwrap_or_default();
        (items, parser.errors().to_vec())
    }

    #[test]
    fn test_assignment_vs_expression_statement() {
        let (items, errors) = parse_body("x = 1; x + 1; x;");
        assert!(errors.is_empty());

        assert!(matches!(
            &items[0],
            BlockItem::Stmt(Stmt::Assign { target, .. }) if target.name == "x"
        ));
        assert!(matches!(
            &items[1],
            BlockItem::Stmt(Stmt::Expr {
                expr: Expr::Binary { .. },
                ..
            })
        ));
        assert!(matches!(
            &items[2],
            BlockItem::Stmt(Stmt::Expr {
                expr: Expr::LValue(_),
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_assignment_target() {
        let (items, errors) = parse_body("1 + x = 2; return 0;");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ParseErrorKind::InvalidAssignmentTarget);
        assert_eq!(errors[0].location, SourceLocation::new(1, 20));
        assert!(matches!(items.as_slice(), [BlockItem::Stmt(Stmt::Return { .. })]));
    }

    #[test]
    fn test_dangling_else_binds_to_inner_if() {
        let (items, errors) = parse_body("if (a) if (b) x = 1; else x = 2;");
        assert!(errors.is_empty());

        let BlockItem::Stmt(Stmt::If {
            then_branch,
            else_branch,
            ..
        }) = &items[0]
        else {
            panic!("Expected if statement, got {:?}", items[0]);
        };
        assert!(else_branch.is_none());
        assert!(matches!(
            then_branch.as_ref(),
            Stmt::If {
                else_branch: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_empty_statements() {
        let (items, errors) = parse_body("; ; while (1) ; return;");
        assert!(errors.is_empty());

        assert_eq!(items.len(), 2);
        assert!(matches!(
            &items[0],
            BlockItem::Stmt(Stmt::While { body, .. })
                if matches!(body.as_ref(), Stmt::Block(Block { items, .. }) if items.is_empty())
        ));
        assert!(matches!(
            &items[1],
            BlockItem::Stmt(Stmt::Return { value: None, .. })
        ));
    }

    #[test]
    fn test_break_and_continue() {
        let (items, errors) = parse_body("while (1) { break; continue; }");
        assert!(errors.is_empty());

        let BlockItem::Stmt(Stmt::While { body, .. }) = &items[0] else {
            panic!("Expected while statement");
        };
        let Stmt::Block(block) = body.as_ref() else {
            panic!("Expected block body");
        };
        assert!(matches!(
            block.items.as_slice(),
            [
                BlockItem::Stmt(Stmt::Break { .. }),
                BlockItem::Stmt(Stmt::Continue { .. })
            ]
        ));
    }

    #[test]
    fn test_recovery_keeps_following_statements() {
        let (items, errors) = parse_body("int a = ; a = 1; if (a { a = 2; } return a;");

        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0].kind, ParseErrorKind::ExpectedExpression(_)));
        assert!(matches!(
            errors[1].kind,
            ParseErrorKind::Expected {
                expected: TokenKind::RParen,
                ..
            }
        ));
        assert!(matches!(
            items.last(),
            Some(BlockItem::Stmt(Stmt::Return { .. }))
        ));
    }
}
