//! Declaration parsing implementation
//!
//! This module handles parsing of declarations in SysY programs:
//!
//! - Function definitions: `type name ( ) { ... }`
//! - Variable declarations, global or local: `[const] type name [= expr], ... ;`
//! - Type specifiers: `int`, `float`, `void`
//!
//! # Grammar
//!
//! ```text
//! external_decl ::= func_def | var_decl
//! func_def      ::= type identifier "(" ")" block
//! var_decl      ::= ["const"] type declarator ("," declarator)* ";"
//! declarator    ::= identifier ["=" expression]
//! type          ::= "int" | "float" | "void"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
use crate::parser::token::TokenKind;

impl<'src> Parser<'src> {
    /// Parse a top-level declaration. A single declaration line may declare
    /// several variables, so this yields a list.
    pub(crate) fn parse_external_declaration(&mut self) -> Result<Vec<ExternalDecl>, ParseError> {
        let is_const = self.match_token(TokenKind::KwConst);
        let ty = self.parse_type()?;
        let (name, location) = self.expect_identifier()?;

        if self.check(TokenKind::LParen) {
            if is_const {
                return Err(ParseError::new(ParseErrorKind::ConstFunction(name), location));
            }
            let func = self.parse_func_def(ty, name, location)?;
            return Ok(vec![ExternalDecl::Func(func)]);
        }

        let decls = self.parse_declarators(is_const, ty, name, location)?;
        Ok(decls.into_iter().map(ExternalDecl::Var).collect())
    }

    /// Parse the rest of a function definition once its return type and
    /// name are known: `( ) block`
    pub(crate) fn parse_func_def(
        &mut self,
        return_type: TypeSpec,
        name: String,
        location: SourceLocation,
    ) -> Result<FuncDef, ParseError> {
        self.expect(TokenKind::LParen)?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;

        Ok(FuncDef {
            name,
            return_type,
            body,
            location,
        })
    }

    /// Parse a local declaration statement
    pub(crate) fn parse_declaration(&mut self) -> Result<Vec<VarDecl>, ParseError> {
        let is_const = self.match_token(TokenKind::KwConst);
        let ty = self.parse_type()?;
        let (name, location) = self.expect_identifier()?;
        self.parse_declarators(is_const, ty, name, location)
    }

    pub(crate) fn parse_type(&mut self) -> Result<TypeSpec, ParseError> {
        match TypeSpec::from_token(self.current().kind) {
            Some(ty) => {
                self.advance();
                Ok(ty)
            }
            None => Err(self.error_here(ParseErrorKind::ExpectedType(
                self.current().to_string(),
            ))),
        }
    }

    /// Parse declarators up to and including the terminating `;`. The first
    /// declarator's name has already been consumed.
    fn parse_declarators(
        &mut self,
        is_const: bool,
        ty: TypeSpec,
        first_name: String,
        first_location: SourceLocation,
    ) -> Result<Vec<VarDecl>, ParseError> {
        let mut decls = Vec::new();
        let (mut name, mut location) = (first_name, first_location);

        loop {
            let init = if self.match_token(TokenKind::Assign) {
                Some(self.parse_expression()?)
            } else {
                None
            };

            if is_const && init.is_none() {
                return Err(ParseError::new(
                    ParseErrorKind::ConstWithoutInitializer(name),
                    location,
                ));
            }

            decls.push(VarDecl {
                is_const,
                ty,
                name,
                init,
                location,
            });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
            (name, location) = self.expect_identifier()?;
        }

        self.expect(TokenKind::Semi)?;
        Ok(decls)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseErrorKind, Parser};

    #[test]
    fn test_global_declarations() {
        let mut parser = Parser::from_source("const float PI = 3.14; int a = 0x12, b = 010, c;");
        let unit = parser.parse_comp_unit();
        assert!(parser.errors().is_empty(), "{:?}", parser.errors());

        let decls: Vec<&VarDecl> = unit
            .items
            .iter()
            .filter_map(|item| match item {
                ExternalDecl::Var(decl) => Some(decl),
                ExternalDecl::Func(_) => None,
            })
            .collect();

        assert_eq!(decls.len(), 4);
        assert!(decls[0].is_const);
        assert_eq!(decls[0].ty, TypeSpec::Float);
        assert_eq!(decls[1].name, "a");
        assert!(matches!(
            decls[1].init,
            Some(Expr::Number {
                value: Number::Int(18),
                ..
            })
        ));
        assert!(matches!(
            decls[2].init,
            Some(Expr::Number {
                value: Number::Int(8),
                ..
            })
        ));
        assert_eq!(decls[3].name, "c");
        assert!(decls[3].init.is_none());
    }

    #[test]
    fn test_void_function() {
        let mut parser = Parser::from_source("void f() { }");
        let unit = parser.parse_comp_unit();

        let func = unit.functions().next().expect("function parsed");
        assert_eq!(func.return_type, TypeSpec::Void);
        assert_eq!(func.location, SourceLocation::new(1, 6));
        assert!(func.body.items.is_empty());
    }

    #[test]
    fn test_const_requires_initializer() {
        let mut parser = Parser::from_source("int main() { const int n; return 0; }");
        parser.parse_comp_unit();

        assert_eq!(
            parser.errors()[0].kind,
            ParseErrorKind::ConstWithoutInitializer("n".to_string())
        );
    }

    #[test]
    fn test_const_function_rejected() {
        let mut parser = Parser::from_source("const int f() { }");
        parser.parse_comp_unit();

        assert_eq!(
            parser.errors()[0].kind,
            ParseErrorKind::ConstFunction("f".to_string())
        );
    }

    #[test]
    fn test_parameters_are_not_supported() {
        let mut parser = Parser::from_source("int f(int x) { return x; }");
        let unit = parser.parse_comp_unit();

        assert!(unit.items.is_empty());
        assert_eq!(parser.errors().len(), 1);
    }
}
