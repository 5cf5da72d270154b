// Integration tests for the SysY front end

use std::fs;
use std::path::Path;

use sysyc::diagnostics::{Diagnostic, Stage};
use sysyc::parser::ast::*;
use sysyc::parser::lexer::Lexer;
use sysyc::parser::token::TokenKind;
use sysyc::parser::{ParseErrorKind, Parser, DEFAULT_MAX_NESTING_DEPTH};
use sysyc::pipeline::Frontend;
use sysyc::semantic::{analyze, SemanticError};

fn read_demo(name: &str) -> String {
    let path = Path::new("demos").join(name);
    fs::read_to_string(path).expect("Failed to read demo file")
}

fn main_body(unit: &CompUnit) -> &[BlockItem] {
    &unit
        .functions()
        .find(|f| f.name == "main")
        .expect("main is defined")
        .body
        .items
}

#[test]
fn test_valid_program_shape() {
    let source = "int main() { int a = 10; int b = 5; if (a > b) { a = b; } return 0; }";

    let output = Frontend::new().run(source);
    assert!(output.is_ok(), "{:?}", output.diagnostics());
    assert_eq!(output.unit().items.len(), 1);

    let body = main_body(output.unit());
    assert_eq!(body.len(), 4);
    assert!(matches!(&body[0], BlockItem::Decl(VarDecl { name, .. }) if name == "a"));
    assert!(matches!(&body[1], BlockItem::Decl(VarDecl { name, .. }) if name == "b"));
    assert!(matches!(
        &body[2],
        BlockItem::Stmt(Stmt::If {
            else_branch: None,
            ..
        })
    ));
    assert!(matches!(
        &body[3],
        BlockItem::Stmt(Stmt::Return { value: Some(_), .. })
    ));
}

#[test]
fn test_undeclared_identifier() {
    let output = Frontend::new().run("int main() { return a; }");

    assert_eq!(output.count(Stage::Syntax), 0);
    assert!(matches!(
        output.diagnostics(),
        [Diagnostic::Semantic(SemanticError::Undeclared { name, .. })] if name == "a"
    ));
}

#[test]
fn test_redefinition_of_second_declaration() {
    let output = Frontend::new().run("int main() { int a = 1; int a = 2; return 0; }");

    let [Diagnostic::Semantic(SemanticError::Redefinition {
        name,
        location,
        previous,
    })] = output.diagnostics()
    else {
        panic!("Expected one redefinition, got {:?}", output.diagnostics());
    };
    assert_eq!(name, "a");
    assert!(previous < location);
}

#[test]
fn test_equality_lexes_as_one_token() {
    let kinds: Vec<TokenKind> = Lexer::new("a==b")
        .tokenize()
        .into_iter()
        .map(|t| t.kind)
        .collect();

    assert_eq!(
        kinds,
        [
            TokenKind::Identifier,
            TokenKind::EqEq,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_dangling_else() {
    let source = "int main() { int a = 1; int b = 0; if (a) if (b) a = 2; else a = 3; return a; }";
    let output = Frontend::new().run(source);
    assert!(output.is_ok());

    let BlockItem::Stmt(Stmt::If {
        then_branch,
        else_branch: None,
        ..
    }) = &main_body(output.unit())[2]
    else {
        panic!("Outer if must have no else");
    };
    assert!(matches!(
        then_branch.as_ref(),
        Stmt::If {
            else_branch: Some(_),
            ..
        }
    ));
}

#[test]
fn test_scope_ends_with_block() {
    let output = Frontend::new().run("int main() { if (1) { int t = 1; } return t; }");

    assert_eq!(output.count(Stage::Semantic), 1);
}

#[test]
fn test_shadowing_accepted() {
    let output = Frontend::new().run(
        "int v = 0; int main() { int v = 1; while (v) { int v = 2; v = v - 2; } return v; }",
    );

    assert!(output.is_ok(), "{:?}", output.diagnostics());
}

#[test]
fn test_dump_reflects_tree() {
    let output = Frontend::new().run("int main() { int x = -(1 + 2) * 3; return x; }");
    assert!(output.is_ok());

    let expected = "\
CompUnit
  FuncDef: main [int]
    Block
      VarDecl: int x =
        BinaryExpr: *
          UnaryExpr: -
            BinaryExpr: +
              Number: 1
              Number: 2
          Number: 3
      Return
        LValue: x
";
    assert_eq!(output.unit().dump(), expected);
}

#[test]
fn test_parser_recovers_and_continues() {
    let source = "int main() {\n  int a = 1\n  if (a) a = 2 +;\n  return a;\n}\nint ok() { return 1; }";
    let mut parser = Parser::from_source(source);
    let unit = parser.parse_comp_unit();

    assert_eq!(parser.errors().len(), 2);
    assert!(matches!(
        parser.errors()[0].kind,
        ParseErrorKind::Expected {
            expected: TokenKind::Semi,
            ..
        }
    ));
    assert!(matches!(
        parser.errors()[1].kind,
        ParseErrorKind::ExpectedExpression(_)
    ));
    assert_eq!(unit.functions().count(), 2);
    assert!(matches!(
        main_body(&unit).last(),
        Some(BlockItem::Stmt(Stmt::Return { .. }))
    ));
}

#[test]
fn test_missing_semicolon_after_global() {
    let output = Frontend::new().run("int g = 1\nint main() { return g; }");

    assert_eq!(output.count(Stage::Syntax), 1);
    assert_eq!(output.diagnostics()[0].location().line, 2);
    assert_eq!(output.unit().functions().count(), 1);
    assert!(output.unit().dump().contains("FuncDef: main [int]"));
}

#[test]
fn test_long_operator_chain_is_reported_not_overflowed() {
    let source = format!(
        "int main() {{ int a = 0; return a{}; }}",
        "+a".repeat(50_000)
    );
    let output = Frontend::new().run(&source);

    assert!(matches!(
        output.diagnostics(),
        [Diagnostic::Syntax(err)] if err.kind == ParseErrorKind::NestingTooDeep(DEFAULT_MAX_NESTING_DEPTH)
    ));
    assert!(output.unit().dump().contains("VarDecl: int a ="));
}

#[test]
fn test_deep_parentheses_under_default_limit() {
    let depth = DEFAULT_MAX_NESTING_DEPTH - 8;
    let source = format!(
        "int main() {{ int a = 1; return {}a + 1{}; }}",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    let output = Frontend::new().run(&source);

    assert!(output.is_ok(), "{:?}", output.diagnostics());
    assert_eq!(output.unit().dump().lines().count(), 9);
}

#[test]
fn test_oversized_literal_wraps() {
    let output = Frontend::new().run("int main() { int a = 18446744073709551616; return a; }");

    assert!(output.is_ok(), "{:?}", output.diagnostics());
    let BlockItem::Decl(decl) = &main_body(output.unit())[0] else {
        panic!("Expected declaration of a");
    };
    assert!(matches!(
        decl.init,
        Some(Expr::Number {
            value: Number::Int(0),
            ..
        })
    ));
}

#[test]
fn test_analyze_directly() {
    let mut parser = Parser::from_source("int main() { while (1) { break; } continue; }");
    let unit = parser.parse_comp_unit();

    assert_eq!(
        analyze(&unit),
        vec![SemanticError::ContinueOutsideLoop {
            location: SourceLocation::new(1, 35),
        }]
    );
}

#[test]
fn test_sample_program() {
    let source = read_demo("sample.sy");
    let output = Frontend::new().run(&source);
    assert!(output.is_ok(), "{:?}", output.diagnostics());

    let ExternalDecl::Var(pi) = &output.unit().items[0] else {
        panic!("Expected global constant first");
    };
    assert!(pi.is_const);
    assert!(matches!(
        pi.init,
        Some(Expr::Number {
            value: Number::Float(v),
            ..
        }) if (v - 3.14159).abs() < 1e-6
    ));

    let body = main_body(output.unit());
    let BlockItem::Decl(b) = &body[1] else {
        panic!("Expected declaration of b");
    };
    assert!(matches!(
        b.init,
        Some(Expr::Number {
            value: Number::Int(8),
            ..
        })
    ));
}

#[test]
fn test_error_program() {
    let source = read_demo("errors.sy");
    let output = Frontend::new().run(&source);

    let summary: Vec<(Stage, usize)> = output
        .diagnostics()
        .iter()
        .map(|d| (d.stage(), d.location().line))
        .collect();
    assert_eq!(
        summary,
        [(Stage::Syntax, 7), (Stage::Lexical, 11), (Stage::Syntax, 11)]
    );
}

#[test]
fn test_scope_program() {
    let source = read_demo("scopes.sy");
    let output = Frontend::new().run(&source);
    assert_eq!(output.count(Stage::Syntax), 0);

    let found: Vec<&SemanticError> = output
        .diagnostics()
        .iter()
        .filter_map(|d| match d {
            Diagnostic::Semantic(err) => Some(err),
            _ => None,
        })
        .collect();

    assert!(matches!(
        found.as_slice(),
        [
            SemanticError::AssignToConstant { .. },
            SemanticError::Redefinition { .. },
            SemanticError::BreakOutsideLoop { .. },
            SemanticError::Undeclared { .. },
        ]
    ));
    assert_eq!(
        found.iter().map(|e| e.location().line).collect::<Vec<_>>(),
        [18, 19, 20, 21]
    );
}
