//! SysY source code parser
//!
//! This module transforms SysY source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token kinds and the keyword/punctuator tables
//! - [`lexer`]: Tokenization (source text → tokens), pulled on demand
//! - [`parse`]: Parsing (tokens → AST) with error recovery
//! - [`ast`]: AST node definitions
//! - [`number`]: Numeric literal value extraction
//!
//! The indented AST dump lives in `dump` and is reachable through
//! [`ast::CompUnit::dump`] and the `Display` impls of the node types.
//!
//! # Supported SysY Subset
//!
//! - Types: `int`, `float`, `void`; `const` variables
//! - Declarations: global and local variables, functions without parameters
//! - Statements: assignment, expression, block, `if`/`else`, `while`,
//!   `break`, `continue`, `return`
//! - Expressions: arithmetic, relational, equality, logical, unary `+ - !`
//! - No arrays, function calls, or parameters
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod dump;
mod expressions;
pub mod lexer;
pub mod number;
pub mod parse;
mod statements;
pub mod token;

pub use parse::{ParseError, ParseErrorKind, Parser, DEFAULT_MAX_NESTING_DEPTH};
