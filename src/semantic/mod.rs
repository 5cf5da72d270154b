//! Semantic analysis over the parsed AST
//!
//! - [`scope`]: the lexical scope stack and symbol entries
//! - [`analyzer`]: the tree walk that resolves names against it
//! - [`errors`]: [`SemanticError`]
//!
//! Only declarations and references are checked. There is no type
//! checking beyond remembering each name's declared type.

pub mod analyzer;
pub mod errors;
pub mod scope;

pub use analyzer::{analyze, SemanticAnalyzer};
pub use errors::SemanticError;
pub use scope::{ScopeStack, Symbol, SymbolKind};
