//! # Introduction
//!
//! sysyc is the front end of a compiler for SysY, a small C-like language
//! with `int`/`float` scalars, blocks, conditionals, loops and functions
//! without parameters. It turns source text into an abstract syntax tree and
//! checks that every identifier use is declared and every declaration is
//! unique within its scope. No code is generated.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Semantic analysis → Diagnostics
//! ```
//!
//! 1. [`parser`]: the lexer produces tokens on demand; the recursive descent
//!    parser builds the AST and recovers from syntax errors.
//! 2. [`semantic`]: a single walk over the tree with a lexical scope stack.
//! 3. [`diagnostics`]: the stages' errors unified into one ordered list.
//! 4. [`pipeline`]: [`pipeline::Frontend`] runs all of the above over one
//!    buffer.
//! 5. [`ui`]: ratatui-based explorer for tokens, tree and diagnostics; not
//!    part of the stable library API.
//!
//! No stage aborts on bad input. Every problem becomes a diagnostic and the
//! pipeline keeps going, so one run reports everything it can find.
//!
//! ```
//! use sysyc::pipeline::Frontend;
//!
//! let output = Frontend::new().run("int main() { return a; }");
//! assert_eq!(output.diagnostics().len(), 1);
//! ```

pub mod diagnostics;
pub mod parser;
pub mod pipeline;
pub mod semantic;
pub mod ui;
