//! Library driver for the whole front end
//!
//! [`Frontend::run`] takes one source buffer through lexing, parsing and
//! semantic analysis and returns the tree together with every diagnostic.
//! The buffer is lexed once; the parser records the tokens it pulls.
//!
//! Lexical and syntax diagnostics are interleaved in source order. Semantic
//! analysis only runs on a tree that parsed without syntax errors, and its
//! diagnostics follow in traversal order.

use crate::diagnostics::{Diagnostic, Stage};
use crate::parser::ast::CompUnit;
use crate::parser::token::Token;
use crate::parser::{Parser, DEFAULT_MAX_NESTING_DEPTH};
use crate::semantic;
use log::debug;

/// Front-end configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontendOptions {
    /// Deepest statement or expression nesting the parser accepts
    pub max_nesting_depth: usize,
}

impl Default for FrontendOptions {
    fn default() -> Self {
        FrontendOptions {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Result of running the front end over one buffer
#[derive(Debug)]
pub struct FrontendOutput<'src> {
    unit: CompUnit,
    diagnostics: Vec<Diagnostic>,
    tokens: Vec<Token<'src>>,
}

impl<'src> FrontendOutput<'src> {
    /// The (possibly partial) tree
    pub fn unit(&self) -> &CompUnit {
        &self.unit
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The full token stream, ending with `Eof`
    pub fn tokens(&self) -> &[Token<'src>] {
        &self.tokens
    }

    /// True when no stage reported anything; only then should later
    /// compiler stages proceed.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn count(&self, stage: Stage) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.stage() == stage)
            .count()
    }
}

#[derive(Debug, Default, Clone)]
pub struct Frontend {
    options: FrontendOptions,
}

impl Frontend {
    pub fn new() -> Self {
        Frontend::default()
    }

    pub fn with_options(options: FrontendOptions) -> Self {
        Frontend { options }
    }

    pub fn options(&self) -> &FrontendOptions {
        &self.options
    }

    pub fn run<'src>(&self, source: &'src str) -> FrontendOutput<'src> {
        let mut parser = Parser::from_source(source)
            .with_max_depth(self.options.max_nesting_depth)
            .recording_tokens();
        let unit = parser.parse_comp_unit();
        let tokens = parser.take_tokens();
        let (lex_errors, parse_errors) = parser.into_errors();
        let parsed_cleanly = parse_errors.is_empty();

        let mut diagnostics: Vec<Diagnostic> = lex_errors
            .into_iter()
            .map(Diagnostic::from)
            .chain(parse_errors.into_iter().map(Diagnostic::from))
            .collect();
        diagnostics.sort_by_key(Diagnostic::location);

        if parsed_cleanly {
            diagnostics.extend(semantic::analyze(&unit).into_iter().map(Diagnostic::from));
        } else {
            debug!("skipping semantic analysis after syntax errors");
        }

        debug!(
            "front end finished: {} items, {} diagnostics",
            unit.items.len(),
            diagnostics.len()
        );

        FrontendOutput {
            unit,
            diagnostics,
            tokens,
        }
    }
}
