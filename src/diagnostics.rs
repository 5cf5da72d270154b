//! Unified diagnostics across the front-end stages
//!
//! Each stage reports its own error type. [`Diagnostic`] wraps them so a
//! driver can hold a single ordered list and print it.

use crate::parser::ast::SourceLocation;
use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use crate::semantic::SemanticError;
use std::fmt;
use thiserror::Error;

/// The stage that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Lexical => "lexical",
            Stage::Syntax => "syntax",
            Stage::Semantic => "semantic",
        };
        f.write_str(name)
    }
}

/// A problem found in the input by any stage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error(transparent)]
    Lexical(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl Diagnostic {
    pub fn stage(&self) -> Stage {
        match self {
            Diagnostic::Lexical(_) => Stage::Lexical,
            Diagnostic::Syntax(_) => Stage::Syntax,
            Diagnostic::Semantic(_) => Stage::Semantic,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Diagnostic::Lexical(err) => err.location,
            Diagnostic::Syntax(err) => err.location,
            Diagnostic::Semantic(err) => err.location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::LexErrorKind;

    #[test]
    fn test_display_is_the_stage_error() {
        let diag = Diagnostic::from(LexError {
            kind: LexErrorKind::UnexpectedChar('@'),
            location: SourceLocation::new(2, 7),
        });

        assert_eq!(diag.stage(), Stage::Lexical);
        assert_eq!(diag.location(), SourceLocation::new(2, 7));
        assert_eq!(
            diag.to_string(),
            "Lexer error at line 2, column 7: unexpected character '@'"
        );
    }

    #[test]
    fn test_semantic_location() {
        let diag = Diagnostic::from(SemanticError::BreakOutsideLoop {
            location: SourceLocation::new(4, 3),
        });

        assert_eq!(diag.stage(), Stage::Semantic);
        assert_eq!(diag.location(), SourceLocation::new(4, 3));
    }
}
