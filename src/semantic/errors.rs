//! Semantic error types
//!
//! This module defines [`SemanticError`], one variant per scope or context
//! violation found while walking a parsed tree. None of them stop the
//! analysis; the analyzer collects them all in traversal order.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// Violations reported by the semantic analyzer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// Reference to a name not declared in any active scope
    #[error("Semantic error at {location}: use of undeclared identifier '{name}'")]
    Undeclared {
        name: String,
        location: SourceLocation,
    },

    /// Second declaration of a name in the same scope
    #[error(
        "Semantic error at {location}: redefinition of '{name}' (previously declared at {previous})"
    )]
    Redefinition {
        name: String,
        location: SourceLocation,
        previous: SourceLocation,
    },

    /// Assignment whose target is a `const` variable
    #[error("Semantic error at {location}: cannot assign to const variable '{name}'")]
    AssignToConstant {
        name: String,
        location: SourceLocation,
    },

    #[error("Semantic error at {location}: 'break' statement not in loop")]
    BreakOutsideLoop { location: SourceLocation },

    #[error("Semantic error at {location}: 'continue' statement not in loop")]
    ContinueOutsideLoop { location: SourceLocation },
}

impl SemanticError {
    pub fn location(&self) -> SourceLocation {
        match self {
            SemanticError::Undeclared { location, .. }
            | SemanticError::Redefinition { location, .. }
            | SemanticError::AssignToConstant { location, .. }
            | SemanticError::BreakOutsideLoop { location }
            | SemanticError::ContinueOutsideLoop { location } => *location,
        }
    }
}
