//! Lexical scope stack
//!
//! The global scope is created with the stack and is never popped; local
//! scopes are pushed and popped around blocks. Lookup walks from the
//! innermost scope outward, so inner declarations shadow outer ones.

use crate::parser::ast::{SourceLocation, TypeSpec};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// What a declared name refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Function { return_type: TypeSpec },
    Variable { ty: TypeSpec, is_const: bool },
}

/// A declared name's entry in a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub kind: SymbolKind,
    /// Where the name was declared
    pub location: SourceLocation,
}

impl Symbol {
    pub fn function(return_type: TypeSpec, location: SourceLocation) -> Self {
        Symbol {
            kind: SymbolKind::Function { return_type },
            location,
        }
    }

    pub fn variable(ty: TypeSpec, is_const: bool, location: SourceLocation) -> Self {
        Symbol {
            kind: SymbolKind::Variable { ty, is_const },
            location,
        }
    }

    /// Declared type spelling: `"func"` for functions, otherwise the
    /// variable's type keyword.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            SymbolKind::Function { .. } => "func",
            SymbolKind::Variable { ty, .. } => ty.spelling(),
        }
    }

    pub fn is_const(&self) -> bool {
        matches!(self.kind, SymbolKind::Variable { is_const: true, .. })
    }
}

type Scope = FxHashMap<String, Symbol>;

/// Stack of active scopes, innermost last
#[derive(Debug, Default)]
pub struct ScopeStack {
    global: Scope,
    locals: Vec<Scope>,
}

impl ScopeStack {
    /// Create a stack holding only the (empty) global scope
    pub fn new() -> Self {
        ScopeStack::default()
    }

    pub fn push(&mut self) {
        self.locals.push(Scope::default());
    }

    /// Pop the innermost local scope. Returns `false` when only the global
    /// scope is left, which is never popped.
    pub fn pop(&mut self) -> bool {
        self.locals.pop().is_some()
    }

    /// Number of active scopes, counting the global one
    pub fn depth(&self) -> usize {
        self.locals.len() + 1
    }

    pub fn is_global(&self) -> bool {
        self.locals.is_empty()
    }

    /// Define `name` in the innermost scope. If the name is already declared
    /// in that scope, the existing entry is kept and returned as the error.
    pub fn define(&mut self, name: &str, symbol: Symbol) -> Result<(), Symbol> {
        let scope = self.locals.last_mut().unwrap_or(&mut self.global);

        match scope.entry(name.to_string()) {
            Entry::Occupied(existing) => Err(*existing.get()),
            Entry::Vacant(slot) => {
                slot.insert(symbol);
                Ok(())
            }
        }
    }

    /// Resolve `name`, innermost scope first
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.locals
            .iter()
            .rev()
            .chain(std::iter::once(&self.global))
            .find_map(|scope| scope.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_var(line: usize) -> Symbol {
        Symbol::variable(TypeSpec::Int, false, SourceLocation::new(line, 1))
    }

    #[test]
    fn test_global_scope_is_never_popped() {
        let mut scopes = ScopeStack::new();
        assert_eq!(scopes.depth(), 1);
        assert!(!scopes.pop());

        scopes.push();
        assert_eq!(scopes.depth(), 2);
        assert!(scopes.pop());
        assert!(scopes.is_global());
    }

    #[test]
    fn test_redefinition_keeps_first_entry() {
        let mut scopes = ScopeStack::new();
        scopes.define("a", int_var(1)).unwrap();

        let previous = scopes.define("a", int_var(2)).unwrap_err();
        assert_eq!(previous.location.line, 1);
        assert_eq!(scopes.lookup("a").map(|s| s.location.line), Some(1));
    }

    #[test]
    fn test_shadowing_and_scope_exit() {
        let mut scopes = ScopeStack::new();
        scopes.define("x", int_var(1)).unwrap();

        scopes.push();
        scopes
            .define("x", Symbol::variable(TypeSpec::Float, false, SourceLocation::new(2, 1)))
            .unwrap();
        scopes.define("y", int_var(3)).unwrap();
        assert_eq!(scopes.lookup("x").map(Symbol::type_name), Some("float"));

        scopes.pop();
        assert_eq!(scopes.lookup("x").map(Symbol::type_name), Some("int"));
        assert!(scopes.lookup("y").is_none());
    }

    #[test]
    fn test_symbol_type_names() {
        let func = Symbol::function(TypeSpec::Void, SourceLocation::default());
        assert_eq!(func.type_name(), "func");
        assert!(!func.is_const());

        let constant = Symbol::variable(TypeSpec::Float, true, SourceLocation::default());
        assert_eq!(constant.type_name(), "float");
        assert!(constant.is_const());
    }
}
