//! Scope-checking tree walk
//!
//! [`SemanticAnalyzer`] visits a parsed [`CompUnit`] once, maintaining a
//! [`ScopeStack`]. It checks that every referenced name is declared, that no
//! name is declared twice in one scope, that `const` variables are never
//! assigned, and that `break`/`continue` only appear inside loops.
//!
//! The tree is only read. Every violation is recorded and the walk goes on,
//! so one run reports all of them in traversal order.
//!
//! # Scoping
//!
//! - The global scope holds functions and global variables.
//! - A function's name is defined in the global scope before its body is
//!   visited, so the body can see it.
//! - Every [`Block`] pushes a scope on entry and pops it on exit, including
//!   blocks nested under `if`/`while`.
//! - A variable's initializer is visited before the variable is defined, so
//!   `int a = a;` refers to an outer `a` (or is undeclared).

use super::errors::SemanticError;
use super::scope::{ScopeStack, Symbol};
use crate::parser::ast::*;
use log::{debug, trace};

/// Semantic analyzer state for one analysis run
pub struct SemanticAnalyzer {
    scopes: ScopeStack,
    /// Number of enclosing `while` bodies
    loop_depth: usize,
    errors: Vec<SemanticError>,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        SemanticAnalyzer {
            scopes: ScopeStack::new(),
            loop_depth: 0,
            errors: Vec::new(),
        }
    }

    /// Analyze a whole compilation unit, consuming the analyzer
    pub fn analyze(mut self, unit: &CompUnit) -> Vec<SemanticError> {
        self.visit_comp_unit(unit);
        debug!(
            "semantic analysis finished with {} errors",
            self.errors.len()
        );
        self.errors
    }

    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    pub fn visit_comp_unit(&mut self, unit: &CompUnit) {
        for item in &unit.items {
            match item {
                ExternalDecl::Func(func) => self.visit_func_def(func),
                ExternalDecl::Var(decl) => self.visit_var_decl(decl),
            }
        }
    }

    pub fn visit_func_def(&mut self, func: &FuncDef) {
        self.define(
            &func.name,
            Symbol::function(func.return_type, func.location),
        );
        self.visit_block(&func.body);
    }

    pub fn visit_block(&mut self, block: &Block) {
        self.scopes.push();
        debug!(
            "enter scope (depth {}) at {}",
            self.scopes.depth(),
            block.location
        );

        for item in &block.items {
            match item {
                BlockItem::Decl(decl) => self.visit_var_decl(decl),
                BlockItem::Stmt(stmt) => self.visit_stmt(stmt),
            }
        }

        self.scopes.pop();
        debug!("exit scope (depth {})", self.scopes.depth());
    }

    pub fn visit_var_decl(&mut self, decl: &VarDecl) {
        if let Some(init) = &decl.init {
            self.visit_expr(init);
        }
        self.define(
            &decl.name,
            Symbol::variable(decl.ty, decl.is_const, decl.location),
        );
    }

    pub fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Return { value, .. } => {
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
            Stmt::Assign { target, value, .. } => {
                if let Some(symbol) = self.visit_lvalue(target) {
                    if symbol.is_const() {
                        self.errors.push(SemanticError::AssignToConstant {
                            name: target.name.clone(),
                            location: target.location,
                        });
                    }
                }
                self.visit_expr(value);
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.visit_expr(condition);
                self.visit_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.visit_stmt(else_branch);
                }
            }
            Stmt::While {
                condition, body, ..
            } => {
                self.visit_expr(condition);
                self.loop_depth += 1;
                self.visit_stmt(body);
                self.loop_depth -= 1;
            }
            Stmt::Break { location } => {
                if self.loop_depth == 0 {
                    self.errors.push(SemanticError::BreakOutsideLoop {
                        location: *location,
                    });
                }
            }
            Stmt::Continue { location } => {
                if self.loop_depth == 0 {
                    self.errors.push(SemanticError::ContinueOutsideLoop {
                        location: *location,
                    });
                }
            }
            Stmt::Expr { expr, .. } => self.visit_expr(expr),
            Stmt::Block(block) => self.visit_block(block),
        }
    }

    pub fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Number { .. } => {}
            Expr::LValue(lvalue) => {
                self.visit_lvalue(lvalue);
            }
            Expr::Binary { lhs, rhs, .. } => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
            }
            Expr::Unary { operand, .. } => self.visit_expr(operand),
        }
    }

    /// Resolve a name reference, reporting it if undeclared
    pub fn visit_lvalue(&mut self, lvalue: &LValue) -> Option<Symbol> {
        let symbol = self.scopes.lookup(&lvalue.name).copied();
        if symbol.is_none() {
            self.errors.push(SemanticError::Undeclared {
                name: lvalue.name.clone(),
                location: lvalue.location,
            });
        }
        symbol
    }

    fn define(&mut self, name: &str, symbol: Symbol) {
        match self.scopes.define(name, symbol) {
            Ok(()) => trace!(
                "defined '{}' type: {} (scope depth {})",
                name,
                symbol.type_name(),
                self.scopes.depth()
            ),
            Err(previous) => self.errors.push(SemanticError::Redefinition {
                name: name.to_string(),
                location: symbol.location,
                previous: previous.location,
            }),
        }
    }
}

/// Run a fresh analyzer over `unit`
pub fn analyze(unit: &CompUnit) -> Vec<SemanticError> {
    SemanticAnalyzer::new().analyze(unit)
}
