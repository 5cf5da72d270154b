//! Indented debug rendering of the AST
//!
//! Every node renders as one line naming the node, followed by its children
//! indented two spaces deeper. The output is meant for people and tests; it
//! carries no compatibility guarantees.

use super::ast::*;
use std::fmt::{self, Formatter};

const INDENT: usize = 2;

impl CompUnit {
    /// Render the whole tree
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CompUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "CompUnit")?;
        for item in &self.items {
            match item {
                ExternalDecl::Func(func) => write_func(f, func, INDENT)?,
                ExternalDecl::Var(decl) => write_var_decl(f, decl, INDENT)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for FuncDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_func(f, self, 0)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_block(f, self, 0)
    }
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_var_decl(f, self, 0)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_stmt(f, self, 0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_expr(f, self, 0)
    }
}

fn line(f: &mut Formatter<'_>, indent: usize, text: fmt::Arguments<'_>) -> fmt::Result {
    writeln!(f, "{:indent$}{}", "", text, indent = indent)
}

fn write_func(f: &mut Formatter<'_>, func: &FuncDef, indent: usize) -> fmt::Result {
    line(
        f,
        indent,
        format_args!("FuncDef: {} [{}]", func.name, func.return_type),
    )?;
    write_block(f, &func.body, indent + INDENT)
}

fn write_block(f: &mut Formatter<'_>, block: &Block, indent: usize) -> fmt::Result {
    line(f, indent, format_args!("Block"))?;
    for item in &block.items {
        match item {
            BlockItem::Decl(decl) => write_var_decl(f, decl, indent + INDENT)?,
            BlockItem::Stmt(stmt) => write_stmt(f, stmt, indent + INDENT)?,
        }
    }
    Ok(())
}

fn write_var_decl(f: &mut Formatter<'_>, decl: &VarDecl, indent: usize) -> fmt::Result {
    let qualifier = if decl.is_const { "const " } else { "" };
    let init_marker = if decl.init.is_some() { " =" } else { "" };
    line(
        f,
        indent,
        format_args!("VarDecl: {}{} {}{}", qualifier, decl.ty, decl.name, init_marker),
    )?;
    if let Some(init) = &decl.init {
        write_expr(f, init, indent + INDENT)?;
    }
    Ok(())
}

fn write_stmt(f: &mut Formatter<'_>, stmt: &Stmt, indent: usize) -> fmt::Result {
    let child = indent + INDENT;
    match stmt {
        Stmt::Return { value, .. } => {
            line(f, indent, format_args!("Return"))?;
            if let Some(value) = value {
                write_expr(f, value, child)?;
            }
        }
        Stmt::Assign { target, value, .. } => {
            line(f, indent, format_args!("Assign"))?;
            line(f, child, format_args!("LValue: {}", target.name))?;
            write_expr(f, value, child)?;
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            line(f, indent, format_args!("If"))?;
            line(f, child, format_args!("Cond:"))?;
            write_expr(f, condition, child + INDENT)?;
            line(f, child, format_args!("Then:"))?;
            write_stmt(f, then_branch, child + INDENT)?;
            if let Some(else_branch) = else_branch {
                line(f, child, format_args!("Else:"))?;
                write_stmt(f, else_branch, child + INDENT)?;
            }
        }
        Stmt::While {
            condition, body, ..
        } => {
            line(f, indent, format_args!("While"))?;
            line(f, child, format_args!("Cond:"))?;
            write_expr(f, condition, child + INDENT)?;
            line(f, child, format_args!("Body:"))?;
            write_stmt(f, body, child + INDENT)?;
        }
        Stmt::Break { .. } => line(f, indent, format_args!("Break"))?,
        Stmt::Continue { .. } => line(f, indent, format_args!("Continue"))?,
        Stmt::Expr { expr, .. } => {
            line(f, indent, format_args!("ExprStmt"))?;
            write_expr(f, expr, child)?;
        }
        Stmt::Block(block) => write_block(f, block, indent)?,
    }
    Ok(())
}

fn write_expr(f: &mut Formatter<'_>, expr: &Expr, indent: usize) -> fmt::Result {
    match expr {
        Expr::Number {
            value: Number::Int(v),
            ..
        } => line(f, indent, format_args!("Number: {}", v)),
        Expr::Number {
            value: Number::Float(v),
            ..
        } => line(f, indent, format_args!("Number: {:?}", v)),
        Expr::LValue(lvalue) => line(f, indent, format_args!("LValue: {}", lvalue.name)),
        Expr::Binary { op, lhs, rhs, .. } => {
            line(f, indent, format_args!("BinaryExpr: {}", op.spelling()))?;
            write_expr(f, lhs, indent + INDENT)?;
            write_expr(f, rhs, indent + INDENT)
        }
        Expr::Unary { op, operand, .. } => {
            line(f, indent, format_args!("UnaryExpr: {}", op.spelling()))?;
            write_expr(f, operand, indent + INDENT)
        }
    }
}
