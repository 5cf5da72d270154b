// AST (Abstract Syntax Tree) definitions for the SysY front end

use super::token::TokenKind;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Declared type of a variable or function return value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSpec {
    Int,
    Float,
    Void,
}

impl TypeSpec {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::KwInt => Some(TypeSpec::Int),
            TokenKind::KwFloat => Some(TypeSpec::Float),
            TokenKind::KwVoid => Some(TypeSpec::Void),
            _ => None,
        }
    }

    pub fn spelling(self) -> &'static str {
        match self {
            TypeSpec::Int => "int",
            TypeSpec::Float => "float",
            TypeSpec::Void => "void",
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Logical
    Or,
    And,
    // Equality
    Eq,
    Ne,
    // Relational
    Lt,
    Gt,
    Le,
    Ge,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::PipePipe => BinaryOp::Or,
            TokenKind::AmpAmp => BinaryOp::And,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::Ne,
            TokenKind::Less => BinaryOp::Lt,
            TokenKind::Greater => BinaryOp::Gt,
            TokenKind::LessEq => BinaryOp::Le,
            TokenKind::GreaterEq => BinaryOp::Ge,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            _ => return None,
        };
        Some(op)
    }

    pub fn spelling(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

/// Prefix unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,  // +x
    Minus, // -x
    Not,   // !x
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Bang => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn spelling(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
        }
    }
}

/// Literal value. Int and float are mutually exclusive and fixed at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i32),
    Float(f32),
}

/// Reference to a named storage location
#[derive(Debug, Clone, PartialEq)]
pub struct LValue {
    pub name: String,
    pub location: SourceLocation,
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number {
        value: Number,
        location: SourceLocation,
    },
    LValue(LValue),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        location: SourceLocation,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this expression
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Number { location, .. }
            | Expr::Binary { location, .. }
            | Expr::Unary { location, .. } => *location,
            Expr::LValue(lvalue) => lvalue.location,
        }
    }
}

/// Variable declaration: `[const] type name [= init]`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub is_const: bool,
    pub ty: TypeSpec,
    pub name: String,
    pub init: Option<Expr>,
    pub location: SourceLocation,
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Return {
        value: Option<Expr>,
        location: SourceLocation,
    },
    Assign {
        target: LValue,
        value: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },
    Expr {
        expr: Expr,
        location: SourceLocation,
    },
    Block(Block),
}

impl Stmt {
    /// Get the source location of this statement
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::Return { location, .. }
            | Stmt::Assign { location, .. }
            | Stmt::If { location, .. }
            | Stmt::While { location, .. }
            | Stmt::Break { location }
            | Stmt::Continue { location }
            | Stmt::Expr { location, .. } => *location,
            Stmt::Block(block) => block.location,
        }
    }
}

/// One entry of a block, in textual order
#[derive(Debug, Clone, PartialEq)]
pub enum BlockItem {
    Decl(VarDecl),
    Stmt(Stmt),
}

/// Braced sequence of declarations and statements
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub items: Vec<BlockItem>,
    pub location: SourceLocation,
}

/// Function definition. Parameter lists are always empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: String,
    pub return_type: TypeSpec,
    pub body: Block,
    pub location: SourceLocation,
}

/// Top-level children of a compilation unit
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalDecl {
    Func(FuncDef),
    Var(VarDecl),
}

/// Tree root
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompUnit {
    pub items: Vec<ExternalDecl>,
}

impl CompUnit {
    pub fn new() -> Self {
        CompUnit::default()
    }

    pub fn functions(&self) -> impl Iterator<Item = &FuncDef> {
        self.items.iter().filter_map(|item| match item {
            ExternalDecl::Func(func) => Some(func),
            ExternalDecl::Var(_) => None,
        })
    }
}
