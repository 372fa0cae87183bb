//! AST (abstract syntax tree) types for tinypas programs.
//!
//! Every construct owns its children outright; lists (declarations,
//! statements, identifier lists) are plain vectors in source order.

use std::fmt;

use serde::Serialize;

/// Built-in types a declaration can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Type {
    Integer,
    Real,
    Boolean,
    Char,
    String,
    Double,
    Byte,
    Word,
    LongInt,
    ShortInt,
    Single,
    Extended,
    Comp,
    Currency,
}

impl Type {
    /// Maps a reserved-type lexeme to its type.
    pub fn from_lexeme(s: &str) -> Option<Type> {
        let ty = match s {
            "integer" => Type::Integer,
            "real" => Type::Real,
            "boolean" => Type::Boolean,
            "char" => Type::Char,
            "string" => Type::String,
            "double" => Type::Double,
            "byte" => Type::Byte,
            "word" => Type::Word,
            "longint" => Type::LongInt,
            "shortint" => Type::ShortInt,
            "single" => Type::Single,
            "extended" => Type::Extended,
            "comp" => Type::Comp,
            "currency" => Type::Currency,
            _ => return None,
        };
        Some(ty)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Type::Integer => "integer",
            Type::Real => "real",
            Type::Boolean => "boolean",
            Type::Char => "char",
            Type::String => "string",
            Type::Double => "double",
            Type::Byte => "byte",
            Type::Word => "word",
            Type::LongInt => "longint",
            Type::ShortInt => "shortint",
            Type::Single => "single",
            Type::Extended => "extended",
            Type::Comp => "comp",
            Type::Currency => "currency",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a number literal had a fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumberKind {
    Integer,
    Real,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

/// Binary operators, arithmetic and relational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    /// Maps an operator lexeme to its operator.
    pub fn from_lexeme(s: &str) -> Option<BinaryOp> {
        let op = match s {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "=" => BinaryOp::Eq,
            "<>" => BinaryOp::Ne,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::Le,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::Ge,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expressions: literals, names and operator applications.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// A number literal, kept as its source text
    Number { lexeme: String, kind: NumberKind },
    Ident(String),
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
}

/// `name1, name2 : type`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub names: Vec<String>,
    pub ty: Type,
}

/// `begin <statements> end`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CompoundStatement {
    pub statements: Vec<Stmt>,
}

/// Statements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Assign {
        name: String,
        expr: Expr,
    },
    /// One or more `var` declarations appearing among statements
    VarDecl(Vec<Declaration>),
    Compound(CompoundStatement),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
}

/// Declarations followed by the program body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub declarations: Vec<Declaration>,
    pub body: CompoundStatement,
}

/// Entire program: `program <name>; <block>.`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub name: String,
    pub block: Block,
}
