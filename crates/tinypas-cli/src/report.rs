//! Token listings, AST trees and JSON reports.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use tinypas_syntax::ast::*;
use tinypas_syntax::registry::TokenRegistry;
use tinypas_syntax::token::Token;

/// One token in the JSON report.
#[derive(Debug, Serialize)]
pub struct TokenRecord<'a> {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: &'static str,
    pub lexeme: &'a str,
    pub row: usize,
    pub column: usize,
}

impl<'a> From<&'a Token> for TokenRecord<'a> {
    fn from(t: &'a Token) -> Self {
        Self {
            kind: t.kind().ordinal(),
            name: t.name(),
            lexeme: &t.lexeme,
            row: t.line,
            column: t.col,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub tokens: Vec<TokenRecord<'a>>,
    pub ast: &'a Program,
}

impl<'a> Report<'a> {
    pub fn new(registry: &'a TokenRegistry, ast: &'a Program) -> Self {
        Self {
            tokens: registry.iter().map(TokenRecord::from).collect(),
            ast,
        }
    }
}

/// Token listing, one `<type, name, 'lexeme'> : <row, column>` line per token.
pub fn token_listing(registry: &TokenRegistry) -> String {
    let mut out = String::new();
    for token in registry {
        let _ = writeln!(out, "{}", token);
    }
    out
}

/// Writes the token listing, creating parent directories as needed.
pub fn write_listing(path: &Path, registry: &TokenRegistry) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, token_listing(registry))
}

/// Indented tree view of a program.
pub fn render_ast(program: &Program) -> String {
    let mut out = String::new();
    line(&mut out, 0, &format!("program {}", program.name));
    for decl in &program.block.declarations {
        render_declaration(&mut out, 1, decl);
    }
    render_compound(&mut out, 1, &program.block.body);
    out
}

fn line(out: &mut String, depth: usize, text: &str) {
    let _ = writeln!(out, "{}{}", "  ".repeat(depth), text);
}

fn render_declaration(out: &mut String, depth: usize, decl: &Declaration) {
    line(out, depth, &format!("var {} : {}", decl.names.join(", "), decl.ty));
}

fn render_compound(out: &mut String, depth: usize, block: &CompoundStatement) {
    line(out, depth, "begin");
    for stmt in &block.statements {
        render_stmt(out, depth + 1, stmt);
    }
}

fn render_stmt(out: &mut String, depth: usize, stmt: &Stmt) {
    match stmt {
        Stmt::Assign { name, expr } => {
            line(out, depth, &format!(":= {}", name));
            render_expr(out, depth + 1, expr);
        }
        Stmt::VarDecl(decls) => {
            for decl in decls {
                render_declaration(out, depth, decl);
            }
        }
        Stmt::Compound(block) => render_compound(out, depth, block),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            line(out, depth, "if");
            render_expr(out, depth + 1, cond);
            line(out, depth, "then");
            render_stmt(out, depth + 1, then_branch);
            if let Some(else_branch) = else_branch {
                line(out, depth, "else");
                render_stmt(out, depth + 1, else_branch);
            }
        }
        Stmt::While { cond, body } => {
            line(out, depth, "while");
            render_expr(out, depth + 1, cond);
            line(out, depth, "do");
            render_stmt(out, depth + 1, body);
        }
    }
}

fn render_expr(out: &mut String, depth: usize, expr: &Expr) {
    match expr {
        Expr::Number { lexeme, .. } => line(out, depth, lexeme),
        Expr::Ident(name) => line(out, depth, name),
        Expr::Unary { op, operand } => {
            line(out, depth, &format!("unary {}", op.as_str()));
            render_expr(out, depth + 1, operand);
        }
        Expr::Binary { op, lhs, rhs } => {
            line(out, depth, op.as_str());
            render_expr(out, depth + 1, lhs);
            render_expr(out, depth + 1, rhs);
        }
    }
}
