//! Canonical pretty-printer for tinypas programs.
//!
//! Output re-parses to the same AST: operands are parenthesized only where
//! precedence or the grammar's single leading sign would otherwise change
//! the tree. Comments are not preserved.

use tinypas_syntax::ast::*;

const INDENT: usize = 2;

pub fn format_program(p: &Program) -> String {
    let mut out = String::new();
    out.push_str("program ");
    out.push_str(&p.name);
    out.push_str(";\n");
    for decl in &p.block.declarations {
        out.push_str(&format_declaration(decl, 0));
    }
    out.push_str("begin\n");
    for s in &p.block.body.statements {
        out.push_str(&format_stmt(s, INDENT));
    }
    out.push_str("end.\n");
    out
}

fn format_declaration(d: &Declaration, indent: usize) -> String {
    format!("{}var {} : {};\n", " ".repeat(indent), d.names.join(", "), d.ty)
}

pub fn format_stmt(s: &Stmt, indent: usize) -> String {
    let mut out = String::new();
    let pad = " ".repeat(indent);
    match s {
        Stmt::Assign { name, expr } => {
            out.push_str(&pad);
            out.push_str(name);
            out.push_str(" := ");
            out.push_str(&format_expr(expr));
            out.push_str(";\n");
        }
        Stmt::VarDecl(decls) => {
            for d in decls {
                out.push_str(&format_declaration(d, indent));
            }
        }
        Stmt::Compound(block) => {
            out.push_str(&pad);
            out.push_str("begin\n");
            for st in &block.statements {
                out.push_str(&format_stmt(st, indent + INDENT));
            }
            out.push_str(&pad);
            out.push_str("end\n");
        }
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            out.push_str(&pad);
            out.push_str("if ");
            out.push_str(&format_expr(cond));
            out.push_str(" then\n");
            out.push_str(&format_branch(then_branch, indent));
            if let Some(else_branch) = else_branch {
                out.push_str(&pad);
                out.push_str("else\n");
                out.push_str(&format_branch(else_branch, indent));
            }
        }
        Stmt::While { cond, body } => {
            out.push_str(&pad);
            out.push_str("while ");
            out.push_str(&format_expr(cond));
            out.push_str(" do\n");
            out.push_str(&format_branch(body, indent));
        }
    }
    out
}

/// A `begin ... end` body stays level with its header; anything else nests.
fn format_branch(s: &Stmt, indent: usize) -> String {
    match s {
        Stmt::Compound(_) => format_stmt(s, indent),
        _ => format_stmt(s, indent + INDENT),
    }
}

pub fn format_expr(e: &Expr) -> String {
    match e {
        Expr::Number { lexeme, .. } => lexeme.clone(),
        Expr::Ident(name) => name.clone(),
        Expr::Unary { op, operand } => format!("{}{}", op.as_str(), wrap(operand)),
        Expr::Binary { op, lhs, rhs } => {
            let p = precedence(*op);
            // Relational operators do not chain, so an equal-precedence lhs
            // needs parentheses too.
            let lhs_parens = if op.is_relational() {
                rank(lhs) <= p
            } else {
                rank(lhs) < p
            };
            let rhs_parens = rank(rhs) <= p;
            format!(
                "{} {} {}",
                parens_if(lhs, lhs_parens),
                op.as_str(),
                parens_if(rhs, rhs_parens)
            )
        }
    }
}

fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Mul | BinaryOp::Div => 3,
        BinaryOp::Add | BinaryOp::Sub => 2,
        _ => 1,
    }
}

/// Binding strength of an expression as an operand. A signed expression
/// ranks with `+`/`-` since the sign belongs to the whole simple expression.
fn rank(e: &Expr) -> u8 {
    match e {
        Expr::Number { .. } | Expr::Ident(_) => 4,
        Expr::Unary { .. } => 2,
        Expr::Binary { op, .. } => precedence(*op),
    }
}

fn parens_if(e: &Expr, parens: bool) -> String {
    if parens {
        format!("({})", format_expr(e))
    } else {
        format_expr(e)
    }
}

fn wrap(e: &Expr) -> String {
    match e {
        Expr::Number { .. } | Expr::Ident(_) => format_expr(e),
        _ => format!("({})", format_expr(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinypas_lexer::Lexer;
    use tinypas_parser::parse_tokens;

    fn parse(src: &str) -> Program {
        let registry = Lexer::new(src).tokenize().expect("lex");
        parse_tokens(&registry).expect("parse")
    }

    fn expr_of(src_expr: &str) -> Expr {
        let program = parse(&format!("program P; begin x := {}; end.", src_expr));
        match &program.block.body.statements[0] {
            Stmt::Assign { expr, .. } => expr.clone(),
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    fn assert_reparses(src: &str) {
        let program = parse(src);
        let formatted = format_program(&program);
        assert_eq!(parse(&formatted), program, "formatted:\n{}", formatted);
        assert_eq!(format_program(&parse(&formatted)), formatted);
    }

    #[test]
    fn test_conditionals_demo_is_canonical() {
        let src = include_str!("../../../demos/conditionals.pas");
        assert_eq!(format_program(&parse(src)), src);
    }

    #[test]
    fn test_sum_demo_reparses() {
        assert_reparses(include_str!("../../../demos/sum.pas"));
    }

    #[test]
    fn test_drops_redundant_parens() {
        assert_eq!(format_expr(&expr_of("(a + (b * c))")), "a + b * c");
        assert_eq!(format_expr(&expr_of("((a + b) + c)")), "a + b + c");
    }

    #[test]
    fn test_keeps_required_parens() {
        assert_eq!(format_expr(&expr_of("(a + b) * c")), "(a + b) * c");
        assert_eq!(format_expr(&expr_of("a - (b - c)")), "a - (b - c)");
        assert_eq!(format_expr(&expr_of("a / (b * c)")), "a / (b * c)");
        assert_eq!(format_expr(&expr_of("(a < b) = (c < d)")), "(a < b) = (c < d)");
    }

    #[test]
    fn test_unary_sign() {
        assert_eq!(format_expr(&expr_of("-(a - b)")), "-(a - b)");
        assert_eq!(format_expr(&expr_of("-a * b")), "-(a * b)");
        assert_eq!(format_expr(&expr_of("-a + b")), "-a + b");
        assert_eq!(format_expr(&expr_of("a + (-b)")), "a + (-b)");
        assert_eq!(format_expr(&expr_of("a < -b")), "a < -b");
    }

    #[test]
    fn test_layout() {
        let src = "program P; var x, y : integer; begin while x < 3 do x := x + 1; \
                   if x = 3 then begin y := 2.5; end else y := 0; end.";
        assert_eq!(
            format_program(&parse(src)),
            "program P;\n\
             var x, y : integer;\n\
             begin\n\
             \x20 while x < 3 do\n\
             \x20   x := x + 1;\n\
             \x20 if x = 3 then\n\
             \x20 begin\n\
             \x20   y := 2.5;\n\
             \x20 end\n\
             \x20 else\n\
             \x20   y := 0;\n\
             end.\n"
        );
    }

    #[test]
    fn test_nested_statements_reparse() {
        assert_reparses(
            "program N; begin if a then if b then c := 1; else c := 2; \
             while -x >= (y - 1) * 2 do begin var t : real; t := 3.; end end.",
        );
    }
}
