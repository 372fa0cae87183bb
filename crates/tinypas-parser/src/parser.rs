//! Recursive-descent parser over the token registry.
//!
//! One method per grammar production. Each method starts at the cursor,
//! consumes everything its production covers and leaves the cursor on the
//! first token after it. The first mismatch aborts the whole parse.

use tinypas_syntax::ast::*;
use tinypas_syntax::error::{error_at_token, Error, ErrorKind, Result};
use tinypas_syntax::registry::TokenRegistry;
use tinypas_syntax::token::{Category, Token, TokenType};

/// Nesting budget shared by statements and expressions. Every nested
/// statement, parenthesized group and chained operator takes one level.
pub const MAX_DEPTH: usize = 128;

/// True when `lexeme` is a well-formed number literal: digits with at most
/// one decimal point.
pub fn is_valid_number(lexeme: &str) -> bool {
    !lexeme.is_empty()
        && lexeme.chars().all(|c| c.is_ascii_digit() || c == '.')
        && lexeme.chars().filter(|&c| c == '.').count() <= 1
}

/// Parses a complete program from a filled registry.
pub fn parse_tokens(registry: &TokenRegistry) -> Result<Program> {
    if registry.is_empty() {
        return Err(Error::new(ErrorKind::NoTokensToParse));
    }
    Parser::new(registry).parse_program()
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(registry: &'a TokenRegistry) -> Self {
        Self {
            tokens: registry.tokens(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// The token under the cursor, or `kind` positioned at the last token
    /// when the sequence is exhausted.
    fn current(&self, kind: ErrorKind) -> Result<&'a Token> {
        match self.peek() {
            Some(t) => Ok(t),
            None => Err(self.exhausted(kind)),
        }
    }

    fn exhausted(&self, kind: ErrorKind) -> Error {
        match self.tokens.last() {
            Some(t) => Error::with_span(kind, t.line, t.col),
            None => Error::new(kind),
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Consumes the current token and requires another to follow it;
    /// otherwise fails with `kind` at the consumed token.
    fn advance_expecting(&mut self, kind: ErrorKind) -> Result<()> {
        let consumed = self.current(kind)?;
        self.advance();
        if self.peek().is_none() {
            return error_at_token(kind, consumed);
        }
        Ok(())
    }

    /// Takes one nesting level, failing at the current token once
    /// `MAX_DEPTH` is reached.
    fn descend(&mut self) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return match self.peek() {
                Some(tok) => error_at_token(ErrorKind::NestingTooDeep, tok),
                None => Err(self.exhausted(ErrorKind::NestingTooDeep)),
            };
        }
        self.depth += 1;
        Ok(())
    }

    /// Parses a statement's expression. Levels taken inside it are held until
    /// the whole expression is built, so they bound the height of its tree.
    fn parse_root_expression(&mut self) -> Result<Expr> {
        let base = self.depth;
        let expr = self.parse_expression();
        self.depth = base;
        expr
    }

    fn at_reserved_word(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_reserved_word(word))
    }

    fn at_symbol(&self, symbol: &str) -> bool {
        self.peek().is_some_and(|t| t.is_symbol(symbol))
    }

    /// Requires the current token to be the reserved word `word`.
    fn expect_reserved_word(&self, word: &str, kind: ErrorKind) -> Result<&'a Token> {
        let tok = self.current(kind)?;
        if !tok.is_reserved_word(word) {
            return error_at_token(kind, tok);
        }
        Ok(tok)
    }

    /// Requires the current token to be the symbol `symbol`.
    fn expect_symbol(&self, symbol: &str, kind: ErrorKind) -> Result<&'a Token> {
        let tok = self.current(kind)?;
        if !tok.is_symbol(symbol) {
            return error_at_token(kind, tok);
        }
        Ok(tok)
    }

    /// Program := 'program' Identifier ';' Block '.'
    pub fn parse_program(&mut self) -> Result<Program> {
        self.expect_reserved_word("program", ErrorKind::ExpectedProgram)?;
        self.advance_expecting(ErrorKind::ExpectedIdentifierAfterProgram)?;

        let name = self.current(ErrorKind::ExpectedIdentifierAfterProgram)?;
        if name.kind() != TokenType::Identifier {
            return error_at_token(ErrorKind::ExpectedIdentifierAfterProgram, name);
        }
        self.advance_expecting(ErrorKind::ExpectedSemicolon)?;

        self.expect_symbol(";", ErrorKind::ExpectedSemicolon)?;
        self.advance_expecting(ErrorKind::ExpectedBlockAfterProgramDeclaration)?;

        let block = self.parse_block()?;

        self.expect_symbol(".", ErrorKind::ExpectedDotAfterProgramBlock)?;
        self.advance();

        if let Some(extra) = self.peek() {
            return error_at_token(ErrorKind::UnexpectedTokenAfterProgram, extra);
        }

        Ok(Program {
            name: name.lexeme.clone(),
            block,
        })
    }

    /// Block := VarDeclaration CompoundStatement
    pub fn parse_block(&mut self) -> Result<Block> {
        let declarations = self.parse_var_declaration()?;
        let body = self.parse_compound_statement()?;
        Ok(Block { declarations, body })
    }

    /// VarDeclaration := ('var' Declaration ';')*
    pub fn parse_var_declaration(&mut self) -> Result<Vec<Declaration>> {
        let mut declarations = Vec::new();
        while self.at_reserved_word("var") {
            self.advance_expecting(ErrorKind::ExpectedIdentifierAfterVar)?;
            declarations.push(self.parse_declaration()?);
            self.expect_symbol(";", ErrorKind::ExpectedSemicolon)?;
            self.advance();
        }
        Ok(declarations)
    }

    /// Declaration := IdentifierList ':' ReservedType
    pub fn parse_declaration(&mut self) -> Result<Declaration> {
        let names = self.parse_identifier_list()?;

        self.expect_symbol(":", ErrorKind::ExpectedCommaOrColon)?;
        self.advance_expecting(ErrorKind::ExpectedType)?;

        let ty_tok = self.current(ErrorKind::ExpectedType)?;
        let ty = match ty_tok.kind() {
            TokenType::ReservedType => Type::from_lexeme(&ty_tok.lexeme),
            _ => None,
        };
        let Some(ty) = ty else {
            return error_at_token(ErrorKind::ExpectedType, ty_tok);
        };
        self.advance_expecting(ErrorKind::ExpectedSemicolon)?;

        Ok(Declaration { names, ty })
    }

    /// IdentifierList := Identifier (',' Identifier)*
    pub fn parse_identifier_list(&mut self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        loop {
            let tok = self.current(ErrorKind::ExpectedIdentifier)?;
            if tok.kind() != TokenType::Identifier {
                return error_at_token(ErrorKind::ExpectedIdentifier, tok);
            }
            names.push(tok.lexeme.clone());
            self.advance_expecting(ErrorKind::ExpectedCommaOrColon)?;

            if !self.at_symbol(",") {
                break;
            }
            self.advance_expecting(ErrorKind::ExpectedIdentifierAfterComma)?;
            let next = self.current(ErrorKind::ExpectedIdentifierAfterComma)?;
            if next.kind() != TokenType::Identifier {
                return error_at_token(ErrorKind::ExpectedIdentifierAfterComma, next);
            }
        }
        Ok(names)
    }

    /// CompoundStatement := 'begin' Statement* 'end'
    pub fn parse_compound_statement(&mut self) -> Result<CompoundStatement> {
        self.expect_reserved_word("begin", ErrorKind::ExpectedBegin)?;
        self.advance_expecting(ErrorKind::ExpectedStatementAfterBegin)?;

        let mut statements = Vec::new();
        loop {
            let tok = self.current(ErrorKind::ExpectedEnd)?;
            if tok.is_reserved_word("end") {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        self.advance();

        Ok(CompoundStatement { statements })
    }

    /// Statement := Assignment | VarDeclaration | CompoundStatement
    ///            | Conditional | Repetitive
    pub fn parse_statement(&mut self) -> Result<Stmt> {
        self.descend()?;
        let stmt = self.parse_statement_body();
        self.depth -= 1;
        stmt
    }

    fn parse_statement_body(&mut self) -> Result<Stmt> {
        let tok = self.current(ErrorKind::InvalidCommand)?;
        match tok.kind() {
            TokenType::Identifier => self.parse_assignment(),
            TokenType::ReservedWord => match tok.lexeme.as_str() {
                "var" => Ok(Stmt::VarDecl(self.parse_var_declaration()?)),
                "begin" => Ok(Stmt::Compound(self.parse_compound_statement()?)),
                "if" => self.parse_conditional(),
                "while" => self.parse_repetitive(),
                _ => error_at_token(ErrorKind::InvalidCommand, tok),
            },
            _ => error_at_token(ErrorKind::InvalidCommand, tok),
        }
    }

    /// Assignment := Identifier ':=' Expression ';'
    pub fn parse_assignment(&mut self) -> Result<Stmt> {
        let target = self.current(ErrorKind::ExpectedIdentifier)?;
        if target.kind() != TokenType::Identifier {
            return error_at_token(ErrorKind::ExpectedIdentifier, target);
        }
        self.advance_expecting(ErrorKind::ExpectedAssignmentOperator)?;

        let op = self.current(ErrorKind::ExpectedAssignmentOperator)?;
        if op.category != Category::AssignmentOperator {
            return error_at_token(ErrorKind::ExpectedAssignmentOperator, op);
        }
        self.advance_expecting(ErrorKind::ExpectedExpressionAfterAssignment)?;

        let expr = self.parse_root_expression()?;

        self.expect_symbol(";", ErrorKind::ExpectedSemicolon)?;
        self.advance();

        Ok(Stmt::Assign {
            name: target.lexeme.clone(),
            expr,
        })
    }

    /// Conditional := 'if' Expression 'then' Statement ('else' Statement)?
    pub fn parse_conditional(&mut self) -> Result<Stmt> {
        self.expect_reserved_word("if", ErrorKind::ExpectedIf)?;
        self.advance_expecting(ErrorKind::ExpectedExpressionAfterIf)?;

        let cond = self.parse_root_expression()?;

        self.expect_reserved_word("then", ErrorKind::ExpectedThen)?;
        self.advance_expecting(ErrorKind::ExpectedStatementAfterThen)?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.at_reserved_word("else") {
            self.advance_expecting(ErrorKind::ExpectedStatementAfterElse)?;
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    /// Repetitive := 'while' Expression 'do' Statement
    pub fn parse_repetitive(&mut self) -> Result<Stmt> {
        self.expect_reserved_word("while", ErrorKind::ExpectedWhile)?;
        self.advance_expecting(ErrorKind::ExpectedExpressionAfterWhile)?;

        let cond = self.parse_root_expression()?;

        self.expect_reserved_word("do", ErrorKind::ExpectedDo)?;
        self.advance_expecting(ErrorKind::ExpectedStatementAfterDo)?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While { cond, body })
    }

    /// Binary operator under the cursor if its lexeme is one of `accepted`.
    fn binary_op_at(&self, accepted: &[&str]) -> Option<BinaryOp> {
        let tok = self.peek()?;
        if tok.kind() != TokenType::Operator || !accepted.contains(&tok.lexeme.as_str()) {
            return None;
        }
        BinaryOp::from_lexeme(&tok.lexeme)
    }

    /// Expression := SimpleExpression (RelOp SimpleExpression)?
    pub fn parse_expression(&mut self) -> Result<Expr> {
        self.descend()?;
        let lhs = self.parse_simple_expression()?;

        if let Some(op) = self.binary_op_at(&["=", "<>", "<", "<=", ">", ">="]) {
            self.advance_expecting(ErrorKind::ExpectedExpressionAfterOperator)?;
            let rhs = self.parse_simple_expression()?;
            return Ok(Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            });
        }

        Ok(lhs)
    }

    /// SimpleExpression := ('+'|'-')? Term (('+'|'-') Term)*
    pub fn parse_simple_expression(&mut self) -> Result<Expr> {
        let sign = match self.binary_op_at(&["+", "-"]) {
            Some(BinaryOp::Sub) => Some(UnaryOp::Minus),
            Some(_) => Some(UnaryOp::Plus),
            None => None,
        };
        if sign.is_some() {
            self.advance_expecting(ErrorKind::ExpectedTermAfterOperator)?;
        }

        let mut expr = self.parse_term()?;
        if let Some(op) = sign {
            expr = Expr::Unary {
                op,
                operand: Box::new(expr),
            };
        }

        while let Some(op) = self.binary_op_at(&["+", "-"]) {
            self.descend()?;
            self.advance_expecting(ErrorKind::ExpectedTermAfterOperator)?;
            let rhs = self.parse_term()?;
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
            };
        }

        Ok(expr)
    }

    /// Term := Factor (('*'|'/') Factor)*
    pub fn parse_term(&mut self) -> Result<Expr> {
        let mut expr = self.parse_factor()?;

        while let Some(op) = self.binary_op_at(&["*", "/"]) {
            self.descend()?;
            self.advance_expecting(ErrorKind::ExpectedFactorAfterOperator)?;
            let rhs = self.parse_factor()?;
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
            };
        }

        Ok(expr)
    }

    /// Factor := Number | Identifier | '(' Expression ')'
    pub fn parse_factor(&mut self) -> Result<Expr> {
        let tok = self.current(ErrorKind::InvalidFactor)?;
        match tok.kind() {
            TokenType::Number => {
                if !is_valid_number(&tok.lexeme) {
                    return error_at_token(ErrorKind::InvalidNumber, tok);
                }
                let kind = if tok.category == Category::RealNumber {
                    NumberKind::Real
                } else {
                    NumberKind::Integer
                };
                self.advance();
                Ok(Expr::Number {
                    lexeme: tok.lexeme.clone(),
                    kind,
                })
            }
            TokenType::Identifier => {
                self.advance();
                Ok(Expr::Ident(tok.lexeme.clone()))
            }
            TokenType::Symbol if tok.lexeme == "(" => {
                self.advance_expecting(ErrorKind::ExpectedExpressionAfterOpenParen)?;
                let inner = self.parse_expression()?;
                self.expect_symbol(")", ErrorKind::ExpectedClosingParen)?;
                self.advance();
                Ok(inner)
            }
            _ => error_at_token(ErrorKind::InvalidFactor, tok),
        }
    }
}
