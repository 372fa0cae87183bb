//! Token definitions for the tinypas scanner.
//!
//! A token is the smallest classified unit of program text. Every token has a
//! [`Category`] (the fine-grained classification the scanner decided on), from
//! which both its coarse [`TokenType`] and its human-readable name derive.
//!
//! # Token Categories
//!
//! - **Reserved words**: `program`, `var`, `begin`, `if`, `while`, ...
//! - **Reserved types**: `integer`, `real`, `char`, ...
//! - **Reserved operators**: `not`, `and`, `or`, `mod`
//! - **Identifiers**: `x`, `total_sum`, `_tmp`
//! - **Operators**: arithmetic (`+ - * /`), relational (`= <> < <= > >=`),
//!   assignment (`:=`)
//! - **Symbols**: `{ } ; ( ) . , :`
//! - **Literals**: integer and real numbers, quoted strings
//! - **Special**: the end-of-file marker
//!
//! # Examples
//!
//! ```rust
//! use tinypas_syntax::{Category, Token, TokenType};
//!
//! let token = Token::new(Category::AssignmentOperator, ":=", 3, 7);
//! assert_eq!(token.kind(), TokenType::Operator);
//! assert_eq!(token.name(), "Assignment Operator");
//! assert_eq!(token.to_string(), "<4, Assignment Operator, ':='> : <3, 7>");
//! ```

use std::fmt;

use serde::Serialize;

/// Words with a fixed syntactic meaning.
pub const RESERVED_WORDS: &[&str] = &[
    "program", "var", "begin", "end", "if", "else", "then", "do", "while", "for", "to", "downto",
    "repeat", "until", "case", "of", "function", "procedure", "array", "record", "const", "type",
    "file", "set", "goto", "with", "in",
];

/// Names of the built-in types.
pub const RESERVED_TYPES: &[&str] = &[
    "integer", "real", "boolean", "char", "string", "double", "byte", "word", "longint",
    "shortint", "single", "extended", "comp", "currency",
];

/// Operators spelled as words.
pub const RESERVED_OPERATORS: &[&str] = &["not", "and", "or", "mod"];

/// Coarse token classification.
///
/// The declaration order is significant: the ordinal of each variant is the
/// integer printed in token listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    ReservedWord,
    ReservedType,
    ReservedOperator,
    Identifier,
    Operator,
    Symbol,
    Number,
    String,
    EndOfFile,
    Error,
}

impl TokenType {
    /// Position of the variant in declaration order.
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Fine-grained classification chosen by the scanner.
///
/// Several categories share one [`TokenType`]: the three operator flavours are
/// all `Operator`, integer and real literals are both `Number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    ReservedWord,
    ReservedType,
    ReservedOperator,
    Identifier,
    ArithmeticOperator,
    RelationalOperator,
    AssignmentOperator,
    Symbol,
    IntegerNumber,
    RealNumber,
    String,
    EndOfFile,
}

impl Category {
    /// The coarse type this category belongs to.
    pub fn kind(self) -> TokenType {
        match self {
            Category::ReservedWord => TokenType::ReservedWord,
            Category::ReservedType => TokenType::ReservedType,
            Category::ReservedOperator => TokenType::ReservedOperator,
            Category::Identifier => TokenType::Identifier,
            Category::ArithmeticOperator
            | Category::RelationalOperator
            | Category::AssignmentOperator => TokenType::Operator,
            Category::Symbol => TokenType::Symbol,
            Category::IntegerNumber | Category::RealNumber => TokenType::Number,
            Category::String => TokenType::String,
            Category::EndOfFile => TokenType::EndOfFile,
        }
    }

    /// Human-readable label used in token listings.
    pub fn label(self) -> &'static str {
        match self {
            Category::ReservedWord => "Reserved-word",
            Category::ReservedType => "Reserved-type",
            Category::ReservedOperator => "Reserved-operator",
            Category::Identifier => "Identifier",
            Category::ArithmeticOperator => "Binary Arithmetic Operator",
            Category::RelationalOperator => "Relational Operator",
            Category::AssignmentOperator => "Assignment Operator",
            Category::Symbol => "Symbol",
            Category::IntegerNumber => "Integer number",
            Category::RealNumber => "Real number",
            Category::String => "String",
            Category::EndOfFile => "EOF",
        }
    }

    /// Classifies a scanned word.
    ///
    /// The checks run in a fixed order (reserved word, reserved type, reserved
    /// operator, identifier) and compare case-sensitively, so `IF` is an
    /// identifier.
    pub fn classify_word(word: &str) -> Category {
        if RESERVED_WORDS.contains(&word) {
            Category::ReservedWord
        } else if RESERVED_TYPES.contains(&word) {
            Category::ReservedType
        } else if RESERVED_OPERATORS.contains(&word) {
            Category::ReservedOperator
        } else {
            Category::Identifier
        }
    }
}

/// A classified lexeme with the position where it ended.
///
/// `line` is 1-based. `col` is the column of the last character consumed for
/// the token, so multi-character tokens report their final character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Scanner classification
    pub category: Category,

    /// Exact source text of the token
    pub lexeme: String,

    /// Line of the token's last character (1-based)
    pub line: usize,

    /// Column of the token's last character
    pub col: usize,
}

impl Token {
    pub fn new(category: Category, lexeme: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            category,
            lexeme: lexeme.into(),
            line,
            col,
        }
    }

    /// The synthetic end-of-file token.
    pub fn eof(line: usize, col: usize) -> Self {
        Self::new(Category::EndOfFile, "EOF", line, col)
    }

    pub fn kind(&self) -> TokenType {
        self.category.kind()
    }

    pub fn name(&self) -> &'static str {
        self.category.label()
    }

    /// True for a token of type `kind` spelled exactly `lexeme`.
    pub fn is(&self, kind: TokenType, lexeme: &str) -> bool {
        self.kind() == kind && self.lexeme == lexeme
    }

    pub fn is_symbol(&self, lexeme: &str) -> bool {
        self.is(TokenType::Symbol, lexeme)
    }

    pub fn is_reserved_word(&self, lexeme: &str) -> bool {
        self.is(TokenType::ReservedWord, lexeme)
    }
}

impl fmt::Display for Token {
    /// Formats the token as a listing line: `<type, name, 'lexeme'> : <row, column>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}, {}, '{}'> : <{}, {}>",
            self.kind().ordinal(),
            self.name(),
            self.lexeme,
            self.line,
            self.col
        )
    }
}
