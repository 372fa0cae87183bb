//! Error handling types shared by the tinypas scanner and parser.
//!
//! Every failure in the front end is reported as an [`Error`]: an [`ErrorKind`]
//! naming the exact condition, the offending lexeme when one is relevant, and
//! the source position. Both stages are fail-fast, so a run produces at most
//! one error and no partial result.
//!
//! # Message format
//!
//! ```text
//! <ErrorKind> at <row>:<column>
//! <ErrorKind>: '<lexeme>' at <row>:<column>
//! ```
//!
//! # Examples
//!
//! ```rust
//! use tinypas_syntax::error::{Error, ErrorKind, Result, error_at};
//!
//! let err = Error::with_span(ErrorKind::ExpectedDo, 4, 13);
//! assert_eq!(err.to_string(), "ExpectedDo at 4:13");
//!
//! fn check(word: &str) -> Result<()> {
//!     if word == "begin" {
//!         Ok(())
//!     } else {
//!         error_at(ErrorKind::ExpectedBegin, 1, 5)
//!     }
//! }
//! assert!(check("end").is_err());
//! ```

use std::fmt;

use crate::token::Token;

/// Every condition the scanner or parser can fail with.
///
/// Syntax kinds are tied to the grammar point that failed, so the kind alone
/// tells which construct was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // === Lexical ===
    UnknownCharacter,
    StringNotClosed,

    // === Syntax ===
    NoTokensToParse,
    ExpectedProgram,
    ExpectedIdentifierAfterProgram,
    ExpectedSemicolon,
    ExpectedBlockAfterProgramDeclaration,
    ExpectedDotAfterProgramBlock,
    UnexpectedTokenAfterProgram,
    ExpectedIdentifierAfterVar,
    ExpectedIdentifier,
    ExpectedIdentifierAfterComma,
    ExpectedCommaOrColon,
    ExpectedType,
    ExpectedBegin,
    ExpectedStatementAfterBegin,
    ExpectedEnd,
    InvalidCommand,
    ExpectedAssignmentOperator,
    ExpectedExpressionAfterAssignment,
    ExpectedIf,
    ExpectedExpressionAfterIf,
    ExpectedThen,
    ExpectedStatementAfterThen,
    ExpectedStatementAfterElse,
    ExpectedWhile,
    ExpectedExpressionAfterWhile,
    ExpectedDo,
    ExpectedStatementAfterDo,
    ExpectedExpressionAfterOperator,
    ExpectedTermAfterOperator,
    ExpectedFactorAfterOperator,
    ExpectedExpressionAfterOpenParen,
    ExpectedClosingParen,
    InvalidFactor,
    InvalidNumber,
    NestingTooDeep,
}

impl ErrorKind {
    /// Stable name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnknownCharacter => "UnknownCharacter",
            ErrorKind::StringNotClosed => "StringNotClosed",
            ErrorKind::NoTokensToParse => "NoTokensToParse",
            ErrorKind::ExpectedProgram => "ExpectedProgram",
            ErrorKind::ExpectedIdentifierAfterProgram => "ExpectedIdentifierAfterProgram",
            ErrorKind::ExpectedSemicolon => "ExpectedSemicolon",
            ErrorKind::ExpectedBlockAfterProgramDeclaration => {
                "ExpectedBlockAfterProgramDeclaration"
            }
            ErrorKind::ExpectedDotAfterProgramBlock => "ExpectedDotAfterProgramBlock",
            ErrorKind::UnexpectedTokenAfterProgram => "UnexpectedTokenAfterProgram",
            ErrorKind::ExpectedIdentifierAfterVar => "ExpectedIdentifierAfterVar",
            ErrorKind::ExpectedIdentifier => "ExpectedIdentifier",
            ErrorKind::ExpectedIdentifierAfterComma => "ExpectedIdentifierAfterComma",
            ErrorKind::ExpectedCommaOrColon => "ExpectedCommaOrColon",
            ErrorKind::ExpectedType => "ExpectedType",
            ErrorKind::ExpectedBegin => "ExpectedBegin",
            ErrorKind::ExpectedStatementAfterBegin => "ExpectedStatementAfterBegin",
            ErrorKind::ExpectedEnd => "ExpectedEnd",
            ErrorKind::InvalidCommand => "InvalidCommand",
            ErrorKind::ExpectedAssignmentOperator => "ExpectedAssignmentOperator",
            ErrorKind::ExpectedExpressionAfterAssignment => "ExpectedExpressionAfterAssignment",
            ErrorKind::ExpectedIf => "ExpectedIf",
            ErrorKind::ExpectedExpressionAfterIf => "ExpectedExpressionAfterIf",
            ErrorKind::ExpectedThen => "ExpectedThen",
            ErrorKind::ExpectedStatementAfterThen => "ExpectedStatementAfterThen",
            ErrorKind::ExpectedStatementAfterElse => "ExpectedStatementAfterElse",
            ErrorKind::ExpectedWhile => "ExpectedWhile",
            ErrorKind::ExpectedExpressionAfterWhile => "ExpectedExpressionAfterWhile",
            ErrorKind::ExpectedDo => "ExpectedDo",
            ErrorKind::ExpectedStatementAfterDo => "ExpectedStatementAfterDo",
            ErrorKind::ExpectedExpressionAfterOperator => "ExpectedExpressionAfterOperator",
            ErrorKind::ExpectedTermAfterOperator => "ExpectedTermAfterOperator",
            ErrorKind::ExpectedFactorAfterOperator => "ExpectedFactorAfterOperator",
            ErrorKind::ExpectedExpressionAfterOpenParen => "ExpectedExpressionAfterOpenParen",
            ErrorKind::ExpectedClosingParen => "ExpectedClosingParen",
            ErrorKind::InvalidFactor => "InvalidFactor",
            ErrorKind::InvalidNumber => "InvalidNumber",
            ErrorKind::NestingTooDeep => "NestingTooDeep",
        }
    }

    /// True for failures raised by the scanner.
    pub fn is_lexical(self) -> bool {
        matches!(self, ErrorKind::UnknownCharacter | ErrorKind::StringNotClosed)
    }

    /// A short hint for the most common mistakes behind this kind.
    pub fn help(self) -> Option<&'static str> {
        let hint = match self {
            ErrorKind::UnknownCharacter => "This character is not part of the language.",
            ErrorKind::StringNotClosed => {
                "Strings must be closed with a quote on the same line they start."
            }
            ErrorKind::NoTokensToParse => "The file contains no program text.",
            ErrorKind::ExpectedProgram => "Programs start with: program <name>;",
            ErrorKind::ExpectedSemicolon => {
                "Assignments, declarations and the program header end with ';'."
            }
            ErrorKind::ExpectedDotAfterProgramBlock => "The final 'end' must be followed by '.'.",
            ErrorKind::ExpectedType => "Declarations look like: var x, y : integer;",
            ErrorKind::ExpectedCommaOrColon => "Separate names with ',' and end the list with ':'.",
            ErrorKind::ExpectedEnd => "Every 'begin' needs a matching 'end'.",
            ErrorKind::ExpectedAssignmentOperator => "Assignments use ':=', not '='.",
            ErrorKind::ExpectedThen => "Conditionals look like: if <expr> then <statement>",
            ErrorKind::ExpectedDo => "Loops look like: while <expr> do <statement>",
            ErrorKind::ExpectedClosingParen => "Check that parentheses are balanced.",
            ErrorKind::InvalidCommand => {
                "Statements start with an identifier, 'var', 'begin', 'if' or 'while'."
            }
            ErrorKind::InvalidFactor => "Expected a number, an identifier or '('.",
            ErrorKind::NestingTooDeep => {
                "Blocks, parentheses and operator chains are nested too deeply; split the statement."
            }
            _ => return None,
        };
        Some(hint)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error raised while scanning or parsing.
///
/// # Fields
///
/// - `kind`: which condition failed
/// - `lexeme`: the offending text, when it helps the reader
/// - `line` / `col`: source position, absent only when there is nothing to
///   point at (an empty token sequence)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// Condition that failed
    pub kind: ErrorKind,

    /// Offending lexeme, if relevant
    pub lexeme: Option<String>,

    /// Optional line number in source file (1-based)
    pub line: Option<usize>,

    /// Optional column number in source file
    pub col: Option<usize>,
}

impl Error {
    /// Creates an error without location information.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            lexeme: None,
            line: None,
            col: None,
        }
    }

    /// Creates an error at the given source location.
    ///
    /// ```rust
    /// use tinypas_syntax::{Error, ErrorKind};
    ///
    /// let error = Error::with_span(ErrorKind::StringNotClosed, 2, 9);
    /// assert_eq!(error.to_string(), "StringNotClosed at 2:9");
    /// ```
    pub fn with_span(kind: ErrorKind, line: usize, col: usize) -> Self {
        Self {
            kind,
            lexeme: None,
            line: Some(line),
            col: Some(col),
        }
    }

    /// Creates an error positioned at `token`, quoting its lexeme.
    pub fn at_token(kind: ErrorKind, token: &Token) -> Self {
        Self::with_span(kind, token.line, token.col).with_lexeme(token.lexeme.clone())
    }

    /// Attaches the offending lexeme.
    pub fn with_lexeme(mut self, lexeme: impl Into<String>) -> Self {
        self.lexeme = Some(lexeme.into());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(lexeme) = &self.lexeme {
            write!(f, ": '{}'", lexeme)?;
        }
        if let (Some(l), Some(c)) = (self.line, self.col) {
            write!(f, " at {}:{}", l, c)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for tinypas operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::with_span(kind, line, col))`.
pub fn error_at<T>(kind: ErrorKind, line: usize, col: usize) -> Result<T> {
    Err(Error::with_span(kind, line, col))
}

/// Shorthand for `Err(Error::at_token(kind, token))`.
pub fn error_at_token<T>(kind: ErrorKind, token: &Token) -> Result<T> {
    Err(Error::at_token(kind, token))
}
