//! tinypas lexer: a finite-state scanner that turns program text into tokens.
//!
//! Each call to [`Lexer::next_token`] runs the state machine from its initial
//! state until one token is complete, registers the token and returns it.
//! Scanning is maximal-munch: `<=` is one token, never `<` then `=`.
pub mod source;

pub use source::SourceReader;

use tinypas_syntax::error::{Error, ErrorKind, Result};
use tinypas_syntax::registry::TokenRegistry;
use tinypas_syntax::token::{Category, Token, TokenType};

/// Scanner states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between tokens
    Initial,
    /// Letters, digits and underscores
    Word,
    /// Integer digits
    Integer,
    /// Digits after the decimal point
    Fraction,
    /// After `<` or `>`
    Relational,
    /// After `:`
    Colon,
    /// Inside a quoted string
    Text,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Streaming scanner over one program text.
pub struct Lexer {
    source: SourceReader,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            source: SourceReader::new(input),
        }
    }

    fn emit(&self, registry: &mut TokenRegistry, category: Category, lexeme: String) -> Token {
        let (line, col) = self.source.position();
        let token = Token::new(category, lexeme, line, col);
        registry.insert(token.clone());
        token
    }

    fn fail(&self, kind: ErrorKind) -> Error {
        let (line, col) = self.source.position();
        Error::with_span(kind, line, col)
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.source.read() {
            if c == '\n' {
                break;
            }
        }
    }

    /// Scans the next token.
    ///
    /// Every token except `EndOfFile` is inserted into `registry` before it
    /// is returned. A token still being built when the input runs out is
    /// finished and returned first; the following call yields `EndOfFile`.
    pub fn next_token(&mut self, registry: &mut TokenRegistry) -> Result<Token> {
        let mut state = State::Initial;
        let mut lexeme = String::new();

        loop {
            let ch = self.source.read();
            match state {
                State::Initial => {
                    let c = match ch {
                        Some(c) => c,
                        None => {
                            let (line, col) = self.source.position();
                            return Ok(Token::eof(line, col));
                        }
                    };
                    match c {
                        ' ' | '\t' | '\n' | '\r' => {}
                        '/' => {
                            if self.source.read() == Some('/') {
                                self.skip_line_comment();
                            } else {
                                self.source.unread();
                                return Ok(self.emit(
                                    registry,
                                    Category::ArithmeticOperator,
                                    c.to_string(),
                                ));
                            }
                        }
                        c if c.is_ascii_digit() => {
                            lexeme.push(c);
                            state = State::Integer;
                        }
                        c if is_word_char(c) => {
                            lexeme.push(c);
                            state = State::Word;
                        }
                        ':' => {
                            lexeme.push(c);
                            state = State::Colon;
                        }
                        '\'' | '"' => {
                            lexeme.push(c);
                            state = State::Text;
                        }
                        '{' | '}' | ';' | '(' | ')' | '.' | ',' => {
                            return Ok(self.emit(registry, Category::Symbol, c.to_string()));
                        }
                        '+' | '-' | '*' => {
                            return Ok(self.emit(
                                registry,
                                Category::ArithmeticOperator,
                                c.to_string(),
                            ));
                        }
                        '<' | '>' => {
                            lexeme.push(c);
                            state = State::Relational;
                        }
                        '=' => {
                            return Ok(self.emit(
                                registry,
                                Category::RelationalOperator,
                                c.to_string(),
                            ));
                        }
                        other => {
                            return Err(self.fail(ErrorKind::UnknownCharacter).with_lexeme(other));
                        }
                    }
                }
                State::Word => match ch {
                    Some(c) if is_word_char(c) => lexeme.push(c),
                    _ => {
                        if ch.is_some() {
                            self.source.unread();
                        }
                        let category = Category::classify_word(&lexeme);
                        return Ok(self.emit(registry, category, lexeme));
                    }
                },
                State::Integer => match ch {
                    Some(c) if c.is_ascii_digit() => lexeme.push(c),
                    Some('.') => {
                        lexeme.push('.');
                        state = State::Fraction;
                    }
                    _ => {
                        if ch.is_some() {
                            self.source.unread();
                        }
                        return Ok(self.emit(registry, Category::IntegerNumber, lexeme));
                    }
                },
                State::Fraction => match ch {
                    Some(c) if c.is_ascii_digit() => lexeme.push(c),
                    _ => {
                        if ch.is_some() {
                            self.source.unread();
                        }
                        return Ok(self.emit(registry, Category::RealNumber, lexeme));
                    }
                },
                State::Relational => {
                    match ch {
                        Some('=') => lexeme.push('='),
                        Some('>') if lexeme == "<" => lexeme.push('>'),
                        Some(_) => self.source.unread(),
                        None => {}
                    }
                    return Ok(self.emit(registry, Category::RelationalOperator, lexeme));
                }
                State::Colon => {
                    if ch == Some('=') {
                        lexeme.push('=');
                        return Ok(self.emit(registry, Category::AssignmentOperator, lexeme));
                    }
                    if ch.is_some() {
                        self.source.unread();
                    }
                    return Ok(self.emit(registry, Category::Symbol, lexeme));
                }
                // Either quote closes the string, whichever one opened it.
                State::Text => match ch {
                    Some('\n') | None => return Err(self.fail(ErrorKind::StringNotClosed)),
                    Some(c @ ('\'' | '"')) => {
                        lexeme.push(c);
                        return Ok(self.emit(registry, Category::String, lexeme));
                    }
                    Some(c) => lexeme.push(c),
                },
            }
        }
    }

    /// Scans the whole input, stopping at the first lexical error.
    ///
    /// The returned registry holds every token in scan order; the trailing
    /// `EndOfFile` marker is not registered.
    pub fn tokenize(&mut self) -> Result<TokenRegistry> {
        let mut registry = TokenRegistry::new();
        loop {
            let token = self.next_token(&mut registry)?;
            if token.kind() == TokenType::EndOfFile {
                break;
            }
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let registry = lexer.tokenize().expect("Lexing should succeed");
        registry.tokens().to_vec()
    }

    fn lex_err(input: &str) -> Error {
        let mut lexer = Lexer::new(input);
        match lexer.tokenize() {
            Ok(reg) => panic!("Expected lexical error, got {} tokens", reg.len()),
            Err(e) => e,
        }
    }

    fn pairs(tokens: &[Token]) -> Vec<(&'static str, &str)> {
        tokens.iter().map(|t| (t.name(), t.lexeme.as_str())).collect()
    }

    #[test]
    fn test_full_program_token_stream() {
        let tokens = lex("program P; var x : integer; begin x := 1 + 2; end.");
        assert_eq!(
            pairs(&tokens),
            vec![
                ("Reserved-word", "program"),
                ("Identifier", "P"),
                ("Symbol", ";"),
                ("Reserved-word", "var"),
                ("Identifier", "x"),
                ("Symbol", ":"),
                ("Reserved-type", "integer"),
                ("Symbol", ";"),
                ("Reserved-word", "begin"),
                ("Identifier", "x"),
                ("Assignment Operator", ":="),
                ("Integer number", "1"),
                ("Binary Arithmetic Operator", "+"),
                ("Integer number", "2"),
                ("Symbol", ";"),
                ("Reserved-word", "end"),
                ("Symbol", "."),
            ]
        );
    }

    #[test]
    fn test_end_of_file_token() {
        let mut lexer = Lexer::new("x");
        let mut reg = TokenRegistry::new();
        let x = lexer.next_token(&mut reg).expect("identifier");
        assert_eq!(x.kind(), TokenType::Identifier);
        let eof = lexer.next_token(&mut reg).expect("eof");
        assert_eq!(eof.kind(), TokenType::EndOfFile);
        assert_eq!(eof.lexeme, "EOF");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_real_number() {
        let tokens = lex("x := 3.14;");
        let numbers: Vec<&Token> = tokens.iter().filter(|t| t.kind() == TokenType::Number).collect();
        assert_eq!(numbers.len(), 1);
        assert_eq!(numbers[0].lexeme, "3.14");
        assert_eq!(numbers[0].name(), "Real number");
    }

    #[test]
    fn test_trailing_dot_is_real_number() {
        let tokens = lex("3.");
        assert_eq!(pairs(&tokens), vec![("Real number", "3.")]);
    }

    #[test]
    fn test_compound_operators_are_single_tokens() {
        let tokens = lex("<= >= <> := < > =");
        assert_eq!(
            pairs(&tokens),
            vec![
                ("Relational Operator", "<="),
                ("Relational Operator", ">="),
                ("Relational Operator", "<>"),
                ("Assignment Operator", ":="),
                ("Relational Operator", "<"),
                ("Relational Operator", ">"),
                ("Relational Operator", "="),
            ]
        );
    }

    #[test]
    fn test_greater_then_less_is_two_tokens() {
        let tokens = lex("><");
        assert_eq!(
            pairs(&tokens),
            vec![("Relational Operator", ">"), ("Relational Operator", "<")]
        );
    }

    #[test]
    fn test_lone_colon_is_symbol() {
        let tokens = lex("a:b");
        assert_eq!(
            pairs(&tokens),
            vec![("Identifier", "a"), ("Symbol", ":"), ("Identifier", "b")]
        );
    }

    #[test]
    fn test_punctuation_is_symbol() {
        let tokens = lex("{a}(b),c;.");
        assert_eq!(
            pairs(&tokens),
            vec![
                ("Symbol", "{"),
                ("Identifier", "a"),
                ("Symbol", "}"),
                ("Symbol", "("),
                ("Identifier", "b"),
                ("Symbol", ")"),
                ("Symbol", ","),
                ("Identifier", "c"),
                ("Symbol", ";"),
                ("Symbol", "."),
            ]
        );
        assert_eq!((tokens[2].line, tokens[2].col), (1, 3));
    }

    #[test]
    fn test_reserved_words_are_case_sensitive() {
        let tokens = lex("if IF not Not real");
        assert_eq!(
            pairs(&tokens),
            vec![
                ("Reserved-word", "if"),
                ("Identifier", "IF"),
                ("Reserved-operator", "not"),
                ("Identifier", "Not"),
                ("Reserved-type", "real"),
            ]
        );
    }

    #[test]
    fn test_digits_then_letters_split() {
        let tokens = lex("12ab");
        assert_eq!(pairs(&tokens), vec![("Integer number", "12"), ("Identifier", "ab")]);
    }

    #[test]
    fn test_line_comments_are_skipped() {
        let tokens = lex("a // comment := here\nb // trailing");
        assert_eq!(pairs(&tokens), vec![("Identifier", "a"), ("Identifier", "b")]);
        assert_eq!((tokens[1].line, tokens[1].col), (2, 1));
    }

    #[test]
    fn test_lone_slash_is_division() {
        let tokens = lex("a / b");
        assert_eq!(
            pairs(&tokens),
            vec![
                ("Identifier", "a"),
                ("Binary Arithmetic Operator", "/"),
                ("Identifier", "b"),
            ]
        );
    }

    #[test]
    fn test_strings_keep_quotes() {
        let tokens = lex("'abc' \"d e\"");
        assert_eq!(pairs(&tokens), vec![("String", "'abc'"), ("String", "\"d e\"")]);
    }

    #[test]
    fn test_string_closes_on_either_quote() {
        let tokens = lex("'abc\" x");
        assert_eq!(pairs(&tokens), vec![("String", "'abc\""), ("Identifier", "x")]);
    }

    #[test]
    fn test_unterminated_string_at_end_of_input() {
        let err = lex_err("'abc");
        assert_eq!(err.kind, ErrorKind::StringNotClosed);
        assert_eq!((err.line, err.col), (Some(1), Some(4)));
    }

    #[test]
    fn test_unterminated_string_at_newline() {
        let err = lex_err("x := 'ab\n';");
        assert_eq!(err.kind, ErrorKind::StringNotClosed);
        assert_eq!((err.line, err.col), (Some(1), Some(9)));
    }

    #[test]
    fn test_unterminated_string_registers_nothing() {
        let mut lexer = Lexer::new("'abc");
        let mut reg = TokenRegistry::new();
        assert!(lexer.next_token(&mut reg).is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_unknown_character() {
        let err = lex_err("x := 1 # 2");
        assert_eq!(err.kind, ErrorKind::UnknownCharacter);
        assert_eq!(err.lexeme.as_deref(), Some("#"));
        assert_eq!((err.line, err.col), (Some(1), Some(8)));
        assert_eq!(err.to_string(), "UnknownCharacter: '#' at 1:8");
    }

    #[test]
    fn test_positions_report_token_end() {
        let tokens = lex("program P;\n  x := 10;");
        let pos: Vec<(usize, usize)> = tokens.iter().map(|t| (t.line, t.col)).collect();
        assert_eq!(pos, vec![(1, 7), (1, 9), (1, 10), (2, 3), (2, 6), (2, 9), (2, 10)]);
    }

    #[test]
    fn test_end_of_file_position_after_trailing_newline() {
        let mut lexer = Lexer::new("x\n");
        let mut reg = TokenRegistry::new();
        lexer.next_token(&mut reg).expect("identifier");
        let eof = lexer.next_token(&mut reg).expect("eof");
        assert_eq!((eof.line, eof.col), (2, 0));
    }

    #[test]
    fn test_pending_tokens_finalized_at_end_of_input() {
        assert_eq!(pairs(&lex("begin")), vec![("Reserved-word", "begin")]);
        assert_eq!(pairs(&lex("42")), vec![("Integer number", "42")]);
        assert_eq!(pairs(&lex("4.2")), vec![("Real number", "4.2")]);
        assert_eq!(pairs(&lex("<")), vec![("Relational Operator", "<")]);
        assert_eq!(pairs(&lex(":")), vec![("Symbol", ":")]);
    }

    #[test]
    fn test_lexemes_reconstruct_meaningful_text() {
        let input = "while i<=10 do begin s:=s+i; // sum\n i:=i+1; end";
        let joined: String = lex(input).iter().map(|t| t.lexeme.as_str()).collect();
        let expected: String = input
            .lines()
            .map(|l| l.split("//").next().unwrap_or(""))
            .collect::<String>()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        assert_eq!(joined, expected);
    }

    #[test]
    fn test_empty_input_registers_nothing() {
        let mut lexer = Lexer::new("  \n\t// only a comment\n");
        let reg = lexer.tokenize().expect("Lexing should succeed");
        assert_eq!(reg.len(), 0);
    }
}
