pub mod ast;
pub mod error;
pub mod registry;
pub mod token;

pub use ast::*;
pub use error::*;
pub use registry::*;
pub use token::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(category: Category, lexeme: &str) -> Token {
        Token::new(category, lexeme, 1, 1)
    }

    #[test]
    fn test_token_type_ordinals() {
        assert_eq!(TokenType::ReservedWord.ordinal(), 0);
        assert_eq!(TokenType::Identifier.ordinal(), 3);
        assert_eq!(TokenType::Operator.ordinal(), 4);
        assert_eq!(TokenType::Number.ordinal(), 6);
        assert_eq!(TokenType::EndOfFile.ordinal(), 8);
        assert_eq!(TokenType::Error.ordinal(), 9);
    }

    #[test]
    fn test_categories_map_to_types() {
        assert_eq!(Category::RelationalOperator.kind(), TokenType::Operator);
        assert_eq!(Category::AssignmentOperator.kind(), TokenType::Operator);
        assert_eq!(Category::RealNumber.kind(), TokenType::Number);
        assert_eq!(Category::IntegerNumber.label(), "Integer number");
        assert_eq!(Category::EndOfFile.label(), "EOF");
    }

    #[test]
    fn test_word_classification_is_case_sensitive() {
        assert_eq!(Category::classify_word("program"), Category::ReservedWord);
        assert_eq!(Category::classify_word("integer"), Category::ReservedType);
        assert_eq!(Category::classify_word("mod"), Category::ReservedOperator);
        assert_eq!(Category::classify_word("IF"), Category::Identifier);
        assert_eq!(Category::classify_word("Begin"), Category::Identifier);
        assert_eq!(Category::classify_word("_x1"), Category::Identifier);
    }

    #[test]
    fn test_reserved_tables_are_disjoint() {
        for w in RESERVED_WORDS {
            assert!(!RESERVED_TYPES.contains(w), "{} in both tables", w);
            assert!(!RESERVED_OPERATORS.contains(w), "{} in both tables", w);
        }
        for t in RESERVED_TYPES {
            assert!(!RESERVED_OPERATORS.contains(t), "{} in both tables", t);
            assert!(Type::from_lexeme(t).is_some(), "no Type for {}", t);
        }
    }

    #[test]
    fn test_token_listing_line() {
        let t = Token::new(Category::ReservedWord, "program", 1, 7);
        assert_eq!(t.to_string(), "<0, Reserved-word, 'program'> : <1, 7>");
        let eof = Token::eof(3, 0);
        assert_eq!(eof.to_string(), "<8, EOF, 'EOF'> : <3, 0>");
    }

    #[test]
    fn test_registry_preserves_scan_order() {
        let mut reg = TokenRegistry::new();
        assert!(reg.is_empty());
        reg.insert(tok(Category::Identifier, "x"));
        reg.insert(tok(Category::AssignmentOperator, ":="));
        reg.insert(tok(Category::Identifier, "x"));
        reg.insert(tok(Category::Symbol, ";"));

        assert_eq!(reg.len(), 4);
        assert_eq!(reg.distinct_lexemes(), 3);
        let lexemes: Vec<&str> = reg.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["x", ":=", "x", ";"]);
        assert_eq!(reg.first().map(|t| t.lexeme.as_str()), Some("x"));
    }

    #[test]
    fn test_registry_search_returns_first_insertion() {
        let mut reg = TokenRegistry::new();
        reg.insert(Token::new(Category::Identifier, "a", 1, 1));
        reg.insert(Token::new(Category::Identifier, "a", 2, 5));

        let found = reg.search("a").expect("a is registered");
        assert_eq!((found.line, found.col), (1, 1));
        assert!(reg.search("b").is_none());
    }

    #[test]
    fn test_error_display() {
        let plain = Error::with_span(ErrorKind::ExpectedDo, 2, 13);
        assert_eq!(plain.to_string(), "ExpectedDo at 2:13");

        let quoted = Error::at_token(
            ErrorKind::InvalidCommand,
            &Token::new(Category::ReservedWord, "else", 4, 8),
        );
        assert_eq!(quoted.to_string(), "InvalidCommand: 'else' at 4:8");

        assert_eq!(Error::new(ErrorKind::NoTokensToParse).to_string(), "NoTokensToParse");
    }

    #[test]
    fn test_error_kind_classes() {
        assert!(ErrorKind::UnknownCharacter.is_lexical());
        assert!(ErrorKind::StringNotClosed.is_lexical());
        assert!(!ErrorKind::ExpectedSemicolon.is_lexical());
        assert!(ErrorKind::ExpectedDo.help().is_some());
        assert!(ErrorKind::ExpectedWhile.help().is_none());
    }

    #[test]
    fn test_binary_op_lexemes() {
        for lexeme in ["+", "-", "*", "/", "=", "<>", "<", "<=", ">", ">="] {
            let op = BinaryOp::from_lexeme(lexeme).expect("known operator");
            assert_eq!(op.as_str(), lexeme);
        }
        assert!(BinaryOp::Le.is_relational());
        assert!(!BinaryOp::Mul.is_relational());
        assert!(BinaryOp::from_lexeme(":=").is_none());
    }

    #[test]
    fn test_ast_serializes() {
        let expr = Expr::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(Expr::Ident("a".into())),
            rhs: Box::new(Expr::Number { lexeme: "1".into(), kind: NumberKind::Integer }),
        };
        let json = serde_json::to_value(&expr).expect("serializable");
        assert_eq!(json["Binary"]["op"], "Add");
        assert_eq!(json["Binary"]["lhs"]["Ident"], "a");
    }
}
