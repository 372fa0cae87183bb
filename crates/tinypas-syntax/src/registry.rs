//! The token registry (symbol table) filled by the scanner.
//!
//! The registry keeps two views of the same tokens: an insertion-ordered list,
//! which is the sequence the parser walks, and a keyed index from lexeme to
//! the first token inserted with that lexeme. Insertion order always equals
//! scan order.

use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hasher};

use crate::token::Token;

/// Shift-and-add string hash: `h = (h << 5) + byte` for every byte written.
///
/// The accumulated value is finalized with a 64-bit avalanche mix, so the
/// low bits that pick a bucket and the high bits used as probe tags both
/// depend on every byte.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexemeHasher {
    hash: u64,
}

impl Hasher for LexemeHasher {
    fn finish(&self) -> u64 {
        let mut h = self.hash;
        h ^= h >> 33;
        h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
        h ^= h >> 33;
        h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
        h ^= h >> 33;
        h
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.hash = (self.hash << 5).wrapping_add(u64::from(b));
        }
    }
}

type LexemeIndex = HashMap<String, usize, BuildHasherDefault<LexemeHasher>>;

/// Ordered collection of every token the scanner produced.
#[derive(Debug, Default, Clone)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
    index: LexemeIndex,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `token`, keyed by its lexeme.
    pub fn insert(&mut self, token: Token) {
        self.index
            .entry(token.lexeme.clone())
            .or_insert(self.tokens.len());
        self.tokens.push(token);
    }

    /// Returns the first token inserted with the given lexeme.
    pub fn search(&self, lexeme: &str) -> Option<&Token> {
        self.index.get(lexeme).map(|&i| &self.tokens[i])
    }

    /// Number of insertions so far.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of distinct lexemes.
    pub fn distinct_lexemes(&self) -> usize {
        self.index.len()
    }

    /// Tokens in scan order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }
}

impl<'a> IntoIterator for &'a TokenRegistry {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::hash::{BuildHasher, Hash};

    fn hash_of(lexeme: &str) -> u64 {
        let mut hasher = BuildHasherDefault::<LexemeHasher>::default().build_hasher();
        lexeme.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_accumulates_shift_add() {
        let mut h = LexemeHasher::default();
        h.write(b"ab");
        assert_eq!(h.hash, (u64::from(b'a') << 5) + u64::from(b'b'));
    }

    #[test]
    fn test_equal_lexemes_hash_equal() {
        assert_eq!(hash_of("total"), hash_of("total"));
        assert_ne!(hash_of("total"), hash_of("totals"));
    }

    #[test]
    fn test_hash_bits_are_spread() {
        let hashes: Vec<u64> = (0..1000).map(|i| hash_of(&format!("v{}", i))).collect();
        let low5: HashSet<u64> = hashes.iter().map(|h| h & 0x1f).collect();
        let top7: HashSet<u64> = hashes.iter().map(|h| h >> 57).collect();
        assert_eq!(low5.len(), 32);
        assert!(top7.len() >= 100, "only {} distinct top-7 tags", top7.len());
    }

    #[test]
    fn test_search_over_many_identifiers() {
        let mut reg = TokenRegistry::new();
        for i in 0..500 {
            reg.insert(Token::new(
                crate::token::Category::Identifier,
                format!("v{}", i),
                1,
                i + 1,
            ));
        }
        assert_eq!(reg.distinct_lexemes(), 500);
        assert_eq!(reg.search("v321").map(|t| t.col), Some(322));
    }
}
