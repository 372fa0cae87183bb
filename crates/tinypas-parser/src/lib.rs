pub mod parser;

pub use parser::{is_valid_number, parse_tokens, Parser, MAX_DEPTH};
