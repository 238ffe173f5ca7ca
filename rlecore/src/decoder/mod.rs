pub mod error;
pub use error::DecodeError;

pub mod options;
pub use options::{DecodeOptions, TrailingInput};

pub mod tokenizer;
pub use tokenizer::{Bracket, Token, TokenKind, Tokenizer};

mod parser;
pub use parser::{Parser, decompress, decompress_with};
