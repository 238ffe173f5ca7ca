use thiserror::Error;

/// Everything that can go wrong while decoding. Decoding is all-or-nothing:
/// the first error aborts the whole call and no partial output is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unrecognized character {ch:?} at index {pos}")]
    Tokenize { pos: usize, ch: char },
    #[error("repeat count {value} at index {pos} is not a valid number")]
    NumberParse { pos: usize, value: String },
    #[error("syntax error at index {pos}: {expected}, got {found}")]
    Syntax {
        pos: usize,
        expected: &'static str,
        found: String,
    },
    #[error("repeat group at index {pos} nests deeper than the limit of {limit}")]
    DepthLimitExceeded { limit: usize, pos: usize },
    #[error("decoded output is larger than the limit of {limit} bytes")]
    OutputTooLarge { limit: usize },
}
