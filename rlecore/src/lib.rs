pub mod decoder;

pub use decoder::{DecodeError, DecodeOptions, decompress, decompress_with};
