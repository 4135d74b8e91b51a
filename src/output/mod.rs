//! Output cleaning: incremental UTF-8 decoding and ANSI stripping.

mod decoder;
mod sanitizer;

pub use decoder::{DecodedChunk, StreamDecoder};
pub use sanitizer::AnsiStripper;
