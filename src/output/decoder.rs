//! Incremental UTF-8 decoding for chunked pipe reads.
//!
//! Pipe reads slice the compiler's output at arbitrary byte offsets, so a
//! multi-byte character can straddle two chunks. The decoder carries such
//! tails over to the next chunk and reports genuinely malformed runs
//! without dropping the valid text around them.

/// One decoded piece of a byte chunk, in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedChunk {
    /// Valid text decoded from the chunk.
    Text(String),
    /// A run of bytes that is not valid UTF-8, skipped.
    Invalid {
        /// Number of malformed bytes in the run.
        len: usize,
    },
}

/// Streaming UTF-8 decoder tolerant of characters split across reads.
#[derive(Debug, Clone, Default)]
pub struct StreamDecoder {
    /// Incomplete multi-byte sequence carried from the previous chunk.
    pending: Vec<u8>,
}

impl StreamDecoder {
    /// Create a decoder with no carried bytes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk of bytes.
    ///
    /// Valid text and malformed runs are returned in arrival order.
    /// Consecutive malformed bytes collapse into a single `Invalid` piece.
    /// An incomplete multi-byte sequence at the end of the chunk is held
    /// back until the next `feed` (or `finish`), never reported as
    /// malformed prematurely.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<DecodedChunk> {
        let mut data = std::mem::take(&mut self.pending);
        data.extend_from_slice(chunk);

        let mut pieces = Vec::new();
        let mut invalid_run = 0usize;
        let mut rest = data.as_slice();

        while !rest.is_empty() {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    Self::flush_invalid(&mut pieces, &mut invalid_run);
                    pieces.push(DecodedChunk::Text(text.to_string()));
                    rest = &[];
                }
                Err(err) => {
                    let valid_up_to = err.valid_up_to();
                    if valid_up_to > 0 {
                        Self::flush_invalid(&mut pieces, &mut invalid_run);
                        let text = String::from_utf8_lossy(&rest[..valid_up_to]).into_owned();
                        pieces.push(DecodedChunk::Text(text));
                    }
                    match err.error_len() {
                        Some(bad) => {
                            invalid_run += bad;
                            rest = &rest[valid_up_to + bad..];
                        }
                        None => {
                            // Sequence cut off at the chunk boundary.
                            self.pending = rest[valid_up_to..].to_vec();
                            rest = &[];
                        }
                    }
                }
            }
        }

        Self::flush_invalid(&mut pieces, &mut invalid_run);
        pieces
    }

    /// Report bytes still pending at end of stream.
    ///
    /// A sequence left incomplete when no more input can arrive is
    /// malformed by definition; returns its length and clears it.
    pub fn finish(&mut self) -> Option<usize> {
        if self.pending.is_empty() {
            None
        } else {
            let len = self.pending.len();
            self.pending.clear();
            Some(len)
        }
    }

    /// True when a partial multi-byte sequence is buffered.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn flush_invalid(pieces: &mut Vec<DecodedChunk>, run: &mut usize) {
        if *run > 0 {
            pieces.push(DecodedChunk::Invalid { len: *run });
            *run = 0;
        }
    }
}
