//! ANSI color-escape removal for compiler output.
//!
//! The compiler decorates its output with SGR color codes and erase-line
//! sequences. This module strips exactly that class of sequences before
//! the text is shown; anything else the terminal might interpret is left
//! untouched.

use regex::Regex;

/// Pattern for the stripped sequences: ESC `[`, parameter bytes, then a
/// terminator in `{m, K}` (color/attribute and erase-line).
const CSI_COLOR_PATTERN: &str = "\x1B\\[[0-9;?]*[mK]";

/// Strips color and erase-line escape sequences from text chunks.
///
/// Stripping is idempotent: removing a sequence can splice the halves of
/// another sequence together, so replacement loops until a fixed point.
#[derive(Debug, Clone)]
pub struct AnsiStripper {
    pattern: Regex,
}

impl AnsiStripper {
    /// Create a stripper with the color/erase-line pattern compiled.
    #[must_use]
    pub fn new() -> Self {
        let pattern = Regex::new(CSI_COLOR_PATTERN).expect("CSI color pattern is valid");
        Self { pattern }
    }

    /// Remove every color/erase-line escape sequence from `text`.
    ///
    /// Other escape sequences (cursor movement, OSC titles, bare ESC
    /// bytes) are preserved unchanged, as is every multi-byte character
    /// outside the stripped ranges.
    #[must_use]
    pub fn strip(&self, text: &str) -> String {
        let mut current = text.to_string();
        loop {
            match self.pattern.replace_all(&current, "") {
                std::borrow::Cow::Borrowed(_) => return current,
                std::borrow::Cow::Owned(next) => current = next,
            }
        }
    }
}

impl Default for AnsiStripper {
    fn default() -> Self {
        Self::new()
    }
}
