use alloc::string::String;
use core::mem;

/// Accumulator for the characters of the string or number being scanned.
///
/// Keeps its length in characters alongside the text so the buffer guard can
/// compare it against the position counter, which also counts characters.
#[derive(Debug, Default)]
pub(crate) struct TokenBuffer {
    text: String,
    chars: usize,
}

impl TokenBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn push(&mut self, c: char) {
        self.text.push(c);
        self.chars += 1;
    }

    /// Length in characters.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.chars
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    /// Moves the accumulated text out, leaving the buffer empty.
    pub(crate) fn take(&mut self) -> String {
        self.chars = 0;
        mem::take(&mut self.text)
    }

    /// Empties the buffer, keeping its allocation.
    pub(crate) fn clear(&mut self) {
        self.chars = 0;
        self.text.clear();
    }
}
