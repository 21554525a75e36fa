/// Configuration options for the tokenizer.
///
/// # Examples
///
/// ```rust
/// use jsonsax::{ParserOptions, SaxParser};
///
/// let options = ParserOptions {
///     max_buffer_length: 1024,
///     trim: true,
///     ..Default::default()
/// };
/// let parser = SaxParser::new(options, Vec::new());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Longest string or number token, in characters, the parser accumulates
    /// before acting.
    ///
    /// A string value that grows past this limit is flushed early as a
    /// partial `Value` event and scanning continues. An object key or number
    /// that grows past it is a fatal error, since neither can be split.
    ///
    /// # Default
    ///
    /// `65536`
    pub max_buffer_length: usize,

    /// Whether to strip leading and trailing whitespace from string values
    /// and keys before emitting them.
    ///
    /// Applies across the parts of a flushed string value: the parts
    /// concatenate to the trimmed string. Trailing whitespace of a part is
    /// held back until the string continues, except a run longer than
    /// [`max_buffer_length`](Self::max_buffer_length), which is emitted as is
    /// unless `normalize` is also set.
    ///
    /// # Default
    ///
    /// `false`
    pub trim: bool,

    /// Whether to collapse each run of whitespace inside string values and
    /// keys into a single space before emitting them. Runs that straddle the
    /// parts of a flushed string value still collapse to one space.
    ///
    /// # Default
    ///
    /// `false`
    pub normalize: bool,
}

impl ParserOptions {
    /// Default for [`ParserOptions::max_buffer_length`].
    pub const DEFAULT_MAX_BUFFER_LENGTH: usize = 64 * 1024;
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_buffer_length: Self::DEFAULT_MAX_BUFFER_LENGTH,
            trim: false,
            normalize: false,
        }
    }
}
