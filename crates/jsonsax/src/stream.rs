//! Byte-oriented front end for [`SaxParser`].

use bstr::ByteSlice;
use log::trace;

use crate::{
    error::ParserError,
    event::EventHandler,
    options::ParserOptions,
    parser::SaxParser,
    utf8::{FeedError, Utf8Reassembler},
};

/// Accepts raw UTF-8 bytes split anywhere, including inside a multi-byte
/// character, and feeds the decoded text to a [`SaxParser`].
///
/// # Examples
///
/// ```
/// use jsonsax::{ByteStream, ParseEvent, ParserOptions, Scalar};
///
/// let bytes = "[\"€\"]".as_bytes();
/// let mut stream = ByteStream::new(ParserOptions::default(), Vec::new());
/// // Split the three-byte euro sign after its second byte.
/// assert!(!stream.write(&bytes[..4]).unwrap());
/// assert!(stream.write(&bytes[4..]).unwrap());
/// stream.end(None).unwrap();
///
/// assert!(
///     stream
///         .parser()
///         .handler()
///         .contains(&ParseEvent::Value(Scalar::String("€".into())))
/// );
/// ```
#[derive(Debug)]
pub struct ByteStream<H> {
    parser: SaxParser<H>,
    utf8: Utf8Reassembler,
}

impl<H: EventHandler> ByteStream<H> {
    /// Creates a byte stream over a new parser. The parser emits
    /// [`ParseEvent::Ready`](crate::ParseEvent::Ready) immediately.
    pub fn new(options: ParserOptions, handler: H) -> Self {
        Self::from_parser(SaxParser::new(options, handler))
    }

    /// Wraps an existing parser.
    pub fn from_parser(parser: SaxParser<H>) -> Self {
        Self {
            parser,
            utf8: Utf8Reassembler::new(),
        }
    }

    /// Feeds a buffer of bytes.
    ///
    /// Returns `true` if the buffer ended on a character boundary, and
    /// `false` if the trailing bytes of an incomplete character are being
    /// held for the next call.
    ///
    /// # Errors
    ///
    /// Returns the parser's error if the decoded text is rejected, or a
    /// [`Utf8Error`](crate::Utf8Error) wrapped in a [`ParserError`] if the
    /// bytes are not valid UTF-8. Either way the parser is poisoned.
    pub fn write(&mut self, bytes: &[u8]) -> Result<bool, ParserError> {
        if let Some(err) = self.parser.error() {
            return Err(err.clone());
        }
        trace!("write bytes: {:?}", bytes.as_bstr());

        let parser = &mut self.parser;
        match self
            .utf8
            .feed(bytes, |text| parser.write(text).map(|_| ()))
        {
            Ok(()) => Ok(!self.utf8.is_pending()),
            Err(FeedError::Sink(err)) => Err(err),
            Err(FeedError::Utf8(err)) => {
                self.utf8.reset();
                Err(self.parser.fail_with(err.into()))
            }
        }
    }

    /// Feeds an optional final buffer, then ends the document.
    ///
    /// # Errors
    ///
    /// Fails if the final bytes are rejected, if the input stops in the middle
    /// of a multi-byte character, or if the document is incomplete.
    pub fn end(&mut self, bytes: Option<&[u8]>) -> Result<(), ParserError> {
        if let Some(bytes) = bytes {
            self.write(bytes)?;
        }
        if let Some(err) = self.parser.error() {
            return Err(err.clone());
        }
        if let Err(err) = self.utf8.finish() {
            return Err(self.parser.fail_with(err.into()));
        }
        self.parser.end()?;
        Ok(())
    }

    /// Clears the parser's sticky error. See [`SaxParser::resume`].
    pub fn resume(&mut self) -> &mut Self {
        self.parser.resume();
        self
    }

    /// Drops held-back bytes and resets the parser. See [`SaxParser::reset`].
    pub fn reset(&mut self) -> &mut Self {
        self.utf8.reset();
        self.parser.reset();
        self
    }

    /// The underlying parser.
    #[must_use]
    pub fn parser(&self) -> &SaxParser<H> {
        &self.parser
    }

    /// The underlying parser, mutably.
    pub fn parser_mut(&mut self) -> &mut SaxParser<H> {
        &mut self.parser
    }

    /// Consumes the stream and returns the parser. Any held-back bytes are
    /// discarded.
    pub fn into_parser(self) -> SaxParser<H> {
        self.parser
    }
}
