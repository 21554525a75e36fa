use core::fmt;

use thiserror::Error;

/// An error raised while tokenizing a document.
///
/// Carries the kind of failure together with the tokenizer state it occurred
/// in and the position of the offending character. Once a parser has produced
/// a `ParserError` it keeps returning it until [`resume`] or [`reset`] is
/// called.
///
/// [`resume`]: crate::SaxParser::resume
/// [`reset`]: crate::SaxParser::reset
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source} (state {state}) at line {line}, column {column}{}", CharSuffix(.character))]
pub struct ParserError {
    pub(crate) source: ErrorSource,
    pub(crate) state: &'static str,
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) position: usize,
    pub(crate) character: Option<char>,
}

impl ParserError {
    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorSource {
        &self.source
    }

    /// Name of the tokenizer state the error occurred in, e.g. `"OPEN_KEY"`.
    #[must_use]
    pub fn state(&self) -> &'static str {
        self.state
    }

    /// 1-based line of the offending character.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the offending character.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Number of characters consumed when the error was raised.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The character that could not be accepted, if the error was caused by
    /// one.
    #[must_use]
    pub fn character(&self) -> Option<char> {
        self.character
    }

    /// Returns the syntax error, if this is one.
    #[must_use]
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match &self.source {
            ErrorSource::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

struct CharSuffix<'a>(&'a Option<char>);

impl fmt::Display for CharSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(c) => write!(f, ", char {c:?}"),
            None => Ok(()),
        }
    }
}

#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorSource {
    /// The input is not valid JSON.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// A key or number grew past `max_buffer_length`.
    #[error("{0}")]
    BufferOverflow(#[from] BufferOverflow),
    /// The byte input is not valid UTF-8.
    #[error("{0}")]
    Utf8(#[from] Utf8Error),
}

/// Grammar violations and premature termination.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// Something other than `{` or `[` where a document must begin.
    #[error("non-whitespace before {{[")]
    NonWhitespaceBeforeRoot,
    /// An object key that does not start with `"`.
    #[error("malformed object key should start with \"")]
    MalformedKey,
    /// A key not followed by `:`.
    #[error("bad object: expected ':' after key")]
    ExpectedColon,
    /// Neither `,` nor `}` after an object member.
    #[error("bad object")]
    BadObject,
    /// Neither `,` nor `]` after an array element.
    #[error("bad array")]
    BadArray,
    /// A character that cannot start a value.
    #[error("bad value")]
    BadValue,
    /// A misspelled `true`, `false` or `null`.
    #[error("invalid literal, expected `{expected}`")]
    InvalidLiteral {
        /// The literal being matched.
        expected: &'static str,
    },
    /// A digit after a leading `0`.
    #[error("leading zero not followed by .")]
    LeadingZero,
    /// A second `.` in a number.
    #[error("invalid number has two dots")]
    DuplicateDecimalPoint,
    /// A second exponent marker in a number.
    #[error("invalid number has two exponential")]
    DuplicateExponent,
    /// A `+` or `-` outside the sign positions of a number.
    #[error("invalid symbol in number")]
    MisplacedSign,
    /// A number lexeme that ended incomplete, such as `-` or `1e`.
    #[error("invalid number `{0}`")]
    InvalidNumber(alloc::string::String),
    /// An unknown character after `\`.
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    /// A non-hex digit inside `\uXXXX`.
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    /// A lone or mismatched UTF-16 surrogate.
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscapeSequence(u32),
    /// The document ended inside a value or container.
    #[error("unexpected end")]
    UnexpectedEnd,
}

/// Which accumulator a [`BufferOverflow`] refers to.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Characters of a string in value position. Never overflows: it is
    /// flushed as a partial value instead.
    StringValue,
    /// Characters of an object key.
    Key,
    /// The lexeme of a number.
    Number,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BufferKind::StringValue => "string",
            BufferKind::Key => "key",
            BufferKind::Number => "number",
        })
    }
}

#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("max buffer length exceeded: {kind} longer than {max} characters")]
pub struct BufferOverflow {
    /// The accumulator that grew too long.
    pub kind: BufferKind,
    /// The configured maximum, in characters.
    pub max: usize,
}

/// Failures of the byte-level reassembler.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Utf8Error {
    /// A byte that cannot start a character, or a sequence it starts that
    /// is not valid UTF-8.
    #[error("invalid UTF-8 sequence starting with byte 0x{byte:02X}")]
    InvalidSequence {
        /// The first byte of the offending sequence.
        byte: u8,
    },
    /// Input ended partway through a multi-byte character.
    #[error("incomplete UTF-8 sequence at end of input: {received} of {expected} bytes")]
    IncompleteSequence {
        /// Length of the sequence announced by its lead byte.
        expected: u8,
        /// Bytes of it that arrived.
        received: u8,
    },
}
