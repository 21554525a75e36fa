use super::{escape_buffer::UnicodeEscapeBuffer, literal::LiteralState, text::TextShaping};

/// What the tokenizer is in the middle of.
///
/// Data that only makes sense inside one production lives in that variant,
/// so e.g. a half-read `\u` escape cannot outlive its string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// Before the first significant character of a document.
    Begin,
    /// Expecting a value. At depth 0 this is the resting state between
    /// documents.
    Value,
    /// Just after `{`: a key or `}`.
    OpenObject,
    /// After `,` in an object: a key.
    OpenKey,
    /// After a key: `:`.
    CloseKey,
    /// After a member value: `,` or `}`.
    CloseObject,
    /// Just after `[`: a value or `]`.
    OpenArray,
    /// After an element: `,` or `]`.
    CloseArray,
    String(StringState),
    Literal(LiteralState),
    Number(NumberState),
    /// A document was ended; only observable while `End` is delivered.
    End,
}

impl State {
    /// Name used in error messages.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            State::Begin => "BEGIN",
            State::Value => "VALUE",
            State::OpenObject => "OPEN_OBJECT",
            State::OpenKey => "OPEN_KEY",
            State::CloseKey => "CLOSE_KEY",
            State::CloseObject => "CLOSE_OBJECT",
            State::OpenArray => "OPEN_ARRAY",
            State::CloseArray => "CLOSE_ARRAY",
            State::String(_) => "STRING",
            State::Literal(literal) => literal.state_name(),
            State::Number(_) => "NUMBER_DIGIT",
            State::End => "END",
        }
    }
}

/// Whether a string is an object key or a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringRole {
    Key,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Escape {
    None,
    /// Just read an unescaped `\`.
    Backslash,
    /// Inside `\uXXXX`.
    Unicode(UnicodeEscapeBuffer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StringState {
    pub(crate) role: StringRole,
    pub(crate) escape: Escape,
    /// High surrogate from the previous `\u` escape, waiting for its low half.
    pub(crate) high_surrogate: Option<u16>,
    /// A forced flush already emitted part of this value.
    pub(crate) flushed: bool,
    pub(crate) shaping: TextShaping,
}

impl StringState {
    pub(crate) fn new(role: StringRole) -> Self {
        Self {
            role,
            escape: Escape::None,
            high_surrogate: None,
            flushed: false,
            shaping: TextShaping::default(),
        }
    }
}

/// Shape of the number lexeme read so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NumberState {
    /// Last character appended to the lexeme.
    pub(crate) last: char,
    /// The integer part is a single `0`, so no further digit may follow it.
    pub(crate) leading_zero: bool,
    pub(crate) point: bool,
    pub(crate) exponent: bool,
}

impl NumberState {
    pub(crate) fn new(first: char) -> Self {
        Self {
            last: first,
            leading_zero: first == '0',
            point: false,
            exponent: false,
        }
    }
}
