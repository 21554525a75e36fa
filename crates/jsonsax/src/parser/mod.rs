//! The resumable tokenizer state machine.
//!
//! Overview
//! - [`SaxParser`] consumes decoded text one character at a time and reports
//!   [`ParseEvent`]s to its [`EventHandler`] as grammar productions complete.
//! - Nothing is kept on the call stack between `write` calls. The current
//!   production lives in [`State`], open scopes live in a [`FrameStack`], and
//!   partially scanned strings and numbers live in two [`TokenBuffer`]s. A
//!   document may therefore be split anywhere, including inside `\uXXXX`, a
//!   surrogate pair, a number or a keyword, and the event sequence is the same
//!   as for a single `write`.
//!
//! Grammar
//! - The root of a document must be an object or an array. After the root
//!   closes the parser rests in `VALUE` at depth 0, where only another `{` or
//!   `[` may follow.
//! - A number ends at the first character that cannot continue it. That
//!   character is not consumed: it is fed again to the state the number
//!   returns to, after the number's `Value` event.
//!
//! Errors
//! - Every rejected character poisons the instance. The error is delivered as
//!   [`ParseEvent::Error`], returned from the failing call, and returned again
//!   from every later call until [`SaxParser::resume`] or [`SaxParser::reset`].

mod buffer;
mod escape_buffer;
mod literal;
mod stack;
mod state;
mod text;

use alloc::format;

use buffer::TokenBuffer;
use escape_buffer::{UnicodeEscapeBuffer, combine_surrogates};
use literal::{Literal, LiteralState, Step};
use log::{debug, trace};
use stack::{Frame, FrameStack};
use state::{Escape, NumberState, State, StringRole, StringState};

use crate::{
    chars,
    error::{BufferKind, BufferOverflow, ErrorSource, ParserError, SyntaxError},
    event::{EventHandler, ParseEvent, Scalar},
    guard::BufferGuard,
    options::ParserOptions,
};

/// Outcome of feeding one character to the current state.
enum Transition {
    Consumed,
    /// The character ended the current token and must be fed again.
    Reprocess,
}

use Transition::{Consumed, Reprocess};

/// The event-driven JSON tokenizer.
///
/// Feed it text with [`write`](Self::write) in chunks of any size and finish
/// each document with [`end`](Self::end). After a successful `end` the
/// instance re-arms itself and can parse the next document.
///
/// # Examples
///
/// ```rust
/// use jsonsax::{ParseEvent, ParserOptions, SaxParser, Scalar};
///
/// let mut parser = SaxParser::new(ParserOptions::default(), Vec::new());
/// parser.write("[\"\\u00").unwrap();
/// parser.write("41\"]").unwrap();
/// parser.end().unwrap();
///
/// assert!(
///     parser
///         .handler()
///         .contains(&ParseEvent::Value(Scalar::String("A".into())))
/// );
/// ```
#[derive(Debug)]
pub struct SaxParser<H> {
    handler: H,
    options: ParserOptions,

    state: State,
    stack: FrameStack,

    /// Characters of the string being scanned, key or value.
    text: TokenBuffer,
    /// Lexeme of the number being scanned.
    number: TokenBuffer,

    /// Characters consumed since the document began.
    position: usize,
    line: usize,
    column: usize,

    guard: BufferGuard,
    /// Sticky error. While set, the parser refuses input.
    error: Option<ParserError>,
}

impl<H: EventHandler> SaxParser<H> {
    /// Creates a parser delivering events to `handler` and emits
    /// [`ParseEvent::Ready`].
    pub fn new(options: ParserOptions, handler: H) -> Self {
        let mut parser = Self {
            handler,
            options,
            state: State::Begin,
            stack: FrameStack::new(),
            text: TokenBuffer::new(),
            number: TokenBuffer::new(),
            position: 0,
            line: 1,
            column: 0,
            guard: BufferGuard::new(options.max_buffer_length),
            error: None,
        };
        parser.emit(ParseEvent::Ready);
        parser
    }

    /// Feeds a chunk of text. Passing `None` ends the document, exactly like
    /// [`end`](Self::end).
    ///
    /// # Errors
    ///
    /// Returns the error for the first character the grammar rejects, or the
    /// stored error if the parser is already poisoned.
    pub fn write<'a>(
        &mut self,
        chunk: impl Into<Option<&'a str>>,
    ) -> Result<&mut Self, ParserError> {
        let Some(chunk) = chunk.into() else {
            return self.end();
        };
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        trace!(
            "write: {} bytes at line {}, column {}",
            chunk.len(),
            self.line,
            self.column
        );

        for c in chunk.chars() {
            self.advance_position(c);
            if let Err(source) = self.consume(c) {
                return Err(self.fail(source, Some(c)));
            }
        }
        Ok(self)
    }

    /// Ends the current document.
    ///
    /// Emits [`ParseEvent::End`], then resets the instance and emits
    /// [`ParseEvent::Ready`] for the next document.
    ///
    /// # Errors
    ///
    /// Fails with [`SyntaxError::UnexpectedEnd`] if the document is
    /// incomplete: a token or a scope is still open, or no document was
    /// started. Returns the stored error if the parser is poisoned.
    pub fn end(&mut self) -> Result<&mut Self, ParserError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        // At depth 0 in `VALUE` no string or number can be in flight, so
        // there is no pending value to flush here.
        if self.state != State::Value || self.stack.depth() != 0 {
            return Err(self.fail(SyntaxError::UnexpectedEnd.into(), None));
        }

        debug!("end of document after {} characters", self.position);
        self.state = State::End;
        self.emit(ParseEvent::End);
        Ok(self.reset())
    }

    /// Same as `write(None)`.
    ///
    /// # Errors
    ///
    /// See [`end`](Self::end).
    pub fn close(&mut self) -> Result<&mut Self, ParserError> {
        self.end()
    }

    /// Clears the sticky error so `write` accepts input again.
    ///
    /// Only the error is cleared. The parser continues from the state it was
    /// in before the rejected character, so the rest of a malformed document
    /// may produce further errors or incomplete output.
    pub fn resume(&mut self) -> &mut Self {
        if let Some(err) = self.error.take() {
            debug!("resuming after error: {err}");
        }
        self
    }

    /// Discards the document in progress and any error, returning the
    /// instance to its freshly constructed state. Emits
    /// [`ParseEvent::Ready`].
    pub fn reset(&mut self) -> &mut Self {
        self.state = State::Begin;
        self.stack.clear();
        self.text.clear();
        self.number.clear();
        self.position = 0;
        self.line = 1;
        self.column = 0;
        self.guard = BufferGuard::new(self.options.max_buffer_length);
        self.error = None;
        self.emit(ParseEvent::Ready);
        self
    }

    /// Records a failure detected outside the state machine, such as invalid
    /// UTF-8 at the byte layer, and poisons the parser.
    pub(crate) fn fail_with(&mut self, source: ErrorSource) -> ParserError {
        self.fail(source, None)
    }

    // --------------------------------------------------------------------------------------------
    // Inspection
    // --------------------------------------------------------------------------------------------

    /// The options this parser was created with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Characters consumed in the current document.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// 1-based line of the last consumed character.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column of the last consumed character; 0 right after a line feed.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Number of open objects and arrays.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// The sticky error, if the parser is poisoned.
    #[must_use]
    pub fn error(&self) -> Option<&ParserError> {
        self.error.as_ref()
    }

    /// Whether the parser refuses input until `resume` or `reset`.
    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.error.is_some()
    }

    /// The event handler.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The event handler, mutably. Useful for draining collected events
    /// between writes.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consumes the parser and returns its handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    // --------------------------------------------------------------------------------------------
    // State machine
    // --------------------------------------------------------------------------------------------

    #[inline]
    fn advance_position(&mut self, c: char) {
        self.position += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    fn consume(&mut self, c: char) -> Result<(), ErrorSource> {
        while let Reprocess = self.step(c)? {}
        if self.guard.is_due(self.position) {
            self.check_buffers()?;
        }
        Ok(())
    }

    fn step(&mut self, c: char) -> Result<Transition, ErrorSource> {
        match self.state {
            State::Begin | State::End => self.begin(c),
            State::Value => self.value(c),
            State::OpenObject | State::OpenKey => self.open_key(c),
            State::CloseKey => self.close_key(c),
            State::CloseObject => self.close_object(c),
            State::OpenArray => self.open_array(c),
            State::CloseArray => self.close_array(c),
            State::String(string) => self.string(string, c),
            State::Literal(literal) => self.literal(literal, c),
            State::Number(number) => self.number(number, c),
        }
    }

    fn begin(&mut self, c: char) -> Result<Transition, ErrorSource> {
        match c {
            c if chars::is_whitespace(c) => Ok(Consumed),
            chars::OPEN_BRACE => Ok(self.open_scope(Frame::Object)),
            chars::OPEN_BRACKET => Ok(self.open_scope(Frame::Array)),
            _ => Err(SyntaxError::NonWhitespaceBeforeRoot.into()),
        }
    }

    fn value(&mut self, c: char) -> Result<Transition, ErrorSource> {
        if self.stack.top() == Frame::Root {
            // Between documents only another object or array may start.
            return self.begin(c);
        }

        match c {
            c if chars::is_whitespace(c) => {}
            chars::QUOTE => self.start_string(StringRole::Value),
            chars::OPEN_BRACE => return Ok(self.open_scope(Frame::Object)),
            chars::OPEN_BRACKET => return Ok(self.open_scope(Frame::Array)),
            c if c == chars::MINUS || chars::is_digit(c) => {
                self.number.clear();
                self.number.push(c);
                self.state = State::Number(NumberState::new(c));
            }
            c => match Literal::from_first(c) {
                Some(literal) => self.state = State::Literal(LiteralState::new(literal)),
                None => return Err(SyntaxError::BadValue.into()),
            },
        }
        Ok(Consumed)
    }

    fn open_key(&mut self, c: char) -> Result<Transition, ErrorSource> {
        match c {
            c if chars::is_whitespace(c) => Ok(Consumed),
            chars::QUOTE => {
                self.start_string(StringRole::Key);
                Ok(Consumed)
            }
            chars::CLOSE_BRACE if self.state == State::OpenObject => {
                Ok(self.close_scope(Frame::Object))
            }
            _ => Err(SyntaxError::MalformedKey.into()),
        }
    }

    fn close_key(&mut self, c: char) -> Result<Transition, ErrorSource> {
        match c {
            c if chars::is_whitespace(c) => Ok(Consumed),
            chars::COLON => {
                self.state = State::Value;
                Ok(Consumed)
            }
            _ => Err(SyntaxError::ExpectedColon.into()),
        }
    }

    fn close_object(&mut self, c: char) -> Result<Transition, ErrorSource> {
        match c {
            c if chars::is_whitespace(c) => Ok(Consumed),
            chars::COMMA => {
                self.state = State::OpenKey;
                Ok(Consumed)
            }
            chars::CLOSE_BRACE => Ok(self.close_scope(Frame::Object)),
            _ => Err(SyntaxError::BadObject.into()),
        }
    }

    fn open_array(&mut self, c: char) -> Result<Transition, ErrorSource> {
        match c {
            c if chars::is_whitespace(c) => Ok(Consumed),
            chars::CLOSE_BRACKET => Ok(self.close_scope(Frame::Array)),
            _ => {
                self.state = State::Value;
                Ok(Reprocess)
            }
        }
    }

    fn close_array(&mut self, c: char) -> Result<Transition, ErrorSource> {
        match c {
            c if chars::is_whitespace(c) => Ok(Consumed),
            chars::COMMA => {
                self.state = State::Value;
                Ok(Consumed)
            }
            chars::CLOSE_BRACKET => Ok(self.close_scope(Frame::Array)),
            _ => Err(SyntaxError::BadArray.into()),
        }
    }

    fn string(&mut self, mut string: StringState, c: char) -> Result<Transition, ErrorSource> {
        match string.escape {
            Escape::Unicode(mut digits) => {
                match digits.feed(c)? {
                    None => string.escape = Escape::Unicode(digits),
                    Some(unit) => {
                        string.escape = Escape::None;
                        match combine_surrogates(string.high_surrogate, unit)? {
                            Ok(decoded) => {
                                self.text.push(decoded);
                                string.high_surrogate = None;
                            }
                            Err(high) => string.high_surrogate = Some(high),
                        }
                    }
                }
            }
            Escape::Backslash => {
                if c == chars::LOWER_U {
                    string.escape = Escape::Unicode(UnicodeEscapeBuffer::new());
                } else {
                    Self::reject_lone_surrogate(string)?;
                    let decoded =
                        chars::simple_escape(c).ok_or(SyntaxError::InvalidEscape(c))?;
                    self.text.push(decoded);
                    string.escape = Escape::None;
                }
            }
            Escape::None => match c {
                chars::BACKSLASH => string.escape = Escape::Backslash,
                _ => {
                    Self::reject_lone_surrogate(string)?;
                    if c == chars::QUOTE {
                        self.close_string(string);
                        return Ok(Consumed);
                    }
                    self.text.push(c);
                }
            },
        }
        self.state = State::String(string);
        Ok(Consumed)
    }

    fn reject_lone_surrogate(string: StringState) -> Result<(), SyntaxError> {
        match string.high_surrogate {
            Some(high) => Err(SyntaxError::InvalidUnicodeEscapeSequence(u32::from(high))),
            None => Ok(()),
        }
    }

    fn literal(&mut self, literal: LiteralState, c: char) -> Result<Transition, ErrorSource> {
        match literal.step(c) {
            Step::NeedMore(next) => self.state = State::Literal(next),
            Step::Done(scalar) => {
                self.emit(ParseEvent::Value(scalar));
                self.state = self.resume_state();
            }
            Step::Reject => {
                return Err(SyntaxError::InvalidLiteral {
                    expected: literal.literal().text(),
                }
                .into());
            }
        }
        Ok(Consumed)
    }

    fn number(&mut self, number: NumberState, c: char) -> Result<Transition, ErrorSource> {
        let next = if chars::is_digit(c) {
            if number.leading_zero {
                return Err(SyntaxError::LeadingZero.into());
            }
            NumberState {
                last: c,
                leading_zero: c == chars::ZERO && number.last == chars::MINUS && !number.exponent,
                ..number
            }
        } else if c == chars::PERIOD {
            if number.point {
                return Err(SyntaxError::DuplicateDecimalPoint.into());
            }
            if number.exponent || !chars::is_digit(number.last) {
                return Err(self.invalid_number(Some(c)).into());
            }
            NumberState {
                last: c,
                leading_zero: false,
                point: true,
                ..number
            }
        } else if chars::is_exponent(c) {
            if number.exponent {
                return Err(SyntaxError::DuplicateExponent.into());
            }
            if !chars::is_digit(number.last) {
                return Err(self.invalid_number(Some(c)).into());
            }
            NumberState {
                last: c,
                leading_zero: false,
                exponent: true,
                ..number
            }
        } else if chars::is_sign(c) {
            if !chars::is_exponent(number.last) {
                return Err(SyntaxError::MisplacedSign.into());
            }
            NumberState { last: c, ..number }
        } else {
            self.close_number(number)?;
            self.state = self.resume_state();
            return Ok(Reprocess);
        };

        self.number.push(c);
        self.state = State::Number(next);
        Ok(Consumed)
    }

    fn close_number(&mut self, number: NumberState) -> Result<(), SyntaxError> {
        if !chars::is_digit(number.last) {
            return Err(self.invalid_number(None));
        }
        let value: f64 = self
            .number
            .as_str()
            .parse()
            .map_err(|_| self.invalid_number(None))?;
        self.number.clear();
        self.emit(ParseEvent::Value(Scalar::Number(value)));
        Ok(())
    }

    fn invalid_number(&self, next: Option<char>) -> SyntaxError {
        let lexeme = match next {
            Some(c) => format!("{}{c}", self.number.as_str()),
            None => self.number.as_str().into(),
        };
        SyntaxError::InvalidNumber(lexeme)
    }

    fn start_string(&mut self, role: StringRole) {
        self.text.clear();
        self.state = State::String(StringState::new(role));
    }

    fn close_string(&mut self, string: StringState) {
        let text = string.shaping.finish(&self.options, self.text.take());
        match string.role {
            StringRole::Key => {
                self.emit(ParseEvent::Key(text));
                self.state = State::CloseKey;
            }
            StringRole::Value => {
                // The flushed parts already carried everything.
                if !(string.flushed && text.is_empty()) {
                    self.emit(ParseEvent::Value(Scalar::String(text)));
                }
                self.state = self.resume_state();
            }
        }
    }

    fn open_scope(&mut self, frame: Frame) -> Transition {
        let (event, state) = match frame {
            Frame::Array => (ParseEvent::OpenArray, State::OpenArray),
            _ => (ParseEvent::OpenObject, State::OpenObject),
        };
        self.emit(event);
        self.stack.push(frame);
        self.state = state;
        Consumed
    }

    fn close_scope(&mut self, frame: Frame) -> Transition {
        let popped = self.stack.pop();
        debug_assert_eq!(popped, Some(frame));
        self.emit(match frame {
            Frame::Array => ParseEvent::CloseArray,
            _ => ParseEvent::CloseObject,
        });
        self.state = self.resume_state();
        Consumed
    }

    /// The state to continue in once a value has completed.
    fn resume_state(&self) -> State {
        match self.stack.top() {
            Frame::Root => State::Value,
            Frame::Object => State::CloseObject,
            Frame::Array => State::CloseArray,
        }
    }

    // --------------------------------------------------------------------------------------------
    // Buffers
    // --------------------------------------------------------------------------------------------

    /// The accumulator in use, if any. At most one is live at a time.
    fn live_buffer(&self) -> Option<(BufferKind, usize)> {
        match self.state {
            State::String(StringState {
                role: StringRole::Key,
                ..
            }) => Some((BufferKind::Key, self.text.len())),
            State::String(_) => Some((BufferKind::StringValue, self.text.len())),
            State::Number(_) => Some((BufferKind::Number, self.number.len())),
            _ => None,
        }
    }

    fn check_buffers(&mut self) -> Result<(), ErrorSource> {
        let live = self.live_buffer();
        match self.guard.check(self.position, live) {
            None => Ok(()),
            Some(BufferKind::StringValue) => {
                debug!(
                    "string value exceeds {} characters, flushing at position {}",
                    self.guard.max(),
                    self.position
                );
                self.flush_string();
                Ok(())
            }
            Some(kind) => Err(BufferOverflow {
                kind,
                max: self.guard.max(),
            }
            .into()),
        }
    }

    /// Emits the scanned part of an over-long string value. With `trim`,
    /// trailing whitespace stays buffered until a later character shows it is
    /// not the end of the string, unless the run alone exceeds the limit.
    fn flush_string(&mut self) {
        let State::String(mut string) = self.state else {
            return;
        };
        let raw = self.text.take();
        let (mut part, held) = string.shaping.part(&self.options, &raw);
        if held.chars().count() > self.guard.max() {
            part.push_str(&string.shaping.shape(&self.options, held));
        } else {
            held.chars().for_each(|c| self.text.push(c));
        }
        if !part.is_empty() {
            self.emit(ParseEvent::Value(Scalar::String(part)));
            string.flushed = true;
        }
        self.state = State::String(string);
        self.guard.rearm(self.position, self.text.len());
    }

    // --------------------------------------------------------------------------------------------
    // Events and errors
    // --------------------------------------------------------------------------------------------

    #[inline]
    fn emit(&mut self, event: ParseEvent) {
        self.handler.handle(event);
    }

    fn fail(&mut self, source: ErrorSource, character: Option<char>) -> ParserError {
        let err = ParserError {
            source,
            state: self.state.name(),
            line: self.line,
            column: self.column,
            position: self.position,
            character,
        };
        debug!("{err}");
        self.error = Some(err.clone());
        self.emit(ParseEvent::Error(err.clone()));
        err
    }
}
