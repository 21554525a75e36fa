//! Reassembly of UTF-8 characters split across byte buffers.
//!
//! [`Utf8Reassembler`] sits between raw byte input and anything that wants
//! `&str`. Complete characters are forwarded in batches; a multi-byte
//! sequence cut off at the end of a buffer is held back (at most three bytes)
//! and completed from the front of the next one. The sink therefore only ever
//! sees whole, valid characters, however the bytes were split.

use core::str;

use log::trace;

use crate::error::Utf8Error;

/// Error returned by [`Utf8Reassembler::feed`].
#[derive(Debug, Clone, PartialEq)]
pub enum FeedError<E> {
    /// The input was not valid UTF-8.
    Utf8(Utf8Error),
    /// The sink rejected a forwarded chunk.
    Sink(E),
}

impl<E> From<Utf8Error> for FeedError<E> {
    fn from(err: Utf8Error) -> Self {
        Self::Utf8(err)
    }
}

/// Carries incomplete UTF-8 sequences from one byte buffer to the next.
#[derive(Debug, Clone, Default)]
pub struct Utf8Reassembler {
    pending: [u8; 4],
    /// Bytes of `pending` filled so far.
    received: u8,
    /// Total length of the sequence in `pending`; 0 when nothing is pending.
    expected: u8,
}

/// Length of the sequence introduced by `lead`, or `None` if `lead` cannot
/// start a character.
#[inline]
fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

impl Utf8Reassembler {
    /// Creates a reassembler with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether part of a character is being held back.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.expected != 0
    }

    /// Feeds one buffer of bytes, calling `forward` with every run of complete
    /// characters, in order.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Utf8`] on a byte that cannot start a character or
    /// a sequence that is not valid UTF-8; any valid text before it has been
    /// forwarded. Returns [`FeedError::Sink`] as soon as `forward` fails.
    pub fn feed<F, E>(&mut self, bytes: &[u8], mut forward: F) -> Result<(), FeedError<E>>
    where
        F: FnMut(&str) -> Result<(), E>,
    {
        let mut rest = bytes;

        if self.expected != 0 {
            let filled = usize::from(self.received);
            let expected = usize::from(self.expected);
            let take = (expected - filled).min(rest.len());
            let lead = self.pending[0];
            if !rest[..take].iter().copied().all(is_continuation) {
                self.reset();
                return Err(Utf8Error::InvalidSequence { byte: lead }.into());
            }
            self.pending[filled..filled + take].copy_from_slice(&rest[..take]);
            rest = &rest[take..];

            if filled + take < expected {
                self.received = u8::try_from(filled + take).unwrap_or(u8::MAX);
                trace!("still holding {} of {expected} bytes", filled + take);
                return Ok(());
            }

            self.received = 0;
            self.expected = 0;
            let text = str::from_utf8(&self.pending[..expected])
                .map_err(|_| Utf8Error::InvalidSequence { byte: lead })?;
            forward(text).map_err(FeedError::Sink)?;
        }

        let mut i = 0;
        while i < rest.len() {
            let lead = rest[i];
            let Some(len) = sequence_len(lead) else {
                forward_valid(&rest[..i], &mut forward)?;
                return Err(Utf8Error::InvalidSequence { byte: lead }.into());
            };

            if i + len > rest.len() {
                let tail = &rest[i..];
                if !tail[1..].iter().copied().all(is_continuation) {
                    forward_valid(&rest[..i], &mut forward)?;
                    return Err(Utf8Error::InvalidSequence { byte: lead }.into());
                }
                forward_valid(&rest[..i], &mut forward)?;
                self.pending[..tail.len()].copy_from_slice(tail);
                self.received = u8::try_from(tail.len()).unwrap_or(u8::MAX);
                self.expected = u8::try_from(len).unwrap_or(u8::MAX);
                trace!("holding {} of {len} bytes", tail.len());
                return Ok(());
            }
            i += len;
        }

        forward_valid(rest, &mut forward)
    }

    /// Declares the end of input.
    ///
    /// # Errors
    ///
    /// Fails with [`Utf8Error::IncompleteSequence`] if part of a character is
    /// still held back. The reassembler is empty afterwards either way.
    pub fn finish(&mut self) -> Result<(), Utf8Error> {
        if self.expected == 0 {
            return Ok(());
        }
        let err = Utf8Error::IncompleteSequence {
            expected: self.expected,
            received: self.received,
        };
        self.reset();
        Err(err)
    }

    /// Drops any held-back bytes.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Forwards `span`, which consists of whole sequences by lead byte, after
/// validating it. On invalid input the valid prefix is forwarded first.
fn forward_valid<F, E>(span: &[u8], forward: &mut F) -> Result<(), FeedError<E>>
where
    F: FnMut(&str) -> Result<(), E>,
{
    if span.is_empty() {
        return Ok(());
    }
    match str::from_utf8(span) {
        Ok(text) => forward(text).map_err(FeedError::Sink),
        Err(err) => {
            let (valid, invalid) = span.split_at(err.valid_up_to());
            if let Ok(text) = str::from_utf8(valid) {
                if !text.is_empty() {
                    forward(text).map_err(FeedError::Sink)?;
                }
            }
            Err(Utf8Error::InvalidSequence { byte: invalid[0] }.into())
        }
    }
}
