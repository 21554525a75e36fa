//! Decoding of `\uXXXX` escapes one hex digit at a time.
//!
//! [`UnicodeEscapeBuffer`] folds each digit into a `u16` as it arrives, so an
//! escape may be split across any number of `write` calls. It yields UTF-16
//! code units rather than `char`s: the string state pairs surrogates itself.

use crate::error::SyntaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self { acc: 0, len: 0 }
    }

    /// Convert a single ASCII hex digit into its 0..=15 value.
    #[inline]
    fn hex_val(c: char) -> Option<u16> {
        c.to_digit(16).and_then(|d| u16::try_from(d).ok())
    }

    /// Feeds one hex digit.
    ///
    /// Returns `Ok(None)` while fewer than four digits have been seen and
    /// `Ok(Some(unit))` on the fourth, after which the buffer is reset.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<u16>, SyntaxError> {
        let d = Self::hex_val(c).ok_or(SyntaxError::InvalidUnicodeEscapeChar(c))?;
        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        *self = Self::new();
        Ok(Some(unit))
    }
}

/// Combines a completed escape with a pending high surrogate, if any.
///
/// Returns `Ok(Ok(c))` for a complete scalar, `Ok(Err(high))` when `unit` is a
/// high surrogate that must be followed by a low one, and an error for lone
/// or mismatched surrogates.
pub(crate) fn combine_surrogates(
    pending_high: Option<u16>,
    unit: u16,
) -> Result<Result<char, u16>, SyntaxError> {
    use SyntaxError::InvalidUnicodeEscapeSequence as Invalid;
    match (pending_high, unit) {
        (None, 0xD800..=0xDBFF) => Ok(Err(unit)),
        (None, 0xDC00..=0xDFFF) => Err(Invalid(u32::from(unit))),
        (None, _) => char::from_u32(u32::from(unit))
            .map(Ok)
            .ok_or(Invalid(u32::from(unit))),
        (Some(high), 0xDC00..=0xDFFF) => {
            let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
            char::from_u32(code).map(Ok).ok_or(Invalid(code))
        }
        (Some(high), _) => Err(Invalid(u32::from(high))),
    }
}

#[cfg(test)]
mod tests {
    use super::{UnicodeEscapeBuffer, combine_surrogates};
    use crate::error::SyntaxError;

    #[test]
    fn basic_decoding() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed('0').unwrap(), None);
        assert_eq!(buf.feed('0').unwrap(), None);
        assert_eq!(buf.feed('4').unwrap(), None);
        assert_eq!(buf.feed('1').unwrap(), Some(0x41));
        assert_eq!(buf, UnicodeEscapeBuffer::new());
    }

    #[test]
    fn mixed_case_hex() {
        let mut buf = UnicodeEscapeBuffer::new();
        let mut out = None;
        for ch in "AbCd".chars() {
            out = buf.feed(ch).unwrap();
        }
        assert_eq!(out, Some(0xABCD));
    }

    #[test]
    fn invalid_hex_error() {
        let mut buf = UnicodeEscapeBuffer::new();
        buf.feed('1').unwrap();
        let err = buf.feed('G').unwrap_err();
        assert_eq!(err, SyntaxError::InvalidUnicodeEscapeChar('G'));
    }

    #[test]
    fn surrogate_pairs() {
        assert_eq!(combine_surrogates(None, 0x41), Ok(Ok('A')));
        assert_eq!(combine_surrogates(None, 0xD83D), Ok(Err(0xD83D)));
        assert_eq!(combine_surrogates(Some(0xD83D), 0xDE00), Ok(Ok('😀')));
    }

    #[test]
    fn lone_surrogates_error() {
        assert_eq!(
            combine_surrogates(None, 0xDC00),
            Err(SyntaxError::InvalidUnicodeEscapeSequence(0xDC00))
        );
        assert_eq!(
            combine_surrogates(Some(0xD800), 0x0041),
            Err(SyntaxError::InvalidUnicodeEscapeSequence(0xD800))
        );
    }
}
