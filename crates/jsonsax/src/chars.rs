//! Fixed table of the characters the JSON grammar cares about.
//!
//! The tokenizer dispatches on these constants rather than on character
//! literals scattered through the state machine, and uses the predicates below
//! for the handful of character classes it needs.

/// `"`
pub const QUOTE: char = '"';
/// `\`
pub const BACKSLASH: char = '\\';
/// `/`
pub const SLASH: char = '/';
/// `{`
pub const OPEN_BRACE: char = '{';
/// `}`
pub const CLOSE_BRACE: char = '}';
/// `[`
pub const OPEN_BRACKET: char = '[';
/// `]`
pub const CLOSE_BRACKET: char = ']';
/// `:`
pub const COLON: char = ':';
/// `,`
pub const COMMA: char = ',';
/// `.`
pub const PERIOD: char = '.';
/// `+`
pub const PLUS: char = '+';
/// `-`
pub const MINUS: char = '-';
/// `0`
pub const ZERO: char = '0';
/// `e`
pub const LOWER_E: char = 'e';
/// `E`
pub const UPPER_E: char = 'E';

/// `t`, the first letter of `true`.
pub const LOWER_T: char = 't';
/// `f`, the first letter of `false`.
pub const LOWER_F: char = 'f';
/// `n`, the first letter of `null`.
pub const LOWER_N: char = 'n';
/// `u`, both inside `true`/`null` and as the unicode escape marker.
pub const LOWER_U: char = 'u';

/// Escape characters that may follow a backslash, paired with the character
/// they decode to. `\u` is handled separately.
pub const SIMPLE_ESCAPES: [(char, char); 8] = [
    (QUOTE, QUOTE),
    (BACKSLASH, BACKSLASH),
    (SLASH, SLASH),
    ('b', '\u{0008}'),
    ('f', '\u{000C}'),
    ('n', '\n'),
    ('r', '\r'),
    ('t', '\t'),
];

/// JSON insignificant whitespace: space, tab, line feed and carriage return.
#[inline]
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// ASCII decimal digit.
#[inline]
#[must_use]
pub const fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Exponent marker, `e` or `E`.
#[inline]
#[must_use]
pub const fn is_exponent(c: char) -> bool {
    matches!(c, LOWER_E | UPPER_E)
}

/// Sign character, `+` or `-`.
#[inline]
#[must_use]
pub const fn is_sign(c: char) -> bool {
    matches!(c, PLUS | MINUS)
}

/// Decodes the character following a backslash, or `None` if it is not one
/// of the single-character escapes.
#[must_use]
pub fn simple_escape(c: char) -> Option<char> {
    SIMPLE_ESCAPES
        .iter()
        .find_map(|&(escape, decoded)| (escape == c).then_some(decoded))
}
