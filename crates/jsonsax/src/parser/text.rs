//! `trim` / `normalize` applied incrementally.
//!
//! A string value longer than the buffer limit is emitted in parts. The
//! shaping state travels with the string, so the parts concatenate to exactly
//! what the whole string would have produced: leading whitespace is dropped
//! until the first non-whitespace character, trailing whitespace of a part is
//! held back until it is known not to end the string, and whitespace runs
//! collapse to one space even when they straddle a part boundary.

use alloc::string::String;

use crate::options::ParserOptions;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TextShaping {
    /// Non-whitespace text has been emitted, so leading whitespace is gone.
    started: bool,
    /// The last character shaped was whitespace.
    in_whitespace: bool,
}

impl TextShaping {
    /// Shapes the final piece of a string.
    pub(crate) fn finish(mut self, options: &ParserOptions, text: String) -> String {
        if !options.trim && !options.normalize {
            return text;
        }
        let body = if options.trim { text.trim_end() } else { &text };
        self.shape(options, body)
    }

    /// Shapes a piece of a string that continues after it. Returns the text
    /// to emit now and the whitespace suffix to keep for the next piece.
    pub(crate) fn part<'a>(
        &mut self,
        options: &ParserOptions,
        text: &'a str,
    ) -> (String, &'a str) {
        if !options.trim {
            return (self.shape(options, text), "");
        }
        let body = text.trim_end();
        let held = &text[body.len()..];
        let out = self.shape(options, body);
        if !self.started {
            // Still leading whitespace, which trimming drops.
            return (out, "");
        }
        if options.normalize && !held.is_empty() {
            return (out, " ");
        }
        (out, held)
    }

    /// Shapes `text` with no knowledge of what follows it.
    pub(crate) fn shape(&mut self, options: &ParserOptions, text: &str) -> String {
        if !options.trim && !options.normalize {
            return String::from(text);
        }
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if !c.is_whitespace() {
                self.started = true;
                self.in_whitespace = false;
                out.push(c);
                continue;
            }
            if options.trim && !self.started {
                continue;
            }
            if options.normalize {
                if !self.in_whitespace {
                    out.push(' ');
                }
                self.in_whitespace = true;
            } else {
                out.push(c);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use rstest::rstest;

    use super::TextShaping;
    use crate::options::ParserOptions;

    fn options(trim: bool, normalize: bool) -> ParserOptions {
        ParserOptions {
            trim,
            normalize,
            ..ParserOptions::default()
        }
    }

    /// Shapes `text` as if it were flushed every `step` characters.
    fn shape_in_parts(options: &ParserOptions, text: &str, step: usize) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut shaping = TextShaping::default();
        let mut out = String::new();
        let mut pending = String::new();
        let mut pieces = chars.chunks(step).peekable();
        while let Some(piece) = pieces.next() {
            pending.extend(piece);
            if pieces.peek().is_none() {
                out.push_str(&shaping.finish(options, pending));
                break;
            }
            let (part, held) = shaping.part(options, &pending);
            out.push_str(&part);
            pending = String::from(held);
        }
        out
    }

    #[test]
    fn whole_string() {
        let text = String::from("  a \t\n b  ");
        let shaping = TextShaping::default();
        assert_eq!(shaping.finish(&options(false, false), text.clone()), text);
        assert_eq!(shaping.finish(&options(true, false), text.clone()), "a \t\n b");
        assert_eq!(shaping.finish(&options(false, true), text.clone()), " a b ");
        assert_eq!(shaping.finish(&options(true, true), text), "a b");
    }

    #[rstest]
    fn parts_match_whole(
        #[values("a b", "  a  b \n c  ", "   ", "x", "a    ", "\u{3000}é\u{2028}ü ")] text: &str,
        #[values(1, 2, 3, 5)] step: usize,
        #[values(false, true)] trim: bool,
        #[values(false, true)] normalize: bool,
    ) {
        let options = options(trim, normalize);
        let whole = TextShaping::default().finish(&options, String::from(text));
        assert_eq!(shape_in_parts(&options, text, step), whole);
    }

    #[test]
    fn trailing_whitespace_is_held() {
        let options = options(true, false);
        let mut shaping = TextShaping::default();
        assert_eq!(shaping.part(&options, "  ab \t"), (String::from("ab"), " \t"));
        assert_eq!(shaping.part(&options, " \t c"), (String::from(" \t c"), ""));
    }

    #[test]
    fn normalize_collapses_held_whitespace() {
        let options = options(true, true);
        let mut shaping = TextShaping::default();
        assert_eq!(shaping.part(&options, "ab \n\n"), (String::from("ab"), " "));
    }
}
