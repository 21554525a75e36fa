use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;

use super::arbitrary::Document;
use crate::{ByteStream, ParseEvent, ParserOptions, SaxParser};

fn tests() -> u64 {
    if cfg!(miri) {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}

/// Splits `len` items into consecutive non-empty ranges whose sizes are
/// derived from `splits`.
fn partition(len: usize, splits: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for s in splits {
        let remaining = len - start;
        if remaining == 0 {
            break;
        }
        let size = 1 + (s % remaining);
        ranges.push((start, start + size));
        start += size;
    }
    if start < len {
        ranges.push((start, len));
    }
    ranges
}

/// Feeding a document in arbitrary character chunks yields exactly the events
/// of its structure.
#[test]
fn char_chunks_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document, splits: Vec<usize>) -> bool {
        let src = doc.render();
        let chars: Vec<char> = src.chars().collect();

        let mut parser = SaxParser::new(ParserOptions::default(), Vec::new());
        for (start, end) in partition(chars.len(), &splits) {
            let chunk: String = chars[start..end].iter().collect();
            if parser.write(chunk.as_str()).is_err() {
                return false;
            }
        }
        if parser.end().is_err() {
            return false;
        }

        parser.into_handler() == doc.expected_events()
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Document, Vec<usize>) -> bool);
}

/// The same holds for raw bytes, where splits may fall inside a multi-byte
/// character.
#[test]
fn byte_chunks_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document, splits: Vec<usize>) -> bool {
        let src = doc.render();
        let bytes = src.as_bytes();

        let mut stream = ByteStream::new(ParserOptions::default(), Vec::new());
        for (start, end) in partition(bytes.len(), &splits) {
            let Ok(boundary) = stream.write(&bytes[start..end]) else {
                return false;
            };
            if boundary != src.is_char_boundary(end) {
                return false;
            }
        }
        if stream.end(None).is_err() {
            return false;
        }

        stream.into_parser().into_handler() == doc.expected_events()
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Document, Vec<usize>) -> bool);
}

/// A small buffer limit splits long string values, but the parts still
/// concatenate to the unsplit string and never depend on chunking.
#[test]
fn flushed_strings_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document, splits: Vec<usize>) -> bool {
        let src = doc.render();
        let options = ParserOptions {
            max_buffer_length: usize::MAX,
            ..ParserOptions::default()
        };
        let small = ParserOptions {
            max_buffer_length: 8,
            ..ParserOptions::default()
        };

        let mut whole = SaxParser::new(small, Vec::new());
        let whole_result = whole.write(src.as_str()).and_then(|p| p.end()).is_ok();

        let chars: Vec<char> = src.chars().collect();
        let mut split = SaxParser::new(small, Vec::new());
        let mut split_result = true;
        for (start, end) in partition(chars.len(), &splits) {
            let chunk: String = chars[start..end].iter().collect();
            if split.write(chunk.as_str()).is_err() {
                split_result = false;
                break;
            }
        }
        if split_result {
            split_result = split.end().is_ok();
        }

        // Long keys and numbers fail instead of flushing; both runs must agree
        // on where.
        if whole_result != split_result || whole.handler() != split.handler() {
            return false;
        }
        if !whole_result {
            return true;
        }

        let mut unlimited = SaxParser::new(options, Vec::new());
        if unlimited.write(src.as_str()).and_then(|p| p.end()).is_err() {
            return false;
        }
        concat_strings(whole.handler()) == concat_strings(unlimited.handler())
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Document, Vec<usize>) -> bool);
}

fn concat_strings(events: &[ParseEvent]) -> String {
    events
        .iter()
        .filter_map(|e| match e {
            ParseEvent::Value(value) => value.as_str(),
            ParseEvent::Key(key) => Some(key.as_str()),
            _ => None,
        })
        .collect()
}
