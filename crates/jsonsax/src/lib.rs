//! An event-driven (SAX-style) JSON tokenizer that can be fed text or raw bytes
//! in arbitrarily split chunks.
//!
//! The parser never builds a document tree. It reports structural events to an
//! [`EventHandler`] as soon as each grammar production completes, and keeps
//! every piece of in-progress work (nesting, partial strings, partial escapes,
//! partial numbers, partial UTF-8 sequences) as explicit instance state, so a
//! document may be spread over any number of `write` calls.
//!
//! ```rust
//! use jsonsax::{ParseEvent, ParserOptions, SaxParser, Scalar};
//!
//! let mut parser = SaxParser::new(ParserOptions::default(), Vec::new());
//! parser.write(r#"{"a": [1, tr"#).unwrap();
//! parser.write(r#"ue]}"#).unwrap();
//! parser.end().unwrap();
//!
//! let events = parser.into_handler();
//! assert_eq!(
//!     events,
//!     vec![
//!         ParseEvent::Ready,
//!         ParseEvent::OpenObject,
//!         ParseEvent::Key("a".into()),
//!         ParseEvent::OpenArray,
//!         ParseEvent::Value(Scalar::Number(1.0)),
//!         ParseEvent::Value(Scalar::Boolean(true)),
//!         ParseEvent::CloseArray,
//!         ParseEvent::CloseObject,
//!         ParseEvent::End,
//!         ParseEvent::Ready,
//!     ]
//! );
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod chars;
mod error;
mod event;
mod guard;
mod options;
mod parser;
mod stream;
mod utf8;

#[cfg(test)]
mod tests;

pub use error::{BufferKind, BufferOverflow, ErrorSource, ParserError, SyntaxError, Utf8Error};
pub use event::{EventHandler, FnHandler, ParseEvent, Scalar, handler_fn};
pub use options::ParserOptions;
pub use parser::SaxParser;
pub use stream::ByteStream;
pub use utf8::{FeedError, Utf8Reassembler};
