//! Events reported by the tokenizer and the trait that receives them.
//!
//! Every event corresponds to a completed grammar production. Events arrive
//! in input order, and splitting the input differently never changes the
//! sequence.
//!
//! # Examples
//!
//! ```
//! use jsonsax::{ParseEvent, ParserOptions, SaxParser, Scalar, handler_fn};
//!
//! let mut values = Vec::new();
//! let mut parser = SaxParser::new(
//!     ParserOptions::default(),
//!     handler_fn(|event| {
//!         if let ParseEvent::Value(value) = event {
//!             values.push(value);
//!         }
//!     }),
//! );
//! parser.write("[null, \"x\"]").unwrap().end().unwrap();
//! drop(parser);
//! assert_eq!(values, vec![Scalar::Null, Scalar::String("x".into())]);
//! ```
use alloc::{string::String, vec::Vec};

use crate::error::ParserError;

/// A scalar JSON value.
///
/// Strings, numbers, booleans and `null` are all reported through
/// [`ParseEvent::Value`]; there is no separate string event.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A decoded string. Escapes have been resolved.
    String(String),
    /// A number, as parsed from its lexeme.
    Number(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// `null`.
    Null,
}

impl Scalar {
    /// Returns the string if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric value.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// An event generated by the tokenizer.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[cfg_attr(any(test, feature = "serde"), serde(tag = "kind", content = "data"))]
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    /// The parser is ready for a new document.
    ///
    /// Not a once-only event: it fires on construction, again after every
    /// [`End`](Self::End) when the instance re-arms, and on
    /// [`SaxParser::reset`](crate::SaxParser::reset). A handler that wants a
    /// single notification has to deduplicate it.
    Ready,
    /// A scalar value in value position.
    Value(Scalar),
    /// An object key.
    Key(String),
    /// `{`
    OpenObject,
    /// `}`
    CloseObject,
    /// `[`
    OpenArray,
    /// `]`
    CloseArray,
    /// The parser rejected its input. The same error is returned from the
    /// call that caused it.
    Error(ParserError),
    /// The document ended cleanly.
    End,
}

/// Receives the events of a parser.
///
/// Implemented for `Vec<ParseEvent>`, which simply collects every event, for
/// mutable references to handlers, and for closures wrapped with
/// [`handler_fn`].
pub trait EventHandler {
    /// Called once per event, in input order.
    fn handle(&mut self, event: ParseEvent);
}

impl EventHandler for Vec<ParseEvent> {
    fn handle(&mut self, event: ParseEvent) {
        self.push(event);
    }
}

impl<H: EventHandler + ?Sized> EventHandler for &mut H {
    fn handle(&mut self, event: ParseEvent) {
        (**self).handle(event);
    }
}

/// An [`EventHandler`] backed by a closure. See [`handler_fn`].
#[derive(Debug, Clone)]
pub struct FnHandler<F>(F);

impl<F: FnMut(ParseEvent)> EventHandler for FnHandler<F> {
    fn handle(&mut self, event: ParseEvent) {
        (self.0)(event);
    }
}

/// Wraps a closure as an [`EventHandler`].
pub fn handler_fn<F: FnMut(ParseEvent)>(f: F) -> FnHandler<F> {
    FnHandler(f)
}
