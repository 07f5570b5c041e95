//! Parser over the token stream.
//!
//! The parser mirrors the input stream one level up: it keeps the
//! last-consumed input and a one-slot reconsume flag, and pulls from a
//! [`TokenSource`] so the same productions run over live tokenizer output or
//! over an already materialized component-value list.

use crate::errors::{ErrorLogger, ParseError};
use crate::node::ComponentValue;
use crate::stream::{CharStream, Location};
use crate::tokenizer::{Token, TokenType, Tokenizer};

mod anplusb;
mod at_rule;
mod component_value;
mod declaration;
mod rule;
mod stylesheet;

/// Uniform pull interface delivering the next input as a component value.
/// A live tokenizer wraps every token as a preserved component value; a
/// list-backed source replays materialized functions and blocks as-is.
/// Exhausted sources yield `Eof` tokens indefinitely.
pub enum TokenSource<'stream> {
    Live(Tokenizer<'stream>),
    List {
        values: Vec<ComponentValue>,
        position: usize,
    },
}

impl TokenSource<'_> {
    fn next(&mut self) -> ComponentValue {
        match self {
            TokenSource::Live(tokenizer) => ComponentValue::Preserved(tokenizer.next_token()),
            TokenSource::List { values, position } => match values.get(*position) {
                Some(value) => {
                    *position += 1;
                    value.clone()
                }
                None => {
                    let location = values
                        .last()
                        .map(ComponentValue::location)
                        .unwrap_or_default();
                    ComponentValue::Preserved(Token::new(TokenType::Eof, location))
                }
            },
        }
    }
}

/// CSS parser over a [`TokenSource`]
pub struct CssParser<'stream> {
    source: TokenSource<'stream>,
    /// The last-consumed input
    current: Option<ComponentValue>,
    /// When set, the next consume re-delivers the current input
    reconsuming: bool,
    errors: ErrorLogger,
}

impl<'stream> CssParser<'stream> {
    /// Creates a parser that tokenizes the given code-point stream on demand
    pub fn new(stream: &'stream mut CharStream) -> Self {
        Self::from_source(TokenSource::Live(Tokenizer::new(stream)))
    }

    /// Creates a parser that replays an already materialized list of
    /// component values
    pub fn from_component_values(values: Vec<ComponentValue>) -> Self {
        Self::from_source(TokenSource::List {
            values,
            position: 0,
        })
    }

    fn from_source(source: TokenSource<'stream>) -> Self {
        Self {
            source,
            current: None,
            reconsuming: false,
            errors: ErrorLogger::new(),
        }
    }

    /// All parse errors recorded so far, tokenizer ones first. Draining is
    /// destructive; call after parsing.
    pub fn take_errors(&mut self) -> Vec<ParseError> {
        let mut errors = match &mut self.source {
            TokenSource::Live(tokenizer) => tokenizer.take_errors(),
            TokenSource::List { .. } => Vec::new(),
        };
        errors.append(&mut self.errors.take());
        errors
    }

    pub(crate) fn add_parse_error(&mut self, location: Location, message: &str) {
        self.errors.add_error(location, message);
    }

    pub(crate) fn absorb_errors(&mut self, errors: Vec<ParseError>) {
        for err in errors {
            self.errors.add_error(err.location, &err.message);
        }
    }

    /// Consumes the next input. If a reconsume is pending, clears it and
    /// re-delivers the current input instead.
    pub(crate) fn consume(&mut self) -> ComponentValue {
        if self.reconsuming {
            self.reconsuming = false;
        } else {
            self.current = Some(self.source.next());
        }

        // before the first consume there is nothing to re-deliver
        self.current
            .clone()
            .unwrap_or_else(|| ComponentValue::Preserved(Token::new(TokenType::Eof, Location::default())))
    }

    /// Makes the next consume a no-op that returns the current input again
    pub(crate) fn reconsume(&mut self) {
        debug_assert!(!self.reconsuming, "reconsume without intervening consume");
        self.reconsuming = true;
    }

    /// Location of the upcoming input
    pub(crate) fn current_location(&self) -> Location {
        match &self.source {
            TokenSource::Live(tokenizer) => tokenizer.current_location(),
            TokenSource::List { values, position } => values
                .get(position.saturating_sub(usize::from(self.reconsuming)))
                .map(ComponentValue::location)
                .unwrap_or_default(),
        }
    }

    /// Consumes whitespace tokens until the next input is non-whitespace
    pub(crate) fn skip_whitespace(&mut self) {
        loop {
            let cv = self.consume();
            if !cv.is_whitespace() {
                self.reconsume();
                return;
            }
        }
    }
}
