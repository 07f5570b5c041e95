//! The `An+B` notation from selector pseudo-classes like `:nth-child()`.
//!
//! The grammar leans on tokenizer output: `2n` arrives as a dimension,
//! `-n-3` as an ident, `+3` as a signed number. Each shape is dispatched on
//! the written form, so sign and whitespace rules match the notation
//! exactly (`+ n` is invalid, `n + 3` is not).

use crate::errors::SyntaxResult;
use crate::node::{AnPlusB, ComponentValue};
use crate::parser::CssParser;
use crate::stream::Location;
use crate::tokenizer::{Token, TokenType};
use crate::SyntaxError;

impl CssParser<'_> {
    pub fn parse_anplusb(&mut self) -> SyntaxResult<AnPlusB> {
        log::trace!("parse_anplusb");

        self.skip_whitespace();

        let t = self.consume_anplusb_token()?;
        let location = t.location;

        let result = match t.token_type {
            TokenType::Number {
                value, is_integer, ..
            } => {
                if !is_integer {
                    return Err(SyntaxError::new("expected an integer", location));
                }
                AnPlusB {
                    a: 0,
                    b: value as i32,
                }
            }
            TokenType::Dimension {
                value,
                unit,
                is_integer,
                ..
            } => {
                if !is_integer {
                    return Err(SyntaxError::new("expected an integer", location));
                }
                self.dispatch_n_pattern(value as i32, &unit.to_ascii_lowercase(), location)?
            }
            TokenType::Ident(value) => {
                let ident = value.to_ascii_lowercase();
                match ident.as_str() {
                    "odd" => AnPlusB { a: 2, b: 1 },
                    "even" => AnPlusB { a: 2, b: 0 },
                    _ => {
                        if let Some(rest) = ident.strip_prefix('-') {
                            self.dispatch_n_pattern(-1, rest, location)?
                        } else {
                            self.dispatch_n_pattern(1, &ident, location)?
                        }
                    }
                }
            }
            TokenType::Delim('+') => {
                // the ident must follow the `+` immediately, so no
                // whitespace skip before this consume
                let t = self.consume_anplusb_token()?;
                match t.token_type {
                    TokenType::Ident(value) => {
                        self.dispatch_n_pattern(1, &value.to_ascii_lowercase(), t.location)?
                    }
                    _ => {
                        return Err(SyntaxError::new("expected an identifier after +", t.location));
                    }
                }
            }
            _ => return Err(SyntaxError::new("expected an+b", location)),
        };

        self.skip_whitespace();

        let t = self.consume_anplusb_token()?;
        if !t.is_eof() {
            return Err(SyntaxError::new("unexpected input after an+b", t.location));
        }

        Ok(result)
    }

    /// An+B operates on plain tokens; a materialized block or function can
    /// never be part of the notation.
    fn consume_anplusb_token(&mut self) -> SyntaxResult<Token> {
        match self.consume() {
            ComponentValue::Preserved(t) => Ok(t),
            cv => Err(SyntaxError::new("expected an+b", cv.location())),
        }
    }

    /// Handles the `n`, `n-` and `n-<digits>` shapes of an ident or
    /// dimension unit whose sign has already been folded into `a`.
    fn dispatch_n_pattern(
        &mut self,
        a: i32,
        pattern: &str,
        location: Location,
    ) -> SyntaxResult<AnPlusB> {
        let Some(rest) = pattern.strip_prefix('n') else {
            return Err(SyntaxError::new("expected n", location));
        };

        if rest.is_empty() {
            let b = self.parse_optional_b()?;
            return Ok(AnPlusB { a, b });
        }

        if rest == "-" {
            let b = self.parse_signless_integer()?;
            return Ok(AnPlusB { a, b: -b });
        }

        if let Some(digits) = rest.strip_prefix('-') {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                let b = digits
                    .parse::<i32>()
                    .map_err(|_| SyntaxError::new("integer out of range", location))?;
                return Ok(AnPlusB { a, b: -b });
            }
        }

        Err(SyntaxError::new("unexpected characters after n", location))
    }

    /// The optional `± <integer>` tail after a bare `n`: nothing, a signed
    /// number (`+3` tokenizes into one number), or a sign delimiter followed
    /// by a signless integer.
    fn parse_optional_b(&mut self) -> SyntaxResult<i32> {
        self.skip_whitespace();

        let t = self.consume_anplusb_token()?;
        match t.token_type {
            TokenType::Eof => {
                self.reconsume();
                Ok(0)
            }
            TokenType::Number {
                value,
                repr,
                is_integer,
            } => {
                if !is_integer {
                    return Err(SyntaxError::new("expected an integer", t.location));
                }
                if repr.starts_with('+') || repr.starts_with('-') {
                    Ok(value as i32)
                } else {
                    Err(SyntaxError::new("expected a signed integer", t.location))
                }
            }
            TokenType::Delim(sign @ ('+' | '-')) => {
                let b = self.parse_signless_integer()?;
                Ok(if sign == '-' { -b } else { b })
            }
            _ => Err(SyntaxError::new("expected a signed integer", t.location)),
        }
    }

    /// An integer number whose written form starts with a digit
    fn parse_signless_integer(&mut self) -> SyntaxResult<i32> {
        self.skip_whitespace();

        let t = self.consume_anplusb_token()?;
        match t.token_type {
            TokenType::Number {
                value,
                repr,
                is_integer: true,
            } if repr.starts_with(|c: char| c.is_ascii_digit()) => Ok(value as i32),
            _ => Err(SyntaxError::new("expected a signless integer", t.location)),
        }
    }
}
