//! CSS tokenizer according to the [w3 specification](https://www.w3.org/TR/css-syntax-3/#tokenization)
//!
//! Pull-based: every call to [`Tokenizer::next_token`] consumes exactly one
//! token from the underlying code-point stream. Numeric tokens keep the raw
//! character sequence they were parsed from, so `.009` and `9e-3` stay
//! distinguishable for consumers that care about the written form.

use std::fmt;

use crate::errors::{ErrorLogger, ParseError};
use crate::stream::Character::{Ch, StreamEnd};
use crate::stream::{CharStream, Character, Location};
use crate::unicode;
use crate::unicode::UnicodeChar;

pub type Number = f64;

#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    /// An `<at-keyword-token>`. The value does not include the `@` marker.
    AtKeyword(String),
    Ident(String),
    /// A `<function-token>`. The value does not include the `(` marker.
    Function(String),
    /// A `<url-token>` produced by the unquoted `url(…)` form
    Url(String),
    /// A `<bad-url-token>`. This token always indicates a parse error.
    BadUrl,
    Dimension {
        value: Number,
        unit: String,
        /// The number as written, without the unit
        repr: String,
        is_integer: bool,
    },
    Percentage {
        value: Number,
        /// The number as written, without the `%`
        repr: String,
    },
    Number {
        value: Number,
        repr: String,
        is_integer: bool,
    },
    /// A `<string-token>`. The value does not include the quotes.
    QuotedString(String),
    /// A `<bad-string-token>`. This token always indicates a parse error.
    BadString,
    /// A run of whitespace collapsed into one token
    Whitespace,
    /// A `<hash-token>`; `is_id` is set when the code points after the `#`
    /// would start an identifier.
    Hash { value: String, is_id: bool },
    /// A `<delim-token>`
    Delim(char),
    /// A `<{-token>`
    LCurly,
    /// A `<}-token>`
    RCurly,
    /// A `<(-token>`
    LParen,
    /// A `<)-token>`
    RParen,
    /// A `<[-token>`
    LBracket,
    /// A `<]-token>`
    RBracket,
    Comma,
    Colon,
    Semicolon,
    // A `<!--` `<CDO-token>`
    Cdo,
    // A `-->` `<CDC-token>`
    Cdc,
    Eof,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    /// Type of the token
    pub token_type: TokenType,
    /// Location of the token in the stream
    pub location: Location,
}

impl Token {
    /// Returns a new token for the given type on the given location
    pub(crate) fn new(token_type: TokenType, location: Location) -> Token {
        Token {
            token_type,
            location,
        }
    }

    fn new_delim(c: char, location: Location) -> Token {
        Token::new(TokenType::Delim(c), location)
    }

    fn new_hash(value: &str, is_id: bool, location: Location) -> Token {
        Token::new(
            TokenType::Hash {
                value: value.to_string(),
                is_id,
            },
            location,
        )
    }

    fn new_atkeyword(keyword: &str, location: Location) -> Token {
        Token::new(TokenType::AtKeyword(keyword.to_string()), location)
    }

    fn new_number(value: Number, repr: &str, is_integer: bool, location: Location) -> Token {
        Token::new(
            TokenType::Number {
                value,
                repr: repr.to_string(),
                is_integer,
            },
            location,
        )
    }

    fn new_percentage(value: Number, repr: &str, location: Location) -> Token {
        Token::new(
            TokenType::Percentage {
                value,
                repr: repr.to_string(),
            },
            location,
        )
    }

    fn new_dimension(
        value: Number,
        unit: &str,
        repr: &str,
        is_integer: bool,
        location: Location,
    ) -> Token {
        Token::new(
            TokenType::Dimension {
                value,
                unit: unit.to_string(),
                repr: repr.to_string(),
                is_integer,
            },
            location,
        )
    }

    fn new_ident(value: &str, location: Location) -> Token {
        Token::new(TokenType::Ident(value.to_string()), location)
    }

    fn new_function(value: &str, location: Location) -> Token {
        Token::new(TokenType::Function(value.to_string()), location)
    }

    fn new_quoted_string(value: &str, location: Location) -> Token {
        Token::new(TokenType::QuotedString(value.to_string()), location)
    }

    fn new_url(value: &str, location: Location) -> Token {
        Token::new(TokenType::Url(value.to_string()), location)
    }
}

impl Token {
    pub fn is_whitespace(&self) -> bool {
        matches!(self.token_type, TokenType::Whitespace)
    }

    pub fn is_ident(&self) -> bool {
        matches!(self.token_type, TokenType::Ident(_))
    }

    pub fn is_delim(&self, delim: char) -> bool {
        matches!(self.token_type, TokenType::Delim(c) if c == delim)
    }

    pub fn is_comma(&self) -> bool {
        matches!(self.token_type, TokenType::Comma)
    }

    pub fn is_colon(&self) -> bool {
        matches!(self.token_type, TokenType::Colon)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.token_type, TokenType::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = match &self.token_type {
            TokenType::AtKeyword(val) => format!("@{val}"),
            TokenType::Url(val) => format!("url({val})"),
            TokenType::BadUrl => "url()".into(),
            TokenType::Hash { value, .. } => format!("#{value}"),
            TokenType::Ident(val) => val.clone(),
            TokenType::Function(val) => format!("{val}("),
            TokenType::QuotedString(val) => format!("\"{val}\""),
            TokenType::BadString => "\"\"".into(),
            TokenType::Delim(val) => val.to_string(),
            TokenType::Number { repr, .. } => repr.clone(),
            TokenType::Percentage { repr, .. } => format!("{repr}%"),
            TokenType::Dimension { repr, unit, .. } => format!("{repr}{unit}"),
            TokenType::Cdc => "-->".into(),
            TokenType::Cdo => "<!--".into(),
            TokenType::Colon => ":".into(),
            TokenType::Semicolon => ";".into(),
            TokenType::Comma => ",".into(),
            TokenType::LBracket => "[".into(),
            TokenType::RBracket => "]".into(),
            TokenType::LCurly => "{".into(),
            TokenType::RCurly => "}".into(),
            TokenType::LParen => "(".into(),
            TokenType::RParen => ")".into(),
            TokenType::Whitespace => " ".into(),
            TokenType::Eof => String::new(),
        };

        write!(f, "{string}")
    }
}

/// 4.3.8. Check if two code points are a valid escape
fn is_valid_escape(a: Character, b: Character) -> bool {
    a == Ch('\\') && !matches!(b, Ch('\n') | StreamEnd)
}

/// 4.3.9. Check if three code points would start an ident sequence
fn would_start_ident(a: Character, b: Character, c: Character) -> bool {
    match a {
        Ch('-') => b.is_name_start() || b == Ch('-') || is_valid_escape(b, c),
        Ch('\\') => is_valid_escape(a, b),
        _ => a.is_name_start(),
    }
}

/// 4.3.10. Check if three code points would start a number
fn would_start_number(a: Character, b: Character, c: Character) -> bool {
    match a {
        Ch('+' | '-') => b.is_digit() || (b == Ch('.') && c.is_digit()),
        Ch('.') => b.is_digit(),
        _ => a.is_digit(),
    }
}

/// Pull-based tokenizer over a [`CharStream`]
pub struct Tokenizer<'stream> {
    stream: &'stream mut CharStream,
    /// Parse errors seen so far; tokenization always continues past them
    errors: ErrorLogger,
}

impl<'stream> Tokenizer<'stream> {
    pub fn new(stream: &'stream mut CharStream) -> Self {
        Self {
            stream,
            errors: ErrorLogger::new(),
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        self.errors.errors()
    }

    pub(crate) fn take_errors(&mut self) -> Vec<ParseError> {
        self.errors.take()
    }

    pub fn current_location(&self) -> Location {
        self.stream.current_location()
    }

    /// 4.3.1. [Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    pub fn next_token(&mut self) -> Token {
        self.consume_comments();

        let loc = self.stream.current_location();

        let t = match self.stream.consume() {
            StreamEnd => Token::new(TokenType::Eof, loc),
            Ch(c) if unicode::is_whitespace(c) => {
                while self.stream.look_ahead(0).is_whitespace() {
                    self.stream.consume();
                }
                Token::new(TokenType::Whitespace, loc)
            }
            Ch(c @ ('"' | '\'')) => self.consume_string(c, loc),
            Ch(c @ '#') => {
                let first = self.stream.look_ahead(0);
                let second = self.stream.look_ahead(1);

                if first.is_name() || is_valid_escape(first, second) {
                    let is_id =
                        would_start_ident(first, second, self.stream.look_ahead(2));
                    Token::new_hash(self.consume_name().as_str(), is_id, loc)
                } else {
                    Token::new_delim(c, loc)
                }
            }
            Ch('(') => Token::new(TokenType::LParen, loc),
            Ch(')') => Token::new(TokenType::RParen, loc),
            Ch(',') => Token::new(TokenType::Comma, loc),
            Ch(c @ '+') => {
                if self.next_starts_number() {
                    self.stream.reconsume();
                    self.consume_numeric_token(loc)
                } else {
                    Token::new_delim(c, loc)
                }
            }
            Ch(c @ '-') => {
                if self.next_starts_number() {
                    self.stream.reconsume();
                    self.consume_numeric_token(loc)
                } else if self.stream.look_ahead(0) == Ch('-')
                    && self.stream.look_ahead(1) == Ch('>')
                {
                    self.stream.advance(2);
                    Token::new(TokenType::Cdc, loc)
                } else if self.next_starts_ident() {
                    self.stream.reconsume();
                    self.consume_ident_like(loc)
                } else {
                    Token::new_delim(c, loc)
                }
            }
            Ch('.') => {
                if self.next_starts_number() {
                    self.stream.reconsume();
                    self.consume_numeric_token(loc)
                } else {
                    Token::new_delim('.', loc)
                }
            }
            Ch(':') => Token::new(TokenType::Colon, loc),
            Ch(';') => Token::new(TokenType::Semicolon, loc),
            Ch(c @ '<') => {
                if self.stream.look_ahead(0) == Ch('!')
                    && self.stream.look_ahead(1) == Ch('-')
                    && self.stream.look_ahead(2) == Ch('-')
                {
                    self.stream.advance(3);
                    Token::new(TokenType::Cdo, loc)
                } else {
                    Token::new_delim(c, loc)
                }
            }
            Ch(c @ '@') => {
                if would_start_ident(
                    self.stream.look_ahead(0),
                    self.stream.look_ahead(1),
                    self.stream.look_ahead(2),
                ) {
                    Token::new_atkeyword(self.consume_name().as_str(), loc)
                } else {
                    Token::new_delim(c, loc)
                }
            }
            Ch('[') => Token::new(TokenType::LBracket, loc),
            Ch(']') => Token::new(TokenType::RBracket, loc),
            Ch('{') => Token::new(TokenType::LCurly, loc),
            Ch('}') => Token::new(TokenType::RCurly, loc),
            Ch(c @ '\\') => {
                if is_valid_escape(Ch(c), self.stream.look_ahead(0)) {
                    self.stream.reconsume();
                    self.consume_ident_like(loc)
                } else {
                    self.errors.add_error(loc, "invalid escape");
                    Token::new_delim(c, loc)
                }
            }
            Ch(c) if unicode::is_digit(c) => {
                self.stream.reconsume();
                self.consume_numeric_token(loc)
            }
            Ch(c) if unicode::is_name_start(c) => {
                self.stream.reconsume();
                self.consume_ident_like(loc)
            }
            Ch(c) => Token::new_delim(c, loc),
        };

        log::trace!("{:?}", t);

        t
    }

    /// Would the current code point plus the next two start a number?
    fn next_starts_number(&self) -> bool {
        would_start_number(
            self.stream.current(),
            self.stream.look_ahead(0),
            self.stream.look_ahead(1),
        )
    }

    /// Would the current code point plus the next two start an ident sequence?
    fn next_starts_ident(&self) -> bool {
        would_start_ident(
            self.stream.current(),
            self.stream.look_ahead(0),
            self.stream.look_ahead(1),
        )
    }

    /// 4.3.2. [Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    fn consume_comments(&mut self) {
        while self.stream.look_ahead(0) == Ch('/') && self.stream.look_ahead(1) == Ch('*') {
            let loc = self.stream.current_location();
            self.stream.advance(2);

            loop {
                if !self.stream.advance_until('*', true) {
                    self.errors.add_error(loc, "unexpected end of file in comment");
                    return;
                }

                // a lone `*` does not close; `/*/` must not end the comment
                if self.stream.look_ahead(0) == Ch('/') {
                    self.stream.consume();
                    break;
                }
            }
        }
    }

    /// 4.3.3. Consume a numeric token
    ///
    /// Returns either a `<number-token>`, `<percentage-token>`, or `<dimension-token>`.
    fn consume_numeric_token(&mut self, loc: Location) -> Token {
        let (repr, value, is_integer) = self.consume_number();

        if would_start_ident(
            self.stream.look_ahead(0),
            self.stream.look_ahead(1),
            self.stream.look_ahead(2),
        ) {
            let unit = self.consume_name();
            return Token::new_dimension(value, unit.as_str(), repr.as_str(), is_integer, loc);
        }

        if self.stream.look_ahead(0) == Ch('%') {
            self.stream.consume();
            return Token::new_percentage(value, repr.as_str(), loc);
        }

        Token::new_number(value, repr.as_str(), is_integer, loc)
    }

    /// 4.3.12. [Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    ///
    /// Returns the raw character sequence, the converted value, and whether
    /// the written form was an integer. The conversion follows the spec:
    /// `s * (i + f * 10^(-d)) * 10^(t*e)`, computed in f64.
    fn consume_number(&mut self) -> (String, Number, bool) {
        let mut repr = String::new();
        let mut is_integer = true;

        let mut s = 1.0_f64;
        let mut i = 0.0_f64;
        let mut f = 0.0_f64;
        let mut d = 0.0_f64;
        let mut t = 1.0_f64;
        let mut e = 0.0_f64;

        if let Ch(c @ ('+' | '-')) = self.stream.look_ahead(0) {
            if c == '-' {
                s = -1.0;
            }
            repr.push(c);
            self.stream.consume();
        }

        while let Ch(c) = self.stream.look_ahead(0) {
            let Some(digit) = c.to_digit(10) else { break };
            i = i * 10.0 + f64::from(digit);
            repr.push(c);
            self.stream.consume();
        }

        if self.stream.look_ahead(0) == Ch('.') && self.stream.look_ahead(1).is_digit() {
            is_integer = false;
            repr.push('.');
            self.stream.consume();

            while let Ch(c) = self.stream.look_ahead(0) {
                let Some(digit) = c.to_digit(10) else { break };
                f = f * 10.0 + f64::from(digit);
                d += 1.0;
                repr.push(c);
                self.stream.consume();
            }
        }

        if let Ch(exp @ ('e' | 'E')) = self.stream.look_ahead(0) {
            let sign = self.stream.look_ahead(1);
            let has_signed_exponent = matches!(sign, Ch('+' | '-')) && self.stream.look_ahead(2).is_digit();

            if has_signed_exponent || sign.is_digit() {
                is_integer = false;
                repr.push(exp);
                self.stream.consume();

                if has_signed_exponent {
                    if let Ch(c) = self.stream.consume() {
                        if c == '-' {
                            t = -1.0;
                        }
                        repr.push(c);
                    }
                }

                while let Ch(c) = self.stream.look_ahead(0) {
                    let Some(digit) = c.to_digit(10) else { break };
                    e = e * 10.0 + f64::from(digit);
                    repr.push(c);
                    self.stream.consume();
                }
            }
        }

        let value = s * (i + f * 10.0_f64.powf(-d)) * 10.0_f64.powf(t * e);

        (repr, value, is_integer)
    }

    /// 4.3.4. [Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    ///
    /// Returns `<ident-token>`, `<function-token>`, `<url-token>`, or `<bad-url-token>`.
    fn consume_ident_like(&mut self, loc: Location) -> Token {
        let value = self.consume_name();

        if value.eq_ignore_ascii_case("url") && self.stream.look_ahead(0) == Ch('(') {
            self.stream.consume();

            // leave at most one whitespace in front of a quoted argument so
            // the quote decides between the function and the url path
            while self.stream.look_ahead(0).is_whitespace()
                && self.stream.look_ahead(1).is_whitespace()
            {
                self.stream.consume();
            }

            let first = self.stream.look_ahead(0);
            let second = self.stream.look_ahead(1);
            if matches!(first, Ch('"' | '\''))
                || (first.is_whitespace() && matches!(second, Ch('"' | '\'')))
            {
                return Token::new_function(value.as_str(), loc);
            }

            return self.consume_url(loc);
        }

        if self.stream.look_ahead(0) == Ch('(') {
            self.stream.consume();
            return Token::new_function(value.as_str(), loc);
        }

        Token::new_ident(value.as_str(), loc)
    }

    /// 4.3.5. [Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Returns either a `<string-token>` or `<bad-string-token>`. The opening
    /// quote has already been consumed.
    fn consume_string(&mut self, ending: char, loc: Location) -> Token {
        let mut value = String::new();

        loop {
            match self.stream.consume() {
                StreamEnd => {
                    self.errors
                        .add_error(self.stream.current_location(), "unexpected end of file in string");
                    return Token::new_quoted_string(value.as_str(), loc);
                }
                Ch(c) if c == ending => {
                    return Token::new_quoted_string(value.as_str(), loc);
                }
                Ch('\n') => {
                    // the newline stays in the stream and tokenizes as whitespace
                    self.stream.reconsume();
                    self.errors
                        .add_error(self.stream.current_location(), "newline in string");
                    return Token::new(TokenType::BadString, loc);
                }
                Ch('\\') => match self.stream.look_ahead(0) {
                    StreamEnd => {}
                    Ch('\n') => {
                        // line continuation
                        self.stream.consume();
                    }
                    _ => value.push(self.consume_escaped()),
                },
                Ch(c) => value.push(c),
            }
        }
    }

    /// 4.3.6. [Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-a-url-token)
    ///
    /// Returns either a `<url-token>` or a `<bad-url-token>`. `url(` has
    /// already been consumed.
    fn consume_url(&mut self, loc: Location) -> Token {
        let mut value = String::new();

        while self.stream.look_ahead(0).is_whitespace() {
            self.stream.consume();
        }

        loop {
            match self.stream.consume() {
                Ch(')') => return Token::new_url(value.as_str(), loc),
                StreamEnd => {
                    self.errors
                        .add_error(self.stream.current_location(), "unexpected end of file in url");
                    return Token::new_url(value.as_str(), loc);
                }
                Ch(c) if unicode::is_whitespace(c) => {
                    while self.stream.look_ahead(0).is_whitespace() {
                        self.stream.consume();
                    }

                    match self.stream.look_ahead(0) {
                        Ch(')') => {
                            self.stream.consume();
                            return Token::new_url(value.as_str(), loc);
                        }
                        StreamEnd => {
                            self.errors.add_error(
                                self.stream.current_location(),
                                "unexpected end of file in url",
                            );
                            return Token::new_url(value.as_str(), loc);
                        }
                        _ => {
                            self.errors
                                .add_error(self.stream.current_location(), "unexpected character in url");
                            self.consume_bad_url_remnants();
                            return Token::new(TokenType::BadUrl, loc);
                        }
                    }
                }
                Ch('"' | '\'' | '(') => {
                    self.errors
                        .add_error(self.stream.current_location(), "unexpected character in url");
                    self.consume_bad_url_remnants();
                    return Token::new(TokenType::BadUrl, loc);
                }
                Ch(c) if unicode::is_non_printable(c) => {
                    self.errors
                        .add_error(self.stream.current_location(), "non-printable character in url");
                    self.consume_bad_url_remnants();
                    return Token::new(TokenType::BadUrl, loc);
                }
                Ch('\\') => {
                    if matches!(self.stream.look_ahead(0), Ch('\n') | StreamEnd) {
                        self.errors
                            .add_error(self.stream.current_location(), "invalid escape in url");
                        self.consume_bad_url_remnants();
                        return Token::new(TokenType::BadUrl, loc);
                    }

                    value.push(self.consume_escaped());
                }
                Ch(c) => value.push(c),
            }
        }
    }

    /// 4.3.14. [Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    ///
    /// Consumes enough of the input to reach a recovery point where normal
    /// tokenizing can resume. An escaped `)` does not close the bad url.
    fn consume_bad_url_remnants(&mut self) {
        loop {
            match self.stream.consume() {
                Ch(')') | StreamEnd => return,
                Ch('\\') if !matches!(self.stream.look_ahead(0), Ch('\n') | StreamEnd) => {
                    self.consume_escaped();
                }
                Ch(_) => {}
            }
        }
    }

    /// 4.3.7. [Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-an-escaped-code-point)
    ///
    /// The `\` has already been consumed.
    fn consume_escaped(&mut self) -> char {
        match self.stream.consume() {
            StreamEnd => {
                self.errors.add_error(
                    self.stream.current_location(),
                    "unexpected end of file after escape",
                );
                UnicodeChar::REPLACEMENT_CHARACTER
            }
            Ch(c) if unicode::is_hex_digit(c) => {
                let mut value = c.to_digit(16).unwrap_or(0);
                let mut digits = 1;

                while digits < 6 && self.stream.look_ahead(0).is_hex_digit() {
                    if let Ch(c) = self.stream.consume() {
                        value = value * 16 + c.to_digit(16).unwrap_or(0);
                        digits += 1;
                    }
                }

                if self.stream.look_ahead(0).is_whitespace() {
                    self.stream.consume();
                }

                // zero, surrogates and out-of-range values all map to U+FFFD
                match char::from_u32(value) {
                    Some(c) if c != UnicodeChar::NULL => c,
                    _ => UnicodeChar::REPLACEMENT_CHARACTER,
                }
            }
            Ch(c) => c,
        }
    }

    /// 4.3.11. [Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    ///
    /// The caller must ensure the stream starts with an ident sequence; this
    /// returns the greatest run of name code points and valid escapes.
    fn consume_name(&mut self) -> String {
        let mut value = String::new();

        loop {
            if self.stream.look_ahead(0).is_name() {
                if let Ch(c) = self.stream.consume() {
                    value.push(c);
                }
            } else if is_valid_escape(self.stream.look_ahead(0), self.stream.look_ahead(1)) {
                self.stream.consume();
                value.push(self.consume_escaped());
            } else {
                return value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_token_eq {
        ($t1:expr, $t2:expr) => {
            assert_eq!($t1.token_type, $t2)
        };
    }

    fn tokenizer<'a>(stream: &'a mut CharStream, input: &str) -> Tokenizer<'a> {
        stream.read_from_str(input);
        Tokenizer::new(stream)
    }

    fn tokenize_types(input: &str) -> Vec<TokenType> {
        let mut stream = CharStream::new();
        let mut tokenizer = tokenizer(&mut stream, input);

        let mut tokens = Vec::new();
        loop {
            let t = tokenizer.next_token();
            let eof = t.is_eof();
            tokens.push(t.token_type);
            if eof {
                return tokens;
            }
        }
    }

    fn ident(value: &str) -> TokenType {
        TokenType::Ident(value.to_string())
    }

    fn number(value: Number, repr: &str, is_integer: bool) -> TokenType {
        TokenType::Number {
            value,
            repr: repr.to_string(),
            is_integer,
        }
    }

    #[test]
    fn parse_comment() {
        let mut stream = CharStream::new();
        let mut tokenizer = tokenizer(&mut stream, "/* css comment */a");

        assert_token_eq!(tokenizer.next_token(), ident("a"));
        assert_token_eq!(tokenizer.next_token(), TokenType::Eof);
    }

    #[test]
    fn parse_spaced_comments() {
        assert_eq!(
            tokenize_types("/*/*///** /* **/*//* "),
            vec![
                TokenType::Delim('/'),
                TokenType::Delim('*'),
                TokenType::Delim('/'),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn comment_without_closer_is_a_parse_error() {
        let mut stream = CharStream::new();
        let mut tokenizer = tokenizer(&mut stream, "/* never closed");

        assert_token_eq!(tokenizer.next_token(), TokenType::Eof);
        assert_eq!(tokenizer.errors().len(), 1);
    }

    #[test]
    fn parse_numbers() {
        let tests = vec![
            ("12", 12.0, "12", true),
            ("+34", 34.0, "+34", true),
            ("-56", -56.0, "-56", true),
            ("7.8", 7.8, "7.8", false),
            ("-9.10", -9.10, "-9.10", false),
            ("0.0001", 0.0001, "0.0001", false),
            ("1e+1", 1e+1, "1e+1", false),
            ("1e1", 1e1, "1e1", false),
            ("1e-1", 1e-1, "1e-1", false),
            (".5", 0.5, ".5", false),
            ("+.5", 0.5, "+.5", false),
        ];

        for (input, value, repr, is_integer) in tests {
            let mut stream = CharStream::new();
            let mut tokenizer = tokenizer(&mut stream, input);

            assert_token_eq!(tokenizer.next_token(), number(value, repr, is_integer));
        }
    }

    #[test]
    fn number_repr_is_preserved() {
        let mut stream = CharStream::new();
        let mut tokenizer = tokenizer(&mut stream, "0.009 9e-3");

        let t1 = tokenizer.next_token();
        tokenizer.next_token(); // whitespace
        let t2 = tokenizer.next_token();

        let (TokenType::Number { value: v1, repr: r1, .. }, TokenType::Number { value: v2, repr: r2, .. }) =
            (t1.token_type, t2.token_type)
        else {
            panic!("expected two number tokens");
        };

        assert_ne!(r1, r2);
        assert_eq!(r1, "0.009");
        assert_eq!(r2, "9e-3");
        assert_eq!(v1, v2);
    }

    #[test]
    fn parse_numeric_tokens() {
        let tests = vec![
            (
                "1.1rem",
                TokenType::Dimension {
                    value: 1.1,
                    unit: "rem".to_string(),
                    repr: "1.1".to_string(),
                    is_integer: false,
                },
            ),
            (
                "1px",
                TokenType::Dimension {
                    value: 1.0,
                    unit: "px".to_string(),
                    repr: "1".to_string(),
                    is_integer: true,
                },
            ),
            (
                "100%",
                TokenType::Percentage {
                    value: 100.0,
                    repr: "100".to_string(),
                },
            ),
            ("42", number(42.0, "42", true)),
        ];

        for (input, expected) in tests {
            let mut stream = CharStream::new();
            let mut tokenizer = tokenizer(&mut stream, input);
            assert_token_eq!(tokenizer.next_token(), expected);
        }
    }

    #[test]
    fn parse_ident_tokens() {
        let tests = vec![
            ("-ident", "-ident"),
            ("--ident", "--ident"),
            ("_123-ident", "_123-ident"),
            ("\\26 b", "&b"),
            ("rêd", "rêd"),
        ];

        for (input, expected) in tests {
            let mut stream = CharStream::new();
            let mut tokenizer = tokenizer(&mut stream, input);
            assert_token_eq!(tokenizer.next_token(), ident(expected));
        }
    }

    #[test]
    fn parse_escaped_code_points() {
        let tests = vec![
            ("a\\2A b", "a*b"),
            ("a\\005F b", "a_b"),
            // zero, surrogate and out-of-range escapes become U+FFFD
            ("a\\0 b", "a\u{FFFD}b"),
            ("a\\D800 b", "a\u{FFFD}b"),
            ("a\\110000 b", "a\u{FFFD}b"),
        ];

        for (input, expected) in tests {
            let mut stream = CharStream::new();
            let mut tokenizer = tokenizer(&mut stream, input);
            assert_token_eq!(tokenizer.next_token(), ident(expected));
        }
    }

    #[test]
    fn lone_backslash_is_a_delim() {
        let mut stream = CharStream::new();
        let mut tokenizer = tokenizer(&mut stream, "a\\");

        // `a` is an ident start; the trailing lone backslash is not a valid
        // escape so the name ends before it
        assert_token_eq!(tokenizer.next_token(), ident("a"));
        assert_token_eq!(tokenizer.next_token(), TokenType::Delim('\\'));
        assert_eq!(tokenizer.errors().len(), 1);
    }

    #[test]
    fn parse_string_tokens() {
        let tests = vec![
            ("\"double quotes\"", TokenType::QuotedString("double quotes".to_string())),
            ("'single quotes'", TokenType::QuotedString("single quotes".to_string())),
            ("\"\"", TokenType::QuotedString(String::new())),
            ("\"eof", TokenType::QuotedString("eof".to_string())),
            ("\"a\\\nb\"", TokenType::QuotedString("ab".to_string())),
            ("'line\nnewline'", TokenType::BadString),
            ("\"me \\26  you\"", TokenType::QuotedString("me & you".to_string())),
        ];

        for (input, expected) in tests {
            let mut stream = CharStream::new();
            let mut tokenizer = tokenizer(&mut stream, input);
            assert_token_eq!(tokenizer.next_token(), expected);
        }
    }

    #[test]
    fn bad_string_leaves_newline_in_stream() {
        assert_eq!(
            tokenize_types("'a\nb"),
            vec![
                TokenType::BadString,
                TokenType::Whitespace,
                ident("b"),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn parse_urls() {
        let tests = vec![
            ("url(https://gosub.io/)", TokenType::Url("https://gosub.io/".to_string())),
            ("url(  gosub.io   )", TokenType::Url("gosub.io".to_string())),
            ("url(gosub\\2E io)", TokenType::Url("gosub.io".to_string())),
            ("url()", TokenType::Url(String::new())),
            ("url( )", TokenType::Url(String::new())),
            ("url(eof", TokenType::Url("eof".to_string())),
            ("url(bad url)", TokenType::BadUrl),
            ("url(bad\"url\")", TokenType::BadUrl),
            ("url(bad\u{0001}url)", TokenType::BadUrl),
            ("url(bad\\\nurl)", TokenType::BadUrl),
        ];

        for (input, expected) in tests {
            let mut stream = CharStream::new();
            let mut tokenizer = tokenizer(&mut stream, input);
            assert_token_eq!(tokenizer.next_token(), expected);
        }
    }

    #[test]
    fn bad_url_recovery_skips_escaped_close_paren() {
        assert_eq!(
            tokenize_types("url(b(ad\\)still)a"),
            vec![TokenType::BadUrl, ident("a"), TokenType::Eof]
        );
    }

    #[test]
    fn url_with_quote_after_whitespace_is_a_function() {
        assert_eq!(
            tokenize_types("url( \"x.png\" )"),
            vec![
                TokenType::Function("url".to_string()),
                TokenType::Whitespace,
                TokenType::QuotedString("x.png".to_string()),
                TokenType::Whitespace,
                TokenType::RParen,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn parse_function_tokens() {
        let tests = vec![
            ("url(\"", TokenType::Function("url".to_string())),
            ("attr('", TokenType::Function("attr".to_string())),
            ("rotateX(", TokenType::Function("rotateX".to_string())),
            ("-rgba(", TokenType::Function("-rgba".to_string())),
            ("--rgba(", TokenType::Function("--rgba".to_string())),
            ("_rgba(", TokenType::Function("_rgba".to_string())),
            ("\\30 rgba(", TokenType::Function("0rgba".to_string())),
        ];

        for (input, expected) in tests {
            let mut stream = CharStream::new();
            let mut tokenizer = tokenizer(&mut stream, input);
            assert_token_eq!(tokenizer.next_token(), expected);
        }
    }

    #[test]
    fn ident_followed_by_whitespace_and_paren_is_not_a_function() {
        assert_eq!(
            tokenize_types("rgba ()"),
            vec![
                ident("rgba"),
                TokenType::Whitespace,
                TokenType::LParen,
                TokenType::RParen,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn parse_hash_tokens() {
        assert_eq!(
            tokenize_types("#header #-red #--red #0red #\\26 red ##"),
            vec![
                TokenType::Hash {
                    value: "header".to_string(),
                    is_id: true,
                },
                TokenType::Whitespace,
                TokenType::Hash {
                    value: "-red".to_string(),
                    is_id: true,
                },
                TokenType::Whitespace,
                TokenType::Hash {
                    value: "--red".to_string(),
                    is_id: true,
                },
                TokenType::Whitespace,
                // digits make a valid hash value but not a valid id
                TokenType::Hash {
                    value: "0red".to_string(),
                    is_id: false,
                },
                TokenType::Whitespace,
                TokenType::Hash {
                    value: "&red".to_string(),
                    is_id: true,
                },
                TokenType::Whitespace,
                TokenType::Delim('#'),
                TokenType::Delim('#'),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn parse_at_keywords() {
        assert_eq!(
            tokenize_types("@media @-moz-keyframes @--x @0media @.media"),
            vec![
                TokenType::AtKeyword("media".to_string()),
                TokenType::Whitespace,
                TokenType::AtKeyword("-moz-keyframes".to_string()),
                TokenType::Whitespace,
                TokenType::AtKeyword("--x".to_string()),
                TokenType::Whitespace,
                TokenType::Delim('@'),
                TokenType::Dimension {
                    value: 0.0,
                    unit: "media".to_string(),
                    repr: "0".to_string(),
                    is_integer: true,
                },
                TokenType::Whitespace,
                TokenType::Delim('@'),
                TokenType::Delim('.'),
                ident("media"),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn parse_cdo_and_cdc() {
        assert_eq!(
            tokenize_types("<!-- --> <!- -"),
            vec![
                TokenType::Cdo,
                TokenType::Whitespace,
                TokenType::Cdc,
                TokenType::Whitespace,
                TokenType::Delim('<'),
                TokenType::Delim('!'),
                TokenType::Delim('-'),
                TokenType::Whitespace,
                TokenType::Delim('-'),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn parse_signs_and_dots() {
        assert_eq!(
            tokenize_types("+ +1 - -a . .5"),
            vec![
                TokenType::Delim('+'),
                TokenType::Whitespace,
                number(1.0, "+1", true),
                TokenType::Whitespace,
                TokenType::Delim('-'),
                TokenType::Whitespace,
                ident("-a"),
                TokenType::Whitespace,
                TokenType::Delim('.'),
                TokenType::Whitespace,
                number(0.5, ".5", false),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn produce_valid_stream_of_css_tokens() {
        let mut stream = CharStream::new();
        let mut tokenizer = tokenizer(
            &mut stream,
            "
        /* Navbar */
        #header .nav {
            font-size: 1.1rem;
        }

        @media screen (max-width: 200px) {}

        content: \"me \\26  you\";

        background: url(https://gosub.io);
        ",
        );

        let expected = vec![
            TokenType::Whitespace,
            TokenType::Hash {
                value: "header".to_string(),
                is_id: true,
            },
            TokenType::Whitespace,
            TokenType::Delim('.'),
            ident("nav"),
            TokenType::Whitespace,
            TokenType::LCurly,
            TokenType::Whitespace,
            ident("font-size"),
            TokenType::Colon,
            TokenType::Whitespace,
            TokenType::Dimension {
                value: 1.1,
                unit: "rem".to_string(),
                repr: "1.1".to_string(),
                is_integer: false,
            },
            TokenType::Semicolon,
            TokenType::Whitespace,
            TokenType::RCurly,
            TokenType::Whitespace,
            TokenType::AtKeyword("media".to_string()),
            TokenType::Whitespace,
            ident("screen"),
            TokenType::Whitespace,
            TokenType::LParen,
            ident("max-width"),
            TokenType::Colon,
            TokenType::Whitespace,
            TokenType::Dimension {
                value: 200.0,
                unit: "px".to_string(),
                repr: "200".to_string(),
                is_integer: true,
            },
            TokenType::RParen,
            TokenType::Whitespace,
            TokenType::LCurly,
            TokenType::RCurly,
            TokenType::Whitespace,
            ident("content"),
            TokenType::Colon,
            TokenType::Whitespace,
            TokenType::QuotedString("me & you".to_string()),
            TokenType::Semicolon,
            TokenType::Whitespace,
            ident("background"),
            TokenType::Colon,
            TokenType::Whitespace,
            TokenType::Url("https://gosub.io".to_string()),
            TokenType::Semicolon,
            TokenType::Whitespace,
        ];

        for expected in expected {
            assert_token_eq!(tokenizer.next_token(), expected);
        }

        assert_token_eq!(tokenizer.next_token(), TokenType::Eof);
    }

    #[test]
    fn eof_is_emitted_indefinitely() {
        let mut stream = CharStream::new();
        let mut tokenizer = tokenizer(&mut stream, "");

        assert_token_eq!(tokenizer.next_token(), TokenType::Eof);
        assert_token_eq!(tokenizer.next_token(), TokenType::Eof);
    }

    #[test]
    fn consume_name_is_idempotent_on_its_output() {
        let mut stream = CharStream::new();
        let mut tokenizer = tokenizer(&mut stream, "_123\\4A -x");
        let name = tokenizer.consume_name();
        assert_eq!(name, "_123J-x");

        let mut stream2 = CharStream::new();
        stream2.read_from_str(&name);
        let mut tokenizer2 = Tokenizer::new(&mut stream2);

        assert_eq!(tokenizer2.consume_name(), name);
    }

    #[test]
    fn token_locations() {
        let mut stream = CharStream::new();
        let mut tokenizer = tokenizer(&mut stream, "a {\n  b: c;\n}");

        let a = tokenizer.next_token();
        assert_eq!(a.location, Location::new(1, 1, 0));

        tokenizer.next_token(); // whitespace
        let curly = tokenizer.next_token();
        assert_eq!(curly.location, Location::new(1, 3, 2));

        tokenizer.next_token(); // whitespace
        let b = tokenizer.next_token();
        assert_eq!(b.location, Location::new(2, 3, 6));
    }
}
