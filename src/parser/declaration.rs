//! Declarations and declaration lists.

use crate::errors::SyntaxResult;
use crate::node::{ComponentValue, Declaration, DeclarationListItem};
use crate::parser::CssParser;
use crate::stream::Location;
use crate::tokenizer::{Token, TokenType};
use crate::SyntaxError;

fn trim_trailing_whitespace(value: &mut Vec<ComponentValue>) {
    while value.last().is_some_and(ComponentValue::is_whitespace) {
        value.pop();
    }
}

impl CssParser<'_> {
    /// Parses exactly one declaration (without a trailing `;`)
    pub fn parse_declaration(&mut self) -> SyntaxResult<Declaration> {
        log::trace!("parse_declaration");

        self.skip_whitespace();

        let cv = self.consume();
        match cv {
            ComponentValue::Preserved(t) => match t.token_type {
                TokenType::Ident(property) => self
                    .consume_declaration(property, t.location)
                    .ok_or_else(|| SyntaxError::new("expected a declaration", t.location)),
                _ => Err(SyntaxError::new("expected an identifier", t.location)),
            },
            cv => Err(SyntaxError::new("expected an identifier", cv.location())),
        }
    }

    /// Parses a `;`-separated list of declarations, with at-rules allowed
    /// between them
    pub fn parse_list_of_declarations(&mut self) -> Vec<DeclarationListItem> {
        log::trace!("parse_list_of_declarations");

        self.consume_list_of_declarations()
    }

    /// 5.4.4. Consume a list of declarations. A declaration candidate is
    /// gathered into a sub-list of component values up to the next `;` so
    /// that semicolons nested in blocks do not terminate it.
    pub(crate) fn consume_list_of_declarations(&mut self) -> Vec<DeclarationListItem> {
        let mut items = Vec::new();

        loop {
            let cv = self.consume();
            match cv {
                ComponentValue::Preserved(t) => match t.token_type {
                    TokenType::Whitespace | TokenType::Semicolon => {}
                    TokenType::Eof => return items,
                    TokenType::AtKeyword(name) => {
                        items.push(DeclarationListItem::AtRule(
                            self.consume_at_rule(name, t.location),
                        ));
                    }
                    TokenType::Ident(name) => {
                        let ident = Token::new(TokenType::Ident(name), t.location);
                        let mut sub = vec![ComponentValue::Preserved(ident)];

                        loop {
                            let cv = self.consume();
                            match &cv {
                                ComponentValue::Preserved(t)
                                    if matches!(
                                        t.token_type,
                                        TokenType::Semicolon | TokenType::Eof
                                    ) =>
                                {
                                    self.reconsume();
                                    break;
                                }
                                _ => {
                                    self.reconsume();
                                    sub.push(self.consume_component_value());
                                }
                            }
                        }

                        if let Some(declaration) = self.consume_declaration_from_list(sub) {
                            items.push(DeclarationListItem::Declaration(declaration));
                        }
                    }
                    _ => {
                        self.add_parse_error(t.location, "unexpected token in declaration list");
                        self.reconsume();
                        self.parse_until_declaration_end();
                    }
                },
                cv => {
                    self.add_parse_error(cv.location(), "unexpected token in declaration list");
                    self.reconsume();
                    self.parse_until_declaration_end();
                }
            }
        }
    }

    /// Runs `consume_declaration` over a gathered sub-list; the first value
    /// is the property ident.
    fn consume_declaration_from_list(&mut self, sub: Vec<ComponentValue>) -> Option<Declaration> {
        let mut sub_parser = CssParser::from_component_values(sub);

        let declaration = match sub_parser.consume() {
            ComponentValue::Preserved(t) => match t.token_type {
                TokenType::Ident(property) => sub_parser.consume_declaration(property, t.location),
                _ => None,
            },
            _ => None,
        };

        self.absorb_errors(sub_parser.take_errors());

        declaration
    }

    /// 5.4.5. Consume a declaration. The property ident has already been
    /// consumed. Returns nothing (a parse error) when the `:` is missing.
    pub(crate) fn consume_declaration(
        &mut self,
        property: String,
        location: Location,
    ) -> Option<Declaration> {
        log::trace!("consume_declaration {}", property);

        self.skip_whitespace();

        let cv = self.consume();
        match &cv {
            ComponentValue::Preserved(t) if t.is_colon() => {}
            _ => {
                self.add_parse_error(cv.location(), "expected a colon in declaration");
                return None;
            }
        }

        let mut value = Vec::new();
        loop {
            let cv = self.consume();
            if let ComponentValue::Preserved(t) = &cv {
                if t.is_eof() {
                    break;
                }
            }
            self.reconsume();
            value.push(self.consume_component_value());
        }

        let mut important = false;
        trim_trailing_whitespace(&mut value);

        let n = value.len();
        if n >= 2 {
            let last_is_important = matches!(
                &value[n - 1],
                ComponentValue::Preserved(t)
                    if matches!(&t.token_type, TokenType::Ident(s) if s.eq_ignore_ascii_case("important"))
            );

            let mut i = n - 1;
            while i > 0 && value[i - 1].is_whitespace() {
                i -= 1;
            }

            if last_is_important && i > 0 && value[i - 1].is_delim('!') {
                value.truncate(i - 1);
                important = true;
                trim_trailing_whitespace(&mut value);
            }
        }

        Some(Declaration {
            property,
            value,
            important,
            location,
        })
    }

    /// Discards component values until the end of the current declaration
    /// (the `;` or EOF stays in the stream)
    pub(crate) fn parse_until_declaration_end(&mut self) {
        loop {
            let cv = self.consume();
            match &cv {
                ComponentValue::Preserved(t)
                    if matches!(t.token_type, TokenType::Semicolon | TokenType::Eof) =>
                {
                    self.reconsume();
                    return;
                }
                _ => {
                    self.reconsume();
                    let _ = self.consume_component_value();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::CharStream;

    macro_rules! parse {
        ($func:ident, $input:expr) => {{
            let mut stream = CharStream::new();
            stream.read_from_str($input);
            let mut parser = CssParser::new(&mut stream);
            parser.$func()
        }};
    }

    #[test]
    fn parse_declaration() {
        let declaration = parse!(parse_declaration, "color: red").unwrap();

        assert_eq!(declaration.property, "color");
        assert!(!declaration.important);
        // the whitespace after the colon is part of the value
        assert_eq!(declaration.value.len(), 2);
        assert!(declaration.value[0].is_whitespace());
        assert!(declaration.value[1].is_ident());
    }

    #[test]
    fn important_is_stripped_from_the_value() {
        let declaration = parse!(parse_declaration, "color: red !important").unwrap();

        assert!(declaration.important);
        assert_eq!(declaration.value.len(), 2);
        assert!(declaration.value[1].is_ident());

        let declaration = parse!(parse_declaration, "color: red ! IMPORTANT ").unwrap();
        assert!(declaration.important);
        assert_eq!(declaration.value.len(), 2);
    }

    #[test]
    fn declaration_display() {
        let declaration = parse!(parse_declaration, "color: red !important").unwrap();
        assert_eq!(declaration.to_string(), "color: red !important");

        let declaration = parse!(parse_declaration, "margin:0").unwrap();
        assert_eq!(declaration.to_string(), "margin:0");
    }

    #[test]
    fn important_alone_is_not_stripped() {
        // no `!`, so the ident stays in the value
        let declaration = parse!(parse_declaration, "color: important").unwrap();
        assert!(!declaration.important);
        assert_eq!(declaration.value.len(), 2);
    }

    #[test]
    fn missing_colon_is_a_syntax_error() {
        assert!(parse!(parse_declaration, "color red").is_err());
        assert!(parse!(parse_declaration, "4px: red").is_err());
    }

    #[test]
    fn parse_list_of_declarations() {
        let items = parse!(
            parse_list_of_declarations,
            "color: red; background: blue;"
        );

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_declaration().property, "color");
        assert_eq!(items[1].as_declaration().property, "background");
    }

    #[test]
    fn at_rules_are_allowed_between_declarations() {
        let items = parse!(
            parse_list_of_declarations,
            "color: red; @media print; background: blue"
        );

        assert_eq!(items.len(), 3);
        assert!(items[0].is_declaration());
        assert_eq!(items[1].as_at_rule().name, "media");
        assert!(items[2].is_declaration());
    }

    #[test]
    fn invalid_entries_are_discarded_until_the_next_semicolon() {
        let mut stream = CharStream::new();
        stream.read_from_str("4px solid; color: red");

        let mut parser = CssParser::new(&mut stream);
        let items = parser.parse_list_of_declarations();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_declaration().property, "color");
        assert!(!parser.take_errors().is_empty());
    }

    #[test]
    fn semicolons_inside_blocks_do_not_split_declarations() {
        let items = parse!(parse_list_of_declarations, "a: {x;y}; b: c");

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_declaration().property, "a");
        assert_eq!(items[1].as_declaration().property, "b");
    }

    #[test]
    fn declaration_without_colon_in_list_is_dropped() {
        let mut stream = CharStream::new();
        stream.read_from_str("color red; background: blue");

        let mut parser = CssParser::new(&mut stream);
        let items = parser.parse_list_of_declarations();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_declaration().property, "background");
        assert!(!parser.take_errors().is_empty());
    }
}
