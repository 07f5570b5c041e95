//! At-rules: `@name prelude;` or `@name prelude { … }`.

use crate::node::{AtRule, BlockKind, ComponentValue};
use crate::parser::CssParser;
use crate::stream::Location;
use crate::tokenizer::TokenType;

impl CssParser<'_> {
    /// Consumes an at-rule. The at-keyword token itself has already been
    /// consumed by the caller; its name and location are passed in.
    pub(crate) fn consume_at_rule(&mut self, name: String, location: Location) -> AtRule {
        log::trace!("consume_at_rule @{}", name);

        let mut prelude = Vec::new();

        loop {
            let cv = self.consume();
            match cv {
                ComponentValue::Preserved(t) => match t.token_type {
                    TokenType::Semicolon => {
                        return AtRule {
                            name,
                            prelude,
                            block: None,
                            location,
                        };
                    }
                    TokenType::Eof => {
                        self.add_parse_error(t.location, "unexpected end of file in at-rule");
                        return AtRule {
                            name,
                            prelude,
                            block: None,
                            location,
                        };
                    }
                    TokenType::LCurly => {
                        let block = self.consume_simple_block(BlockKind::CurlyBracket, t.location);
                        return AtRule {
                            name,
                            prelude,
                            block: Some(block),
                            location,
                        };
                    }
                    _ => {
                        self.reconsume();
                        prelude.push(self.consume_component_value());
                    }
                },
                ComponentValue::Block(block) if block.is_curly() => {
                    return AtRule {
                        name,
                        prelude,
                        block: Some(block),
                        location,
                    };
                }
                _ => {
                    self.reconsume();
                    prelude.push(self.consume_component_value());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::stream::CharStream;
    use crate::CssParser;

    fn at_rule(css: &str) -> crate::node::AtRule {
        let mut stream = CharStream::new();
        stream.read_from_str(css);

        let mut parser = CssParser::new(&mut stream);
        parser.parse_rule().unwrap().as_at_rule().clone()
    }

    #[test]
    fn at_rule_with_semicolon() {
        let rule = at_rule("@import url(foo.css);");

        assert_eq!(rule.name, "import");
        assert_eq!(rule.prelude.len(), 2); // whitespace + url
        assert!(rule.block.is_none());
    }

    #[test]
    fn at_rule_with_block() {
        let rule = at_rule("@media screen { a { } }");

        assert_eq!(rule.name, "media");
        assert_eq!(rule.prelude.len(), 3); // ws ident ws
        assert!(rule.block.is_some());
    }

    #[test]
    fn at_rule_without_terminator_recovers_at_eof() {
        let mut stream = CharStream::new();
        stream.read_from_str("@charset \"utf-8\"");

        let mut parser = CssParser::new(&mut stream);
        let rule = parser.parse_rule().unwrap();

        assert!(rule.is_at_rule());
        assert_eq!(parser.take_errors().len(), 1);
    }

    #[test]
    fn at_rule_prelude_keeps_nested_blocks() {
        let rule = at_rule("@supports (display: grid) {}");

        // ws + paren block + ws
        assert_eq!(rule.prelude.len(), 3);
        assert!(matches!(
            rule.prelude[1],
            crate::node::ComponentValue::Block(_)
        ));
    }
}
