//! Stylesheets and rule lists.

use crate::node::{ComponentValue, Rule, Stylesheet};
use crate::parser::CssParser;
use crate::tokenizer::TokenType;

impl CssParser<'_> {
    /// Parses a complete stylesheet: a top-level rule list with a leading
    /// `@charset` rule dropped (the decoding layer already honored it).
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        log::trace!("parse_stylesheet");

        let location = self.current_location();
        let mut rules = self.consume_list_of_rules(true);

        if let Some(Rule::At(at_rule)) = rules.first() {
            if at_rule.name.eq_ignore_ascii_case("charset") {
                rules.remove(0);
            }
        }

        Stylesheet { rules, location }
    }

    /// Parses a rule list that is not at the top level of a stylesheet, so
    /// CDO/CDC are not special.
    pub fn parse_list_of_rules(&mut self) -> Vec<Rule> {
        log::trace!("parse_list_of_rules");

        self.consume_list_of_rules(false)
    }

    /// 5.4.1. Consume a list of rules. At the top level, CDO and CDC tokens
    /// left behind by HTML comment wrappers are skipped.
    pub(crate) fn consume_list_of_rules(&mut self, top_level: bool) -> Vec<Rule> {
        let mut rules = Vec::new();

        loop {
            let cv = self.consume();
            match cv {
                ComponentValue::Preserved(t) => match t.token_type {
                    TokenType::Whitespace => {}
                    TokenType::Eof => return rules,
                    TokenType::Cdo | TokenType::Cdc => {
                        if !top_level {
                            self.reconsume();
                            if let Some(rule) = self.consume_qualified_rule() {
                                rules.push(Rule::Qualified(rule));
                            }
                        }
                    }
                    TokenType::AtKeyword(name) => {
                        rules.push(Rule::At(self.consume_at_rule(name, t.location)));
                    }
                    _ => {
                        self.reconsume();
                        if let Some(rule) = self.consume_qualified_rule() {
                            rules.push(Rule::Qualified(rule));
                        }
                    }
                },
                _ => {
                    self.reconsume();
                    if let Some(rule) = self.consume_qualified_rule() {
                        rules.push(Rule::Qualified(rule));
                    }
                }
            }
        }
    }
}
