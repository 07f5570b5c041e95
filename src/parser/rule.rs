//! Qualified rules and the single-rule entry point.

use crate::errors::SyntaxResult;
use crate::node::{BlockKind, ComponentValue, QualifiedRule, Rule};
use crate::parser::CssParser;
use crate::tokenizer::TokenType;
use crate::SyntaxError;

impl CssParser<'_> {
    /// Parses exactly one rule; after it only whitespace may remain.
    pub fn parse_rule(&mut self) -> SyntaxResult<Rule> {
        log::trace!("parse_rule");

        self.skip_whitespace();

        let cv = self.consume();
        let rule = match cv {
            ComponentValue::Preserved(t) => match t.token_type {
                TokenType::Eof => {
                    return Err(SyntaxError::new("unexpected end of file", t.location));
                }
                TokenType::AtKeyword(name) => Rule::At(self.consume_at_rule(name, t.location)),
                _ => {
                    self.reconsume();
                    match self.consume_qualified_rule() {
                        Some(rule) => Rule::Qualified(rule),
                        None => {
                            return Err(SyntaxError::new("expected a rule", t.location));
                        }
                    }
                }
            },
            cv => {
                self.reconsume();
                match self.consume_qualified_rule() {
                    Some(rule) => Rule::Qualified(rule),
                    None => return Err(SyntaxError::new("expected a rule", cv.location())),
                }
            }
        };

        self.skip_whitespace();

        let cv = self.consume();
        match &cv {
            ComponentValue::Preserved(t) if t.is_eof() => Ok(rule),
            _ => Err(SyntaxError::new("unexpected input after rule", cv.location())),
        }
    }

    /// Consumes a qualified rule: a prelude up to a `{`-block. Returns
    /// nothing when the input ends before the block (a parse error).
    pub(crate) fn consume_qualified_rule(&mut self) -> Option<QualifiedRule> {
        log::trace!("consume_qualified_rule");

        let location = self.current_location();
        let mut prelude = Vec::new();

        loop {
            let cv = self.consume();
            match cv {
                ComponentValue::Preserved(t) => match t.token_type {
                    TokenType::Eof => {
                        self.add_parse_error(t.location, "unexpected end of file in qualified rule");
                        return None;
                    }
                    TokenType::LCurly => {
                        let block = self.consume_simple_block(BlockKind::CurlyBracket, t.location);
                        return Some(QualifiedRule {
                            prelude,
                            block,
                            location,
                        });
                    }
                    _ => {
                        self.reconsume();
                        prelude.push(self.consume_component_value());
                    }
                },
                ComponentValue::Block(block) if block.is_curly() => {
                    return Some(QualifiedRule {
                        prelude,
                        block,
                        location,
                    });
                }
                _ => {
                    self.reconsume();
                    prelude.push(self.consume_component_value());
                }
            }
        }
    }
}
