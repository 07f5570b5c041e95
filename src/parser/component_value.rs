//! Component values, simple blocks and functions.

use crate::errors::SyntaxResult;
use crate::node::{BlockKind, ComponentValue, Function, SimpleBlock};
use crate::parser::CssParser;
use crate::stream::Location;
use crate::tokenizer::TokenType;
use crate::SyntaxError;

fn closes(token_type: &TokenType, kind: BlockKind) -> bool {
    matches!(
        (token_type, kind),
        (TokenType::RCurly, BlockKind::CurlyBracket)
            | (TokenType::RBracket, BlockKind::SquareBracket)
            | (TokenType::RParen, BlockKind::Paren)
    )
}

impl CssParser<'_> {
    /// Parses exactly one component value; only whitespace may surround it.
    pub fn parse_component_value(&mut self) -> SyntaxResult<ComponentValue> {
        log::trace!("parse_component_value");

        self.skip_whitespace();

        let cv = self.consume();
        if let ComponentValue::Preserved(t) = &cv {
            if t.is_eof() {
                return Err(SyntaxError::new("unexpected end of file", t.location));
            }
        }
        self.reconsume();

        let value = self.consume_component_value();

        self.skip_whitespace();

        let cv = self.consume();
        match &cv {
            ComponentValue::Preserved(t) if t.is_eof() => Ok(value),
            _ => Err(SyntaxError::new(
                "unexpected input after component value",
                cv.location(),
            )),
        }
    }

    /// Parses component values until the input runs out
    pub fn parse_list_of_component_values(&mut self) -> Vec<ComponentValue> {
        log::trace!("parse_list_of_component_values");

        let mut values = Vec::new();

        loop {
            let cv = self.consume_component_value();
            if let ComponentValue::Preserved(t) = &cv {
                if t.is_eof() {
                    return values;
                }
            }
            values.push(cv);
        }
    }

    /// Parses component values split into groups on top-level commas.
    /// Commas nested in blocks or functions do not split.
    pub fn parse_comma_separated_list_of_component_values(&mut self) -> Vec<Vec<ComponentValue>> {
        log::trace!("parse_comma_separated_list_of_component_values");

        let mut groups = Vec::new();
        let mut current = Vec::new();

        loop {
            let cv = self.consume_component_value();
            match &cv {
                ComponentValue::Preserved(t) if t.is_eof() => {
                    groups.push(current);
                    return groups;
                }
                ComponentValue::Preserved(t) if t.is_comma() => {
                    groups.push(std::mem::take(&mut current));
                }
                _ => current.push(cv),
            }
        }
    }

    /// Consumes one component value: an opener becomes a simple block, a
    /// function token becomes a function, anything else stays a preserved
    /// token. Materialized blocks and functions pass through as-is.
    pub(crate) fn consume_component_value(&mut self) -> ComponentValue {
        match self.consume() {
            ComponentValue::Preserved(t) => match t.token_type {
                TokenType::LCurly => ComponentValue::Block(
                    self.consume_simple_block(BlockKind::CurlyBracket, t.location),
                ),
                TokenType::LBracket => ComponentValue::Block(
                    self.consume_simple_block(BlockKind::SquareBracket, t.location),
                ),
                TokenType::LParen => {
                    ComponentValue::Block(self.consume_simple_block(BlockKind::Paren, t.location))
                }
                TokenType::Function(name) => {
                    ComponentValue::Function(self.consume_function(name, t.location))
                }
                _ => ComponentValue::Preserved(t),
            },
            materialized => materialized,
        }
    }

    /// Consumes values until the matching closer; the opener has already
    /// been consumed. The closer is consumed too, so the returned block
    /// never dangles.
    pub(crate) fn consume_simple_block(&mut self, kind: BlockKind, location: Location) -> SimpleBlock {
        log::trace!("consume_simple_block {:?}", kind);

        let mut values = Vec::new();

        loop {
            let cv = self.consume();
            match &cv {
                ComponentValue::Preserved(t) if closes(&t.token_type, kind) => {
                    return SimpleBlock::new(kind, values, location);
                }
                ComponentValue::Preserved(t) if t.is_eof() => {
                    self.add_parse_error(t.location, "unexpected end of file in block");
                    return SimpleBlock::new(kind, values, location);
                }
                _ => {
                    self.reconsume();
                    values.push(self.consume_component_value());
                }
            }
        }
    }

    /// Consumes values until the matching `)`; the function token has
    /// already been consumed.
    pub(crate) fn consume_function(&mut self, name: String, location: Location) -> Function {
        log::trace!("consume_function {}", name);

        let mut values = Vec::new();

        loop {
            let cv = self.consume();
            match &cv {
                ComponentValue::Preserved(t) if matches!(t.token_type, TokenType::RParen) => {
                    return Function::new(name, values, location);
                }
                ComponentValue::Preserved(t) if t.is_eof() => {
                    self.add_parse_error(t.location, "unexpected end of file in function");
                    return Function::new(name, values, location);
                }
                _ => {
                    self.reconsume();
                    values.push(self.consume_component_value());
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
    fn single_component_value() {
        let cv = parse!(parse_component_value, "  red  ").unwrap();
        assert!(cv.is_ident());

        let cv = parse!(parse_component_value, "[ a b ]").unwrap();
        assert_eq!(cv.as_block().kind, BlockKind::SquareBracket);
        assert_eq!(cv.as_block().values.len(), 5);
    }

    #[test]
    fn single_component_value_rejects_extra_input() {
        assert!(parse!(parse_component_value, "a b").is_err());
        assert!(parse!(parse_component_value, "").is_err());
        assert!(parse!(parse_component_value, "   ").is_err());
    }

    #[test]
    fn function_values_are_nested() {
        let cv = parse!(parse_component_value, "rgba(255, 0 , 0)").unwrap();

        let function = cv.as_function();
        assert_eq!(function.name, "rgba");
        // 255 , ws 0 ws , ws 0
        assert_eq!(function.values.len(), 8);
    }

    #[test]
    fn unclosed_function_is_recovered_at_eof() {
        let cv = parse!(parse_component_value, "calc(1px").unwrap();
        assert_eq!(cv.as_function().values.len(), 1);
    }

    #[test]
    fn blocks_nest_and_closers_match() {
        let cv = parse!(parse_component_value, "{ [a] (b) }").unwrap();

        let block = cv.as_block();
        assert!(block.is_curly());

        let kinds: Vec<_> = block
            .values
            .iter()
            .filter(|v| matches!(v, ComponentValue::Block(_)))
            .map(|v| v.as_block().kind)
            .collect();
        assert_eq!(kinds, vec![BlockKind::SquareBracket, BlockKind::Paren]);
    }

    #[test]
    fn stray_closer_stays_a_preserved_token() {
        let values = parse!(parse_list_of_component_values, "a ] b");
        assert!(values[2].is_preserved());
        assert!(matches!(
            values[2].as_token().token_type,
            TokenType::RBracket
        ));
    }

    #[test]
    fn list_of_component_values() {
        let values = parse!(parse_list_of_component_values, "a 1px { b }");
        assert_eq!(values.len(), 5);
        assert!(values[4].as_block().is_curly());
    }

    #[test]
    fn comma_separated_list_splits_at_top_level_only() {
        let groups = parse!(
            parse_comma_separated_list_of_component_values,
            "a, rgb(1,2,3), { x, y }"
        );

        assert_eq!(groups.len(), 3);
        // the commas inside the function and the block do not split
        assert_eq!(groups[1].len(), 2); // whitespace + function
        assert_eq!(groups[2].len(), 2); // whitespace + block
    }

    #[test]
    fn comma_separated_list_of_empty_input_is_one_empty_group() {
        let groups = parse!(parse_comma_separated_list_of_component_values, "");
        assert_eq!(groups, vec![Vec::new()]);
    }
}
