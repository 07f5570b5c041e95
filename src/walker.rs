//! The walker prints an indented view of a parsed tree, mainly for tests
//! and debugging.

use std::io::Write;

use crate::node::{ComponentValue, Rule, SimpleBlock, Stylesheet};
use crate::tokenizer::{Token, TokenType};

pub struct Walker<'a> {
    root: &'a Stylesheet,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Stylesheet) -> Self {
        Self { root }
    }

    pub fn walk_stdout(&self) {
        let _ = walk_stylesheet(self.root, 0, &mut std::io::stdout());
    }

    pub fn walk_to_string(&self) -> String {
        let mut output: Vec<u8> = Vec::new();

        let _ = walk_stylesheet(self.root, 0, &mut output);

        String::from_utf8_lossy(&output).into_owned()
    }

    pub fn rule_to_string(rule: &Rule) -> String {
        let mut output: Vec<u8> = Vec::new();

        let _ = walk_rule(rule, 0, &mut output);

        String::from_utf8_lossy(&output).into_owned()
    }
}

fn walk_stylesheet(
    sheet: &Stylesheet,
    depth: usize,
    f: &mut dyn Write,
) -> Result<(), std::io::Error> {
    let prefix = " ".repeat(depth * 2);

    writeln!(f, "{}[Stylesheet ({})]", prefix, sheet.rules.len())?;
    for rule in &sheet.rules {
        walk_rule(rule, depth + 1, f)?;
    }

    Ok(())
}

fn walk_rule(rule: &Rule, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    let prefix = " ".repeat(depth * 2);

    match rule {
        Rule::Qualified(rule) => {
            writeln!(f, "{}[QualifiedRule]", prefix)?;
            writeln!(f, "{}  [Prelude]", prefix)?;
            walk_values(&rule.prelude, depth + 2, f)?;
            walk_block(&rule.block, depth + 1, f)?;
        }
        Rule::At(rule) => {
            writeln!(f, "{}[AtRule] name: {}", prefix, rule.name)?;
            if !rule.prelude.is_empty() {
                writeln!(f, "{}  [Prelude]", prefix)?;
                walk_values(&rule.prelude, depth + 2, f)?;
            }
            if let Some(block) = &rule.block {
                walk_block(block, depth + 1, f)?;
            }
        }
    }

    Ok(())
}

fn walk_block(block: &SimpleBlock, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    let prefix = " ".repeat(depth * 2);

    writeln!(
        f,
        "{}[Block {}{}]",
        prefix,
        block.kind.open_char(),
        block.kind.close_char()
    )?;
    walk_values(&block.values, depth + 1, f)?;

    Ok(())
}

fn walk_values(
    values: &[ComponentValue],
    depth: usize,
    f: &mut dyn Write,
) -> Result<(), std::io::Error> {
    for value in values {
        walk_component_value(value, depth, f)?;
    }

    Ok(())
}

fn walk_component_value(
    value: &ComponentValue,
    depth: usize,
    f: &mut dyn Write,
) -> Result<(), std::io::Error> {
    let prefix = " ".repeat(depth * 2);

    match value {
        ComponentValue::Preserved(token) => walk_token(token, &prefix, f)?,
        ComponentValue::Function(function) => {
            writeln!(f, "{}[Function] {}", prefix, function.name)?;
            walk_values(&function.values, depth + 1, f)?;
        }
        ComponentValue::Block(block) => {
            writeln!(
                f,
                "{}[Block {}{}]",
                prefix,
                block.kind.open_char(),
                block.kind.close_char()
            )?;
            walk_values(&block.values, depth + 1, f)?;
        }
    }

    Ok(())
}

fn walk_token(token: &Token, prefix: &str, f: &mut dyn Write) -> Result<(), std::io::Error> {
    match &token.token_type {
        TokenType::Ident(value) => writeln!(f, "{}[Ident] {}", prefix, value),
        TokenType::AtKeyword(value) => writeln!(f, "{}[AtKeyword] {}", prefix, value),
        TokenType::Hash { value, .. } => writeln!(f, "{}[Hash] {}", prefix, value),
        TokenType::QuotedString(value) => writeln!(f, "{}[String] {}", prefix, value),
        TokenType::BadString => writeln!(f, "{}[BadString]", prefix),
        TokenType::Url(value) => writeln!(f, "{}[Url] {}", prefix, value),
        TokenType::BadUrl => writeln!(f, "{}[BadUrl]", prefix),
        TokenType::Delim(value) => writeln!(f, "{}[Delim] {}", prefix, value),
        TokenType::Number { repr, .. } => writeln!(f, "{}[Number] {}", prefix, repr),
        TokenType::Percentage { repr, .. } => writeln!(f, "{}[Percentage] {}%", prefix, repr),
        TokenType::Dimension { repr, unit, .. } => {
            writeln!(f, "{}[Dimension] {}{}", prefix, repr, unit)
        }
        TokenType::Whitespace => writeln!(f, "{}[Whitespace]", prefix),
        TokenType::Colon => writeln!(f, "{}[Colon]", prefix),
        TokenType::Semicolon => writeln!(f, "{}[Semicolon]", prefix),
        TokenType::Comma => writeln!(f, "{}[Comma]", prefix),
        TokenType::Cdo => writeln!(f, "{}[Cdo]", prefix),
        TokenType::Cdc => writeln!(f, "{}[Cdc]", prefix),
        // only stray closers survive as preserved tokens; openers always
        // become blocks or functions
        TokenType::RCurly => writeln!(f, "{}[RCurly]", prefix),
        TokenType::RBracket => writeln!(f, "{}[RBracket]", prefix),
        TokenType::RParen => writeln!(f, "{}[RParen]", prefix),
        TokenType::LCurly | TokenType::LBracket | TokenType::LParen => {
            writeln!(f, "{}[Delim] {}", prefix, token)
        }
        TokenType::Function(name) => writeln!(f, "{}[Function] {}", prefix, name),
        TokenType::Eof => writeln!(f, "{}[Eof]", prefix),
    }
}
