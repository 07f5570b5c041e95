//! Tokenizer and parser for the CSS Syntax Module Level 3.
//!
//! The crate covers the two-stage front end of a CSS engine: a pull-based
//! tokenizer over a preprocessed code-point stream and a parser that builds
//! rules, declarations and component-value trees from the token stream.
//! Downstream consumers (a selector engine, a property validator) interpret
//! the returned structures against their own grammar; nothing here validates
//! names or evaluates values.
//!
//! The convenience functions at the crate root parse from a string slice:
//!
//! ```
//! let sheet = css3_syntax::parse_stylesheet("a { color: red }");
//! assert_eq!(sheet.rules.len(), 1);
//! ```
//!
//! Parsing can also run over an already materialized component-value list by
//! building a [`CssParser`] with [`CssParser::from_component_values`]; the
//! parser then replays those values as its token stream.

pub mod errors;
pub mod node;
pub mod parser;
pub mod stream;
pub mod tokenizer;
pub mod unicode;
pub mod walker;

pub use errors::{ParseError, SyntaxError, SyntaxResult};
pub use node::{
    AnPlusB, AtRule, BlockKind, ComponentValue, Declaration, DeclarationListItem, Function,
    QualifiedRule, Rule, SimpleBlock, Stylesheet,
};
pub use parser::CssParser;
pub use stream::{CharStream, Character, Location};
pub use tokenizer::{Number, Token, TokenType, Tokenizer};
pub use walker::Walker;

fn with_parser<T>(css: &str, parse: impl for<'a> FnOnce(&mut CssParser<'a>) -> T) -> T {
    let mut stream = CharStream::new();
    stream.read_from_str(css);

    let mut parser = CssParser::new(&mut stream);
    parse(&mut parser)
}

fn call_parse_stylesheet(p: &mut CssParser<'_>) -> Stylesheet {
    p.parse_stylesheet()
}

fn call_parse_list_of_rules(p: &mut CssParser<'_>) -> Vec<Rule> {
    p.parse_list_of_rules()
}

fn call_parse_rule(p: &mut CssParser<'_>) -> SyntaxResult<Rule> {
    p.parse_rule()
}

fn call_parse_declaration(p: &mut CssParser<'_>) -> SyntaxResult<Declaration> {
    p.parse_declaration()
}

fn call_parse_list_of_declarations(p: &mut CssParser<'_>) -> Vec<DeclarationListItem> {
    p.parse_list_of_declarations()
}

fn call_parse_component_value(p: &mut CssParser<'_>) -> SyntaxResult<ComponentValue> {
    p.parse_component_value()
}

fn call_parse_list_of_component_values(p: &mut CssParser<'_>) -> Vec<ComponentValue> {
    p.parse_list_of_component_values()
}

fn call_parse_comma_separated_list_of_component_values(
    p: &mut CssParser<'_>,
) -> Vec<Vec<ComponentValue>> {
    p.parse_comma_separated_list_of_component_values()
}

fn call_parse_anplusb(p: &mut CssParser<'_>) -> SyntaxResult<AnPlusB> {
    p.parse_anplusb()
}

/// Parses a stylesheet: a top-level rule list with a leading `@charset`
/// rule dropped.
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    with_parser(css, call_parse_stylesheet)
}

/// Parses a list of rules that is not at the top level of a stylesheet
pub fn parse_list_of_rules(css: &str) -> Vec<Rule> {
    with_parser(css, call_parse_list_of_rules)
}

/// Parses exactly one rule; after it only whitespace may remain
pub fn parse_rule(css: &str) -> SyntaxResult<Rule> {
    with_parser(css, call_parse_rule)
}

/// Parses exactly one declaration, without a trailing `;`
pub fn parse_declaration(css: &str) -> SyntaxResult<Declaration> {
    with_parser(css, call_parse_declaration)
}

/// Parses a `;`-separated list of declarations mixed with at-rules
pub fn parse_list_of_declarations(css: &str) -> Vec<DeclarationListItem> {
    with_parser(css, call_parse_list_of_declarations)
}

/// Parses exactly one component value; whitespace may surround it
pub fn parse_component_value(css: &str) -> SyntaxResult<ComponentValue> {
    with_parser(css, call_parse_component_value)
}

/// Parses component values until the input runs out
pub fn parse_list_of_component_values(css: &str) -> Vec<ComponentValue> {
    with_parser(css, call_parse_list_of_component_values)
}

/// Parses component values split into groups on top-level commas
pub fn parse_comma_separated_list_of_component_values(css: &str) -> Vec<Vec<ComponentValue>> {
    with_parser(css, call_parse_comma_separated_list_of_component_values)
}

/// Parses the `An+B` notation used by selector pseudo-classes
pub fn parse_an_plus_b(css: &str) -> SyntaxResult<AnPlusB> {
    with_parser(css, call_parse_anplusb)
}
