//! Syntax tree produced by the parser.
//!
//! A component value is either a preserved token, a function, or a simple
//! block; rules, declarations and stylesheets are built from sequences of
//! component values. All structures are immutable once returned.

use core::fmt::{Display, Formatter};

use crate::stream::Location;
use crate::tokenizer::Token;

/// Which bracket pair opened a simple block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    CurlyBracket,
    SquareBracket,
    Paren,
}

impl BlockKind {
    pub fn open_char(&self) -> char {
        match self {
            BlockKind::CurlyBracket => '{',
            BlockKind::SquareBracket => '[',
            BlockKind::Paren => '(',
        }
    }

    pub fn close_char(&self) -> char {
        match self {
            BlockKind::CurlyBracket => '}',
            BlockKind::SquareBracket => ']',
            BlockKind::Paren => ')',
        }
    }
}

/// A balanced `{…}`, `[…]` or `(…)` pair with component values inside
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleBlock {
    pub kind: BlockKind,
    pub values: Vec<ComponentValue>,
    pub location: Location,
}

impl SimpleBlock {
    pub(crate) fn new(kind: BlockKind, values: Vec<ComponentValue>, location: Location) -> Self {
        Self {
            kind,
            values,
            location,
        }
    }

    #[must_use]
    pub fn is_curly(&self) -> bool {
        self.kind == BlockKind::CurlyBracket
    }
}

/// A function component value; the matching `)` has been consumed
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub name: String,
    pub values: Vec<ComponentValue>,
    pub location: Location,
}

impl Function {
    pub(crate) fn new(name: String, values: Vec<ComponentValue>, location: Location) -> Self {
        Self {
            name,
            values,
            location,
        }
    }
}

/// The unit of nested syntax
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentValue {
    /// A token that survives as-is from the tokenizer
    Preserved(Token),
    Function(Function),
    Block(SimpleBlock),
}

impl ComponentValue {
    pub fn location(&self) -> Location {
        match self {
            ComponentValue::Preserved(t) => t.location,
            ComponentValue::Function(f) => f.location,
            ComponentValue::Block(b) => b.location,
        }
    }

    #[must_use]
    pub fn is_preserved(&self) -> bool {
        matches!(self, ComponentValue::Preserved(_))
    }

    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        matches!(self, ComponentValue::Preserved(t) if t.is_whitespace())
    }

    #[must_use]
    pub fn is_delim(&self, delim: char) -> bool {
        matches!(self, ComponentValue::Preserved(t) if t.is_delim(delim))
    }

    #[must_use]
    pub fn is_ident(&self) -> bool {
        matches!(self, ComponentValue::Preserved(t) if t.is_ident())
    }

    #[must_use]
    pub fn as_token(&self) -> &Token {
        match self {
            ComponentValue::Preserved(t) => t,
            _ => panic!("component value is not a preserved token"),
        }
    }

    #[must_use]
    pub fn as_function(&self) -> &Function {
        match self {
            ComponentValue::Function(f) => f,
            _ => panic!("component value is not a function"),
        }
    }

    #[must_use]
    pub fn as_block(&self) -> &SimpleBlock {
        match self {
            ComponentValue::Block(b) => b,
            _ => panic!("component value is not a block"),
        }
    }
}

/// A property declaration inside a declaration list or style block.
/// The value has trailing whitespace and any `!important` marker stripped.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: Vec<ComponentValue>,
    pub important: bool,
    pub location: Location,
}

/// Entry of a declaration list: at-rules are legal between declarations
/// (`@media` inside `@page`, for instance), so the list is mixed.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclarationListItem {
    Declaration(Declaration),
    AtRule(AtRule),
}

impl DeclarationListItem {
    #[must_use]
    pub fn is_declaration(&self) -> bool {
        matches!(self, DeclarationListItem::Declaration(_))
    }

    #[must_use]
    pub fn as_declaration(&self) -> &Declaration {
        match self {
            DeclarationListItem::Declaration(d) => d,
            DeclarationListItem::AtRule(_) => panic!("item is not a declaration"),
        }
    }

    #[must_use]
    pub fn as_at_rule(&self) -> &AtRule {
        match self {
            DeclarationListItem::AtRule(r) => r,
            DeclarationListItem::Declaration(_) => panic!("item is not an at-rule"),
        }
    }
}

/// An at-rule, terminated by either a `;` or a `{…}` block
#[derive(Clone, Debug, PartialEq)]
pub struct AtRule {
    pub name: String,
    pub prelude: Vec<ComponentValue>,
    pub block: Option<SimpleBlock>,
    pub location: Location,
}

/// A rule whose prelude precedes a `{…}` block
#[derive(Clone, Debug, PartialEq)]
pub struct QualifiedRule {
    pub prelude: Vec<ComponentValue>,
    pub block: SimpleBlock,
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    At(AtRule),
    Qualified(QualifiedRule),
}

impl Rule {
    pub fn location(&self) -> Location {
        match self {
            Rule::At(r) => r.location,
            Rule::Qualified(r) => r.location,
        }
    }

    #[must_use]
    pub fn is_at_rule(&self) -> bool {
        matches!(self, Rule::At(_))
    }

    #[must_use]
    pub fn is_qualified_rule(&self) -> bool {
        matches!(self, Rule::Qualified(_))
    }

    #[must_use]
    pub fn as_at_rule(&self) -> &AtRule {
        match self {
            Rule::At(r) => r,
            Rule::Qualified(_) => panic!("rule is not an at-rule"),
        }
    }

    #[must_use]
    pub fn as_qualified_rule(&self) -> &QualifiedRule {
        match self {
            Rule::Qualified(r) => r,
            Rule::At(_) => panic!("rule is not a qualified rule"),
        }
    }
}

/// A parsed stylesheet: a list of rules. A leading `@charset` rule has
/// already been removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
    pub location: Location,
}

/// The `An+B` notation used by selector pseudo-classes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnPlusB {
    pub a: i32,
    pub b: i32,
}

fn write_values(f: &mut Formatter<'_>, values: &[ComponentValue]) -> std::fmt::Result {
    for value in values {
        write!(f, "{value}")?;
    }
    Ok(())
}

impl Display for ComponentValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentValue::Preserved(t) => write!(f, "{t}"),
            ComponentValue::Function(func) => write!(f, "{func}"),
            ComponentValue::Block(block) => write!(f, "{block}"),
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        write_values(f, &self.values)?;
        write!(f, ")")
    }
}

impl Display for SimpleBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.open_char())?;
        write_values(f, &self.values)?;
        write!(f, "{}", self.kind.close_char())
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.property)?;
        write_values(f, &self.value)?;
        if self.important {
            write!(f, " !important")?;
        }
        Ok(())
    }
}

impl Display for AtRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.name)?;
        write_values(f, &self.prelude)?;
        match &self.block {
            Some(block) => write!(f, "{block}"),
            None => write!(f, ";"),
        }
    }
}

impl Display for QualifiedRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_values(f, &self.prelude)?;
        write!(f, "{}", self.block)
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::At(r) => write!(f, "{r}"),
            Rule::Qualified(r) => write!(f, "{r}"),
        }
    }
}

impl Display for Stylesheet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for rule in &self.rules {
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

impl Display for AnPlusB {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}n{:+}", self.a, self.b)
    }
}
