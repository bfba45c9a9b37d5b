//! # Symbol Token Handling
//!
//! Punctuation recognized by the Sentience lexer. Multi-character arrows are
//! matched before their single-character prefixes, so `<->` is never split.
//! A `<` or `-` that does not start a full arrow is not a symbol at all; the
//! lexer turns it into an illegal token.

use std::fmt;

use nom::{branch::alt, bytes::complete::tag, combinator::value, error::context};
use strum_macros::{AsRefStr, EnumString};

use super::token::ParserResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr)]
pub enum Symbol {
    /// `=`
    #[strum(serialize = "=")]
    Assign,
    /// `(`
    #[strum(serialize = "(")]
    LParen,
    /// `)`
    #[strum(serialize = ")")]
    RParen,
    /// `{`
    #[strum(serialize = "{")]
    LBrace,
    /// `}`
    #[strum(serialize = "}")]
    RBrace,
    /// `.`
    #[strum(serialize = ".")]
    Dot,
    /// `:`
    #[strum(serialize = ":")]
    Colon,
    /// `[`
    #[strum(serialize = "[")]
    LBracket,
    /// `]`
    #[strum(serialize = "]")]
    RBracket,
    /// Embed arrow (`->`)
    #[strum(serialize = "->")]
    Arrow,
    /// Link arrow (`<->`)
    #[strum(serialize = "<->")]
    LinkArrow,
}

// Written by hand: strum's `Display` derive reads `{` and `}` as format syntax.
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Parses one symbol from the head of `input`.
///
/// ```
/// # use sentience::tokenizer::symbol::{parse_symbol, Symbol};
/// let (rest, symbol) = parse_symbol("<-> b").unwrap();
/// assert_eq!(symbol, Symbol::LinkArrow);
/// assert_eq!(rest, " b");
/// ```
pub fn parse_symbol(input: &str) -> ParserResult<Symbol> {
    context(
        "symbol",
        alt((
            value(Symbol::LinkArrow, tag("<->")),
            value(Symbol::Arrow, tag("->")),
            value(Symbol::Assign, tag("=")),
            value(Symbol::LParen, tag("(")),
            value(Symbol::RParen, tag(")")),
            value(Symbol::LBrace, tag("{")),
            value(Symbol::RBrace, tag("}")),
            value(Symbol::Dot, tag(".")),
            value(Symbol::Colon, tag(":")),
            value(Symbol::LBracket, tag("[")),
            value(Symbol::RBracket, tag("]")),
        )),
    )(input)
}
