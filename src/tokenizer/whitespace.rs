//! Whitespace between tokens. Spaces, tabs, `\n` and `\r` are insignificant
//! in Sentience source and are skipped without producing a token.

use nom::{bytes::complete::take_while, error::context};

use super::token::ParserResult;

pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Consumes any (possibly empty) run of whitespace.
pub fn skip_whitespace(input: &str) -> ParserResult<&str> {
    context("whitespace", take_while(is_whitespace))(input)
}
