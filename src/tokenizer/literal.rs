use nom::{
    bytes::complete::{take_while, take_while_m_n},
    character::complete::{char, digit1},
    combinator::{map, opt, recognize},
    error::context,
    sequence::{pair, preceded, terminated},
};

use super::{
    keyword::Keyword,
    token::{ParserResult, Token, TokenKind},
};

/// `"..."` with no escape processing. A missing closing quote reads to the
/// end of input.
pub fn parse_string_literal(input: &str) -> ParserResult<Token> {
    context(
        "string literal",
        map(
            preceded(
                char('"'),
                terminated(take_while(|c| c != '"'), opt(char('"'))),
            ),
            |content: &str| Token::new(TokenKind::Str, content),
        ),
    )(input)
}

/// A run of ASCII digits. `42.0` is three tokens: `42`, `.`, `0`.
pub fn parse_number_literal(input: &str) -> ParserResult<Token> {
    context(
        "number literal",
        map(digit1, |digits: &str| Token::new(TokenKind::Number, digits)),
    )(input)
}

/// `[A-Za-z][A-Za-z0-9_]*`, reclassified as a keyword when the whole word is
/// in the keyword table.
pub fn parse_word(input: &str) -> ParserResult<Token> {
    let (input, word) = context(
        "identifier",
        recognize(pair(
            take_while_m_n(1, 1, |c: char| c.is_ascii_alphabetic()),
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        )),
    )(input)?;

    let kind = match Keyword::lookup(word) {
        Some(kw) => TokenKind::Keyword(kw),
        None => TokenKind::Ident,
    };
    Ok((input, Token::new(kind, word)))
}
