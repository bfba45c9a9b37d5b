use super::super::{core::*, prelude::*};
use crate::tokenizer::{Keyword, Symbol, Token, TokenKind};

pub fn parse_keyword(keyword: Keyword) -> impl Parser<Token, ()> {
    with_context(
        satisfy(move |token: &Token| (token.kind == TokenKind::Keyword(keyword)).then_some(())),
        keyword.to_string(),
    )
}

pub fn parse_symbol(symbol: Symbol) -> impl Parser<Token, ()> {
    with_context(
        satisfy(move |token: &Token| (token.kind == TokenKind::Symbol(symbol)).then_some(())),
        symbol.to_string(),
    )
}

pub fn parse_identifier() -> impl Parser<Token, String> {
    with_context(
        satisfy(|token: &Token| (token.kind == TokenKind::Ident).then(|| token.literal.clone())),
        "identifier",
    )
}

pub fn parse_string() -> impl Parser<Token, String> {
    with_context(
        satisfy(|token: &Token| (token.kind == TokenKind::Str).then(|| token.literal.clone())),
        "string",
    )
}

/// Any token that does not open or close a block.
pub fn parse_non_brace() -> impl Parser<Token, Token> {
    satisfy(|token: &Token| match token.kind {
        TokenKind::Symbol(Symbol::LBrace) | TokenKind::Symbol(Symbol::RBrace) => None,
        _ => Some(token.clone()),
    })
}

/// Deepest block nesting accepted. Deeper blocks are rejected before any
/// recursion happens, which keeps parsing and evaluation within the stack.
pub const MAX_BLOCK_DEPTH: usize = 64;

/// Opening brace of a block whose nesting stays within [`MAX_BLOCK_DEPTH`].
pub fn parse_open_brace() -> impl Parser<Token, ()> {
    preceded(NestingLimit, parse_symbol(Symbol::LBrace))
}

/// Looks ahead from `pos` to the matching close brace, or to end of input,
/// and fails without consuming anything if braces open too deep on the way.
struct NestingLimit;

impl Parser<Token, ()> for NestingLimit {
    fn parse(&self, input: &[Token], pos: usize) -> ParseResult<()> {
        let mut depth = 0usize;
        for token in input.get(pos..).unwrap_or(&[]) {
            match token.kind {
                TokenKind::Symbol(Symbol::LBrace) => {
                    depth += 1;
                    if depth > MAX_BLOCK_DEPTH {
                        tracing::debug!(
                            position = pos,
                            "block nests deeper than {}",
                            MAX_BLOCK_DEPTH
                        );
                        return Err(ParseError::NestingTooDeep {
                            limit: MAX_BLOCK_DEPTH,
                            position: pos,
                        });
                    }
                }
                TokenKind::Symbol(Symbol::RBrace) => match depth.checked_sub(1) {
                    Some(0) | None => break,
                    Some(d) => depth = d,
                },
                _ => {}
            }
        }
        Ok((pos, ()))
    }
}

pub fn parse_close_brace() -> impl Parser<Token, ()> {
    parse_symbol(Symbol::RBrace)
}
