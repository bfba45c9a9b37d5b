use std::fmt;

use nom::{branch::alt, combinator::map, error::VerboseError, IResult};

use super::{
    keyword::Keyword,
    literal::{parse_number_literal, parse_string_literal, parse_word},
    symbol::{parse_symbol, Symbol},
    whitespace::skip_whitespace,
};

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Ident,
    Number,
    Str,
    Keyword(Keyword),
    Symbol(Symbol),
    Illegal,
}

impl TokenKind {
    /// Identifiers, keywords, numbers and strings. Used when re-joining raw
    /// condition text: two adjacent word tokens get a space between them.
    pub fn is_word(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident | TokenKind::Number | TokenKind::Str | TokenKind::Keyword(_)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Ident => write!(f, "IDENT"),
            TokenKind::Number => write!(f, "NUMBER"),
            TokenKind::Str => write!(f, "STRING"),
            TokenKind::Keyword(kw) => write!(f, "{}", kw.as_ref().to_uppercase()),
            TokenKind::Symbol(sym) => write!(f, "{}", sym),
            TokenKind::Illegal => write!(f, "ILLEGAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "")
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.literal)
    }
}

/// Pull-based lexer over a source string.
///
/// Never fails: anything it does not recognize becomes a [`TokenKind::Illegal`]
/// token carrying the offending character, and once input is exhausted every
/// call returns an end-of-input token.
///
/// ```
/// # use sentience::tokenizer::{Lexer, TokenKind};
/// let mut lexer = Lexer::new("mem short");
/// assert_eq!(lexer.next_token().literal, "mem");
/// assert_eq!(lexer.next_token().kind, TokenKind::Ident);
/// assert!(lexer.next_token().is_eof());
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    pub fn next_token(&mut self) -> Token {
        let remaining = self.skip_insignificant();
        if remaining.is_empty() {
            return Token::eof();
        }

        let result = alt((
            parse_string_literal,
            parse_number_literal,
            parse_word,
            map(parse_symbol, |sym: Symbol| Token::new(TokenKind::Symbol(sym), sym.as_ref())),
        ))(remaining);

        match result {
            Ok((rest, token)) => {
                self.position = self.input.len() - rest.len();
                token
            }
            Err(_) => {
                // remaining is non-empty, so there is at least one char
                let c = remaining.chars().next().unwrap_or_default();
                self.position += c.len_utf8();
                tracing::debug!(position = self.position, "illegal character {:?}", c);
                Token::new(TokenKind::Illegal, c.to_string())
            }
        }
    }

    fn skip_insignificant(&mut self) -> &'a str {
        let input = &self.input[self.position..];
        match skip_whitespace(input) {
            Ok((rest, _)) => {
                self.position = self.input.len() - rest.len();
                rest
            }
            Err(_) => input,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, end of input.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is_eof()).then_some(token)
    }
}

/// Lexes the whole input. The trailing end-of-input token is not included.
#[tracing::instrument(level = "debug", skip(input))]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kw(k: Keyword, lit: &str) -> Token {
        Token::new(TokenKind::Keyword(k), lit)
    }

    fn sym(s: Symbol) -> Token {
        Token::new(TokenKind::Symbol(s), s.as_ref())
    }

    fn ident(lit: &str) -> Token {
        Token::new(TokenKind::Ident, lit)
    }

    #[test]
    fn test_next_token_agent_block() {
        let input = r#"agent Mind {
  mem short
  on input(data) {
    embed data -> mem.short
  }
}"#;

        let expected = vec![
            kw(Keyword::Agent, "agent"),
            ident("Mind"),
            sym(Symbol::LBrace),
            kw(Keyword::Mem, "mem"),
            ident("short"),
            kw(Keyword::On, "on"),
            kw(Keyword::Input, "input"),
            sym(Symbol::LParen),
            ident("data"),
            sym(Symbol::RParen),
            sym(Symbol::LBrace),
            kw(Keyword::Embed, "embed"),
            ident("data"),
            sym(Symbol::Arrow),
            kw(Keyword::Mem, "mem"),
            sym(Symbol::Dot),
            ident("short"),
            sym(Symbol::RBrace),
            sym(Symbol::RBrace),
            Token::eof(),
        ];

        let mut lexer = Lexer::new(input);
        for (i, expected) in expected.into_iter().enumerate() {
            let token = lexer.next_token();
            assert_eq!(token, expected, "token #{}", i);
        }
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("  \n\t ");
        assert!(lexer.next_token().is_eof());
        assert!(lexer.next_token().is_eof());
    }

    #[test]
    fn test_link_arrow_and_illegal_prefixes() {
        let tokens = tokenize("a <-> b");
        assert_eq!(tokens, vec![ident("a"), sym(Symbol::LinkArrow), ident("b")]);

        let tokens = tokenize("a <- b");
        assert_eq!(
            tokens,
            vec![
                ident("a"),
                Token::new(TokenKind::Illegal, "<"),
                Token::new(TokenKind::Illegal, "-"),
                ident("b"),
            ]
        );

        let tokens = tokenize("<>");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Illegal, "<"),
                Token::new(TokenKind::Illegal, ">"),
            ]
        );
    }

    #[test]
    fn test_condition_tokens() {
        let tokens = tokenize("loss > 0.1");
        assert_eq!(
            tokens,
            vec![
                ident("loss"),
                Token::new(TokenKind::Illegal, ">"),
                Token::new(TokenKind::Number, "0"),
                sym(Symbol::Dot),
                Token::new(TokenKind::Number, "1"),
            ]
        );
    }

    #[test]
    fn test_reflect_access_tokens() {
        let tokens = tokenize(r#"mem.short["msg"]"#);
        assert_eq!(
            tokens,
            vec![
                kw(Keyword::Mem, "mem"),
                sym(Symbol::Dot),
                ident("short"),
                sym(Symbol::LBracket),
                Token::new(TokenKind::Str, "msg"),
                sym(Symbol::RBracket),
            ]
        );
    }

    #[test]
    fn test_non_ascii_is_illegal_and_advances() {
        let tokens = tokenize("é x");
        assert_eq!(tokens, vec![Token::new(TokenKind::Illegal, "é"), ident("x")]);
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let tokens = tokenize("Agent agent AGENT");
        assert_eq!(
            tokens,
            vec![ident("Agent"), kw(Keyword::Agent, "agent"), ident("AGENT")]
        );
    }
}
