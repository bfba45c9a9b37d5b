use thiserror::Error;

// Token-level parser: consumes `input` from `pos`, returns the new position.
pub trait Parser<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O>;
}

impl<I, O, P> Parser<I, O> for Box<P>
where
    P: Parser<I, O> + ?Sized,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        (**self).parse(input, pos)
    }
}

pub type ParseResult<O> = Result<(usize, O), ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token {found} at {position}")]
    Unexpected { found: String, position: usize },
    #[error("Unexpected EOF")]
    UnexpectedEOF,
    #[error("No alternative")]
    NoAlternative,
    #[error("Block at {position} nests deeper than {limit}")]
    NestingTooDeep { limit: usize, position: usize },
    #[error("WithContext: {message}, {inner}")]
    WithContext {
        message: String,
        inner: Box<ParseError>,
    },
}

impl ParseError {
    /// Innermost error, skipping context wrappers.
    pub fn root_cause(&self) -> &ParseError {
        match self {
            ParseError::WithContext { inner, .. } => inner.root_cause(),
            other => other,
        }
    }
}
