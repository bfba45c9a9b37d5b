use super::{super::core::*, statement::parse_statement};
use crate::ast::Program;
use crate::tokenizer::Token;

/// Parses a whole token stream into a [`Program`].
///
/// Never fails. When no statement starts at the current token, that single
/// token is dropped and parsing resumes at the next one.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse_program(tokens: &[Token]) -> Program {
    let parser = parse_statement();
    let mut statements = Vec::new();
    let mut pos = 0;

    while pos < tokens.len() {
        match parser.parse(tokens, pos) {
            Ok((next, statement)) => {
                tracing::trace!(position = pos, "parsed {}", statement.keyword());
                statements.push(statement);
                pos = next;
            }
            Err(err) => {
                tracing::debug!(position = pos, "dropping {}: {}", tokens[pos], err.root_cause());
                pos += 1;
            }
        }
    }

    Program::new(statements)
}
