use super::{
    super::{core::*, prelude::*},
    common::*,
};
use crate::ast::{AgentDef, AssignValue, Statement};
use crate::tokenizer::{Keyword, Symbol, Token, TokenKind};

/// One statement, dispatched on its leading token.
pub fn parse_statement() -> impl Parser<Token, Statement> {
    with_context(
        lazy(|| {
            choice(vec![
                Box::new(parse_agent()),
                Box::new(parse_reflect_access()),
                Box::new(parse_mem()),
                Box::new(parse_on_input()),
                Box::new(parse_reflect()),
                Box::new(parse_train()),
                Box::new(parse_evolve()),
                Box::new(parse_goal()),
                Box::new(parse_embed()),
                Box::new(parse_link()),
                Box::new(parse_if()),
                Box::new(parse_enter()),
                Box::new(parse_print()),
                Box::new(parse_assign()),
            ])
        }),
        "statement",
    )
}

/// `{ ... }`. Tokens that do not start a statement are skipped, and a missing
/// closing brace is tolerated at end of input.
pub fn parse_block() -> impl Parser<Token, Vec<Statement>> {
    with_context(
        map(
            tuple3(
                parse_open_brace(),
                many(parse_block_item()),
                optional(parse_close_brace()),
            ),
            |(_, items, _)| items.into_iter().flatten().collect::<Vec<_>>(),
        ),
        "block",
    )
}

fn parse_block_item() -> impl Parser<Token, Option<Statement>> {
    choice(vec![
        Box::new(map(lazy(parse_statement), Some)),
        Box::new(map(parse_non_brace(), |token: Token| {
            tracing::debug!("skipping {} inside block", token);
            None::<Statement>
        })),
    ])
}

fn parse_agent() -> impl Parser<Token, Statement> {
    with_context(
        map(
            tuple3(parse_keyword(Keyword::Agent), parse_identifier(), parse_block()),
            |(_, name, body)| Statement::Agent(AgentDef::new(name, body)),
        ),
        "agent",
    )
}

fn parse_mem() -> impl Parser<Token, Statement> {
    with_context(
        map(
            preceded(parse_keyword(Keyword::Mem), parse_identifier()),
            |target| Statement::Mem { target },
        ),
        "mem",
    )
}

/// `mem.<target>["<key>"]`
fn parse_reflect_access() -> impl Parser<Token, Statement> {
    with_context(
        map(
            tuple2(
                preceded(
                    parse_keyword(Keyword::Mem),
                    preceded(parse_symbol(Symbol::Dot), parse_identifier()),
                ),
                delimited(
                    parse_symbol(Symbol::LBracket),
                    parse_string(),
                    parse_symbol(Symbol::RBracket),
                ),
            ),
            |(mem_target, key)| Statement::ReflectAccess { mem_target, key },
        ),
        "reflect access",
    )
}

fn parse_on_input() -> impl Parser<Token, Statement> {
    with_context(
        map(
            tuple3(
                tuple2(parse_keyword(Keyword::On), parse_keyword(Keyword::Input)),
                delimited(
                    parse_symbol(Symbol::LParen),
                    parse_identifier(),
                    parse_symbol(Symbol::RParen),
                ),
                parse_block(),
            ),
            |(_, param, body)| Statement::OnInput { param, body },
        ),
        "on input",
    )
}

/// `reflect { ... }`, or the single-line `reflect mem.<target>["<key>"]`.
fn parse_reflect() -> impl Parser<Token, Statement> {
    with_context(
        preceded(
            parse_keyword(Keyword::Reflect),
            choice(vec![
                Box::new(map(parse_block(), |body| Statement::Reflect { body })),
                Box::new(parse_reflect_access()),
            ]),
        ),
        "reflect",
    )
}

fn parse_train() -> impl Parser<Token, Statement> {
    with_context(
        map(
            preceded(parse_keyword(Keyword::Train), parse_block()),
            |body| Statement::Train { body },
        ),
        "train",
    )
}

fn parse_evolve() -> impl Parser<Token, Statement> {
    with_context(
        map(
            preceded(parse_keyword(Keyword::Evolve), parse_block()),
            |body| Statement::Evolve { body },
        ),
        "evolve",
    )
}

/// `goal: "<text>"`; the colon may be omitted.
fn parse_goal() -> impl Parser<Token, Statement> {
    with_context(
        map(
            tuple3(
                parse_keyword(Keyword::Goal),
                optional(parse_symbol(Symbol::Colon)),
                parse_string(),
            ),
            |(_, _, value)| Statement::Goal { value },
        ),
        "goal",
    )
}

/// `embed <ident> -> <target>`. The target is joined loosely from one token
/// and an optional `.`-separated second token, e.g. `mem.short`.
fn parse_embed() -> impl Parser<Token, Statement> {
    with_context(
        map(
            tuple3(
                preceded(parse_keyword(Keyword::Embed), parse_identifier()),
                preceded(parse_symbol(Symbol::Arrow), parse_target_part()),
                optional(preceded(parse_symbol(Symbol::Dot), parse_target_part())),
            ),
            |(source, head, tail)| {
                let target = match tail {
                    Some(tail) => format!("{}.{}", head, tail),
                    None => head,
                };
                Statement::Embed { source, target }
            },
        ),
        "embed",
    )
}

fn parse_target_part() -> impl Parser<Token, String> {
    map(parse_non_brace(), |token: Token| token.literal)
}

fn parse_link() -> impl Parser<Token, Statement> {
    with_context(
        map(
            tuple3(
                preceded(parse_keyword(Keyword::Link), parse_identifier()),
                parse_symbol(Symbol::LinkArrow),
                parse_identifier(),
            ),
            |(from, _, to)| Statement::Link { from, to },
        ),
        "link",
    )
}

/// `if <tokens...> { ... }`. The condition is kept as re-joined token text.
fn parse_if() -> impl Parser<Token, Statement> {
    with_context(
        map(
            preceded(
                parse_keyword(Keyword::If),
                tuple2(many(parse_non_brace()), parse_block()),
            ),
            |(tokens, body)| Statement::If {
                condition: join_condition(&tokens),
                body,
            },
        ),
        "if",
    )
}

/// Re-joins condition tokens: string literals are re-quoted and a single space
/// goes only between two word tokens, so `loss>0.1` stays tight while
/// `context includes "joy"` keeps its spacing.
pub fn join_condition(tokens: &[Token]) -> String {
    let mut condition = String::new();
    let mut previous: Option<TokenKind> = None;
    for token in tokens {
        if previous.is_some_and(|p| p.is_word()) && token.kind.is_word() {
            condition.push(' ');
        }
        if token.kind == TokenKind::Str {
            condition.push('"');
            condition.push_str(&token.literal);
            condition.push('"');
        } else {
            condition.push_str(&token.literal);
        }
        previous = Some(token.kind);
    }
    condition
}

fn parse_enter() -> impl Parser<Token, Statement> {
    with_context(
        map(
            preceded(parse_keyword(Keyword::Enter), parse_identifier()),
            |target| Statement::Enter { target },
        ),
        "enter",
    )
}

fn parse_print() -> impl Parser<Token, Statement> {
    with_context(
        map(
            preceded(parse_keyword(Keyword::Print), parse_string()),
            |value| Statement::Print { value },
        ),
        "print",
    )
}

/// `<name> = <value>`, where the value is one string, number or bare word.
fn parse_assign() -> impl Parser<Token, Statement> {
    with_context(
        map(
            tuple3(
                parse_identifier(),
                parse_symbol(Symbol::Assign),
                parse_assign_value(),
            ),
            |(name, _, value)| Statement::Assign { name, value },
        ),
        "assign",
    )
}

fn parse_assign_value() -> impl Parser<Token, AssignValue> {
    satisfy(|token: &Token| match token.kind {
        TokenKind::Keyword(Keyword::Input) => Some(AssignValue::Input),
        TokenKind::Ident | TokenKind::Str | TokenKind::Number => {
            Some(AssignValue::Literal(token.literal.clone()))
        }
        _ => None,
    })
}
