//! # Tokenizer
//!
//! Turns Sentience source text into a finite stream of [`Token`]s. Each token
//! class has its own `nom` parser ([`literal`], [`symbol`], [`whitespace`]);
//! [`Lexer::next_token`] tries them in turn at the cursor.

pub mod keyword;
pub mod literal;
pub mod symbol;
pub mod token;
pub mod whitespace;

pub use keyword::Keyword;
pub use symbol::Symbol;
pub use token::{tokenize, Lexer, Token, TokenKind};
