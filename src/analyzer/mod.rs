//! Token-level recursive-descent parsing.
//!
//! Parsers are small values implementing [`Parser`] over a `&[Token]` slice and
//! are assembled from the combinators in [`prelude`].

pub mod combinators;
pub mod core;
pub mod parsers;
pub mod prelude;

pub use core::ParseError;
pub use core::ParseResult;
pub use core::Parser;
pub use parsers::parse_program;

pub use crate::ast;
