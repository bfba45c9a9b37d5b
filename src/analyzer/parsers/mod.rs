pub mod common;
pub use common::*;

mod program;
mod statement;

pub use program::parse_program;
pub use statement::{join_condition, parse_block, parse_statement};
