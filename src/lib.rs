//! # Sentience: a small agent DSL interpreter
//!
//! Sentience programs declare agents with memory, input handlers and
//! training blocks. This crate lexes, parses and evaluates them against an
//! in-process memory context.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source Code → Tokenizer → Parser → Evaluator → Output Sink
//!                                        ↕
//!                                  Memory Context
//! ```
//!
//! ### Stage 1: Tokenization
//!
//! The [`tokenizer`] module turns source text into [`tokenizer::Token`]s.
//! It never fails: unrecognized characters become illegal tokens.
//!
//! ### Stage 2: Parsing
//!
//! The [`analyzer`] module builds a [`Program`] from the token stream using
//! token-level parser combinators. Malformed statements are dropped one token
//! at a time, so parsing never fails either.
//!
//! ### Stage 3: Evaluation
//!
//! The [`eval`] module walks the AST, mutates the [`MemoryContext`] and writes
//! narration lines to an [`OutputSink`]. `if` conditions are interpreted by a
//! pluggable [`ConditionEvaluator`], and latent memory uses the mocked
//! embeddings in [`latent`].
//!
//! ## Sessions
//!
//! [`session::Session`] keeps one context alive across chunks of input, the
//! way the REPL does, and implements its dot commands (`.input`, `.train`,
//! `.evolve`, `.save`, `.load`, `.similar`).
//!
//! ```
//! use sentience::{parse, Evaluator, MemoryContext};
//!
//! let program = parse(r#"agent Echo { mem short }"#);
//! let mut ctx = MemoryContext::new();
//! let mut out: Vec<String> = Vec::new();
//! Evaluator::default().eval_program(&program, &mut ctx, &mut out);
//!
//! assert_eq!(ctx.current_agent().map(|a| a.name.as_str()), Some("Echo"));
//! assert_eq!(out.last().map(String::as_str), Some("Agent: Echo [registered]"));
//! ```

pub mod analyzer;
pub mod ast;
pub mod config;
pub mod error;
pub mod eval;
pub mod latent;
pub mod session;
pub mod tokenizer;

// Re-exports
pub use ast::*;
pub use config::InterpreterConfig;
pub use error::*;
pub use eval::*;

/// Lexes and parses `source` in one step. Never fails; see
/// [`analyzer::parse_program`].
pub fn parse(source: &str) -> Program {
    let tokens = tokenizer::tokenize(source);
    analyzer::parse_program(&tokens)
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    #[ctor::ctor]
    fn init_tests() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }
}
