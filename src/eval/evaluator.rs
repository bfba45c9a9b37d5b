use super::{
    condition::{condition_evaluator, LossCondition},
    context::MemoryContext,
    output::OutputSink,
    statement::StatementEvaluator,
};
use crate::{ast::Program, ast::Statement, config::InterpreterConfig};

pub const DEFAULT_INDENT_WIDTH: usize = 2;

pub struct Evaluator {
    statement_evaluator: StatementEvaluator,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            statement_evaluator: StatementEvaluator::new(
                Box::new(LossCondition),
                DEFAULT_INDENT_WIDTH,
            ),
        }
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &InterpreterConfig) -> Self {
        Self {
            statement_evaluator: StatementEvaluator::new(
                condition_evaluator(config.condition_mode),
                config.indent_width,
            ),
        }
    }

    /// Top level entry point: evaluates every statement in order at indent 0.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
    pub fn eval_program(
        &self,
        program: &Program,
        ctx: &mut MemoryContext,
        out: &mut dyn OutputSink,
    ) {
        self.eval_block(&program.statements, 0, ctx, out);
    }

    pub fn eval(
        &self,
        statement: &Statement,
        indent: usize,
        ctx: &mut MemoryContext,
        out: &mut dyn OutputSink,
    ) {
        self.statement_evaluator
            .eval_statement(statement, indent, ctx, out);
    }

    pub fn eval_block(
        &self,
        statements: &[Statement],
        indent: usize,
        ctx: &mut MemoryContext,
        out: &mut dyn OutputSink,
    ) {
        self.statement_evaluator
            .eval_block(statements, indent, ctx, out);
    }
}
