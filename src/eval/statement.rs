use super::{condition::ConditionEvaluator, context::MemoryContext, output::OutputSink};
use crate::ast::{AgentDef, AssignValue, Statement};

/// Narrates and applies single statements.
///
/// Every node either does its job or emits a diagnostic line; there is no
/// failure path.
pub struct StatementEvaluator {
    condition_evaluator: Box<dyn ConditionEvaluator>,
    indent_width: usize,
}

impl StatementEvaluator {
    pub fn new(condition_evaluator: Box<dyn ConditionEvaluator>, indent_width: usize) -> Self {
        Self {
            condition_evaluator,
            indent_width,
        }
    }

    pub fn eval_statement(
        &self,
        statement: &Statement,
        indent: usize,
        ctx: &mut MemoryContext,
        out: &mut dyn OutputSink,
    ) {
        tracing::trace!(kind = %statement.kind(), indent, "eval");
        match statement {
            Statement::Agent(agent) => self.eval_agent(agent, indent, ctx, out),
            Statement::Mem { target } => {
                self.emit(out, indent, format_args!("Init mem: {}", target));
                ctx.set_mem(target, "__init__", "1");
            }
            Statement::OnInput { param, body } => {
                self.emit(out, indent, format_args!("On Input: ({})", param));
                self.eval_block(body, indent + 1, ctx, out);
            }
            Statement::Reflect { body } => {
                self.emit(out, indent, format_args!("Reflect block:"));
                self.eval_block(body, indent + 1, ctx, out);
            }
            Statement::Train { body } => {
                self.emit(out, indent, format_args!("Train block:"));
                self.eval_block(body, indent + 1, ctx, out);
            }
            Statement::Evolve { body } => {
                self.emit(out, indent, format_args!("Evolve block:"));
                self.eval_block(body, indent + 1, ctx, out);
            }
            Statement::Goal { value } => {
                self.emit(out, indent, format_args!("Goal: \"{}\"", value));
            }
            Statement::Embed { source, target } => {
                self.eval_embed(source, target, indent, ctx, out)
            }
            Statement::Link { from, to } => {
                self.emit(out, indent, format_args!("Link: {} <-> {}", from, to));
                ctx.link(from.as_str(), to.as_str());
            }
            Statement::If { condition, body } => {
                self.eval_if(condition, body, indent, ctx, out)
            }
            Statement::Enter { target } => {
                self.emit(out, indent, format_args!("Enter: {}", target));
            }
            Statement::ReflectAccess { mem_target, key } => {
                let value = ctx.get_mem(mem_target, key);
                self.emit(
                    out,
                    indent,
                    format_args!("mem.{}[\"{}\"] = \"{}\"", mem_target, key, value),
                );
                ctx.set_output(value);
            }
            Statement::Print { value } => self.emit(out, indent, format_args!("{}", value)),
            Statement::Assign { name, value } => self.eval_assign(name, value, indent, ctx, out),
        }
    }

    pub fn eval_block(
        &self,
        statements: &[Statement],
        indent: usize,
        ctx: &mut MemoryContext,
        out: &mut dyn OutputSink,
    ) {
        for statement in statements {
            self.eval_statement(statement, indent, ctx, out);
        }
    }

    /// The agent is registered only after its body has run.
    fn eval_agent(
        &self,
        agent: &AgentDef,
        indent: usize,
        ctx: &mut MemoryContext,
        out: &mut dyn OutputSink,
    ) {
        self.emit(out, indent, format_args!("Agent: {}", agent.name));
        self.eval_block(&agent.body, indent + 1, ctx, out);
        ctx.register_agent(agent.clone());
        self.emit(out, indent, format_args!("Agent: {} [registered]", agent.name));
    }

    fn eval_embed(
        &self,
        source: &str,
        target: &str,
        indent: usize,
        ctx: &mut MemoryContext,
        out: &mut dyn OutputSink,
    ) {
        self.emit(out, indent, format_args!("Embed: {} -> {}", source, target));

        let Some(value) = ctx.lookup("short", source).map(str::to_string) else {
            self.emit(out, indent, format_args!("Embed skipped: {} is not bound", source));
            return;
        };
        let store = match target {
            "mem.long" => "long",
            _ => "short",
        };
        ctx.set_mem(store, source, value.as_str());
        ctx.embed_latent(source, &value);
    }

    fn eval_assign(
        &self,
        name: &str,
        value: &AssignValue,
        indent: usize,
        ctx: &mut MemoryContext,
        out: &mut dyn OutputSink,
    ) {
        let value = match value {
            AssignValue::Literal(value) => value.clone(),
            AssignValue::Input => ctx.input().to_string(),
        };
        if name == "output" {
            self.emit(out, indent, format_args!("Output: \"{}\"", value));
            ctx.set_output(value);
        } else {
            self.emit(out, indent, format_args!("Set: {} = \"{}\"", name, value));
            ctx.set_mem("short", name, value);
        }
    }

    fn eval_if(
        &self,
        condition: &str,
        body: &[Statement],
        indent: usize,
        ctx: &mut MemoryContext,
        out: &mut dyn OutputSink,
    ) {
        self.emit(out, indent, format_args!("If: {}", condition));
        match self.condition_evaluator.holds(condition, ctx) {
            Some(true) => self.eval_block(body, indent + 1, ctx, out),
            Some(false) => {
                self.emit(out, indent, format_args!("Condition false: {}", condition));
            }
            None => {
                tracing::debug!("unsupported condition {:?}", condition);
                self.emit(out, indent, format_args!("Condition not supported: {}", condition));
            }
        }
    }

    fn emit(&self, out: &mut dyn OutputSink, indent: usize, line: std::fmt::Arguments<'_>) {
        let pad = indent * self.indent_width;
        out.emit(&format!("{:pad$}{}", "", line, pad = pad));
    }
}
