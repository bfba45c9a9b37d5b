//! Interactive session: accumulates source lines until braces balance,
//! evaluates each complete chunk against one long-lived [`MemoryContext`] and
//! handles the dot commands of the REPL.

use std::{fs, path::Path};

use strum_macros::{AsRefStr, Display};

use crate::{
    ast::{AgentDef, Statement},
    config::InterpreterConfig,
    eval::{Evaluator, MemoryContext, OutputSink},
    parse, InternalResult,
};

/// Short-term key bound by `.train`, `.evolve` and batch `--input`.
pub const DEFAULT_INPUT_KEY: &str = "msg";

/// What [`Session::feed_line`] did with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line.
    Ignored,
    /// Buffered; a block is still open.
    Pending,
    /// The buffered chunk was parsed and evaluated.
    Evaluated,
    /// A dot command ran.
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
enum ReplayBlock {
    Train,
    Evolve,
}

pub struct Session {
    ctx: MemoryContext,
    evaluator: Evaluator,
    snapshot_path: String,
    buffer: Vec<String>,
    depth: i64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&InterpreterConfig::default())
    }
}

impl Session {
    pub fn new(config: &InterpreterConfig) -> Self {
        Self {
            ctx: MemoryContext::from_config(config),
            evaluator: Evaluator::from_config(config),
            snapshot_path: config.snapshot_path.clone(),
            buffer: Vec::new(),
            depth: 0,
        }
    }

    pub fn context(&self) -> &MemoryContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut MemoryContext {
        &mut self.ctx
    }

    /// True while a block opened on an earlier line is still unclosed.
    pub fn is_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    pub fn prompt(&self) -> &'static str {
        if self.is_pending() {
            "... "
        } else {
            ">>> "
        }
    }

    pub fn feed_line(&mut self, line: &str, out: &mut dyn OutputSink) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Ignored;
        }
        if !self.is_pending() && line.starts_with('.') {
            self.run_command(line, out);
            return LineOutcome::Command;
        }

        self.depth += line.matches('{').count() as i64;
        self.depth -= line.matches('}').count() as i64;
        self.buffer.push(line.to_string());

        if self.depth > 0 {
            return LineOutcome::Pending;
        }

        let source = self.buffer.join(" ");
        self.buffer.clear();
        self.depth = 0;
        self.run_source(&source, out);
        LineOutcome::Evaluated
    }

    /// Parses and evaluates a complete chunk of source at indent 0.
    pub fn run_source(&mut self, source: &str, out: &mut dyn OutputSink) {
        let program = parse(source);
        self.evaluator.eval_program(&program, &mut self.ctx, out);
    }

    /// Runs one dot command, e.g. `.input hello` or `.save state.json`.
    pub fn run_command(&mut self, line: &str, out: &mut dyn OutputSink) {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        tracing::debug!(command = name, "running command");

        match name {
            ".input" => self.replay_input(arg, out),
            ".train" => self.replay_blocks(ReplayBlock::Train, arg, out),
            ".evolve" => self.replay_blocks(ReplayBlock::Evolve, arg, out),
            ".save" => {
                let path = self.path_or_default(arg);
                match self.ctx.save(&path) {
                    Ok(()) => out.emit(&format!("Saved to {}", path)),
                    Err(e) => out.emit(&format!("Error saving: {}", e)),
                }
            }
            ".load" => {
                let path = self.path_or_default(arg);
                match self.ctx.load(&path) {
                    Ok(()) => out.emit(&format!("Loaded from {}", path)),
                    Err(e) => out.emit(&format!("Error loading: {}", e)),
                }
            }
            ".similar" => {
                let keys = self.ctx.similar_to(arg);
                if keys.is_empty() {
                    out.emit("No similar memories.");
                } else {
                    out.emit(&format!("Similar: {}", keys.join(", ")));
                }
            }
            other => out.emit(&format!("Unknown command: {}", other)),
        }
    }

    /// Binds `text` to each `on input` handler's parameter in short-term
    /// memory and replays the handler body.
    pub fn replay_input(&mut self, text: &str, out: &mut dyn OutputSink) {
        let Some(agent) = self.registered_agent(out) else {
            return;
        };
        if !self.run_input_handlers(&agent, text, 1, out) {
            out.emit("Agent has no on input handler.");
        }
    }

    /// Runs the `on input` handlers against `text` and returns their output
    /// lines joined by newlines. `None` when no agent or handler is
    /// registered.
    pub fn handle_input(&mut self, text: &str) -> Option<String> {
        let agent = self.ctx.current_agent().cloned()?;
        let mut captured: Vec<String> = Vec::new();
        if !self.run_input_handlers(&agent, text, 0, &mut captured) {
            tracing::warn!("agent {} has no on input handler", agent.name);
            return None;
        }
        Some(captured.join("\n"))
    }

    fn run_input_handlers(
        &mut self,
        agent: &AgentDef,
        text: &str,
        indent: usize,
        out: &mut dyn OutputSink,
    ) -> bool {
        self.ctx.set_input(text);
        let mut found = false;
        for (param, body) in agent.input_handlers() {
            found = true;
            self.ctx.set_mem("short", param, text);
            self.evaluator.eval_block(body, indent, &mut self.ctx, out);
        }
        found
    }

    fn replay_blocks(&mut self, block: ReplayBlock, text: &str, out: &mut dyn OutputSink) {
        let Some(agent) = self.registered_agent(out) else {
            return;
        };
        let bodies: Vec<&[Statement]> = match block {
            ReplayBlock::Train => agent.train_blocks().collect(),
            ReplayBlock::Evolve => agent.evolve_blocks().collect(),
        };
        if bodies.is_empty() {
            out.emit(&format!("Agent has no {} block.", block));
            return;
        }
        self.ctx.set_input(text);
        for body in bodies {
            self.ctx.set_mem("short", DEFAULT_INPUT_KEY, text);
            self.evaluator.eval_block(body, 1, &mut self.ctx, out);
        }
    }

    /// Batch mode: evaluates a script file, then optionally binds `input` to
    /// `msg` and replays every `on input` body of the registered agent.
    pub fn run_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        input: Option<&str>,
        out: &mut dyn OutputSink,
    ) -> InternalResult<()> {
        let source = fs::read_to_string(path.as_ref())?;
        tracing::info!("running {}", path.as_ref().display());
        self.run_source(&source, out);

        let Some(input) = input else {
            return Ok(());
        };
        let Some(agent) = self.registered_agent(out) else {
            return Ok(());
        };
        self.ctx.set_input(input);
        self.ctx.set_mem("short", DEFAULT_INPUT_KEY, input);
        for (_, body) in agent.input_handlers() {
            self.evaluator.eval_block(body, 1, &mut self.ctx, out);
        }
        Ok(())
    }

    fn registered_agent(&self, out: &mut dyn OutputSink) -> Option<AgentDef> {
        let agent = self.ctx.current_agent().cloned();
        if agent.is_none() {
            out.emit("No agent registered.");
        }
        agent
    }

    fn path_or_default(&self, arg: &str) -> String {
        match arg.split_whitespace().next() {
            Some(path) => path.to_string(),
            None => self.snapshot_path.clone(),
        }
    }
}
