use core::fmt;

use strum_macros::{AsRefStr, Display, EnumDiscriminants};

// Root of a parsed source chunk
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// `agent <name> { ... }`. Kept as its own type because the memory context
/// holds the most recently registered one.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDef {
    pub name: String,
    pub body: Vec<Statement>,
}

impl AgentDef {
    pub fn new(name: impl Into<String>, body: Vec<Statement>) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }

    /// Every `on input(<param>) { ... }` handler, as `(param, body)`.
    pub fn input_handlers(&self) -> impl Iterator<Item = (&str, &[Statement])> {
        self.body.iter().filter_map(|s| match s {
            Statement::OnInput { param, body } => Some((param.as_str(), body.as_slice())),
            _ => None,
        })
    }

    pub fn train_blocks(&self) -> impl Iterator<Item = &[Statement]> {
        self.body.iter().filter_map(|s| match s {
            Statement::Train { body } => Some(body.as_slice()),
            _ => None,
        })
    }

    pub fn evolve_blocks(&self) -> impl Iterator<Item = &[Statement]> {
        self.body.iter().filter_map(|s| match s {
            Statement::Evolve { body } => Some(body.as_slice()),
            _ => None,
        })
    }
}

/// Every statement shape the language can express.
///
/// The set is closed; the evaluator matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(StatementKind), derive(Display, AsRefStr, Hash))]
pub enum Statement {
    Agent(AgentDef),
    Mem {
        target: String,
    },
    OnInput {
        param: String,
        body: Vec<Statement>,
    },
    Reflect {
        body: Vec<Statement>,
    },
    Train {
        body: Vec<Statement>,
    },
    Evolve {
        body: Vec<Statement>,
    },
    Goal {
        value: String,
    },
    Embed {
        source: String,
        target: String,
    },
    Link {
        from: String,
        to: String,
    },
    /// `condition` is the raw token text, not an expression.
    If {
        condition: String,
        body: Vec<Statement>,
    },
    Enter {
        target: String,
    },
    ReflectAccess {
        mem_target: String,
        key: String,
    },
    Print {
        value: String,
    },
    /// `<name> = <value>`. Assigning to `output` sets the handler result
    /// instead of short-term memory.
    Assign {
        name: String,
        value: AssignValue,
    },
}

/// Right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignValue {
    /// A string, number or bare word, taken as written.
    Literal(String),
    /// The bare word `input`: the text most recently fed to the agent.
    Input,
}

impl fmt::Display for AssignValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignValue::Literal(value) => write!(f, "{:?}", value),
            AssignValue::Input => write!(f, "input"),
        }
    }
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        StatementKind::from(self)
    }

    /// Surface keyword that introduces this statement.
    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::Agent(_) => "agent",
            Statement::Mem { .. } => "mem",
            Statement::OnInput { .. } => "on input",
            Statement::Reflect { .. } => "reflect",
            Statement::Train { .. } => "train",
            Statement::Evolve { .. } => "evolve",
            Statement::Goal { .. } => "goal",
            Statement::Embed { .. } => "embed",
            Statement::Link { .. } => "link",
            Statement::If { .. } => "if",
            Statement::Enter { .. } => "enter",
            Statement::ReflectAccess { .. } => "mem.",
            Statement::Print { .. } => "print",
            Statement::Assign { .. } => "=",
        }
    }
}

fn fmt_block(f: &mut fmt::Formatter<'_>, head: &str, body: &[Statement]) -> fmt::Result {
    write!(f, "{} {{", head)?;
    for stmt in body {
        write!(f, " {}", stmt)?;
    }
    write!(f, " }}")
}

// Diagnostic rendering, close to the surface syntax.
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Agent(agent) => fmt_block(f, &format!("agent {}", agent.name), &agent.body),
            Statement::Mem { target } => write!(f, "mem {}", target),
            Statement::OnInput { param, body } => {
                fmt_block(f, &format!("on input({})", param), body)
            }
            Statement::Reflect { body } => fmt_block(f, "reflect", body),
            Statement::Train { body } => fmt_block(f, "train", body),
            Statement::Evolve { body } => fmt_block(f, "evolve", body),
            Statement::Goal { value } => write!(f, "goal: {:?}", value),
            Statement::Embed { source, target } => write!(f, "embed {} -> {}", source, target),
            Statement::Link { from, to } => write!(f, "link {} <-> {}", from, to),
            Statement::If { condition, body } => fmt_block(f, &format!("if {}", condition), body),
            Statement::Enter { target } => write!(f, "enter {}", target),
            Statement::ReflectAccess { mem_target, key } => {
                write!(f, "mem.{}[{:?}]", mem_target, key)
            }
            Statement::Print { value } => write!(f, "print {:?}", value),
            Statement::Assign { name, value } => write!(f, "{} = {}", name, value),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
