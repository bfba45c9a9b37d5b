pub mod condition;
pub mod context;
pub mod evaluator;
pub mod output;
pub mod statement;

pub use condition::{ConditionEvaluator, ContextIncludesCondition, LossCondition};
pub use context::{MemoryContext, Snapshot};
pub use evaluator::Evaluator;
pub use output::{OutputSink, StdoutSink};
