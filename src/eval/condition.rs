//! Interpretation of raw `if` condition text.

use super::context::MemoryContext;
use crate::config::ConditionMode;

pub trait ConditionEvaluator {
    /// `None` when the condition is not understood.
    fn holds(&self, condition: &str, ctx: &MemoryContext) -> Option<bool>;
}

/// Treats any condition that mentions `loss` as true. Nothing else is
/// supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct LossCondition;

impl ConditionEvaluator for LossCondition {
    fn holds(&self, condition: &str, _ctx: &MemoryContext) -> Option<bool> {
        condition.contains("loss").then_some(true)
    }
}

/// [`LossCondition`] plus `context includes "<keyword>"` and the list form
/// `context includes ["<a>", "<b>"]`. Holds when any short-term key or value
/// contains one of the keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextIncludesCondition;

impl ContextIncludesCondition {
    fn keywords(condition: &str) -> Option<Vec<&str>> {
        let rest = condition.trim().strip_prefix("context")?.trim_start();
        let operand = rest.strip_prefix("includes")?.trim();
        match operand.strip_prefix('[') {
            Some(list) => quoted_list(list.strip_suffix(']')?),
            None => Some(vec![operand.strip_prefix('"')?.strip_suffix('"')?]),
        }
    }
}

/// `"a", "b"` with optional commas. An empty list is allowed.
fn quoted_list(list: &str) -> Option<Vec<&str>> {
    let separator = |c: char| c == ',' || c.is_whitespace();
    let mut keywords = Vec::new();
    let mut rest = list.trim_start_matches(separator);
    while !rest.is_empty() {
        let body = rest.strip_prefix('"')?;
        let end = body.find('"')?;
        keywords.push(&body[..end]);
        rest = body[end + 1..].trim_start_matches(separator);
    }
    Some(keywords)
}

impl ConditionEvaluator for ContextIncludesCondition {
    fn holds(&self, condition: &str, ctx: &MemoryContext) -> Option<bool> {
        if let Some(result) = LossCondition.holds(condition, ctx) {
            return Some(result);
        }
        let keywords = Self::keywords(condition)?;
        Some(ctx.mem_short().iter().any(|(key, value)| {
            keywords
                .iter()
                .any(|keyword| key.contains(keyword) || value.contains(keyword))
        }))
    }
}

pub fn condition_evaluator(mode: ConditionMode) -> Box<dyn ConditionEvaluator> {
    match mode {
        ConditionMode::LossOnly => Box::new(LossCondition),
        ConditionMode::ContextIncludes => Box::new(ContextIncludesCondition),
    }
}
