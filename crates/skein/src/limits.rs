//! Structural limits checked before evaluation.
//!
//! Evaluation recurses once per nested field clause, so a pathologically
//! deep filter could exhaust the stack. [`Limits`] bounds that depth; the
//! checks themselves walk the trees iteratively.

use serde::{Deserialize, Serialize};

use crate::clause::Clause;
use crate::error::StructureError;
use crate::filter::Filter;
use crate::value::Value;

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Structural limits for filters and values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum nesting depth. Leaves count as 1; each field level adds 1.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Limits {
    /// Limits with the given maximum depth.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Limits { max_depth }
    }

    /// Rejects a filter nested deeper than `max_depth`.
    pub fn check_filter(&self, filter: &Filter) -> Result<(), StructureError> {
        let mut stack: Vec<(&Clause, usize)> = Vec::new();
        push_filter(&mut stack, filter, 1);

        while let Some((clause, depth)) = stack.pop() {
            self.check_depth(depth)?;
            if let Clause::Fields(fields) = clause {
                for (_, sub) in fields {
                    push_filter(&mut stack, sub, depth + 1);
                }
            }
        }
        Ok(())
    }

    /// Rejects a clause nested deeper than `max_depth`.
    pub fn check_clause(&self, clause: &Clause) -> Result<(), StructureError> {
        let mut stack = vec![(clause, 1usize)];
        while let Some((clause, depth)) = stack.pop() {
            self.check_depth(depth)?;
            if let Clause::Fields(fields) = clause {
                for (_, sub) in fields {
                    push_filter(&mut stack, sub, depth + 1);
                }
            }
        }
        Ok(())
    }

    /// Rejects a value nested deeper than `max_depth`.
    pub fn check_value(&self, value: &Value) -> Result<(), StructureError> {
        let mut stack = vec![(value, 1usize)];
        while let Some((value, depth)) = stack.pop() {
            self.check_depth(depth)?;
            if let Value::Record(record) = value {
                stack.extend(record.iter().map(|(_, child)| (child, depth + 1)));
            }
        }
        Ok(())
    }

    fn check_depth(&self, depth: usize) -> Result<(), StructureError> {
        if depth > self.max_depth {
            return Err(StructureError::TooDeep {
                depth,
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}

// A disjunction does not add a level: its members sit at the filter's depth.
fn push_filter<'a>(stack: &mut Vec<(&'a Clause, usize)>, filter: &'a Filter, depth: usize) {
    match filter {
        Filter::Clause(clause) => stack.push((clause, depth)),
        Filter::Any(any) => stack.extend(any.iter().map(|clause| (clause, depth))),
    }
}
