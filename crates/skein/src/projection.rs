//! Ordered first-match rule tables.
//!
//! A [`Projection`] maps values to results through an ordered list of
//! `(Clause, result)` rules. The first rule whose clause matches wins, the
//! way the arms of a guarded `match` do. A projection whose results are
//! ranks is a [`SortOrder`].

use tracing::trace;

use crate::clause::Clause;
use crate::ordering::SortOptions;
use crate::value::Value;

/// Ordered `(Clause, R)` rules, evaluated first to last.
///
/// # Example
///
/// ```
/// use skein::{fields, Projection, Record, Value};
///
/// let priority = Projection::new()
///     .rule(fields! { "state" => "blocked" }, 0)
///     .rule(fields! { "state" => "active" }, 1)
///     .rule(fields! {}, 9);
///
/// let item = Value::Record(Record::new().with("state", "active"));
/// assert_eq!(priority.project(&item), Some(&1));
/// assert_eq!(priority.project(&Value::from("not a record")), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<R> {
    rules: Vec<(Clause, R)>,
}

/// A projection whose results are ranks.
pub type SortOrder<R> = Projection<R>;

impl<R> Default for Projection<R> {
    fn default() -> Self {
        Projection { rules: Vec::new() }
    }
}

impl<R> Projection<R> {
    /// Creates an empty projection.
    pub fn new() -> Self {
        Projection::default()
    }

    /// Builds a projection from rules in priority order.
    pub fn from_rules(rules: Vec<(Clause, R)>) -> Self {
        Projection { rules }
    }

    /// Appends a rule with the lowest priority so far.
    pub fn rule(mut self, clause: impl Into<Clause>, result: R) -> Self {
        self.push(clause, result);
        self
    }

    /// Appends a rule with the lowest priority so far.
    pub fn push(&mut self, clause: impl Into<Clause>, result: R) {
        self.rules.push((clause.into(), result));
    }

    /// The rules in priority order.
    pub fn rules(&self) -> &[(Clause, R)] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the first rule whose clause matches the value.
    pub fn lookup(&self, value: &Value) -> Option<(&Clause, &R)> {
        let (index, (clause, result)) = self
            .rules
            .iter()
            .enumerate()
            .find(|(_, (clause, _))| clause.matches(value))?;
        trace!(rule = index, "projection hit");
        Some((clause, result))
    }

    /// Returns the result of the first matching rule.
    ///
    /// `None` means no rule matched; it is an ordinary outcome.
    pub fn project(&self, value: &Value) -> Option<&R> {
        self.lookup(value).map(|(_, result)| result)
    }

    /// Like [`Projection::project`], falling back to `default`.
    pub fn project_or<'a>(&'a self, value: &Value, default: &'a R) -> &'a R {
        self.project(value).unwrap_or(default)
    }
}

impl<R: Ord> Projection<R> {
    /// Compares two values by their projected rank.
    pub fn compare(&self, a: &Value, b: &Value, options: &SortOptions) -> std::cmp::Ordering {
        options.compare_ranks(self.project(a), self.project(b))
    }

    /// Borrows `values` in rank order.
    ///
    /// The sort is stable: equal ranks keep their input order, and so do
    /// unranked values, which are grouped according to
    /// [`SortOptions::unranked`]. Each value is projected once.
    pub fn sorted<'a>(&self, values: &'a [Value], options: &SortOptions) -> Vec<&'a Value> {
        let mut keyed: Vec<(Option<&R>, &'a Value)> =
            values.iter().map(|v| (self.project(v), v)).collect();
        keyed.sort_by(|(a, _), (b, _)| options.compare_ranks(*a, *b));

        let unranked = keyed.iter().filter(|(rank, _)| rank.is_none()).count();
        trace!(len = keyed.len(), unranked, dir = %options.dir, "sorted by projection");

        keyed.into_iter().map(|(_, v)| v).collect()
    }
}

impl<C: Into<Clause>, R> FromIterator<(C, R)> for Projection<R> {
    fn from_iter<I: IntoIterator<Item = (C, R)>>(iter: I) -> Self {
        Projection {
            rules: iter.into_iter().map(|(c, r)| (c.into(), r)).collect(),
        }
    }
}
