//! Filters and the disjunction evaluator.
//!
//! A [`Filter`] is either a single [`Clause`] or a [`Disjunction`] of
//! alternative clauses. Filters are what record fields are matched against,
//! so the two recurse into each other to arbitrary depth.

use crate::clause::{Clause, FieldClauses};
use crate::pattern::Pattern;
use crate::strand::Strand;
use crate::value::Value;

/// A clause or a set of alternative clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// A single clause.
    Clause(Clause),
    /// Any of several clauses.
    Any(Disjunction),
}

impl Filter {
    /// Evaluates this filter against a value.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Filter::Clause(clause) => clause.matches(value),
            Filter::Any(any) => any.matches(value),
        }
    }

    /// Converts `item` to a value and evaluates this filter against it.
    pub fn matches_strand<S: Strand + ?Sized>(&self, item: &S) -> bool {
        self.matches(&item.to_value())
    }

    /// Returns `true` if this filter accepts an absent value.
    pub fn allows_absent(&self) -> bool {
        match self {
            Filter::Clause(clause) => clause.allows_absent(),
            Filter::Any(any) => any.allows_absent(),
        }
    }

    /// The single clause, if this is not a disjunction.
    pub fn as_clause(&self) -> Option<&Clause> {
        match self {
            Filter::Clause(clause) => Some(clause),
            Filter::Any(_) => None,
        }
    }

    /// The disjunction, if this is one.
    pub fn as_disjunction(&self) -> Option<&Disjunction> {
        match self {
            Filter::Any(any) => Some(any),
            Filter::Clause(_) => None,
        }
    }

    /// Returns `true` if any value matches.
    pub fn any<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a Value>,
    {
        values.into_iter().any(|v| self.matches(v))
    }

    /// Returns `true` if every value matches.
    pub fn all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a Value>,
    {
        values.into_iter().all(|v| self.matches(v))
    }

    /// Borrows the matching values, preserving order and duplicates.
    pub fn select<'a>(&self, values: &'a [Value]) -> Vec<&'a Value> {
        values.iter().filter(|v| self.matches(v)).collect()
    }

    /// Counts the matching values.
    pub fn count(&self, values: &[Value]) -> usize {
        values.iter().filter(|v| self.matches(v)).count()
    }

    /// Finds the first matching value.
    pub fn find<'a>(&self, values: &'a [Value]) -> Option<&'a Value> {
        values.iter().find(|v| self.matches(v))
    }

    /// Finds the index of the first matching value.
    pub fn position(&self, values: &[Value]) -> Option<usize> {
        values.iter().position(|v| self.matches(v))
    }

    /// Flattens this filter into its clauses.
    fn into_clauses(self) -> Vec<Clause> {
        match self {
            Filter::Clause(clause) => vec![clause],
            Filter::Any(any) => any.members,
        }
    }
}

impl From<Clause> for Filter {
    fn from(c: Clause) -> Self {
        Filter::Clause(c)
    }
}

impl From<Disjunction> for Filter {
    fn from(d: Disjunction) -> Self {
        Filter::Any(d)
    }
}

impl From<FieldClauses> for Filter {
    fn from(f: FieldClauses) -> Self {
        Filter::Clause(Clause::Fields(f))
    }
}

impl From<Pattern> for Filter {
    fn from(p: Pattern) -> Self {
        Filter::Clause(Clause::Pattern(p))
    }
}

impl From<&str> for Filter {
    fn from(s: &str) -> Self {
        Filter::Clause(Clause::from(s))
    }
}

impl From<String> for Filter {
    fn from(s: String) -> Self {
        Filter::Clause(Clause::from(s))
    }
}

/// An unordered set of alternative clauses.
///
/// Members are unique by structural equality; inserting a clause that is
/// already a member has no effect. A disjunction never holds another
/// disjunction: building one from filters flattens nested disjunctions.
/// An empty disjunction matches nothing.
///
/// # Example
///
/// ```
/// use skein::{one_of, Value};
///
/// let state = one_of(["s1", "s2"]);
/// assert!(state.matches(&Value::from("s2")));
/// assert!(!state.matches(&Value::from("s3")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Disjunction {
    members: Vec<Clause>,
}

impl Disjunction {
    /// Creates an empty disjunction.
    pub fn new() -> Self {
        Disjunction::default()
    }

    /// Adds a clause, returning `false` if it was already a member.
    pub fn insert(&mut self, clause: Clause) -> bool {
        if self.contains(&clause) {
            return false;
        }
        self.members.push(clause);
        true
    }

    /// Adds every clause of a filter, flattening disjunctions.
    pub fn extend_filter(&mut self, filter: Filter) {
        for clause in filter.into_clauses() {
            self.insert(clause);
        }
    }

    /// Returns `true` if the clause is a member.
    pub fn contains(&self, clause: &Clause) -> bool {
        self.members.contains(clause)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if there are no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates the members. Iteration order carries no meaning.
    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.members.iter()
    }

    /// Disjunction evaluator: `true` if some member matches the value.
    ///
    /// A value structurally equal to a member is accepted before any member
    /// is evaluated.
    pub fn matches(&self, value: &Value) -> bool {
        self.members.iter().any(|m| m.equals_value(value))
            || self.members.iter().any(|m| m.matches(value))
    }

    /// Returns `true` if `Absent` is a member.
    pub fn allows_absent(&self) -> bool {
        self.members.iter().any(Clause::allows_absent)
    }
}

impl PartialEq for Disjunction {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.members.iter().all(|m| other.contains(m))
    }
}

impl Eq for Disjunction {}

impl FromIterator<Clause> for Disjunction {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        let mut any = Disjunction::new();
        for clause in iter {
            any.insert(clause);
        }
        any
    }
}

impl FromIterator<Filter> for Disjunction {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        let mut any = Disjunction::new();
        for filter in iter {
            any.extend_filter(filter);
        }
        any
    }
}

impl<'a> IntoIterator for &'a Disjunction {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Builds a disjunction filter from alternatives.
///
/// Alternatives that are themselves disjunctions are flattened. See also the
/// [`one_of!`](crate::one_of!) macro.
pub fn one_of<I, F>(alternatives: I) -> Filter
where
    I: IntoIterator<Item = F>,
    F: Into<Filter>,
{
    Filter::Any(alternatives.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Record;

    fn color(c: &str) -> Value {
        Value::Record(Record::new().with("color", c))
    }

    #[test]
    fn membership_by_literal() {
        let f = one_of(["s1", "s2"]);
        assert!(f.matches(&Value::from("s1")));
        assert!(f.matches(&Value::from("s2")));
        assert!(!f.matches(&Value::from("s3")));
        assert!(!f.matches(&Value::Absent));
    }

    #[test]
    fn empty_disjunction_matches_nothing() {
        let f = Filter::Any(Disjunction::new());
        assert!(!f.matches(&Value::from("x")));
        assert!(!f.matches(&Value::Absent));
    }

    #[test]
    fn empty_one_of_macro() {
        let f = crate::one_of![];
        assert_eq!(f, Filter::Any(Disjunction::new()));
        assert!(!f.matches(&Value::Absent));
        assert!(!f.allows_absent());
    }

    #[test]
    fn members_are_deduplicated() {
        let mut any = Disjunction::new();
        assert!(any.insert(Clause::literal("a")));
        assert!(!any.insert(Clause::literal("a")));
        assert!(any.insert(Clause::pattern("a").unwrap()));
        assert!(!any.insert(Clause::pattern("a").unwrap()));
        assert_eq!(any.len(), 2);
    }

    #[test]
    fn nested_disjunctions_flatten() {
        let f = one_of([one_of(["a", "b"]), Filter::from("c"), one_of(["a"])]);
        let any = f.as_disjunction().unwrap();
        assert_eq!(any.len(), 3);
        assert!(any.iter().all(|c| matches!(c, Clause::Literal(_))));
    }

    #[test]
    fn equality_ignores_member_order() {
        assert_eq!(one_of(["a", "b"]), one_of(["b", "a"]));
        assert_ne!(one_of(["a", "b"]), one_of(["a"]));
    }

    #[test]
    fn structural_member_short_circuits() {
        let f = one_of([FieldClauses::new().field("color", Clause::Absent)]);
        let value = Value::Record(Record::new().with("color", Value::Absent));
        assert!(f.matches(&value));
    }

    #[test]
    fn pattern_members() {
        let not_red = Pattern::new("^(?:[^r]|r[^e]|re[^d])").unwrap();
        let f = one_of([FieldClauses::new().field("color", not_red)]);
        assert!(f.matches(&color("blue")));
        assert!(!f.matches(&color("red")));
    }

    #[test]
    fn allows_absent_when_member() {
        assert!(one_of([Clause::Absent, Clause::literal("x")]).allows_absent());
        assert!(!one_of(["x"]).allows_absent());
        assert!(Filter::from(Clause::Absent).allows_absent());
    }

    #[test]
    fn slice_helpers() {
        let values = vec![color("red"), color("blue"), color("red")];
        let red = Filter::from(FieldClauses::new().field("color", "red"));

        assert_eq!(red.count(&values), 2);
        assert_eq!(red.select(&values), vec![&values[0], &values[2]]);
        assert_eq!(red.position(&values[1..]), Some(1));
        assert_eq!(red.find(&values), Some(&values[0]));
        assert!(red.any(&values));
        assert!(!red.all(&values));
    }
}
