//! Clause types and the clause evaluator.
//!
//! A [`Clause`] is an atomic matching rule: absence, an exact literal, a text
//! pattern, or a set of per-field filters over a record.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

use crate::error::StructureError;
use crate::filter::Filter;
use crate::pattern::Pattern;
use crate::value::{Record, Value};

/// An atomic matching rule.
///
/// # Example
///
/// ```
/// use skein::{fields, Clause, Value, Record};
///
/// let clause = fields! { "entity" => "WorkItem" };
/// let item = Value::Record(Record::new().with("entity", "WorkItem").with("state", "s1"));
///
/// assert!(clause.matches(&item));
/// assert!(!Clause::literal("WorkItem").matches(&item));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Matches only an absent value.
    Absent,
    /// Matches an atom with exactly this text.
    Literal(String),
    /// Matches an atom the pattern finds a match in.
    Pattern(Pattern),
    /// Matches a record whose named fields satisfy their filters.
    Fields(FieldClauses),
}

impl Clause {
    /// Creates a literal clause.
    pub fn literal(text: impl Into<String>) -> Self {
        Clause::Literal(text.into())
    }

    /// Compiles a pattern clause.
    pub fn pattern(source: &str) -> crate::Result<Self> {
        Ok(Clause::Pattern(Pattern::new(source)?))
    }

    /// Evaluates this clause against a value.
    ///
    /// Never fails: combinations that cannot match (an atom against field
    /// clauses, a record against a literal, ...) evaluate to `false`.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Clause::Absent, value) => value.is_absent(),
            (Clause::Literal(expected), Value::Atom(text)) => text == expected,
            (Clause::Pattern(pattern), Value::Atom(text)) => pattern.is_match(text),
            (Clause::Fields(fields), Value::Record(record)) => fields.matches_record(record),
            _ => false,
        }
    }

    /// Returns `true` if this clause accepts an absent value.
    pub fn allows_absent(&self) -> bool {
        matches!(self, Clause::Absent)
    }

    /// Structural equality between a clause and a value.
    ///
    /// `Absent` equals `Absent`, a literal equals the atom with the same
    /// text, and field clauses equal a record with exactly the same fields,
    /// each equal to its sub-clause. Patterns equal no value. A value
    /// structurally equal to a clause always matches it.
    pub fn equals_value(&self, value: &Value) -> bool {
        match (self, value) {
            (Clause::Absent, Value::Absent) => true,
            (Clause::Literal(expected), Value::Atom(text)) => text == expected,
            (Clause::Fields(fields), Value::Record(record)) => {
                record.iter().all(|(name, _)| fields.contains(name))
                    && fields.iter().all(|(name, filter)| {
                        filter
                            .as_clause()
                            .is_some_and(|clause| clause.equals_value(record.get(name)))
                    })
            }
            _ => false,
        }
    }
}

impl PartialEq<Value> for Clause {
    fn eq(&self, other: &Value) -> bool {
        self.equals_value(other)
    }
}

impl From<&str> for Clause {
    fn from(s: &str) -> Self {
        Clause::Literal(s.to_string())
    }
}

impl From<String> for Clause {
    fn from(s: String) -> Self {
        Clause::Literal(s)
    }
}

impl From<Pattern> for Clause {
    fn from(p: Pattern) -> Self {
        Clause::Pattern(p)
    }
}

impl From<FieldClauses> for Clause {
    fn from(f: FieldClauses) -> Self {
        Clause::Fields(f)
    }
}

/// Per-field filters over a record.
///
/// Matching is open: fields of the record not named here are ignored. An
/// empty set of field clauses matches any record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldClauses {
    fields: BTreeMap<String, Filter>,
}

impl FieldClauses {
    /// Creates an empty set of field clauses.
    pub fn new() -> Self {
        FieldClauses::default()
    }

    /// Builds field clauses from pairs, rejecting repeated field names.
    pub fn try_from_pairs<I, K, F>(pairs: I) -> Result<Self, StructureError>
    where
        I: IntoIterator<Item = (K, F)>,
        K: Into<String>,
        F: Into<Filter>,
    {
        let mut seen = BTreeSet::new();
        let mut clauses = FieldClauses::new();
        for (name, filter) in pairs {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(StructureError::DuplicateField(name));
            }
            clauses.insert(name, filter);
        }
        Ok(clauses)
    }

    /// Sets the filter for a field, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, filter: impl Into<Filter>) -> Option<Filter> {
        self.fields.insert(name.into(), filter.into())
    }

    /// Builder form of [`FieldClauses::insert`].
    pub fn field(mut self, name: impl Into<String>, filter: impl Into<Filter>) -> Self {
        self.insert(name, filter);
        self
    }

    /// The filter for a field, if one is set.
    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.fields.get(name)
    }

    /// Returns `true` if the field has a filter.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of filtered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is filtered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates the field filters in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Filter> {
        self.fields.iter()
    }

    /// Field matcher: every named field must satisfy its filter.
    ///
    /// A field that is missing (or absent) in the record passes only when
    /// its filter explicitly accepts absence.
    pub fn matches_record(&self, record: &Record) -> bool {
        self.fields.iter().all(|(name, filter)| {
            let value = record.get(name);
            if value.is_absent() {
                filter.allows_absent()
            } else {
                filter.matches(value)
            }
        })
    }
}

impl<K: Into<String>, F: Into<Filter>> FromIterator<(K, F)> for FieldClauses {
    fn from_iter<I: IntoIterator<Item = (K, F)>>(iter: I) -> Self {
        let mut clauses = FieldClauses::new();
        for (name, filter) in iter {
            clauses.insert(name, filter);
        }
        clauses
    }
}

impl<'a> IntoIterator for &'a FieldClauses {
    type Item = (&'a String, &'a Filter);
    type IntoIter = btree_map::Iter<'a, String, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::one_of;

    fn work_item(state: &str) -> Value {
        Value::Record(Record::new().with("entity", "WorkItem").with("state", state))
    }

    #[test]
    fn absent_matches_only_absent() {
        assert!(Clause::Absent.matches(&Value::Absent));
        assert!(!Clause::Absent.matches(&Value::from("")));
        assert!(!Clause::Absent.matches(&Value::Record(Record::new())));
    }

    #[test]
    fn literal_is_exact() {
        let clause = Clause::literal("hello");
        assert!(clause.matches(&Value::from("hello")));
        assert!(!clause.matches(&Value::from("Hello")));
        assert!(!clause.matches(&Value::from("hello world")));
    }

    #[test]
    fn pattern_searches_atoms() {
        let clause = Clause::pattern("^bl").unwrap();
        assert!(clause.matches(&Value::from("blue")));
        assert!(!clause.matches(&Value::from("red")));
    }

    #[test]
    fn mismatched_shapes_never_match() {
        let record = Value::Record(Record::new().with("a", "1"));
        assert!(!Clause::literal("1").matches(&record));
        assert!(!Clause::pattern(".*").unwrap().matches(&record));
        assert!(!Clause::Fields(FieldClauses::new()).matches(&Value::from("1")));
        assert!(!Clause::Fields(FieldClauses::new()).matches(&Value::Absent));
        assert!(!Clause::literal("").matches(&Value::Absent));
    }

    #[test]
    fn empty_field_clauses_match_any_record() {
        let clause = Clause::Fields(FieldClauses::new());
        assert!(clause.matches(&Value::Record(Record::new())));
        assert!(clause.matches(&work_item("s1")));
    }

    #[test]
    fn field_matching_is_open() {
        let clause = Clause::Fields(FieldClauses::new().field("entity", "WorkItem"));
        assert!(clause.matches(&work_item("s1")));
    }

    #[test]
    fn all_fields_must_match() {
        let clause = Clause::Fields(
            FieldClauses::new()
                .field("entity", "WorkItem")
                .field("state", "s1"),
        );
        assert!(clause.matches(&work_item("s1")));
        assert!(!clause.matches(&work_item("s2")));
    }

    #[test]
    fn missing_field_fails_unless_absence_allowed() {
        let item = Value::Record(Record::new().with("entity", "WorkItem"));

        let requires_state = Clause::Fields(FieldClauses::new().field("state", "s1"));
        assert!(!requires_state.matches(&item));

        let requires_absent = Clause::Fields(FieldClauses::new().field("state", Clause::Absent));
        assert!(requires_absent.matches(&item));
        assert!(!requires_absent.matches(&work_item("s1")));

        let optional = Clause::Fields(
            FieldClauses::new().field("state", one_of([Clause::Absent, Clause::literal("s1")])),
        );
        assert!(optional.matches(&item));
        assert!(optional.matches(&work_item("s1")));
        assert!(!optional.matches(&work_item("s2")));
    }

    #[test]
    fn nested_fields() {
        let value = Value::Record(
            Record::new().with("owner", Record::new().with("name", "ada").with("team", "core")),
        );
        let clause = Clause::Fields(
            FieldClauses::new().field("owner", FieldClauses::new().field("team", "core")),
        );
        assert!(clause.matches(&value));

        let wrong = Clause::Fields(
            FieldClauses::new().field("owner", FieldClauses::new().field("team", "web")),
        );
        assert!(!wrong.matches(&value));
    }

    #[test]
    fn structural_equality() {
        assert!(Clause::Absent.equals_value(&Value::Absent));
        assert!(Clause::literal("a") == Value::from("a"));
        assert!(Clause::pattern("a").unwrap() != Value::from("a"));

        let clause = Clause::Fields(FieldClauses::new().field("color", Clause::Absent));
        assert!(clause.equals_value(&Value::Record(Record::new())));

        let exact = Clause::Fields(FieldClauses::new().field("entity", "WorkItem"));
        let item = Value::Record(Record::new().with("entity", "WorkItem"));
        assert!(exact.equals_value(&item));
        assert!(!exact.equals_value(&work_item("s1")));
    }

    #[test]
    fn try_from_pairs_rejects_duplicates() {
        let err = FieldClauses::try_from_pairs([("a", "1"), ("a", "2")]).unwrap_err();
        assert_eq!(err, StructureError::DuplicateField("a".to_string()));
    }
}
