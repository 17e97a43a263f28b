//! Runtime values under test.
//!
//! A [`Value`] is the tree-shaped data a filter is evaluated against: absent,
//! a text atom, or a record of named sub-values. A [`Collection`] is either a
//! single value or an ordered sequence of values.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

use crate::error::StructureError;

static ABSENT: Value = Value::Absent;

/// Tree-shaped value tested by filters.
///
/// # Example
///
/// ```
/// use skein::{Record, Value};
///
/// let item = Value::Record(
///     Record::new()
///         .with("entity", "WorkItem")
///         .with("state", "s1"),
/// );
///
/// assert_eq!(item.get("state"), &Value::from("s1"));
/// assert!(item.get("owner").is_absent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Value {
    /// Null or missing.
    #[default]
    Absent,
    /// Text leaf.
    Atom(String),
    /// Named sub-values.
    Record(Record),
}

impl Value {
    /// Creates an atom from any string-like value.
    pub fn atom(text: impl Into<String>) -> Self {
        Value::Atom(text.into())
    }

    /// Returns `true` if this is `Absent`.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Returns `true` if this is an `Atom`.
    pub fn is_atom(&self) -> bool {
        matches!(self, Value::Atom(_))
    }

    /// Returns `true` if this is a `Record`.
    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Extracts the atom text, if present.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Value::Atom(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the record, if present.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Reads a field of a record value.
    ///
    /// Atoms, absent values and missing fields all read as `Absent`.
    pub fn get(&self, field: &str) -> &Value {
        match self {
            Value::Record(r) => r.get(field),
            _ => &ABSENT,
        }
    }

    /// Nesting depth: leaves are 1, each record level adds one.
    ///
    /// Computed without recursion so arbitrarily deep values can be measured.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((value, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Value::Record(r) = value {
                stack.extend(r.fields.values().map(|child| (child, depth + 1)));
            }
        }
        deepest
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Atom(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Atom(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Atom(s.clone())
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Absent, Into::into)
    }
}

/// Mapping from field name to [`Value`].
///
/// A record never stores an `Absent` entry: inserting `Absent` removes the
/// field, and reading a missing field yields `Absent`. "Missing" and
/// "explicitly absent" are therefore the same state, including for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Builds a record from pairs, rejecting repeated field names.
    ///
    /// [`FromIterator`] keeps the last value for a repeated name instead.
    pub fn try_from_pairs<I, K, V>(pairs: I) -> Result<Self, StructureError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut seen = BTreeSet::new();
        let mut record = Record::new();
        for (name, value) in pairs {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(StructureError::DuplicateField(name));
            }
            record.insert(name, value);
        }
        Ok(record)
    }

    /// Sets a field, returning the previous value if it was present.
    ///
    /// Setting `Absent` removes the field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        match value.into() {
            Value::Absent => self.fields.remove(&name),
            value => self.fields.insert(name, value),
        }
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Removes a field, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Reads a field; missing fields read as `Absent`.
    pub fn get(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&ABSENT)
    }

    /// Returns `true` if the field holds a non-absent value.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates present fields in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// One value or an ordered sequence of values.
///
/// Testing treats `One` as a collection of one. Filtering keeps the
/// distinction: a filtered `One` stays singular (possibly `Absent`), a
/// filtered `Many` stays a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Collection {
    /// A single value.
    One(Value),
    /// An ordered sequence of values; duplicates allowed.
    Many(Vec<Value>),
}

impl Collection {
    /// Returns `true` for the singular form.
    pub fn is_one(&self) -> bool {
        matches!(self, Collection::One(_))
    }

    /// Returns `true` for the plural form.
    pub fn is_many(&self) -> bool {
        matches!(self, Collection::Many(_))
    }

    /// The values as a slice; a singular collection is a slice of one.
    pub fn as_slice(&self) -> &[Value] {
        match self {
            Collection::One(v) => std::slice::from_ref(v),
            Collection::Many(vs) => vs,
        }
    }

    /// Iterates the values in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.as_slice().iter()
    }

    /// Number of values; a singular collection always has one.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` for an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Converts into a vector of values.
    pub fn into_vec(self) -> Vec<Value> {
        match self {
            Collection::One(v) => vec![v],
            Collection::Many(vs) => vs,
        }
    }
}

impl Default for Collection {
    fn default() -> Self {
        Collection::Many(Vec::new())
    }
}

impl From<Value> for Collection {
    fn from(v: Value) -> Self {
        Collection::One(v)
    }
}

impl From<Vec<Value>> for Collection {
    fn from(vs: Vec<Value>) -> Self {
        Collection::Many(vs)
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Collection::Many(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds a plural collection from any values.
///
/// See also the [`yarn!`](crate::yarn!) macro.
pub fn yarn<I, V>(values: I) -> Collection
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Collection::Many(values.into_iter().map(Into::into).collect())
}
