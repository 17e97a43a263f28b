//! Validated filters.
//!
//! A [`Matcher`] is a [`Filter`] that passed the structural [`Limits`]
//! check, bundled with the collection and slice operations callers usually
//! need.

use tracing::debug;

use crate::collection;
use crate::error::Result;
use crate::filter::Filter;
use crate::limits::Limits;
use crate::strand::Strand;
use crate::value::{Collection, Value};

/// A filter that is safe to evaluate.
///
/// Evaluation depth is bounded by the filter's depth: field clauses only
/// descend into a value where the filter itself has a nested level. Checking
/// the filter once at construction therefore bounds every later match,
/// however deep the values are.
///
/// # Example
///
/// ```
/// use skein::{fields, one_of, yarn, Matcher, Record, Value};
///
/// let matcher = Matcher::new(fields! {
///     "entity" => "WorkItem",
///     "state" => one_of!["s1", "s2"],
/// })
/// .unwrap();
///
/// let item = |state: &str| Value::Record(Record::new().with("entity", "WorkItem").with("state", state));
/// let items = yarn![item("s1"), item("s3"), item("s2")];
///
/// assert!(matcher.test_any(&items));
/// assert_eq!(matcher.filter(&items), yarn![item("s1"), item("s2")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    filter: Filter,
    limits: Limits,
}

impl Matcher {
    /// Validates a filter against the default limits.
    pub fn new(filter: impl Into<Filter>) -> Result<Self> {
        Matcher::with_limits(filter, Limits::default())
    }

    /// Validates a filter against the given limits.
    pub fn with_limits(filter: impl Into<Filter>, limits: Limits) -> Result<Self> {
        let filter = filter.into();
        if let Err(e) = limits.check_filter(&filter) {
            debug!(error = %e, "rejected filter");
            return Err(e.into());
        }
        debug!(max_depth = limits.max_depth, "matcher ready");
        Ok(Matcher { filter, limits })
    }

    /// The validated filter.
    pub fn as_filter(&self) -> &Filter {
        &self.filter
    }

    /// The limits the filter was validated against.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Unwraps the validated filter.
    pub fn into_filter(self) -> Filter {
        self.filter
    }

    /// Tests a single value.
    pub fn matches(&self, value: &Value) -> bool {
        self.filter.matches(value)
    }

    /// Tests anything convertible to a value.
    pub fn matches_strand<S: Strand + ?Sized>(&self, item: &S) -> bool {
        self.filter.matches_strand(item)
    }

    /// Returns `true` if some value of the collection matches.
    pub fn test_any(&self, values: &Collection) -> bool {
        collection::test_any(values, &self.filter)
    }

    /// Keeps the matching values of a collection.
    pub fn filter(&self, values: &Collection) -> Collection {
        collection::filter(values, &self.filter)
    }

    /// Borrows the matching values of a slice.
    pub fn select<'a>(&self, values: &'a [Value]) -> Vec<&'a Value> {
        self.filter.select(values)
    }

    /// Keeps the matching items of any strand slice.
    pub fn select_strands<'a, S: Strand>(&self, items: &'a [S]) -> Vec<&'a S> {
        items.iter().filter(|item| self.matches_strand(*item)).collect()
    }

    /// Counts the matching values of a slice.
    pub fn count(&self, values: &[Value]) -> usize {
        self.filter.count(values)
    }

    /// Finds the first matching value of a slice.
    pub fn find<'a>(&self, values: &'a [Value]) -> Option<&'a Value> {
        self.filter.find(values)
    }
}

impl TryFrom<Filter> for Matcher {
    type Error = crate::error::SkeinError;

    fn try_from(filter: Filter) -> Result<Self> {
        Matcher::new(filter)
    }
}
