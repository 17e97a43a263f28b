//! Construction macros for values, collections, filters and projections.

/// Builds a disjunction [`Filter`](crate::Filter) from alternatives.
///
/// Each alternative is converted with `Filter::from`, so literals, patterns,
/// field clauses and nested disjunctions can be mixed.
///
/// ```
/// use skein::{one_of, Clause, Value};
///
/// let state = one_of!["s1", "s2", Clause::Absent];
/// assert!(state.matches(&Value::Absent));
///
/// // No alternatives: matches nothing.
/// assert!(!one_of![].matches(&Value::Absent));
/// ```
#[macro_export]
macro_rules! one_of {
    () => {
        $crate::Filter::Any($crate::Disjunction::new())
    };
    ($($alternative:expr),+ $(,)?) => {
        $crate::one_of([$($crate::Filter::from($alternative)),*])
    };
}

/// Builds a plural [`Collection`](crate::Collection) from values.
///
/// ```
/// use skein::{yarn, Value};
///
/// let c = yarn!["a", "b"];
/// assert_eq!(c.as_slice(), &[Value::from("a"), Value::from("b")]);
/// ```
#[macro_export]
macro_rules! yarn {
    ($($value:expr),* $(,)?) => {
        $crate::Collection::Many(vec![$($crate::Value::from($value)),*])
    };
}

/// Builds a record [`Value`](crate::Value) from `name => value` pairs.
///
/// ```
/// use skein::{record, Value};
///
/// let v = record! { "entity" => "WorkItem", "owner" => record! { "name" => "ada" } };
/// assert_eq!(v.get("owner").get("name"), &Value::from("ada"));
/// ```
#[macro_export]
macro_rules! record {
    ($($name:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut record = $crate::Record::new();
        $(record.insert($name, $crate::Value::from($value));)*
        $crate::Value::Record(record)
    }};
}

/// Builds a field [`Clause`](crate::Clause) from `name => filter` pairs.
///
/// ```
/// use skein::{fields, one_of, record};
///
/// let clause = fields! { "state" => one_of!["s1", "s2"] };
/// assert!(clause.matches(&record! { "state" => "s2" }));
/// ```
#[macro_export]
macro_rules! fields {
    ($($name:expr => $filter:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut fields = $crate::FieldClauses::new();
        $(fields.insert($name, $crate::Filter::from($filter));)*
        $crate::Clause::Fields(fields)
    }};
}

/// Builds a [`Projection`](crate::Projection) from `(clause, result)` pairs
/// in priority order.
///
/// ```
/// use skein::{projection, Value};
///
/// let p = projection![("a", 1), ("b", 2)];
/// assert_eq!(p.project(&Value::from("b")), Some(&2));
/// ```
#[macro_export]
macro_rules! projection {
    ($(($clause:expr, $result:expr)),* $(,)?) => {
        $crate::Projection::from_rules(vec![$(($crate::Clause::from($clause), $result)),*])
    };
}
