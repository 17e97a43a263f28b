//! Collection operators.
//!
//! Existential testing, filtering and rank sorting over a [`Collection`],
//! keeping the singular/plural distinction the way callers expect it.

use crate::filter::Filter;
use crate::ordering::SortOptions;
use crate::projection::SortOrder;
use crate::value::{Collection, Value};

/// Returns `true` if some value of the collection matches.
///
/// A singular collection is tested directly. Stops at the first match.
pub fn test_any(collection: &Collection, filter: &Filter) -> bool {
    match collection {
        Collection::One(value) => filter.matches(value),
        Collection::Many(values) => values.iter().any(|v| filter.matches(v)),
    }
}

/// Keeps the matching values.
///
/// A plural collection yields the matching values in their original order,
/// duplicates included. A singular collection yields itself if it matches
/// and `One(Absent)` if it does not.
pub fn filter(collection: &Collection, filter: &Filter) -> Collection {
    match collection {
        Collection::One(value) if filter.matches(value) => Collection::One(value.clone()),
        Collection::One(_) => Collection::One(Value::Absent),
        Collection::Many(values) => Collection::Many(
            values
                .iter()
                .filter(|v| filter.matches(v))
                .cloned()
                .collect(),
        ),
    }
}

/// Orders a plural collection by projected rank, ascending, unranked last.
///
/// See [`sort_by_with`] for other options. A singular collection is returned
/// unchanged.
pub fn sort_by<R: Ord>(collection: &Collection, order: &SortOrder<R>) -> Collection {
    sort_by_with(collection, order, &SortOptions::default())
}

/// Orders a plural collection by projected rank.
pub fn sort_by_with<R: Ord>(
    collection: &Collection,
    order: &SortOrder<R>,
    options: &SortOptions,
) -> Collection {
    match collection {
        Collection::One(_) => collection.clone(),
        Collection::Many(values) => {
            Collection::Many(order.sorted(values, options).into_iter().cloned().collect())
        }
    }
}

impl Collection {
    /// Method form of [`test_any`].
    pub fn test_any(&self, f: &Filter) -> bool {
        test_any(self, f)
    }

    /// Method form of [`filter`].
    pub fn filter(&self, f: &Filter) -> Collection {
        filter(self, f)
    }

    /// Filters in place.
    ///
    /// Same result as [`filter`] without cloning the surviving values.
    pub fn retain(&mut self, f: &Filter) {
        match self {
            Collection::One(value) => {
                if !f.matches(value) {
                    *value = Value::Absent;
                }
            }
            Collection::Many(values) => values.retain(|v| f.matches(v)),
        }
    }

    /// Method form of [`sort_by_with`].
    pub fn sort_by<R: Ord>(&self, order: &SortOrder<R>, options: &SortOptions) -> Collection {
        sort_by_with(self, order, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{Clause, FieldClauses};
    use crate::filter::one_of;
    use crate::ordering::{Dir, Placement};
    use crate::projection::Projection;
    use crate::value::{yarn, Record};

    fn work_item(state: &str) -> Value {
        Value::Record(Record::new().with("entity", "WorkItem").with("state", state))
    }

    fn work_items() -> Filter {
        Filter::from(
            FieldClauses::new()
                .field("entity", "WorkItem")
                .field("state", one_of(["s1", "s2"])),
        )
    }

    fn active() -> Filter {
        Filter::from(
            FieldClauses::new()
                .field("entity", "WorkItem")
                .field("state", one_of(["s1"])),
        )
    }

    #[test]
    fn test_any_plural() {
        let items = yarn([work_item("s2"), work_item("s3")]);
        assert!(test_any(&items, &work_items()));
        assert!(!test_any(&items, &active()));
        assert!(!test_any(&Collection::Many(vec![]), &work_items()));
    }

    #[test]
    fn test_any_singular() {
        assert!(test_any(&Collection::One(work_item("s1")), &active()));
        assert!(!Collection::One(work_item("s2")).test_any(&active()));
    }

    #[test]
    fn filter_plural_keeps_order_and_duplicates() {
        let items = yarn([work_item("s1"), work_item("s2"), work_item("s3"), work_item("s1")]);

        let all = filter(&items, &work_items());
        assert_eq!(all, yarn([work_item("s1"), work_item("s2"), work_item("s1")]));

        let act = items.filter(&active());
        assert_eq!(act, yarn([work_item("s1"), work_item("s1")]));
    }

    #[test]
    fn filter_singular_degrades_to_absent() {
        let one = Collection::One(work_item("s2"));
        assert_eq!(filter(&one, &work_items()), one);
        assert_eq!(filter(&one, &active()), Collection::One(Value::Absent));
    }

    #[test]
    fn filter_singular_absent_with_absent_clause() {
        let one = Collection::One(Value::Absent);
        let f = Filter::from(Clause::Absent);
        assert_eq!(filter(&one, &f), one);
    }

    #[test]
    fn retain_matches_filter() {
        let mut items = yarn([work_item("s1"), work_item("s3")]);
        let expected = filter(&items, &work_items());
        items.retain(&work_items());
        assert_eq!(items, expected);

        let mut one = Collection::One(work_item("s3"));
        one.retain(&work_items());
        assert_eq!(one, Collection::One(Value::Absent));
    }

    #[test]
    fn sort_plural() {
        let order = Projection::new()
            .rule(FieldClauses::new().field("state", "s2"), 0)
            .rule(FieldClauses::new().field("state", "s1"), 1);
        let items = yarn([work_item("s1"), work_item("s9"), work_item("s2")]);

        let sorted = sort_by(&items, &order);
        assert_eq!(sorted, yarn([work_item("s2"), work_item("s1"), work_item("s9")]));

        let opts = SortOptions::new().dir(Dir::Desc).unranked(Placement::First);
        let sorted = items.sort_by(&order, &opts);
        assert_eq!(sorted, yarn([work_item("s9"), work_item("s1"), work_item("s2")]));
    }

    #[test]
    fn sort_singular_is_identity() {
        let order: Projection<i32> = Projection::new();
        let one = Collection::One(work_item("s1"));
        assert_eq!(sort_by(&one, &order), one);
    }
}
