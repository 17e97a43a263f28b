//! Conversion of Rust data into [`Value`] trees.
//!
//! This module provides the [`Strand`] trait which is implemented by the
//! `#[derive(Strand)]` macro to turn plain structs into records.

use std::collections::{BTreeMap, HashMap};

use crate::value::{Record, Value};

/// Types that can be viewed as a [`Value`] for matching.
///
/// This trait is typically derived using `#[derive(Strand)]`, but can also
/// be implemented manually.
///
/// # Derive Usage
///
/// ```
/// use skein::{fields, one_of, Filter, Strand};
///
/// #[derive(Strand)]
/// struct WorkItem {
///     entity: String,
///     state: String,
///     #[strand(rename = "owner")]
///     assignee: Option<String>,
///     #[strand(skip)]
///     cache_key: u64,
/// }
///
/// let item = WorkItem {
///     entity: "WorkItem".into(),
///     state: "s1".into(),
///     assignee: None,
///     cache_key: 7,
/// };
///
/// let filter = Filter::from(fields! {
///     WorkItem::ENTITY => "WorkItem",
///     WorkItem::STATE => one_of!["s1", "s2"],
/// });
/// assert!(filter.matches_strand(&item));
/// ```
///
/// # Manual Implementation
///
/// ```
/// use skein::{Record, Strand, Value};
///
/// struct Task {
///     name: String,
///     priority: u8,
/// }
///
/// impl Strand for Task {
///     fn to_value(&self) -> Value {
///         Value::Record(
///             Record::new()
///                 .with("name", self.name.to_value())
///                 .with("priority", self.priority.to_value()),
///         )
///     }
/// }
/// ```
pub trait Strand {
    /// Returns the value tree used for matching.
    fn to_value(&self) -> Value;
}

impl Strand for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Strand for Record {
    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl Strand for str {
    fn to_value(&self) -> Value {
        Value::Atom(self.to_string())
    }
}

impl Strand for String {
    fn to_value(&self) -> Value {
        Value::Atom(self.clone())
    }
}

impl<T: Strand + ?Sized> Strand for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Strand + ?Sized> Strand for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Strand> Strand for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Absent, Strand::to_value)
    }
}

impl<V: Strand> Strand for BTreeMap<String, V> {
    fn to_value(&self) -> Value {
        Value::Record(self.iter().map(|(k, v)| (k.as_str(), v.to_value())).collect())
    }
}

impl<V: Strand, S> Strand for HashMap<String, V, S> {
    fn to_value(&self) -> Value {
        Value::Record(self.iter().map(|(k, v)| (k.as_str(), v.to_value())).collect())
    }
}

// Scalars become atoms of their display form.
macro_rules! display_strand {
    ($($t:ty),* $(,)?) => {
        $(
            impl Strand for $t {
                fn to_value(&self) -> Value {
                    Value::Atom(self.to_string())
                }
            }
        )*
    };
}

display_strand!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);
