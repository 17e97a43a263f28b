//! Skein - structural pattern matching over nested values.
//!
//! Skein decides whether tree-shaped values satisfy declarative filters,
//! filters collections of values, maps values to results through ordered
//! rule tables, and sorts collections by a derived rank. It supports:
//!
//! - Values that are absent, text atoms, or records of named sub-values
//! - Clauses: absence, exact literals, text patterns, nested field filters
//! - Disjunctions of alternative clauses
//! - First-match-wins projections and stable rank sorting
//! - Serde documents (JSON, YAML) and a `#[derive(Strand)]` for plain structs
//!
//! # Quick Start
//!
//! ```rust
//! use skein::{fields, one_of, record, yarn, Clause, Collection, Filter, Pattern};
//!
//! let work_items = Filter::from(fields! {
//!     "entity" => "WorkItem",
//!     "state" => one_of!["s1", "s2"],
//! });
//! let active = Filter::from(fields! {
//!     "entity" => "WorkItem",
//!     "state" => one_of!["s1"],
//! });
//!
//! let items = yarn![
//!     record! { "entity" => "WorkItem", "state" => "s1" },
//!     record! { "entity" => "WorkItem", "state" => "s2" },
//! ];
//!
//! assert_eq!(items.filter(&work_items).len(), 2);
//! assert_eq!(items.filter(&active).len(), 1);
//!
//! // Filtering a single value keeps it singular.
//! let one = Collection::One(record! { "entity" => "WorkItem", "state" => "s2" });
//! assert!(one.filter(&active).as_slice()[0].is_absent());
//! ```
//!
//! # Matching Semantics
//!
//! ```text
//! Absent          matches  Absent only
//! Literal(t)      matches  Atom(s) where s == t
//! Pattern(p)      matches  Atom(s) where p finds a match in s
//! Fields{k: f..}  matches  Record(r) where every r[k] satisfies f
//! OneOf(c..)      matches  anything some member c matches
//! ```
//!
//! Every other combination is simply no match; evaluation never fails.
//! Field matching is open: record fields not named by the filter are
//! ignored. A missing field reads as `Absent`, so it only passes a filter
//! that explicitly accepts absence.
//!
//! # Projections
//!
//! | Operation | Result |
//! |-----------|--------|
//! | [`Projection::lookup`] | first matching `(clause, result)` rule |
//! | [`Projection::project`] | result of that rule, or `None` |
//! | [`sort_by`] / [`Projection::sorted`] | stable sort by projected rank |

// Lets the derive macro's `::skein` paths resolve inside this crate too.
extern crate self as skein;

mod clause;
mod collection;
pub mod document;
mod error;
mod filter;
mod limits;
mod macros;
mod matcher;
mod ordering;
mod pattern;
mod projection;
mod strand;
mod value;

// Re-export public API
pub use clause::{Clause, FieldClauses};
pub use collection::{filter, sort_by, sort_by_with, test_any};
pub use error::{Result, SkeinError, StructureError};
pub use filter::{one_of, Disjunction, Filter};
pub use limits::{Limits, DEFAULT_MAX_DEPTH};
pub use matcher::Matcher;
pub use ordering::{Dir, Placement, SortOptions};
pub use pattern::Pattern;
pub use projection::{Projection, SortOrder};
pub use strand::Strand;
pub use value::{yarn, Collection, Record, Value};

#[cfg(feature = "derive")]
pub use skein_macros::Strand;
