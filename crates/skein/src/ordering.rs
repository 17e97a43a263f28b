//! Ordering options for rank-based sorting.
//!
//! Provides [`Dir`] for sort direction, [`Placement`] for values without a
//! rank, and [`SortOptions`] combining the two.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest rank first).
    #[default]
    Asc,
    /// Descending order (largest rank first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where values without a rank go when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Before every ranked value.
    First,
    /// After every ranked value.
    #[default]
    Last,
}

/// Options for [`Projection::sorted`](crate::Projection::sorted).
///
/// Direction only affects ranked values: unranked values always go where
/// `unranked` puts them, in their original relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    /// Direction for ranked values.
    pub dir: Dir,
    /// Placement of unranked values.
    pub unranked: Placement,
}

impl SortOptions {
    /// Ascending, unranked last.
    pub fn new() -> Self {
        SortOptions::default()
    }

    /// Sets the direction.
    pub fn dir(mut self, dir: Dir) -> Self {
        self.dir = dir;
        self
    }

    /// Sets the placement of unranked values.
    pub fn unranked(mut self, placement: Placement) -> Self {
        self.unranked = placement;
        self
    }

    /// Three-way comparison of two optional ranks.
    ///
    /// Total and transitive for any `Ord` rank, so it is safe to hand to a
    /// stable sort.
    pub fn compare_ranks<R: Ord>(&self, a: Option<&R>, b: Option<&R>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => self.dir.apply(a.cmp(b)),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => match self.unranked {
                Placement::First => Ordering::Less,
                Placement::Last => Ordering::Greater,
            },
            (Some(_), None) => match self.unranked {
                Placement::First => Ordering::Greater,
                Placement::Last => Ordering::Less,
            },
        }
    }
}
