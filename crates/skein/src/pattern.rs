//! Text patterns for atom matching.
//!
//! [`Pattern`] wraps a compiled [`Regex`] and gives it structural identity:
//! two patterns are equal when their source text is equal, so filters that
//! contain patterns can be compared and deduplicated.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use regex::Regex;

use crate::error::{Result, SkeinError};

/// Compiled text pattern.
///
/// Matching is an unanchored search, as [`Regex::is_match`] defines it. Use
/// `^` and `$` in the source for a full-text test.
///
/// # Example
///
/// ```
/// use skein::Pattern;
///
/// let p = Pattern::new(r"^s\d$").unwrap();
/// assert!(p.is_match("s1"));
/// assert!(!p.is_match("s10"));
/// ```
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compiles a pattern from its source text.
    pub fn new(source: &str) -> Result<Self> {
        Ok(Pattern(Regex::new(source)?))
    }

    /// The source text of the pattern.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The underlying compiled expression.
    pub fn as_regex(&self) -> &Regex {
        &self.0
    }

    /// Returns `true` if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<Regex> for Pattern {
    fn from(r: Regex) -> Self {
        Pattern(r)
    }
}

impl FromStr for Pattern {
    type Err = SkeinError;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::new(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanchored_search() {
        let p = Pattern::new("lu").unwrap();
        assert!(p.is_match("blue"));
        assert!(!p.is_match("red"));
    }

    #[test]
    fn anchored_full_test() {
        let p = Pattern::new(r"^s\d+$").unwrap();
        assert!(p.is_match("s12"));
        assert!(!p.is_match("s12!"));
    }

    #[test]
    fn equality_follows_source() {
        assert_eq!(Pattern::new("a+").unwrap(), Pattern::new("a+").unwrap());
        assert_ne!(Pattern::new("a+").unwrap(), Pattern::new("a*").unwrap());
    }

    #[test]
    fn invalid_source_is_an_error() {
        let err = Pattern::new("(unclosed").unwrap_err();
        assert!(matches!(err, SkeinError::InvalidPattern(_)));
        assert!("[".parse::<Pattern>().is_err());
    }

    #[test]
    fn display_shows_source() {
        assert_eq!(Pattern::new("^r").unwrap().to_string(), "/^r/");
    }
}
