//! Reading and writing values, filters and projections as serde documents.
//!
//! The encoding is format-agnostic; JSON and YAML helpers are provided.
//!
//! | Document | Value | Clause / Filter |
//! |----------|-------|-----------------|
//! | `null` | `Absent` | `Absent` |
//! | string, number, bool | `Atom` of its text | `Literal` of its text |
//! | `{"$regex": "..."}` | record | `Pattern` |
//! | other map | `Record` | `Fields` |
//! | sequence | `Collection::Many` (top level only) | `Disjunction` (filters only) |
//!
//! Numbers are read as numbers, so their text is the canonical Rust form:
//! `1.50` becomes `"1.5"` and `1.0` becomes `"1"`. Values and filters decode
//! the same way, so unquoted numbers match each other; quote a number to keep
//! its exact spelling.
//!
//! `$regex` marks a pattern in any key position and must be the only key of
//! its map. Field clauses naming a `$regex` field cannot be encoded.
//!
//! A projection is a sequence of `{ "when": <clause>, "then": <result> }`
//! rules in priority order.
//!
//! # Example
//!
//! ```
//! use skein::document::from_yaml;
//! use skein::{Collection, Filter};
//!
//! let filter: Filter = from_yaml(
//!     r#"
//! entity: WorkItem
//! state: [s1, s2]
//! title: { $regex: "^fix" }
//! "#,
//! )
//! .unwrap();
//!
//! let items: Collection = from_yaml(
//!     r#"
//! - { entity: WorkItem, state: s2, title: fix login }
//! - { entity: WorkItem, state: s3, title: fix logout }
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(items.filter(&filter).len(), 1);
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::clause::{Clause, FieldClauses};
use crate::error::{Result, SkeinError, StructureError};
use crate::filter::{Disjunction, Filter};
use crate::pattern::Pattern;
use crate::projection::Projection;
use crate::value::{Collection, Record, Value};

/// Map key that marks a pattern clause.
pub const REGEX_KEY: &str = "$regex";

/// Decodes any document type from JSON text.
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

/// Decodes any document type from YAML text.
pub fn from_yaml<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_yaml::from_str(text)?)
}

/// Encodes any document type as compact JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| SkeinError::Encode(e.to_string()))
}

/// Encodes any document type as YAML.
pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_yaml::to_string(value).map_err(|e| SkeinError::Encode(e.to_string()))
}

// ============================================================================
// Values
// ============================================================================

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Absent => serializer.serialize_none(),
            Value::Atom(text) => serializer.serialize_str(text),
            Value::Record(record) => record.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Collection::One(value) => value.serialize(serializer),
            Collection::Many(values) => values.serialize(serializer),
        }
    }
}

struct CollectionVisitor;

impl CollectionVisitor {
    fn atom<E>(text: impl Into<String>) -> std::result::Result<Collection, E> {
        Ok(Collection::One(Value::Atom(text.into())))
    }
}

impl<'de> Visitor<'de> for CollectionVisitor {
    type Value = Collection;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a scalar, a map, or a sequence of those")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Collection, E> {
        Ok(Collection::One(Value::Absent))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Collection, E> {
        Ok(Collection::One(Value::Absent))
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Collection, D::Error> {
        d.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Collection, E> {
        Self::atom(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Collection, E> {
        Self::atom(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Collection, E> {
        Self::atom(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Collection, E> {
        Self::atom(v.to_string())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Collection, E> {
        Self::atom(v)
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Collection, E> {
        Self::atom(v)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Collection, A::Error> {
        let mut seen = BTreeSet::new();
        let mut record = Record::new();
        while let Some(name) = map.next_key::<String>()? {
            if !seen.insert(name.clone()) {
                return Err(de::Error::custom(StructureError::DuplicateField(name)));
            }
            let value: Value = map.next_value()?;
            record.insert(name, value);
        }
        Ok(Collection::One(Value::Record(record)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Collection, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<Value>()? {
            values.push(value);
        }
        Ok(Collection::Many(values))
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        d.deserialize_any(CollectionVisitor)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        match d.deserialize_any(CollectionVisitor)? {
            Collection::One(value) => Ok(value),
            Collection::Many(_) => Err(de::Error::custom(StructureError::Unsupported(
                "a sequence inside a value",
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(d)? {
            Value::Record(record) => Ok(record),
            Value::Absent => Err(de::Error::custom("expected a map for a record, found null")),
            Value::Atom(_) => Err(de::Error::custom("expected a map for a record")),
        }
    }
}

// ============================================================================
// Clauses and filters
// ============================================================================

impl Serialize for Clause {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Clause::Absent => serializer.serialize_none(),
            Clause::Literal(text) => serializer.serialize_str(text),
            Clause::Pattern(pattern) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(REGEX_KEY, pattern.as_str())?;
                map.end()
            }
            Clause::Fields(fields) => fields.serialize(serializer),
        }
    }
}

impl Serialize for FieldClauses {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // The name would read back as a pattern.
        if self.contains(REGEX_KEY) {
            return Err(ser::Error::custom(format!(
                "field `{REGEX_KEY}` cannot be written as a field filter"
            )));
        }
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, filter) in self {
            map.serialize_entry(name, filter)?;
        }
        map.end()
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Filter::Clause(clause) => clause.serialize(serializer),
            Filter::Any(any) => any.serialize(serializer),
        }
    }
}

impl Serialize for Disjunction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for clause in self {
            seq.serialize_element(clause)?;
        }
        seq.end()
    }
}

struct FilterVisitor;

impl FilterVisitor {
    fn literal<E>(text: impl Into<String>) -> std::result::Result<Filter, E> {
        Ok(Filter::Clause(Clause::Literal(text.into())))
    }
}

impl<'de> Visitor<'de> for FilterVisitor {
    type Value = Filter;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a scalar, a map of field filters, a pattern, or a sequence of clauses")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Filter, E> {
        Ok(Filter::Clause(Clause::Absent))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Filter, E> {
        Ok(Filter::Clause(Clause::Absent))
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Filter, D::Error> {
        d.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Filter, E> {
        Self::literal(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Filter, E> {
        Self::literal(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Filter, E> {
        Self::literal(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Filter, E> {
        Self::literal(v.to_string())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Filter, E> {
        Self::literal(v)
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Filter, E> {
        Self::literal(v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Filter, A::Error> {
        let mut any = Disjunction::new();
        while let Some(filter) = seq.next_element::<Filter>()? {
            any.extend_filter(filter);
        }
        Ok(Filter::Any(any))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Filter, A::Error> {
        let mut source: Option<String> = None;
        let mut fields = FieldClauses::new();

        while let Some(name) = map.next_key::<String>()? {
            if name == REGEX_KEY {
                if source.is_some() {
                    return Err(de::Error::custom(StructureError::DuplicateField(name)));
                }
                source = Some(map.next_value()?);
            } else {
                if fields.contains(&name) {
                    return Err(de::Error::custom(StructureError::DuplicateField(name)));
                }
                let filter: Filter = map.next_value()?;
                fields.insert(name, filter);
            }
        }

        // `$regex` is a pattern wherever it appears, never a field name.
        let extra = fields.iter().next().map(|(name, _)| name.clone());
        match (source, extra) {
            (Some(_), Some(extra)) => Err(de::Error::custom(format!(
                "`{REGEX_KEY}` cannot be combined with field `{extra}`"
            ))),
            (Some(source), None) => {
                let pattern = Pattern::new(&source).map_err(de::Error::custom)?;
                Ok(Filter::Clause(Clause::Pattern(pattern)))
            }
            (None, _) => Ok(Filter::Clause(Clause::Fields(fields))),
        }
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        d.deserialize_any(FilterVisitor)
    }
}

impl<'de> Deserialize<'de> for Clause {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        match d.deserialize_any(FilterVisitor)? {
            Filter::Clause(clause) => Ok(clause),
            Filter::Any(_) => Err(de::Error::custom(StructureError::Unsupported(
                "a disjunction where a single clause is required",
            ))),
        }
    }
}

// ============================================================================
// Projections
// ============================================================================

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleDoc<R> {
    when: Clause,
    then: R,
}

#[derive(Serialize)]
struct RuleRef<'a, R> {
    when: &'a Clause,
    then: &'a R,
}

impl<R: Serialize> Serialize for Projection<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (when, then) in self.rules() {
            seq.serialize_element(&RuleRef { when, then })?;
        }
        seq.end()
    }
}

impl<'de, R: Deserialize<'de>> Deserialize<'de> for Projection<R> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let rules = Vec::<RuleDoc<R>>::deserialize(d)?;
        Ok(rules.into_iter().map(|r| (r.when, r.then)).collect())
    }
}
