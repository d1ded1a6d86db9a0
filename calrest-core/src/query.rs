//! Partial-record matching.
//!
//! A [`Query`] is a set of field/value pairs. A record matches when every
//! field named by the query exists on the record with an equal value. Field
//! names are the record's serialized names (`_id`, `calendarId`, ...), so the
//! same query works against any entity type.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Decides whether a record belongs to a result set.
///
/// Stores call `matches` while holding their lock. A matcher must not call
/// back into the store it is matching against; that deadlocks.
pub trait Matcher<R> {
    fn matches(&self, record: &R) -> bool;

    /// The identity this matcher selects, if checking the field named
    /// `id_field` is all it does. Stores then compare ids directly.
    fn identity(&self, _id_field: &str) -> Option<&str> {
        None
    }
}

impl<R, F> Matcher<R> for F
where
    F: Fn(&R) -> bool,
{
    fn matches(&self, record: &R) -> bool {
        self(record)
    }
}

/// Field-by-field equality query. An empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    fields: BTreeMap<String, Value>,
}

impl Query {
    /// The empty query.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }
}

impl<R: Serialize> Matcher<R> for Query {
    fn matches(&self, record: &R) -> bool {
        if self.fields.is_empty() {
            return true;
        }

        // Records that don't serialize to an object have no fields to match.
        let Ok(Value::Object(map)) = serde_json::to_value(record) else {
            return false;
        };

        self.fields
            .iter()
            .all(|(field, expected)| map.get(field) == Some(expected))
    }

    fn identity(&self, id_field: &str) -> Option<&str> {
        if self.fields.len() != 1 {
            return None;
        }
        self.fields.get(id_field)?.as_str()
    }
}
