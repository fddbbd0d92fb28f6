//! In-memory model of a Chrome trace-event document.
//!
//! A document is a JSON object whose top-level values are classified once,
//! when the document is loaded, into list fields that are concatenated across
//! inputs and opaque fields that only the first input contributes.

use crate::error::MergeError;
use serde_json::{Map, Value};
use std::path::Path;

/// Key every trace document must carry.
pub const TRACE_EVENTS: &str = "traceEvents";

/// A classified top-level value.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A JSON array; merged by concatenation.
    Sequence(Vec<Value>),
    /// Any other JSON value; first document wins.
    Opaque(Value),
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Field::Sequence(items),
            other => Field::Opaque(other),
        }
    }
}

impl From<Field> for Value {
    fn from(field: Field) -> Self {
        match field {
            Field::Sequence(items) => Value::Array(items),
            Field::Opaque(value) => value,
        }
    }
}

/// A trace document with its fields in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceDocument {
    fields: Vec<(String, Field)>,
}

impl TraceDocument {
    /// Classify a parsed JSON value.
    ///
    /// Returns `None` when the value is not an object or has no
    /// `traceEvents` key. The type of `traceEvents` itself is not checked.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };
        if !map.contains_key(TRACE_EVENTS) {
            return None;
        }
        let fields = map
            .into_iter()
            .map(|(key, value)| (key, Field::from(value)))
            .collect();
        Some(Self { fields })
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.fields
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, f)| f)
    }

    /// Number of entries under `traceEvents`, zero if it is not a list.
    pub fn event_count(&self) -> usize {
        match self.get(TRACE_EVENTS) {
            Some(Field::Sequence(items)) => items.len(),
            _ => 0,
        }
    }

    /// Fold a later document into this one.
    ///
    /// List fields are appended after the existing items, or added when the
    /// key is new. Opaque fields of `other` are dropped. `source` names
    /// `other` in the error when a list would land on an opaque value.
    pub fn absorb(&mut self, other: TraceDocument, source: &Path) -> Result<(), MergeError> {
        for (key, field) in other.fields {
            let Field::Sequence(items) = field else {
                continue;
            };
            match self.get_mut(&key) {
                Some(Field::Sequence(existing)) => existing.extend(items),
                Some(Field::Opaque(_)) => {
                    return Err(MergeError::FieldKindConflict {
                        key,
                        path: source.to_path_buf(),
                    });
                }
                None => self.fields.push((key, Field::Sequence(items))),
            }
        }
        Ok(())
    }

    pub fn into_value(self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .into_iter()
            .map(|(key, field)| (key, Value::from(field)))
            .collect();
        Value::Object(map)
    }
}
