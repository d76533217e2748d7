use super::QueryError;
use serde_json::{Map, Value};

/// Canonical identifier type for records and relation (foreign key) values.
pub type RecordId = i64;

/// A persisted entity as the query core sees it: an id plus named fields.
pub trait Record {
    fn id(&self) -> RecordId;

    /// String value of a searchable text field.
    fn text_field(&self, name: &str) -> Option<&str>;

    /// Value of a relation field, already coerced to [`RecordId`].
    fn relation_field(&self, _name: &str) -> Option<RecordId> {
        None
    }
}

/// Untyped record backed by a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    id: RecordId,
    fields: Map<String, Value>,
}

impl DynamicRecord {
    /// Builds a record from a JSON object carrying an `id` member.
    pub fn from_json(value: Value) -> Result<Self, QueryError> {
        let Value::Object(fields) = value else {
            return Err(QueryError::InvalidArgument(
                "record must be a JSON object".to_string(),
            ));
        };

        let id = fields.get("id").and_then(coerce_id).ok_or_else(|| {
            QueryError::InvalidArgument("record is missing a numeric id".to_string())
        })?;

        Ok(Self { id, fields })
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_json(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Record for DynamicRecord {
    fn id(&self) -> RecordId {
        self.id
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    fn relation_field(&self, name: &str) -> Option<RecordId> {
        self.fields.get(name).and_then(coerce_id)
    }
}

/// Coerces an integer or numeric string into a [`RecordId`].
///
/// Relation ids arrive both as `3` and `"3"` from clients; everything inside
/// the core compares them as integers.
pub fn coerce_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
