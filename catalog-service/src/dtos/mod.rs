pub mod drinks;
pub mod listing;
pub mod trivia;

pub use drinks::*;
pub use listing::*;
pub use trivia::*;

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use service_core::query::{coerce_id, RecordId};

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<i64>,
}

/// A `page` that is not an integer counts as absent.
fn lenient_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|page| page.trim().parse().ok()))
}

/// Accepts `3` or `"3"` for an id field.
pub(crate) fn relation_id<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_id(&value)
        .ok_or_else(|| de::Error::custom(format!("expected a numeric id, got {}", value)))
}

pub(crate) fn relation_ids<'de, D>(deserializer: D) -> Result<Vec<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Value>::deserialize(deserializer)?
        .iter()
        .map(|value| {
            coerce_id(value)
                .ok_or_else(|| de::Error::custom(format!("expected a numeric id, got {}", value)))
        })
        .collect()
}
