use serde::{Deserialize, Serialize};
use service_core::query::{Record, RecordId};
use service_core::store::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Record for Category {
    fn id(&self) -> RecordId {
        self.id
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "type" => Some(self.kind.as_str()),
            _ => None,
        }
    }
}

impl Entity for Category {
    const COLLECTION: &'static str = "categories";

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// The six trivia categories the in-memory store starts with.
pub fn default_categories() -> Vec<Category> {
    ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
        .into_iter()
        .zip(1..)
        .map(|(kind, id)| Category {
            id,
            kind: kind.to_string(),
        })
        .collect()
}
