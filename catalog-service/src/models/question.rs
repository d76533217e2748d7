use serde::{Deserialize, Serialize};
use service_core::query::{Record, RecordId};
use service_core::store::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: RecordId,
    pub question: String,
    pub answer: String,
    /// Category id. Always numeric; string ids are coerced at the boundary.
    pub category: RecordId,
    pub difficulty: i32,
}

impl Record for Question {
    fn id(&self) -> RecordId {
        self.id
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "question" => Some(self.question.as_str()),
            "answer" => Some(self.answer.as_str()),
            _ => None,
        }
    }

    fn relation_field(&self, name: &str) -> Option<RecordId> {
        (name == "category").then_some(self.category)
    }
}

impl Entity for Question {
    const COLLECTION: &'static str = "questions";

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}
