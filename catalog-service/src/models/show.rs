use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::query::{Record, RecordId};
use service_core::store::Entity;

/// An artist booked at a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: RecordId,
    pub venue_id: RecordId,
    pub artist_id: RecordId,
    pub start_time: DateTime<Utc>,
}

impl Show {
    /// Shows starting at `now` still count as upcoming.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_time >= now
    }
}

impl Record for Show {
    fn id(&self) -> RecordId {
        self.id
    }

    fn text_field(&self, _name: &str) -> Option<&str> {
        None
    }

    fn relation_field(&self, name: &str) -> Option<RecordId> {
        match name {
            "venue_id" => Some(self.venue_id),
            "artist_id" => Some(self.artist_id),
            _ => None,
        }
    }
}

impl Entity for Show {
    const COLLECTION: &'static str = "shows";

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}
