//! Venue and artist directory entries.

use serde::{Deserialize, Serialize};
use service_core::query::{Record, RecordId};
use service_core::store::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: RecordId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: RecordId,
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Record for Venue {
    fn id(&self) -> RecordId {
        self.id
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(self.name.as_str()),
            "city" => Some(self.city.as_str()),
            "state" => Some(self.state.as_str()),
            "address" => Some(self.address.as_str()),
            _ => None,
        }
    }
}

impl Entity for Venue {
    const COLLECTION: &'static str = "venues";

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Record for Artist {
    fn id(&self) -> RecordId {
        self.id
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(self.name.as_str()),
            "city" => Some(self.city.as_str()),
            "state" => Some(self.state.as_str()),
            _ => None,
        }
    }
}

impl Entity for Artist {
    const COLLECTION: &'static str = "artists";

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}
