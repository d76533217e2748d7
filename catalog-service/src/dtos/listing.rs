use super::relation_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::query::{Page, RecordId};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ListingSearchRequest {
    #[serde(default)]
    pub search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListingSearchResponse<T> {
    pub count: usize,
    pub data: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total: usize,
    pub total_pages: u64,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        Self {
            success: true,
            data: page.items,
            page: page.page_number,
            page_size: page.page_size,
            total: page.total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVenueRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: String,
    #[validate(length(min = 2, max = 2, message = "State must be a two-letter code"))]
    pub state: String,
    #[validate(length(min = 1, message = "Address cannot be empty"))]
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateArtistRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: String,
    #[validate(length(min = 2, max = 2, message = "State must be a two-letter code"))]
    pub state: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVenueRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: Option<String>,
    #[serde(default)]
    #[validate(length(min = 2, max = 2, message = "State must be a two-letter code"))]
    pub state: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Address cannot be empty"))]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateArtistRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: Option<String>,
    #[serde(default)]
    #[validate(length(min = 2, max = 2, message = "State must be a two-letter code"))]
    pub state: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
}

/// A venue or artist together with its bookings split around the current time.
#[derive(Debug, Serialize)]
pub struct ListingDetail<T> {
    #[serde(flatten)]
    pub entry: T,
    pub past_shows: Vec<ShowListing>,
    pub upcoming_shows: Vec<ShowListing>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T> ListingDetail<T> {
    pub fn new(entry: T, past_shows: Vec<ShowListing>, upcoming_shows: Vec<ShowListing>) -> Self {
        Self {
            entry,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AreaVenue {
    pub id: RecordId,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<AreaVenue>,
}

#[derive(Debug, Serialize)]
pub struct VenueAreasResponse {
    pub success: bool,
    pub areas: Vec<VenueArea>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateShowRequest {
    #[serde(deserialize_with = "relation_id")]
    #[validate(range(min = 1, message = "Venue must be a valid venue id"))]
    pub venue_id: RecordId,
    #[serde(deserialize_with = "relation_id")]
    #[validate(range(min = 1, message = "Artist must be a valid artist id"))]
    pub artist_id: RecordId,
    /// RFC 3339 timestamp.
    pub start_time: DateTime<Utc>,
}

/// A show with the names of both parties resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ShowListing {
    pub show_id: RecordId,
    pub venue_id: RecordId,
    pub venue_name: String,
    pub artist_id: RecordId,
    pub artist_name: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ShowsResponse {
    pub success: bool,
    pub shows: Vec<ShowListing>,
}

#[derive(Debug, Serialize)]
pub struct ListingDeletedResponse {
    pub success: bool,
    pub deleted: RecordId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_show_parses_timestamp_and_ids() {
        let req: CreateShowRequest = serde_json::from_str(
            r#"{"venue_id": "1", "artist_id": 4, "start_time": "2035-04-01T20:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(req.venue_id, 1);
        assert_eq!(req.artist_id, 4);
        assert_eq!(req.start_time.to_rfc3339(), "2035-04-01T20:00:00+00:00");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_show_rejects_bad_timestamp() {
        let parsed = serde_json::from_str::<CreateShowRequest>(
            r#"{"venue_id": 1, "artist_id": 4, "start_time": "next tuesday"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_update_venue_checks_only_present_fields() {
        let req: UpdateVenueRequest = serde_json::from_str(r#"{"phone": "415-000-1234"}"#).unwrap();
        assert!(req.validate().is_ok());

        let req: UpdateVenueRequest = serde_json::from_str(r#"{"state": "California"}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
