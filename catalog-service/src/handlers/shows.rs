//! Show bookings linking venues and artists.

use crate::dtos::{CreateShowRequest, ShowListing, ShowsResponse};
use crate::models::Show;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use service_core::error::AppError;
use service_core::extract::ValidatedJson;
use service_core::query::RecordId;
use std::collections::BTreeMap;

/// Venue and artist names, loaded once per request to label shows.
pub(crate) struct ShowDirectory {
    venues: BTreeMap<RecordId, String>,
    artists: BTreeMap<RecordId, String>,
}

impl ShowDirectory {
    pub(crate) async fn load(state: &AppState) -> Result<Self, AppError> {
        let venues = state.venues.list().await?;
        let artists = state.artists.list().await?;

        Ok(Self {
            venues: venues.into_iter().map(|v| (v.id, v.name)).collect(),
            artists: artists.into_iter().map(|a| (a.id, a.name)).collect(),
        })
    }

    /// Labels `shows`, skipping any whose venue or artist no longer exists.
    pub(crate) fn describe(&self, shows: &[Show]) -> Vec<ShowListing> {
        shows
            .iter()
            .filter_map(|show| {
                Some(ShowListing {
                    show_id: show.id,
                    venue_id: show.venue_id,
                    venue_name: self.venues.get(&show.venue_id)?.clone(),
                    artist_id: show.artist_id,
                    artist_name: self.artists.get(&show.artist_id)?.clone(),
                    start_time: show.start_time,
                })
            })
            .collect()
    }
}

/// Upcoming shows, soonest first.
pub async fn list_shows(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let mut upcoming: Vec<Show> = state
        .shows
        .list()
        .await?
        .into_iter()
        .filter(|show| show.is_upcoming(now))
        .collect();
    upcoming.sort_by_key(|show| (show.start_time, show.id));

    let directory = ShowDirectory::load(&state).await?;

    Ok(Json(ShowsResponse {
        success: true,
        shows: directory.describe(&upcoming),
    }))
}

pub async fn create_show(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateShowRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.venues.get(request.venue_id).await?.is_none() {
        return Err(AppError::Unprocessable(anyhow::anyhow!(
            "Venue {} does not exist",
            request.venue_id
        )));
    }
    if state.artists.get(request.artist_id).await?.is_none() {
        return Err(AppError::Unprocessable(anyhow::anyhow!(
            "Artist {} does not exist",
            request.artist_id
        )));
    }

    let show = state
        .shows
        .insert(Show {
            id: 0,
            venue_id: request.venue_id,
            artist_id: request.artist_id,
            start_time: request.start_time,
        })
        .await?;

    tracing::info!(
        show_id = show.id,
        venue_id = show.venue_id,
        artist_id = show.artist_id,
        "Show listed"
    );

    Ok((StatusCode::CREATED, Json(show)))
}
