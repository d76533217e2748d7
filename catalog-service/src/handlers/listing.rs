//! Venue and artist directory handlers, generic over the entry type.

use super::shows::ShowDirectory;
use crate::dtos::{
    AreaVenue, CreateArtistRequest, CreateVenueRequest, ListingDeletedResponse, ListingDetail,
    ListingSearchRequest, ListingSearchResponse, PageParams, PageResponse, UpdateArtistRequest,
    UpdateVenueRequest, VenueArea, VenueAreasResponse,
};
use crate::models::{Artist, Show, Venue};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use service_core::error::AppError;
use service_core::extract::{Path, Query, ValidatedJson};
use service_core::query::{filter_by_relation, paginate, search, RecordId};
use service_core::store::{Entity, Repository};
use std::collections::BTreeMap;
use std::sync::Arc;
use validator::Validate;

/// A directory entry type served under its own route prefix.
pub trait Listing: Entity + Serialize {
    type Create: DeserializeOwned + Validate + Send + 'static;
    type Update: DeserializeOwned + Validate + Send + 'static;

    /// Text field matched by `search_term`.
    const SEARCH_FIELD: &'static str = "name";

    /// `Show` field that points at this entry.
    const SHOW_RELATION: &'static str;

    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>>;

    fn from_request(request: Self::Create) -> Self;

    fn apply(&mut self, update: Self::Update);
}

impl Listing for Venue {
    type Create = CreateVenueRequest;
    type Update = UpdateVenueRequest;

    const SHOW_RELATION: &'static str = "venue_id";

    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>> {
        &state.venues
    }

    fn from_request(request: CreateVenueRequest) -> Self {
        Venue {
            id: 0,
            name: request.name,
            city: request.city,
            state: request.state,
            address: request.address,
            phone: request.phone,
            genres: request.genres,
        }
    }

    fn apply(&mut self, update: UpdateVenueRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(state) = update.state {
            self.state = state;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(genres) = update.genres {
            self.genres = genres;
        }
    }
}

impl Listing for Artist {
    type Create = CreateArtistRequest;
    type Update = UpdateArtistRequest;

    const SHOW_RELATION: &'static str = "artist_id";

    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>> {
        &state.artists
    }

    fn from_request(request: CreateArtistRequest) -> Self {
        Artist {
            id: 0,
            name: request.name,
            city: request.city,
            state: request.state,
            phone: request.phone,
            genres: request.genres,
        }
    }

    fn apply(&mut self, update: UpdateArtistRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(state) = update.state {
            self.state = state;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(genres) = update.genres {
            self.genres = genres;
        }
    }
}

pub async fn list_entries<T: Listing>(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse<T>>, AppError> {
    let entries = T::repository(&state).list().await?;
    let page = paginate(&entries, params.page, state.page_size)?;
    Ok(Json(PageResponse::from(page)))
}

pub async fn search_entries<T: Listing>(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ListingSearchRequest>,
) -> Result<Json<ListingSearchResponse<T>>, AppError> {
    let entries = T::repository(&state).list().await?;
    let found = search(&entries, T::SEARCH_FIELD, request.search_term.as_deref());

    Ok(Json(ListingSearchResponse {
        count: found.len(),
        data: found,
    }))
}

/// Entry with its past and upcoming shows, each in start time order.
pub async fn get_entry<T: Listing>(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Json<ListingDetail<T>>, AppError> {
    let entry = T::repository(&state)
        .get(id)
        .await?
        .ok_or_else(AppError::not_found)?;

    let mut shows = state.shows.list().await?;
    shows.sort_by_key(|show| (show.start_time, show.id));
    let now = Utc::now();
    let (upcoming, past): (Vec<Show>, Vec<Show>) =
        filter_by_relation(&shows, T::SHOW_RELATION, id)
            .into_iter()
            .partition(|show| show.is_upcoming(now));

    let directory = ShowDirectory::load(&state).await?;

    Ok(Json(ListingDetail::new(
        entry,
        directory.describe(&past),
        directory.describe(&upcoming),
    )))
}

pub async fn create_entry<T: Listing>(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<T::Create>,
) -> Result<impl IntoResponse, AppError> {
    let entry = T::repository(&state)
        .insert(T::from_request(request))
        .await?;

    tracing::info!(collection = T::COLLECTION, id = entry.id(), "Listing created");

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_entry<T: Listing>(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    ValidatedJson(request): ValidatedJson<T::Update>,
) -> Result<Json<T>, AppError> {
    let repository = T::repository(&state);
    let mut entry = repository.get(id).await?.ok_or_else(AppError::not_found)?;

    entry.apply(request);
    let entry = repository.update(entry).await?;

    tracing::info!(collection = T::COLLECTION, id, "Listing updated");

    Ok(Json(entry))
}

/// Removes the entry and the shows booked against it.
pub async fn delete_entry<T: Listing>(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<impl IntoResponse, AppError> {
    if !T::repository(&state).delete(id).await? {
        return Err(AppError::not_found());
    }

    let shows = state.shows.list().await?;
    let booked = filter_by_relation(&shows, T::SHOW_RELATION, id);
    for show in &booked {
        state.shows.delete(show.id).await?;
    }

    tracing::info!(
        collection = T::COLLECTION,
        id,
        shows_removed = booked.len(),
        "Listing deleted"
    );

    Ok(Json(ListingDeletedResponse {
        success: true,
        deleted: id,
    }))
}

/// Venues grouped by city and state, each with its upcoming show count.
pub async fn venue_areas(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let venues = state.venues.list().await?;
    let shows = state.shows.list().await?;
    let now = Utc::now();

    let mut areas: BTreeMap<(String, String), Vec<AreaVenue>> = BTreeMap::new();
    for venue in venues {
        let num_upcoming_shows = filter_by_relation(&shows, "venue_id", venue.id)
            .iter()
            .filter(|show| show.is_upcoming(now))
            .count();

        areas
            .entry((venue.state, venue.city))
            .or_default()
            .push(AreaVenue {
                id: venue.id,
                name: venue.name,
                num_upcoming_shows,
            });
    }

    Ok(Json(VenueAreasResponse {
        success: true,
        areas: areas
            .into_iter()
            .map(|((state, city), venues)| VenueArea {
                city,
                state,
                venues,
            })
            .collect(),
    }))
}
