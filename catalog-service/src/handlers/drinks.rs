use crate::dtos::{CreateDrinkRequest, DrinkDeletedResponse, DrinksResponse, UpdateDrinkRequest};
use crate::models::Drink;
use crate::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use service_core::extract::{Path, ValidatedJson};
use service_core::middleware::Claims;
use service_core::query::RecordId;

/// Titles are unique, compared case-insensitively.
async fn ensure_unique_title(
    state: &AppState,
    title: &str,
    own_id: Option<RecordId>,
) -> Result<(), AppError> {
    let taken = state
        .drinks
        .list()
        .await?
        .iter()
        .any(|d| Some(d.id) != own_id && d.title.eq_ignore_ascii_case(title));

    if taken {
        return Err(AppError::Unprocessable(anyhow::anyhow!(
            "A drink titled \"{}\" already exists",
            title
        )));
    }
    Ok(())
}

pub async fn list_drinks(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let drinks = state.drinks.list().await?;
    if drinks.is_empty() {
        return Err(AppError::not_found());
    }

    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(Drink::short).collect(),
    }))
}

pub async fn drinks_detail(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let drinks = state.drinks.list().await?;
    if drinks.is_empty() {
        return Err(AppError::not_found());
    }

    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(Drink::long).collect(),
    }))
}

pub async fn create_drink(
    State(state): State<AppState>,
    Claims(claim): Claims,
    ValidatedJson(request): ValidatedJson<CreateDrinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_unique_title(&state, &request.title, None).await?;

    let drink = state
        .drinks
        .insert(Drink {
            id: 0,
            title: request.title,
            recipe: request.recipe,
        })
        .await?;

    tracing::info!(
        drink_id = drink.id,
        subject = claim.subject().unwrap_or("-"),
        "Drink created"
    );

    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink.long()],
    }))
}

pub async fn update_drink(
    State(state): State<AppState>,
    Path(drink_id): Path<RecordId>,
    ValidatedJson(request): ValidatedJson<UpdateDrinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut drink = state
        .drinks
        .get(drink_id)
        .await?
        .ok_or_else(AppError::not_found)?;

    if let Some(title) = request.title {
        ensure_unique_title(&state, &title, Some(drink_id)).await?;
        drink.title = title;
    }
    if let Some(recipe) = request.recipe {
        drink.recipe = recipe;
    }

    let drink = state.drinks.update(drink).await?;
    tracing::info!(drink_id, "Drink updated");

    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink.long()],
    }))
}

pub async fn delete_drink(
    State(state): State<AppState>,
    Path(drink_id): Path<RecordId>,
) -> Result<impl IntoResponse, AppError> {
    if !state.drinks.delete(drink_id).await? {
        return Err(AppError::not_found());
    }

    tracing::info!(drink_id, "Drink deleted");

    Ok(Json(DrinkDeletedResponse {
        success: true,
        deleted: drink_id,
    }))
}
