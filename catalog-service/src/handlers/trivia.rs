use crate::dtos::{
    CategoriesResponse, CreateQuestionRequest, PageParams, QuestionCreatedResponse,
    QuestionDeletedResponse, QuestionPageResponse, QuestionsResponse, QuizRequest, QuizResponse,
    SearchQuestionsRequest,
};
use crate::models::Question;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use service_core::extract::{Path, Query, ValidatedJson};
use service_core::query::{
    filter_by_relation, paginate, search, QuizState, RecordId, ALL_RELATIONS,
};
use std::collections::BTreeMap;

async fn category_map(state: &AppState) -> Result<BTreeMap<RecordId, String>, AppError> {
    Ok(state
        .categories
        .list()
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect())
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = category_map(&state).await?;
    if categories.is_empty() {
        return Err(AppError::not_found());
    }

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let questions = state.questions.list().await?;
    let page = paginate(&questions, params.page, state.page_size)?;

    if page.is_empty() {
        return Err(AppError::not_found());
    }

    Ok(Json(QuestionPageResponse {
        success: true,
        total_questions: page.total_items,
        questions: page.items,
        current_category: None,
        categories: category_map(&state).await?,
    }))
}

pub async fn create_question(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.categories.get(request.category).await?.is_none() {
        return Err(AppError::Unprocessable(anyhow::anyhow!(
            "Category {} does not exist",
            request.category
        )));
    }

    let question = state
        .questions
        .insert(Question {
            id: 0,
            question: request.question,
            answer: request.answer,
            category: request.category,
            difficulty: request.difficulty,
        })
        .await?;

    tracing::info!(
        question_id = question.id,
        category = question.category,
        "Question created"
    );

    let questions = state.questions.list().await?;
    let page = paginate(&questions, None, state.page_size)?;

    Ok((
        StatusCode::CREATED,
        Json(QuestionCreatedResponse {
            success: true,
            created: question.id,
            question_created: question.question,
            total_questions: page.total_items,
            questions: page.items,
        }),
    ))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<RecordId>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    if !state.questions.delete(question_id).await? {
        return Err(AppError::not_found());
    }

    tracing::info!(question_id, "Question deleted");

    let questions = state.questions.list().await?;
    let page = paginate(&questions, params.page, state.page_size)?;

    Ok(Json(QuestionDeletedResponse {
        success: true,
        deleted: question_id,
        total_questions: page.total_items,
        questions: page.items,
    }))
}

pub async fn search_questions(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SearchQuestionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let questions = state.questions.list().await?;
    let found = search(&questions, "question", request.search_term.as_deref());

    tracing::debug!(
        term = request.search_term.as_deref().unwrap_or(""),
        matches = found.len(),
        "Question search"
    );

    Ok(Json(QuestionsResponse {
        success: true,
        total_questions: found.len(),
        questions: found,
        current_category: None,
    }))
}

pub async fn category_questions(
    State(state): State<AppState>,
    Path(category_id): Path<RecordId>,
) -> Result<impl IntoResponse, AppError> {
    if category_id != ALL_RELATIONS && state.categories.get(category_id).await?.is_none() {
        return Err(AppError::not_found());
    }

    let questions = state.questions.list().await?;
    let filtered = filter_by_relation(&questions, "category", category_id);

    Ok(Json(QuestionsResponse {
        success: true,
        total_questions: filtered.len(),
        questions: filtered,
        current_category: Some(category_id),
    }))
}

/// Next random question of the chosen category that the player has not seen.
pub async fn play_quiz(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<QuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let category_id = request
        .quiz_category
        .as_ref()
        .map_or(ALL_RELATIONS, |category| category.id);
    let category_name = request
        .quiz_category
        .as_ref()
        .and_then(|category| category.kind.as_deref())
        .unwrap_or("All");

    tracing::debug!(
        category_id,
        category = category_name,
        asked = request.previous_questions.len(),
        "Quiz round"
    );

    let questions = state.questions.list().await?;
    let pool = filter_by_relation(&questions, "category", category_id);
    let quiz = QuizState::new(pool, request.previous_questions);
    let question = quiz.next();

    if question.is_none() {
        tracing::debug!(
            category_id,
            asked = quiz.excluded_ids().len(),
            "Quiz pool exhausted"
        );
    }

    Ok(Json(QuizResponse {
        success: question.is_some(),
        question,
    }))
}
