use super::{relation_id, relation_ids};
use crate::models::Question;
use serde::{Deserialize, Serialize};
use service_core::query::RecordId;
use std::collections::BTreeMap;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, message = "Question cannot be empty"))]
    pub question: String,
    #[validate(length(min = 1, message = "Answer cannot be empty"))]
    pub answer: String,
    #[serde(deserialize_with = "relation_id")]
    #[validate(range(min = 1, message = "Category must be a valid category id"))]
    pub category: RecordId,
    #[validate(range(min = 1, max = 5, message = "Difficulty must be between 1 and 5"))]
    pub difficulty: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuestionsRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct QuizRequest {
    #[serde(default, deserialize_with = "relation_ids")]
    pub previous_questions: Vec<RecordId>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    #[serde(deserialize_with = "relation_id")]
    pub id: RecordId,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<RecordId, String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<RecordId>,
    pub categories: BTreeMap<RecordId, String>,
}

/// Search and per-category listings.
#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<RecordId>,
}

#[derive(Debug, Serialize)]
pub struct QuestionCreatedResponse {
    pub success: bool,
    pub created: RecordId,
    pub question_created: String,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct QuestionDeletedResponse {
    pub success: bool,
    pub deleted: RecordId,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}
