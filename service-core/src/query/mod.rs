//! Resource query primitives: pagination, search, relation filtering and quiz selection.
//!
//! Every operation here is a pure function over a borrowed slice of records.
//! Nothing is cached between calls, so handlers may invoke them concurrently
//! without synchronization.

pub mod pagination;
pub mod quiz;
pub mod record;
pub mod relation;
pub mod search;

use thiserror::Error;

pub use pagination::{DEFAULT_PAGE_SIZE, Page, paginate};
pub use quiz::{QuizState, next_quiz_question, next_quiz_question_with};
pub use record::{DynamicRecord, Record, RecordId, coerce_id};
pub use relation::{ALL_RELATIONS, filter_by_relation};
pub use search::search;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
