pub mod drinks;
pub mod health;
pub mod listing;
pub mod shows;
pub mod trivia;

pub use drinks::{create_drink, delete_drink, drinks_detail, list_drinks, update_drink};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use listing::{
    create_entry, delete_entry, get_entry, list_entries, search_entries, update_entry,
    venue_areas, Listing,
};
pub use shows::{create_show, list_shows};
pub use trivia::{
    category_questions, create_question, delete_question, list_categories, list_questions,
    play_quiz, search_questions,
};
