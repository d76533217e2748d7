use crate::models::Ingredient;
use serde::{Deserialize, Deserializer, Serialize};
use service_core::query::RecordId;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDrinkRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,
    #[serde(deserialize_with = "one_or_many")]
    #[validate(length(min = 1, message = "Recipe needs at least one ingredient"), nested)]
    pub recipe: Vec<Ingredient>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDrinkRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_one_or_many")]
    #[validate(length(min = 1, message = "Recipe needs at least one ingredient"), nested)]
    pub recipe: Option<Vec<Ingredient>>,
}

#[derive(Debug, Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct DrinkDeletedResponse {
    pub success: bool,
    pub deleted: RecordId,
}

/// Clients send a recipe either as one ingredient object or as a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Ingredient>, D::Error>
where
    D: Deserializer<'de>,
{
    OneOrMany::<Ingredient>::deserialize(deserializer).map(Vec::from)
}

fn optional_one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<Ingredient>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OneOrMany<Ingredient>>::deserialize(deserializer)?.map(Vec::from))
}
