use serde::{Deserialize, Serialize};
use service_core::query::{Record, RecordId};
use service_core::store::Entity;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Ingredient {
    #[validate(length(min = 1, message = "Ingredient name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Ingredient color cannot be empty"))]
    pub color: String,
    #[validate(range(min = 1, message = "Ingredient parts must be at least 1"))]
    pub parts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub id: RecordId,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Public view: recipe colors and proportions without ingredient names.
#[derive(Debug, Serialize)]
pub struct DrinkShort {
    pub id: RecordId,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

#[derive(Debug, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// Full view for callers holding `get:drinks-detail`.
#[derive(Debug, Serialize)]
pub struct DrinkLong {
    pub id: RecordId,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|i| ShortIngredient {
                    color: i.color.clone(),
                    parts: i.parts,
                })
                .collect(),
        }
    }

    pub fn long(&self) -> DrinkLong {
        DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.clone(),
        }
    }
}

impl Record for Drink {
    fn id(&self) -> RecordId {
        self.id
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        (name == "title").then_some(self.title.as_str())
    }
}

impl Entity for Drink {
    const COLLECTION: &'static str = "drinks";

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_white() -> Drink {
        Drink {
            id: 1,
            title: "Flat White".to_string(),
            recipe: vec![
                Ingredient {
                    name: "espresso".to_string(),
                    color: "brown".to_string(),
                    parts: 1,
                },
                Ingredient {
                    name: "milk".to_string(),
                    color: "white".to_string(),
                    parts: 2,
                },
            ],
        }
    }

    #[test]
    fn test_short_hides_ingredient_names() {
        let short = serde_json::to_value(flat_white().short()).unwrap();
        assert_eq!(short["recipe"][1]["color"], "white");
        assert_eq!(short["recipe"][1]["parts"], 2);
        assert!(short["recipe"][1].get("name").is_none());
    }

    #[test]
    fn test_long_keeps_full_recipe() {
        let long = serde_json::to_value(flat_white().long()).unwrap();
        assert_eq!(long["title"], "Flat White");
        assert_eq!(long["recipe"][0]["name"], "espresso");
    }
}
