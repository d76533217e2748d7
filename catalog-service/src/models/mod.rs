pub mod category;
pub mod drink;
pub mod listing;
pub mod question;
pub mod show;

pub use category::{default_categories, Category};
pub use drink::{Drink, DrinkLong, DrinkShort, Ingredient};
pub use listing::{Artist, Venue};
pub use question::Question;
pub use show::Show;
