// Recipe Box - Core Library
// Ingredient parsing, serving rescaling and shopping-list aggregation

pub mod config;
pub mod display;
pub mod error;
pub mod likes;
pub mod parser;
pub mod recipe;
pub mod servings;
pub mod shopping_list;
pub mod similarity;
pub mod units;

// Re-export commonly used types
pub use config::Config;
pub use display::{format_count, limit_title, DEFAULT_TITLE_LIMIT};
pub use error::{LikesError, ListError, ParseError, RecipeError, ServingsError};
pub use likes::{Like, Likes};
pub use parser::{Ingredient, IngredientParser};
pub use recipe::{RawRecipe, Recipe, RecipePipeline};
pub use servings::{rescale, ServingDirection};
pub use shopping_list::{AddOutcome, ShoppingList, ShoppingListItem};
pub use units::{UnitTable, CANONICAL_UNITS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
