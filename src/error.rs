// Error types shared across the recipe core
//
// Parse failures stay inside the parser (see `IngredientParser::parse`);
// everything here that crosses a module boundary is a structural failure the
// caller has to decide how to present.

use thiserror::Error;

/// Why a single ingredient line could not be turned into a structured record.
///
/// Never escapes `IngredientParser::parse`, which maps it to the unparseable
/// sentinel. Exposed for `IngredientParser::try_parse`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty quantity before unit '{unit}'")]
    MissingQuantity { unit: String },

    #[error("invalid quantity term '{0}'")]
    InvalidQuantity(String),

    #[error("division by zero in quantity '{0}'")]
    DivisionByZero(String),

    #[error("ingredient line is empty")]
    EmptyLine,
}

/// Failures of the recipe pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecipeError {
    /// Every ingredient line failed to parse; the recipe is dropped.
    #[error("recipe {uri} has no parseable ingredients")]
    NoIngredients { uri: String },

    /// The uri carries no id after its last underscore.
    #[error("recipe uri '{0}' has no id segment")]
    InvalidUri(String),

    #[error("recipe {uri} has invalid yield {value}")]
    InvalidYield { uri: String, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServingsError {
    #[error("cannot decrease servings below 1 (currently {current})")]
    BelowMinimum { current: u32 },

    #[error("cannot increase servings above {current}")]
    AboveMaximum { current: u32 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListError {
    #[error("shopping list item not found: {0}")]
    NotFound(String),

    #[error("invalid count {0}")]
    InvalidCount(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LikesError {
    #[error("like not found: {0}")]
    NotFound(String),

    #[error("recipe already liked: {0}")]
    AlreadyLiked(String),
}
