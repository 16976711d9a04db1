// 📖 Recipe Pipeline - upstream recipe metadata → parsed Recipe
//
// Raw ingredient lines go through the IngredientParser; unparseable lines
// are filtered out and a recipe left with no ingredients is dropped.
// Malformed metadata (no id in the uri, yield < 1) fails fast.

use crate::error::{RecipeError, ServingsError};
use crate::parser::{Ingredient, IngredientParser};
use crate::servings::{self, ServingDirection};
use serde::{Deserialize, Serialize};

/// Minutes per group of three ingredients when no total time is given
const MINUTES_PER_PERIOD: u32 = 15;
const INGREDIENTS_PER_PERIOD: usize = 3;

// ============================================================================
// RAW RECIPE (as handed over by the fetching collaborator)
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipe {
    /// e.g. "http://www.edamam.com/ontologies/edamam.owl#recipe_b79327d05b8e"
    pub uri: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub url: String,

    /// Declared servings; absent means "use the configured default"
    #[serde(default, rename = "yield")]
    pub yield_: Option<f64>,

    pub ingredient_lines: Vec<String>,

    /// Minutes; 0 or absent means unknown
    #[serde(default)]
    pub total_time: Option<f64>,

    #[serde(default)]
    pub diet_labels: Vec<String>,

    #[serde(default)]
    pub health_labels: Vec<String>,

    #[serde(default)]
    pub cautions: Vec<String>,
}

// ============================================================================
// RECIPE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Substring of the uri after its last underscore
    pub id: String,
    pub title: String,
    pub image: String,
    pub url: String,

    /// Always ≥ 1
    pub servings: u32,

    /// Minutes
    pub cooking_time: u32,

    /// Never empty
    pub ingredients: Vec<Ingredient>,

    pub diet_labels: Vec<String>,
    pub health_labels: Vec<String>,
    pub cautions: Vec<String>,
}

impl Recipe {
    /// Change servings by one step, rescaling every count
    pub fn update_servings(&mut self, direction: ServingDirection) -> Result<u32, ServingsError> {
        servings::rescale(self, direction)
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

#[derive(Debug, Clone)]
pub struct RecipePipeline {
    parser: IngredientParser,

    /// Servings used when the upstream yield is absent
    pub default_servings: u32,
}

impl RecipePipeline {
    pub fn new(parser: IngredientParser) -> Self {
        RecipePipeline {
            parser,
            default_servings: 4,
        }
    }

    pub fn with_default_servings(mut self, default_servings: u32) -> Self {
        self.default_servings = default_servings.max(1);
        self
    }

    pub fn parser(&self) -> &IngredientParser {
        &self.parser
    }

    /// Turn one raw recipe into a Recipe
    pub fn prepare(&self, raw: &RawRecipe) -> Result<Recipe, RecipeError> {
        let id = recipe_id(&raw.uri)?;
        let servings = self.servings(raw)?;

        let ingredients: Vec<Ingredient> = self
            .parser
            .parse_all(&raw.ingredient_lines)
            .into_iter()
            .filter(|ingredient| !ingredient.is_unparseable())
            .collect();

        if ingredients.is_empty() {
            return Err(RecipeError::NoIngredients {
                uri: raw.uri.clone(),
            });
        }

        Ok(Recipe {
            id,
            title: raw.label.clone(),
            image: raw.image.clone(),
            url: raw.url.clone(),
            servings,
            cooking_time: cooking_time(raw),
            ingredients,
            diet_labels: raw.diet_labels.clone(),
            health_labels: raw.health_labels.clone(),
            cautions: raw.cautions.clone(),
        })
    }

    /// Prepare a batch. Recipes without ingredients are dropped; any other
    /// failure aborts the whole batch.
    pub fn prepare_all(&self, raws: &[RawRecipe]) -> Result<Vec<Recipe>, RecipeError> {
        let mut recipes = Vec::with_capacity(raws.len());

        for raw in raws {
            match self.prepare(raw) {
                Ok(recipe) => recipes.push(recipe),
                Err(RecipeError::NoIngredients { uri }) => {
                    tracing::info!(%uri, "dropping recipe with no parseable ingredients");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(recipes)
    }

    fn servings(&self, raw: &RawRecipe) -> Result<u32, RecipeError> {
        match raw.yield_ {
            None => Ok(self.default_servings),
            Some(value)
                if value.is_finite()
                    && value.round() >= 1.0
                    && value.round() <= f64::from(u32::MAX) =>
            {
                Ok(value.round() as u32)
            }
            Some(value) => Err(RecipeError::InvalidYield {
                uri: raw.uri.clone(),
                value,
            }),
        }
    }
}

impl Default for RecipePipeline {
    fn default() -> Self {
        Self::new(IngredientParser::new())
    }
}

/// Id = everything after the last underscore of the uri
pub fn recipe_id(uri: &str) -> Result<String, RecipeError> {
    match uri.rsplit_once('_') {
        Some((_, id)) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(RecipeError::InvalidUri(uri.to_string())),
    }
}

/// Upstream total time, or 15 minutes per started group of three ingredients
fn cooking_time(raw: &RawRecipe) -> u32 {
    match raw.total_time {
        Some(minutes) if minutes.is_finite() && minutes > 0.0 => minutes.round() as u32,
        _ => {
            let periods = raw.ingredient_lines.len().div_ceil(INGREDIENTS_PER_PERIOD);
            periods as u32 * MINUTES_PER_PERIOD
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
