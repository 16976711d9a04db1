// ⚖️ Serving Scaler - proportional rescaling of ingredient counts
//
// count *= new / old, no rounding here (display formatting rounds).
// Up then down returns the starting counts modulo float drift.

use crate::error::ServingsError;
use crate::recipe::Recipe;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// DIRECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServingDirection {
    Increase,
    Decrease,
}

impl FromStr for ServingDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inc" | "increase" => Ok(ServingDirection::Increase),
            "dec" | "decrease" => Ok(ServingDirection::Decrease),
            other => Err(format!("unknown serving direction: {}", other)),
        }
    }
}

// ============================================================================
// RESCALE
// ============================================================================

/// Move servings one step and rescale every count. Returns the new servings.
///
/// Decreasing from 1 or increasing past `u32::MAX` is rejected and leaves the
/// recipe untouched.
pub fn rescale(recipe: &mut Recipe, direction: ServingDirection) -> Result<u32, ServingsError> {
    let current = recipe.servings;

    let new_servings = match direction {
        ServingDirection::Increase => match current.checked_add(1) {
            Some(next) => next,
            None => {
                tracing::warn!(recipe = %recipe.id, current, "rejected serving increase past maximum");
                return Err(ServingsError::AboveMaximum { current });
            }
        },
        ServingDirection::Decrease if current <= 1 => {
            tracing::warn!(recipe = %recipe.id, current, "rejected serving decrease below 1");
            return Err(ServingsError::BelowMinimum { current });
        }
        ServingDirection::Decrease => current - 1,
    };

    let factor = f64::from(new_servings) / f64::from(current);
    for ingredient in &mut recipe.ingredients {
        ingredient.count *= factor;
    }
    recipe.servings = new_servings;

    Ok(new_servings)
}

// ============================================================================
// TESTS
// ============================================================================
