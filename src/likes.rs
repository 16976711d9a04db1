// ❤️ Likes - saved recipes
//
// Persisted as a flat JSON array of records, no versioning.

use crate::error::LikesError;
use crate::recipe::Recipe;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    /// Recipe id
    pub id: String,
    pub title: String,
    pub image: String,

    #[serde(default)]
    pub diet_labels: Vec<String>,

    #[serde(default)]
    pub health_labels: Vec<String>,

    #[serde(default)]
    pub cautions: Vec<String>,

    #[serde(default = "Utc::now")]
    pub liked_at: DateTime<Utc>,
}

impl Like {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Like {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            diet_labels: recipe.diet_labels.clone(),
            health_labels: recipe.health_labels.clone(),
            cautions: recipe.cautions.clone(),
            liked_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Likes {
    likes: Vec<Like>,
}

impl Likes {
    pub fn new() -> Self {
        Likes { likes: Vec::new() }
    }

    /// Add a like; each recipe can be liked once
    pub fn add_like(&mut self, like: Like) -> Result<&Like, LikesError> {
        if self.is_liked(&like.id) {
            return Err(LikesError::AlreadyLiked(like.id));
        }

        self.likes.push(like);
        Ok(&self.likes[self.likes.len() - 1])
    }

    pub fn delete_like(&mut self, id: &str) -> Result<Like, LikesError> {
        let index = self
            .likes
            .iter()
            .position(|like| like.id == id)
            .ok_or_else(|| LikesError::NotFound(id.to_string()))?;

        Ok(self.likes.remove(index))
    }

    /// Like the recipe if it is not liked yet, otherwise unlike it.
    /// Returns whether the recipe is liked afterwards.
    pub fn toggle(&mut self, recipe: &Recipe) -> bool {
        if self.delete_like(&recipe.id).is_ok() {
            return false;
        }

        self.likes.push(Like::from_recipe(recipe));
        true
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|like| like.id == id)
    }

    pub fn count(&self) -> usize {
        self.likes.len()
    }

    pub fn all(&self) -> &[Like] {
        &self.likes
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize likes")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse likes JSON")
    }
}
