// ⚙️ Configuration - JSON file with per-field defaults
//
// {
//   "similarity_threshold": 0.9,
//   "default_servings": 4,
//   "units_file": "units.json",
//   "server_addr": "0.0.0.0:3000"
// }
//
// Every field is optional. Path comes from RECIPE_BOX_CONFIG.

use crate::parser::IngredientParser;
use crate::recipe::RecipePipeline;
use crate::shopping_list::{ShoppingList, DEFAULT_SIMILARITY_THRESHOLD};
use crate::units::UnitTable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "RECIPE_BOX_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    #[serde(default = "default_servings")]
    pub default_servings: u32,

    /// Extra `{"long": "short"}` unit mappings
    #[serde(default)]
    pub units_file: Option<PathBuf>,

    #[serde(default = "default_server_addr")]
    pub server_addr: String,
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_servings() -> u32 {
    4
}

fn default_server_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            similarity_threshold: default_similarity_threshold(),
            default_servings: default_servings(),
            units_file: None,
            server_addr: default_server_addr(),
        }
    }
}

impl Config {
    /// Load from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        if !(0.0..=1.0).contains(&config.similarity_threshold) {
            anyhow::bail!(
                "similarity_threshold must be within [0, 1], got {}",
                config.similarity_threshold
            );
        }

        Ok(config)
    }

    /// Load from $RECIPE_BOX_CONFIG, or defaults when it is unset
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                tracing::info!(path = ?path, "loading config");
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn unit_table(&self) -> Result<UnitTable> {
        match &self.units_file {
            Some(path) => UnitTable::from_file(path),
            None => Ok(UnitTable::new()),
        }
    }

    pub fn pipeline(&self) -> Result<RecipePipeline> {
        let parser = IngredientParser::with_units(self.unit_table()?);
        Ok(RecipePipeline::new(parser).with_default_servings(self.default_servings))
    }

    pub fn shopping_list(&self) -> ShoppingList {
        ShoppingList::with_threshold(self.similarity_threshold)
    }
}
