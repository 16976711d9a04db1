// 📏 Unit Table - long-form unit spellings → canonical short forms
//
// "tablespoons", "tablespoon", "tbsps" → "tbsp"
// Many-to-one, lookup is case-sensitive on already-lowercased tokens.

use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

// ============================================================================
// DEFAULTS
// ============================================================================

/// Canonical short forms recognized as units by the parser.
pub const CANONICAL_UNITS: &[&str] = &["tbsp", "oz", "tsp", "cup", "lbs", "g", "ml", "kg"];

const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("tbsps", "tbsp"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("ozs", "oz"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("tsps", "tsp"),
    ("cups", "cup"),
    ("pounds", "lbs"),
    ("pound", "lbs"),
    ("lb", "lbs"),
    ("grams", "g"),
    ("gram", "g"),
    ("kilograms", "kg"),
    ("kilogram", "kg"),
    ("milliliters", "ml"),
    ("milliliter", "ml"),
    ("millilitres", "ml"),
    ("millilitre", "ml"),
];

// ============================================================================
// UNIT TABLE
// ============================================================================

#[derive(Debug, Clone)]
pub struct UnitTable {
    /// long form → canonical short form
    mappings: HashMap<String, String>,

    /// Every short form a token may match exactly to count as a unit
    canonical: BTreeSet<String>,
}

impl UnitTable {
    /// Table with the built-in mappings
    pub fn new() -> Self {
        let mut table = UnitTable {
            mappings: HashMap::new(),
            canonical: CANONICAL_UNITS.iter().map(|u| u.to_string()).collect(),
        };

        for (long, short) in DEFAULT_MAPPINGS {
            table.insert(long, short);
        }

        table
    }

    /// Load extra mappings from a JSON object (`{"long": "short"}`) on top of the defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read units file: {:?}", path.as_ref()))?;

        let extra: HashMap<String, String> =
            serde_json::from_str(&content).context("Failed to parse units JSON")?;

        let mut table = UnitTable::new();
        for (long, short) in &extra {
            table.insert(long, short);
        }

        tracing::debug!(count = extra.len(), "loaded unit overrides");
        Ok(table)
    }

    /// Add a mapping. The short form becomes a recognized unit.
    pub fn insert(&mut self, long: &str, short: &str) {
        let long = long.to_lowercase();
        let short = short.to_lowercase();

        self.canonical.insert(short.clone());
        if long != short {
            self.mappings.insert(long, short);
        }
    }

    /// Canonical form of `token`, or `token` unchanged if it is not a known long form
    pub fn lookup<'a>(&'a self, token: &'a str) -> &'a str {
        self.mappings.get(token).map(String::as_str).unwrap_or(token)
    }

    /// Does `token` exactly match a canonical unit?
    pub fn is_canonical(&self, token: &str) -> bool {
        self.canonical.contains(token)
    }

    pub fn canonical_units(&self) -> impl Iterator<Item = &str> {
        self.canonical.iter().map(String::as_str)
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
