// 🛒 Shopping List - ingredients folded across recipes
//
// Adding an ingredient merges into the FIRST existing item whose text is
// similar enough (Dice > threshold) and whose unit matches exactly.
// First match wins, not best match: merges depend on list order.

use crate::error::ListError;
use crate::parser::Ingredient;
use crate::recipe::Recipe;
use crate::similarity;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Similarity an item must exceed to absorb a new ingredient
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.9;

// ============================================================================
// SHOPPING LIST ITEM
// ============================================================================

/// A copy of an ingredient, independently editable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Unique per item (UUID v4)
    pub id: String,
    pub count: f64,
    pub unit: String,
    pub ingredient: String,
}

impl ShoppingListItem {
    fn from_ingredient(ingredient: &Ingredient) -> Self {
        ShoppingListItem {
            id: uuid::Uuid::new_v4().to_string(),
            count: ingredient.count,
            unit: ingredient.unit.clone(),
            ingredient: ingredient.ingredient.clone(),
        }
    }
}

/// What `add_item` did
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// Count accumulated into the existing item with this id
    Merged(String),

    /// New item appended with this id
    Created(String),
}

impl AddOutcome {
    pub fn id(&self) -> &str {
        match self {
            AddOutcome::Merged(id) | AddOutcome::Created(id) => id,
        }
    }
}

// ============================================================================
// SHOPPING LIST
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,

    #[serde(default = "default_threshold")]
    similarity_threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_SIMILARITY_THRESHOLD)
    }

    pub fn with_threshold(similarity_threshold: f64) -> Self {
        ShoppingList {
            items: Vec::new(),
            similarity_threshold,
        }
    }

    /// Fold one ingredient into the list. Not idempotent: repeats accumulate.
    pub fn add_item(&mut self, ingredient: &Ingredient) -> AddOutcome {
        let threshold = self.similarity_threshold;

        let existing = self.items.iter_mut().find(|item| {
            item.unit == ingredient.unit
                && similarity::compare(&ingredient.ingredient, &item.ingredient) > threshold
        });

        match existing {
            Some(item) => {
                item.count += ingredient.count;
                tracing::debug!(
                    id = %item.id,
                    ingredient = %item.ingredient,
                    count = item.count,
                    "merged into shopping list item"
                );
                AddOutcome::Merged(item.id.clone())
            }
            None => {
                let item = ShoppingListItem::from_ingredient(ingredient);
                let id = item.id.clone();
                tracing::debug!(id = %id, ingredient = %item.ingredient, "new shopping list item");
                self.items.push(item);
                AddOutcome::Created(id)
            }
        }
    }

    /// Fold every ingredient of a recipe, in recipe order
    pub fn add_recipe(&mut self, recipe: &Recipe) -> Vec<AddOutcome> {
        recipe
            .ingredients
            .iter()
            .map(|ingredient| self.add_item(ingredient))
            .collect()
    }

    /// Remove the item with `id`, returning it
    pub fn delete_item(&mut self, id: &str) -> Result<ShoppingListItem, ListError> {
        let index = self
            .position(id)
            .ok_or_else(|| ListError::NotFound(id.to_string()))?;

        Ok(self.items.remove(index))
    }

    /// Overwrite an item's count directly, without any merging
    pub fn update_count(&mut self, id: &str, count: f64) -> Result<(), ListError> {
        if !count.is_finite() || count < 0.0 {
            return Err(ListError::InvalidCount(count));
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ListError::NotFound(id.to_string()))?;

        item.count = count;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items in insertion order, for a full redraw
    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    /// Export as CSV with an `id,count,unit,ingredient` header
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        for item in &self.items {
            writer
                .serialize(item)
                .with_context(|| format!("Failed to write item {}", item.id))?;
        }

        let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
        String::from_utf8(bytes).context("CSV output is not UTF-8")
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl Default for ShoppingList {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(count: f64, unit: &str, text: &str) -> Ingredient {
        Ingredient::new(count, unit, text)
    }

    #[test]
    fn test_same_ingredient_merges() {
        let mut list = ShoppingList::new();

        let first = list.add_item(&ingredient(1.0, "cup", "flour"));
        let second = list.add_item(&ingredient(2.0, "cup", "flour"));

        assert!(matches!(first, AddOutcome::Created(_)));
        assert_eq!(second, AddOutcome::Merged(first.id().to_string()));
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].count, 3.0);
    }

    #[test]
    fn test_similar_text_same_unit_merges() {
        let mut list = ShoppingList::new();

        list.add_item(&ingredient(1.0, "cup", "chopped fresh parsley leaves"));
        list.add_item(&ingredient(0.5, "cup", "chopped fresh parsley leave"));

        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].count, 1.5);
        assert_eq!(list.items()[0].ingredient, "chopped fresh parsley leaves");
    }

    #[test]
    fn test_similar_text_different_unit_does_not_merge() {
        let mut list = ShoppingList::new();

        list.add_item(&ingredient(1.0, "cup", "chopped fresh parsley leaves"));
        list.add_item(&ingredient(2.0, "tbsp", "chopped fresh parsley leave"));

        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[0].count, 1.0);
        assert_eq!(list.items()[1].unit, "tbsp");
    }

    #[test]
    fn test_dissimilar_text_does_not_merge() {
        let mut list = ShoppingList::new();

        list.add_item(&ingredient(1.0, "", "salt"));
        list.add_item(&ingredient(1.0, "", "malt"));

        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_first_match_wins_not_best_match() {
        let mut list = ShoppingList::new();

        // Close (0.98) first, identical second: the close one absorbs the count
        for (id, text) in [
            ("close", "chopped fresh parsley leave"),
            ("exact", "chopped fresh parsley leaves"),
        ] {
            list.items.push(ShoppingListItem {
                id: id.to_string(),
                count: 1.0,
                unit: "cup".to_string(),
                ingredient: text.to_string(),
            });
        }

        let outcome = list.add_item(&ingredient(2.0, "cup", "chopped fresh parsley leaves"));

        assert_eq!(outcome, AddOutcome::Merged("close".to_string()));
        assert_eq!(list.get("close").unwrap().count, 3.0);
        assert_eq!(list.get("exact").unwrap().count, 1.0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut list = ShoppingList::new();

        list.add_item(&ingredient(1.0, "cup", "flour"));
        list.add_item(&ingredient(2.0, "", "eggs"));
        list.add_item(&ingredient(1.0, "tsp", "vanilla extract"));

        let names: Vec<&str> = list.items().iter().map(|i| i.ingredient.as_str()).collect();
        assert_eq!(names, vec!["flour", "eggs", "vanilla extract"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut list = ShoppingList::new();

        let a = list.add_item(&ingredient(1.0, "cup", "flour"));
        let b = list.add_item(&ingredient(1.0, "cup", "sugar"));

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_delete_item() {
        let mut list = ShoppingList::new();
        let id = list.add_item(&ingredient(1.0, "cup", "flour")).id().to_string();
        list.add_item(&ingredient(2.0, "", "eggs"));

        let removed = list.delete_item(&id).unwrap();

        assert_eq!(removed.ingredient, "flour");
        assert_eq!(list.len(), 1);
        assert!(list.get(&id).is_none());
    }

    #[test]
    fn test_delete_unknown_id_leaves_list_unchanged() {
        let mut list = ShoppingList::new();
        list.add_item(&ingredient(1.0, "cup", "flour"));
        let before = list.items().to_vec();

        let result = list.delete_item("missing");

        assert_eq!(result, Err(ListError::NotFound("missing".to_string())));
        assert_eq!(list.items(), before.as_slice());
    }

    #[test]
    fn test_update_count_overwrites() {
        let mut list = ShoppingList::new();
        let id = list.add_item(&ingredient(1.0, "cup", "flour")).id().to_string();

        list.update_count(&id, 5.0).unwrap();

        assert_eq!(list.get(&id).unwrap().count, 5.0);
    }

    #[test]
    fn test_update_count_unknown_id() {
        let mut list = ShoppingList::new();

        assert_eq!(
            list.update_count("missing", 2.0),
            Err(ListError::NotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_update_count_rejects_negative() {
        let mut list = ShoppingList::new();
        let id = list.add_item(&ingredient(1.0, "cup", "flour")).id().to_string();

        assert_eq!(list.update_count(&id, -1.0), Err(ListError::InvalidCount(-1.0)));
        assert_eq!(list.get(&id).unwrap().count, 1.0);
    }

    #[test]
    fn test_to_csv() {
        let mut list = ShoppingList::new();
        let id = list.add_item(&ingredient(1.5, "cup", "flour")).id().to_string();

        let csv = list.to_csv().unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("id,count,unit,ingredient"));
        assert_eq!(lines.next(), Some(format!("{},1.5,cup,flour", id).as_str()));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_serde_round_trip_keeps_threshold() {
        let mut list = ShoppingList::with_threshold(0.75);
        list.add_item(&ingredient(1.0, "cup", "flour"));

        let json = serde_json::to_string(&list).unwrap();
        let restored: ShoppingList = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.items(), list.items());
        assert_eq!(restored.similarity_threshold(), 0.75);
    }
}
