// End-to-end: upstream JSON → recipes → servings → shopping list

use recipe_box::{
    format_count, AddOutcome, Ingredient, Likes, RawRecipe, RecipePipeline, ServingDirection,
    ShoppingList,
};

fn load_fixture() -> Vec<RawRecipe> {
    serde_json::from_str(include_str!("../fixtures/recipes.json")).unwrap()
}

#[test]
fn test_fixture_recipes_prepared() {
    let pipeline = RecipePipeline::default();
    let recipes = pipeline.prepare_all(&load_fixture()).unwrap();

    // "Nothing Usable" has no parseable lines and is dropped
    assert_eq!(recipes.len(), 2);

    let teriyaki = &recipes[0];
    assert_eq!(teriyaki.id, "7bf4a371c6884d809682a72808da7dc2");
    assert_eq!(teriyaki.servings, 4);
    assert_eq!(teriyaki.cooking_time, 40);
    assert_eq!(
        teriyaki.ingredients,
        vec![
            Ingredient::new(2.0, "lbs", "boneless chicken thighs"),
            Ingredient::new(0.5, "cup", "soy sauce"),
            Ingredient::new(2.0, "tbsp", "brown sugar"),
            Ingredient::new(1.0, "", "piece fresh ginger, grated"),
            Ingredient::new(1.0, "", "salt to taste"),
        ]
    );

    let fried_rice = &recipes[1];
    assert_eq!(fried_rice.servings, 2);
    // No totalTime: 4 ingredients → 2 periods of 15 minutes
    assert_eq!(fried_rice.cooking_time, 30);
    assert_eq!(fried_rice.ingredients[2], Ingredient::new(1.5, "tbsp", "brown sugar"));
}

#[test]
fn test_shopping_list_across_recipes() {
    let pipeline = RecipePipeline::default();
    let recipes = pipeline.prepare_all(&load_fixture()).unwrap();
    let mut list = ShoppingList::new();

    list.add_recipe(&recipes[0]);
    let outcomes = list.add_recipe(&recipes[1]);

    // brown sugar (tbsp) merges; soy sauce in tbsp does not merge with soy sauce in cups
    assert!(matches!(outcomes[0], AddOutcome::Created(_)));
    assert!(matches!(outcomes[1], AddOutcome::Created(_)));
    assert!(matches!(outcomes[2], AddOutcome::Merged(_)));
    assert!(matches!(outcomes[3], AddOutcome::Created(_)));
    assert_eq!(list.len(), 8);

    let sugar = list.get(outcomes[2].id()).unwrap();
    assert_eq!(sugar.ingredient, "brown sugar");
    assert_eq!(sugar.count, 3.5);

    let soy: Vec<&str> = list
        .items()
        .iter()
        .filter(|item| item.ingredient == "soy sauce")
        .map(|item| item.unit.as_str())
        .collect();
    assert_eq!(soy, vec!["cup", "tbsp"]);
}

#[test]
fn test_rescale_then_add_to_list() {
    let pipeline = RecipePipeline::default();
    let mut recipes = pipeline.prepare_all(&load_fixture()).unwrap();
    let teriyaki = &mut recipes[0];

    teriyaki.update_servings(ServingDirection::Increase).unwrap();
    assert_eq!(teriyaki.servings, 5);
    assert_eq!(format_count(teriyaki.ingredients[0].count), "2 1/2");

    let mut list = ShoppingList::new();
    list.add_recipe(teriyaki);
    list.add_recipe(teriyaki);

    // Not idempotent: the second add doubles every count
    assert_eq!(list.len(), 5);
    assert!((list.items()[0].count - 5.0).abs() < 1e-9);
}

#[test]
fn test_edit_and_delete_items() {
    let pipeline = RecipePipeline::default();
    let recipes = pipeline.prepare_all(&load_fixture()).unwrap();
    let mut list = ShoppingList::new();
    list.add_recipe(&recipes[1]);

    let eggs = list.items()[3].id.clone();
    list.update_count(&eggs, 12.0).unwrap();
    assert_eq!(list.get(&eggs).unwrap().count, 12.0);

    list.delete_item(&eggs).unwrap();
    assert!(list.delete_item(&eggs).is_err());
    assert_eq!(list.len(), 3);
}

#[test]
fn test_likes_survive_json() {
    let pipeline = RecipePipeline::default();
    let recipes = pipeline.prepare_all(&load_fixture()).unwrap();
    let mut likes = Likes::new();

    assert!(likes.toggle(&recipes[0]));
    assert!(likes.toggle(&recipes[1]));

    let restored = Likes::from_json(&likes.to_json().unwrap()).unwrap();

    assert_eq!(restored.count(), 2);
    assert!(restored.is_liked(&recipes[1].id));
    assert_eq!(restored.all()[0].cautions, vec!["Soy"]);
}
