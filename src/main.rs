use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use recipe_box::{format_count, Config, RawRecipe, Recipe, RecipePipeline};

const USAGE: &str = "\
Usage:
  recipe-box line <text>            Parse one ingredient line
  recipe-box parse <recipes.json>   Parse recipe(s) and print ingredients
  recipe-box list <recipes.json>... Build a shopping list, CSV on stdout";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = Config::from_env()?;

    match args.split_first() {
        Some((command, rest)) if command == "line" && !rest.is_empty() => {
            run_line(&config, &rest.join(" "))
        }
        Some((command, [file])) if command == "parse" => run_parse(&config, Path::new(file)),
        Some((command, files)) if command == "list" && !files.is_empty() => {
            run_list(&config, files)
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

fn run_line(config: &Config, line: &str) -> Result<()> {
    let pipeline = config.pipeline()?;

    match pipeline.parser().try_parse(line) {
        Ok(ingredient) => println!("{}", serde_json::to_string_pretty(&ingredient)?),
        Err(e) => println!("unparseable: {}", e),
    }

    Ok(())
}

fn run_parse(config: &Config, path: &Path) -> Result<()> {
    let pipeline = config.pipeline()?;
    let recipes = load_recipes(&pipeline, path)?;

    for recipe in &recipes {
        println!("{} ({} servings, {} min)", recipe.title, recipe.servings, recipe.cooking_time);
        for ingredient in &recipe.ingredients {
            println!(
                "  {:>6} {:<5} {}",
                format_count(ingredient.count),
                ingredient.unit,
                ingredient.ingredient
            );
        }
        println!();
    }

    Ok(())
}

fn run_list(config: &Config, files: &[String]) -> Result<()> {
    let pipeline = config.pipeline()?;
    let mut list = config.shopping_list();

    for file in files {
        for recipe in load_recipes(&pipeline, Path::new(file))? {
            list.add_recipe(&recipe);
        }
    }

    tracing::info!(items = list.len(), "shopping list built");
    print!("{}", list.to_csv()?);

    Ok(())
}

/// A file holds either one upstream recipe object or an array of them
fn load_recipes(pipeline: &RecipePipeline, path: &Path) -> Result<Vec<Recipe>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipe file: {:?}", path))?;

    let parsed = if content.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<RawRecipe>>(&content)
    } else {
        serde_json::from_str::<RawRecipe>(&content).map(|raw| vec![raw])
    };
    let raws = parsed.with_context(|| format!("Failed to parse recipe JSON: {:?}", path))?;

    let recipes = pipeline
        .prepare_all(&raws)
        .with_context(|| format!("Invalid recipe in {:?}", path))?;

    tracing::info!(
        file = ?path,
        loaded = raws.len(),
        kept = recipes.len(),
        "recipes prepared"
    );
    Ok(recipes)
}
