//! Shopping list run
//!
//! Loads the selected recipes, normalizes and converts their ingredients,
//! drops stop foods and merges everything into one sorted cart.

use serde::Serialize;

use crate::config::RunPaths;
use crate::conversion::{convert_rows, ConversionReport};
use crate::error::ShopResult;
use crate::models::{Cart, IngredientRow};
use crate::output;
use crate::tables::selection::{PANTRY_FILE, RECIPE_LIST_FILE};
use crate::tables::{load_recipe, normalize_key, Pantry, RecipeSelection, ReferenceTables, StopFoods};

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub recipes: Vec<String>,
    pub lines: usize,
    pub stop_foods_skipped: usize,
    pub conversion_warnings: usize,
    pub pantry_items: usize,
}

/// Normalize one recipe's rows and tag them with the recipe name.
///
/// Names and units are lower-cased, generic names and unit synonyms applied,
/// then amounts converted into preferred grocery units.
pub fn prepare_recipe(
    rows: &mut [IngredientRow],
    recipe: &str,
    tables: &ReferenceTables,
) -> ConversionReport {
    for row in rows.iter_mut() {
        row.name = normalize_key(&row.name);
        row.unit = normalize_key(&row.unit);
    }

    tables.generic_names.map_rows(rows);
    tables.unit_names.map_units(rows);
    let report = convert_rows(rows, &tables.grocery_units, &tables.conversions);

    for row in rows.iter_mut() {
        row.recipe = recipe.to_string();
    }

    report
}

/// Merge rows into the cart, skipping stop foods. Returns how many were skipped.
pub fn add_to_cart<I>(cart: &mut Cart, rows: I, stop_foods: &StopFoods) -> usize
where
    I: IntoIterator<Item = IngredientRow>,
{
    let mut skipped = 0;
    for row in rows {
        if stop_foods.contains(&row.name) {
            tracing::debug!("Skipping stop food {}", row.name);
            skipped += 1;
            continue;
        }
        cart.add(row);
    }
    skipped
}

/// Build the sorted cart for every selected recipe
pub fn build_cart(
    paths: &RunPaths,
    tables: &ReferenceTables,
    selection: &RecipeSelection,
) -> ShopResult<(Cart, RunSummary)> {
    let mut cart = Cart::new();
    let mut summary = RunSummary::default();

    for recipe in selection.selected() {
        tracing::info!("Adding {}...", recipe);
        let mut rows = load_recipe(paths.recipe_file(recipe))?;

        let report = prepare_recipe(&mut rows, recipe, tables);
        summary.conversion_warnings += report.warnings();
        summary.stop_foods_skipped += add_to_cart(&mut cart, rows, &tables.stop_foods);
        summary.recipes.push(recipe.to_string());
    }

    cart.sort_by_name();
    summary.lines = cart.len();
    Ok((cart, summary))
}

/// Load everything from the configured paths and build the cart
pub fn load_and_build(paths: &RunPaths) -> ShopResult<(Cart, RunSummary)> {
    let tables = ReferenceTables::load(&paths.tables_dir)?;
    let pantry = Pantry::load(paths.tables_dir.join(PANTRY_FILE))?;
    let selection = RecipeSelection::load(paths.tables_dir.join(RECIPE_LIST_FILE))?;

    tracing::info!(
        "{} pantry items, {} of {} recipes selected",
        pantry.len(),
        selection.selected().count(),
        selection.len()
    );

    let (cart, mut summary) = build_cart(paths, &tables, &selection)?;
    summary.pantry_items = pantry.len();

    for line in cart.lines().iter().filter(|l| pantry.contains(&l.name)) {
        tracing::debug!("{} is also listed in the pantry", line.name);
    }

    Ok((cart, summary))
}

/// Full run: build the cart and write the list plus any configured exports
pub fn run(paths: &RunPaths) -> ShopResult<RunSummary> {
    let (cart, summary) = load_and_build(paths)?;

    output::write_list(&paths.output, &cart)?;
    if let Some(csv) = &paths.csv_output {
        output::write_csv(csv, &cart)?;
    }
    if let Some(json) = &paths.json_output {
        output::write_json(json, &cart, &summary.recipes)?;
    }

    tracing::info!(
        "Shopping list ready: {} lines from {} recipes ({} stop foods skipped, {} conversion warnings)",
        summary.lines,
        summary.recipes.len(),
        summary.stop_foods_skipped,
        summary.conversion_warnings
    );

    Ok(summary)
}
