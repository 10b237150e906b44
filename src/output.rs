//! Shopping list output
//!
//! Writes the final cart as a flat text list, with optional CSV and JSON
//! exports of the same lines.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::build_info::BuildInfo;
use crate::error::{ShopError, ShopResult};
use crate::models::{Cart, IngredientRow};
use crate::tables::write_row;

/// Format an amount without float noise: `740`, `0.5`, `0.33`.
///
/// Positive amounts too small for two decimals keep three significant
/// digits (`0.0022`) so they never print as `0`.
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded == 0.0 && amount > 0.0 {
        let digits = (2 - amount.log10().floor() as i32).max(0) as usize;
        return trim_decimals(format!("{:.*}", digits, amount));
    }
    if rounded.fract() == 0.0 {
        return format!("{}", rounded as i64);
    }
    trim_decimals(format!("{:.2}", rounded))
}

fn trim_decimals(text: String) -> String {
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// One list line: `<amount>\t<unit>\tof <name>`
pub fn format_line(row: &IngredientRow) -> String {
    format!("{}\t{}\tof {}", format_amount(row.amount), row.unit, row.name)
}

/// Write the list to any writer, one line per cart row
pub fn write_list_to<W: Write>(w: &mut W, cart: &Cart) -> io::Result<()> {
    for row in cart.lines() {
        writeln!(w, "{}", format_line(row))?;
    }
    Ok(())
}

/// Write (overwrite) the text shopping list
pub fn write_list(path: &Path, cart: &Cart) -> ShopResult<()> {
    let mut buf = Vec::new();
    write_list_to(&mut buf, cart).map_err(|source| output_error(path, source))?;
    write_file(path, &buf)
}

/// Write the cart as CSV with `Name,Amount,Unit,Category,Recipe` columns,
/// grouped by category (uncategorized last) and by name within a group
pub fn write_csv(path: &Path, cart: &Cart) -> ShopResult<()> {
    let mut buf = Vec::new();
    write_csv_to(&mut buf, cart).map_err(|source| output_error(path, source))?;
    write_file(path, &buf)
}

fn write_csv_to<W: Write>(w: &mut W, cart: &Cart) -> io::Result<()> {
    write_row(w, &["Name", "Amount", "Unit", "Category", "Recipe"], ',')?;

    let mut rows: Vec<&IngredientRow> = cart.lines().iter().collect();
    rows.sort_by(|a, b| {
        (a.category.is_none(), &a.category, &a.name).cmp(&(b.category.is_none(), &b.category, &b.name))
    });

    for row in rows {
        let amount = format_amount(row.amount);
        let category = row.category.as_deref().unwrap_or("");
        write_row(
            w,
            &[
                row.name.as_str(),
                amount.as_str(),
                row.unit.as_str(),
                category,
                row.recipe.as_str(),
            ],
            ',',
        )?;
    }
    Ok(())
}

/// JSON export document
#[derive(Debug, Serialize)]
pub struct ListExport<'a> {
    pub generated_at: DateTime<Utc>,
    pub build: BuildInfo,
    pub recipes: &'a [String],
    pub items: &'a [IngredientRow],
}

/// Write the cart as pretty-printed JSON
pub fn write_json(path: &Path, cart: &Cart, recipes: &[String]) -> ShopResult<()> {
    let export = ListExport {
        generated_at: Utc::now(),
        build: BuildInfo::current(),
        recipes,
        items: cart.lines(),
    };
    let json = serde_json::to_string_pretty(&export)?;
    write_file(path, json.as_bytes())
}

fn write_file(path: &Path, contents: &[u8]) -> ShopResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| output_error(path, source))?;
        }
    }
    fs::write(path, contents).map_err(|source| output_error(path, source))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn output_error(path: &Path, source: io::Error) -> ShopError {
    ShopError::Output {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cart() -> Cart {
        let mut cart = Cart::new();
        let mut flour = IngredientRow::new("flour", 740.0, "g").with_recipe("A,B");
        flour.category = Some("baking".to_string());
        cart.add(flour);
        cart.add(IngredientRow::new("milk", 1.0 / 3.0, "cup").with_recipe("A"));
        cart
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(740.0), "740");
        assert_eq!(format_amount(0.5), "0.5");
        assert_eq!(format_amount(0.1 + 0.2), "0.3");
        assert_eq!(format_amount(1.0 / 3.0), "0.33");
        assert_eq!(format_amount(2.999), "3");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(0.0022), "0.0022");
        assert_eq!(format_amount(0.004), "0.004");
        assert_eq!(format_amount(0.0049999), "0.005");
    }

    #[test]
    fn test_small_converted_amount_not_zero() {
        // 1 g of saffron expressed in pounds
        let row = IngredientRow::new("saffron", 1.0 / 453.592, "lb");
        assert_eq!(format_line(&row), "0.0022\tlb\tof saffron");
    }

    #[test]
    fn test_format_line() {
        let row = IngredientRow::new("flour", 740.0, "g");
        assert_eq!(format_line(&row), "740\tg\tof flour");
    }

    #[test]
    fn test_write_list_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shopping_list.txt");
        fs::write(&path, "stale contents\n").unwrap();

        write_list(&path, &cart()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "740\tg\tof flour\n0.33\tcup\tof milk\n");
    }

    #[test]
    fn test_write_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("shopping_list.csv");

        write_csv(&path, &cart()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Name,Amount,Unit,Category,Recipe");
        assert_eq!(lines[1], "flour,740,g,baking,\"A,B\"");
        assert_eq!(lines[2], "milk,0.33,cup,,A");
    }

    #[test]
    fn test_write_csv_grouped_by_category() {
        let mut cart = Cart::new();
        for (name, category) in [
            ("tomato", Some("produce")),
            ("salt", None),
            ("milk", Some("dairy")),
            ("basil", Some("produce")),
            ("butter", Some("dairy")),
        ] {
            let mut row = IngredientRow::new(name, 1.0, "each");
            row.category = category.map(str::to_string);
            cart.add(row);
        }

        let mut buf = Vec::new();
        write_csv_to(&mut buf, &cart).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let names: Vec<_> = text.lines().skip(1).map(|l| l.split(',').next().unwrap()).collect();
        assert_eq!(names, vec!["butter", "milk", "basil", "tomato", "salt"]);
    }

    #[test]
    fn test_write_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shopping_list.json");

        write_json(&path, &cart(), &["A".to_string(), "B".to_string()]).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["recipes"], serde_json::json!(["A", "B"]));
        assert_eq!(value["items"][0]["name"], "flour");
        assert_eq!(value["items"][0]["recipe"], "A,B");
        assert!(value["generated_at"].is_string());
    }
}
