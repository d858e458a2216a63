use crate::commands::resolve_catalog;
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use costwise::config;
use std::path::Path;

/// Execute the models command
///
/// Lists the active pricing catalog at $/1M-token rates.
pub fn execute(catalog_path: Option<&Path>) -> Result<()> {
    let cfg = config::load_config()?;
    let catalog = resolve_catalog(catalog_path, &cfg)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("MODEL").fg(Color::Cyan),
        Cell::new("PROVIDER").fg(Color::Cyan),
        Cell::new("CATEGORY").fg(Color::Cyan),
        Cell::new("INPUT $/1M").fg(Color::Cyan),
        Cell::new("OUTPUT $/1M").fg(Color::Cyan),
    ]);

    for entry in &catalog {
        table.add_row(vec![
            Cell::new(&entry.id),
            Cell::new(&entry.provider),
            Cell::new(entry.category.to_string()),
            Cell::new(format!("{:.3}", entry.input_price_per_million())),
            Cell::new(format!("{:.3}", entry.output_price_per_million())),
        ]);
    }

    println!("{table}");
    println!("\n{} models in catalog", catalog.len());

    Ok(())
}
