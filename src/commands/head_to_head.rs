use crate::cli::GenerativeArgs;
use crate::commands::{format_delta, generative_usage, resolve_catalog};
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use costwise::config;
use costwise::pricing::{head_to_head, price_all, UsageParameters};
use std::path::Path;
use tracing::info;

/// Execute the head-to-head command
pub fn execute(
    catalog_path: Option<&Path>,
    model_a: &str,
    model_b: &str,
    usage: &GenerativeArgs,
    json: bool,
) -> Result<()> {
    let cfg = config::load_config()?;
    let catalog = resolve_catalog(catalog_path, &cfg)?;

    let params = UsageParameters::Generative(generative_usage(usage, 1.0, &cfg));

    info!("Head to head: {} vs {}", model_a, model_b);
    let results = price_all(&catalog, &params, &cfg.calc);
    let comparison = head_to_head(&results, model_a, model_b, &cfg.calc)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("METRIC").fg(Color::Cyan),
        Cell::new(format!("{} → {}", comparison.model_a, comparison.model_b)).fg(Color::Cyan),
    ]);

    table.add_row(vec![
        Cell::new("Yearly cost"),
        Cell::new(format_delta(comparison.yearly_delta)),
    ]);
    table.add_row(vec![
        Cell::new("Monthly cost"),
        Cell::new(format_delta(comparison.monthly_delta)),
    ]);
    table.add_row(vec![
        Cell::new("Per message"),
        Cell::new(format_delta(comparison.per_message_delta)),
    ]);
    table.add_row(vec![
        Cell::new("Per conversation"),
        Cell::new(format_delta(comparison.per_conversation_delta)),
    ]);
    table.add_row(vec![
        Cell::new("Input price"),
        Cell::new(format_delta(comparison.input_price_delta)),
    ]);
    table.add_row(vec![
        Cell::new("Output price"),
        Cell::new(format_delta(comparison.output_price_delta)),
    ]);
    table.add_row(vec![
        Cell::new("Efficiency"),
        Cell::new(format!(
            "{}/100 vs {}/100",
            comparison.efficiency_a, comparison.efficiency_b
        )),
    ]);

    println!("{table}");
    println!("\nCheaper:        {}", comparison.cheaper);
    println!("More efficient: {}", comparison.more_efficient);

    Ok(())
}
