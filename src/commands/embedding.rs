use crate::cli::{CurrencyArgs, PeriodArg};
use crate::commands::{format_money, format_tokens, resolve_catalog};
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use costwise::config;
use costwise::pricing::{EmbeddingUsage, UsageParameters};
use costwise::session::{recalculate, CalculatorState};
use std::path::Path;
use tracing::info;

/// Execute the embedding command
///
/// Ranks embedding models for a word or token volume over a period.
pub fn execute(
    catalog_path: Option<&Path>,
    words: f64,
    tokens: Option<f64>,
    period: PeriodArg,
    days_per_year: Option<u32>,
    currency: &CurrencyArgs,
    json: bool,
) -> Result<()> {
    let cfg = config::load_config()?;
    let catalog = resolve_catalog(catalog_path, &cfg)?;

    let params = UsageParameters::Embedding(EmbeddingUsage {
        words,
        explicit_tokens: tokens,
        period: period.into(),
        usd_to_local_rate: currency.rate,
        days_per_year: days_per_year.unwrap_or(cfg.calc.default_days_per_year),
    });

    let state = CalculatorState::new(params);
    info!("Comparing embedding models");
    let calc = recalculate(&catalog, &state, &cfg.calc);

    if json {
        println!("{}", serde_json::to_string_pretty(&calc)?);
        return Ok(());
    }

    if calc.results.is_empty() {
        println!("No embedding models in the catalog.");
        return Ok(());
    }

    println!(
        "Daily tokens: {}\n",
        format_tokens(calc.usage.daily_input_tokens)
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("MODEL").fg(Color::Cyan),
        Cell::new("PROVIDER").fg(Color::Cyan),
        Cell::new("$/1M TOKENS").fg(Color::Cyan),
        Cell::new("DAILY").fg(Color::Cyan),
        Cell::new("MONTHLY").fg(Color::Cyan),
        Cell::new("YEARLY").fg(Color::Cyan),
    ]);

    for result in &calc.results {
        table.add_row(vec![
            Cell::new(&result.model),
            Cell::new(&result.provider),
            Cell::new(format!("{:.3}", result.input_price_per_million)),
            Cell::new(format_money(result.daily_total, currency)),
            Cell::new(format_money(result.monthly_total, currency)),
            Cell::new(format_money(result.yearly_total, currency)),
        ]);
    }

    println!("{table}");

    if let Some(summary) = &calc.summary {
        println!(
            "\nBest: {} at {}/year",
            summary.best.model,
            format_money(summary.best.yearly_total, currency)
        );
    }

    Ok(())
}
