use crate::cli::{CurrencyArgs, GenerativeArgs, SortArg};
use crate::commands::{
    format_money, format_opt_money, format_tokens, generative_usage, resolve_catalog,
};
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use costwise::config;
use costwise::pricing::{efficiency_score, UsageParameters};
use costwise::session::{recalculate, CalculatorState};
use std::path::Path;
use tracing::info;

/// Execute the compare command
///
/// Ranks every generative model in the catalog for the given workload.
pub fn execute(
    catalog_path: Option<&Path>,
    usage: &GenerativeArgs,
    sort: SortArg,
    provider: Option<String>,
    currency: &CurrencyArgs,
    json: bool,
) -> Result<()> {
    let cfg = config::load_config()?;
    let catalog = resolve_catalog(catalog_path, &cfg)?;

    let params = UsageParameters::Generative(generative_usage(usage, currency.rate, &cfg));

    let mut state = CalculatorState::new(params);
    state.metric = sort.into();
    state.filter.provider = provider;

    info!(
        "Comparing {} conversations/day, {} messages each",
        usage.conversations, usage.messages
    );
    let calc = recalculate(&catalog, &state, &cfg.calc);

    if json {
        println!("{}", serde_json::to_string_pretty(&calc)?);
        return Ok(());
    }

    if calc.results.is_empty() {
        println!("No models match the current filter.");
        return Ok(());
    }

    println!(
        "Daily tokens: {} in / {} out ({} messages/day)\n",
        format_tokens(calc.usage.daily_input_tokens),
        format_tokens(calc.usage.daily_output_tokens),
        calc.usage.total_daily_messages
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("MODEL").fg(Color::Cyan),
        Cell::new("PROVIDER").fg(Color::Cyan),
        Cell::new("DAILY").fg(Color::Cyan),
        Cell::new("MONTHLY").fg(Color::Cyan),
        Cell::new("YEARLY").fg(Color::Cyan),
        Cell::new("PER CONV").fg(Color::Cyan),
        Cell::new("PER MSG").fg(Color::Cyan),
        Cell::new("EFFICIENCY").fg(Color::Cyan),
    ]);

    for result in &calc.results {
        table.add_row(vec![
            Cell::new(&result.model),
            Cell::new(&result.provider),
            Cell::new(format_money(result.daily_total, currency)),
            Cell::new(format_money(result.monthly_total, currency)),
            Cell::new(format_money(result.yearly_total, currency)),
            Cell::new(format_opt_money(result.per_conversation, currency)),
            Cell::new(format_opt_money(result.per_message, currency)),
            Cell::new(format!("{}/100", efficiency_score(result, &cfg.calc))),
        ]);
    }

    println!("{table}");

    if let Some(summary) = &calc.summary {
        println!(
            "\nBest:  {} at {}/year",
            summary.best.model,
            format_money(summary.best.yearly_total, currency)
        );
        println!(
            "Worst: {} at {}/year",
            summary.worst.model,
            format_money(summary.worst.yearly_total, currency)
        );
        match summary.savings.percent {
            Some(percent) => println!(
                "Switching saves {}/year ({:.1}%)",
                format_money(summary.savings.amount, currency),
                percent
            ),
            None => println!(
                "Switching saves {}/year",
                format_money(summary.savings.amount, currency)
            ),
        }
    }

    Ok(())
}
