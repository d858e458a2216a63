use crate::cli::{CurrencyArgs, GenerativeArgs};
use crate::commands::{
    format_money, format_opt_money, format_tokens, generative_usage, resolve_catalog,
};
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use costwise::config;
use costwise::error::AppError;
use costwise::pricing::scenario::{Insight, MarginAdvice, ScenarioParameters};
use costwise::pricing::{resale_pricing, run_scenario};
use std::path::Path;
use tracing::info;

/// Execute the scenario command
///
/// Full business analysis: ranked costs, insights, recommendations and a
/// resale pricing overlay at the requested margin.
pub fn execute(
    catalog_path: Option<&Path>,
    usage: &GenerativeArgs,
    margin: f64,
    model: Option<String>,
    currency: &CurrencyArgs,
    json: bool,
) -> Result<()> {
    let cfg = config::load_config()?;
    let catalog = resolve_catalog(catalog_path, &cfg)?;

    let volume = generative_usage(usage, currency.rate, &cfg);
    let params = ScenarioParameters {
        daily_conversations: volume.daily_conversations,
        messages_per_conversation: volume.messages_per_conversation,
        input_words_per_message: volume.input_words_per_message,
        output_words_per_message: volume.output_words_per_message,
        usd_to_local_rate: volume.usd_to_local_rate,
        days_per_year: volume.days_per_year,
        margin_percent: margin,
    };

    info!(
        "Scenario: {} conversations/day at {}% margin",
        usage.conversations, margin
    );
    let report = run_scenario(&catalog, &params, &cfg.calc);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.results.is_empty() {
        println!("No generative models in the catalog.");
        return Ok(());
    }

    let tokens = &report.parameters_echo;
    println!(
        "Volume: {} in / {} out per day ({} messages)\n",
        format_tokens(tokens.daily_input_tokens),
        format_tokens(tokens.daily_output_tokens),
        tokens.total_daily_messages
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("MODEL").fg(Color::Cyan),
        Cell::new("PROVIDER").fg(Color::Cyan),
        Cell::new("MONTHLY").fg(Color::Cyan),
        Cell::new("YEARLY").fg(Color::Cyan),
        Cell::new("PER CONV").fg(Color::Cyan),
    ]);
    for result in &report.results {
        table.add_row(vec![
            Cell::new(&result.model),
            Cell::new(&result.provider),
            Cell::new(format_money(result.monthly_total, currency)),
            Cell::new(format_money(result.yearly_total, currency)),
            Cell::new(format_opt_money(result.per_conversation, currency)),
        ]);
    }
    println!("{table}");

    if !report.insights.is_empty() {
        println!("\nInsights:");
        for insight in &report.insights {
            println!("  - {}", render_insight(insight, currency));
        }
    }

    if let Some(recs) = &report.recommendations {
        println!("\nRecommendations:");
        println!("  Budget pick:    {}", recs.budget);
        println!("  Most efficient: {}", recs.most_efficient);
        println!("  Balanced pick:  {}", recs.balanced);
    }

    // Resale overlay for the requested model, cheapest otherwise
    let target = match &model {
        Some(id) => report
            .results
            .iter()
            .find(|r| r.model == *id)
            .ok_or_else(|| AppError::ModelNotFound(id.clone()))?,
        None => &report.results[0],
    };
    let resale = resale_pricing(target, margin);

    println!("\nResale pricing for {} at {:.0}% margin:", resale.model, resale.margin_percent);
    println!(
        "  Per conversation: {} (cost {})",
        format_opt_money(resale.per_conversation.map(|p| p.price), currency),
        format_opt_money(resale.per_conversation.map(|p| p.cost), currency)
    );
    println!(
        "  Per message:      {} (cost {})",
        format_opt_money(resale.per_message.map(|p| p.price), currency),
        format_opt_money(resale.per_message.map(|p| p.cost), currency)
    );
    println!(
        "  Monthly:          {} (markup {})",
        format_money(resale.monthly.price, currency),
        format_money(resale.monthly.markup, currency)
    );
    println!(
        "  Yearly:           {} (markup {})",
        format_money(resale.yearly.price, currency),
        format_money(resale.yearly.markup, currency)
    );
    match resale.advice {
        Some(MarginAdvice::LowMargin { margin_percent }) => println!(
            "  Note: {:.0}% margin leaves little room for operating costs",
            margin_percent
        ),
        Some(MarginAdvice::HighMargin { margin_percent }) => println!(
            "  Note: {:.0}% margin may price you out of the market",
            margin_percent
        ),
        None => {}
    }

    Ok(())
}

fn render_insight(insight: &Insight, currency: &CurrencyArgs) -> String {
    match insight {
        Insight::CostSavings {
            model,
            amount,
            percent,
        } => match percent {
            Some(p) => format!(
                "Picking {} saves {}/year ({:.1}%)",
                model,
                format_money(*amount, currency),
                p
            ),
            None => format!(
                "Picking {} saves {}/year",
                model,
                format_money(*amount, currency)
            ),
        },
        Insight::HighVolume {
            daily_conversations,
        } => format!(
            "High volume ({} conversations/day): small per-token differences compound",
            daily_conversations
        ),
        Insight::VeryHighVolume {
            daily_conversations,
        } => format!(
            "Very high volume ({} conversations/day): consider negotiated pricing",
            daily_conversations
        ),
        Insight::TokenOptimization {
            avg_tokens_per_message,
        } => format!(
            "Long messages (avg {:.0} tokens): trimming prompts would cut cost",
            avg_tokens_per_message
        ),
        Insight::ProviderDiversity { providers } => format!(
            "{} providers compete in this bracket: {}",
            providers.len(),
            providers.join(", ")
        ),
        Insight::ExcellentEfficiency { per_conversation } => format!(
            "Excellent efficiency: {} per conversation",
            format_money(*per_conversation, currency)
        ),
        Insight::OptimizationOpportunity { per_conversation } => format!(
            "Costly conversations ({} each): review model choice or usage",
            format_money(*per_conversation, currency)
        ),
    }
}
