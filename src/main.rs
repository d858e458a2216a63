use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use costwise::init_tracing;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    init_tracing();

    let catalog_path = args.catalog.as_deref();

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Compare {
            usage,
            sort,
            provider,
            currency,
            json,
        } => {
            commands::compare::execute(catalog_path, &usage, sort, provider, &currency, json)?;
        }
        cli::Commands::Embedding {
            words,
            tokens,
            period,
            days_per_year,
            currency,
            json,
        } => {
            commands::embedding::execute(
                catalog_path,
                words,
                tokens,
                period,
                days_per_year,
                &currency,
                json,
            )?;
        }
        cli::Commands::HeadToHead {
            model_a,
            model_b,
            usage,
            json,
        } => {
            commands::head_to_head::execute(catalog_path, &model_a, &model_b, &usage, json)?;
        }
        cli::Commands::Scenario {
            usage,
            margin,
            model,
            currency,
            json,
        } => {
            commands::scenario::execute(catalog_path, &usage, margin, model, &currency, json)?;
        }
        cli::Commands::Models => {
            commands::models::execute(catalog_path)?;
        }
        cli::Commands::Version => {
            println!("costwise v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
