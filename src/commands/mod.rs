//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - compare: rank generative models for a conversation workload
//! - embedding: rank embedding models for a token volume
//! - head-to-head: pairwise comparison of two models
//! - scenario: business scenario with insights and resale pricing
//! - models: list the pricing catalog

pub mod compare;
pub mod embedding;
pub mod head_to_head;
pub mod models;
pub mod scenario;

use crate::cli::{CurrencyArgs, GenerativeArgs};
use anyhow::Result;
use costwise::config::Config;
use costwise::pricing::{catalog, GenerativeUsage, PricingEntry};
use std::path::Path;
use tracing::info;

/// Resolve the pricing catalog: CLI flag wins over the config file path,
/// and the built-in catalog is the fallback
pub fn resolve_catalog(cli_path: Option<&Path>, cfg: &Config) -> Result<Vec<PricingEntry>> {
    let path = cli_path.or(cfg.catalog.path.as_deref());

    match path {
        Some(path) => Ok(catalog::load_catalog(path)?),
        None => {
            info!("Using built-in pricing catalog");
            Ok(catalog::default_catalog())
        }
    }
}

/// Build generative usage from CLI args; `--days-per-year` falls back
/// to the configured `calc.default_days_per_year`
pub fn generative_usage(args: &GenerativeArgs, rate: f64, cfg: &Config) -> GenerativeUsage {
    GenerativeUsage {
        daily_conversations: args.conversations,
        messages_per_conversation: args.messages,
        input_words_per_message: args.input_words,
        output_words_per_message: args.output_words,
        usd_to_local_rate: rate,
        days_per_year: args
            .days_per_year
            .unwrap_or(cfg.calc.default_days_per_year),
    }
}

/// Format a base-USD amount in the display currency
pub fn format_money(usd: f64, currency: &CurrencyArgs) -> String {
    let value = usd * currency.rate;
    if value >= 1_000.0 {
        format!("{}{:.0}", currency.symbol, value)
    } else if value >= 1.0 {
        format!("{}{:.2}", currency.symbol, value)
    } else {
        format!("{}{:.4}", currency.symbol, value)
    }
}

/// Format an optional amount, `N/A` when absent
pub fn format_opt_money(usd: Option<f64>, currency: &CurrencyArgs) -> String {
    match usd {
        Some(usd) => format_money(usd, currency),
        None => "N/A".to_string(),
    }
}

/// Format a signed percentage delta, `N/A` when not applicable
pub fn format_delta(delta: Option<f64>) -> String {
    match delta {
        Some(d) => format!("{:+.1}%", d),
        None => "N/A".to_string(),
    }
}

/// Format a token count compactly
pub fn format_tokens(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        format!("{:.0}", n)
    }
}
