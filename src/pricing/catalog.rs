use crate::error::AppError;
use crate::pricing::models::{ModelCategory, PricingEntry};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Catalog file structure (JSON or TOML)
///
/// An ordered list of models; catalog order is the tie-break order for
/// ranking, so the format must preserve it.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub models: Vec<CatalogEntryData>,
}

/// One model entry as written in a catalog file, prices on the $/1M basis
#[derive(Debug, Deserialize)]
pub struct CatalogEntryData {
    pub id: String,
    pub provider: String,
    pub category: ModelCategory,
    #[serde(default)]
    pub input_price_per_million: Option<f64>,
    #[serde(default)]
    pub output_price_per_million: Option<f64>,
}

/// Load a catalog from a JSON or TOML file, selected by extension
pub fn load_catalog(path: &Path) -> Result<Vec<PricingEntry>, AppError> {
    let content = std::fs::read_to_string(path)?;

    let entries = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_catalog_json(&content)?,
        Some("toml") => parse_catalog_toml(&content)?,
        other => {
            return Err(AppError::Catalog(format!(
                "unsupported catalog extension: {:?} (expected .json or .toml)",
                other
            )))
        }
    };

    info!("Loaded {} pricing entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse catalog JSON into pricing entries
pub fn parse_catalog_json(json: &str) -> Result<Vec<PricingEntry>, AppError> {
    let file: CatalogFile = serde_json::from_str(json)
        .map_err(|e| AppError::Catalog(format!("failed to parse catalog JSON: {}", e)))?;
    Ok(sanitize_entries(file.models))
}

/// Parse catalog TOML into pricing entries
pub fn parse_catalog_toml(toml_str: &str) -> Result<Vec<PricingEntry>, AppError> {
    let file: CatalogFile = toml::from_str(toml_str)
        .map_err(|e| AppError::Catalog(format!("failed to parse catalog TOML: {}", e)))?;
    Ok(sanitize_entries(file.models))
}

/// Convert raw file entries to `PricingEntry`, dropping or coercing
/// anything that violates the catalog invariants
fn sanitize_entries(raw: Vec<CatalogEntryData>) -> Vec<PricingEntry> {
    let mut entries: Vec<PricingEntry> = Vec::with_capacity(raw.len());

    for data in raw {
        if data.id.trim().is_empty() {
            warn!("Skipping catalog entry with empty id");
            continue;
        }
        if entries.iter().any(|e| e.id == data.id) {
            warn!("Skipping duplicate catalog entry: {}", data.id);
            continue;
        }

        // Entries without a usable input price cannot be charged at all
        let input_per_million = match data.input_price_per_million {
            Some(p) if p.is_finite() && p >= 0.0 => p,
            _ => {
                warn!("Skipping catalog entry without valid input price: {}", data.id);
                continue;
            }
        };

        let output_per_million = match data.output_price_per_million {
            Some(p) if p.is_finite() && p >= 0.0 => p,
            _ => 0.0,
        };

        // Embedding models are never charged for output
        let output_per_million = if data.category == ModelCategory::Embedding {
            if output_per_million != 0.0 {
                warn!(
                    "Embedding entry {} declared an output price; forcing it to zero",
                    data.id
                );
            }
            0.0
        } else {
            output_per_million
        };

        entries.push(PricingEntry {
            id: data.id,
            provider: data.provider,
            category: data.category,
            input_price_per_token: input_per_million / 1_000_000.0,
            output_price_per_token: output_per_million / 1_000_000.0,
        });
    }

    entries
}

/// Built-in pricing catalog (USD per 1M tokens at the published list rates)
pub fn default_catalog() -> Vec<PricingEntry> {
    fn entry(
        id: &str,
        provider: &str,
        category: ModelCategory,
        input_per_million: f64,
        output_per_million: f64,
    ) -> PricingEntry {
        PricingEntry {
            id: id.to_string(),
            provider: provider.to_string(),
            category,
            input_price_per_token: input_per_million / 1_000_000.0,
            output_price_per_token: output_per_million / 1_000_000.0,
        }
    }

    use ModelCategory::{Embedding, Generative};

    vec![
        entry("GPT-4o", "OpenAI", Generative, 2.50, 10.00),
        entry("GPT-4o mini", "OpenAI", Generative, 0.15, 0.60),
        entry("GPT-5", "OpenAI", Generative, 1.25, 10.00),
        entry("GPT-5 mini", "OpenAI", Generative, 0.25, 2.00),
        entry("Gemini 2.5 Pro", "Google", Generative, 2.50, 15.00),
        entry("Gemini 2.5 Flash", "Google", Generative, 0.30, 2.50),
        entry("Gemini 2.5 Flash-Lite", "Google", Generative, 0.10, 0.40),
        entry("Claude Sonnet 4 (≤200K)", "Anthropic", Generative, 3.00, 15.00),
        entry("Claude Sonnet 4 (>200K)", "Anthropic", Generative, 6.00, 22.50),
        entry("text-embedding-3-small", "OpenAI", Embedding, 0.02, 0.0),
        entry("text-embedding-3-large", "OpenAI", Embedding, 0.13, 0.0),
        entry("text-embedding-ada-002", "OpenAI", Embedding, 0.10, 0.0),
    ]
}
