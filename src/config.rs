use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Words-to-tokens approximation ratio (tokens per word)
pub const DEFAULT_TOKENS_PER_WORD: f64 = 4.0 / 3.0;

/// Flat month length used for monthly totals (business rule, not calendar)
pub const DEFAULT_DAYS_PER_MONTH: f64 = 30.0;

/// Default number of billable days per year
pub const DEFAULT_DAYS_PER_YEAR: u32 = 365;

/// Quiet period for coalescing rapid recalculation triggers
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Slope of the cost-per-million term in the efficiency score
pub const DEFAULT_COST_EFFICIENCY_SLOPE: f64 = 10.0;

/// Output/input price ratio considered ideally balanced
pub const DEFAULT_BALANCE_TARGET_RATIO: f64 = 5.0;

/// Slope of the balance term in the efficiency score
pub const DEFAULT_BALANCE_SLOPE: f64 = 10.0;

/// Divisor floor for output-price deltas ($/1M basis)
pub const DEFAULT_OUTPUT_PRICE_DELTA_FLOOR: f64 = 0.001;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub calc: CalcConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Calculation policy constants
///
/// These are stated business rules rather than incidental values, so they
/// are carried as overridable configuration instead of burying them in the
/// arithmetic.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalcConfig {
    /// Tokens per word when deriving token counts from word counts
    #[serde(default = "default_tokens_per_word")]
    pub tokens_per_word: f64,

    /// Days per month for the flat monthly total
    #[serde(default = "default_days_per_month")]
    pub days_per_month: f64,

    /// Days per year when the caller does not supply one
    #[serde(default = "default_days_per_year")]
    pub default_days_per_year: u32,

    /// Quiet period (milliseconds) for the recalculation debouncer
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Efficiency score: penalty per $/1M-token of daily cost
    #[serde(default = "default_cost_efficiency_slope")]
    pub cost_efficiency_slope: f64,

    /// Efficiency score: ideal output/input price ratio
    #[serde(default = "default_balance_target_ratio")]
    pub balance_target_ratio: f64,

    /// Efficiency score: penalty per unit of deviation from the target ratio
    #[serde(default = "default_balance_slope")]
    pub balance_slope: f64,

    /// Floor applied to the reference output price in head-to-head deltas
    #[serde(default = "default_output_price_delta_floor")]
    pub output_price_delta_floor: f64,
}

/// Catalog source configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CatalogConfig {
    /// Path to a catalog file (JSON or TOML); built-in catalog when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            tokens_per_word: DEFAULT_TOKENS_PER_WORD,
            days_per_month: DEFAULT_DAYS_PER_MONTH,
            default_days_per_year: DEFAULT_DAYS_PER_YEAR,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            cost_efficiency_slope: DEFAULT_COST_EFFICIENCY_SLOPE,
            balance_target_ratio: DEFAULT_BALANCE_TARGET_RATIO,
            balance_slope: DEFAULT_BALANCE_SLOPE,
            output_price_delta_floor: DEFAULT_OUTPUT_PRICE_DELTA_FLOOR,
        }
    }
}

fn default_tokens_per_word() -> f64 {
    DEFAULT_TOKENS_PER_WORD
}

fn default_days_per_month() -> f64 {
    DEFAULT_DAYS_PER_MONTH
}

fn default_days_per_year() -> u32 {
    DEFAULT_DAYS_PER_YEAR
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_cost_efficiency_slope() -> f64 {
    DEFAULT_COST_EFFICIENCY_SLOPE
}

fn default_balance_target_ratio() -> f64 {
    DEFAULT_BALANCE_TARGET_RATIO
}

fn default_balance_slope() -> f64 {
    DEFAULT_BALANCE_SLOPE
}

fn default_output_price_delta_floor() -> f64 {
    DEFAULT_OUTPUT_PRICE_DELTA_FLOOR
}

/// Load configuration from `costwise.toml` (optional) and environment
/// variables with the `COSTWISE` prefix
pub fn load_config() -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::with_name("costwise").required(false))
        .add_source(config::Environment::with_prefix("COSTWISE").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if !(cfg.calc.tokens_per_word.is_finite() && cfg.calc.tokens_per_word > 0.0) {
        anyhow::bail!("calc.tokens_per_word must be a positive number");
    }
    if !(cfg.calc.days_per_month.is_finite() && cfg.calc.days_per_month > 0.0) {
        anyhow::bail!("calc.days_per_month must be a positive number");
    }
    if cfg.calc.default_days_per_year == 0 {
        anyhow::bail!("calc.default_days_per_year must be >= 1");
    }
    if !(cfg.calc.output_price_delta_floor.is_finite() && cfg.calc.output_price_delta_floor > 0.0) {
        anyhow::bail!("calc.output_price_delta_floor must be a positive number");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_calc_config() {
        let calc = CalcConfig::default();
        assert!((calc.tokens_per_word - 4.0 / 3.0).abs() < f64::EPSILON);
        assert!((calc.days_per_month - 30.0).abs() < f64::EPSILON);
        assert_eq!(calc.default_days_per_year, 365);
        assert_eq!(calc.debounce_ms, 500);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let cfg: Config = toml::from_str(
            r#"
            [calc]
            tokens_per_word = 1.5
            "#,
        )
        .unwrap();

        assert!((cfg.calc.tokens_per_word - 1.5).abs() < f64::EPSILON);
        // Unspecified fields fall back to defaults
        assert!((cfg.calc.days_per_month - 30.0).abs() < f64::EPSILON);
        assert!(cfg.catalog.path.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_ratio() {
        let mut cfg = Config::default();
        cfg.calc.tokens_per_word = 0.0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_year() {
        let mut cfg = Config::default();
        cfg.calc.default_days_per_year = 0;
        assert!(validate_config(&cfg).is_err());
    }
}
