use serde::{Deserialize, Serialize};
use std::fmt;

/// Pricing category of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelCategory {
    /// Charged separately for input and output tokens
    Generative,
    /// Charged for input tokens only; output price is always zero
    Embedding,
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generative => write!(f, "generative"),
            Self::Embedding => write!(f, "embedding"),
        }
    }
}

/// One priceable model from the catalog
///
/// Prices are USD per single token. Loaded once at startup and immutable
/// thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingEntry {
    pub id: String,
    pub provider: String,
    pub category: ModelCategory,
    pub input_price_per_token: f64,
    pub output_price_per_token: f64,
}

impl PricingEntry {
    /// Input price on the display-friendly $/1M-token basis
    pub fn input_price_per_million(&self) -> f64 {
        self.input_price_per_token * 1_000_000.0
    }

    /// Output price on the display-friendly $/1M-token basis
    pub fn output_price_per_million(&self) -> f64 {
        self.output_price_per_token * 1_000_000.0
    }
}

/// Billing period for embedding token volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Monthly,
    Yearly,
}

/// User-supplied usage parameters; exactly one mode per calculation
#[derive(Debug, Clone)]
pub enum UsageParameters {
    Generative(GenerativeUsage),
    Embedding(EmbeddingUsage),
}

impl UsageParameters {
    /// Catalog category eligible for this calculation
    pub fn category(&self) -> ModelCategory {
        match self {
            Self::Generative(_) => ModelCategory::Generative,
            Self::Embedding(_) => ModelCategory::Embedding,
        }
    }

    pub fn days_per_year(&self) -> u32 {
        match self {
            Self::Generative(p) => p.days_per_year,
            Self::Embedding(p) => p.days_per_year,
        }
    }
}

/// Conversation-volume parameters for generative models
#[derive(Debug, Clone)]
pub struct GenerativeUsage {
    pub daily_conversations: u64,
    pub messages_per_conversation: u64,
    pub input_words_per_message: f64,
    pub output_words_per_message: f64,
    pub usd_to_local_rate: f64,
    pub days_per_year: u32,
}

impl Default for GenerativeUsage {
    fn default() -> Self {
        Self {
            daily_conversations: 70_000,
            messages_per_conversation: 5,
            input_words_per_message: 30.0,
            output_words_per_message: 200.0,
            usd_to_local_rate: 1.0,
            days_per_year: 365,
        }
    }
}

/// Token-volume parameters for embedding models
#[derive(Debug, Clone)]
pub struct EmbeddingUsage {
    /// Word count, converted to tokens unless `explicit_tokens` is given
    pub words: f64,
    /// Explicit token count; overrides `words` when positive
    pub explicit_tokens: Option<f64>,
    /// Period the supplied volume covers
    pub period: Period,
    pub usd_to_local_rate: f64,
    pub days_per_year: u32,
}

impl Default for EmbeddingUsage {
    fn default() -> Self {
        Self {
            words: 0.0,
            explicit_tokens: None,
            period: Period::Daily,
            usd_to_local_rate: 1.0,
            days_per_year: 365,
        }
    }
}

/// Normalized daily token consumption, derived fresh on every calculation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TokenUsage {
    pub daily_input_tokens: f64,
    pub daily_output_tokens: f64,
    /// Always 1 in embedding mode; a structural placeholder, never a divisor
    pub total_daily_messages: u64,
}

impl TokenUsage {
    pub fn total_daily_tokens(&self) -> f64 {
        self.daily_input_tokens + self.daily_output_tokens
    }
}

/// Per-model cost breakdown for one calculation run
///
/// All monetary figures are base-currency (USD); currency conversion is a
/// presentation concern.
#[derive(Debug, Clone, Serialize)]
pub struct CostResult {
    pub model: String,
    pub provider: String,
    pub category: ModelCategory,
    pub daily_total: f64,
    pub monthly_total: f64,
    pub yearly_total: f64,
    /// `None` in embedding mode, where a conversation has no meaning
    pub per_conversation: Option<f64>,
    /// `None` in embedding mode
    pub per_message: Option<f64>,
    pub input_price_per_million: f64,
    pub output_price_per_million: f64,
    pub daily_input_tokens: f64,
    pub daily_output_tokens: f64,
    pub total_daily_tokens: f64,
}
