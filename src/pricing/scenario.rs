use crate::config::CalcConfig;
use crate::pricing::calculator::{normalize, price_all};
use crate::pricing::models::{CostResult, GenerativeUsage, PricingEntry, UsageParameters};
use crate::pricing::ranking::{efficiency_score, summarize, CostSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Daily conversation count above which volume is called out
pub const HIGH_VOLUME_CONVERSATIONS: u64 = 10_000;

/// Daily conversation count above which volume is called out as very high
pub const VERY_HIGH_VOLUME_CONVERSATIONS: u64 = 50_000;

/// Average tokens per message above which prompt trimming is suggested
pub const TOKEN_OPTIMIZATION_THRESHOLD: f64 = 400.0;

/// Per-conversation cost (base USD) considered excellent
pub const EXCELLENT_PER_CONVERSATION: f64 = 0.01;

/// Per-conversation cost (base USD) worth reviewing
pub const REVIEW_PER_CONVERSATION: f64 = 0.10;

/// Resale margin below this percentage is flagged as thin
pub const LOW_MARGIN_PERCENT: f64 = 20.0;

/// Resale margin above this percentage is flagged as uncompetitive
pub const HIGH_MARGIN_PERCENT: f64 = 100.0;

/// Rounding step for resale per-conversation prices (base USD)
const PER_CONVERSATION_PRICE_STEP: f64 = 0.01;

/// Rounding step for resale per-message prices (base USD)
const PER_MESSAGE_PRICE_STEP: f64 = 0.005;

/// Business-scenario inputs; generative conversation volume plus a
/// resale margin for the pricing overlay
#[derive(Debug, Clone)]
pub struct ScenarioParameters {
    pub daily_conversations: u64,
    pub messages_per_conversation: u64,
    pub input_words_per_message: f64,
    pub output_words_per_message: f64,
    pub usd_to_local_rate: f64,
    pub days_per_year: u32,
    /// Resale margin percentage applied in the pricing overlay
    pub margin_percent: f64,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            daily_conversations: 5_000,
            messages_per_conversation: 5,
            input_words_per_message: 30.0,
            output_words_per_message: 200.0,
            usd_to_local_rate: 1.0,
            days_per_year: 365,
            margin_percent: 50.0,
        }
    }
}

impl ScenarioParameters {
    fn usage(&self) -> GenerativeUsage {
        GenerativeUsage {
            daily_conversations: self.daily_conversations,
            messages_per_conversation: self.messages_per_conversation,
            input_words_per_message: self.input_words_per_message,
            output_words_per_message: self.output_words_per_message,
            usd_to_local_rate: self.usd_to_local_rate,
            days_per_year: self.days_per_year,
        }
    }
}

/// Token volume of the scenario across the three horizons
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScenarioTokens {
    pub daily_input_tokens: f64,
    pub daily_output_tokens: f64,
    pub monthly_input_tokens: f64,
    pub monthly_output_tokens: f64,
    pub yearly_input_tokens: f64,
    pub yearly_output_tokens: f64,
    pub total_daily_messages: u64,
}

/// One observation the analysis derives from the scenario
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// Switching from the most expensive to the cheapest model saves money
    CostSavings {
        model: String,
        amount: f64,
        percent: Option<f64>,
    },
    /// Daily volume is large enough that small per-token differences compound
    HighVolume { daily_conversations: u64 },
    /// Daily volume is very large; negotiated pricing may apply
    VeryHighVolume { daily_conversations: u64 },
    /// Messages are long; trimming prompts or responses would cut cost
    TokenOptimization { avg_tokens_per_message: f64 },
    /// Several providers compete in this bracket
    ProviderDiversity { providers: Vec<String> },
    /// The cheapest model lands well under the per-conversation target
    ExcellentEfficiency { per_conversation: f64 },
    /// Even the cheapest model is expensive per conversation
    OptimizationOpportunity { per_conversation: f64 },
}

/// Model picks by objective, drawn from the ranked result set
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    /// Cheapest model by yearly total
    pub budget: String,
    /// Highest efficiency score
    pub most_efficient: String,
    /// A mid-field pick trading cost against capability
    pub balanced: String,
}

/// Cost and resale price for one billing granularity
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PricePoint {
    pub cost: f64,
    pub price: f64,
    pub markup: f64,
}

/// Margin sanity flag for the resale overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarginAdvice {
    /// Margin leaves little room for support and infrastructure cost
    LowMargin { margin_percent: f64 },
    /// Margin is likely above what the market bears
    HighMargin { margin_percent: f64 },
}

/// Resale pricing overlay for one model at a given margin
#[derive(Debug, Clone, Serialize)]
pub struct ResalePricing {
    pub model: String,
    pub margin_percent: f64,
    pub per_conversation: Option<PricePoint>,
    pub per_message: Option<PricePoint>,
    pub daily: PricePoint,
    pub monthly: PricePoint,
    pub yearly: PricePoint,
    pub advice: Option<MarginAdvice>,
}

/// Full scenario analysis output
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub generated_at: DateTime<Utc>,
    pub parameters_echo: ScenarioTokens,
    pub results: Vec<CostResult>,
    pub summary: Option<CostSummary>,
    pub insights: Vec<Insight>,
    pub recommendations: Option<Recommendations>,
}

/// Run the scenario analysis over the generative catalog
pub fn run_scenario(
    catalog: &[PricingEntry],
    params: &ScenarioParameters,
    cfg: &CalcConfig,
) -> ScenarioReport {
    let usage = UsageParameters::Generative(params.usage());
    let results = price_all(catalog, &usage, cfg);

    let tokens = scenario_tokens(params, cfg);
    let summary = summarize(&results);
    let insights = derive_insights(params, &tokens, &results, summary.as_ref());
    let recommendations = derive_recommendations(&results, cfg);

    info!(
        "Scenario over {} models: {} insights",
        results.len(),
        insights.len()
    );

    ScenarioReport {
        generated_at: Utc::now(),
        parameters_echo: tokens,
        results,
        summary,
        insights,
        recommendations,
    }
}

fn scenario_tokens(params: &ScenarioParameters, cfg: &CalcConfig) -> ScenarioTokens {
    let usage = normalize(&UsageParameters::Generative(params.usage()), cfg);
    let days = f64::from(params.days_per_year);

    ScenarioTokens {
        daily_input_tokens: usage.daily_input_tokens,
        daily_output_tokens: usage.daily_output_tokens,
        monthly_input_tokens: usage.daily_input_tokens * cfg.days_per_month,
        monthly_output_tokens: usage.daily_output_tokens * cfg.days_per_month,
        yearly_input_tokens: usage.daily_input_tokens * days,
        yearly_output_tokens: usage.daily_output_tokens * days,
        total_daily_messages: usage.total_daily_messages,
    }
}

fn derive_insights(
    params: &ScenarioParameters,
    tokens: &ScenarioTokens,
    results: &[CostResult],
    summary: Option<&CostSummary>,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let Some(summary) = summary {
        if summary.savings.amount > 0.0 {
            insights.push(Insight::CostSavings {
                model: summary.best.model.clone(),
                amount: summary.savings.amount,
                percent: summary.savings.percent,
            });
        }
    }

    if params.daily_conversations > VERY_HIGH_VOLUME_CONVERSATIONS {
        insights.push(Insight::VeryHighVolume {
            daily_conversations: params.daily_conversations,
        });
    } else if params.daily_conversations > HIGH_VOLUME_CONVERSATIONS {
        insights.push(Insight::HighVolume {
            daily_conversations: params.daily_conversations,
        });
    }

    if tokens.total_daily_messages > 0 {
        let avg = (tokens.daily_input_tokens + tokens.daily_output_tokens)
            / tokens.total_daily_messages as f64;
        if avg > TOKEN_OPTIMIZATION_THRESHOLD {
            insights.push(Insight::TokenOptimization {
                avg_tokens_per_message: avg,
            });
        }
    }

    // Diversity among the top picks, not the whole catalog
    let mut providers: Vec<String> = Vec::new();
    for r in results.iter().take(3) {
        if !providers.iter().any(|p| p == &r.provider) {
            providers.push(r.provider.clone());
        }
    }
    if providers.len() > 1 {
        insights.push(Insight::ProviderDiversity { providers });
    }

    if let Some(summary) = summary {
        if let Some(per_conversation) = summary.best.per_conversation {
            if per_conversation < EXCELLENT_PER_CONVERSATION {
                insights.push(Insight::ExcellentEfficiency { per_conversation });
            } else if per_conversation > REVIEW_PER_CONVERSATION {
                insights.push(Insight::OptimizationOpportunity { per_conversation });
            }
        }
    }

    insights
}

fn derive_recommendations(results: &[CostResult], cfg: &CalcConfig) -> Option<Recommendations> {
    if results.is_empty() {
        return None;
    }

    // Results arrive sorted by yearly total ascending
    let budget = results[0].model.clone();

    let most_efficient = results
        .iter()
        .max_by_key(|r| efficiency_score(r, cfg))?
        .model
        .clone();

    let balanced = results[results.len() / 3].model.clone();

    Some(Recommendations {
        budget,
        most_efficient,
        balanced,
    })
}

/// Round a price up to the next multiple of `step`
fn round_up(value: f64, step: f64) -> f64 {
    (value / step).ceil() * step
}

fn price_point(cost: f64, margin_percent: f64, step: Option<f64>) -> PricePoint {
    let raw = cost * (1.0 + margin_percent.max(0.0) / 100.0);
    let price = match step {
        Some(step) => round_up(raw, step),
        None => raw,
    };
    PricePoint {
        cost,
        price,
        markup: price - cost,
    }
}

/// Apply a resale margin to one model's costs
///
/// Per-conversation and per-message prices round up to customer-friendly
/// steps; the period totals stay exact.
pub fn resale_pricing(result: &CostResult, margin_percent: f64) -> ResalePricing {
    let margin = margin_percent.max(0.0);

    let advice = if margin < LOW_MARGIN_PERCENT {
        Some(MarginAdvice::LowMargin {
            margin_percent: margin,
        })
    } else if margin > HIGH_MARGIN_PERCENT {
        Some(MarginAdvice::HighMargin {
            margin_percent: margin,
        })
    } else {
        None
    };

    ResalePricing {
        model: result.model.clone(),
        margin_percent: margin,
        per_conversation: result
            .per_conversation
            .map(|c| price_point(c, margin, Some(PER_CONVERSATION_PRICE_STEP))),
        per_message: result
            .per_message
            .map(|c| price_point(c, margin, Some(PER_MESSAGE_PRICE_STEP))),
        daily: price_point(result.daily_total, margin, None),
        monthly: price_point(result.monthly_total, margin, None),
        yearly: price_point(result.yearly_total, margin, None),
        advice,
    }
}
