use crate::config::CalcConfig;
use crate::pricing::models::{CostResult, Period, PricingEntry, TokenUsage, UsageParameters};
use tracing::debug;

/// Clamp user-supplied numbers to a safe non-negative value
///
/// Negative and non-finite input degrades to zero instead of erroring;
/// downstream arithmetic then yields zero-cost results.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Convert usage parameters into normalized daily token consumption
pub fn normalize(params: &UsageParameters, cfg: &CalcConfig) -> TokenUsage {
    match params {
        UsageParameters::Generative(p) => {
            let input_tokens_per_message =
                sanitize(p.input_words_per_message) * cfg.tokens_per_word;
            let output_tokens_per_message =
                sanitize(p.output_words_per_message) * cfg.tokens_per_word;

            let total_daily_messages = p
                .daily_conversations
                .saturating_mul(p.messages_per_conversation);
            let scale = total_daily_messages as f64;

            TokenUsage {
                daily_input_tokens: input_tokens_per_message * scale,
                daily_output_tokens: output_tokens_per_message * scale,
                total_daily_messages,
            }
        }
        UsageParameters::Embedding(p) => {
            // Explicit token counts win over word counts
            let raw_tokens = match p.explicit_tokens {
                Some(t) if t.is_finite() && t > 0.0 => t,
                _ => sanitize(p.words) * cfg.tokens_per_word,
            };

            let daily_tokens = match p.period {
                Period::Daily => raw_tokens,
                Period::Monthly => raw_tokens / cfg.days_per_month,
                Period::Yearly => raw_tokens / f64::from(p.days_per_year.max(1)),
            };

            TokenUsage {
                daily_input_tokens: daily_tokens,
                daily_output_tokens: 0.0,
                // Placeholder so the shape stays uniform; per-message cost
                // is suppressed in this mode, never divided by this
                total_daily_messages: 1,
            }
        }
    }
}

/// Price one catalog entry against normalized usage
pub fn price(
    entry: &PricingEntry,
    usage: &TokenUsage,
    params: &UsageParameters,
    cfg: &CalcConfig,
) -> CostResult {
    let embedding_mode = matches!(params, UsageParameters::Embedding(_));

    // Embedding runs never pay for output, whatever the entry says
    let output_price_per_token = if embedding_mode {
        0.0
    } else {
        entry.output_price_per_token
    };

    let daily_input_cost = usage.daily_input_tokens * entry.input_price_per_token;
    let daily_output_cost = usage.daily_output_tokens * output_price_per_token;
    let daily_total = daily_input_cost + daily_output_cost;

    let (per_conversation, per_message) = match params {
        UsageParameters::Generative(p) => {
            let per_conversation = if p.daily_conversations > 0 {
                Some(daily_total / p.daily_conversations as f64)
            } else {
                None
            };
            let per_message = if usage.total_daily_messages > 0 {
                Some(daily_total / usage.total_daily_messages as f64)
            } else {
                None
            };
            (per_conversation, per_message)
        }
        // Per-conversation and per-message are meaningless for embeddings
        UsageParameters::Embedding(_) => (None, None),
    };

    CostResult {
        model: entry.id.clone(),
        provider: entry.provider.clone(),
        category: entry.category,
        daily_total,
        monthly_total: daily_total * cfg.days_per_month,
        yearly_total: daily_total * f64::from(params.days_per_year()),
        per_conversation,
        per_message,
        input_price_per_million: entry.input_price_per_million(),
        output_price_per_million: if embedding_mode {
            0.0
        } else {
            entry.output_price_per_million()
        },
        daily_input_tokens: usage.daily_input_tokens,
        daily_output_tokens: usage.daily_output_tokens,
        total_daily_tokens: usage.total_daily_tokens(),
    }
}

/// Price every catalog entry eligible for the active mode
///
/// Filtering by category happens here, not at call sites. Results come
/// back sorted by yearly total ascending (cheapest first), ties in
/// catalog order.
pub fn price_all(
    catalog: &[PricingEntry],
    params: &UsageParameters,
    cfg: &CalcConfig,
) -> Vec<CostResult> {
    let usage = normalize(params, cfg);
    let category = params.category();

    let mut results: Vec<CostResult> = catalog
        .iter()
        .filter(|entry| entry.category == category)
        .map(|entry| price(entry, &usage, params, cfg))
        .collect();

    results.sort_by(|a, b| a.yearly_total.total_cmp(&b.yearly_total));

    debug!(
        "Priced {} {} models at {:.0} daily tokens",
        results.len(),
        category,
        usage.total_daily_tokens()
    );

    results
}
