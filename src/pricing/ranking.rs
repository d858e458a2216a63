use crate::config::CalcConfig;
use crate::error::AppError;
use crate::pricing::models::{CostResult, ModelCategory};
use serde::Serialize;

/// Metric used to order a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankMetric {
    /// Yearly total cost, ascending (the default)
    #[default]
    YearlyTotal,
    /// Monthly total cost, ascending
    MonthlyTotal,
    /// Per-message cost, ascending; results without one sort last
    PerMessage,
    /// Efficiency score, descending
    Efficiency,
}

/// Optional narrowing of a result set before ranking
#[derive(Debug, Clone, Default)]
pub struct ResultFilter {
    pub category: Option<ModelCategory>,
    pub provider: Option<String>,
}

impl ResultFilter {
    /// Keep only the results matching every set criterion
    pub fn apply(&self, results: &[CostResult]) -> Vec<CostResult> {
        results
            .iter()
            .filter(|r| self.category.is_none_or(|c| r.category == c))
            .filter(|r| {
                self.provider
                    .as_deref()
                    .is_none_or(|p| r.provider.eq_ignore_ascii_case(p))
            })
            .cloned()
            .collect()
    }
}

/// Sort results by the chosen metric
///
/// The sort is stable, so equal keys keep their incoming (catalog) order
/// and repeated runs over the same input produce identical rankings.
pub fn rank(results: &mut [CostResult], metric: RankMetric, cfg: &CalcConfig) {
    match metric {
        RankMetric::YearlyTotal => {
            results.sort_by(|a, b| a.yearly_total.total_cmp(&b.yearly_total));
        }
        RankMetric::MonthlyTotal => {
            results.sort_by(|a, b| a.monthly_total.total_cmp(&b.monthly_total));
        }
        RankMetric::PerMessage => {
            results.sort_by(|a, b| {
                let ka = a.per_message.unwrap_or(f64::INFINITY);
                let kb = b.per_message.unwrap_or(f64::INFINITY);
                ka.total_cmp(&kb)
            });
        }
        RankMetric::Efficiency => {
            results.sort_by(|a, b| {
                let ka = efficiency_score(a, cfg);
                let kb = efficiency_score(b, cfg);
                kb.cmp(&ka)
            });
        }
    }
}

/// Heuristic 0..=100 efficiency score
///
/// The cost term penalizes daily cost per million tokens. Generative
/// models additionally get a balance term rewarding an output/input
/// price ratio near the configured target; the two terms are averaged.
pub fn efficiency_score(result: &CostResult, cfg: &CalcConfig) -> u8 {
    if result.total_daily_tokens <= 0.0 {
        return 0;
    }

    let cost_per_million = result.daily_total / result.total_daily_tokens * 1_000_000.0;
    let cost_term = (100.0 - cost_per_million * cfg.cost_efficiency_slope).max(0.0);

    let score = match result.category {
        ModelCategory::Embedding => cost_term,
        ModelCategory::Generative => {
            let balance_term = if result.input_price_per_million > 0.0 {
                let ratio = result.output_price_per_million / result.input_price_per_million;
                (100.0 - (ratio - cfg.balance_target_ratio).abs() * cfg.balance_slope).max(0.0)
            } else {
                0.0
            };
            (cost_term + balance_term) / 2.0
        }
    };

    score.round().clamp(0.0, 100.0) as u8
}

/// Cheapest and most expensive result by yearly total, catalog order
/// breaking ties
pub fn best_and_worst<'a>(results: &'a [CostResult]) -> Option<(&'a CostResult, &'a CostResult)> {
    let best = results
        .iter()
        .min_by(|a, b| a.yearly_total.total_cmp(&b.yearly_total))?;
    let worst = results
        .iter()
        .max_by(|a, b| a.yearly_total.total_cmp(&b.yearly_total))?;
    Some((best, worst))
}

/// Yearly saving from picking the cheapest model over the most expensive
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Savings {
    pub amount: f64,
    /// `None` when the most expensive model costs nothing
    pub percent: Option<f64>,
}

/// Best/worst digest over one ranked result set
#[derive(Debug, Clone, Serialize)]
pub struct CostSummary {
    pub best: CostResult,
    pub worst: CostResult,
    pub savings: Savings,
}

/// Summarize a non-empty result set; `None` when there is nothing to rank
pub fn summarize(results: &[CostResult]) -> Option<CostSummary> {
    let (best, worst) = best_and_worst(results)?;

    let amount = worst.yearly_total - best.yearly_total;
    let percent = if worst.yearly_total > 0.0 {
        Some(amount / worst.yearly_total * 100.0)
    } else {
        None
    };

    Some(CostSummary {
        best: best.clone(),
        worst: worst.clone(),
        savings: Savings { amount, percent },
    })
}

/// Pairwise comparison of two models out of one result set
///
/// Deltas are percentages relative to model A; `None` marks a delta that
/// has no meaningful value for this pair.
#[derive(Debug, Clone, Serialize)]
pub struct HeadToHead {
    pub model_a: String,
    pub model_b: String,
    pub yearly_delta: Option<f64>,
    pub monthly_delta: Option<f64>,
    pub per_message_delta: Option<f64>,
    pub per_conversation_delta: Option<f64>,
    pub input_price_delta: Option<f64>,
    pub output_price_delta: Option<f64>,
    pub efficiency_a: u8,
    pub efficiency_b: u8,
    /// Model with the lower yearly total
    pub cheaper: String,
    /// Model with the higher efficiency score
    pub more_efficient: String,
}

/// Percent change from `a` to `b`, suppressed when the reference is
/// zero or not finite
fn percent_delta(a: f64, b: f64) -> Option<f64> {
    if a == 0.0 || !a.is_finite() || !b.is_finite() {
        return None;
    }
    Some((b - a) / a * 100.0)
}

fn percent_delta_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => percent_delta(a, b),
        _ => None,
    }
}

/// Compare two models from an already-priced result set
pub fn head_to_head(
    results: &[CostResult],
    model_a: &str,
    model_b: &str,
    cfg: &CalcConfig,
) -> Result<HeadToHead, AppError> {
    let a = results
        .iter()
        .find(|r| r.model == model_a)
        .ok_or_else(|| AppError::ModelNotFound(model_a.to_string()))?;
    let b = results
        .iter()
        .find(|r| r.model == model_b)
        .ok_or_else(|| AppError::ModelNotFound(model_b.to_string()))?;

    // Free output tiers make a relative output-price delta meaningless;
    // otherwise floor the divisor so near-zero prices do not explode it
    let output_price_delta =
        if a.output_price_per_million == 0.0 || b.output_price_per_million == 0.0 {
            None
        } else {
            let divisor = a.output_price_per_million.max(cfg.output_price_delta_floor);
            Some((b.output_price_per_million - a.output_price_per_million) / divisor * 100.0)
        };

    let efficiency_a = efficiency_score(a, cfg);
    let efficiency_b = efficiency_score(b, cfg);

    let cheaper = if b.yearly_total < a.yearly_total {
        b.model.clone()
    } else {
        a.model.clone()
    };
    let more_efficient = if efficiency_b > efficiency_a {
        b.model.clone()
    } else {
        a.model.clone()
    };

    Ok(HeadToHead {
        model_a: a.model.clone(),
        model_b: b.model.clone(),
        yearly_delta: percent_delta(a.yearly_total, b.yearly_total),
        monthly_delta: percent_delta(a.monthly_total, b.monthly_total),
        per_message_delta: percent_delta_opt(a.per_message, b.per_message),
        per_conversation_delta: percent_delta_opt(a.per_conversation, b.per_conversation),
        input_price_delta: percent_delta(a.input_price_per_million, b.input_price_per_million),
        output_price_delta,
        efficiency_a,
        efficiency_b,
        cheaper,
        more_efficient,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(model: &str, provider: &str, yearly: f64) -> CostResult {
        let daily = yearly / 365.0;
        CostResult {
            model: model.to_string(),
            provider: provider.to_string(),
            category: ModelCategory::Generative,
            daily_total: daily,
            monthly_total: daily * 30.0,
            yearly_total: yearly,
            per_conversation: Some(daily / 1_000.0),
            per_message: Some(daily / 5_000.0),
            input_price_per_million: 1.0,
            output_price_per_million: 5.0,
            daily_input_tokens: 1_000_000.0,
            daily_output_tokens: 2_000_000.0,
            total_daily_tokens: 3_000_000.0,
        }
    }

    #[test]
    fn test_rank_yearly_ascending() {
        let mut results = vec![
            result("expensive", "A", 3_000.0),
            result("cheap", "B", 1_000.0),
            result("middle", "C", 2_000.0),
        ];
        rank(&mut results, RankMetric::YearlyTotal, &CalcConfig::default());

        let order: Vec<&str> = results.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(order, ["cheap", "middle", "expensive"]);
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let mut results = vec![
            result("first", "A", 1_000.0),
            result("second", "B", 1_000.0),
        ];
        rank(&mut results, RankMetric::YearlyTotal, &CalcConfig::default());

        assert_eq!(results[0].model, "first");
        assert_eq!(results[1].model, "second");
    }

    #[test]
    fn test_rank_per_message_missing_sorts_last() {
        let mut embedding = result("embed", "A", 100.0);
        embedding.per_message = None;
        let mut results = vec![embedding, result("chat", "B", 9_000.0)];
        rank(&mut results, RankMetric::PerMessage, &CalcConfig::default());

        assert_eq!(results[0].model, "chat");
        assert_eq!(results[1].model, "embed");
    }

    #[test]
    fn test_filter_by_provider_case_insensitive() {
        let results = vec![result("a", "OpenAI", 1.0), result("b", "Google", 2.0)];
        let filter = ResultFilter {
            provider: Some("openai".to_string()),
            ..ResultFilter::default()
        };

        let kept = filter.apply(&results);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].model, "a");
    }

    #[test]
    fn test_filter_empty_match_yields_empty() {
        let results = vec![result("a", "OpenAI", 1.0)];
        let filter = ResultFilter {
            category: Some(ModelCategory::Embedding),
            ..ResultFilter::default()
        };
        assert!(filter.apply(&results).is_empty());
    }

    #[test]
    fn test_efficiency_score_bounds() {
        let cfg = CalcConfig::default();

        let mut cheap = result("cheap", "A", 10.0);
        cheap.daily_total = 0.001;
        let score = efficiency_score(&cheap, &cfg);
        assert!(score <= 100);

        let mut expensive = result("expensive", "A", 1e9);
        expensive.daily_total = 1e6;
        assert_eq!(efficiency_score(&expensive, &cfg), 0);
    }

    #[test]
    fn test_efficiency_score_zero_tokens() {
        let mut r = result("idle", "A", 0.0);
        r.daily_total = 0.0;
        r.total_daily_tokens = 0.0;
        assert_eq!(efficiency_score(&r, &CalcConfig::default()), 0);
    }

    #[test]
    fn test_efficiency_balance_term_rewards_target_ratio() {
        let cfg = CalcConfig::default();

        // Same cost profile, only the price ratio differs
        let balanced = result("balanced", "A", 1_000.0);
        let mut skewed = result("skewed", "A", 1_000.0);
        skewed.output_price_per_million = 50.0;

        assert!(efficiency_score(&balanced, &cfg) > efficiency_score(&skewed, &cfg));
    }

    #[test]
    fn test_summarize_savings() {
        let results = vec![result("cheap", "A", 1_000.0), result("expensive", "B", 4_000.0)];
        let summary = summarize(&results).unwrap();

        assert_eq!(summary.best.model, "cheap");
        assert_eq!(summary.worst.model, "expensive");
        assert!((summary.savings.amount - 3_000.0).abs() < 1e-9);
        assert!((summary.savings.percent.unwrap() - 75.0).abs() < 1e-9);
        assert!(summary.savings.amount >= 0.0);
    }

    #[test]
    fn test_summarize_empty_set() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn test_summarize_zero_cost_suppresses_percent() {
        let mut free = result("free", "A", 0.0);
        free.daily_total = 0.0;
        let results = vec![free.clone(), free];
        let summary = summarize(&results).unwrap();
        assert_eq!(summary.savings.amount, 0.0);
        assert!(summary.savings.percent.is_none());
    }

    #[test]
    fn test_head_to_head_deltas() {
        let cfg = CalcConfig::default();
        let results = vec![result("a", "A", 1_000.0), result("b", "B", 1_500.0)];
        let h2h = head_to_head(&results, "a", "b", &cfg).unwrap();

        assert!((h2h.yearly_delta.unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(h2h.cheaper, "a");
        // Identical prices, zero delta
        assert!((h2h.input_price_delta.unwrap()).abs() < 1e-9);
    }

    #[test]
    fn test_head_to_head_unknown_model() {
        let cfg = CalcConfig::default();
        let results = vec![result("a", "A", 1_000.0)];
        let err = head_to_head(&results, "a", "missing", &cfg).unwrap_err();
        assert!(matches!(err, AppError::ModelNotFound(_)));
    }

    #[test]
    fn test_head_to_head_zero_output_price_is_not_applicable() {
        let cfg = CalcConfig::default();
        let mut a = result("a", "A", 1_000.0);
        a.output_price_per_million = 0.0;
        let results = vec![a, result("b", "B", 1_500.0)];

        let h2h = head_to_head(&results, "a", "b", &cfg).unwrap();
        assert!(h2h.output_price_delta.is_none());
    }

    #[test]
    fn test_head_to_head_output_price_divisor_floor() {
        let cfg = CalcConfig::default();
        let mut a = result("a", "A", 1_000.0);
        a.output_price_per_million = 0.0001;
        let mut b = result("b", "B", 1_500.0);
        b.output_price_per_million = 0.0002;
        let results = vec![a, b];

        let h2h = head_to_head(&results, "a", "b", &cfg).unwrap();
        // Divisor floors at 0.001, so the delta stays bounded
        assert!((h2h.output_price_delta.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_yearly_reference_suppresses_delta() {
        let cfg = CalcConfig::default();
        let mut a = result("a", "A", 0.0);
        a.daily_total = 0.0;
        a.monthly_total = 0.0;
        let results = vec![a, result("b", "B", 1_500.0)];

        let h2h = head_to_head(&results, "a", "b", &cfg).unwrap();
        assert!(h2h.yearly_delta.is_none());
        assert!(h2h.monthly_delta.is_none());
    }
}
