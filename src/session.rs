use crate::config::CalcConfig;
use crate::pricing::calculator::{normalize, price_all};
use crate::pricing::models::{CostResult, PricingEntry, TokenUsage, UsageParameters};
use crate::pricing::ranking::{rank, summarize, CostSummary, RankMetric, ResultFilter};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Current calculator inputs for an interactive session
#[derive(Debug, Clone)]
pub struct CalculatorState {
    pub params: UsageParameters,
    pub metric: RankMetric,
    pub filter: ResultFilter,
}

impl CalculatorState {
    pub fn new(params: UsageParameters) -> Self {
        Self {
            params,
            metric: RankMetric::default(),
            filter: ResultFilter::default(),
        }
    }
}

/// One completed calculation over the full state
#[derive(Debug, Clone, Serialize)]
pub struct Calculation {
    pub generated_at: DateTime<Utc>,
    #[serde(skip)]
    pub usage: TokenUsage,
    pub results: Vec<CostResult>,
    pub summary: Option<CostSummary>,
}

/// Recompute everything from the current state
///
/// Always a full pass over the catalog; results never carry over between
/// runs, so stale figures cannot survive a parameter change.
pub fn recalculate(
    catalog: &[PricingEntry],
    state: &CalculatorState,
    cfg: &CalcConfig,
) -> Calculation {
    let usage = normalize(&state.params, cfg);
    let mut results = state.filter.apply(&price_all(catalog, &state.params, cfg));
    rank(&mut results, state.metric, cfg);

    let summary = summarize(&results);

    debug!("Recalculated {} results", results.len());

    Calculation {
        generated_at: Utc::now(),
        usage,
        results,
        summary,
    }
}

/// Coalesces rapid input changes into one recalculation
///
/// Poll-style: callers mark changes as they happen and ask `ready()`
/// whether the quiet period has elapsed.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending_since: Option<Instant>,
}

impl Debouncer {
    pub fn new(cfg: &CalcConfig) -> Self {
        Self {
            quiet: Duration::from_millis(cfg.debounce_ms),
            pending_since: None,
        }
    }

    /// Record an input change; restarts the quiet period
    pub fn mark_changed(&mut self) {
        self.pending_since = Some(Instant::now());
    }

    /// True once the quiet period has passed since the last change;
    /// clears the pending flag
    pub fn ready(&mut self) -> bool {
        match self.pending_since {
            Some(since) if since.elapsed() >= self.quiet => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }
}
