pub mod calculator;
pub mod catalog;
pub mod models;
pub mod ranking;
pub mod scenario;

pub use calculator::{normalize, price, price_all};
pub use catalog::{default_catalog, load_catalog};
pub use models::{
    CostResult, EmbeddingUsage, GenerativeUsage, ModelCategory, Period, PricingEntry, TokenUsage,
    UsageParameters,
};
pub use ranking::{
    efficiency_score, head_to_head, rank, summarize, CostSummary, HeadToHead, RankMetric,
    ResultFilter, Savings,
};
pub use scenario::{resale_pricing, run_scenario, ScenarioParameters, ScenarioReport};
