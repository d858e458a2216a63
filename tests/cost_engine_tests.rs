use costwise::config::CalcConfig;
use costwise::pricing::{
    default_catalog, normalize, price_all, EmbeddingUsage, GenerativeUsage, ModelCategory, Period,
    UsageParameters,
};

fn default_generative() -> UsageParameters {
    UsageParameters::Generative(GenerativeUsage::default())
}

#[test]
fn test_default_workload_token_normalization() {
    // 70,000 conversations x 5 messages x 30 input words x 4/3
    let usage = normalize(&default_generative(), &CalcConfig::default());

    assert!((usage.daily_input_tokens - 14_000_000.0).abs() < 1e-3);
    assert!((usage.daily_output_tokens - 93_333_333.333).abs() < 0.5);
    assert_eq!(usage.total_daily_messages, 350_000);
}

#[test]
fn test_gpt4o_daily_total_for_default_workload() {
    let cfg = CalcConfig::default();
    let results = price_all(&default_catalog(), &default_generative(), &cfg);
    let gpt4o = results.iter().find(|r| r.model == "GPT-4o").unwrap();

    // 14M x $2.50/1M + 93.33M x $10.00/1M
    assert!((gpt4o.daily_total - 968.33).abs() < 0.01);
    assert!((gpt4o.monthly_total - gpt4o.daily_total * 30.0).abs() < 1e-6);
    assert!((gpt4o.yearly_total - gpt4o.daily_total * 365.0).abs() < 1e-3);
}

#[test]
fn test_embedding_small_model_daily_total() {
    let cfg = CalcConfig::default();
    let params = UsageParameters::Embedding(EmbeddingUsage {
        explicit_tokens: Some(500_000.0),
        period: Period::Daily,
        ..EmbeddingUsage::default()
    });

    let results = price_all(&default_catalog(), &params, &cfg);
    let small = results
        .iter()
        .find(|r| r.model == "text-embedding-3-small")
        .unwrap();

    // 500K tokens x $0.02/1M
    assert!((small.daily_total - 0.01).abs() < 1e-9);
}

#[test]
fn test_mode_exclusivity() {
    let cfg = CalcConfig::default();
    let catalog = default_catalog();

    let generative = price_all(&catalog, &default_generative(), &cfg);
    assert!(!generative.is_empty());
    for r in &generative {
        assert_eq!(r.category, ModelCategory::Generative);
        assert!(r.per_conversation.is_some());
        assert!(r.per_message.is_some());
    }

    let embedding_params = UsageParameters::Embedding(EmbeddingUsage {
        explicit_tokens: Some(1_000_000.0),
        ..EmbeddingUsage::default()
    });
    let embedding = price_all(&catalog, &embedding_params, &cfg);
    assert!(!embedding.is_empty());
    for r in &embedding {
        assert_eq!(r.category, ModelCategory::Embedding);
        assert_eq!(r.per_conversation, None);
        assert_eq!(r.per_message, None);
        assert_eq!(r.daily_output_tokens, 0.0);
    }
}

#[test]
fn test_cost_monotonic_in_volume() {
    let cfg = CalcConfig::default();
    let catalog = default_catalog();

    let small = price_all(
        &catalog,
        &UsageParameters::Generative(GenerativeUsage {
            daily_conversations: 1_000,
            ..GenerativeUsage::default()
        }),
        &cfg,
    );
    let large = price_all(
        &catalog,
        &UsageParameters::Generative(GenerativeUsage {
            daily_conversations: 10_000,
            ..GenerativeUsage::default()
        }),
        &cfg,
    );

    for s in &small {
        let l = large.iter().find(|r| r.model == s.model).unwrap();
        assert!(l.daily_total > s.daily_total, "{}", s.model);
        // Linear in volume
        assert!((l.daily_total - s.daily_total * 10.0).abs() < 1e-6);
    }
}

#[test]
fn test_zero_volume_costs_nothing() {
    let cfg = CalcConfig::default();
    let params = UsageParameters::Generative(GenerativeUsage {
        daily_conversations: 0,
        ..GenerativeUsage::default()
    });

    for r in price_all(&default_catalog(), &params, &cfg) {
        assert_eq!(r.daily_total, 0.0);
        assert_eq!(r.yearly_total, 0.0);
        assert_eq!(r.per_conversation, None);
    }
}

#[test]
fn test_results_sorted_cheapest_first() {
    let cfg = CalcConfig::default();
    let results = price_all(&default_catalog(), &default_generative(), &cfg);

    for pair in results.windows(2) {
        assert!(pair[0].yearly_total <= pair[1].yearly_total);
    }
    // Flash-Lite has the lowest prices in the built-in catalog
    assert_eq!(results[0].model, "Gemini 2.5 Flash-Lite");
}

#[test]
fn test_custom_tokens_per_word_ratio() {
    let mut cfg = CalcConfig::default();
    cfg.tokens_per_word = 1.0;

    let usage = normalize(&default_generative(), &cfg);
    // 70,000 x 5 x 30 words, one token each
    assert!((usage.daily_input_tokens - 10_500_000.0).abs() < 1e-6);
}
