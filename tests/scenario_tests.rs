use costwise::config::CalcConfig;
use costwise::pricing::scenario::Insight;
use costwise::pricing::{default_catalog, load_catalog, resale_pricing, run_scenario, ScenarioParameters};

#[test]
fn test_scenario_report_shape() {
    let report = run_scenario(
        &default_catalog(),
        &ScenarioParameters::default(),
        &CalcConfig::default(),
    );

    assert!(!report.results.is_empty());
    assert!(report.summary.is_some());
    assert!(report.recommendations.is_some());
    assert!(!report.insights.is_empty());

    let tokens = &report.parameters_echo;
    assert!((tokens.monthly_input_tokens - tokens.daily_input_tokens * 30.0).abs() < 1e-3);
    assert!((tokens.yearly_input_tokens - tokens.daily_input_tokens * 365.0).abs() < 1.0);
}

#[test]
fn test_scenario_volume_insight_boundaries() {
    let cfg = CalcConfig::default();
    let catalog = default_catalog();

    // At exactly the threshold, no volume insight fires
    let at_threshold = run_scenario(
        &catalog,
        &ScenarioParameters {
            daily_conversations: 10_000,
            ..ScenarioParameters::default()
        },
        &cfg,
    );
    assert!(!at_threshold.insights.iter().any(|i| matches!(
        i,
        Insight::HighVolume { .. } | Insight::VeryHighVolume { .. }
    )));

    let above = run_scenario(
        &catalog,
        &ScenarioParameters {
            daily_conversations: 10_001,
            ..ScenarioParameters::default()
        },
        &cfg,
    );
    assert!(above
        .insights
        .iter()
        .any(|i| matches!(i, Insight::HighVolume { .. })));
}

#[test]
fn test_scenario_recommendations_come_from_results() {
    let report = run_scenario(
        &default_catalog(),
        &ScenarioParameters::default(),
        &CalcConfig::default(),
    );
    let recs = report.recommendations.unwrap();

    for pick in [&recs.budget, &recs.most_efficient, &recs.balanced] {
        assert!(report.results.iter().any(|r| &r.model == pick));
    }
}

#[test]
fn test_resale_prices_cover_cost() {
    let report = run_scenario(
        &default_catalog(),
        &ScenarioParameters::default(),
        &CalcConfig::default(),
    );

    for margin in [0.0, 15.0, 50.0, 120.0] {
        for result in &report.results {
            let resale = resale_pricing(result, margin);
            if let Some(p) = resale.per_conversation {
                assert!(p.price >= p.cost);
                assert!(p.markup >= 0.0);
            }
            if let Some(p) = resale.per_message {
                assert!(p.price >= p.cost);
            }
            assert!(resale.daily.price >= resale.daily.cost);
            assert!(resale.monthly.price >= resale.monthly.cost);
            assert!(resale.yearly.price >= resale.yearly.cost);
        }
    }
}

#[test]
fn test_scenario_report_serializes_to_json() {
    let report = run_scenario(
        &default_catalog(),
        &ScenarioParameters::default(),
        &CalcConfig::default(),
    );

    let json = serde_json::to_string_pretty(&report).unwrap();
    assert!(json.contains("\"insights\""));
    assert!(json.contains("\"generated_at\""));
}

#[test]
fn test_scenario_with_custom_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"
        {
            "models": [
                {
                    "id": "alpha",
                    "provider": "A",
                    "category": "generative",
                    "input_price_per_million": 1.0,
                    "output_price_per_million": 5.0
                },
                {
                    "id": "beta",
                    "provider": "B",
                    "category": "generative",
                    "input_price_per_million": 2.0,
                    "output_price_per_million": 10.0
                }
            ]
        }
        "#,
    )
    .unwrap();

    let catalog = load_catalog(&path).unwrap();
    let report = run_scenario(
        &catalog,
        &ScenarioParameters::default(),
        &CalcConfig::default(),
    );

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].model, "alpha");
    let summary = report.summary.unwrap();
    // beta is exactly twice the price of alpha
    assert!((summary.savings.percent.unwrap() - 50.0).abs() < 1e-9);
}
