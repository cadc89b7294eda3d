use crowdcast_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = CrowdcastConfig::from_toml("").unwrap();

    // Forecast defaults
    assert_eq!(config.forecast.lookback_days, 30);
    assert_eq!(config.forecast.half_life_hours, 24.0);
    assert_eq!(config.forecast.weekday_match_bonus, 2.0);
    assert_eq!(config.forecast.min_samples, 20);
    assert_eq!(config.forecast.full_trust_samples, 100);
    assert_eq!(config.forecast.regularization_c, 0.8);
    assert_eq!(config.forecast.model_weight_min, 0.55);
    assert_eq!(config.forecast.model_weight_max, 0.90);
    assert_eq!(config.forecast.model_weight_base, 0.70);
    assert_eq!(config.forecast.low_below_percent, 30);
    assert_eq!(config.forecast.high_from_percent, 60);
    assert_eq!(config.forecast.default_offsets, vec![0, 10, 20, 30, 60]);

    // Cache defaults
    assert_eq!(config.cache.bucket_minutes, 5);
    assert_eq!(config.cache.max_entries, 4_096);

    // Storage defaults
    assert_eq!(config.storage.db_path, "crowdcast.db");

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[forecast]
min_samples = 10
default_offsets = [0, 15]

[cache]
bucket_minutes = 10
"#;
    let config = CrowdcastConfig::from_toml(toml).unwrap();
    assert_eq!(config.forecast.min_samples, 10);
    assert_eq!(config.forecast.default_offsets, vec![0, 15]);
    // Non-overridden fields keep defaults
    assert_eq!(config.forecast.full_trust_samples, 100);
    assert_eq!(config.cache.bucket_minutes, 10);
    assert_eq!(config.cache.max_entries, 4_096);
}

#[test]
fn config_round_trips_through_toml() {
    let config = CrowdcastConfig::default();
    let rendered = config.to_toml().unwrap();
    let reparsed = CrowdcastConfig::from_toml(&rendered).unwrap();
    assert_eq!(reparsed.forecast.min_samples, config.forecast.min_samples);
    assert_eq!(reparsed.cache.bucket_minutes, config.cache.bucket_minutes);
}

#[test]
fn config_rejects_min_samples_at_or_above_full_trust() {
    let toml = "[forecast]\nmin_samples = 100\nfull_trust_samples = 100\n";
    let err = CrowdcastConfig::from_toml(toml).unwrap_err();
    assert!(err.to_string().contains("min_samples"));
}

#[test]
fn config_rejects_out_of_range_weights() {
    let toml = "[forecast]\nmodel_weight_base = 1.5\n";
    assert!(CrowdcastConfig::from_toml(toml).is_err());

    let toml = "[forecast]\nmodel_weight_min = 0.95\n";
    assert!(CrowdcastConfig::from_toml(toml).is_err());
}

#[test]
fn config_rejects_bad_bucket_width() {
    assert!(CrowdcastConfig::from_toml("[cache]\nbucket_minutes = 0\n").is_err());
    assert!(CrowdcastConfig::from_toml("[cache]\nbucket_minutes = 61\n").is_err());
}

#[test]
fn config_rejects_malformed_toml() {
    let err = CrowdcastConfig::from_toml("[forecast\nmin_samples = ").unwrap_err();
    assert!(matches!(err, crowdcast_core::CrowdcastError::ConfigError(_)));
}

#[test]
fn config_bounds_the_lookback_window() {
    let err = CrowdcastConfig::from_toml("[forecast]\nlookback_days = 200000000\n").unwrap_err();
    assert!(err.to_string().contains("lookback_days"));
    assert!(CrowdcastConfig::from_toml("[forecast]\nlookback_days = 0\n").is_err());

    let max = crowdcast_core::constants::MAX_LOOKBACK_DAYS;
    let config = CrowdcastConfig::from_toml(&format!("[forecast]\nlookback_days = {max}\n")).unwrap();
    assert_eq!(config.forecast.lookback_days, max);
}
