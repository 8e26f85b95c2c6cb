use msg_stream_rust::config::AppConfig;

#[test]
fn test_defaults_are_valid() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.source.poll_interval_secs, 2);
    assert_eq!(config.reporter.interval_secs, 30);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "text");
}

#[test]
fn test_zero_poll_interval_is_rejected() {
    let mut config = AppConfig::default();
    config.source.poll_interval_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_report_interval_is_rejected() {
    let mut config = AppConfig::default();
    config.reporter.interval_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_max_retries_is_rejected() {
    let mut config = AppConfig::default();
    config.source.max_retries = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_empty_paths_are_rejected() {
    let mut config = AppConfig::default();
    config.source.path = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.database.path = String::new();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.reporter.chart_path = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_load_defers_validation_to_caller() {
    // A zero interval from the environment must survive load(): overrides
    // (CLI flags) are applied on top before the one final validate() call.
    std::env::set_var("MSG_STREAM__SOURCE__POLL_INTERVAL_SECS", "0");
    let config = AppConfig::load().expect("load must not reject overridable values");
    assert_eq!(config.source.poll_interval_secs, 0);
    assert!(config.validate().is_err());
    std::env::remove_var("MSG_STREAM__SOURCE__POLL_INTERVAL_SECS");
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let mut config = AppConfig::default();
    config.logging.level = "verbose".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_log_format_is_rejected() {
    let mut config = AppConfig::default();
    config.logging.format = "xml".to_string();
    assert!(config.validate().is_err());
}
