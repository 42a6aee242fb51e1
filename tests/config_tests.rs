// Config loading and validation tests

use healthmon::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[database]
path = "data/readings.db"
max_pool_size = 5

[monitoring]
poll_interval_ms = 5000
reading_limit = 50
stats_log_interval_secs = 300

[feed]
broadcast_capacity = 64
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.database.path, "data/readings.db");
    assert_eq!(config.database.max_pool_size, 5);
    assert_eq!(config.monitoring.poll_interval_ms, 5000);
    assert_eq!(config.monitoring.reading_limit, 50);
    assert_eq!(config.feed.broadcast_capacity, 64);
}

#[test]
fn test_config_defaults() {
    let config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    assert_eq!(config.feed.table, "sensor_readings");
    assert_eq!(config.report.trend_rows, 10);
}

#[test]
fn test_config_report_section_overrides_default() {
    let s = format!("{VALID_CONFIG}\n[report]\ntrend_rows = 25\n");
    let config = AppConfig::load_from_str(&s).unwrap();
    assert_eq!(config.report.trend_rows, 25);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_db_path() {
    let bad = VALID_CONFIG.replace("path = \"data/readings.db\"", "path = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("database.path"));
}

#[test]
fn test_config_validation_rejects_max_pool_size_zero() {
    let bad = VALID_CONFIG.replace("max_pool_size = 5", "max_pool_size = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_pool_size"));
}

#[test]
fn test_config_validation_rejects_poll_interval_zero() {
    let bad = VALID_CONFIG.replace("poll_interval_ms = 5000", "poll_interval_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("poll_interval_ms"));
}

#[test]
fn test_config_validation_rejects_reading_limit_zero() {
    let bad = VALID_CONFIG.replace("reading_limit = 50", "reading_limit = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("reading_limit"));
}

#[test]
fn test_config_validation_rejects_stats_log_interval_zero() {
    let bad = VALID_CONFIG.replace(
        "stats_log_interval_secs = 300",
        "stats_log_interval_secs = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("stats_log_interval_secs"));
}

#[test]
fn test_config_validation_rejects_broadcast_capacity_zero() {
    let bad = VALID_CONFIG.replace("broadcast_capacity = 64", "broadcast_capacity = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("broadcast_capacity"));
}

#[test]
fn test_config_validation_rejects_empty_table() {
    let bad = VALID_CONFIG.replace(
        "broadcast_capacity = 64",
        "broadcast_capacity = 64\ntable = \"\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("feed.table"));
}

#[test]
fn test_config_validation_rejects_table_the_store_does_not_serve() {
    let bad = VALID_CONFIG.replace(
        "broadcast_capacity = 64",
        "broadcast_capacity = 64\ntable = \"readings\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("feed.table"));
    assert!(err.to_string().contains("sensor_readings"));
}

#[test]
fn test_config_accepts_explicit_sensor_readings_table() {
    let ok = VALID_CONFIG.replace(
        "broadcast_capacity = 64",
        "broadcast_capacity = 64\ntable = \"sensor_readings\"",
    );
    let config = AppConfig::load_from_str(&ok).unwrap();
    assert_eq!(config.feed.table, "sensor_readings");
}

#[test]
fn test_config_validation_rejects_trend_rows_zero() {
    let s = format!("{VALID_CONFIG}\n[report]\ntrend_rows = 0\n");
    let err = AppConfig::load_from_str(&s).unwrap_err();
    assert!(err.to_string().contains("trend_rows"));
}

#[test]
fn test_config_missing_section_fails() {
    let bad = VALID_CONFIG.replace("[feed]\nbroadcast_capacity = 64\n", "");
    assert!(AppConfig::load_from_str(&bad).is_err());
}
