use serde::Deserialize;

use crate::accessor::SENSOR_READINGS_TABLE;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub monitoring: MonitoringConfig,
    pub feed: FeedConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// Polling interval for the fetch-and-recompute pass.
    pub poll_interval_ms: u64,
    /// Readings per fetch (the N in "N most recent"). Also the default `limit` for HTTP queries.
    pub reading_limit: u32,
    /// How often to log monitor stats at INFO level.
    pub stats_log_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Insert events buffered per subscriber (slow subscribers lag and skip).
    pub broadcast_capacity: usize,
    /// Table whose inserts trigger a refresh. Must name the table `ReadingRepo` stores into.
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    SENSOR_READINGS_TABLE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Rows shown in the PDF trend table.
    #[serde(default = "default_trend_rows")]
    pub trend_rows: usize,
}

fn default_trend_rows() -> usize {
    10
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            trend_rows: default_trend_rows(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            self.monitoring.poll_interval_ms > 0,
            "monitoring.poll_interval_ms must be > 0, got {}",
            self.monitoring.poll_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.reading_limit > 0,
            "monitoring.reading_limit must be > 0, got {}",
            self.monitoring.reading_limit
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        anyhow::ensure!(
            self.feed.broadcast_capacity > 0,
            "feed.broadcast_capacity must be > 0, got {}",
            self.feed.broadcast_capacity
        );
        anyhow::ensure!(
            self.feed.table == SENSOR_READINGS_TABLE,
            "feed.table must be {:?} (the table the reading store serves), got {:?}",
            SENSOR_READINGS_TABLE,
            self.feed.table
        );
        anyhow::ensure!(
            self.report.trend_rows > 0,
            "report.trend_rows must be > 0, got {}",
            self.report.trend_rows
        );
        Ok(())
    }
}
