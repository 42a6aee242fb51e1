// SQLite reading table. Append-only: the core never updates or deletes a reading.
// Timestamps are stored as epoch milliseconds (UTC).

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

use crate::accessor::{ReadingSource, RecentQuery, SENSOR_READINGS_TABLE};
use crate::models::{ReadingRecord, SensorReading};

pub struct ReadingRepo {
    pool: SqlitePool,
}

impl ReadingRepo {
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sensor_readings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp INTEGER NOT NULL,
                temperature REAL NOT NULL,
                humidity REAL NOT NULL,
                mq3_1 REAL NOT NULL,
                mq3_2 REAL NOT NULL,
                mq135 REAL NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sensor_readings_timestamp ON sensor_readings(timestamp)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Validates and stores one reading. A missing timestamp means "now"; any id on the
    /// record is ignored (the table assigns it).
    #[instrument(skip(self, record), fields(repo = "readings", operation = "append_reading"))]
    pub async fn append_reading(&self, record: &ReadingRecord) -> anyhow::Result<SensorReading> {
        let now = Utc::now();
        record.validate(now)?;
        let timestamp = record.timestamp.unwrap_or(now);

        let result = sqlx::query(
            "INSERT INTO sensor_readings (timestamp, temperature, humidity, mq3_1, mq3_2, mq135) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(timestamp.timestamp_millis())
        .bind(record.temperature)
        .bind(record.humidity)
        .bind(record.mq3_1)
        .bind(record.mq3_2)
        .bind(record.mq135)
        .execute(&self.pool)
        .await?;

        Ok(SensorReading {
            id: result.last_insert_rowid(),
            timestamp,
            temperature: record.temperature,
            humidity: record.humidity,
            gas_sensor_primary: record.mq3_1,
            gas_sensor_secondary: record.mq3_2,
            air_sensor: record.mq135,
        })
    }

    pub async fn count(&self) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sensor_readings")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    /// Newest first; ties on timestamp fall back to insertion order.
    #[instrument(skip(self), fields(repo = "readings", operation = "get_latest"))]
    pub async fn get_latest(&self, limit: u32) -> anyhow::Result<Vec<SensorReading>> {
        let rows = sqlx::query(
            "SELECT id, timestamp, temperature, humidity, mq3_1, mq3_2, mq135
             FROM sensor_readings ORDER BY timestamp DESC, id DESC LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(Self::parse_reading_row(&row)?);
        }
        Ok(out)
    }

    fn parse_reading_row(row: &SqliteRow) -> anyhow::Result<SensorReading> {
        let id: i64 = row.try_get("id")?;
        let millis: i64 = row.try_get("timestamp")?;
        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| anyhow::anyhow!("reading {}: timestamp {} out of range", id, millis))?;
        Ok(SensorReading {
            id,
            timestamp,
            temperature: row.try_get("temperature")?,
            humidity: row.try_get("humidity")?,
            gas_sensor_primary: row.try_get("mq3_1")?,
            gas_sensor_secondary: row.try_get("mq3_2")?,
            air_sensor: row.try_get("mq135")?,
        })
    }
}

impl ReadingSource for ReadingRepo {
    async fn fetch_recent(&self, query: RecentQuery<'_>) -> anyhow::Result<Vec<SensorReading>> {
        anyhow::ensure!(
            query.table == SENSOR_READINGS_TABLE,
            "unknown table {:?}",
            query.table
        );
        self.get_latest(query.limit).await
    }
}
