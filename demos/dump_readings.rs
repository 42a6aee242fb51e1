// Dump the latest sensor readings and their derived summary as JSON.
//
// Usage: cargo run --example dump_readings -- [DB_PATH] [LIMIT]
//   DB_PATH  default: ./data/readings.db
//   LIMIT    default: 5

use healthmon::accessor::ReadingAccessor;
use healthmon::monitor::MonitorSnapshot;
use healthmon::reading_repo::ReadingRepo;
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(String::as_str).unwrap_or("./data/readings.db");
    let limit: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5);

    let repo = Arc::new(ReadingRepo::connect(path, 1).await?);
    let accessor = ReadingAccessor::new(repo);
    let readings = accessor.get_latest_readings(limit).await?;
    let snapshot = MonitorSnapshot::from_readings(readings, chrono::Utc::now());

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
