// Reading Store Accessor tests: injected fake source and the SQLite-backed store

mod common;

use common::{FakeSource, reading, record};
use healthmon::accessor::{ReadingAccessor, SENSOR_READINGS_TABLE};
use healthmon::error::PipelineError;
use healthmon::reading_repo::ReadingRepo;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn accessor_issues_one_query_with_table_and_limit() {
    let source = Arc::new(FakeSource::new(vec![
        reading(1, 1_000, 20.0, 50.0, 10.0, 20.0, 50.0),
        reading(2, 2_000, 22.0, 55.0, 12.0, 18.0, 60.0),
        reading(3, 3_000, 23.0, 56.0, 12.0, 18.0, 60.0),
    ]));
    let accessor = ReadingAccessor::new(source.clone());

    let latest = accessor.get_latest_readings(2).await.unwrap();
    assert_eq!(latest.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 2]);

    let queries = source.queries.lock().unwrap().clone();
    assert_eq!(queries, vec![(SENSOR_READINGS_TABLE.to_string(), 2)]);
}

#[tokio::test]
async fn accessor_returns_fewer_rows_without_padding() {
    let source = Arc::new(FakeSource::new(vec![
        reading(1, 1_000, 20.0, 50.0, 10.0, 20.0, 50.0),
        reading(2, 2_000, 22.0, 55.0, 12.0, 18.0, 60.0),
    ]));
    let accessor = ReadingAccessor::new(source);
    let latest = accessor.get_latest_readings(3).await.unwrap();
    assert_eq!(latest.len(), 2);
}

#[tokio::test]
async fn accessor_rejects_zero_limit_without_querying() {
    let source = Arc::new(FakeSource::new(vec![]));
    let accessor = ReadingAccessor::new(source.clone());
    let err = accessor.get_latest_readings(0).await.unwrap_err();
    assert!(matches!(err, PipelineError::InvalidLimit));
    assert!(source.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn accessor_maps_store_failure_to_data_unavailable() {
    let accessor = ReadingAccessor::new(Arc::new(FakeSource::failing()));
    let err = accessor.get_latest_readings(5).await.unwrap_err();
    match err {
        PipelineError::DataUnavailable(msg) => assert!(msg.contains("connection refused")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn accessor_end_to_end_limit_three_with_two_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("readings.db");
    let repo = Arc::new(ReadingRepo::connect(path.to_str().unwrap(), 2).await.unwrap());
    repo.init().await.unwrap();
    repo.append_reading(&record(1_000, 20.0, 50.0, 50.0)).await.unwrap();
    repo.append_reading(&record(2_000, 22.0, 55.0, 60.0)).await.unwrap();

    let accessor = ReadingAccessor::new(repo);
    let latest = accessor.get_latest_readings(3).await.unwrap();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].temperature, 22.0);
    assert_eq!(latest[1].temperature, 20.0);
}

#[tokio::test]
async fn accessor_unknown_table_is_data_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("readings.db");
    let repo = Arc::new(ReadingRepo::connect(path.to_str().unwrap(), 1).await.unwrap());
    repo.init().await.unwrap();

    let accessor = ReadingAccessor::with_table(repo, "heart_rate");
    let err = accessor.get_latest_readings(3).await.unwrap_err();
    assert!(matches!(err, PipelineError::DataUnavailable(_)));
}
