// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Integration tests for the SQLite series store

mod common;

use quarterly_compare::period::Period;
use quarterly_compare::series::MetricSeries;
use quarterly_compare::store::{SeriesStore, SqliteSeriesStore, fetch_series};

/// Company and breakdown names match regardless of case
#[tokio::test]
async fn test_fetch_one_case_insensitive() {
    let (pool, _temp_dir) = common::create_test_db_with_financials().await.unwrap();
    let mut store = SqliteSeriesStore::acquire(&pool).await.unwrap();

    let row = store
        .fetch_one("aCmE", "REVENUE")
        .await
        .unwrap()
        .expect("Acme revenue should be found");
    assert_eq!(row.company_name, "Acme");
    assert_eq!(row.breakdown, "Revenue");
    assert_eq!(row.q1_2025, Some(100.0));
    assert_eq!(row.q1_2024, Some(140.0));
}

/// A pair with no record yields nothing rather than an error
#[tokio::test]
async fn test_fetch_one_missing_pair() {
    let (pool, _temp_dir) = common::create_test_db_with_financials().await.unwrap();
    let mut store = SqliteSeriesStore::acquire(&pool).await.unwrap();

    assert!(store.fetch_one("Initech", "Revenue").await.unwrap().is_none());
    assert!(store.fetch_one("Hooli", "Revenue").await.unwrap().is_none());
}

/// Duplicate rows for a pair resolve to the first inserted
#[tokio::test]
async fn test_fetch_one_prefers_first_row() {
    let (pool, _temp_dir) = common::create_test_db().await.unwrap();
    common::seed_row(&pool, "Acme", "Revenue", [Some(1.0); 5]).await.unwrap();
    common::seed_row(&pool, "Acme", "Revenue", [Some(2.0); 5]).await.unwrap();

    let mut store = SqliteSeriesStore::acquire(&pool).await.unwrap();
    let row = store.fetch_one("Acme", "Revenue").await.unwrap().unwrap();
    assert_eq!(row.q1_2025, Some(1.0));
}

/// Listings are distinct and sorted
#[tokio::test]
async fn test_list_entities_and_breakdowns() {
    let (pool, _temp_dir) = common::create_test_db_with_financials().await.unwrap();
    let mut store = SqliteSeriesStore::acquire(&pool).await.unwrap();

    assert_eq!(
        store.list_entities().await.unwrap(),
        vec!["Acme", "Globex", "Initech"]
    );
    assert_eq!(
        store.list_breakdowns().await.unwrap(),
        vec!["Net Income", "Revenue"]
    );
}

/// An empty database lists nothing
#[tokio::test]
async fn test_list_empty_database() {
    let (pool, _temp_dir) = common::create_test_db().await.unwrap();
    let mut store = SqliteSeriesStore::acquire(&pool).await.unwrap();

    assert!(store.list_entities().await.unwrap().is_empty());
    assert!(store.list_breakdowns().await.unwrap().is_empty());
}

/// NULL columns become NaN; unmatched entities are marked absent
#[tokio::test]
async fn test_fetch_series_normalizes_rows() {
    let (pool, _temp_dir) = common::create_test_db_with_financials().await.unwrap();
    let mut store = SqliteSeriesStore::acquire(&pool).await.unwrap();

    let entities = vec![
        "Globex".to_string(),
        "Hooli".to_string(),
        "Acme".to_string(),
    ];
    let set = fetch_series(&mut store, &entities, "Revenue").await.unwrap();

    assert_eq!(set.breakdown(), "Revenue");
    assert_eq!(set.len(), 3);
    assert_eq!(set.absent(), vec!["Hooli"]);

    let present = set.present();
    let names: Vec<&str> = present.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Globex", "Acme"]);

    let globex = present.get("Globex").unwrap();
    assert!(globex.get(Period::Q3_2024).is_nan());
    assert_eq!(globex.get(Period::Q1_2025), 80.0);

    let (_, hooli) = set.iter().find(|(name, _)| *name == "Hooli").unwrap();
    assert!(matches!(hooli, MetricSeries::Absent));
}
