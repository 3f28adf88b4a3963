// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! End-to-end tests: SQLite rows through diff, insights and chart layout

mod common;

use approx::assert_relative_eq;
use quarterly_compare::chart::{ChartKind, Palette};
use quarterly_compare::compare::{self, Selection};
use quarterly_compare::config::ChartConfig;
use quarterly_compare::error::CompareError;
use quarterly_compare::period::Period;
use quarterly_compare::render;
use quarterly_compare::store::SqliteSeriesStore;
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn scenario_db() -> (SqlitePool, TempDir) {
    let (pool, temp_dir) = common::create_test_db().await.unwrap();
    common::seed_row(
        &pool,
        "Acme",
        "Revenue",
        [Some(100.0), Some(90.0), Some(80.0), Some(70.0), Some(60.0)],
    )
    .await
    .unwrap();
    common::seed_row(&pool, "Globex", "Revenue", [Some(50.0); 5])
        .await
        .unwrap();
    common::seed_row(
        &pool,
        "Globex",
        "Margin",
        [Some(50.0), Some(50.0), None, Some(50.0), Some(50.0)],
    )
    .await
    .unwrap();
    common::seed_row(
        &pool,
        "Acme",
        "Margin",
        [Some(100.0), Some(90.0), Some(80.0), Some(70.0), Some(60.0)],
    )
    .await
    .unwrap();
    (pool, temp_dir)
}

fn selection(entities: &[&str], breakdown: &str, chart: ChartKind) -> Selection {
    Selection::new(
        entities.iter().map(|e| e.to_string()).collect(),
        breakdown,
        chart,
    )
}

/// Two complete series: every period compares and the summary averages all five
#[tokio::test]
async fn test_two_complete_series() {
    let (pool, _temp_dir) = scenario_db().await;
    let mut store = SqliteSeriesStore::acquire(&pool).await.unwrap();

    let outcome = compare::dashboard(
        &mut store,
        &Palette::default(),
        &selection(&["Acme", "Globex"], "Revenue", ChartKind::Line),
    )
    .await
    .unwrap();

    let diff = outcome.diff.expect("two present series should diff");
    let expected = [100.0, 80.0, 60.0, 40.0, 20.0];
    for (period, want) in Period::ALL.iter().zip(expected) {
        assert_relative_eq!(diff.get(*period).unwrap(), want);
    }

    assert_eq!(outcome.insights.len(), 6);
    assert_eq!(
        outcome.insights[0],
        "In Jun 2025, Acme is 100.0% higher than Globex."
    );
    assert_eq!(
        outcome.insights[5],
        "Overall, Acme outperformed Globex by an average of 60.0% across the available quarters."
    );
}

/// A NULL quarter leaves a gap in the diff and is skipped by the average
#[tokio::test]
async fn test_missing_quarter() {
    let (pool, _temp_dir) = scenario_db().await;
    let mut store = SqliteSeriesStore::acquire(&pool).await.unwrap();

    let outcome = compare::compare(
        &mut store,
        &selection(&["Acme", "Globex"], "Margin", ChartKind::Line),
    )
    .await
    .unwrap();

    assert_eq!(outcome.diff.get(Period::Q3_2024), None);
    assert_eq!(outcome.diff.valid().count(), 4);
    assert_eq!(
        outcome.insights[2],
        "For Dec 2024, comparison is not available due to missing data."
    );
    // (100 + 80 + 40 + 20) / 4
    assert_eq!(
        outcome.insights[5],
        "Overall, Acme outperformed Globex by an average of 60.0% across the available quarters."
    );
    assert_eq!(outcome.values[1].values[2].value, None);
}

/// One company: a single-series chart and no comparison
#[tokio::test]
async fn test_single_company() {
    let (pool, _temp_dir) = scenario_db().await;
    let mut store = SqliteSeriesStore::acquire(&pool).await.unwrap();

    let outcome = compare::dashboard(
        &mut store,
        &Palette::default(),
        &selection(&["Acme"], "Revenue", ChartKind::Bar),
    )
    .await
    .unwrap();

    assert!(outcome.diff.is_none());
    assert!(outcome.insights.is_empty());
    assert_eq!(outcome.chart.series.len(), 1);
    assert_eq!(outcome.chart.bar_width, Some(0.8));
    assert_eq!(outcome.chart.title, "Revenue – Comparison");
}

/// Reversing the selection flips the sign of every comparison
#[tokio::test]
async fn test_selection_order_sets_direction() {
    let (pool, _temp_dir) = scenario_db().await;
    let mut store = SqliteSeriesStore::acquire(&pool).await.unwrap();

    let outcome = compare::compare(
        &mut store,
        &selection(&["Globex", "Acme"], "Revenue", ChartKind::Line),
    )
    .await
    .unwrap();

    assert_eq!(outcome.diff.entity1, "Globex");
    assert_eq!(outcome.diff.get(Period::Q1_2025), Some(-50.0));
    assert_eq!(
        outcome.insights[0],
        "In Jun 2025, Globex is 50.0% lower than Acme."
    );
    assert!(outcome.insights[5].contains("underperformed"));
}

/// A breakdown nobody reports is a user-facing error
#[tokio::test]
async fn test_unknown_breakdown() {
    let (pool, _temp_dir) = scenario_db().await;
    let mut store = SqliteSeriesStore::acquire(&pool).await.unwrap();

    let err = compare::dashboard(
        &mut store,
        &Palette::default(),
        &selection(&["Acme", "Globex"], "Headcount", ChartKind::Line),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CompareError::NoMatchingData));
    assert_eq!(
        err.to_string(),
        "No matching records found in database for that selection."
    );
}

/// Rendering writes an SVG file, creating the output directory
#[tokio::test]
async fn test_render_chart_files() {
    let (pool, temp_dir) = scenario_db().await;
    let mut store = SqliteSeriesStore::acquire(&pool).await.unwrap();

    for kind in [ChartKind::Line, ChartKind::Bar] {
        let outcome = compare::dashboard(
            &mut store,
            &Palette::default(),
            &selection(&["Acme", "Globex"], "Margin", kind),
        )
        .await
        .unwrap();

        let svg_path = temp_dir.path().join("charts").join(format!("{}.svg", kind));
        render::render_file(&outcome.chart, &ChartConfig::default(), &svg_path).unwrap();
        let svg = std::fs::read_to_string(&svg_path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Margin – Comparison"));
        assert!(svg.contains("Jun 2025"));
    }
}
