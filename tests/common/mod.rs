// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Common test utilities and helpers
//!
//! - temporary SQLite databases with the schema applied
//! - seeding `financials_company` rows
//! - writing CSV exports for the importer

#![allow(dead_code)]

use anyhow::Result;
use csv::Writer;
use sqlx::sqlite::SqlitePool;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use quarterly_compare::db::insert_financials;
use quarterly_compare::period::QuarterValues;

/// Creates a temporary SQLite database with the schema applied
pub async fn create_test_db() -> Result<(SqlitePool, TempDir)> {
    let temp_dir = tempfile::tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let pool = SqlitePool::connect(&db_url).await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok((pool, temp_dir))
}

/// Values in storage column order: q1_2025, q4_2024, q3_2024, q2_2024, q1_2024
pub fn quarters(values: [Option<f64>; 5]) -> QuarterValues<Option<f64>> {
    QuarterValues {
        q1_2025: values[0],
        q4_2024: values[1],
        q3_2024: values[2],
        q2_2024: values[3],
        q1_2024: values[4],
    }
}

pub async fn seed_row(
    pool: &SqlitePool,
    company: &str,
    breakdown: &str,
    values: [Option<f64>; 5],
) -> Result<()> {
    let mut conn = pool.acquire().await?;
    insert_financials(&mut conn, company, breakdown, &quarters(values)).await
}

/// A database holding three companies with Revenue and Net Income rows.
///
/// - Acme: complete Revenue series (100, 110, 120, 130, 140)
/// - Globex: Revenue with one NULL quarter (Dec 2024)
/// - Initech: Net Income only
pub async fn create_test_db_with_financials() -> Result<(SqlitePool, TempDir)> {
    let (pool, temp_dir) = create_test_db().await?;

    seed_row(
        &pool,
        "Acme",
        "Revenue",
        [Some(100.0), Some(110.0), Some(120.0), Some(130.0), Some(140.0)],
    )
    .await?;
    seed_row(
        &pool,
        "Globex",
        "Revenue",
        [Some(80.0), Some(110.0), None, Some(100.0), Some(70.0)],
    )
    .await?;
    seed_row(&pool, "Acme", "Net Income", [Some(10.0); 5]).await?;
    seed_row(&pool, "Initech", "Net Income", [Some(5.0); 5]).await?;

    Ok((pool, temp_dir))
}

/// Writes a CSV export named `<stem>.csv` under `dir`
pub fn create_test_csv_file(dir: &Path, stem: &str, rows: &[&[&str]]) -> Result<PathBuf> {
    let file_path = dir.join(format!("{}.csv", stem));
    let file = std::fs::File::create(&file_path)?;
    let mut writer = Writer::from_writer(file);
    for row in rows {
        writer.write_record(*row)?;
    }
    writer.flush()?;
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_test_db() {
        let (pool, _temp_dir) = create_test_db().await.expect("Should create test database");

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table'")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert!(tables.iter().any(|t| t == "financials_company"));
    }

    #[tokio::test]
    async fn test_create_test_db_with_financials() {
        let (pool, _temp_dir) = create_test_db_with_financials().await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM financials_company")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 4);
    }
}
