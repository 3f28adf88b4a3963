// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use sqlx::{Sqlite, SqliteConnection, migrate::MigrateDatabase, sqlite::SqlitePool};

use crate::period::QuarterValues;

pub async fn create_db_pool(db_url: &str) -> Result<SqlitePool> {
    // Create database if it doesn't exist
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        Sqlite::create_database(db_url).await?;
    }

    // Connect to the database
    let pool = SqlitePool::connect(db_url).await?;

    // Run migrations
    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

/// Insert one (company, breakdown) row. Callers keep pairs unique.
pub async fn insert_financials(
    conn: &mut SqliteConnection,
    company_name: &str,
    breakdown: &str,
    values: &QuarterValues<Option<f64>>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO financials_company
            (company_name, breakdown, q1_2025, q4_2024, q3_2024, q2_2024, q1_2024)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(company_name)
    .bind(breakdown)
    .bind(values.q1_2025)
    .bind(values.q4_2024)
    .bind(values.q3_2024)
    .bind(values.q2_2024)
    .bind(values.q1_2024)
    .execute(conn)
    .await?;

    Ok(())
}
