// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Read access to `financials_company`.

use sqlx::Sqlite;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqlitePool;
use std::future::Future;

use crate::series::{RawRow, SeriesSet, normalize};

/// Source of per-entity quarterly rows.
///
/// Entity and breakdown names match case-insensitively. At most one row is
/// expected per pair; if storage holds more, the first is used.
pub trait SeriesStore {
    fn fetch_one(
        &mut self,
        entity: &str,
        breakdown: &str,
    ) -> impl Future<Output = Result<Option<RawRow>, sqlx::Error>> + Send;

    /// Distinct entity names, sorted alphabetically.
    fn list_entities(&mut self) -> impl Future<Output = Result<Vec<String>, sqlx::Error>> + Send;

    /// Distinct breakdown names, sorted alphabetically.
    fn list_breakdowns(&mut self)
    -> impl Future<Output = Result<Vec<String>, sqlx::Error>> + Send;
}

/// A store bound to one pooled connection, held for the length of a request.
pub struct SqliteSeriesStore {
    conn: PoolConnection<Sqlite>,
}

impl SqliteSeriesStore {
    pub async fn acquire(pool: &SqlitePool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            conn: pool.acquire().await?,
        })
    }
}

impl SeriesStore for SqliteSeriesStore {
    async fn fetch_one(
        &mut self,
        entity: &str,
        breakdown: &str,
    ) -> Result<Option<RawRow>, sqlx::Error> {
        sqlx::query_as::<_, RawRow>(
            r#"
            SELECT company_name, breakdown, q1_2025, q4_2024, q3_2024, q2_2024, q1_2024
            FROM financials_company
            WHERE LOWER(company_name) = LOWER(?)
              AND LOWER(breakdown) = LOWER(?)
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(entity)
        .bind(breakdown)
        .fetch_optional(&mut *self.conn)
        .await
    }

    async fn list_entities(&mut self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT company_name FROM financials_company ORDER BY company_name",
        )
        .fetch_all(&mut *self.conn)
        .await
    }

    async fn list_breakdowns(&mut self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT breakdown FROM financials_company ORDER BY breakdown",
        )
        .fetch_all(&mut *self.conn)
        .await
    }
}

/// Fetch and normalize each entity in turn, one query per entity.
pub async fn fetch_series<S: SeriesStore>(
    store: &mut S,
    entities: &[String],
    breakdown: &str,
) -> Result<SeriesSet, sqlx::Error> {
    let mut set = SeriesSet::new(breakdown);
    for entity in entities {
        let row = store.fetch_one(entity, breakdown).await?;
        match &row {
            Some(row) => tracing::debug!(%entity, ?row, "fetched row"),
            None => tracing::debug!(%entity, breakdown, "no row"),
        }
        set.insert(entity.clone(), normalize(row.as_ref()));
    }
    Ok(set)
}
