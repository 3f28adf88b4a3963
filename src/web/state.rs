// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::config::Config;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across all routes
///
/// Only the pool is shared; each request checks out its own connection.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: Config) -> Self {
        Self {
            db_pool,
            config: Arc::new(config),
        }
    }
}
