// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::chart::ChartKind;
use crate::compare::{self, Selection};
use crate::error::CompareError;
use crate::render::render_svg_string;
use crate::store::{SeriesStore, SqliteSeriesStore};
use crate::web::state::AppState;

/// `?companies=Acme,Globex&breakdown=Revenue&chart=bar`
#[derive(Debug, Default, Deserialize)]
pub struct SelectionParams {
    pub companies: Option<String>,
    pub breakdown: Option<String>,
    #[serde(default)]
    pub chart: ChartKind,
}

impl SelectionParams {
    pub fn selection(&self) -> Selection {
        let entities = self
            .companies
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        Selection::new(entities, self.breakdown.clone().unwrap_or_default(), self.chart)
    }
}

impl IntoResponse for CompareError {
    fn into_response(self) -> Response {
        let status = match &self {
            CompareError::NoSelection | CompareError::NeedExactlyTwo => StatusCode::BAD_REQUEST,
            CompareError::NoMatchingData | CompareError::InsufficientData => StatusCode::NOT_FOUND,
            CompareError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = if self.is_user_error() {
            self.to_string()
        } else {
            "Storage unavailable".to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// List distinct companies
pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, CompareError> {
    let mut store = SqliteSeriesStore::acquire(&state.db_pool).await?;
    let companies = store.list_entities().await?;

    Ok(Json(json!({
        "companies": companies
    })))
}

/// List distinct breakdowns
pub async fn list_breakdowns(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, CompareError> {
    let mut store = SqliteSeriesStore::acquire(&state.db_pool).await?;
    let breakdowns = store.list_breakdowns().await?;

    Ok(Json(json!({
        "breakdowns": breakdowns
    })))
}

/// Chart layout, diff and insights for one or more companies
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> Result<Json<compare::DashboardOutcome>, CompareError> {
    let mut store = SqliteSeriesStore::acquire(&state.db_pool).await?;
    let outcome =
        compare::dashboard(&mut store, &state.config.chart.palette, &params.selection()).await?;
    Ok(Json(outcome))
}

/// The dashboard chart rendered as SVG
pub async fn dashboard_chart(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> Result<Response, CompareError> {
    let mut store = SqliteSeriesStore::acquire(&state.db_pool).await?;
    let outcome =
        compare::dashboard(&mut store, &state.config.chart.palette, &params.selection()).await?;

    match render_svg_string(&outcome.chart, &state.config.chart) {
        Ok(svg) => Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()),
        Err(e) => Ok(render_failure(&e)),
    }
}

/// Same `{"error": ...}` shape as `CompareError` responses.
fn render_failure(error: &anyhow::Error) -> Response {
    tracing::error!(error = %error, "chart rendering failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Chart rendering failed" })),
    )
        .into_response()
}

/// Percentage table and insights for exactly two companies
pub async fn compare(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> Result<Json<compare::CompareOutcome>, CompareError> {
    let mut store = SqliteSeriesStore::acquire(&state.db_pool).await?;
    let outcome = compare::compare(&mut store, &params.selection()).await?;
    Ok(Json(outcome))
}
