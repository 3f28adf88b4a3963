// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use axum::{Json, Router, routing::get};
use serde_json::json;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

use crate::web::{routes, state::AppState};

/// Create the Axum router with all routes
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Selection options
        .route("/api/companies", get(routes::api::list_companies))
        .route("/api/breakdowns", get(routes::api::list_breakdowns))
        // Comparisons
        .route("/api/dashboard", get(routes::api::dashboard))
        .route("/api/dashboard/chart.svg", get(routes::api::dashboard_chart))
        .route("/api/compare", get(routes::api::compare))
        .layer(TraceLayer::new_for_http())
        // Share app state
        .with_state(state)
}

/// Start the web server
pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
