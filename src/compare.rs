// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Request pipeline: fetch, normalize, then chart and diff.
//!
//! Two request shapes:
//! - dashboard: any number of companies, a chart, and the diff when exactly two have data
//! - compare: exactly two companies, diff and insights only

use serde::Serialize;

use crate::chart::{ChartKind, ChartSpec, Palette, build_chart};
use crate::diff::{DiffResult, compute_diff};
use crate::error::CompareError;
use crate::insight::build_insights;
use crate::series::SeriesValues;
use crate::store::{SeriesStore, fetch_series};

/// What the user picked.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub entities: Vec<String>,
    pub breakdown: String,
    pub chart: ChartKind,
}

impl Selection {
    pub fn new(entities: Vec<String>, breakdown: impl Into<String>, chart: ChartKind) -> Self {
        Self {
            entities,
            breakdown: breakdown.into(),
            chart,
        }
    }

    /// Trimmed, non-blank entity names in selection order.
    fn entities(&self) -> Vec<String> {
        self.entities
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn breakdown(&self) -> &str {
        self.breakdown.trim()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOutcome {
    pub breakdown: String,
    pub chart: ChartSpec,
    /// Present only when exactly two selected companies have data.
    pub diff: Option<DiffResult>,
    pub insights: Vec<String>,
    /// Selected companies with no record for the breakdown.
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareOutcome {
    pub breakdown: String,
    pub diff: DiffResult,
    pub insights: Vec<String>,
    pub values: Vec<SeriesValues>,
}

pub async fn dashboard<S: SeriesStore>(
    store: &mut S,
    palette: &Palette,
    selection: &Selection,
) -> Result<DashboardOutcome, CompareError> {
    let entities = selection.entities();
    let breakdown = selection.breakdown();
    if entities.is_empty() || breakdown.is_empty() {
        return Err(CompareError::NoSelection);
    }

    let set = fetch_series(store, &entities, breakdown).await?;
    let missing = set.absent();
    let chart = build_chart(&set, selection.chart, palette).ok_or(CompareError::NoMatchingData)?;
    if !missing.is_empty() {
        tracing::warn!(?missing, breakdown, "some companies have no data");
    }

    let present = set.present();
    let diff = compute_diff(&present);
    let insights = build_insights(diff.as_ref(), &present);

    tracing::info!(
        breakdown,
        selected = entities.len(),
        present = present.len(),
        kind = %selection.chart,
        "dashboard request complete"
    );

    Ok(DashboardOutcome {
        breakdown: breakdown.to_string(),
        chart,
        diff,
        insights,
        missing,
    })
}

pub async fn compare<S: SeriesStore>(
    store: &mut S,
    selection: &Selection,
) -> Result<CompareOutcome, CompareError> {
    let entities = selection.entities();
    if entities.len() != 2 {
        return Err(CompareError::NeedExactlyTwo);
    }
    let breakdown = selection.breakdown();
    if breakdown.is_empty() {
        return Err(CompareError::NoSelection);
    }

    let set = fetch_series(store, &entities, breakdown).await?;
    let present = set.present();
    let diff = compute_diff(&present).ok_or_else(|| {
        tracing::warn!(missing = ?set.absent(), breakdown, "not enough data to compare");
        CompareError::InsufficientData
    })?;
    let insights = build_insights(Some(&diff), &present);
    let values = present
        .iter()
        .map(|(entity, values)| SeriesValues::new(entity, values))
        .collect();

    tracing::info!(entity1 = %diff.entity1, entity2 = %diff.entity2, breakdown, "compare request complete");

    Ok(CompareOutcome {
        breakdown: breakdown.to_string(),
        diff,
        insights,
        values,
    })
}
