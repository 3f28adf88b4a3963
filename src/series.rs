// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Raw storage rows and their normalized in-memory form.

use indexmap::IndexMap;
use serde::Serialize;

use crate::period::{Period, QuarterValues};

/// A `financials_company` row as read from storage. Quarter columns may be NULL.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RawRow {
    pub company_name: String,
    pub breakdown: String,
    pub q1_2025: Option<f64>,
    pub q4_2024: Option<f64>,
    pub q3_2024: Option<f64>,
    pub q2_2024: Option<f64>,
    pub q1_2024: Option<f64>,
}

impl RawRow {
    pub fn quarters(&self) -> QuarterValues<Option<f64>> {
        QuarterValues {
            q1_2025: self.q1_2025,
            q4_2024: self.q4_2024,
            q3_2024: self.q3_2024,
            q2_2024: self.q2_2024,
            q1_2024: self.q1_2024,
        }
    }
}

/// An entity's values for one breakdown, or the marker that no record exists.
///
/// Missing quarters inside a present series hold `f64::NAN` so arithmetic on them
/// stays undefined instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricSeries {
    Present(QuarterValues<f64>),
    Absent,
}

impl MetricSeries {
    pub fn is_present(&self) -> bool {
        matches!(self, MetricSeries::Present(_))
    }

    pub fn values(&self) -> Option<&QuarterValues<f64>> {
        match self {
            MetricSeries::Present(values) => Some(values),
            MetricSeries::Absent => None,
        }
    }
}

/// Map a fetched row (or its absence) onto a `MetricSeries`.
pub fn normalize(row: Option<&RawRow>) -> MetricSeries {
    match row {
        Some(row) => MetricSeries::Present(row.quarters().map(|v| v.unwrap_or(f64::NAN))),
        None => MetricSeries::Absent,
    }
}

/// Present series keyed by entity name, in selection order.
pub type PresentSeries = IndexMap<String, QuarterValues<f64>>;

/// Every selected entity's series for one breakdown, in selection order.
///
/// Selecting the same name twice keeps a single entry at its first position.
#[derive(Debug, Clone, Default)]
pub struct SeriesSet {
    breakdown: String,
    entries: IndexMap<String, MetricSeries>,
}

impl SeriesSet {
    pub fn new(breakdown: impl Into<String>) -> Self {
        Self {
            breakdown: breakdown.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn breakdown(&self) -> &str {
        &self.breakdown
    }

    pub fn insert(&mut self, entity: impl Into<String>, series: MetricSeries) {
        self.entries.entry(entity.into()).or_insert(series);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricSeries)> {
        self.entries.iter().map(|(name, series)| (name.as_str(), series))
    }

    /// Series that exist in storage, absent ones dropped.
    pub fn present(&self) -> PresentSeries {
        self.entries
            .iter()
            .filter_map(|(name, series)| series.values().map(|v| (name.clone(), *v)))
            .collect()
    }

    /// Names of the entities with no matching record.
    pub fn absent(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, series)| !series.is_present())
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Serializable per-period view of a series, NaN shown as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesValues {
    pub entity: String,
    pub values: Vec<PeriodValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodValue {
    pub period: Period,
    pub label: &'static str,
    pub value: Option<f64>,
}

impl SeriesValues {
    pub fn new(entity: &str, values: &QuarterValues<f64>) -> Self {
        Self {
            entity: entity.to_string(),
            values: values
                .iter()
                .map(|(period, v)| PeriodValue {
                    period,
                    label: period.label(),
                    value: (!v.is_nan()).then_some(v),
                })
                .collect(),
        }
    }
}
