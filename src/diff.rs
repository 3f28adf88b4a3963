// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Period-by-period percentage difference between two entities.

use serde::Serialize;

use crate::period::{Period, QuarterValues};
use crate::series::PresentSeries;
use crate::utils::round_half_even;

/// `(entity1 - entity2) / entity2 * 100` per period, rounded half-to-even to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffResult {
    pub entity1: String,
    pub entity2: String,
    pub percentages: QuarterValues<Option<f64>>,
}

impl DiffResult {
    pub fn get(&self, period: Period) -> Option<f64> {
        self.percentages.get(period)
    }

    /// Periods that produced a comparable value, in canonical order.
    pub fn valid(&self) -> impl Iterator<Item = f64> + '_ {
        self.percentages.iter().filter_map(|(_, pct)| pct)
    }

    /// Mean of the valid period differences, rounded like the periods themselves.
    pub fn average(&self) -> Option<f64> {
        let valid: Vec<f64> = self.valid().collect();
        if valid.is_empty() {
            return None;
        }
        let mean = valid.iter().sum::<f64>() / valid.len() as f64;
        Some(round_half_even(mean, 2))
    }
}

/// Percentage difference of `a` over `b`; `None` for a NaN operand or a zero divisor.
pub fn percent_diff(a: f64, b: f64) -> Option<f64> {
    if a.is_nan() || b.is_nan() || b == 0.0 {
        return None;
    }
    let pct = (a - b) / b * 100.0;
    if !pct.is_finite() {
        return None;
    }
    Some(round_half_even(pct, 2))
}

/// Compare the two entities in `series`. Any other number of entries yields `None`.
///
/// The first entry in selection order is `entity1`.
pub fn compute_diff(series: &PresentSeries) -> Option<DiffResult> {
    if series.len() != 2 {
        return None;
    }
    let (entity1, v1) = series.get_index(0)?;
    let (entity2, v2) = series.get_index(1)?;

    let percentages = QuarterValues::from_fn(|p| percent_diff(v1.get(p), v2.get(p)));
    tracing::debug!(%entity1, %entity2, ?percentages, "computed percentage diff");

    Some(DiffResult {
        entity1: entity1.clone(),
        entity2: entity2.clone(),
        percentages,
    })
}
