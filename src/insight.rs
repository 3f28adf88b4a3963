// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Plain-language sentences describing a `DiffResult`.

use crate::diff::DiffResult;
use crate::period::Period;
use crate::series::PresentSeries;
use crate::utils::format_decimal;

/// One sentence per period followed by the overall summary.
///
/// Returns nothing without a diff or without series. The summary is left out
/// when no period could be compared.
pub fn build_insights(diff: Option<&DiffResult>, series: &PresentSeries) -> Vec<String> {
    let Some(diff) = diff else {
        return Vec::new();
    };
    if series.is_empty() {
        return Vec::new();
    }

    let mut insights: Vec<String> = Period::ALL
        .iter()
        .map(|&period| period_sentence(diff, period))
        .collect();

    if let Some(avg) = diff.average() {
        insights.push(overall_sentence(diff, avg));
    }

    insights
}

fn period_sentence(diff: &DiffResult, period: Period) -> String {
    let label = period.label();
    let (c1, c2) = (&diff.entity1, &diff.entity2);

    match diff.get(period) {
        Some(pct) if pct.is_nan() => missing_sentence(label),
        None => missing_sentence(label),
        Some(pct) if pct > 0.0 => {
            format!("In {}, {} is {}% higher than {}.", label, c1, format_decimal(pct), c2)
        }
        Some(pct) if pct < 0.0 => format!(
            "In {}, {} is {}% lower than {}.",
            label,
            c1,
            format_decimal(pct.abs()),
            c2
        ),
        Some(_) => format!("In {}, {} and {} have the same value.", label, c1, c2),
    }
}

fn missing_sentence(label: &str) -> String {
    format!("For {}, comparison is not available due to missing data.", label)
}

fn overall_sentence(diff: &DiffResult, avg: f64) -> String {
    let (c1, c2) = (&diff.entity1, &diff.entity2);
    if avg > 0.0 {
        format!(
            "Overall, {} outperformed {} by an average of {}% across the available quarters.",
            c1,
            c2,
            format_decimal(avg)
        )
    } else if avg < 0.0 {
        format!(
            "Overall, {} underperformed {} by an average of {}% across the available quarters.",
            c1,
            c2,
            format_decimal(avg.abs())
        )
    } else {
        format!(
            "Overall, {} and {} performed equally on average across the available quarters.",
            c1, c2
        )
    }
}
