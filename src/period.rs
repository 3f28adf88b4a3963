// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! The fixed five-quarter window.
//!
//! Every series, diff and chart axis walks periods in `Period::ALL` order,
//! newest quarter first. Nothing downstream re-sorts them.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Q1_2025,
    Q4_2024,
    Q3_2024,
    Q2_2024,
    Q1_2024,
}

impl Period {
    /// Canonical order: storage columns, series values, diff mapping and chart x-axis.
    pub const ALL: [Period; 5] = [
        Period::Q1_2025,
        Period::Q4_2024,
        Period::Q3_2024,
        Period::Q2_2024,
        Period::Q1_2024,
    ];

    /// Column name in `financials_company`
    pub fn key(self) -> &'static str {
        match self {
            Period::Q1_2025 => "q1_2025",
            Period::Q4_2024 => "q4_2024",
            Period::Q3_2024 => "q3_2024",
            Period::Q2_2024 => "q2_2024",
            Period::Q1_2024 => "q1_2024",
        }
    }

    /// Display label used on the chart axis and in insight sentences
    pub fn label(self) -> &'static str {
        match self {
            Period::Q1_2025 => "Jun 2025",
            Period::Q4_2024 => "Mar 2025",
            Period::Q3_2024 => "Dec 2024",
            Period::Q2_2024 => "Sep 2024",
            Period::Q1_2024 => "Jun 2024",
        }
    }

    /// Position on the x-axis (0 for the first period in `ALL`)
    pub fn index(self) -> usize {
        match self {
            Period::Q1_2025 => 0,
            Period::Q4_2024 => 1,
            Period::Q3_2024 => 2,
            Period::Q2_2024 => 3,
            Period::Q1_2024 => 4,
        }
    }

    pub fn from_key(key: &str) -> Option<Period> {
        Period::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn labels() -> [&'static str; 5] {
        Period::ALL.map(Period::label)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value slot per period, stored as five named fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuarterValues<T> {
    pub q1_2025: T,
    pub q4_2024: T,
    pub q3_2024: T,
    pub q2_2024: T,
    pub q1_2024: T,
}

impl<T: Copy> QuarterValues<T> {
    /// Build by evaluating `f` once per period, in canonical order.
    pub fn from_fn(mut f: impl FnMut(Period) -> T) -> Self {
        Self {
            q1_2025: f(Period::Q1_2025),
            q4_2024: f(Period::Q4_2024),
            q3_2024: f(Period::Q3_2024),
            q2_2024: f(Period::Q2_2024),
            q1_2024: f(Period::Q1_2024),
        }
    }

    pub fn get(&self, period: Period) -> T {
        match period {
            Period::Q1_2025 => self.q1_2025,
            Period::Q4_2024 => self.q4_2024,
            Period::Q3_2024 => self.q3_2024,
            Period::Q2_2024 => self.q2_2024,
            Period::Q1_2024 => self.q1_2024,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Period, T)> + '_ {
        Period::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    pub fn values(&self) -> [T; 5] {
        Period::ALL.map(|p| self.get(p))
    }

    pub fn map<U: Copy>(&self, mut f: impl FnMut(T) -> U) -> QuarterValues<U> {
        QuarterValues::from_fn(|p| f(self.get(p)))
    }
}
