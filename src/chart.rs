// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Renderer-independent chart layout.
//!
//! `build_chart` turns a `SeriesSet` into a `ChartSpec`: x positions, tick
//! positions, colors and value labels. `render` draws a spec with plotters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::period::Period;
use crate::series::SeriesSet;

/// Share of each period's unit slot taken by a group of bars.
pub const BAR_GROUP_WIDTH: f64 = 0.8;

/// Label offset above a point, as a fraction of its value.
const LABEL_LIFT: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Line => f.write_str("line"),
            ChartKind::Bar => f.write_str("bar"),
        }
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            other => Err(format!("unknown chart type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartColor {
    pub name: String,
    pub rgb: (u8, u8, u8),
}

impl ChartColor {
    pub fn named(name: &str) -> Option<ChartColor> {
        let rgb = match name.trim().to_ascii_lowercase().as_str() {
            "blue" => (0, 0, 255),
            "green" => (0, 128, 0),
            "red" => (255, 0, 0),
            "purple" => (128, 0, 128),
            "orange" => (255, 165, 0),
            "black" => (0, 0, 0),
            "gray" | "grey" => (128, 128, 128),
            "brown" => (165, 42, 42),
            "pink" => (255, 192, 203),
            "teal" => (0, 128, 128),
            "cyan" => (0, 255, 255),
            "magenta" => (255, 0, 255),
            "olive" => (128, 128, 0),
            "navy" => (0, 0, 128),
            _ => return None,
        };
        Some(ChartColor {
            name: name.trim().to_ascii_lowercase(),
            rgb,
        })
    }
}

/// Ordered colors handed out by selection position, wrapping around.
///
/// Holds at least `MIN_COLORS` distinct colors; configured as a list of color names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Palette(Vec<ChartColor>);

impl Palette {
    pub const DEFAULT_NAMES: [&'static str; 6] = ["blue", "green", "red", "purple", "orange", "black"];
    pub const MIN_COLORS: usize = 6;

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, String> {
        if names.len() < Self::MIN_COLORS {
            return Err(format!(
                "chart palette needs at least {} colors, got {}",
                Self::MIN_COLORS,
                names.len()
            ));
        }
        let colors = names
            .iter()
            .map(|n| {
                ChartColor::named(n.as_ref())
                    .ok_or_else(|| format!("unknown palette color: {}", n.as_ref()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].iter().any(|c| c.rgb == color.rgb) {
                return Err(format!("duplicate palette color: {}", color.name));
            }
        }
        Ok(Palette(colors))
    }

    pub fn color_for(&self, index: usize) -> &ChartColor {
        &self.0[index % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette(
            Palette::DEFAULT_NAMES
                .iter()
                .filter_map(|n| ChartColor::named(n))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub period: Period,
    pub x: f64,
    /// `None` where the series holds no number; lines break there.
    pub value: Option<f64>,
    /// Integer part of the value, drawn at `label_y`.
    pub label: Option<String>,
    pub label_y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub entity: String,
    pub color: ChartColor,
    /// Shift from each period's base position (bars only, zero for lines).
    pub offset: f64,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Runs of consecutive points with values. A line is drawn per run.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point.value {
                Some(v) => current.push((point.x, v)),
                None => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_desc: &'static str,
    pub y_desc: &'static str,
    pub x_labels: Vec<&'static str>,
    /// Where each x label sits; centered under the bar group for bar charts.
    pub x_ticks: Vec<f64>,
    /// Width of a single bar; `None` for line charts.
    pub bar_width: Option<f64>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// Horizontal extent covering every point plus half a slot of margin.
    pub fn x_range(&self) -> (f64, f64) {
        let half = self.bar_width.map(|w| w / 2.0).unwrap_or(0.0);
        let xs = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.x));
        let (lo, hi) = min_max(xs).unwrap_or((0.0, (Period::ALL.len() - 1) as f64));
        (lo - half - 0.5, hi + half + 0.5)
    }

    /// Vertical extent covering values, their labels and the zero baseline, padded 10%.
    pub fn y_range(&self) -> (f64, f64) {
        let ys = self
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .flat_map(|p| p.value.into_iter().chain(p.label_y))
            .chain(std::iter::once(0.0));
        let (lo, hi) = min_max(ys).unwrap_or((0.0, 1.0));
        let span = hi - lo;
        if span == 0.0 {
            return (lo - 1.0, hi + 1.0);
        }
        let pad = span * 0.1;
        (if lo < 0.0 { lo - pad } else { lo }, hi + pad)
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Width of one bar when `n` entities share a period slot.
pub fn bar_width(n: usize) -> f64 {
    BAR_GROUP_WIDTH / n as f64
}

/// Bar position of entity `index` within the period at `base`.
pub fn bar_position(base: f64, index: usize, width: f64) -> f64 {
    base + index as f64 * width
}

/// Label position centered under a group of `n` bars starting at `base`.
pub fn bar_tick(base: f64, n: usize, width: f64) -> f64 {
    base + (n as f64 - 1.0) * width / 2.0
}

/// Lay out the present series of `set`. Returns `None` if none are present.
pub fn build_chart(set: &SeriesSet, kind: ChartKind, palette: &Palette) -> Option<ChartSpec> {
    let present = set.present();
    if present.is_empty() {
        return None;
    }

    let n = present.len();
    let width = match kind {
        ChartKind::Line => None,
        ChartKind::Bar => Some(bar_width(n)),
    };

    let series = present
        .iter()
        .enumerate()
        .map(|(idx, (entity, values))| {
            let offset = width.map(|w| idx as f64 * w).unwrap_or(0.0);
            let points = values
                .iter()
                .map(|(period, v)| {
                    let base = period.index() as f64;
                    let x = match width {
                        Some(w) => bar_position(base, idx, w),
                        None => base,
                    };
                    let value = (!v.is_nan()).then_some(v);
                    ChartPoint {
                        period,
                        x,
                        value,
                        label: value.map(|v| format!("{}", v.trunc() as i64)),
                        label_y: value.map(|v| v + v * LABEL_LIFT),
                    }
                })
                .collect();
            ChartSeries {
                entity: entity.clone(),
                color: palette.color_for(idx).clone(),
                offset,
                points,
            }
        })
        .collect();

    let x_ticks = Period::ALL
        .iter()
        .map(|p| {
            let base = p.index() as f64;
            match width {
                Some(w) => bar_tick(base, n, w),
                None => base,
            }
        })
        .collect();

    tracing::debug!(
        breakdown = set.breakdown(),
        %kind,
        entities = n,
        "built chart layout"
    );

    Some(ChartSpec {
        kind,
        title: format!("{} – Comparison", set.breakdown()),
        x_desc: "Quarter",
        y_desc: "Value",
        x_labels: Period::labels().to_vec(),
        x_ticks,
        bar_width: width,
        series,
    })
}
