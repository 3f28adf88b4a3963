// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

use crate::chart::{BAR_GROUP_WIDTH, ChartKind, ChartSeries, ChartSpec};
use crate::config::ChartConfig;
use crate::utils::truncate_string;

fn series_color(series: &ChartSeries) -> RGBColor {
    let (r, g, b) = series.color.rgb;
    RGBColor(r, g, b)
}

/// Write the chart to `path`; `.png` gets a bitmap, anything else SVG.
pub fn render_file(spec: &ChartSpec, config: &ChartConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create chart directory: {}", parent.display()))?;
        }
    }

    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));

    if is_png {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        draw_chart(&root, spec)?;
        root.present()?;
    } else {
        let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
        draw_chart(&root, spec)?;
        root.present()?;
    }

    tracing::info!(path = %path.display(), kind = %spec.kind, "chart written");
    Ok(())
}

/// Render the chart as an SVG document in memory.
pub fn render_svg_string(spec: &ChartSpec, config: &ChartConfig) -> Result<String> {
    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
        draw_chart(&root, spec)?;
        root.present()?;
    }
    Ok(svg)
}

fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = spec.x_range();
    let (y_lo, y_hi) = spec.y_range();

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 28).into_font().color(&BLACK))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    // Period labels go at `x_ticks`, not at plotters' own tick positions.
    chart
        .configure_mesh()
        .x_labels(0)
        .y_labels(10)
        .x_desc(spec.x_desc)
        .y_desc(spec.y_desc)
        .y_label_formatter(&|y| format!("{:.0}", y))
        .light_line_style(BLACK.mix(0.04))
        .bold_line_style(BLACK.mix(0.15))
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    let tick_style = ("sans-serif", 14)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    chart.draw_series(spec.x_ticks.iter().zip(&spec.x_labels).map(|(&x, label)| {
        EmptyElement::at((x, y_lo)) + Text::new(label.to_string(), (0, 6), tick_style.clone())
    }))?;

    for series in &spec.series {
        let color = series_color(series);
        let legend_name = truncate_string(&series.entity, 30);

        match spec.kind {
            ChartKind::Line => {
                for segment in series.segments() {
                    chart.draw_series(LineSeries::new(segment, color.stroke_width(2)))?;
                }
                chart
                    .draw_series(series.points.iter().filter_map(|p| {
                        p.value.map(|v| Circle::new((p.x, v), 4, color.filled()))
                    }))?
                    .label(legend_name)
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }
            ChartKind::Bar => {
                let half = spec.bar_width.unwrap_or(BAR_GROUP_WIDTH) / 2.0;
                chart
                    .draw_series(series.points.iter().filter_map(|p| {
                        p.value.map(|v| {
                            Rectangle::new([(p.x - half, 0.0), (p.x + half, v)], color.filled())
                        })
                    }))?
                    .label(legend_name)
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                    });
                // edges
                chart.draw_series(series.points.iter().filter_map(|p| {
                    p.value.map(|v| {
                        Rectangle::new([(p.x - half, 0.0), (p.x + half, v)], BLACK.stroke_width(1))
                    })
                }))?;
            }
        }

        let value_style = ("sans-serif", 11)
            .into_font()
            .color(&color)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(series.points.iter().filter_map(|p| {
            let label = p.label.as_ref()?;
            let y = p.label_y?;
            Some(Text::new(label.clone(), (p.x, y), value_style.clone()))
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}
