// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Load per-company CSV exports into `financials_company`.
//!
//! One file per company; the file stem (title-cased) is the company name. Each
//! row carries a `breakdown` column and any of the five quarter columns.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use sqlx::sqlite::SqlitePool;
use std::path::{Path, PathBuf};

use crate::db::insert_financials;
use crate::period::{Period, QuarterValues};

/// Parse a spreadsheet cell: blank and `-` are empty, `(123)` is `-123`,
/// thousands separators are dropped, anything unparseable is empty.
pub fn clean_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let s = match s.strip_prefix('(').and_then(|inner| inner.strip_suffix(')')) {
        Some(inner) => format!("-{}", inner),
        None => s.to_string(),
    };
    s.replace(',', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Company name for an export file: its stem, title-cased.
pub fn company_name_for(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| title_case(s.trim()))
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub files: usize,
    pub rows: usize,
    pub skipped_files: Vec<PathBuf>,
}

/// Import one CSV file. Returns the number of rows inserted, or `None` if the
/// file has no `breakdown` column.
pub async fn import_file(pool: &SqlitePool, path: &Path) -> Result<Option<usize>> {
    let company = company_name_for(path)
        .with_context(|| format!("Cannot derive company name from {}", path.display()))?;

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    tracing::debug!(file = %path.display(), ?headers, "detected columns");

    let Some(breakdown_idx) = headers.iter().position(|h| h == "breakdown") else {
        tracing::warn!(file = %path.display(), "missing 'breakdown' column, skipping file");
        return Ok(None);
    };
    let quarter_idx: QuarterValues<Option<usize>> =
        QuarterValues::from_fn(|p: Period| headers.iter().position(|h| h == p.key()));

    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for result in reader.records() {
        let record = result?;
        let breakdown = record.get(breakdown_idx).unwrap_or("").trim();
        if breakdown.is_empty() {
            continue;
        }
        let values = quarter_idx.map(|idx| idx.and_then(|i| record.get(i)).and_then(clean_numeric));
        insert_financials(&mut tx, &company, breakdown, &values).await?;
        inserted += 1;
    }
    tx.commit().await?;

    tracing::info!(%company, rows = inserted, file = %path.display(), "imported file");
    Ok(Some(inserted))
}

/// Import every `.csv` file directly under `dir`, in file name order.
pub async fn import_dir(pool: &SqlitePool, dir: &Path) -> Result<ImportSummary> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read import directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    let mut summary = ImportSummary::default();

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    for path in files {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => {}
            Some("xlsx") | Some("xls") => {
                tracing::warn!(file = %path.display(), "spreadsheet files are not supported, export to CSV");
                summary.skipped_files.push(path);
                pb.inc(1);
                continue;
            }
            _ => {
                pb.inc(1);
                continue;
            }
        }

        pb.set_message(path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default());
        match import_file(pool, &path).await? {
            Some(rows) => {
                summary.files += 1;
                summary.rows += rows;
            }
            None => summary.skipped_files.push(path),
        }
        pb.inc(1);
    }
    pb.finish_with_message("✅ Import finished");

    Ok(summary)
}
