// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use quarterly_compare::chart::ChartKind;
use quarterly_compare::compare::{self, Selection};
use quarterly_compare::config::{Config, DEFAULT_CONFIG_PATH};
use quarterly_compare::diff::DiffResult;
use quarterly_compare::period::Period;
use quarterly_compare::store::{SeriesStore, SqliteSeriesStore};
use quarterly_compare::utils::format_decimal;
use quarterly_compare::{db, ingest, render, web};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config.toml
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List companies available in the database
    Companies,
    /// List breakdowns available in the database
    Breakdowns,
    /// Chart one or more companies; adds a % difference when exactly two have data
    Dashboard {
        /// Companies to chart (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        companies: Vec<String>,
        #[arg(long)]
        breakdown: String,
        #[arg(long, value_enum, default_value_t = ChartKind::Line)]
        chart: ChartKind,
        /// Output file (.svg or .png); defaults to <output_dir>/chart.svg
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Percentage difference and insights for exactly two companies
    Compare {
        /// Two companies (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        companies: Vec<String>,
        #[arg(long)]
        breakdown: String,
    },
    /// Import per-company CSV exports from a directory
    Import {
        #[arg(long)]
        dir: PathBuf,
    },
    /// Start the web server
    Serve {
        /// Port to bind to
        #[arg(long, default_value = "3000")]
        port: u16,
    },
}

fn print_diff_table(diff: &DiffResult) {
    println!("\n% DIFFERENCE ({} vs {}):", diff.entity1, diff.entity2);
    for period in Period::ALL {
        match diff.get(period) {
            Some(pct) => println!("  {:<10} {:>10}%", period.label(), format_decimal(pct)),
            None => println!("  {:<10} {:>11}", period.label(), "n/a"),
        }
    }
}

fn print_insights(insights: &[String]) {
    if insights.is_empty() {
        return;
    }
    println!("\nInsights:");
    for sentence in insights {
        println!("  • {}", sentence);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let pool = db::create_db_pool(&config.database_url).await?;

    match cli.command {
        Commands::Companies => {
            let mut store = SqliteSeriesStore::acquire(&pool).await?;
            for company in store.list_entities().await? {
                println!("{}", company);
            }
        }
        Commands::Breakdowns => {
            let mut store = SqliteSeriesStore::acquire(&pool).await?;
            for breakdown in store.list_breakdowns().await? {
                println!("{}", breakdown);
            }
        }
        Commands::Dashboard {
            companies,
            breakdown,
            chart,
            output,
        } => {
            let mut store = SqliteSeriesStore::acquire(&pool).await?;
            let selection = Selection::new(companies, breakdown, chart);
            let outcome = compare::dashboard(&mut store, &config.chart.palette, &selection).await?;

            for missing in &outcome.missing {
                eprintln!("⚠️  No data for {} / {}", missing, outcome.breakdown);
            }

            let path = output.unwrap_or_else(|| config.output_dir.join("chart.svg"));
            render::render_file(&outcome.chart, &config.chart, &path)?;
            println!("✅ Chart written to {}", path.display());

            match &outcome.diff {
                Some(diff) => print_diff_table(diff),
                None => println!("\n(% difference only shown when exactly 2 companies have data.)"),
            }
            print_insights(&outcome.insights);
        }
        Commands::Compare {
            companies,
            breakdown,
        } => {
            let mut store = SqliteSeriesStore::acquire(&pool).await?;
            let selection = Selection::new(companies, breakdown, ChartKind::default());
            let outcome = compare::compare(&mut store, &selection).await?;

            println!("{:<20} {}", "Company", Period::labels().join("  "));
            for series in &outcome.values {
                let cells: Vec<String> = series
                    .values
                    .iter()
                    .map(|v| v.value.map(format_decimal).unwrap_or_else(|| "-".to_string()))
                    .collect();
                println!("{:<20} {}", series.entity, cells.join("  "));
            }
            print_diff_table(&outcome.diff);
            print_insights(&outcome.insights);
        }
        Commands::Import { dir } => {
            let summary = ingest::import_dir(&pool, &dir).await?;
            println!(
                "✅ Imported {} rows from {} files",
                summary.rows, summary.files
            );
            for skipped in &summary.skipped_files {
                eprintln!("⚠️  Skipped {}", skipped.display());
            }
        }
        Commands::Serve { port } => {
            let state = web::AppState::new(pool, config);
            web::start_server(state, port).await?;
        }
    }

    Ok(())
}
