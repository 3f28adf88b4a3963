// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::Palette;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Process-wide settings, loaded once in `main` and passed down by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub output_dir: PathBuf,
    pub chart: ChartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:financials.db".to_string(),
            output_dir: PathBuf::from("output"),
            chart: ChartConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub palette: Palette,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            palette: Palette::default(),
        }
    }
}

impl TryFrom<Vec<String>> for Palette {
    type Error = String;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Palette::from_names(&names)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        (0..palette.len())
            .map(|i| palette.color_for(i).name.clone())
            .collect()
    }
}

impl Config {
    /// Read `path` if it exists, otherwise use defaults. `DATABASE_URL` wins over the file.
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let mut config = if path.exists() {
            let config_str = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&config_str)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Config::default()
        };

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }

        Ok(config)
    }
}
