// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

pub mod chart;
pub mod compare;
pub mod config;
pub mod db;
pub mod diff;
pub mod error;
pub mod ingest;
pub mod insight;
pub mod period;
pub mod render;
pub mod series;
pub mod store;
pub mod utils;
pub mod web;
