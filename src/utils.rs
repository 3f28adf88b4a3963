// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to `places` decimals, ties to even (0.125 -> 0.12, 0.375 -> 0.38).
///
/// Rounds the exact binary value of `value`: `(7 - 4000) / 4000 * 100` is stored
/// as -99.8250000000000028... and goes to -99.83. Values outside `Decimal`'s
/// range come back unchanged. Negative zero is folded into `0.0`.
pub fn round_half_even(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let rounded = exact
        .round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
        .to_f64()
        .unwrap_or(value);
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Shortest round-trip rendering, written the way Python's `str(float)` does:
/// one decimal kept on whole numbers (`100.0`, `33.33`, `0.5`) and scientific
/// notation from `1e+16` up or below `1e-04`.
pub fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sci = format!("{:e}", value);
    if let Some((mantissa, exponent)) = sci.split_once('e') {
        let exponent: i32 = exponent.parse().unwrap_or(0);
        if exponent >= 16 || exponent < -4 {
            return format!("{}e{:+03}", mantissa, exponent);
        }
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Safely truncate a string to a maximum number of characters, respecting UTF-8 boundaries
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
