// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick labels and annotations.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats `v` with the shortest representation that round-trips.
///
/// Integers print without a fractional part (`2`, not `2.0`) and negative zero prints as `0`,
/// which is how values appear when interpolated into a web page.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    format!("{v}")
}

/// Formats `v` with exactly `decimals` digits after the point.
pub fn format_fixed(v: f64, decimals: usize) -> String {
    let s = format!("{v:.decimals$}");
    // "-0.00" reads as noise in labels.
    if s.starts_with('-') && s[1..].bytes().all(|b| b == b'0' || b == b'.') {
        s[1..].to_string()
    } else {
        s
    }
}

/// Number of decimals needed to distinguish ticks spaced `step` apart.
pub fn step_decimals(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    let d = -step.log10().floor();
    #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
    let d = d.clamp(0.0, 12.0) as usize;
    // Steps like 0.25 need one more digit than their magnitude suggests.
    let scaled = step * 10_f64.powi(i32::try_from(d).unwrap_or(0));
    if (scaled - scaled.round()).abs() > 1e-9 {
        d + 1
    } else {
        d
    }
}

/// Formats a tick value using just enough decimals for the tick spacing.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    format_fixed(v, step_decimals(step))
}

/// Formats the integer part of `v` with `,` thousands separators (`686000` → `686,000`).
///
/// Fractions are floored first, matching a counter that only shows whole units.
pub fn format_grouped(v: f64) -> String {
    if !v.is_finite() {
        return format_number(v);
    }
    let floored = v.floor();
    let negative = floored < 0.0;
    let digits = format_fixed(floored.abs(), 0);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats `numerator / denominator` as a percentage with `decimals` digits.
///
/// A zero or non-finite denominator yields `0`.
pub fn format_percent(numerator: f64, denominator: f64, decimals: usize) -> String {
    let pct = if denominator != 0.0 && denominator.is_finite() {
        numerator / denominator * 100.0
    } else {
        0.0
    };
    format_fixed(if pct.is_finite() { pct } else { 0.0 }, decimals)
}
