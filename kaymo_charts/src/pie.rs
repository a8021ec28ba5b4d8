// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie layout.
//!
//! Angles follow the d3 convention: `0` points to 12 o'clock and angles grow clockwise.
//! [`PieSlice::kurbo_start`] converts to kurbo's convention (0 along +x, clockwise in a y-down
//! scene).

extern crate alloc;

use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// One slice of a pie layout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PieSlice {
    /// Index of the input value.
    pub index: usize,
    /// Input value after clamping (negative and non-finite values become 0).
    pub value: f64,
    /// Start angle in radians (d3 convention).
    pub start_angle: f64,
    /// End angle in radians (d3 convention).
    pub end_angle: f64,
}

impl PieSlice {
    /// Angular span of the slice.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Start angle in kurbo's convention.
    pub fn kurbo_start(&self) -> f64 {
        self.start_angle - FRAC_PI_2
    }

    /// Point halfway along the slice at the mean of `inner` and `outer` radius, like d3's
    /// `arc.centroid`.
    pub fn centroid(&self, center: Point, inner: f64, outer: f64) -> Point {
        let r = 0.5 * (inner + outer);
        let a = 0.5 * (self.start_angle + self.end_angle) - FRAC_PI_2;
        center + Vec2::new(a.cos() * r, a.sin() * r)
    }
}

/// Lays out `values` around a full circle in input order (d3's `pie().sort(null)`).
///
/// Each slice gets a span proportional to its value. Slices tessellate the circle without gaps:
/// the first starts at `0` and the last ends at exactly `2π`. If the total is not positive and
/// finite, the circle is split evenly.
pub fn pie(values: &[f64]) -> Vec<PieSlice> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let clamped = values
        .iter()
        .map(|&v| if v.is_finite() && v > 0.0 { v } else { 0.0 });
    let sum: f64 = clamped.clone().sum();
    let even = !(sum.is_finite() && sum > 0.0);

    let mut out = Vec::with_capacity(n);
    let mut start = 0.0;
    for (index, value) in clamped.enumerate() {
        let span = if even {
            TAU / n as f64
        } else {
            value / sum * TAU
        };
        let end = if index + 1 == n { TAU } else { start + span };
        out.push(PieSlice {
            index,
            value,
            start_angle: start,
            end_angle: end,
        });
        start = end;
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn slices_tessellate_the_circle() {
        let slices = pie(&[12.0, 15.0, 8.0, 45.0, 28.0]);
        assert_eq!(slices.len(), 5);
        assert_eq!(slices[0].start_angle, 0.0);
        assert_eq!(slices[4].end_angle, TAU);
        for w in slices.windows(2) {
            assert_eq!(w[0].end_angle, w[1].start_angle);
        }
        let total: f64 = slices.iter().map(PieSlice::sweep).sum();
        assert!((total - TAU).abs() < 1e-12);
        assert!(slices.iter().all(|s| s.sweep() >= 0.0 && !s.sweep().is_nan()));
    }

    #[test]
    fn spans_are_proportional() {
        let slices = pie(&[1.0, 3.0]);
        assert!((slices[0].sweep() - TAU / 4.0).abs() < 1e-12);
        assert!((slices[1].sweep() - 3.0 * TAU / 4.0).abs() < 1e-12);
    }

    #[test]
    fn negative_and_nan_values_get_empty_slices() {
        let slices = pie(&[-5.0, f64::NAN, 2.0]);
        assert_eq!(slices[0].sweep(), 0.0);
        assert_eq!(slices[1].sweep(), 0.0);
        assert_eq!(slices[0].value, 0.0);
        assert_eq!(slices[2].sweep(), TAU);
    }

    #[test]
    fn zero_total_splits_evenly() {
        let slices = pie(&[0.0, 0.0, 0.0, 0.0]);
        for s in &slices {
            assert!((s.sweep() - TAU / 4.0).abs() < 1e-12);
        }
        assert_eq!(slices[3].end_angle, TAU);
        assert!(pie(&[]).is_empty());
    }

    #[test]
    fn centroid_of_first_quarter_is_up_right() {
        let s = PieSlice {
            index: 0,
            value: 1.0,
            start_angle: 0.0,
            end_angle: FRAC_PI_2,
        };
        let c = s.centroid(Point::ZERO, 0.0, 2.0);
        // 45° clockwise from 12 o'clock, radius 1.
        let h = core::f64::consts::FRAC_1_SQRT_2;
        assert!((c.x - h).abs() < 1e-12);
        assert!((c.y + h).abs() < 1e-12);
    }
}
