// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale utilities.
//!
//! Continuous data (years, magnitudes) goes through [`ScaleLinear`]; categorical data (countries)
//! goes through [`ScaleBand`]. Both follow d3's conventions so charts line up with the familiar
//! web rendering of the same data.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A scale specification (domain + options, no range yet).
#[derive(Clone, Copy, Debug)]
pub enum ScaleSpec {
    /// Continuous linear scale.
    Linear(ScaleLinearSpec),
    /// Discrete band scale.
    Band(ScaleBandSpec),
}

impl From<ScaleLinearSpec> for ScaleSpec {
    fn from(value: ScaleLinearSpec) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleBandSpec> for ScaleSpec {
    fn from(value: ScaleBandSpec) -> Self {
        Self::Band(value)
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to "nice" the domain outward to tick boundaries.
    pub nice: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain (`d0 == d1`, including a single observed value) maps everything to the
    /// range midpoint. Non-finite input maps to the range start. Output is never NaN for a finite
    /// range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if !x.is_finite() || !d0.is_finite() || !d1.is_finite() {
            return r0;
        }
        let denom = d1 - d0;
        if denom == 0.0 {
            return 0.5 * (r0 + r1);
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a value and clamps the result into the range.
    pub fn map_clamped(&self, x: f64) -> f64 {
        let (r0, r1) = self.range;
        self.map(x).clamp(r0.min(r1), r0.max(r1))
    }

    /// Maps a range value back into the domain.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 || !y.is_finite() {
            return d0;
        }
        d0 + (y - r0) / denom * (d1 - d0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns "nice" tick values that lie inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns the spacing of [`ScaleLinear::ticks`] for `count`.
    pub fn tick_step(&self, count: usize) -> f64 {
        let (a, b) = self.domain;
        tick_increment(a.min(b), a.max(b), count)
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        let (a, b) = self.domain;
        let (lo, hi) = (a.min(b), a.max(b));
        let step = tick_increment(lo, hi, tick_count);
        if step <= 0.0 || !step.is_finite() {
            return self.domain;
        }
        let lo = (lo / step).floor() * step;
        let hi = (hi / step).ceil() * step;
        if a <= b { (lo, hi) } else { (hi, lo) }
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        ScaleLinear::new(self.domain, range)
    }

    /// Instantiates a concrete scale using the `resolved_domain` (respecting `nice`).
    pub fn instantiate_resolved(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
    }
}

/// Tick spacing for roughly `count` ticks over `[min, max]`, snapped to 1, 2 or 5 × 10ⁿ.
fn tick_increment(min: f64, max: f64, count: usize) -> f64 {
    if count == 0 || !(min.is_finite() && max.is_finite()) || max <= min {
        return 0.0;
    }
    let step0 = (max - min) / count as f64;
    let power = step0.log10().floor();
    #[allow(clippy::cast_possible_truncation, reason = "power of ten of a finite span")]
    let base = 10_f64.powi(power as i32);
    let error = step0 / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

fn ticks(a: f64, b: f64, count: usize) -> Vec<f64> {
    if count == 0 || !(a.is_finite() && b.is_finite()) {
        return Vec::new();
    }
    if a == b {
        return alloc::vec![a];
    }
    let (min, max) = (a.min(b), a.max(b));
    let step = tick_increment(min, max, count);
    if step == 0.0 {
        return Vec::new();
    }

    // Sub-unit steps divide by the inverse step so decimal ticks stay exact
    // (0.6, not 0.6000000000000001).
    let inverse = step < 1.0;
    let k = if inverse { (1.0 / step).round() } else { step };
    let (lo, hi) = if inverse {
        ((min * k).ceil(), (max * k).floor())
    } else {
        ((min / k).ceil(), (max / k).floor())
    };
    if hi < lo {
        return Vec::new();
    }
    let n = (hi - lo).min(10_000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "non-negative and capped at 10k above"
    )]
    let n = n as u64;
    let mut out: Vec<f64> = (0..=n)
        .map(|i| {
            let v = lo + i as f64;
            if inverse { v / k } else { v * k }
        })
        .collect();
    if a > b {
        out.reverse();
    }
    out
}

/// A discrete band scale for categorical charts.
///
/// Bands are laid out like d3's `scaleBand`: `step = span / (n - inner + 2 * outer)`, bands start
/// `step * outer` into the range, and each band is `step * (1 - inner)` wide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

/// Specification for a band scale (count + padding, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBandSpec {
    /// Number of bands.
    pub count: usize,
    /// Inner padding as a fraction of the step, in `[0, 1]`.
    pub padding_inner: f64,
    /// Outer padding as a fraction of the step.
    pub padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`, without padding.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    /// Sets inner and outer padding to the same value (d3's `padding`).
    pub fn with_padding(self, padding: f64) -> Self {
        self.with_paddings(padding, padding)
    }

    /// Sets inner and outer padding separately.
    pub fn with_paddings(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = if inner.is_finite() {
            inner.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.padding_outer = if outer.is_finite() { outer.max(0.0) } else { 0.0 };
        self
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        let denom = (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        (r1 - r0).abs() / denom
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the start position of the band at `index`.
    ///
    /// Bands are always laid out in ascending coordinate order.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let step = self.step();
        r0.min(r1) + step * self.padding_outer + step * index as f64
    }

    /// Returns the center of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.x(index) + 0.5 * self.band_width()
    }
}

impl ScaleBandSpec {
    /// Creates a new band scale spec without padding.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    /// Sets inner and outer padding to the same value.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding;
        self.padding_outer = padding;
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleBand {
        ScaleBand::new(range, self.count).with_paddings(self.padding_inner, self.padding_outer)
    }
}

/// Returns the `(min, max)` of the finite values, like d3's `extent`.
///
/// Returns `None` if no finite values are present.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Returns the largest finite value, like d3's `max`.
pub fn max(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    extent(values).map(|(_, hi)| hi)
}
