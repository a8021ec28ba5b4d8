// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar mark generation.

extern crate alloc;

use alloc::vec::Vec;

use kaymo_core::{Entrance, Mark, MarkId, PickKey, Transition};
use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;

use crate::scale::{ScaleBand, ScaleLinear};

/// Direction bars extend in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BarOrient {
    /// Bands along x, bars grow upward from the baseline.
    #[default]
    Vertical,
    /// Bands along y, bars grow rightward from the baseline.
    Horizontal,
}

/// A bar mark spec: one [`kaymo_core::MarkKind::Rect`] per value.
///
/// Bar `i` gets the mark id `id_base + i` and, if pickable, the pick key `pick_base + i`.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Bar direction.
    pub orient: BarOrient,
    /// Band scale positioning bars across categories.
    pub band: ScaleBand,
    /// Linear scale mapping values along the bar length.
    pub value_scale: ScaleLinear,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Fill paints, cycled by bar index.
    pub fills: Vec<Brush>,
    /// Opacity of regular bars.
    pub opacity: f64,
    /// Index of the highlighted bar.
    pub highlight: Option<usize>,
    /// Opacity of the highlighted bar.
    pub highlight_opacity: f64,
    /// Duration of the grow-in transition, if bars animate in.
    pub grow_ms: Option<f64>,
    /// Pick-key base, if bars are interactive.
    pub pick_base: Option<u64>,
    /// Rendering order hint (`kaymo_core::Mark::z_index`).
    pub z_index: i32,
}

impl BarMarkSpec {
    /// Creates a bar spec with `baseline = 0` and a black fill.
    pub fn new(id_base: u64, orient: BarOrient, band: ScaleBand, value_scale: ScaleLinear) -> Self {
        Self {
            id_base,
            orient,
            band,
            value_scale,
            baseline: 0.0,
            fills: Vec::new(),
            opacity: 1.0,
            highlight: None,
            highlight_opacity: 1.0,
            grow_ms: None,
            pick_base: None,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline in data units.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets per-bar fills (cycled by index).
    pub fn with_fills(mut self, fills: impl IntoIterator<Item = Brush>) -> Self {
        self.fills = fills.into_iter().collect();
        self
    }

    /// Sets the opacity of regular bars.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Highlights the bar at `index` (if any) with `opacity`.
    pub fn with_highlight(mut self, index: Option<usize>, opacity: f64) -> Self {
        self.highlight = index;
        self.highlight_opacity = opacity;
        self
    }

    /// Grows bars from the baseline over `duration_ms` when first drawn.
    pub fn with_grow(mut self, duration_ms: f64) -> Self {
        self.grow_ms = Some(duration_ms);
        self
    }

    /// Makes bars pickable with keys starting at `pick_base`.
    pub fn with_pick_base(mut self, pick_base: u64) -> Self {
        self.pick_base = Some(pick_base);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Rectangle of the bar for `value` in band `index`.
    pub fn bar_rect(&self, index: usize, value: f64) -> Rect {
        let b0 = self.band.x(index);
        let b1 = b0 + self.band.band_width();
        let v0 = self.value_scale.map(self.baseline);
        let v1 = self.value_scale.map(value);
        match self.orient {
            BarOrient::Vertical => Rect::new(b0, v1.min(v0), b1, v1.max(v0)),
            BarOrient::Horizontal => Rect::new(v1.min(v0), b0, v1.max(v0), b1),
        }
    }

    /// Generates one mark per value.
    pub fn marks(&self, values: &[f64]) -> Vec<Mark> {
        let entrance = match self.orient {
            BarOrient::Vertical => Entrance::GrowHeight,
            BarOrient::Horizontal => Entrance::GrowWidth,
        };
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let fill = if self.fills.is_empty() {
                    Brush::Solid(css::BLACK)
                } else {
                    self.fills[i % self.fills.len()].clone()
                };
                let opacity = if self.highlight == Some(i) {
                    self.highlight_opacity
                } else {
                    self.opacity
                };
                let mut builder = Mark::builder(MarkId::for_row(self.id_base, i))
                    .rect()
                    .z_index(self.z_index)
                    .bounds(self.bar_rect(i, v))
                    .fill(fill)
                    .opacity(opacity);
                if let Some(ms) = self.grow_ms {
                    builder = builder.transition(Transition::new(entrance, ms));
                }
                if let Some(base) = self.pick_base {
                    builder = builder.pick(PickKey(base + i as u64));
                }
                builder.build()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kaymo_core::MarkPayload;

    use super::*;

    #[test]
    fn vertical_bars_stand_on_the_baseline() {
        let band = ScaleBand::new((0.0, 490.0), 2).with_padding(0.2);
        let y = ScaleLinear::new((0.0, 1.0), (320.0, 0.0));
        let spec = BarMarkSpec::new(10, BarOrient::Vertical, band, y)
            .with_opacity(0.8)
            .with_highlight(Some(1), 1.0)
            .with_grow(1000.0);
        let marks = spec.marks(&[0.5, 1.0]);
        let MarkPayload::Rect(r0) = &marks[0].payload else {
            panic!("expected a rect payload");
        };
        assert_eq!(r0.rect.y1, 320.0);
        assert_eq!(r0.rect.y0, 160.0);
        assert_eq!(r0.opacity, 0.8);
        assert_eq!(marks[1].payload.opacity(), 1.0);
        assert_eq!(
            marks[0].transition.map(|t| t.entrance),
            Some(Entrance::GrowHeight)
        );
    }

    #[test]
    fn horizontal_bars_extend_right() {
        let band = ScaleBand::new((0.0, 300.0), 3).with_padding(0.2);
        let x = ScaleLinear::new((0.0, 20.0), (0.0, 500.0));
        let spec = BarMarkSpec::new(0, BarOrient::Horizontal, band, x).with_grow(1000.0);
        let rect = spec.bar_rect(2, 10.0);
        assert_eq!(rect.x0, 0.0);
        assert_eq!(rect.x1, 250.0);
        assert!((rect.height() - band.band_width()).abs() < 1e-9);
        let marks = spec.marks(&[1.0]);
        assert_eq!(
            marks[0].transition.map(|t| t.entrance),
            Some(Entrance::GrowWidth)
        );
    }
}
