// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation.

extern crate alloc;

use alloc::vec::Vec;

use kaymo_core::{Entrance, Mark, MarkId, PickKey, Transition};
use kurbo::Point;
use peniko::Brush;
use peniko::color::palette::css;

use crate::axis::StrokeStyle;
use crate::symbol::Symbol;

/// Per-point overrides applied to one emphasized point (selected or hovered).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointEmphasis {
    /// Replacement radius.
    pub radius: Option<f64>,
    /// Replacement fill.
    pub fill: Option<Brush>,
    /// Replacement opacity.
    pub opacity: Option<f64>,
}

/// A point mark spec: one symbol per data point.
///
/// Point `i` gets the mark id `id_base + i` and, if pickable, the pick key `pick_base + i`.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// The point glyph shape.
    pub symbol: Symbol,
    /// Glyph radius in scene coordinates.
    pub radius: f64,
    /// Fill paints, cycled by point index.
    pub fills: Vec<Brush>,
    /// Optional outline stroke.
    pub stroke: Option<StrokeStyle>,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Overrides by point index; later entries win.
    pub emphasis: Vec<(usize, PointEmphasis)>,
    /// Radius growth `(duration_ms, stagger_ms)` played when points are first drawn.
    pub grow: Option<(f64, f64)>,
    /// Pick-key base, if points are interactive.
    pub pick_base: Option<u64>,
    /// Rendering order hint (`kaymo_core::Mark::z_index`).
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates a circle point spec with radius 4 and a black fill.
    pub fn new(id_base: u64) -> Self {
        Self {
            id_base,
            symbol: Symbol::Circle,
            radius: 4.0,
            fills: Vec::new(),
            stroke: None,
            opacity: 1.0,
            emphasis: Vec::new(),
            grow: None,
            pick_base: None,
            z_index: crate::z_order::SERIES_POINTS,
        }
    }

    /// Sets the glyph radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets a single fill for every point.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fills = alloc::vec![fill.into()];
        self
    }

    /// Sets per-point fills (cycled by index).
    pub fn with_fills(mut self, fills: impl IntoIterator<Item = Brush>) -> Self {
        self.fills = fills.into_iter().collect();
        self
    }

    /// Sets the symbol shape.
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = symbol;
        self
    }

    /// Sets the outline stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the opacity of every point.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Applies `emphasis` to the point at `index`.
    pub fn with_emphasis(mut self, index: usize, emphasis: PointEmphasis) -> Self {
        self.emphasis.push((index, emphasis));
        self
    }

    /// Grows each point's radius from zero over `duration_ms`, delaying point `i` by
    /// `i * stagger_ms`.
    pub fn with_grow(mut self, duration_ms: f64, stagger_ms: f64) -> Self {
        self.grow = Some((duration_ms, stagger_ms));
        self
    }

    /// Makes points pickable with keys starting at `pick_base`.
    pub fn with_pick_base(mut self, pick_base: u64) -> Self {
        self.pick_base = Some(pick_base);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    fn fill(&self, index: usize) -> Brush {
        if self.fills.is_empty() {
            Brush::Solid(css::BLACK)
        } else {
            self.fills[index % self.fills.len()].clone()
        }
    }

    /// Generates one mark per point (points already in scene coordinates).
    pub fn marks(&self, points: &[Point]) -> Vec<Mark> {
        points
            .iter()
            .enumerate()
            .map(|(i, &center)| {
                let mut radius = self.radius;
                let mut fill = self.fill(i);
                let mut opacity = self.opacity;
                for (_, e) in self.emphasis.iter().filter(|(idx, _)| *idx == i) {
                    if let Some(r) = e.radius {
                        radius = r;
                    }
                    if let Some(f) = &e.fill {
                        fill = f.clone();
                    }
                    if let Some(o) = e.opacity {
                        opacity = o;
                    }
                }

                let mut builder = Mark::builder(MarkId::for_row(self.id_base, i))
                    .path()
                    .z_index(self.z_index)
                    .geometry(self.symbol.path(center, 2.0 * radius))
                    .fill(fill)
                    .opacity(opacity);
                if let Some(stroke) = &self.stroke {
                    builder = builder
                        .stroke(stroke.brush.clone())
                        .stroke_width(stroke.stroke_width);
                }
                if let Some((duration, stagger)) = self.grow {
                    builder = builder.transition(
                        Transition::new(Entrance::Scale, duration).with_delay(stagger * i as f64),
                    );
                }
                if let Some(base) = self.pick_base {
                    builder = builder.pick(PickKey(base + i as u64));
                }
                builder.build()
            })
            .collect()
    }
}
