// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sector (arc) mark generation.
//!
//! Donut slices are sectors with a non-zero inner radius. Angles here are in kurbo's convention;
//! [`SectorMarkSpec::from_slice`] converts from a [`PieSlice`].

use kaymo_core::{Mark, MarkId, PickKey};
use kurbo::{Circle, Point, Shape};
use peniko::Brush;

use crate::axis::StrokeStyle;
use crate::pie::PieSlice;

/// A sector (arc slice), suitable for pie/donut charts.
#[derive(Clone, Debug)]
pub struct SectorMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Center in scene coordinates.
    pub center: Point,
    /// Inner radius in scene coordinates (0 for a pie slice).
    pub inner_radius: f64,
    /// Outer radius in scene coordinates.
    pub outer_radius: f64,
    /// Start angle in radians (0 along +x, clockwise on screen).
    pub start_angle: f64,
    /// Angular span in radians.
    pub sweep: f64,
    /// Fill paint for the sector.
    pub fill: Brush,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Optional outline stroke.
    pub stroke: Option<StrokeStyle>,
    /// Optional hit-test key.
    pub pick: Option<PickKey>,
    /// Curve flattening tolerance when converting the sector to a `BezPath`.
    pub tolerance: f64,
    /// Rendering order hint (`kaymo_core::Mark::z_index`).
    pub z_index: i32,
}

impl SectorMarkSpec {
    /// Creates a new sector mark spec.
    pub fn new(
        id: MarkId,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        sweep: f64,
    ) -> Self {
        Self {
            id,
            center,
            inner_radius,
            outer_radius,
            start_angle,
            sweep,
            fill: Brush::default(),
            opacity: 1.0,
            stroke: None,
            pick: None,
            tolerance: 0.1,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Creates a sector for a laid-out pie slice.
    pub fn from_slice(
        id: MarkId,
        slice: &PieSlice,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
    ) -> Self {
        Self::new(
            id,
            center,
            inner_radius,
            outer_radius,
            slice.kurbo_start(),
            slice.sweep(),
        )
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the outline stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Makes the sector pickable under `key`.
    pub fn with_pick(mut self, key: PickKey) -> Self {
        self.pick = Some(key);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark for this spec.
    pub fn mark(&self) -> Mark {
        let circle = Circle::new(self.center, self.outer_radius.max(0.0));
        let segment = circle.segment(
            self.inner_radius.clamp(0.0, self.outer_radius.max(0.0)),
            self.start_angle,
            self.sweep,
        );
        let path = segment.path_elements(self.tolerance).collect();

        let mut builder = Mark::builder(self.id)
            .path()
            .geometry(path)
            .z_index(self.z_index)
            .fill(self.fill.clone())
            .opacity(self.opacity);

        if let Some(stroke) = self.stroke.clone() {
            builder = builder
                .stroke(stroke.brush)
                .stroke_width(stroke.stroke_width);
        }
        if let Some(key) = self.pick {
            builder = builder.pick(key);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f64::consts::{FRAC_PI_2, TAU};

    use kaymo_core::{MarkKind, MarkPayload, Scene};
    use peniko::Color;
    use peniko::color::palette::css;

    use super::*;
    use crate::pie::pie;

    #[test]
    fn sector_emits_a_path_mark_with_bounds() {
        let sector = SectorMarkSpec::new(
            MarkId::from_raw(1),
            Point::new(50.0, 50.0),
            10.0,
            40.0,
            0.0,
            FRAC_PI_2,
        )
        .with_fill(css::TOMATO)
        .with_stroke(StrokeStyle::solid(Color::WHITE, 2.0))
        .mark();

        assert_eq!(sector.kind, MarkKind::Path);
        let bounds = sector.bounds().expect("sector has bounds");
        // First quadrant clockwise from +x: right and below the center.
        assert!(bounds.x0 >= 50.0 - 1e-6);
        assert!(bounds.y0 >= 50.0 - 1e-6);
        assert!(bounds.x1 <= 90.0 + 1e-6);
        let MarkPayload::Path(p) = &sector.payload else {
            panic!("expected a path payload");
        };
        assert_eq!(p.stroke_width, 2.0);
    }

    #[test]
    fn donut_from_pie_is_hit_in_the_ring_only() {
        let center = Point::new(250.0, 250.0);
        let slices = pie(&[1.0]);
        assert_eq!(slices[0].sweep(), TAU);
        let mut scene = Scene::new();
        scene.tick([SectorMarkSpec::from_slice(MarkId::from_raw(1), &slices[0], center, 126.0, 210.0)
            .with_pick(PickKey(3))
            .mark()]);
        assert_eq!(
            scene.pick(Point::new(250.0, 250.0 - 150.0)),
            Some((MarkId::from_raw(1), PickKey(3)))
        );
        assert_eq!(scene.pick(center), None);
    }

    #[test]
    fn first_slice_starts_at_twelve_o_clock() {
        let slices = pie(&[1.0, 3.0]);
        let spec =
            SectorMarkSpec::from_slice(MarkId::from_raw(2), &slices[0], Point::ZERO, 0.0, 10.0);
        assert!((spec.start_angle + FRAC_PI_2).abs() < 1e-12);
        let bb = spec.mark().bounds().expect("bounds");
        // A quarter from 12 to 3 o'clock lies above and right of the center.
        assert!(bb.y1 <= 1e-6, "{bb:?}");
        assert!(bb.x0 >= -1e-6, "{bb:?}");
    }
}
