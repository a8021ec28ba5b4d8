// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area mark generation.

use kaymo_core::{Mark, MarkId};
use kurbo::{BezPath, Point};
use peniko::Brush;

use crate::curve::Curve;

/// An area mark: the region between a series and a horizontal baseline.
#[derive(Clone, Debug)]
pub struct AreaMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Interpolation of the top edge.
    pub curve: Curve,
    /// Baseline y in scene coordinates.
    pub baseline_y: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Rendering order hint (`kaymo_core::Mark::z_index`).
    pub z_index: i32,
}

impl AreaMarkSpec {
    /// Creates an area spec closed against `baseline_y`.
    pub fn new(id: MarkId, baseline_y: f64) -> Self {
        Self {
            id,
            curve: Curve::Linear,
            baseline_y,
            fill: Brush::default(),
            opacity: 1.0,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the curve interpolation.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
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

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the area mark under `points` (already in scene coordinates).
    pub fn mark(&self, points: &[Point]) -> Mark {
        let mut path = BezPath::new();
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            path.move_to((first.x, self.baseline_y));
            self.curve.extend_path(&mut path, points, true);
            path.line_to((last.x, self.baseline_y));
            path.close_path();
        }
        Mark::builder(self.id)
            .path()
            .z_index(self.z_index)
            .geometry(path)
            .fill(self.fill.clone())
            .opacity(self.opacity)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use kaymo_core::MarkPayload;

    use super::*;

    #[test]
    fn area_spans_from_series_to_baseline() {
        let pts = [
            Point::new(0.0, 50.0),
            Point::new(50.0, 20.0),
            Point::new(100.0, 40.0),
        ];
        let mark = AreaMarkSpec::new(MarkId::from_raw(3), 200.0)
            .with_curve(Curve::MonotoneX)
            .with_opacity(0.2)
            .mark(&pts);
        let bb = mark.bounds().expect("area bounds");
        assert_eq!(bb.x0, 0.0);
        assert_eq!(bb.x1, 100.0);
        assert_eq!(bb.y1, 200.0);
        assert!(bb.y0 >= 20.0 - 1e-9);
        assert_eq!(mark.payload.opacity(), 0.2);
        assert!(mark.payload.contains(Point::new(50.0, 150.0)));
    }

    #[test]
    fn empty_series_gives_empty_path() {
        let mark = AreaMarkSpec::new(MarkId::from_raw(3), 200.0).mark(&[]);
        let MarkPayload::Path(p) = &mark.payload else {
            panic!("expected a path payload");
        };
        assert!(p.path.elements().is_empty());
        assert_eq!(mark.bounds(), None);
    }
}
