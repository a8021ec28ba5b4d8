// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line mark generation.

use kaymo_core::{Entrance, Mark, MarkId, Transition};
use kurbo::Point;
use peniko::Color;

use crate::axis::StrokeStyle;
use crate::curve::Curve;

/// A line mark: one stroked path through a series of points.
#[derive(Clone, Debug)]
pub struct LineMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Interpolation between points.
    pub curve: Curve,
    /// Stroke style for the line.
    pub stroke: StrokeStyle,
    /// Duration of the stroke reveal, if the line animates in.
    pub reveal_ms: Option<f64>,
    /// Rendering order hint (`kaymo_core::Mark::z_index`).
    pub z_index: i32,
}

impl LineMarkSpec {
    /// Creates a straight-segment line spec with a 1px black stroke.
    pub fn new(id: MarkId) -> Self {
        Self {
            id,
            curve: Curve::Linear,
            stroke: StrokeStyle::default(),
            reveal_ms: None,
            z_index: crate::z_order::SERIES_STROKE,
        }
    }

    /// Sets the curve interpolation.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Sets the stroke style.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Reveals the stroke along its length over `duration_ms` when first drawn.
    pub fn with_reveal(mut self, duration_ms: f64) -> Self {
        self.reveal_ms = Some(duration_ms);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the line mark through `points` (already in scene coordinates).
    pub fn mark(&self, points: &[Point]) -> Mark {
        let mut builder = Mark::builder(self.id)
            .path()
            .z_index(self.z_index)
            .geometry(self.curve.path(points))
            .fill(Color::TRANSPARENT)
            .stroke(self.stroke.brush.clone())
            .stroke_width(self.stroke.stroke_width);
        if let Some(dash) = self.stroke.dash.clone() {
            builder = builder.dash(dash);
        }
        if let Some(ms) = self.reveal_ms {
            builder = builder.transition(Transition::new(Entrance::Reveal, ms));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use kaymo_core::MarkPayload;
    use kurbo::PathEl;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn line_is_unfilled_and_revealed() {
        let pts = [
            Point::new(0.0, 10.0),
            Point::new(10.0, 5.0),
            Point::new(20.0, 0.0),
        ];
        let mark = LineMarkSpec::new(MarkId::from_raw(1))
            .with_curve(Curve::MonotoneX)
            .with_stroke(StrokeStyle::solid(css::RED, 3.0))
            .with_reveal(2000.0)
            .mark(&pts);
        let MarkPayload::Path(p) = &mark.payload else {
            panic!("expected a path payload");
        };
        assert_eq!(p.fill, peniko::Brush::from(Color::TRANSPARENT));
        assert_eq!(p.stroke_width, 3.0);
        assert!(matches!(p.path.elements()[1], PathEl::CurveTo(..)));
        let t = mark.transition.expect("reveal transition");
        assert_eq!(t.entrance, Entrance::Reveal);
        assert_eq!(t.duration_ms, 2000.0);
    }
}
