// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule mark generation.
//!
//! A "rule" is a straight line segment, used here for reference lines at the selected or hovered
//! data point.

use kaymo_core::{Mark, MarkId};
use kurbo::{BezPath, Point};
use peniko::Color;

use crate::axis::StrokeStyle;
use crate::z_order;

/// A rule mark spec (a stroked line segment).
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Start point in scene coordinates.
    pub from: Point,
    /// End point in scene coordinates.
    pub to: Point,
    /// Stroke style (paint, width, dash).
    pub stroke: StrokeStyle,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Rendering order hint (`kaymo_core::Mark::z_index`).
    pub z_index: i32,
}

impl RuleMarkSpec {
    /// Creates a new rule between two points.
    pub fn new(id: MarkId, from: Point, to: Point) -> Self {
        Self {
            id,
            from,
            to,
            stroke: StrokeStyle::default(),
            opacity: 1.0,
            z_index: z_order::SERIES_STROKE,
        }
    }

    /// Creates a vertical rule.
    pub fn vertical(id: MarkId, x: f64, y0: f64, y1: f64) -> Self {
        Self::new(id, Point::new(x, y0), Point::new(x, y1))
    }

    /// Creates a horizontal rule.
    pub fn horizontal(id: MarkId, y: f64, x0: f64, x1: f64) -> Self {
        Self::new(id, Point::new(x0, y), Point::new(x1, y))
    }

    /// Sets the stroke style.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
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

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mut path = BezPath::new();
        path.move_to(self.from);
        path.line_to(self.to);
        let mut builder = Mark::builder(self.id)
            .path()
            .z_index(self.z_index)
            .geometry(path)
            .fill(Color::TRANSPARENT)
            .stroke(self.stroke.brush.clone())
            .stroke_width(self.stroke.stroke_width)
            .opacity(self.opacity);
        if let Some(dash) = self.stroke.dash.clone() {
            builder = builder.dash(dash);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use kaymo_core::MarkPayload;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn dashed_rule_keeps_its_pattern() {
        let rule = RuleMarkSpec::vertical(MarkId::from_raw(7), 100.0, 20.0, 260.0)
            .with_stroke(StrokeStyle::dashed(css::RED, 2.0, &[5.0, 5.0]))
            .with_opacity(0.7)
            .mark();
        let MarkPayload::Path(p) = &rule.payload else {
            panic!("expected a path payload");
        };
        let dash = p.dash.as_ref().expect("dash pattern");
        assert_eq!(dash.pattern.as_slice(), &[5.0, 5.0]);
        assert_eq!(p.opacity, 0.7);
        assert_eq!(p.stroke_width, 2.0);
        assert_eq!(rule.bounds().map(|b| b.height()), Some(240.0));
    }
}
