// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symbol helpers for point-like marks.

use kurbo::{BezPath, Circle, Point, Shape};

/// A small set of symbol shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A square (axis-aligned).
    Square,
    /// A circle.
    #[default]
    Circle,
}

impl Symbol {
    /// Returns a path for this symbol centered at `center`, using `size` as the diameter/side.
    pub fn path(self, center: Point, size: f64) -> BezPath {
        let size = size.max(0.0);
        match self {
            Self::Square => square_path(center, size),
            Self::Circle => circle_path(center, size),
        }
    }
}

fn square_path(center: Point, size: f64) -> BezPath {
    let half = size * 0.5;
    let mut p = BezPath::new();
    p.move_to((center.x - half, center.y - half));
    p.line_to((center.x + half, center.y - half));
    p.line_to((center.x + half, center.y + half));
    p.line_to((center.x - half, center.y + half));
    p.close_path();
    p
}

fn circle_path(center: Point, size: f64) -> BezPath {
    let circle = Circle::new(center, size * 0.5);
    circle.path_elements(0.1).collect()
}
