// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve interpolation for line and area marks.
//!
//! [`Curve::MonotoneX`] is the Fritsch–Carlson style monotone cubic used by d3's `curveMonotoneX`
//! (Steffen's tangent limiter): it never overshoots the data in y, so a series that only
//! decreases is drawn as a curve that only decreases.

use kurbo::{BezPath, Point};

/// How consecutive points of a series are connected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Curve {
    /// Straight segments.
    #[default]
    Linear,
    /// Monotone cubic interpolation in x.
    MonotoneX,
}

impl Curve {
    /// Appends the curve through `points` to `path`.
    ///
    /// If `connect` is true the first point is joined with a line from the current position
    /// (used when closing areas); otherwise a new subpath is started.
    pub fn extend_path(self, path: &mut BezPath, points: &[Point], connect: bool) {
        let Some(&first) = points.first() else {
            return;
        };
        if connect {
            path.line_to(first);
        } else {
            path.move_to(first);
        }
        match self {
            Self::Linear => {
                for &p in &points[1..] {
                    path.line_to(p);
                }
            }
            Self::MonotoneX => monotone_x(path, points),
        }
    }

    /// Returns a fresh path through `points`.
    pub fn path(self, points: &[Point]) -> BezPath {
        let mut path = BezPath::new();
        self.extend_path(&mut path, points, false);
        path
    }
}

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

/// Tangent at an interior point from the slopes of its two neighbouring segments.
fn slope3(p0: Point, p1: Point, p2: Point) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = (p1.y - p0.y) / if h0 != 0.0 { h0 } else if h1 < 0.0 { -0.0 } else { 0.0 };
    let s1 = (p2.y - p1.y) / if h1 != 0.0 { h1 } else if h0 < 0.0 { -0.0 } else { 0.0 };
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() { t } else { 0.0 }
}

/// One-sided tangent at an end point, given the tangent `t` at the adjacent point.
fn slope2(p0: Point, p1: Point, t: f64) -> f64 {
    let h = p1.x - p0.x;
    if h != 0.0 {
        (3.0 * (p1.y - p0.y) / h - t) / 2.0
    } else {
        t
    }
}

fn hermite(path: &mut BezPath, p0: Point, p1: Point, t0: f64, t1: f64) {
    let dx = (p1.x - p0.x) / 3.0;
    path.curve_to(
        Point::new(p0.x + dx, p0.y + dx * t0),
        Point::new(p1.x - dx, p1.y - dx * t1),
        p1,
    );
}

fn monotone_x(path: &mut BezPath, points: &[Point]) {
    match points.len() {
        0 | 1 => {}
        2 => path.line_to(points[1]),
        n => {
            let mut tangents = alloc::vec::Vec::with_capacity(n);
            tangents.push(0.0);
            for w in points.windows(3) {
                tangents.push(slope3(w[0], w[1], w[2]));
            }
            tangents.push(0.0);
            tangents[0] = slope2(points[0], points[1], tangents[1]);
            tangents[n - 1] = slope2(points[n - 2], points[n - 1], tangents[n - 2]);
            for i in 0..n - 1 {
                hermite(path, points[i], points[i + 1], tangents[i], tangents[i + 1]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use kurbo::{PathEl, Shape};

    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn single_point_is_a_move_only() {
        let p = Curve::MonotoneX.path(&pts(&[(1.0, 2.0)]));
        assert_eq!(p.elements(), &[PathEl::MoveTo(Point::new(1.0, 2.0))]);
    }

    #[test]
    fn two_points_are_a_straight_line() {
        let p = Curve::MonotoneX.path(&pts(&[(0.0, 0.0), (10.0, 5.0)]));
        assert_eq!(
            p.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(10.0, 5.0))
            ]
        );
    }

    #[test]
    fn monotone_data_does_not_overshoot() {
        // Increasing input: the curve must stay within the y extent of the data.
        let data = pts(&[
            (0.0, 10.0),
            (20.0, 30.0),
            (50.0, 32.0),
            (80.0, 90.0),
            (100.0, 95.0),
        ]);
        let p = Curve::MonotoneX.path(&data);
        assert_eq!(p.elements().len(), data.len());
        let bb = p.bounding_box();
        assert!(bb.y0 >= 10.0 - 1e-9, "{bb:?}");
        assert!(bb.y1 <= 95.0 + 1e-9, "{bb:?}");
    }

    #[test]
    fn local_peak_has_zero_tangent() {
        let t = slope3(Point::new(0.0, 1.0), Point::new(1.0, 2.0), Point::new(2.0, 1.0));
        assert_eq!(t, 0.0);
    }

    #[test]
    fn curve_passes_through_every_point() {
        let data = pts(&[(0.0, 0.0), (1.0, 3.0), (3.0, 4.0), (4.0, 8.0)]);
        let p = Curve::MonotoneX.path(&data);
        let ends: Vec<Point> = p
            .elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
                PathEl::CurveTo(_, _, p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(ends, data);
    }

    #[test]
    fn control_points_sit_at_thirds_along_x() {
        let data = pts(&[(0.0, 0.0), (30.0, 30.0), (60.0, 60.0)]);
        let p = Curve::MonotoneX.path(&data);
        let PathEl::CurveTo(c1, c2, end) = p.elements()[1] else {
            panic!("expected a cubic segment, got {:?}", p.elements());
        };
        // Collinear input keeps the unit slope on both handles.
        assert_eq!(c1, Point::new(10.0, 10.0));
        assert_eq!(c2, Point::new(20.0, 20.0));
        assert_eq!(end, Point::new(30.0, 30.0));
    }

    #[test]
    fn linear_connects_from_current_point() {
        let mut p = BezPath::new();
        p.move_to((0.0, 100.0));
        Curve::Linear.extend_path(&mut p, &pts(&[(0.0, 50.0), (10.0, 40.0)]), true);
        assert_eq!(p.elements().len(), 3);
    }
}
