// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-margin chart layout.
//!
//! Charts on the page have a fixed view size and fixed margins reserved for axes, so the arrange
//! pass only has to carve the plot rectangle out of the view.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space reserved on each side of the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Above the plot.
    pub top: f64,
    /// Right of the plot.
    pub right: f64,
    /// Below the plot (bottom axis).
    pub bottom: f64,
    /// Left of the plot (left axis).
    pub left: f64,
}

impl Margin {
    /// Creates margins in CSS order (top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Layout inputs for a single chart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartLayoutSpec {
    /// Outer chart size.
    pub view_size: Size,
    /// Margins around the plot.
    pub margin: Margin,
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds.
    pub view: Rect,
    /// The plot rectangle (where series are drawn).
    pub plot: Rect,
}

impl ChartLayout {
    /// Computes a layout from the provided specification.
    ///
    /// Negative sizes and margins are treated as zero; a plot that does not fit collapses to zero
    /// width or height at its top-left corner.
    pub fn arrange(spec: &ChartLayoutSpec) -> Self {
        let w = spec.view_size.width.max(0.0);
        let h = spec.view_size.height.max(0.0);
        let m = spec.margin;
        let left = m.left.max(0.0);
        let top = m.top.max(0.0);
        let plot_w = (w - left - m.right.max(0.0)).max(0.0);
        let plot_h = (h - top - m.bottom.max(0.0)).max(0.0);
        Self {
            view: Rect::new(0.0, 0.0, w, h),
            plot: Rect::new(left, top, left + plot_w, top + plot_h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_is_view_minus_margins() {
        let layout = ChartLayout::arrange(&ChartLayoutSpec {
            view_size: Size::new(800.0, 300.0),
            margin: Margin::new(20.0, 30.0, 40.0, 60.0),
        });
        assert_eq!(layout.view, Rect::new(0.0, 0.0, 800.0, 300.0));
        assert_eq!(layout.plot, Rect::new(60.0, 20.0, 770.0, 260.0));
    }

    #[test]
    fn oversized_margins_collapse_the_plot() {
        let layout = ChartLayout::arrange(&ChartLayoutSpec {
            view_size: Size::new(50.0, 50.0),
            margin: Margin::new(40.0, 40.0, 40.0, 40.0),
        });
        assert_eq!(layout.plot.width(), 0.0);
        assert_eq!(layout.plot.height(), 0.0);
    }
}
