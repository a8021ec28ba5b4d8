// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for guide layout.
//!
//! Shaping happens downstream (in the browser for the HTML surface), so guides only need rough
//! extents to place rotated labels and size legend rows.

use kaymo_core::{TextAnchor, TextBaseline};
use kurbo::{Point, Rect};

/// A minimal text measurement interface used by guide generators.
pub trait TextMeasurer {
    /// Returns `(width, height)` in the same coordinate system as the marks.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// A heuristic measurer: ~0.6em per character, 1em tall.
///
/// Wide glyphs (emoji icons) are counted as a full em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let ems: f64 = text
            .chars()
            .map(|c| if u32::from(c) >= 0x2000 { 1.0 } else { 0.6 })
            .sum();
        (ems * font_size, font_size)
    }
}

/// Bounds of a text run of `size` anchored at `pos`.
pub fn text_bounds(pos: Point, size: (f64, f64), anchor: TextAnchor, baseline: TextBaseline) -> Rect {
    let (w, h) = size;
    let (x0, x1) = match anchor {
        TextAnchor::Start => (pos.x, pos.x + w),
        TextAnchor::Middle => (pos.x - w * 0.5, pos.x + w * 0.5),
        TextAnchor::End => (pos.x - w, pos.x),
    };
    let (y0, y1) = match baseline {
        TextBaseline::Middle => (pos.y - h * 0.5, pos.y + h * 0.5),
        TextBaseline::Hanging => (pos.y, pos.y + h),
        TextBaseline::Alphabetic | TextBaseline::Ideographic => (pos.y - h, pos.y),
    };
    Rect::new(x0, y0, x1, y1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_counts_wide_glyphs_as_an_em() {
        let m = HeuristicTextMeasurer;
        assert_eq!(m.measure("ab", 10.0), (12.0, 10.0));
        assert_eq!(m.measure("🌿", 10.0), (10.0, 10.0));
    }

    #[test]
    fn bounds_follow_anchor_and_baseline() {
        let r = text_bounds(
            Point::new(100.0, 50.0),
            (40.0, 10.0),
            TextAnchor::End,
            TextBaseline::Middle,
        );
        assert_eq!(r, Rect::new(60.0, 45.0, 100.0, 55.0));
    }
}
