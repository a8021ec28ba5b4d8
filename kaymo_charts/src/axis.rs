// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An [`AxisSpec`] mirrors d3's `axisBottom` / `axisLeft`: a domain line, outward tick marks and
//! tick labels, plus an optional axis title. Continuous axes label [`ScaleLinear`] ticks through a
//! formatter; band axes label each category.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kaymo_core::{Mark, MarkId, StrokeDash, TextAnchor, TextBaseline};
use kurbo::{BezPath, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use crate::format::format_tick_with_step;
use crate::scale::{ScaleBand, ScaleLinear, ScaleSpec};
use crate::z_order;

/// A paint + width pair for stroked paths (domain lines, ticks, rules).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
    /// Optional dash pattern.
    pub dash: Option<StrokeDash>,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
            dash: None,
        }
    }

    /// Convenience for a dashed stroke (`pattern` alternates dash and gap lengths).
    pub fn dashed(brush: impl Into<Brush>, stroke_width: f64, pattern: &[f64]) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
            dash: Some(StrokeDash::new(pattern)),
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults (d3's axis look: 1px black rules, 10px labels).
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Tick label paint.
    pub label_fill: Brush,
    /// Tick label font size.
    pub label_font_size: f64,
    /// Title paint.
    pub title_fill: Brush,
    /// Title font size.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            rule: StrokeStyle::default(),
            label_fill: Brush::Solid(css::BLACK),
            label_font_size: 10.0,
            title_fill: Brush::Solid(peniko::Color::from_rgb8(0x6B, 0x72, 0x80)),
            title_font_size: 12.0,
        }
    }
}

/// Which side of the plot the axis is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AxisOrient {
    /// Below the plot, labels under the ticks.
    Bottom,
    /// Left of the plot, labels to the left of the ticks.
    Left,
}

/// Formats a tick value given the spacing between ticks.
pub type TickFormatter = Arc<dyn Fn(f64, f64) -> String>;

/// Axis configuration.
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; generated marks use deterministic offsets from it.
    pub id_base: u64,
    /// Scale the axis describes.
    pub scale: ScaleSpec,
    /// Side of the plot.
    pub orient: AxisOrient,
    /// Requested tick count for continuous scales.
    pub tick_count: usize,
    /// Tick length.
    pub tick_size: f64,
    /// Gap between tick end and label.
    pub tick_padding: f64,
    /// Whether to draw the domain line.
    pub show_domain: bool,
    /// Labels for band axes, by category index.
    pub band_labels: Vec<String>,
    /// Tick label rotation in degrees (negative is counter-clockwise).
    pub label_angle: f64,
    /// Optional axis title.
    pub title: Option<String>,
    /// Distance from the plot edge to the title anchor.
    pub title_offset: f64,
    /// Styling.
    pub style: AxisStyle,
    /// Custom tick label formatter.
    pub tick_formatter: Option<TickFormatter>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("show_domain", &self.show_domain)
            .field("band_labels", &self.band_labels)
            .field("label_angle", &self.label_angle)
            .field("title", &self.title)
            .field("title_offset", &self.title_offset)
            .field("style", &self.style)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates an axis with d3's defaults (10 ticks, 6px ticks, 3px padding).
    pub fn new(id_base: u64, scale: impl Into<ScaleSpec>, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            show_domain: true,
            band_labels: Vec::new(),
            label_angle: 0.0,
            title: None,
            title_offset: 40.0,
            style: AxisStyle::default(),
            tick_formatter: None,
        }
    }

    /// Convenience for [`AxisOrient::Bottom`].
    pub fn bottom(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience for [`AxisOrient::Left`].
    pub fn left(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Sets the requested tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the tick length.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Sets a custom tick formatter, called with `(value, tick_step)`.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Sets the category labels of a band axis.
    pub fn with_band_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.band_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Rotates tick labels by `angle_degrees`.
    pub fn with_label_angle(mut self, angle_degrees: f64) -> Self {
        self.label_angle = angle_degrees;
        self
    }

    /// Sets the title and its distance from the plot edge.
    pub fn with_title(mut self, title: impl Into<String>, offset: f64) -> Self {
        self.title = Some(title.into());
        self.title_offset = offset;
        self
    }

    /// Sets the title font size.
    pub fn with_title_font_size(mut self, size: f64) -> Self {
        self.style.title_font_size = size;
        self
    }

    /// Enables or disables the domain line.
    pub fn with_domain(mut self, show: bool) -> Self {
        self.show_domain = show;
        self
    }

    /// Sets the style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    fn range(&self, plot: Rect) -> (f64, f64) {
        match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y1, plot.y0),
        }
    }

    /// Returns the linear scale this axis draws, instantiated for `plot`.
    ///
    /// Returns `None` for band axes.
    pub fn scale_linear(&self, plot: Rect) -> Option<ScaleLinear> {
        match self.scale {
            ScaleSpec::Linear(s) => Some(s.instantiate_resolved(self.range(plot), self.tick_count)),
            ScaleSpec::Band(_) => None,
        }
    }

    /// Returns the band scale this axis draws, instantiated for `plot`.
    ///
    /// Band axes on the left lay categories out top to bottom.
    /// Returns `None` for linear axes.
    pub fn scale_band(&self, plot: Rect) -> Option<ScaleBand> {
        let range = match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y0, plot.y1),
        };
        match self.scale {
            ScaleSpec::Band(s) => Some(s.instantiate(range)),
            ScaleSpec::Linear(_) => None,
        }
    }

    /// Tick positions along the axis with their label text.
    pub fn ticks(&self, plot: Rect) -> Vec<(f64, String)> {
        if let Some(scale) = self.scale_linear(plot) {
            let step = scale.tick_step(self.tick_count);
            return scale
                .ticks(self.tick_count)
                .into_iter()
                .map(|v| (scale.map(v), self.format_tick(v, step)))
                .collect();
        }
        let Some(band) = self.scale_band(plot) else {
            return Vec::new();
        };
        (0..band.count())
            .map(|i| {
                let label = match self.band_labels.get(i) {
                    Some(l) => l.clone(),
                    None => alloc::format!("{i}"),
                };
                (band.center(i), label)
            })
            .collect()
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => f(v, step),
            None => format_tick_with_step(v, step),
        }
    }

    /// Generates axis marks for the given plot rectangle.
    pub fn marks(&self, plot: Rect) -> Vec<Mark> {
        let mut out = Vec::new();
        let (lo, hi) = match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y0, plot.y1),
        };

        if self.show_domain {
            let mut domain = BezPath::new();
            match self.orient {
                AxisOrient::Bottom => {
                    domain.move_to((plot.x0, plot.y1));
                    domain.line_to((plot.x1, plot.y1));
                }
                AxisOrient::Left => {
                    domain.move_to((plot.x0, plot.y0));
                    domain.line_to((plot.x0, plot.y1));
                }
            }
            out.push(self.rule_mark(MarkId::from_raw(self.id_base), domain));
        }

        let tick_size = self.tick_size.abs();
        let gap = tick_size + self.tick_padding.max(0.0);
        for (i, (pos, label)) in self.ticks(plot).into_iter().enumerate() {
            if pos < lo - 1.0e-9 || pos > hi + 1.0e-9 {
                continue;
            }
            let mut tick = BezPath::new();
            let (label_pos, anchor, baseline) = match self.orient {
                AxisOrient::Bottom => {
                    tick.move_to((pos, plot.y1));
                    tick.line_to((pos, plot.y1 + tick_size));
                    let anchor = if self.label_angle < 0.0 {
                        TextAnchor::End
                    } else if self.label_angle > 0.0 {
                        TextAnchor::Start
                    } else {
                        TextAnchor::Middle
                    };
                    (Point::new(pos, plot.y1 + gap), anchor, TextBaseline::Hanging)
                }
                AxisOrient::Left => {
                    tick.move_to((plot.x0, pos));
                    tick.line_to((plot.x0 - tick_size, pos));
                    (
                        Point::new(plot.x0 - gap, pos),
                        TextAnchor::End,
                        TextBaseline::Middle,
                    )
                }
            };
            out.push(self.rule_mark(MarkId::from_raw(self.id_base + 1 + i as u64), tick));
            out.push(
                Mark::builder(MarkId::from_raw(self.id_base + 1000 + i as u64))
                    .text()
                    .z_index(z_order::AXIS_LABELS)
                    .pos(label_pos)
                    .content(label)
                    .anchor(anchor)
                    .baseline(baseline)
                    .angle(self.label_angle)
                    .font_size(self.style.label_font_size)
                    .fill(self.style.label_fill.clone())
                    .build(),
            );
        }

        if let Some(title) = &self.title {
            let (pos, angle) = match self.orient {
                AxisOrient::Bottom => (
                    Point::new(0.5 * (plot.x0 + plot.x1), plot.y1 + self.title_offset),
                    0.0,
                ),
                AxisOrient::Left => (
                    Point::new(plot.x0 - self.title_offset, 0.5 * (plot.y0 + plot.y1)),
                    -90.0,
                ),
            };
            out.push(
                Mark::builder(MarkId::from_raw(self.id_base + 9000))
                    .text()
                    .z_index(z_order::AXIS_TITLES)
                    .pos(pos)
                    .content(title.clone())
                    .angle(angle)
                    .anchor(TextAnchor::Middle)
                    .baseline(TextBaseline::Alphabetic)
                    .font_size(self.style.title_font_size)
                    .fill(self.style.title_fill.clone())
                    .build(),
            );
        }

        out
    }

    fn rule_mark(&self, id: MarkId, path: BezPath) -> Mark {
        Mark::builder(id)
            .path()
            .z_index(z_order::AXIS_RULES)
            .geometry(path)
            .fill(peniko::Color::TRANSPARENT)
            .stroke(self.style.rule.brush.clone())
            .stroke_width(self.style.rule.stroke_width)
            .build()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::format;
    use alloc::string::ToString;

    use kaymo_core::{MarkKind, MarkPayload};

    use super::*;
    use crate::scale::{ScaleBandSpec, ScaleLinearSpec};

    fn plot() -> Rect {
        Rect::new(60.0, 20.0, 770.0, 260.0)
    }

    fn labels(marks: &[Mark]) -> Vec<String> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) if m.z_index == z_order::AXIS_LABELS => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bottom_year_axis_labels_every_other_year() {
        let axis = AxisSpec::bottom(100, ScaleLinearSpec::new((2000.0, 2025.0)))
            .with_tick_formatter(|v, _| format!("{v}"));
        let marks = axis.marks(plot());
        let l = labels(&marks);
        assert_eq!(l.first().map(String::as_str), Some("2000"));
        assert_eq!(l.last().map(String::as_str), Some("2024"));
        assert_eq!(l.len(), 13);
        // Domain + one tick per label.
        let rules = marks.iter().filter(|m| m.kind == MarkKind::Path).count();
        assert_eq!(rules, 1 + l.len());
    }

    #[test]
    fn left_axis_uses_custom_formatter_and_inverted_range() {
        let axis = AxisSpec::left(200, ScaleLinearSpec::new((0.0, 1.03)))
            .with_tick_formatter(|v, _| format!("{v}%"));
        let ticks = axis.ticks(plot());
        assert_eq!(ticks[0].1, "0%");
        assert_eq!(ticks[0].0, plot().y1);
        assert!(ticks.windows(2).all(|w| w[1].0 < w[0].0));
    }

    #[test]
    fn band_axis_labels_categories_at_band_centers() {
        let axis = AxisSpec::bottom(300, ScaleBandSpec::new(3).with_padding(0.2))
            .with_band_labels(["A", "B", "C"])
            .with_label_angle(-45.0);
        let band = axis.scale_band(plot()).expect("band axis");
        let ticks = axis.ticks(plot());
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[1].1, "B");
        assert!((ticks[1].0 - band.center(1)).abs() < 1e-9);

        let marks = axis.marks(plot());
        let label = marks
            .iter()
            .find(|m| m.id == MarkId::from_raw(1000 + 300))
            .expect("first label");
        let MarkPayload::Text(t) = &label.payload else {
            panic!("expected text payload");
        };
        assert_eq!(t.anchor, TextAnchor::End);
        assert_eq!(t.angle, -45.0);
    }

    #[test]
    fn title_is_rotated_on_left_axis() {
        let axis = AxisSpec::left(0, ScaleLinearSpec::new((0.0, 1.0))).with_title("Rate", 50.0);
        let marks = axis.marks(plot());
        let title = marks
            .iter()
            .find(|m| m.id == MarkId::from_raw(9000))
            .expect("title mark");
        let MarkPayload::Text(t) = &title.payload else {
            panic!("expected text payload");
        };
        assert_eq!(t.text, "Rate".to_string());
        assert_eq!(t.angle, -90.0);
        assert_eq!(t.pos.x, 10.0);
    }
}
