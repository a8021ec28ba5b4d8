// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! Legends here are detail rows rather than bare swatches: each row carries a swatch, optional
//! icon, label, a right-aligned annotation, a progress bar and two footnotes. Rows are pickable so
//! hovering a row can drive the same highlight as hovering the chart.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kaymo_core::{Entrance, Mark, MarkId, PickKey, TextAnchor, TextBaseline, Transition};
use kurbo::{Circle, Point, Rect, Shape};
use peniko::{Brush, Color};

use crate::layout::Size;
use crate::measure::{TextMeasurer, text_bounds};
use crate::z_order;

/// A legend row item.
#[derive(Clone, Debug, Default)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
    /// Optional glyph drawn between swatch and label.
    pub icon: Option<String>,
    /// Right-aligned headline (e.g. a count).
    pub annotation: Option<String>,
    /// Right-aligned line under the annotation.
    pub sub_annotation: Option<String>,
    /// Progress bar fill fraction in `[0, 1]`.
    pub progress: Option<f64>,
    /// Footnotes under the progress bar (left-aligned, right-aligned).
    pub footnotes: (Option<String>, Option<String>),
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
            ..Self::default()
        }
    }

    /// Sets the icon glyph.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the annotation and the line under it.
    pub fn with_annotation(mut self, annotation: impl Into<String>, sub: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self.sub_annotation = Some(sub.into());
        self
    }

    /// Sets the progress fraction.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sets the footnotes.
    pub fn with_footnotes(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.footnotes = (Some(left.into()), Some(right.into()));
        self
    }
}

/// Legend configuration (items + styling, no position yet).
#[derive(Clone, Debug)]
pub struct LegendSwatchesSpec {
    /// Stable-id base; row `i` uses ids `id_base + 16 * i + k`.
    pub id_base: u64,
    /// Pick-key base; row `i` is pickable as `pick_base + i`.
    pub pick_base: u64,
    /// Items in display order.
    pub items: Vec<LegendItem>,
    /// Highlighted row.
    pub highlight: Option<usize>,
    /// Minimum row width.
    pub min_width: f64,
    /// Row height.
    pub row_height: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Secondary text color.
    pub muted_fill: Brush,
    /// Row background.
    pub background: Brush,
    /// Highlighted row background.
    pub highlight_background: Brush,
    /// Progress track color.
    pub track_fill: Brush,
}

const PAD: f64 = 12.0;
const SWATCH_R: f64 = 6.0;
const PROGRESS_GROW_MS: f64 = 1500.0;
const PROGRESS_DELAY_MS: f64 = 200.0;

impl LegendSwatchesSpec {
    /// Creates a legend spec with the default styling.
    pub fn new(id_base: u64, pick_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            pick_base,
            items,
            highlight: None,
            min_width: 280.0,
            row_height: 84.0,
            row_gap: 8.0,
            font_size: 14.0,
            text_fill: Brush::Solid(Color::from_rgb8(0x37, 0x41, 0x51)),
            muted_fill: Brush::Solid(Color::from_rgb8(0x6B, 0x72, 0x80)),
            background: Brush::Solid(Color::from_rgb8(0xF9, 0xFA, 0xFB)),
            highlight_background: Brush::Solid(Color::from_rgb8(0xF3, 0xF4, 0xF6)),
            track_fill: Brush::Solid(Color::from_rgb8(0xE5, 0xE7, 0xEB)),
        }
    }

    /// Highlights the row at `index`.
    pub fn with_highlight(mut self, index: Option<usize>) -> Self {
        self.highlight = index;
        self
    }

    /// Sets the minimum row width.
    pub fn with_min_width(mut self, min_width: f64) -> Self {
        self.min_width = min_width;
        self
    }

    fn label_x(&self, item: &LegendItem) -> f64 {
        let icon = if item.icon.is_some() {
            self.font_size * 1.5
        } else {
            0.0
        };
        PAD + 2.0 * SWATCH_R + 8.0 + icon
    }

    /// Measures the legend: rows are as wide as the widest label + annotation pair needs.
    pub fn measure(&self, measurer: &impl TextMeasurer) -> Size {
        let width = self
            .items
            .iter()
            .map(|item| {
                let (label_w, _) = measurer.measure(&item.label, self.font_size);
                let annotation_w = item
                    .annotation
                    .as_deref()
                    .map_or(0.0, |a| measurer.measure(a, self.font_size).0);
                self.label_x(item) + label_w + 16.0 + annotation_w + PAD
            })
            .fold(self.min_width, f64::max);
        let n = self.items.len() as f64;
        let height = if self.items.is_empty() {
            0.0
        } else {
            n * self.row_height + (n - 1.0) * self.row_gap
        };
        Size::new(width, height)
    }

    /// Returns the row rectangles for a legend whose top-left corner is at `(x, y)`.
    pub fn row_rects(&self, x: f64, y: f64, width: f64) -> Vec<Rect> {
        (0..self.items.len())
            .map(|i| {
                let top = y + i as f64 * (self.row_height + self.row_gap);
                Rect::new(x, top, x + width, top + self.row_height)
            })
            .collect()
    }

    /// Generates legend marks at `(x, y)`, sized with `measurer`.
    pub fn marks(&self, measurer: &impl TextMeasurer, x: f64, y: f64) -> Vec<Mark> {
        let size = self.measure(measurer);
        let mut out = Vec::new();
        for (i, (item, row)) in self
            .items
            .iter()
            .zip(self.row_rects(x, y, size.width))
            .enumerate()
        {
            let base = self.id_base + 16 * i as u64;
            let id = |k: u64| MarkId::from_raw(base + k);
            let highlighted = self.highlight == Some(i);
            let line1 = row.y0 + 22.0;
            let text = |k: u64, pos: Point, s: &str, size: f64, fill: &Brush, anchor: TextAnchor| {
                Mark::builder(id(k))
                    .text()
                    .z_index(z_order::LEGEND_LABELS)
                    .pos(pos)
                    .content(s)
                    .font_size(size)
                    .fill(fill.clone())
                    .anchor(anchor)
                    .baseline(TextBaseline::Middle)
                    .build()
            };

            let mut background = Mark::builder(id(0))
                .rect()
                .z_index(z_order::PLOT_BACKGROUND)
                .bounds(row)
                .pick(PickKey(self.pick_base + i as u64));
            if highlighted {
                background = background
                    .fill(self.highlight_background.clone())
                    .stroke(item.fill.clone())
                    .stroke_width(2.0);
            } else {
                background = background.fill(self.background.clone());
            }
            out.push(background.build());

            let swatch = Circle::new((row.x0 + PAD + SWATCH_R, line1), SWATCH_R);
            out.push(
                Mark::builder(id(1))
                    .path()
                    .z_index(z_order::LEGEND_SWATCHES)
                    .geometry(swatch.path_elements(0.1).collect())
                    .fill(item.fill.clone())
                    .build(),
            );

            if let Some(icon) = &item.icon {
                let pos = Point::new(row.x0 + PAD + 2.0 * SWATCH_R + 8.0, line1);
                out.push(text(2, pos, icon, self.font_size * 1.2, &self.text_fill, TextAnchor::Start));
            }

            let mut label = Mark::builder(id(3))
                .text()
                .z_index(z_order::LEGEND_LABELS)
                .pos(Point::new(row.x0 + self.label_x(item), line1))
                .content(item.label.clone())
                .font_size(self.font_size)
                .fill(self.text_fill.clone())
                .baseline(TextBaseline::Middle);
            if highlighted {
                label = label.font_weight(700);
            }
            out.push(label.build());

            let right = row.x1 - PAD;
            if let Some(a) = &item.annotation {
                out.push(
                    Mark::builder(id(4))
                        .text()
                        .z_index(z_order::LEGEND_LABELS)
                        .pos(Point::new(right, line1))
                        .content(a.clone())
                        .font_size(self.font_size)
                        .font_weight(700)
                        .fill(item.fill.clone())
                        .anchor(TextAnchor::End)
                        .baseline(TextBaseline::Middle)
                        .build(),
                );
            }
            if let Some(s) = &item.sub_annotation {
                let pos = Point::new(right, line1 + 16.0);
                out.push(text(5, pos, s, 11.0, &self.muted_fill, TextAnchor::End));
            }

            let track = Rect::new(row.x0 + PAD, row.y0 + 50.0, right, row.y0 + 56.0);
            if let Some(p) = item.progress {
                let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
                out.push(
                    Mark::builder(id(6))
                        .rect()
                        .z_index(z_order::LEGEND_SWATCHES)
                        .bounds(track)
                        .fill(self.track_fill.clone())
                        .build(),
                );
                out.push(
                    Mark::builder(id(7))
                        .rect()
                        .z_index(z_order::LEGEND_SWATCHES)
                        .bounds(Rect::new(
                            track.x0,
                            track.y0,
                            track.x0 + track.width() * p,
                            track.y1,
                        ))
                        .fill(item.fill.clone())
                        .transition(
                            Transition::new(Entrance::GrowWidth, PROGRESS_GROW_MS)
                                .with_delay(PROGRESS_DELAY_MS),
                        )
                        .build(),
                );
            }

            let foot_y = row.y0 + 70.0;
            if let Some(l) = &item.footnotes.0 {
                let pos = Point::new(track.x0, foot_y);
                out.push(text(8, pos, l, 11.0, &self.muted_fill, TextAnchor::Start));
            }
            if let Some(r) = &item.footnotes.1 {
                let pos = Point::new(right, foot_y);
                out.push(text(9, pos, r, 11.0, &self.muted_fill, TextAnchor::End));
            }
        }
        out
    }

    /// Estimates legend bounds (including text) at `(x, y)`.
    pub fn bounds(&self, measurer: &impl TextMeasurer, x: f64, y: f64) -> Rect {
        let mut bounds = Rect::new(x, y, x, y);
        for mark in self.marks(measurer, x, y) {
            let b = match &mark.payload {
                kaymo_core::MarkPayload::Text(t) => text_bounds(
                    t.pos,
                    measurer.measure(&t.text, t.font_size),
                    t.anchor,
                    t.baseline,
                ),
                _ => match mark.bounds() {
                    Some(b) => b,
                    None => continue,
                },
            };
            bounds = bounds.union(b);
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kaymo_core::{MarkKind, MarkPayload, Scene};
    use peniko::color::palette::css;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    fn items() -> Vec<LegendItem> {
        vec![
            LegendItem::solid("Mammals", css::RED)
                .with_icon("🦁")
                .with_annotation("12 threatened", "of 114 total")
                .with_progress(12.0 / 114.0)
                .with_footnotes("10.5% threatened", "3 critically endangered"),
            LegendItem::solid("Plants", css::ORANGE).with_progress(2.0),
        ]
    }

    #[test]
    fn rows_are_pickable_by_index() {
        let spec = LegendSwatchesSpec::new(500, 10, items());
        let m = HeuristicTextMeasurer;
        let mut scene = Scene::new();
        scene.tick(spec.marks(&m, 0.0, 0.0));
        let second = spec.row_rects(0.0, 0.0, spec.measure(&m).width)[1];
        assert_eq!(
            scene.pick(second.center()),
            Some((MarkId::from_raw(516), PickKey(11)))
        );
    }

    #[test]
    fn highlight_only_touches_its_row() {
        let m = HeuristicTextMeasurer;
        let plain = LegendSwatchesSpec::new(0, 0, items()).marks(&m, 0.0, 0.0);
        let lit = LegendSwatchesSpec::new(0, 0, items())
            .with_highlight(Some(1))
            .marks(&m, 0.0, 0.0);
        let changed: Vec<MarkId> = plain
            .iter()
            .zip(&lit)
            .filter(|(a, b)| a != b)
            .map(|(a, _)| a.id)
            .collect();
        // Background and label of row 1.
        assert_eq!(changed, [MarkId::from_raw(16), MarkId::from_raw(19)]);
    }

    #[test]
    fn progress_is_clamped_to_the_track() {
        let m = HeuristicTextMeasurer;
        let marks = LegendSwatchesSpec::new(0, 0, items()).marks(&m, 0.0, 0.0);
        let rect = |id: u64| {
            let mark = marks
                .iter()
                .find(|mk| mk.id == MarkId::from_raw(id))
                .expect("progress mark");
            assert_eq!(mark.kind, MarkKind::Rect);
            let MarkPayload::Rect(r) = &mark.payload else {
                panic!("expected a rect payload");
            };
            r.rect
        };
        assert!((rect(22).width() - rect(23).width()).abs() < 1e-9);
        assert!(rect(7).width() < 0.2 * rect(6).width());
    }

    #[test]
    fn bounds_cover_every_row() {
        let spec = LegendSwatchesSpec::new(0, 0, items());
        let m = HeuristicTextMeasurer;
        let size = spec.measure(&m);
        assert_eq!(size.height, 2.0 * 84.0 + 8.0);
        let b = spec.bounds(&m, 10.0, 20.0);
        assert!(b.y1 >= 20.0 + size.height - 1e-9);
        assert!(b.x1 >= 10.0 + size.width - 1e-9);
    }
}
