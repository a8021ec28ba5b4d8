// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threatened species: a donut chart and its detail legend.
//!
//! Both widgets draw from the same [`BiodiversityController`], so hovering a slice highlights
//! its legend row and the other way round.

use kaymo_charts::{
    HeuristicTextMeasurer, LegendItem, LegendSwatchesSpec, SectorMarkSpec, StrokeStyle,
    TextMarkSpec, format_grouped, format_percent, pie,
};
use kaymo_core::{Mark, MarkId, PickKey, TextAnchor, TextBaseline};
use kurbo::{Point, Rect};
use tokio::sync::watch;

use super::{Chart, MUTED, OUTLINE, TEXT, row};
use crate::controller::{BiodiversityController, BiodiversityState};
use crate::data::{SpeciesCategory, rgb};

const SIDE: f64 = 500.0;
const OUTER_RADIUS: f64 = SIDE / 2.0 - 40.0;
const INNER_RADIUS: f64 = OUTER_RADIUS * 0.6;
const ICON_RADIUS: f64 = OUTER_RADIUS * 0.8;

const SECTOR_BASE: u64 = 0x100;
const ICON_BASE: u64 = 0x200;
const CENTER_TOTAL_ID: u64 = 0x300;
const CENTER_CAPTION_ID: u64 = 0x301;
const CENTER_SUBCAPTION_ID: u64 = 0x302;
const LEGEND_BASE: u64 = 0x1000;

/// Donut of threatened species per category.
#[derive(Debug, Clone)]
pub struct BiodiversityChart {
    controller: BiodiversityController,
}

impl BiodiversityChart {
    /// Draws the categories and hover of `controller`.
    pub fn new(controller: BiodiversityController) -> Self {
        Self { controller }
    }

    /// The controller.
    pub fn controller(&self) -> &BiodiversityController {
        &self.controller
    }

    /// Centre of the donut.
    pub fn center(&self) -> Point {
        Point::new(SIDE / 2.0, SIDE / 2.0)
    }

    /// Point in the middle of each category's slice.
    pub fn slice_centers(&self) -> Vec<Point> {
        let counts = threatened_counts(self.controller.categories());
        pie(&counts)
            .iter()
            .map(|s| s.centroid(self.center(), INNER_RADIUS, OUTER_RADIUS))
            .collect()
    }
}

fn threatened_counts(categories: &[SpeciesCategory]) -> Vec<f64> {
    categories.iter().map(|c| f64::from(c.threatened)).collect()
}

impl Chart for BiodiversityChart {
    type State = BiodiversityState;

    fn name(&self) -> &'static str {
        "biodiversity"
    }

    fn view(&self) -> Rect {
        Rect::new(0.0, 0.0, SIDE, SIDE)
    }

    fn subscribe(&self) -> watch::Receiver<BiodiversityState> {
        self.controller.subscribe()
    }

    fn marks(&self, state: &BiodiversityState) -> Vec<Mark> {
        let categories = self.controller.categories();
        let center = self.center();
        let slices = pie(&threatened_counts(categories));

        let mut out = Vec::with_capacity(2 * slices.len() + 3);
        for (slice, category) in slices.iter().zip(categories) {
            let i = slice.index;
            let opacity = if state.hovered == Some(i) { 1.0 } else { 0.8 };
            out.push(
                SectorMarkSpec::from_slice(
                    MarkId::for_row(SECTOR_BASE, i),
                    slice,
                    center,
                    INNER_RADIUS,
                    OUTER_RADIUS,
                )
                .with_fill(rgb(category.color))
                .with_opacity(opacity)
                .with_stroke(StrokeStyle::solid(OUTLINE, 2.0))
                .with_pick(PickKey(i as u64))
                .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    MarkId::for_row(ICON_BASE, i),
                    slice.centroid(center, ICON_RADIUS, ICON_RADIUS),
                    category.icon,
                )
                .with_font_size(24.0)
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Middle)
                .mark(),
            );
        }

        let (threatened, _) = self.controller.totals();
        let caption = |id: u64, dy: f64, text: &str| {
            TextMarkSpec::new(MarkId(id), Point::new(center.x, center.y + dy), text)
                .with_font_size(14.0)
                .with_fill(MUTED)
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Middle)
                .mark()
        };
        out.push(
            TextMarkSpec::new(
                MarkId(CENTER_TOTAL_ID),
                Point::new(center.x, center.y - 12.0),
                threatened.to_string(),
            )
            .with_font_size(24.0)
            .bold()
            .with_fill(TEXT)
            .with_anchor(TextAnchor::Middle)
            .with_baseline(TextBaseline::Middle)
            .mark(),
        );
        out.push(caption(CENTER_CAPTION_ID, 12.0, "Species"));
        out.push(caption(CENTER_SUBCAPTION_ID, 30.0, "Threatened"));
        out
    }

    fn hover(&self, key: Option<PickKey>) {
        self.controller
            .set_hovered(row(key, 0, self.controller.categories().len()));
    }
}

/// Per-category detail rows next to the donut.
#[derive(Debug, Clone)]
pub struct BiodiversityLegend {
    controller: BiodiversityController,
}

impl BiodiversityLegend {
    /// Lists the categories of `controller`.
    pub fn new(controller: BiodiversityController) -> Self {
        Self { controller }
    }

    /// The controller.
    pub fn controller(&self) -> &BiodiversityController {
        &self.controller
    }

    fn spec(&self, hovered: Option<usize>) -> LegendSwatchesSpec {
        let items = self
            .controller
            .categories()
            .iter()
            .map(|c| {
                let share = c.threatened_share();
                LegendItem::solid(c.name, rgb(c.color))
                    .with_icon(c.icon)
                    .with_annotation(
                        format!("{} threatened", c.threatened),
                        format!("of {} total", format_grouped(f64::from(c.total))),
                    )
                    .with_progress(share)
                    .with_footnotes(
                        format!(
                            "{}% threatened",
                            format_percent(f64::from(c.threatened), f64::from(c.total), 1)
                        ),
                        format!("{} critically endangered", c.critically_endangered),
                    )
            })
            .collect();
        LegendSwatchesSpec::new(LEGEND_BASE, 0, items).with_highlight(hovered)
    }

    /// Rectangle of each row, in drawing order.
    pub fn row_rects(&self) -> Vec<Rect> {
        let spec = self.spec(None);
        let size = spec.measure(&HeuristicTextMeasurer);
        spec.row_rects(0.0, 0.0, size.width)
    }
}

impl Chart for BiodiversityLegend {
    type State = BiodiversityState;

    fn name(&self) -> &'static str {
        "biodiversity legend"
    }

    fn view(&self) -> Rect {
        let size = self.spec(None).measure(&HeuristicTextMeasurer);
        Rect::new(0.0, 0.0, size.width, size.height)
    }

    fn subscribe(&self) -> watch::Receiver<BiodiversityState> {
        self.controller.subscribe()
    }

    fn marks(&self, state: &BiodiversityState) -> Vec<Mark> {
        self.spec(state.hovered)
            .marks(&HeuristicTextMeasurer, 0.0, 0.0)
    }

    fn hover(&self, key: Option<PickKey>) {
        self.controller
            .set_hovered(row(key, 0, self.controller.categories().len()));
    }
}
