// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart widgets.
//!
//! A widget is a [`Chart`] (a pure function from state to marks, plus pointer handling) wrapped
//! in a [`ChartView`] that owns its drawing surface. The view subscribes to the chart's
//! controller; whenever the state changes, [`ChartView::sync`] discards the surface contents and
//! redraws everything from `(dataset, state)`.

mod biodiversity;
mod climate;
mod regional;
mod timeline;

pub use biodiversity::{BiodiversityChart, BiodiversityLegend};
pub use climate::ClimateChart;
pub use regional::RegionalComparison;
pub use timeline::TimelineChart;

use std::fmt;

use kaymo_core::{Mark, PickKey, Scene};
use kurbo::{Point, Rect};
use peniko::Color;
use tokio::sync::watch;
use tracing::debug;

use crate::data::rgb;
use crate::svg::SvgScene;

/// Primary text colour.
pub(crate) const TEXT: Color = rgb(0x374151);
/// Secondary text colour.
pub(crate) const MUTED: Color = rgb(0x6B7280);
/// Outline around dots and slices.
pub(crate) const OUTLINE: Color = Color::WHITE;

/// A chart: how to draw a state, and how pointer input feeds back into it.
pub trait Chart {
    /// The state the chart is drawn from.
    type State: Clone + fmt::Debug;

    /// Name used in logs and as the SVG label.
    fn name(&self) -> &'static str;

    /// Outer bounds of the drawing.
    fn view(&self) -> Rect;

    /// Subscribes to state changes.
    fn subscribe(&self) -> watch::Receiver<Self::State>;

    /// Every mark for `state`.
    fn marks(&self, state: &Self::State) -> Vec<Mark>;

    /// The pointer moved onto `key`, or off every pickable mark.
    fn hover(&self, key: Option<PickKey>);

    /// A pickable mark was clicked.
    fn click(&self, key: PickKey) {
        let _ = key;
    }
}

/// Owns a chart's scene and SVG surface and keeps them in step with its state.
#[derive(Debug)]
pub struct ChartView<C: Chart> {
    chart: C,
    rx: watch::Receiver<C::State>,
    scene: Scene,
    svg: SvgScene,
    redraws: u64,
}

impl<C: Chart> ChartView<C> {
    /// Mounts `chart` and draws its current state.
    pub fn new(chart: C) -> Self {
        let rx = chart.subscribe();
        let mut svg = SvgScene::new();
        svg.set_view_box(chart.view());
        svg.set_label(chart.name());
        let mut view = Self {
            chart,
            rx,
            scene: Scene::new(),
            svg,
            redraws: 0,
        };
        view.redraw();
        view
    }

    /// The chart.
    pub fn chart(&self) -> &C {
        &self.chart
    }

    /// The retained scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Number of full redraws so far, including the initial one.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Redraws if the state changed since the last draw. Returns `true` if it redrew.
    pub fn sync(&mut self) -> bool {
        if !self.rx.has_changed().unwrap_or(false) {
            return false;
        }
        self.redraw();
        true
    }

    /// Discards the surface and draws the current state from scratch.
    pub fn redraw(&mut self) {
        let state = self.rx.borrow_and_update().clone();
        let marks = self.chart.marks(&state);
        let diffs = self.scene.redraw(marks);
        self.svg.apply_diffs(&self.scene, &diffs);
        self.redraws += 1;
        debug!(
            chart = self.chart.name(),
            marks = self.scene.len(),
            diffs = diffs.len(),
            "chart redrawn"
        );
    }

    /// Routes a pointer move to the chart and redraws if that changed anything.
    pub fn pointer_move(&mut self, pt: Point) -> Option<PickKey> {
        let key = self.scene.pick(pt).map(|(_, key)| key);
        self.chart.hover(key);
        self.sync();
        key
    }

    /// Routes a click to the chart and redraws if that changed anything.
    pub fn click(&mut self, pt: Point) -> Option<PickKey> {
        let key = self.scene.pick(pt).map(|(_, key)| key);
        if let Some(key) = key {
            self.chart.click(key);
        }
        self.sync();
        key
    }

    /// The pointer left the chart.
    pub fn pointer_leave(&mut self) {
        self.chart.hover(None);
        self.sync();
    }

    /// Serializes the surface.
    pub fn to_svg_string(&self) -> String {
        self.svg.to_svg_string()
    }
}

/// Maps a pick key back to a row index below `len`.
pub(crate) fn row(key: Option<PickKey>, base: u64, len: usize) -> Option<usize> {
    let index = key?.0.checked_sub(base)?;
    usize::try_from(index).ok().filter(|&i| i < len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_keys_map_back_to_rows() {
        assert_eq!(row(Some(PickKey(103)), 100, 5), Some(3));
        assert_eq!(row(Some(PickKey(99)), 100, 5), None);
        assert_eq!(row(Some(PickKey(105)), 100, 5), None);
        assert_eq!(row(None, 100, 5), None);
    }
}
