// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forest cover over time, with a selectable year.

use kaymo_charts::{
    AxisSpec, ChartSpec, Curve, LineMarkSpec, Margin, PointEmphasis, PointMarkSpec, RuleMarkSpec,
    ScaleLinear, ScaleLinearSpec, Size, StrokeStyle, extent, format_fixed, format_tick_with_step,
};
use kaymo_core::{Mark, MarkId, PickKey};
use kurbo::{Point, Rect};
use peniko::Brush;
use tokio::sync::watch;

use super::{Chart, OUTLINE, row};
use crate::controller::{TimelineController, TimelineState};
use crate::data::{YearRecord, rgb};

const VIEW: Size = Size::new(800.0, 300.0);
const MARGIN: Margin = Margin::new(20.0, 30.0, 40.0, 60.0);

const LINE_ID: u64 = 0x100;
const DOT_BASE: u64 = 0x200;
const SELECTED_RULE_ID: u64 = 0x300;
const AXIS_LEFT: u64 = 0x10_000;
const AXIS_BOTTOM: u64 = 0x20_000;

const SERIES: u32 = 0xEF4444;
const SELECTED: u32 = 0xDC2626;

const DOT_RADIUS: f64 = 4.0;
const HOVER_RADIUS: f64 = 6.0;
const SELECTED_RADIUS: f64 = 8.0;

/// Line chart of remaining forest cover; clicking a dot selects its year.
#[derive(Debug, Clone)]
pub struct TimelineChart {
    controller: TimelineController,
}

impl TimelineChart {
    /// Draws the records and state of `controller`.
    pub fn new(controller: TimelineController) -> Self {
        Self { controller }
    }

    /// The controller.
    pub fn controller(&self) -> &TimelineController {
        &self.controller
    }

    fn records(&self) -> &'static [YearRecord] {
        self.controller.records()
    }

    fn year_extent(&self) -> (f64, f64) {
        extent(self.records().iter().map(|r| f64::from(r.year))).unwrap_or((0.0, 1.0))
    }

    fn cover_extent(&self) -> (f64, f64) {
        extent(self.records().iter().map(|r| r.forest_cover_kha)).unwrap_or((0.0, 1.0))
    }

    fn spec(&self) -> ChartSpec {
        ChartSpec::new(VIEW, MARGIN)
            .with_axis_left(
                AxisSpec::left(AXIS_LEFT, ScaleLinearSpec::new(self.cover_extent()))
                    .with_tick_formatter(|v, step| format!("{}K ha", format_tick_with_step(v, step)))
                    .with_title("Forest Cover (Thousands of Hectares)", 48.0),
            )
            .with_axis_bottom(
                AxisSpec::bottom(AXIS_BOTTOM, ScaleLinearSpec::new(self.year_extent()))
                    .with_tick_formatter(|v, _| format_fixed(v, 0))
                    .with_title("Year", 40.0),
            )
    }

    /// Scales for the plot area: years along x, forest cover along y (inverted).
    pub fn scales(&self, plot: Rect) -> (ScaleLinear, ScaleLinear) {
        (
            ScaleLinear::new(self.year_extent(), (plot.x0, plot.x1)),
            ScaleLinear::new(self.cover_extent(), (plot.y1, plot.y0)),
        )
    }

    /// Screen position of every record's dot.
    pub fn points(&self, plot: Rect) -> Vec<Point> {
        let (x, y) = self.scales(plot);
        self.records()
            .iter()
            .map(|r| Point::new(x.map(f64::from(r.year)), y.map(r.forest_cover_kha)))
            .collect()
    }
}

impl Chart for TimelineChart {
    type State = TimelineState;

    fn name(&self) -> &'static str {
        "timeline"
    }

    fn view(&self) -> Rect {
        self.spec().layout().view
    }

    fn subscribe(&self) -> watch::Receiver<TimelineState> {
        self.controller.subscribe()
    }

    fn marks(&self, state: &TimelineState) -> Vec<Mark> {
        let records = self.records();
        self.spec().marks(|layout| {
            let plot = layout.plot;
            let (x, _) = self.scales(plot);
            let points = self.points(plot);

            let mut out = vec![
                LineMarkSpec::new(MarkId(LINE_ID))
                    .with_curve(Curve::MonotoneX)
                    .with_stroke(StrokeStyle::solid(rgb(SERIES), 3.0))
                    .mark(&points),
            ];

            let mut dots = PointMarkSpec::new(DOT_BASE)
                .with_radius(DOT_RADIUS)
                .with_fill(rgb(SERIES))
                .with_stroke(StrokeStyle::solid(OUTLINE, 2.0))
                .with_pick_base(0);
            if let Some(hovered) = state.hovered {
                dots = dots.with_emphasis(
                    hovered,
                    PointEmphasis {
                        radius: Some(HOVER_RADIUS),
                        ..PointEmphasis::default()
                    },
                );
            }
            if let Some(selected) = records.iter().position(|r| r.year == state.selected_year) {
                dots = dots.with_emphasis(
                    selected,
                    PointEmphasis {
                        radius: Some(SELECTED_RADIUS),
                        fill: Some(Brush::from(rgb(SELECTED))),
                        opacity: None,
                    },
                );
            }
            out.extend(dots.marks(&points));

            let sx = x.map_clamped(f64::from(state.selected_year));
            out.push(
                RuleMarkSpec::vertical(MarkId(SELECTED_RULE_ID), sx, plot.y0, plot.y1)
                    .with_stroke(StrokeStyle::dashed(rgb(SELECTED), 2.0, &[5.0, 5.0]))
                    .with_opacity(0.7)
                    .mark(),
            );
            out
        })
    }

    fn hover(&self, key: Option<PickKey>) {
        self.controller
            .set_hovered(row(key, 0, self.records().len()));
    }

    fn click(&self, key: PickKey) {
        if let Some(i) = row(Some(key), 0, self.records().len()) {
            self.controller.select_year(self.records()[i].year);
        }
    }
}

#[cfg(test)]
mod tests {
    use kaymo_core::MarkPayload;
    use kurbo::Shape;

    use super::*;
    use crate::widgets::ChartView;

    fn dot_width(view: &ChartView<TimelineChart>, index: u64) -> f64 {
        view.scene()
            .get(MarkId(DOT_BASE + index))
            .and_then(Mark::bounds)
            .map_or(0.0, |b| b.width())
    }

    #[test]
    fn dots_stay_inside_the_plot() {
        let chart = TimelineChart::new(TimelineController::default());
        let plot = chart.spec().layout().plot;
        assert_eq!(plot, Rect::new(60.0, 20.0, 770.0, 260.0));
        for p in chart.points(plot) {
            assert!(p.x >= plot.x0 && p.x <= plot.x1);
            assert!(p.y >= plot.y0 && p.y <= plot.y1);
        }
        let points = chart.points(plot);
        assert_eq!(points[0], Point::new(60.0, 20.0));
        assert_eq!(points[11], Point::new(770.0, 260.0));
    }

    #[test]
    fn selected_year_gets_the_big_dot_and_the_rule() {
        let view = ChartView::new(TimelineChart::new(TimelineController::default()));
        assert!((dot_width(&view, 11) - 2.0 * SELECTED_RADIUS).abs() < 0.05);
        assert!((dot_width(&view, 0) - 2.0 * DOT_RADIUS).abs() < 0.05);

        let Some(MarkPayload::Path(rule)) = view
            .scene()
            .get(MarkId(SELECTED_RULE_ID))
            .map(|m| &m.payload)
        else {
            panic!("expected the selected-year rule");
        };
        assert_eq!(rule.opacity, 0.7);
        assert!(rule.dash.is_some());
        assert_eq!(rule.path.bounding_box().x0, 770.0);
    }

    #[test]
    fn clicking_a_dot_selects_its_year() {
        let chart = TimelineChart::new(TimelineController::default());
        let controller = chart.controller().clone();
        let plot = chart.spec().layout().plot;
        let target = chart.points(plot)[4];
        let mut view = ChartView::new(chart);

        assert_eq!(view.click(target), Some(PickKey(4)));
        assert_eq!(controller.selected_year(), 2010);
        assert_eq!(view.redraw_count(), 2);
        assert!((dot_width(&view, 4) - 2.0 * SELECTED_RADIUS).abs() < 0.05);
    }

    #[test]
    fn hover_enlarges_and_leaving_restores() {
        let chart = TimelineChart::new(TimelineController::default());
        let plot = chart.spec().layout().plot;
        let target = chart.points(plot)[2];
        let mut view = ChartView::new(chart);

        view.pointer_move(target);
        assert!((dot_width(&view, 2) - 2.0 * HOVER_RADIUS).abs() < 0.05);
        view.pointer_leave();
        assert!((dot_width(&view, 2) - 2.0 * DOT_RADIUS).abs() < 0.05);
        assert_eq!(view.redraw_count(), 3);
    }

    #[test]
    fn unchanged_state_does_not_redraw() {
        let mut view = ChartView::new(TimelineChart::new(TimelineController::default()));
        view.chart().controller().select_year(2025);
        assert!(!view.sync());
        view.chart().controller().select_year(2000);
        assert!(view.sync());
        assert!(view.to_svg_string().contains("Forest Cover (Thousands of Hectares)"));
    }
}
