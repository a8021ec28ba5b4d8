// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One climate indicator over time.

use kaymo_charts::{
    AreaMarkSpec, AxisSpec, ChartSpec, Curve, LineMarkSpec, Margin, PointEmphasis, PointMarkSpec,
    RuleMarkSpec, ScaleLinear, ScaleLinearSpec, Size, StrokeStyle, TextMarkSpec, extent,
    format_fixed,
};
use kaymo_core::{Mark, MarkId, PickKey, TextAnchor};
use kurbo::{Point, Rect};
use tokio::sync::watch;

use super::{Chart, OUTLINE, row};
use crate::controller::{ClimateController, ClimateMetric, ClimateState};
use crate::data::{CLIMATE, ClimateYear, rgb};

const VIEW: Size = Size::new(600.0, 300.0);
const MARGIN: Margin = Margin::new(20.0, 30.0, 40.0, 60.0);
const TICK_COUNT: usize = 10;

const AREA_ID: u64 = 0x100;
const LINE_ID: u64 = 0x101;
const DOT_BASE: u64 = 0x200;
const HOVER_RULE_ID: u64 = 0x300;
const HOVER_LABEL_ID: u64 = 0x301;
const AXIS_LEFT: u64 = 0x10_000;
const AXIS_BOTTOM: u64 = 0x20_000;

const DOT_RADIUS: f64 = 5.0;
const HOVER_RADIUS: f64 = 7.0;
const REVEAL_MS: f64 = 2000.0;
const DOT_STAGGER_MS: f64 = 100.0;

/// Area and line chart of the selected [`ClimateMetric`].
#[derive(Debug, Clone)]
pub struct ClimateChart {
    controller: ClimateController,
    records: &'static [ClimateYear],
}

impl ClimateChart {
    /// Draws the built-in climate dataset.
    pub fn new(controller: ClimateController) -> Self {
        Self {
            controller,
            records: CLIMATE,
        }
    }

    /// The controller.
    pub fn controller(&self) -> &ClimateController {
        &self.controller
    }

    fn year_extent(&self) -> (f64, f64) {
        extent(self.records.iter().map(|r| f64::from(r.year))).unwrap_or((0.0, 1.0))
    }

    fn value_spec(&self, metric: ClimateMetric) -> ScaleLinearSpec {
        let domain = extent(self.records.iter().map(|r| metric.value(r))).unwrap_or((0.0, 1.0));
        ScaleLinearSpec::new(domain).with_nice(true)
    }

    fn spec(&self, metric: ClimateMetric) -> ChartSpec {
        ChartSpec::new(VIEW, MARGIN)
            .with_axis_left(
                AxisSpec::left(AXIS_LEFT, self.value_spec(metric))
                    .with_tick_count(TICK_COUNT)
                    .with_tick_formatter(move |v, _| metric.format(v)),
            )
            .with_axis_bottom(
                AxisSpec::bottom(AXIS_BOTTOM, ScaleLinearSpec::new(self.year_extent()))
                    .with_tick_formatter(|v, _| format_fixed(v, 0)),
            )
    }

    /// Scales for `metric` in the plot area. The value scale is niced like its axis.
    pub fn scales(&self, metric: ClimateMetric, plot: Rect) -> (ScaleLinear, ScaleLinear) {
        (
            ScaleLinear::new(self.year_extent(), (plot.x0, plot.x1)),
            self.value_spec(metric)
                .instantiate_resolved((plot.y1, plot.y0), TICK_COUNT),
        )
    }

    /// Screen position of every record for `metric`.
    pub fn points(&self, metric: ClimateMetric, plot: Rect) -> Vec<Point> {
        let (x, y) = self.scales(metric, plot);
        self.records
            .iter()
            .map(|r| Point::new(x.map(f64::from(r.year)), y.map(metric.value(r))))
            .collect()
    }
}

impl Chart for ClimateChart {
    type State = ClimateState;

    fn name(&self) -> &'static str {
        "climate"
    }

    fn view(&self) -> Rect {
        self.spec(ClimateMetric::default()).layout().view
    }

    fn subscribe(&self) -> watch::Receiver<ClimateState> {
        self.controller.subscribe()
    }

    fn marks(&self, state: &ClimateState) -> Vec<Mark> {
        let metric = state.metric;
        let color = rgb(metric.color());
        self.spec(metric).marks(|layout| {
            let plot = layout.plot;
            let points = self.points(metric, plot);

            let mut out = vec![
                AreaMarkSpec::new(MarkId(AREA_ID), plot.y1)
                    .with_curve(Curve::MonotoneX)
                    .with_fill(color)
                    .with_opacity(0.2)
                    .mark(&points),
                LineMarkSpec::new(MarkId(LINE_ID))
                    .with_curve(Curve::MonotoneX)
                    .with_stroke(StrokeStyle::solid(color, 3.0))
                    .with_reveal(REVEAL_MS)
                    .mark(&points),
            ];

            let mut dots = PointMarkSpec::new(DOT_BASE)
                .with_radius(DOT_RADIUS)
                .with_fill(color)
                .with_stroke(StrokeStyle::solid(OUTLINE, 2.0))
                .with_grow(REVEAL_MS, DOT_STAGGER_MS)
                .with_pick_base(0);

            let hovered = state
                .hovered
                .and_then(|i| Some((i, *points.get(i)?, self.records.get(i)?)));
            if let Some((i, at, record)) = hovered {
                dots = dots.with_emphasis(
                    i,
                    PointEmphasis {
                        radius: Some(HOVER_RADIUS),
                        ..PointEmphasis::default()
                    },
                );
                out.push(
                    RuleMarkSpec::vertical(MarkId(HOVER_RULE_ID), at.x, plot.y0, plot.y1)
                        .with_stroke(StrokeStyle::dashed(color, 1.0, &[3.0, 3.0]))
                        .with_opacity(0.5)
                        .mark(),
                );
                out.push(
                    TextMarkSpec::new(
                        MarkId(HOVER_LABEL_ID),
                        Point::new(at.x, at.y - 15.0),
                        metric.format(metric.value(record)),
                    )
                    .with_font_size(12.0)
                    .bold()
                    .with_fill(color)
                    .with_anchor(TextAnchor::Middle)
                    .mark(),
                );
            }
            out.extend(dots.marks(&points));
            out
        })
    }

    fn hover(&self, key: Option<PickKey>) {
        self.controller.set_hovered(row(key, 0, self.records.len()));
    }
}

#[cfg(test)]
mod tests {
    use kaymo_core::MarkPayload;
    use peniko::Brush;

    use super::*;
    use crate::widgets::ChartView;

    fn text_of(view: &ChartView<ClimateChart>, id: u64) -> Option<String> {
        match view.scene().get(MarkId(id)).map(|m| &m.payload) {
            Some(MarkPayload::Text(t)) => Some(t.text.clone()),
            _ => None,
        }
    }

    #[test]
    fn dots_stay_inside_the_plot_for_every_metric() {
        let chart = ClimateChart::new(ClimateController::new());
        let plot = chart.spec(ClimateMetric::default()).layout().plot;
        assert_eq!(plot, Rect::new(60.0, 20.0, 570.0, 260.0));
        for metric in ClimateMetric::ALL {
            for p in chart.points(metric, plot) {
                assert!(p.x >= plot.x0 && p.x <= plot.x1, "{metric}: {p:?}");
                assert!(p.y >= plot.y0 - 1e-9 && p.y <= plot.y1 + 1e-9, "{metric}: {p:?}");
            }
        }
    }

    #[test]
    fn switching_metric_recolours_and_relabels() {
        let controller = ClimateController::new();
        let mut view = ChartView::new(ClimateChart::new(controller.clone()));
        assert!(view.to_svg_string().contains("°C"));

        controller.set_metric(ClimateMetric::Rainfall);
        assert!(view.sync());
        let svg = view.to_svg_string();
        assert!(svg.contains("mm"));
        assert!(!svg.contains("°C"));
        let line = view.scene().get(MarkId(LINE_ID)).map(|m| m.payload.clone());
        let Some(MarkPayload::Path(line)) = line else {
            panic!("expected the series line");
        };
        assert_eq!(line.stroke, Brush::from(rgb(0x3B82F6)));
    }

    #[test]
    fn hovering_a_dot_shows_its_value() {
        let chart = ClimateChart::new(ClimateController::new());
        let plot = chart.spec(ClimateMetric::default()).layout().plot;
        let target = chart.points(ClimateMetric::Temperature, plot)[2];
        let mut view = ChartView::new(chart);
        assert_eq!(text_of(&view, HOVER_LABEL_ID), None);

        assert_eq!(view.pointer_move(target), Some(PickKey(2)));
        assert_eq!(text_of(&view, HOVER_LABEL_ID).as_deref(), Some("+1.1°C"));
        assert!(view.scene().get(MarkId(HOVER_RULE_ID)).is_some());

        view.pointer_leave();
        assert_eq!(text_of(&view, HOVER_LABEL_ID), None);
        assert!(view.scene().get(MarkId(HOVER_RULE_ID)).is_none());
    }

    #[test]
    fn the_line_reveals_and_dots_grow_in_sequence() {
        let view = ChartView::new(ClimateChart::new(ClimateController::new()));
        let line = view.scene().get(MarkId(LINE_ID)).and_then(|m| m.transition);
        assert_eq!(line.map(|t| t.duration_ms), Some(REVEAL_MS));
        let last = view.scene().get(MarkId(DOT_BASE + 5)).and_then(|m| m.transition);
        assert_eq!(last.map(|t| t.delay_ms), Some(500.0));
    }
}
