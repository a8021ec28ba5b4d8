// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! East African comparison: one widget, three chart types.

use kaymo_charts::{
    AxisSpec, BarMarkSpec, BarOrient, ChartLayout, ChartSpec, Margin, PointEmphasis,
    PointMarkSpec, ScaleBandSpec, ScaleLinear, ScaleLinearSpec, Size, StrokeStyle,
    TextMarkSpec, format_number, format_tick_with_step, max,
};
use kaymo_core::{Mark, MarkId, PickKey, TextAnchor, TextBaseline};
use kurbo::{Point, Rect};
use peniko::Brush;
use tokio::sync::watch;

use super::{Chart, OUTLINE, TEXT, row};
use crate::controller::{RegionalChart, RegionalController, RegionalState};
use crate::data::{COUNTRIES, CountryMetrics, rgb};

const VIEW: Size = Size::new(600.0, 400.0);
const MARGIN: Margin = Margin::new(20.0, 30.0, 60.0, 80.0);
const TICK_COUNT: usize = 10;
const BAND_PADDING: f64 = 0.2;

const BAR_BASE: u64 = 0x100;
const VALUE_LABEL_BASE: u64 = 0x200;
const POINT_BASE: u64 = 0x300;
const COUNTRY_LABEL_BASE: u64 = 0x400;
const AXIS_LEFT: u64 = 0x10_000;
const AXIS_BOTTOM: u64 = 0x20_000;

const GROW_MS: f64 = 1000.0;
const REST_OPACITY: f64 = 0.8;
const POINT_RADIUS: f64 = 8.0;

/// Regional comparison chart; the controller picks which of the three is drawn.
#[derive(Debug, Clone)]
pub struct RegionalComparison {
    controller: RegionalController,
    countries: &'static [CountryMetrics],
}

impl RegionalComparison {
    /// Draws the built-in country set.
    pub fn new(controller: RegionalController) -> Self {
        Self {
            controller,
            countries: COUNTRIES,
        }
    }

    /// The controller.
    pub fn controller(&self) -> &RegionalController {
        &self.controller
    }

    /// The countries drawn.
    pub fn countries(&self) -> &'static [CountryMetrics] {
        self.countries
    }

    fn names(&self) -> impl Iterator<Item = &'static str> {
        self.countries.iter().map(|c| c.country)
    }

    fn fills(&self) -> impl Iterator<Item = Brush> {
        self.countries.iter().map(|c| Brush::from(rgb(c.color)))
    }

    fn band(&self) -> ScaleBandSpec {
        ScaleBandSpec::new(self.countries.len()).with_padding(BAND_PADDING)
    }

    fn rate_max(&self) -> f64 {
        max(self.countries.iter().map(|c| c.deforestation_rate_pct)).unwrap_or(1.0)
    }

    fn cover_max(&self) -> f64 {
        max(self.countries.iter().map(|c| c.forest_cover_pct)).unwrap_or(1.0)
    }

    fn gdp_max(&self) -> f64 {
        max(self.countries.iter().map(|c| c.gdp_per_capita)).unwrap_or(1.0)
    }

    // Both scatter axes start at zero so distances from the origin compare.
    fn gdp_spec(&self) -> ScaleLinearSpec {
        ScaleLinearSpec::new((0.0, self.gdp_max()))
    }

    fn rate_spec(&self) -> ScaleLinearSpec {
        ScaleLinearSpec::new((0.0, self.rate_max()))
    }

    fn spec(&self, chart: RegionalChart) -> ChartSpec {
        let percent = |v: f64, step: f64| format!("{}%", format_tick_with_step(v, step));
        let base = ChartSpec::new(VIEW, MARGIN);
        match chart {
            RegionalChart::Deforestation => base
                .with_axis_bottom(
                    AxisSpec::bottom(AXIS_BOTTOM, self.band())
                        .with_band_labels(self.names())
                        .with_label_angle(-45.0),
                )
                .with_axis_left(
                    AxisSpec::left(AXIS_LEFT, ScaleLinearSpec::new((0.0, self.rate_max())))
                        .with_tick_count(TICK_COUNT)
                        .with_tick_formatter(percent),
                ),
            RegionalChart::ForestCover => base
                .with_axis_left(AxisSpec::left(AXIS_LEFT, self.band()).with_band_labels(self.names()))
                .with_axis_bottom(
                    AxisSpec::bottom(AXIS_BOTTOM, ScaleLinearSpec::new((0.0, self.cover_max())))
                        .with_tick_count(TICK_COUNT)
                        .with_tick_formatter(percent),
                ),
            RegionalChart::Correlation => base
                .with_axis_bottom(
                    AxisSpec::bottom(AXIS_BOTTOM, self.gdp_spec())
                        .with_tick_count(TICK_COUNT)
                        .with_tick_formatter(|v, step| format!("${}", format_tick_with_step(v, step)))
                        .with_title("GDP per Capita (USD)", 50.0)
                        .with_title_font_size(14.0),
                )
                .with_axis_left(
                    AxisSpec::left(AXIS_LEFT, self.rate_spec())
                        .with_tick_count(TICK_COUNT)
                        .with_tick_formatter(percent)
                        .with_title("Deforestation Rate (%)", 50.0)
                        .with_title_font_size(14.0),
                ),
        }
    }

    /// Plot area shared by all three chart types.
    pub fn plot(&self) -> Rect {
        ChartSpec::new(VIEW, MARGIN).layout().plot
    }

    fn bars(&self, chart: RegionalChart, plot: Rect, hovered: Option<usize>) -> BarMarkSpec {
        let (orient, band, value) = match chart {
            RegionalChart::ForestCover => (
                BarOrient::Horizontal,
                self.band().instantiate((plot.y0, plot.y1)),
                ScaleLinear::new((0.0, self.cover_max()), (plot.x0, plot.x1)),
            ),
            _ => (
                BarOrient::Vertical,
                self.band().instantiate((plot.x0, plot.x1)),
                ScaleLinear::new((0.0, self.rate_max()), (plot.y1, plot.y0)),
            ),
        };
        BarMarkSpec::new(BAR_BASE, orient, band, value)
            .with_fills(self.fills())
            .with_opacity(REST_OPACITY)
            .with_highlight(hovered, 1.0)
            .with_grow(GROW_MS)
            .with_pick_base(0)
    }

    fn bar_chart(&self, chart: RegionalChart, layout: &ChartLayout, hovered: Option<usize>) -> Vec<Mark> {
        let spec = self.bars(chart, layout.plot, hovered);
        let values: Vec<f64> = self
            .countries
            .iter()
            .map(|c| match chart {
                RegionalChart::ForestCover => c.forest_cover_pct,
                _ => c.deforestation_rate_pct,
            })
            .collect();
        let mut out = spec.marks(&values);
        out.extend(values.iter().enumerate().map(|(i, &v)| {
            let rect = spec.bar_rect(i, v);
            let (pos, anchor, baseline) = match spec.orient {
                BarOrient::Vertical => (
                    Point::new(rect.center().x, rect.y0 - 5.0),
                    TextAnchor::Middle,
                    TextBaseline::Alphabetic,
                ),
                BarOrient::Horizontal => (
                    Point::new(rect.x1 + 5.0, rect.center().y),
                    TextAnchor::Start,
                    TextBaseline::Middle,
                ),
            };
            TextMarkSpec::new(
                MarkId::for_row(VALUE_LABEL_BASE, i),
                pos,
                format!("{}%", format_number(v)),
            )
            .with_font_size(12.0)
            .bold()
            .with_fill(TEXT)
            .with_anchor(anchor)
            .with_baseline(baseline)
            .mark()
        }));
        out
    }

    /// Screen position of every country in the GDP / deforestation scatter.
    pub fn scatter_points(&self, plot: Rect) -> Vec<Point> {
        let x = self.gdp_spec().instantiate_resolved((plot.x0, plot.x1), TICK_COUNT);
        let y = self.rate_spec().instantiate_resolved((plot.y1, plot.y0), TICK_COUNT);
        self.countries
            .iter()
            .map(|c| Point::new(x.map(c.gdp_per_capita), y.map(c.deforestation_rate_pct)))
            .collect()
    }

    fn scatter(&self, layout: &ChartLayout, hovered: Option<usize>) -> Vec<Mark> {
        let points = self.scatter_points(layout.plot);
        let mut spec = PointMarkSpec::new(POINT_BASE)
            .with_radius(POINT_RADIUS)
            .with_fills(self.fills())
            .with_stroke(StrokeStyle::solid(OUTLINE, 2.0))
            .with_opacity(REST_OPACITY)
            .with_grow(GROW_MS, 0.0)
            .with_pick_base(0);
        if let Some(i) = hovered {
            spec = spec.with_emphasis(
                i,
                PointEmphasis {
                    opacity: Some(1.0),
                    ..PointEmphasis::default()
                },
            );
        }
        let mut out = spec.marks(&points);
        out.extend(points.iter().zip(self.names()).enumerate().map(|(i, (p, name))| {
            TextMarkSpec::new(
                MarkId::for_row(COUNTRY_LABEL_BASE, i),
                Point::new(p.x + 12.0, p.y),
                name,
            )
            .with_font_size(12.0)
            .with_fill(TEXT)
            .with_baseline(TextBaseline::Middle)
            .mark()
        }));
        out
    }
}

impl Chart for RegionalComparison {
    type State = RegionalState;

    fn name(&self) -> &'static str {
        "regional"
    }

    fn view(&self) -> Rect {
        ChartSpec::new(VIEW, MARGIN).layout().view
    }

    fn subscribe(&self) -> watch::Receiver<RegionalState> {
        self.controller.subscribe()
    }

    fn marks(&self, state: &RegionalState) -> Vec<Mark> {
        self.spec(state.chart).marks(|layout| match state.chart {
            RegionalChart::Correlation => self.scatter(layout, state.hovered),
            chart => self.bar_chart(chart, layout, state.hovered),
        })
    }

    fn hover(&self, key: Option<PickKey>) {
        self.controller.set_hovered(row(key, 0, self.countries.len()));
    }
}
