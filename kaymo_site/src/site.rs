// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wires the controllers, widgets and loops into one page.

use std::path::Path;
use std::time::Duration;

use kaymo_core::Scene;
use kurbo::Rect;
use tokio::time;
use tracing::info;

use crate::config::SiteConfig;
use crate::controller::{
    BiodiversityController, ClimateController, RegionalController, TimelineController,
};
use crate::data::{self, TIMELINE};
use crate::error::{SiteError, SiteResult};
use crate::frame_loop::{LeafFallLoop, LeafFallSnapshot};
use crate::html::{self, PageSnapshot};
use crate::leaffall::VIEW_WIDTH;
use crate::player::TimelinePlayer;
use crate::svg::SvgScene;
use crate::widgets::{
    BiodiversityChart, BiodiversityLegend, ChartView, ClimateChart, RegionalComparison,
    TimelineChart,
};

/// Initial selections and run times, usually from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteOptions {
    /// Timeline year to select (clamped into the dataset range).
    pub year: Option<i32>,
    /// Climate metric key.
    pub metric: Option<String>,
    /// Regional chart key.
    pub chart: Option<String>,
    /// Species category to hover.
    pub hover: Option<String>,
    /// How long the leaf-fall animation runs before its frame is captured.
    pub leaf_fall_ms: u64,
    /// How long the timeline plays before the page is captured.
    pub play_ms: u64,
}

/// Every widget on the page, mounted and drawn.
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    player: TimelinePlayer,
    timeline: ChartView<TimelineChart>,
    regional: ChartView<RegionalComparison>,
    biodiversity: ChartView<BiodiversityChart>,
    legend: ChartView<BiodiversityLegend>,
    climate: ChartView<ClimateChart>,
}

impl Site {
    /// Validates the datasets and mounts every widget in its initial state.
    pub fn new(config: SiteConfig) -> SiteResult<Self> {
        data::validate_all()?;
        let timeline = TimelineController::new(TIMELINE)?;
        let species = BiodiversityController::new(data::SPECIES)?;
        Ok(Self {
            player: TimelinePlayer::from_config(timeline.clone(), &config.timeline),
            timeline: ChartView::new(TimelineChart::new(timeline)),
            regional: ChartView::new(RegionalComparison::new(RegionalController::new())),
            biodiversity: ChartView::new(BiodiversityChart::new(species.clone())),
            legend: ChartView::new(BiodiversityLegend::new(species)),
            climate: ChartView::new(ClimateChart::new(ClimateController::new())),
            config,
        })
    }

    /// The configuration the site was built with.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Applies the selections in `options`. Unknown keys fall back to their defaults.
    pub fn apply(&mut self, options: &SiteOptions) {
        if let Some(year) = options.year {
            self.timeline.chart().controller().select_year(year);
        }
        if let Some(metric) = &options.metric {
            self.climate.chart().controller().set_metric_key(metric);
        }
        if let Some(chart) = &options.chart {
            self.regional.chart().controller().set_chart_key(chart);
        }
        if options.hover.is_some() {
            self.biodiversity
                .chart()
                .controller()
                .set_hovered_key(options.hover.as_deref());
        }
        self.sync();
    }

    /// The timeline player.
    pub fn player(&mut self) -> &mut TimelinePlayer {
        &mut self.player
    }

    /// Timeline widget.
    pub fn timeline(&mut self) -> &mut ChartView<TimelineChart> {
        &mut self.timeline
    }

    /// Regional comparison widget.
    pub fn regional(&mut self) -> &mut ChartView<RegionalComparison> {
        &mut self.regional
    }

    /// Biodiversity donut.
    pub fn biodiversity(&mut self) -> &mut ChartView<BiodiversityChart> {
        &mut self.biodiversity
    }

    /// Biodiversity legend.
    pub fn legend(&mut self) -> &mut ChartView<BiodiversityLegend> {
        &mut self.legend
    }

    /// Climate widget.
    pub fn climate(&mut self) -> &mut ChartView<ClimateChart> {
        &mut self.climate
    }

    /// Redraws every widget whose state changed. Returns how many redrew.
    pub fn sync(&mut self) -> usize {
        [
            self.timeline.sync(),
            self.regional.sync(),
            self.biodiversity.sync(),
            self.legend.sync(),
            self.climate.sync(),
        ]
        .into_iter()
        .filter(|&redrawn| redrawn)
        .count()
    }

    /// Captures every widget, with `leaf_fall` as the hero frame.
    pub fn snapshot(&mut self, leaf_fall: &LeafFallSnapshot) -> PageSnapshot {
        self.sync();
        let timeline = self.timeline.chart().controller();
        let species = self.biodiversity.chart().controller();
        PageSnapshot {
            leaf_fall_svg: leaf_fall_svg(leaf_fall, self.config.leaf_fall.floor_y),
            timeline_svg: self.timeline.to_svg_string(),
            timeline: timeline.state(),
            timeline_range: timeline.year_range(),
            timeline_record: timeline.selected_record().copied(),
            regional_svg: self.regional.to_svg_string(),
            regional: self.regional.chart().controller().state(),
            biodiversity_svg: self.biodiversity.to_svg_string(),
            biodiversity_legend_svg: self.legend.to_svg_string(),
            biodiversity_hovered: species.hovered_key(),
            species_totals: species.totals(),
            climate_svg: self.climate.to_svg_string(),
            climate: self.climate.chart().controller().state(),
        }
    }

    /// Renders the page with `leaf_fall` as the hero frame.
    pub fn render(&mut self, leaf_fall: &LeafFallSnapshot) -> String {
        html::render_page(&self.snapshot(leaf_fall))
    }
}

/// Draws one leaf-fall frame as a standalone SVG.
pub fn leaf_fall_svg(frame: &LeafFallSnapshot, floor_y: f64) -> String {
    let mut scene = Scene::new();
    let diffs = scene.tick(frame.marks.clone());
    let mut svg = SvgScene::new();
    svg.set_view_box(Rect::new(0.0, 0.0, VIEW_WIDTH, floor_y));
    svg.set_label("falling leaves");
    svg.apply_diffs(&scene, &diffs);
    svg.to_svg_string()
}

/// Builds the page: mounts the widgets, runs the timeline player and the leaf-fall loop for the
/// requested times, then renders what they show.
///
/// Needs a tokio runtime with timers enabled.
pub async fn build_page(config: SiteConfig, options: &SiteOptions) -> SiteResult<String> {
    let mut site = Site::new(config)?;
    site.apply(options);

    let leaf_fall = LeafFallLoop::start(&site.config.leaf_fall)?;
    if options.play_ms > 0 {
        site.player.play()?;
        time::sleep(Duration::from_millis(options.play_ms)).await;
        site.player.pause();
    }
    let remaining = options.leaf_fall_ms.saturating_sub(options.play_ms);
    if remaining > 0 {
        time::sleep(Duration::from_millis(remaining)).await;
    }
    let frame = leaf_fall.snapshot();
    drop(leaf_fall);

    Ok(site.render(&frame))
}

/// Writes `html` to `path`.
pub fn write_page(path: &Path, html: &str) -> SiteResult<()> {
    std::fs::write(path, html).map_err(|source| SiteError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = html.len(), "page written");
    Ok(())
}
