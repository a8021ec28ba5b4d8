// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction state for each chart.
//!
//! A controller owns the small amount of UI state that drives its chart (selected year, active
//! metric, hovered row) inside an [`Observable`], so widgets and timers can subscribe to changes.
//! Typed setters cannot receive an invalid key; string keys from untyped input go through
//! `from_key_or_default`, which logs and falls back instead of failing the page.

use std::fmt;
use std::str::FromStr;

use kaymo_charts::{format_fixed, format_number};
use tokio::sync::watch;
use tracing::warn;

use crate::data::{self, ClimateYear, CountryMetrics, SpeciesCategory, YearRecord};
use crate::error::{DatasetError, SiteError};
use crate::store::Observable;

/// Timeline player state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlayState {
    /// The selected year only changes on user input.
    #[default]
    Paused,
    /// The selected year advances on a timer.
    Playing,
}

/// State behind the timeline chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineState {
    /// Selected year, always inside the dataset's year range.
    pub selected_year: i32,
    /// Player state.
    pub play: PlayState,
    /// Index of the hovered dot.
    pub hovered: Option<usize>,
}

/// Owns the timeline's selected year, hover and play state.
#[derive(Debug, Clone)]
pub struct TimelineController {
    records: &'static [YearRecord],
    state: Observable<TimelineState>,
}

impl Default for TimelineController {
    fn default() -> Self {
        Self::with_records(data::TIMELINE)
    }
}

impl TimelineController {
    /// Creates a controller over `records`, which must be non-empty with increasing years.
    ///
    /// Starts paused on the most recent year.
    pub fn new(records: &'static [YearRecord]) -> Result<Self, DatasetError> {
        data::validate_timeline(records)?;
        Ok(Self::with_records(records))
    }

    fn with_records(records: &'static [YearRecord]) -> Self {
        let selected_year = records.last().map_or(0, |r| r.year);
        Self {
            records,
            state: Observable::new(TimelineState {
                selected_year,
                play: PlayState::Paused,
                hovered: None,
            }),
        }
    }

    /// The dataset.
    pub fn records(&self) -> &'static [YearRecord] {
        self.records
    }

    /// Current state.
    pub fn state(&self) -> TimelineState {
        self.state.get()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<TimelineState> {
        self.state.subscribe()
    }

    /// First and last dataset year.
    pub fn year_range(&self) -> (i32, i32) {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => (first.year, last.year),
            _ => (0, 0),
        }
    }

    /// Selected year.
    pub fn selected_year(&self) -> i32 {
        self.state.with(|s| s.selected_year)
    }

    /// The record shown for the selected year: the latest record at or before it.
    pub fn selected_record(&self) -> Option<&'static YearRecord> {
        record_at_or_before(self.records, self.selected_year())
    }

    /// Selects `year`, clamped into the dataset's range. Returns the year actually selected.
    pub fn select_year(&self, year: i32) -> i32 {
        let (lo, hi) = self.year_range();
        let year = year.clamp(lo, hi);
        self.state.update(|s| {
            let changed = s.selected_year != year;
            s.selected_year = year;
            changed
        });
        year
    }

    /// Selects the first year.
    pub fn reset(&self) -> i32 {
        self.select_year(self.year_range().0)
    }

    /// Moves to the next dataset year, wrapping from the last back to the first.
    pub fn advance(&self) -> i32 {
        let current = self.selected_year();
        let next = self
            .records
            .iter()
            .map(|r| r.year)
            .find(|&y| y > current)
            .unwrap_or(self.year_range().0);
        self.select_year(next)
    }

    /// Sets or clears the hovered dot.
    pub fn set_hovered(&self, index: Option<usize>) {
        let index = index.filter(|&i| i < self.records.len());
        self.state.update(|s| {
            let changed = s.hovered != index;
            s.hovered = index;
            changed
        });
    }

    /// Player state.
    pub fn play_state(&self) -> PlayState {
        self.state.with(|s| s.play)
    }

    pub(crate) fn set_play_state(&self, play: PlayState) {
        self.state.update(|s| {
            let changed = s.play != play;
            s.play = play;
            changed
        });
    }
}

/// Returns the latest record whose year is at or before `year`, or the first record.
pub fn record_at_or_before(records: &[YearRecord], year: i32) -> Option<&YearRecord> {
    records
        .iter()
        .rev()
        .find(|r| r.year <= year)
        .or_else(|| records.first())
}

/// The four climate indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClimateMetric {
    /// Warming above the baseline.
    #[default]
    Temperature,
    /// Annual rainfall.
    Rainfall,
    /// Emissions from forest loss.
    CarbonEmissions,
    /// Degraded arable land.
    SoilDegradation,
}

impl ClimateMetric {
    /// Every metric in display order.
    pub const ALL: [Self; 4] = [
        Self::Temperature,
        Self::Rainfall,
        Self::CarbonEmissions,
        Self::SoilDegradation,
    ];

    /// Stable key used in URLs and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Rainfall => "rainfall",
            Self::CarbonEmissions => "carbonEmissions",
            Self::SoilDegradation => "soilDegradation",
        }
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature Rise",
            Self::Rainfall => "Rainfall Decline",
            Self::CarbonEmissions => "Carbon Emissions",
            Self::SoilDegradation => "Soil Degradation",
        }
    }

    /// Emoji.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Temperature => "🌡️",
            Self::Rainfall => "🌧️",
            Self::CarbonEmissions => "💨",
            Self::SoilDegradation => "🏜️",
        }
    }

    /// Short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Temperature => "Average temperature increase",
            Self::Rainfall => "Annual precipitation levels",
            Self::CarbonEmissions => "CO₂ from deforestation",
            Self::SoilDegradation => "Arable land affected",
        }
    }

    /// Sentence describing the main consequence.
    pub fn primary_impact(self) -> &'static str {
        match self {
            Self::Temperature => "Increased heat stress on remaining forests and agriculture",
            Self::Rainfall => "Reduced water availability for ecosystems and communities",
            Self::CarbonEmissions => "Accelerated global warming from forest loss",
            Self::SoilDegradation => "Loss of agricultural productivity and food security",
        }
    }

    /// Series colour (`0xRRGGBB`).
    pub fn color(self) -> u32 {
        match self {
            Self::Temperature => 0xEF4444,
            Self::Rainfall => 0x3B82F6,
            Self::CarbonEmissions => 0xF59E0B,
            Self::SoilDegradation => 0x8B5CF6,
        }
    }

    /// The metric's value in `record`.
    pub fn value(self, record: &ClimateYear) -> f64 {
        match self {
            Self::Temperature => record.temperature_delta_c,
            Self::Rainfall => record.rainfall_mm,
            Self::CarbonEmissions => record.carbon_emissions_mt,
            Self::SoilDegradation => record.soil_degradation_pct,
        }
    }

    /// Formats a value with the metric's unit ("+2.1°C", "145mm", "9.2M tons", "52%").
    pub fn format(self, v: f64) -> String {
        let n = format_number(v);
        match self {
            Self::Temperature => format!("+{n}°C"),
            Self::Rainfall => format!("{n}mm"),
            Self::CarbonEmissions => format!("{n}M tons"),
            Self::SoilDegradation => format!("{n}%"),
        }
    }

    /// Direction of travel from the first to the last record.
    pub fn trend(self, records: &[ClimateYear]) -> Trend {
        match (records.first(), records.last()) {
            (Some(first), Some(last)) if self.value(last) < self.value(first) => {
                Trend::Decreasing
            }
            _ => Trend::Increasing,
        }
    }

    /// Parses `key`, falling back to the default metric when it is unknown.
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|err: SiteError| {
            warn!(%err, fallback = Self::default().key(), "falling back to default metric");
            Self::default()
        })
    }
}

impl FromStr for ClimateMetric {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.key() == s)
            .ok_or_else(|| SiteError::UnknownKey {
                kind: "metric",
                key: s.to_owned(),
            })
    }
}

impl fmt::Display for ClimateMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Direction a climate indicator moved over the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    /// Last value is at or above the first.
    Increasing,
    /// Last value is below the first.
    Decreasing,
}

impl Trend {
    /// Headline word on the trend card.
    pub fn headline(self) -> &'static str {
        match self {
            Self::Increasing => "Worsening",
            Self::Decreasing => "Declining",
        }
    }

    /// Emoji on the trend card.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Increasing => "📈",
            Self::Decreasing => "📉",
        }
    }
}

/// State behind the climate chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClimateState {
    /// Metric on display.
    pub metric: ClimateMetric,
    /// Index of the hovered dot.
    pub hovered: Option<usize>,
}

/// Owns the climate chart's active metric and hover.
#[derive(Debug, Clone, Default)]
pub struct ClimateController {
    state: Observable<ClimateState>,
}

impl ClimateController {
    /// Creates a controller showing the default metric.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> ClimateState {
        self.state.get()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ClimateState> {
        self.state.subscribe()
    }

    /// Switches the metric. Hover is cleared because the dots move.
    pub fn set_metric(&self, metric: ClimateMetric) {
        self.state.set(ClimateState {
            metric,
            hovered: None,
        });
    }

    /// Switches the metric by key, falling back to the default on a miss.
    pub fn set_metric_key(&self, key: &str) -> ClimateMetric {
        let metric = ClimateMetric::from_key_or_default(key);
        self.set_metric(metric);
        metric
    }

    /// Sets or clears the hovered dot.
    pub fn set_hovered(&self, index: Option<usize>) {
        self.state.update(|s| {
            let changed = s.hovered != index;
            s.hovered = index;
            changed
        });
    }
}

/// The three regional chart types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RegionalChart {
    /// Vertical bars of deforestation rate.
    #[default]
    Deforestation,
    /// Horizontal bars of forest cover.
    ForestCover,
    /// Scatter of GDP per capita against deforestation rate.
    Correlation,
}

impl RegionalChart {
    /// Every chart type in display order.
    pub const ALL: [Self; 3] = [Self::Deforestation, Self::ForestCover, Self::Correlation];

    /// Stable key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Deforestation => "deforestation",
            Self::ForestCover => "forestCover",
            Self::Correlation => "correlation",
        }
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Deforestation => "Deforestation Rates",
            Self::ForestCover => "Forest Coverage",
            Self::Correlation => "GDP vs Deforestation",
        }
    }

    /// Line under the buttons.
    pub fn description(self) -> &'static str {
        match self {
            Self::Deforestation => "Annual forest loss percentage by country",
            Self::ForestCover => "Percentage of land area covered by forests",
            Self::Correlation => "Relationship between economic development and forest loss",
        }
    }

    /// The "Key Insights" sentence, computed from `countries`.
    ///
    /// The first country is the one the page is about.
    pub fn insight(self, countries: &[CountryMetrics]) -> String {
        let Some(focus) = countries.first() else {
            return String::new();
        };
        match self {
            Self::Deforestation => {
                let average = countries.iter().map(|c| c.deforestation_rate_pct).sum::<f64>()
                    / countries.len() as f64;
                let top = countries
                    .iter()
                    .max_by(|a, b| a.deforestation_rate_pct.total_cmp(&b.deforestation_rate_pct))
                    .unwrap_or(focus);
                let standing = if top.country == focus.country {
                    "the highest deforestation rate in the region"
                } else {
                    "one of the highest deforestation rates in the region"
                };
                format!(
                    "{} has {standing} at {}%, significantly above the regional average of {}%.",
                    focus.country,
                    format_number(focus.deforestation_rate_pct),
                    format_fixed(average, 2),
                )
            }
            Self::ForestCover => {
                let top = countries
                    .iter()
                    .max_by(|a, b| a.forest_cover_pct.total_cmp(&b.forest_cover_pct))
                    .unwrap_or(focus);
                format!(
                    "Despite high deforestation, {} maintains {}% forest cover, though this is \
                     declining rapidly compared to {}'s {}%.",
                    focus.country,
                    format_number(focus.forest_cover_pct),
                    top.country,
                    format_number(top.forest_cover_pct),
                )
            }
            Self::Correlation => {
                let mut by_gdp: Vec<&CountryMetrics> = countries.iter().collect();
                by_gdp.sort_by(|a, b| a.gdp_per_capita.total_cmp(&b.gdp_per_capita));
                let names: Vec<&str> = by_gdp.iter().take(2).map(|c| c.country).collect();
                format!(
                    "Lower GDP countries like {} show higher deforestation rates, suggesting \
                     economic pressures drive forest exploitation for immediate income.",
                    names.join(" and "),
                )
            }
        }
    }

    /// Parses `key`, falling back to the default chart when it is unknown.
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|err: SiteError| {
            warn!(%err, fallback = Self::default().key(), "falling back to default chart");
            Self::default()
        })
    }
}

impl FromStr for RegionalChart {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| SiteError::UnknownKey {
                kind: "chart",
                key: s.to_owned(),
            })
    }
}

impl fmt::Display for RegionalChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// State behind the regional chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionalState {
    /// Chart on display.
    pub chart: RegionalChart,
    /// Index of the hovered country.
    pub hovered: Option<usize>,
}

/// Owns the regional chart's active type and hover.
#[derive(Debug, Clone, Default)]
pub struct RegionalController {
    state: Observable<RegionalState>,
}

impl RegionalController {
    /// Creates a controller showing the default chart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> RegionalState {
        self.state.get()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<RegionalState> {
        self.state.subscribe()
    }

    /// Switches the chart type. Hover is cleared because the shapes change.
    pub fn set_chart(&self, chart: RegionalChart) {
        self.state.set(RegionalState {
            chart,
            hovered: None,
        });
    }

    /// Switches the chart type by key, falling back to the default on a miss.
    pub fn set_chart_key(&self, key: &str) -> RegionalChart {
        let chart = RegionalChart::from_key_or_default(key);
        self.set_chart(chart);
        chart
    }

    /// Sets or clears the hovered country.
    pub fn set_hovered(&self, index: Option<usize>) {
        self.state.update(|s| {
            let changed = s.hovered != index;
            s.hovered = index;
            changed
        });
    }
}

/// State behind the biodiversity chart and its legend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BiodiversityState {
    /// Index of the hovered category.
    pub hovered: Option<usize>,
}

/// Owns the hovered species category, shared by the donut and the legend.
#[derive(Debug, Clone)]
pub struct BiodiversityController {
    categories: &'static [SpeciesCategory],
    state: Observable<BiodiversityState>,
}

impl Default for BiodiversityController {
    fn default() -> Self {
        Self {
            categories: data::SPECIES,
            state: Observable::default(),
        }
    }
}

impl BiodiversityController {
    /// Creates a controller over `categories`.
    pub fn new(categories: &'static [SpeciesCategory]) -> Result<Self, DatasetError> {
        data::validate_species(categories)?;
        Ok(Self {
            categories,
            state: Observable::default(),
        })
    }

    /// The dataset.
    pub fn categories(&self) -> &'static [SpeciesCategory] {
        self.categories
    }

    /// Current state.
    pub fn state(&self) -> BiodiversityState {
        self.state.get()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<BiodiversityState> {
        self.state.subscribe()
    }

    /// Threatened and assessed species summed over every category.
    pub fn totals(&self) -> (u32, u32) {
        self.categories
            .iter()
            .fold((0, 0), |(threatened, total), c| (threatened + c.threatened, total + c.total))
    }

    /// Name of the hovered category.
    pub fn hovered_key(&self) -> Option<&'static str> {
        let hovered = self.state.with(|s| s.hovered)?;
        self.categories.get(hovered).map(|c| c.name)
    }

    /// Sets or clears the hovered category by index.
    pub fn set_hovered(&self, index: Option<usize>) {
        let index = index.filter(|&i| i < self.categories.len());
        self.state.set(BiodiversityState { hovered: index });
    }

    /// Hovers the category named `key`; an unknown name clears the hover.
    pub fn set_hovered_key(&self, key: Option<&str>) {
        let index = key.and_then(|key| {
            let found = self.categories.iter().position(|c| c.name == key);
            if found.is_none() {
                warn!(key, "unknown species category, clearing hover");
            }
            found
        });
        self.set_hovered(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_starts_paused_on_the_latest_year() {
        let c = TimelineController::default();
        let s = c.state();
        assert_eq!(s.selected_year, 2025);
        assert_eq!(s.play, PlayState::Paused);
        assert_eq!(s.hovered, None);
        assert_eq!(c.year_range(), (2000, 2025));
    }

    #[test]
    fn select_year_clamps_into_range() {
        let c = TimelineController::default();
        assert_eq!(c.select_year(1999), 2000);
        assert_eq!(c.selected_year(), 2000);
        assert_eq!(c.select_year(2030), 2025);
        assert_eq!(c.selected_year(), 2025);
        assert_eq!(c.select_year(i32::MIN), 2000);
    }

    #[test]
    fn advance_steps_through_dataset_years_and_wraps() {
        let c = TimelineController::default();
        assert_eq!(c.advance(), 2000);
        assert_eq!(c.advance(), 2002);
        assert_eq!(c.advance(), 2005);
        c.select_year(2003);
        assert_eq!(c.advance(), 2005);
    }

    #[test]
    fn off_dataset_years_show_the_previous_record() {
        let c = TimelineController::default();
        c.select_year(2013);
        assert_eq!(c.selected_record().map(|r| r.year), Some(2012));
        c.reset();
        assert_eq!(c.selected_record().map(|r| r.forest_cover_kha), Some(7310.0));
    }

    #[test]
    fn selecting_notifies_subscribers() {
        let c = TimelineController::default();
        let mut rx = c.subscribe();
        c.select_year(2025);
        assert!(!rx.has_changed().unwrap());
        c.select_year(2010);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().selected_year, 2010);
    }

    #[test]
    fn timeline_rejects_unordered_datasets() {
        static BAD: [YearRecord; 2] = [data::TIMELINE[1], data::TIMELINE[0]];
        assert!(TimelineController::new(&BAD).is_err());
        assert!(TimelineController::new(&[]).is_err());
    }

    #[test]
    fn metric_keys_round_trip_and_unknown_keys_fall_back() {
        for m in ClimateMetric::ALL {
            assert_eq!(m.key().parse::<ClimateMetric>().unwrap(), m);
        }
        assert!("humidity".parse::<ClimateMetric>().is_err());
        assert_eq!(
            ClimateMetric::from_key_or_default("humidity"),
            ClimateMetric::Temperature
        );
        let c = ClimateController::new();
        assert_eq!(c.set_metric_key("soilDegradation"), ClimateMetric::SoilDegradation);
        assert_eq!(c.state().metric, ClimateMetric::SoilDegradation);
    }

    #[test]
    fn metric_formats_and_trends() {
        assert_eq!(ClimateMetric::Temperature.format(2.1), "+2.1°C");
        assert_eq!(ClimateMetric::Rainfall.format(145.0), "145mm");
        assert_eq!(ClimateMetric::CarbonEmissions.format(9.2), "9.2M tons");
        assert_eq!(ClimateMetric::SoilDegradation.format(52.0), "52%");
        assert_eq!(
            ClimateMetric::Rainfall.trend(data::CLIMATE),
            Trend::Decreasing
        );
        assert_eq!(
            ClimateMetric::Temperature.trend(data::CLIMATE).headline(),
            "Worsening"
        );
    }

    #[test]
    fn switching_metric_clears_hover() {
        let c = ClimateController::new();
        c.set_hovered(Some(3));
        c.set_metric(ClimateMetric::Rainfall);
        assert_eq!(c.state().hovered, None);
    }

    #[test]
    fn chart_keys_fall_back_to_deforestation() {
        assert_eq!(
            RegionalChart::from_key_or_default("forestCover"),
            RegionalChart::ForestCover
        );
        assert_eq!(
            RegionalChart::from_key_or_default("pie"),
            RegionalChart::Deforestation
        );
        let c = RegionalController::new();
        c.set_hovered(Some(2));
        assert_eq!(c.set_chart_key("correlation"), RegionalChart::Correlation);
        assert_eq!(c.state().hovered, None);
    }

    #[test]
    fn insights_are_computed_from_the_data() {
        assert_eq!(
            RegionalChart::Deforestation.insight(data::COUNTRIES),
            "Somalia has the highest deforestation rate in the region at 1.03%, significantly \
             above the regional average of 0.78%."
        );
        assert_eq!(
            RegionalChart::ForestCover.insight(data::COUNTRIES),
            "Despite high deforestation, Somalia maintains 10.8% forest cover, though this is \
             declining rapidly compared to Sudan's 17.8%."
        );
        assert!(
            RegionalChart::Correlation
                .insight(data::COUNTRIES)
                .starts_with("Lower GDP countries like Sudan and Somalia")
        );
        assert_eq!(RegionalChart::Deforestation.insight(&[]), "");
    }

    #[test]
    fn hovering_by_name() {
        let c = BiodiversityController::default();
        c.set_hovered_key(Some("Plants"));
        assert_eq!(c.state().hovered, Some(3));
        assert_eq!(c.hovered_key(), Some("Plants"));
        c.set_hovered_key(Some("Fungi"));
        assert_eq!(c.hovered_key(), None);
        c.set_hovered(Some(99));
        assert_eq!(c.state().hovered, None);
    }

    #[test]
    fn species_totals() {
        assert_eq!(BiodiversityController::default().totals(), (108, 7023));
    }
}
