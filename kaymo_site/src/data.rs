// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The built-in datasets.
//!
//! Every chart owns one of these tables. They are process-local constants; nothing mutates them.

use peniko::Color;

use crate::error::DatasetError;

/// Converts a `0xRRGGBB` literal into an opaque [`Color`].
#[allow(clippy::cast_possible_truncation, reason = "each channel is masked to a byte")]
pub const fn rgb(hex: u32) -> Color {
    Color::from_rgb8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Forest cover for one year of the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearRecord {
    /// Calendar year.
    pub year: i32,
    /// Remaining forest in thousands of hectares.
    pub forest_cover_kha: f64,
    /// Share of forest lost that year, in percent.
    pub deforestation_rate_pct: f64,
    /// Notable events, in order.
    pub events: &'static [&'static str],
}

/// IUCN counts for one group of species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesCategory {
    /// Category name, also its key.
    pub name: &'static str,
    /// Threatened species.
    pub threatened: u32,
    /// Assessed species.
    pub total: u32,
    /// Critically endangered species.
    pub critically_endangered: u32,
    /// Chart colour (`0xRRGGBB`).
    pub color: u32,
    /// Emoji shown on the slice and in the legend.
    pub icon: &'static str,
}

impl SpeciesCategory {
    /// Fraction of assessed species that are threatened.
    pub fn threatened_share(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.threatened) / f64::from(self.total)
        }
    }
}

/// Forest and economic indicators for one country.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryMetrics {
    /// Country name.
    pub country: &'static str,
    /// Annual forest loss, in percent.
    pub deforestation_rate_pct: f64,
    /// Forest share of land area, in percent.
    pub forest_cover_pct: f64,
    /// People per km².
    pub population_density: f64,
    /// USD per person.
    pub gdp_per_capita: f64,
    /// Chart colour (`0xRRGGBB`).
    pub color: u32,
}

/// Climate indicators for one year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateYear {
    /// Calendar year.
    pub year: i32,
    /// Warming above the baseline, °C.
    pub temperature_delta_c: f64,
    /// Annual rainfall, mm.
    pub rainfall_mm: f64,
    /// CO₂-equivalent from forest loss, million tons.
    pub carbon_emissions_mt: f64,
    /// Share of arable land affected, in percent.
    pub soil_degradation_pct: f64,
}

/// Somalia's forest cover, 2000 to 2025.
pub const TIMELINE: &[YearRecord] = &[
    year(2000, 7310.0, 0.8, &["Baseline measurement"]),
    year(2002, 7155.0, 1.1, &["Civil war intensifies"]),
    year(2005, 6890.0, 1.3, &["Drought period begins"]),
    year(2008, 6580.0, 1.5, &["Charcoal export ban (ineffective)"]),
    year(2010, 6420.0, 1.2, &["Famine conditions"]),
    year(2012, 6190.0, 1.8, &["Al-Shabaab control of charcoal trade"]),
    year(2015, 5890.0, 1.6, &["UN charcoal embargo"]),
    year(2018, 5620.0, 1.5, &["PROSCAL project begins"]),
    year(2020, 5480.0, 1.3, &["COVID-19 impact"]),
    year(2022, 5280.0, 1.8, &["Severe drought returns"]),
    year(2024, 5180.0, 1.03, &["Current assessment"]),
    year(2025, 5120.0, 1.2, &["Projected (no intervention)"]),
];

const fn year(
    year: i32,
    forest_cover_kha: f64,
    deforestation_rate_pct: f64,
    events: &'static [&'static str],
) -> YearRecord {
    YearRecord {
        year,
        forest_cover_kha,
        deforestation_rate_pct,
        events,
    }
}

/// Threatened species by category.
pub const SPECIES: &[SpeciesCategory] = &[
    species("Mammals", 12, 114, 3, 0xDC2626, "🦁"),
    species("Birds", 15, 727, 2, 0x7C3AED, "🦅"),
    species("Reptiles", 8, 235, 1, 0x059669, "🦎"),
    species("Plants", 45, 3847, 8, 0xEA580C, "🌿"),
    species("Fish", 28, 2100, 4, 0x2563EB, "🐟"),
];

const fn species(
    name: &'static str,
    threatened: u32,
    total: u32,
    critically_endangered: u32,
    color: u32,
    icon: &'static str,
) -> SpeciesCategory {
    SpeciesCategory {
        name,
        threatened,
        total,
        critically_endangered,
        color,
        icon,
    }
}

/// East African comparison set.
pub const COUNTRIES: &[CountryMetrics] = &[
    country("Somalia", 1.03, 10.8, 25.0, 447.0, 0xDC2626),
    country("Ethiopia", 0.93, 12.2, 115.0, 936.0, 0x7C3AED),
    country("Kenya", 0.67, 7.4, 95.0, 2081.0, 0x059669),
    country("Djibouti", 0.45, 0.2, 43.0, 3396.0, 0x2563EB),
    country("Eritrea", 0.83, 15.7, 65.0, 625.0, 0xEA580C),
    country("Sudan", 0.78, 17.8, 25.0, 441.0, 0xDB2777),
];

const fn country(
    country: &'static str,
    deforestation_rate_pct: f64,
    forest_cover_pct: f64,
    population_density: f64,
    gdp_per_capita: f64,
    color: u32,
) -> CountryMetrics {
    CountryMetrics {
        country,
        deforestation_rate_pct,
        forest_cover_pct,
        population_density,
        gdp_per_capita,
        color,
    }
}

/// Climate indicators, 2000 to 2024.
pub const CLIMATE: &[ClimateYear] = &[
    climate(2000, 0.5, 280.0, 2.1, 15.0),
    climate(2005, 0.8, 245.0, 3.2, 22.0),
    climate(2010, 1.1, 210.0, 4.8, 31.0),
    climate(2015, 1.4, 185.0, 6.1, 38.0),
    climate(2020, 1.7, 165.0, 7.9, 45.0),
    climate(2024, 2.1, 145.0, 9.2, 52.0),
];

const fn climate(
    year: i32,
    temperature_delta_c: f64,
    rainfall_mm: f64,
    carbon_emissions_mt: f64,
    soil_degradation_pct: f64,
) -> ClimateYear {
    ClimateYear {
        year,
        temperature_delta_c,
        rainfall_mm,
        carbon_emissions_mt,
        soil_degradation_pct,
    }
}

fn check_years(
    dataset: &'static str,
    years: impl IntoIterator<Item = i32>,
) -> Result<(), DatasetError> {
    let mut previous: Option<i32> = None;
    for year in years {
        if let Some(previous) = previous {
            if year <= previous {
                return Err(DatasetError::YearOrder {
                    dataset,
                    previous,
                    year,
                });
            }
        }
        previous = Some(year);
    }
    if previous.is_none() {
        return Err(DatasetError::Empty { dataset });
    }
    Ok(())
}

/// Checks that a timeline is non-empty with strictly increasing years.
pub fn validate_timeline(records: &[YearRecord]) -> Result<(), DatasetError> {
    check_years("timeline", records.iter().map(|r| r.year))
}

/// Checks that a climate table is non-empty with strictly increasing years.
pub fn validate_climate(records: &[ClimateYear]) -> Result<(), DatasetError> {
    check_years("climate", records.iter().map(|r| r.year))
}

/// Checks `critical <= threatened <= total` for every category.
pub fn validate_species(categories: &[SpeciesCategory]) -> Result<(), DatasetError> {
    if categories.is_empty() {
        return Err(DatasetError::Empty { dataset: "species" });
    }
    for c in categories {
        if c.threatened > c.total || c.critically_endangered > c.threatened {
            return Err(DatasetError::SpeciesCounts {
                name: c.name,
                threatened: c.threatened,
                total: c.total,
                critical: c.critically_endangered,
            });
        }
    }
    Ok(())
}

/// Validates every built-in dataset.
pub fn validate_all() -> Result<(), DatasetError> {
    validate_timeline(TIMELINE)?;
    validate_climate(CLIMATE)?;
    validate_species(SPECIES)?;
    if COUNTRIES.is_empty() {
        return Err(DatasetError::Empty {
            dataset: "countries",
        });
    }
    Ok(())
}
