// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Site configuration, loaded from an optional TOML file.
//!
//! Every field has a default, so an empty file (or no file) yields the stock page.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{SiteError, SiteResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Timeline player settings.
    pub timeline: TimelineConfig,
    /// Leaf-fall simulation settings.
    pub leaf_fall: LeafFallConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Logging settings.
    pub log: LogConfig,
}

impl SiteConfig {
    /// Parses a config from TOML text and checks its values.
    pub fn from_toml(text: &str) -> SiteResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the animation loops cannot run with.
    pub fn validate(&self) -> SiteResult<()> {
        self.leaf_fall.validate()
    }

    /// Reads and parses the config at `path`.
    pub fn load(path: &Path) -> SiteResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SiteError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

/// `[timeline]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Milliseconds between automatic year advances while playing.
    pub play_interval_ms: u64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            play_interval_ms: 1000,
        }
    }
}

impl TimelineConfig {
    /// The play interval as a [`Duration`] (never zero).
    pub fn play_interval(&self) -> Duration {
        Duration::from_millis(self.play_interval_ms.max(1))
    }
}

/// `[leaf_fall]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LeafFallConfig {
    /// Downward velocity added to each particle per frame.
    pub gravity: f64,
    /// Horizontal velocity multiplier per frame (air resistance).
    pub damping: f64,
    /// Opacity removed from each particle per frame.
    pub fade: f64,
    /// Per-leaf, per-frame chance of shedding a particle while a tree is dying.
    pub spawn_probability: f64,
    /// Particles below this y are retired.
    pub floor_y: f64,
    /// Time for a tree to go from healthy to dead.
    pub death_ms: f64,
    /// Delay between the start of consecutive trees.
    pub stagger_ms: f64,
    /// Frame interval of the animation loop.
    pub frame_ms: u64,
    /// Seed for particle spawning; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Number of trees across the hero.
    pub tree_count: usize,
}

impl Default for LeafFallConfig {
    fn default() -> Self {
        Self {
            gravity: 0.05,
            damping: 0.99,
            fade: 0.005,
            spawn_probability: 0.02,
            floor_y: 400.0,
            death_ms: 4000.0,
            stagger_ms: 600.0,
            frame_ms: 16,
            seed: None,
            tree_count: 5,
        }
    }
}

impl LeafFallConfig {
    /// The frame interval as a [`Duration`] (never zero).
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    /// Checks every float setting is finite and in range.
    ///
    /// NaN fails every check, so it is always rejected.
    pub fn validate(&self) -> SiteResult<()> {
        let checks: [(&'static str, f64, bool, &'static str); 7] = [
            ("leaf_fall.gravity", self.gravity, self.gravity >= 0.0, "finite and >= 0"),
            (
                "leaf_fall.damping",
                self.damping,
                (0.0..=1.0).contains(&self.damping),
                "in [0, 1]",
            ),
            ("leaf_fall.fade", self.fade, self.fade > 0.0, "finite and > 0"),
            (
                "leaf_fall.spawn_probability",
                self.spawn_probability,
                (0.0..=1.0).contains(&self.spawn_probability),
                "in [0, 1]",
            ),
            ("leaf_fall.floor_y", self.floor_y, self.floor_y > 0.0, "finite and > 0"),
            ("leaf_fall.death_ms", self.death_ms, self.death_ms > 0.0, "finite and > 0"),
            (
                "leaf_fall.stagger_ms",
                self.stagger_ms,
                self.stagger_ms >= 0.0,
                "finite and >= 0",
            ),
        ];
        for (field, value, in_range, expected) in checks {
            if !value.is_finite() || !in_range {
                return Err(SiteError::InvalidConfig {
                    field,
                    value,
                    expected,
                });
            }
        }
        Ok(())
    }
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the page is written.
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("kaymo_site.html"),
        }
    }
}

/// `[log]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_the_default_config() {
        let config = SiteConfig::from_toml("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.timeline.play_interval(), Duration::from_secs(1));
        assert_eq!(config.leaf_fall.gravity, 0.05);
        assert_eq!(config.leaf_fall.damping, 0.99);
        assert_eq!(config.output.path, PathBuf::from("kaymo_site.html"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SiteConfig::from_toml(
            r#"
            [timeline]
            play_interval_ms = 250

            [leaf_fall]
            seed = 7
            tree_count = 3

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.timeline.play_interval_ms, 250);
        assert_eq!(config.leaf_fall.seed, Some(7));
        assert_eq!(config.leaf_fall.tree_count, 3);
        assert_eq!(config.leaf_fall.death_ms, 4000.0);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn zero_intervals_are_bumped_to_a_millisecond() {
        let config = SiteConfig::from_toml("[timeline]\nplay_interval_ms = 0").unwrap();
        assert_eq!(config.timeline.play_interval(), Duration::from_millis(1));
    }

    fn rejected_field(toml: &str) -> Option<&'static str> {
        match SiteConfig::from_toml(toml) {
            Err(SiteError::InvalidConfig { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn non_finite_leaf_fall_values_are_rejected() {
        assert_eq!(
            rejected_field("[leaf_fall]\nspawn_probability = nan\nseed = 1"),
            Some("leaf_fall.spawn_probability")
        );
        assert_eq!(
            rejected_field("[leaf_fall]\ndeath_ms = nan"),
            Some("leaf_fall.death_ms")
        );
        assert_eq!(
            rejected_field("[leaf_fall]\ngravity = inf"),
            Some("leaf_fall.gravity")
        );
        assert_eq!(
            rejected_field("[leaf_fall]\nfloor_y = -inf"),
            Some("leaf_fall.floor_y")
        );
    }

    #[test]
    fn out_of_range_leaf_fall_values_are_rejected() {
        assert_eq!(
            rejected_field("[leaf_fall]\nspawn_probability = 1.5"),
            Some("leaf_fall.spawn_probability")
        );
        assert_eq!(
            rejected_field("[leaf_fall]\ndamping = -0.1"),
            Some("leaf_fall.damping")
        );
        assert_eq!(rejected_field("[leaf_fall]\nfade = 0.0"), Some("leaf_fall.fade"));
        assert_eq!(
            rejected_field("[leaf_fall]\nstagger_ms = -5.0"),
            Some("leaf_fall.stagger_ms")
        );
        assert_eq!(
            rejected_field("[leaf_fall]\ndeath_ms = 0.0"),
            Some("leaf_fall.death_ms")
        );
        // Boundaries are accepted.
        let config = SiteConfig::from_toml(
            "[leaf_fall]\nspawn_probability = 1.0\ndamping = 1.0\ngravity = 0.0",
        )
        .unwrap();
        assert_eq!(config.leaf_fall.spawn_probability, 1.0);
    }

    #[test]
    fn invalid_values_name_the_setting() {
        let err = SiteConfig::from_toml("[leaf_fall]\ndeath_ms = -1.0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config `leaf_fall.death_ms` = -1: must be finite and > 0"
        );
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = SiteConfig::from_toml("[timeline]\nplay_interval_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, SiteError::ConfigParse(_)), "{err}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SiteConfig::load(Path::new("/nonexistent/kaymo.toml")).unwrap_err();
        assert!(matches!(err, SiteError::ConfigIo { .. }), "{err}");
    }
}
