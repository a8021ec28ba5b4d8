// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the site crate.

use std::path::PathBuf;

use thiserror::Error;

/// A dataset broke one of its ordering or range rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// The dataset has no records.
    #[error("dataset `{dataset}` is empty")]
    Empty {
        /// Dataset name.
        dataset: &'static str,
    },

    /// A year is not strictly greater than the one before it.
    #[error("dataset `{dataset}`: year {year} does not follow {previous}")]
    YearOrder {
        /// Dataset name.
        dataset: &'static str,
        /// Year of the previous record.
        previous: i32,
        /// Offending year.
        year: i32,
    },

    /// A species category has inconsistent counts.
    #[error(
        "species `{name}`: counts must satisfy critical ({critical}) <= threatened ({threatened}) <= total ({total})"
    )]
    SpeciesCounts {
        /// Category name.
        name: &'static str,
        /// Threatened species.
        threatened: u32,
        /// Total species.
        total: u32,
        /// Critically endangered species.
        critical: u32,
    },
}

/// Errors surfaced by the site crate.
#[derive(Debug, Error)]
pub enum SiteError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`SiteConfig`](crate::SiteConfig).
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A timer loop was started outside a tokio runtime.
    #[error("{0} needs a running tokio runtime")]
    NoRuntime(&'static str),

    /// A built-in dataset failed validation.
    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),

    /// A key did not name any member of an enumerated set.
    #[error("unknown {kind} key `{key}`")]
    UnknownKey {
        /// What kind of key was parsed (metric, chart, category).
        kind: &'static str,
        /// The rejected input.
        key: String,
    },

    /// A config value is outside the range its setting accepts.
    #[error("invalid config `{field}` = {value}: must be {expected}")]
    InvalidConfig {
        /// Dotted path of the setting, e.g. `leaf_fall.gravity`.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// The accepted range, in words.
        expected: &'static str,
    },

    /// The page could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for site operations.
pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = SiteError::UnknownKey {
            kind: "metric",
            key: "humidity".into(),
        };
        assert_eq!(err.to_string(), "unknown metric key `humidity`");

        let err = SiteError::from(DatasetError::YearOrder {
            dataset: "timeline",
            previous: 2010,
            year: 2008,
        });
        assert_eq!(
            err.to_string(),
            "invalid dataset: dataset `timeline`: year 2008 does not follow 2010"
        );
    }
}
