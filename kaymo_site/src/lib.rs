// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Somalia deforestation page.
//!
//! - [`data`] and [`content`] hold the datasets and the static copy.
//! - [`controller`] owns each chart's interaction state as an observable store.
//! - [`widgets`] redraws a chart from `(dataset, state)` whenever its store changes.
//! - [`player`] and [`frame_loop`] are the two continuous loops: the timeline auto-play and the
//!   leaf-fall animation stepped by [`leaffall`].
//! - [`svg`] and [`html`] turn scenes into a single self-contained document, assembled by [`site`].
//!
//! ```no_run
//! # async fn build() -> kaymo_site::SiteResult<()> {
//! use kaymo_site::{SiteConfig, SiteOptions, build_page};
//!
//! let html = build_page(SiteConfig::default(), &SiteOptions::default()).await?;
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod content;
pub mod controller;
pub mod counter;
pub mod data;
pub mod error;
pub mod frame_loop;
pub mod html;
pub mod leaffall;
pub mod player;
pub mod site;
pub mod store;
pub mod svg;
pub mod widgets;

#[cfg(test)]
mod site_tests;

pub use config::SiteConfig;
pub use error::{DatasetError, SiteError, SiteResult};
pub use site::{Site, SiteOptions, build_page, write_page};
