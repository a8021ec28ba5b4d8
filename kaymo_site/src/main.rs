// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders the Somalia deforestation page to a single HTML file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kaymo_site::{SiteConfig, SiteOptions, build_page, write_page};
use tracing_subscriber::EnvFilter;

/// Render the Somalia deforestation page.
#[derive(Debug, Parser)]
#[command(name = "kaymo_site", version, about)]
struct Args {
    /// TOML config file. Every field is optional.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file. Overrides `[output] path`.
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Initial timeline year.
    #[arg(long)]
    year: Option<i32>,

    /// Initial climate metric (`temperature`, `rainfall`, `carbonEmissions`, `soilDegradation`).
    #[arg(long)]
    metric: Option<String>,

    /// Initial regional chart (`deforestation`, `forestCover`, `correlation`).
    #[arg(long)]
    chart: Option<String>,

    /// Species category to show hovered, e.g. `Plants`.
    #[arg(long)]
    hover: Option<String>,

    /// Run the leaf-fall animation this long before capturing the hero frame.
    #[arg(long, default_value_t = 3000)]
    leaf_fall_ms: u64,

    /// Play the timeline this long before capturing it.
    #[arg(long, default_value_t = 0)]
    play_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SiteConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .init();

    let out = args.out.clone().unwrap_or_else(|| config.output.path.clone());
    let options = SiteOptions {
        year: args.year,
        metric: args.metric,
        chart: args.chart,
        hover: args.hover,
        leaf_fall_ms: args.leaf_fall_ms,
        play_ms: args.play_ms,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("starting the runtime")?;
    let html = runtime.block_on(build_page(config, &options))?;
    write_page(&out, &html)?;
    println!("wrote {}", out.display());
    Ok(())
}
