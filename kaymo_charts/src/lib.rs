// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `kaymo_core`.
//!
//! This crate is a small, reusable layer above `kaymo_core`:
//! - **Scales** map data values into screen coordinates (d3-style linear and band scales).
//! - **Layouts** turn data into geometry: pie angles, monotone curves, fixed-margin plots.
//! - **Marks and guides** (bars, lines, areas, points, sectors, axes, legends) are generated as
//!   stable-identity `kaymo_core::Mark`s suitable for reconciliation.
//!
//! Text shaping is out of scope; text marks store unshaped strings and guides estimate extents
//! through [`TextMeasurer`].

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod area_mark;
mod axis;
mod bar_mark;
mod chart_spec;
mod curve;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod legend;
mod line_mark;
mod measure;
mod pie;
mod point_mark;
mod rule_mark;
mod scale;
mod sector_mark;
mod symbol;
mod text_mark;
mod z_order;

pub use area_mark::AreaMarkSpec;
pub use axis::{AxisOrient, AxisSpec, AxisStyle, StrokeStyle, TickFormatter};
pub use bar_mark::{BarMarkSpec, BarOrient};
pub use chart_spec::ChartSpec;
pub use curve::Curve;
pub use format::{
    format_fixed, format_grouped, format_number, format_percent, format_tick_with_step,
    step_decimals,
};
pub use layout::{ChartLayout, ChartLayoutSpec, Margin, Size};
pub use legend::{LegendItem, LegendSwatchesSpec};
pub use line_mark::LineMarkSpec;
pub use measure::{HeuristicTextMeasurer, TextMeasurer, text_bounds};
pub use pie::{PieSlice, pie};
pub use point_mark::{PointEmphasis, PointMarkSpec};
pub use rule_mark::RuleMarkSpec;
pub use scale::{ScaleBand, ScaleBandSpec, ScaleLinear, ScaleLinearSpec, ScaleSpec, extent, max};
pub use sector_mark::SectorMarkSpec;
pub use symbol::Symbol;
pub use text_mark::TextMarkSpec;
pub use z_order::*;
