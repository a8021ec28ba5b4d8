// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Marks carry an explicit `z_index`; surfaces sort by `(z_index, MarkId)`.
//! These values are coarse on purpose so widgets can slot extra marks in between.

/// Backgrounds (legend row panels, plot frames).
pub const PLOT_BACKGROUND: i32 = -100;

/// Filled series marks (bars, areas, sectors).
pub const SERIES_FILL: i32 = 0;
/// Stroked series marks (lines).
pub const SERIES_STROKE: i32 = 10;
/// Point series marks drawn above lines.
pub const SERIES_POINTS: i32 = 20;
/// Reference rules and value labels drawn over the data.
pub const ANNOTATIONS: i32 = 25;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;

/// Legend swatches and bars.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
/// Chart-level titles and center labels.
pub const TITLES: i32 = 80;
