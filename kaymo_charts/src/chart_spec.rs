// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart composition helpers.

extern crate alloc;

use alloc::vec::Vec;

use kaymo_core::Mark;

use crate::axis::AxisSpec;
use crate::layout::{ChartLayout, ChartLayoutSpec, Margin, Size};

/// A composed chart description that owns guide specs and layout inputs.
#[derive(Clone, Debug, Default)]
pub struct ChartSpec {
    /// Layout options.
    pub layout: ChartLayoutSpec,
    /// Optional left axis.
    pub axis_left: Option<AxisSpec>,
    /// Optional bottom axis.
    pub axis_bottom: Option<AxisSpec>,
}

impl ChartSpec {
    /// Creates a chart with the given view size and margins and no axes.
    pub fn new(view_size: Size, margin: Margin) -> Self {
        Self {
            layout: ChartLayoutSpec { view_size, margin },
            axis_left: None,
            axis_bottom: None,
        }
    }

    /// Sets the left axis.
    pub fn with_axis_left(mut self, axis: AxisSpec) -> Self {
        self.axis_left = Some(axis);
        self
    }

    /// Sets the bottom axis.
    pub fn with_axis_bottom(mut self, axis: AxisSpec) -> Self {
        self.axis_bottom = Some(axis);
        self
    }

    /// Computes layout for this chart.
    pub fn layout(&self) -> ChartLayout {
        ChartLayout::arrange(&self.layout)
    }

    /// Generates marks for the axes, given a computed layout.
    pub fn guide_marks(&self, layout: &ChartLayout) -> Vec<Mark> {
        let mut out = Vec::new();
        if let Some(axis) = &self.axis_left {
            out.extend(axis.marks(layout.plot));
        }
        if let Some(axis) = &self.axis_bottom {
            out.extend(axis.marks(layout.plot));
        }
        out
    }

    /// Convenience to produce a full mark list: series marks + guide marks.
    ///
    /// The series builder is invoked with the resolved layout.
    pub fn marks(&self, build_series: impl FnOnce(&ChartLayout) -> Vec<Mark>) -> Vec<Mark> {
        let layout = self.layout();
        let mut out = build_series(&layout);
        out.extend(self.guide_marks(&layout));
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kaymo_core::{MarkId, Scene};
    use kurbo::Point;

    use super::*;
    use crate::point_mark::PointMarkSpec;
    use crate::scale::ScaleLinearSpec;

    #[test]
    fn series_and_guides_share_the_plot() {
        let chart = ChartSpec::new(Size::new(600.0, 300.0), Margin::new(20.0, 30.0, 40.0, 60.0))
            .with_axis_left(AxisSpec::left(10_000, ScaleLinearSpec::new((0.0, 10.0))))
            .with_axis_bottom(AxisSpec::bottom(20_000, ScaleLinearSpec::new((0.0, 10.0))));
        let marks = chart.marks(|layout| {
            let x = chart
                .axis_bottom
                .as_ref()
                .and_then(|a| a.scale_linear(layout.plot))
                .expect("x scale");
            PointMarkSpec::new(0).marks(&[Point::new(x.map(10.0), layout.plot.y1)])
        });
        assert_eq!(marks[0].id, MarkId::from_raw(0));
        let bb = marks[0].bounds().expect("point bounds");
        assert!((bb.center().x - 570.0).abs() < 1e-9);
        assert!(marks.iter().any(|m| m.id == MarkId::from_raw(10_000)));
        assert!(marks.iter().any(|m| m.id == MarkId::from_raw(20_000)));

        let mut scene = Scene::new();
        let diffs = scene.tick(marks.clone());
        assert_eq!(diffs.len(), marks.len(), "all marks have distinct ids");
    }
}
