// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text mark generation.

extern crate alloc;

use alloc::string::String;

use kaymo_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::Point;
use peniko::Brush;
use peniko::color::palette::css;

use crate::z_order;

/// A text mark spec (a single label).
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Label text.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Font weight (400 regular, 700 bold).
    pub font_weight: u16,
    /// Fill paint.
    pub fill: Brush,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Rendering order hint (`kaymo_core::Mark::z_index`).
    pub z_index: i32,
}

impl TextMarkSpec {
    /// Creates a text mark spec with 10px regular black text.
    pub fn new(id: MarkId, pos: Point, text: impl Into<String>) -> Self {
        Self {
            id,
            pos,
            text: text.into(),
            font_size: 10.0,
            font_weight: 400,
            fill: Brush::Solid(css::BLACK),
            opacity: 1.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            angle: 0.0,
            z_index: z_order::ANNOTATIONS,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Renders the label in bold.
    pub fn bold(mut self) -> Self {
        self.font_weight = 700;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the rotation angle in degrees.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        Mark::builder(self.id)
            .text()
            .z_index(self.z_index)
            .pos(self.pos)
            .content(self.text.clone())
            .font_size(self.font_size)
            .font_weight(self.font_weight)
            .fill(self.fill.clone())
            .opacity(self.opacity)
            .anchor(self.anchor)
            .baseline(self.baseline)
            .angle(self.angle)
            .build()
    }
}
