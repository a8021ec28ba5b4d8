// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entrance transitions.
//!
//! A transition describes how a mark animates in when it is first drawn. Sampling a transition
//! never mutates the mark; it produces a temporary payload for the given elapsed time.

use kurbo::{Affine, Shape};

use crate::mark::{MarkPayload, StrokeDash};

/// Which visual property animates in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Entrance {
    /// Rectangle height grows from its bottom edge.
    GrowHeight,
    /// Rectangle width grows from its left edge.
    GrowWidth,
    /// Geometry scales up from the center of its bounds (point radius growth).
    Scale,
    /// A stroked path is revealed along its length.
    Reveal,
    /// Opacity fades in from zero.
    FadeIn,
}

/// Easing curve applied to normalized time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Identity.
    Linear,
    /// Symmetric cubic ease (d3's `easeCubicInOut`).
    #[default]
    CubicInOut,
}

impl Easing {
    /// Maps normalized time `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}

/// An entrance transition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transition {
    /// Animated property.
    pub entrance: Entrance,
    /// Duration in milliseconds.
    pub duration_ms: f64,
    /// Delay before the transition starts, in milliseconds.
    pub delay_ms: f64,
    /// Easing curve.
    pub easing: Easing,
}

impl Transition {
    /// Creates a transition with no delay and cubic easing.
    pub fn new(entrance: Entrance, duration_ms: f64) -> Self {
        Self {
            entrance,
            duration_ms,
            delay_ms: 0.0,
            easing: Easing::CubicInOut,
        }
    }

    /// Sets the start delay.
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Sets the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Time at which the transition is complete.
    pub fn end_ms(&self) -> f64 {
        self.delay_ms.max(0.0) + self.duration_ms.max(0.0)
    }

    /// Eased progress in `[0, 1]` at `elapsed_ms` since the mark entered.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        let local = elapsed_ms - self.delay_ms.max(0.0);
        if !local.is_finite() {
            return if local > 0.0 { 1.0 } else { 0.0 };
        }
        if self.duration_ms <= 0.0 {
            return if local >= 0.0 { 1.0 } else { 0.0 };
        }
        self.easing.apply(local / self.duration_ms)
    }

    /// Returns `true` once the transition has finished.
    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.end_ms()
    }

    /// Returns the payload as it appears at `elapsed_ms`.
    ///
    /// Entrances that do not apply to the payload kind leave it unchanged.
    pub fn sample(&self, payload: &MarkPayload, elapsed_ms: f64) -> MarkPayload {
        let t = self.progress(elapsed_ms);
        let mut out = payload.clone();
        match (self.entrance, &mut out) {
            (Entrance::GrowHeight, MarkPayload::Rect(r)) => {
                let full = r.rect.abs();
                r.rect = full;
                r.rect.y0 = full.y1 - full.height() * t;
            }
            (Entrance::GrowWidth, MarkPayload::Rect(r)) => {
                let full = r.rect.abs();
                r.rect = full;
                r.rect.x1 = full.x0 + full.width() * t;
            }
            (Entrance::Scale, MarkPayload::Rect(r)) => {
                let full = r.rect.abs();
                let c = full.center();
                r.rect = kurbo::Rect::from_center_size(c, (full.width() * t, full.height() * t));
            }
            (Entrance::Scale, MarkPayload::Path(p)) => {
                let c = p.path.bounding_box().center().to_vec2();
                let affine = Affine::translate(c) * Affine::scale(t) * Affine::translate(-c);
                p.path.apply_affine(affine);
            }
            (Entrance::Reveal, MarkPayload::Path(p)) => {
                let len = p.path.perimeter(0.1);
                let mut dash = StrokeDash::new(&[len, len]);
                dash.offset = len * (1.0 - t);
                p.dash = Some(dash);
            }
            (Entrance::FadeIn, MarkPayload::Rect(r)) => r.opacity *= t,
            (Entrance::FadeIn, MarkPayload::Path(p)) => p.opacity *= t,
            (Entrance::FadeIn, MarkPayload::Text(x)) => x.opacity *= t,
            _ => {}
        }
        out
    }
}
