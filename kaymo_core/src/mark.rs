// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks: stable identity plus a fully resolved visual payload.

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Brush, Color};
use smallvec::SmallVec;

use crate::transition::Transition;

/// Stable identity for a mark across redraws.
///
/// Chart code allocates ids from a per-chart base (`base + offset`), so the same data row yields
/// the same id every time the chart is rebuilt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the id of row `row` in a series whose ids start at `base`.
    pub const fn for_row(base: u64, row: usize) -> Self {
        Self(base.wrapping_add(row as u64))
    }

    /// Returns the raw id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Routes a hit on a mark back to the data it was generated from.
///
/// The meaning of the value is owned by the chart that emitted it (usually a row index).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PickKey(pub u64);

/// The primitive type of a mark.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// Axis-aligned rectangle.
    Rect,
    /// Arbitrary Bézier path.
    Path,
    /// Unshaped text run.
    Text,
}

/// Horizontal anchoring of a text mark relative to its position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the position.
    #[default]
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

/// Vertical anchoring of a text mark relative to its position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Alphabetic baseline sits on the position.
    #[default]
    Alphabetic,
    /// Vertical middle of the em box sits on the position.
    Middle,
    /// Top of the em box sits on the position.
    Hanging,
    /// Bottom of the em box sits on the position.
    Ideographic,
}

/// A stroke dash pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeDash {
    /// Alternating dash/gap lengths.
    pub pattern: SmallVec<[f64; 4]>,
    /// Offset into the pattern.
    pub offset: f64,
}

impl StrokeDash {
    /// Creates a dash pattern with zero offset.
    pub fn new(pattern: &[f64]) -> Self {
        Self {
            pattern: SmallVec::from_slice(pattern),
            offset: 0.0,
        }
    }
}

/// Resolved rectangle payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width (0 disables the stroke).
    pub stroke_width: f64,
    /// Mark opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Resolved path payload.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width (0 disables the stroke).
    pub stroke_width: f64,
    /// Optional stroke dash.
    pub dash: Option<StrokeDash>,
    /// Mark opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Resolved text payload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene units.
    pub font_size: f64,
    /// CSS-style font weight (400 regular, 700 bold).
    pub font_weight: u16,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical anchor.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Mark opacity in `[0, 1]`.
    pub opacity: f64,
}

/// A fully resolved mark payload.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// Rectangle.
    Rect(RectPayload),
    /// Path.
    Path(PathPayload),
    /// Text.
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns the primitive kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns the geometric bounds, if known.
    ///
    /// Text bounds depend on shaping and are left to the surface.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) if p.path.elements().is_empty() => None,
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
        }
    }

    /// Returns `true` if `pt` hits the filled area of this payload.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Rect(r) => r.rect.abs().contains(pt),
            Self::Path(p) => p.path.winding(pt) != 0,
            Self::Text(_) => false,
        }
    }

    /// Returns the mark opacity.
    pub fn opacity(&self) -> f64 {
        match self {
            Self::Rect(r) => r.opacity,
            Self::Path(p) => p.opacity,
            Self::Text(t) => t.opacity,
        }
    }
}

/// A mark: stable identity, paint order and payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Primitive kind (always matches `payload`).
    pub kind: MarkKind,
    /// Paint order; surfaces sort by `(z_index, id)`.
    pub z_index: i32,
    /// Resolved visual payload.
    pub payload: MarkPayload,
    /// Hit-test key, if the mark is interactive.
    pub pick: Option<PickKey>,
    /// Entrance transition played when the mark is first drawn.
    pub transition: Option<Transition>,
}

impl Mark {
    /// Starts building a mark with the given id (a rectangle by default).
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder::new(id)
    }

    /// Returns the geometric bounds of the payload, if known.
    pub fn bounds(&self) -> Option<Rect> {
        self.payload.bounds()
    }
}

/// Builder for [`Mark`].
///
/// Setters that do not apply to the selected kind are ignored.
#[derive(Clone, Debug)]
pub struct MarkBuilder {
    id: MarkId,
    kind: MarkKind,
    z_index: i32,
    rect: Rect,
    path: BezPath,
    pos: Point,
    text: String,
    font_size: f64,
    font_weight: u16,
    angle: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
    fill: Brush,
    stroke: Brush,
    stroke_width: f64,
    dash: Option<StrokeDash>,
    opacity: f64,
    pick: Option<PickKey>,
    transition: Option<Transition>,
}

impl MarkBuilder {
    fn new(id: MarkId) -> Self {
        Self {
            id,
            kind: MarkKind::Rect,
            z_index: 0,
            rect: Rect::ZERO,
            path: BezPath::new(),
            pos: Point::ZERO,
            text: String::new(),
            font_size: 10.0,
            font_weight: 400,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            fill: Brush::Solid(Color::BLACK),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
            dash: None,
            opacity: 1.0,
            pick: None,
            transition: None,
        }
    }

    /// Builds a rectangle.
    pub fn rect(mut self) -> Self {
        self.kind = MarkKind::Rect;
        self
    }

    /// Builds a path.
    pub fn path(mut self) -> Self {
        self.kind = MarkKind::Path;
        self
    }

    /// Builds a text run.
    pub fn text(mut self) -> Self {
        self.kind = MarkKind::Text;
        self
    }

    /// Sets the paint order.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the rectangle x (left edge).
    pub fn x(mut self, x: f64) -> Self {
        let w = self.rect.width();
        self.rect.x0 = x;
        self.rect.x1 = x + w;
        self
    }

    /// Sets the rectangle y (top edge).
    pub fn y(mut self, y: f64) -> Self {
        let h = self.rect.height();
        self.rect.y0 = y;
        self.rect.y1 = y + h;
        self
    }

    /// Sets the rectangle width.
    pub fn w(mut self, w: f64) -> Self {
        self.rect.x1 = self.rect.x0 + w;
        self
    }

    /// Sets the rectangle height.
    pub fn h(mut self, h: f64) -> Self {
        self.rect.y1 = self.rect.y0 + h;
        self
    }

    /// Sets the rectangle geometry in one go.
    pub fn bounds(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Sets the path geometry.
    pub fn geometry(mut self, path: BezPath) -> Self {
        self.path = path;
        self
    }

    /// Sets the text anchor position.
    pub fn pos(mut self, pos: Point) -> Self {
        self.pos = pos;
        self
    }

    /// Sets the text content.
    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the font size.
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Sets the font weight.
    pub fn font_weight(mut self, weight: u16) -> Self {
        self.font_weight = weight;
        self
    }

    /// Sets the text rotation in degrees.
    pub fn angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    /// Sets the horizontal text anchor.
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the vertical text anchor.
    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the stroke paint.
    pub fn stroke(mut self, stroke: impl Into<Brush>) -> Self {
        self.stroke = stroke.into();
        self
    }

    /// Sets the stroke width.
    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    /// Sets a stroke dash pattern.
    pub fn dash(mut self, dash: StrokeDash) -> Self {
        self.dash = Some(dash);
        self
    }

    /// Sets the mark opacity (clamped to `[0, 1]`).
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self
    }

    /// Makes the mark pickable.
    pub fn pick(mut self, key: PickKey) -> Self {
        self.pick = Some(key);
        self
    }

    /// Attaches an entrance transition.
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        let payload = match self.kind {
            MarkKind::Rect => MarkPayload::Rect(RectPayload {
                rect: self.rect,
                fill: self.fill,
                stroke: self.stroke,
                stroke_width: self.stroke_width,
                opacity: self.opacity,
            }),
            MarkKind::Path => MarkPayload::Path(PathPayload {
                path: self.path,
                fill: self.fill,
                stroke: self.stroke,
                stroke_width: self.stroke_width,
                dash: self.dash,
                opacity: self.opacity,
            }),
            MarkKind::Text => MarkPayload::Text(TextPayload {
                pos: self.pos,
                text: self.text,
                font_size: self.font_size,
                font_weight: self.font_weight,
                angle: self.angle,
                anchor: self.anchor,
                baseline: self.baseline,
                fill: self.fill,
                opacity: self.opacity,
            }),
        };
        Mark {
            id: self.id,
            kind: self.kind,
            z_index: self.z_index,
            payload,
            pick: self.pick,
            transition: self.transition,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Circle;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn rect_builder_keeps_width_when_moving() {
        let m = Mark::builder(MarkId(1)).rect().w(10.0).h(5.0).x(3.0).y(4.0).build();
        let MarkPayload::Rect(r) = &m.payload else {
            panic!("expected rect payload");
        };
        assert_eq!(r.rect, Rect::new(3.0, 4.0, 13.0, 9.0));
        assert_eq!(m.kind, MarkKind::Rect);
    }

    #[test]
    fn path_contains_uses_winding() {
        let circle = Circle::new((10.0, 10.0), 5.0);
        let m = Mark::builder(MarkId(2))
            .path()
            .geometry(circle.to_path(0.1))
            .fill(css::RED)
            .build();
        assert!(m.payload.contains(Point::new(10.0, 10.0)));
        assert!(!m.payload.contains(Point::new(30.0, 30.0)));
        assert!(m.bounds().is_some());
    }

    #[test]
    fn empty_path_and_text_have_no_bounds() {
        let p = Mark::builder(MarkId(3)).path().build();
        let t = Mark::builder(MarkId(4)).text().content("hi").build();
        assert_eq!(p.bounds(), None);
        assert_eq!(t.bounds(), None);
        assert!(!t.payload.contains(Point::ZERO));
    }

    #[test]
    fn opacity_is_clamped() {
        let m = Mark::builder(MarkId(5)).opacity(1.7).build();
        assert_eq!(m.payload.opacity(), 1.0);
        let m = Mark::builder(MarkId(5)).opacity(f64::NAN).build();
        assert_eq!(m.payload.opacity(), 1.0);
    }

    #[test]
    fn for_row_offsets_from_base() {
        assert_eq!(MarkId::for_row(100, 3), MarkId(103));
    }
}
