// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG surface for reconciled scenes.
//!
//! [`SvgScene`] mirrors a [`Scene`] by applying its diffs and serializes the result as an inline
//! `<svg>` element. Entrance transitions become SMIL animations, so charts animate in when the
//! page opens without any script. Pickable marks carry a `data-pick` attribute naming their row.

use std::collections::HashMap;
use std::fmt::Write as _;

use kaymo_charts::{HeuristicTextMeasurer, TextMeasurer, text_bounds};
use kaymo_core::{
    Easing, Entrance, MarkDiff, MarkId, MarkPayload, PickKey, Scene, TextAnchor, TextBaseline,
    Transition,
};
use kurbo::{Rect, Shape};
use peniko::Brush;

#[derive(Debug, Clone)]
struct SvgMark {
    z_index: i32,
    payload: MarkPayload,
    pick: Option<PickKey>,
    transition: Option<Transition>,
}

/// An SVG mirror of a scene.
#[derive(Debug, Default)]
pub struct SvgScene {
    marks: HashMap<MarkId, SvgMark>,
    view_box: Option<Rect>,
    label: Option<String>,
}

impl SvgScene {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the view box. Without one, the view box is fitted to the content.
    pub fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    /// Sets the accessible label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Number of mirrored marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if nothing is mirrored.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Applies `diffs` produced by `scene`.
    ///
    /// Picking and transitions are not part of a diff, so they are read back from `scene`.
    pub fn apply_diffs(&mut self, scene: &Scene, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter {
                    id, z_index, new, ..
                } => {
                    self.insert(scene, *id, *z_index, new);
                }
                MarkDiff::Update {
                    id,
                    new_z_index,
                    new,
                    ..
                } => {
                    self.insert(scene, *id, *new_z_index, new);
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    fn insert(&mut self, scene: &Scene, id: MarkId, z_index: i32, payload: &MarkPayload) {
        let mark = scene.get(id);
        self.marks.insert(
            id,
            SvgMark {
                z_index,
                payload: payload.clone(),
                pick: mark.and_then(|m| m.pick),
                transition: mark.and_then(|m| m.transition),
            },
        );
    }

    /// Serializes the surface.
    pub fn to_svg_string(&self) -> String {
        let view_box = self
            .view_box
            .or_else(|| self.fitted_view_box())
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = write!(
            out,
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet""#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );
        if let Some(label) = &self.label {
            let _ = write!(out, r#" role="img" aria-label="{}""#, escape_xml(label));
        }
        out.push_str(">\n");

        let mut ids: Vec<_> = self.marks.iter().map(|(id, m)| (m.z_index, *id)).collect();
        ids.sort();

        for (_z, id) in ids {
            if let Some(mark) = self.marks.get(&id) {
                write_mark(&mut out, mark);
            }
        }

        out.push_str("</svg>\n");
        out
    }

    fn fitted_view_box(&self) -> Option<Rect> {
        let measurer = HeuristicTextMeasurer;
        self.marks
            .values()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(text_bounds(
                    t.pos,
                    measurer.measure(&t.text, t.font_size),
                    t.anchor,
                    t.baseline,
                )),
                payload => payload.bounds(),
            })
            .reduce(|a, b| a.union(b))
            .map(|r| r.inflate(10.0, 10.0))
    }
}

fn write_mark(out: &mut String, mark: &SvgMark) {
    match &mark.payload {
        MarkPayload::Rect(r) => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                r.rect.x0,
                r.rect.y0,
                r.rect.width(),
                r.rect.height(),
            );
            write_paint_attr(out, "fill", &r.fill);
            if r.stroke_width > 0.0 {
                write_paint_attr(out, "stroke", &r.stroke);
                let _ = write!(out, r#" stroke-width="{}""#, r.stroke_width);
            }
            write_opacity(out, r.opacity);
        }
        MarkPayload::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
                TextBaseline::Ideographic => "ideographic",
            };
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                t.pos.x, t.pos.y, t.font_size, baseline
            );
            if t.font_weight != 400 {
                let _ = write!(out, r#" font-weight="{}""#, t.font_weight);
            }
            if t.angle != 0.0 {
                let _ = write!(
                    out,
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                );
            }
            out.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_paint_attr(out, "fill", &t.fill);
            write_opacity(out, t.opacity);
        }
        MarkPayload::Path(p) => {
            let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
            write_paint_attr(out, "fill", &p.fill);
            if p.stroke_width > 0.0 {
                write_paint_attr(out, "stroke", &p.stroke);
                let _ = write!(out, r#" stroke-width="{}""#, p.stroke_width);
                if let Some(dash) = &p.dash {
                    let pattern: Vec<String> = dash.pattern.iter().map(f64::to_string).collect();
                    let _ = write!(out, r#" stroke-dasharray="{}""#, pattern.join(" "));
                    if dash.offset != 0.0 {
                        let _ = write!(out, r#" stroke-dashoffset="{}""#, dash.offset);
                    }
                }
            }
            write_opacity(out, p.opacity);
        }
    }
    if let Some(key) = mark.pick {
        let _ = write!(out, r#" data-pick="{}""#, key.0);
    }

    let animation = mark
        .transition
        .map(|t| animation(&t, &mark.payload))
        .unwrap_or_default();
    if let MarkPayload::Path(p) = &mark.payload {
        if animation.contains(r#"attributeName="stroke-dashoffset""#) && p.dash.is_none() {
            out.push_str(r#" pathLength="1" stroke-dasharray="1 1""#);
        }
        if animation.contains("animateTransform") {
            let c = p.path.bounding_box().center();
            let _ = write!(out, r#" style="transform-origin: {}px {}px""#, c.x, c.y);
        }
    }

    match (&mark.payload, animation.is_empty()) {
        (MarkPayload::Text(t), _) => {
            out.push('>');
            out.push_str(&animation);
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
        }
        (MarkPayload::Rect(_), true) | (MarkPayload::Path(_), true) => out.push_str("/>\n"),
        (MarkPayload::Rect(_), false) => {
            out.push('>');
            out.push_str(&animation);
            out.push_str("</rect>\n");
        }
        (MarkPayload::Path(_), false) => {
            out.push('>');
            out.push_str(&animation);
            out.push_str("</path>\n");
        }
    }
}

/// SMIL elements for `t` applied to `payload`; empty when the entrance does not apply.
///
/// A delay is folded into the timeline with `keyTimes` so the mark holds its start state until
/// the delay has passed.
fn animation(t: &Transition, payload: &MarkPayload) -> String {
    let mut out = String::new();
    let mut animate = |element: &str, attr: &str, extra: &str, from: String, to: String| {
        let _ = write!(
            out,
            r#"<{element} attributeName="{attr}"{extra} {} fill="freeze"/>"#,
            timing(t, &from, &to)
        );
    };
    match (t.entrance, payload) {
        (Entrance::GrowHeight, MarkPayload::Rect(r)) => {
            let full = r.rect.abs();
            animate("animate", "y", "", full.y1.to_string(), full.y0.to_string());
            animate("animate", "height", "", "0".into(), full.height().to_string());
        }
        (Entrance::GrowWidth, MarkPayload::Rect(r)) => {
            let full = r.rect.abs();
            animate("animate", "width", "", "0".into(), full.width().to_string());
        }
        (Entrance::Scale, MarkPayload::Path(_)) => {
            animate(
                "animateTransform",
                "transform",
                r#" type="scale""#,
                "0".into(),
                "1".into(),
            );
        }
        (Entrance::Reveal, MarkPayload::Path(p)) if p.dash.is_none() => {
            animate(
                "animate",
                "stroke-dashoffset",
                "",
                "1".into(),
                "0".into(),
            );
        }
        (Entrance::FadeIn, payload) => {
            animate(
                "animate",
                "opacity",
                "",
                "0".into(),
                payload.opacity().to_string(),
            );
        }
        _ => {}
    }
    out
}

fn timing(t: &Transition, from: &str, to: &str) -> String {
    let delay = t.delay_ms.max(0.0);
    let duration = t.duration_ms.max(0.0);
    let total = delay + duration;
    let spline = match t.easing {
        Easing::Linear => "0 0 1 1",
        Easing::CubicInOut => "0.65 0 0.35 1",
    };
    if delay > 0.0 && total > 0.0 {
        format!(
            r#"dur="{total}ms" values="{from};{from};{to}" keyTimes="0;{};1" calcMode="spline" keySplines="0 0 1 1;{spline}""#,
            delay / total
        )
    } else {
        format!(
            r#"dur="{}ms" values="{from};{to}" keyTimes="0;1" calcMode="spline" keySplines="{spline}""#,
            duration.max(1.0)
        )
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            if rgba.a == 0 {
                return ("none".to_string(), None);
            }
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn write_opacity(out: &mut String, opacity: f64) {
    if opacity < 1.0 {
        let _ = write!(out, r#" opacity="{}""#, opacity.max(0.0));
    }
}

/// Escapes text for use in SVG and HTML content and attributes.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kaymo_core::{Mark, StrokeDash};
    use kurbo::{BezPath, Point};
    use peniko::Color;

    use super::*;

    fn render(marks: Vec<Mark>) -> String {
        let mut scene = Scene::new();
        let diffs = scene.tick(marks);
        let mut svg = SvgScene::new();
        svg.set_view_box(Rect::new(0.0, 0.0, 200.0, 100.0));
        svg.apply_diffs(&scene, &diffs);
        svg.to_svg_string()
    }

    #[test]
    fn writes_marks_in_paint_order() {
        let svg = render(vec![
            Mark::builder(MarkId(2))
                .text()
                .pos(Point::new(10.0, 20.0))
                .content("a < b")
                .font_weight(700)
                .z_index(5)
                .build(),
            Mark::builder(MarkId(1))
                .rect()
                .bounds(Rect::new(0.0, 0.0, 10.0, 10.0))
                .fill(Color::from_rgb8(0xDC, 0x26, 0x26))
                .opacity(0.8)
                .pick(PickKey(3))
                .build(),
        ]);
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100""#));
        let rect = svg.find("<rect").unwrap();
        let text = svg.find("<text").unwrap();
        assert!(rect < text);
        assert!(svg.contains(r##"fill="#dc2626" opacity="0.8" data-pick="3"/>"##));
        assert!(svg.contains(r#"font-weight="700""#));
        assert!(svg.contains("a &lt; b</text>"));
    }

    #[test]
    fn dashed_paths_and_transparent_fills() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((0.0, 50.0));
        let svg = render(vec![
            Mark::builder(MarkId(1))
                .path()
                .geometry(path)
                .fill(Color::TRANSPARENT)
                .stroke(Color::BLACK)
                .stroke_width(2.0)
                .dash(StrokeDash::new(&[5.0, 5.0]))
                .build(),
        ]);
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains(r#"stroke-dasharray="5 5""#));
    }

    #[test]
    fn transitions_become_smil_animations() {
        let svg = render(vec![
            Mark::builder(MarkId(1))
                .rect()
                .bounds(Rect::new(0.0, 20.0, 10.0, 100.0))
                .transition(Transition::new(Entrance::GrowHeight, 1000.0))
                .build(),
            Mark::builder(MarkId(2))
                .path()
                .geometry(Rect::new(45.0, 45.0, 55.0, 55.0).to_path(0.1))
                .transition(Transition::new(Entrance::Scale, 2000.0).with_delay(500.0))
                .build(),
        ]);
        assert!(svg.contains(r#"<animate attributeName="height""#));
        assert!(svg.contains("</rect>"));
        assert!(svg.contains(r#"type="scale" dur="2500ms" values="0;0;1" keyTimes="0;0.2;1""#));
        assert!(svg.contains("transform-origin: 50px 50px"));
    }

    #[test]
    fn exits_remove_marks() {
        let mut scene = Scene::new();
        let mut svg = SvgScene::new();
        let bar = Mark::builder(MarkId(9))
            .rect()
            .bounds(Rect::new(0.0, 0.0, 1.0, 1.0))
            .build();
        let diffs = scene.tick([bar]);
        svg.apply_diffs(&scene, &diffs);
        assert_eq!(svg.len(), 1);
        let diffs = scene.clear();
        svg.apply_diffs(&scene, &diffs);
        assert!(svg.is_empty());
    }
}
