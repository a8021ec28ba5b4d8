// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene reconciliation.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::mark::{Mark, MarkId, MarkKind, MarkPayload, PickKey};

/// A change produced by [`Scene::tick`].
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark appeared.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Paint order.
        z_index: i32,
        /// The new mark.
        new: Box<MarkPayload>,
        /// Bounds of the new payload.
        bounds: Option<Rect>,
    },
    /// A mark changed.
    Update {
        /// Mark id.
        id: MarkId,
        /// Mark kind after the change.
        kind: MarkKind,
        /// Paint order before the change.
        old_z_index: i32,
        /// Paint order after the change.
        new_z_index: i32,
        /// Payload before the change.
        old: Box<MarkPayload>,
        /// Payload after the change.
        new: Box<MarkPayload>,
        /// Bounds before the change.
        old_bounds: Option<Rect>,
        /// Bounds after the change.
        new_bounds: Option<Rect>,
    },
    /// A mark disappeared.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Paint order.
        z_index: i32,
        /// The removed payload.
        old: Box<MarkPayload>,
        /// Bounds of the removed payload.
        bounds: Option<Rect>,
    },
}

impl MarkDiff {
    /// Returns the id this diff applies to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

/// The set of marks currently on a drawing surface.
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Mark>,
    revision: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Number of ticks that produced at least one diff.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Looks up a mark by id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    /// Replaces the scene contents with `marks` and returns what changed.
    ///
    /// Enter and update diffs follow the order of `marks`; exit diffs follow id order.
    /// If an id appears more than once, the last mark wins.
    pub fn tick(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let prev = core::mem::take(&mut self.marks);
        let mut diffs = Vec::new();

        for mark in marks {
            let id = mark.id;
            if self.marks.remove(&id).is_some() {
                // Duplicate within this frame: the earlier copy's diff is superseded.
                diffs.retain(|d: &MarkDiff| d.id() != id);
            }
            match prev.get(&id) {
                None => diffs.push(MarkDiff::Enter {
                    id,
                    kind: mark.kind,
                    z_index: mark.z_index,
                    new: Box::new(mark.payload.clone()),
                    bounds: mark.bounds(),
                }),
                Some(old) if old != &mark => diffs.push(MarkDiff::Update {
                    id,
                    kind: mark.kind,
                    old_z_index: old.z_index,
                    new_z_index: mark.z_index,
                    old: Box::new(old.payload.clone()),
                    new: Box::new(mark.payload.clone()),
                    old_bounds: old.bounds(),
                    new_bounds: mark.bounds(),
                }),
                Some(_) => {}
            }
            self.marks.insert(id, mark);
        }

        let mut gone: Vec<Mark> = prev
            .into_iter()
            .filter(|(id, _)| !self.marks.contains_key(id))
            .map(|(_, m)| m)
            .collect();
        gone.sort_by_key(|m| m.id);
        for old in gone {
            diffs.push(MarkDiff::Exit {
                id: old.id,
                kind: old.kind,
                z_index: old.z_index,
                bounds: old.bounds(),
                old: Box::new(old.payload),
            });
        }

        if !diffs.is_empty() {
            self.revision += 1;
        }
        diffs
    }

    /// Removes every mark, returning exit diffs in id order.
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        self.tick(core::iter::empty())
    }

    /// Discards the current contents and draws `marks` from scratch.
    ///
    /// Unlike [`Scene::tick`], every mark is reported as an exit followed by an enter, so a
    /// surface applying the diffs rebuilds itself completely and replays entrance transitions.
    pub fn redraw(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let mut diffs = self.clear();
        diffs.extend(self.tick(marks));
        diffs
    }

    /// Marks in paint order: ascending `(z_index, id)`.
    pub fn paint_order(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.values().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Returns the topmost pickable mark under `pt`.
    pub fn pick(&self, pt: Point) -> Option<(MarkId, PickKey)> {
        self.paint_order()
            .into_iter()
            .rev()
            .filter_map(|m| m.pick.map(|k| (m, k)))
            .find(|(m, _)| m.payload.contains(pt))
            .map(|(m, k)| (m.id, k))
    }

    /// Samples every mark at `elapsed_ms` since it entered, in paint order.
    ///
    /// Marks without a transition are returned as stored.
    pub fn sample(&self, elapsed_ms: f64) -> Vec<(MarkId, i32, MarkPayload)> {
        self.paint_order()
            .into_iter()
            .map(|m| {
                let payload = match &m.transition {
                    Some(t) => t.sample(&m.payload, elapsed_ms),
                    None => m.payload.clone(),
                };
                (m.id, m.z_index, payload)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Circle;
    use kurbo::Shape;
    use peniko::color::palette::css;

    use super::*;
    use crate::transition::{Easing, Entrance, Transition};

    fn bar(id: u64, h: f64) -> Mark {
        Mark::builder(MarkId(id))
            .rect()
            .bounds(Rect::new(0.0, 100.0 - h, 10.0, 100.0))
            .fill(css::TOMATO)
            .build()
    }

    #[test]
    fn tick_reports_enter_update_exit() {
        let mut scene = Scene::new();
        let diffs = scene.tick(vec![bar(1, 10.0), bar(2, 20.0)]);
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Enter { .. })));

        let diffs = scene.tick(vec![bar(2, 30.0), bar(3, 5.0)]);
        let [
            MarkDiff::Update { id: up, .. },
            MarkDiff::Enter { id: enter, .. },
            MarkDiff::Exit { id: exit, .. },
        ] = &diffs[..]
        else {
            panic!("expected update, enter, exit: {diffs:?}");
        };
        assert_eq!(*up, MarkId(2));
        assert_eq!(*enter, MarkId(3));
        assert_eq!(*exit, MarkId(1));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn unchanged_marks_produce_no_diffs() {
        let mut scene = Scene::new();
        scene.tick(vec![bar(1, 10.0)]);
        let rev = scene.revision();
        assert!(scene.tick(vec![bar(1, 10.0)]).is_empty());
        assert_eq!(scene.revision(), rev);
    }

    #[test]
    fn duplicate_ids_keep_the_last_mark() {
        let mut scene = Scene::new();
        let diffs = scene.tick(vec![bar(1, 10.0), bar(1, 20.0)]);
        let [MarkDiff::Enter { .. }] = &diffs[..] else {
            panic!("expected a single enter diff");
        };
        let MarkPayload::Rect(r) = &scene.get(MarkId(1)).expect("mark 1").payload else {
            panic!("expected rect payload");
        };
        assert_eq!(r.rect.height(), 20.0);
    }

    #[test]
    fn redraw_discards_everything_first() {
        let mut scene = Scene::new();
        scene.tick(vec![bar(1, 10.0), bar(2, 20.0)]);
        let diffs = scene.redraw(vec![bar(1, 10.0)]);
        let exits = diffs
            .iter()
            .filter(|d| matches!(d, MarkDiff::Exit { .. }))
            .count();
        let enters = diffs
            .iter()
            .filter(|d| matches!(d, MarkDiff::Enter { .. }))
            .count();
        assert_eq!((exits, enters), (2, 1));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn pick_prefers_topmost_pickable_mark() {
        let under = Mark::builder(MarkId(1))
            .bounds(Rect::new(0.0, 0.0, 100.0, 100.0))
            .pick(PickKey(10))
            .z_index(0)
            .build();
        let over = Mark::builder(MarkId(2))
            .path()
            .geometry(Circle::new((50.0, 50.0), 10.0).to_path(0.1))
            .pick(PickKey(20))
            .z_index(5)
            .build();
        let inert = Mark::builder(MarkId(3))
            .bounds(Rect::new(0.0, 0.0, 100.0, 100.0))
            .z_index(10)
            .build();
        let mut scene = Scene::new();
        scene.tick(vec![under, over, inert]);

        assert_eq!(scene.pick(Point::new(50.0, 50.0)), Some((MarkId(2), PickKey(20))));
        assert_eq!(scene.pick(Point::new(5.0, 5.0)), Some((MarkId(1), PickKey(10))));
        assert_eq!(scene.pick(Point::new(500.0, 5.0)), None);
    }

    #[test]
    fn sample_applies_transitions_in_paint_order() {
        let grow = Mark {
            transition: Some(
                Transition::new(Entrance::GrowHeight, 1000.0).with_easing(Easing::Linear),
            ),
            z_index: 1,
            ..bar(1, 40.0)
        };
        let still = bar(2, 40.0);
        let mut scene = Scene::new();
        scene.tick(vec![grow, still]);

        let sampled = scene.sample(500.0);
        assert_eq!(sampled[0].0, MarkId(2));
        let MarkPayload::Rect(r) = &sampled[1].2 else {
            panic!("expected rect payload");
        };
        assert!((r.rect.height() - 20.0).abs() < 1e-9);
        // The stored mark is untouched.
        let MarkPayload::Rect(stored) = &scene.get(MarkId(1)).expect("mark 1").payload else {
            panic!("expected rect payload");
        };
        assert_eq!(stored.rect.height(), 40.0);
    }
}
