// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained mark model for Kaymo charts.
//!
//! A chart widget recomputes its full list of [`Mark`]s from `(dataset, state)` and hands it to a
//! [`Scene`]. The scene reconciles the new list against what it currently holds and reports the
//! difference as [`MarkDiff`]s, keyed by stable [`MarkId`]s:
//! - **Enter** for ids that were not present,
//! - **Update** for ids whose mark changed,
//! - **Exit** for ids that disappeared.
//!
//! Marks can carry a [`PickKey`] so a surface can route pointer events back to the data row that
//! produced the shape ([`Scene::pick`]), and an entrance [`Transition`] that a surface samples over
//! time ([`Scene::sample`]). Transitions are cosmetic: they never change the stored mark.
//!
//! This crate is `no_std` + `alloc`. Geometry is [`kurbo`], paint is [`peniko`].

#![no_std]

extern crate alloc;

mod mark;
mod scene;
mod transition;

pub use mark::{
    Mark, MarkBuilder, MarkId, MarkKind, MarkPayload, PathPayload, PickKey, RectPayload,
    StrokeDash, TextAnchor, TextBaseline, TextPayload,
};
pub use scene::{MarkDiff, Scene};
pub use transition::{Easing, Entrance, Transition};
