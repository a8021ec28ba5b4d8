// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf-fall simulation behind the hero.
//!
//! A row of trees dies over a few seconds. Each tree's death progress is a pure function of
//! elapsed time; leaves and branches fade with it and the wood darkens past fixed thresholds.
//! While a tree is dying its visible leaves occasionally shed particles, which fall under gravity
//! with air resistance until they fade out or hit the ground.
//!
//! Everything here is synchronous and deterministic for a given seed. The frame loop in
//! [`crate::frame_loop`] calls [`LeafFall::step`] once per frame.

use std::f64::consts::TAU;

use kaymo_core::{Mark, MarkId};
use kurbo::{BezPath, Circle, Ellipse, Point, Shape};
use peniko::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::LeafFallConfig;
use crate::data::rgb;

/// Width of the hero strip the trees stand in.
pub const VIEW_WIDTH: f64 = 800.0;

const TRUNK_HEIGHT: f64 = 90.0;
const TRUNK_WIDTH: f64 = 8.0;
const BRANCH_WIDTH: f64 = 3.0;
const CROWN_RADIUS: f64 = 30.0;
const LEAF_RADIUS: f64 = 6.0;
const LEAVES_PER_TREE: usize = 8;
const BRANCH_ANGLES: [f64; 3] = [-0.7, 0.0, 0.7];

const TRUNK_DEATH_THRESHOLD: f64 = 0.3;
const BRANCH_DEATH_THRESHOLD: f64 = 0.5;
const SPAWN_FROM: f64 = 0.1;

const WOOD: u32 = 0x8B5A2B;
const TRUNK_DEAD: u32 = 0x4A3728;
const BRANCH_DEAD: u32 = 0x6B5B4B;
const LEAF: u32 = 0x22C55E;
const PARTICLE_COLORS: [u32; 4] = [0xD97706, 0xB45309, 0x92400E, 0xA16207];

const TREE_ID_BASE: u64 = 0x1_000;
const TREE_ID_STRIDE: u64 = 0x100;
const PARTICLE_ID_BASE: u64 = 0x100_000;

/// Death progress in `[0, 1]` for a tree that starts dying after `delay_ms`.
pub fn death_progress(elapsed_ms: f64, delay_ms: f64, death_ms: f64) -> f64 {
    let local = elapsed_ms - delay_ms;
    if death_ms.is_nan() || death_ms <= 0.0 {
        return if local >= 0.0 { 1.0 } else { 0.0 };
    }
    (local / death_ms).clamp(0.0, 1.0)
}

/// Opacity of leaf `index` at death progress `p`.
pub fn leaf_opacity(base: f64, p: f64, index: usize) -> f64 {
    base * (1.0 - p * (1.2 + index as f64 * 0.1)).max(0.0)
}

/// Opacity of branch `index` at death progress `p`.
pub fn branch_opacity(base: f64, p: f64, index: usize) -> f64 {
    base * (1.0 - p * (0.8 + index as f64 * 0.1)).max(0.0)
}

/// Blends from `from` to `to` once `p` passes `threshold`, reaching `to` at `p == 1`.
pub fn wood_color(from: u32, to: u32, p: f64, threshold: f64) -> Color {
    if p <= threshold {
        return rgb(from);
    }
    let t = ((p - threshold) / (1.0 - threshold)).clamp(0.0, 1.0);
    mix(from, to, t)
}

#[allow(clippy::cast_possible_truncation, reason = "channels are clamped to a byte")]
fn mix(from: u32, to: u32, t: f64) -> Color {
    let channel = |shift: u32| {
        let a = f64::from((from >> shift) & 0xFF);
        let b = f64::from((to >> shift) & 0xFF);
        (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
    };
    Color::from_rgb8(channel(16), channel(8), channel(0))
}

/// Per-frame physics constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    /// Added to the vertical velocity each frame.
    pub gravity: f64,
    /// Horizontal velocity multiplier each frame.
    pub damping: f64,
    /// Subtracted from opacity each frame.
    pub fade: f64,
    /// Particles below this y are retired.
    pub floor_y: f64,
}

impl From<&LeafFallConfig> for Physics {
    fn from(config: &LeafFallConfig) -> Self {
        Self {
            gravity: config.gravity,
            damping: config.damping,
            fade: config.fade,
            floor_y: config.floor_y,
        }
    }
}

/// A falling leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Stable id for rendering.
    pub id: u64,
    /// Centre.
    pub pos: Point,
    /// Horizontal velocity, px per frame.
    pub vx: f64,
    /// Vertical velocity, px per frame (positive is down).
    pub vy: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Rotation per frame in degrees.
    pub spin: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Half length of the leaf.
    pub size: f64,
    /// Colour (`0xRRGGBB`).
    pub color: u32,
}

impl Particle {
    /// Integrates one frame. Returns `false` once the particle should be retired.
    pub fn step(&mut self, physics: &Physics) -> bool {
        self.vx *= physics.damping;
        self.vy += physics.gravity;
        self.pos.x += self.vx;
        self.pos.y += self.vy;
        self.rotation += self.spin;
        self.opacity -= physics.fade;
        self.is_alive(physics)
    }

    /// Returns `true` while the particle is visible and above the floor.
    pub fn is_alive(&self, physics: &Physics) -> bool {
        self.opacity > 0.0 && self.pos.y <= physics.floor_y
    }

    fn mark(&self) -> Mark {
        let shape = Ellipse::new(
            self.pos,
            (self.size, self.size * 0.5),
            self.rotation.to_radians(),
        );
        Mark::builder(MarkId(PARTICLE_ID_BASE + self.id))
            .path()
            .geometry(shape.to_path(0.1))
            .fill(rgb(self.color))
            .opacity(self.opacity.clamp(0.0, 1.0))
            .z_index(10)
            .build()
    }
}

/// One tree: a trunk, a few branches and a crown of leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    /// Where the trunk meets the ground.
    pub root: Point,
    /// Time before the tree starts dying.
    pub delay_ms: f64,
}

impl Tree {
    fn top(&self) -> Point {
        Point::new(self.root.x, self.root.y - TRUNK_HEIGHT)
    }

    fn crown(&self) -> Point {
        Point::new(self.root.x, self.root.y - TRUNK_HEIGHT - CROWN_RADIUS * 0.5)
    }

    /// Centre of leaf `index`.
    pub fn leaf_pos(&self, index: usize) -> Point {
        let angle = index as f64 * TAU / LEAVES_PER_TREE as f64;
        let c = self.crown();
        Point::new(
            c.x + CROWN_RADIUS * angle.cos(),
            c.y + CROWN_RADIUS * 0.7 * angle.sin(),
        )
    }

    fn branch_end(&self, index: usize) -> Point {
        let angle = BRANCH_ANGLES[index % BRANCH_ANGLES.len()];
        let top = self.top();
        Point::new(
            top.x + CROWN_RADIUS * angle.sin(),
            top.y - CROWN_RADIUS * 0.8 * angle.cos(),
        )
    }
}

/// The whole simulation.
#[derive(Debug, Clone)]
pub struct LeafFall {
    trees: Vec<Tree>,
    particles: Vec<Particle>,
    physics: Physics,
    spawn_probability: f64,
    death_ms: f64,
    elapsed_ms: f64,
    frame: u64,
    next_particle: u64,
    rng: StdRng,
}

impl LeafFall {
    /// Lays out `config.tree_count` trees evenly across the view, each starting to die
    /// `stagger_ms` after the previous one.
    pub fn new(config: &LeafFallConfig) -> Self {
        let n = config.tree_count;
        let trees = (0..n)
            .map(|i| Tree {
                root: Point::new(
                    VIEW_WIDTH * (i + 1) as f64 / (n + 1) as f64,
                    config.floor_y,
                ),
                delay_ms: i as f64 * config.stagger_ms,
            })
            .collect();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            trees,
            particles: Vec::new(),
            physics: Physics::from(config),
            spawn_probability: if config.spawn_probability.is_finite() {
                config.spawn_probability.clamp(0.0, 1.0)
            } else {
                0.0
            },
            death_ms: config.death_ms,
            elapsed_ms: 0.0,
            frame: 0,
            next_particle: 0,
            rng,
        }
    }

    /// The trees.
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Live particles, oldest first.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Physics constants.
    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    /// Simulated time.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Death progress of tree `index` at the current time.
    pub fn progress(&self, index: usize) -> f64 {
        self.trees.get(index).map_or(0.0, |t| {
            death_progress(self.elapsed_ms, t.delay_ms, self.death_ms)
        })
    }

    /// Returns `true` once every tree is dead and every particle has landed.
    pub fn is_settled(&self) -> bool {
        self.particles.is_empty() && (0..self.trees.len()).all(|i| self.progress(i) >= 1.0)
    }

    /// Advances the simulation by one frame of `dt_ms`.
    ///
    /// Existing particles are integrated first; dying trees then shed new ones from their
    /// visible leaves.
    pub fn step(&mut self, dt_ms: f64) {
        self.elapsed_ms += dt_ms.max(0.0);
        self.frame += 1;

        let physics = self.physics;
        self.particles.retain_mut(|p| p.step(&physics));

        for ti in 0..self.trees.len() {
            let p = self.progress(ti);
            if p <= SPAWN_FROM || p >= 1.0 {
                continue;
            }
            for li in 0..LEAVES_PER_TREE {
                let opacity = leaf_opacity(1.0, p, li);
                if opacity <= 0.0 || !self.rng.random_bool(self.spawn_probability) {
                    continue;
                }
                let pos = self.trees[ti].leaf_pos(li);
                self.spawn(pos, opacity);
            }
        }
    }

    fn spawn(&mut self, pos: Point, opacity: f64) {
        let color = PARTICLE_COLORS[self.rng.random_range(0..PARTICLE_COLORS.len())];
        let particle = Particle {
            id: self.next_particle,
            pos,
            vx: self.rng.random_range(-0.8..0.8),
            vy: self.rng.random_range(0.0..0.5),
            rotation: self.rng.random_range(0.0..360.0),
            spin: self.rng.random_range(-3.0..3.0),
            opacity,
            size: self.rng.random_range(4.0..7.0),
            color,
        };
        self.next_particle += 1;
        self.particles.push(particle);
    }

    /// Adds a particle directly.
    pub fn push_particle(&mut self, mut particle: Particle) {
        particle.id = self.next_particle;
        self.next_particle += 1;
        self.particles.push(particle);
    }

    /// Marks for the current frame: trees first, then particles.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.trees.len() * 12 + self.particles.len());
        for (ti, tree) in self.trees.iter().enumerate() {
            let p = self.progress(ti);
            let base = TREE_ID_BASE + ti as u64 * TREE_ID_STRIDE;

            out.push(
                Mark::builder(MarkId(base))
                    .path()
                    .geometry(segment(tree.root, tree.top()))
                    .fill(Color::TRANSPARENT)
                    .stroke(wood_color(WOOD, TRUNK_DEAD, p, TRUNK_DEATH_THRESHOLD))
                    .stroke_width(TRUNK_WIDTH)
                    .build(),
            );
            let branch_fill = wood_color(WOOD, BRANCH_DEAD, p, BRANCH_DEATH_THRESHOLD);
            for bi in 0..BRANCH_ANGLES.len() {
                out.push(
                    Mark::builder(MarkId(base + 1 + bi as u64))
                        .path()
                        .geometry(segment(tree.top(), tree.branch_end(bi)))
                        .fill(Color::TRANSPARENT)
                        .stroke(branch_fill)
                        .stroke_width(BRANCH_WIDTH)
                        .opacity(branch_opacity(1.0, p, bi))
                        .build(),
                );
            }
            for li in 0..LEAVES_PER_TREE {
                let opacity = leaf_opacity(0.9, p, li);
                if opacity <= 0.0 {
                    continue;
                }
                out.push(
                    Mark::builder(MarkId(base + 0x10 + li as u64))
                        .path()
                        .geometry(Circle::new(tree.leaf_pos(li), LEAF_RADIUS).to_path(0.1))
                        .fill(rgb(LEAF))
                        .opacity(opacity)
                        .z_index(1)
                        .build(),
                );
            }
        }
        out.extend(self.particles.iter().map(Particle::mark));
        out
    }
}

fn segment(a: Point, b: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LeafFallConfig {
        LeafFallConfig {
            seed: Some(7),
            ..LeafFallConfig::default()
        }
    }

    fn particle(vx: f64, vy: f64, opacity: f64) -> Particle {
        Particle {
            id: 0,
            pos: Point::new(100.0, 100.0),
            vx,
            vy,
            rotation: 0.0,
            spin: 2.0,
            opacity,
            size: 5.0,
            color: PARTICLE_COLORS[0],
        }
    }

    #[test]
    fn one_step_applies_gravity_and_damping() {
        let physics = Physics::from(&config());
        let mut p = particle(1.0, 1.0, 1.0);
        assert!(p.step(&physics));
        assert!((p.vy - 1.05).abs() < 1e-12);
        assert!((p.vx - 0.99).abs() < 1e-12);
        assert!((p.pos.x - 100.99).abs() < 1e-9);
        assert!((p.pos.y - 101.05).abs() < 1e-9);
        assert_eq!(p.rotation, 2.0);
        assert!((p.opacity - 0.995).abs() < 1e-12);
    }

    #[test]
    fn faded_or_grounded_particles_are_retired() {
        let physics = Physics::from(&config());
        let mut faded = particle(0.0, 0.0, 0.004);
        assert!(!faded.step(&physics));

        let mut low = particle(0.0, 5.0, 1.0);
        low.pos.y = physics.floor_y - 1.0;
        assert!(!low.step(&physics));

        let mut sim = LeafFall::new(&LeafFallConfig {
            tree_count: 0,
            ..config()
        });
        sim.push_particle(particle(0.0, 0.0, 0.004));
        sim.push_particle(particle(0.0, 0.0, 1.0));
        sim.step(16.0);
        assert_eq!(sim.particles().len(), 1);
        assert_eq!(sim.particles()[0].id, 1);
    }

    #[test]
    fn death_progress_saturates() {
        assert_eq!(death_progress(0.0, 600.0, 4000.0), 0.0);
        assert_eq!(death_progress(2600.0, 600.0, 4000.0), 0.5);
        assert_eq!(death_progress(10_000.0, 0.0, 4000.0), 1.0);
        assert_eq!(death_progress(1.0, 0.0, 0.0), 1.0);
        assert_eq!(death_progress(1.0, 0.0, f64::NAN), 1.0);
        assert_eq!(death_progress(0.0, 600.0, f64::NAN), 0.0);
    }

    #[test]
    fn unchecked_nan_settings_neither_panic_nor_stall() {
        let mut sim = LeafFall::new(&LeafFallConfig {
            spawn_probability: f64::NAN,
            death_ms: f64::NAN,
            ..config()
        });
        // The last of five trees starts dying at 2400 ms.
        for _ in 0..200 {
            sim.step(16.0);
        }
        assert!(sim.particles().is_empty(), "NaN probability never sheds");
        assert!(sim.is_settled(), "every tree died once its delay passed");
    }

    #[test]
    fn spawn_probability_is_clamped_into_a_valid_range() {
        let mut sim = LeafFall::new(&LeafFallConfig {
            spawn_probability: 7.0,
            ..config()
        });
        for _ in 0..30 {
            sim.step(16.0);
        }
        assert!(!sim.particles().is_empty());
    }

    #[test]
    fn leaves_fade_faster_than_branches() {
        assert_eq!(leaf_opacity(1.0, 0.0, 3), 1.0);
        assert!((leaf_opacity(1.0, 0.5, 0) - 0.4).abs() < 1e-12);
        assert!((branch_opacity(1.0, 0.5, 0) - 0.6).abs() < 1e-12);
        assert_eq!(leaf_opacity(0.9, 1.0, 0), 0.0);
        assert!(branch_opacity(1.0, 1.0, 0) > 0.0);
    }

    #[test]
    fn wood_darkens_only_past_its_threshold() {
        assert_eq!(wood_color(WOOD, TRUNK_DEAD, 0.3, 0.3), rgb(WOOD));
        assert_eq!(wood_color(WOOD, TRUNK_DEAD, 1.0, 0.3), rgb(TRUNK_DEAD));
        assert_ne!(wood_color(WOOD, BRANCH_DEAD, 0.6, 0.5), rgb(WOOD));
    }

    #[test]
    fn nothing_falls_before_trees_start_dying() {
        let mut sim = LeafFall::new(&LeafFallConfig {
            spawn_probability: 1.0,
            ..config()
        });
        // 25 frames of 16 ms: the first tree is at 0.1 progress at most.
        for _ in 0..25 {
            sim.step(16.0);
        }
        assert!(sim.particles().is_empty());
        sim.step(16.0);
        assert!(!sim.particles().is_empty());
    }

    #[test]
    fn seeded_runs_are_deterministic() {
        let run = || {
            let mut sim = LeafFall::new(&LeafFallConfig {
                spawn_probability: 0.2,
                ..config()
            });
            for _ in 0..200 {
                sim.step(16.0);
            }
            sim.particles().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn dead_trees_lose_their_leaves() {
        let mut sim = LeafFall::new(&LeafFallConfig {
            tree_count: 1,
            ..config()
        });
        let alive = sim.marks().len();
        assert_eq!(alive, 1 + 3 + LEAVES_PER_TREE);
        sim.step(5000.0);
        assert_eq!(sim.progress(0), 1.0);
        assert_eq!(sim.marks().len() - sim.particles().len(), 1 + 3);
        assert!(sim.is_settled());
    }
}
