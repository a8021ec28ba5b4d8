// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-driven runner for the leaf-fall simulation.
//!
//! The loop owns the [`LeafFall`] state inside a spawned task. Each frame it steps the
//! simulation to completion and only then publishes a [`LeafFallSnapshot`], so readers never see
//! a half-updated frame. The loop shares nothing with the chart widgets.

use std::time::Duration;

use kaymo_core::Mark;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::config::LeafFallConfig;
use crate::error::{SiteError, SiteResult};
use crate::leaffall::LeafFall;
use crate::store::Observable;

/// What a frame looks like once it has been fully stepped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeafFallSnapshot {
    /// Frames stepped so far.
    pub frame: u64,
    /// Simulated time.
    pub elapsed_ms: f64,
    /// Live particles.
    pub particle_count: usize,
    /// Marks for the frame.
    pub marks: Vec<Mark>,
}

impl LeafFallSnapshot {
    /// Captures the current state of `sim`.
    pub fn capture(sim: &LeafFall) -> Self {
        Self {
            frame: sim.frame(),
            elapsed_ms: sim.elapsed_ms(),
            particle_count: sim.particles().len(),
            marks: sim.marks(),
        }
    }
}

/// A running leaf-fall animation. Dropping it stops the loop.
#[derive(Debug)]
pub struct LeafFallLoop {
    frames: Observable<LeafFallSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl LeafFallLoop {
    /// Starts the loop on the current tokio runtime.
    pub fn start(config: &LeafFallConfig) -> SiteResult<Self> {
        config.validate()?;
        let handle = Handle::try_current().map_err(|_| SiteError::NoRuntime("leaf-fall loop"))?;
        let sim = LeafFall::new(config);
        let frames = Observable::new(LeafFallSnapshot::capture(&sim));
        let task = handle.spawn(run(sim, config.frame_interval(), frames.clone()));
        debug!(trees = config.tree_count, frame_ms = config.frame_ms, "leaf-fall started");
        Ok(Self {
            frames,
            task: Some(task),
        })
    }

    /// The latest complete frame.
    pub fn snapshot(&self) -> LeafFallSnapshot {
        self.frames.get()
    }

    /// Subscribes to frames.
    pub fn subscribe(&self) -> watch::Receiver<LeafFallSnapshot> {
        self.frames.subscribe()
    }

    /// Returns `true` until the loop is stopped.
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Stops the loop. The last published frame stays readable.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(frame = self.frames.with(|f| f.frame), "leaf-fall stopped");
        }
    }
}

impl Drop for LeafFallLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run(mut sim: LeafFall, period: Duration, frames: Observable<LeafFallSnapshot>) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let dt_ms = period.as_secs_f64() * 1000.0;
    loop {
        ticker.tick().await;
        sim.step(dt_ms);
        let snapshot = LeafFallSnapshot::capture(&sim);
        trace!(
            frame = snapshot.frame,
            particles = snapshot.particle_count,
            "leaf-fall frame"
        );
        frames.set(snapshot);
        if sim.is_settled() {
            debug!(frame = sim.frame(), "leaf-fall settled");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LeafFallConfig {
        LeafFallConfig {
            seed: Some(3),
            frame_ms: 16,
            ..LeafFallConfig::default()
        }
    }

    #[test]
    fn starting_without_a_runtime_is_an_error() {
        assert!(matches!(
            LeafFallLoop::start(&config()),
            Err(SiteError::NoRuntime(_))
        ));
    }

    #[tokio::test]
    async fn invalid_settings_never_start_a_loop() {
        let nan = LeafFallConfig {
            spawn_probability: f64::NAN,
            ..config()
        };
        assert!(matches!(
            LeafFallLoop::start(&nan),
            Err(SiteError::InvalidConfig {
                field: "leaf_fall.spawn_probability",
                ..
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_one_snapshot_per_frame() {
        let fall = LeafFallLoop::start(&config()).unwrap();
        assert_eq!(fall.snapshot().frame, 0);
        time::sleep(Duration::from_millis(16 * 10 + 8)).await;
        let snap = fall.snapshot();
        assert_eq!(snap.frame, 10);
        assert!((snap.elapsed_ms - 160.0).abs() < 1e-9);
        assert!(!snap.marks.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stopping_freezes_the_last_frame() {
        let mut fall = LeafFallLoop::start(&config()).unwrap();
        time::sleep(Duration::from_millis(16 * 5 + 8)).await;
        fall.stop();
        assert!(!fall.is_running());
        let frozen = fall.snapshot().frame;
        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(fall.snapshot().frame, frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn the_loop_ends_once_everything_has_fallen() {
        let fall = LeafFallLoop::start(&LeafFallConfig {
            tree_count: 1,
            spawn_probability: 0.0,
            ..config()
        })
        .unwrap();
        time::sleep(Duration::from_millis(4200)).await;
        let settled = fall.snapshot().frame;
        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(fall.snapshot().frame, settled);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels_the_loop() {
        let fall = LeafFallLoop::start(&config()).unwrap();
        let mut rx = fall.subscribe();
        drop(fall);
        rx.mark_unchanged();
        time::sleep(Duration::from_millis(500)).await;
        assert!(!rx.has_changed().unwrap_or(false));
    }
}
