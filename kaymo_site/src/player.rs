// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeline auto-play.
//!
//! Playing spawns a task that advances the selected year once per period. The task handle is
//! owned by the player and aborted when play is toggled off or the player is dropped, so a paused
//! or torn-down timeline never changes again.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::TimelineConfig;
use crate::controller::{PlayState, TimelineController};
use crate::error::{SiteError, SiteResult};

/// Drives a [`TimelineController`] forward on a timer.
#[derive(Debug)]
pub struct TimelinePlayer {
    controller: TimelineController,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl TimelinePlayer {
    /// Creates a paused player that advances `controller` every `period`.
    pub fn new(controller: TimelineController, period: Duration) -> Self {
        Self {
            controller,
            period: period.max(Duration::from_millis(1)),
            task: None,
        }
    }

    /// Creates a paused player using the configured interval.
    pub fn from_config(controller: TimelineController, config: &TimelineConfig) -> Self {
        Self::new(controller, config.play_interval())
    }

    /// The controller this player drives.
    pub fn controller(&self) -> &TimelineController {
        &self.controller
    }

    /// Advance period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` while the advance task is alive.
    ///
    /// The task ends on its own once the controller leaves [`PlayState::Playing`].
    pub fn is_playing(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Flips between paused and playing, returning the new state.
    ///
    /// Starting needs a tokio runtime on the current thread.
    pub fn toggle_play(&mut self) -> SiteResult<PlayState> {
        if self.is_playing() {
            self.pause();
            Ok(PlayState::Paused)
        } else {
            self.play()?;
            Ok(PlayState::Playing)
        }
    }

    /// Starts advancing. Does nothing if already playing.
    pub fn play(&mut self) -> SiteResult<()> {
        if self.is_playing() {
            return Ok(());
        }
        let handle = Handle::try_current().map_err(|_| SiteError::NoRuntime("timeline player"))?;
        self.controller.set_play_state(PlayState::Playing);
        let controller = self.controller.clone();
        let period = self.period;
        self.task = Some(handle.spawn(advance_loop(controller, period)));
        info!(
            year = self.controller.selected_year(),
            period_ms = period.as_millis(),
            "timeline player started"
        );
        Ok(())
    }

    /// Stops advancing and cancels the timer. Does nothing if already paused.
    pub fn pause(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        task.abort();
        self.controller.set_play_state(PlayState::Paused);
        info!(
            year = self.controller.selected_year(),
            "timeline player stopped"
        );
    }
}

impl Drop for TimelinePlayer {
    fn drop(&mut self) {
        self.pause();
    }
}

async fn advance_loop(controller: TimelineController, period: Duration) {
    // Like a browser interval, the first advance happens one period after starting.
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if controller.play_state() != PlayState::Playing {
            break;
        }
        let year = controller.advance();
        debug!(year, "timeline advanced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> TimelinePlayer {
        TimelinePlayer::new(TimelineController::default(), Duration::from_millis(1000))
    }

    #[test]
    fn playing_without_a_runtime_is_an_error() {
        let mut p = player();
        assert!(matches!(p.toggle_play(), Err(SiteError::NoRuntime(_))));
        assert!(!p.is_playing());
        assert_eq!(p.controller().play_state(), PlayState::Paused);
    }

    #[tokio::test(start_paused = true)]
    async fn advances_once_per_period_and_wraps() {
        let mut p = player();
        let c = p.controller().clone();
        assert_eq!(c.selected_year(), 2025);

        assert_eq!(p.toggle_play().unwrap(), PlayState::Playing);
        assert_eq!(c.play_state(), PlayState::Playing);

        // Nothing happens before the first period elapses.
        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(c.selected_year(), 2025);

        // Three periods: 2025 wraps to 2000, then 2002, then 2005.
        time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(c.selected_year(), 2005);

        assert_eq!(p.toggle_play().unwrap(), PlayState::Paused);
        assert_eq!(c.play_state(), PlayState::Paused);
        time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(c.selected_year(), 2005);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_player_cancels_the_timer() {
        let mut p = player();
        let c = p.controller().clone();
        c.select_year(2010);
        p.play().unwrap();
        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(c.selected_year(), 2012);

        drop(p);
        assert_eq!(c.play_state(), PlayState::Paused);
        let mut rx = c.subscribe();
        rx.mark_unchanged();
        time::sleep(Duration::from_millis(10_000)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(c.selected_year(), 2012);
    }

    #[tokio::test(start_paused = true)]
    async fn pausing_through_the_controller_stops_the_player() {
        let mut p = player();
        let c = p.controller().clone();
        c.select_year(2010);
        p.play().unwrap();
        c.set_play_state(PlayState::Paused);
        time::sleep(Duration::from_millis(1500)).await;
        assert!(!p.is_playing(), "the advance task ended at its next tick");
        assert_eq!(c.selected_year(), 2010);

        assert_eq!(p.toggle_play().unwrap(), PlayState::Playing);
        assert_eq!(c.play_state(), PlayState::Playing);
        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(c.selected_year(), 2012);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_selection_while_playing_continues_from_there() {
        let mut p = player();
        let c = p.controller().clone();
        p.play().unwrap();
        p.play().unwrap();
        time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(c.selected_year(), 2000);
        c.select_year(2019);
        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(c.selected_year(), 2020);
    }
}
