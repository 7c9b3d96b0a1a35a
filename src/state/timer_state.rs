//! Countdown engine state and transitions
//!
//! `TimerState` is a pure state machine. It knows nothing about clocks;
//! the `RestTimer` controller keeps the clock subscription in step with
//! `is_running()`.
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//! Running --tick reaches target--> Finished
//! any --reset--> Idle
//! ```

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a countdown run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Elapsed time, optional target and run status of one rest timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerState {
    elapsed_seconds: u32,
    target_seconds: Option<NonZeroU32>,
    status: TimerStatus,
}

impl TimerState {
    /// Create an idle timer with no target
    pub fn new() -> Self {
        Self {
            elapsed_seconds: 0,
            target_seconds: None,
            status: TimerStatus::Idle,
        }
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn target_seconds(&self) -> Option<NonZeroU32> {
        self.target_seconds
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Seconds left until the target, if one is set
    pub fn remaining_seconds(&self) -> Option<u32> {
        self.target_seconds
            .map(|target| target.get().saturating_sub(self.elapsed_seconds))
    }

    /// Start or resume counting. Returns `true` if the state changed.
    ///
    /// A finished run stays finished until `reset` or `select_preset`.
    pub fn start(&mut self) -> bool {
        match self.status {
            TimerStatus::Idle | TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                true
            }
            TimerStatus::Running | TimerStatus::Finished => false,
        }
    }

    /// Stop counting, keeping the elapsed time. Returns `true` if the state changed.
    pub fn pause(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.status = TimerStatus::Paused;
        true
    }

    /// Stop and zero the elapsed time. The target is kept.
    pub fn reset(&mut self) -> bool {
        let changed = self.status != TimerStatus::Idle || self.elapsed_seconds != 0;
        self.status = TimerStatus::Idle;
        self.elapsed_seconds = 0;
        changed
    }

    /// Reset, set the target and start, as a single transition
    pub fn select_preset(&mut self, duration: NonZeroU32) {
        self.elapsed_seconds = 0;
        self.target_seconds = Some(duration);
        self.status = TimerStatus::Running;
    }

    /// Advance by one second. Returns `true` if the state changed.
    ///
    /// Reaching the target clamps `elapsed_seconds` to it and finishes the run
    /// on the same transition.
    pub fn on_tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        let next = self.elapsed_seconds.saturating_add(1);
        match self.target_seconds {
            Some(target) if next >= target.get() => {
                self.elapsed_seconds = target.get();
                self.status = TimerStatus::Finished;
            }
            _ => self.elapsed_seconds = next,
        }
        true
    }

    /// Elapsed time as `MM:SS`
    pub fn format_display(&self) -> String {
        format_clock(self.elapsed_seconds)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number of seconds as zero-padded `MM:SS`. Minutes are not capped.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn new_timer_is_idle() {
        let timer = TimerState::new();
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.elapsed_seconds(), 0);
        assert_eq!(timer.target_seconds(), None);
        assert!(!timer.is_running());
    }

    #[test]
    fn start_pause_resume() {
        let mut timer = TimerState::new();
        assert!(timer.start());
        assert!(!timer.start());
        assert_eq!(timer.status(), TimerStatus::Running);

        timer.on_tick();
        assert!(timer.pause());
        assert!(!timer.pause());
        assert_eq!(timer.status(), TimerStatus::Paused);

        assert!(timer.start());
        timer.on_tick();
        assert_eq!(timer.elapsed_seconds(), 2);
    }

    #[test]
    fn counts_up_without_target() {
        let mut timer = TimerState::new();
        timer.start();
        for _ in 0..1000 {
            timer.on_tick();
        }
        assert_eq!(timer.elapsed_seconds(), 1000);
        assert!(timer.is_running());
        assert_eq!(timer.remaining_seconds(), None);
    }

    #[test]
    fn ticks_are_ignored_unless_running() {
        let mut timer = TimerState::new();
        assert!(!timer.on_tick());

        timer.start();
        timer.on_tick();
        timer.pause();
        assert!(!timer.on_tick());
        assert_eq!(timer.elapsed_seconds(), 1);
    }

    #[test]
    fn preset_finishes_exactly_at_target() {
        let mut timer = TimerState::new();
        timer.select_preset(secs(90));
        for _ in 0..89 {
            timer.on_tick();
        }
        assert!(timer.is_running());
        assert_eq!(timer.remaining_seconds(), Some(1));

        timer.on_tick();
        assert_eq!(timer.status(), TimerStatus::Finished);
        assert_eq!(timer.elapsed_seconds(), 90);
        assert!(!timer.is_running());

        // no overshoot after the run ends
        assert!(!timer.on_tick());
        assert_eq!(timer.elapsed_seconds(), 90);
    }

    #[test]
    fn one_second_target_finishes_on_first_tick() {
        let mut timer = TimerState::new();
        timer.select_preset(secs(1));
        timer.on_tick();
        assert_eq!(timer.status(), TimerStatus::Finished);
        assert_eq!(timer.elapsed_seconds(), 1);
    }

    #[test]
    fn finished_run_does_not_restart() {
        let mut timer = TimerState::new();
        timer.select_preset(secs(2));
        timer.on_tick();
        timer.on_tick();
        assert!(!timer.start());
        assert_eq!(timer.status(), TimerStatus::Finished);

        assert!(timer.reset());
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert!(timer.start());
    }

    #[test]
    fn reset_keeps_target_and_is_idempotent() {
        let mut timer = TimerState::new();
        timer.select_preset(secs(60));
        timer.on_tick();

        assert!(timer.reset());
        let once = timer.clone();
        assert!(!timer.reset());
        assert_eq!(timer, once);
        assert_eq!(timer.target_seconds(), Some(secs(60)));
        assert_eq!(timer.elapsed_seconds(), 0);
    }

    #[test]
    fn select_preset_restarts_a_running_timer() {
        let mut timer = TimerState::new();
        timer.start();
        timer.on_tick();
        timer.on_tick();

        timer.select_preset(secs(30));
        assert_eq!(timer.elapsed_seconds(), 0);
        assert_eq!(timer.target_seconds(), Some(secs(30)));
        assert!(timer.is_running());
    }

    #[test]
    fn format_display() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(599), "09:59");
        assert_eq!(format_clock(6000), "100:00");

        let mut timer = TimerState::new();
        timer.start();
        for _ in 0..65 {
            timer.on_tick();
        }
        assert_eq!(timer.format_display(), "01:05");
    }
}
