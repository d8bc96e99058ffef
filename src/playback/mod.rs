//! Trace playback
//!
//! [`PlaybackController`] owns a [`Trace`] and a cursor into it. The cursor is
//! `None` until playback starts and otherwise always a valid step index.
//! Automatic playback is driven by a [`Timer`]: the controller arms at most
//! one recurring timer and advances one step per accepted [`tick`].
//!
//! State machine:
//!
//! ```text
//!   Idle ──play──▶ Playing ──tick on last step──▶ Finished
//!                   │   ▲                           │
//!             pause │   │ play                      │ play (restarts at step 0)
//!                   ▼   │                           ▼
//!                  Paused                        Playing
//!
//!   reset, load: any state ──▶ Idle
//! ```
//!
//! Every cursor change is reported to the [`StepRenderer`].
//!
//! [`tick`]: PlaybackController::tick

pub mod timer;

pub use timer::{DeadlineTimer, ManualTimer, Timer, TimerHandle};

use crate::constants::{BASE_DELAY_MS, DEFAULT_SPEED, DELAY_PER_SPEED_MS, MAX_SPEED, MIN_SPEED};
use crate::step::{Step, Trace};
use serde::Serialize;
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing shown yet; cursor is `None`
    Idle,
    Playing,
    Paused,
    /// Cursor rests on the last step
    Finished,
}

/// Receiver of `(current step, cursor, total)` after every cursor change
pub trait StepRenderer {
    fn render(&mut self, step: Option<&Step>, cursor: Option<usize>, total: usize);
}

impl<F> StepRenderer for F
where
    F: FnMut(Option<&Step>, Option<usize>, usize),
{
    fn render(&mut self, step: Option<&Step>, cursor: Option<usize>, total: usize) {
        self(step, cursor, total)
    }
}

/// Inter-tick delay for a speed in `MIN_SPEED..=MAX_SPEED`
pub fn delay_for_speed(speed: u32) -> Duration {
    let speed = speed.clamp(MIN_SPEED, MAX_SPEED) as u64;
    Duration::from_millis(BASE_DELAY_MS - DELAY_PER_SPEED_MS * speed)
}

pub struct PlaybackController<T: Timer, R: StepRenderer> {
    trace: Trace,
    cursor: Option<usize>,
    state: PlaybackState,
    speed: u32,
    timer: T,
    pending: Option<TimerHandle>,
    renderer: R,
}

impl<T: Timer, R: StepRenderer> PlaybackController<T, R> {
    pub fn new(trace: Trace, timer: T, renderer: R) -> Self {
        PlaybackController {
            trace,
            cursor: None,
            state: PlaybackState::Idle,
            speed: DEFAULT_SPEED,
            timer,
            pending: None,
            renderer,
        }
    }

    /// Replace the trace and return to `Idle`
    pub fn load(&mut self, trace: Trace) {
        self.disarm();
        self.trace = trace;
        self.state = PlaybackState::Idle;
        trace!(algorithm = %self.trace.algorithm(), steps = self.trace.len(), "trace loaded");
        self.move_to(None);
    }

    /// Start or resume automatic playback
    ///
    /// From `Finished` playback restarts at the first step. From `Idle` the
    /// first step is shown immediately. A running timer is cancelled before
    /// the new one is armed.
    pub fn play(&mut self) {
        if self.trace.is_empty() {
            return;
        }

        match self.state {
            PlaybackState::Idle | PlaybackState::Finished => self.move_to(Some(0)),
            PlaybackState::Playing | PlaybackState::Paused => {}
        }

        if self.at_end() {
            // Single-step trace: nothing left to play
            self.disarm();
            self.transition(PlaybackState::Finished);
            return;
        }

        self.disarm();
        self.arm();
        self.transition(PlaybackState::Playing);
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.disarm();
        self.transition(PlaybackState::Paused);
    }

    pub fn reset(&mut self) {
        self.disarm();
        self.transition(PlaybackState::Idle);
        self.move_to(None);
    }

    /// Timer callback; returns whether the tick was accepted
    ///
    /// Ticks from a cancelled or replaced timer are ignored.
    pub fn tick(&mut self, handle: TimerHandle) -> bool {
        if self.pending != Some(handle) || self.state != PlaybackState::Playing {
            trace!(handle = handle.0, "ignoring stale tick");
            return false;
        }

        if !self.at_end() {
            let next = self.cursor.map_or(0, |c| c + 1);
            self.move_to(Some(next));
        }
        if self.at_end() {
            self.disarm();
            self.transition(PlaybackState::Finished);
        }
        true
    }

    /// Show the next step; no-op on the last step
    pub fn step_forward(&mut self) {
        let next = match self.cursor {
            None => 0,
            Some(c) if c + 1 < self.trace.len() => c + 1,
            Some(_) => return,
        };
        self.move_to(Some(next));
        self.settle_manual_state();
    }

    /// Show the previous step; no-op on the first step and before playback starts
    pub fn step_backward(&mut self) {
        match self.cursor {
            Some(c) if c > 0 => self.move_to(Some(c - 1)),
            _ => return,
        }
        self.settle_manual_state();
    }

    pub fn jump_to_start(&mut self) {
        if self.cursor == Some(0) {
            return;
        }
        self.move_to(Some(0));
        self.settle_manual_state();
    }

    pub fn jump_to_end(&mut self) {
        let Some(last) = self.trace.len().checked_sub(1) else {
            return;
        };
        if self.cursor == Some(last) {
            return;
        }
        self.move_to(Some(last));
        self.settle_manual_state();
    }

    /// Set the speed, clamped to `MIN_SPEED..=MAX_SPEED`
    ///
    /// A running timer keeps its pending deadline and uses the new delay after
    /// its next tick. The cursor does not move.
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        trace!(speed = self.speed, "speed changed");
        if let Some(handle) = self.pending {
            let delay = self.delay();
            self.timer.set_period(handle, delay);
        }
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Inter-tick delay at the current speed
    pub fn delay(&self) -> Duration {
        delay_for_speed(self.speed)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.trace.len()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.cursor.and_then(|c| self.trace.get(c))
    }

    /// Everything a renderer needs: `(current step, cursor, total)`
    pub fn frame(&self) -> (Option<&Step>, Option<usize>, usize) {
        (self.current_step(), self.cursor, self.total())
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    fn at_end(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 >= self.trace.len())
    }

    fn arm(&mut self) {
        let delay = self.delay();
        let handle = self.timer.arm(delay);
        trace!(handle = handle.0, delay_ms = delay.as_millis() as u64, "timer armed");
        self.pending = Some(handle);
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
            trace!(handle = handle.0, "timer cancelled");
        }
    }

    /// State after a manual move: `Finished` on the last step, otherwise
    /// `Paused` unless the timer is still running
    fn settle_manual_state(&mut self) {
        if self.state == PlaybackState::Playing {
            return;
        }
        let next = if self.at_end() {
            PlaybackState::Finished
        } else {
            PlaybackState::Paused
        };
        self.transition(next);
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            trace!(from = ?self.state, to = ?next, cursor = ?self.cursor, "playback state");
            self.state = next;
        }
    }

    fn move_to(&mut self, cursor: Option<usize>) {
        self.cursor = cursor;
        let (step, cursor, total) = (
            cursor.and_then(|c| self.trace.get(c)),
            self.cursor,
            self.trace.len(),
        );
        self.renderer.render(step, cursor, total);
    }
}
