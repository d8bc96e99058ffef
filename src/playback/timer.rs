//! Timers driving automatic playback
//!
//! The controller never sleeps or spawns threads. It asks a [`Timer`] to arm a
//! recurring period and later receives `tick(handle)` calls from whoever owns
//! the clock. [`DeadlineTimer`] is the polling implementation used by the
//! terminal event loop; [`ManualTimer`] records arm/cancel requests and lets
//! the caller fire ticks by hand.

use std::time::{Duration, Instant};

/// Identity of one armed timer; each `arm` call returns a new handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

pub trait Timer {
    /// Start a recurring timer firing every `period`
    fn arm(&mut self, period: Duration) -> TimerHandle;

    /// Stop the timer. Cancelling an unknown or already cancelled handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);

    /// Change the period of an armed timer
    ///
    /// The pending deadline is kept; the new period applies from the next
    /// fire on. Unknown handles are ignored.
    fn set_period(&mut self, handle: TimerHandle, period: Duration);
}

/// Recurring deadline checked by polling
///
/// Holds at most one armed timer. Arming again replaces the previous one.
#[derive(Debug, Default)]
pub struct DeadlineTimer {
    next_id: u64,
    armed: Option<Armed>,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    handle: TimerHandle,
    period: Duration,
    due: Instant,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the timer if its deadline has passed at `now`
    ///
    /// Firing schedules the next deadline one period after `now`, so a late
    /// poll never produces a burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> Option<TimerHandle> {
        let armed = self.armed.as_mut()?;
        if now < armed.due {
            return None;
        }
        armed.due = now + armed.period;
        Some(armed.handle)
    }

    /// Time left until the next deadline, `None` when nothing is armed
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.armed
            .as_ref()
            .map(|armed| armed.due.saturating_duration_since(now))
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

impl Timer for DeadlineTimer {
    fn arm(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.armed = Some(Armed {
            handle,
            period,
            due: Instant::now() + period,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.armed.is_some_and(|armed| armed.handle == handle) {
            self.armed = None;
        }
    }

    fn set_period(&mut self, handle: TimerHandle, period: Duration) {
        if let Some(armed) = self.armed.as_mut().filter(|armed| armed.handle == handle) {
            armed.period = period;
        }
    }
}

/// Timer that only records requests; ticks are fired by the owner
#[derive(Debug, Default)]
pub struct ManualTimer {
    next_id: u64,
    active: Vec<(TimerHandle, Duration)>,
    armed_total: usize,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles armed and not yet cancelled
    pub fn active(&self) -> Vec<TimerHandle> {
        self.active.iter().map(|(handle, _)| *handle).collect()
    }

    /// Period of an active handle
    pub fn period(&self, handle: TimerHandle) -> Option<Duration> {
        self.active
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, period)| *period)
    }

    /// Number of `arm` calls so far
    pub fn armed_total(&self) -> usize {
        self.armed_total
    }
}

impl Timer for ManualTimer {
    fn arm(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        self.armed_total += 1;
        let handle = TimerHandle(self.next_id);
        self.active.push((handle, period));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.active.retain(|(h, _)| *h != handle);
    }

    fn set_period(&mut self, handle: TimerHandle, period: Duration) {
        for (h, current) in self.active.iter_mut() {
            if *h == handle {
                *current = period;
            }
        }
    }
}
