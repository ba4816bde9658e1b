use chrono::{DateTime, Duration, Utc};

use crate::model::QuizDuration;

/// Remaining time below which the countdown is shown as urgent.
pub const URGENT_THRESHOLD_SECS: u32 = 60;

/// Result of a single countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Time is left; carries the whole seconds remaining.
    Running { remaining_secs: u32 },
    /// The deadline passed on this tick. Reported once.
    Expired,
    /// The countdown already expired or was stopped.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Running,
    Expired,
    Stopped,
}

/// Wall-clock countdown for a quiz session.
///
/// Remaining time is always derived from the absolute deadline, so a late or
/// skipped tick never makes the countdown drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizTimer {
    deadline: DateTime<Utc>,
    remaining_secs: u32,
    state: TimerState,
}

impl QuizTimer {
    #[must_use]
    pub fn start(started_at: DateTime<Utc>, duration: QuizDuration) -> Self {
        let total = duration.total_secs();
        Self {
            deadline: started_at + Duration::seconds(i64::from(total)),
            remaining_secs: total,
            state: TimerState::Running,
        }
    }

    #[must_use]
    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Remaining seconds as of the last tick.
    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    #[must_use]
    pub fn is_urgent(&self) -> bool {
        is_urgent(self.remaining_secs)
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> TimerTick {
        if self.state != TimerState::Running {
            return TimerTick::Stopped;
        }
        self.remaining_secs = secs_until(self.deadline, now);
        if self.remaining_secs == 0 {
            self.state = TimerState::Expired;
            return TimerTick::Expired;
        }
        TimerTick::Running {
            remaining_secs: self.remaining_secs,
        }
    }

    pub fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
        }
    }
}

/// Whole seconds from `now` until `deadline`, rounded up and never negative.
#[must_use]
pub fn secs_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let millis = (deadline - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    u32::try_from((millis + 999) / 1000).unwrap_or(u32::MAX)
}

/// Render seconds as `m:ss`.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}

#[must_use]
pub fn is_urgent(remaining_secs: u32) -> bool {
    remaining_secs < URGENT_THRESHOLD_SECS
}
