use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Ticks for a full recording window; the first tick fires immediately
pub const RECORDING_TICKS: i64 = 601;

/// One-second tick source counting down from a fixed total
///
/// Each tick applies `step` to the tracked value and yields the result until
/// it reaches zero. Dropping the countdown releases its timer.
pub struct Countdown<F = fn(i64) -> i64> {
    remaining: i64,
    step: F,
    ticker: Interval,
}

fn decrement(n: i64) -> i64 {
    n - 1
}

impl Countdown {
    /// Count down by one per second from `total`
    pub fn new(total: i64) -> Self {
        Self::with_step(total, decrement)
    }
}

impl<F: FnMut(i64) -> i64> Countdown<F> {
    pub fn with_step(total: i64, step: F) -> Self {
        Self::with_period(total, step, Duration::from_secs(1))
    }

    pub fn with_period(total: i64, step: F, period: Duration) -> Self {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            remaining: total,
            step,
            ticker,
        }
    }

    /// Wait for the next tick; `None` once the count has run out
    pub async fn tick(&mut self) -> Option<i64> {
        if self.remaining <= 0 {
            return None;
        }
        self.ticker.tick().await;
        self.remaining = (self.step)(self.remaining);
        (self.remaining > 0).then_some(self.remaining)
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }
}

/// Chat reminder due at `remaining` seconds, if any
pub fn reminder_for(remaining: i64) -> Option<String> {
    if remaining <= 0 {
        return None;
    }
    if remaining % 60 == 0 {
        let minutes = remaining / 60;
        let unit = if minutes == 1 { "minute" } else { "minutes" };
        return Some(format!("Recording stops in {minutes} {unit}"));
    }
    if remaining <= 30 && remaining % 10 == 0 {
        return Some(format!("Recording stops in {remaining} seconds"));
    }
    None
}
