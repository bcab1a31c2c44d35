//! Step simulations
//!
//! Each engine is a self-contained state machine advanced one tick at a time.
//! Engines never share state; the terminal widgets own one engine each.

pub mod flock;
pub mod life;
pub mod mines;
pub mod noise;
pub mod snake;
pub mod sort;

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

/// Field or grid size handed to an engine once, at initialization
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: usize,
    pub height: usize,
}

impl Bounds {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
}

/// Terminal state of a game. Losing and winning are values, not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Running,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::Running
    }
}

/// RNG for a widget: seeded when asked, otherwise from the clock
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    StdRng::seed_from_u64(seed)
}

/// Fixed-period tick scheduler.
///
/// `poll` fires at most once per call and schedules the next tick relative to
/// the moment it fired, so a loop that stalls never replays a burst of queued
/// steps. A stopped ticker never fires; `start` always waits one full period.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Change the period. A running ticker restarts from `now`.
    pub fn set_period(&mut self, period: Duration, now: Instant) {
        self.period = period;
        if self.next.is_some() {
            self.next = Some(now + period);
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Returns true when a step is due, and re-arms for one period later.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(due) if now >= due => {
                self.next = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    /// Time left before the next tick, `None` while stopped
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next.map(|due| due.saturating_duration_since(now))
    }
}
