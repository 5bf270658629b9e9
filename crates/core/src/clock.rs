// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Time sources for record timestamps.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

/// Trait for obtaining the current wall-clock time.
///
/// Allows injection of a controllable clock in tests.
pub trait Clock: Send + Sync {
    /// Returns the current time, truncated to millisecond precision.
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation backed by `Utc::now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        truncate_millis(Utc::now())
    }
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (*self).now()
    }
}

/// Drops sub-millisecond precision so timestamps survive a trip through
/// their serialized form unchanged.
pub fn truncate_millis(t: DateTime<Utc>) -> DateTime<Utc> {
    t.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(t)
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
