//! Values stamped with the wall-clock time they were assigned.

use ballbot_common::clock::Clock;
use serde::{Deserialize, Serialize};

/// A value together with the moment it was set.
///
/// The value and its timestamp are only ever written together, so a reader
/// can never see a timestamp that belongs to a different assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimestampedValue<V> {
    value: V,
    /// Decimal Unix epoch seconds.
    timestamp: f64,
}

impl<V> TimestampedValue<V> {
    /// Capture `value` stamped with `clock.now()`.
    pub fn new(value: V, clock: &impl Clock) -> Self {
        Self::at(value, clock.now())
    }

    /// Wrap a value with an explicit timestamp (replays, tests).
    pub fn at(value: V, timestamp: f64) -> Self {
        Self { value, timestamp }
    }

    /// Replace value and timestamp as one unit.
    pub fn set(&mut self, value: V, clock: &impl Clock) {
        *self = Self::new(value, clock);
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn into_value(self) -> V {
        self.value
    }
}
