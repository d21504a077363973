//! Clock capability for timestamping observations.
//!
//! Every tracked value is stamped with wall-clock seconds since the Unix
//! epoch at the moment it is assigned. The clock is injected rather than
//! read ad hoc so tests can drive time deterministically:
//! - [`SystemClock`] reads the real wall clock
//! - [`ManualClock`] is set and advanced explicitly

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of wall-clock time in seconds.
pub trait Clock {
    /// Current time as decimal Unix epoch seconds.
    fn now(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        let now = chrono::Utc::now();
        now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1_000_000_000.0
    }
}

/// A settable clock for deterministic tests and replays.
///
/// Clones share the same underlying time, so a test can keep one handle
/// while the tracked state owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock frozen at `start` seconds.
    pub fn new(start: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start.to_bits())),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, secs: f64) {
        self.bits.store(secs.to_bits(), Ordering::SeqCst);
    }

    /// Move the clock forward by `secs`.
    pub fn advance(&self, secs: f64) {
        self.set(self.now() + secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}
