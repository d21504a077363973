//! Position, velocity, and acceleration of one tracked object.
//!
//! A [`KinematicState`] is fed one observed position per tick. Each update
//! cascades: velocity is differentiated from the position series, then
//! acceleration from the freshly updated velocity series. All three samples
//! of a tick share a single clock reading.

use std::fmt;

use ballbot_common::clock::{Clock, SystemClock};
use ballbot_common::error::BallbotResult;
use serde::{Deserialize, Serialize};

use crate::timed::TimestampedValue;
use crate::tracked::TrackedQuantity;
use crate::vector::Vector2D;

/// The kinematics of a single tracked object.
#[derive(Debug, Clone)]
pub struct KinematicState<C = SystemClock> {
    position: TrackedQuantity<Vector2D>,
    /// units/sec
    velocity: TrackedQuantity<Vector2D>,
    /// units/sec²
    acceleration: TrackedQuantity<Vector2D>,
    clock: C,
}

/// A point-in-time readout of a [`KinematicState`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicSnapshot {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    /// Decimal Unix epoch seconds of the last update.
    pub timestamp: f64,
}

impl KinematicState<SystemClock> {
    /// Start tracking at `initial` using the real wall clock.
    pub fn with_system_clock(initial: Vector2D) -> Self {
        Self::new(initial, SystemClock)
    }
}

impl<C: Clock> KinematicState<C> {
    /// Start tracking at `initial`.
    ///
    /// With no history, velocity and acceleration start at zero.
    pub fn new(initial: Vector2D, clock: C) -> Self {
        let now = clock.now();
        let mut state = Self {
            position: TrackedQuantity::new(),
            velocity: TrackedQuantity::new(),
            acceleration: TrackedQuantity::new(),
            clock,
        };
        state.position.push(TimestampedValue::at(initial, now));
        state.velocity.push(TimestampedValue::at(Vector2D::ZERO, now));
        state.acceleration.push(TimestampedValue::at(Vector2D::ZERO, now));
        state
    }

    /// Feed a newly observed position and cascade the derivatives.
    ///
    /// The whole cascade is computed before anything is stored. If any step
    /// fails (two updates stamped with the same time) the error is returned
    /// and the state is left exactly as it was.
    pub fn set_position(&mut self, position: Vector2D) -> BallbotResult<()> {
        let now = self.clock.now();

        let position = TimestampedValue::at(position, now);
        let velocity = TimestampedValue::at(self.position.rate_to(&position)?, now);
        let acceleration = TimestampedValue::at(self.velocity.rate_to(&velocity)?, now);

        self.position.push(position);
        self.velocity.push(velocity);
        self.acceleration.push(acceleration);

        tracing::trace!("{}", self);
        Ok(())
    }

    pub fn position(&self) -> Vector2D {
        latest(&self.position)
    }

    pub fn velocity(&self) -> Vector2D {
        latest(&self.velocity)
    }

    pub fn acceleration(&self) -> Vector2D {
        latest(&self.acceleration)
    }

    /// Timestamp of the most recent update (or of construction).
    pub fn last_update(&self) -> f64 {
        self.position.timestamp().unwrap_or_default()
    }

    pub fn snapshot(&self) -> KinematicSnapshot {
        KinematicSnapshot {
            position: self.position(),
            velocity: self.velocity(),
            acceleration: self.acceleration(),
            timestamp: self.last_update(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

fn latest(quantity: &TrackedQuantity<Vector2D>) -> Vector2D {
    quantity.get().copied().unwrap_or(Vector2D::ZERO)
}

impl<C: Clock> fmt::Display for KinematicState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

impl fmt::Display for KinematicSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position: {} | velocity: {} | acceleration: {}",
            self.position, self.velocity, self.acceleration
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballbot_common::clock::ManualClock;
    use ballbot_common::error::BallbotError;

    #[test]
    fn test_new_state_is_at_rest() {
        let state = KinematicState::new(Vector2D::new(15.0, 15.0), ManualClock::new(0.0));
        assert_eq!(state.position(), Vector2D::new(15.0, 15.0));
        assert_eq!(state.velocity(), Vector2D::ZERO);
        assert_eq!(state.acceleration(), Vector2D::ZERO);
    }

    #[test]
    fn test_single_update_cascades() {
        let clock = ManualClock::new(0.0);
        let mut state = KinematicState::new(Vector2D::new(0.0, 0.0), clock.clone());

        clock.set(0.5);
        state.set_position(Vector2D::new(2.0, 1.0)).unwrap();

        assert_eq!(state.position(), Vector2D::new(2.0, 1.0));
        assert_eq!(state.velocity(), Vector2D::new(4.0, 2.0));
        // from rest to (4, 2) in half a second
        assert_eq!(state.acceleration(), Vector2D::new(8.0, 4.0));
        assert_eq!(state.last_update(), 0.5);
    }

    #[test]
    fn test_zero_time_delta_leaves_state_untouched() {
        let clock = ManualClock::new(3.0);
        let mut state = KinematicState::new(Vector2D::new(1.0, 1.0), clock.clone());
        clock.set(4.0);
        state.set_position(Vector2D::new(2.0, 2.0)).unwrap();
        let before = state.snapshot();

        let result = state.set_position(Vector2D::new(9.0, 9.0));

        assert!(matches!(result, Err(BallbotError::Division { .. })));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_display_line() {
        let clock = ManualClock::new(0.0);
        let mut state = KinematicState::new(Vector2D::new(10.0, 10.0), clock.clone());
        assert_eq!(
            state.to_string(),
            "position: Vector2D(x=10, y=10) | velocity: Vector2D(x=0, y=0) | acceleration: Vector2D(x=0, y=0)"
        );

        clock.set(0.3);
        state.set_position(Vector2D::new(11.0, 10.0)).unwrap();
        assert_eq!(
            state.to_string(),
            "position: Vector2D(x=11, y=10) | velocity: Vector2D(x=3.33, y=0.00) | acceleration: Vector2D(x=11.11, y=0.00)"
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = KinematicState::new(Vector2D::new(1.0, 2.0), ManualClock::new(8.0));
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["position"]["x"], 1.0);
        assert_eq!(json["timestamp"], 8.0);
    }

    #[test]
    fn test_system_clock_state() {
        let state = KinematicState::with_system_clock(Vector2D::ZERO);
        assert!(state.last_update() > 0.0);
    }
}
