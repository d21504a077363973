//! Change tracking and discrete differentiation.
//!
//! A [`TrackedQuantity`] remembers its latest sample and the one before it.
//! `differentiate()` turns those two samples into a rate of change per
//! second:
//!
//! ```text
//! (current.value - previous.value) / (current.timestamp - previous.timestamp)
//! ```
//!
//! Until there are two samples the rate is the additive identity of the
//! value type. Which types can be differentiated is decided by the
//! [`Differentiable`] trait, so asking for the derivative of a type with no
//! known identity is a compile error rather than a runtime one.

use ballbot_common::clock::Clock;
use ballbot_common::error::{BallbotError, BallbotResult};
use serde::{Deserialize, Serialize};

use crate::timed::TimestampedValue;
use crate::vector::Vector2D;

/// The zero-like value of a type under addition.
pub trait AdditiveIdentity {
    fn additive_identity() -> Self;
}

/// A value type whose change over time can be expressed in the same type.
pub trait Differentiable: AdditiveIdentity + Copy {
    /// `(self - earlier) / dt`. Callers guarantee `dt != 0`.
    fn rate_of_change(self, earlier: Self, dt: f64) -> BallbotResult<Self>;
}

impl AdditiveIdentity for i32 {
    fn additive_identity() -> Self {
        0
    }
}

impl AdditiveIdentity for i64 {
    fn additive_identity() -> Self {
        0
    }
}

impl AdditiveIdentity for f32 {
    fn additive_identity() -> Self {
        0.0
    }
}

impl AdditiveIdentity for f64 {
    fn additive_identity() -> Self {
        0.0
    }
}

impl AdditiveIdentity for Vector2D {
    fn additive_identity() -> Self {
        Vector2D::ZERO
    }
}

impl Differentiable for f32 {
    fn rate_of_change(self, earlier: Self, dt: f64) -> BallbotResult<Self> {
        Ok((self - earlier) / dt as f32)
    }
}

impl Differentiable for f64 {
    fn rate_of_change(self, earlier: Self, dt: f64) -> BallbotResult<Self> {
        Ok((self - earlier) / dt)
    }
}

impl Differentiable for Vector2D {
    fn rate_of_change(self, earlier: Self, dt: f64) -> BallbotResult<Self> {
        (self - earlier).divide(dt)
    }
}

/// The latest and the immediately previous timed value of a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedQuantity<V> {
    current: Option<TimestampedValue<V>>,
    previous: Option<TimestampedValue<V>>,
}

impl<V> Default for TrackedQuantity<V> {
    fn default() -> Self {
        Self {
            current: None,
            previous: None,
        }
    }
}

impl<V> TrackedQuantity<V> {
    /// An empty quantity with no samples.
    pub fn new() -> Self {
        Self::default()
    }

    /// A quantity holding one sample stamped with `clock.now()`.
    pub fn with_value(value: V, clock: &impl Clock) -> Self {
        let mut quantity = Self::new();
        quantity.set(value, clock);
        quantity
    }

    /// Record a new value stamped with `clock.now()`.
    pub fn set(&mut self, value: V, clock: &impl Clock) {
        self.push(TimestampedValue::new(value, clock));
    }

    /// Record an already-stamped sample; the old current becomes previous.
    pub fn push(&mut self, sample: TimestampedValue<V>) {
        self.previous = self.current.replace(sample);
    }

    /// Latest value, `None` if never set.
    pub fn get(&self) -> Option<&V> {
        self.current.as_ref().map(TimestampedValue::value)
    }

    pub fn timestamp(&self) -> Option<f64> {
        self.current.as_ref().map(TimestampedValue::timestamp)
    }

    pub fn previous(&self) -> Option<&V> {
        self.previous.as_ref().map(TimestampedValue::value)
    }

    pub fn previous_timestamp(&self) -> Option<f64> {
        self.previous.as_ref().map(TimestampedValue::timestamp)
    }

    pub fn current_sample(&self) -> Option<&TimestampedValue<V>> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

impl<V: Differentiable> TrackedQuantity<V> {
    /// Rate of change between the previous and current sample, per second.
    ///
    /// Returns the additive identity while there is no previous sample, and
    /// [`BallbotError::Division`] if both samples carry the same timestamp.
    pub fn differentiate(&self) -> BallbotResult<V> {
        match (&self.previous, &self.current) {
            (Some(earlier), Some(later)) => rate_between(earlier, later),
            _ => Ok(V::additive_identity()),
        }
    }

    /// The value `differentiate()` would return after pushing `next`,
    /// computed without modifying `self`.
    pub fn rate_to(&self, next: &TimestampedValue<V>) -> BallbotResult<V> {
        match &self.current {
            Some(current) => rate_between(current, next),
            None => Ok(V::additive_identity()),
        }
    }
}

fn rate_between<V: Differentiable>(
    earlier: &TimestampedValue<V>,
    later: &TimestampedValue<V>,
) -> BallbotResult<V> {
    let dt = later.timestamp() - earlier.timestamp();
    if dt == 0.0 {
        return Err(BallbotError::division(format!(
            "zero time delta between samples stamped at {:.6}s",
            later.timestamp()
        )));
    }
    later.value().rate_of_change(*earlier.value(), dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballbot_common::clock::ManualClock;

    #[test]
    fn test_empty_quantity() {
        let quantity: TrackedQuantity<f64> = TrackedQuantity::new();
        assert!(quantity.is_empty());
        assert_eq!(quantity.get(), None);
        assert_eq!(quantity.timestamp(), None);
        assert_eq!(quantity.differentiate().unwrap(), 0.0);
    }

    #[test]
    fn test_first_assignment_differentiates_to_identity() {
        let clock = ManualClock::new(100.0);
        let quantity = TrackedQuantity::with_value(Vector2D::new(42.0, -7.0), &clock);
        assert_eq!(quantity.previous(), None);
        assert_eq!(quantity.differentiate().unwrap(), Vector2D::ZERO);

        let scalar = TrackedQuantity::with_value(9.5_f32, &clock);
        assert_eq!(scalar.differentiate().unwrap(), 0.0);
    }

    #[test]
    fn test_set_shifts_current_into_previous() {
        let clock = ManualClock::new(1.0);
        let mut quantity = TrackedQuantity::with_value(1.0_f64, &clock);
        clock.set(2.0);
        quantity.set(5.0, &clock);

        assert_eq!(quantity.get(), Some(&5.0));
        assert_eq!(quantity.timestamp(), Some(2.0));
        assert_eq!(quantity.previous(), Some(&1.0));
        assert_eq!(quantity.previous_timestamp(), Some(1.0));
    }

    #[test]
    fn test_second_assignment_differentiates() {
        let clock = ManualClock::new(10.0);
        let mut quantity = TrackedQuantity::with_value(Vector2D::new(10.0, 20.0), &clock);
        clock.set(10.5);
        quantity.set(Vector2D::new(12.0, 17.0), &clock);

        let rate = quantity.differentiate().unwrap();
        assert!(rate.approx_eq(&Vector2D::new(4.0, -6.0), 1e-9));
    }

    #[test]
    fn test_only_latest_two_samples_matter() {
        let mut quantity = TrackedQuantity::new();
        quantity.push(TimestampedValue::at(0.0_f64, 0.0));
        quantity.push(TimestampedValue::at(100.0, 1.0));
        quantity.push(TimestampedValue::at(103.0, 2.0));
        assert_eq!(quantity.differentiate().unwrap(), 3.0);
    }

    #[test]
    fn test_zero_time_delta_is_division_error() {
        let clock = ManualClock::new(5.0);
        let mut quantity = TrackedQuantity::with_value(Vector2D::new(1.0, 1.0), &clock);
        quantity.set(Vector2D::new(2.0, 2.0), &clock);

        assert!(matches!(
            quantity.differentiate(),
            Err(BallbotError::Division { .. })
        ));

        let mut scalar = TrackedQuantity::with_value(1.0_f64, &clock);
        scalar.set(1.0, &clock);
        assert!(matches!(
            scalar.differentiate(),
            Err(BallbotError::Division { .. })
        ));
    }

    #[test]
    fn test_rate_to_does_not_mutate() {
        let mut quantity = TrackedQuantity::new();
        let next = TimestampedValue::at(6.0_f64, 3.0);
        assert_eq!(quantity.rate_to(&next).unwrap(), 0.0);

        quantity.push(TimestampedValue::at(0.0, 1.0));
        let before = quantity.clone();
        assert_eq!(quantity.rate_to(&next).unwrap(), 3.0);
        assert_eq!(quantity, before);

        let same_time = TimestampedValue::at(1.0, 1.0);
        assert!(quantity.rate_to(&same_time).is_err());
        assert_eq!(quantity, before);
    }

    #[test]
    fn test_additive_identities() {
        assert_eq!(i32::additive_identity(), 0);
        assert_eq!(i64::additive_identity(), 0);
        assert_eq!(f64::additive_identity(), 0.0);
        assert_eq!(Vector2D::additive_identity(), Vector2D::ZERO);
    }
}
