use ballbot_common::clock::ManualClock;
use ballbot_kinematics::{TimestampedValue, TrackedQuantity, Vector2D};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-6;

fn vector() -> impl Strategy<Value = Vector2D> {
    (-1.0e4..1.0e4_f64, -1.0e4..1.0e4_f64).prop_map(|(x, y)| Vector2D::new(x, y))
}

fn nonzero_scalar() -> impl Strategy<Value = f64> {
    prop_oneof![-1.0e3..-1.0e-3_f64, 1.0e-3..1.0e3_f64]
}

proptest! {
    #[test]
    fn add_then_subtract_is_identity(a in vector(), b in vector()) {
        prop_assert!((a + b - b).approx_eq(&a, TOLERANCE));
    }

    #[test]
    fn scale_then_divide_is_identity(a in vector(), s in nonzero_scalar()) {
        let back = (a * s).divide(s).unwrap();
        prop_assert!(back.approx_eq(&a, TOLERANCE));
    }

    #[test]
    fn reverse_subtract_matches_negated_subtract(a in vector(), s in -1.0e4..1.0e4_f64) {
        prop_assert_eq!(s - a, -(a - s));
    }

    #[test]
    fn timestamped_value_roundtrip(a in vector(), t in 0.0..2.0e9_f64) {
        let clock = ManualClock::new(t);
        let stamped = TimestampedValue::new(a, &clock);
        prop_assert_eq!(*stamped.value(), a);
        prop_assert_eq!(stamped.timestamp(), t);
    }

    #[test]
    fn first_assignment_is_identity(a in vector(), t in 0.0..2.0e9_f64) {
        let quantity = TrackedQuantity::with_value(a, &ManualClock::new(t));
        prop_assert_eq!(quantity.differentiate().unwrap(), Vector2D::ZERO);
    }

    #[test]
    fn second_assignment_is_difference_quotient(
        v0 in vector(),
        v1 in vector(),
        t0 in 0.0..1.0e4_f64,
        dt in 1.0e-2..1.0e2_f64,
    ) {
        let clock = ManualClock::new(t0);
        let mut quantity = TrackedQuantity::with_value(v0, &clock);
        clock.set(t0 + dt);
        quantity.set(v1, &clock);

        let t1 = t0 + dt;
        let expected = (v1 - v0).divide(t1 - t0).unwrap();
        prop_assert!(quantity.differentiate().unwrap().approx_eq(&expected, TOLERANCE));
    }
}
