//! Ballbot Kinematics
//!
//! Derives velocity and acceleration of a tracked object from a stream of
//! observed positions by discrete numerical differentiation:
//!
//! - [`Vector2D`]: immutable 2-D value with arithmetic
//! - [`TimestampedValue`]: a value plus the wall-clock time it was set
//! - [`TrackedQuantity`]: current and previous samples, `differentiate()`
//! - [`KinematicState`]: position → velocity → acceleration cascade
//!
//! Everything here is synchronous and O(1) per update. Time comes from an
//! injected [`ballbot_common::Clock`].

pub mod state;
pub mod timed;
pub mod tracked;
pub mod vector;

pub use state::{KinematicSnapshot, KinematicState};
pub use timed::TimestampedValue;
pub use tracked::{AdditiveIdentity, Differentiable, TrackedQuantity};
pub use vector::{Operand, Vector2D};
