//! Two-dimensional vector arithmetic.
//!
//! [`Vector2D`] is a plain `Copy` value. Arithmetic never mutates; every
//! operation returns a new vector. Addition, subtraction, and multiplication
//! accept either another vector (component-wise) or a scalar (broadcast to
//! both components), expressed by [`Operand`].
//!
//! Division is the only fallible operation: a zero divisor component is
//! reported as [`BallbotError::Division`] instead of producing infinity or
//! NaN. For that reason there is no `Div` operator impl; use
//! [`Vector2D::divide`].

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use ballbot_common::error::{BallbotError, BallbotResult};
use serde::{Deserialize, Serialize};

/// An immutable 2-D vector. Ordering is lexicographic with `x` first.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

/// Right-hand side of a vector operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    /// Applied to both components.
    Scalar(f64),
    /// Applied component-wise.
    Vector(Vector2D),
}

impl Operand {
    fn components(self) -> (f64, f64) {
        match self {
            Operand::Scalar(s) => (s, s),
            Operand::Vector(v) => (v.x, v.y),
        }
    }
}

impl From<f64> for Operand {
    fn from(s: f64) -> Self {
        Operand::Scalar(s)
    }
}

impl From<i32> for Operand {
    fn from(s: i32) -> Self {
        Operand::Scalar(f64::from(s))
    }
}

impl From<Vector2D> for Operand {
    fn from(v: Vector2D) -> Self {
        Operand::Vector(v)
    }
}

impl Vector2D {
    /// The additive identity.
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn zip_with(self, rhs: Operand, f: impl Fn(f64, f64) -> f64) -> Self {
        let (rx, ry) = rhs.components();
        Self::new(f(self.x, rx), f(self.y, ry))
    }

    /// `self + rhs`.
    pub fn add(self, rhs: impl Into<Operand>) -> Self {
        self.zip_with(rhs.into(), |a, b| a + b)
    }

    /// `self - rhs`.
    pub fn subtract(self, rhs: impl Into<Operand>) -> Self {
        self.zip_with(rhs.into(), |a, b| a - b)
    }

    /// `lhs - self`, e.g. `8 - Vector2D(2, 2) == Vector2D(6, 6)`.
    pub fn reverse_subtract(self, lhs: impl Into<Operand>) -> Self {
        self.zip_with(lhs.into(), |a, b| b - a)
    }

    /// `self * rhs`, component-wise for a vector operand.
    pub fn multiply(self, rhs: impl Into<Operand>) -> Self {
        self.zip_with(rhs.into(), |a, b| a * b)
    }

    /// Multiply both components by `s`.
    pub fn scale(self, s: f64) -> Self {
        self.multiply(s)
    }

    /// `self / rhs`, component-wise for a vector operand.
    ///
    /// Fails with [`BallbotError::Division`] if any divisor component is
    /// exactly zero. `self` is unaffected either way.
    pub fn divide(self, rhs: impl Into<Operand>) -> BallbotResult<Self> {
        let rhs = rhs.into();
        let (dx, dy) = rhs.components();
        if dx == 0.0 || dy == 0.0 {
            return Err(BallbotError::division(match rhs {
                Operand::Scalar(_) => format!("cannot divide {self} by zero"),
                Operand::Vector(v) => format!("cannot divide {self} by {v}: zero component"),
            }));
        }
        Ok(self.zip_with(rhs, |a, b| a / b))
    }

    pub fn negate(self) -> Self {
        Self::new(-self.x, -self.y)
    }

    /// Euclidean length.
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Vector2D) -> f64 {
        (*self - *other).magnitude()
    }

    /// Component-wise comparison within an absolute tolerance.
    pub fn approx_eq(&self, other: &Vector2D, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }

    fn is_integral(&self) -> bool {
        [self.x, self.y]
            .iter()
            .all(|c| c.is_finite() && c.fract() == 0.0)
    }
}

impl From<(f64, f64)> for Vector2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for Vector2D {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}

/// Integral vectors render without decimals, anything else with two.
impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `+ 0.0` folds negative zero so it never renders as "-0"
        let (x, y) = (self.x + 0.0, self.y + 0.0);
        if self.is_integral() {
            write!(f, "Vector2D(x={x:.0}, y={y:.0})")
        } else {
            write!(f, "Vector2D(x={x:.2}, y={y:.2})")
        }
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::add(self, rhs)
    }
}

impl Add<f64> for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: f64) -> Vector2D {
        Vector2D::add(self, rhs)
    }
}

impl Add<Vector2D> for f64 {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        rhs.add(self)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        self.subtract(rhs)
    }
}

impl Sub<f64> for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: f64) -> Vector2D {
        self.subtract(rhs)
    }
}

impl Sub<Vector2D> for f64 {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        rhs.reverse_subtract(self)
    }
}

impl Mul for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: Vector2D) -> Vector2D {
        self.multiply(rhs)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        self.scale(rhs)
    }
}

impl Mul<Vector2D> for f64 {
    type Output = Vector2D;

    fn mul(self, rhs: Vector2D) -> Vector2D {
        rhs.scale(self)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        self.negate()
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Vector2D) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Vector2D) {
        *self = *self - rhs;
    }
}

impl Sum for Vector2D {
    fn sum<I: Iterator<Item = Vector2D>>(iter: I) -> Self {
        iter.fold(Vector2D::ZERO, |acc, v| acc + v)
    }
}

impl<'a> Sum<&'a Vector2D> for Vector2D {
    fn sum<I: Iterator<Item = &'a Vector2D>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
