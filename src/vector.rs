// --- File: vector.rs ---
use crate::error::{Result, SimError};
use glam::Vec2;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Immutable 2D value type. Every operation returns a new vector.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vector2(Vec2);

impl Vector2 {
    pub const ZERO: Self = Self(Vec2::ZERO);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.0.y
    }

    #[inline]
    pub fn with_x(self, x: f32) -> Self {
        Self(Vec2::new(x, self.0.y))
    }

    #[inline]
    pub fn with_y(self, y: f32) -> Self {
        Self(Vec2::new(self.0.x, y))
    }

    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }

    #[inline]
    pub fn scale(self, k: f32) -> Self {
        Self(self.0 * k)
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        self.0.length()
    }

    /// Unit vector in the same direction. Fails on a zero-length (or
    /// non-finite) vector instead of producing NaN components.
    pub fn normalize(self) -> Result<Self> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Err(SimError::DegenerateGeometry);
        }
        Ok(self.scale(1.0 / magnitude))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        self.0.to_array()
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vector2::add(self, rhs)
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vector2::sub(self, rhs)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_returns_new_values() {
        let a = Vector2::new(3.0, 4.0);
        let b = Vector2::new(1.0, -2.0);
        assert_eq!(a.add(b), Vector2::new(4.0, 2.0));
        assert_eq!(a.sub(b), Vector2::new(2.0, 6.0));
        assert_eq!(a.scale(0.5), Vector2::new(1.5, 2.0));
        assert_eq!(a.magnitude(), 5.0);
        // operands untouched
        assert_eq!(a, Vector2::new(3.0, 4.0));
    }

    #[test]
    fn normalize_has_unit_length() {
        let n = Vector2::new(3.0, 4.0).normalize().unwrap();
        assert!((n.magnitude() - 1.0).abs() < 1e-6);
        assert!((n.x() - 0.6).abs() < 1e-6);
        assert!((n.y() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_is_an_error() {
        assert_eq!(Vector2::ZERO.normalize(), Err(SimError::DegenerateGeometry));
    }
}
