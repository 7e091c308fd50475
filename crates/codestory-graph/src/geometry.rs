use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// |dx| + |dy|, used for the cheap "has this point moved" check.
    pub fn manhattan_length(self) -> f32 {
        self.x.abs() + self.y.abs()
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or `None` for (near) zero vectors.
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len > 1e-6 {
            Some(Vec2::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Rotated 90 degrees counter-clockwise (in y-down screen space this points
    /// to the left of the direction of travel).
    pub fn perp(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    pub fn midpoint(self, other: Vec2) -> Vec2 {
        Vec2::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Rect {
    fn default() -> Self {
        Self::NOTHING
    }
}

impl Rect {
    /// Create a new rectangle from min and max corners
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a new rectangle from position and size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: Vec2::new(pos.x + size.x, pos.y + size.y),
        }
    }

    /// Smallest rectangle containing both points, in any order
    pub fn from_two_pos(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::from_pos_size(
            Vec2::new(center.x - size.x * 0.5, center.y - size.y * 0.5),
            size,
        )
    }

    /// Bounding box of a point set. `None` when the set is empty.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut rect = Rect::from_min_max(*first, *first);
        for p in rest {
            rect.extend_with(*p);
        }
        Some(rect)
    }

    /// An empty rectangle
    pub const NOTHING: Self = Self {
        min: Vec2 { x: 0.0, y: 0.0 },
        max: Vec2 { x: 0.0, y: 0.0 },
    };

    /// Get the width of the rectangle
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Get the size of the rectangle
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// Get the center of the rectangle
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.min.x + self.width() * 0.5,
            self.min.y + self.height() * 0.5,
        )
    }

    /// Check if the rectangle contains a point
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if this rectangle intersects with another rectangle
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Return a new rectangle expanded by `amount` on all sides
    pub fn expand(&self, amount: f32) -> Rect {
        Rect {
            min: Vec2::new(self.min.x - amount, self.min.y - amount),
            max: Vec2::new(self.max.x + amount, self.max.y + amount),
        }
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn extend_with(&mut self, point: Vec2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::NOTHING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!((a - b).manhattan_length(), 5.0);
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_normalized_zero() {
        assert!(Vec2::ZERO.normalized().is_none());
        let n = Vec2::new(0.0, 5.0).normalized().unwrap();
        assert_eq!(n, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_rect_from_two_pos_any_order() {
        let r = Rect::from_two_pos(Vec2::new(100.0, 10.0), Vec2::new(20.0, 50.0));
        assert_eq!(r.min, Vec2::new(20.0, 10.0));
        assert_eq!(r.max, Vec2::new(100.0, 50.0));
        assert_eq!(r.width(), 80.0);
        assert_eq!(r.height(), 40.0);
    }

    #[test]
    fn test_rect_union_and_contains() {
        let a = Rect::from_pos_size(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::from_pos_size(Vec2::new(20.0, 5.0), Vec2::new(5.0, 20.0));
        let u = a.union(&b);
        assert_eq!(u.min, Vec2::new(0.0, 0.0));
        assert_eq!(u.max, Vec2::new(25.0, 25.0));
        assert!(u.contains(Vec2::new(15.0, 15.0)));
        assert!(!a.contains(Vec2::new(15.0, 15.0)));
    }

    #[test]
    fn test_rect_from_points() {
        assert!(Rect::from_points(&[]).is_none());
        let r = Rect::from_points(&[
            Vec2::new(1.0, 5.0),
            Vec2::new(-3.0, 2.0),
            Vec2::new(4.0, -1.0),
        ])
        .unwrap();
        assert_eq!(r.min, Vec2::new(-3.0, -1.0));
        assert_eq!(r.max, Vec2::new(4.0, 5.0));
    }

    #[test]
    fn test_center_size() {
        let r = Rect::from_center_size(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert_eq!(r.min, Vec2::new(0.0, 0.0));
        assert_eq!(r.max, Vec2::new(20.0, 20.0));
        assert!(Rect::NOTHING.is_zero());
    }
}
