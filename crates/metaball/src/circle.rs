use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector of `length` pointing along `radians`.
    pub fn polar(radians: f32, length: f32) -> Self {
        Self::new(radians.cos() * length, radians.sin() * length)
    }

    pub fn offset(self, by: Point) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }

    pub fn delta_to(self, other: Point) -> Self {
        Self::new(other.x - self.x, other.y - self.y)
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// A dot on screen. A radius of zero is a valid, invisible circle, as is one
/// whose center is not finite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn distance_to(&self, other: &Circle) -> f32 {
        self.center().delta_to(other.center()).length()
    }

    /// Absolute point on the circle's edge, or at `radius` from its center.
    pub fn point_at(&self, radians: f32, radius: f32) -> Point {
        self.center().offset(Point::polar(radians, radius))
    }

    pub fn is_visible(&self) -> bool {
        self.radius > 0.0 && self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_symmetric() {
        let a = Circle::new(0.0, 0.0, 1.0);
        let b = Circle::new(3.0, 4.0, 2.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_zero_radius_is_invisible() {
        assert!(!Circle::new(1.0, 1.0, 0.0).is_visible());
        assert!(!Circle::new(1.0, 1.0, -2.0).is_visible());
        assert!(Circle::new(1.0, 1.0, 0.5).is_visible());
    }

    #[test]
    fn test_non_finite_center_is_invisible() {
        assert!(!Circle::new(f32::NAN, 1.0, 4.0).is_visible());
        assert!(!Circle::new(1.0, f32::INFINITY, 4.0).is_visible());
        assert!(!Circle::new(1.0, 1.0, f32::NAN).is_visible());
    }

    #[test]
    fn test_point_at_translates_by_center() {
        let c = Circle::new(10.0, 20.0, 5.0);
        let p = c.point_at(0.0, 5.0);
        assert_eq!(p, Point::new(15.0, 20.0));
    }
}
