use serde::{Deserialize, Serialize};

/// 2D point in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Z component of the cross product `self x other`
    ///
    /// One term of the shoelace sum when `self` and `other` are consecutive vertices.
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - other.x * self.y
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<&rqrr::Point> for Point {
    fn from(p: &rqrr::Point) -> Self {
        Self::new(p.x as f64, p.y as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross() {
        let a = Point::new(1.0, 0.0);
        let b = Point::new(0.0, 1.0);
        assert_eq!(a.cross(&b), 1.0);
        assert_eq!(b.cross(&a), -1.0);
        assert_eq!(a.cross(&a), 0.0);
    }

    #[test]
    fn test_from_rqrr_point() {
        let p = Point::from(&rqrr::Point { x: 12, y: -3 });
        assert_eq!(p, Point::new(12.0, -3.0));
    }
}
