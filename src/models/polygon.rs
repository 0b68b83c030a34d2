use super::Point;
use serde::{Deserialize, Serialize};

/// Closed polygon boundary of a detected region.
///
/// Vertices are kept in detector order; the last vertex connects back to the
/// first. Scanner output has at least [`Polygon::MIN_VERTICES`] vertices, but
/// construction does not enforce it so degenerate input can still be measured.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Fewest vertices a well-formed detection boundary has
    pub const MIN_VERTICES: usize = 3;

    /// Create a polygon from ordered vertices
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Ordered vertices
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when the polygon has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when the polygon has enough vertices to enclose an area
    pub fn is_well_formed(&self) -> bool {
        self.vertices.len() >= Self::MIN_VERTICES
    }

    /// Signed shoelace sum, halved.
    ///
    /// Positive for counter-clockwise winding in a y-up frame. Empty input sums to 0.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        let mut sum = 0.0;
        for i in 0..n {
            let a = &self.vertices[i];
            let b = &self.vertices[(i + 1) % n];
            sum += a.cross(b);
        }
        sum / 2.0
    }

    /// Enclosed area, independent of winding and starting vertex
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Same boundary walked in the opposite direction
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    /// Same boundary starting `k` vertices later
    pub fn rotated(&self, k: usize) -> Self {
        let mut vertices = self.vertices.clone();
        if !vertices.is_empty() {
            let k = k % vertices.len();
            vertices.rotate_left(k);
        }
        Self { vertices }
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}

impl From<Vec<(f64, f64)>> for Polygon {
    fn from(vertices: Vec<(f64, f64)>) -> Self {
        Self::new(vertices.into_iter().map(Point::from).collect())
    }
}

impl<const N: usize> From<[(f64, f64); N]> for Polygon {
    fn from(vertices: [(f64, f64); N]) -> Self {
        Self::new(vertices.into_iter().map(Point::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f64) -> Polygon {
        Polygon::from([(0.0, 0.0), (0.0, side), (side, side), (side, 0.0)])
    }

    #[test]
    fn test_square_area() {
        assert!((square(2.0).area() - 4.0).abs() < 1e-9);
        assert!((square(3.0).area() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_signed_area_follows_winding() {
        let cw = square(2.0);
        let ccw = cw.reversed();
        assert!((cw.signed_area() + 4.0).abs() < 1e-9);
        assert!((ccw.signed_area() - 4.0).abs() < 1e-9);
        assert_eq!(cw.area(), ccw.area());
    }

    #[test]
    fn test_rotation_keeps_area() {
        let poly = Polygon::from([(1.0, 1.0), (5.0, 2.0), (6.0, 7.0), (0.5, 4.0)]);
        for k in 0..8 {
            assert!((poly.rotated(k).area() - poly.area()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_polygons() {
        assert_eq!(Polygon::default().area(), 0.0);
        assert_eq!(Polygon::from([(3.0, 4.0)]).area(), 0.0);
        assert_eq!(Polygon::from([(0.0, 0.0), (3.0, 4.0)]).area(), 0.0);
        assert!(!Polygon::from([(0.0, 0.0), (3.0, 4.0)]).is_well_formed());
        assert!(Polygon::default().rotated(3).is_empty());
    }

    #[test]
    fn test_serializes_as_vertex_list() {
        let poly = Polygon::from([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let json = serde_json::to_string(&poly).unwrap();
        assert_eq!(json, r#"[{"x":0.0,"y":0.0},{"x":1.0,"y":0.0},{"x":0.0,"y":1.0}]"#);
    }
}
