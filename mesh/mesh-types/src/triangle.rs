//! Concrete triangle with vertex positions.

use nalgebra::{Point3, Vector3};

/// A triangle with explicit vertex positions.
///
/// Produced on demand from an [`crate::IndexedMesh`] face; winding order is
/// inherited from the face (CCW from outside).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unnormalized normal vector `(v1 - v0) × (v2 - v0)`.
    ///
    /// Its length is twice the triangle area; direction follows the
    /// right-hand rule over the winding order.
    #[inline]
    #[must_use]
    pub fn scaled_normal(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit normal, or `None` for a degenerate triangle.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.scaled_normal();
        let len = n.norm();
        if len > f64::EPSILON {
            Some(n / len)
        } else {
            None
        }
    }

    /// Triangle area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.scaled_normal().norm() * 0.5
    }

    /// Whether the triangle has (numerically) zero area.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, area_threshold: f64) -> bool {
        self.area() <= area_threshold
    }

    /// Centroid of the three vertices.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn right_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn area_of_right_triangle() {
        assert_relative_eq!(right_triangle().area(), 0.5);
    }

    #[test]
    fn normal_follows_winding() {
        let n = right_triangle().normal();
        let Some(n) = n else {
            panic!("degenerate");
        };
        assert_relative_eq!(n.z, 1.0);
    }

    #[test]
    fn degenerate_triangle_has_no_normal() {
        let t = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        assert!(t.normal().is_none());
        assert!(t.is_degenerate(1e-12));
    }

    #[test]
    fn centroid_is_average() {
        let c = right_triangle().centroid();
        assert_relative_eq!(c.x, 1.0 / 3.0);
        assert_relative_eq!(c.y, 1.0 / 3.0);
    }
}
