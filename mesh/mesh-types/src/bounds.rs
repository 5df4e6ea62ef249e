//! Axis-aligned bounding box.

use nalgebra::Point3;

/// An axis-aligned bounding box in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// The empty box (inverted infinite bounds).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Whether the box contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to include a point.
    pub fn extend(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Bounding box of an iterator of points.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Aabb;
    /// use nalgebra::Point3;
    ///
    /// let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, -1.0, 3.0)];
    /// let bounds = Aabb::from_points(points.iter());
    /// assert_eq!(bounds.min.y, -1.0);
    /// assert_eq!(bounds.max.x, 2.0);
    /// ```
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut bounds = Self::empty();
        for p in points {
            bounds.extend(p);
        }
        bounds
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        Point3::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// Per-axis extent of the box.
    #[must_use]
    pub fn extent(&self) -> nalgebra::Vector3<f64> {
        self.max - self.min
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_box_is_empty() {
        assert!(Aabb::empty().is_empty());
        assert!(Aabb::from_points(std::iter::empty()).is_empty());
    }

    #[test]
    fn extend_grows_bounds() {
        let mut b = Aabb::empty();
        b.extend(&Point3::new(1.0, 2.0, 3.0));
        b.extend(&Point3::new(-1.0, 5.0, 0.0));
        assert!(!b.is_empty());
        assert_relative_eq!(b.min.x, -1.0);
        assert_relative_eq!(b.max.y, 5.0);
        assert_relative_eq!(b.extent().z, 3.0);
    }

    #[test]
    fn center_of_unit_box() {
        let b = Aabb::from_points(
            [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)].iter(),
        );
        let c = b.center();
        assert_relative_eq!(c.x, 0.5);
        assert_relative_eq!(c.y, 0.5);
        assert_relative_eq!(c.z, 0.5);
    }
}
