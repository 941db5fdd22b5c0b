//! Triangle type for per-face geometric calculations.

use nalgebra::{Point3, Vector3};

/// A triangle with resolved vertex positions.
///
/// Winding is counter-clockwise when viewed from the front.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// assert!((tri.normal().unwrap().z - 1.0).abs() < 1e-10);
/// ```
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
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Cross product of the two edges leaving `v0`.
    ///
    /// Its magnitude is twice the area, which makes it the area-weighted
    /// contribution used when accumulating vertex normals.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit face normal, or `None` for a zero-area triangle.
    #[inline]
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.normal_unnormalized().try_normalize(f64::EPSILON)
    }

    /// Triangle area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Length of the shortest edge.
    #[must_use]
    pub fn min_edge_length(&self) -> f64 {
        let [a, b, c] = self.edge_lengths();
        a.min(b).min(c)
    }

    /// Edge lengths in `v0→v1`, `v1→v2`, `v2→v0` order.
    #[must_use]
    pub fn edge_lengths(&self) -> [f64; 3] {
        [
            (self.v1 - self.v0).norm(),
            (self.v2 - self.v1).norm(),
            (self.v0 - self.v2).norm(),
        ]
    }

    /// Squared longest edge over twice the area.
    ///
    /// Returns `f64::INFINITY` for zero-area triangles.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        let area = self.area();
        if area <= 0.0 {
            return f64::INFINITY;
        }
        let [a, b, c] = self.edge_lengths();
        let longest = a.max(b).max(c);
        (longest * longest) / (2.0 * area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn right_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        )
    }

    #[test]
    fn area_and_normal() {
        let tri = right_triangle();
        assert_relative_eq!(tri.area(), 2.0);
        assert_relative_eq!(tri.normal_unnormalized().norm(), 4.0);
        let n = tri.normal().unwrap();
        assert_relative_eq!(n.z, 1.0);
    }

    #[test]
    fn degenerate_has_no_normal() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(tri.normal().is_none());
        assert!(tri.aspect_ratio().is_infinite());
    }

    #[test]
    fn edges() {
        let tri = right_triangle();
        assert_relative_eq!(tri.min_edge_length(), 2.0);
        assert_relative_eq!(tri.edge_lengths()[1], 8.0_f64.sqrt());
    }
}
