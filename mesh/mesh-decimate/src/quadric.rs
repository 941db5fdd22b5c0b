//! Quadric error metric.
//!
//! A quadric `Q = sum(p * p^T)` over planes `p = [a, b, c, d]` measures the
//! summed squared distance from a point to every contributing plane as
//! `v^T * Q * v` with `v = [x, y, z, 1]`.

use std::ops::AddAssign;

use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};

/// Determinant below which the optimal-point system is treated as singular.
const SINGULAR_EPSILON: f64 = 1e-10;

/// Symmetric 4x4 quadric error matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadric(Matrix4<f64>);

impl Default for Quadric {
    fn default() -> Self {
        Self(Matrix4::zeros())
    }
}

impl Quadric {
    /// Quadric of the plane through `point` with unit `normal`.
    #[must_use]
    pub fn from_plane(normal: &Vector3<f64>, point: &Point3<f64>) -> Self {
        let d = -normal.dot(&point.coords);
        let p = Vector4::new(normal.x, normal.y, normal.z, d);
        Self(p * p.transpose())
    }

    /// Summed squared plane distance of `point`.
    #[must_use]
    pub fn evaluate(&self, point: &Point3<f64>) -> f64 {
        let v = point.to_homogeneous();
        v.dot(&(self.0 * v))
    }

    /// Point minimizing the error, or `None` if the system is singular.
    #[must_use]
    pub fn optimal_point(&self) -> Option<Point3<f64>> {
        let a: Matrix3<f64> = self.0.fixed_view::<3, 3>(0, 0).into_owned();
        if a.determinant().abs() < SINGULAR_EPSILON {
            return None;
        }
        let b: Vector3<f64> = -self.0.fixed_view::<3, 1>(0, 3).into_owned();
        a.try_inverse().map(|inv| Point3::from(inv * b))
    }
}

impl AddAssign for Quadric {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::ops::Add for Quadric {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}
