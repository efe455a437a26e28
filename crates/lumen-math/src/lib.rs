#![warn(missing_docs)]

//! Math types for the lumen scene composer.
//!
//! Thin wrappers around nalgebra providing the types shared by the scene
//! graph, the intersectors and the renderer: points, vectors, directions,
//! affine transforms and tolerance constants.

use nalgebra::{Matrix4, Rotation3, Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in view-plane coordinates.
pub type Point2 = nalgebra::Point2<f64>;

/// Homogeneous 4x4 matrix for node and camera frames.
///
/// Points are column vectors: `a.then(&b)` is the product `a * b`, which maps
/// a point through `b` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Row-major view of the homogeneous matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// No-op transform.
    pub fn identity() -> Self {
        Self::from(Matrix4::identity())
    }

    /// Move by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self::translation_by(&Vec3::new(dx, dy, dz))
    }

    /// Move by `v`.
    pub fn translation_by(v: &Vec3) -> Self {
        Self::from(Matrix4::new_translation(v))
    }

    /// Per-axis scale about the origin.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self::from(Matrix4::new_nonuniform_scaling(&Vec3::new(sx, sy, sz)))
    }

    fn about_axis(axis: Unit<Vec3>, degrees: f64) -> Self {
        Self::from(Rotation3::from_axis_angle(&axis, degrees.to_radians()).to_homogeneous())
    }

    /// Euler rotation in degrees.
    ///
    /// Yaw turns about Y, pitch about X and roll about Z, composed as
    /// `Ry(yaw) * Rx(pitch) * Rz(roll)`: roll reaches a point first.
    pub fn rotation_yxz_degrees(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self::about_axis(Vec3::y_axis(), yaw)
            .then(&Self::about_axis(Vec3::x_axis(), pitch))
            .then(&Self::about_axis(Vec3::z_axis(), roll))
    }

    /// Product `self * other`.
    pub fn then(&self, other: &Transform) -> Self {
        Self::from(self.matrix * other.matrix)
    }

    /// Map a point (translation applies).
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.matrix.transform_point(p)
    }

    /// Map a direction (translation ignored).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        self.matrix.transform_vector(v)
    }

    /// Map a surface normal through the inverse transpose of the linear part.
    ///
    /// A singular linear part leaves the normal unchanged.
    pub fn apply_normal(&self, n: &Vec3) -> Vec3 {
        self.matrix
            .fixed_view::<3, 3>(0, 0)
            .try_inverse()
            .map_or(*n, |inv| inv.transpose() * n)
    }

    /// Where the origin lands.
    pub fn origin(&self) -> Point3 {
        Point3::from(self.matrix.fixed_view::<3, 1>(0, 3).into_owned())
    }

    /// Exact inverse, or `None` for a singular matrix (e.g. a zero scale).
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(Self::from)
    }
}

impl From<Matrix4<f64>> for Transform {
    fn from(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Distance tolerance for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in scene units.
    pub linear: f64,
}

impl Tolerance {
    /// 1e-6 scene units.
    pub const DEFAULT: Self = Self { linear: 1e-6 };

    /// Whether two points are closer than the tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn test_translate_then_scale() {
        let t = Transform::translation(0.0, 4.0, 0.0).then(&Transform::scale(2.0, 3.0, 4.0));
        let p = t.apply_point(&Point3::new(1.0, 1.0, 1.0));
        assert!(close(&p, &Point3::new(2.0, 7.0, 4.0)));
        assert!(close(&t.origin(), &Point3::new(0.0, 4.0, 0.0)));
    }

    #[test]
    fn test_product_order() {
        let shift = Transform::translation(1.0, 0.0, 0.0);
        let grow = Transform::scale(2.0, 2.0, 2.0);
        assert!(close(&grow.then(&shift).origin(), &Point3::new(2.0, 0.0, 0.0)));
        assert!(close(&shift.then(&grow).origin(), &Point3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_vectors_ignore_translation() {
        let t = Transform::translation(5.0, 5.0, 5.0);
        let v = t.apply_vec(&Vec3::new(0.0, 1.0, 0.0));
        assert!((v - Vec3::y()).norm() < 1e-12);
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Transform::translation(1.0, 2.0, 3.0)
            .then(&Transform::rotation_yxz_degrees(40.0, -15.0, 70.0))
            .then(&Transform::scale(0.5, 2.0, 1.0));
        let inv = t.inverse().unwrap();
        let p = Point3::new(-2.0, 6.0, 0.5);
        assert!((inv.apply_point(&t.apply_point(&p)) - p).norm() < 1e-12);
    }

    #[test]
    fn test_zero_scale_is_singular() {
        assert!(Transform::scale(1.0, 0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn test_yaw_turns_about_y() {
        let t = Transform::rotation_yxz_degrees(90.0, 0.0, 0.0);
        let p = t.apply_point(&Point3::new(0.0, 0.0, 1.0));
        assert!(close(&p, &Point3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_roll_then_pitch_then_yaw() {
        // Roll: +X -> +Y; pitch about X: +Y -> +Z; yaw about Y: +Z -> +X.
        let t = Transform::rotation_yxz_degrees(90.0, 90.0, 90.0);
        let p = t.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(close(&p, &Point3::new(1.0, 0.0, 0.0)));
        let q = t.apply_point(&Point3::new(0.0, 0.0, 1.0));
        assert!(close(&q, &Point3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn test_normal_stays_perpendicular_under_stretch() {
        let t = Transform::scale(3.0, 1.0, 0.5);
        let n = t.apply_normal(&Vec3::new(1.0, 1.0, 1.0));
        let tangent = t.apply_vec(&Vec3::new(1.0, -1.0, 0.0));
        assert!(n.dot(&tangent).abs() < 1e-12);
    }

    #[test]
    fn test_tolerance() {
        let a = Point3::new(1.0, 2.0, 3.0);
        assert!(Tolerance::DEFAULT.points_equal(&a, &Point3::new(1.0 + 1e-7, 2.0, 3.0)));
        assert!(!Tolerance::DEFAULT.points_equal(&a, &Point3::new(1.001, 2.0, 3.0)));
    }
}
