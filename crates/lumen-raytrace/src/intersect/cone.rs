//! Ray-cone intersection (quadratic equation plus cap plane).

use lumen_math::{Point3, Vec3};

use super::plane::{intersect_plane, Plane};
use super::SurfaceHit;
use crate::Ray;

/// Negative discriminants down to this fraction of `b^2` count as a double root.
const DOUBLE_ROOT_SLACK: f64 = 1e-9;

/// Hits this far below the apex plane still belong to the upper nappe.
const APEX_SLACK: f64 = 1e-9;

/// A finite capped cone centered on the origin of its frame.
///
/// The apex sits at `(0, 0, -height / 2)` pointing down the -Z axis, and the
/// circular cap of radius `radius` lies in the plane `z = height / 2`.
#[derive(Debug, Clone, Copy)]
pub struct Cone {
    /// Cap radius.
    pub radius: f64,
    /// Distance from apex to cap.
    pub height: f64,
}

impl Cone {
    /// Create a cone from cap radius and height.
    pub fn new(radius: f64, height: f64) -> Self {
        Self { radius, height }
    }

    /// Half-angle at the apex, `atan(radius / height)`.
    pub fn half_angle(&self) -> f64 {
        (self.radius / self.height).atan()
    }

    /// Apex point.
    pub fn apex(&self) -> Point3 {
        Point3::new(0.0, 0.0, -self.height / 2.0)
    }

    /// Center of the cap disk.
    pub fn cap_center(&self) -> Point3 {
        Point3::new(0.0, 0.0, self.height / 2.0)
    }
}

/// Intersect a ray with a capped cone.
///
/// The double-napped cone quadratic is solved and the smaller root kept.
/// Hits on the nappe below the apex are rejected. A hit above the cap plane is
/// re-solved against the cap and kept only inside the cap radius.
///
/// A ray entering through the cap disk reports the inside of the lateral
/// surface.
pub fn intersect_cone(ray: &Ray, cone: &Cone) -> Option<SurfaceHit> {
    if cone.height <= 0.0 || cone.radius <= 0.0 {
        return None;
    }

    let axis = Vec3::new(0.0, 0.0, -1.0);
    let apex = cone.apex();
    let cap_center = cone.cap_center();
    let theta = cone.half_angle();
    let cos2 = theta.cos() * theta.cos();

    let d = ray.direction.as_ref();
    let co = ray.origin - apex;
    let d_dot_a = d.dot(&axis);
    let co_dot_a = co.dot(&axis);

    let a = d_dot_a * d_dot_a - cos2;
    let b = 2.0 * (d_dot_a * co_dot_a - d.dot(&co) * cos2);
    let c = co_dot_a * co_dot_a - co.dot(&co) * cos2;

    // Ray parallel to a generator line; the quadratic degenerates.
    if a.abs() < 1e-12 {
        return None;
    }

    // Rays along the axis meet the apex as a double root, which rounding can
    // push slightly below zero.
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < -DOUBLE_ROOT_SLACK * b * b {
        return None;
    }

    let sqrt_disc = discriminant.max(0.0).sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);
    let t = t1.min(t2);
    if t < 0.0 {
        return None;
    }

    let point = ray.at(t);
    if point.z < apex.z - APEX_SLACK {
        return None;
    }

    if point.z > cap_center.z {
        let cap = Plane::new(cap_center, Vec3::z());
        return intersect_plane(ray, &cap)
            .filter(|hit| (hit.point - cap_center).norm_squared() <= cone.radius * cone.radius);
    }

    Some(SurfaceHit::new(t, point, lateral_normal(cone, &point)))
}

/// Outward normal on the lateral surface, from the gradient of
/// `sqrt(x^2 + y^2) - (z - apex_z) * tan(theta)`.
fn lateral_normal(cone: &Cone, point: &Point3) -> Vec3 {
    let x = point.x;
    let y = point.y;
    let rho = (x * x + y * y).sqrt();
    if rho < 1e-12 {
        // At the apex the gradient is undefined; point down the axis.
        return Vec3::new(0.0, 0.0, -1.0);
    }
    let tan_theta = cone.radius / cone.height;
    Vec3::new(x, y, -rho * tan_theta).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_cone_lateral() {
        // Radius at mid-height is half the cap radius.
        let cone = Cone::new(1.0, 2.0);
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        let hit = intersect_cone(&ray, &cone).unwrap();
        assert!((hit.t - 4.5).abs() < 1e-10);
        assert!((hit.point - Point3::new(0.5, 0.0, 0.0)).norm() < 1e-10);
        let expected = Vec3::new(0.5, 0.0, -0.25).normalize();
        assert!((hit.normal - expected).norm() < 1e-10);
    }

    #[test]
    fn test_lateral_normal_is_perpendicular_to_generator() {
        let cone = Cone::new(1.0, 2.0);
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.5), Vec3::new(0.0, -1.0, 0.0));
        let hit = intersect_cone(&ray, &cone).unwrap();
        let generator = hit.point - cone.apex();
        assert!(hit.normal.dot(&generator).abs() < 1e-10);
        assert!(hit.normal.y > 0.0);
    }

    #[test]
    fn test_ray_cone_cap_when_root_beyond_cap_plane() {
        // The smaller root lands on the upper extension at (2, 0, 3); the
        // cap is then crossed at its center.
        let cone = Cone::new(1.0, 2.0);
        let ray = Ray::new(Point3::new(3.0, 0.0, 4.0), Vec3::new(-1.0, 0.0, -1.0));
        let hit = intersect_cone(&ray, &cone).unwrap();
        assert!((hit.t - 3.0 * 2f64.sqrt()).abs() < 1e-10);
        assert!((hit.point - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-10);
        assert!((hit.normal - Vec3::z()).norm() < 1e-12);
    }

    #[test]
    fn test_ray_through_cap_hits_inner_wall() {
        let cone = Cone::new(1.0, 2.0);
        let ray = Ray::new(Point3::new(0.2, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_cone(&ray, &cone).unwrap();
        assert!((hit.t - 5.6).abs() < 1e-10);
        assert!((hit.point - Point3::new(0.2, 0.0, -0.6)).norm() < 1e-10);
    }

    #[test]
    fn test_ray_along_axis_meets_apex() {
        let cone = Cone::new(1.0, 2.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_cone(&ray, &cone).unwrap();
        assert!((hit.t - 6.0).abs() < 1e-6);
        assert!((hit.point - cone.apex()).norm() < 1e-6);

        // Nearly on-axis ray of the kind a rotated connector frame produces.
        let thin = Cone::new(0.3, 2.4);
        let ray = Ray::new(Point3::new(0.0, 5.2e-16, 8.5), Vec3::new(0.0, -6.1e-17, -1.0));
        let hit = intersect_cone(&ray, &thin).unwrap();
        assert!((hit.point - thin.apex()).norm() < 1e-6);
        assert!(hit.normal.z < 0.0);
    }

    #[test]
    fn test_ray_cone_above_cap_misses() {
        let cone = Cone::new(1.0, 2.0);
        let ray = Ray::new(Point3::new(5.0, 0.0, 1.5), Vec3::new(-1.0, 0.0, 0.0));
        assert!(intersect_cone(&ray, &cone).is_none());
    }

    #[test]
    fn test_ray_cone_wrong_nappe() {
        let cone = Cone::new(1.0, 2.0);
        let ray = Ray::new(Point3::new(5.0, 0.0, -2.0), Vec3::new(-1.0, 0.0, 0.0));
        assert!(intersect_cone(&ray, &cone).is_none());
    }

    #[test]
    fn test_ray_cone_miss() {
        let cone = Cone::new(1.0, 2.0);
        let ray = Ray::new(Point3::new(5.0, 3.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert!(intersect_cone(&ray, &cone).is_none());
    }

    #[test]
    fn test_ray_cone_behind_origin() {
        let cone = Cone::new(1.0, 2.0);
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(intersect_cone(&ray, &cone).is_none());
    }

    #[test]
    fn test_degenerate_cone() {
        let cone = Cone::new(1.0, 0.0);
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert!(intersect_cone(&ray, &cone).is_none());
    }
}
