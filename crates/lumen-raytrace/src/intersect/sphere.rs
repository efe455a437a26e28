//! Ray-sphere intersection (quadratic equation).

use lumen_math::Point3;

use super::SurfaceHit;
use crate::Ray;

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    /// Center point.
    pub center: Point3,
    /// Radius.
    pub radius: f64,
}

impl Sphere {
    /// Sphere centered at the origin.
    pub fn at_origin(radius: f64) -> Self {
        Self {
            center: Point3::origin(),
            radius,
        }
    }

    /// Signed distance from `p` to the sphere surface (negative inside).
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        (p - self.center).norm() - self.radius
    }
}

/// Intersect a ray with a sphere.
///
/// Returns the crossings with `t >= 0` in ascending order: two for a ray
/// that starts outside, one (the exit) for a ray that starts inside. Normals
/// point away from the center.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> Vec<SurfaceHit> {
    let d = ray.direction.as_ref();
    let to_origin = ray.origin - sphere.center;

    // Unit direction: t^2 + 2*half_b*t + c = 0.
    let half_b = to_origin.dot(d);
    let c = to_origin.norm_squared() - sphere.radius * sphere.radius;
    let quarter_disc = half_b * half_b - c;
    if quarter_disc < 0.0 {
        return Vec::new();
    }

    let root = quarter_disc.sqrt();
    [-half_b - root, -half_b + root]
        .into_iter()
        .filter(|&t| t >= 0.0)
        .map(|t| {
            let point = ray.at(t);
            SurfaceHit::new(t, point, (point - sphere.center) / sphere.radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Vec3;

    fn unit_ball() -> Sphere {
        Sphere::at_origin(1.0)
    }

    #[test]
    fn test_camera_ray_enters_then_exits() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), -Vec3::z());
        let hits = intersect_sphere(&ray, &unit_ball());
        assert_eq!(hits.len(), 2);
        assert!((hits[0].t - 9.0).abs() < 1e-10);
        assert!((hits[1].t - 11.0).abs() < 1e-10);
        assert!((hits[0].normal - Vec3::z()).norm() < 1e-10);
        assert!((hits[1].normal + Vec3::z()).norm() < 1e-10);
    }

    #[test]
    fn test_off_center_ray_misses() {
        let ray = Ray::new(Point3::new(1.5, 0.0, 10.0), -Vec3::z());
        assert!(intersect_sphere(&ray, &unit_ball()).is_empty());
    }

    #[test]
    fn test_sphere_behind_origin_is_ignored() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vec3::z());
        assert!(intersect_sphere(&ray, &unit_ball()).is_empty());
    }

    #[test]
    fn test_inside_reports_exit_only() {
        let sphere = Sphere {
            center: Point3::new(0.0, 2.0, 0.0),
            radius: 3.0,
        };
        let ray = Ray::new(Point3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let hits = intersect_sphere(&ray, &sphere);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].t - 3.0).abs() < 1e-10);
        assert!((hits[0].normal.norm() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_signed_distance_sign() {
        let sphere = Sphere {
            center: Point3::new(0.0, -1.0, 0.0),
            radius: 0.5,
        };
        assert!((sphere.signed_distance(&Point3::new(0.0, 1.0, 0.0)) - 1.5).abs() < 1e-12);
        assert!(sphere.signed_distance(&Point3::new(0.0, -1.2, 0.0)) < 0.0);
    }
}
