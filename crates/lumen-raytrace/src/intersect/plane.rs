//! Ray-plane intersection (closed-form).

use lumen_math::{Dir3, Point3, Vec3};

use super::SurfaceHit;
use crate::Ray;

/// An infinite plane through `origin` with unit normal `normal`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// A point on the plane.
    pub origin: Point3,
    /// Unit normal.
    pub normal: Dir3,
}

impl Plane {
    /// Create a plane; the normal is normalized.
    pub fn new(origin: Point3, normal: Vec3) -> Self {
        Self {
            origin,
            normal: Dir3::new_normalize(normal),
        }
    }
}

/// Intersect a ray with a plane.
///
/// Rays running parallel to the plane, or meeting it behind their origin,
/// miss. The hit normal is the plane normal on both sides.
pub fn intersect_plane(ray: &Ray, plane: &Plane) -> Option<SurfaceHit> {
    let n = plane.normal.into_inner();
    let along = ray.direction.dot(&n);
    if along.abs() < 1e-12 {
        return None;
    }
    let t = (plane.origin - ray.origin).dot(&n) / along;
    (t >= 0.0).then(|| SurfaceHit::new(t, ray.at(t), n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy() -> Plane {
        Plane::new(Point3::origin(), Vec3::z())
    }

    #[test]
    fn test_ray_plane_perpendicular() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_plane(&ray, &xy()).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-10);
        assert!(hit.point.coords.norm() < 1e-10);
        assert!((hit.normal.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ray_plane_offset() {
        let ray = Ray::new(Point3::new(3.0, 4.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_plane(&ray, &xy()).unwrap();
        assert!((hit.t - 10.0).abs() < 1e-10);
        assert!((hit.point.x - 3.0).abs() < 1e-10);
        assert!((hit.point.y - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_ray_plane_parallel() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(intersect_plane(&ray, &xy()).is_none());
    }

    #[test]
    fn test_ray_plane_behind() {
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(intersect_plane(&ray, &xy()).is_none());
    }

    #[test]
    fn test_ray_plane_angled() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vec3::new(1.0, 0.0, -1.0));
        let hit = intersect_plane(&ray, &xy()).unwrap();
        let expected_t = 10.0 * 2.0_f64.sqrt();
        assert!((hit.t - expected_t).abs() < 1e-10);
    }

    #[test]
    fn test_ray_plane_from_below_keeps_normal() {
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let hit = intersect_plane(&ray, &xy()).unwrap();
        assert!((hit.normal.z - 1.0).abs() < 1e-12);
    }
}
