//! Ray-triangle intersection (Möller-Trumbore).

use lumen_math::{Point3, Vec3};

use super::SurfaceHit;
use crate::Ray;

/// A triangle given by its three vertices in counter-clockwise order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub a: Point3,
    /// Second vertex.
    pub b: Point3,
    /// Third vertex.
    pub c: Point3,
}

impl Triangle {
    /// Create a triangle from three vertices.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { a, b, c }
    }

    /// Unit face normal `(b - a) x (c - a)`, or `None` for a degenerate triangle.
    pub fn face_normal(&self) -> Option<Vec3> {
        (self.b - self.a).cross(&(self.c - self.a)).try_normalize(1e-12)
    }
}

/// Intersect a ray with a triangle.
///
/// Returns the hit with the triangle's face normal, or `None` when the ray
/// is parallel to the triangle, misses it, or hits behind its origin.
pub fn intersect_triangle(ray: &Ray, tri: &Triangle) -> Option<SurfaceHit> {
    let d = ray.direction.as_ref();
    let edge1 = tri.b - tri.a;
    let edge2 = tri.c - tri.a;

    // h = d x edge2
    let h = d.cross(&edge2);
    let det = edge1.dot(&h);

    // Ray nearly parallel to triangle
    if det.abs() < 1e-12 {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - tri.a;
    let u = inv_det * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = inv_det * d.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(&q);
    if t <= 1e-9 {
        return None;
    }

    let normal = tri.face_normal()?;
    Some(SurfaceHit::new(t, ray.at(t), normal))
}
