//! Ray-primitive intersection algorithms.
//!
//! Each primitive has a dedicated intersector that computes exact
//! intersection points and outward normals in the primitive's own frame.
//! Callers transform rays into that frame first (see [`Ray::transformed`]).
//!
//! [`Ray::transformed`]: crate::Ray::transformed

mod cone;
mod plane;
mod sphere;
mod triangle;

pub use cone::{intersect_cone, Cone};
pub use plane::{intersect_plane, Plane};
pub use sphere::{intersect_sphere, Sphere};
pub use triangle::{intersect_triangle, Triangle};

use lumen_math::{Point3, Vec3};

/// Result of a ray-primitive intersection.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    /// Parameter along the ray.
    pub t: f64,
    /// Intersection point.
    pub point: Point3,
    /// Unit surface normal at the intersection.
    pub normal: Vec3,
}

impl SurfaceHit {
    /// Create a new surface hit.
    pub fn new(t: f64, point: Point3, normal: Vec3) -> Self {
        Self { t, point, normal }
    }
}
