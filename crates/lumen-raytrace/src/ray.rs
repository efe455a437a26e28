//! Ray representation and basic ray-geometry tests.

use lumen_math::{Dir3, Point3, Transform, Vec3};

use crate::Aabb3;

/// A ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Dir3,
    /// Componentwise reciprocal of `direction`.
    inv_direction: Vec3,
    /// 1 where the direction component is negative.
    sign: [usize; 3],
}

impl Ray {
    /// Ray from `origin` along `direction`, which is normalized here.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        let direction = Dir3::new_normalize(direction);
        let inv_direction = direction.map(f64::recip);
        let sign = [0, 1, 2].map(|axis| usize::from(inv_direction[axis] < 0.0));
        Self {
            origin,
            direction,
            inv_direction,
            sign,
        }
    }

    /// Create a ray from `from` toward `to`, or `None` if the points coincide.
    pub fn toward(from: Point3, to: Point3) -> Option<Self> {
        let d = to - from;
        if d.norm_squared() < 1e-24 {
            return None;
        }
        Some(Self::new(from, d))
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }

    /// Express this ray in another frame.
    ///
    /// Both the origin and a second point one unit along the ray are mapped
    /// through `m`, and the direction is re-normalized from their difference.
    /// Pass the inverse of an object's world matrix to get an object-space ray.
    pub fn transformed(&self, m: &Transform) -> Self {
        let p0 = m.apply_point(&self.origin);
        let p1 = m.apply_point(&self.at(1.0));
        Self::new(p0, p1 - p0)
    }

    /// Entry and exit parameters of the ray through `aabb`, clamped to
    /// start at zero, or `None` when the box is missed or behind the origin.
    pub fn intersect_aabb(&self, aabb: &Aabb3) -> Option<(f64, f64)> {
        let corners = [aabb.min, aabb.max];
        let mut near = f64::NEG_INFINITY;
        let mut far = f64::INFINITY;
        for axis in 0..3 {
            let lo = corners[self.sign[axis]][axis];
            let hi = corners[1 - self.sign[axis]][axis];
            near = near.max((lo - self.origin[axis]) * self.inv_direction[axis]);
            far = far.min((hi - self.origin[axis]) * self.inv_direction[axis]);
        }
        (far >= near && far >= 0.0).then(|| (near.max(0.0), far))
    }
}
