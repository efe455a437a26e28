//! Axis-aligned bounding boxes used as a broadphase for mesh intersection.

use lumen_math::{Point3, Vec3};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Box with the given corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Inverted box that any included point replaces.
    pub fn empty() -> Self {
        Self::new(
            Point3::from(Vec3::repeat(f64::INFINITY)),
            Point3::from(Vec3::repeat(f64::NEG_INFINITY)),
        )
    }

    /// Smallest box containing every point of `points`.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        points.into_iter().fold(Self::empty(), |mut aabb, p| {
            aabb.include_point(p);
            aabb
        })
    }

    /// Whether no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Grow to contain `p`.
    pub fn include_point(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Pad every face outward by `tol`.
    ///
    /// Flat meshes give zero-thickness boxes that grazing rays would miss.
    pub fn expand(&mut self, tol: f64) {
        let pad = Vec3::repeat(tol);
        self.min -= pad;
        self.max += pad;
    }
}
