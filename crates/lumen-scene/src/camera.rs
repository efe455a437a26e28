//! Render camera and its view-plane window.

use lumen_math::{Point2, Point3, Vec3};
use lumen_raytrace::Ray;

/// A rectangular window on a plane facing the camera.
///
/// Normalized image coordinates `(u, v)` in `[0, 1]` map linearly from
/// `min` to `max` in the plane's local XY, offset by `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPlane {
    /// World position of the plane's local origin.
    pub position: Point3,
    /// Plane normal.
    pub normal: Vec3,
    /// Lower-left corner in plane coordinates.
    pub min: Point2,
    /// Upper-right corner in plane coordinates.
    pub max: Point2,
}

impl Default for ViewPlane {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            normal: Vec3::z(),
            min: Point2::new(-3.0, -2.0),
            max: Point2::new(3.0, 2.0),
        }
    }
}

impl ViewPlane {
    /// Window width.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Window height.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width() / self.height()
    }

    /// Resize the window around its center.
    pub fn set_size(&mut self, width: f64, height: f64) {
        let center = midpoint(&self.min, &self.max);
        self.min = Point2::new(center.x - width / 2.0, center.y - height / 2.0);
        self.max = Point2::new(center.x + width / 2.0, center.y + height / 2.0);
    }

    /// World point for normalized image coordinates.
    pub fn to_world(&self, u: f64, v: f64) -> Point3 {
        let x = u * self.width() + self.min.x;
        let y = v * self.height() + self.min.y;
        self.position + Vec3::new(x, y, 0.0)
    }

    /// The four window corners in world space, counter-clockwise from lower-left.
    pub fn corners(&self) -> [Point3; 4] {
        [
            self.to_world(0.0, 0.0),
            self.to_world(1.0, 0.0),
            self.to_world(1.0, 1.0),
            self.to_world(0.0, 1.0),
        ]
    }
}

fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// A pinhole camera shooting rays through a [`ViewPlane`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCam {
    /// Eye position.
    pub position: Point3,
    /// Image window.
    pub view_plane: ViewPlane,
}

impl Default for RenderCam {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 10.0),
            view_plane: ViewPlane::default(),
        }
    }
}

impl RenderCam {
    /// Ray from the eye through the view-plane point at `(u, v)`.
    ///
    /// `None` when the eye lies on that view-plane point.
    pub fn ray(&self, u: f64, v: f64) -> Option<Ray> {
        Ray::toward(self.position, self.view_plane.to_world(u, v))
    }
}
