//! Local transform parameters of a node.

use lumen_math::{Point3, Transform, Vec3};
use serde::{Deserialize, Serialize};

/// Position, Euler rotation, scale and pivot relative to the parent frame.
///
/// Rotation is stored as Euler angles in degrees: `x` is pitch, `y` is yaw
/// and `z` is roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Translation.
    pub position: Vec3,
    /// Euler angles in degrees (pitch, yaw, roll).
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Point the rotation is applied about.
    pub pivot: Vec3,
}

impl Pose {
    /// Pose at `position` with no rotation and unit scale.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Rotation part as a matrix.
    pub fn rotation_matrix(&self) -> Transform {
        Transform::rotation_yxz_degrees(self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// Local matrix: `T(position) * T(pivot) * R * T(-pivot) * S(scale)`.
    pub fn local_matrix(&self) -> Transform {
        Transform::translation_by(&self.position)
            .then(&Transform::translation_by(&self.pivot))
            .then(&self.rotation_matrix())
            .then(&Transform::translation_by(&-self.pivot))
            .then(&Transform::scale(self.scale.x, self.scale.y, self.scale.z))
    }

    /// Set the rotation so the local +Z axis points along `position - target`,
    /// away from `target`. Roll is reset to zero.
    pub fn face_towards(&mut self, target: &Point3) {
        let d = self.position - target.coords;
        let xz = (d.x * d.x + d.z * d.z).sqrt();
        self.rotation.x = (-d.y.atan2(xz)).to_degrees();
        self.rotation.y = (-(-d.x).atan2(d.z)).to_degrees();
        self.rotation.z = 0.0;
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            pivot: Vec3::zeros(),
        }
    }
}
