#![warn(missing_docs)]

//! Scene graph for the lumen scene composer.
//!
//! A [`Scene`] owns every node in a slot-map arena. Nodes carry a [`Shape`],
//! a local [`Pose`] and material colors; world transforms are composed from
//! the root down on demand. Geometric queries take world-space rays and
//! points and answer in world space.
//!
//! # Example
//!
//! ```ignore
//! use lumen_math::{Point3, Vec3};
//! use lumen_raytrace::Ray;
//! use lumen_scene::{Color, Scene, SceneNode};
//!
//! let mut scene = Scene::studio();
//! let ball = scene.insert(SceneNode::sphere(Vec3::zeros(), 1.0, Color::GRAY));
//! let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
//! let hit = scene.intersect(ball, &ray).unwrap();
//! assert!((hit.point.z - 1.0).abs() < 1e-12);
//! ```

mod camera;
mod color;
pub mod error;
mod node;
mod pose;
mod scene;
pub mod shape;

pub use camera::{RenderCam, ViewPlane};
pub use color::Color;
pub use error::{QueryError, Result, SceneError};
pub use node::SceneNode;
pub use pose::Pose;
pub use scene::{JointRecord, Scene, DEFAULT_AMBIENT};
pub use shape::{
    ConeShape, JointShape, LightShape, MeshShape, PlaneShape, Shape, SphereShape,
};

slotmap::new_key_type! {
    /// Handle of a node in a [`Scene`].
    pub struct NodeId;
}
