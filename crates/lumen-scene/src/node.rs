//! Scene nodes: a shape plus its pose, materials and hierarchy links.

use lumen_math::Vec3;

use crate::color::Color;
use crate::pose::Pose;
use crate::shape::{ConeShape, JointShape, LightShape, MeshShape, PlaneShape, Shape, SphereShape};
use crate::NodeId;

/// A node of the scene graph.
///
/// Hierarchy links are managed by [`crate::Scene`]; a detached node built
/// with one of the constructors below has neither parent nor children.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub(crate) name: String,
    pub(crate) shape: Shape,
    pub(crate) pose: Pose,
    pub(crate) diffuse: Color,
    pub(crate) specular: Color,
    pub(crate) selectable: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl SceneNode {
    /// Node with the given shape at the origin, gray materials.
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        let selectable = shape.selectable_by_default();
        Self {
            name: name.into(),
            shape,
            pose: Pose::default(),
            diffuse: Color::GRAY,
            specular: Color::LIGHT_GRAY,
            selectable,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Point light at `position`.
    pub fn light(position: Vec3, intensity: f64) -> Self {
        Self::new("Light", Shape::Light(LightShape { intensity }))
            .with_position(position)
            .with_diffuse(Color::YELLOW)
    }

    /// Plane through `position` with the given normal.
    pub fn plane(position: Vec3, normal: Vec3) -> Self {
        Self::new(
            "Plane",
            Shape::Plane(PlaneShape {
                normal,
                ..PlaneShape::default()
            }),
        )
        .with_position(position)
        .with_diffuse(Color::DARK_OLIVE_GREEN)
    }

    /// Sphere of `radius` centered at `position`.
    pub fn sphere(position: Vec3, radius: f64, diffuse: Color) -> Self {
        Self::new("Sphere", Shape::Sphere(SphereShape { radius }))
            .with_position(position)
            .with_diffuse(diffuse)
    }

    /// Cone centered at `position`.
    pub fn cone(position: Vec3, radius: f64, height: f64, diffuse: Color) -> Self {
        Self::new("Cone", Shape::Cone(ConeShape { radius, height }))
            .with_position(position)
            .with_diffuse(diffuse)
    }

    /// Triangle mesh placed at `position`.
    pub fn mesh(position: Vec3, mesh: MeshShape) -> Self {
        Self::new("Mesh", Shape::Mesh(mesh)).with_position(position)
    }

    /// Joint with default node and connector sizes.
    pub fn joint(name: impl Into<String>) -> Self {
        Self::new(name, Shape::Joint(JointShape::new()))
    }

    /// Transform-only node.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Shape::Empty)
    }

    /// Set the local position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.pose.position = position;
        self
    }

    /// Set the local rotation (Euler degrees).
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.pose.rotation = rotation;
        self
    }

    /// Set the local scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.pose.scale = scale;
        self
    }

    /// Set the rotation pivot.
    pub fn with_pivot(mut self, pivot: Vec3) -> Self {
        self.pose.pivot = pivot;
        self
    }

    /// Set the diffuse color.
    pub fn with_diffuse(mut self, color: Color) -> Self {
        self.diffuse = color;
        self
    }

    /// Set the specular color.
    pub fn with_specular(mut self, color: Color) -> Self {
        self.specular = color;
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set whether picking may select this node.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geometry.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Local pose.
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Diffuse color.
    pub fn diffuse(&self) -> Color {
        self.diffuse
    }

    /// Specular color.
    pub fn specular(&self) -> Color {
        self.specular
    }

    /// Whether picking may select this node.
    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Whether the node contributes to ray marching.
    pub fn has_distance_field(&self) -> bool {
        self.shape.has_distance_field()
    }

    /// Whether the node is a light.
    pub fn is_light(&self) -> bool {
        matches!(self.shape, Shape::Light(_))
    }

    /// Parent handle, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
