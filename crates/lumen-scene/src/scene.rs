//! The scene graph arena: node storage, hierarchy and transform queries.

use lumen_math::{Point3, Transform, Vec3};
use lumen_raytrace::{Ray, SurfaceHit};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::color::Color;
use crate::error::{Result, SceneError};
use crate::node::SceneNode;
use crate::pose::Pose;
use crate::shape::{map_hit, LightShape, Shape};
use crate::NodeId;

/// Ambient intensity of a fresh scene.
pub const DEFAULT_AMBIENT: f64 = 0.23;

/// Offset of a joint created under an existing parent.
const JOINT_OFFSET: Vec3 = Vec3::new(0.0, 3.0, 0.0);

/// Persisted description of a joint: name, local rotation and translation,
/// and the name of the parent it attaches to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointRecord {
    /// Joint name.
    pub name: String,
    /// Local Euler rotation in degrees.
    pub rotation: Vec3,
    /// Local translation.
    pub translation: Vec3,
    /// Parent name; `None` for a root joint.
    pub parent: Option<String>,
}

/// Owner of every node and light in a scene.
///
/// Nodes are addressed by [`NodeId`]. Iteration follows insertion order.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: SlotMap<NodeId, SceneNode>,
    order: Vec<NodeId>,
    ambient: LightShape,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with the default ambient intensity.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            order: Vec::new(),
            ambient: LightShape {
                intensity: DEFAULT_AMBIENT,
            },
        }
    }

    /// Scene with one light at (0, 4, 4) and a floor plane at y = -2.
    pub fn studio() -> Self {
        let mut scene = Self::new();
        scene.insert(SceneNode::light(Vec3::new(0.0, 4.0, 4.0), 0.8));
        scene.insert(SceneNode::plane(Vec3::new(0.0, -2.0, 0.0), Vec3::y()));
        scene
    }

    /// Ambient light.
    pub fn ambient(&self) -> &LightShape {
        &self.ambient
    }

    /// Set the ambient intensity.
    pub fn set_ambient(&mut self, intensity: f64) {
        self.ambient.intensity = intensity;
    }

    /// Number of nodes, lights included.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert a node at the root and return its handle.
    pub fn insert(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        let id = self.nodes.insert(node);
        self.order.push(id);
        id
    }

    /// Insert a node directly under `parent`.
    pub fn insert_under(&mut self, parent: NodeId, node: SceneNode) -> Result<NodeId> {
        self.get(parent)?;
        let id = self.insert(node);
        self.add_child(parent, id)?;
        Ok(id)
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Borrow a node, failing with [`SceneError::NodeNotFound`].
    pub fn get(&self, id: NodeId) -> Result<&SceneNode> {
        self.nodes.get(id).ok_or(SceneError::NodeNotFound(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut SceneNode> {
        self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))
    }

    /// Node handles in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    /// Lights in insertion order.
    pub fn lights(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> + '_ {
        self.iter().filter(|(_, node)| node.is_light())
    }

    /// Non-light nodes in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> + '_ {
        self.iter().filter(|(_, node)| !node.is_light())
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.nodes.get(id).map(|node| (id, node)))
    }

    /// First node with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.iter().find(|(_, node)| node.name == name).map(|(id, _)| id)
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children of `id`.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// `id` followed by all its descendants, depth first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Whether `ancestor` lies on the parent chain of `id` (or is `id`).
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent(c);
        }
        false
    }

    /// Attach `child` under `parent`, keeping its local pose.
    ///
    /// A child already attached elsewhere is detached first.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.get(parent)?;
        self.get(child)?;
        if self.is_ancestor(child, parent) {
            return Err(SceneError::Cycle { child, parent });
        }
        self.unlink(child);
        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        self.refresh(child);
        Ok(())
    }

    /// Detach `id` from its parent, keeping its local pose.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        self.get(id)?;
        self.unlink(id);
        self.refresh(id);
        Ok(())
    }

    /// Move `id` under `parent` (or to the root), keeping its world position.
    pub fn reparent(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<()> {
        let world = self.world_position(id)?;
        match parent {
            Some(p) => self.add_child(p, id)?,
            None => self.detach(id)?,
        }
        self.set_world_position(id, world)
    }

    fn unlink(&mut self, id: NodeId) {
        let Some(old) = self.nodes.get_mut(id).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(old) {
            parent.children.retain(|&c| c != id);
        }
    }

    /// Remove a node and return it.
    ///
    /// Its children move to its parent (or to the root) and keep their world
    /// positions. A child whose new parent has a singular world transform
    /// keeps its local position instead.
    pub fn remove(&mut self, id: NodeId) -> Result<SceneNode> {
        let node = self.get(id)?;
        let grandparent = node.parent;
        let children = node.children.clone();

        let captured: Vec<(NodeId, Option<Point3>)> = children
            .iter()
            .map(|&c| (c, self.world_position(c).ok()))
            .collect();

        for (child, world) in captured {
            self.unlink(child);
            if let Some(g) = grandparent {
                self.get_mut(child)?.parent = Some(g);
                self.get_mut(g)?.children.push(child);
            }
            if let Some(world) = world {
                if let Err(err) = self.set_world_position(child, world) {
                    warn!(?child, %err, "child keeps its local position");
                    self.refresh(child);
                }
            }
        }

        self.unlink(id);
        self.order.retain(|&n| n != id);
        let mut removed = self.nodes.remove(id).ok_or(SceneError::NodeNotFound(id))?;
        removed.children.clear();
        Ok(removed)
    }

    /// Local matrix of a node.
    pub fn local_matrix(&self, id: NodeId) -> Result<Transform> {
        Ok(self.get(id)?.pose.local_matrix())
    }

    /// World matrix: the product of the local matrices from the root down.
    pub fn world_matrix(&self, id: NodeId) -> Result<Transform> {
        let mut m = self.local_matrix(id)?;
        let mut current = self.parent(id);
        while let Some(p) = current {
            m = self.local_matrix(p)?.then(&m);
            current = self.parent(p);
        }
        Ok(m)
    }

    /// World position of a node's origin.
    pub fn world_position(&self, id: NodeId) -> Result<Point3> {
        Ok(self.world_matrix(id)?.origin())
    }

    /// Set the world position by solving for the local position.
    pub fn set_world_position(&mut self, id: NodeId, p: Point3) -> Result<()> {
        let local = match self.get(id)?.parent {
            Some(parent) => self
                .world_matrix(parent)?
                .inverse()
                .ok_or(SceneError::SingularTransform(parent))?
                .apply_point(&p),
            None => p,
        };
        self.get_mut(id)?.pose.position = local.coords;
        self.refresh(id);
        Ok(())
    }

    /// Replace the whole local pose.
    pub fn set_pose(&mut self, id: NodeId, pose: Pose) -> Result<()> {
        self.get_mut(id)?.pose = pose;
        self.refresh(id);
        Ok(())
    }

    /// Set the local position.
    pub fn set_local_position(&mut self, id: NodeId, position: Vec3) -> Result<()> {
        self.get_mut(id)?.pose.position = position;
        self.refresh(id);
        Ok(())
    }

    /// Set the local rotation (Euler degrees).
    pub fn set_local_rotation(&mut self, id: NodeId, rotation: Vec3) -> Result<()> {
        self.get_mut(id)?.pose.rotation = rotation;
        self.refresh(id);
        Ok(())
    }

    /// Set the local scale.
    pub fn set_local_scale(&mut self, id: NodeId, scale: Vec3) -> Result<()> {
        self.get_mut(id)?.pose.scale = scale;
        self.refresh(id);
        Ok(())
    }

    /// Set the rotation pivot.
    pub fn set_pivot(&mut self, id: NodeId, pivot: Vec3) -> Result<()> {
        self.get_mut(id)?.pose.pivot = pivot;
        self.refresh(id);
        Ok(())
    }

    /// Rename a node.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Set the diffuse color.
    pub fn set_diffuse(&mut self, id: NodeId, color: Color) -> Result<()> {
        self.get_mut(id)?.diffuse = color;
        Ok(())
    }

    /// Set the specular color.
    pub fn set_specular(&mut self, id: NodeId, color: Color) -> Result<()> {
        self.get_mut(id)?.specular = color;
        Ok(())
    }

    /// Set whether picking may select the node.
    pub fn set_selectable(&mut self, id: NodeId, selectable: bool) -> Result<()> {
        self.get_mut(id)?.selectable = selectable;
        Ok(())
    }

    /// Re-run the parent-dependent hook on `id` and everything below it.
    fn refresh(&mut self, id: NodeId) {
        for node_id in self.descendants(id) {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            if !node.shape.follows_parent() {
                continue;
            }
            let Some(parent) = node.parent else {
                continue;
            };
            let (Ok(world), Ok(parent_pos)) =
                (self.world_matrix(node_id), self.world_position(parent))
            else {
                continue;
            };
            if let Some(SceneNode {
                shape: Shape::Joint(joint),
                ..
            }) = self.nodes.get_mut(node_id)
            {
                if !joint.adjust(&world, &parent_pos) {
                    debug!(node = ?node_id, "joint world transform is singular, connector unchanged");
                }
            }
        }
    }

    /// Intersect a world-space ray with one node.
    ///
    /// Returns the hit in world space with `t` measured from the ray origin.
    /// Nodes that cannot be intersected report no hit.
    pub fn intersect(&self, id: NodeId, ray: &Ray) -> Option<SurfaceHit> {
        let node = self.nodes.get(id)?;
        let world = self.world_matrix(id).ok()?;
        let Some(inv) = world.inverse() else {
            debug!(node = ?id, "skipping intersection with singular world transform");
            return None;
        };
        let local = ray.transformed(&inv);
        match node.shape.intersect_local(&local, node.parent.is_some()) {
            Ok(hit) => hit.map(|h| map_hit(&h, &world, ray)),
            Err(err) => {
                debug!(node = ?id, %err, "intersect");
                None
            }
        }
    }

    /// Signed distance from a world point to one node; `+inf` when the node
    /// has no distance field.
    pub fn sdf(&self, id: NodeId, p: &Point3) -> f64 {
        let Some(node) = self.nodes.get(id) else {
            return f64::INFINITY;
        };
        let Ok(origin) = self.world_position(id) else {
            return f64::INFINITY;
        };
        match node.shape.signed_distance(&origin, p) {
            Ok(d) => d,
            Err(err) => {
                debug!(node = ?id, %err, "sdf");
                f64::INFINITY
            }
        }
    }

    /// The selectable node hit by `ray` whose origin is closest to the ray origin.
    pub fn pick(&self, ray: &Ray) -> Option<NodeId> {
        self.iter()
            .filter(|(_, node)| node.selectable)
            .filter(|&(id, _)| self.intersect(id, ray).is_some())
            .filter_map(|(id, _)| {
                self.world_position(id)
                    .ok()
                    .map(|p| (id, (p - ray.origin).norm()))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Create a joint three units above `parent` and attach it.
    pub fn add_joint_under(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId> {
        let joint = SceneNode::joint(name).with_position(JOINT_OFFSET);
        self.insert_under(parent, joint)
    }

    /// Create a joint from a record, resolving its parent by name.
    pub fn add_joint_record(&mut self, record: &JointRecord) -> Result<NodeId> {
        let parent = match &record.parent {
            Some(name) => Some(
                self.find_by_name(name)
                    .ok_or_else(|| SceneError::ParentNotFound(name.clone()))?,
            ),
            None => None,
        };
        let joint = SceneNode::joint(record.name.clone())
            .with_rotation(record.rotation)
            .with_position(record.translation);
        match parent {
            Some(p) => self.insert_under(p, joint),
            None => Ok(self.insert(joint)),
        }
    }

    /// Describe an existing node as a joint record.
    pub fn joint_record(&self, id: NodeId) -> Result<JointRecord> {
        let node = self.get(id)?;
        let parent = match node.parent {
            Some(p) => Some(self.get(p)?.name.clone()),
            None => None,
        };
        Ok(JointRecord {
            name: node.name.clone(),
            rotation: node.pose.rotation,
            translation: node.pose.position,
            parent,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::shape::{JointShape, CONNECTOR_CLEARANCE};

    fn connector(scene: &Scene, id: NodeId) -> JointShape {
        match scene.get(id).unwrap().shape() {
            Shape::Joint(joint) => joint.clone(),
            other => panic!("expected joint, got {}", other.kind()),
        }
    }

    #[test]
    fn test_root_world_equals_local() {
        let mut scene = Scene::new();
        let id = scene.insert(
            SceneNode::empty("root")
                .with_position(Vec3::new(1.0, 2.0, 3.0))
                .with_rotation(Vec3::new(10.0, 20.0, 30.0))
                .with_scale(Vec3::new(2.0, 1.0, 0.5)),
        );
        let world = scene.world_matrix(id).unwrap();
        let local = scene.local_matrix(id).unwrap();
        assert_relative_eq!(world.matrix, local.matrix, epsilon = 1e-12);
    }

    #[test]
    fn test_child_world_position() {
        let mut scene = Scene::new();
        let parent = scene.insert(SceneNode::empty("p").with_position(Vec3::new(0.0, 4.0, 0.0)));
        let child = scene
            .insert_under(parent, SceneNode::empty("c").with_position(Vec3::new(0.0, 1.0, 0.0)))
            .unwrap();
        let p = scene.world_position(child).unwrap();
        assert_relative_eq!(p, Point3::new(0.0, 5.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_world_matrix_composes_rotation() {
        let mut scene = Scene::new();
        let parent = scene.insert(SceneNode::empty("p").with_rotation(Vec3::new(0.0, 90.0, 0.0)));
        let child = scene
            .insert_under(parent, SceneNode::empty("c").with_position(Vec3::new(1.0, 0.0, 0.0)))
            .unwrap();
        let p = scene.world_position(child).unwrap();
        assert_relative_eq!(p, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_set_world_position_round_trip() {
        let mut scene = Scene::new();
        let parent = scene.insert(
            SceneNode::empty("p")
                .with_position(Vec3::new(1.0, -2.0, 3.0))
                .with_rotation(Vec3::new(15.0, 40.0, -25.0))
                .with_scale(Vec3::new(2.0, 0.5, 1.5)),
        );
        let child = scene
            .insert_under(parent, SceneNode::empty("c").with_position(Vec3::new(0.5, 1.0, -0.25)))
            .unwrap();
        let before = scene.get(child).unwrap().pose().position;
        let world = scene.world_position(child).unwrap();
        scene.set_world_position(child, world).unwrap();
        let after = scene.get(child).unwrap().pose().position;
        assert_relative_eq!(before, after, epsilon = 1e-9);
    }

    #[test]
    fn test_set_world_position_singular_parent() {
        let mut scene = Scene::new();
        let parent = scene.insert(SceneNode::empty("flat").with_scale(Vec3::new(1.0, 0.0, 1.0)));
        let child = scene.insert_under(parent, SceneNode::empty("c")).unwrap();
        let err = scene
            .set_world_position(child, Point3::new(0.0, 1.0, 0.0))
            .unwrap_err();
        assert_eq!(err, SceneError::SingularTransform(parent));
        assert_eq!(scene.get(child).unwrap().pose().position, Vec3::zeros());
    }

    #[test]
    fn test_add_child_rejects_cycles() {
        let mut scene = Scene::new();
        let a = scene.insert(SceneNode::empty("a"));
        let b = scene.insert_under(a, SceneNode::empty("b")).unwrap();
        let c = scene.insert_under(b, SceneNode::empty("c")).unwrap();
        assert_eq!(
            scene.add_child(c, a),
            Err(SceneError::Cycle { child: a, parent: c })
        );
        assert_eq!(
            scene.add_child(a, a),
            Err(SceneError::Cycle { child: a, parent: a })
        );
        assert_eq!(scene.parent(a), None);
    }

    #[test]
    fn test_add_child_moves_from_old_parent() {
        let mut scene = Scene::new();
        let a = scene.insert(SceneNode::empty("a"));
        let b = scene.insert(SceneNode::empty("b"));
        let c = scene.insert_under(a, SceneNode::empty("c")).unwrap();
        scene.add_child(b, c).unwrap();
        assert!(scene.children(a).is_empty());
        assert_eq!(scene.children(b), &[c]);
        assert_eq!(scene.parent(c), Some(b));
    }

    #[test]
    fn test_remove_reparents_to_grandparent() {
        let mut scene = Scene::new();
        let g = scene.insert(SceneNode::empty("g").with_position(Vec3::new(1.0, 0.0, 0.0)));
        let p = scene
            .insert_under(
                g,
                SceneNode::empty("p")
                    .with_position(Vec3::new(0.0, 2.0, 0.0))
                    .with_rotation(Vec3::new(0.0, 45.0, 0.0))
                    .with_scale(Vec3::new(2.0, 2.0, 2.0)),
            )
            .unwrap();
        let c1 = scene
            .insert_under(p, SceneNode::empty("c1").with_position(Vec3::new(1.0, 0.0, 0.0)))
            .unwrap();
        let c2 = scene
            .insert_under(p, SceneNode::empty("c2").with_position(Vec3::new(0.0, 0.0, 1.0)))
            .unwrap();
        let w1 = scene.world_position(c1).unwrap();
        let w2 = scene.world_position(c2).unwrap();

        let removed = scene.remove(p).unwrap();
        assert_eq!(removed.name(), "p");
        assert!(scene.node(p).is_none());
        assert_eq!(scene.parent(c1), Some(g));
        assert_eq!(scene.parent(c2), Some(g));
        assert_eq!(scene.children(g), &[c1, c2]);
        assert_relative_eq!(scene.world_position(c1).unwrap(), w1, epsilon = 1e-9);
        assert_relative_eq!(scene.world_position(c2).unwrap(), w2, epsilon = 1e-9);
    }

    #[test]
    fn test_remove_root_releases_children() {
        let mut scene = Scene::new();
        let p = scene.insert(SceneNode::empty("p").with_position(Vec3::new(0.0, 3.0, 0.0)));
        let c = scene
            .insert_under(p, SceneNode::empty("c").with_position(Vec3::new(0.0, 1.0, 0.0)))
            .unwrap();
        scene.remove(p).unwrap();
        assert_eq!(scene.parent(c), None);
        assert_relative_eq!(
            scene.get(c).unwrap().pose().position,
            Vec3::new(0.0, 4.0, 0.0),
            epsilon = 1e-12
        );
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_reparent_keeps_world_position() {
        let mut scene = Scene::new();
        let a = scene.insert(SceneNode::empty("a").with_position(Vec3::new(5.0, 0.0, 0.0)));
        let c = scene.insert(SceneNode::empty("c").with_position(Vec3::new(1.0, 1.0, 1.0)));
        scene.reparent(c, Some(a)).unwrap();
        assert_relative_eq!(
            scene.world_position(c).unwrap(),
            Point3::new(1.0, 1.0, 1.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            scene.get(c).unwrap().pose().position,
            Vec3::new(-4.0, 1.0, 1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_sphere_intersection_world_space() {
        let mut scene = Scene::new();
        let id = scene.insert(SceneNode::sphere(Vec3::zeros(), 1.0, Color::GRAY));
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = scene.intersect(id, &ray).unwrap();
        assert_relative_eq!(hit.point, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(hit.normal, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert!((hit.t - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_sphere_intersection() {
        let mut scene = Scene::new();
        let id = scene.insert(
            SceneNode::sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, Color::GRAY)
                .with_scale(Vec3::new(2.0, 2.0, 2.0)),
        );
        let ray = Ray::new(Point3::new(0.0, 1.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = scene.intersect(id, &ray).unwrap();
        assert_relative_eq!(hit.point, Point3::new(0.0, 1.0, 2.0), epsilon = 1e-9);
        assert!((hit.t - 8.0).abs() < 1e-9);
        assert!((hit.normal.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_node_reports_no_hit() {
        let mut scene = Scene::new();
        let id = scene.insert(SceneNode::empty("e"));
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(scene.intersect(id, &ray).is_none());
        assert!(scene.sdf(id, &Point3::origin()).is_infinite());
    }

    #[test]
    fn test_plane_sdf() {
        let mut scene = Scene::new();
        let id = scene.insert(SceneNode::plane(Vec3::zeros(), Vec3::y()));
        assert!((scene.sdf(id, &Point3::new(0.0, 5.0, 0.0)) - 5.0).abs() < 1e-12);
        assert!((scene.sdf(id, &Point3::new(0.0, -3.0, 0.0)) + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_studio_scene() {
        let scene = Scene::studio();
        assert_eq!(scene.lights().count(), 1);
        assert_eq!(scene.objects().count(), 1);
        assert!((scene.ambient().intensity - 0.23).abs() < 1e-12);
        let (light, _) = scene.lights().next().unwrap();
        assert_relative_eq!(
            scene.world_position(light).unwrap(),
            Point3::new(0.0, 4.0, 4.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_pick_nearest_selectable() {
        let mut scene = Scene::studio();
        let near = scene.insert(SceneNode::sphere(Vec3::new(0.0, 0.0, 2.0), 1.0, Color::GRAY));
        let _far = scene.insert(SceneNode::sphere(Vec3::new(0.0, 0.0, -2.0), 1.0, Color::GRAY));
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(scene.pick(&ray), Some(near));

        // The floor is hit but never selectable.
        let down = Ray::new(Point3::new(5.0, 10.0, 5.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(scene.pick(&down), None);
    }

    #[test]
    fn test_pick_light() {
        let scene = Scene::studio();
        let (light, _) = scene.lights().next().unwrap();
        let ray = Ray::new(Point3::new(0.0, 4.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(scene.pick(&ray), Some(light));
    }

    #[test]
    fn test_descendants_pre_order() {
        let mut scene = Scene::new();
        let a = scene.insert(SceneNode::empty("a"));
        let b = scene.insert_under(a, SceneNode::empty("b")).unwrap();
        let c = scene.insert_under(b, SceneNode::empty("c")).unwrap();
        let d = scene.insert_under(a, SceneNode::empty("d")).unwrap();
        assert_eq!(scene.descendants(a), vec![a, b, c, d]);
        assert_eq!(scene.descendants(b), vec![b, c]);
    }

    #[test]
    fn test_joint_connector_length() {
        let mut scene = Scene::new();
        let root = scene.insert(SceneNode::joint("root").with_position(Vec3::new(1.0, 0.0, 0.0)));
        let arm = scene.add_joint_under(root, "arm").unwrap();
        scene
            .set_local_position(arm, Vec3::new(2.0, 3.0, -1.0))
            .unwrap();
        let dist = (scene.world_position(arm).unwrap() - scene.world_position(root).unwrap()).norm();
        let joint = connector(&scene, arm);
        assert!((joint.connector_length() - (dist - CONNECTOR_CLEARANCE)).abs() < 1e-9);
    }

    #[test]
    fn test_joint_connector_points_to_parent() {
        let mut scene = Scene::new();
        let root = scene.insert(SceneNode::joint("root"));
        let arm = scene.add_joint_under(root, "arm").unwrap();
        scene
            .set_local_rotation(arm, Vec3::new(30.0, 45.0, 0.0))
            .unwrap();
        let joint = connector(&scene, arm);
        let world = scene.world_matrix(arm).unwrap();
        let conn_world = world.then(&joint.connector_pose.local_matrix());
        let center = conn_world.origin();
        assert_relative_eq!(center, Point3::new(0.0, 1.5, 0.0), epsilon = 1e-9);
        // Cap end faces the parent below.
        let axis = conn_world.apply_vec(&Vec3::z()).normalize();
        assert_relative_eq!(axis, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_joint_readjusts_when_parent_moves() {
        let mut scene = Scene::new();
        let root = scene.insert(SceneNode::joint("root"));
        let arm = scene.add_joint_under(root, "arm").unwrap();
        let hand = scene.add_joint_under(arm, "hand").unwrap();
        scene
            .set_local_scale(root, Vec3::new(2.0, 2.0, 2.0))
            .unwrap();
        assert!((connector(&scene, arm).connector_length() - (6.0 - CONNECTOR_CLEARANCE)).abs() < 1e-9);
        assert!((connector(&scene, hand).connector_length() - (6.0 - CONNECTOR_CLEARANCE)).abs() < 1e-9);
    }

    #[test]
    fn test_pivot_moves_joint_and_refreshes_connectors() {
        let mut scene = Scene::new();
        let root = scene.insert(SceneNode::joint("root"));
        let arm = scene.add_joint_under(root, "arm").unwrap();
        let hand = scene.add_joint_under(arm, "hand").unwrap();
        scene
            .set_local_rotation(arm, Vec3::new(0.0, 0.0, 90.0))
            .unwrap();
        assert!((connector(&scene, arm).connector_length() - (3.0 - CONNECTOR_CLEARANCE)).abs() < 1e-9);

        // Rolling about a pivot one unit along +X swings the arm to (1, 2, 0).
        scene.set_pivot(arm, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let arm_pos = scene.world_position(arm).unwrap();
        assert_relative_eq!(arm_pos, Point3::new(1.0, 2.0, 0.0), epsilon = 1e-9);
        let expected = 5f64.sqrt() - CONNECTOR_CLEARANCE;
        assert!((connector(&scene, arm).connector_length() - expected).abs() < 1e-9);

        // The hand's connector follows its moved parent.
        let hand_pos = scene.world_position(hand).unwrap();
        let joint = connector(&scene, hand);
        let center = scene
            .world_matrix(hand)
            .unwrap()
            .then(&joint.connector_pose.local_matrix())
            .origin();
        let mid = Point3::from((hand_pos.coords + arm_pos.coords) / 2.0);
        assert_relative_eq!(center, mid, epsilon = 1e-9);
    }

    #[test]
    fn test_attribute_setters() {
        let mut scene = Scene::new();
        let ball = scene.insert(SceneNode::sphere(Vec3::zeros(), 1.0, Color::GRAY));
        scene.set_diffuse(ball, Color::rgb8(200, 30, 30)).unwrap();
        scene.set_specular(ball, Color::gray8(64)).unwrap();
        let node = scene.get(ball).unwrap();
        assert_eq!(node.diffuse().to_rgb8(), [200, 30, 30]);
        assert_eq!(node.specular().to_rgb8(), [64, 64, 64]);

        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(scene.pick(&ray), Some(ball));
        scene.set_selectable(ball, false).unwrap();
        assert!(!scene.get(ball).unwrap().is_selectable());
        assert_eq!(scene.pick(&ray), None);
        // Still hit for rendering.
        assert!(scene.intersect(ball, &ray).is_some());
    }

    #[test]
    fn test_joint_records() {
        let mut scene = Scene::new();
        let root = scene
            .add_joint_record(&JointRecord {
                name: "hip".into(),
                rotation: Vec3::zeros(),
                translation: Vec3::new(0.0, 1.0, 0.0),
                parent: None,
            })
            .unwrap();
        let knee_record = JointRecord {
            name: "knee".into(),
            rotation: Vec3::new(0.0, 0.0, 20.0),
            translation: Vec3::new(0.0, -2.0, 0.0),
            parent: Some("hip".into()),
        };
        let knee = scene.add_joint_record(&knee_record).unwrap();
        assert_eq!(scene.parent(knee), Some(root));
        assert_eq!(scene.joint_record(knee).unwrap(), knee_record);

        let orphan = JointRecord {
            parent: Some("ankle".into()),
            ..knee_record
        };
        assert_eq!(
            scene.add_joint_record(&orphan),
            Err(SceneError::ParentNotFound("ankle".into()))
        );
    }

    #[test]
    fn test_unknown_node() {
        let mut scene = Scene::new();
        let id = scene.insert(SceneNode::empty("gone"));
        scene.remove(id).unwrap();
        assert_eq!(scene.world_position(id), Err(SceneError::NodeNotFound(id)));
        assert!(scene.set_name(id, "x").is_err());
    }
}
