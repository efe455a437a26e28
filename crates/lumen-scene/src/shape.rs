//! Shape variants and their object-space geometric queries.

use std::sync::Arc;

use lumen_math::{Point3, Tolerance, Transform, Vec3};
use lumen_raytrace::intersect::{
    intersect_cone, intersect_plane, intersect_sphere, intersect_triangle, Cone, Plane, Sphere,
    Triangle,
};
use lumen_raytrace::{Aabb3, Ray, SurfaceHit};

use crate::error::{QueryError, SceneError};
use crate::pose::Pose;

/// Radius of the sphere used to pick lights.
pub const LIGHT_PICK_RADIUS: f64 = 0.1;
/// Radius of a joint's node sphere.
pub const JOINT_NODE_RADIUS: f64 = 0.3;
/// Cap radius of a joint's connector cone.
pub const CONNECTOR_RADIUS: f64 = 0.3;
/// Gap left between the connector and the two joint spheres it joins.
pub const CONNECTOR_CLEARANCE: f64 = 0.6;

/// Geometry carried by a scene node.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A pure transform node with no geometry.
    Empty,
    /// Point light.
    Light(LightShape),
    /// Infinite plane (finite only for display).
    Plane(PlaneShape),
    /// Sphere centered on the node origin.
    Sphere(SphereShape),
    /// Capped cone centered on the node origin.
    Cone(ConeShape),
    /// Immutable triangle mesh.
    Mesh(MeshShape),
    /// Skeleton joint: node sphere plus a connector cone toward the parent.
    Joint(JointShape),
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightShape {
    /// Scalar intensity multiplied into diffuse and specular terms.
    pub intensity: f64,
}

/// A plane through the node origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneShape {
    /// Plane normal in the node frame.
    pub normal: Vec3,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
}

impl Default for PlaneShape {
    fn default() -> Self {
        Self {
            normal: Vec3::y(),
            width: 20.0,
            height: 20.0,
        }
    }
}

/// A sphere around the node origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereShape {
    /// Radius.
    pub radius: f64,
}

/// A cone around the node origin, apex toward local -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeShape {
    /// Cap radius.
    pub radius: f64,
    /// Apex-to-cap height.
    pub height: f64,
}

/// An immutable list of triangles in the node frame.
#[derive(Debug, Clone)]
pub struct MeshShape {
    triangles: Arc<[Triangle]>,
    bounds: Aabb3,
}

/// Joint geometry: a node sphere and a connector cone spanning to the parent.
#[derive(Debug, Clone, PartialEq)]
pub struct JointShape {
    /// Sphere drawn at the joint origin.
    pub node: SphereShape,
    /// Cone connecting this joint to its parent.
    pub connector: ConeShape,
    /// Pose of the connector in the joint frame.
    pub connector_pose: Pose,
}

impl Shape {
    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Empty => "empty",
            Shape::Light(_) => "light",
            Shape::Plane(_) => "plane",
            Shape::Sphere(_) => "sphere",
            Shape::Cone(_) => "cone",
            Shape::Mesh(_) => "mesh",
            Shape::Joint(_) => "joint",
        }
    }

    /// Whether the shape provides a distance field for ray marching.
    pub fn has_distance_field(&self) -> bool {
        matches!(self, Shape::Plane(_) | Shape::Sphere(_))
    }

    /// Whether nodes of this shape are selectable unless told otherwise.
    pub fn selectable_by_default(&self) -> bool {
        !matches!(self, Shape::Plane(_))
    }

    /// Whether the shape depends on its parent's world position and must be
    /// refreshed after attachment or transform changes.
    pub fn follows_parent(&self) -> bool {
        matches!(self, Shape::Joint(_))
    }

    /// The light parameters, if this is a light.
    pub fn as_light(&self) -> Option<&LightShape> {
        match self {
            Shape::Light(light) => Some(light),
            _ => None,
        }
    }

    /// Intersect an object-space ray with the shape.
    ///
    /// `has_parent` tells joints whether their connector exists.
    pub fn intersect_local(
        &self,
        ray: &Ray,
        has_parent: bool,
    ) -> Result<Option<SurfaceHit>, QueryError> {
        let hit = match self {
            Shape::Empty => {
                return Err(QueryError::Unsupported {
                    query: "intersect",
                    kind: self.kind(),
                })
            }
            Shape::Light(_) => nearest_sphere_hit(ray, LIGHT_PICK_RADIUS),
            Shape::Plane(plane) => {
                intersect_plane(ray, &Plane::new(Point3::origin(), plane.normal))
            }
            Shape::Sphere(sphere) => nearest_sphere_hit(ray, sphere.radius),
            Shape::Cone(cone) => intersect_cone(ray, &Cone::new(cone.radius, cone.height)),
            Shape::Mesh(mesh) => mesh.intersect(ray),
            Shape::Joint(joint) => joint.intersect(ray, has_parent),
        };
        Ok(hit)
    }

    /// Signed distance from world point `p`, given the node's world origin.
    ///
    /// Planes measure vertical distance to the origin's height; spheres
    /// measure distance to the origin minus the radius. Shapes without a
    /// distance field report `+inf`.
    pub fn signed_distance(&self, world_origin: &Point3, p: &Point3) -> Result<f64, QueryError> {
        match self {
            Shape::Empty => Err(QueryError::Unsupported {
                query: "sdf",
                kind: self.kind(),
            }),
            Shape::Plane(_) => Ok(p.y - world_origin.y),
            Shape::Sphere(sphere) => Ok(Sphere {
                center: *world_origin,
                radius: sphere.radius,
            }
            .signed_distance(p)),
            Shape::Light(_) | Shape::Cone(_) | Shape::Mesh(_) | Shape::Joint(_) => Ok(f64::INFINITY),
        }
    }
}

fn nearest_sphere_hit(ray: &Ray, radius: f64) -> Option<SurfaceHit> {
    intersect_sphere(ray, &Sphere::at_origin(radius)).into_iter().next()
}

/// Map a hit found in an inner frame out through `m`, measuring `t` from
/// `outer`'s origin.
pub(crate) fn map_hit(hit: &SurfaceHit, m: &Transform, outer: &Ray) -> SurfaceHit {
    let point = m.apply_point(&hit.point);
    let normal = m
        .apply_normal(&hit.normal)
        .try_normalize(1e-12)
        .unwrap_or(hit.normal);
    SurfaceHit::new((point - outer.origin).norm(), point, normal)
}

impl MeshShape {
    /// Create a mesh from a list of triangles.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let mut bounds =
            Aabb3::from_points(triangles.iter().flat_map(|t| [&t.a, &t.b, &t.c]));
        bounds.expand(Tolerance::DEFAULT.linear);
        Self {
            triangles: triangles.into(),
            bounds,
        }
    }

    /// Create a mesh from a vertex list and triangle index triples.
    pub fn from_indexed(vertices: &[Point3], indices: &[[usize; 3]]) -> Result<Self, SceneError> {
        let triangles = indices
            .iter()
            .map(|&[i0, i1, i2]| match (vertices.get(i0), vertices.get(i1), vertices.get(i2)) {
                (Some(a), Some(b), Some(c)) => Ok(Triangle::new(*a, *b, *c)),
                _ => Err(SceneError::InvalidMesh(format!(
                    "triangle [{i0}, {i1}, {i2}] indexes past {} vertices",
                    vertices.len()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(triangles))
    }

    /// Axis-aligned box of size `sx * sy * sz` centered on the origin.
    pub fn cuboid(sx: f64, sy: f64, sz: f64) -> Self {
        let (x, y, z) = (sx / 2.0, sy / 2.0, sz / 2.0);
        let v = [
            Point3::new(-x, -y, -z),
            Point3::new(x, -y, -z),
            Point3::new(x, y, -z),
            Point3::new(-x, y, -z),
            Point3::new(-x, -y, z),
            Point3::new(x, -y, z),
            Point3::new(x, y, z),
            Point3::new(-x, y, z),
        ];
        let faces: [[usize; 3]; 12] = [
            [4, 5, 6],
            [4, 6, 7],
            [0, 2, 1],
            [0, 3, 2],
            [1, 2, 6],
            [1, 6, 5],
            [0, 4, 7],
            [0, 7, 3],
            [3, 7, 6],
            [3, 6, 2],
            [0, 1, 5],
            [0, 5, 4],
        ];
        Self::new(
            faces
                .iter()
                .map(|&[a, b, c]| Triangle::new(v[a], v[b], v[c]))
                .collect(),
        )
    }

    /// The triangles of the mesh.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Nearest triangle hit, with that triangle's face normal.
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        if self.bounds.is_empty() || ray.intersect_aabb(&self.bounds).is_none() {
            return None;
        }
        let mut nearest: Option<SurfaceHit> = None;
        for tri in self.triangles.iter() {
            if let Some(hit) = intersect_triangle(ray, tri) {
                if nearest.map_or(true, |n| hit.t < n.t) {
                    nearest = Some(hit);
                }
            }
        }
        nearest
    }
}

impl JointShape {
    /// Joint with default node and connector sizes and an unplaced connector.
    pub fn new() -> Self {
        Self {
            node: SphereShape {
                radius: JOINT_NODE_RADIUS,
            },
            connector: ConeShape {
                radius: CONNECTOR_RADIUS,
                height: 0.1,
            },
            connector_pose: Pose::default(),
        }
    }

    /// Current connector length.
    pub fn connector_length(&self) -> f64 {
        self.connector.height
    }

    /// Re-place the connector so it spans from this joint to its parent.
    ///
    /// The connector is centered on the midpoint between the two world
    /// positions, expressed in the joint frame, with its +Z axis facing the
    /// parent. Returns `false` when the joint's world matrix is singular.
    pub fn adjust(&mut self, joint_world: &Transform, parent_position: &Point3) -> bool {
        let Some(inv) = joint_world.inverse() else {
            return false;
        };
        let own = joint_world.origin();
        let mid = Point3::from((own.coords + parent_position.coords) / 2.0);
        self.connector_pose.position = inv.apply_point(&mid).coords;
        self.connector_pose.face_towards(&Point3::origin());
        self.connector.height = (own - parent_position).norm() - CONNECTOR_CLEARANCE;
        true
    }

    /// Intersect node and connector in the joint frame and keep the nearer.
    pub fn intersect(&self, ray: &Ray, has_parent: bool) -> Option<SurfaceHit> {
        let node_hit = nearest_sphere_hit(ray, self.node.radius);
        if !has_parent {
            return node_hit;
        }

        let conn_matrix = self.connector_pose.local_matrix();
        let conn_hit = conn_matrix.inverse().and_then(|inv| {
            let local = ray.transformed(&inv);
            intersect_cone(&local, &Cone::new(self.connector.radius, self.connector.height))
                .map(|hit| map_hit(&hit, &conn_matrix, ray))
        });

        match (node_hit, conn_hit) {
            (Some(n), Some(c)) => {
                if (n.point - ray.origin).norm() < (c.point - ray.origin).norm() {
                    Some(n)
                } else {
                    Some(c)
                }
            }
            (n, c) => n.or(c),
        }
    }
}

impl Default for JointShape {
    fn default() -> Self {
        Self::new()
    }
}
