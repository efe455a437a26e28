//! Sphere tracing over the scene's combined distance field.

use lumen_math::{Point3, Vec3};
use lumen_raytrace::Ray;
use lumen_scene::{NodeId, Scene};

use crate::settings::MarchSettings;

/// Where a march converged and which node it converged on.
#[derive(Debug, Clone, Copy)]
pub struct MarchHit {
    /// Point within the hit threshold of the surface.
    pub point: Point3,
    /// Node with the smallest distance at `point`.
    pub node: NodeId,
    /// Distance traveled along the ray.
    pub travel: f64,
    /// Iterations taken.
    pub steps: u32,
}

/// Minimum signed distance over every node with a distance field, and the
/// node that attains it.
pub fn scene_sdf(scene: &Scene, p: &Point3) -> (f64, Option<NodeId>) {
    scene
        .objects()
        .filter(|(_, node)| node.has_distance_field())
        .fold((f64::INFINITY, None), |(best, best_id), (id, _)| {
            let d = scene.sdf(id, p);
            if d < best {
                (d, Some(id))
            } else {
                (best, best_id)
            }
        })
}

/// March `ray` until the field drops below the hit threshold.
///
/// Misses when the accumulated travel exceeds `max_distance` or after
/// `max_steps` iterations.
pub fn march(scene: &Scene, ray: &Ray, settings: &MarchSettings) -> Option<MarchHit> {
    let mut p = ray.origin;
    let mut travel = 0.0;
    for steps in 0..settings.max_steps {
        let (d, node) = scene_sdf(scene, &p);
        let node = node?;
        if d < settings.hit_threshold {
            return Some(MarchHit {
                point: p,
                node,
                travel,
                steps,
            });
        }
        travel += d;
        if travel > settings.max_distance {
            return None;
        }
        p += ray.direction.as_ref() * d;
    }
    None
}

/// Field gradient at `p` by central differences, normalized.
///
/// Returns `fallback` where the gradient vanishes.
pub fn estimate_normal(scene: &Scene, p: &Point3, eps: f64, fallback: Vec3) -> Vec3 {
    let sample = |dx: f64, dy: f64, dz: f64| scene_sdf(scene, &(p + Vec3::new(dx, dy, dz))).0;
    let gradient = Vec3::new(
        sample(eps, 0.0, 0.0) - sample(-eps, 0.0, 0.0),
        sample(0.0, eps, 0.0) - sample(0.0, -eps, 0.0),
        sample(0.0, 0.0, eps) - sample(0.0, 0.0, -eps),
    );
    if !gradient.iter().all(|c| c.is_finite()) {
        return fallback;
    }
    gradient.try_normalize(1e-12).unwrap_or(fallback)
}
