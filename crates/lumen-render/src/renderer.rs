//! Pixel loop, hit resolution and Phong shading.

use std::path::Path;
use std::time::Instant;

use image::{Rgb, RgbImage};
use lumen_math::{Point3, Vec3};
use lumen_raytrace::{Ray, SurfaceHit};
use lumen_scene::{Color, NodeId, RenderCam, Scene, SceneNode, Shape};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::march::{estimate_normal, march};
use crate::settings::{RenderMethod, RenderSettings};

/// A resolved primary hit.
#[derive(Debug, Clone, Copy)]
pub struct ShadingPoint {
    /// Node that was hit.
    pub node: NodeId,
    /// World-space point.
    pub point: Point3,
    /// Unit world-space normal.
    pub normal: Vec3,
}

#[derive(Debug, Clone, Copy)]
struct PointLight {
    position: Point3,
    intensity: f64,
}

/// Renders a borrowed scene through a camera.
///
/// Light and object lists are gathered once at construction; the scene is
/// never mutated.
pub struct Renderer<'a> {
    scene: &'a Scene,
    camera: RenderCam,
    settings: RenderSettings,
    objects: Vec<NodeId>,
    lights: Vec<PointLight>,
}

impl<'a> Renderer<'a> {
    /// Create a renderer with the default camera.
    pub fn new(scene: &'a Scene, settings: RenderSettings) -> Result<Self> {
        settings.validate()?;
        let objects = scene
            .objects()
            .filter(|(_, node)| !matches!(node.shape(), Shape::Empty))
            .map(|(id, _)| id)
            .collect();
        let lights = scene
            .lights()
            .filter_map(|(id, node)| {
                let intensity = node.shape().as_light()?.intensity;
                let position = scene.world_position(id).ok()?;
                Some(PointLight {
                    position,
                    intensity,
                })
            })
            .collect();
        Ok(Self {
            scene,
            camera: RenderCam::default(),
            settings,
            objects,
            lights,
        })
    }

    /// Replace the camera.
    pub fn with_camera(mut self, camera: RenderCam) -> Self {
        self.camera = camera;
        self
    }

    /// The camera.
    pub fn camera(&self) -> &RenderCam {
        &self.camera
    }

    /// The settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render and write the image to `path`; the format follows the extension.
    pub fn render(&self, path: impl AsRef<Path>, method: RenderMethod) -> Result<()> {
        let path = path.as_ref();
        let image = self.render_image(method);
        image.save(path)?;
        info!(path = %path.display(), "wrote image");
        Ok(())
    }

    /// Render into an in-memory image.
    ///
    /// Pixel `(w, h)` samples the view plane at `((w + 0.5) / W, (h + 0.5) / H)`
    /// and is stored at image row `H - h - 1`, so +Y is up.
    pub fn render_image(&self, method: RenderMethod) -> RgbImage {
        let (width, height) = (self.settings.width, self.settings.height);
        info!(width, height, ?method, objects = self.objects.len(), "rendering");
        let start = Instant::now();

        let rows: Vec<Vec<[u8; 3]>> = (0..height)
            .into_par_iter()
            .map(|h| {
                let v = (h as f64 + 0.5) / height as f64;
                (0..width)
                    .map(|w| {
                        let u = (w as f64 + 0.5) / width as f64;
                        self.camera
                            .ray(u, v)
                            .map_or(Color::BLACK, |ray| self.shade_ray(&ray, method))
                            .to_rgb8()
                    })
                    .collect()
            })
            .collect();

        let mut image = RgbImage::new(width, height);
        for (h, row) in rows.into_iter().enumerate() {
            let y = height - h as u32 - 1;
            for (w, px) in row.into_iter().enumerate() {
                image.put_pixel(w as u32, y, Rgb(px));
            }
        }

        info!(elapsed_ms = start.elapsed().as_millis() as u64, "render finished");
        image
    }

    /// Color seen along `ray`; black on a miss.
    pub fn shade_ray(&self, ray: &Ray, method: RenderMethod) -> Color {
        let Some(hit) = self.resolve(ray, method) else {
            return Color::BLACK;
        };
        match self.scene.node(hit.node) {
            Some(node) => self.phong(node, &hit, ray, method),
            None => Color::BLACK,
        }
    }

    /// Nearest hit along `ray` with the chosen algorithm.
    pub fn resolve(&self, ray: &Ray, method: RenderMethod) -> Option<ShadingPoint> {
        match method {
            RenderMethod::RayTrace => self.trace(ray).map(|(node, hit)| ShadingPoint {
                node,
                point: hit.point,
                normal: hit.normal,
            }),
            RenderMethod::RayMarch => {
                let hit = march(self.scene, ray, &self.settings.march)?;
                let normal = estimate_normal(
                    self.scene,
                    &hit.point,
                    self.settings.march.normal_epsilon,
                    -ray.direction.into_inner(),
                );
                Some(ShadingPoint {
                    node: hit.node,
                    point: hit.point,
                    normal,
                })
            }
        }
    }

    /// Nearest analytic hit over every renderable node.
    pub fn trace(&self, ray: &Ray) -> Option<(NodeId, SurfaceHit)> {
        self.objects
            .iter()
            .filter_map(|&id| self.scene.intersect(id, ray).map(|hit| (id, hit)))
            .min_by(|a, b| a.1.t.total_cmp(&b.1.t))
    }

    fn phong(&self, node: &SceneNode, hit: &ShadingPoint, ray: &Ray, method: RenderMethod) -> Color {
        let n = hit.normal;
        let mut color = node.diffuse() * self.scene.ambient().intensity;
        let shadow_origin = hit.point + n * self.settings.shadow_bias;

        for light in &self.lights {
            if self.in_shadow(hit.node, &shadow_origin, &light.position, method) {
                continue;
            }
            let (Some(l), Some(v)) = (
                (light.position - hit.point).try_normalize(1e-12),
                (ray.origin - hit.point).try_normalize(1e-12),
            ) else {
                debug!(node = ?hit.node, "degenerate shading vector, light skipped");
                continue;
            };
            let Some(h) = (l + v).try_normalize(1e-12) else {
                continue;
            };
            let lambert = n.dot(&l).max(0.0);
            let highlight = n.dot(&h).max(0.0).powf(self.settings.specular_power);
            color += node.diffuse() * (light.intensity * lambert);
            color += node.specular() * (light.intensity * highlight);
        }
        color
    }

    /// Whether `origin` is occluded from `light` using the same algorithm
    /// family as the primary hit.
    fn in_shadow(
        &self,
        shaded: NodeId,
        origin: &Point3,
        light: &Point3,
        method: RenderMethod,
    ) -> bool {
        let Some(ray) = Ray::toward(*origin, *light) else {
            return false;
        };
        match method {
            RenderMethod::RayTrace => {
                let light_distance = (light - origin).norm();
                self.objects
                    .iter()
                    .filter(|&&id| id != shaded)
                    .filter_map(|&id| self.scene.intersect(id, &ray))
                    .any(|hit| hit.t <= light_distance)
            }
            RenderMethod::RayMarch => march(self.scene, &ray, &self.settings.march).is_some(),
        }
    }
}
