//! Render configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Hit-test algorithm used for primary and shadow rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMethod {
    /// Analytic intersection against every renderable node.
    #[default]
    RayTrace,
    /// Sphere tracing over the distance fields of the scene.
    RayMarch,
}

/// Sphere-tracing bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchSettings {
    /// Iteration cap.
    pub max_steps: u32,
    /// Distance below which the march counts as a hit.
    pub hit_threshold: f64,
    /// Travel beyond which the march counts as a miss.
    pub max_distance: f64,
    /// Central-difference step for normal estimation.
    pub normal_epsilon: f64,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self {
            max_steps: 200,
            hit_threshold: 0.1,
            max_distance: 10.0,
            normal_epsilon: 0.01,
        }
    }
}

/// Image size and shading parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Phong specular exponent.
    pub specular_power: f64,
    /// Offset along the normal for shadow-ray origins.
    pub shadow_bias: f64,
    /// Ray-march bounds.
    pub march: MarchSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            specular_power: 10.0,
            shadow_bias: 0.1,
            march: MarchSettings::default(),
        }
    }
}

impl RenderSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSettings(
                "image width and height must be positive".into(),
            ));
        }
        if self.shadow_bias < 0.0 {
            return Err(RenderError::InvalidSettings(
                "shadow_bias must not be negative".into(),
            ));
        }
        let march = &self.march;
        if march.max_steps == 0 {
            return Err(RenderError::InvalidSettings(
                "march.max_steps must be positive".into(),
            ));
        }
        if march.hit_threshold <= 0.0 || march.max_distance <= 0.0 {
            return Err(RenderError::InvalidSettings(
                "march.hit_threshold and march.max_distance must be positive".into(),
            ));
        }
        if march.normal_epsilon <= 0.0 {
            return Err(RenderError::InvalidSettings(
                "march.normal_epsilon must be positive".into(),
            ));
        }
        Ok(())
    }
}
