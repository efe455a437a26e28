//! Optional TOML configuration for the `lumen` binary.
//!
//! ```toml
//! [render]
//! width = 300
//! height = 200
//!
//! [render.march]
//! max_steps = 400
//!
//! [animation]
//! min = 1
//! max = 30
//! easing = "ease_in_out"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use lumen_anim::{Easing, FrameRange};
use lumen_render::RenderSettings;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderSettings,
    pub animation: AnimationConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub min: u32,
    pub max: u32,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let range = FrameRange::default();
        Self {
            min: range.min,
            max: range.max,
            easing: Easing::default(),
        }
    }
}

impl AnimationConfig {
    pub fn range(&self) -> FrameRange {
        FrameRange {
            min: self.min,
            max: self.max,
        }
    }
}

impl Config {
    /// Load and validate `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Self::parse(&text).with_context(|| format!("in config {}", path.display()))?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.render.validate()?;
        config.animation.range().validate()?;
        Ok(config)
    }
}
