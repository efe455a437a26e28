#![warn(missing_docs)]

//! Offline renderer for lumen scenes.
//!
//! Casts one ray per pixel through a [`lumen_scene::RenderCam`], resolves the
//! nearest surface either analytically ([`RenderMethod::RayTrace`]) or by
//! sphere tracing the scene's distance fields ([`RenderMethod::RayMarch`]),
//! and shades it with Phong lighting and hard shadows. Rows are rendered in
//! parallel; the scene is only borrowed.
//!
//! # Example
//!
//! ```ignore
//! use lumen_render::{RenderMethod, RenderSettings, Renderer};
//! use lumen_scene::Scene;
//!
//! let scene = Scene::studio();
//! let renderer = Renderer::new(&scene, RenderSettings::default())?;
//! renderer.render("out.png", RenderMethod::RayTrace)?;
//! ```

pub mod error;
pub mod march;
mod renderer;
mod settings;

pub use error::{RenderError, Result};
pub use renderer::{Renderer, ShadingPoint};
pub use settings::{MarchSettings, RenderMethod, RenderSettings};
