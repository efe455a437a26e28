//! Linear RGB colors for materials and the output raster.

use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

/// An RGB color with channels nominally in `[0, 1]`.
///
/// Arithmetic does not clamp; [`Color::to_rgb8`] saturates when the color
/// is written to an 8-bit image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Mid gray, the default diffuse color.
    pub const GRAY: Self = Self::new(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);
    /// Light gray, the default specular color.
    pub const LIGHT_GRAY: Self = Self::new(211.0 / 255.0, 211.0 / 255.0, 211.0 / 255.0);
    /// Yellow, used for light markers.
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);
    /// Dark olive green, the default floor color.
    pub const DARK_OLIVE_GREEN: Self = Self::new(85.0 / 255.0, 107.0 / 255.0, 47.0 / 255.0);

    /// Create a color from floating-point channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Gray level from a single 8-bit value.
    pub fn gray8(v: u8) -> Self {
        Self::rgb8(v, v, v)
    }

    /// Convert to 8-bit channels, clamping to `[0, 255]`.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, s: f64) -> Color {
        Color::new(self.r * s, self.g * s, self.b * s)
    }
}
