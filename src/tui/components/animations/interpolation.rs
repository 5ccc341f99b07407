//! Interpolation utilities for smooth value transitions.

use ratatui::style::Color;

/// Trait for types that can be interpolated
pub trait Interpolatable {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t.clamp(0.0, 1.0)
    }
}

/// Color interpolation in RGB space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_color(color: Color) -> Self {
        match color {
            Color::Rgb(r, g, b) => Self::new(r, g, b),
            Color::Black => Self::new(0, 0, 0),
            Color::Red => Self::new(255, 0, 0),
            Color::Green => Self::new(0, 255, 0),
            Color::Yellow => Self::new(255, 255, 0),
            Color::Blue => Self::new(0, 0, 255),
            Color::Magenta => Self::new(255, 0, 255),
            Color::Cyan => Self::new(0, 255, 255),
            Color::Gray => Self::new(128, 128, 128),
            Color::DarkGray => Self::new(64, 64, 64),
            Color::White => Self::new(255, 255, 255),
            _ => Self::new(255, 255, 255), // Default to white for indexed colors
        }
    }

    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }

    /// Linear interpolation in RGB space
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 + (other.r as f32 - self.r as f32) * t) as u8,
            g: (self.g as f32 + (other.g as f32 - self.g as f32) * t) as u8,
            b: (self.b as f32 + (other.b as f32 - self.b as f32) * t) as u8,
        }
    }
}

impl Interpolatable for RgbColor {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

/// Blend `color` towards `background` by `opacity` (1.0 = fully `color`)
pub fn fade_color(color: Color, background: Color, opacity: f32) -> Color {
    RgbColor::from_color(background)
        .interpolate(&RgbColor::from_color(color), opacity)
        .to_color()
}
