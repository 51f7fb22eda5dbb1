//! Shared visual style of plane renderables

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Fixed material parameters shared by every plane; only the background
/// color varies per plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialStyle {
    pub dot_color: Color,
    pub line_color: Color,
    /// Background for planes drawn without a palette color
    pub background_color: Color,
    pub dot_radius: f32,
    pub alpha: f32,
}

impl Default for MaterialStyle {
    fn default() -> Self {
        Self {
            dot_color: Color::WHITE,
            line_color: Color::PLANE_LINE,
            background_color: Color::PLANE_BACKGROUND,
            dot_radius: 0.006_666_667,
            alpha: 0.4,
        }
    }
}

impl MaterialStyle {
    /// Clone the shared style into a per-plane material
    pub fn with_background(&self, background_color: Color) -> PlaneMaterial {
        PlaneMaterial {
            dot_color: self.dot_color,
            line_color: self.line_color,
            background_color,
            dot_radius: self.dot_radius,
            alpha: self.alpha,
            double_sided: true,
            transparent: true,
        }
    }
}

/// Material of one plane renderable: dotted grid over a tinted, alpha-blended background
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaneMaterial {
    pub dot_color: Color,
    pub line_color: Color,
    pub background_color: Color,
    pub dot_radius: f32,
    pub alpha: f32,
    pub double_sided: bool,
    pub transparent: bool,
}
