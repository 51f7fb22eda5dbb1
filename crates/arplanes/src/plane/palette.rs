//! Per-plane color assignment

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;

/// Material Design primaries, in hue order
pub const MATERIAL_COLORS: [Color; 16] = [
    Color::from_u32(0xF44336),
    Color::from_u32(0xE91E63),
    Color::from_u32(0x9C27B0),
    Color::from_u32(0x673AB7),
    Color::from_u32(0x3F51B5),
    Color::from_u32(0x2196F3),
    Color::from_u32(0x03A9F4),
    Color::from_u32(0x00BCD4),
    Color::from_u32(0x009688),
    Color::from_u32(0x4CAF50),
    Color::from_u32(0x8BC34A),
    Color::from_u32(0xCDDC39),
    Color::from_u32(0xFFEB3B),
    Color::from_u32(0xFFC107),
    Color::from_u32(0xFF9800),
    Color::from_u32(0xFF5722),
];

/// How a new plane's color is drawn from the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssignmentStrategy {
    /// Cycle through the palette in order
    RoundRobin,
    /// Uniform picks from a fixed-seed generator, reproducible across runs
    Seeded { seed: u64 },
    /// Uniform picks from an entropy-seeded generator
    #[default]
    Random,
}

/// Immutable palette configuration handed to the registry at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub colors: Vec<Color>,
    pub strategy: AssignmentStrategy,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: MATERIAL_COLORS.to_vec(),
            strategy: AssignmentStrategy::default(),
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<Color>, strategy: AssignmentStrategy) -> Result<Self, ConfigError> {
        let palette = Self { colors, strategy };
        palette.validate()?;
        Ok(palette)
    }

    /// The default colors, cycled in order
    pub fn round_robin() -> Self {
        Self {
            strategy: AssignmentStrategy::RoundRobin,
            ..Self::default()
        }
    }

    /// The default colors, picked by a seeded generator
    pub fn seeded(seed: u64) -> Self {
        Self {
            strategy: AssignmentStrategy::Seeded { seed },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors.is_empty() {
            return Err(ConfigError::Invalid("palette must contain at least one color".into()));
        }
        Ok(())
    }
}

/// Stateful drawing side of a [`Palette`]
#[derive(Debug)]
pub(crate) struct ColorPicker {
    palette: Palette,
    cursor: usize,
    rng: Option<StdRng>,
}

impl ColorPicker {
    pub(crate) fn new(palette: Palette) -> Self {
        let rng = match palette.strategy {
            AssignmentStrategy::RoundRobin => None,
            AssignmentStrategy::Seeded { seed } => Some(StdRng::seed_from_u64(seed)),
            AssignmentStrategy::Random => Some(StdRng::from_entropy()),
        };
        Self {
            palette,
            cursor: 0,
            rng,
        }
    }

    pub(crate) fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Draw a color. An empty palette yields the plane background color.
    pub(crate) fn draw(&mut self) -> Color {
        let colors = &self.palette.colors;
        if colors.is_empty() {
            return Color::PLANE_BACKGROUND;
        }
        let index = match self.rng.as_mut() {
            Some(rng) => rng.gen_range(0..colors.len()),
            None => {
                let index = self.cursor % colors.len();
                self.cursor = self.cursor.wrapping_add(1);
                index
            }
        };
        colors[index]
    }
}
