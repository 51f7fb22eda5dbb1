//! TOML configuration
//!
//! ```toml
//! [palette]
//! colors = ["#F44336", "#2196F3"]
//! strategy = { kind = "seeded", seed = 7 }
//!
//! [material]
//! alpha = 0.4
//!
//! [placement]
//! easing = 1.0
//!
//! [device]
//! vertical_fov_degrees = 60.0
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::hit::PlacementOptions;
use crate::plane::{MaterialStyle, Palette};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "ARPLANES_CONFIG";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Simulated tracking source parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Whether plane tracking is reported as supported
    pub available: bool,
    pub vertical_fov_degrees: f32,
    /// Viewport width / height
    pub aspect: f32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            available: true,
            vertical_fov_degrees: 60.0,
            aspect: 9.0 / 16.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArPlanesConfig {
    pub palette: Palette,
    pub material: MaterialStyle,
    pub placement: PlacementOptions,
    pub device: DeviceConfig,
}

impl ArPlanesConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve a config file and load it.
    ///
    /// Prefers `explicit`, then `ARPLANES_CONFIG`, then the per-user config
    /// directory. An explicit or env path must exist; a missing file in the
    /// default location yields the defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let chosen = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
        if let Some(path) = chosen {
            return Self::load(&path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<config dir>/arplanes/config.toml` for the current user
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "arplanes")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.palette.validate()?;

        let material = &self.material;
        if !(0.0..=1.0).contains(&material.alpha) {
            return Err(ConfigError::Invalid(format!(
                "material.alpha must be within [0, 1], got {}",
                material.alpha
            )));
        }
        if material.dot_radius.is_nan() || material.dot_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "material.dot_radius must be non-negative, got {}",
                material.dot_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.placement.easing) {
            return Err(ConfigError::Invalid(format!(
                "placement.easing must be within [0, 1], got {}",
                self.placement.easing
            )));
        }
        let device = &self.device;
        if !(f32::EPSILON..180.0).contains(&device.vertical_fov_degrees) {
            return Err(ConfigError::Invalid(format!(
                "device.vertical_fov_degrees must be within (0, 180), got {}",
                device.vertical_fov_degrees
            )));
        }
        if device.aspect.is_nan() || device.aspect <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "device.aspect must be positive, got {}",
                device.aspect
            )));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::plane::{AssignmentStrategy, MATERIAL_COLORS};
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = ArPlanesConfig::from_toml_str("").unwrap();
        assert_eq!(config, ArPlanesConfig::default());
        assert_eq!(config.palette.colors, MATERIAL_COLORS.to_vec());
        assert_eq!(config.palette.strategy, AssignmentStrategy::Random);
        assert_eq!(config.material.alpha, 0.4);
        assert_eq!(config.placement.easing, 1.0);
    }

    #[test]
    fn test_partial_sections() {
        let config = ArPlanesConfig::from_toml_str(
            r##"
            [palette]
            colors = ["#112233", "#445566"]
            strategy = { kind = "seeded", seed = 9 }

            [material]
            line_color = "#000000"
            "##,
        )
        .unwrap();

        assert_eq!(
            config.palette.colors,
            vec![Color::rgb(0x11, 0x22, 0x33), Color::rgb(0x44, 0x55, 0x66)]
        );
        assert_eq!(config.palette.strategy, AssignmentStrategy::Seeded { seed: 9 });
        assert_eq!(config.material.line_color, Color::rgb(0, 0, 0));
        assert_eq!(config.material.dot_color, Color::WHITE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for input in [
            "[palette]\ncolors = []",
            "[material]\nalpha = 1.5",
            "[material]\ndot_radius = -1.0",
            "[placement]\neasing = 2.0",
            "[device]\nvertical_fov_degrees = 0.0",
        ] {
            let err = ArPlanesConfig::from_toml_str(input).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{input}: {err}");
        }
    }

    #[test]
    fn test_bad_color_is_parse_error() {
        let err = ArPlanesConfig::from_toml_str("[palette]\ncolors = [\"red\"]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[device]\navailable = false").unwrap();

        let config = ArPlanesConfig::load(file.path()).unwrap();
        assert!(!config.device.available);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = ArPlanesConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[placement]\nface_camera = false\n").unwrap();

        let config = ArPlanesConfig::load_or_default(Some(&path)).unwrap();
        assert!(!config.placement.face_camera);
    }

    #[test]
    fn test_serialized_config_loads_back() {
        let mut config = ArPlanesConfig::default();
        config.palette = crate::plane::Palette::seeded(3);
        let text = config.to_toml_string().unwrap();
        assert_eq!(ArPlanesConfig::from_toml_str(&text).unwrap(), config);
    }
}
