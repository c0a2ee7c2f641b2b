use isovox_common::{ColorError, Hsl};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI};
use std::path::Path;

/// Errors from loading an editor configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("paint color: {0}")]
    Color(#[from] ColorError),
}

/// Tunables for an editing session. Missing fields in a config file take
/// their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Voxel edge length in pixels at scale 1.
    pub base_voxel_size: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Camera angle at session start, radians.
    pub initial_angle: f64,
    pub initial_scale: f64,
    /// Pixels of horizontal drag per radian of rotation.
    pub rotate_sensitivity: f64,
    /// Wheel delta that zooms by a factor of two.
    pub wheel_zoom_divisor: f64,
    /// Rotation applied by the `+` and `-` keys, radians.
    pub key_rotate_step: f64,
    pub paint: Hsl,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            base_voxel_size: 32.0,
            viewport_width: 1200.0,
            viewport_height: 800.0,
            initial_angle: FRAC_PI_4,
            initial_scale: 1.0,
            rotate_sensitivity: 200.0,
            wheel_zoom_divisor: 300.0,
            key_rotate_step: PI / 64.0,
            paint: Hsl::default(),
        }
    }
}

impl EditorConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Every size, scale and divisor must be positive, the initial angle
    /// finite and the paint color in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Hsl::new(self.paint.h, self.paint.s, self.paint.l)?;
        if !self.initial_angle.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "initial_angle",
                value: self.initial_angle,
            });
        }
        let fields = [
            ("base_voxel_size", self.base_voxel_size),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("initial_scale", self.initial_scale),
            ("rotate_sensitivity", self.rotate_sensitivity),
            ("wheel_zoom_divisor", self.wheel_zoom_divisor),
            ("key_rotate_step", self.key_rotate_step),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rotate_sensitivity, 200.0);
        assert_eq!(config.wheel_zoom_divisor, 300.0);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "viewport_width": 640, "paint": {{ "h": 10, "s": 20, "l": 30 }} }}"#)
            .unwrap();
        let config = EditorConfig::load(file.path()).unwrap();
        assert_eq!(config.viewport_width, 640.0);
        assert_eq!(config.viewport_height, 800.0);
        assert_eq!(config.paint, Hsl::new(10, 20, 30).unwrap());
    }

    #[test]
    fn non_positive_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "base_voxel_size": 0 }}"#).unwrap();
        let err = EditorConfig::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "base_voxel_size",
                ..
            }
        ));
    }

    #[test]
    fn non_finite_angle_rejected() {
        let config = EditorConfig {
            initial_angle: f64::INFINITY,
            ..EditorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "initial_angle",
                ..
            })
        ));
    }

    #[test]
    fn paint_out_of_range_rejected() {
        let config = EditorConfig {
            paint: Hsl { h: 500, s: 0, l: 0 },
            ..EditorConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Color(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EditorConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
