//! Configuration file support.
//!
//! Settings are read from a TOML file (`cropwatch.toml` by default). Every
//! section and key is optional; missing values fall back to the defaults the
//! dashboard ships with.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::indices::BandSelection;
use crate::store::{StoreError, StoreResult};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "CROPWATCH_CONFIG";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub alerts: AlertThresholds,
    #[serde(default)]
    pub image: ImageSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub generator: GeneratorSettings,
}

/// Thresholds shared by the labeling and alert engines.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Pixels with NDVI below this are stressed.
    #[serde(rename = "ndvi_low_threshold", default = "default_ndvi_low")]
    pub ndvi_low: f64,
    /// Pixels with a soil index above this are stressed.
    #[serde(rename = "soil_index_high_threshold", default = "default_soil_high")]
    pub soil_high: f64,
}

impl AlertThresholds {
    pub fn new(ndvi_low: f64, soil_high: f64) -> Self {
        Self {
            ndvi_low,
            soil_high,
        }
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self::new(default_ndvi_low(), default_soil_high())
    }
}

/// Image defaults and spectral band assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSettings {
    #[serde(default = "default_image_side")]
    pub default_width: usize,
    #[serde(default = "default_image_side")]
    pub default_height: usize,
    #[serde(default = "default_image_side")]
    pub default_bands: usize,
    #[serde(default = "default_red_band")]
    pub red_band_index: usize,
    #[serde(default = "default_green_band")]
    pub green_band_index: usize,
    #[serde(default = "default_blue_band")]
    pub blue_band_index: usize,
    #[serde(default = "default_nir_band")]
    pub nir_band_index: usize,
    #[serde(default = "default_true")]
    pub normalize: bool,
}

impl ImageSettings {
    pub fn band_selection(&self) -> BandSelection {
        BandSelection {
            red: self.red_band_index,
            green: self.green_band_index,
            blue: self.blue_band_index,
            nir: self.nir_band_index,
        }
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            default_width: default_image_side(),
            default_height: default_image_side(),
            default_bands: default_image_side(),
            red_band_index: default_red_band(),
            green_band_index: default_green_band(),
            blue_band_index: default_blue_band(),
            nir_band_index: default_nir_band(),
            normalize: true,
        }
    }
}

/// Output raster sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default = "default_map_side")]
    pub map_width: usize,
    #[serde(default = "default_map_side")]
    pub map_height: usize,
    #[serde(default = "default_overlay_side")]
    pub overlay_width: usize,
    #[serde(default = "default_overlay_side")]
    pub overlay_height: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            map_width: default_map_side(),
            map_height: default_map_side(),
            overlay_width: default_overlay_side(),
            overlay_height: default_overlay_side(),
        }
    }
}

/// Synthetic data generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Fixed seed for reproducible refreshes; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_demo_days")]
    pub demo_sensor_days: usize,
    #[serde(default = "default_upload_days")]
    pub upload_sensor_days: usize,
    /// Number of sensor records embedded in JSON exports.
    #[serde(default = "default_export_sample")]
    pub export_sensor_sample: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: None,
            demo_sensor_days: default_demo_days(),
            upload_sensor_days: default_upload_days(),
            export_sensor_sample: default_export_sample(),
        }
    }
}

fn default_ndvi_low() -> f64 {
    0.3
}

fn default_soil_high() -> f64 {
    2.0
}

fn default_image_side() -> usize {
    100
}

fn default_red_band() -> usize {
    30
}

fn default_green_band() -> usize {
    20
}

fn default_blue_band() -> usize {
    10
}

fn default_nir_band() -> usize {
    60
}

fn default_true() -> bool {
    true
}

fn default_map_side() -> usize {
    300
}

fn default_overlay_side() -> usize {
    400
}

fn default_demo_days() -> usize {
    30
}

fn default_upload_days() -> usize {
    20
}

fn default_export_sample() -> usize {
    10
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            StoreError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> StoreResult<Self> {
        toml::from_str(content).map_err(|e| {
            StoreError::Configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `cropwatch.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> StoreResult<Self> {
        let search_paths = [
            PathBuf::from("cropwatch.toml"),
            PathBuf::from("backend/cropwatch.toml"),
            PathBuf::from("../cropwatch.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(StoreError::Configuration(
            "No cropwatch.toml found in standard locations".to_string(),
        ))
    }

    /// Resolve configuration for a running process.
    ///
    /// `CROPWATCH_CONFIG` wins when set (and must point at a readable file);
    /// otherwise the default locations are searched, and built-in defaults
    /// are used when nothing is found.
    pub fn load() -> StoreResult<Self> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            log::info!("Loading configuration from {}", path);
            return Self::from_file(path);
        }

        match Self::from_default_location() {
            Ok(config) => Ok(config),
            Err(e) => {
                log::warn!("{}; using built-in defaults", e);
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.alerts.ndvi_low, 0.3);
        assert_eq!(config.alerts.soil_high, 2.0);
        assert_eq!(config.render.map_width, 300);
        assert_eq!(config.render.overlay_height, 400);
        assert_eq!(config.generator.export_sensor_sample, 10);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[alerts]
ndvi_low_threshold = 0.25

[generator]
seed = 42
demo_sensor_days = 14
"#;

        let config = AppConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.alerts.ndvi_low, 0.25);
        assert_eq!(config.alerts.soil_high, 2.0);
        assert_eq!(config.generator.seed, Some(42));
        assert_eq!(config.generator.demo_sensor_days, 14);
        assert_eq!(config.generator.upload_sensor_days, 20);
    }

    #[test]
    fn test_band_selection_from_image_settings() {
        let bands = ImageSettings::default().band_selection();
        assert_eq!((bands.red, bands.green, bands.blue, bands.nir), (30, 20, 10, 60));
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let err = AppConfig::from_toml_str("[alerts\nndvi").unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cropwatch.toml");
        fs::write(&path, "[render]\nmap_width = 64\nmap_height = 32\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.render.map_width, 64);
        assert_eq!(config.render.map_height, 32);
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = AppConfig::from_file("/nonexistent/cropwatch.toml").unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
    }
}
