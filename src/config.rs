//! Configuration for stability analysis
//!
//! All tunables (plate geometry, window cadence, statistical constants) live
//! in one immutable struct handed to the analyzer at construction time. The
//! struct can be loaded from a JSON file so a trial can be re-analysed with
//! different settings without recompiling.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::AnalysisError;

/// Complete analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub plate: PlateGeometry,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub features: FeatureConfig,
}

/// Position of one pressure sensor on the plate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerPosition {
    pub x: f64,
    pub y: f64,
}

impl CornerPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Sensor-plate corner layout used to weight the four pressure readings
///
/// The default is the 50 x 100 reference plate:
/// A and B on the x = 0 edge, C and D on the x = width edge,
/// B and C on the y = height edge, A and D on the y = 0 edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateGeometry {
    pub a: CornerPosition,
    pub b: CornerPosition,
    pub c: CornerPosition,
    pub d: CornerPosition,
}

impl PlateGeometry {
    /// Standard rectangular layout for a plate of the given size
    pub fn rectangular(width: f64, height: f64) -> Self {
        Self {
            a: CornerPosition::new(0.0, 0.0),
            b: CornerPosition::new(0.0, height),
            c: CornerPosition::new(width, height),
            d: CornerPosition::new(width, 0.0),
        }
    }

    /// Geometric centre of the four corners
    pub fn center(&self) -> (f64, f64) {
        let corners = self.corners();
        let x = corners.iter().map(|c| c.x).sum::<f64>() / 4.0;
        let y = corners.iter().map(|c| c.y).sum::<f64>() / 4.0;
        (x, y)
    }

    pub fn corners(&self) -> [CornerPosition; 4] {
        [self.a, self.b, self.c, self.d]
    }
}

impl Default for PlateGeometry {
    fn default() -> Self {
        Self::rectangular(50.0, 100.0)
    }
}

/// Sliding window cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window capacity in samples (200 = 2 s at 100 Hz)
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// New samples between feature emissions once the window is full
    #[serde(default = "default_slide_step")]
    pub slide_step: usize,
}

fn default_window_size() -> usize {
    200
}

fn default_slide_step() -> usize {
    50
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            slide_step: default_slide_step(),
        }
    }
}

/// Statistical constants used by the feature sets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Sampling rate of the CoP stream in Hz
    #[serde(default = "default_acquisition_frequency")]
    pub acquisition_frequency: f64,
    /// One-sided 95% z-score for the confidence circle
    #[serde(default = "default_z05")]
    pub z05: f64,
    /// F statistic for the streaming confidence ellipse
    #[serde(default = "default_f05")]
    pub f05: f64,
    /// chi2(0.95, 2) used by the batch prediction ellipse
    #[serde(default = "default_chi_square_95")]
    pub chi_square_95: f64,
}

fn default_acquisition_frequency() -> f64 {
    100.0
}

fn default_z05() -> f64 {
    1.645
}

fn default_f05() -> f64 {
    3.0
}

fn default_chi_square_95() -> f64 {
    5.991
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            acquisition_frequency: default_acquisition_frequency(),
            z05: default_z05(),
            f05: default_f05(),
            chi_square_95: default_chi_square_95(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or the defaults if the file is missing or
    /// its JSON is invalid. Missing fields take their default values.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Check every value is usable by the analyzer
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.window.window_size == 0 {
            return Err(invalid("window.window_size", "must be greater than 0"));
        }
        if self.window.slide_step == 0 {
            return Err(invalid("window.slide_step", "must be greater than 0"));
        }

        let frequency = self.features.acquisition_frequency;
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(invalid(
                "features.acquisition_frequency",
                &format!("must be a positive finite rate (got {})", frequency),
            ));
        }

        let constants = [
            ("features.z05", self.features.z05),
            ("features.f05", self.features.f05),
            ("features.chi_square_95", self.features.chi_square_95),
        ];
        for (field, value) in constants {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(
                    field,
                    &format!("must be finite and non-negative (got {})", value),
                ));
            }
        }

        let corners = self.plate.corners();
        if corners
            .iter()
            .any(|corner| !corner.x.is_finite() || !corner.y.is_finite())
        {
            return Err(invalid("plate", "corner coordinates must be finite"));
        }
        if corners.iter().all(|corner| *corner == corners[0]) {
            return Err(invalid("plate", "all four corners coincide"));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> AnalysisError {
    AnalysisError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.window.window_size, 200);
        assert_eq!(config.window.slide_step, 50);
        assert_eq!(config.features.acquisition_frequency, 100.0);
        assert_eq!(config.features.z05, 1.645);
        assert_eq!(config.features.f05, 3.0);
        assert_eq!(config.features.chi_square_95, 5.991);
        assert_eq!(config.plate.c, CornerPosition::new(50.0, 100.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AnalyzerConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AnalyzerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: AnalyzerConfig =
            serde_json::from_str(r#"{ "window": { "slide_step": 25 } }"#).unwrap();
        assert_eq!(parsed.window.slide_step, 25);
        assert_eq!(parsed.window.window_size, 200);
        assert_eq!(parsed.features, FeatureConfig::default());
        assert_eq!(parsed.plate, PlateGeometry::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AnalyzerConfig::load_from_file("/nonexistent/postural_sway.json");
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_plate_center() {
        assert_eq!(PlateGeometry::default().center(), (25.0, 50.0));
        assert_eq!(PlateGeometry::rectangular(2.0, 4.0).center(), (1.0, 2.0));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut config = AnalyzerConfig::default();
        config.window.window_size = 0;
        match config.validate() {
            Err(AnalysisError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "window.window_size")
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_frequency() {
        let mut config = AnalyzerConfig::default();
        config.features.acquisition_frequency = 0.0;
        assert!(config.validate().is_err());

        config.features.acquisition_frequency = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_collapsed_plate() {
        let mut config = AnalyzerConfig::default();
        config.plate = PlateGeometry::rectangular(0.0, 0.0);
        assert!(config.validate().is_err());
    }
}
